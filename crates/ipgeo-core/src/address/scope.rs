//! Reachability classification of IPv4 addresses.

use std::net::Ipv4Addr;

/// Special-purpose block an address belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReservedRange {
    ThisNetwork,
    Private,
    SharedAddressSpace,
    Loopback,
    LinkLocal,
    ProtocolAssignments,
    Documentation,
    Benchmarking,
    Multicast,
    Reserved,
}

impl ReservedRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservedRange::ThisNetwork => "this_network",
            ReservedRange::Private => "private",
            ReservedRange::SharedAddressSpace => "shared_address_space",
            ReservedRange::Loopback => "loopback",
            ReservedRange::LinkLocal => "link_local",
            ReservedRange::ProtocolAssignments => "protocol_assignments",
            ReservedRange::Documentation => "documentation",
            ReservedRange::Benchmarking => "benchmarking",
            ReservedRange::Multicast => "multicast",
            ReservedRange::Reserved => "reserved",
        }
    }
}

impl std::fmt::Display for ReservedRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether an address can be geolocated at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressScope {
    Public,
    NonRoutable(ReservedRange),
}

impl AddressScope {
    pub fn is_public(&self) -> bool {
        matches!(self, AddressScope::Public)
    }
}

/// Networks that are never globally routable, as (base, prefix length).
const NON_ROUTABLE: &[(Ipv4Addr, u8, ReservedRange)] = &[
    (Ipv4Addr::new(0, 0, 0, 0), 8, ReservedRange::ThisNetwork),
    (Ipv4Addr::new(10, 0, 0, 0), 8, ReservedRange::Private),
    (Ipv4Addr::new(100, 64, 0, 0), 10, ReservedRange::SharedAddressSpace),
    (Ipv4Addr::new(127, 0, 0, 0), 8, ReservedRange::Loopback),
    (Ipv4Addr::new(169, 254, 0, 0), 16, ReservedRange::LinkLocal),
    (Ipv4Addr::new(172, 16, 0, 0), 12, ReservedRange::Private),
    (Ipv4Addr::new(192, 0, 0, 0), 24, ReservedRange::ProtocolAssignments),
    (Ipv4Addr::new(192, 0, 2, 0), 24, ReservedRange::Documentation),
    (Ipv4Addr::new(192, 168, 0, 0), 16, ReservedRange::Private),
    (Ipv4Addr::new(198, 18, 0, 0), 15, ReservedRange::Benchmarking),
    (Ipv4Addr::new(198, 51, 100, 0), 24, ReservedRange::Documentation),
    (Ipv4Addr::new(203, 0, 113, 0), 24, ReservedRange::Documentation),
    (Ipv4Addr::new(224, 0, 0, 0), 4, ReservedRange::Multicast),
    // Includes the limited broadcast address
    (Ipv4Addr::new(240, 0, 0, 0), 4, ReservedRange::Reserved),
];

fn in_network(addr: Ipv4Addr, base: Ipv4Addr, prefix: u8) -> bool {
    let mask = u32::MAX.checked_shl(32 - u32::from(prefix)).unwrap_or(0);
    u32::from(addr) & mask == u32::from(base) & mask
}

/// Classify an address as public or as a member of a non-routable block.
pub fn classify(addr: Ipv4Addr) -> AddressScope {
    NON_ROUTABLE
        .iter()
        .find(|(base, prefix, _)| in_network(addr, *base, *prefix))
        .map_or(AddressScope::Public, |(_, _, range)| {
            AddressScope::NonRoutable(*range)
        })
}
