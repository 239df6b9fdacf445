//! # Address Resolution
//!
//! Turns the four spoken octet slots into a dotted-quad string, checks that
//! it parses as an IPv4 address and rejects addresses that are not globally
//! routable. No parsed address is carried forward: the oracle receives the
//! assembled string and parses it again.

mod scope;

pub use scope::{AddressScope, ReservedRange, classify};

use std::net::Ipv4Addr;
use thiserror::Error;

/// Slot names holding the octets, most significant first.
pub const OCTET_SLOTS: [&str; 4] = ["One", "Two", "Three", "Four"];

/// Why spoken slots do not form a usable address.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("slot '{0}' is missing")]
    MissingSlot(&'static str),

    #[error("'{address}' is not a dotted-quad IPv4 address: {reason}")]
    Unparseable { address: String, reason: String },
}

/// Outcome of resolving the four octet slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Valid and globally routable; ready for the oracle.
    Public(String),
    /// Valid but inside a non-routable block.
    NonRoutable {
        address: String,
        range: ReservedRange,
    },
    /// Missing slot or unparseable address.
    Malformed(AddressError),
}

/// Join the octet slots as `One.Two.Three.Four`.
///
/// `value_of` is asked for each slot in order; the first absent slot aborts
/// assembly.
pub fn assemble<'a, F>(mut value_of: F) -> Result<String, AddressError>
where
    F: FnMut(&'static str) -> Option<&'a str>,
{
    let mut octets = Vec::with_capacity(OCTET_SLOTS.len());
    for slot in OCTET_SLOTS {
        octets.push(value_of(slot).ok_or(AddressError::MissingSlot(slot))?);
    }
    Ok(octets.join("."))
}

/// Parse a candidate with standard dotted-quad rules: exactly four decimal
/// octets, each 0-255.
pub fn validate(candidate: &str) -> Result<Ipv4Addr, AddressError> {
    candidate
        .parse::<Ipv4Addr>()
        .map_err(|e| AddressError::Unparseable {
            address: candidate.to_string(),
            reason: e.to_string(),
        })
}

/// Assemble, validate and scope-check in one pass.
pub fn resolve<'a, F>(value_of: F) -> Resolution
where
    F: FnMut(&'static str) -> Option<&'a str>,
{
    match assemble(value_of) {
        Ok(address) => resolve_dotted(address),
        Err(e) => Resolution::Malformed(e),
    }
}

/// Validate and scope-check an already joined dotted quad.
pub fn resolve_dotted(address: impl Into<String>) -> Resolution {
    let address = address.into();
    match validate(&address).map(classify) {
        Ok(AddressScope::Public) => Resolution::Public(address),
        Ok(AddressScope::NonRoutable(range)) => Resolution::NonRoutable { address, range },
        Err(e) => Resolution::Malformed(e),
    }
}
