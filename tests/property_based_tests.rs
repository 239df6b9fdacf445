//! Property-Based Tests for Address Resolution
//!
//! Invariants that hold for any spoken octets: valid public addresses reach
//! the oracle exactly once, anything else never does.

use ipgeo_testing::{MockGeoOracle, fixtures};
use ipgeo_workspace::{
    GeoRecord, Outcome, Resolution, SkillConfig, SkillRouter, core::address,
};
use proptest::prelude::*;
use std::net::Ipv4Addr;

fn router(oracle: &MockGeoOracle) -> SkillRouter<MockGeoOracle> {
    SkillRouter::new(oracle.clone(), SkillConfig::default())
}

fn as_octets(text: &[String; 4]) -> [&str; 4] {
    std::array::from_fn(|i| text[i].as_str())
}

fn route(oracle: &MockGeoOracle, octets: [&str; 4]) -> Outcome {
    tokio_test::block_on(async {
        router(oracle)
            .route(&fixtures::lookup_request(octets))
            .await
            .expect("lookup intent never fails fatally with a healthy oracle")
            .outcome
    })
}

// Octet text outside 0-255, or not a decimal number at all
fn bad_octet_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        (256u32..100_000).prop_map(|n| n.to_string()),
        "[a-z]{1,8}",
        Just(String::new()),
        Just("-1".to_string()),
        Just("1.5".to_string()),
    ]
}

// Addresses inside 10/8, 172.16/12 and 192.168/16
fn private_address_strategy() -> impl Strategy<Value = Ipv4Addr> {
    prop_oneof![
        any::<[u8; 3]>().prop_map(|[b, c, d]| Ipv4Addr::new(10, b, c, d)),
        (16u8..32, any::<u8>(), any::<u8>()).prop_map(|(b, c, d)| Ipv4Addr::new(172, b, c, d)),
        any::<[u8; 2]>().prop_map(|[c, d]| Ipv4Addr::new(192, 168, c, d)),
    ]
}

proptest! {
    /// Property: four in-range octets always form a valid address, and the
    /// oracle is consulted exactly when that address is public
    #[test]
    fn prop_valid_octets_consult_oracle_iff_public(octets in any::<[u8; 4]>()) {
        let oracle = MockGeoOracle::new().with_default_record(GeoRecord::new("C", "S", "N"));
        let text = octets.map(|o| o.to_string());
        let outcome = route(&oracle, as_octets(&text));

        let dotted = text.join(".");
        match address::resolve_dotted(dotted.as_str()) {
            Resolution::Public(_) => {
                prop_assert_eq!(outcome, Outcome::Resolved);
                prop_assert_eq!(oracle.call_history(), vec![dotted]);
            }
            Resolution::NonRoutable { .. } => {
                prop_assert_eq!(outcome, Outcome::PrivateAddress);
                prop_assert_eq!(oracle.call_count(), 0);
            }
            Resolution::Malformed(e) => prop_assert!(false, "in-range octets rejected: {}", e),
        }
    }

    /// Property: any out-of-range or non-numeric octet gives Invalid-Address
    /// without touching the oracle
    #[test]
    fn prop_bad_octet_is_invalid(
        position in 0usize..4,
        bad in bad_octet_strategy(),
        good in any::<[u8; 4]>(),
    ) {
        let oracle = MockGeoOracle::new().with_default_record(GeoRecord::default());
        let mut text = good.map(|o| o.to_string());
        text[position] = bad;

        let outcome = route(&oracle, as_octets(&text));

        prop_assert_eq!(outcome, Outcome::InvalidAddress);
        prop_assert_eq!(oracle.call_count(), 0);
    }

    /// Property: every RFC 1918 address short-circuits to Private-Address
    #[test]
    fn prop_private_ranges_short_circuit(addr in private_address_strategy()) {
        let oracle = MockGeoOracle::new().with_default_record(GeoRecord::default());
        let text = addr.octets().map(|o| o.to_string());

        let outcome = route(&oracle, as_octets(&text));

        prop_assert_eq!(outcome, Outcome::PrivateAddress);
        prop_assert_eq!(oracle.call_count(), 0);
    }

    /// Property: the same envelope always yields the same response
    #[test]
    fn prop_responses_are_idempotent(octets in any::<[u8; 4]>()) {
        let oracle = MockGeoOracle::new();
        let router = router(&oracle);
        let text = octets.map(|o| o.to_string());
        let request = fixtures::lookup_request(as_octets(&text));

        let (first, second) = tokio_test::block_on(async {
            (
                router.handle(&request).await.unwrap(),
                router.handle(&request).await.unwrap(),
            )
        });

        prop_assert_eq!(first, second);
    }
}
