//! Property tests for the unit conversions
//! Run with: cargo test -p ocean-units

use ocean_units::*;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn wei_to_rama_is_division(wei in any::<u128>()) {
        prop_assert_eq!(from_wei_to_rama(wei), wei as f64 / 1e18);
    }

    #[test]
    fn rama_wei_round_trip(rama in 0.0f64..1_000_000_000.0) {
        let back = from_wei_to_rama(from_rama_to_wei(rama));
        let tolerance = (rama.abs() * 1e-12).max(1e-12);
        prop_assert!((back - rama).abs() <= tolerance, "{} -> {}", rama, back);
    }

    #[test]
    fn micro_usd_is_division(micro in any::<u64>()) {
        prop_assert_eq!(from_micro_usd(micro as u128), micro as f64 / 1e6);
    }

    #[test]
    fn micro_usd_round_trip_recovers_integer(micro in 0u128..1_000_000_000_000_000) {
        prop_assert_eq!(to_micro_usd(from_micro_usd(micro)), micro);
    }

    #[test]
    fn typed_round_trip_matches_free_functions(micro in 0u128..1_000_000_000_000_000) {
        let typed = UsdMicro::new(micro);
        prop_assert_eq!(typed.to_usd(), from_micro_usd(micro));
        prop_assert_eq!(UsdMicro::from_usd(typed.to_usd()), typed);
    }

    #[test]
    fn fee_and_net_add_up(amount in 0u128..u64::MAX as u128, bps in 0u32..=10_000) {
        let fee = Bps(bps).apply(amount);
        let net = Bps(bps).complement().apply(amount);
        // Two floors lose at most one unit
        prop_assert!(amount - (fee + net) <= 1);
    }
}

#[test]
fn non_finite_inputs_convert_to_zero() {
    assert_eq!(from_rama_to_wei(f64::NAN), 0);
    assert_eq!(to_micro_usd(f64::NEG_INFINITY), 0);
    assert_eq!(RamaWei::from_rama(f64::INFINITY), RamaWei::ZERO);
}
