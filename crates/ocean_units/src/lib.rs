//! Ocean Units - Denomination types and conversions for the OCEAN DeFi contracts
//!
//! The contracts report amounts in several fixed-point denominations:
//! - `UsdMicro`: USD scaled by 1e6 (principal, income, volumes)
//! - `UsdE8`: USD scaled by 1e8 (income stream totals, tier tables)
//! - `RamaWei`: native RAMA scaled by 1e18
//! - `Wad`: 1e18 fixed-point rates (daily accrual)
//! - `Bps`: basis points (10,000 bps = 100%)
//!
//! Each denomination is its own type so call sites never multiply or divide
//! by a bare scaling constant. Float conversion only happens when a value is
//! handed to a display layer.

pub mod money;
pub mod rate;

pub use money::{RamaWei, UsdE8, UsdMicro, UsdPerRama};
pub use rate::{Bps, Wad};

/// Micro-USD per USD (1e6)
pub const MICRO_USD_SCALE: u128 = 1_000_000;

/// 8-decimal USD per USD (1e8)
pub const USD_E8_SCALE: u128 = 100_000_000;

/// Wei per RAMA (1e18)
pub const WEI_PER_RAMA: u128 = 1_000_000_000_000_000_000;

/// WAD fixed-point one (1e18)
pub const WAD_SCALE: u128 = 1_000_000_000_000_000_000;

/// Basis points scale (10,000 bps = 100%)
pub const BPS_SCALE: u128 = 10_000;

/// Divide a raw fixed-point integer down to its display value.
#[inline]
pub fn scale_down(raw: u128, scale: u128) -> f64 {
    if scale == 0 {
        return 0.0;
    }
    raw as f64 / scale as f64
}

/// Multiply a display value up to a raw fixed-point integer.
///
/// Non-finite and non-positive input maps to 0. Values beyond `u128::MAX`
/// saturate.
#[inline]
pub fn scale_up(value: f64, scale: u128) -> u128 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    (value * scale as f64).round() as u128
}

/// Convert a wei amount to RAMA.
#[inline]
pub fn from_wei_to_rama(wei: u128) -> f64 {
    scale_down(wei, WEI_PER_RAMA)
}

/// Convert a RAMA amount to wei.
#[inline]
pub fn from_rama_to_wei(rama: f64) -> u128 {
    scale_up(rama, WEI_PER_RAMA)
}

/// Convert micro-USD to USD.
#[inline]
pub fn from_micro_usd(micro: u128) -> f64 {
    scale_down(micro, MICRO_USD_SCALE)
}

/// Convert USD to micro-USD.
#[inline]
pub fn to_micro_usd(usd: f64) -> u128 {
    scale_up(usd, MICRO_USD_SCALE)
}

/// Convert basis points to percent (500 bps -> 5.0).
#[inline]
pub fn bps_to_percent(bps: u128) -> f64 {
    scale_down(bps, 100)
}

/// Convert a WAD rate to percent (1e16 -> 1.0).
#[inline]
pub fn wad_to_percent(wad: u128) -> f64 {
    scale_down(wad, WAD_SCALE / 100)
}

/// Multiply then divide in u128, saturating instead of overflowing.
///
/// Falls back to dividing first when the product would overflow, which loses
/// at most `denominator - 1` units of precision.
#[inline]
pub fn mul_div(value: u128, numerator: u128, denominator: u128) -> u128 {
    if denominator == 0 {
        return 0;
    }
    match value.checked_mul(numerator) {
        Some(product) => product / denominator,
        None => (value / denominator).saturating_mul(numerator),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_up_rejects_non_finite() {
        assert_eq!(scale_up(f64::NAN, MICRO_USD_SCALE), 0);
        assert_eq!(scale_up(f64::INFINITY, MICRO_USD_SCALE), 0);
        assert_eq!(scale_up(-3.5, MICRO_USD_SCALE), 0);
    }

    #[test]
    fn test_micro_usd_conversions() {
        assert_eq!(from_micro_usd(5_000_000), 5.0);
        assert_eq!(to_micro_usd(12.345678), 12_345_678);
    }

    #[test]
    fn test_rate_helpers() {
        assert_eq!(bps_to_percent(12_345), 123.45);
        assert_eq!(wad_to_percent(5_000_000_000_000_000), 0.5);
    }

    #[test]
    fn test_mul_div_overflow_path() {
        assert_eq!(mul_div(10, 200, 100), 20);
        assert_eq!(mul_div(u128::MAX, 2, 2), u128::MAX - 1);
        assert_eq!(mul_div(7, 3, 0), 0);
    }
}
