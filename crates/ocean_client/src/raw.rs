//! Raw ABI values to typed denominations

use alloy::primitives::U256;
use ocean_units::{Bps, RamaWei, UsdE8, UsdMicro, Wad};

/// Saturates at `u128::MAX`
pub fn u128_of(value: U256) -> u128 {
    u128::try_from(value).unwrap_or(u128::MAX)
}

/// Saturates at `u64::MAX`
pub fn u64_of(value: U256) -> u64 {
    u64::try_from(value).unwrap_or(u64::MAX)
}

pub fn usd_micro(value: U256) -> UsdMicro {
    UsdMicro(u128_of(value))
}

pub fn usd_e8(value: U256) -> UsdE8 {
    UsdE8(u128_of(value))
}

pub fn rama_wei(value: U256) -> RamaWei {
    RamaWei(u128_of(value))
}

pub fn wad(value: U256) -> Wad {
    Wad(u128_of(value))
}

pub fn bps(value: U256) -> Bps {
    Bps::from_raw(u128_of(value))
}

pub fn u256(value: u128) -> U256 {
    U256::from(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saturating_conversions() {
        assert_eq!(u128_of(U256::MAX), u128::MAX);
        assert_eq!(u64_of(U256::from(u128::MAX)), u64::MAX);
        assert_eq!(usd_micro(U256::from(5_000_000u64)), UsdMicro::new(5_000_000));
        assert_eq!(bps(U256::from(250u64)), Bps(250));
    }
}
