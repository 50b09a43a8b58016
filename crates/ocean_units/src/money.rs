//! Monetary denominations

use core::fmt;
use core::iter::Sum;
use core::ops::Add;

use crate::{mul_div, scale_down, scale_up, Bps, MICRO_USD_SCALE, USD_E8_SCALE, WEI_PER_RAMA};

macro_rules! denomination {
    ($(#[$meta:meta])* $name:ident, $scale:expr, $unit:literal, $places:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub u128);

        impl $name {
            pub const ZERO: Self = Self(0);

            /// Raw units per display unit
            pub const SCALE: u128 = $scale;

            pub const fn new(raw: u128) -> Self {
                Self(raw)
            }

            pub const fn raw(self) -> u128 {
                self.0
            }

            pub const fn is_zero(self) -> bool {
                self.0 == 0
            }

            /// Build from a display value; non-finite or negative input is zero
            pub fn from_display(value: f64) -> Self {
                Self(scale_up(value, Self::SCALE))
            }

            pub fn to_display(self) -> f64 {
                scale_down(self.0, Self::SCALE)
            }

            pub fn saturating_add(self, other: Self) -> Self {
                Self(self.0.saturating_add(other.0))
            }

            pub fn saturating_sub(self, other: Self) -> Self {
                Self(self.0.saturating_sub(other.0))
            }

            /// `self * pct / 100`
            pub fn mul_percent(self, pct: u128) -> Self {
                Self(mul_div(self.0, pct, 100))
            }

            /// `self * bps / 10_000`
            pub fn mul_bps(self, bps: Bps) -> Self {
                Self(bps.apply(self.0))
            }
        }

        impl Add for $name {
            type Output = Self;

            fn add(self, rhs: Self) -> Self {
                self.saturating_add(rhs)
            }
        }

        impl Sum for $name {
            fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
                iter.fold(Self::ZERO, Add::add)
            }
        }

        impl<'a> Sum<&'a $name> for $name {
            fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
                iter.copied().sum()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{:.*} {}", $places, self.to_display(), $unit)
            }
        }

        #[cfg(feature = "serde")]
        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_f64(self.to_display())
            }
        }
    };
}

denomination!(
    /// USD with 6 decimals, the unit of principal, income and volume fields
    UsdMicro,
    MICRO_USD_SCALE,
    "USD",
    2
);

denomination!(
    /// USD with 8 decimals, used by the income stream totals and tier tables
    UsdE8,
    USD_E8_SCALE,
    "USD",
    2
);

denomination!(
    /// Native RAMA in wei
    RamaWei,
    WEI_PER_RAMA,
    "RAMA",
    4
);

impl UsdMicro {
    pub fn from_usd(usd: f64) -> Self {
        Self::from_display(usd)
    }

    pub fn to_usd(self) -> f64 {
        self.to_display()
    }
}

impl UsdE8 {
    pub fn to_usd(self) -> f64 {
        self.to_display()
    }

    /// Truncates the two extra decimals
    pub fn to_micro(self) -> UsdMicro {
        UsdMicro(self.0 / (USD_E8_SCALE / MICRO_USD_SCALE))
    }
}

impl From<UsdMicro> for UsdE8 {
    fn from(value: UsdMicro) -> Self {
        UsdE8(value.0.saturating_mul(USD_E8_SCALE / MICRO_USD_SCALE))
    }
}

impl RamaWei {
    pub fn from_rama(rama: f64) -> Self {
        Self::from_display(rama)
    }

    pub fn to_rama(self) -> f64 {
        self.to_display()
    }
}

/// Spot price of one RAMA in micro-USD
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct UsdPerRama(pub UsdMicro);

impl UsdPerRama {
    pub const fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    /// Derive a price from a matching pair of amounts.
    ///
    /// Returns `None` when either side is zero.
    pub fn from_pair(usd: UsdMicro, rama: RamaWei) -> Option<Self> {
        if usd.is_zero() || rama.is_zero() {
            return None;
        }
        Some(Self(UsdMicro(mul_div(usd.0, WEI_PER_RAMA, rama.0))))
    }

    pub fn usd_for(self, rama: RamaWei) -> UsdMicro {
        UsdMicro(mul_div(rama.0, self.0 .0, WEI_PER_RAMA))
    }

    /// Zero price yields zero RAMA
    pub fn rama_for(self, usd: UsdMicro) -> RamaWei {
        RamaWei(mul_div(usd.0, WEI_PER_RAMA, self.0 .0))
    }

    pub fn to_usd(self) -> f64 {
        self.0.to_usd()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for UsdPerRama {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde::Serialize::serialize(&self.0, serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cap_in_integer_space() {
        let principal = UsdMicro::new(5_000_000);
        let cap = principal.mul_percent(200);
        assert_eq!(cap, UsdMicro::new(10_000_000));
        assert_eq!(cap.to_usd(), 10.0);
    }

    #[test]
    fn test_e8_to_micro_truncates() {
        assert_eq!(UsdE8::new(123_456_789).to_micro(), UsdMicro::new(1_234_567));
        assert_eq!(UsdE8::from(UsdMicro::new(1_500_000)), UsdE8::new(150_000_000));
    }

    #[test]
    fn test_price_round_trip() {
        // 0.0245 USD per RAMA
        let price = UsdPerRama(UsdMicro::new(24_500));
        let rama = RamaWei::from_rama(100.0);
        assert_eq!(price.usd_for(rama), UsdMicro::new(2_450_000));
        assert_eq!(price.rama_for(UsdMicro::new(2_450_000)), rama);
    }

    #[test]
    fn test_price_from_pair() {
        let price = UsdPerRama::from_pair(UsdMicro::new(2_450_000), RamaWei::from_rama(100.0));
        assert_eq!(price, Some(UsdPerRama(UsdMicro::new(24_500))));
        assert_eq!(UsdPerRama::from_pair(UsdMicro::ZERO, RamaWei::from_rama(1.0)), None);
        assert_eq!(UsdPerRama::default().rama_for(UsdMicro::new(1)), RamaWei::ZERO);
    }

    #[test]
    fn test_sum_saturates() {
        let total: RamaWei = [RamaWei(u128::MAX), RamaWei(1)].iter().sum();
        assert_eq!(total, RamaWei(u128::MAX));
    }
}
