//! Rate denominations (basis points and WAD)

use crate::{mul_div, scale_down, BPS_SCALE, WAD_SCALE};

/// Basis points (10,000 bps = 100%)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Bps(pub u32);

impl Bps {
    pub const ZERO: Self = Self(0);
    pub const FULL: Self = Self(10_000);

    /// Clamps raw contract values that do not fit into u32
    pub fn from_raw(raw: u128) -> Self {
        Self(u32::try_from(raw).unwrap_or(u32::MAX))
    }

    pub fn to_percent(self) -> f64 {
        scale_down(self.0 as u128, 100)
    }

    pub fn to_fraction(self) -> f64 {
        scale_down(self.0 as u128, BPS_SCALE)
    }

    /// `amount * self / 10_000`
    pub fn apply(self, amount: u128) -> u128 {
        mul_div(amount, self.0 as u128, BPS_SCALE)
    }

    /// Remaining share after deducting this rate, saturating at zero
    pub fn complement(self) -> Self {
        Self(Self::FULL.0.saturating_sub(self.0))
    }
}

/// 1e18 fixed-point rate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Wad(pub u128);

impl Wad {
    pub const ZERO: Self = Self(0);
    pub const ONE: Self = Self(WAD_SCALE);

    pub fn to_fraction(self) -> f64 {
        scale_down(self.0, WAD_SCALE)
    }

    /// Daily rate as percent: 1e16 -> 1.0
    pub fn to_percent(self) -> f64 {
        scale_down(self.0, WAD_SCALE / 100)
    }

    /// `amount * self / 1e18`
    pub fn apply(self, amount: u128) -> u128 {
        mul_div(amount, self.0, WAD_SCALE)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Bps {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_percent())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Wad {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_percent())
    }
}
