//! Slab income, override earnings and same-slab partners

use alloy::primitives::Address;
use log::debug;
use ocean_units::{RamaWei, UsdMicro};
use serde::Serialize;

use crate::address::parse_address;
use crate::contracts::{IOceanView, ISlabManager, SlabPanel};
use crate::degraded::{Fetched, Partial};
use crate::error::Result;
use crate::raw::{rama_wei, usd_micro};
use crate::registry::ContractName;
use crate::OceanClient;

/// Tier names for slab levels 1..=11
pub const SLAB_TIER_NAMES: [&str; 11] = [
    "Coral Reef",
    "Shallow Waters",
    "Tide Pool",
    "Wave Crest",
    "Open Sea",
    "Deep Current",
    "Ocean Floor",
    "Abyssal Zone",
    "Mariana Trench",
    "Pacific Master",
    "Ocean Sovereign",
];

/// `None` for level 0 and anything past the last tier
pub fn slab_tier_name(level: u8) -> Option<&'static str> {
    usize::from(level).checked_sub(1).and_then(|i| SLAB_TIER_NAMES.get(i)).copied()
}

/// Override earnings for the three upline levels
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverrideEarnings {
    pub rama: [RamaWei; 3],
    pub usd: [UsdMicro; 3],
}

impl OverrideEarnings {
    pub fn total_rama(&self) -> RamaWei {
        self.rama.iter().sum()
    }

    pub fn total_usd(&self) -> UsdMicro {
        self.usd.iter().sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SameSlabPartners {
    pub first_wave: Vec<Address>,
    pub second_wave: Vec<Address>,
    pub third_wave: Vec<Address>,
}

impl SameSlabPartners {
    pub fn total(&self) -> usize {
        self.first_wave.len() + self.second_wave.len() + self.third_wave.len()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlabOverview {
    pub slab_level: u8,
    pub qualified_volume: UsdMicro,
    pub directs: u32,
    pub can_claim: bool,
    pub slab_income: UsdMicro,
    pub slab_income_rama: RamaWei,
    pub available: UsdMicro,
    pub available_rama: RamaWei,
    pub override_income: UsdMicro,
    pub override_income_rama: RamaWei,
    pub override_earnings: OverrideEarnings,
    pub partners: SameSlabPartners,
}

impl SlabOverview {
    fn from_panel(panel: SlabPanel) -> Self {
        Self {
            slab_level: panel.slabIndex,
            qualified_volume: usd_micro(panel.qualifiedVolumeUsdMicro),
            directs: panel.directMembers,
            can_claim: panel.canClaim,
            slab_income: usd_micro(panel.slabIncomeUsdMicro),
            slab_income_rama: rama_wei(panel.slabIncomeRamaWei),
            available: usd_micro(panel.slabIncomeAvailableUsdMicro),
            available_rama: rama_wei(panel.slabIncomeAvailableRamaWei),
            override_income: usd_micro(panel.overrideIncomeUsdMicro),
            override_income_rama: rama_wei(panel.overrideIncomeRamaWei),
            ..Self::default()
        }
    }
}

pub struct SlabService<'a> {
    client: &'a OceanClient,
}

impl<'a> SlabService<'a> {
    pub(crate) fn new(client: &'a OceanClient) -> Self {
        Self { client }
    }

    pub async fn slab_income_overview(&self, user: &str) -> Result<Fetched<SlabOverview>> {
        let user = parse_address(user)?;
        let client = self.client;
        let mut partial = Partial::new();

        let (panel, overrides, partners) = futures::join!(
            client.read(ContractName::OceanView, IOceanView::getSlabPanelCall { user }),
            client.read(ContractName::SlabManager, ISlabManager::getOverrideEarningsCall { user }),
            client.read(ContractName::SlabManager, ISlabManager::getSameSlabPartnersCall { user }),
        );

        let override_earnings = partial.take(
            "SlabManager.getOverrideEarnings",
            overrides.map(|o| OverrideEarnings {
                rama: [rama_wei(o.l1RamaWei), rama_wei(o.l2RamaWei), rama_wei(o.l3RamaWei)],
                usd: [usd_micro(o.l1UsdMicro), usd_micro(o.l2UsdMicro), usd_micro(o.l3UsdMicro)],
            }),
        );
        let partners = partial.take(
            "SlabManager.getSameSlabPartners",
            partners.map(|p| SameSlabPartners {
                first_wave: p.firstWave,
                second_wave: p.secondWave,
                third_wave: p.thirdWave,
            }),
        );

        let mut overview = match partial.primary("OceanView.getSlabPanel", panel) {
            Some(panel) => SlabOverview::from_panel(panel),
            None => self.legacy_overview(user, &override_earnings, &mut partial).await,
        };
        overview.override_earnings = override_earnings;
        overview.partners = partners;

        Ok(partial.finish(overview))
    }

    async fn legacy_overview(
        &self,
        user: Address,
        overrides: &OverrideEarnings,
        partial: &mut Partial,
    ) -> SlabOverview {
        debug!("Assembling slab overview for {} from SlabManager", user);
        let client = self.client;
        let users = client.users();

        let (level, income, volume, directs) = futures::join!(
            client.read(ContractName::SlabManager, ISlabManager::getSlabLevelCall { user }),
            client.read(ContractName::SlabManager, ISlabManager::getSlabIncomeCall { user }),
            users.qualified_volume(user),
            users.direct_count(user),
        );

        let mut overview = SlabOverview {
            slab_level: partial.take("SlabManager.getSlabLevel", level),
            qualified_volume: partial.take("UserRegistry.getQualifiedVolume", volume),
            directs: partial.take("UserRegistry.getDirectCount", directs),
            override_income: overrides.total_usd(),
            override_income_rama: overrides.total_rama(),
            ..SlabOverview::default()
        };

        if let Some(income) = partial.take_or("SlabManager.getSlabIncome", income.map(Some), None) {
            overview.can_claim = income.canClaim;
            overview.slab_income = usd_micro(income.totalUsdMicro);
            overview.slab_income_rama = rama_wei(income.totalRamaWei);
            overview.available = usd_micro(income.availableUsdMicro);
            overview.available_rama = rama_wei(income.availableRamaWei);
        }

        overview
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slab_tier_names() {
        assert_eq!(slab_tier_name(0), None);
        assert_eq!(slab_tier_name(1), Some("Coral Reef"));
        assert_eq!(slab_tier_name(11), Some("Ocean Sovereign"));
        assert_eq!(slab_tier_name(12), None);
    }

    #[test]
    fn test_override_totals() {
        let earnings = OverrideEarnings {
            rama: [RamaWei::from_rama(1.0), RamaWei::from_rama(0.5), RamaWei::ZERO],
            usd: [UsdMicro::new(1_000_000), UsdMicro::new(250_000), UsdMicro::new(1)],
        };
        assert_eq!(earnings.total_rama(), RamaWei::from_rama(1.5));
        assert_eq!(earnings.total_usd(), UsdMicro::new(1_250_001));
    }
}
