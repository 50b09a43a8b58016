//! Royalty tiers and monthly payout progress

use alloy::primitives::Address;
use log::debug;
use ocean_units::{RamaWei, UsdE8, UsdMicro};
use serde::Serialize;

use crate::address::parse_address;
use crate::contracts::{IOceanView, IRoyaltyManager, RoyaltyPanel};
use crate::degraded::{Fetched, Partial};
use crate::error::Result;
use crate::raw::{rama_wei, u64_of, usd_e8, usd_micro};
use crate::registry::ContractName;
use crate::time::month_epoch_label;
use crate::OceanClient;

/// Royalty pays out over a twelve month cycle
pub const PAYOUT_CYCLE_MONTHS: u32 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoyaltyTier {
    /// 1-based
    pub level: u8,
    pub threshold: UsdE8,
    pub monthly: UsdE8,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoyaltyOverview {
    pub tiers: Vec<RoyaltyTier>,
    pub current_level: u8,
    pub current_tier: Option<RoyaltyTier>,
    pub paid_months: u32,
    pub can_claim: bool,
    pub paused: bool,
    pub royalty_income: UsdMicro,
    pub royalty_income_rama: RamaWei,
    pub qualified_volume: UsdMicro,
    pub renewal_snapshot: UsdMicro,
    pub renewal_recent: UsdMicro,
    pub renewal_required: UsdMicro,
    pub renewal_target: UsdMicro,
    pub next_month_epoch: u64,
    pub next_month_label: String,
    pub payout_progress_percent: f64,
}

/// Position inside the current payout cycle, in percent
pub fn payout_progress_percent(paid_months: u32) -> f64 {
    f64::from(paid_months % PAYOUT_CYCLE_MONTHS) * 100.0 / f64::from(PAYOUT_CYCLE_MONTHS)
}

/// Zip the threshold and payout columns; extra entries on either side are dropped
pub fn tiers_from_columns(thresholds: &[UsdE8], monthly: &[UsdE8]) -> Vec<RoyaltyTier> {
    thresholds
        .iter()
        .zip(monthly)
        .enumerate()
        .map(|(i, (&threshold, &monthly))| RoyaltyTier {
            level: u8::try_from(i + 1).unwrap_or(u8::MAX),
            threshold,
            monthly,
        })
        .collect()
}

impl RoyaltyOverview {
    fn from_panel(panel: RoyaltyPanel) -> Self {
        Self {
            current_level: panel.currentLevel,
            paid_months: panel.paidMonths,
            can_claim: panel.canClaim,
            paused: panel.paused,
            royalty_income: usd_micro(panel.royaltyIncomeUsdMicro),
            royalty_income_rama: rama_wei(panel.royaltyIncomeRamaWei),
            qualified_volume: usd_micro(panel.qualifiedVolumeUsdMicro),
            renewal_snapshot: usd_micro(panel.renewalSnapshotUsdMicro),
            renewal_recent: usd_micro(panel.renewalRecentUsdMicro),
            renewal_required: usd_micro(panel.renewalRequiredUsdMicro),
            renewal_target: usd_micro(panel.renewalTargetUsdMicro),
            next_month_epoch: u64_of(panel.nextMonthEpoch),
            ..Self::default()
        }
    }

    fn finalize(mut self, tiers: Vec<RoyaltyTier>) -> Self {
        self.current_tier = usize::from(self.current_level)
            .checked_sub(1)
            .and_then(|i| tiers.get(i).copied());
        self.tiers = tiers;
        self.next_month_label = month_epoch_label(self.next_month_epoch);
        self.payout_progress_percent = payout_progress_percent(self.paid_months);
        self
    }
}

pub struct RoyaltyService<'a> {
    client: &'a OceanClient,
}

impl<'a> RoyaltyService<'a> {
    pub(crate) fn new(client: &'a OceanClient) -> Self {
        Self { client }
    }

    pub async fn royalty_overview(&self, user: &str) -> Result<Fetched<RoyaltyOverview>> {
        let user = parse_address(user)?;
        let client = self.client;
        let mut partial = Partial::new();

        let (panel, tiers) = futures::join!(
            client.read(ContractName::OceanView, IOceanView::getRoyaltyPanelCall { user }),
            client.read(ContractName::RoyaltyManager, IRoyaltyManager::getRoyaltyTiersCall {}),
        );

        let tiers = partial.take(
            "RoyaltyManager.getRoyaltyTiers",
            tiers.map(|t| {
                let thresholds: Vec<UsdE8> = t.thresholdsUsdE8.into_iter().map(usd_e8).collect();
                let monthly: Vec<UsdE8> = t.monthlyUsdE8.into_iter().map(usd_e8).collect();
                tiers_from_columns(&thresholds, &monthly)
            }),
        );

        let overview = match partial.primary("OceanView.getRoyaltyPanel", panel) {
            Some(panel) => RoyaltyOverview::from_panel(panel),
            None => self.legacy_overview(user, &mut partial).await,
        };

        Ok(partial.finish(overview.finalize(tiers)))
    }

    async fn legacy_overview(&self, user: Address, partial: &mut Partial) -> RoyaltyOverview {
        debug!("Assembling royalty overview for {} from RoyaltyManager", user);
        let client = self.client;
        let users = client.users();

        let (royalty, volume, paused) = futures::join!(
            client.read(ContractName::RoyaltyManager, IRoyaltyManager::getUserRoyaltyCall { user }),
            users.qualified_volume(user),
            client.read(ContractName::RoyaltyManager, IRoyaltyManager::isPausedCall {}),
        );

        let mut overview = RoyaltyOverview {
            qualified_volume: partial.take("UserRegistry.getQualifiedVolume", volume),
            paused: partial.take("RoyaltyManager.isPaused", paused),
            ..RoyaltyOverview::default()
        };

        if let Some(r) = partial.take_or("RoyaltyManager.getUserRoyalty", royalty.map(Some), None) {
            overview.current_level = r.level;
            overview.paid_months = r.paidMonths;
            overview.can_claim = r.canClaim;
            overview.royalty_income = usd_micro(r.totalPaidUsdMicro);
            overview.royalty_income_rama = rama_wei(r.totalPaidRamaWei);
            overview.next_month_epoch = u64_of(r.nextMonthEpoch);
        }

        overview
    }
}
