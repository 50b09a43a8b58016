//! Dashboard aggregate and daily earning trend

use alloy::primitives::{Address, U256};
use chrono::{Duration, NaiveDate, Utc};
use log::debug;
use ocean_units::{RamaWei, UsdMicro};
use serde::Serialize;

use crate::address::parse_address;
use crate::contracts::{IOceanQuery, IOceanView, IPortfolioManager, ISafeWallet, ISlabManager};
use crate::degraded::{Fetched, Partial};
use crate::error::Result;
use crate::raw::{rama_wei, u64_of, usd_micro};
use crate::registry::ContractName;
use crate::services::income::IncomeStreamTotals;
use crate::services::portfolio::PortfolioStatus;
use crate::OceanClient;

pub const DEFAULT_TREND_DAYS: u32 = 7;
const MAX_TREND_DAYS: u32 = 365;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SafeWalletSnapshot {
    pub balance: RamaWei,
    pub balance_usd: UsdMicro,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardDetails {
    pub address: Address,
    pub user_id: u64,
    pub referrer: Option<Address>,
    pub total_staked: UsdMicro,
    pub total_staked_rama: RamaWei,
    pub total_earned_rama: RamaWei,
    pub accrued_growth: UsdMicro,
    pub total_claimable: UsdMicro,
    pub qualified_volume: UsdMicro,
    pub safe_wallet: SafeWalletSnapshot,
    pub slab_level: u8,
    pub slab_can_claim: bool,
    pub slab_income_available: UsdMicro,
    pub royalty_level: u8,
    pub royalty_paid_months: u32,
    pub directs: u32,
    pub active_portfolios: u32,
    pub income: IncomeStreamTotals,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyEarning {
    pub date: NaiveDate,
    pub amount: UsdMicro,
}

/// Label `amounts` (oldest first) with the days ending at `today`
pub fn label_days(amounts: &[UsdMicro], today: NaiveDate) -> Vec<DailyEarning> {
    let count = amounts.len() as i64;
    amounts
        .iter()
        .enumerate()
        .map(|(i, &amount)| DailyEarning { date: today - Duration::days(count - 1 - i as i64), amount })
        .collect()
}

pub struct DashboardService<'a> {
    client: &'a OceanClient,
}

impl<'a> DashboardService<'a> {
    pub(crate) fn new(client: &'a OceanClient) -> Self {
        Self { client }
    }

    pub async fn dashboard_details(&self, user: &str) -> Result<Fetched<DashboardDetails>> {
        let user = parse_address(user)?;
        let client = self.client;
        let streams = client.income();
        let mut partial = Partial::new();

        let (dashboard, panel, income) = futures::join!(
            client.read(ContractName::OceanQuery, IOceanQuery::getDashboardCall { user }),
            client.read(ContractName::OceanView, IOceanView::getSlabPanelCall { user }),
            streams.stream_totals_of(user),
        );
        let income = partial.take("OceanQuery.getIncomeStreamTotals", income);

        let Some(summary) = partial.primary("OceanQuery.getDashboard", dashboard) else {
            let mut details = self.legacy_details(user, &mut partial).await;
            details.income = income;
            return Ok(partial.finish(details));
        };

        let panel = partial.take_or("OceanView.getSlabPanel", panel.map(Some), None);
        let details = DashboardDetails {
            address: user,
            user_id: u64_of(summary.userId),
            referrer: (!summary.referrer.is_zero()).then_some(summary.referrer),
            total_staked: usd_micro(summary.totalStakedUsdMicro),
            total_staked_rama: rama_wei(summary.totalStakedRamaWei),
            total_earned_rama: rama_wei(summary.totalEarnedRamaWei),
            accrued_growth: usd_micro(summary.accruedGrowthUsdMicro),
            total_claimable: usd_micro(summary.totalClaimableUsdMicro),
            qualified_volume: usd_micro(summary.qualifiedVolumeUsdMicro),
            safe_wallet: SafeWalletSnapshot {
                balance: rama_wei(summary.safeWalletRamaWei),
                balance_usd: usd_micro(summary.safeWalletUsdMicro),
            },
            slab_level: summary.slabLevel,
            slab_can_claim: panel.as_ref().map(|p| p.canClaim).unwrap_or_default(),
            slab_income_available: panel
                .as_ref()
                .map(|p| usd_micro(p.slabIncomeAvailableUsdMicro))
                .unwrap_or_default(),
            royalty_level: summary.royaltyLevel,
            royalty_paid_months: summary.royaltyPaidMonths,
            directs: summary.directs,
            active_portfolios: summary.activePortfolios,
            income,
        };

        Ok(partial.finish(details))
    }

    async fn legacy_details(&self, user: Address, partial: &mut Partial) -> DashboardDetails {
        debug!("Assembling dashboard for {} from legacy contracts", user);
        let client = self.client;
        let users = client.users();
        let portfolios = client.portfolios();

        let (status, summaries, safe_wallet, slab_income) = futures::join!(
            users.status_of(user),
            portfolios.summaries_of(user),
            self.safe_wallet_snapshot(user),
            client.read(ContractName::SlabManager, ISlabManager::getSlabIncomeCall { user }),
        );

        let status = partial.absorb(status);
        let summaries = partial.absorb(summaries);
        let safe_wallet = partial.absorb(safe_wallet);
        let (slab_available, slab_can_claim) = partial.take(
            "SlabManager.getSlabIncome",
            slab_income.map(|s| (usd_micro(s.availableUsdMicro), s.canClaim)),
        );

        let active: Vec<_> = summaries.iter().filter(|p| p.status() != PortfolioStatus::Closed).collect();

        DashboardDetails {
            address: user,
            user_id: status.user_id,
            referrer: status.sponsor,
            total_staked: active.iter().map(|p| p.principal).sum(),
            total_staked_rama: active.iter().map(|p| p.principal_rama).sum(),
            total_earned_rama: RamaWei::ZERO,
            accrued_growth: UsdMicro::ZERO,
            total_claimable: slab_available,
            qualified_volume: status.qualified_volume,
            safe_wallet,
            slab_level: status.slab_level,
            slab_can_claim,
            slab_income_available: slab_available,
            royalty_level: status.royalty_level,
            royalty_paid_months: status.royalty_paid_months,
            directs: status.directs,
            active_portfolios: u32::try_from(active.len()).unwrap_or(u32::MAX),
            income: IncomeStreamTotals::default(),
        }
    }

    /// Balance is read first; its USD value is quoted only when non-zero
    pub(crate) async fn safe_wallet_snapshot(&self, user: Address) -> Fetched<SafeWalletSnapshot> {
        let mut partial = Partial::new();
        let balance = partial.take(
            "SafeWallet.balanceOf",
            self.client
                .read(ContractName::SafeWallet, ISafeWallet::balanceOfCall { user })
                .await
                .map(rama_wei),
        );

        let balance_usd = if balance.is_zero() {
            UsdMicro::ZERO
        } else {
            partial.take(
                "PortfolioManager.quoteUsdForRama",
                self.client
                    .read(
                        ContractName::PortfolioManager,
                        IPortfolioManager::quoteUsdForRamaCall { ramaWei: U256::from(balance.raw()) },
                    )
                    .await
                    .map(usd_micro),
            )
        };

        partial.finish(SafeWalletSnapshot { balance, balance_usd })
    }

    /// Daily earnings for the last `days` days, oldest first.
    ///
    /// A failed read yields zero for every day.
    pub async fn earning_trend(&self, user: &str, days: u32) -> Result<Fetched<Vec<DailyEarning>>> {
        let user = parse_address(user)?;
        let days = days.clamp(1, MAX_TREND_DAYS);
        let mut partial = Partial::new();

        let raw = partial.take(
            "OceanQuery.getDailyEarnings",
            self.client
                .read(
                    ContractName::OceanQuery,
                    IOceanQuery::getDailyEarningsCall { user, dayCount: U256::from(days) },
                )
                .await,
        );

        let days = days as usize;
        let mut amounts: Vec<UsdMicro> = raw.into_iter().map(usd_micro).collect();
        if amounts.len() > days {
            amounts.drain(..amounts.len() - days);
        }
        let mut padded = vec![UsdMicro::ZERO; days - amounts.len()];
        padded.extend(amounts);

        Ok(partial.finish(label_days(&padded, Utc::now().date_naive())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_days_ends_today() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        let labelled = label_days(&[UsdMicro::new(1), UsdMicro::new(2), UsdMicro::new(3)], today);
        let dates: Vec<String> = labelled.iter().map(|d| d.date.to_string()).collect();
        assert_eq!(dates, ["2024-02-29", "2024-03-01", "2024-03-02"]);
        assert_eq!(labelled[2].amount, UsdMicro::new(3));
    }
}
