//! Spot (direct) income and income stream history

use std::collections::{BTreeMap, HashSet};

use alloy::primitives::{Address, U256};
use ocean_units::{RamaWei, UsdE8, UsdMicro};
use serde::Serialize;

use crate::address::parse_address;
use crate::contracts::{DirectIncome, IIncomeDistributor, IOceanQuery, IOceanView};
use crate::degraded::{Fetched, Partial};
use crate::error::Result;
use crate::raw::{rama_wei, u64_of, usd_e8, usd_micro};
use crate::registry::ContractName;
use crate::services::team::DirectIncomeSummary;
use crate::time::{now_secs, SECONDS_PER_DAY};
use crate::OceanClient;

pub const DEFAULT_HISTORY_LIMIT: u64 = 50;

/// Lifetime totals per income stream, 8-decimal USD
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeStreamTotals {
    pub growth: UsdE8,
    pub slab: UsdE8,
    pub royalty: UsdE8,
    pub override_bonus: UsdE8,
    pub rewards: UsdE8,
}

impl IncomeStreamTotals {
    pub fn total(&self) -> UsdE8 {
        [self.growth, self.slab, self.royalty, self.override_bonus, self.rewards].iter().sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeEntry {
    pub from: Address,
    pub pid: u64,
    pub amount: UsdMicro,
    pub amount_rama: RamaWei,
    pub timestamp: u64,
}

impl From<DirectIncome> for IncomeEntry {
    fn from(raw: DirectIncome) -> Self {
        Self {
            from: raw.from,
            pid: u64_of(raw.pid),
            amount: usd_micro(raw.amountUsdMicro),
            amount_rama: rama_wei(raw.amountRamaWei),
            timestamp: raw.timestamp,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpotIncomeOptions {
    pub limit: u64,
    /// Number of portfolios kept in the per-portfolio breakdown
    pub portfolio_limit: usize,
}

impl Default for SpotIncomeOptions {
    fn default() -> Self {
        Self { limit: 25, portfolio_limit: 4 }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioIncomeTotal {
    pub pid: u64,
    pub amount: UsdMicro,
    pub amount_rama: RamaWei,
    pub entries: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotIncomeOverview {
    pub lifetime: UsdMicro,
    pub lifetime_rama: RamaWei,
    pub last_24h: UsdMicro,
    pub last_24h_rama: RamaWei,
    pub claimable: UsdMicro,
    pub claimable_rama: RamaWei,
    pub total_entries: u64,
    /// Distinct sources among the fetched entries
    pub active_spots: usize,
    pub average_spot: UsdMicro,
    pub total_direct: UsdMicro,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotIncomeSummary {
    pub overview: SpotIncomeOverview,
    /// Newest first
    pub transactions: Vec<IncomeEntry>,
    pub by_portfolio: Vec<PortfolioIncomeTotal>,
    pub has_more: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeHistory {
    pub totals: IncomeStreamTotals,
    pub grand_total: UsdE8,
    pub recent_transactions: usize,
}

/// Sum entries per portfolio, largest USD amount first, keeping `limit`
pub fn totals_by_portfolio(entries: &[IncomeEntry], limit: usize) -> Vec<PortfolioIncomeTotal> {
    let mut by_pid: BTreeMap<u64, PortfolioIncomeTotal> = BTreeMap::new();
    for entry in entries {
        let total = by_pid.entry(entry.pid).or_insert(PortfolioIncomeTotal { pid: entry.pid, ..Default::default() });
        total.amount = total.amount + entry.amount;
        total.amount_rama = total.amount_rama + entry.amount_rama;
        total.entries += 1;
    }

    let mut totals: Vec<_> = by_pid.into_values().collect();
    totals.sort_by(|a, b| b.amount.cmp(&a.amount).then(a.pid.cmp(&b.pid)));
    totals.truncate(limit);
    totals
}

pub struct IncomeService<'a> {
    client: &'a OceanClient,
}

impl<'a> IncomeService<'a> {
    pub(crate) fn new(client: &'a OceanClient) -> Self {
        Self { client }
    }

    pub async fn spot_income_summary(&self, user: &str, options: SpotIncomeOptions) -> Result<Fetched<SpotIncomeSummary>> {
        let user = parse_address(user)?;
        let client = self.client;
        let since = now_secs().saturating_sub(SECONDS_PER_DAY);
        let mut partial = Partial::new();

        let (count, entries, totals, recent) = futures::join!(
            client.read(ContractName::IncomeDistributor, IIncomeDistributor::getDirectIncomeCountCall { user }),
            self.entries_of(user, 0, options.limit),
            client.read(ContractName::IncomeDistributor, IIncomeDistributor::getDirectIncomeTotalsCall { user }),
            client.read(ContractName::IncomeDistributor, IIncomeDistributor::getDirectIncomeSinceCall { user, since }),
        );

        let total_entries = u64_of(partial.take("IncomeDistributor.getDirectIncomeCount", count));
        let transactions = partial.take("IncomeDistributor.getDirectIncomes", entries);
        let totals = partial.take(
            "IncomeDistributor.getDirectIncomeTotals",
            totals.map(|t| DirectIncomeSummary {
                lifetime: usd_micro(t.lifetimeUsdMicro),
                lifetime_rama: rama_wei(t.lifetimeRamaWei),
                claimable: usd_micro(t.claimableUsdMicro),
                claimable_rama: rama_wei(t.claimableRamaWei),
            }),
        );
        let (last_24h, last_24h_rama) = partial.take(
            "IncomeDistributor.getDirectIncomeSince",
            recent.map(|r| (usd_micro(r.usdMicro), rama_wei(r.ramaWei))),
        );

        let total_direct: UsdMicro = transactions.iter().map(|e| e.amount).sum();
        let average_spot = match transactions.len() as u128 {
            0 => UsdMicro::ZERO,
            n => UsdMicro::new(total_direct.raw() / n),
        };
        let active_spots = transactions.iter().map(|e| e.from).collect::<HashSet<_>>().len();

        let summary = SpotIncomeSummary {
            overview: SpotIncomeOverview {
                lifetime: totals.lifetime,
                lifetime_rama: totals.lifetime_rama,
                last_24h,
                last_24h_rama,
                claimable: totals.claimable,
                claimable_rama: totals.claimable_rama,
                total_entries,
                active_spots,
                average_spot,
                total_direct,
            },
            by_portfolio: totals_by_portfolio(&transactions, options.portfolio_limit),
            has_more: total_entries > transactions.len() as u64,
            transactions,
        };

        Ok(partial.finish(summary))
    }

    /// One page of spot income, newest first
    pub async fn spot_income_transactions(&self, user: &str, offset: u64, limit: u64) -> Result<Vec<IncomeEntry>> {
        let user = parse_address(user)?;
        self.entries_of(user, offset, limit).await
    }

    pub async fn income_history(&self, user: &str, limit: u64) -> Result<Fetched<IncomeHistory>> {
        let user = parse_address(user)?;
        let mut partial = Partial::new();

        let (totals, recent) = futures::join!(
            self.stream_totals_of(user),
            self.client.read(
                ContractName::OceanView,
                IOceanView::getRecentTransactionsCall { user, limit: U256::from(limit) },
            ),
        );

        let totals = partial.take("OceanQuery.getIncomeStreamTotals", totals);
        let recent = partial.take("OceanView.getRecentTransactions", recent);

        Ok(partial.finish(IncomeHistory { totals, grand_total: totals.total(), recent_transactions: recent.len() }))
    }

    pub(crate) async fn stream_totals_of(&self, user: Address) -> Result<IncomeStreamTotals> {
        let totals = self
            .client
            .read(ContractName::OceanQuery, IOceanQuery::getIncomeStreamTotalsCall { user })
            .await?;
        Ok(IncomeStreamTotals {
            growth: usd_e8(totals.growth),
            slab: usd_e8(totals.slab),
            royalty: usd_e8(totals.royalty),
            override_bonus: usd_e8(totals.overrideBonus),
            rewards: usd_e8(totals.rewards),
        })
    }

    async fn entries_of(&self, user: Address, offset: u64, limit: u64) -> Result<Vec<IncomeEntry>> {
        let raw = self
            .client
            .read(
                ContractName::IncomeDistributor,
                IIncomeDistributor::getDirectIncomesCall { user, offset: U256::from(offset), limit: U256::from(limit) },
            )
            .await?;
        Ok(raw.into_iter().map(IncomeEntry::from).collect())
    }
}
