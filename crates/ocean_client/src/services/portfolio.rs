//! Portfolio reads

use alloy::primitives::{Address, U256};
use futures::future::join_all;
use log::debug;
use ocean_units::{Bps, RamaWei, UsdMicro, Wad};
use serde::Serialize;

use crate::address::parse_address;
use crate::contracts::{IOceanQuery, IPortfolioManager, PortfolioInfo};
use crate::degraded::{Fetched, Partial};
use crate::error::Result;
use crate::raw::{bps, rama_wei, u128_of, u64_of, usd_micro, wad};
use crate::registry::ContractName;
use crate::time::now_secs;
use crate::OceanClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PortfolioStatus {
    Active,
    Frozen,
    Closed,
}

/// One staking position with its derived cap figures
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub pid: u64,
    pub owner: Address,
    pub principal: UsdMicro,
    pub principal_rama: RamaWei,
    /// Percent of principal, e.g. 200
    pub cap_pct: u128,
    pub cap_progress: Bps,
    pub booster: bool,
    pub daily_rate: Wad,
    pub created_at: u64,
    pub frozen_until: u64,
    pub active: bool,
    pub exit_requested: bool,
}

impl PortfolioSummary {
    pub fn max_cap(&self) -> UsdMicro {
        self.principal.mul_percent(self.cap_pct)
    }

    pub fn cap_progress_percent(&self) -> f64 {
        self.cap_progress.to_percent()
    }

    /// Portion of the cap already paid out
    pub fn earned(&self) -> UsdMicro {
        self.max_cap().mul_bps(self.cap_progress)
    }

    pub fn remaining_cap(&self) -> UsdMicro {
        self.max_cap().saturating_sub(self.earned())
    }

    pub fn daily_rate_percent(&self) -> f64 {
        self.daily_rate.to_percent()
    }

    pub fn status_at(&self, now: u64) -> PortfolioStatus {
        if !self.active {
            PortfolioStatus::Closed
        } else if self.frozen_until > now {
            PortfolioStatus::Frozen
        } else {
            PortfolioStatus::Active
        }
    }

    pub fn status(&self) -> PortfolioStatus {
        self.status_at(now_secs())
    }
}

impl From<PortfolioInfo> for PortfolioSummary {
    fn from(info: PortfolioInfo) -> Self {
        Self {
            pid: u64_of(info.pid),
            owner: info.owner,
            principal: usd_micro(info.principalUsdMicro),
            principal_rama: rama_wei(info.principalRamaWei),
            cap_pct: u128_of(info.capPct),
            cap_progress: bps(info.capProgressBps),
            booster: info.booster,
            daily_rate: wad(info.dailyRateWad),
            created_at: info.createdAt,
            frozen_until: info.frozenUntil,
            active: info.active,
            exit_requested: info.exitRequested,
        }
    }
}

/// Portfolio ids plus the detail of the first one
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalPortfolios {
    pub ids: Vec<u64>,
    pub selected: Option<PortfolioSummary>,
}

pub struct PortfolioService<'a> {
    client: &'a OceanClient,
}

impl<'a> PortfolioService<'a> {
    pub(crate) fn new(client: &'a OceanClient) -> Self {
        Self { client }
    }

    pub async fn portfolio_ids(&self, user: &str) -> Result<Vec<u64>> {
        let user = parse_address(user)?;
        self.ids_of(user).await
    }

    pub async fn portfolio_by_id(&self, pid: u64) -> Result<PortfolioSummary> {
        self.client
            .read(ContractName::PortfolioManager, IPortfolioManager::getPortfolioCall { pid: U256::from(pid) })
            .await
            .map(PortfolioSummary::from)
    }

    /// Aggregate view first, per-pid legacy reads when it fails.
    ///
    /// A pid whose detail read fails is left out and the result is marked
    /// degraded.
    pub async fn portfolio_summaries(&self, user: &str) -> Result<Fetched<Vec<PortfolioSummary>>> {
        let user = parse_address(user)?;
        Ok(self.summaries_of(user).await)
    }

    pub async fn total_portfolios(&self, user: &str) -> Result<Fetched<TotalPortfolios>> {
        let user = parse_address(user)?;
        let mut partial = Partial::new();

        let ids = partial.take("PortfolioManager.getUserPortfolios", self.ids_of(user).await);
        let selected = match ids.first() {
            Some(&pid) => partial.take("PortfolioManager.getPortfolio", self.portfolio_by_id(pid).await.map(Some)),
            None => None,
        };

        Ok(partial.finish(TotalPortfolios { ids, selected }))
    }

    pub(crate) async fn ids_of(&self, user: Address) -> Result<Vec<u64>> {
        let ids = self
            .client
            .read(ContractName::PortfolioManager, IPortfolioManager::getUserPortfoliosCall { user })
            .await?;
        Ok(ids.into_iter().map(u64_of).collect())
    }

    pub(crate) async fn summaries_of(&self, user: Address) -> Fetched<Vec<PortfolioSummary>> {
        let mut partial = Partial::new();

        let view = self
            .client
            .read(ContractName::OceanQuery, IOceanQuery::getPortfolioSummariesCall { user })
            .await;
        if let Some(infos) = partial.primary("OceanQuery.getPortfolioSummaries", view) {
            return partial.finish(infos.into_iter().map(PortfolioSummary::from).collect());
        }

        debug!("Assembling portfolio summaries for {} from PortfolioManager", user);
        let ids = partial.take("PortfolioManager.getUserPortfolios", self.ids_of(user).await);
        let details = join_all(ids.iter().map(|&pid| self.portfolio_by_id(pid))).await;

        let mut summaries = Vec::with_capacity(details.len());
        for detail in details {
            if let Some(summary) = partial.take("PortfolioManager.getPortfolio", detail.map(Some)) {
                summaries.push(summary);
            }
        }

        partial.finish(summaries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(principal: u128, cap_pct: u128, progress: u32) -> PortfolioSummary {
        PortfolioSummary {
            pid: 1,
            owner: Address::ZERO,
            principal: UsdMicro::new(principal),
            principal_rama: RamaWei::ZERO,
            cap_pct,
            cap_progress: Bps(progress),
            booster: false,
            daily_rate: Wad(5_000_000_000_000_000),
            created_at: 1_700_000_000,
            frozen_until: 0,
            active: true,
            exit_requested: false,
        }
    }

    #[test]
    fn test_cap_derivations() {
        let p = summary(5_000_000, 200, 2_500);
        assert_eq!(p.principal.to_usd(), 5.0);
        assert_eq!(p.max_cap().to_usd(), 10.0);
        assert_eq!(p.cap_progress_percent(), 25.0);
        assert_eq!(p.earned().to_usd(), 2.5);
        assert_eq!(p.remaining_cap().to_usd(), 7.5);
        assert!((p.daily_rate_percent() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_status() {
        let mut p = summary(1, 200, 0);
        assert_eq!(p.status_at(100), PortfolioStatus::Active);

        p.frozen_until = 200;
        assert_eq!(p.status_at(100), PortfolioStatus::Frozen);
        assert_eq!(p.status_at(200), PortfolioStatus::Active);

        p.active = false;
        assert_eq!(p.status_at(100), PortfolioStatus::Closed);
    }
}
