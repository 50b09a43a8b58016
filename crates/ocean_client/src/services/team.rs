//! Referral network, walked level by level

use std::collections::HashSet;

use alloy::primitives::Address;
use futures::future::join_all;
use log::debug;
use ocean_units::{RamaWei, UsdMicro};
use serde::Serialize;

use crate::address::parse_address;
use crate::contracts::{IIncomeDistributor, IPortfolioManager, IUserRegistry};
use crate::degraded::{Fetched, Partial};
use crate::error::Result;
use crate::raw::{rama_wei, usd_micro};
use crate::registry::ContractName;
use crate::OceanClient;

pub const MAX_TEAM_DEPTH: u8 = 10;
pub const DEFAULT_DETAIL_LIMIT: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeamNetworkOptions {
    /// Clamped to `1..=10`
    pub max_depth: u8,
    /// Members past this count are listed without stake/volume detail
    pub detail_limit: usize,
}

impl Default for TeamNetworkOptions {
    fn default() -> Self {
        Self { max_depth: MAX_TEAM_DEPTH, detail_limit: DEFAULT_DETAIL_LIMIT }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamVolume {
    pub qualified: UsdMicro,
    pub total: UsdMicro,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectIncomeSummary {
    pub lifetime: UsdMicro,
    pub lifetime_rama: RamaWei,
    pub claimable: UsdMicro,
    pub claimable_rama: RamaWei,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub address: Address,
    pub sponsor: Address,
    pub level: u8,
    /// False when the member is past the detail limit
    pub detailed: bool,
    pub stake: UsdMicro,
    pub stake_rama: RamaWei,
    pub team_volume: TeamVolume,
    pub directs: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamLevel {
    /// "L1" .. "L10"
    pub name: String,
    pub depth: u8,
    pub members: Vec<TeamMember>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamNetwork {
    pub address: Address,
    pub levels: Vec<TeamLevel>,
    pub team_volume: TeamVolume,
    pub qualified_volume: UsdMicro,
    pub direct_income: DirectIncomeSummary,
    pub total_members: usize,
}

impl TeamNetwork {
    pub fn level(&self, depth: u8) -> Option<&TeamLevel> {
        self.levels.iter().find(|l| l.depth == depth)
    }

    pub fn direct_members(&self) -> &[TeamMember] {
        self.level(1).map(|l| l.members.as_slice()).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct MemberDetail {
    stake: UsdMicro,
    stake_rama: RamaWei,
    team_volume: TeamVolume,
    directs: u32,
}

pub struct TeamService<'a> {
    client: &'a OceanClient,
}

impl<'a> TeamService<'a> {
    pub(crate) fn new(client: &'a OceanClient) -> Self {
        Self { client }
    }

    pub async fn team_network(&self, user: &str, options: TeamNetworkOptions) -> Result<Fetched<TeamNetwork>> {
        let root = parse_address(user)?;
        let max_depth = options.max_depth.clamp(1, MAX_TEAM_DEPTH);
        let client = self.client;
        let users = client.users();
        let mut partial = Partial::new();

        let (volume, team_volume, income) = futures::join!(
            users.qualified_volume(root),
            self.team_volume(root),
            client.read(ContractName::IncomeDistributor, IIncomeDistributor::getDirectIncomeTotalsCall { user: root }),
        );

        let mut network = TeamNetwork {
            address: root,
            qualified_volume: partial.take("UserRegistry.getQualifiedVolume", volume),
            team_volume: partial.take("UserRegistry.getTeamVolume", team_volume),
            direct_income: partial.take(
                "IncomeDistributor.getDirectIncomeTotals",
                income.map(|t| DirectIncomeSummary {
                    lifetime: usd_micro(t.lifetimeUsdMicro),
                    lifetime_rama: rama_wei(t.lifetimeRamaWei),
                    claimable: usd_micro(t.claimableUsdMicro),
                    claimable_rama: rama_wei(t.claimableRamaWei),
                }),
            ),
            ..TeamNetwork::default()
        };

        // A referral cycle would otherwise revisit members
        let mut visited = HashSet::from([root]);
        let mut frontier = vec![root];
        let mut detail_budget = options.detail_limit;

        for depth in 1..=max_depth {
            if frontier.is_empty() {
                break;
            }

            let referrals = join_all(frontier.iter().map(|&sponsor| users.direct_referrals(sponsor))).await;
            let mut discovered = Vec::new();
            for (&sponsor, result) in frontier.iter().zip(referrals) {
                for member in partial.take("UserRegistry.getDirectReferrals", result) {
                    if visited.insert(member) {
                        discovered.push((sponsor, member));
                    }
                }
            }
            if discovered.is_empty() {
                break;
            }

            let detailed = discovered.len().min(detail_budget);
            detail_budget -= detailed;
            debug!("Team level L{}: {} members, {} with detail", depth, discovered.len(), detailed);

            let details = join_all(discovered[..detailed].iter().map(|&(_, member)| self.member_detail(member))).await;
            let mut details = details.into_iter();

            let members = discovered
                .iter()
                .map(|&(sponsor, address)| {
                    let detail = details.next().map(|d| partial.absorb(d));
                    let MemberDetail { stake, stake_rama, team_volume, directs } = detail.unwrap_or_default();
                    TeamMember {
                        address,
                        sponsor,
                        level: depth,
                        detailed: detail.is_some(),
                        stake,
                        stake_rama,
                        team_volume,
                        directs,
                    }
                })
                .collect::<Vec<_>>();

            frontier = members.iter().map(|m| m.address).collect();
            network.total_members += members.len();
            network.levels.push(TeamLevel { name: format!("L{}", depth), depth, members });
        }

        Ok(partial.finish(network))
    }

    async fn team_volume(&self, user: Address) -> Result<TeamVolume> {
        self.client
            .read(ContractName::UserRegistry, IUserRegistry::getTeamVolumeCall { user })
            .await
            .map(|v| TeamVolume { qualified: usd_micro(v.qualifiedUsdMicro), total: usd_micro(v.totalUsdMicro) })
    }

    async fn member_detail(&self, member: Address) -> Fetched<MemberDetail> {
        let users = self.client.users();
        let mut partial = Partial::new();

        let (stake, volume, directs) = futures::join!(
            self.client.read(ContractName::PortfolioManager, IPortfolioManager::getUserTotalStakeCall { user: member }),
            self.team_volume(member),
            users.direct_count(member),
        );

        let (stake, stake_rama) = partial.take(
            "PortfolioManager.getUserTotalStake",
            stake.map(|s| (usd_micro(s.usdMicro), rama_wei(s.ramaWei))),
        );

        let detail = MemberDetail {
            stake,
            stake_rama,
            team_volume: partial.take("UserRegistry.getTeamVolume", volume),
            directs: partial.take("UserRegistry.getDirectCount", directs),
        };
        partial.finish(detail)
    }
}
