//! One-time milestone rewards

use alloy::primitives::{Address, U256};
use log::debug;
use ocean_units::{RamaWei, UsdE8, UsdMicro};
use serde::Serialize;

use crate::address::parse_address;
use crate::contracts::{IOceanView, IRewardVault, RewardsPanel};
use crate::degraded::{Fetched, Partial};
use crate::error::Result;
use crate::raw::{rama_wei, usd_e8, usd_micro};
use crate::registry::ContractName;
use crate::OceanClient;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneStatus {
    /// 0-based, as passed to `claimReward`
    pub index: u32,
    pub threshold: UsdMicro,
    pub reward: UsdMicro,
    pub claimed: bool,
    pub unlocked: bool,
    pub claimable: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardsOverview {
    pub milestones: Vec<MilestoneStatus>,
    pub claimed_count: usize,
    pub total_earned: UsdMicro,
    pub total_earned_rama: RamaWei,
    pub pending: UsdMicro,
    pub pending_rama: RamaWei,
    pub qualified_volume: UsdMicro,
    /// Sum of rewards not yet claimed
    pub remaining: UsdMicro,
}

impl RewardsOverview {
    fn from_panel(panel: RewardsPanel) -> Self {
        let milestones = panel
            .milestones
            .into_iter()
            .enumerate()
            .map(|(i, m)| MilestoneStatus {
                index: u32::try_from(i).unwrap_or(u32::MAX),
                threshold: usd_micro(m.thresholdUsdMicro),
                reward: usd_micro(m.rewardUsdMicro),
                claimed: m.claimed,
                unlocked: m.unlocked,
                claimable: m.claimable,
            })
            .collect();

        Self {
            milestones,
            total_earned: usd_micro(panel.totalEarnedUsdMicro),
            total_earned_rama: rama_wei(panel.totalEarnedRamaWei),
            pending: usd_micro(panel.pendingRewardUsdMicro),
            pending_rama: rama_wei(panel.pendingRewardRamaWei),
            qualified_volume: usd_micro(panel.qualifiedVolumeUsdMicro),
            ..Self::default()
        }
    }

    fn with_counts(mut self) -> Self {
        self.claimed_count = self.milestones.iter().filter(|m| m.claimed).count();
        self.remaining = self.milestones.iter().filter(|m| !m.claimed).map(|m| m.reward).sum();
        self
    }
}

/// Milestone table from the vault's 8-decimal columns, a claimed bitmask and
/// the user's qualified volume
pub fn milestones_from_mask(
    thresholds: &[UsdE8],
    rewards: &[UsdE8],
    claimed_mask: U256,
    volume: UsdMicro,
) -> Vec<MilestoneStatus> {
    thresholds
        .iter()
        .zip(rewards)
        .enumerate()
        .map(|(i, (threshold, reward))| {
            let threshold = threshold.to_micro();
            let claimed = i < 256 && claimed_mask.bit(i);
            let unlocked = volume >= threshold;
            MilestoneStatus {
                index: u32::try_from(i).unwrap_or(u32::MAX),
                threshold,
                reward: reward.to_micro(),
                claimed,
                unlocked,
                claimable: unlocked && !claimed,
            }
        })
        .collect()
}

pub struct RewardsService<'a> {
    client: &'a OceanClient,
}

impl<'a> RewardsService<'a> {
    pub(crate) fn new(client: &'a OceanClient) -> Self {
        Self { client }
    }

    pub async fn one_time_rewards_overview(&self, user: &str) -> Result<Fetched<RewardsOverview>> {
        let user = parse_address(user)?;
        let mut partial = Partial::new();

        let panel = self
            .client
            .read(ContractName::OceanView, IOceanView::getRewardsPanelCall { user })
            .await;

        let overview = match partial.primary("OceanView.getRewardsPanel", panel) {
            Some(panel) => RewardsOverview::from_panel(panel),
            None => self.legacy_overview(user, &mut partial).await,
        };

        Ok(partial.finish(overview.with_counts()))
    }

    async fn legacy_overview(&self, user: Address, partial: &mut Partial) -> RewardsOverview {
        debug!("Assembling rewards overview for {} from RewardVault", user);
        let client = self.client;
        let users = client.users();

        let (milestones, mask, totals, volume) = futures::join!(
            client.read(ContractName::RewardVault, IRewardVault::getMilestonesCall {}),
            client.read(ContractName::RewardVault, IRewardVault::getClaimedMaskCall { user }),
            client.read(ContractName::RewardVault, IRewardVault::getRewardTotalsCall { user }),
            users.qualified_volume(user),
        );

        let (thresholds, rewards): (Vec<UsdE8>, Vec<UsdE8>) = partial.take(
            "RewardVault.getMilestones",
            milestones.map(|m| {
                (
                    m.thresholdsUsdE8.into_iter().map(usd_e8).collect(),
                    m.rewardsUsdE8.into_iter().map(usd_e8).collect(),
                )
            }),
        );
        let mask = partial.take("RewardVault.getClaimedMask", mask);
        let volume = partial.take("UserRegistry.getQualifiedVolume", volume);

        let mut overview = RewardsOverview {
            milestones: milestones_from_mask(&thresholds, &rewards, mask, volume),
            qualified_volume: volume,
            ..RewardsOverview::default()
        };

        if let Some(t) = partial.take_or("RewardVault.getRewardTotals", totals.map(Some), None) {
            overview.total_earned = usd_micro(t.earnedUsdMicro);
            overview.total_earned_rama = rama_wei(t.earnedRamaWei);
            overview.pending = usd_micro(t.pendingUsdMicro);
            overview.pending_rama = rama_wei(t.pendingRamaWei);
        }

        overview
    }
}
