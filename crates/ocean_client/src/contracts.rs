//! Solidity bindings for the platform contracts.
//!
//! Uses alloy's `sol!` macro to generate ABI encoders/decoders. Only the
//! functions this client reads or builds transactions for are declared.
//!
//! Denominations follow the field suffix: `UsdMicro` = 1e6, `UsdE8` = 1e8,
//! `RamaWei` = 1e18, `Wad` = 1e18 rate, `Bps` = 1e4.

use alloy::sol;

sol! {
    struct PortfolioInfo {
        uint256 pid;
        address owner;
        uint256 principalUsdMicro;
        uint256 principalRamaWei;
        uint256 capPct;
        uint256 capProgressBps;
        bool booster;
        uint256 dailyRateWad;
        uint64 createdAt;
        uint64 frozenUntil;
        bool active;
        bool exitRequested;
    }

    struct DashboardSummary {
        uint256 userId;
        address referrer;
        uint256 totalStakedUsdMicro;
        uint256 totalStakedRamaWei;
        uint256 totalEarnedRamaWei;
        uint256 accruedGrowthUsdMicro;
        uint256 totalClaimableUsdMicro;
        uint256 qualifiedVolumeUsdMicro;
        uint256 safeWalletRamaWei;
        uint256 safeWalletUsdMicro;
        uint8 slabLevel;
        uint8 royaltyLevel;
        uint32 royaltyPaidMonths;
        uint32 directs;
        uint32 activePortfolios;
    }

    struct SlabPanel {
        uint8 slabIndex;
        uint256 qualifiedVolumeUsdMicro;
        uint32 directMembers;
        bool canClaim;
        uint256 slabIncomeUsdMicro;
        uint256 slabIncomeRamaWei;
        uint256 slabIncomeAvailableUsdMicro;
        uint256 slabIncomeAvailableRamaWei;
        uint256 overrideIncomeUsdMicro;
        uint256 overrideIncomeRamaWei;
    }

    struct RoyaltyPanel {
        uint8 currentLevel;
        uint32 paidMonths;
        bool canClaim;
        bool paused;
        uint256 royaltyIncomeUsdMicro;
        uint256 royaltyIncomeRamaWei;
        uint256 qualifiedVolumeUsdMicro;
        uint256 renewalSnapshotUsdMicro;
        uint256 renewalRecentUsdMicro;
        uint256 renewalRequiredUsdMicro;
        uint256 renewalTargetUsdMicro;
        uint256 nextMonthEpoch;
    }

    struct Milestone {
        uint256 thresholdUsdMicro;
        uint256 rewardUsdMicro;
        bool claimed;
        bool unlocked;
        bool claimable;
    }

    struct RewardsPanel {
        uint256 qualifiedVolumeUsdMicro;
        uint256 totalEarnedUsdMicro;
        uint256 totalEarnedRamaWei;
        uint256 pendingRewardUsdMicro;
        uint256 pendingRewardRamaWei;
        Milestone[] milestones;
    }

    struct DirectIncome {
        address from;
        uint256 pid;
        uint256 amountUsdMicro;
        uint256 amountRamaWei;
        uint64 timestamp;
    }

    interface IUserRegistry {
        function isRegistered(address user) external view returns (bool);
        function user(address account) external view returns (uint256);
        function idToAddress(uint256 userId) external view returns (address);
        function getSponsor(address user) external view returns (address);
        function registrationTime(address user) external view returns (uint256);
        function getDirectCount(address user) external view returns (uint256);
        function getDirectReferrals(address user) external view returns (address[] memory);
        function getQualifiedVolume(address user) external view returns (uint256);
        function getTeamVolume(address user) external view returns (uint256 qualifiedUsdMicro, uint256 totalUsdMicro);
        function registerUser(address sponsor) external;
    }

    interface IPortfolioManager {
        function getUserPortfolios(address user) external view returns (uint256[] memory);
        function getPortfolio(uint256 pid) external view returns (PortfolioInfo memory);
        function getUserTotalStake(address user) external view returns (uint256 usdMicro, uint256 ramaWei);
        function quoteRamaForUsd(uint256 usdMicro) external view returns (uint256);
        function quoteUsdForRama(uint256 ramaWei) external view returns (uint256);
        function createPortfolio(uint256 usdMicro) external payable;
        function createPortfolioFor(address beneficiary, uint256 usdMicro) external payable;
        function createPortfolioFromSafe(uint256 usdMicro) external;
        function applyExit(uint256 pid) external;
        function cancelExit(uint256 pid) external;
        function claimGrowth(uint256 pid) external;
    }

    interface IOceanQuery {
        function getDashboard(address user) external view returns (DashboardSummary memory);
        function getPortfolioSummaries(address user) external view returns (PortfolioInfo[] memory);
        function getIncomeStreamTotals(address user) external view returns (uint256 growth, uint256 slab, uint256 royalty, uint256 overrideBonus, uint256 rewards);
        function getDailyEarnings(address user, uint256 dayCount) external view returns (uint256[] memory);
    }

    interface IOceanView {
        function getSlabPanel(address user) external view returns (SlabPanel memory);
        function getRoyaltyPanel(address user) external view returns (RoyaltyPanel memory);
        function getRewardsPanel(address user) external view returns (RewardsPanel memory);
        function getRecentTransactions(address user, uint256 limit) external view returns (bytes[] memory);
    }

    interface ISlabManager {
        function getSlabLevel(address user) external view returns (uint8);
        function getSlabIncome(address user) external view returns (uint256 totalUsdMicro, uint256 totalRamaWei, uint256 availableUsdMicro, uint256 availableRamaWei, bool canClaim);
        function getOverrideEarnings(address user) external view returns (uint256 l1RamaWei, uint256 l2RamaWei, uint256 l3RamaWei, uint256 l1UsdMicro, uint256 l2UsdMicro, uint256 l3UsdMicro);
        function getSameSlabPartners(address user) external view returns (address[] memory firstWave, address[] memory secondWave, address[] memory thirdWave);
        function claimSlabIncome() external;
    }

    interface IRoyaltyManager {
        function getRoyaltyTiers() external view returns (uint256[] memory thresholdsUsdE8, uint256[] memory monthlyUsdE8);
        function getUserRoyalty(address user) external view returns (uint8 level, uint32 paidMonths, bool canClaim, uint256 totalPaidUsdMicro, uint256 totalPaidRamaWei, uint256 nextMonthEpoch);
        function isPaused() external view returns (bool);
        function claimRoyalty() external;
    }

    interface IRewardVault {
        function getMilestones() external view returns (uint256[] memory thresholdsUsdE8, uint256[] memory rewardsUsdE8);
        function getClaimedMask(address user) external view returns (uint256);
        function getRewardTotals(address user) external view returns (uint256 earnedUsdMicro, uint256 earnedRamaWei, uint256 pendingUsdMicro, uint256 pendingRamaWei);
        function claimReward(uint256 milestone) external;
    }

    interface IIncomeDistributor {
        function getDirectIncomeCount(address user) external view returns (uint256);
        /// Newest first
        function getDirectIncomes(address user, uint256 offset, uint256 limit) external view returns (DirectIncome[] memory);
        function getDirectIncomeTotals(address user) external view returns (uint256 lifetimeUsdMicro, uint256 lifetimeRamaWei, uint256 claimableUsdMicro, uint256 claimableRamaWei);
        function getDirectIncomeSince(address user, uint64 since) external view returns (uint256 usdMicro, uint256 ramaWei);
    }

    interface ISafeWallet {
        function balanceOf(address user) external view returns (uint256);
        function withdrawFeeBps() external view returns (uint256);
        function withdraw(uint256 amountRamaWei) external;
    }
}
