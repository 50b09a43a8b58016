//! Read aggregators, one per bounded context
//!
//! Every aggregator validates its address input before touching the
//! network, fans independent calls out concurrently and returns a
//! [`Fetched`](crate::Fetched) report instead of failing on a single
//! sub-call.

pub mod dashboard;
pub mod income;
pub mod portfolio;
pub mod rewards;
pub mod royalty;
pub mod safe_wallet;
pub mod slab;
pub mod team;
pub mod user;

pub use dashboard::{DailyEarning, DashboardDetails, DashboardService, SafeWalletSnapshot};
pub use income::{
    IncomeEntry, IncomeHistory, IncomeService, IncomeStreamTotals, PortfolioIncomeTotal, SpotIncomeOptions,
    SpotIncomeOverview, SpotIncomeSummary,
};
pub use portfolio::{PortfolioService, PortfolioStatus, PortfolioSummary, TotalPortfolios};
pub use rewards::{MilestoneStatus, RewardsOverview, RewardsService};
pub use royalty::{RoyaltyOverview, RoyaltyService, RoyaltyTier};
pub use safe_wallet::{SafeWalletService, SafeWalletSummary, WithdrawalPreview};
pub use slab::{slab_tier_name, OverrideEarnings, SameSlabPartners, SlabOverview, SlabService};
pub use team::{DirectIncomeSummary, TeamLevel, TeamMember, TeamNetwork, TeamNetworkOptions, TeamService, TeamVolume};
pub use user::{UserService, UserStatus};
