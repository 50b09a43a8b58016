//! Dashboard, earning trend and income history

use anyhow::Result;
use colored::Colorize;
use ocean_client::units::{mul_div, UsdMicro};

use crate::client::{self, field, format_address, format_rama, format_slab_level, format_usd, format_usd_e8, header, Session};

pub async fn show_dashboard(session: &Session, address: Option<String>) -> Result<()> {
    let user = session.resolve_user(address)?;
    let fetched = session
        .fetch("Loading dashboard...", session.client.dashboard().dashboard_details(&user))
        .await?;
    if session.emit_json(&fetched)? {
        return Ok(());
    }

    let d = &fetched.value;
    header("Dashboard");
    field("Wallet", format_address(&d.address));
    field("User ID", d.user_id);
    field(
        "Referrer",
        d.referrer.as_ref().map(format_address).unwrap_or_else(|| "—".dimmed().to_string()),
    );

    println!("\n{}", "Staking:".bright_yellow());
    field("Total Staked", format!("{} ({})", format_usd(d.total_staked), format_rama(d.total_staked_rama)));
    field("Active Portfolios", d.active_portfolios);
    field("Accrued Growth", format_usd(d.accrued_growth));
    field("Total Earned", format_rama(d.total_earned_rama));
    field("Total Claimable", format_usd(d.total_claimable));

    println!("\n{}", "Network:".bright_yellow());
    field("Directs", d.directs);
    field("Qualified Volume", format_usd(d.qualified_volume));
    field("Slab Tier", format_slab_level(d.slab_level));
    field(
        "Slab Income Available",
        format!("{} (claimable: {})", format_usd(d.slab_income_available), client::yes_no(d.slab_can_claim)),
    );
    field("Royalty Level", format!("{} ({} months paid)", d.royalty_level, d.royalty_paid_months));

    println!("\n{}", "Safe Wallet:".bright_yellow());
    field("Balance", format!("{} ({})", format_rama(d.safe_wallet.balance), format_usd(d.safe_wallet.balance_usd)));

    println!("\n{}", "Income Streams:".bright_yellow());
    field("Growth", format_usd_e8(d.income.growth));
    field("Slab", format_usd_e8(d.income.slab));
    field("Royalty", format_usd_e8(d.income.royalty));
    field("Override", format_usd_e8(d.income.override_bonus));
    field("Rewards", format_usd_e8(d.income.rewards));
    field("Total", format_usd_e8(d.income.total()));

    client::report_degradation(&fetched);
    Ok(())
}

const BAR_COLUMNS: u128 = 30;

/// Bar length relative to the best day
fn bar_width(amount: UsdMicro, peak: UsdMicro) -> usize {
    mul_div(amount.raw(), BAR_COLUMNS, peak.raw()) as usize
}

pub async fn show_trend(session: &Session, address: Option<String>, days: u32) -> Result<()> {
    let user = session.resolve_user(address)?;
    let fetched = session
        .fetch("Loading earnings...", session.client.dashboard().earning_trend(&user, days))
        .await?;
    if session.emit_json(&fetched)? {
        return Ok(());
    }

    header(&format!("Daily Earnings ({} days)", fetched.value.len()));
    let peak = fetched.value.iter().map(|d| d.amount).max().unwrap_or_default();
    for day in &fetched.value {
        let width = bar_width(day.amount, peak);
        println!("  {}  {:>12}  {}", day.date, format_usd(day.amount), "█".repeat(width).bright_blue());
    }

    client::report_degradation(&fetched);
    Ok(())
}

pub async fn show_history(session: &Session, address: Option<String>, limit: u64) -> Result<()> {
    let user = session.resolve_user(address)?;
    let fetched = session
        .fetch("Loading income history...", session.client.income().income_history(&user, limit))
        .await?;
    if session.emit_json(&fetched)? {
        return Ok(());
    }

    let history = &fetched.value;
    header("Income History");
    field("Growth", format_usd_e8(history.totals.growth));
    field("Slab", format_usd_e8(history.totals.slab));
    field("Royalty", format_usd_e8(history.totals.royalty));
    field("Override", format_usd_e8(history.totals.override_bonus));
    field("Rewards", format_usd_e8(history.totals.rewards));
    field("Grand Total", format_usd_e8(history.grand_total).bold());
    field("Recent Transactions", history.recent_transactions);

    client::report_degradation(&fetched);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_width() {
        assert_eq!(bar_width(UsdMicro::new(5_000_000), UsdMicro::new(10_000_000)), 15);
        assert_eq!(bar_width(UsdMicro::new(10_000_000), UsdMicro::new(10_000_000)), 30);
        assert_eq!(bar_width(UsdMicro::ZERO, UsdMicro::ZERO), 0);
        assert_eq!(bar_width(UsdMicro::new(u128::MAX), UsdMicro::new(u128::MAX)), 30);
    }
}
