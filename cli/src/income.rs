//! Slab, royalty, rewards, spot income and Safe Wallet views

use anyhow::Result;
use colored::Colorize;
use ocean_client::services::SpotIncomeOptions;
use ocean_client::time::{format_datetime, now_secs, time_ago};

use crate::client::{self, field, format_address, format_bps, format_slab_level, format_rama, format_usd, format_usd_e8, header, yes_no, Session};

pub async fn show_slab(session: &Session, address: Option<String>) -> Result<()> {
    let user = session.resolve_user(address)?;
    let fetched = session
        .fetch("Loading slab income...", session.client.slab().slab_income_overview(&user))
        .await?;
    if session.emit_json(&fetched)? {
        return Ok(());
    }

    let s = &fetched.value;
    header("Slab Income");
    field("Slab Tier", format_slab_level(s.slab_level));
    field("Qualified Volume", format_usd(s.qualified_volume));
    field("Direct Members", s.directs);
    field("Can Claim", yes_no(s.can_claim));
    field("Slab Income", format!("{} ({})", format_usd(s.slab_income), format_rama(s.slab_income_rama)));
    field("Available", format!("{} ({})", format_usd(s.available), format_rama(s.available_rama)));
    field("Override Income", format!("{} ({})", format_usd(s.override_income), format_rama(s.override_income_rama)));

    println!("\n{}", "Override Earnings:".bright_yellow());
    for (level, (usd, rama)) in s.override_earnings.usd.iter().zip(&s.override_earnings.rama).enumerate() {
        field(&format!("L{}", level + 1), format!("{} ({})", format_usd(*usd), format_rama(*rama)));
    }

    println!("\n{}", "Same-Slab Partners:".bright_yellow());
    for (wave, partners) in [
        ("First wave", &s.partners.first_wave),
        ("Second wave", &s.partners.second_wave),
        ("Third wave", &s.partners.third_wave),
    ] {
        field(wave, partners.len());
        for partner in partners.iter().take(5) {
            println!("    {}", format_address(partner));
        }
    }

    client::report_degradation(&fetched);
    Ok(())
}

pub async fn show_royalty(session: &Session, address: Option<String>) -> Result<()> {
    let user = session.resolve_user(address)?;
    let fetched = session
        .fetch("Loading royalty...", session.client.royalty().royalty_overview(&user))
        .await?;
    if session.emit_json(&fetched)? {
        return Ok(());
    }

    let r = &fetched.value;
    header("Royalty");
    field("Current Level", r.current_level);
    field("Paid Months", r.paid_months);
    field("Cycle Progress", format!("{:.1}%", r.payout_progress_percent));
    field("Can Claim", yes_no(r.can_claim));
    if r.paused {
        field("Status", "Paused".red());
    }
    field("Royalty Income", format!("{} ({})", format_usd(r.royalty_income), format_rama(r.royalty_income_rama)));
    field("Qualified Volume", format_usd(r.qualified_volume));
    field("Next Month", &r.next_month_label);

    println!("\n{}", "Renewal:".bright_yellow());
    field("Snapshot", format_usd(r.renewal_snapshot));
    field("Recent", format_usd(r.renewal_recent));
    field("Required", format_usd(r.renewal_required));
    field("Target", format_usd(r.renewal_target));

    println!("\n{}", "Tiers:".bright_yellow());
    for tier in &r.tiers {
        let marker = if Some(tier.level) == r.current_tier.map(|t| t.level) { "▶".green().to_string() } else { " ".to_string() };
        println!(
            "  {} L{:<2} volume ≥ {:>14}  monthly {:>12}",
            marker,
            tier.level,
            format_usd_e8(tier.threshold),
            format_usd_e8(tier.monthly)
        );
    }

    client::report_degradation(&fetched);
    Ok(())
}

pub async fn show_rewards(session: &Session, address: Option<String>) -> Result<()> {
    let user = session.resolve_user(address)?;
    let fetched = session
        .fetch("Loading rewards...", session.client.rewards().one_time_rewards_overview(&user))
        .await?;
    if session.emit_json(&fetched)? {
        return Ok(());
    }

    let r = &fetched.value;
    header("One-Time Rewards");
    field("Qualified Volume", format_usd(r.qualified_volume));
    field("Claimed", format!("{} / {}", r.claimed_count, r.milestones.len()));
    field("Total Earned", format!("{} ({})", format_usd(r.total_earned), format_rama(r.total_earned_rama)));
    field("Pending", format!("{} ({})", format_usd(r.pending), format_rama(r.pending_rama)));
    field("Remaining", format_usd(r.remaining));

    println!("\n{}", "Milestones:".bright_yellow());
    for m in &r.milestones {
        let state = if m.claimed {
            "claimed".dimmed().to_string()
        } else if m.claimable {
            "claimable".green().bold().to_string()
        } else if m.unlocked {
            "unlocked".green().to_string()
        } else {
            "locked".yellow().to_string()
        };
        println!("  #{:<2} volume ≥ {:>14}  reward {:>12}  {}", m.index, format_usd(m.threshold), format_usd(m.reward), state);
    }

    client::report_degradation(&fetched);
    Ok(())
}

pub async fn show_spot_income(session: &Session, address: Option<String>, options: SpotIncomeOptions) -> Result<()> {
    let user = session.resolve_user(address)?;
    let fetched = session
        .fetch("Loading spot income...", session.client.income().spot_income_summary(&user, options))
        .await?;
    if session.emit_json(&fetched)? {
        return Ok(());
    }

    let s = &fetched.value;
    let o = &s.overview;
    header("Spot Income");
    field("Lifetime", format!("{} ({})", format_usd(o.lifetime), format_rama(o.lifetime_rama)));
    field("Last 24h", format!("{} ({})", format_usd(o.last_24h), format_rama(o.last_24h_rama)));
    field("Claimable", format!("{} ({})", format_usd(o.claimable), format_rama(o.claimable_rama)));
    field("Entries", o.total_entries);
    field("Active Spots", o.active_spots);
    field("Average Spot", format_usd(o.average_spot));

    if !s.by_portfolio.is_empty() {
        println!("\n{}", "Top Portfolios:".bright_yellow());
        for total in &s.by_portfolio {
            field(&format!("#{}", total.pid), format!("{} over {} entries", format_usd(total.amount), total.entries));
        }
    }

    println!("\n{}", "Recent:".bright_yellow());
    let now = now_secs();
    for entry in &s.transactions {
        println!(
            "  {:>10}  {}  from {}  portfolio #{}",
            time_ago(entry.timestamp, now).dimmed(),
            format_usd(entry.amount),
            format_address(&entry.from),
            entry.pid
        );
    }
    if s.has_more {
        println!("  {}", "(more available: ocean spot-history --offset N)".dimmed());
    }

    client::report_degradation(&fetched);
    Ok(())
}

pub async fn show_spot_history(session: &Session, address: Option<String>, offset: u64, limit: u64) -> Result<()> {
    let user = session.resolve_user(address)?;
    let entries = session
        .fetch("Loading spot income...", session.client.income().spot_income_transactions(&user, offset, limit))
        .await?;
    if session.emit_json(&entries)? {
        return Ok(());
    }

    header(&format!("Spot Income {}..{}", offset, offset + entries.len() as u64));
    for entry in &entries {
        println!(
            "  {}  {}  {}  from {}  portfolio #{}",
            format_datetime(entry.timestamp).dimmed(),
            format_usd(entry.amount),
            format_rama(entry.amount_rama),
            format_address(&entry.from),
            entry.pid
        );
    }
    if entries.is_empty() {
        println!("\n{}", "No entries".yellow());
    }
    Ok(())
}

/// How a withdrawal preview amount is denominated
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PreviewAmount {
    Rama(f64),
    Usd(f64),
}

pub async fn show_safe_wallet(session: &Session, address: Option<String>, preview: Option<PreviewAmount>) -> Result<()> {
    let user = session.resolve_user(address)?;

    if let Some(amount) = preview {
        let wallet = session.client.safe_wallet();
        let fetched = match amount {
            PreviewAmount::Rama(rama) => {
                session.fetch("Quoting withdrawal...", wallet.withdrawal_preview(&user, rama)).await?
            }
            PreviewAmount::Usd(usd) => {
                session.fetch("Quoting withdrawal...", wallet.withdrawal_preview_usd(&user, usd)).await?
            }
        };
        if session.emit_json(&fetched)? {
            return Ok(());
        }

        let p = &fetched.value;
        header("Withdrawal Preview");
        field("Gross", format!("{} ({})", format_rama(p.gross), format_usd(p.gross_usd)));
        field("Fee", format!("{} ({}, {})", format_bps(p.fee), format_rama(p.fee_amount), format_usd(p.fee_usd)));
        field("Net", format!("{} ({})", format_rama(p.net), format_usd(p.net_usd)));
        if p.exceeds_balance {
            println!("\n{}", "Amount exceeds the Safe Wallet balance".red());
        }
        client::report_degradation(&fetched);
        return Ok(());
    }

    let fetched = session
        .fetch("Loading Safe Wallet...", session.client.safe_wallet().safe_wallet_summary(&user))
        .await?;
    if session.emit_json(&fetched)? {
        return Ok(());
    }

    let s = &fetched.value;
    header("Safe Wallet");
    field("Balance", format!("{} ({})", format_rama(s.balance), format_usd(s.balance_usd)));
    field("RAMA Price", format!("${:.6}", s.price.to_usd()));
    field("Withdrawal Fee", format_bps(s.fee));
    field(
        "Available After Fee",
        format!("{} ({})", format_rama(s.available_after_fee_rama), format_usd(s.available_after_fee)),
    );

    client::report_degradation(&fetched);
    Ok(())
}
