//! Portfolio listing and selection

use anyhow::{Context, Result};
use colored::Colorize;
use ocean_client::services::{PortfolioStatus, PortfolioSummary};
use ocean_client::time::format_date;

use crate::client::{self, field, format_rama, format_usd, header, Session};

fn status_label(status: PortfolioStatus) -> String {
    match status {
        PortfolioStatus::Active => "Active".green().to_string(),
        PortfolioStatus::Frozen => "Frozen".yellow().to_string(),
        PortfolioStatus::Closed => "Closed".dimmed().to_string(),
    }
}

fn print_portfolio(p: &PortfolioSummary) {
    println!(
        "\n{} {}{}",
        format!("Portfolio #{}", p.pid).bright_yellow(),
        status_label(p.status()),
        if p.booster { " (booster)".bright_magenta().to_string() } else { String::new() }
    );
    field("Principal", format!("{} ({})", format_usd(p.principal), format_rama(p.principal_rama)));
    field("Max Cap", format!("{} ({}%)", format_usd(p.max_cap()), p.cap_pct));
    field("Cap Progress", format!("{:.2}%", p.cap_progress_percent()));
    field("Earned", format_usd(p.earned()));
    field("Remaining Cap", format_usd(p.remaining_cap()));
    field("Daily Rate", format!("{:.4}%", p.daily_rate_percent()));
    field("Created", format_date(p.created_at));
    if p.frozen_until > 0 {
        field("Frozen Until", format_date(p.frozen_until));
    }
    if p.exit_requested {
        field("Exit", "requested".yellow());
    }
}

pub async fn list_portfolios(session: &Session, address: Option<String>) -> Result<()> {
    let user = session.resolve_user(address)?;
    let fetched = session
        .fetch("Loading portfolios...", session.client.portfolios().portfolio_summaries(&user))
        .await?;
    if session.emit_json(&fetched)? {
        return Ok(());
    }

    header("Portfolios");
    if fetched.value.is_empty() {
        println!("\n{}", "No portfolios found".yellow());
    }
    for portfolio in &fetched.value {
        print_portfolio(portfolio);
    }

    let selected = session.selected_portfolio()?;
    if let Some(pid) = selected {
        println!("\n{} #{}", "Selected:".bright_cyan(), pid);
    }

    client::report_degradation(&fetched);
    Ok(())
}

/// Show one portfolio; without a pid, the stored selection or the first one
pub async fn show_portfolio(session: &Session, address: Option<String>, pid: Option<u64>) -> Result<()> {
    let pid = match pid.or(session.selected_portfolio()?) {
        Some(pid) => pid,
        None => {
            let user = session.resolve_user(address)?;
            let total = session
                .fetch("Loading portfolios...", session.client.portfolios().total_portfolios(&user))
                .await?
                .into_value();
            if session.emit_json(&total)? {
                return Ok(());
            }
            let first = total.selected.context("No portfolios found for this wallet")?;
            header(&format!("Portfolio ({} total)", total.ids.len()));
            print_portfolio(&first);
            return Ok(());
        }
    };

    let portfolio = session
        .fetch("Loading portfolio...", session.client.portfolios().portfolio_by_id(pid))
        .await
        .with_context(|| format!("Failed to load portfolio #{}", pid))?;
    if session.emit_json(&portfolio)? {
        return Ok(());
    }

    header("Portfolio");
    print_portfolio(&portfolio);
    Ok(())
}

pub fn select_portfolio(session: &Session, pid: u64) -> Result<()> {
    session.state.set_selected_portfolio(pid)?;
    println!("{} Selected portfolio #{}", "✓".green(), pid);
    Ok(())
}
