//! Referral network view

use anyhow::Result;
use colored::Colorize;
use ocean_client::services::TeamNetworkOptions;

use crate::client::{self, field, format_address, format_rama, format_usd, header, Session};

pub async fn show_team(session: &Session, address: Option<String>, options: TeamNetworkOptions) -> Result<()> {
    let user = session.resolve_user(address)?;
    let fetched = session
        .fetch("Walking referral tree...", session.client.team().team_network(&user, options))
        .await?;
    if session.emit_json(&fetched)? {
        return Ok(());
    }

    let team = &fetched.value;
    header("Team Network");
    field("Wallet", format_address(&team.address));
    field("Total Members", team.total_members);
    field("Team Volume", format_usd(team.team_volume.total));
    field("Qualified Volume", format_usd(team.qualified_volume));
    field(
        "Direct Income",
        format!(
            "{} lifetime, {} claimable",
            format_usd(team.direct_income.lifetime),
            format_usd(team.direct_income.claimable)
        ),
    );

    for level in &team.levels {
        println!("\n{} ({} members)", level.name.bright_yellow(), level.members.len());
        for member in &level.members {
            if member.detailed {
                println!(
                    "  {}  stake {} ({})  team {}  directs {}",
                    format_address(&member.address),
                    format_usd(member.stake),
                    format_rama(member.stake_rama),
                    format_usd(member.team_volume.total),
                    member.directs
                );
            } else {
                println!("  {}  {}", format_address(&member.address), "(no detail)".dimmed());
            }
        }
    }

    if team.levels.is_empty() {
        println!("\n{}", "No referrals yet".yellow());
    }

    client::report_degradation(&fetched);
    Ok(())
}
