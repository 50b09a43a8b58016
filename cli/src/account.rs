//! Wallet login, user status and deployment info

use anyhow::Result;
use colored::Colorize;
use ocean_client::parse_address;
use ocean_client::time::format_date;

use crate::client::{self, field, format_address, format_slab_level, format_usd, header, yes_no, Session};

pub async fn show_user(session: &Session, address: Option<String>) -> Result<()> {
    let user = session.resolve_user(address)?;
    let fetched = session
        .fetch("Loading user...", session.client.users().user_status(&user))
        .await?;
    if session.emit_json(&fetched)? {
        return Ok(());
    }

    let u = &fetched.value;
    header("User");
    field("Wallet", format_address(&u.address));
    field("Registered", yes_no(u.registered));
    if u.registered {
        field("User ID", u.user_id);
        field(
            "Sponsor",
            u.sponsor.as_ref().map(format_address).unwrap_or_else(|| "—".dimmed().to_string()),
        );
        field("Joined", format_date(u.registered_at));
        field("Slab Tier", format_slab_level(u.slab_level));
        field("Royalty Level", format!("{} ({} months paid)", u.royalty_level, u.royalty_paid_months));
        field("Directs", u.directs);
        field("Qualified Volume", format_usd(u.qualified_volume));
    } else {
        println!("\n{}", "Not registered. Build a registration with `ocean tx register <sponsor>`".yellow());
    }

    client::report_degradation(&fetched);
    Ok(())
}

/// Validate and remember the wallet address; no signature involved
pub fn login(session: &Session, address: &str) -> Result<()> {
    let parsed = parse_address(address)?;
    session.state.set_user_address(&parsed)?;

    if session.emit_json(&serde_json::json!({ "userAddress": parsed.to_string() }))? {
        return Ok(());
    }
    println!("{} Logged in as {}", "✓".green(), format_address(&parsed));
    println!("  {}", format!("State stored in {}", session.state.path().display()).dimmed());
    Ok(())
}

pub fn show_contracts(session: &Session) -> Result<()> {
    let contracts = session.client.contracts();
    if session.json {
        let map: serde_json::Map<String, serde_json::Value> = contracts
            .iter()
            .map(|(name, address)| (name.to_string(), address.to_string().into()))
            .collect();
        session.emit_json(&map)?;
        return Ok(());
    }

    header(&format!("Contracts ({})", session.config.network));
    field("RPC", &session.config.rpc_url);
    for (name, address) in contracts.iter() {
        println!("  {:<18} {}", name.to_string().bright_cyan(), address);
    }
    Ok(())
}
