//! Unsigned transaction output
//!
//! Each command prints a wallet-ready descriptor. Nothing is signed or sent.

use anyhow::{Context, Result};
use colored::Colorize;
use ocean_client::{OceanError, UnsignedTx};
use std::future::Future;

use crate::client::{field, format_address, format_rama, header, Session};

async fn emit<F>(session: &Session, future: F) -> Result<()>
where
    F: Future<Output = Result<UnsignedTx, OceanError>>,
{
    let tx = session.fetch("Building transaction...", future).await?;
    if session.emit_json(&tx)? {
        return Ok(());
    }

    header("Unsigned Transaction");
    field("Call", &tx.call);
    field("From", format_address(&tx.from));
    field("To", format_address(&tx.to));
    field("Value", format_rama(tx.value_rama()));
    field("Gas", tx.gas);
    field("Gas Price", format!("{} wei", tx.gas_price));
    field("Max Fee", format!("{} wei", tx.max_fee()));

    let json = serde_json::to_string_pretty(&tx).context("Failed to serialize transaction")?;
    println!("\n{}", "Sign and send with your wallet:".bright_yellow());
    println!("{}", json);
    Ok(())
}

pub async fn register(session: &Session, from: Option<String>, sponsor: &str) -> Result<()> {
    let from = session.resolve_user(from)?;
    emit(session, session.client.transactions().register_user(&from, sponsor)).await
}

/// Stake `usd`, optionally for someone else or paid from the Safe Wallet
pub async fn stake(
    session: &Session,
    from: Option<String>,
    usd: f64,
    beneficiary: Option<&str>,
    from_safe: bool,
) -> Result<()> {
    let from = session.resolve_user(from)?;
    let builder = session.client.transactions();
    match (beneficiary, from_safe) {
        (Some(_), true) => anyhow::bail!("--for and --from-safe cannot be combined"),
        (Some(beneficiary), false) => emit(session, builder.create_portfolio_for(&from, beneficiary, usd)).await,
        (None, true) => emit(session, builder.create_portfolio_from_safe(&from, usd)).await,
        (None, false) => emit(session, builder.create_portfolio(&from, usd)).await,
    }
}

pub async fn exit(session: &Session, from: Option<String>, pid: u64) -> Result<()> {
    let from = session.resolve_user(from)?;
    emit(session, session.client.transactions().apply_exit(&from, pid)).await
}

pub async fn cancel_exit(session: &Session, from: Option<String>, pid: u64) -> Result<()> {
    let from = session.resolve_user(from)?;
    emit(session, session.client.transactions().cancel_exit(&from, pid)).await
}

pub async fn claim_growth(session: &Session, from: Option<String>, pid: u64) -> Result<()> {
    let from = session.resolve_user(from)?;
    emit(session, session.client.transactions().claim_growth(&from, pid)).await
}

pub async fn claim_slab(session: &Session, from: Option<String>) -> Result<()> {
    let from = session.resolve_user(from)?;
    emit(session, session.client.transactions().claim_slab_income(&from)).await
}

pub async fn claim_royalty(session: &Session, from: Option<String>) -> Result<()> {
    let from = session.resolve_user(from)?;
    emit(session, session.client.transactions().claim_royalty(&from)).await
}

pub async fn claim_reward(session: &Session, from: Option<String>, milestone: u32) -> Result<()> {
    let from = session.resolve_user(from)?;
    emit(session, session.client.transactions().claim_one_time_reward(&from, milestone)).await
}

pub async fn withdraw(session: &Session, from: Option<String>, amount_rama: f64) -> Result<()> {
    let from = session.resolve_user(from)?;
    emit(session, session.client.transactions().withdraw_from_safe(&from, amount_rama)).await
}
