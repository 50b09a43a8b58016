//! Client session and terminal formatting helpers

use anyhow::{Context, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use ocean_client::address::short_address;
use ocean_client::services::slab_tier_name;
use ocean_client::units::{Bps, RamaWei, UsdE8, UsdMicro};
use ocean_client::{parse_address, Fetched, OceanClient, StateStore};
use serde::Serialize;
use std::future::Future;
use std::time::Duration;

use alloy::primitives::Address;

use crate::config::NetworkConfig;

/// Everything a command needs: one client, one state file, one output mode
pub struct Session {
    pub config: NetworkConfig,
    pub client: OceanClient,
    pub state: StateStore,
    pub json: bool,
}

impl Session {
    pub fn new(config: NetworkConfig, json: bool) -> Result<Self> {
        let client = OceanClient::connect(&config.deployment)
            .with_context(|| format!("Failed to connect to {}", config.rpc_url))?;
        let state = StateStore::new(config.state_path.clone());
        info!("Using deployment {} at {}", config.network, config.rpc_url);
        Ok(Self { config, client, state, json })
    }

    /// Address given on the command line, else the stored one.
    ///
    /// A command-line address applies to this run only; `ocean login` is
    /// the one command that changes the stored address.
    pub fn resolve_user(&self, address: Option<String>) -> Result<String> {
        match address {
            Some(raw) => Ok(parse_address(&raw)?.to_string()),
            None => {
                let state = self.state.load()?;
                let user = state.user().with_context(|| {
                    format!(
                        "No wallet address given and none stored in {}. Pass one or run `ocean login <address>`",
                        self.state.path().display()
                    )
                })?;
                Ok(user.to_string())
            }
        }
    }

    /// Stored portfolio selection
    pub fn selected_portfolio(&self) -> Result<Option<u64>> {
        Ok(self.state.load()?.selected_portfolio_id)
    }

    /// Run `future` behind a spinner unless JSON output was requested
    pub async fn fetch<T>(&self, message: &str, future: impl Future<Output = T>) -> T {
        if self.json {
            return future.await;
        }
        let spinner = spinner(message);
        let value = future.await;
        spinner.finish_and_clear();
        value
    }

    /// Print as JSON and return true when JSON output was requested
    pub fn emit_json<T: Serialize>(&self, value: &T) -> Result<bool> {
        if !self.json {
            return Ok(false);
        }
        println!("{}", serde_json::to_string_pretty(value).context("Failed to serialize output")?);
        Ok(true)
    }
}

pub fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Section banner
pub fn header(title: &str) {
    println!("{}", format!("=== {} ===", title).bright_green().bold());
}

pub fn field(label: &str, value: impl std::fmt::Display) {
    println!("  {} {}", format!("{}:", label).bright_cyan(), value);
}

/// Warn about sub-calls that were defaulted
pub fn report_degradation<T>(fetched: &Fetched<T>) {
    if fetched.used_fallback {
        println!("{}", "(aggregate view unavailable, assembled from legacy contracts)".dimmed());
    }
    if fetched.degraded {
        println!(
            "\n{} {} value(s) could not be fetched and are shown as zero:",
            "⚠".yellow(),
            fetched.errors.len()
        );
        for error in &fetched.errors {
            println!("  {} {}", error.source.yellow(), error.message.dimmed());
        }
    }
}

pub fn format_usd(amount: UsdMicro) -> String {
    format!("${:.2}", amount.to_usd()).bright_white().to_string()
}

pub fn format_usd_e8(amount: UsdE8) -> String {
    format!("${:.2}", amount.to_usd()).bright_white().to_string()
}

pub fn format_rama(amount: RamaWei) -> String {
    format!("{:.4} RAMA", amount.to_rama())
}

pub fn format_bps(rate: Bps) -> String {
    format!("{:.2}%", rate.to_percent())
}

pub fn format_address(address: &Address) -> String {
    short_address(address).bright_yellow().to_string()
}

/// "Coral Reef (L1)", or "None" below the first tier
pub fn format_slab_level(level: u8) -> String {
    match slab_tier_name(level) {
        Some(name) => format!("{} (L{})", name, level),
        None if level == 0 => "None".dimmed().to_string(),
        None => format!("L{}", level),
    }
}

pub fn yes_no(flag: bool) -> String {
    if flag {
        "Yes".green().to_string()
    } else {
        "No".dimmed().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WALLET: &str = "0x10c73cc0249b547402b0532c5c7d1fa52e09b16e";

    fn session(dir: &std::path::Path) -> Session {
        let config_path = dir.join("config.toml");
        std::fs::write(&config_path, "").unwrap();
        let config = NetworkConfig::new(
            "ramestta",
            Some("http://127.0.0.1:8545".to_string()),
            Some(config_path),
            Some(dir.join("state.json")),
        )
        .unwrap();
        Session::new(config, true).unwrap()
    }

    #[test]
    fn test_command_line_address_is_not_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let session = session(dir.path());

        let user = session.resolve_user(Some(WALLET.to_string())).unwrap();
        assert_eq!(user.to_lowercase(), WALLET);
        assert!(!dir.path().join("state.json").exists());
        assert!(session.resolve_user(None).is_err());
    }

    #[test]
    fn test_stored_address_is_used() {
        let dir = tempfile::tempdir().unwrap();
        let session = session(dir.path());
        session.state.set_user_address(&parse_address(WALLET).unwrap()).unwrap();

        assert_eq!(session.resolve_user(None).unwrap().to_lowercase(), WALLET);
        assert!(session.resolve_user(Some("not-an-address".to_string())).is_err());
    }

    #[test]
    fn test_slab_level_names() {
        assert_eq!(format_slab_level(1), "Coral Reef (L1)");
        assert_eq!(format_slab_level(11), "Ocean Sovereign (L11)");
        assert_eq!(format_slab_level(14), "L14");
    }
}
