//! Persisted client state
//!
//! Two keys survive between runs: the active wallet address and the selected
//! portfolio id. Stored as a flat JSON object with no schema version.

use std::fs;
use std::path::{Path, PathBuf};

use alloy::primitives::Address;
use log::info;
use serde::{Deserialize, Serialize};

use crate::address::parse_address;
use crate::error::{OceanError, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientState {
    #[serde(rename = "userAddress", default, skip_serializing_if = "Option::is_none")]
    pub user_address: Option<String>,

    #[serde(rename = "selectedPortfolioId", default, skip_serializing_if = "Option::is_none")]
    pub selected_portfolio_id: Option<u64>,
}

impl ClientState {
    /// Stored address, if present and well formed
    pub fn user(&self) -> Option<Address> {
        self.user_address.as_deref().and_then(|raw| parse_address(raw).ok())
    }
}

/// JSON file backing [`ClientState`]
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing file is an empty state
    pub fn load(&self) -> Result<ClientState> {
        if !self.path.exists() {
            return Ok(ClientState::default());
        }

        let data = fs::read_to_string(&self.path).map_err(|e| self.error(e))?;
        if data.trim().is_empty() {
            return Ok(ClientState::default());
        }

        serde_json::from_str(&data).map_err(|e| self.error(e))
    }

    pub fn save(&self, state: &ClientState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.error(e))?;
            }
        }

        let data = serde_json::to_string_pretty(state).map_err(|e| self.error(e))?;
        fs::write(&self.path, data).map_err(|e| self.error(e))
    }

    pub fn set_user_address(&self, address: &Address) -> Result<ClientState> {
        let mut state = self.load()?;
        state.user_address = Some(address.to_string());
        self.save(&state)?;
        info!("Stored userAddress {} in {}", address, self.path.display());
        Ok(state)
    }

    pub fn set_selected_portfolio(&self, pid: u64) -> Result<ClientState> {
        let mut state = self.load()?;
        state.selected_portfolio_id = Some(pid);
        self.save(&state)?;
        info!("Stored selectedPortfolioId {} in {}", pid, self.path.display());
        Ok(state)
    }

    fn error(&self, err: impl ToString) -> OceanError {
        OceanError::State { path: self.path.display().to_string(), message: err.to_string() }
    }
}
