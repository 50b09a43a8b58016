//! Network configuration and persisted state paths

use anyhow::{Context, Result};
use log::debug;
use ocean_client::Deployment;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "~/.config/oceandefi/config.toml";
pub const DEFAULT_STATE_PATH: &str = "~/.config/oceandefi/state.json";

/// `config.toml` layout:
///
/// ```toml
/// [deployments.testnet]
/// rpc_url = "https://testnet.ramestta.com"
///
/// [deployments.testnet.contracts]
/// UserRegistry = "0x..."
/// ```
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    deployments: BTreeMap<String, DeploymentEntry>,
}

#[derive(Debug, Default, Deserialize)]
struct DeploymentEntry {
    rpc_url: Option<String>,
    #[serde(default)]
    contracts: BTreeMap<String, String>,
}

pub struct NetworkConfig {
    pub network: String,
    pub rpc_url: String,
    pub deployment: Deployment,
    /// Set when a config file was found and read
    pub config_path: Option<PathBuf>,
    pub state_path: PathBuf,
}

impl NetworkConfig {
    pub fn new(
        network: &str,
        rpc_url: Option<String>,
        config_path: Option<PathBuf>,
        state_path: Option<PathBuf>,
    ) -> Result<Self> {
        // An explicit --config must exist; the default location is optional
        let (config_path, required) = match config_path {
            Some(path) => (expand_path(&path.to_string_lossy())?, true),
            None => (expand_path(DEFAULT_CONFIG_PATH)?, false),
        };
        let file = load_config_file(&config_path, required)?;
        let loaded = file.is_some().then_some(config_path);

        let mut deployment = resolve_deployment(network, file.unwrap_or_default())?;
        if let Some(url) = rpc_url {
            deployment.rpc_url = url;
        }

        let state_path = match state_path {
            Some(path) => expand_path(&path.to_string_lossy())?,
            None => expand_path(DEFAULT_STATE_PATH)?,
        };

        Ok(Self {
            network: network.to_string(),
            rpc_url: deployment.rpc_url.clone(),
            deployment,
            config_path: loaded,
            state_path,
        })
    }
}

fn expand_path(raw: &str) -> Result<PathBuf> {
    let expanded = shellexpand::full(raw).with_context(|| format!("Failed to expand path: {}", raw))?;
    Ok(PathBuf::from(expanded.as_ref()))
}

fn load_config_file(path: &Path, required: bool) -> Result<Option<ConfigFile>> {
    if !path.exists() {
        debug!("No config file at {}", path.display());
        if required {
            anyhow::bail!("Config file not found: {}", path.display());
        }
        return Ok(None);
    }

    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let file = toml::from_str(&data)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    debug!("Loaded config file {}", path.display());
    Ok(Some(file))
}

/// Built-in deployment overlaid with the file's entry of the same name, or a
/// deployment defined only in the file
fn resolve_deployment(network: &str, mut file: ConfigFile) -> Result<Deployment> {
    let entry = file.deployments.remove(network);

    let mut deployment = match (Deployment::builtin(network), &entry) {
        (Some(builtin), _) => builtin,
        (None, Some(entry)) => {
            let rpc_url = entry
                .rpc_url
                .clone()
                .with_context(|| format!("Deployment {} in config file has no rpc_url", network))?;
            Deployment { name: network.to_string(), rpc_url, contracts: Default::default() }
        }
        (None, None) => {
            let mut known: Vec<String> = Deployment::builtin_names().iter().map(|s| s.to_string()).collect();
            known.extend(file.deployments.keys().cloned());
            anyhow::bail!("Unknown network: {}. Use one of: {}", network, known.join(", "));
        }
    };

    if let Some(entry) = entry {
        if let Some(url) = entry.rpc_url {
            deployment.rpc_url = url;
        }
        deployment
            .contracts
            .apply_overrides(&entry.contracts)
            .with_context(|| format!("Invalid contracts table for deployment {}", network))?;
    }

    Ok(deployment)
}
