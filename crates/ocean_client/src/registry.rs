//! Deployed contract addresses per network

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use alloy::primitives::{address, Address};
use serde::{Deserialize, Serialize};

use crate::address::parse_address;
use crate::error::{OceanError, Result};

/// Logical contract names used by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ContractName {
    UserRegistry,
    CoreConfig,
    RoiDistribution,
    PortfolioManager,
    RoyaltyManager,
    SlabManager,
    IncomeDistributor,
    FreezePolicy,
    RewardVault,
    AdminControl,
    MainWallet,
    SafeWallet,
    OceanQuery,
    OceanView,
}

impl ContractName {
    pub const ALL: [ContractName; 14] = [
        ContractName::UserRegistry,
        ContractName::CoreConfig,
        ContractName::RoiDistribution,
        ContractName::PortfolioManager,
        ContractName::RoyaltyManager,
        ContractName::SlabManager,
        ContractName::IncomeDistributor,
        ContractName::FreezePolicy,
        ContractName::RewardVault,
        ContractName::AdminControl,
        ContractName::MainWallet,
        ContractName::SafeWallet,
        ContractName::OceanQuery,
        ContractName::OceanView,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ContractName::UserRegistry => "UserRegistry",
            ContractName::CoreConfig => "CoreConfig",
            ContractName::RoiDistribution => "RoiDistribution",
            ContractName::PortfolioManager => "PortfolioManager",
            ContractName::RoyaltyManager => "RoyaltyManager",
            ContractName::SlabManager => "SlabManager",
            ContractName::IncomeDistributor => "IncomeDistributor",
            ContractName::FreezePolicy => "FreezePolicy",
            ContractName::RewardVault => "RewardVault",
            ContractName::AdminControl => "AdminControl",
            ContractName::MainWallet => "MainWallet",
            ContractName::SafeWallet => "SafeWallet",
            ContractName::OceanQuery => "OceanQuery",
            ContractName::OceanView => "OceanView",
        }
    }
}

impl fmt::Display for ContractName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContractName {
    type Err = OceanError;

    fn from_str(s: &str) -> Result<Self> {
        // Older config files use the "PortFolioManager" / "OceanViewV2" spellings
        let normalized = match s {
            "PortFolioManager" => "PortfolioManager",
            "OceanViewV2" | "OceanViewUpgradeable" => "OceanView",
            "OceanQueryUpgradeable" => "OceanQuery",
            other => other,
        };
        ContractName::ALL
            .into_iter()
            .find(|name| name.as_str() == normalized)
            .ok_or_else(|| OceanError::Config(format!("unknown contract name: {}", s)))
    }
}

/// Mapping from logical contract name to deployed address
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContractRegistry {
    addresses: BTreeMap<ContractName, Address>,
}

impl ContractRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current Ramestta mainnet generation
    pub fn ramestta() -> Self {
        let mut registry = Self::new();
        registry
            .set(ContractName::UserRegistry, address!("0x10C73CC0249b547402B0532c5c7D1fa52E09b16e"))
            .set(ContractName::CoreConfig, address!("0xf2Da545c361c42FC540f3F648034448CC64D6b04"))
            .set(ContractName::RoiDistribution, address!("0x3E69b6b118D1B0c1fb4B8Fe79F32CFBd8C4bC39d"))
            .set(ContractName::PortfolioManager, address!("0xd5EE95aa4124EF58907085689E7c50d6133e061F"))
            .set(ContractName::RoyaltyManager, address!("0xC477e36c84ae51586c01E3bb79fDC44E919Ecf27"))
            .set(ContractName::SlabManager, address!("0x2182fcA6577A678D6ea691faA0b2Ea8Bea5A0299"))
            .set(ContractName::IncomeDistributor, address!("0x35785f01c35Bae437Ba091138889E35923E5fd22"))
            .set(ContractName::FreezePolicy, address!("0xDd09016976B8B5F550984c4B4E1FEAe4B30536e5"))
            .set(ContractName::RewardVault, address!("0x7c7426325f9334EDBE57BD74b1ac606594d454C5"))
            .set(ContractName::AdminControl, address!("0xcD8eB92E927Aa9C0DC5e58d8383D4aE211F73f96"))
            .set(ContractName::MainWallet, address!("0x61d66989f2fA03818Fcf2f4dCb586C17D4fa9c47"))
            .set(ContractName::SafeWallet, address!("0x6a4a05431A5826fa35A2e9535Da662f47189232f"))
            .set(ContractName::OceanQuery, address!("0x6bF2Fdcd0D0A79Ba65289d8d5EE17d4a6C2EC3e5"))
            .set(ContractName::OceanView, address!("0x8f93fdf9A72574F9bbD40437EA1a88559082CaDD"));
        registry
    }

    pub fn set(&mut self, name: ContractName, address: Address) -> &mut Self {
        self.addresses.insert(name, address);
        self
    }

    pub fn get(&self, name: ContractName) -> Result<Address> {
        self.addresses
            .get(&name)
            .copied()
            .ok_or_else(|| OceanError::Config(format!("no address configured for {}", name)))
    }

    pub fn contains(&self, name: ContractName) -> bool {
        self.addresses.contains_key(&name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ContractName, Address)> + '_ {
        self.addresses.iter().map(|(name, address)| (*name, *address))
    }

    /// Overlay `LogicalName = "0x..."` entries; later entries win
    pub fn apply_overrides<'a, I>(&mut self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        for (name, value) in entries {
            let name = ContractName::from_str(name)?;
            let address = parse_address(value).map_err(|_| {
                OceanError::Config(format!("{} has an invalid address: {:?}", name, value))
            })?;
            self.set(name, address);
        }
        Ok(())
    }
}

/// One network generation: RPC endpoint plus its contract set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deployment {
    pub name: String,
    pub rpc_url: String,
    pub contracts: ContractRegistry,
}

impl Deployment {
    pub const RAMESTTA_RPC_URL: &'static str = "https://blockchain.ramestta.com";

    pub fn ramestta() -> Self {
        Self {
            name: "ramestta".to_string(),
            rpc_url: Self::RAMESTTA_RPC_URL.to_string(),
            contracts: ContractRegistry::ramestta(),
        }
    }

    /// Built-in deployments by name
    pub fn builtin(name: &str) -> Option<Self> {
        match name {
            "ramestta" | "mainnet" => Some(Self::ramestta()),
            _ => None,
        }
    }

    pub fn builtin_names() -> &'static [&'static str] {
        &["ramestta", "mainnet"]
    }
}
