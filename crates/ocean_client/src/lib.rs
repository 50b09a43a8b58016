//! OCEAN DeFi client - contract reads and unsigned transaction building
//!
//! This crate talks to the OCEAN DeFi contracts on the Ramestta chain:
//! - Contract registry per deployment (`registry`)
//! - JSON-RPC seam with an alloy-backed implementation (`rpc`)
//! - Read aggregators split by bounded context (`services`)
//! - Unsigned transaction descriptors for an external wallet (`tx`)
//!
//! All platform rules live on chain. This crate queries, converts units and
//! reports which parts of an aggregate could not be fetched.

use std::sync::Arc;

use alloy::sol_types::SolCall;
use log::debug;

pub mod address;
pub mod contracts;
pub mod degraded;
pub mod error;
pub mod raw;
pub mod registry;
pub mod rpc;
pub mod services;
pub mod state;
pub mod time;
pub mod tx;

pub use address::{parse_address, AccountRef};
pub use degraded::{Fetched, Partial, SubCallError};
pub use error::{OceanError, Result};
pub use registry::{ContractName, ContractRegistry, Deployment};
pub use rpc::{AlloyRpc, CallRequest, ChainRpc};
pub use state::{ClientState, StateStore};
pub use tx::UnsignedTx;

pub use ocean_units as units;

/// Shared handle: one RPC endpoint plus one contract registry
#[derive(Clone)]
pub struct OceanClient {
    rpc: Arc<dyn ChainRpc>,
    contracts: ContractRegistry,
}

impl OceanClient {
    pub fn new(rpc: Arc<dyn ChainRpc>, contracts: ContractRegistry) -> Self {
        Self { rpc, contracts }
    }

    /// Connect to a deployment over HTTP
    pub fn connect(deployment: &Deployment) -> Result<Self> {
        let rpc = AlloyRpc::connect(&deployment.rpc_url)?;
        Ok(Self::new(Arc::new(rpc), deployment.contracts.clone()))
    }

    pub fn contracts(&self) -> &ContractRegistry {
        &self.contracts
    }

    pub fn rpc(&self) -> &dyn ChainRpc {
        self.rpc.as_ref()
    }

    /// Encode `call`, run it against `contract` and decode the return value
    pub async fn read<C: SolCall>(&self, contract: ContractName, call: C) -> Result<C::Return> {
        let to = self.contracts.get(contract)?;
        let label = format!("{}.{}", contract, C::SIGNATURE);
        debug!("eth_call {} @ {}", label, to);

        let request = CallRequest::new(to, call.abi_encode());
        let output = self.rpc.call(&request).await.map_err(|e| e.for_call(&label))?;

        C::abi_decode_returns(&output)
            .map_err(|e| OceanError::Decode { call: label, message: e.to_string() })
    }

    pub fn users(&self) -> services::UserService<'_> {
        services::UserService::new(self)
    }

    pub fn portfolios(&self) -> services::PortfolioService<'_> {
        services::PortfolioService::new(self)
    }

    pub fn dashboard(&self) -> services::DashboardService<'_> {
        services::DashboardService::new(self)
    }

    pub fn slab(&self) -> services::SlabService<'_> {
        services::SlabService::new(self)
    }

    pub fn royalty(&self) -> services::RoyaltyService<'_> {
        services::RoyaltyService::new(self)
    }

    pub fn rewards(&self) -> services::RewardsService<'_> {
        services::RewardsService::new(self)
    }

    pub fn team(&self) -> services::TeamService<'_> {
        services::TeamService::new(self)
    }

    pub fn income(&self) -> services::IncomeService<'_> {
        services::IncomeService::new(self)
    }

    pub fn safe_wallet(&self) -> services::SafeWalletService<'_> {
        services::SafeWalletService::new(self)
    }

    pub fn transactions(&self) -> tx::TransactionBuilder<'_> {
        tx::TransactionBuilder::new(self)
    }
}
