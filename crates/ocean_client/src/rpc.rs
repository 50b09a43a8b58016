//! JSON-RPC seam
//!
//! Everything the client needs from the chain goes through [`ChainRpc`]. The
//! production implementation wraps an alloy HTTP provider; tests substitute a
//! scripted implementation.

use async_trait::async_trait;
use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, Bytes, U256};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use log::debug;

use crate::error::{OceanError, Result};

/// Call or transaction parameters sent to `eth_call` / `eth_estimateGas`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CallRequest {
    pub from: Option<Address>,
    pub to: Address,
    pub data: Bytes,
    pub value: U256,
}

impl CallRequest {
    pub fn new(to: Address, data: impl Into<Bytes>) -> Self {
        Self { from: None, to, data: data.into(), value: U256::ZERO }
    }

    pub fn with_from(mut self, from: Address) -> Self {
        self.from = Some(from);
        self
    }

    pub fn with_value(mut self, value: U256) -> Self {
        self.value = value;
        self
    }

    fn to_request(&self) -> TransactionRequest {
        let mut request = TransactionRequest::default()
            .with_to(self.to)
            .with_input(self.data.clone())
            .with_value(self.value);
        if let Some(from) = self.from {
            request = request.with_from(from);
        }
        request
    }
}

#[async_trait]
pub trait ChainRpc: Send + Sync {
    /// `eth_call` against the latest block
    async fn call(&self, request: &CallRequest) -> Result<Bytes>;

    /// `eth_gasPrice` in wei
    async fn gas_price(&self) -> Result<u128>;

    /// `eth_estimateGas`
    async fn estimate_gas(&self, request: &CallRequest) -> Result<u64>;

    /// Native balance in wei
    async fn balance(&self, address: Address) -> Result<U256>;
}

/// HTTP JSON-RPC client backed by alloy
pub struct AlloyRpc {
    provider: DynProvider,
    url: String,
}

impl AlloyRpc {
    pub fn connect(rpc_url: &str) -> Result<Self> {
        let url = rpc_url
            .parse()
            .map_err(|e| OceanError::Config(format!("invalid RPC URL {:?}: {}", rpc_url, e)))?;
        let provider = ProviderBuilder::new().connect_http(url).erased();

        debug!("Connected RPC provider to {}", rpc_url);

        Ok(Self { provider, url: rpc_url.to_string() })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ChainRpc for AlloyRpc {
    async fn call(&self, request: &CallRequest) -> Result<Bytes> {
        self.provider
            .call(request.to_request())
            .await
            .map_err(|e| OceanError::rpc("eth_call", e))
    }

    async fn gas_price(&self) -> Result<u128> {
        self.provider
            .get_gas_price()
            .await
            .map_err(|e| OceanError::rpc("eth_gasPrice", e))
    }

    async fn estimate_gas(&self, request: &CallRequest) -> Result<u64> {
        self.provider
            .estimate_gas(request.to_request())
            .await
            .map_err(|e| OceanError::rpc("eth_estimateGas", e))
    }

    async fn balance(&self, address: Address) -> Result<U256> {
        self.provider
            .get_balance(address)
            .await
            .map_err(|e| OceanError::rpc("eth_getBalance", e))
    }
}
