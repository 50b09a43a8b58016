//! Scripted in-memory chain for integration tests
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use alloy::primitives::{Address, Bytes, U256};
use alloy::sol_types::SolCall;
use async_trait::async_trait;
use ocean_client::{CallRequest, ChainRpc, ContractName, ContractRegistry, OceanClient, OceanError, Result};

pub const USER: &str = "0x10c73cc0249b547402b0532c5c7d1fa52e09b16e";

pub const DEFAULT_GAS: u64 = 180_000;
pub const DEFAULT_GAS_PRICE: u128 = 1_000_000_000;

pub fn user() -> Address {
    USER.parse().unwrap()
}

pub fn addr(byte: u8) -> Address {
    Address::repeat_byte(byte)
}

type Reply = std::result::Result<Bytes, String>;

/// Replies are looked up by exact calldata first, then by selector
pub struct MockRpc {
    contracts: ContractRegistry,
    by_selector: Mutex<HashMap<(Address, [u8; 4]), Reply>>,
    by_calldata: Mutex<HashMap<(Address, Bytes), Reply>>,
    calls: Mutex<Vec<CallRequest>>,
    estimates: Mutex<Vec<CallRequest>>,
    gas: Mutex<Reply>,
    gas_price_requests: Mutex<usize>,
}

impl MockRpc {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            contracts: ContractRegistry::ramestta(),
            by_selector: Mutex::new(HashMap::new()),
            by_calldata: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            estimates: Mutex::new(Vec::new()),
            gas: Mutex::new(Ok(Bytes::new())),
            gas_price_requests: Mutex::new(0),
        })
    }

    pub fn client(self: &Arc<Self>) -> OceanClient {
        OceanClient::new(self.clone(), self.contracts.clone())
    }

    pub fn address_of(&self, contract: ContractName) -> Address {
        self.contracts.get(contract).unwrap()
    }

    /// Answer every `C` call to `contract`
    pub fn reply<C: SolCall>(&self, contract: ContractName, ret: C::Return) {
        let key = (self.address_of(contract), C::SELECTOR);
        self.by_selector.lock().unwrap().insert(key, Ok(C::abi_encode_returns(&ret).into()));
    }

    /// Answer only this exact call
    pub fn reply_exact<C: SolCall>(&self, contract: ContractName, call: C, ret: C::Return) {
        let key = (self.address_of(contract), Bytes::from(call.abi_encode()));
        self.by_calldata.lock().unwrap().insert(key, Ok(C::abi_encode_returns(&ret).into()));
    }

    pub fn revert<C: SolCall>(&self, contract: ContractName) {
        let key = (self.address_of(contract), C::SELECTOR);
        self.by_selector.lock().unwrap().insert(key, Err("execution reverted".to_string()));
    }

    pub fn fail_gas_estimation(&self, message: &str) {
        *self.gas.lock().unwrap() = Err(message.to_string());
    }

    /// Every request of any kind
    pub fn total_requests(&self) -> usize {
        self.calls.lock().unwrap().len() + self.estimates.lock().unwrap().len() + *self.gas_price_requests.lock().unwrap()
    }

    pub fn calls_to<C: SolCall>(&self) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.data.len() >= 4 && c.data[..4] == C::SELECTOR)
            .count()
    }

    pub fn estimates(&self) -> Vec<CallRequest> {
        self.estimates.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChainRpc for MockRpc {
    async fn call(&self, request: &CallRequest) -> Result<Bytes> {
        self.calls.lock().unwrap().push(request.clone());

        let exact = self.by_calldata.lock().unwrap().get(&(request.to, request.data.clone())).cloned();
        let reply = exact.or_else(|| {
            let selector: [u8; 4] = request.data.get(..4)?.try_into().ok()?;
            self.by_selector.lock().unwrap().get(&(request.to, selector)).cloned()
        });

        match reply {
            Some(Ok(data)) => Ok(data),
            Some(Err(message)) => Err(OceanError::rpc("eth_call", message)),
            None => Err(OceanError::rpc("eth_call", "execution reverted")),
        }
    }

    async fn gas_price(&self) -> Result<u128> {
        *self.gas_price_requests.lock().unwrap() += 1;
        Ok(DEFAULT_GAS_PRICE)
    }

    async fn estimate_gas(&self, request: &CallRequest) -> Result<u64> {
        self.estimates.lock().unwrap().push(request.clone());
        match &*self.gas.lock().unwrap() {
            Ok(_) => Ok(DEFAULT_GAS),
            Err(message) => Err(OceanError::rpc("eth_estimateGas", message)),
        }
    }

    async fn balance(&self, _address: Address) -> Result<U256> {
        Ok(U256::ZERO)
    }
}
