//! Unsigned transaction building
//!
//! Every operation runs the same pipeline: validate inputs, resolve account
//! references, quote the RAMA value for payable calls, encode, then fetch the
//! gas price and estimate gas. The result is handed to an external wallet for
//! signing; nothing here holds keys or broadcasts.

use alloy::primitives::{Address, Bytes, U256};
use alloy::sol_types::SolCall;
use log::{debug, info};
use ocean_units::{RamaWei, UsdMicro};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::address::{parse_address, AccountRef};
use crate::contracts::{IPortfolioManager, IRewardVault, IRoyaltyManager, ISafeWallet, ISlabManager, IUserRegistry};
use crate::error::{OceanError, Result};
use crate::raw::{rama_wei, u256};
use crate::registry::ContractName;
use crate::rpc::CallRequest;
use crate::OceanClient;

/// Transaction descriptor in the shape wallets accept for `eth_sendTransaction`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsignedTx {
    /// `Contract.function(args)` the data encodes
    pub call: String,
    pub from: Address,
    pub to: Address,
    pub data: Bytes,
    pub value: U256,
    pub gas: u64,
    pub gas_price: u128,
}

impl UnsignedTx {
    pub fn value_rama(&self) -> RamaWei {
        rama_wei(self.value)
    }

    /// Upper bound of the fee in wei
    pub fn max_fee(&self) -> U256 {
        U256::from(self.gas).saturating_mul(U256::from(self.gas_price))
    }
}

impl Serialize for UnsignedTx {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut tx = serializer.serialize_struct("UnsignedTx", 6)?;
        tx.serialize_field("from", &self.from.to_string())?;
        tx.serialize_field("to", &self.to.to_string())?;
        tx.serialize_field("data", &self.data.to_string())?;
        tx.serialize_field("value", &format!("{:#x}", self.value))?;
        tx.serialize_field("gas", &format!("{:#x}", self.gas))?;
        tx.serialize_field("gasPrice", &format!("{:#x}", self.gas_price))?;
        tx.end()
    }
}

/// Positive, finite USD amount in micro-USD
fn usd_amount(usd: f64) -> Result<UsdMicro> {
    let amount = UsdMicro::from_usd(usd);
    if amount.is_zero() {
        return Err(OceanError::InvalidAmount(usd.to_string()));
    }
    Ok(amount)
}

fn gas_error(call: &str, err: OceanError) -> OceanError {
    let message = match err {
        OceanError::Rpc { message, .. } => message,
        other => other.to_string(),
    };
    OceanError::GasEstimation { call: call.to_string(), message }
}

pub struct TransactionBuilder<'a> {
    client: &'a OceanClient,
}

impl<'a> TransactionBuilder<'a> {
    pub(crate) fn new(client: &'a OceanClient) -> Self {
        Self { client }
    }

    /// Register `from` under `sponsor` (address or user id)
    pub async fn register_user(&self, from: &str, sponsor: &str) -> Result<UnsignedTx> {
        let from = parse_address(from)?;
        let sponsor = self.resolve(sponsor).await?;
        self.build(from, ContractName::UserRegistry, IUserRegistry::registerUserCall { sponsor }, U256::ZERO)
            .await
    }

    pub async fn create_portfolio(&self, from: &str, usd: f64) -> Result<UnsignedTx> {
        let from = parse_address(from)?;
        let usd = usd_amount(usd)?;
        let value = self.quote(usd).await?;
        let call = IPortfolioManager::createPortfolioCall { usdMicro: u256(usd.raw()) };
        self.build(from, ContractName::PortfolioManager, call, u256(value.raw())).await
    }

    /// Stake on behalf of `beneficiary`; `from` pays
    pub async fn create_portfolio_for(&self, from: &str, beneficiary: &str, usd: f64) -> Result<UnsignedTx> {
        let from = parse_address(from)?;
        let usd = usd_amount(usd)?;
        let beneficiary = self.resolve(beneficiary).await?;
        let value = self.quote(usd).await?;
        let call = IPortfolioManager::createPortfolioForCall { beneficiary, usdMicro: u256(usd.raw()) };
        self.build(from, ContractName::PortfolioManager, call, u256(value.raw())).await
    }

    /// Stake from the Safe Wallet balance; carries no native value
    pub async fn create_portfolio_from_safe(&self, from: &str, usd: f64) -> Result<UnsignedTx> {
        let from = parse_address(from)?;
        let usd = usd_amount(usd)?;
        let call = IPortfolioManager::createPortfolioFromSafeCall { usdMicro: u256(usd.raw()) };
        self.build(from, ContractName::PortfolioManager, call, U256::ZERO).await
    }

    pub async fn apply_exit(&self, from: &str, pid: u64) -> Result<UnsignedTx> {
        let from = parse_address(from)?;
        let call = IPortfolioManager::applyExitCall { pid: U256::from(pid) };
        self.build(from, ContractName::PortfolioManager, call, U256::ZERO).await
    }

    pub async fn cancel_exit(&self, from: &str, pid: u64) -> Result<UnsignedTx> {
        let from = parse_address(from)?;
        let call = IPortfolioManager::cancelExitCall { pid: U256::from(pid) };
        self.build(from, ContractName::PortfolioManager, call, U256::ZERO).await
    }

    pub async fn claim_growth(&self, from: &str, pid: u64) -> Result<UnsignedTx> {
        let from = parse_address(from)?;
        let call = IPortfolioManager::claimGrowthCall { pid: U256::from(pid) };
        self.build(from, ContractName::PortfolioManager, call, U256::ZERO).await
    }

    pub async fn claim_slab_income(&self, from: &str) -> Result<UnsignedTx> {
        let from = parse_address(from)?;
        self.build(from, ContractName::SlabManager, ISlabManager::claimSlabIncomeCall {}, U256::ZERO)
            .await
    }

    pub async fn claim_royalty(&self, from: &str) -> Result<UnsignedTx> {
        let from = parse_address(from)?;
        self.build(from, ContractName::RoyaltyManager, IRoyaltyManager::claimRoyaltyCall {}, U256::ZERO)
            .await
    }

    /// `milestone` is the 0-based index from the rewards overview
    pub async fn claim_one_time_reward(&self, from: &str, milestone: u32) -> Result<UnsignedTx> {
        let from = parse_address(from)?;
        let call = IRewardVault::claimRewardCall { milestone: U256::from(milestone) };
        self.build(from, ContractName::RewardVault, call, U256::ZERO).await
    }

    pub async fn withdraw_from_safe(&self, from: &str, amount_rama: f64) -> Result<UnsignedTx> {
        let from = parse_address(from)?;
        let amount = RamaWei::from_rama(amount_rama);
        if amount.is_zero() {
            return Err(OceanError::InvalidAmount(amount_rama.to_string()));
        }
        let call = ISafeWallet::withdrawCall { amountRamaWei: u256(amount.raw()) };
        self.build(from, ContractName::SafeWallet, call, U256::ZERO).await
    }

    async fn resolve(&self, account: &str) -> Result<Address> {
        let account = AccountRef::parse(account)?;
        self.client.users().resolve(account).await
    }

    /// RAMA needed for `usd` at the on-chain price
    async fn quote(&self, usd: UsdMicro) -> Result<RamaWei> {
        let quote = self
            .client
            .read(ContractName::PortfolioManager, IPortfolioManager::quoteRamaForUsdCall { usdMicro: u256(usd.raw()) })
            .await
            .map(rama_wei)?;

        if quote.is_zero() {
            return Err(OceanError::NonPositiveQuote { usd_micro: usd.raw() });
        }
        debug!("Quoted {} for {}", quote, usd);
        Ok(quote)
    }

    async fn build<C: SolCall>(&self, from: Address, contract: ContractName, call: C, value: U256) -> Result<UnsignedTx> {
        let to = self.client.contracts().get(contract)?;
        let label = format!("{}.{}", contract, C::SIGNATURE);
        let request = CallRequest::new(to, call.abi_encode()).with_from(from).with_value(value);

        let rpc = self.client.rpc();
        let gas_price = rpc.gas_price().await?;
        let gas = rpc.estimate_gas(&request).await.map_err(|e| gas_error(&label, e))?;

        let tx = UnsignedTx { call: label, from, to, data: request.data, value, gas, gas_price };
        info!("Built {} from {} (value {}, gas {}, gas price {})", tx.call, tx.from, tx.value_rama(), tx.gas, tx.gas_price);
        Ok(tx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wallet_json_shape() {
        let tx = UnsignedTx {
            call: "PortfolioManager.claimGrowth(uint256)".to_string(),
            from: Address::repeat_byte(0x11),
            to: Address::repeat_byte(0x22),
            data: Bytes::from(vec![0xde, 0xad]),
            value: U256::from(1_000_000_000_000_000_000u128),
            gas: 21_000,
            gas_price: 30_000_000_000,
        };

        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["data"], "0xdead");
        assert_eq!(json["value"], "0xde0b6b3a7640000");
        assert_eq!(json["gas"], "0x5208");
        assert_eq!(json["gasPrice"], "0x6fc23ac00");
        assert_eq!(json["to"].as_str().unwrap().to_lowercase(), format!("0x{}", "22".repeat(20)));
        assert!(json.get("call").is_none());
    }

    #[test]
    fn test_amount_validation() {
        assert_eq!(usd_amount(5.0).unwrap(), UsdMicro::new(5_000_000));
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(usd_amount(bad), Err(OceanError::InvalidAmount(_))));
        }
    }
}
