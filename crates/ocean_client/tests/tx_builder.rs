//! Unsigned transaction building against a scripted chain

mod common;

use alloy::primitives::{Address, Bytes, U256};
use alloy::sol_types::SolCall;
use common::{addr, user, MockRpc, DEFAULT_GAS, DEFAULT_GAS_PRICE, USER};
use ocean_client::contracts::{IPortfolioManager, IRewardVault, ISafeWallet, IUserRegistry};
use ocean_client::{ContractName, OceanError};

const SPONSOR: &str = "0x8f93fdf9a72574f9bbd40437ea1a88559082cadd";

#[tokio::test]
async fn test_sponsor_address_used_without_lookup() {
    let rpc = MockRpc::new();
    let client = rpc.client();

    let tx = client.transactions().register_user(USER, SPONSOR).await.unwrap();

    let sponsor: Address = SPONSOR.parse().unwrap();
    assert_eq!(rpc.calls_to::<IUserRegistry::idToAddressCall>(), 0);
    assert_eq!(tx.from, user());
    assert_eq!(tx.to, rpc.address_of(ContractName::UserRegistry));
    assert_eq!(tx.data, Bytes::from(IUserRegistry::registerUserCall { sponsor }.abi_encode()));
    assert_eq!(tx.value, U256::ZERO);
    assert_eq!(tx.gas, DEFAULT_GAS);
    assert_eq!(tx.gas_price, DEFAULT_GAS_PRICE);

    // estimation runs against the same request the wallet will sign
    let estimates = rpc.estimates();
    assert_eq!(estimates.len(), 1);
    assert_eq!(estimates[0].from, Some(user()));
    assert_eq!(estimates[0].data, tx.data);
}

#[tokio::test]
async fn test_numeric_sponsor_is_resolved() {
    let rpc = MockRpc::new();
    rpc.reply_exact(
        ContractName::UserRegistry,
        IUserRegistry::idToAddressCall { userId: U256::from(42u64) },
        addr(0x42),
    );
    let client = rpc.client();

    let tx = client.transactions().register_user(USER, "42").await.unwrap();
    assert_eq!(rpc.calls_to::<IUserRegistry::idToAddressCall>(), 1);
    assert_eq!(tx.data, Bytes::from(IUserRegistry::registerUserCall { sponsor: addr(0x42) }.abi_encode()));
}

#[tokio::test]
async fn test_sponsor_resolving_to_zero_is_rejected() {
    let rpc = MockRpc::new();
    rpc.reply::<IUserRegistry::idToAddressCall>(ContractName::UserRegistry, Address::ZERO);
    let client = rpc.client();

    let err = client.transactions().register_user(USER, "42").await.unwrap_err();
    assert_eq!(err, OceanError::SponsorNotFound(42));
    assert!(rpc.estimates().is_empty());
}

#[tokio::test]
async fn test_zero_address_sponsor_is_rejected() {
    let rpc = MockRpc::new();
    let client = rpc.client();
    let zero = "0x0000000000000000000000000000000000000000";

    let err = client.transactions().register_user(USER, zero).await.unwrap_err();
    assert!(matches!(err, OceanError::InvalidSponsor(_)), "{err:?}");

    let err = client.transactions().create_portfolio_for(USER, zero, 10.0).await.unwrap_err();
    assert!(matches!(err, OceanError::InvalidSponsor(_)), "{err:?}");
    assert_eq!(rpc.total_requests(), 0);
}

#[tokio::test]
async fn test_malformed_sponsor_is_rejected_before_rpc() {
    let rpc = MockRpc::new();
    let client = rpc.client();

    for sponsor in ["abc", "0", "-3", "0x1234"] {
        let err = client.transactions().register_user(USER, sponsor).await.unwrap_err();
        assert!(matches!(err, OceanError::InvalidSponsor(_)), "{sponsor}: {err:?}");
    }
    assert_eq!(rpc.total_requests(), 0);
}

#[tokio::test]
async fn test_invalid_from_fails_before_rpc() {
    let rpc = MockRpc::new();
    let client = rpc.client();

    let err = client.transactions().create_portfolio("not-an-address", 10.0).await.unwrap_err();
    assert!(matches!(err, OceanError::InvalidAddress(_)));
    assert_eq!(rpc.total_requests(), 0);
}

#[tokio::test]
async fn test_create_portfolio_carries_quoted_value() {
    let rpc = MockRpc::new();
    let quote = U256::from(4_081_632_653_061_224_489u128);
    rpc.reply_exact(
        ContractName::PortfolioManager,
        IPortfolioManager::quoteRamaForUsdCall { usdMicro: U256::from(100_000_000u64) },
        quote,
    );
    let client = rpc.client();

    let tx = client.transactions().create_portfolio(USER, 100.0).await.unwrap();
    assert_eq!(tx.to, rpc.address_of(ContractName::PortfolioManager));
    assert_eq!(tx.value, quote);
    assert_eq!(
        tx.data,
        Bytes::from(IPortfolioManager::createPortfolioCall { usdMicro: U256::from(100_000_000u64) }.abi_encode())
    );
    assert_eq!(rpc.estimates()[0].value, quote);
}

#[tokio::test]
async fn test_create_portfolio_for_resolves_beneficiary() {
    let rpc = MockRpc::new();
    rpc.reply::<IUserRegistry::idToAddressCall>(ContractName::UserRegistry, addr(0x77));
    rpc.reply::<IPortfolioManager::quoteRamaForUsdCall>(ContractName::PortfolioManager, U256::from(1u64));
    let client = rpc.client();

    let tx = client.transactions().create_portfolio_for(USER, "7", 25.0).await.unwrap();
    let expected = IPortfolioManager::createPortfolioForCall { beneficiary: addr(0x77), usdMicro: U256::from(25_000_000u64) };
    assert_eq!(tx.data, Bytes::from(expected.abi_encode()));
    assert_eq!(tx.value, U256::from(1u64));
}

#[tokio::test]
async fn test_zero_quote_is_rejected() {
    let rpc = MockRpc::new();
    rpc.reply::<IPortfolioManager::quoteRamaForUsdCall>(ContractName::PortfolioManager, U256::ZERO);
    let client = rpc.client();

    let err = client.transactions().create_portfolio(USER, 50.0).await.unwrap_err();
    assert_eq!(err, OceanError::NonPositiveQuote { usd_micro: 50_000_000 });
    assert!(rpc.estimates().is_empty());
}

#[tokio::test]
async fn test_gas_estimation_failure_is_distinct() {
    let rpc = MockRpc::new();
    rpc.fail_gas_estimation("execution reverted: portfolio frozen");
    let client = rpc.client();

    let err = client.transactions().apply_exit(USER, 3).await.unwrap_err();
    match err {
        OceanError::GasEstimation { call, message } => {
            assert_eq!(call, "PortfolioManager.applyExit(uint256)");
            assert_eq!(message, "execution reverted: portfolio frozen");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[tokio::test]
async fn test_non_positive_amounts_are_rejected() {
    let rpc = MockRpc::new();
    let client = rpc.client();
    let builder = client.transactions();

    assert!(matches!(builder.create_portfolio(USER, 0.0).await, Err(OceanError::InvalidAmount(_))));
    assert!(matches!(builder.create_portfolio_from_safe(USER, -5.0).await, Err(OceanError::InvalidAmount(_))));
    assert!(matches!(builder.withdraw_from_safe(USER, f64::NAN).await, Err(OceanError::InvalidAmount(_))));
    assert_eq!(rpc.total_requests(), 0);
}

#[tokio::test]
async fn test_non_payable_calls_carry_no_value() {
    let rpc = MockRpc::new();
    let client = rpc.client();
    let builder = client.transactions();

    let safe = builder.create_portfolio_from_safe(USER, 10.0).await.unwrap();
    assert_eq!(safe.value, U256::ZERO);
    assert_eq!(rpc.calls_to::<IPortfolioManager::quoteRamaForUsdCall>(), 0);

    let reward = builder.claim_one_time_reward(USER, 2).await.unwrap();
    assert_eq!(reward.to, rpc.address_of(ContractName::RewardVault));
    assert_eq!(reward.data, Bytes::from(IRewardVault::claimRewardCall { milestone: U256::from(2u64) }.abi_encode()));

    let withdraw = builder.withdraw_from_safe(USER, 1.5).await.unwrap();
    assert_eq!(withdraw.to, rpc.address_of(ContractName::SafeWallet));
    let expected = ISafeWallet::withdrawCall { amountRamaWei: U256::from(1_500_000_000_000_000_000u128) };
    assert_eq!(withdraw.data, Bytes::from(expected.abi_encode()));

    for tx in [
        builder.claim_slab_income(USER).await.unwrap(),
        builder.claim_royalty(USER).await.unwrap(),
        builder.claim_growth(USER, 1).await.unwrap(),
        builder.cancel_exit(USER, 1).await.unwrap(),
    ] {
        assert_eq!(tx.value, U256::ZERO);
        assert_eq!(tx.from, user());
    }
}

#[tokio::test]
async fn test_wallet_json() {
    let rpc = MockRpc::new();
    let client = rpc.client();

    let tx = client.transactions().claim_royalty(USER).await.unwrap();
    let json = serde_json::to_value(&tx).unwrap();
    assert_eq!(json["value"], "0x0");
    assert_eq!(json["gasPrice"], "0x3b9aca00");
    assert_eq!(json["gas"], format!("{:#x}", DEFAULT_GAS));
    assert!(json["data"].as_str().unwrap().starts_with("0x"));
}
