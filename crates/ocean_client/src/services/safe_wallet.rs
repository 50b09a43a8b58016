//! Safe Wallet balance and withdrawal preview

use alloy::primitives::U256;
use ocean_units::{Bps, RamaWei, UsdMicro, UsdPerRama};
use serde::Serialize;

use crate::address::parse_address;
use crate::contracts::{IPortfolioManager, ISafeWallet};
use crate::degraded::{Fetched, Partial};
use crate::error::{OceanError, Result};
use crate::raw::{bps, rama_wei, usd_micro};
use crate::registry::ContractName;
use crate::OceanClient;

/// Fee assumed when `withdrawFeeBps` cannot be read
pub const DEFAULT_WITHDRAW_FEE: Bps = Bps(500);

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SafeWalletSummary {
    pub balance: RamaWei,
    pub balance_usd: UsdMicro,
    pub price: UsdPerRama,
    pub fee: Bps,
    pub available_after_fee: UsdMicro,
    pub available_after_fee_rama: RamaWei,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalPreview {
    pub gross: RamaWei,
    pub gross_usd: UsdMicro,
    pub fee: Bps,
    pub fee_amount: RamaWei,
    pub fee_usd: UsdMicro,
    pub net: RamaWei,
    pub net_usd: UsdMicro,
    pub exceeds_balance: bool,
}

impl SafeWalletSummary {
    pub fn new(balance: RamaWei, price: UsdPerRama, fee: Bps) -> Self {
        let available_after_fee_rama = balance.mul_bps(fee.complement());
        Self {
            balance,
            balance_usd: price.usd_for(balance),
            price,
            fee,
            available_after_fee: price.usd_for(available_after_fee_rama),
            available_after_fee_rama,
        }
    }

    pub fn withdrawal_preview(&self, amount: RamaWei) -> WithdrawalPreview {
        let fee_amount = amount.mul_bps(self.fee);
        let net = amount.saturating_sub(fee_amount);
        WithdrawalPreview {
            gross: amount,
            gross_usd: self.price.usd_for(amount),
            fee: self.fee,
            fee_amount,
            fee_usd: self.price.usd_for(fee_amount),
            net,
            net_usd: self.price.usd_for(net),
            exceeds_balance: amount > self.balance,
        }
    }

    /// Preview for a USD amount, converted at the quoted price.
    ///
    /// A zero price converts to zero RAMA.
    pub fn withdrawal_preview_usd(&self, usd: UsdMicro) -> WithdrawalPreview {
        self.withdrawal_preview(self.price.rama_for(usd))
    }
}

pub struct SafeWalletService<'a> {
    client: &'a OceanClient,
}

impl<'a> SafeWalletService<'a> {
    pub(crate) fn new(client: &'a OceanClient) -> Self {
        Self { client }
    }

    pub async fn safe_wallet_summary(&self, user: &str) -> Result<Fetched<SafeWalletSummary>> {
        let user = parse_address(user)?;
        let client = self.client;
        let mut partial = Partial::new();

        let (balance, fee, price) = futures::join!(
            client.read(ContractName::SafeWallet, ISafeWallet::balanceOfCall { user }),
            client.read(ContractName::SafeWallet, ISafeWallet::withdrawFeeBpsCall {}),
            client.read(
                ContractName::PortfolioManager,
                IPortfolioManager::quoteUsdForRamaCall { ramaWei: U256::from(RamaWei::SCALE) },
            ),
        );

        let balance = partial.take("SafeWallet.balanceOf", balance.map(rama_wei));
        let fee = partial.take_or("SafeWallet.withdrawFeeBps", fee.map(bps), DEFAULT_WITHDRAW_FEE);
        let price = partial.take("PortfolioManager.quoteUsdForRama", price.map(|p| UsdPerRama(usd_micro(p))));

        Ok(partial.finish(SafeWalletSummary::new(balance, price, fee)))
    }

    /// Gross, fee and net for withdrawing `amount_rama` from the Safe Wallet
    pub async fn withdrawal_preview(&self, user: &str, amount_rama: f64) -> Result<Fetched<WithdrawalPreview>> {
        parse_address(user)?;
        let amount = RamaWei::from_rama(amount_rama);
        if amount.is_zero() {
            return Err(OceanError::InvalidAmount(amount_rama.to_string()));
        }
        let summary = self.safe_wallet_summary(user).await?;
        Ok(summary.map(|s| s.withdrawal_preview(amount)))
    }

    /// Same as [`withdrawal_preview`](Self::withdrawal_preview) for an amount in USD
    pub async fn withdrawal_preview_usd(&self, user: &str, amount_usd: f64) -> Result<Fetched<WithdrawalPreview>> {
        parse_address(user)?;
        let usd = UsdMicro::from_usd(amount_usd);
        if usd.is_zero() {
            return Err(OceanError::InvalidAmount(amount_usd.to_string()));
        }
        let summary = self.safe_wallet_summary(user).await?;
        Ok(summary.map(|s| s.withdrawal_preview_usd(usd)))
    }
}
