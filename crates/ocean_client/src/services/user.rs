//! Registration, ids and user status

use alloy::primitives::{Address, U256};
use log::debug;
use ocean_units::UsdMicro;
use serde::Serialize;

use crate::address::{parse_address, AccountRef};
use crate::contracts::{IRoyaltyManager, ISlabManager, IUserRegistry};
use crate::degraded::{Fetched, Partial};
use crate::error::{OceanError, Result};
use crate::raw::{u64_of, usd_micro};
use crate::registry::ContractName;
use crate::OceanClient;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStatus {
    pub address: Address,
    pub registered: bool,
    pub user_id: u64,
    /// `None` when the registry reports the zero address
    pub sponsor: Option<Address>,
    pub registered_at: u64,
    pub slab_level: u8,
    pub royalty_level: u8,
    pub royalty_paid_months: u32,
    pub directs: u32,
    pub qualified_volume: UsdMicro,
}

pub struct UserService<'a> {
    client: &'a OceanClient,
}

impl<'a> UserService<'a> {
    pub(crate) fn new(client: &'a OceanClient) -> Self {
        Self { client }
    }

    pub async fn is_registered(&self, user: &str) -> Result<bool> {
        let user = parse_address(user)?;
        self.client
            .read(ContractName::UserRegistry, IUserRegistry::isRegisteredCall { user })
            .await
    }

    pub async fn user_id_by_address(&self, user: &str) -> Result<u64> {
        let user = parse_address(user)?;
        let id = self
            .client
            .read(ContractName::UserRegistry, IUserRegistry::userCall { account: user })
            .await?;
        Ok(u64_of(id))
    }

    /// Zero address means "no such user"
    pub async fn address_by_id(&self, user_id: u64) -> Result<Address> {
        if user_id == 0 {
            return Err(OceanError::InvalidUserId(user_id));
        }
        self.client
            .read(
                ContractName::UserRegistry,
                IUserRegistry::idToAddressCall { userId: U256::from(user_id) },
            )
            .await
    }

    /// Resolve a sponsor/beneficiary reference to a non-zero address.
    ///
    /// Addresses pass through without a registry lookup.
    pub async fn resolve(&self, account: AccountRef) -> Result<Address> {
        match account {
            AccountRef::Address(address) if address.is_zero() => {
                Err(OceanError::InvalidSponsor(address.to_string()))
            }
            AccountRef::Address(address) => Ok(address),
            AccountRef::UserId(id) => {
                let address = self.address_by_id(id).await?;
                if address.is_zero() {
                    return Err(OceanError::SponsorNotFound(id));
                }
                debug!("Resolved user #{} to {}", id, address);
                Ok(address)
            }
        }
    }

    pub(crate) async fn direct_referrals(&self, user: Address) -> Result<Vec<Address>> {
        self.client
            .read(ContractName::UserRegistry, IUserRegistry::getDirectReferralsCall { user })
            .await
    }

    pub(crate) async fn qualified_volume(&self, user: Address) -> Result<UsdMicro> {
        self.client
            .read(ContractName::UserRegistry, IUserRegistry::getQualifiedVolumeCall { user })
            .await
            .map(usd_micro)
    }

    pub(crate) async fn direct_count(&self, user: Address) -> Result<u32> {
        self.client
            .read(ContractName::UserRegistry, IUserRegistry::getDirectCountCall { user })
            .await
            .map(|count| u32::try_from(u64_of(count)).unwrap_or(u32::MAX))
    }

    pub(crate) async fn sponsor(&self, user: Address) -> Result<Option<Address>> {
        self.client
            .read(ContractName::UserRegistry, IUserRegistry::getSponsorCall { user })
            .await
            .map(|sponsor| (!sponsor.is_zero()).then_some(sponsor))
    }

    /// Registration flag first; unregistered users skip the detail calls
    pub async fn user_status(&self, user: &str) -> Result<Fetched<UserStatus>> {
        let user = parse_address(user)?;
        Ok(self.status_of(user).await)
    }

    pub(crate) async fn status_of(&self, user: Address) -> Fetched<UserStatus> {
        let mut partial = Partial::new();
        let client = self.client;

        let registered = partial.take(
            "UserRegistry.isRegistered",
            client
                .read(ContractName::UserRegistry, IUserRegistry::isRegisteredCall { user })
                .await,
        );

        if !registered && !partial.is_degraded() {
            return partial.finish(UserStatus { address: user, ..UserStatus::default() });
        }

        let (user_id, sponsor, registered_at, directs, volume, slab_level, royalty) = futures::join!(
            client.read(ContractName::UserRegistry, IUserRegistry::userCall { account: user }),
            self.sponsor(user),
            client.read(ContractName::UserRegistry, IUserRegistry::registrationTimeCall { user }),
            self.direct_count(user),
            self.qualified_volume(user),
            client.read(ContractName::SlabManager, ISlabManager::getSlabLevelCall { user }),
            client.read(ContractName::RoyaltyManager, IRoyaltyManager::getUserRoyaltyCall { user }),
        );

        let royalty = partial.take_or(
            "RoyaltyManager.getUserRoyalty",
            royalty.map(|r| (r.level, r.paidMonths)),
            (0, 0),
        );

        let status = UserStatus {
            address: user,
            registered,
            user_id: u64_of(partial.take("UserRegistry.user", user_id)),
            sponsor: partial.take("UserRegistry.getSponsor", sponsor),
            registered_at: u64_of(partial.take("UserRegistry.registrationTime", registered_at)),
            slab_level: partial.take("SlabManager.getSlabLevel", slab_level),
            royalty_level: royalty.0,
            royalty_paid_months: royalty.1,
            directs: partial.take("UserRegistry.getDirectCount", directs),
            qualified_volume: partial.take("UserRegistry.getQualifiedVolume", volume),
        };

        partial.finish(status)
    }
}
