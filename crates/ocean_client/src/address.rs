//! Address and sponsor input parsing

use std::fmt;
use std::str::FromStr;

use alloy::primitives::Address;

use crate::error::{OceanError, Result};

/// Parse a `0x`-prefixed, 40 hex digit account address.
///
/// Mixed-case input is accepted without checksum verification.
pub fn parse_address(input: &str) -> Result<Address> {
    let trimmed = input.trim();
    let hex = trimmed
        .strip_prefix("0x")
        .ok_or_else(|| OceanError::InvalidAddress(input.to_string()))?;

    if hex.len() != 40 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(OceanError::InvalidAddress(input.to_string()));
    }

    Address::from_str(trimmed).map_err(|_| OceanError::InvalidAddress(input.to_string()))
}

/// Shortened display form: `0x1234...abcd`
pub fn short_address(address: &Address) -> String {
    let full = address.to_string();
    format!("{}...{}", &full[..6], &full[full.len() - 4..])
}

/// Sponsor or beneficiary reference: either an address or a registry user id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountRef {
    Address(Address),
    UserId(u64),
}

impl AccountRef {
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.starts_with("0x") {
            return parse_address(trimmed)
                .map(AccountRef::Address)
                .map_err(|_| OceanError::InvalidSponsor(input.to_string()));
        }

        match trimmed.parse::<u64>() {
            Ok(id) if id > 0 => Ok(AccountRef::UserId(id)),
            _ => Err(OceanError::InvalidSponsor(input.to_string())),
        }
    }
}

impl FromStr for AccountRef {
    type Err = OceanError;

    fn from_str(s: &str) -> Result<Self> {
        AccountRef::parse(s)
    }
}

impl fmt::Display for AccountRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountRef::Address(address) => write!(f, "{}", address),
            AccountRef::UserId(id) => write!(f, "user #{}", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_address() {
        let address = parse_address("0x10C73CC0249b547402B0532c5c7D1fa52E09b16e").unwrap();
        assert_eq!(
            address.to_string().to_lowercase(),
            "0x10c73cc0249b547402b0532c5c7d1fa52e09b16e"
        );
        assert!(parse_address("  0x10c73cc0249b547402b0532c5c7d1fa52e09b16e ").is_ok());
    }

    #[test]
    fn test_parse_address_rejects_malformed() {
        for bad in [
            "not-an-address",
            "",
            "10c73cc0249b547402b0532c5c7d1fa52e09b16e",
            "0x10c73cc0249b547402b0532c5c7d1fa52e09b16",
            "0x10c73cc0249b547402b0532c5c7d1fa52e09b16ez",
            "0xZZc73cc0249b547402b0532c5c7d1fa52e09b16e",
        ] {
            assert!(
                matches!(parse_address(bad), Err(OceanError::InvalidAddress(_))),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn test_account_ref() {
        assert_eq!(AccountRef::parse("42").unwrap(), AccountRef::UserId(42));
        assert!(matches!(
            AccountRef::parse("0x10c73cc0249b547402b0532c5c7d1fa52e09b16e"),
            Ok(AccountRef::Address(_))
        ));
        assert!(matches!(AccountRef::parse("0"), Err(OceanError::InvalidSponsor(_))));
        assert!(matches!(AccountRef::parse("-3"), Err(OceanError::InvalidSponsor(_))));
        assert!(matches!(AccountRef::parse("0x1234"), Err(OceanError::InvalidSponsor(_))));
    }

    #[test]
    fn test_short_address() {
        let address = parse_address("0x10c73cc0249b547402b0532c5c7d1fa52e09b16e").unwrap();
        let short = short_address(&address).to_lowercase();
        assert!(short.starts_with("0x10c7"));
        assert!(short.ends_with("b16e"));
        assert_eq!(short.len(), 13);
    }
}
