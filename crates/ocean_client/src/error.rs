//! Error taxonomy for reads and transaction building

use thiserror::Error;

pub type Result<T> = std::result::Result<T, OceanError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OceanError {
    /// Input is not `0x` followed by 40 hex digits
    #[error("invalid address: {0:?}")]
    InvalidAddress(String),

    /// Amount is zero, negative or not finite
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// Sponsor input is the zero address, or neither an address nor a positive user id
    #[error("invalid sponsor: {0:?}")]
    InvalidSponsor(String),

    /// User ids start at 1
    #[error("invalid user id: {0}")]
    InvalidUserId(u64),

    /// Registry resolved the sponsor id to the zero address
    #[error("sponsor not found (user id {0} resolves to the zero address)")]
    SponsorNotFound(u64),

    /// Price function returned zero for a positive USD amount
    #[error("price quote for {usd_micro} micro-USD returned zero")]
    NonPositiveQuote { usd_micro: u128 },

    #[error("gas estimation failed for {call}: {message}")]
    GasEstimation { call: String, message: String },

    /// Transport failure or contract revert
    #[error("{call} failed: {message}")]
    Rpc { call: String, message: String },

    #[error("could not decode {call} response: {message}")]
    Decode { call: String, message: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("client state {path}: {message}")]
    State { path: String, message: String },
}

impl OceanError {
    pub fn rpc(call: impl Into<String>, message: impl ToString) -> Self {
        OceanError::Rpc { call: call.into(), message: message.to_string() }
    }

    /// Rebind a transport error to the call that triggered it
    pub fn for_call(self, call: &str) -> Self {
        match self {
            OceanError::Rpc { message, .. } => OceanError::Rpc { call: call.to_string(), message },
            other => other,
        }
    }

    /// True for errors raised before any network access
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            OceanError::InvalidAddress(_)
                | OceanError::InvalidAmount(_)
                | OceanError::InvalidSponsor(_)
                | OceanError::InvalidUserId(_)
        )
    }
}
