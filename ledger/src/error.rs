//! Ledger errors.

use slp_types::AccountId;
use thiserror::Error;

/// Why a token operation was rejected. The token is unchanged in every case.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("caller {caller} is not the token owner")]
    Unauthorized { caller: AccountId },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("insufficient balance: need {needed}, available {available}")]
    InsufficientBalance { needed: u128, available: u128 },

    #[error("arithmetic overflow in token supply")]
    Overflow,
}

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("storage error: {0}")]
    Store(#[from] slp_store::StoreError),

    #[error("no token has been deployed in this store")]
    NotDeployed,

    #[error("a token is already deployed in this store")]
    AlreadyDeployed,

    #[error("stored ledger is inconsistent: {0}")]
    Corrupt(String),
}

impl LedgerError {
    /// The rejected-operation error, if this is one.
    pub fn as_token_error(&self) -> Option<&TokenError> {
        match self {
            LedgerError::Token(e) => Some(e),
            _ => None,
        }
    }
}
