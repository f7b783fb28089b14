//! Parsing errors for the fundamental types.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypesError {
    #[error("invalid account id '{input}': {reason}")]
    InvalidAccount { input: String, reason: String },

    #[error("invalid document hash: {0}")]
    InvalidDocumentHash(String),
}
