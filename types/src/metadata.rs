//! Immutable token metadata fixed at construction.

use serde::{Deserialize, Serialize};

use crate::DocumentHash;

/// Descriptive fields of a token. Never modified after construction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    /// Human-readable name (e.g. "test token").
    pub name: String,
    /// Ticker symbol (e.g. "tt").
    pub symbol: String,
    /// Number of decimal places callers use to display amounts.
    pub decimals: u8,
    /// URI of the token's reference document. May be empty.
    pub document_uri: String,
    /// Digest of the reference document; [`DocumentHash::ZERO`] when unset.
    pub document_hash: DocumentHash,
}

impl TokenMetadata {
    pub fn new(
        name: impl Into<String>,
        symbol: impl Into<String>,
        document_uri: impl Into<String>,
        document_hash: DocumentHash,
        decimals: u8,
    ) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            decimals,
            document_uri: document_uri.into(),
            document_hash,
        }
    }

    pub fn has_document_hash(&self) -> bool {
        !self.document_hash.is_zero()
    }
}
