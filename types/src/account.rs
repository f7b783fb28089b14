//! Account identity type, rendered as `0x` followed by 40 hex characters.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::TypesError;

/// An opaque 20-byte account handle.
///
/// Identities compare by equality only; no ordering is defined. The all-zero
/// value is the *null* identity: it never owns the token, never holds a
/// balance, and only appears as the `from`/`to` of mint and burn events when
/// they are rendered for external observers.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId([u8; 20]);

impl AccountId {
    /// Byte length of an account id.
    pub const LEN: usize = 20;

    /// The null identity.
    pub const NULL: Self = Self([0u8; 20]);

    pub fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    pub fn is_null(&self) -> bool {
        self.0 == [0u8; 20]
    }

    /// Build an account id from a byte slice of exactly [`Self::LEN`] bytes.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        let arr: [u8; 20] = bytes.try_into().ok()?;
        Some(Self(arr))
    }

    /// Render an optional identity, using the null identity for `None`.
    pub fn display_opt(id: Option<&AccountId>) -> String {
        id.copied().unwrap_or(Self::NULL).to_string()
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountId(0x{}..)", hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for AccountId {
    type Err = TypesError;

    /// Parse `0x`-prefixed (or bare) hex. Case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| TypesError::InvalidAccount {
            input: s.to_string(),
            reason: reason.to_string(),
        };
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        if digits.len() != Self::LEN * 2 {
            return Err(invalid("expected 40 hex characters"));
        }
        let mut bytes = [0u8; 20];
        hex::decode_to_slice(digits, &mut bytes).map_err(|e| invalid(&e.to_string()))?;
        Ok(Self(bytes))
    }
}

impl From<[u8; 20]> for AccountId {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}
