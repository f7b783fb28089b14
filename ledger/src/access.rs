//! Owner-only access control with one-way renunciation.

use slp_types::{AccountId, TokenEvent};

use crate::error::TokenError;

/// A planned ownership change, not yet applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OwnershipChange {
    pub previous: Option<AccountId>,
    pub new: Option<AccountId>,
}

impl OwnershipChange {
    pub fn event(&self) -> TokenEvent {
        TokenEvent::OwnershipTransferred {
            previous: self.previous,
            new: self.new,
        }
    }
}

/// Holds the token owner.
///
/// `None` means ownership was renounced. There is no transition out of
/// `None`: every plan requires an authorized caller, and no caller can be
/// authorized without an owner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccessControl {
    owner: Option<AccountId>,
}

impl AccessControl {
    pub fn new(owner: AccountId) -> Self {
        Self { owner: Some(owner) }
    }

    /// Rebuild from a persisted owner.
    pub fn restore(owner: Option<AccountId>) -> Self {
        Self { owner }
    }

    pub fn owner(&self) -> Option<AccountId> {
        self.owner
    }

    pub fn is_renounced(&self) -> bool {
        self.owner.is_none()
    }

    /// Succeeds iff there is an owner and `caller` is it.
    pub fn authorize(&self, caller: &AccountId) -> Result<(), TokenError> {
        match &self.owner {
            Some(owner) if owner == caller => Ok(()),
            _ => Err(TokenError::Unauthorized { caller: *caller }),
        }
    }

    pub fn plan_transfer(
        &self,
        caller: &AccountId,
        new_owner: &AccountId,
    ) -> Result<OwnershipChange, TokenError> {
        self.authorize(caller)?;
        if new_owner.is_null() {
            return Err(TokenError::InvalidArgument(
                "new owner is the null identity".to_string(),
            ));
        }
        Ok(OwnershipChange {
            previous: self.owner,
            new: Some(*new_owner),
        })
    }

    pub fn plan_renounce(&self, caller: &AccountId) -> Result<OwnershipChange, TokenError> {
        self.authorize(caller)?;
        Ok(OwnershipChange {
            previous: self.owner,
            new: None,
        })
    }

    /// Set the owner planned by a transition.
    ///
    /// Never revives a renounced owner.
    pub(crate) fn apply(&mut self, owner: Option<AccountId>) {
        if self.owner.is_some() {
            self.owner = owner;
        }
    }
}
