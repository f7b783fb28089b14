//! Token operations: construct, mint, burn, transfer and renounce ownership.
//!
//! Every operation is split into a `plan_*` step that validates against the
//! current state and returns a [`Transition`], and an infallible apply step.
//! A rejected plan leaves the token untouched and emits nothing.

use slp_types::{AccountId, Operation, TokenEvent, TokenMetadata};

use crate::access::AccessControl;
use crate::error::TokenError;
use crate::state::LedgerState;
use crate::transition::Transition;

/// A single fungible token: accounting state plus access control.
///
/// Minting is privileged (owner only); burning is not: any holder may destroy
/// their own balance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    state: LedgerState,
    access: AccessControl,
}

impl Token {
    /// Create a token owned by `deployer` with `initial_qty` credited to it.
    ///
    /// Returns the token and the construction transition, whose events are
    /// `OwnershipTransferred(none, deployer)` then `Transfer(none, deployer, initial_qty)`.
    pub fn construct(
        metadata: TokenMetadata,
        initial_qty: u128,
        deployer: AccountId,
    ) -> Result<(Self, Transition), TokenError> {
        if deployer.is_null() {
            return Err(TokenError::InvalidArgument(
                "deployer is the null identity".to_string(),
            ));
        }
        let transition = Transition {
            operation: Operation::Construct,
            balances: vec![(deployer, initial_qty)],
            total_supply: initial_qty,
            owner: Some(deployer),
            events: vec![
                TokenEvent::OwnershipTransferred {
                    previous: None,
                    new: Some(deployer),
                },
                TokenEvent::Transfer {
                    from: None,
                    to: Some(deployer),
                    value: initial_qty,
                },
            ],
        };
        let mut token = Self {
            state: LedgerState::new(metadata),
            access: AccessControl::new(deployer),
        };
        token.apply(&transition);
        Ok((token, transition))
    }

    /// Rebuild a token from persisted parts without re-validating them.
    pub fn restore(state: LedgerState, access: AccessControl) -> Self {
        Self { state, access }
    }

    pub fn state(&self) -> &LedgerState {
        &self.state
    }

    pub fn access(&self) -> &AccessControl {
        &self.access
    }

    pub fn owner(&self) -> Option<AccountId> {
        self.access.owner()
    }

    pub fn balance_of(&self, account: &AccountId) -> u128 {
        self.state.balance_of(account)
    }

    pub fn total_supply(&self) -> u128 {
        self.state.total_supply()
    }

    // ── Planning ────────────────────────────────────────────────────────

    /// Plan minting `amount` smallest units to `recipient`.
    pub fn plan_mint(
        &self,
        caller: &AccountId,
        recipient: &AccountId,
        amount: u128,
    ) -> Result<Transition, TokenError> {
        self.access.authorize(caller)?;
        if recipient.is_null() {
            return Err(TokenError::InvalidArgument(
                "cannot mint to the null identity".to_string(),
            ));
        }
        let total_supply = self
            .state
            .total_supply()
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;
        let balance = self
            .state
            .balance_of(recipient)
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;
        Ok(Transition {
            operation: Operation::Mint,
            balances: vec![(*recipient, balance)],
            total_supply,
            owner: self.access.owner(),
            events: vec![TokenEvent::Transfer {
                from: None,
                to: Some(*recipient),
                value: amount,
            }],
        })
    }

    /// Plan `caller` burning `amount` of its own balance.
    pub fn plan_burn(&self, caller: &AccountId, amount: u128) -> Result<Transition, TokenError> {
        if caller.is_null() {
            return Err(TokenError::InvalidArgument(
                "cannot burn from the null identity".to_string(),
            ));
        }
        let available = self.state.balance_of(caller);
        let balance = available
            .checked_sub(amount)
            .ok_or(TokenError::InsufficientBalance {
                needed: amount,
                available,
            })?;
        // Supply covers every balance, so this only fails on a corrupted state.
        let total_supply = self
            .state
            .total_supply()
            .checked_sub(amount)
            .ok_or(TokenError::Overflow)?;
        Ok(Transition {
            operation: Operation::Burn,
            balances: vec![(*caller, balance)],
            total_supply,
            owner: self.access.owner(),
            events: vec![TokenEvent::Transfer {
                from: Some(*caller),
                to: None,
                value: amount,
            }],
        })
    }

    pub fn plan_transfer_ownership(
        &self,
        caller: &AccountId,
        new_owner: &AccountId,
    ) -> Result<Transition, TokenError> {
        let change = self.access.plan_transfer(caller, new_owner)?;
        Ok(self.ownership_transition(Operation::TransferOwnership, change.new, change.event()))
    }

    pub fn plan_renounce_ownership(&self, caller: &AccountId) -> Result<Transition, TokenError> {
        let change = self.access.plan_renounce(caller)?;
        Ok(self.ownership_transition(Operation::RenounceOwnership, change.new, change.event()))
    }

    fn ownership_transition(
        &self,
        operation: Operation,
        owner: Option<AccountId>,
        event: TokenEvent,
    ) -> Transition {
        Transition {
            operation,
            balances: Vec::new(),
            total_supply: self.state.total_supply(),
            owner,
            events: vec![event],
        }
    }

    // ── Applying ────────────────────────────────────────────────────────

    /// Apply a transition planned against this exact state.
    pub(crate) fn apply(&mut self, transition: &Transition) {
        for (account, balance) in &transition.balances {
            self.state.set_balance(*account, *balance);
        }
        self.state.set_total_supply(transition.total_supply);
        self.access.apply(transition.owner);
    }

    // ── Plan + apply ────────────────────────────────────────────────────

    pub fn mint(
        &mut self,
        caller: &AccountId,
        recipient: &AccountId,
        amount: u128,
    ) -> Result<Vec<TokenEvent>, TokenError> {
        let transition = self.plan_mint(caller, recipient, amount)?;
        self.apply(&transition);
        Ok(transition.events)
    }

    pub fn burn(&mut self, caller: &AccountId, amount: u128) -> Result<Vec<TokenEvent>, TokenError> {
        let transition = self.plan_burn(caller, amount)?;
        self.apply(&transition);
        Ok(transition.events)
    }

    pub fn transfer_ownership(
        &mut self,
        caller: &AccountId,
        new_owner: &AccountId,
    ) -> Result<Vec<TokenEvent>, TokenError> {
        let transition = self.plan_transfer_ownership(caller, new_owner)?;
        self.apply(&transition);
        Ok(transition.events)
    }

    pub fn renounce_ownership(&mut self, caller: &AccountId) -> Result<Vec<TokenEvent>, TokenError> {
        let transition = self.plan_renounce_ownership(caller)?;
        self.apply(&transition);
        Ok(transition.events)
    }
}
