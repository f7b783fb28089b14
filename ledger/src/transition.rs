//! Planned effects of one token operation.

use slp_types::{AccountId, Operation, TokenEvent};

/// Everything one successful operation changes, computed before anything is
/// mutated.
///
/// Values are absolute (the balance *after* the operation), so applying a
/// transition is infallible. A transition is only valid against the exact
/// state it was planned from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub operation: Operation,
    /// New balances of the accounts this operation touches.
    pub balances: Vec<(AccountId, u128)>,
    pub total_supply: u128,
    /// Owner after the operation.
    pub owner: Option<AccountId>,
    /// Events to emit, in order.
    pub events: Vec<TokenEvent>,
}

impl Transition {
    /// New balance of `account` under this transition, if it touches it.
    pub fn balance_of(&self, account: &AccountId) -> Option<u128> {
        self.balances
            .iter()
            .find(|(a, _)| a == account)
            .map(|(_, b)| *b)
    }
}
