//! SmartSLP token ledger.
//!
//! A single fungible token with an owner who may mint, and holders who may
//! burn their own balance. Ownership can be transferred or permanently
//! renounced.
//!
//! This crate handles:
//! - Ledger state: immutable metadata, balances, total supply
//! - Access control: owner checks and one-way renunciation
//! - Token operations: mint, burn, transfer/renounce ownership
//! - The append-only event log
//! - [`TokenLedger`]: the serialized, persistent service wrapping all of the above

pub mod access;
pub mod error;
pub mod event_log;
pub mod ledger;
pub mod state;
pub mod token;
pub mod transition;

pub use access::{AccessControl, OwnershipChange};
pub use error::{LedgerError, TokenError};
pub use event_log::EventLog;
pub use ledger::{TokenLedger, TokenSnapshot};
pub use state::LedgerState;
pub use token::Token;
pub use transition::Transition;
