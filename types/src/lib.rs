//! Fundamental types for the SmartSLP token ledger.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! account identities, document hashes, token metadata, events, timestamps and the clock abstraction.

pub mod account;
pub mod error;
pub mod event;
pub mod hash;
pub mod metadata;
pub mod time;

pub use account::AccountId;
pub use error::TypesError;
pub use event::{EventRecord, Operation, TokenEvent};
pub use hash::DocumentHash;
pub use metadata::TokenMetadata;
pub use time::{Clock, SystemClock, Timestamp};
