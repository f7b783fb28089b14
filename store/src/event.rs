//! Event log storage trait.

use crate::StoreError;
use slp_types::EventRecord;

/// Read access to the persisted, append-only event log.
pub trait EventStore {
    /// Record at position `seq`.
    fn get_event(&self, seq: u64) -> Result<EventRecord, StoreError>;

    /// Number of records in the log; also the next sequence number.
    fn event_count(&self) -> Result<u64, StoreError>;

    /// Up to `limit` records with `seq >= since`, in sequence order.
    fn iter_events(&self, since: u64, limit: usize) -> Result<Vec<EventRecord>, StoreError>;
}
