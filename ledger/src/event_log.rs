//! Append-only, in-memory event log.

use slp_types::{AccountId, EventRecord, Operation, Timestamp, TokenEvent};

/// Ordered record of every event emitted by successful operations.
///
/// Sequence numbers are dense and zero-based: the record at index `i` has
/// `seq == i`. Records are never removed or rewritten.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventLog {
    records: Vec<EventRecord>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from persisted records. Returns `None` if the sequence numbers
    /// are not dense from zero.
    pub fn from_records(records: Vec<EventRecord>) -> Option<Self> {
        let dense = records
            .iter()
            .enumerate()
            .all(|(i, r)| r.seq == i as u64);
        dense.then_some(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sequence number the next record will get.
    pub fn next_seq(&self) -> u64 {
        self.records.len() as u64
    }

    pub fn get(&self, seq: u64) -> Option<&EventRecord> {
        self.records.get(usize::try_from(seq).ok()?)
    }

    /// Records with `seq >= since`.
    pub fn since(&self, since: u64) -> &[EventRecord] {
        let start = usize::try_from(since)
            .unwrap_or(usize::MAX)
            .min(self.records.len());
        &self.records[start..]
    }

    pub fn iter(&self) -> impl Iterator<Item = &EventRecord> {
        self.records.iter()
    }

    /// Records whose event involves `account`.
    pub fn for_account<'a>(&'a self, account: &'a AccountId) -> impl Iterator<Item = &'a EventRecord> {
        self.records.iter().filter(move |r| r.event.involves(account))
    }

    /// Number the events of one operation as the next records, without
    /// appending them.
    pub fn stage(
        &self,
        operation: Operation,
        events: &[TokenEvent],
        recorded_at: Timestamp,
    ) -> Vec<EventRecord> {
        let next = self.next_seq();
        events
            .iter()
            .enumerate()
            .map(|(i, event)| EventRecord {
                seq: next + i as u64,
                operation,
                event: *event,
                recorded_at,
            })
            .collect()
    }

    /// Append records produced by [`EventLog::stage`] against this log.
    pub(crate) fn append(&mut self, records: &[EventRecord]) {
        debug_assert!(records
            .iter()
            .enumerate()
            .all(|(i, r)| r.seq == self.next_seq() + i as u64));
        self.records.extend_from_slice(records);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn burn(from: u8, value: u128) -> TokenEvent {
        TokenEvent::Transfer {
            from: Some(AccountId::new([from; 20])),
            to: None,
            value,
        }
    }

    #[test]
    fn stage_numbers_from_current_length() {
        let mut log = EventLog::new();
        let first = log.stage(Operation::Burn, &[burn(1, 5)], Timestamp::new(10));
        log.append(&first);
        let second = log.stage(
            Operation::Burn,
            &[burn(1, 1), burn(2, 2)],
            Timestamp::new(11),
        );
        assert_eq!(second.iter().map(|r| r.seq).collect::<Vec<_>>(), vec![1, 2]);
        // Staging alone does not append.
        assert_eq!(log.len(), 1);
        log.append(&second);
        assert_eq!(log.next_seq(), 3);
    }

    #[test]
    fn since_and_get() {
        let mut log = EventLog::new();
        let records = log.stage(
            Operation::Burn,
            &[burn(1, 1), burn(1, 2), burn(1, 3)],
            Timestamp::EPOCH,
        );
        log.append(&records);
        assert_eq!(log.since(1).len(), 2);
        assert!(log.since(3).is_empty());
        assert!(log.since(u64::MAX).is_empty());
        assert_eq!(log.get(2).map(|r| r.seq), Some(2));
        assert!(log.get(3).is_none());
    }

    #[test]
    fn iter_yields_records_in_sequence_order() {
        let mut log = EventLog::new();
        let first = log.stage(Operation::Burn, &[burn(1, 1), burn(2, 2)], Timestamp::EPOCH);
        log.append(&first);
        let second = log.stage(Operation::Burn, &[burn(3, 3)], Timestamp::new(5));
        log.append(&second);
        let seqs: Vec<u64> = log.iter().map(|r| r.seq).collect();
        assert_eq!(seqs, vec![0, 1, 2]);
        assert_eq!(log.iter().last(), second.last());
    }

    #[test]
    fn for_account_filters() {
        let mut log = EventLog::new();
        let records = log.stage(Operation::Burn, &[burn(1, 1), burn(2, 2)], Timestamp::EPOCH);
        log.append(&records);
        let a = AccountId::new([2u8; 20]);
        let hits: Vec<_> = log.for_account(&a).collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].seq, 1);
    }

    #[test]
    fn from_records_requires_dense_sequence() {
        let mut log = EventLog::new();
        let records = log.stage(Operation::Burn, &[burn(1, 1), burn(1, 2)], Timestamp::EPOCH);
        log.append(&records);
        assert!(EventLog::from_records(records.clone()).is_some());
        assert!(EventLog::from_records(records[1..].to_vec()).is_none());
    }
}
