//! LMDB implementation of EventStore.

use heed::RoTxn;
use slp_store::event::EventStore;
use slp_store::StoreError;
use slp_types::EventRecord;

use crate::{LmdbEnvironment, LmdbError};

impl EventStore for LmdbEnvironment {
    fn get_event(&self, seq: u64) -> Result<EventRecord, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let bytes = self
            .events_db
            .get(&rtxn, &seq)
            .map_err(LmdbError::from)?
            .ok_or_else(|| LmdbError::NotFound(format!("event {}", seq)))?;
        Ok(bincode::deserialize(bytes).map_err(LmdbError::from)?)
    }

    fn event_count(&self) -> Result<u64, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        Ok(self.events_db.len(&rtxn).map_err(LmdbError::from)?)
    }

    fn iter_events(&self, since: u64, limit: usize) -> Result<Vec<EventRecord>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        Ok(self.read_events(&rtxn, since, limit)?)
    }
}

impl LmdbEnvironment {
    pub(crate) fn read_events(
        &self,
        rtxn: &RoTxn<'_>,
        since: u64,
        limit: usize,
    ) -> Result<Vec<EventRecord>, LmdbError> {
        let mut out = Vec::new();
        let range = since..;
        for item in self.events_db.range(rtxn, &range)?.take(limit) {
            let (_, bytes) = item?;
            out.push(bincode::deserialize(bytes)?);
        }
        Ok(out)
    }
}
