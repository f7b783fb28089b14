//! Metadata storage trait.

use crate::StoreError;

/// Trait for internal bookkeeping values (schema version and similar).
pub trait MetaStore {
    /// Get the current database schema version. `0` means never written.
    fn get_schema_version(&self) -> Result<u32, StoreError>;

    /// Set the database schema version.
    fn set_schema_version(&self, version: u32) -> Result<(), StoreError>;
}
