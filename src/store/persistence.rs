//! Durable record log.
//!
//! Port trait plus the sled adapter. The log is append-only and keyed by
//! append sequence; the in-memory store replays it at open and appends
//! every newly accepted record. Derived indices are never persisted, only
//! the records themselves.

use crate::error::StoreError;
use crate::record::Record;
use std::path::Path;

/// Append-only persistence port for the record store.
pub trait RecordLog: Send + Sync {
    /// Append one accepted record. Called after validation, before the
    /// record becomes visible to readers.
    fn append(&self, record: &Record) -> Result<(), StoreError>;

    /// Replay all previously appended records in append order.
    fn load_all(&self) -> Result<Vec<Record>, StoreError>;
}

/// Sled-backed record log. Keys are big-endian append sequence numbers so
/// sled's key order is replay order; values are bincode-encoded records.
pub struct SledRecordLog {
    tree: sled::Tree,
}

impl SledRecordLog {
    /// Open (or create) a record log under the given directory.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let db = sled::open(path)
            .map_err(|e| StoreError::Backend(format!("Failed to open record log: {}", e)))?;
        let tree = db
            .open_tree("records")
            .map_err(|e| StoreError::Backend(format!("Failed to open records tree: {}", e)))?;
        Ok(SledRecordLog { tree })
    }

    fn next_sequence(&self) -> Result<u64, StoreError> {
        let last = self
            .tree
            .last()
            .map_err(|e| StoreError::Backend(format!("Failed to read log tail: {}", e)))?;
        Ok(match last {
            Some((key, _)) => {
                let mut bytes = [0u8; 8];
                bytes.copy_from_slice(&key);
                u64::from_be_bytes(bytes) + 1
            }
            None => 0,
        })
    }
}

impl RecordLog for SledRecordLog {
    fn append(&self, record: &Record) -> Result<(), StoreError> {
        let sequence = self.next_sequence()?;
        let value = bincode::serialize(record)
            .map_err(|e| StoreError::Backend(format!("Failed to encode record: {}", e)))?;
        self.tree
            .insert(sequence.to_be_bytes(), value)
            .map_err(|e| StoreError::Backend(format!("Failed to append record: {}", e)))?;
        self.tree
            .flush()
            .map_err(|e| StoreError::Backend(format!("Failed to flush record log: {}", e)))?;
        Ok(())
    }

    fn load_all(&self) -> Result<Vec<Record>, StoreError> {
        let mut records = Vec::new();
        for entry in self.tree.iter() {
            let (_, value) =
                entry.map_err(|e| StoreError::Backend(format!("Failed to read log: {}", e)))?;
            let record: Record = bincode::deserialize(&value)
                .map_err(|e| StoreError::Backend(format!("Failed to decode record: {}", e)))?;
            records.push(record);
        }
        Ok(records)
    }
}
