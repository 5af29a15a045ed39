//! Record Store
//!
//! Append-only local holder of typed, content-addressed records. The only
//! mutable resource in the crate: owned exclusively by the local process,
//! appended to by the owner and by the replication collaborator, never
//! rewritten. Secondary indices (by kind, by owner, head projection) are
//! derived from the append log and rebuilt wholesale on replay.

pub mod persistence;

use crate::error::StoreError;
use crate::heads::HeadIndex;
use crate::record::{content_id, Record, RecordKind};
use crate::types::{AgentId, RecordId};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use persistence::RecordLog;

/// A record plus local bookkeeping stamped at acceptance.
#[derive(Debug, Clone)]
pub struct StoredRecord {
    pub record: Record,
    /// Local arrival position. Orders reads; not replicated.
    pub sequence: u64,
    /// Local arrival time. Observability only; not part of the record.
    pub observed_at: DateTime<Utc>,
}

#[derive(Default)]
struct StoreInner {
    records: HashMap<RecordId, StoredRecord>,
    arrival: Vec<RecordId>,
    by_kind: HashMap<RecordKind, Vec<RecordId>>,
    by_owner: HashMap<(RecordKind, AgentId), Vec<RecordId>>,
    heads: HeadIndex,
}

/// Append-only, content-addressed record store.
///
/// `put` is idempotent per content hash, so concurrent writers delivering
/// the same record in any interleaving leave the store in the same state.
/// Accepted records are immediately visible to readers and to the role
/// index; rejected records never touch memory, indices, or the durable log.
pub struct RecordStore {
    inner: RwLock<StoreInner>,
    log: Option<Arc<dyn RecordLog>>,
}

impl RecordStore {
    /// In-memory store with no durable log.
    pub fn new() -> Self {
        RecordStore {
            inner: RwLock::new(StoreInner::default()),
            log: None,
        }
    }

    /// Store backed by a durable log. Replays the log before returning, so
    /// derived indices are rebuilt from history rather than persisted.
    pub fn with_log(log: Arc<dyn RecordLog>) -> Result<Self, StoreError> {
        let store = RecordStore {
            inner: RwLock::new(StoreInner::default()),
            log: None,
        };
        for record in log.load_all()? {
            store.put(record)?;
        }
        Ok(RecordStore {
            inner: store.inner,
            log: Some(log),
        })
    }

    /// Append a record. Returns the record id; re-appending an identical
    /// payload is a no-op returning the existing id.
    pub fn put(&self, record: Record) -> Result<RecordId, StoreError> {
        record.payload.validate()?;

        // Content-address integrity: foreign records arrive with their id
        // precomputed and must hash to the same address locally.
        let expected = content_id(&record.payload)?;
        if expected != record.record_id {
            return Err(StoreError::InvalidRecord(format!(
                "Record id does not match payload hash: {}",
                record.short_id()
            )));
        }

        {
            let inner = self.inner.read();
            if inner.records.contains_key(&record.record_id) {
                debug!(record_id = %record.short_id(), "Duplicate record ignored");
                return Ok(record.record_id);
            }
        }

        if let Some(log) = &self.log {
            log.append(&record)?;
        }

        let mut inner = self.inner.write();
        // A concurrent writer may have won the race since the read check.
        if inner.records.contains_key(&record.record_id) {
            return Ok(record.record_id);
        }

        let record_id = record.record_id;
        let kind = record.kind();
        let owner = record.payload.owner().clone();
        let sequence = inner.arrival.len() as u64;

        debug!(
            record_id = %record.short_id(),
            kind = ?kind,
            owner = %owner,
            "Record accepted"
        );

        inner.arrival.push(record_id);
        inner.by_kind.entry(kind).or_default().push(record_id);
        inner
            .by_owner
            .entry((kind, owner.clone()))
            .or_default()
            .push(record_id);
        if kind != RecordKind::RoleAssignment {
            inner.heads.update_head(&owner, kind, &record_id);
        }
        inner.records.insert(
            record_id,
            StoredRecord {
                record,
                sequence,
                observed_at: Utc::now(),
            },
        );

        Ok(record_id)
    }

    pub fn contains(&self, record_id: &RecordId) -> bool {
        self.inner.read().records.contains_key(record_id)
    }

    pub fn get(&self, record_id: &RecordId) -> Option<Record> {
        self.inner
            .read()
            .records
            .get(record_id)
            .map(|stored| stored.record.clone())
    }

    /// All records of a kind, in local arrival order.
    pub fn get_all(&self, kind: RecordKind) -> Vec<Record> {
        let inner = self.inner.read();
        inner
            .by_kind
            .get(&kind)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| inner.records.get(id))
                    .map(|stored| stored.record.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Records of a kind for one owner (profile owner or role assignee),
    /// in local arrival order.
    pub fn get_for_owner(&self, kind: RecordKind, owner: &AgentId) -> Vec<Record> {
        let inner = self.inner.read();
        inner
            .by_owner
            .get(&(kind, owner.clone()))
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| inner.records.get(id))
                    .map(|stored| stored.record.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Latest record of a kind for an owner, via the head projection.
    pub fn latest_for_owner(&self, kind: RecordKind, owner: &AgentId) -> Option<Record> {
        let inner = self.inner.read();
        inner
            .heads
            .get_head(owner, kind)
            .and_then(|id| inner.records.get(&id))
            .map(|stored| stored.record.clone())
    }

    /// Distinct owners that have at least one record of the given kind,
    /// sorted for deterministic listings.
    pub fn owners_with(&self, kind: RecordKind) -> Vec<AgentId> {
        let inner = self.inner.read();
        if kind == RecordKind::RoleAssignment {
            let mut owners: Vec<AgentId> = inner
                .by_owner
                .keys()
                .filter_map(|(k, owner)| (*k == kind).then(|| owner.clone()))
                .collect();
            owners.sort();
            owners
        } else {
            inner.heads.owners_for_kind(kind)
        }
    }

    /// Ids of every held record. Used by the replication surface for
    /// anti-entropy comparison.
    pub fn record_ids(&self) -> Vec<RecordId> {
        self.inner.read().arrival.clone()
    }

    pub fn len(&self) -> usize {
        self.inner.read().arrival.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().arrival.is_empty()
    }
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}
