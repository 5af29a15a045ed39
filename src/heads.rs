//! Record Heads
//!
//! Provides O(1) access to the latest record for a given owner and record
//! kind. A derived projection over the append log, never the source of
//! truth: the store rebuilds it from scratch when replaying a durable log.

use crate::record::RecordKind;
use crate::types::{AgentId, RecordId};
use std::collections::HashMap;

/// Head index: (owner, record kind) -> RecordId
#[derive(Debug, Default)]
pub struct HeadIndex {
    pub(crate) heads: HashMap<(AgentId, RecordKind), RecordId>,
}

impl HeadIndex {
    pub fn new() -> Self {
        HeadIndex {
            heads: HashMap::new(),
        }
    }

    pub fn get_head(&self, owner: &AgentId, kind: RecordKind) -> Option<RecordId> {
        self.heads.get(&(owner.clone(), kind)).copied()
    }

    /// Point the head for (owner, kind) at a newer record. Last writer wins
    /// in local log order; superseded records stay in the log.
    pub fn update_head(&mut self, owner: &AgentId, kind: RecordKind, record_id: &RecordId) {
        self.heads.insert((owner.clone(), kind), *record_id);
    }

    /// All owners that currently have a head for the given kind, sorted for
    /// deterministic listings.
    pub fn owners_for_kind(&self, kind: RecordKind) -> Vec<AgentId> {
        let mut owners: Vec<AgentId> = self
            .heads
            .keys()
            .filter_map(|(owner, k)| if *k == kind { Some(owner.clone()) } else { None })
            .collect();
        owners.sort();
        owners
    }
}
