//! Role Index
//!
//! Derived view over role-assignment records, grouped by assignee. Keeps
//! two projections of the same log: the deduplicated role-name set used by
//! capability resolution, and the arrival-ordered list of individual grants
//! used for audit and listing. Insertion-only; revocation has no path
//! through this index.

use crate::capability::RoleName;
use crate::record::{Record, RecordKind, RecordPayload, RoleAssignment};
use crate::store::RecordStore;
use crate::types::{AgentId, RecordId};
use parking_lot::RwLock;
use std::collections::{BTreeSet, HashMap, HashSet};
use tracing::debug;

#[derive(Default)]
struct RoleIndexInner {
    names: HashMap<AgentId, BTreeSet<RoleName>>,
    grants: HashMap<AgentId, Vec<RoleAssignment>>,
    seen: HashSet<RecordId>,
}

/// Incrementally maintained index over accepted role assignments.
///
/// Monotonic accumulation: applying the same record twice is a no-op, and
/// applying a set of records in any order yields the same index state.
/// Recomputable from the store for recovery.
pub struct RoleIndex {
    inner: RwLock<RoleIndexInner>,
}

impl RoleIndex {
    pub fn new() -> Self {
        RoleIndex {
            inner: RwLock::new(RoleIndexInner::default()),
        }
    }

    /// Rebuild the full index from the store's append log.
    pub fn rebuild_from(store: &RecordStore) -> Self {
        let index = RoleIndex::new();
        for record in store.get_all(RecordKind::RoleAssignment) {
            index.apply(&record);
        }
        index
    }

    /// Fold one accepted record into the index. Non-assignment records and
    /// records already applied are ignored.
    pub fn apply(&self, record: &Record) {
        let assignment = match &record.payload {
            RecordPayload::RoleAssignment(assignment) => assignment,
            _ => return,
        };

        let mut inner = self.inner.write();
        if !inner.seen.insert(record.record_id) {
            return;
        }

        debug!(
            assignee = %assignment.assignee,
            role = %assignment.role_name,
            assigned_by = %assignment.assigned_by,
            "Role assignment indexed"
        );

        inner
            .names
            .entry(assignment.assignee.clone())
            .or_default()
            .insert(assignment.role_name.clone());
        inner
            .grants
            .entry(assignment.assignee.clone())
            .or_default()
            .push(assignment.clone());
    }

    /// Deduplicated role names an agent currently holds. The input to
    /// capability resolution.
    pub fn roles_of(&self, agent: &AgentId) -> BTreeSet<RoleName> {
        self.inner
            .read()
            .names
            .get(agent)
            .cloned()
            .unwrap_or_default()
    }

    /// Every individual grant for an agent, in arrival order, each with its
    /// issuer. Duplicate role names from distinct issuers stay distinct.
    pub fn assignments_of(&self, agent: &AgentId) -> Vec<RoleAssignment> {
        self.inner
            .read()
            .grants
            .get(agent)
            .cloned()
            .unwrap_or_default()
    }

    /// Membership test on the deduplicated set.
    pub fn has_role(&self, agent: &AgentId, role: &RoleName) -> bool {
        self.inner
            .read()
            .names
            .get(agent)
            .map(|names| names.contains(role))
            .unwrap_or(false)
    }
}

impl Default for RoleIndex {
    fn default() -> Self {
        Self::new()
    }
}
