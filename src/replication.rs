//! Record Propagation
//!
//! In-memory stand-in for the replication collaborator: a cluster of local
//! replicas exchanging shared-scope records by anti-entropy until every
//! replica holds the same set. Delivery order is record-id order, which
//! deliberately differs from each origin's local arrival order; derived
//! state must not depend on it, and the directory's order-independent
//! ingest guarantees it does not.
//!
//! Private-scope records are not part of the exchange: a private profile
//! exists only on its owner's replica.

use crate::directory::DirectoryService;
use crate::record::Record;
use crate::types::{AgentId, RecordId};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// A set of replicas wired together for synchronous anti-entropy exchange.
pub struct MemoryCluster {
    replicas: RwLock<BTreeMap<AgentId, Arc<DirectoryService>>>,
}

impl MemoryCluster {
    pub fn new() -> Self {
        MemoryCluster {
            replicas: RwLock::new(BTreeMap::new()),
        }
    }

    /// Wire a replica into the cluster. The agent id is the replica's
    /// network identity, supplied by the embedder.
    pub fn register(&self, agent: AgentId, directory: Arc<DirectoryService>) {
        debug!(agent = %agent, "Replica registered");
        self.replicas.write().insert(agent, directory);
    }

    /// Exchange records until every replica holds the union of all
    /// shared-scope records. Returns the number of deliveries made.
    ///
    /// Records are delivered in record-id order. A record a replica
    /// refuses is logged and skipped rather than aborting the round.
    pub fn converge(&self) -> usize {
        let replicas = self.replicas.read();

        let mut union: BTreeMap<RecordId, Record> = BTreeMap::new();
        for directory in replicas.values() {
            for record in directory.replication_snapshot() {
                union.insert(record.record_id, record);
            }
        }

        let mut delivered = 0;
        for (agent, directory) in replicas.iter() {
            let held: std::collections::HashSet<RecordId> =
                directory.shared_record_ids().into_iter().collect();
            for record in union.values() {
                if held.contains(&record.record_id) {
                    continue;
                }
                match directory.ingest(record.clone()) {
                    Ok(_) => delivered += 1,
                    Err(e) => {
                        warn!(
                            replica = %agent,
                            record_id = %record.short_id(),
                            error = %e,
                            "Replica refused propagated record"
                        );
                    }
                }
            }
        }

        debug!(delivered, "Convergence round complete");
        delivered
    }

    /// Barrier predicate: do all replicas agree on the shared-scope record
    /// set? Used by tests and observability layers, not by core logic.
    pub fn is_converged(&self) -> bool {
        let replicas = self.replicas.read();
        let mut sets = replicas
            .values()
            .map(|directory| directory.shared_record_ids());
        match sets.next() {
            Some(first) => sets.all(|set| set == first),
            None => true,
        }
    }
}

impl Default for MemoryCluster {
    fn default() -> Self {
        Self::new()
    }
}
