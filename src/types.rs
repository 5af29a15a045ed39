//! Core types for the member directory.

use serde::{Deserialize, Serialize};
use std::fmt;

/// RecordId: Deterministic content hash of a record payload
pub type RecordId = [u8; 32];

/// Hash: Generic 256-bit hash value
pub type Hash = [u8; 32];

/// Opaque identifier for a participating agent.
///
/// Globally unique and comparable. The directory never derives agent
/// identity itself; identifiers are supplied by callers and by the
/// replication collaborator alongside foreign records.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentId(String);

impl AgentId {
    pub fn new(id: impl Into<String>) -> Self {
        AgentId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AgentId {
    fn from(id: &str) -> Self {
        AgentId(id.to_string())
    }
}

impl From<String> for AgentId {
    fn from(id: String) -> Self {
        AgentId(id)
    }
}
