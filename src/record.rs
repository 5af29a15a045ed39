//! Directory Records
//!
//! Immutable, typed units of stored data: public profiles, private
//! profiles, and role assignments. Each record is content-addressed by the
//! blake3 hash of its canonically encoded payload, so identical payloads
//! collapse to a single record and appends are idempotent.

use crate::capability::RoleName;
use crate::error::StoreError;
use crate::types::{AgentId, RecordId};
use serde::{Deserialize, Serialize};

/// Record kind discriminant, used for store indexing and visibility rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    PublicProfile,
    PrivateProfile,
    RoleAssignment,
}

/// Public identity record, visible to every member.
///
/// One logical profile per agent: later writes by the same owner supersede
/// earlier ones in the store's head projection; history is never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicProfile {
    pub owner: AgentId,
    pub name: String,
    pub avatar_url: Option<String>,
}

/// Private identity record, readable only by its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateProfile {
    pub owner: AgentId,
    pub legal_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub emergency_contact: Option<String>,
    pub time_zone: Option<String>,
    pub location: Option<String>,
}

/// A role granted to one agent by another.
///
/// Immutable once accepted. Multiple assignments of the same role to the
/// same agent may coexist; capability resolution treats them as set
/// membership while every individual grant remains listable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAssignment {
    pub assignee: AgentId,
    pub assigned_by: AgentId,
    pub role_name: RoleName,
    pub description: String,
}

/// Typed record payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordPayload {
    PublicProfile(PublicProfile),
    PrivateProfile(PrivateProfile),
    RoleAssignment(RoleAssignment),
}

impl RecordPayload {
    pub fn kind(&self) -> RecordKind {
        match self {
            RecordPayload::PublicProfile(_) => RecordKind::PublicProfile,
            RecordPayload::PrivateProfile(_) => RecordKind::PrivateProfile,
            RecordPayload::RoleAssignment(_) => RecordKind::RoleAssignment,
        }
    }

    /// The agent this record is indexed under: the profile owner, or the
    /// assignee for role assignments.
    pub fn owner(&self) -> &AgentId {
        match self {
            RecordPayload::PublicProfile(profile) => &profile.owner,
            RecordPayload::PrivateProfile(profile) => &profile.owner,
            RecordPayload::RoleAssignment(assignment) => &assignment.assignee,
        }
    }

    /// Schema check: every required field must be present and non-empty.
    pub fn validate(&self) -> Result<(), StoreError> {
        match self {
            RecordPayload::PublicProfile(profile) => {
                require(profile.owner.as_str(), "owner")?;
                require(&profile.name, "name")
            }
            RecordPayload::PrivateProfile(profile) => {
                require(profile.owner.as_str(), "owner")?;
                require(&profile.legal_name, "legal_name")?;
                require(&profile.email, "email")
            }
            RecordPayload::RoleAssignment(assignment) => {
                require(assignment.assignee.as_str(), "assignee")?;
                require(assignment.assigned_by.as_str(), "assigned_by")?;
                require(assignment.role_name.as_str(), "role_name")
            }
        }
    }
}

fn require(value: &str, field: &str) -> Result<(), StoreError> {
    if value.is_empty() {
        return Err(StoreError::InvalidRecord(format!(
            "Missing required field: {}",
            field
        )));
    }
    Ok(())
}

/// A content-addressed record attributed to its originating agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub record_id: RecordId,
    pub author: AgentId,
    pub payload: RecordPayload,
}

impl Record {
    /// Build a record from a payload, validating the schema and computing
    /// the content address.
    pub fn new(author: AgentId, payload: RecordPayload) -> Result<Self, StoreError> {
        payload.validate()?;
        let record_id = content_id(&payload)?;
        Ok(Record {
            record_id,
            author,
            payload,
        })
    }

    pub fn kind(&self) -> RecordKind {
        self.payload.kind()
    }

    /// Short hex form of the record id, for logging.
    pub fn short_id(&self) -> String {
        hex::encode(&self.record_id[..8])
    }
}

/// Content address of a payload: blake3 over the canonical bincode encoding.
pub fn content_id(payload: &RecordPayload) -> Result<RecordId, StoreError> {
    let encoded = bincode::serialize(payload)
        .map_err(|e| StoreError::Backend(format!("Failed to encode payload: {}", e)))?;
    Ok(*blake3::hash(&encoded).as_bytes())
}
