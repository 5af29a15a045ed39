//! Directory Service
//!
//! The façade callers use: profile writes, role assignment, and every read
//! query over the member directory. Composes the record store, the role
//! index, the visibility filter, and the admission oracle. All reads route
//! each record through the visibility filter individually; there is no raw
//! store read on any query path.

use crate::admission::{AdmissionControl, AdmissionPolicy, OpenAdmission, PolicyAdmission};
use crate::capability::{self, CapabilityLevel, RoleName};
use crate::config::DirectoryConfig;
use crate::error::DirectoryError;
use crate::record::{
    PrivateProfile, PublicProfile, Record, RecordKind, RecordPayload, RoleAssignment,
};
use crate::roles::RoleIndex;
use crate::store::RecordStore;
use crate::types::{AgentId, RecordId};
use crate::visibility;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// A member's profile from one requester's vantage point. Either part may
/// be absent: the record may not exist, or the requester may not be
/// entitled to see it. Absence is a normal state, never an error.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileView {
    pub public: Option<PublicProfile>,
    pub private: Option<PrivateProfile>,
}

/// Member directory façade over one local replica.
pub struct DirectoryService {
    store: Arc<RecordStore>,
    roles: Arc<RoleIndex>,
    admission: Arc<dyn AdmissionControl>,
}

impl DirectoryService {
    /// Directory over a fresh in-memory store.
    pub fn new(admission: Arc<dyn AdmissionControl>) -> Self {
        DirectoryService {
            store: Arc::new(RecordStore::new()),
            roles: Arc::new(RoleIndex::new()),
            admission,
        }
    }

    /// Directory over an existing store (e.g. one replayed from a durable
    /// log). The role index is recomputed from the store's history.
    pub fn with_store(store: Arc<RecordStore>, admission: Arc<dyn AdmissionControl>) -> Self {
        let roles = Arc::new(RoleIndex::rebuild_from(&store));
        DirectoryService {
            store,
            roles,
            admission,
        }
    }

    /// Assemble a directory node from configuration: durable or in-memory
    /// store, and the configured admission policy wired to the live role
    /// index. No policy file means the open oracle.
    pub fn from_config(config: &DirectoryConfig) -> Result<Self, DirectoryError> {
        let store = match &config.storage.data_dir {
            Some(dir) => {
                let log = Arc::new(crate::store::persistence::SledRecordLog::open(dir)?);
                Arc::new(RecordStore::with_log(log)?)
            }
            None => Arc::new(RecordStore::new()),
        };
        let roles = Arc::new(RoleIndex::rebuild_from(&store));
        let admission: Arc<dyn AdmissionControl> = match &config.admission.policy_file {
            Some(path) => {
                let policy = AdmissionPolicy::load(path)?;
                Arc::new(PolicyAdmission::new(policy, roles.clone()))
            }
            None => Arc::new(OpenAdmission),
        };
        Ok(DirectoryService {
            store,
            roles,
            admission,
        })
    }

    /// The live role index, shared so an admission oracle can consult it.
    pub fn role_index(&self) -> Arc<RoleIndex> {
        self.roles.clone()
    }

    /// Store or update the caller's public profile.
    pub fn create_profile(
        &self,
        caller: &AgentId,
        profile: PublicProfile,
    ) -> Result<RecordId, DirectoryError> {
        if &profile.owner != caller {
            return Err(DirectoryError::NotSelf(format!(
                "{} may not write a profile owned by {}",
                caller, profile.owner
            )));
        }
        let record = Record::new(caller.clone(), RecordPayload::PublicProfile(profile))?;
        let record_id = self.store.put(record)?;
        info!(owner = %caller, "Public profile stored");
        Ok(record_id)
    }

    /// Store or update the caller's private profile data.
    pub fn store_private_data(
        &self,
        caller: &AgentId,
        data: PrivateProfile,
    ) -> Result<RecordId, DirectoryError> {
        if &data.owner != caller {
            return Err(DirectoryError::NotSelf(format!(
                "{} may not write private data owned by {}",
                caller, data.owner
            )));
        }
        let record = Record::new(caller.clone(), RecordPayload::PrivateProfile(data))?;
        let record_id = self.store.put(record)?;
        info!(owner = %caller, "Private profile stored");
        Ok(record_id)
    }

    /// The caller's own profile, both parts. Private data is present iff
    /// the caller has stored it.
    pub fn get_my_profile(&self, caller: &AgentId) -> ProfileView {
        self.profile_view(caller, caller)
    }

    /// Another member's profile from the caller's vantage point. The
    /// private part is absent unless `target == caller`.
    pub fn get_person_profile(&self, caller: &AgentId, target: &AgentId) -> ProfileView {
        self.profile_view(caller, target)
    }

    fn profile_view(&self, caller: &AgentId, target: &AgentId) -> ProfileView {
        let public = self
            .store
            .latest_for_owner(RecordKind::PublicProfile, target)
            .and_then(|record| visibility::reveal(&record, caller))
            .and_then(|record| match record.payload {
                RecordPayload::PublicProfile(profile) => Some(profile),
                _ => None,
            });

        let private = self
            .store
            .latest_for_owner(RecordKind::PrivateProfile, target)
            .and_then(|record| visibility::reveal(&record, caller))
            .and_then(|record| match record.payload {
                RecordPayload::PrivateProfile(profile) => Some(profile),
                _ => None,
            });

        ProfileView { public, private }
    }

    /// Every member with a public profile: one entry per distinct owner,
    /// most recent record per owner, each record filtered individually.
    pub fn get_all_persons(&self, caller: &AgentId) -> Vec<PublicProfile> {
        self.store
            .owners_with(RecordKind::PublicProfile)
            .into_iter()
            .filter_map(|owner| {
                self.store
                    .latest_for_owner(RecordKind::PublicProfile, &owner)
            })
            .filter_map(|record| visibility::reveal(&record, caller))
            .filter_map(|record| match record.payload {
                RecordPayload::PublicProfile(profile) => Some(profile),
                _ => None,
            })
            .collect()
    }

    /// Assign a role. The caller must be the issuer, and the admission
    /// oracle must accept; only then does the record reach the store and
    /// the role index.
    pub fn assign_role(
        &self,
        caller: &AgentId,
        assignment: RoleAssignment,
    ) -> Result<RecordId, DirectoryError> {
        if &assignment.assigned_by != caller {
            return Err(DirectoryError::NotSelf(format!(
                "{} may not issue an assignment attributed to {}",
                caller, assignment.assigned_by
            )));
        }
        if !self.admission.may_assign(caller, &assignment) {
            warn!(
                caller = %caller,
                assignee = %assignment.assignee,
                role = %assignment.role_name,
                "Role assignment refused by admission control"
            );
            return Err(DirectoryError::NotAuthorized(format!(
                "{} may not assign {} to {}",
                caller, assignment.role_name, assignment.assignee
            )));
        }

        let record = Record::new(caller.clone(), RecordPayload::RoleAssignment(assignment))?;
        let record_id = self.store.put(record.clone())?;
        self.roles.apply(&record);
        info!(
            assignee = %record.payload.owner(),
            issuer = %caller,
            "Role assignment accepted"
        );
        Ok(record_id)
    }

    /// Every grant held by `target`, in arrival order, each with its
    /// issuer. Roles are public; no filtering applies.
    pub fn get_person_roles(&self, target: &AgentId) -> Vec<RoleAssignment> {
        self.roles.assignments_of(target)
    }

    /// Whether `target` currently holds `role_name`.
    pub fn has_role_capability(&self, target: &AgentId, role_name: &RoleName) -> bool {
        self.roles.has_role(target, role_name)
    }

    /// Capability level derived from the target's current role set.
    pub fn get_capability_level(&self, target: &AgentId) -> CapabilityLevel {
        let held = self.roles.roles_of(target);
        capability::resolve(&held)
    }

    /// Accept a foreign record pushed by the replication collaborator.
    ///
    /// This is transport plumbing, not a member query path: records arrive
    /// here unordered from peers, are validated and stored idempotently,
    /// and the role index is updated. A record for an agent with no
    /// profile yet is fine; reads simply report the profile absent.
    pub fn ingest(&self, record: Record) -> Result<RecordId, DirectoryError> {
        let record_id = self.store.put(record.clone())?;
        self.roles.apply(&record);
        debug!(record_id = %record.short_id(), origin = %record.author, "Foreign record ingested");
        Ok(record_id)
    }

    /// Records this replica shares with peers. Private profiles never
    /// leave their owner's replica, so they are excluded here; the
    /// visibility filter still guards every query path independently.
    pub fn replication_snapshot(&self) -> Vec<Record> {
        let mut records = Vec::new();
        for kind in [RecordKind::PublicProfile, RecordKind::RoleAssignment] {
            records.extend(self.store.get_all(kind));
        }
        records
    }

    /// Ids of the shared-scope records, for convergence comparison.
    pub fn shared_record_ids(&self) -> Vec<RecordId> {
        let mut ids: Vec<RecordId> = self
            .replication_snapshot()
            .into_iter()
            .map(|record| record.record_id)
            .collect();
        ids.sort();
        ids
    }
}
