//! Admission Control
//!
//! The oracle seam consulted by `assign_role` before a role assignment may
//! enter the store. The directory only asks a yes/no question; what makes
//! an issuer legitimate is the oracle's business. Ships with an
//! accept-everything oracle for fully trusted communities and a
//! capability-gated policy oracle configured from a TOML document.

use crate::capability::{self, CapabilityLevel, RoleName};
use crate::record::RoleAssignment;
use crate::roles::RoleIndex;
use crate::types::AgentId;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Yes/no oracle deciding whether `caller` may issue an assignment.
pub trait AdmissionControl: Send + Sync {
    fn may_assign(&self, caller: &AgentId, assignment: &RoleAssignment) -> bool;
}

/// Accepts every assignment. Suitable for fully trusted communities and
/// as the default when no policy is configured.
pub struct OpenAdmission;

impl AdmissionControl for OpenAdmission {
    fn may_assign(&self, _caller: &AgentId, _assignment: &RoleAssignment) -> bool {
        true
    }
}

/// Oracle adapter over a plain function. Used by tests and by embedders
/// whose admission logic lives elsewhere.
pub struct FnAdmission<F>(pub F);

impl<F> AdmissionControl for FnAdmission<F>
where
    F: Fn(&AgentId, &RoleAssignment) -> bool + Send + Sync,
{
    fn may_assign(&self, caller: &AgentId, assignment: &RoleAssignment) -> bool {
        (self.0)(caller, assignment)
    }
}

/// Declarative admission policy, loadable from TOML.
///
/// `bootstrap_self_roles` may be self-assigned by an agent that holds no
/// roles at all yet (how a new community seeds its first founder).
/// `grant` maps each role to the minimum capability level an issuer must
/// hold to grant it; roles not listed require `GOVERNANCE`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AdmissionPolicy {
    #[serde(default)]
    pub bootstrap_self_roles: BTreeSet<RoleName>,
    #[serde(default)]
    pub grant: BTreeMap<RoleName, CapabilityLevel>,
}

impl AdmissionPolicy {
    pub fn from_toml_str(document: &str) -> Result<Self, crate::error::DirectoryError> {
        toml::from_str(document).map_err(|e| {
            crate::error::DirectoryError::Config(format!("Failed to parse admission policy: {}", e))
        })
    }

    pub fn load(path: &Path) -> Result<Self, crate::error::DirectoryError> {
        let document = std::fs::read_to_string(path).map_err(|e| {
            crate::error::DirectoryError::Config(format!(
                "Failed to read admission policy {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&document)
    }

    /// Minimum issuer capability required to grant `role`.
    pub fn required_level(&self, role: &RoleName) -> CapabilityLevel {
        self.grant
            .get(role)
            .copied()
            .unwrap_or(CapabilityLevel::Governance)
    }
}

/// Capability-gated oracle backed by the live role index.
///
/// An assignment is admitted when either the assignee is self-assigning a
/// bootstrap role while holding no roles yet, or the issuer's resolved
/// capability level meets the policy minimum for the role being granted.
pub struct PolicyAdmission {
    policy: AdmissionPolicy,
    roles: Arc<RoleIndex>,
}

impl PolicyAdmission {
    pub fn new(policy: AdmissionPolicy, roles: Arc<RoleIndex>) -> Self {
        PolicyAdmission { policy, roles }
    }
}

impl AdmissionControl for PolicyAdmission {
    fn may_assign(&self, caller: &AgentId, assignment: &RoleAssignment) -> bool {
        if caller == &assignment.assignee
            && self.policy.bootstrap_self_roles.contains(&assignment.role_name)
            && self.roles.roles_of(&assignment.assignee).is_empty()
        {
            debug!(
                caller = %caller,
                role = %assignment.role_name,
                "Bootstrap self-assignment admitted"
            );
            return true;
        }

        let held = self.roles.roles_of(caller);
        let caller_level = capability::resolve(&held);
        let required = self.policy.required_level(&assignment.role_name);
        let admitted = caller_level >= required;

        debug!(
            caller = %caller,
            caller_level = %caller_level,
            required = %required,
            role = %assignment.role_name,
            admitted,
            "Admission decision"
        );

        admitted
    }
}
