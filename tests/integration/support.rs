//! Shared helpers for the integration suite.

use commonhold::admission::OpenAdmission;
use commonhold::capability::RoleName;
use commonhold::directory::DirectoryService;
use commonhold::record::{PrivateProfile, PublicProfile, RoleAssignment};
use commonhold::replication::MemoryCluster;
use commonhold::types::AgentId;
use std::sync::Arc;

pub fn agent(id: &str) -> AgentId {
    AgentId::new(id)
}

pub fn open_replica() -> Arc<DirectoryService> {
    Arc::new(DirectoryService::new(Arc::new(OpenAdmission)))
}

/// Two open replicas wired into a cluster: (cluster, lynn's, bob's).
pub fn two_replica_cluster() -> (MemoryCluster, Arc<DirectoryService>, Arc<DirectoryService>) {
    let cluster = MemoryCluster::new();
    let lynn = open_replica();
    let bob = open_replica();
    cluster.register(agent("lynn"), lynn.clone());
    cluster.register(agent("bob"), bob.clone());
    (cluster, lynn, bob)
}

pub fn public_profile(owner: &AgentId, name: &str) -> PublicProfile {
    PublicProfile {
        owner: owner.clone(),
        name: name.to_string(),
        avatar_url: Some(format!("https://avatars.example.org/{}.png", owner)),
    }
}

pub fn private_profile(owner: &AgentId, legal_name: &str) -> PrivateProfile {
    PrivateProfile {
        owner: owner.clone(),
        legal_name: legal_name.to_string(),
        email: format!("{}@example.org", owner),
        phone: Some("555-0100".to_string()),
        address: Some("12 Commons Lane".to_string()),
        emergency_contact: Some("Sam Field".to_string()),
        time_zone: Some("America/Halifax".to_string()),
        location: None,
    }
}

pub fn assignment(assignee: &AgentId, issuer: &AgentId, role: &str) -> RoleAssignment {
    RoleAssignment {
        assignee: assignee.clone(),
        assigned_by: issuer.clone(),
        role_name: RoleName::parse(role),
        description: format!("{} grant for {}", role, assignee),
    }
}
