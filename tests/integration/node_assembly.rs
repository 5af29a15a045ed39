//! Assembling a directory node from configuration: durable store plus a
//! capability-gated admission policy.

use crate::support::{agent, assignment, public_profile};
use anyhow::Result;
use commonhold::capability::CapabilityLevel;
use commonhold::config::{ConfigLoader, DirectoryConfig};
use commonhold::directory::DirectoryService;
use commonhold::error::DirectoryError;

const POLICY: &str = r#"
bootstrap_self_roles = ["FOUNDER"]

[grant]
FOUNDER = "GOVERNANCE"
RESOURCE_COORDINATOR = "COORDINATION"
RESOURCE_STEWARD = "STEWARDSHIP"
"#;

fn governed_config(root: &std::path::Path) -> Result<DirectoryConfig> {
    let policy_path = root.join("policy.toml");
    std::fs::write(&policy_path, POLICY)?;

    let config_path = root.join("config.toml");
    std::fs::write(
        &config_path,
        format!(
            "[storage]\ndata_dir = \"{}\"\n\n[admission]\npolicy_file = \"{}\"\n",
            root.join("data").display(),
            policy_path.display()
        ),
    )?;
    Ok(ConfigLoader::load_from_file(&config_path)?)
}

#[test]
fn governed_node_enforces_policy_and_survives_restart() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let config = governed_config(dir.path())?;
    let lynn = agent("lynn");
    let bob = agent("bob");

    {
        let node = DirectoryService::from_config(&config)?;
        node.create_profile(&lynn, public_profile(&lynn, "Lynn"))?;

        // A roleless agent cannot grant, but may bootstrap-found.
        let refused = node.assign_role(&lynn, assignment(&bob, &lynn, "RESOURCE_STEWARD"));
        assert!(matches!(refused, Err(DirectoryError::NotAuthorized(_))));

        node.assign_role(&lynn, assignment(&lynn, &lynn, "FOUNDER"))?;
        assert_eq!(node.get_capability_level(&lynn), CapabilityLevel::Governance);

        // With governance in hand the grant table admits the same call.
        node.assign_role(&lynn, assignment(&bob, &lynn, "RESOURCE_STEWARD"))?;
        assert_eq!(node.get_capability_level(&bob), CapabilityLevel::Stewardship);

        // A steward cannot mint further stewards under this policy.
        let refused = node.assign_role(&bob, assignment(&agent("carol"), &bob, "RESOURCE_STEWARD"));
        assert!(matches!(refused, Err(DirectoryError::NotAuthorized(_))));
    }

    // Reopen from the same configuration: the log replays and the policy
    // sees the replayed roles.
    let node = DirectoryService::from_config(&config)?;
    assert_eq!(node.get_capability_level(&lynn), CapabilityLevel::Governance);
    assert_eq!(node.get_capability_level(&bob), CapabilityLevel::Stewardship);

    let refused = node.assign_role(&bob, assignment(&agent("carol"), &bob, "RESOURCE_COORDINATOR"));
    assert!(matches!(refused, Err(DirectoryError::NotAuthorized(_))));
    Ok(())
}

#[test]
fn default_config_yields_open_memory_node() -> Result<()> {
    let node = DirectoryService::from_config(&DirectoryConfig::default())?;
    let lynn = agent("lynn");
    node.assign_role(&lynn, assignment(&agent("bob"), &lynn, "RESOURCE_COORDINATOR"))?;
    assert_eq!(
        node.get_capability_level(&agent("bob")),
        CapabilityLevel::Coordination
    );
    Ok(())
}
