//! Capability Resolution
//!
//! Maps the set of roles an agent holds to a single capability level using
//! a fixed precedence table. The resolver is a pure max-reduction: it is
//! commutative and idempotent over its input set, so every replica computes
//! the same level once it has observed the same role set, regardless of the
//! order assignment records arrived in.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A role name held by an agent.
///
/// Open enumeration: the three known names carry capability weight, while
/// any other name is stored and displayed verbatim but resolves to no
/// capability. Serialized as the canonical string token.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RoleName {
    Founder,
    ResourceCoordinator,
    ResourceSteward,
    /// Unrecognized role name, preserved verbatim.
    Other(String),
}

impl RoleName {
    /// Parse a role token. Never fails: unknown tokens become `Other`.
    pub fn parse(token: &str) -> Self {
        match token {
            "FOUNDER" => RoleName::Founder,
            "RESOURCE_COORDINATOR" => RoleName::ResourceCoordinator,
            "RESOURCE_STEWARD" => RoleName::ResourceSteward,
            other => RoleName::Other(other.to_string()),
        }
    }

    /// Canonical string token for this role.
    pub fn as_str(&self) -> &str {
        match self {
            RoleName::Founder => "FOUNDER",
            RoleName::ResourceCoordinator => "RESOURCE_COORDINATOR",
            RoleName::ResourceSteward => "RESOURCE_STEWARD",
            RoleName::Other(name) => name,
        }
    }
}

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for RoleName {
    fn from(token: String) -> Self {
        RoleName::parse(&token)
    }
}

impl From<RoleName> for String {
    fn from(role: RoleName) -> Self {
        role.as_str().to_string()
    }
}

/// Derived classification of an agent's authority.
///
/// Strictly ordered: `None < Stewardship < Coordination < Governance`.
/// Never stored; always recomputed from the currently held role set.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(try_from = "String", into = "String")]
pub enum CapabilityLevel {
    #[default]
    None,
    Stewardship,
    Coordination,
    Governance,
}

impl CapabilityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            CapabilityLevel::None => "NONE",
            CapabilityLevel::Stewardship => "STEWARDSHIP",
            CapabilityLevel::Coordination => "COORDINATION",
            CapabilityLevel::Governance => "GOVERNANCE",
        }
    }
}

impl fmt::Display for CapabilityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for CapabilityLevel {
    type Error = String;

    fn try_from(token: String) -> Result<Self, Self::Error> {
        match token.as_str() {
            "NONE" => Ok(CapabilityLevel::None),
            "STEWARDSHIP" => Ok(CapabilityLevel::Stewardship),
            "COORDINATION" => Ok(CapabilityLevel::Coordination),
            "GOVERNANCE" => Ok(CapabilityLevel::Governance),
            other => Err(format!(
                "Invalid capability level: {} (must be NONE, STEWARDSHIP, COORDINATION, or GOVERNANCE)",
                other
            )),
        }
    }
}

impl From<CapabilityLevel> for String {
    fn from(level: CapabilityLevel) -> Self {
        level.as_str().to_string()
    }
}

/// Role precedence table, highest capability first.
///
/// An ordered lookup, not a dispatch hierarchy. Names absent from this
/// table contribute nothing to the resolved level.
pub const ROLE_PRECEDENCE: &[(&str, CapabilityLevel)] = &[
    ("FOUNDER", CapabilityLevel::Governance),
    ("RESOURCE_COORDINATOR", CapabilityLevel::Coordination),
    ("RESOURCE_STEWARD", CapabilityLevel::Stewardship),
];

/// Capability level a single role confers.
pub fn level_for(role: &RoleName) -> CapabilityLevel {
    ROLE_PRECEDENCE
        .iter()
        .find(|(token, _)| *token == role.as_str())
        .map(|(_, level)| *level)
        .unwrap_or(CapabilityLevel::None)
}

/// Resolve a set of held roles to a capability level.
///
/// Returns the maximum level conferred by any role in the set. Capability
/// is not additive: holding both steward and coordinator roles yields
/// `Coordination`, not a combined value. An empty set, or one containing
/// only unrecognized names, yields `None`.
pub fn resolve<'a, I>(roles: I) -> CapabilityLevel
where
    I: IntoIterator<Item = &'a RoleName>,
{
    roles
        .into_iter()
        .map(level_for)
        .max()
        .unwrap_or(CapabilityLevel::None)
}
