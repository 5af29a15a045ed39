//! Commonhold: Community Member Directory
//!
//! A privacy-partitioned member directory over a peer-replicated,
//! eventually-consistent record store. Every participant runs a local
//! replica; profiles carry a public part and an owner-only private part,
//! roles are granted by members to members, and a capability level is
//! derived deterministically from the roles an agent holds: the same
//! answer on every replica once their record sets agree.

pub mod admission;
pub mod capability;
pub mod config;
pub mod directory;
pub mod error;
pub mod heads;
pub mod logging;
pub mod record;
pub mod replication;
pub mod roles;
pub mod store;
pub mod types;
pub mod visibility;
