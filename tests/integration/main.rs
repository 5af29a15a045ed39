//! Integration tests for the member directory.

mod support;

mod capability_agreement;
mod node_assembly;
mod privacy_boundaries;
