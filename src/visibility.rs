//! Visibility Filter
//!
//! Decides, per record, which view a requesting agent receives. This is the
//! single enforcement point for the privacy partition: every directory read
//! path routes each record through `reveal` individually, including list
//! queries, so a private record is omitted entirely rather than masked
//! somewhere lower in the stack.
//!
//! Rule table:
//! - public profile: full view for everyone
//! - private profile: full view for the owner, absent for anyone else
//! - role assignment: full view for everyone (roles are public)

use crate::record::{Record, RecordPayload};
use crate::types::AgentId;

/// Reveal a record to a requesting agent. `None` means the record is
/// absent from the requester's vantage point, not an error.
pub fn reveal(record: &Record, requester: &AgentId) -> Option<Record> {
    reveal_payload(&record.payload, requester).map(|payload| Record {
        record_id: record.record_id,
        author: record.author.clone(),
        payload,
    })
}

/// Payload-level filter used by reads that have already unwrapped the
/// record envelope.
pub fn reveal_payload(payload: &RecordPayload, requester: &AgentId) -> Option<RecordPayload> {
    match payload {
        RecordPayload::PrivateProfile(profile) if &profile.owner != requester => None,
        visible => Some(visible.clone()),
    }
}
