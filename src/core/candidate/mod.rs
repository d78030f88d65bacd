//! Candidate Domain
//!
//! Everything specific to candidate intake: the record and its field values,
//! the per-step validation rule tables, the intake state machine, and the
//! creation boundary handed the finished record.

pub mod creator;
pub mod intake;
pub mod record;
pub mod schema;
