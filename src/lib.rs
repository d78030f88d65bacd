//! Candidate Intake - Multi-Step Applicant Intake Core
//!
//! Core library providing the candidate intake state machine for
//! applicant-tracking hosts: per-step schema validation, cumulative
//! record merging, and submission to a host-supplied creation
//! collaborator.

pub mod core;

#[cfg(test)]
mod tests;

pub use crate::core::candidate::creator::{
    CandidateCreator, CandidateId, CreateError, LoggingCreator,
};
pub use crate::core::candidate::intake::{
    IntakeError, IntakeManager, IntakeState, IntakeStep, IntakeSummary, StepOutcome,
    SubmissionResult,
};
pub use crate::core::candidate::record::{Attachment, CandidateRecord, FieldValue, StepDraft};
pub use crate::core::validation::{FieldError, StepSchema};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
