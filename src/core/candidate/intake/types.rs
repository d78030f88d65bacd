//! Intake Domain Types
//!
//! Defines the core domain types for the candidate intake flow:
//! - [`IntakeStep`]: the fixed, ordered step sequence
//! - [`IntakeState`]: one open intake session and its accumulated record
//! - [`StepOutcome`] / [`SubmissionResult`]: what accepting a step produces
//! - [`IntakeError`]: error types for intake operations
//!
//! # Architecture
//!
//! The intake uses a state machine pattern: each step collects its own field
//! set, a step's draft is validated before its fields merge into the shared
//! [`CandidateRecord`], and submission fires only once the last step has
//! validated with every step completed at least once. Navigation between
//! steps is free (the host UI exposes direct tab selection), so arriving at
//! a step never re-validates it; only advancing past it does.

use serde::{Deserialize, Serialize};

use crate::core::candidate::creator::{CandidateId, CreateError};
use crate::core::candidate::record::CandidateRecord;
use crate::core::validation::FieldError;

// ============================================================================
// IntakeStep
// ============================================================================

/// One stage of the intake flow, in fixed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntakeStep {
    #[serde(rename = "basic_info")]
    BasicInfo,
    #[serde(rename = "edu_info")]
    Education,
    #[serde(rename = "past_exp")]
    Experience,
}

impl IntakeStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntakeStep::BasicInfo => "basic_info",
            IntakeStep::Education => "edu_info",
            IntakeStep::Experience => "past_exp",
        }
    }

    /// Every step, in flow order
    pub fn all() -> [IntakeStep; 3] {
        [
            IntakeStep::BasicInfo,
            IntakeStep::Education,
            IntakeStep::Experience,
        ]
    }

    pub fn first() -> Self {
        IntakeStep::BasicInfo
    }

    pub fn last() -> Self {
        IntakeStep::Experience
    }

    /// Get the next step in the flow (None if at the end)
    pub fn next(&self) -> Option<Self> {
        match self {
            IntakeStep::BasicInfo => Some(IntakeStep::Education),
            IntakeStep::Education => Some(IntakeStep::Experience),
            IntakeStep::Experience => None,
        }
    }

    /// Get the previous step in the flow (None if at the beginning)
    pub fn previous(&self) -> Option<Self> {
        match self {
            IntakeStep::BasicInfo => None,
            IntakeStep::Education => Some(IntakeStep::BasicInfo),
            IntakeStep::Experience => Some(IntakeStep::Education),
        }
    }
}

impl std::fmt::Display for IntakeStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for IntakeStep {
    type Error = IntakeError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "basic_info" => Ok(IntakeStep::BasicInfo),
            "edu_info" => Ok(IntakeStep::Education),
            "past_exp" => Ok(IntakeStep::Experience),
            _ => Err(IntakeError::UnknownStep(s.to_string())),
        }
    }
}

// ============================================================================
// IntakeState
// ============================================================================

/// One open intake session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntakeState {
    /// Unique session identifier
    pub id: String,
    /// Currently active step
    pub current_step: IntakeStep,
    /// Steps whose drafts have validated and merged at least once
    pub completed_steps: Vec<IntakeStep>,
    /// Accumulated candidate record
    pub record: CandidateRecord,
    /// Creation timestamp
    pub created_at: String,
    /// Last update timestamp
    pub updated_at: String,
}

impl IntakeState {
    /// Create a new session at the first step with an empty record
    pub fn new(id: String) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id,
            current_step: IntakeStep::first(),
            completed_steps: Vec::new(),
            record: CandidateRecord::new(),
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Check if a step has been completed
    pub fn is_step_completed(&self, step: IntakeStep) -> bool {
        self.completed_steps.contains(&step)
    }

    /// Steps that have not validated yet, in flow order
    pub fn missing_steps(&self) -> Vec<IntakeStep> {
        IntakeStep::all()
            .into_iter()
            .filter(|step| !self.is_step_completed(*step))
            .collect()
    }

    /// True once every step has validated at least once
    pub fn is_ready_for_submission(&self) -> bool {
        self.missing_steps().is_empty()
    }

    /// Get progress percentage (0-100)
    pub fn progress_percent(&self) -> u8 {
        let total = IntakeStep::all().len();
        let completed = self.completed_steps.len().min(total);
        ((completed as f32 / total as f32) * 100.0) as u8
    }
}

/// Summary of an open intake session for listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntakeSummary {
    pub id: String,
    pub candidate_name: Option<String>,
    pub current_step: IntakeStep,
    pub progress_percent: u8,
    pub updated_at: String,
}

impl From<&IntakeState> for IntakeSummary {
    fn from(state: &IntakeState) -> Self {
        Self {
            id: state.id.clone(),
            candidate_name: state.record.display_name(),
            current_step: state.current_step,
            progress_percent: state.progress_percent(),
            updated_at: state.updated_at.clone(),
        }
    }
}

// ============================================================================
// Submission
// ============================================================================

/// Produced exactly once per session, when the completed record has been
/// handed to the creation collaborator. The record snapshot is immutable;
/// the session it came from is gone by the time the caller sees this.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionResult {
    pub candidate_id: CandidateId,
    pub record: CandidateRecord,
    pub submitted_at: String,
}

/// What accepting a step draft produced.
#[derive(Debug, Clone)]
pub enum StepOutcome {
    /// Draft merged; more work remains in the session
    Accepted(IntakeState),
    /// Final step merged and every step validated; candidate handed off
    Submitted(SubmissionResult),
}

impl StepOutcome {
    /// The submission result, if this outcome finished the intake
    pub fn submission(&self) -> Option<&SubmissionResult> {
        match self {
            StepOutcome::Accepted(_) => None,
            StepOutcome::Submitted(result) => Some(result),
        }
    }
}

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur during intake operations
#[derive(Debug, Clone, thiserror::Error)]
pub enum IntakeError {
    #[error("Intake session not found: {0}")]
    NotFound(String),

    #[error("Unknown intake step: {0}")]
    UnknownStep(String),

    #[error("Validation failed for step {step}")]
    Validation {
        step: IntakeStep,
        errors: Vec<FieldError>,
    },

    #[error("Already at the first step")]
    AtFirstStep,

    #[error("Intake is not complete; unfinished steps: {0:?}")]
    StepsIncomplete(Vec<IntakeStep>),

    #[error("Candidate creation failed: {0}")]
    Creation(#[from] CreateError),
}

impl IntakeError {
    /// Field errors carried by a validation failure
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            IntakeError::Validation { errors, .. } => errors,
            _ => &[],
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
