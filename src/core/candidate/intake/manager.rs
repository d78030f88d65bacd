//! Intake Manager Implementation
//!
//! Manages candidate intake sessions entirely in memory.
//!
//! # Responsibilities
//!
//! - **Lifecycle Management**: Start/get/list/cancel intake sessions
//! - **Validation Gating**: A step's draft merges only after its rule table
//!   accepts it; rejected drafts leave the record untouched
//! - **Navigation**: Free jumps between steps, going back, with all merged
//!   data preserved
//! - **Submission**: Hands the completed record to the injected
//!   [`CandidateCreator`] once every step has validated; the session is
//!   retained if the collaborator fails so submission can be retried
//!
//! # Usage Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use candidate_intake::core::candidate::intake::{IntakeManager, IntakeStep};
//!
//! let manager = IntakeManager::default();
//!
//! let state = manager.start_intake().await;
//! let outcome = manager
//!     .submit_step(&state.id, IntakeStep::BasicInfo, draft)
//!     .await?;
//! ```
//!
//! # Thread Safety
//!
//! Sessions live behind a `tokio::sync::Mutex`, so operations on one manager
//! are serialized; validation and merging run synchronously inside the
//! critical section and nothing in here performs I/O.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::core::candidate::creator::{CandidateCreator, LoggingCreator};
use crate::core::candidate::record::{CandidateRecord, StepDraft};
use crate::core::candidate::schema;

use super::types::{
    IntakeError, IntakeState, IntakeStep, IntakeSummary, StepOutcome, SubmissionResult,
};

fn now() -> String {
    chrono::Utc::now().to_rfc3339()
}

// ============================================================================
// IntakeManager
// ============================================================================

/// Manages the candidate intake state machine.
///
/// # Responsibilities
/// - Track step progression per session
/// - Gate record merges behind per-step validation
/// - Hand completed records to the creation collaborator
/// - Keep failed submissions recoverable
pub struct IntakeManager {
    sessions: Mutex<HashMap<String, IntakeState>>,
    creator: Arc<dyn CandidateCreator>,
}

impl IntakeManager {
    /// Create a manager with the given creation collaborator
    pub fn new(creator: Arc<dyn CandidateCreator>) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            creator,
        }
    }

    // ========================================================================
    // Lifecycle Operations
    // ========================================================================

    /// Start a new intake session.
    ///
    /// The session begins at the first step with an empty record.
    pub async fn start_intake(&self) -> IntakeState {
        let id = uuid::Uuid::new_v4().to_string();
        let state = IntakeState::new(id.clone());

        info!(intake_id = %id, "Starting candidate intake");

        self.sessions.lock().await.insert(id, state.clone());
        state
    }

    /// Get an intake session by ID.
    pub async fn get_intake(&self, intake_id: &str) -> Option<IntakeState> {
        self.sessions.lock().await.get(intake_id).cloned()
    }

    /// List all open intake sessions, most recently updated first.
    ///
    /// Useful for showing "resume" options to the user.
    pub async fn list_open_intakes(&self) -> Vec<IntakeSummary> {
        let sessions = self.sessions.lock().await;

        let mut summaries: Vec<IntakeSummary> = sessions.values().map(IntakeSummary::from).collect();
        summaries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        summaries
    }

    /// Abandon an intake session.
    ///
    /// Drops the session immediately, releasing the record and any attachment
    /// bytes it holds.
    pub async fn cancel_intake(&self, intake_id: &str) -> Result<(), IntakeError> {
        info!(intake_id = %intake_id, "Cancelling intake");

        self.sessions
            .lock()
            .await
            .remove(intake_id)
            .map(|_| ())
            .ok_or_else(|| IntakeError::NotFound(intake_id.to_string()))
    }

    // ========================================================================
    // Step Submission
    // ========================================================================

    /// Submit a step's draft: the single per-step entry point.
    ///
    /// Validates the draft against the step's rule table. On rejection the
    /// record is untouched and every field error is returned. On acceptance
    /// the sanitized draft merges into the record (overwriting that step's
    /// previous values, never removing other steps' fields), the step is
    /// marked completed, and the session advances when the submitted step was
    /// the active one.
    ///
    /// Submitting the final step with every step completed triggers the
    /// hand-off to the creation collaborator; on collaborator failure the
    /// session is retained so submission can be retried.
    pub async fn submit_step(
        &self,
        intake_id: &str,
        step: IntakeStep,
        draft: StepDraft,
    ) -> Result<StepOutcome, IntakeError> {
        let mut sessions = self.sessions.lock().await;
        let state = sessions
            .get_mut(intake_id)
            .ok_or_else(|| IntakeError::NotFound(intake_id.to_string()))?;

        debug!(
            intake_id = %intake_id,
            step = %step,
            field_count = draft.len(),
            "Submitting intake step"
        );

        let sanitized = match schema::schema_for(step).validate(&draft) {
            Ok(sanitized) => sanitized,
            Err(errors) => {
                warn!(
                    intake_id = %intake_id,
                    step = %step,
                    error_count = errors.len(),
                    "Step rejected by validation"
                );
                return Err(IntakeError::Validation { step, errors });
            }
        };

        state.record.merge_step(&sanitized);
        if !state.is_step_completed(step) {
            state.completed_steps.push(step);
        }

        // Advance only past the active step; re-submitting an earlier step
        // leaves the pointer where the user is.
        if step == state.current_step {
            if let Some(next) = step.next() {
                state.current_step = next;
            }
        }
        state.updated_at = now();

        if step != IntakeStep::last() {
            return Ok(StepOutcome::Accepted(state.clone()));
        }

        if !state.is_ready_for_submission() {
            // The final step's own data is merged and kept; submission waits
            // for the remaining steps.
            return Err(IntakeError::StepsIncomplete(state.missing_steps()));
        }

        let record = state.record.clone();
        let result = self.finalize(&mut sessions, intake_id, record).await?;
        Ok(StepOutcome::Submitted(result))
    }

    /// Re-trigger submission after a collaborator failure.
    ///
    /// Requires every step to have validated already; the record is the one
    /// accumulated so far.
    pub async fn submit_candidate(
        &self,
        intake_id: &str,
    ) -> Result<SubmissionResult, IntakeError> {
        let mut sessions = self.sessions.lock().await;
        let state = sessions
            .get(intake_id)
            .ok_or_else(|| IntakeError::NotFound(intake_id.to_string()))?;

        if !state.is_ready_for_submission() {
            return Err(IntakeError::StepsIncomplete(state.missing_steps()));
        }

        let record = state.record.clone();
        self.finalize(&mut sessions, intake_id, record).await
    }

    /// Hand the record to the collaborator; remove the session on success.
    async fn finalize(
        &self,
        sessions: &mut HashMap<String, IntakeState>,
        intake_id: &str,
        record: CandidateRecord,
    ) -> Result<SubmissionResult, IntakeError> {
        match self.creator.create_candidate(&record).await {
            Ok(candidate_id) => {
                sessions.remove(intake_id);
                info!(
                    intake_id = %intake_id,
                    candidate_id = %candidate_id,
                    field_count = record.len(),
                    "Candidate submitted"
                );
                Ok(SubmissionResult {
                    candidate_id,
                    record,
                    submitted_at: now(),
                })
            }
            Err(err) => {
                warn!(
                    intake_id = %intake_id,
                    error = %err,
                    "Candidate creation failed; intake retained"
                );
                Err(IntakeError::Creation(err))
            }
        }
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Jump to any step, preserving all merged data.
    ///
    /// The target step is not re-validated on arrival; validation happens
    /// only when its draft is submitted.
    pub async fn go_to_step(
        &self,
        intake_id: &str,
        step: IntakeStep,
    ) -> Result<IntakeState, IntakeError> {
        let mut sessions = self.sessions.lock().await;
        let state = sessions
            .get_mut(intake_id)
            .ok_or_else(|| IntakeError::NotFound(intake_id.to_string()))?;

        debug!(
            intake_id = %intake_id,
            from = %state.current_step,
            to = %step,
            "Jumping to intake step"
        );

        state.current_step = step;
        state.updated_at = now();

        Ok(state.clone())
    }

    /// Go back to the previous step, preserving data.
    pub async fn go_back(&self, intake_id: &str) -> Result<IntakeState, IntakeError> {
        let mut sessions = self.sessions.lock().await;
        let state = sessions
            .get_mut(intake_id)
            .ok_or_else(|| IntakeError::NotFound(intake_id.to_string()))?;

        let prev = state.current_step.previous().ok_or(IntakeError::AtFirstStep)?;

        debug!(
            intake_id = %intake_id,
            from = %state.current_step,
            to = %prev,
            "Going back in intake"
        );

        state.current_step = prev;
        state.updated_at = now();

        Ok(state.clone())
    }

    // ========================================================================
    // Read Access
    // ========================================================================

    /// Read-only snapshot of the accumulated record, for review screens.
    pub async fn current_record(&self, intake_id: &str) -> Result<CandidateRecord, IntakeError> {
        self.sessions
            .lock()
            .await
            .get(intake_id)
            .map(|state| state.record.clone())
            .ok_or_else(|| IntakeError::NotFound(intake_id.to_string()))
    }
}

impl Default for IntakeManager {
    /// Manager wired to the [`LoggingCreator`]
    fn default() -> Self {
        Self::new(Arc::new(LoggingCreator))
    }
}

// ============================================================================
// Tests
// ============================================================================
