//! Candidate Intake Integration Tests
//!
//! Comprehensive tests for the intake state machine flow.
//!
//! # Test Categories
//!
//! ## Happy Path
//! - Complete three-step flow ending in submission
//! - Sparse optional fields excluded from the record
//!
//! ## Gating and Navigation
//! - Rejected drafts leave the record untouched
//! - Jumps and go-back preserve merged data
//! - Revisiting a step overwrites its own fields only
//!
//! ## Submission Sequencing
//! - Submission requires every step to have validated
//! - Collaborator failure keeps the session for retry

use std::sync::Arc;

use crate::core::candidate::creator::{CandidateId, CreateError, MockCandidateCreator};
use crate::core::candidate::intake::{IntakeError, IntakeManager, IntakeStep, StepOutcome};
use crate::core::candidate::record::{FieldValue, StepDraft};

// ============================================================================
// Test Helpers
// ============================================================================

fn draft(fields: &[(&str, &str)]) -> StepDraft {
    fields
        .iter()
        .map(|(k, v)| (k.to_string(), FieldValue::text(*v)))
        .collect()
}

fn basic_info_draft() -> StepDraft {
    draft(&[
        ("firstName", "Jon"),
        ("lastName", "Doe"),
        ("email", "jon@x.com"),
        ("phone", "01712345678"),
    ])
}

fn edu_info_draft() -> StepDraft {
    draft(&[
        ("examName", "SSC"),
        ("institution", "ABC"),
        ("roll", "12"),
        ("registrationNo", "34"),
        ("result", "A+"),
        ("passingYear", "2015"),
    ])
}

fn past_exp_draft() -> StepDraft {
    draft(&[
        ("companyName", "Acme"),
        ("designation", "Dev"),
        ("joiningDate", "2020-01-01"),
        ("yearsOfExp", "3"),
    ])
}

/// Unwrap an outcome expected to keep the session open
fn accepted(outcome: StepOutcome) -> crate::core::candidate::intake::IntakeState {
    match outcome {
        StepOutcome::Accepted(state) => state,
        StepOutcome::Submitted(result) => {
            panic!("unexpected submission: {:?}", result.candidate_id)
        }
    }
}

// ============================================================================
// Happy Path
// ============================================================================

#[tokio::test]
async fn test_complete_intake_flow() {
    let manager = IntakeManager::default();
    let state = manager.start_intake().await;
    let intake_id = state.id.clone();

    assert_eq!(state.current_step, IntakeStep::BasicInfo);
    assert!(state.completed_steps.is_empty());

    // 1. Basic information
    let state = accepted(
        manager
            .submit_step(&intake_id, IntakeStep::BasicInfo, basic_info_draft())
            .await
            .expect("basic info should validate"),
    );
    assert_eq!(state.current_step, IntakeStep::Education);
    assert_eq!(state.record.len(), 4);

    // 2. Educational information
    let state = accepted(
        manager
            .submit_step(&intake_id, IntakeStep::Education, edu_info_draft())
            .await
            .expect("education should validate"),
    );
    assert_eq!(state.current_step, IntakeStep::Experience);
    assert_eq!(state.record.len(), 10);

    // 3. Past experience, expireDate omitted: submission fires
    let outcome = manager
        .submit_step(&intake_id, IntakeStep::Experience, past_exp_draft())
        .await
        .expect("experience should validate");

    let result = outcome.submission().expect("final step should submit").clone();
    assert_eq!(result.record.len(), 14);
    assert!(!result.record.contains("expireDate"));
    assert_eq!(
        result.record.get("firstName").and_then(FieldValue::as_text),
        Some("Jon")
    );

    // Session is cleaned up after submission
    assert!(manager.get_intake(&intake_id).await.is_none());
}

#[tokio::test]
async fn test_sparse_optionals_excluded_from_record() {
    let manager = IntakeManager::default();
    let state = manager.start_intake().await;

    let mut input = basic_info_draft();
    input.insert("ssn".to_string(), FieldValue::text(""));
    input.insert("zipCode".to_string(), FieldValue::text(""));
    input.insert("city".to_string(), FieldValue::text("Dhaka"));

    let updated = accepted(
        manager
            .submit_step(&state.id, IntakeStep::BasicInfo, input)
            .await
            .expect("draft should validate"),
    );

    assert_eq!(updated.record.len(), 5);
    assert!(!updated.record.contains("ssn"));
    assert!(!updated.record.contains("zipCode"));
    assert!(updated.record.contains("city"));
}

// ============================================================================
// Gating and Navigation
// ============================================================================

#[tokio::test]
async fn test_missing_required_field_blocks_step() {
    let manager = IntakeManager::default();
    let state = manager.start_intake().await;

    let mut input = basic_info_draft();
    input.shift_remove("email");

    let err = manager
        .submit_step(&state.id, IntakeStep::BasicInfo, input)
        .await
        .unwrap_err();

    let fields: Vec<&str> = err.field_errors().iter().map(|e| e.field.as_str()).collect();
    assert_eq!(fields, vec!["email"]);

    // Record untouched, step not completed, pointer unmoved
    let current = manager.get_intake(&state.id).await.expect("session exists");
    assert!(current.record.is_empty());
    assert!(current.completed_steps.is_empty());
    assert_eq!(current.current_step, IntakeStep::BasicInfo);
}

#[tokio::test]
async fn test_navigation_preserves_merged_data() {
    let manager = IntakeManager::default();
    let state = manager.start_intake().await;
    let intake_id = state.id.clone();

    manager
        .submit_step(&intake_id, IntakeStep::BasicInfo, basic_info_draft())
        .await
        .expect("basic info should validate");
    manager
        .submit_step(&intake_id, IntakeStep::Education, edu_info_draft())
        .await
        .expect("education should validate");

    // Jump straight back to the first tab; nothing is re-validated on arrival
    let state = manager
        .go_to_step(&intake_id, IntakeStep::BasicInfo)
        .await
        .expect("jump should succeed");
    assert_eq!(state.current_step, IntakeStep::BasicInfo);
    assert_eq!(state.record.len(), 10);

    // And forward again via go_back from Education's successor
    let state = manager
        .go_to_step(&intake_id, IntakeStep::Experience)
        .await
        .expect("jump should succeed");
    let state_back = manager.go_back(&intake_id).await.expect("go_back");
    assert_eq!(state_back.current_step, IntakeStep::Education);
    assert_eq!(state.record, state_back.record);
}

#[tokio::test]
async fn test_revisiting_step_overwrites_own_fields_only() {
    let manager = IntakeManager::default();
    let state = manager.start_intake().await;
    let intake_id = state.id.clone();

    manager
        .submit_step(&intake_id, IntakeStep::BasicInfo, basic_info_draft())
        .await
        .expect("basic info should validate");
    manager
        .submit_step(&intake_id, IntakeStep::Education, edu_info_draft())
        .await
        .expect("education should validate");

    // Back to basic info with a corrected name
    manager
        .go_to_step(&intake_id, IntakeStep::BasicInfo)
        .await
        .expect("jump should succeed");

    let mut corrected = basic_info_draft();
    corrected.insert("firstName".to_string(), FieldValue::text("Jane"));

    let updated = accepted(
        manager
            .submit_step(&intake_id, IntakeStep::BasicInfo, corrected)
            .await
            .expect("corrected draft should validate"),
    );

    assert_eq!(updated.record.len(), 10);
    assert_eq!(
        updated.record.get("firstName").and_then(FieldValue::as_text),
        Some("Jane")
    );
    assert!(updated.record.contains("examName"));

    // Earlier-step revisit still permits final submission
    let outcome = manager
        .submit_step(&intake_id, IntakeStep::Experience, past_exp_draft())
        .await
        .expect("experience should validate");
    assert!(outcome.submission().is_some());
}

// ============================================================================
// Submission Sequencing
// ============================================================================

#[tokio::test]
async fn test_submission_requires_every_step() {
    let manager = IntakeManager::default();
    let state = manager.start_intake().await;
    let intake_id = state.id.clone();

    // Jump straight to the last tab and submit it first
    manager
        .go_to_step(&intake_id, IntakeStep::Experience)
        .await
        .expect("jump should succeed");

    let err = manager
        .submit_step(&intake_id, IntakeStep::Experience, past_exp_draft())
        .await
        .unwrap_err();
    match err {
        IntakeError::StepsIncomplete(missing) => {
            assert_eq!(missing, vec![IntakeStep::BasicInfo, IntakeStep::Education]);
        }
        other => panic!("expected StepsIncomplete, got {other:?}"),
    }

    // The final step's own data was merged and kept
    let record = manager.current_record(&intake_id).await.expect("session exists");
    assert_eq!(record.len(), 4);
    assert!(record.contains("companyName"));

    // Fill in the remaining steps, then retrigger submission explicitly
    manager
        .submit_step(&intake_id, IntakeStep::BasicInfo, basic_info_draft())
        .await
        .expect("basic info should validate");
    manager
        .submit_step(&intake_id, IntakeStep::Education, edu_info_draft())
        .await
        .expect("education should validate");

    let result = manager
        .submit_candidate(&intake_id)
        .await
        .expect("all steps validated; submission should fire");
    assert_eq!(result.record.len(), 14);
    assert!(manager.get_intake(&intake_id).await.is_none());
}

#[tokio::test]
async fn test_creator_failure_keeps_record_for_retry() {
    let mut creator = MockCandidateCreator::new();
    let mut seq = mockall::Sequence::new();
    creator
        .expect_create_candidate()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Err(CreateError::Unavailable("service down".to_string())));
    creator
        .expect_create_candidate()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(CandidateId("cand-42".to_string())));

    let manager = IntakeManager::new(Arc::new(creator));
    let state = manager.start_intake().await;
    let intake_id = state.id.clone();

    manager
        .submit_step(&intake_id, IntakeStep::BasicInfo, basic_info_draft())
        .await
        .expect("basic info should validate");
    manager
        .submit_step(&intake_id, IntakeStep::Education, edu_info_draft())
        .await
        .expect("education should validate");

    // First hand-off fails; nothing is lost
    let err = manager
        .submit_step(&intake_id, IntakeStep::Experience, past_exp_draft())
        .await
        .unwrap_err();
    assert!(matches!(err, IntakeError::Creation(_)));

    let retained = manager.get_intake(&intake_id).await.expect("session retained");
    assert_eq!(retained.record.len(), 14);

    // Retry succeeds and cleans up
    let result = manager
        .submit_candidate(&intake_id)
        .await
        .expect("retry should succeed");
    assert_eq!(result.candidate_id, CandidateId("cand-42".to_string()));
    assert!(manager.get_intake(&intake_id).await.is_none());
}

#[tokio::test]
async fn test_cancel_discards_session() {
    let manager = IntakeManager::default();
    let state = manager.start_intake().await;

    manager
        .submit_step(&state.id, IntakeStep::BasicInfo, basic_info_draft())
        .await
        .expect("basic info should validate");

    manager.cancel_intake(&state.id).await.expect("cancel");

    assert!(manager.get_intake(&state.id).await.is_none());
    assert!(matches!(
        manager.current_record(&state.id).await,
        Err(IntakeError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_list_open_intakes() {
    let manager = IntakeManager::default();
    let first = manager.start_intake().await;
    let second = manager.start_intake().await;

    manager
        .submit_step(&second.id, IntakeStep::BasicInfo, basic_info_draft())
        .await
        .expect("basic info should validate");

    let summaries = manager.list_open_intakes().await;
    assert_eq!(summaries.len(), 2);

    let named = summaries
        .iter()
        .find(|s| s.id == second.id)
        .expect("second session listed");
    assert_eq!(named.candidate_name, Some("Jon Doe".to_string()));
    assert_eq!(named.progress_percent, 33);

    let unnamed = summaries
        .iter()
        .find(|s| s.id == first.id)
        .expect("first session listed");
    assert_eq!(unnamed.candidate_name, None);
}
