//! Declarative Field Validation Engine
//!
//! One uniform evaluator for per-step rule tables. A [`StepSchema`] is an
//! ordered list of [`FieldRule`]s; each rule names a field, its human label,
//! whether it is required, the value kind it expects, and an ordered list of
//! [`Check`]s. Evaluation runs presence/kind first, then every check, over
//! every field; it never stops at the first failure, so the caller can show
//! all field messages at once.
//!
//! On success the engine returns a sanitized draft: rule fields only (unknown
//! keys are stripped), in rule order, with empty optional values dropped so
//! that absent beats empty downstream.

mod checks;

pub use checks::{
    Check, DateBound, ACCEPTED_IMAGE_TYPES, MAX_ATTACHMENT_BYTES, MAX_ATTACHMENT_MB, YEAR_FLOOR,
};

use serde::{Deserialize, Serialize};

use crate::core::candidate::record::{FieldValue, StepDraft};

// ============================================================================
// Errors
// ============================================================================

/// One validation failure, attached to the field that caused it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: &str, message: String) -> Self {
        Self {
            field: field.to_string(),
            message,
        }
    }
}

// ============================================================================
// Rules
// ============================================================================

/// Value kind a rule expects; mismatches are reported, not coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Attachment,
}

/// Declarative rule for one field: presence, kind, and ordered checks.
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub field: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub checks: Vec<Check>,
}

impl FieldRule {
    pub fn required(field: &'static str, label: &'static str) -> Self {
        Self {
            field,
            label,
            kind: FieldKind::Text,
            required: true,
            checks: Vec::new(),
        }
    }

    pub fn optional(field: &'static str, label: &'static str) -> Self {
        Self {
            required: false,
            ..Self::required(field, label)
        }
    }

    /// Optional binary upload field
    pub fn attachment(field: &'static str, label: &'static str) -> Self {
        Self {
            kind: FieldKind::Attachment,
            required: false,
            ..Self::required(field, label)
        }
    }

    pub fn check(mut self, check: Check) -> Self {
        self.checks.push(check);
        self
    }
}

// ============================================================================
// StepSchema
// ============================================================================

/// Ordered rule table for one intake step.
#[derive(Debug, Clone)]
pub struct StepSchema {
    pub id: &'static str,
    pub rules: Vec<FieldRule>,
}

impl StepSchema {
    pub fn new(id: &'static str, rules: Vec<FieldRule>) -> Self {
        Self { id, rules }
    }

    /// Validate a raw draft against this schema.
    ///
    /// Returns the sanitized draft on success, or every field error found.
    /// The input draft is never mutated; a rejected draft leaves no trace.
    pub fn validate(&self, draft: &StepDraft) -> Result<StepDraft, Vec<FieldError>> {
        let mut errors: Vec<FieldError> = Vec::new();
        let mut sanitized = StepDraft::new();

        for rule in &self.rules {
            match draft.get(rule.field) {
                None => {
                    if rule.required {
                        errors.push(FieldError::new(
                            rule.field,
                            format!("{} is required", rule.label),
                        ));
                    }
                }
                Some(value) if value.is_empty() => {
                    // Empty input on an optional field is treated as absent
                    if rule.required {
                        errors.push(FieldError::new(
                            rule.field,
                            format!("{} can't be blank", rule.label),
                        ));
                    }
                }
                Some(value) => {
                    if let Some(message) = kind_mismatch(rule, value) {
                        errors.push(FieldError::new(rule.field, message));
                        continue;
                    }
                    for check in &rule.checks {
                        if let Some(message) = check.apply(value, rule.label) {
                            errors.push(FieldError::new(rule.field, message));
                        }
                    }
                    sanitized.insert(rule.field.to_string(), value.clone());
                }
            }
        }

        if errors.is_empty() {
            Ok(sanitized)
        } else {
            Err(errors)
        }
    }
}

fn kind_mismatch(rule: &FieldRule, value: &FieldValue) -> Option<String> {
    match (rule.kind, value) {
        (FieldKind::Text, FieldValue::Attachment(_)) => {
            Some(format!("{} must be a string", rule.label))
        }
        (FieldKind::Attachment, FieldValue::Text(_)) => {
            Some(format!("{} must be a file", rule.label))
        }
        _ => None,
    }
}

// ============================================================================
// Tests
// ============================================================================
