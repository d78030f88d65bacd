//! Candidate Record and Field Values
//!
//! Defines the data carried through the intake flow:
//! - [`FieldValue`]: a single form value, either text or a binary attachment
//! - [`StepDraft`]: raw input for one step, keyed by the host form's field names
//! - [`CandidateRecord`]: the cumulative record assembled from accepted steps
//!
//! The record grows monotonically: merging an accepted step overwrites that
//! step's keys but never removes keys contributed by other steps. Empty text
//! values are dropped before merging, so unset optional fields are simply
//! absent from the record rather than present as empty strings.

use bytes::Bytes;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Raw input for one step, in the order the host form supplied it.
pub type StepDraft = IndexMap<String, FieldValue>;

// ============================================================================
// Attachment
// ============================================================================

/// An uploaded file held as an opaque in-memory blob.
///
/// The payload is kept out of serialized snapshots; hosts that need the bytes
/// read them from the live record before the session is dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    /// File name as reported by the host form
    pub file_name: String,
    /// Declared MIME type (validated, not sniffed)
    pub mime_type: String,
    #[serde(skip, default)]
    data: Bytes,
}

impl Attachment {
    pub fn new(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// Declared size in bytes
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// The raw payload
    pub fn data(&self) -> &Bytes {
        &self.data
    }
}

// ============================================================================
// FieldValue
// ============================================================================

/// One form field value: text for ordinary inputs, an attachment for uploads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Attachment(Attachment),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    /// Text content, if this is a text value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s.as_str()),
            FieldValue::Attachment(_) => None,
        }
    }

    /// Attachment content, if this is an attachment value
    pub fn as_attachment(&self) -> Option<&Attachment> {
        match self {
            FieldValue::Text(_) => None,
            FieldValue::Attachment(a) => Some(a),
        }
    }

    /// Empty text counts as unset; attachments are never empty.
    pub fn is_empty(&self) -> bool {
        matches!(self, FieldValue::Text(s) if s.is_empty())
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

// ============================================================================
// CandidateRecord
// ============================================================================

/// Cumulative candidate record assembled from accepted step drafts.
///
/// Keys keep their first-insertion order, so a serialized snapshot reads in
/// the order the intake flow collected the fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    fields: IndexMap<String, FieldValue>,
}

impl CandidateRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge an accepted step draft: shallow key overwrite, empty values
    /// dropped. Merging the same draft twice is equivalent to merging once.
    pub fn merge_step(&mut self, sanitized: &StepDraft) {
        for (field, value) in sanitized {
            if value.is_empty() {
                continue;
            }
            self.fields.insert(field.clone(), value.clone());
        }
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// All accepted fields, in collection order
    pub fn fields(&self) -> &IndexMap<String, FieldValue> {
        &self.fields
    }

    /// Candidate display name for listings, if the basic-info step has
    /// supplied one.
    pub fn display_name(&self) -> Option<String> {
        let first = self.get("firstName").and_then(FieldValue::as_text)?;
        match self.get("lastName").and_then(FieldValue::as_text) {
            Some(last) => Some(format!("{} {}", first, last)),
            None => Some(first.to_string()),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
