//! Candidate Creation Boundary
//!
//! The intake core does not persist or transmit anything itself. Once a
//! record is complete it is handed to a [`CandidateCreator`] supplied by the
//! host application; failure handling and retry policy belong to that
//! collaborator. [`LoggingCreator`] is the default for hosts without a
//! backend: it logs the accepted record and mints an id.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::record::CandidateRecord;

/// Identifier assigned to a created candidate by the host collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CandidateId(pub String);

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors surfaced by the creation collaborator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CreateError {
    #[error("Candidate rejected: {0}")]
    Rejected(String),

    #[error("Candidate service unavailable: {0}")]
    Unavailable(String),
}

/// Host-supplied collaborator that turns a finished record into a candidate.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CandidateCreator: Send + Sync {
    async fn create_candidate(&self, record: &CandidateRecord) -> Result<CandidateId, CreateError>;
}

/// Default collaborator: logs the record and returns a fresh id.
#[derive(Debug, Default)]
pub struct LoggingCreator;

#[async_trait]
impl CandidateCreator for LoggingCreator {
    async fn create_candidate(&self, record: &CandidateRecord) -> Result<CandidateId, CreateError> {
        let id = CandidateId(uuid::Uuid::new_v4().to_string());
        info!(
            candidate_id = %id,
            candidate_name = record.display_name().as_deref().unwrap_or("<unnamed>"),
            field_count = record.len(),
            "Candidate created"
        );
        Ok(id)
    }
}
