//! Intake State Machine for Candidate Creation
//!
//! Manages the multi-step candidate intake lifecycle in memory.
//!
//! # Overview
//!
//! The intake guides users through candidate creation in discrete steps:
//! 1. Basic Information - name, contact details, addresses, picture
//! 2. Educational Information - exam, institution, result, passing year
//! 3. Past Experience - company, designation, dates, years of experience
//!
//! # Design Principles
//!
//! - **Gated**: A step's fields merge into the record only after its rule
//!   table accepts the draft
//! - **Progressive**: Users can move forward/backward/jump freely, preserving
//!   all accepted data
//! - **Monotonic**: Re-validating a step overwrites its own fields but never
//!   removes fields contributed by other steps
//! - **Single hand-off**: Submission fires once, after the last step
//!   validates with every step completed; a failed hand-off keeps the record
//!   so submission can be retried

mod manager;
mod types;

pub use manager::*;
pub use types::*;
