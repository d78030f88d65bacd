//! Test Suite
//!
//! Crate-internal tests that exercise the intake core end-to-end:
//! - `integration`: full intake flows against the manager surface
//! - `property`: proptest invariants for the record merge
