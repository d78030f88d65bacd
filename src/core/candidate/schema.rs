//! Candidate Intake Rule Tables
//!
//! The concrete validation schemas for the three intake steps, plus the
//! shortlist schema used when scheduling an interview for an existing
//! candidate. Field names are the host form's wire names; labels and
//! messages match the wording shown next to each input.

use crate::core::validation::{Check, DateBound, FieldRule, StepSchema};

use super::intake::IntakeStep;

/// Schema for the basic information step.
pub fn basic_info() -> StepSchema {
    StepSchema::new(
        "basic_info",
        vec![
            FieldRule::required("firstName", "First name")
                .check(Check::MinLen(2))
                .check(Check::MaxLen(20)),
            FieldRule::required("lastName", "Last name")
                .check(Check::MinLen(2))
                .check(Check::MaxLen(20)),
            FieldRule::required("email", "Email").check(Check::Email),
            FieldRule::required("phone", "Phone number").check(Check::BdPhone),
            FieldRule::optional("altPhone", "Alternative phone number").check(Check::BdPhone),
            FieldRule::optional("ssn", "SSN"),
            FieldRule::optional("presentAddress", "Present address").check(Check::MaxLen(200)),
            FieldRule::optional("permanentAddress", "Permanent address").check(Check::MaxLen(200)),
            FieldRule::optional("state", "State").check(Check::MaxLen(50)),
            FieldRule::optional("city", "City").check(Check::MaxLen(50)),
            FieldRule::optional("zipCode", "Zip code"),
            FieldRule::attachment("picture", "Picture").check(Check::Image),
        ],
    )
}

/// Schema for the educational information step.
pub fn edu_info() -> StepSchema {
    StepSchema::new(
        "edu_info",
        vec![
            FieldRule::required("examName", "Exam name"),
            FieldRule::required("institution", "Institution").check(Check::MinLen(2)),
            FieldRule::required("roll", "Roll"),
            FieldRule::required("registrationNo", "Registration No"),
            FieldRule::required("result", "Result"),
            FieldRule::required("passingYear", "Passing year").check(Check::Year),
        ],
    )
}

/// Schema for the past experience step.
pub fn past_exp() -> StepSchema {
    StepSchema::new(
        "past_exp",
        vec![
            FieldRule::required("companyName", "Company name"),
            FieldRule::required("designation", "Designation").check(Check::MinLen(2)),
            FieldRule::required("joiningDate", "Joining date")
                .check(Check::Date(DateBound::NotInFuture)),
            FieldRule::optional("expireDate", "Expire date").check(Check::Date(DateBound::Any)),
            FieldRule::required("yearsOfExp", "Years of experience").check(Check::Digits),
        ],
    )
}

/// Schema for shortlisting an existing candidate for an interview.
/// Not part of the intake step sequence.
pub fn shortlist() -> StepSchema {
    StepSchema::new(
        "shortlist",
        vec![
            FieldRule::required("candidate", "Candidate ID"),
            FieldRule::required("jobPosition", "Job Position").check(Check::MinLen(2)),
            FieldRule::required("interviewDate", "Interview date")
                .check(Check::Date(DateBound::NotInPast)),
        ],
    )
}

/// Rule table for an intake step.
pub fn schema_for(step: IntakeStep) -> StepSchema {
    match step {
        IntakeStep::BasicInfo => basic_info(),
        IntakeStep::Education => edu_info(),
        IntakeStep::Experience => past_exp(),
    }
}

// ============================================================================
// Tests
// ============================================================================
