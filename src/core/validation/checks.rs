//! Field Check Vocabulary
//!
//! The closed set of predicates a [`FieldRule`](super::FieldRule) can apply
//! to a present, non-empty value. Each failing check produces one
//! human-readable message built from the rule's field label, matching the
//! wording the intake form shows next to each input.

use chrono::{Datelike, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::candidate::record::FieldValue;

/// Picture upload ceiling in MiB
pub const MAX_ATTACHMENT_MB: usize = 5;
/// Picture upload ceiling in bytes
pub const MAX_ATTACHMENT_BYTES: usize = MAX_ATTACHMENT_MB * 1024 * 1024;
/// Accepted picture MIME types
pub const ACCEPTED_IMAGE_TYPES: [&str; 3] = ["image/jpeg", "image/jpg", "image/png"];

/// Passing-year floor; the ceiling is the current UTC year
pub const YEAR_FLOOR: i32 = 1900;

/// Dates are exchanged in the host date-picker's wire format
const DATE_FORMAT: &str = "%Y-%m-%d";

static BD_PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\+8801[3-9]\d{8}|01[3-9]\d{8})$").expect("phone pattern"));

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern"));

static DIGITS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+$").expect("digits pattern"));

static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}$").expect("year pattern"));

// ============================================================================
// Check
// ============================================================================

/// Bound applied by a [`Check::Date`] rule after the date parses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateBound {
    /// Any valid calendar date
    Any,
    /// Must not be after today (joining dates)
    NotInFuture,
    /// Must not be before today (interview dates)
    NotInPast,
}

/// A single declarative predicate on a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    /// Minimum character length
    MinLen(usize),
    /// Maximum character length
    MaxLen(usize),
    /// Email address shape
    Email,
    /// Bangladeshi contact number: `+8801xxxxxxxxx` or `01xxxxxxxxx`,
    /// operator code 3-9, eleven significant digits
    BdPhone,
    /// Unsigned decimal digits only
    Digits,
    /// Four-digit year within `[YEAR_FLOOR, current year]`
    Year,
    /// Calendar date in `%Y-%m-%d`, optionally bounded against today
    Date(DateBound),
    /// Image attachment: whitelisted MIME type, size under the ceiling
    Image,
}

impl Check {
    /// Apply the check to a present, non-empty value. Returns the failure
    /// message, or `None` when the value passes.
    pub fn apply(&self, value: &FieldValue, label: &str) -> Option<String> {
        match self {
            Check::MinLen(min) => {
                let text = value.as_text()?;
                (text.chars().count() < *min).then(|| {
                    format!("{} must be at least {} characters long.", label, min)
                })
            }
            Check::MaxLen(max) => {
                let text = value.as_text()?;
                (text.chars().count() > *max)
                    .then(|| format!("{} can't be more than {} characters.", label, max))
            }
            Check::Email => {
                let text = value.as_text()?;
                (!EMAIL_RE.is_match(text)).then(|| "Invalid email address.".to_string())
            }
            Check::BdPhone => {
                let text = value.as_text()?;
                (!BD_PHONE_RE.is_match(text)).then(|| {
                    "Invalid format for Bangladeshi phone number (+8801xxxxxxxxx or 01xxxxxxxxx)"
                        .to_string()
                })
            }
            Check::Digits => {
                let text = value.as_text()?;
                (!DIGITS_RE.is_match(text)).then(|| format!("{} must be a number.", label))
            }
            Check::Year => {
                let text = value.as_text()?;
                if !YEAR_RE.is_match(text) {
                    return Some("Must be a 4-digit year.".to_string());
                }
                let current = Utc::now().year();
                match text.parse::<i32>() {
                    Ok(year) if (YEAR_FLOOR..=current).contains(&year) => None,
                    _ => Some(format!(
                        "{} must be between {} and {}.",
                        label, YEAR_FLOOR, current
                    )),
                }
            }
            Check::Date(bound) => {
                let text = value.as_text()?;
                let date = match NaiveDate::parse_from_str(text, DATE_FORMAT) {
                    Ok(date) => date,
                    Err(_) => return Some("Invalid date format.".to_string()),
                };
                let today = Utc::now().date_naive();
                match bound {
                    DateBound::Any => None,
                    DateBound::NotInFuture => (date > today)
                        .then(|| format!("{} cannot be in the future.", label)),
                    DateBound::NotInPast => {
                        (date < today).then(|| format!("{} cannot be in the past.", label))
                    }
                }
            }
            Check::Image => {
                let attachment = value.as_attachment()?;
                if !ACCEPTED_IMAGE_TYPES.contains(&attachment.mime_type.as_str()) {
                    return Some(
                        "Only .jpg, .jpeg, and .png formats are supported.".to_string(),
                    );
                }
                (attachment.size() > MAX_ATTACHMENT_BYTES).then(|| {
                    format!("File size must be less than {}MB.", MAX_ATTACHMENT_MB)
                })
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
