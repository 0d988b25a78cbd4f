//! Field-level validation for user drafts.
//!
//! The store itself only applies the gender set-membership guard; the rest of
//! these checks serve form layers that want pass/fail plus human-readable
//! messages before submitting.

use std::sync::OnceLock;

use regex::Regex;

use crate::{types::Gender, user::UserDraft};

/// Inclusive age bounds accepted by [`validate_age`].
pub const AGE_BOUNDS: (u32, u32) = (1, 150);

/// Name length bounds in characters.
pub const NAME_LENGTH: (usize, usize) = (2, 50);

/// Outcome of validating one field or a whole draft.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Blocking problems; empty means the input passed.
    pub errors: Vec<String>,
    /// Advisory notes that do not block submission.
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// True when no blocking problem was found.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn merge(&mut self, other: ValidationReport) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }
}

fn name_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-zA-Z\s'-]+$").expect("static pattern"))
}

fn email_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("static pattern")
    })
}

/// Validates a display name: required, length bounds, and letters, spaces,
/// hyphens, or apostrophes only.
pub fn validate_name(name: &str) -> ValidationReport {
    let mut report = ValidationReport::default();
    let trimmed = name.trim();
    let (min, max) = NAME_LENGTH;

    if trimmed.is_empty() {
        report.errors.push("this field is required".to_string());
    } else if trimmed.chars().count() < min {
        report
            .errors
            .push(format!("minimum length is {min} characters"));
    } else if trimmed.chars().count() > max {
        report
            .errors
            .push(format!("maximum length is {max} characters"));
    } else if !name_pattern().is_match(trimmed) {
        report.errors.push(
            "name should contain only letters, spaces, hyphens, and apostrophes".to_string(),
        );
    }

    report
}

/// Validates an email address: required plus pattern match.
pub fn validate_email(email: &str) -> ValidationReport {
    let mut report = ValidationReport::default();
    let trimmed = email.trim();

    if trimmed.is_empty() {
        report.errors.push("this field is required".to_string());
    } else if !email_pattern().is_match(&trimmed.to_lowercase()) {
        report
            .errors
            .push("please enter a valid email address".to_string());
    }

    report
}

/// Validates an age against [`AGE_BOUNDS`].
pub fn validate_age(age: u32) -> ValidationReport {
    let mut report = ValidationReport::default();
    let (min, max) = AGE_BOUNDS;

    if age < min || age > max {
        report
            .errors
            .push(format!("age must be between {min} and {max}"));
    }

    report
}

/// Validates gender text: required plus set membership in the three
/// permitted values.
pub fn validate_gender(gender: &str) -> ValidationReport {
    let mut report = ValidationReport::default();

    if gender.trim().is_empty() {
        report.errors.push("this field is required".to_string());
    } else if Gender::parse(gender).is_none() {
        report
            .errors
            .push("please select a valid gender option".to_string());
    }

    report
}

/// Validates a complete draft, aggregating every field's messages plus
/// advisory warnings.
pub fn validate_draft(draft: &UserDraft) -> ValidationReport {
    let mut report = ValidationReport::default();
    report.merge(validate_name(&draft.name));
    report.merge(validate_email(&draft.email));
    report.merge(validate_age(draft.age));
    report.merge(validate_gender(&draft.gender));

    if draft.age > 0 && draft.age < 18 {
        report
            .warnings
            .push("user is under 18 years old".to_string());
    }
    if draft.email.contains('+') {
        report
            .warnings
            .push("email contains plus sign - verify this is correct".to_string());
    }

    report
}
