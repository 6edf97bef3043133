//! Input validation at the boundary between raw form fields and the core.
//!
//! Validation runs before any store mutation. It reports every failure found
//! in a submission, in field order: name, biology, physics, english.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::types::{ScoreFields, ScoreRecord};

/// Inclusive lower bound for a subject score.
pub const MIN_SCORE: f64 = 0.0;
/// Inclusive upper bound for a subject score.
pub const MAX_SCORE: f64 = 100.0;

/// Subject whose score field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subject {
    Biology,
    Physics,
    English,
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Subject::Biology => "biology",
            Subject::Physics => "physics",
            Subject::English => "english",
        })
    }
}

/// Raw text entered into the form, before any parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawFields {
    pub student_name: String,
    pub biology: String,
    pub physics: String,
    pub english: String,
}

impl RawFields {
    pub fn new(
        student_name: impl Into<String>,
        biology: impl Into<String>,
        physics: impl Into<String>,
        english: impl Into<String>,
    ) -> Self {
        Self {
            student_name: student_name.into(),
            biology: biology.into(),
            physics: physics.into(),
            english: english.into(),
        }
    }

    /// Pre-fill the form from a stored record (select-row-to-edit).
    pub fn from_record(record: &ScoreRecord) -> Self {
        Self {
            student_name: record.student_name.clone(),
            biology: record.biology.to_string(),
            physics: record.physics.to_string(),
            english: record.english.to_string(),
        }
    }
}

/// A single validation failure.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("student name must not be empty")]
    EmptyName,
    #[error("{subject} score '{raw}' is not a number")]
    NotANumber { subject: Subject, raw: String },
    #[error("{subject} score {value} must be between 0 and 100")]
    OutOfRange { subject: Subject, value: f64 },
}

/// All validation failures of one submission (never empty).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{}", join_messages(.0))]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    /// First failure in field order.
    pub fn first(&self) -> &ValidationError {
        &self.0[0]
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Validate raw form input into typed fields.
///
/// The name must be non-blank once trimmed but is kept exactly as entered;
/// scores are trimmed then parsed as `f64`. NaN is treated as not a number,
/// infinities as out of range.
pub fn validate(raw: &RawFields) -> Result<ScoreFields, ValidationErrors> {
    let mut errors = Vec::new();

    if raw.student_name.trim().is_empty() {
        errors.push(ValidationError::EmptyName);
    }

    let biology = parse_score(Subject::Biology, &raw.biology, &mut errors);
    let physics = parse_score(Subject::Physics, &raw.physics, &mut errors);
    let english = parse_score(Subject::English, &raw.english, &mut errors);

    match (biology, physics, english) {
        (Some(biology), Some(physics), Some(english)) if errors.is_empty() => Ok(ScoreFields {
            student_name: raw.student_name.clone(),
            biology,
            physics,
            english,
        }),
        _ => Err(ValidationErrors(errors)),
    }
}

fn parse_score(subject: Subject, raw: &str, errors: &mut Vec<ValidationError>) -> Option<f64> {
    let value = match raw.trim().parse::<f64>() {
        Ok(value) if !value.is_nan() => value,
        _ => {
            errors.push(ValidationError::NotANumber {
                subject,
                raw: raw.to_string(),
            });
            return None;
        }
    };
    if !(MIN_SCORE..=MAX_SCORE).contains(&value) {
        errors.push(ValidationError::OutOfRange { subject, value });
        return None;
    }
    Some(value)
}
