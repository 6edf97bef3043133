//! Shared deterministic types for score records.
//!
//! These types define stable contracts between the classifier, validation and
//! the store. They carry no I/O and no storage handles.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Recommended faculty track derived from a student's scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Track {
    Medicine,
    Engineering,
    Language,
}

impl Track {
    /// Stable label persisted in storage and shown to users.
    pub fn label(self) -> &'static str {
        match self {
            Track::Medicine => "Medicine",
            Track::Engineering => "Engineering",
            Track::Language => "Language",
        }
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Error returned when a stored label is not one of the known tracks.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown track label '{0}'")]
pub struct UnknownTrack(pub String);

impl FromStr for Track {
    type Err = UnknownTrack;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "Medicine" => Ok(Track::Medicine),
            "Engineering" => Ok(Track::Engineering),
            "Language" => Ok(Track::Language),
            other => Err(UnknownTrack(other.to_string())),
        }
    }
}

/// Store-assigned record identifier. Never reused after deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub i64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Validated, caller-editable fields of a record.
///
/// Only [`crate::core::validation::validate`] produces these outside of tests,
/// so a value of this type has a non-empty name and scores within `[0, 100]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreFields {
    pub student_name: String,
    pub biology: f64,
    pub physics: f64,
    pub english: f64,
}

/// A persisted student score record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub id: RecordId,
    pub student_name: String,
    pub biology: f64,
    pub physics: f64,
    pub english: f64,
    pub recommended_track: Track,
}

impl ScoreRecord {
    /// Editable fields of this record.
    pub fn fields(&self) -> ScoreFields {
        ScoreFields {
            student_name: self.student_name.clone(),
            biology: self.biology,
            physics: self.physics,
            english: self.english,
        }
    }
}
