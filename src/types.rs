//! Domain types for the mark scheme navigator.
//!
//! Plain data, no behavior beyond display helpers. The catalog module
//! owns construction and validation.

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// PRIMITIVES
// ============================================================================

/// Identifies a unit in the catalog ("Unit 1", "Unit 2", ...).
///
/// Keys order numerically, which is also the unit picker's display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitKey(pub u8);

impl fmt::Display for UnitKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// RECORDS
// ============================================================================

/// One exam question plus its marking guidance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Dotted identifier, e.g. "1.1" or "3.7ii". Unique within its unit.
    pub id: String,
    /// Full question text, including context and the "[n marks]" annotation.
    pub question: String,
    /// Mark allocation summary, e.g. "AO1 – 2 marks".
    pub marks: String,
    /// How marks are awarded.
    pub scheme: String,
    /// Acceptable answers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answers: Option<String>,
    /// Worked examples of developed answers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub examples: Option<String>,
    /// Guidance for markers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// A curriculum topic and its questions, in booklet order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub key: UnitKey,
    pub title: String,
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl Unit {
    /// True when the unit's mark scheme has not been written yet.
    pub fn is_pending(&self) -> bool {
        self.questions.is_empty()
    }
}

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Output format for CLI reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable pretty output.
    #[default]
    Human,
    /// Machine-readable JSON.
    Json,
}

// ============================================================================
// TESTS
// ============================================================================
