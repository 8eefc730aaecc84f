//! Report formatting for the non-interactive commands.
//!
//! Pure functions — (data, OutputFormat) → String.
//! No I/O, no side effects.

use serde_json::{json, Value};

use crate::browser::Listing;
use crate::catalog::Catalog;
use crate::types::{OutputFormat, Question, Unit};

/// Message shown for a unit whose questions have not been written yet.
pub const PENDING_MESSAGE: &str = "Mark scheme for this unit is currently being developed.";

/// Message shown when a search finds nothing.
pub fn no_matches_message(term: &str) -> String {
    format!("No questions found matching \"{}\"", term)
}

/// Format the list of units.
pub fn format_units(catalog: &Catalog, format: OutputFormat) -> String {
    match format {
        OutputFormat::Human => units_human(catalog),
        OutputFormat::Json => to_json(&units_json(catalog)),
    }
}

/// Format a listing (the result of selecting a unit and searching).
pub fn format_listing(listing: &Listing<'_>, format: OutputFormat) -> String {
    match format {
        OutputFormat::Human => listing_human(listing),
        OutputFormat::Json => to_json(&listing_json(listing)),
    }
}

/// Format a single question card.
pub fn format_question(question: &Question, format: OutputFormat) -> String {
    match format {
        OutputFormat::Human => card_human(question),
        OutputFormat::Json => to_json(&json!(question)),
    }
}

/// Heading for a unit, as shown above its questions.
pub fn unit_heading(unit: &Unit) -> String {
    format!("Unit {}: {}", unit.key, unit.title)
}

// ============================================================================
// HUMAN FORMAT
// ============================================================================

fn units_human(catalog: &Catalog) -> String {
    let mut out = String::new();
    out.push_str("=== Units ===\n");
    for (key, unit) in catalog.units() {
        let status = if unit.is_pending() {
            "in development".to_string()
        } else {
            plural(unit.questions.len(), "question", "questions")
        };
        out.push_str(&format!("Unit {}  {}  ({})\n", key, unit.title, status));
    }
    out
}

fn listing_human(listing: &Listing<'_>) -> String {
    match listing {
        Listing::NothingSelected => "No unit selected.\n".to_string(),
        Listing::Pending { unit } => {
            format!("=== {} ===\n\n{}\n", unit_heading(unit), PENDING_MESSAGE)
        }
        Listing::NoMatches { unit, term } => {
            format!("=== {} ===\n\n{}\n", unit_heading(unit), no_matches_message(term))
        }
        Listing::Questions { unit, questions } => {
            let mut out = format!("=== {} ===\n", unit_heading(unit));
            for question in questions {
                out.push('\n');
                out.push_str(&card_human(question));
            }
            out.push_str(&format!(
                "\n{} of {}\n",
                plural(questions.len(), "question", "questions"),
                unit.questions.len()
            ));
            out
        }
    }
}

/// One question card: id and text, marks, scheme, then optional blocks.
fn card_human(q: &Question) -> String {
    let mut out = String::new();
    out.push_str(&format!("[{}] {}\n", q.id, q.question));
    out.push_str(&format!("Marks for this question: {}\n", q.marks));
    out.push_str(&format!("{}\n", q.scheme));

    if let Some(answers) = &q.answers {
        out.push_str("\nAnswers may include:\n");
        out.push_str(&format!("{}\n", answers));
    }
    if let Some(examples) = &q.examples {
        out.push_str("\nExamples of developed answers:\n");
        out.push_str(&format!("{}\n", examples));
    }
    if let Some(note) = &q.note {
        out.push_str("\nMarkers note:\n");
        out.push_str(&format!("  {}\n", note));
    }

    out
}

fn plural(n: usize, one: &str, many: &str) -> String {
    format!("{} {}", n, if n == 1 { one } else { many })
}

// ============================================================================
// JSON FORMAT
// ============================================================================

fn units_json(catalog: &Catalog) -> Value {
    let units: Vec<Value> = catalog
        .units()
        .map(|(key, unit)| {
            json!({
                "key": key,
                "title": unit.title,
                "questions": unit.questions.len(),
            })
        })
        .collect();
    json!({ "units": units })
}

fn listing_json(listing: &Listing<'_>) -> Value {
    match listing {
        Listing::NothingSelected => json!({ "status": "nothing_selected" }),
        Listing::Pending { unit } => json!({
            "status": "pending",
            "unit": unit.key,
            "title": unit.title,
            "message": PENDING_MESSAGE,
            "questions": [],
        }),
        Listing::NoMatches { unit, term } => json!({
            "status": "no_matches",
            "unit": unit.key,
            "title": unit.title,
            "search": term,
            "message": no_matches_message(term),
            "questions": [],
        }),
        Listing::Questions { unit, questions } => json!({
            "status": "questions",
            "unit": unit.key,
            "title": unit.title,
            "total": unit.questions.len(),
            "questions": questions,
        }),
    }
}

fn to_json(value: &Value) -> String {
    // Value serialization cannot fail: all map keys are strings.
    serde_json::to_string_pretty(value).unwrap_or_default()
}

// ============================================================================
// TESTS
// ============================================================================
