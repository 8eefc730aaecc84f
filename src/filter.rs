//! Question search: case-insensitive substring matching.
//!
//! Pure functions — no I/O, easily testable.
//!
//! A question matches when its id OR its question text contains the
//! search term. The term is trimmed once; a blank term disables
//! filtering entirely. Internal whitespace is significant.

use crate::types::Question;

/// Fold a raw search term into the form used for matching.
///
/// Returns `None` when the trimmed term is empty, meaning "no filter".
pub fn normalize_term(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Does `question` match an already-normalized needle?
pub fn matches(question: &Question, needle: &str) -> bool {
    question.id.to_lowercase().contains(needle) || question.question.to_lowercase().contains(needle)
}

/// Filter questions by a raw search term, preserving their order.
///
/// A blank term returns every question.
pub fn filter_questions<'a>(questions: &'a [Question], raw_term: &str) -> Vec<&'a Question> {
    match normalize_term(raw_term) {
        None => questions.iter().collect(),
        Some(needle) => questions.iter().filter(|q| matches(q, &needle)).collect(),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn q(id: &str, text: &str) -> Question {
        Question {
            id: id.to_string(),
            question: text.to_string(),
            marks: String::new(),
            scheme: String::new(),
            answers: None,
            examples: None,
            note: None,
        }
    }

    fn sample() -> Vec<Question> {
        vec![
            q("1.1", "State two reasons why somebody may want to start a business."),
            q("1.4", "Define opportunity cost."),
            q("1.10", "Explain one factor in the business environment."),
            q("3.7ii", "Calculate the Gross Profit margin."),
        ]
    }

    fn ids(found: &[&Question]) -> Vec<String> {
        found.iter().map(|q| q.id.clone()).collect()
    }

    // -- normalize_term --

    #[test]
    fn blank_terms_normalize_to_none() {
        assert_eq!(normalize_term(""), None);
        assert_eq!(normalize_term("   "), None);
        assert_eq!(normalize_term("\t\n "), None);
    }

    #[test]
    fn term_is_trimmed_and_lowercased() {
        assert_eq!(normalize_term("  Opportunity COST "), Some("opportunity cost".to_string()));
    }

    #[test]
    fn internal_whitespace_is_kept() {
        assert_eq!(normalize_term(" a  b "), Some("a  b".to_string()));
    }

    // -- matches --

    #[test]
    fn matches_on_id() {
        assert!(matches(&q("3.7ii", "Anything"), "7ii"));
    }

    #[test]
    fn matches_on_question_text() {
        assert!(matches(&q("1.4", "Define opportunity cost."), "opportunity"));
    }

    #[test]
    fn match_is_case_insensitive_on_both_fields() {
        assert!(matches(&q("3.7II", "x"), "7ii"));
        assert!(matches(&q("1", "GROSS PROFIT"), "gross profit"));
    }

    #[test]
    fn other_fields_are_not_searched() {
        let mut question = q("1.1", "Question text");
        question.scheme = "needle".to_string();
        question.answers = Some("needle".to_string());
        assert!(!matches(&question, "needle"));
    }

    // -- filter_questions --

    #[test]
    fn blank_term_returns_everything_in_order() {
        let questions = sample();
        assert_eq!(ids(&filter_questions(&questions, "")), vec!["1.1", "1.4", "1.10", "3.7ii"]);
        assert_eq!(ids(&filter_questions(&questions, "  ")), vec!["1.1", "1.4", "1.10", "3.7ii"]);
    }

    #[test]
    fn id_substring_matches_longer_ids() {
        let questions = sample();
        assert_eq!(ids(&filter_questions(&questions, "1.1")), vec!["1.1", "1.10"]);
    }

    #[test]
    fn text_match_ignores_case() {
        let questions = sample();
        assert_eq!(ids(&filter_questions(&questions, "OPPORTUNITY COST")), vec!["1.4"]);
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let questions = sample();
        assert_eq!(ids(&filter_questions(&questions, "  gross profit  ")), vec!["3.7ii"]);
    }

    #[test]
    fn internal_whitespace_must_match_exactly() {
        let questions = sample();
        assert!(filter_questions(&questions, "gross  profit").is_empty());
    }

    #[test]
    fn survivors_keep_relative_order() {
        let questions = sample();
        let found = ids(&filter_questions(&questions, "business"));
        assert_eq!(found, vec!["1.1", "1.10"]);
    }

    #[test]
    fn no_match_is_empty() {
        assert!(filter_questions(&sample(), "zzzznotfound").is_empty());
    }

    #[test]
    fn empty_input_list() {
        assert!(filter_questions(&[], "anything").is_empty());
        assert!(filter_questions(&[], "").is_empty());
    }
}
