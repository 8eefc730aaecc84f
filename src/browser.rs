//! Selection and search state for browsing the catalog.
//!
//! `Browser` is the whole interactive state: which unit is open and what
//! has been typed into the search box. Transitions are pure and return a
//! new value; the visible question list is always recomputed from
//! (catalog, browser), never stored.
//!
//! State machine:
//! - `Home --select_unit(k)--> UnitView(k, "")`
//! - `UnitView(k, s) --select_unit(k')--> UnitView(k', s)`
//! - `UnitView(k, s) --set_search_term(s')--> UnitView(k, s')`
//! - `UnitView(k, s) --go_back()--> Home`
//!
//! Switching units keeps the search text. Only `go_back` clears it.

use crate::catalog::{Catalog, CatalogError};
use crate::filter::{filter_questions, normalize_term};
use crate::types::{Question, Unit, UnitKey};

// ============================================================================
// STATE
// ============================================================================

/// Current selection. Search text only exists while a unit is open.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Browser {
    /// Unit picker; nothing selected.
    #[default]
    Home,
    /// A unit is open, with the search box contents (stored verbatim).
    UnitView { unit: UnitKey, search: String },
}

/// What a renderer should show for the current state.
///
/// Separates the three "nothing to list" cases so each can carry its
/// own message.
#[derive(Debug, PartialEq, Eq)]
pub enum Listing<'c> {
    /// No unit selected: show the unit picker.
    NothingSelected,
    /// Unit has no questions yet and there is no search.
    Pending { unit: &'c Unit },
    /// A non-blank search matched nothing. `term` is the text as typed.
    NoMatches { unit: &'c Unit, term: String },
    /// Questions to display, in catalog order.
    Questions {
        unit: &'c Unit,
        questions: Vec<&'c Question>,
    },
}

impl Listing<'_> {
    /// Number of questions to display (zero for the empty states).
    pub fn len(&self) -> usize {
        match self {
            Listing::Questions { questions, .. } => questions.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ============================================================================
// TRANSITIONS
// ============================================================================

impl Browser {
    /// The selected unit, if any.
    pub fn selected_unit(&self) -> Option<UnitKey> {
        match self {
            Browser::Home => None,
            Browser::UnitView { unit, .. } => Some(*unit),
        }
    }

    /// The search box contents. Always empty on `Home`.
    pub fn search_term(&self) -> &str {
        match self {
            Browser::Home => "",
            Browser::UnitView { search, .. } => search,
        }
    }

    /// Open a unit, keeping any search text already typed.
    ///
    /// Rejects keys that are not in the catalog; `self` is left as it was.
    pub fn select_unit(&self, catalog: &Catalog, key: UnitKey) -> Result<Browser, CatalogError> {
        if !catalog.contains(key) {
            return Err(CatalogError::NotFound(key));
        }
        Ok(Browser::UnitView {
            unit: key,
            search: self.search_term().to_string(),
        })
    }

    /// Return to the unit picker, discarding the search text.
    pub fn go_back(&self) -> Browser {
        Browser::Home
    }

    /// Replace the search text verbatim.
    ///
    /// `Home` has no search box, so the text is dropped there.
    pub fn set_search_term(&self, text: impl Into<String>) -> Browser {
        match self {
            Browser::Home => Browser::Home,
            Browser::UnitView { unit, .. } => Browser::UnitView {
                unit: *unit,
                search: text.into(),
            },
        }
    }

    // ------------------------------------------------------------------------
    // Derivations
    // ------------------------------------------------------------------------

    /// Questions currently visible, or `None` when no unit is selected.
    ///
    /// Also `None` if the selected unit is missing from `catalog`.
    pub fn visible_questions<'c>(&self, catalog: &'c Catalog) -> Option<Vec<&'c Question>> {
        let Browser::UnitView { unit, search } = self else {
            return None;
        };
        let unit = catalog.unit(*unit).ok()?;
        Some(filter_questions(&unit.questions, search))
    }

    /// Classify the visible questions into a display state.
    pub fn listing<'c>(&self, catalog: &'c Catalog) -> Listing<'c> {
        let Browser::UnitView { unit: key, search } = self else {
            return Listing::NothingSelected;
        };
        let Ok(unit) = catalog.unit(*key) else {
            return Listing::NothingSelected;
        };

        let searching = normalize_term(search).is_some();
        let questions = filter_questions(&unit.questions, search);

        if !questions.is_empty() {
            Listing::Questions { unit, questions }
        } else if searching {
            Listing::NoMatches {
                unit,
                term: search.clone(),
            }
        } else {
            Listing::Pending { unit }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::matches;

    fn catalog() -> Catalog {
        Catalog::builtin().expect("embedded catalog")
    }

    fn open(catalog: &Catalog, key: u8) -> Browser {
        Browser::Home.select_unit(catalog, UnitKey(key)).unwrap()
    }

    fn ids(questions: &[&Question]) -> Vec<String> {
        questions.iter().map(|q| q.id.clone()).collect()
    }

    const TERMS: &[&str] = &[
        "1.1", "2.", "opportunity cost", "PROFIT", "explain", " market ", "ii", "zzzznotfound", "a  b",
    ];

    // -- Transitions --

    #[test]
    fn home_has_no_selection_or_search() {
        let browser = Browser::default();
        assert_eq!(browser, Browser::Home);
        assert_eq!(browser.selected_unit(), None);
        assert_eq!(browser.search_term(), "");
    }

    #[test]
    fn select_from_home_starts_with_empty_search() {
        let browser = open(&catalog(), 1);
        assert_eq!(
            browser,
            Browser::UnitView {
                unit: UnitKey(1),
                search: String::new()
            }
        );
    }

    #[test]
    fn select_unknown_unit_is_rejected() {
        let catalog = catalog();
        let result = Browser::Home.select_unit(&catalog, UnitKey(42));
        assert!(matches!(result, Err(CatalogError::NotFound(UnitKey(42)))));

        let browser = open(&catalog, 2).set_search_term("profit");
        assert!(browser.select_unit(&catalog, UnitKey(0)).is_err());
        assert_eq!(browser.selected_unit(), Some(UnitKey(2)));
        assert_eq!(browser.search_term(), "profit");
    }

    #[test]
    fn set_search_term_is_stored_verbatim() {
        let browser = open(&catalog(), 1).set_search_term("  Mixed Case  ");
        assert_eq!(browser.search_term(), "  Mixed Case  ");
    }

    #[test]
    fn set_search_term_on_home_is_noop() {
        assert_eq!(Browser::Home.set_search_term("profit"), Browser::Home);
    }

    #[test]
    fn go_back_always_clears_search() {
        let catalog = catalog();
        for term in TERMS {
            let browser = open(&catalog, 1).set_search_term(*term).go_back();
            assert_eq!(browser, Browser::Home);
            assert_eq!(browser.search_term(), "");
        }
        assert_eq!(Browser::Home.go_back(), Browser::Home);
    }

    #[test]
    fn switching_units_preserves_search_term() {
        let catalog = catalog();
        let browser = open(&catalog, 1)
            .set_search_term("profit")
            .select_unit(&catalog, UnitKey(5))
            .unwrap();
        assert_eq!(browser.selected_unit(), Some(UnitKey(5)));
        assert_eq!(browser.search_term(), "profit");
    }

    #[test]
    fn reselecting_after_back_starts_fresh() {
        let catalog = catalog();
        let browser = open(&catalog, 1)
            .set_search_term("profit")
            .go_back()
            .select_unit(&catalog, UnitKey(1))
            .unwrap();
        assert_eq!(browser.search_term(), "");
    }

    // -- Properties over the builtin catalog --

    #[test]
    fn blank_search_is_identity_for_every_unit() {
        let catalog = catalog();
        for (key, unit) in catalog.units() {
            let expected: Vec<&Question> = unit.questions.iter().collect();
            for blank in ["", " ", "   ", "\t"] {
                let browser = open(&catalog, key.0).set_search_term(blank);
                assert_eq!(browser.visible_questions(&catalog), Some(expected.clone()));
            }
        }
    }

    #[test]
    fn filter_is_sound_and_complete() {
        let catalog = catalog();
        for (key, unit) in catalog.units() {
            for term in TERMS {
                let needle = term.trim().to_lowercase();
                let browser = open(&catalog, key.0).set_search_term(*term);
                let visible = browser.visible_questions(&catalog).unwrap();

                for q in &visible {
                    assert!(
                        q.id.to_lowercase().contains(&needle)
                            || q.question.to_lowercase().contains(&needle),
                        "{} should not match {:?}",
                        q.id,
                        term
                    );
                }
                for q in &unit.questions {
                    if !visible.iter().any(|v| v.id == q.id) {
                        assert!(!matches(q, &needle), "{} should match {:?}", q.id, term);
                    }
                }
            }
        }
    }

    #[test]
    fn filter_preserves_catalog_order() {
        let catalog = catalog();
        for (key, unit) in catalog.units() {
            for term in TERMS {
                let browser = open(&catalog, key.0).set_search_term(*term);
                let positions: Vec<usize> = browser
                    .visible_questions(&catalog)
                    .unwrap()
                    .iter()
                    .map(|v| unit.questions.iter().position(|q| q.id == v.id).unwrap())
                    .collect();
                assert!(positions.windows(2).all(|w| w[0] < w[1]));
            }
        }
    }

    #[test]
    fn filtering_is_idempotent() {
        let catalog = catalog();
        let browser = open(&catalog, 5).set_search_term("price");
        let first = browser.visible_questions(&catalog);
        let again = browser.set_search_term("price");
        assert_eq!(again, browser);
        assert_eq!(again.visible_questions(&catalog), first);
        assert_eq!(browser.visible_questions(&catalog), first);
    }

    // -- Scenarios --

    #[test]
    fn unit_one_lists_everything_from_1_1() {
        let catalog = catalog();
        let visible = open(&catalog, 1).visible_questions(&catalog).unwrap();
        assert_eq!(visible.len(), 52);
        assert_eq!(visible[0].id, "1.1");
        assert_eq!(
            ids(&visible),
            ids(&catalog.unit(UnitKey(1)).unwrap().questions.iter().collect::<Vec<_>>())
        );
    }

    #[test]
    fn id_search_finds_question() {
        let catalog = catalog();
        let visible = open(&catalog, 1).set_search_term("1.1").visible_questions(&catalog).unwrap();
        // Substring semantics: "1.10" contains "1.1" too.
        assert_eq!(ids(&visible), vec!["1.1", "1.10"]);

        let visible = open(&catalog, 1).set_search_term("1.2").visible_questions(&catalog).unwrap();
        assert_eq!(ids(&visible), vec!["1.2"]);
    }

    #[test]
    fn text_search_is_case_insensitive() {
        let catalog = catalog();
        for term in ["opportunity cost", "OPPORTUNITY COST", "Opportunity Cost"] {
            let visible = open(&catalog, 1).set_search_term(term).visible_questions(&catalog).unwrap();
            assert!(ids(&visible).contains(&"1.4".to_string()), "{:?}", term);
        }
    }

    #[test]
    fn no_matches_is_distinct_from_nothing_selected() {
        let catalog = catalog();
        let browser = open(&catalog, 1).set_search_term("zzzznotfound");
        assert_eq!(browser.visible_questions(&catalog), Some(vec![]));
        assert_eq!(Browser::Home.visible_questions(&catalog), None);

        match browser.listing(&catalog) {
            Listing::NoMatches { unit, term } => {
                assert_eq!(unit.key, UnitKey(1));
                assert_eq!(term, "zzzznotfound");
            }
            other => panic!("Expected NoMatches, got {:?}", other),
        }
        assert_eq!(Browser::Home.listing(&catalog), Listing::NothingSelected);
    }

    #[test]
    fn empty_unit_is_pending_not_no_matches() {
        let catalog = catalog();
        let browser = open(&catalog, 6);
        assert_eq!(browser.visible_questions(&catalog), Some(vec![]));
        match browser.listing(&catalog) {
            Listing::Pending { unit } => assert_eq!(unit.key, UnitKey(6)),
            other => panic!("Expected Pending, got {:?}", other),
        }
    }

    #[test]
    fn searching_an_empty_unit_reports_no_matches() {
        let catalog = catalog();
        let browser = open(&catalog, 6).set_search_term("profit");
        assert!(matches!(browser.listing(&catalog), Listing::NoMatches { .. }));
    }

    #[test]
    fn whitespace_search_shows_full_unit() {
        let catalog = catalog();
        let browser = open(&catalog, 2).set_search_term("   ");
        let visible = browser.visible_questions(&catalog).unwrap();
        assert_eq!(visible.len(), 40);
        match browser.listing(&catalog) {
            Listing::Questions { questions, .. } => assert_eq!(questions.len(), 40),
            other => panic!("Expected Questions, got {:?}", other),
        }
    }

    #[test]
    fn listing_len_counts_questions_only() {
        let catalog = catalog();
        assert_eq!(open(&catalog, 3).listing(&catalog).len(), 22);
        assert!(open(&catalog, 6).listing(&catalog).is_empty());
        assert!(Browser::Home.listing(&catalog).is_empty());
    }

    #[test]
    fn missing_unit_in_other_catalog_yields_nothing() {
        let small = Catalog::from_units("", vec![]).unwrap();
        let browser = open(&catalog(), 1);
        assert_eq!(browser.visible_questions(&small), None);
        assert_eq!(browser.listing(&small), Listing::NothingSelected);
    }
}
