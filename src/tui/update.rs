//! Pure state transitions: (Screen, Browser, Action) → Transition.
//!
//! This is the core logic of the TUI. Fully testable without a terminal.
//! Each screen defines which actions it accepts. Unhandled actions
//! return the current screen unchanged (no-op).

use crate::browser::{Browser, Listing};
use crate::catalog::Catalog;
use crate::types::UnitKey;

use super::state::{Action, InputMode, Screen, Transition};
use super::view::{card_lines, guide_lines};

/// Rows moved by PageUp / PageDown.
const PAGE: usize = 10;

/// Pure state transition function.
///
/// Given the current screen, the browser state, an action, and the
/// catalog, produces the next transition. The effects boundary
/// interprets the result.
pub fn update(screen: Screen, browser: &Browser, action: &Action, catalog: &Catalog) -> Transition {
    match screen {
        Screen::Home { cursor } => update_home(cursor, browser, action, catalog),
        Screen::QuestionList { cursor, mode: InputMode::Search } => {
            update_search(cursor, browser, action, catalog)
        }
        Screen::QuestionList { cursor, mode: InputMode::Browse } => {
            update_question_list(cursor, browser, action, catalog)
        }
        Screen::QuestionDetail { id, scroll } => {
            update_question_detail(id, scroll, browser, action, catalog)
        }
        Screen::Guide { scroll } => update_guide(scroll, browser, action, catalog),
    }
}

// ============================================================================
// PER-SCREEN HANDLERS
// ============================================================================

/// Home: pick a unit by cursor or number key.
fn update_home(cursor: usize, browser: &Browser, action: &Action, catalog: &Catalog) -> Transition {
    let keys = catalog.keys();

    match action {
        Action::MoveUp => Transition::Screen(Screen::Home {
            cursor: cursor.saturating_sub(1),
        }),
        Action::MoveDown => Transition::Screen(Screen::Home {
            cursor: step_down(cursor, keys.len(), 1),
        }),
        Action::Enter => match keys.get(cursor) {
            Some(&key) => open_unit(browser, key, catalog, Screen::Home { cursor }),
            None => Transition::Screen(Screen::Home { cursor }),
        },
        Action::NumberKey(n) => open_unit(browser, UnitKey(*n), catalog, Screen::Home { cursor }),
        Action::ShowGuide => Transition::Screen(Screen::Guide { scroll: 0 }),
        Action::Quit => Transition::Quit,
        _ => Transition::Screen(Screen::Home { cursor }),
    }
}

/// QuestionList while browsing: cursor, drill-down, unit switching.
fn update_question_list(
    cursor: usize,
    browser: &Browser,
    action: &Action,
    catalog: &Catalog,
) -> Transition {
    let listing = browser.listing(catalog);
    let len = listing.len();
    let stay = |cursor| Transition::Screen(Screen::QuestionList {
        cursor,
        mode: InputMode::Browse,
    });

    match action {
        Action::MoveUp => stay(cursor.saturating_sub(1)),
        Action::MoveDown => stay(step_down(cursor, len, 1)),
        Action::PageUp => stay(cursor.saturating_sub(PAGE)),
        Action::PageDown => stay(step_down(cursor, len, PAGE)),
        Action::Enter => match &listing {
            Listing::Questions { questions, .. } => match questions.get(cursor) {
                Some(q) => Transition::Screen(Screen::question_detail(q.id.clone())),
                None => stay(cursor),
            },
            _ => stay(cursor),
        },
        Action::StartSearch => Transition::Screen(Screen::QuestionList {
            cursor,
            mode: InputMode::Search,
        }),
        Action::ClearSearch => Transition::Navigate {
            browser: browser.set_search_term(""),
            screen: Screen::question_list(),
        },
        Action::NextUnit => switch_unit(browser, catalog, 1, cursor),
        Action::PrevUnit => switch_unit(browser, catalog, -1, cursor),
        Action::Back => {
            let keys = catalog.keys();
            let home_cursor = browser
                .selected_unit()
                .and_then(|key| keys.iter().position(|k| *k == key))
                .unwrap_or(0);
            Transition::Navigate {
                browser: browser.go_back(),
                screen: Screen::Home { cursor: home_cursor },
            }
        }
        Action::ShowGuide => Transition::Screen(Screen::Guide { scroll: 0 }),
        Action::Quit => Transition::Quit,
        _ => stay(cursor),
    }
}

/// QuestionList with the search box focused: edit the term.
///
/// Every edit resets the cursor, since the visible list changes.
fn update_search(cursor: usize, browser: &Browser, action: &Action, catalog: &Catalog) -> Transition {
    let searching = |browser: Browser| Transition::Navigate {
        browser,
        screen: Screen::QuestionList {
            cursor: 0,
            mode: InputMode::Search,
        },
    };

    match action {
        Action::Input(c) => {
            let mut term = browser.search_term().to_string();
            term.push(*c);
            searching(browser.set_search_term(term))
        }
        Action::Backspace => {
            let mut term = browser.search_term().to_string();
            if term.pop().is_some() {
                searching(browser.set_search_term(term))
            } else {
                Transition::Screen(Screen::QuestionList {
                    cursor,
                    mode: InputMode::Search,
                })
            }
        }
        Action::ClearSearch => searching(browser.set_search_term("")),
        Action::MoveUp | Action::MoveDown | Action::PageUp | Action::PageDown => {
            // Arrow keys still move through results while typing.
            match update_question_list(cursor, browser, action, catalog) {
                Transition::Screen(Screen::QuestionList { cursor, .. }) => {
                    Transition::Screen(Screen::QuestionList {
                        cursor,
                        mode: InputMode::Search,
                    })
                }
                other => other,
            }
        }
        Action::EndSearch | Action::Enter | Action::Back => Transition::Screen(Screen::QuestionList {
            cursor,
            mode: InputMode::Browse,
        }),
        Action::Quit => Transition::Quit,
        _ => Transition::Screen(Screen::QuestionList {
            cursor,
            mode: InputMode::Search,
        }),
    }
}

/// QuestionDetail: scroll the card, back to the list.
fn update_question_detail(
    id: String,
    scroll: usize,
    browser: &Browser,
    action: &Action,
    catalog: &Catalog,
) -> Transition {
    let line_count = browser
        .selected_unit()
        .and_then(|unit| catalog.question(unit, &id).ok())
        .map(|q| card_lines(q).len())
        .unwrap_or(0);

    match action {
        Action::MoveUp | Action::MoveDown | Action::PageUp | Action::PageDown => {
            Transition::Screen(Screen::QuestionDetail {
                scroll: scroll_by(scroll, line_count, action),
                id,
            })
        }
        Action::Back | Action::Enter => {
            // Land back on the same question in the (possibly filtered) list.
            let cursor = browser
                .visible_questions(catalog)
                .and_then(|visible| visible.iter().position(|q| q.id == id))
                .unwrap_or(0);
            Transition::Screen(Screen::QuestionList {
                cursor,
                mode: InputMode::Browse,
            })
        }
        Action::Quit => Transition::Quit,
        _ => Transition::Screen(Screen::QuestionDetail { id, scroll }),
    }
}

/// Guide: scroll, then return to wherever the user came from.
fn update_guide(scroll: usize, browser: &Browser, action: &Action, catalog: &Catalog) -> Transition {
    let line_count = guide_lines(catalog.introduction()).len();

    match action {
        Action::MoveUp | Action::MoveDown | Action::PageUp | Action::PageDown => {
            Transition::Screen(Screen::Guide {
                scroll: scroll_by(scroll, line_count, action),
            })
        }
        Action::Back | Action::ShowGuide => {
            if browser.selected_unit().is_some() {
                Transition::Screen(Screen::question_list())
            } else {
                Transition::Screen(Screen::home())
            }
        }
        Action::Quit => Transition::Quit,
        _ => Transition::Screen(Screen::Guide { scroll }),
    }
}

// ============================================================================
// HELPERS
// ============================================================================

/// Select `key`, landing on its question list. Unknown keys leave the
/// user on `fallback`.
fn open_unit(browser: &Browser, key: UnitKey, catalog: &Catalog, fallback: Screen) -> Transition {
    match browser.select_unit(catalog, key) {
        Ok(browser) => Transition::Navigate {
            browser,
            screen: Screen::question_list(),
        },
        Err(_) => Transition::Screen(fallback),
    }
}

/// Move to the neighbouring unit in key order, keeping the search text.
fn switch_unit(browser: &Browser, catalog: &Catalog, direction: isize, cursor: usize) -> Transition {
    let keys = catalog.keys();
    let target = browser
        .selected_unit()
        .and_then(|key| keys.iter().position(|k| *k == key))
        .and_then(|i| i.checked_add_signed(direction))
        .and_then(|i| keys.get(i).copied());

    match target {
        Some(key) => open_unit(
            browser,
            key,
            catalog,
            Screen::QuestionList {
                cursor,
                mode: InputMode::Browse,
            },
        ),
        None => Transition::Screen(Screen::QuestionList {
            cursor,
            mode: InputMode::Browse,
        }),
    }
}

/// Advance a cursor by `by` rows, clamped to the last row.
fn step_down(cursor: usize, len: usize, by: usize) -> usize {
    if len == 0 {
        0
    } else {
        cursor.saturating_add(by).min(len - 1)
    }
}

/// Apply a scroll action to an offset over `line_count` lines.
fn scroll_by(scroll: usize, line_count: usize, action: &Action) -> usize {
    match action {
        Action::MoveUp => scroll.saturating_sub(1),
        Action::MoveDown => step_down(scroll, line_count, 1),
        Action::PageUp => scroll.saturating_sub(PAGE),
        Action::PageDown => step_down(scroll, line_count, PAGE),
        _ => scroll,
    }
}

// ============================================================================
// TESTS
// ============================================================================
