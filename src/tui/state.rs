//! TUI state algebra: pure types, zero effects.
//!
//! These types define the entire TUI state space. The transition function
//! (`update`) and rendering layer (`view`) both program against them.
//!
//! Design principle: the selection and search text live in a
//! [`Browser`], owned by [`App`]. Screen variants carry only per-screen
//! transient state (cursor positions, scroll, input focus).
//! List scroll offsets are derived during rendering, not stored here.

use crate::browser::Browser;
use crate::catalog::Catalog;

// ============================================================================
// APPLICATION STATE
// ============================================================================

/// Top-level TUI model.
///
/// Owns the catalog, the browser state and the current screen.
/// The effects layer reads this to know what to render.
#[derive(Debug)]
pub struct App {
    /// Current screen — carries per-screen navigation state.
    pub screen: Screen,

    /// Which unit is open and what has been searched for.
    pub browser: Browser,

    /// The immutable content store.
    pub catalog: Catalog,

    /// Set to true when the app should exit on the next tick.
    pub should_quit: bool,
}

// ============================================================================
// SCREENS
// ============================================================================

/// Whether keystrokes go to the search box or drive navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Browse,
    Search,
}

/// The current TUI screen.
///
/// `Home` is shown while the browser has no unit selected; the other
/// screens assume one is open (except `Guide`, which can sit on top of
/// either).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// Unit picker.
    Home {
        /// Focused row (index into the catalog's units, in key order).
        cursor: usize,
    },

    /// Questions of the selected unit, filtered by the search box.
    QuestionList {
        /// Focused row in the visible list.
        cursor: usize,
        mode: InputMode,
    },

    /// Full marking card for one question.
    QuestionDetail {
        /// Question id within the selected unit.
        id: String,
        /// Lines scrolled past.
        scroll: usize,
    },

    /// The booklet's "how marking works" introduction.
    Guide { scroll: usize },
}

impl Default for Screen {
    fn default() -> Self {
        Screen::home()
    }
}

// ============================================================================
// ACTIONS
// ============================================================================

/// Semantic user action, decoupled from raw key events.
///
/// The effects layer maps key presses to Actions (depending on the
/// input mode). The transition function decides what each Action means
/// per Screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Move cursor (or scroll) up one row.
    MoveUp,
    /// Move cursor (or scroll) down one row.
    MoveDown,
    /// Scroll up a page.
    PageUp,
    /// Scroll down a page.
    PageDown,
    /// Open the focused unit or question.
    Enter,
    /// Navigate back to the previous screen.
    Back,
    /// Open a unit by number (1-9 on Home).
    NumberKey(u8),
    /// Focus the search box.
    StartSearch,
    /// Leave the search box, keeping its contents.
    EndSearch,
    /// Append a character to the search text.
    Input(char),
    /// Delete the last character of the search text.
    Backspace,
    /// Empty the search box.
    ClearSearch,
    /// Switch to the next unit, keeping the search text.
    NextUnit,
    /// Switch to the previous unit, keeping the search text.
    PrevUnit,
    /// Show the marking guide.
    ShowGuide,
    /// Quit the application.
    Quit,
}

// ============================================================================
// TRANSITIONS
// ============================================================================

/// Result of a pure state transition.
///
/// The update function returns this. The effects boundary inspects it
/// to decide what to store and render.
#[derive(Debug, PartialEq)]
pub enum Transition {
    /// Render this screen; browser state unchanged.
    Screen(Screen),
    /// Replace the browser state and render this screen.
    Navigate { browser: Browser, screen: Screen },
    /// Quit the application.
    Quit,
}

// ============================================================================
// CONSTRUCTORS
// ============================================================================

impl App {
    /// Create an App on the unit picker.
    pub fn new(catalog: Catalog) -> Self {
        App {
            screen: Screen::home(),
            browser: Browser::Home,
            catalog,
            should_quit: false,
        }
    }

    /// Create an App with a unit already open (e.g. from `--unit`).
    pub fn with_browser(catalog: Catalog, browser: Browser) -> Self {
        let screen = if browser.selected_unit().is_some() {
            Screen::question_list()
        } else {
            Screen::home()
        };
        App {
            screen,
            browser,
            catalog,
            should_quit: false,
        }
    }

    /// Input mode of the current screen (search only on the question list).
    pub fn input_mode(&self) -> InputMode {
        match &self.screen {
            Screen::QuestionList { mode, .. } => *mode,
            _ => InputMode::Browse,
        }
    }
}

impl Screen {
    /// Unit picker with the cursor on the first unit.
    pub fn home() -> Self {
        Screen::Home { cursor: 0 }
    }

    /// Question list at the top, browsing.
    pub fn question_list() -> Self {
        Screen::QuestionList {
            cursor: 0,
            mode: InputMode::Browse,
        }
    }

    /// Detail card for a question, scrolled to the top.
    pub fn question_detail(id: impl Into<String>) -> Self {
        Screen::QuestionDetail {
            id: id.into(),
            scroll: 0,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
