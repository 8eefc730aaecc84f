//! TUI color semantics and style constants.
//!
//! Pure data — consumed by the rendering layer for visual consistency.
//!
//! Color semantics:
//! - Cyan: interactive elements (keybinding hints, search prompt, ids)
//! - Yellow: attention (pending units, marker notes)
//! - Dim: de-emphasized (placeholders, tallies, empty results)
//! - Bold: headings

use ratatui::style::{Color, Modifier, Style};

// ============================================================================
// SEMANTIC STYLES
// ============================================================================

/// Interactive element / keybinding hint — cyan.
pub const STYLE_INTERACTIVE: Style = Style::new().fg(Color::Cyan);

/// Attention needed — yellow.
pub const STYLE_WARNING: Style = Style::new().fg(Color::Yellow);

/// De-emphasized text — dark gray.
pub const STYLE_DIM: Style = Style::new().fg(Color::DarkGray);

/// Section headings inside a card or the guide — bold.
pub const STYLE_HEADING: Style = Style::new().add_modifier(Modifier::BOLD);

// ============================================================================
// UI ELEMENT STYLES
// ============================================================================

/// Title bar / header.
pub const STYLE_TITLE: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);

/// Cursor row in a list.
pub const STYLE_CURSOR: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Question id column.
pub const STYLE_ID: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);

/// Marker's note: italic, set apart from the answer text.
pub const STYLE_NOTE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::ITALIC);

/// Search text while the box is focused.
pub const STYLE_SEARCH_ACTIVE: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);

/// Footer / help line.
pub const STYLE_HELP: Style = Style::new().fg(Color::DarkGray);

// ============================================================================
// TESTS
// ============================================================================
