//! TUI effects boundary: event loop, terminal lifecycle, key mapping.
//!
//! This is the only module with side effects. It wires the pure layers
//! (state, update, view) to the real terminal via crossterm and ratatui.
//! Decisions live in the pure layers.
//!
//! The loop is single-threaded: read one key, run the transition to
//! completion, redraw.

use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::browser::Browser;

use super::state::{Action, App, InputMode, Transition};
use super::update::update;
use super::view::render;

// ============================================================================
// KEY MAPPING
// ============================================================================

/// Map a crossterm key event to a semantic Action.
///
/// While the search box is focused, printable keys become text input.
/// Returns None for keys that don't map to any action.
pub fn map_key(key: KeyEvent, mode: InputMode) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            KeyCode::Char('u') => Some(Action::ClearSearch),
            _ => None,
        };
    }

    match mode {
        InputMode::Search => map_search_key(key),
        InputMode::Browse => map_browse_key(key),
    }
}

fn map_search_key(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Enter | KeyCode::Esc => Some(Action::EndSearch),
        KeyCode::Backspace => Some(Action::Backspace),
        KeyCode::Up => Some(Action::MoveUp),
        KeyCode::Down => Some(Action::MoveDown),
        KeyCode::PageUp => Some(Action::PageUp),
        KeyCode::PageDown => Some(Action::PageDown),
        KeyCode::Char(c) => Some(Action::Input(c)),
        _ => None,
    }
}

fn map_browse_key(key: KeyEvent) -> Option<Action> {
    match key.code {
        // Navigation
        KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveDown),
        KeyCode::PageUp => Some(Action::PageUp),
        KeyCode::PageDown | KeyCode::Char(' ') => Some(Action::PageDown),
        KeyCode::Enter => Some(Action::Enter),
        KeyCode::Esc | KeyCode::Backspace => Some(Action::Back),

        // Units
        KeyCode::Char(c @ '1'..='9') => Some(Action::NumberKey(c as u8 - b'0')),
        KeyCode::Char(']') | KeyCode::Right => Some(Action::NextUnit),
        KeyCode::Char('[') | KeyCode::Left => Some(Action::PrevUnit),

        // Search
        KeyCode::Char('/') => Some(Action::StartSearch),

        KeyCode::Char('i') | KeyCode::Char('?') => Some(Action::ShowGuide),
        KeyCode::Char('q') => Some(Action::Quit),

        _ => None,
    }
}

// ============================================================================
// TERMINAL LIFECYCLE
// ============================================================================

/// Set up the terminal for TUI mode.
fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to normal mode.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Install a panic hook that restores the terminal before printing the panic.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Best-effort terminal restoration
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}

// ============================================================================
// EVENT LOOP
// ============================================================================

/// Run the TUI until the user quits.
///
/// This is the main entry point for the TUI. It takes ownership of a
/// prepared App (catalog loaded, maybe a unit preselected).
pub fn run(mut app: App) -> io::Result<()> {
    install_panic_hook();
    let mut terminal = setup_terminal()?;

    let result = event_loop(&mut terminal, &mut app);

    restore_terminal()?;
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|frame| render(app, frame))?;

        if app.should_quit {
            return Ok(());
        }

        // Resize and mouse events just trigger a redraw
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        if let Some(action) = map_key(key, app.input_mode()) {
            dispatch(app, &action);
        }
    }
}

/// Run one action through the pure transition and store the result.
fn dispatch(app: &mut App, action: &Action) {
    let screen = std::mem::take(&mut app.screen);

    match update(screen, &app.browser, action, &app.catalog) {
        Transition::Screen(screen) => {
            app.screen = screen;
        }
        Transition::Navigate { browser, screen } => {
            log_browser_change(&app.browser, &browser);
            app.browser = browser;
            app.screen = screen;
        }
        Transition::Quit => {
            app.should_quit = true;
        }
    }

    if let Action::NumberKey(n) = action {
        if app.browser.selected_unit().is_none() {
            log::warn!("no unit {} in catalog", n);
        }
    }
}

fn log_browser_change(old: &Browser, new: &Browser) {
    if old.selected_unit() != new.selected_unit() {
        match new.selected_unit() {
            Some(unit) => log::debug!("selected unit {} (search {:?})", unit, new.search_term()),
            None => log::debug!("back to unit picker"),
        }
    } else if old.search_term() != new.search_term() {
        log::trace!("search term {:?}", new.search_term());
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::tui::state::Screen;
    use crate::types::UnitKey;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn ctrl_c_quits_in_both_modes() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(ctrl_c, InputMode::Browse), Some(Action::Quit));
        assert_eq!(map_key(ctrl_c, InputMode::Search), Some(Action::Quit));
    }

    #[test]
    fn ctrl_u_clears_search() {
        let ctrl_u = KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL);
        assert_eq!(map_key(ctrl_u, InputMode::Search), Some(Action::ClearSearch));
    }

    #[test]
    fn vim_keys_map_to_movement() {
        assert_eq!(map_key(key(KeyCode::Char('j')), InputMode::Browse), Some(Action::MoveDown));
        assert_eq!(map_key(key(KeyCode::Char('k')), InputMode::Browse), Some(Action::MoveUp));
    }

    #[test]
    fn letters_are_input_while_searching() {
        for c in ['j', 'k', 'q', '/', '1', ' ', 'Q'] {
            assert_eq!(map_key(key(KeyCode::Char(c)), InputMode::Search), Some(Action::Input(c)));
        }
    }

    #[test]
    fn arrows_move_while_searching() {
        assert_eq!(map_key(key(KeyCode::Down), InputMode::Search), Some(Action::MoveDown));
        assert_eq!(map_key(key(KeyCode::Up), InputMode::Search), Some(Action::MoveUp));
    }

    #[test]
    fn enter_and_esc_end_search() {
        assert_eq!(map_key(key(KeyCode::Enter), InputMode::Search), Some(Action::EndSearch));
        assert_eq!(map_key(key(KeyCode::Esc), InputMode::Search), Some(Action::EndSearch));
    }

    #[test]
    fn slash_starts_search() {
        assert_eq!(map_key(key(KeyCode::Char('/')), InputMode::Browse), Some(Action::StartSearch));
    }

    #[test]
    fn number_keys_map_to_number_actions() {
        for n in 1..=9u8 {
            let k = key(KeyCode::Char((b'0' + n) as char));
            assert_eq!(map_key(k, InputMode::Browse), Some(Action::NumberKey(n)));
        }
    }

    #[test]
    fn brackets_switch_units() {
        assert_eq!(map_key(key(KeyCode::Char(']')), InputMode::Browse), Some(Action::NextUnit));
        assert_eq!(map_key(key(KeyCode::Char('[')), InputMode::Browse), Some(Action::PrevUnit));
    }

    #[test]
    fn esc_maps_to_back() {
        assert_eq!(map_key(key(KeyCode::Esc), InputMode::Browse), Some(Action::Back));
    }

    #[test]
    fn unmapped_key_returns_none() {
        assert_eq!(map_key(key(KeyCode::Char('z')), InputMode::Browse), None);
        assert_eq!(map_key(key(KeyCode::Tab), InputMode::Search), None);
    }

    // -- dispatch --

    #[test]
    fn typing_session_filters_and_back_clears() {
        let mut app = App::new(Catalog::builtin().unwrap());

        dispatch(&mut app, &Action::NumberKey(1));
        assert_eq!(app.browser.selected_unit(), Some(UnitKey(1)));

        dispatch(&mut app, &Action::StartSearch);
        for c in "cost".chars() {
            dispatch(&mut app, &Action::Input(c));
        }
        assert_eq!(app.browser.search_term(), "cost");
        assert_eq!(app.input_mode(), InputMode::Search);

        dispatch(&mut app, &Action::EndSearch);
        dispatch(&mut app, &Action::NextUnit);
        assert_eq!(app.browser.selected_unit(), Some(UnitKey(2)));
        assert_eq!(app.browser.search_term(), "cost");

        dispatch(&mut app, &Action::Back);
        assert_eq!(app.browser, Browser::Home);
        assert_eq!(app.screen, Screen::Home { cursor: 1 });
    }

    #[test]
    fn quit_sets_flag() {
        let mut app = App::new(Catalog::builtin().unwrap());
        dispatch(&mut app, &Action::Quit);
        assert!(app.should_quit);
    }
}
