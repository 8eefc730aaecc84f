//! Pure rendering: map App state to ratatui widget trees.
//!
//! Each screen has a dedicated render function. The main `render()`
//! dispatches based on the current Screen variant. Widget-building
//! functions are pure (state in, widgets out); the only effect is
//! Frame::render_widget() which writes to the terminal buffer.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;

use crate::browser::{Browser, Listing};
use crate::catalog::Catalog;
use crate::report::{no_matches_message, unit_heading, PENDING_MESSAGE};
use crate::types::Question;

use super::state::{App, InputMode, Screen};
use super::theme;

const SEARCH_PLACEHOLDER: &str = "Search by question number (e.g., 1.1) or question text...";

// ============================================================================
// DISPATCH
// ============================================================================

/// Render the current screen to the terminal frame.
pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();

    // Common layout: title bar at top, content in middle, help at bottom
    let chunks = Layout::vertical([
        Constraint::Length(1), // title
        Constraint::Min(0),    // content
        Constraint::Length(1), // help
    ])
    .split(area);

    frame.render_widget(render_title(app), chunks[0]);
    frame.render_widget(render_help(&app.screen), chunks[2]);

    let content_area = chunks[1];

    match &app.screen {
        Screen::Home { cursor } => render_home(&app.catalog, *cursor, frame, content_area),
        Screen::QuestionList { cursor, mode } => {
            render_question_list(&app.browser, &app.catalog, *cursor, *mode, frame, content_area);
        }
        Screen::QuestionDetail { id, scroll } => {
            render_question_detail(&app.browser, &app.catalog, id, *scroll, frame, content_area);
        }
        Screen::Guide { scroll } => render_guide(app.catalog.introduction(), *scroll, frame, content_area),
    }
}

// ============================================================================
// SHARED LAYOUT
// ============================================================================

/// Title bar: app name on Home, the open unit elsewhere.
fn render_title(app: &App) -> Paragraph<'static> {
    let unit_title = app
        .browser
        .selected_unit()
        .and_then(|key| app.catalog.unit(key).ok())
        .map(unit_heading);

    let title_text = match (&app.screen, unit_title) {
        (Screen::Guide { .. }, _) => "How marking works".to_string(),
        (Screen::Home { .. }, _) | (_, None) => "AQA GCSE Business · Mark Scheme Navigator".to_string(),
        (_, Some(heading)) => heading,
    };

    Paragraph::new(Line::from(Span::styled(title_text, theme::STYLE_TITLE)))
}

/// Help line showing available keybindings for the current screen.
fn render_help(screen: &Screen) -> Paragraph<'static> {
    let help_text = match screen {
        Screen::Home { .. } => "[j/k] move  [Enter/1-9] open unit  [i] marking guide  [q] quit",
        Screen::QuestionList { mode: InputMode::Browse, .. } => {
            "[j/k] move  [Enter] open  [/] search  [ [ ] ] prev/next unit  [i] guide  [Esc] back  [q] quit"
        }
        Screen::QuestionList { mode: InputMode::Search, .. } => {
            "type to search  [Backspace] delete  [^U] clear  [Enter/Esc] done"
        }
        Screen::QuestionDetail { .. } => "[j/k] scroll  [PgUp/PgDn] page  [Esc] back  [q] quit",
        Screen::Guide { .. } => "[j/k] scroll  [Esc] back  [q] quit",
    };

    Paragraph::new(Span::styled(help_text, theme::STYLE_HELP))
}

/// Keep the cursor row inside a window of `height` rows.
fn scroll_for_cursor(cursor: usize, height: usize) -> u16 {
    let offset = if height > 0 && cursor >= height {
        cursor - height + 1
    } else {
        0
    };
    offset as u16
}

// ============================================================================
// SCREEN: HOME
// ============================================================================

fn render_home(catalog: &Catalog, cursor: usize, frame: &mut Frame, area: Rect) {
    let header = vec![
        Line::from(""),
        Line::from(Span::styled("  Select a unit to view the mark scheme:", theme::STYLE_HEADING)),
        Line::from(""),
    ];
    let header_height = header.len() as u16;

    let chunks = Layout::vertical([Constraint::Length(header_height), Constraint::Min(0)]).split(area);
    frame.render_widget(Paragraph::new(header), chunks[0]);

    let mut lines: Vec<Line> = Vec::new();
    for (i, (key, unit)) in catalog.units().enumerate() {
        let status = if unit.is_pending() {
            Span::styled("  in development", theme::STYLE_WARNING)
        } else {
            Span::styled(format!("  {} questions", unit.questions.len()), theme::STYLE_DIM)
        };

        let spans = vec![
            Span::styled(format!("  Unit {}  ", key), theme::STYLE_INTERACTIVE),
            Span::raw(unit.title.as_str()),
            status,
        ];

        let line = if i == cursor {
            Line::from(spans).style(theme::STYLE_CURSOR)
        } else {
            Line::from(spans)
        };
        lines.push(line);
    }

    if lines.is_empty() {
        lines.push(Line::from(Span::styled("  (no units)", theme::STYLE_DIM)));
    }

    let offset = scroll_for_cursor(cursor, chunks[1].height as usize);
    frame.render_widget(Paragraph::new(lines).scroll((offset, 0)), chunks[1]);
}

// ============================================================================
// SCREEN: QUESTION LIST
// ============================================================================

fn render_question_list(
    browser: &Browser,
    catalog: &Catalog,
    cursor: usize,
    mode: InputMode,
    frame: &mut Frame,
    area: Rect,
) {
    let chunks = Layout::vertical([
        Constraint::Length(1), // search box
        Constraint::Length(1), // spacer
        Constraint::Min(0),    // list
        Constraint::Length(1), // tally
    ])
    .split(area);

    frame.render_widget(render_search_box(browser.search_term(), mode), chunks[0]);

    let listing = browser.listing(catalog);
    let list_area = chunks[2];

    let (lines, tally): (Vec<Line>, String) = match &listing {
        Listing::NothingSelected => (vec![], String::new()),
        Listing::Pending { unit } => (
            vec![Line::from(Span::styled(format!("  {}", PENDING_MESSAGE), theme::STYLE_WARNING))],
            format!("  0 of {} questions", unit.questions.len()),
        ),
        Listing::NoMatches { unit, term } => (
            vec![Line::from(Span::styled(
                format!("  {}", no_matches_message(term)),
                theme::STYLE_DIM,
            ))],
            format!("  0 of {} questions", unit.questions.len()),
        ),
        Listing::Questions { unit, questions } => {
            let lines = questions
                .iter()
                .enumerate()
                .map(|(i, q)| question_row(q, i == cursor))
                .collect();
            (
                lines,
                format!("  Showing {} of {} questions", questions.len(), unit.questions.len()),
            )
        }
    };

    let offset = scroll_for_cursor(cursor, list_area.height as usize);
    frame.render_widget(Paragraph::new(lines).scroll((offset, 0)), list_area);
    frame.render_widget(Paragraph::new(Span::styled(tally, theme::STYLE_DIM)), chunks[3]);
}

/// The search prompt, with a block cursor while focused.
fn render_search_box(term: &str, mode: InputMode) -> Paragraph<'_> {
    let prompt = Span::styled("  / ", theme::STYLE_INTERACTIVE);

    let line = match mode {
        InputMode::Search => Line::from(vec![
            prompt,
            Span::styled(term, theme::STYLE_SEARCH_ACTIVE),
            Span::styled("█", theme::STYLE_INTERACTIVE),
        ]),
        InputMode::Browse if term.is_empty() => {
            Line::from(vec![prompt, Span::styled(SEARCH_PLACEHOLDER, theme::STYLE_DIM)])
        }
        InputMode::Browse => Line::from(vec![prompt, Span::raw(term)]),
    };

    Paragraph::new(line)
}

/// One row of the question list: id column, then the question text.
fn question_row(q: &Question, is_cursor: bool) -> Line<'_> {
    let spans = vec![
        Span::raw("  "),
        Span::styled(format!("{:<7}", q.id), theme::STYLE_ID),
        Span::raw(q.question.as_str()),
    ];

    if is_cursor {
        Line::from(spans).style(theme::STYLE_CURSOR)
    } else {
        Line::from(spans)
    }
}

// ============================================================================
// SCREEN: QUESTION DETAIL
// ============================================================================

fn render_question_detail(
    browser: &Browser,
    catalog: &Catalog,
    id: &str,
    scroll: usize,
    frame: &mut Frame,
    area: Rect,
) {
    let question = browser
        .selected_unit()
        .and_then(|unit| catalog.question(unit, id).ok());

    let Some(question) = question else {
        let err = Paragraph::new("Question not found").style(theme::STYLE_WARNING);
        frame.render_widget(err, area);
        return;
    };

    render_scrolled(card_lines(question), scroll, frame, area);
}

/// The marking card for one question.
///
/// One `Line` per source line, so scrolling moves through whole
/// lines of the card regardless of terminal width.
pub fn card_lines(q: &Question) -> Vec<Line<'_>> {
    let mut lines = vec![
        Line::from(vec![
            Span::styled(q.id.as_str(), theme::STYLE_ID),
            Span::raw("  "),
            Span::styled(q.question.as_str(), theme::STYLE_HEADING),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Marks for this question: ", theme::STYLE_HEADING),
            Span::raw(q.marks.as_str()),
        ]),
        Line::from(q.scheme.as_str()),
    ];

    let blocks = [
        ("Answers may include:", q.answers.as_deref(), None),
        ("Examples of developed answers:", q.examples.as_deref(), None),
        ("Markers note:", q.note.as_deref(), Some(theme::STYLE_NOTE)),
    ];

    for (heading, body, style) in blocks {
        let Some(body) = body else { continue };
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(heading, theme::STYLE_HEADING)));
        for text in body.lines() {
            lines.push(match style {
                Some(style) => Line::from(Span::styled(text, style)),
                None => Line::from(text),
            });
        }
    }

    lines
}

// ============================================================================
// SCREEN: GUIDE
// ============================================================================

fn render_guide(introduction: &str, scroll: usize, frame: &mut Frame, area: Rect) {
    render_scrolled(guide_lines(introduction), scroll, frame, area);
}

/// The marking guide. Lines wrapped in `**` are shown as headings.
pub fn guide_lines(introduction: &str) -> Vec<Line<'_>> {
    introduction
        .lines()
        .map(|text| {
            match text.strip_prefix("**").and_then(|t| t.strip_suffix("**")) {
                Some(heading) => Line::from(Span::styled(heading, theme::STYLE_HEADING)),
                None => Line::from(text),
            }
        })
        .collect()
}

/// Wrap `lines` into `area`, starting at line `scroll` (clamped).
fn render_scrolled(lines: Vec<Line<'_>>, scroll: usize, frame: &mut Frame, area: Rect) {
    let inner = Rect {
        x: area.x + 1,
        width: area.width.saturating_sub(2),
        ..area
    };
    let skip = scroll.min(lines.len().saturating_sub(1));
    let visible: Vec<Line> = lines.into_iter().skip(skip).collect();

    let paragraph = Paragraph::new(visible).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, inner);
}

// ============================================================================
// TESTS
// ============================================================================
