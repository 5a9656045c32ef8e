//! Pure rendering: map App state to ratatui widget trees.
//!
//! The screen is split into fixed regions: header (brand and position
//! indicator), slide region, controls row and help line. The same
//! layout function drives both drawing and mouse hit-testing, so a click
//! always lands on what is visible.

use ratatui::layout::{Alignment, Constraint, Layout, Position, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph, Wrap};
use ratatui::Frame;

use crate::deck::DeckController;
use crate::slide::{Node, SlideTree};

use super::state::{App, Screen, LOAD_FAILURE_MESSAGE};
use super::theme;

// ============================================================================
// LAYOUT
// ============================================================================

pub const PREV_LABEL: &str = "[< Prev]";
pub const NEXT_LABEL: &str = "[Next >]";
pub const NOTES_LABEL_ON: &str = "[Notes: on ]";
pub const NOTES_LABEL_OFF: &str = "[Notes: off]";

/// Screen regions, shared by rendering and hit-testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub header: Rect,
    pub slide: Rect,
    pub controls: Rect,
    pub help: Rect,
    pub prev: Rect,
    pub notes: Rect,
    pub next: Rect,
}

/// Clickable region under a pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Prev,
    Notes,
    Next,
    Slide,
}

pub fn screen_layout(area: Rect) -> ScreenLayout {
    let rows = Layout::vertical([
        Constraint::Length(1), // header
        Constraint::Min(0),    // slide
        Constraint::Length(1), // controls
        Constraint::Length(1), // help
    ])
    .split(area);

    let buttons = Layout::horizontal([
        Constraint::Length(PREV_LABEL.len() as u16),
        Constraint::Length(2),
        Constraint::Length(NOTES_LABEL_OFF.len() as u16),
        Constraint::Length(2),
        Constraint::Length(NEXT_LABEL.len() as u16),
        Constraint::Min(0),
    ])
    .split(rows[2]);

    ScreenLayout {
        header: rows[0],
        slide: rows[1],
        controls: rows[2],
        help: rows[3],
        prev: buttons[0],
        notes: buttons[2],
        next: buttons[4],
    }
}

/// Which region, if any, contains the cell at (column, row).
pub fn hit_test(layout: &ScreenLayout, column: u16, row: u16) -> Option<Region> {
    let position = Position::new(column, row);
    if layout.prev.contains(position) {
        Some(Region::Prev)
    } else if layout.notes.contains(position) {
        Some(Region::Notes)
    } else if layout.next.contains(position) {
        Some(Region::Next)
    } else if layout.slide.contains(position) {
        Some(Region::Slide)
    } else {
        None
    }
}

// ============================================================================
// DISPATCH
// ============================================================================

/// Render the current screen to the terminal frame.
pub fn render(app: &App, frame: &mut Frame) {
    let layout = screen_layout(frame.area());

    match &app.screen {
        Screen::Loading => {
            frame.render_widget(render_brand(None), layout.header);
            let loading = Paragraph::new(Span::styled("  Loading deck...", theme::STYLE_DIM));
            frame.render_widget(loading, layout.slide);
            frame.render_widget(render_help(&app.screen), layout.help);
        }
        Screen::Failed { .. } => {
            frame.render_widget(render_brand(None), layout.header);
            let failed = Paragraph::new(Span::styled(LOAD_FAILURE_MESSAGE, theme::STYLE_DANGER))
                .wrap(Wrap { trim: false });
            frame.render_widget(failed, layout.slide);
            frame.render_widget(render_help(&app.screen), layout.help);
        }
        Screen::Presenting(controller) => {
            frame.render_widget(render_brand(Some(controller.brand())), layout.header);
            let indicator = Paragraph::new(Span::styled(
                controller.indicator().to_string(),
                theme::STYLE_INDICATOR,
            ))
            .alignment(Alignment::Right);
            frame.render_widget(indicator, layout.header);

            render_slide_tree(controller.mounted(), frame, layout.slide);
            render_controls(controller, frame, &layout);
            frame.render_widget(render_help(&app.screen), layout.help);
        }
    }
}

// ============================================================================
// CHROME
// ============================================================================

fn render_brand(brand: Option<&str>) -> Paragraph<'static> {
    let text = brand.unwrap_or(env!("CARGO_PKG_NAME")).to_string();
    Paragraph::new(Line::from(vec![Span::styled(text, theme::STYLE_BRAND)]))
}

fn render_help(screen: &Screen) -> Paragraph<'static> {
    let help_text = match screen {
        Screen::Loading | Screen::Failed { .. } => "[q] quit",
        Screen::Presenting(_) => {
            "[←/→] move  [n] notes  [Home/End] jump  [drag] swipe  [double-click] notes  [q] quit"
        }
    };

    Paragraph::new(Span::styled(help_text, theme::STYLE_HELP))
}

fn render_controls(controller: &DeckController, frame: &mut Frame, layout: &ScreenLayout) {
    frame.render_widget(
        Paragraph::new(Span::styled(PREV_LABEL, theme::STYLE_CONTROL)),
        layout.prev,
    );

    let (label, style) = if controller.notes_pressed() {
        (NOTES_LABEL_ON, theme::STYLE_CONTROL_PRESSED)
    } else {
        (NOTES_LABEL_OFF, theme::STYLE_CONTROL)
    };
    frame.render_widget(Paragraph::new(Span::styled(label, style)), layout.notes);

    frame.render_widget(
        Paragraph::new(Span::styled(NEXT_LABEL, theme::STYLE_CONTROL)),
        layout.next,
    );
}

// ============================================================================
// SLIDE REGION
// ============================================================================

/// Smallest notes box: borders plus one line.
const MIN_NOTE_HEIGHT: u16 = 3;

/// Shown in the last content row when slide content does not fit.
const OVERFLOW_MARKER: &str = "  … more";

/// Rows `lines` take when wrapped at `width`. Estimated from display
/// width, so word wrapping may need a row more.
fn wrapped_height(lines: &[Line], width: u16) -> u16 {
    let width = usize::from(width.max(1));
    let rows: usize = lines
        .iter()
        .map(|line| line.width().max(1).div_ceil(width))
        .sum();
    rows.min(usize::from(u16::MAX)) as u16
}

fn render_slide_tree(tree: &SlideTree, frame: &mut Frame, area: Rect) {
    let visible_notes: Vec<&str> = tree
        .nodes
        .iter()
        .filter_map(|node| match node {
            Node::SpeakerNote { text, visible: true } => Some(text.as_str()),
            _ => None,
        })
        .collect();

    let note_lines: Vec<Line> = visible_notes
        .iter()
        .flat_map(|note| note.lines())
        .map(|line| Line::from(line.to_string()))
        .collect();

    // Notes get what they need, up to half the slide region
    let (note_height, notes_clipped) = if visible_notes.is_empty() {
        (0, false)
    } else {
        let needed = wrapped_height(&note_lines, area.width.saturating_sub(2)).saturating_add(2);
        let cap = (area.height / 2).max(MIN_NOTE_HEIGHT);
        (needed.min(cap), needed > cap)
    };

    let chunks = Layout::vertical([
        Constraint::Min(0),              // content
        Constraint::Length(note_height), // speaker notes
        Constraint::Length(1),           // progress bar
    ])
    .split(area);

    let variant = tree.variant();
    let mut lines = vec![Line::from("")];

    for node in &tree.nodes {
        match node {
            Node::Title(text) => {
                lines.push(Line::from(Span::styled(
                    text.clone(),
                    theme::title_style(variant),
                )));
            }
            Node::Subtitle(text) => {
                lines.push(Line::from(Span::styled(text.clone(), theme::STYLE_SUBTITLE)));
            }
            Node::List(items) => {
                lines.push(Line::from(""));
                for item in items {
                    lines.push(Line::from(vec![
                        Span::styled("  • ", theme::STYLE_BULLET),
                        Span::raw(item.clone()),
                    ]));
                }
            }
            // Drawn in their own boxes below
            Node::SpeakerNote { .. } | Node::ProgressBar { .. } => {}
        }
    }

    let mut content_area = chunks[0];
    if content_area.height > 1 && wrapped_height(&lines, content_area.width) > content_area.height {
        let split = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).split(content_area);
        content_area = split[0];
        frame.render_widget(
            Paragraph::new(Span::styled(OVERFLOW_MARKER, theme::STYLE_DIM)),
            split[1],
        );
    }

    let alignment = if variant == Some("title") {
        Alignment::Center
    } else {
        Alignment::Left
    };
    let content = Paragraph::new(lines)
        .alignment(alignment)
        .wrap(Wrap { trim: false });
    frame.render_widget(content, content_area);

    if !visible_notes.is_empty() {
        let title = if notes_clipped { "Notes (more)" } else { "Notes" };
        let notes = Paragraph::new(note_lines)
            .style(theme::STYLE_NOTE)
            .block(Block::default().borders(Borders::ALL).title(title))
            .wrap(Wrap { trim: false });
        frame.render_widget(notes, chunks[1]);
    }

    let percent = tree.progress().unwrap_or(0).min(100);
    let gauge = Gauge::default()
        .gauge_style(theme::STYLE_PROGRESS)
        .percent(u16::from(percent))
        .label(format!("{}%", percent));
    frame.render_widget(gauge, chunks[2]);
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Deck, Slide};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn make_terminal() -> Terminal<TestBackend> {
        let backend = TestBackend::new(80, 20);
        Terminal::new(backend).unwrap()
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol().to_string())
            .collect()
    }

    fn deck() -> Deck {
        Deck {
            title: "T".into(),
            slides: vec![
                Slide {
                    note: Some("remember the demo".into()),
                    ..Slide::titled("S1")
                },
                Slide {
                    subtitle: Some("details".into()),
                    bullets: vec!["x".into()],
                    ..Slide::titled("S2")
                },
            ],
        }
    }

    fn draw(app: &App) -> String {
        let mut terminal = make_terminal();
        terminal
            .draw(|frame| render(app, frame))
            .expect("render should not panic");
        buffer_text(&terminal)
    }

    #[test]
    fn loading_screen_renders() {
        let content = draw(&App::loading());
        assert!(content.contains("Loading deck"));
        assert!(!content.contains(PREV_LABEL));
    }

    #[test]
    fn failed_screen_shows_message_without_controls() {
        let app = App {
            screen: Screen::failed("deck request failed with HTTP status 404"),
            should_quit: false,
        };
        let content = draw(&app);
        assert!(content.contains("Failed to load deck."));
        assert!(!content.contains(PREV_LABEL));
        assert!(!content.contains(NEXT_LABEL));
    }

    #[test]
    fn first_slide_shows_title_indicator_and_progress() {
        let content = draw(&App::with_deck(deck()));
        assert!(content.contains("S1"));
        assert!(content.contains("1 / 2"));
        assert!(content.contains("50%"));
        assert!(content.contains(NOTES_LABEL_OFF));
        assert!(!content.contains("remember the demo"), "notes start hidden");
    }

    #[test]
    fn second_slide_shows_bullets_and_subtitle() {
        let mut app = App::with_deck(deck());
        if let Screen::Presenting(controller) = &mut app.screen {
            controller.next();
        }
        let content = draw(&app);
        assert!(content.contains("S2"));
        assert!(content.contains("details"));
        assert!(content.contains("• x"));
        assert!(content.contains("2 / 2"));
        assert!(content.contains("100%"));
    }

    #[test]
    fn toggled_notes_are_drawn_and_control_pressed() {
        let mut app = App::with_deck(deck());
        if let Screen::Presenting(controller) = &mut app.screen {
            controller.toggle_notes();
        }
        let content = draw(&app);
        assert!(content.contains("remember the demo"));
        assert!(content.contains(NOTES_LABEL_ON));
    }

    fn presenting_one(slide: Slide) -> App {
        App::with_deck(Deck {
            title: "T".into(),
            slides: vec![slide],
        })
    }

    fn with_notes_shown(mut app: App) -> App {
        if let Screen::Presenting(controller) = &mut app.screen {
            controller.toggle_notes();
        }
        app
    }

    #[test]
    fn notes_box_grows_with_the_note() {
        let note = (1..=6).map(|i| format!("line {}", i)).collect::<Vec<_>>().join("\n");
        let app = with_notes_shown(presenting_one(Slide {
            note: Some(note),
            ..Slide::titled("S1")
        }));
        let content = draw(&app);
        assert!(content.contains("line 1"));
        assert!(content.contains("line 6"));
        assert!(!content.contains("Notes (more)"));
    }

    #[test]
    fn oversized_note_is_marked() {
        let note = (1..=20).map(|i| format!("line {}", i)).collect::<Vec<_>>().join("\n");
        let app = with_notes_shown(presenting_one(Slide {
            note: Some(note),
            ..Slide::titled("S1")
        }));
        let content = draw(&app);
        assert!(content.contains("Notes (more)"));
        assert!(content.contains("line 1"));
        assert!(content.contains("S1"), "content keeps the other half");
    }

    #[test]
    fn overflowing_content_is_marked() {
        let app = presenting_one(Slide {
            bullets: (1..=30).map(|i| format!("point {}", i)).collect(),
            ..Slide::titled("S1")
        });
        let content = draw(&app);
        assert!(content.contains("… more"));
        assert!(content.contains("50%") || content.contains("100%"));
    }

    #[test]
    fn fitting_content_has_no_marker() {
        let content = draw(&App::with_deck(deck()));
        assert!(!content.contains("… more"));
    }

    #[test]
    fn wrapped_height_counts_wrapped_rows() {
        let lines = vec![Line::from("x".repeat(25)), Line::from(""), Line::from("short")];
        assert_eq!(wrapped_height(&lines, 10), 3 + 1 + 1);
        assert_eq!(wrapped_height(&lines, 0), 25 + 1 + 5);
    }

    #[test]
    fn brand_shows_deck_title() {
        let app = App::with_deck(Deck {
            title: "Quarterly Review".into(),
            slides: vec![Slide::default()],
        });
        assert!(draw(&app).contains("Quarterly Review"));
    }

    #[test]
    fn layout_regions_do_not_overlap() {
        let layout = screen_layout(Rect::new(0, 0, 80, 20));
        assert_eq!(layout.header.height, 1);
        assert_eq!(layout.slide.y, 1);
        assert_eq!(layout.slide.height, 17);
        assert_eq!(layout.controls.y, 18);
        assert_eq!(layout.help.y, 19);
        assert!(layout.prev.right() <= layout.notes.x);
        assert!(layout.notes.right() <= layout.next.x);
    }

    #[test]
    fn hit_test_finds_controls_and_slide() {
        let layout = screen_layout(Rect::new(0, 0, 80, 20));
        assert_eq!(hit_test(&layout, layout.prev.x, 18), Some(Region::Prev));
        assert_eq!(hit_test(&layout, layout.notes.x + 1, 18), Some(Region::Notes));
        assert_eq!(hit_test(&layout, layout.next.x, 18), Some(Region::Next));
        assert_eq!(hit_test(&layout, 40, 10), Some(Region::Slide));
        assert_eq!(hit_test(&layout, 40, 0), None);
        assert_eq!(hit_test(&layout, 79, 18), None);
    }

    #[test]
    fn tiny_terminal_renders_without_panic() {
        let mut terminal = Terminal::new(TestBackend::new(10, 3)).unwrap();
        let app = App::with_deck(deck());
        terminal
            .draw(|frame| render(&app, frame))
            .expect("render should not panic");
    }
}
