//! TUI effects boundary: event loop, terminal lifecycle, input mapping.
//!
//! This is the only module with side effects. It wires the pure layers
//! (state, update, view) to the real terminal via crossterm and ratatui.
//!
//! Architecture: two producer threads feed a single mpsc channel.
//! - Input reader thread: forwards crossterm key and mouse events
//! - Loader thread: fetches the deck once and reports the outcome
//! The event loop consumes from the channel, dispatching to pure handlers.

use std::io;
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::terminal::{
    self as term, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;

use crate::gesture::{Gesture, GestureTracker};
use crate::loader::load;
use crate::types::{DeckSource, PresentConfig};

use super::state::{Action, App, AppEvent};
use super::update::{apply, handle_background_event, update};
use super::view::{hit_test, render, screen_layout, Region, ScreenLayout};

// ============================================================================
// KEY MAPPING
// ============================================================================

/// Map a crossterm key event to a semantic Action.
///
/// Returns None for keys that don't map to any action.
pub fn map_key(key: KeyEvent) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match key.code {
        KeyCode::Left | KeyCode::PageUp => Some(Action::Prev),
        KeyCode::Right | KeyCode::PageDown => Some(Action::Next),
        KeyCode::Home => Some(Action::First),
        KeyCode::End => Some(Action::Last),
        KeyCode::Char('n') => Some(Action::ToggleNotes),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}

// ============================================================================
// MOUSE MAPPING
// ============================================================================

/// Cell width assumed when the terminal does not report pixel sizes.
const FALLBACK_CELL_WIDTH_PX: i64 = 8;

/// Pointer state: turns mouse events into actions.
///
/// Clicks on a control activate it immediately. Press/release on the
/// slide region goes through the gesture tracker, with cell columns
/// scaled to pixels so the swipe threshold means the same on any font.
#[derive(Debug)]
pub struct Pointer {
    tracker: GestureTracker,
    px_per_column: i64,
}

impl Pointer {
    pub fn new(tracker: GestureTracker, px_per_column: i64) -> Self {
        Pointer {
            tracker,
            px_per_column: px_per_column.max(1),
        }
    }

    pub fn map(&mut self, mouse: MouseEvent, layout: &ScreenLayout, now_ms: u64) -> Option<Action> {
        let x = i64::from(mouse.column) * self.px_per_column;

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                match hit_test(layout, mouse.column, mouse.row) {
                    Some(Region::Prev) => Some(Action::Prev),
                    Some(Region::Next) => Some(Action::Next),
                    Some(Region::Notes) => Some(Action::ToggleNotes),
                    Some(Region::Slide) => {
                        self.tracker.press(x);
                        None
                    }
                    None => {
                        self.tracker.cancel();
                        None
                    }
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                match self.tracker.release(x, now_ms)? {
                    Gesture::SwipeLeft => Some(Action::Next),
                    Gesture::SwipeRight => Some(Action::Prev),
                    // Same as activating the notes control
                    Gesture::DoubleTap => Some(Action::ToggleNotes),
                }
            }
            _ => None,
        }
    }
}

/// Horizontal pixels per cell, as reported by the terminal.
fn pixels_per_column() -> i64 {
    match term::window_size() {
        Ok(size) if size.width > 0 && size.columns > 0 => {
            i64::from(size.width / size.columns).max(1)
        }
        _ => FALLBACK_CELL_WIDTH_PX,
    }
}

// ============================================================================
// TERMINAL LIFECYCLE
// ============================================================================

/// Set up the terminal for TUI mode.
fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    io::stdout().execute(EnableMouseCapture)?;
    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to normal mode.
fn restore_terminal() -> io::Result<()> {
    io::stdout().execute(DisableMouseCapture)?;
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
// BACKGROUND THREADS
// ============================================================================

/// Spawn a thread that reads crossterm events and forwards input to the channel.
fn spawn_input_reader(tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        loop {
            let forwarded = match event::read() {
                Ok(Event::Key(key)) => tx.send(AppEvent::Key(key)),
                Ok(Event::Mouse(mouse)) => tx.send(AppEvent::Mouse(mouse)),
                Ok(_) => Ok(()), // resize is picked up by the next draw
                Err(_) => break,
            };
            if forwarded.is_err() {
                break; // receiver dropped, TUI is shutting down
            }
        }
    });
}

/// Spawn a thread that loads the deck once and reports the outcome.
fn spawn_loader(source: DeckSource, tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let event = match load(&source) {
            Ok(loaded) => AppEvent::DeckLoaded(loaded.deck),
            Err(e) => AppEvent::LoadFailed(e.to_string()),
        };
        let _ = tx.send(event);
    });
}

// ============================================================================
// EVENT LOOP
// ============================================================================

/// Run the presenter until the user quits.
///
/// The deck is fetched in the background; until it arrives only the
/// loading screen and quit are available.
pub fn run(config: PresentConfig) -> io::Result<()> {
    install_panic_hook();
    let mut terminal = setup_terminal()?;
    let mut app = App::loading();
    let mut pointer = Pointer::new(
        GestureTracker::new(config.swipe_threshold_px, config.double_tap_window),
        pixels_per_column(),
    );
    let started = Instant::now();

    let (tx, rx) = mpsc::channel::<AppEvent>();

    spawn_input_reader(tx.clone());
    spawn_loader(config.source, tx);

    let mut layout = screen_layout(Rect::default());

    loop {
        terminal.draw(|frame| {
            layout = screen_layout(frame.area());
            render(&app, frame);
        })?;

        if app.should_quit {
            break;
        }

        // Block on next event from any producer
        let event = match rx.recv() {
            Ok(e) => e,
            Err(_) => break, // all senders dropped
        };

        let action = match event {
            AppEvent::Key(key) => map_key(key),
            AppEvent::Mouse(mouse) => {
                let now_ms = started.elapsed().as_millis() as u64;
                pointer.map(mouse, &layout, now_ms)
            }
            background_event => {
                handle_background_event(&mut app, background_event);
                None
            }
        };

        if let Some(action) = action {
            log::debug!("action: {:?}", action);
            let screen = std::mem::take(&mut app.screen);
            apply(&mut app, update(screen, &action));
        }
    }

    restore_terminal()?;
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;
    use std::time::Duration;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn layout() -> ScreenLayout {
        screen_layout(Rect::new(0, 0, 120, 30))
    }

    /// One pixel per column keeps drag distances readable.
    fn pointer() -> Pointer {
        Pointer::new(GestureTracker::new(50, Duration::from_millis(300)), 1)
    }

    fn drag(pointer: &mut Pointer, from: u16, to: u16, at: u64) -> Option<Action> {
        let layout = layout();
        let down = pointer.map(mouse(MouseEventKind::Down(MouseButton::Left), from, 10), &layout, at);
        assert_eq!(down, None);
        pointer.map(mouse(MouseEventKind::Up(MouseButton::Left), to, 10), &layout, at)
    }

    #[test]
    fn ctrl_c_maps_to_quit() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(key), Some(Action::Quit));
    }

    #[test]
    fn arrows_and_page_keys_navigate() {
        assert_eq!(map_key(key(KeyCode::Left)), Some(Action::Prev));
        assert_eq!(map_key(key(KeyCode::PageUp)), Some(Action::Prev));
        assert_eq!(map_key(key(KeyCode::Right)), Some(Action::Next));
        assert_eq!(map_key(key(KeyCode::PageDown)), Some(Action::Next));
    }

    #[test]
    fn home_and_end_jump() {
        assert_eq!(map_key(key(KeyCode::Home)), Some(Action::First));
        assert_eq!(map_key(key(KeyCode::End)), Some(Action::Last));
    }

    #[test]
    fn n_toggles_notes() {
        assert_eq!(map_key(key(KeyCode::Char('n'))), Some(Action::ToggleNotes));
    }

    #[test]
    fn q_and_esc_quit() {
        assert_eq!(map_key(key(KeyCode::Char('q'))), Some(Action::Quit));
        assert_eq!(map_key(key(KeyCode::Esc)), Some(Action::Quit));
    }

    #[test]
    fn key_release_is_ignored() {
        let release = KeyEvent::new_with_kind_and_state(
            KeyCode::Right,
            KeyModifiers::NONE,
            KeyEventKind::Release,
            KeyEventState::NONE,
        );
        assert_eq!(map_key(release), None);
    }

    #[test]
    fn unmapped_key_returns_none() {
        assert_eq!(map_key(key(KeyCode::Char('z'))), None);
    }

    #[test]
    fn clicking_controls_maps_to_actions() {
        let layout = layout();
        let mut pointer = pointer();
        let row = layout.controls.y;
        let down = MouseEventKind::Down(MouseButton::Left);

        assert_eq!(
            pointer.map(mouse(down, layout.prev.x, row), &layout, 0),
            Some(Action::Prev)
        );
        assert_eq!(
            pointer.map(mouse(down, layout.next.x + 1, row), &layout, 0),
            Some(Action::Next)
        );
        assert_eq!(
            pointer.map(mouse(down, layout.notes.x, row), &layout, 0),
            Some(Action::ToggleNotes)
        );
    }

    #[test]
    fn leftward_drag_of_60_advances_once() {
        let mut pointer = pointer();
        assert_eq!(drag(&mut pointer, 100, 40, 0), Some(Action::Next));
    }

    #[test]
    fn drag_of_40_does_nothing() {
        let mut pointer = pointer();
        assert_eq!(drag(&mut pointer, 100, 60, 0), None);
    }

    #[test]
    fn rightward_drag_goes_back() {
        let mut pointer = pointer();
        assert_eq!(drag(&mut pointer, 20, 90, 0), Some(Action::Prev));
    }

    #[test]
    fn columns_are_scaled_to_pixels() {
        // 8 columns at 8 px each is a 64 px drag
        let mut pointer = Pointer::new(GestureTracker::default(), 8);
        assert_eq!(drag(&mut pointer, 50, 42, 0), Some(Action::Next));
    }

    #[test]
    fn double_click_on_slide_toggles_notes() {
        let mut pointer = pointer();
        assert_eq!(drag(&mut pointer, 30, 30, 1_000), None);
        assert_eq!(drag(&mut pointer, 30, 30, 1_200), Some(Action::ToggleNotes));
    }

    #[test]
    fn slow_clicks_do_not_toggle() {
        let mut pointer = pointer();
        assert_eq!(drag(&mut pointer, 30, 30, 1_000), None);
        assert_eq!(drag(&mut pointer, 30, 30, 1_500), None);
    }

    #[test]
    fn other_mouse_events_are_ignored() {
        let layout = layout();
        let mut pointer = pointer();
        assert_eq!(
            pointer.map(mouse(MouseEventKind::Moved, 10, 10), &layout, 0),
            None
        );
        assert_eq!(
            pointer.map(mouse(MouseEventKind::Down(MouseButton::Right), layout.prev.x, layout.controls.y), &layout, 0),
            None
        );
    }
}
