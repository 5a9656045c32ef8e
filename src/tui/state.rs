//! TUI state algebra: pure types, zero effects.
//!
//! These types define the whole presenter state space. The transition
//! function and the rendering layer both program against them.
//!
//! Screen variants carry the state for that phase of the session. Once
//! a deck is loaded, the controller is the only owner of navigation
//! state; nothing else keeps an index or a notes flag.

use crossterm::event::{KeyEvent, MouseEvent};

use crate::deck::DeckController;
use crate::types::Deck;

// ============================================================================
// APP EVENTS
// ============================================================================

/// Everything the event loop can receive from its channel.
///
/// Two producers feed a single mpsc channel:
/// - An input reader thread sends `Key` and `Mouse` variants
/// - The loader thread sends exactly one of `DeckLoaded` / `LoadFailed`
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    /// Loader finished with a normalized, non-empty deck.
    DeckLoaded(Deck),
    /// Loader failed with this detail.
    LoadFailed(String),
}

// ============================================================================
// APPLICATION STATE
// ============================================================================

/// Top-level TUI model.
#[derive(Debug)]
pub struct App {
    pub screen: Screen,
    /// Set to true when the app should exit on the next tick.
    pub should_quit: bool,
}

// ============================================================================
// SCREENS
// ============================================================================

/// Fixed message shown in the slide region when the deck cannot be loaded.
pub const LOAD_FAILURE_MESSAGE: &str = "Failed to load deck.";

#[derive(Debug, PartialEq)]
pub enum Screen {
    /// Waiting for the loader thread.
    Loading,
    /// Load failed. Terminal for the session: no controls are bound.
    /// The slide region shows [`LOAD_FAILURE_MESSAGE`]; `reason` is the
    /// loader's detail.
    Failed { reason: String },
    /// Deck loaded and mounted.
    Presenting(DeckController),
}

/// Default screen is Loading (used as placeholder during transitions).
impl Default for Screen {
    fn default() -> Self {
        Screen::Loading
    }
}

// ============================================================================
// ACTIONS
// ============================================================================

/// Semantic user action, decoupled from raw key and mouse events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Prev,
    Next,
    First,
    Last,
    /// Activate the notes-toggle control.
    ToggleNotes,
    Quit,
}

// ============================================================================
// TRANSITIONS
// ============================================================================

/// Result of a pure state transition.
#[derive(Debug, PartialEq)]
pub enum Transition {
    /// Render this screen (may be the same or a different screen).
    Screen(Screen),
    Quit,
}

// ============================================================================
// CONSTRUCTORS
// ============================================================================

impl App {
    /// Create an App waiting for its deck.
    pub fn loading() -> Self {
        App {
            screen: Screen::Loading,
            should_quit: false,
        }
    }

    /// Create an App presenting `deck` from its first slide.
    ///
    /// An empty deck lands on the failure screen.
    pub fn with_deck(deck: Deck) -> Self {
        App {
            screen: Screen::presenting(deck),
            should_quit: false,
        }
    }

    /// The controller, when a deck is being presented.
    pub fn controller(&self) -> Option<&DeckController> {
        match &self.screen {
            Screen::Presenting(controller) => Some(controller),
            _ => None,
        }
    }
}

impl Screen {
    pub fn failed(reason: impl Into<String>) -> Self {
        Screen::Failed {
            reason: reason.into(),
        }
    }

    pub fn presenting(deck: Deck) -> Self {
        match DeckController::new(deck) {
            Some(controller) => Screen::Presenting(controller),
            None => Screen::failed("deck has no slides"),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
