//! Pure state transitions: (Screen, Action) → Transition.
//!
//! Fully testable without a terminal. Only the presenting screen
//! accepts navigation; loading and failure screens accept Quit and
//! nothing else.

use super::state::{Action, App, AppEvent, Screen, Transition};

/// Pure state transition function.
pub fn update(screen: Screen, action: &Action) -> Transition {
    if *action == Action::Quit {
        return Transition::Quit;
    }

    match screen {
        Screen::Presenting(mut controller) => {
            match action {
                Action::Prev => controller.prev(),
                Action::Next => controller.next(),
                Action::First => controller.first(),
                Action::Last => controller.last(),
                Action::ToggleNotes => {
                    controller.toggle_notes();
                }
                Action::Quit => {}
            }
            Transition::Screen(Screen::Presenting(controller))
        }
        // No controls are bound before a deck is mounted
        Screen::Loading | Screen::Failed { .. } => Transition::Screen(screen),
    }
}

/// Apply a transition to the app.
pub fn apply(app: &mut App, transition: Transition) {
    match transition {
        Transition::Screen(screen) => app.screen = screen,
        Transition::Quit => app.should_quit = true,
    }
}

// ============================================================================
// BACKGROUND EVENTS
// ============================================================================

/// Handle a loader event.
///
/// Only the first loader result is honoured; anything after the app has
/// left the loading screen is ignored. Input events are not handled here.
pub fn handle_background_event(app: &mut App, event: AppEvent) {
    if app.screen != Screen::Loading {
        return;
    }

    match event {
        AppEvent::DeckLoaded(deck) => {
            app.screen = Screen::presenting(deck);
        }
        AppEvent::LoadFailed(reason) => {
            log::warn!("showing load failure: {}", reason);
            app.screen = Screen::Failed { reason };
        }
        AppEvent::Key(_) | AppEvent::Mouse(_) => {}
    }
}

// ============================================================================
// TESTS
// ============================================================================
