//! TUI color semantics and style constants.
//!
//! Pure data, consumed by the rendering layer for visual consistency.
//!
//! Color semantics:
//! - Cyan: interactive elements (controls, keybinding hints, progress)
//! - Yellow: speaker notes
//! - Red: load failure
//! - Dim: de-emphasized (subtitles, help, loading)
//! - Bold: titles and brand

use ratatui::style::{Color, Modifier, Style};

// ============================================================================
// CHROME
// ============================================================================

/// Brand / deck title in the header.
pub const STYLE_BRAND: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);

/// Position indicator in the header.
pub const STYLE_INDICATOR: Style = Style::new().fg(Color::Cyan);

/// Control button, idle.
pub const STYLE_CONTROL: Style = Style::new().fg(Color::Cyan);

/// Control button in pressed state.
pub const STYLE_CONTROL_PRESSED: Style = Style::new().fg(Color::Black).bg(Color::Cyan);

/// Footer / help line.
pub const STYLE_HELP: Style = Style::new().fg(Color::DarkGray);

/// Load failure message.
pub const STYLE_DANGER: Style = Style::new().fg(Color::Red).add_modifier(Modifier::BOLD);

/// Loading message.
pub const STYLE_DIM: Style = Style::new().fg(Color::DarkGray);

// ============================================================================
// SLIDE CONTENT
// ============================================================================

pub const STYLE_TITLE: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);

pub const STYLE_SUBTITLE: Style = Style::new().fg(Color::Gray).add_modifier(Modifier::ITALIC);

pub const STYLE_BULLET: Style = Style::new().fg(Color::Cyan);

pub const STYLE_NOTE: Style = Style::new().fg(Color::Yellow);

/// Progress bar fill.
pub const STYLE_PROGRESS: Style = Style::new().fg(Color::Cyan).bg(Color::DarkGray);

/// Title style for a slide's type-specific class.
///
/// Unknown variants fall back to the base title style.
pub fn title_style(variant: Option<&str>) -> Style {
    match variant {
        Some("title") => STYLE_TITLE.fg(Color::Cyan),
        Some("section") => STYLE_TITLE.fg(Color::Yellow),
        Some("quote") => STYLE_TITLE.add_modifier(Modifier::ITALIC),
        _ => STYLE_TITLE,
    }
}

// ============================================================================
// TESTS
// ============================================================================
