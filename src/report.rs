//! Outline formatting for loaded decks.
//!
//! Pure functions: (LoadedDeck, OutputFormat) → String.
//! No I/O, no side effects.

use humansize::{format_size, BINARY};

use crate::loader::LoadedDeck;
use crate::types::{Deck, OutputFormat, Slide};

/// Format a deck outline for output.
pub fn format_outline(loaded: &LoadedDeck, format: OutputFormat) -> String {
    match format {
        OutputFormat::Human => format_human(loaded),
        OutputFormat::Json => format_json(&loaded.deck),
    }
}

// ============================================================================
// HUMAN FORMAT
// ============================================================================

fn format_human(loaded: &LoadedDeck) -> String {
    let deck = &loaded.deck;
    let width = deck.len().to_string().len();

    let mut out = format!("=== {} ===\n", deck.title);
    for (i, slide) in deck.slides.iter().enumerate() {
        out.push_str(&format_slide_line(i + 1, width, slide));
        out.push('\n');
    }
    out.push('\n');
    out.push_str(&format_summary(loaded));
    out
}

fn format_slide_line(number: usize, width: usize, slide: &Slide) -> String {
    let title = if slide.title.is_empty() {
        "(untitled)"
    } else {
        slide.title.as_str()
    };

    let mut line = format!("{:>width$}. {}", number, title, width = width);

    if let Some(kind) = &slide.kind {
        line.push_str(&format!(" [{}]", kind));
    }
    if let Some(subtitle) = &slide.subtitle {
        line.push_str(&format!(" — {}", subtitle));
    }

    let mut details = Vec::new();
    if !slide.bullets.is_empty() {
        details.push(plural(slide.bullets.len(), "bullet", "bullets"));
    }
    if !slide.timed_steps.is_empty() {
        details.push(plural(slide.timed_steps.len(), "step", "steps"));
    }
    if slide.note.is_some() {
        details.push("note".to_string());
    }
    if !details.is_empty() {
        line.push_str(&format!(" ({})", details.join(", ")));
    }

    line
}

fn format_summary(loaded: &LoadedDeck) -> String {
    let deck = &loaded.deck;
    let with_notes = deck.slides.iter().filter(|s| s.note.is_some()).count();

    let mut out = String::new();
    out.push_str("=== Summary ===\n");
    out.push_str(&format!("Slides: {}\n", deck.len()));
    out.push_str(&format!("With speaker notes: {}\n", with_notes));
    out.push_str(&format!(
        "Source size: {}\n",
        format_size(loaded.source_bytes, BINARY)
    ));
    out
}

fn plural(count: usize, one: &str, many: &str) -> String {
    format!("{} {}", count, if count == 1 { one } else { many })
}

// ============================================================================
// JSON FORMAT
// ============================================================================

fn format_json(deck: &Deck) -> String {
    // Deck only holds strings and vectors; serialization cannot fail
    serde_json::to_string_pretty(deck).unwrap_or_else(|_| "{}".to_string()) + "\n"
}

// ============================================================================
// TESTS
// ============================================================================
