//! Domain types for slidedeck.
//!
//! Normalized deck data plus configuration. Everything here is plain data;
//! the loader produces it, the controller and renderers consume it.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serde::Serialize;
use url::Url;

// ============================================================================
// DECK
// ============================================================================

/// Brand text used when the deck carries no usable title.
pub const DEFAULT_DECK_TITLE: &str = "Deck";

/// A fully normalized deck, immutable after load.
///
/// Slide order is presentation order; the index is the only address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Deck {
    /// Deck title shown in the brand region.
    pub title: String,
    /// Slides in presentation order.
    pub slides: Vec<Slide>,
}

/// One normalized slide. Absent fields are already default-filled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    /// Optional style variant, from the `type` field.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Title text, empty when absent.
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub bullets: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub timed_steps: Vec<String>,
    /// Speaker note, hidden until notes are toggled on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Deck {
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }
}

impl Slide {
    /// Slide with only a title set.
    pub fn titled(title: impl Into<String>) -> Self {
        Slide {
            title: title.into(),
            ..Default::default()
        }
    }
}

// ============================================================================
// SOURCES
// ============================================================================

/// Fixed relative location of the deck when none is given.
pub const DEFAULT_SOURCE: &str = "content.json";

/// Where a deck is fetched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeckSource {
    /// Local JSON file.
    File(PathBuf),
    /// http(s) resource.
    Url(Url),
}

impl DeckSource {
    /// Interpret a CLI argument: http(s) URLs become `Url`, anything else a path.
    pub fn parse(arg: &str) -> Self {
        match Url::parse(arg) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => DeckSource::Url(url),
            _ => DeckSource::File(PathBuf::from(arg)),
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, DeckSource::Url(_))
    }
}

impl Default for DeckSource {
    fn default() -> Self {
        DeckSource::File(PathBuf::from(DEFAULT_SOURCE))
    }
}

impl fmt::Display for DeckSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeckSource::File(path) => write!(f, "{}", path.display()),
            DeckSource::Url(url) => write!(f, "{}", url),
        }
    }
}

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Output format for the outline command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable outline.
    #[default]
    Human,
    /// Normalized deck as JSON.
    Json,
}

/// Configuration for the interactive presenter.
#[derive(Debug, Clone)]
pub struct PresentConfig {
    /// Deck location.
    pub source: DeckSource,
    /// Horizontal drag distance (pixels) that must be exceeded to count as a swipe.
    pub swipe_threshold_px: u32,
    /// Maximum gap between two clicks that form a double tap.
    pub double_tap_window: Duration,
}

impl Default for PresentConfig {
    fn default() -> Self {
        Self {
            source: DeckSource::default(),
            swipe_threshold_px: 50,
            double_tap_window: Duration::from_millis(300),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
