//! Content loading: fetch a deck description and normalize it.
//!
//! One attempt per call, no retry, no caching. Every failure comes back
//! as a [`LoadError`] value (and is logged here); nothing unwinds past
//! this boundary.
//!
//! Slide content is ingested leniently: shapes that do not match the
//! expected schema degrade to empty fields instead of failing the load.
//! Only transport, parse and "no slides at all" are hard failures.

use std::fs;
use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;

use crate::types::{Deck, DeckSource, Slide, DEFAULT_DECK_TITLE};

// ============================================================================
// ERRORS
// ============================================================================

/// Why a deck could not be loaded.
#[derive(Debug)]
pub enum LoadError {
    /// Local file could not be read.
    Io(std::io::Error),
    /// Request to a remote source failed before a response arrived.
    Http(reqwest::Error),
    /// Remote source answered with a non-success status.
    Status(u16),
    /// Payload is not valid JSON.
    Parse(serde_json::Error),
    /// Top-level JSON value is not an object.
    NotADeck,
    /// Deck has no slides to present.
    EmptyDeck,
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "could not read deck: {}", e),
            LoadError::Http(e) => write!(f, "could not fetch deck: {}", e),
            LoadError::Status(code) => write!(f, "deck request failed with HTTP status {}", code),
            LoadError::Parse(e) => write!(f, "deck is not valid JSON: {}", e),
            LoadError::NotADeck => write!(f, "deck must be a JSON object"),
            LoadError::EmptyDeck => write!(f, "deck has no slides"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            LoadError::Http(e) => Some(e),
            LoadError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

// ============================================================================
// LOADING
// ============================================================================

/// A normalized deck plus the size of the payload it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedDeck {
    pub deck: Deck,
    pub source_bytes: u64,
}

/// Fetch and normalize the deck at `source`.
///
/// Failures are logged before being returned, so callers only need to
/// decide what the user sees.
pub fn load(source: &DeckSource) -> Result<LoadedDeck, LoadError> {
    log::debug!("fetching deck from {}", source);

    let result = fetch(source).and_then(|bytes| {
        let deck = parse_deck(&bytes)?;
        Ok(LoadedDeck {
            deck,
            source_bytes: bytes.len() as u64,
        })
    });

    match &result {
        Ok(loaded) => log::info!(
            "loaded deck {:?} from {} ({} slides)",
            loaded.deck.title,
            source,
            loaded.deck.len()
        ),
        Err(e) => log::error!("failed to load deck from {}: {}", source, e),
    }

    result
}

/// Retrieve the raw payload. Exactly one attempt.
fn fetch(source: &DeckSource) -> Result<Vec<u8>, LoadError> {
    match source {
        DeckSource::File(path) => fs::read(path).map_err(LoadError::Io),
        DeckSource::Url(url) => {
            // No timeout: the fetch waits as long as the server takes
            let client = reqwest::blocking::Client::builder()
                .timeout(None::<Duration>)
                .build()
                .map_err(LoadError::Http)?;
            let response = client.get(url.as_str()).send().map_err(LoadError::Http)?;
            let status = response.status();
            if !status.is_success() {
                return Err(LoadError::Status(status.as_u16()));
            }
            let body = response.bytes().map_err(LoadError::Http)?;
            Ok(body.to_vec())
        }
    }
}

// ============================================================================
// NORMALIZATION
// ============================================================================

/// Deck as it appears on the wire. Every field optional, any JSON shape.
#[derive(Debug, Default, Deserialize)]
struct RawDeck {
    title: Option<Value>,
    slides: Option<Value>,
}

/// Slide as it appears on the wire.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSlide {
    #[serde(rename = "type")]
    kind: Option<Value>,
    title: Option<Value>,
    subtitle: Option<Value>,
    bullets: Option<Value>,
    timed_steps: Option<Value>,
    note: Option<Value>,
}

/// Parse and default-fill a deck payload.
pub fn parse_deck(bytes: &[u8]) -> Result<Deck, LoadError> {
    let value: Value = serde_json::from_slice(bytes).map_err(LoadError::Parse)?;
    if !value.is_object() {
        return Err(LoadError::NotADeck);
    }
    let raw: RawDeck = serde_json::from_value(value).map_err(LoadError::Parse)?;

    let slides: Vec<Slide> = match raw.slides {
        Some(Value::Array(items)) => items.into_iter().map(normalize_slide).collect(),
        _ => Vec::new(),
    };

    if slides.is_empty() {
        return Err(LoadError::EmptyDeck);
    }

    Ok(Deck {
        title: non_empty(text(raw.title)).unwrap_or_else(|| DEFAULT_DECK_TITLE.to_string()),
        slides,
    })
}

/// Non-object entries become an empty slide.
fn normalize_slide(value: Value) -> Slide {
    let raw: RawSlide = serde_json::from_value(value).unwrap_or_default();
    Slide {
        kind: non_empty(text(raw.kind)),
        title: text(raw.title).unwrap_or_default(),
        subtitle: non_empty(text(raw.subtitle)),
        bullets: items(raw.bullets),
        timed_steps: items(raw.timed_steps),
        note: non_empty(text(raw.note)),
    }
}

/// Scalars render as text; objects, arrays and null do not.
fn text(value: Option<Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// Non-array lists are empty; unrenderable entries keep their slot as "".
fn items(value: Option<Value>) -> Vec<String> {
    match value {
        Some(Value::Array(entries)) => entries
            .into_iter()
            .map(|entry| text(Some(entry)).unwrap_or_default())
            .collect(),
        _ => Vec::new(),
    }
}

// ============================================================================
// TESTS
// ============================================================================
