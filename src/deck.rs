//! Deck navigation state machine.
//!
//! The controller owns the deck, the current index and the notes flag.
//! Every transition re-renders the active slide into a freshly mounted
//! tree; nothing is diffed and nothing is read back from the tree to
//! decide state.
//!
//! Invariant: `0 <= current < deck.len()`. Requests outside that range
//! saturate at the nearest boundary.

use crate::slide::{render_slide, SlideTree};
use crate::types::Deck;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckController {
    deck: Deck,
    current: usize,
    /// Persists across navigation; applied to every render.
    notes_visible: bool,
    mounted: SlideTree,
    indicator: String,
}

impl DeckController {
    /// Build a controller positioned on the first slide.
    ///
    /// Returns None for an empty deck, which has no valid index.
    pub fn new(deck: Deck) -> Option<Self> {
        let first = deck.slides.first()?;
        let mounted = render_slide(first);
        let mut controller = DeckController {
            deck,
            current: 0,
            notes_visible: false,
            mounted,
            indicator: String::new(),
        };
        controller.go_to(0);
        Some(controller)
    }

    /// Clamp `index` into range and mount that slide.
    pub fn go_to(&mut self, index: i64) {
        let last = self.deck.len().saturating_sub(1) as i64;
        let clamped = index.clamp(0, last) as usize;
        let total = self.deck.len();

        self.current = clamped;

        let mut tree = render_slide(&self.deck.slides[clamped]);
        tree.set_progress(progress_percent(clamped, total));
        tree.set_notes_visible(self.notes_visible);
        self.mounted = tree;
        self.indicator = position_indicator(clamped, total);
    }

    pub fn next(&mut self) {
        self.go_to(self.current as i64 + 1);
    }

    pub fn prev(&mut self) {
        self.go_to(self.current as i64 - 1);
    }

    pub fn first(&mut self) {
        self.go_to(0);
    }

    pub fn last(&mut self) {
        self.go_to(self.deck.len() as i64 - 1);
    }

    /// Flip notes visibility and apply it to the mounted slide.
    ///
    /// The pressed state flips even when the mounted slide has no note;
    /// the next slide that has one shows it accordingly.
    pub fn toggle_notes(&mut self) -> bool {
        self.notes_visible = !self.notes_visible;
        self.mounted.set_notes_visible(self.notes_visible);
        self.notes_visible
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn slide_count(&self) -> usize {
        self.deck.len()
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Text for the brand region.
    pub fn brand(&self) -> &str {
        &self.deck.title
    }

    /// The slide tree currently mounted in the slide region.
    pub fn mounted(&self) -> &SlideTree {
        &self.mounted
    }

    /// "<index+1> / <total>"
    pub fn indicator(&self) -> &str {
        &self.indicator
    }

    /// Accessibility pressed-state of the notes control.
    pub fn notes_pressed(&self) -> bool {
        self.notes_visible
    }
}

/// Position text shown next to the brand.
pub fn position_indicator(index: usize, total: usize) -> String {
    format!("{} / {}", index + 1, total)
}

/// `round(((index + 1) / total) * 100)`, in integer arithmetic.
pub fn progress_percent(index: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let shown = (index + 1).min(total) as u64;
    let total = total as u64;
    ((shown * 200 + total) / (total * 2)) as u8
}

// ============================================================================
// TESTS
// ============================================================================
