//! Pointer gesture recognition for the slide region.
//!
//! Turns press/release pairs into swipes and double taps. Positions are
//! horizontal pixel offsets, times are milliseconds on any monotonic
//! clock. No terminal types here; the effects layer converts events.

use std::time::Duration;

/// Recognized gesture on the slide region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    /// Leftward drag past the threshold: advance.
    SwipeLeft,
    /// Rightward drag past the threshold: go back.
    SwipeRight,
    /// Two clicks inside the double-tap window.
    DoubleTap,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GestureTracker {
    swipe_threshold_px: i64,
    double_tap_ms: u64,
    /// X position of an unreleased press.
    start_x: Option<i64>,
    /// Time of the most recent click.
    last_tap_ms: Option<u64>,
}

impl GestureTracker {
    pub fn new(swipe_threshold_px: u32, double_tap_window: Duration) -> Self {
        GestureTracker {
            swipe_threshold_px: i64::from(swipe_threshold_px),
            double_tap_ms: double_tap_window.as_millis() as u64,
            start_x: None,
            last_tap_ms: None,
        }
    }

    /// Pointer went down on the slide region.
    pub fn press(&mut self, x: i64) {
        self.start_x = Some(x);
    }

    /// Pointer came up. A release without a matching press is ignored.
    ///
    /// Drags longer than the threshold are swipes. Anything else is a
    /// click, and a click soon enough after the previous click is a double
    /// tap. Every click becomes the new previous click, so a quick third
    /// click pairs with the second.
    pub fn release(&mut self, x: i64, now_ms: u64) -> Option<Gesture> {
        let start = self.start_x.take()?;
        let dx = x - start;

        if dx.abs() > self.swipe_threshold_px {
            return Some(if dx < 0 {
                Gesture::SwipeLeft
            } else {
                Gesture::SwipeRight
            });
        }

        let previous = self.last_tap_ms.replace(now_ms);
        match previous {
            Some(last) if now_ms.saturating_sub(last) < self.double_tap_ms => {
                Some(Gesture::DoubleTap)
            }
            _ => None,
        }
    }

    /// Forget an in-flight press, e.g. when the pointer leaves the region.
    pub fn cancel(&mut self) {
        self.start_x = None;
    }
}

impl Default for GestureTracker {
    fn default() -> Self {
        GestureTracker::new(50, Duration::from_millis(300))
    }
}

// ============================================================================
// TESTS
// ============================================================================
