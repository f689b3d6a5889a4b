//! Page button debounce handling.
//!
//! The steering wheel carries a single page button that cycles the normal
//! screens. Edge detection is time-based: a level change is only accepted
//! once the line has been stable for the debounce interval, so contact
//! bounce cannot fire a burst of page changes.

use embassy_time::{Duration, Instant};

/// Debounce duration in milliseconds.
pub const DEBOUNCE_MS: u64 = 50;

/// Debounce state for the page button.
pub struct PageButton {
    was_pressed: bool,
    last_change: Option<Instant>,
}

impl PageButton {
    /// Create a new button state (not pressed).
    pub const fn new() -> Self {
        Self {
            was_pressed: false,
            last_change: None,
        }
    }

    /// Returns true only on the press edge.
    ///
    /// The button is wired active-low, so `is_low()` means pressed. A change
    /// within the debounce interval of the previous one is ignored.
    pub fn just_pressed(
        &mut self,
        is_low: bool,
    ) -> bool {
        if is_low != self.was_pressed {
            if let Some(last) = self.last_change
                && last.elapsed() < Duration::from_millis(DEBOUNCE_MS)
            {
                return false;
            }

            self.was_pressed = is_low;
            self.last_change = Some(Instant::now());

            return is_low;
        }

        false
    }
}

impl Default for PageButton {
    fn default() -> Self { Self::new() }
}
