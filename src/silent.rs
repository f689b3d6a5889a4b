//! Periodic suppression window for the frame pipeline.
//!
//! The gear position frame is a low-rate one-shot message that must be
//! serviced promptly. Roughly every 50 ms the pipeline flips into a silent
//! window during which every frame except the gear frame is discarded,
//! leaving the receive path free for it. The window is polled from the frame
//! path and the scheduler tick, not driven by a timer interrupt.

use crate::config::SILENT_WINDOW_MS;

/// Toggled suppression window state.
pub struct SilentWindow {
    active: bool,
    last_flip_ms: u64,
}

impl SilentWindow {
    /// Window starts inactive at time zero.
    pub const fn new() -> Self {
        Self {
            active: false,
            last_flip_ms: 0,
        }
    }

    /// Flip the window if the interval has elapsed since the last flip.
    /// A single poll flips at most once, however late it arrives.
    pub fn poll(
        &mut self,
        now_ms: u64,
    ) {
        if now_ms.wrapping_sub(self.last_flip_ms) >= SILENT_WINDOW_MS {
            self.active = !self.active;
            self.last_flip_ms = now_ms;
        }
    }

    /// Whether suppression is currently active.
    #[inline]
    pub const fn is_active(&self) -> bool { self.active }
}

impl Default for SilentWindow {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_inactive() {
        let window = SilentWindow::new();
        assert!(!window.is_active());
    }

    #[test]
    fn test_no_flip_before_interval() {
        let mut window = SilentWindow::new();
        window.poll(SILENT_WINDOW_MS - 1);
        assert!(!window.is_active());
    }

    #[test]
    fn test_flips_at_interval() {
        let mut window = SilentWindow::new();
        window.poll(SILENT_WINDOW_MS);
        assert!(window.is_active());
        window.poll(SILENT_WINDOW_MS * 2);
        assert!(!window.is_active());
    }

    #[test]
    fn test_single_flip_per_poll_when_late() {
        let mut window = SilentWindow::new();
        // Poll arrives three intervals late: still only one flip.
        window.poll(SILENT_WINDOW_MS * 3);
        assert!(window.is_active());
    }

    #[test]
    fn test_repeated_polls_within_window_do_nothing() {
        let mut window = SilentWindow::new();
        window.poll(SILENT_WINDOW_MS);
        window.poll(SILENT_WINDOW_MS + 10);
        window.poll(SILENT_WINDOW_MS + 40);
        assert!(window.is_active());
        window.poll(SILENT_WINDOW_MS * 2);
        assert!(!window.is_active());
    }
}
