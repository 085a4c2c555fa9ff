//! Button debounce handling for the mode-select input.
//!
//! Time-based edge detection with debouncing to prevent multiple triggers
//! from contact bounce. Poll every control-loop iteration so the timing
//! state stays current.

/// Debounce window in milliseconds.
pub const DEBOUNCE_MS: u64 = 5;

/// Debounced edge detector for an active-low push button.
pub struct InputDebouncer {
    was_pressed: bool,
    last_change_ms: Option<u64>,
}

impl InputDebouncer {
    /// Create a new debouncer (button not pressed).
    pub const fn new() -> Self {
        Self {
            was_pressed: false,
            last_change_ms: None,
        }
    }

    /// Returns true only on the falling edge (button just pressed).
    ///
    /// The input is active-low, so `is_low` means pressed. Level changes
    /// within [`DEBOUNCE_MS`] of the previous accepted change are ignored.
    pub fn pressed_edge(&mut self, is_low: bool, now_ms: u64) -> bool {
        if is_low != self.was_pressed {
            if let Some(last) = self.last_change_ms
                && now_ms.wrapping_sub(last) < DEBOUNCE_MS
            {
                return false;
            }

            self.was_pressed = is_low;
            self.last_change_ms = Some(now_ms);

            // True only on press (falling edge, is_low == true)
            return is_low;
        }

        false
    }
}

impl Default for InputDebouncer {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_edge_per_press() {
        let mut button = InputDebouncer::new();
        assert!(button.pressed_edge(true, 0));
        // Held: no further edges
        assert!(!button.pressed_edge(true, 10));
        assert!(!button.pressed_edge(true, 100));
        // Release produces no edge either
        assert!(!button.pressed_edge(false, 110));
        // Next press fires again
        assert!(button.pressed_edge(true, 200));
    }

    #[test]
    fn test_bounce_within_window_ignored() {
        let mut button = InputDebouncer::new();
        assert!(button.pressed_edge(true, 100));
        // Contact bounce: released and re-pressed within 5 ms of the edge
        assert!(!button.pressed_edge(false, 102));
        assert!(!button.pressed_edge(true, 104));
        // Still held after the window: the press already fired once
        assert!(!button.pressed_edge(true, 120));
    }

    #[test]
    fn test_release_bounce_does_not_retrigger() {
        let mut button = InputDebouncer::new();
        assert!(button.pressed_edge(true, 0));
        assert!(!button.pressed_edge(false, 50));
        // Bounce on release must not look like a new press
        assert!(!button.pressed_edge(true, 52));
        assert!(!button.pressed_edge(false, 54));
    }

    #[test]
    fn test_idle_stays_quiet() {
        let mut button = InputDebouncer::new();
        for t in 0..20 {
            assert!(!button.pressed_edge(false, t * 5));
        }
    }
}
