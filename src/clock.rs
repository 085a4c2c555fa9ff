//! Analog clock geometry.
//!
//! Pure functions from wall-clock time to screen coordinates; the drawing
//! code turns these into line and dot primitives. The screen only repaints
//! when the minute changes, tracked by [`ClockState`], which is invalidated
//! on mode changes so re-entering the clock always paints once.

use core::f32::consts::PI;

use embedded_graphics::prelude::Point;
use micromath::F32Ext;

use crate::config::{CENTER_X, CENTER_Y};

/// Hour hand length in pixels.
pub const HOUR_HAND_RADIUS: i32 = 90;

/// Minute hand length in pixels.
pub const MINUTE_HAND_RADIUS: i32 = 110;

/// Radius of the ring of face marks.
pub const FACE_MARK_RADIUS: i32 = 117;

/// Diameter of the filled hub at the center.
pub const HUB_DIAMETER: u32 = 10;

const TWO_PI: f32 = 2.0 * PI;

/// Angle of the hour hand. Creeps forward as the minute advances, one
/// twelfth of an hour step per five minutes.
pub fn hour_angle(hour: u8, minute: u8) -> f32 {
    PI - TWO_PI / 12.0 * f32::from(hour % 12) - TWO_PI / 720.0 * f32::from(minute)
}

/// Angle of the minute hand.
pub fn minute_angle(minute: u8) -> f32 { PI - TWO_PI / 60.0 * f32::from(minute) }

/// Screen point at `radius` along `angle` from the display center.
///
/// Angle zero points straight down (six o'clock) and grows clockwise from
/// twelve, matching [`hour_angle`]/[`minute_angle`].
pub fn endpoint(angle: f32, radius: i32) -> Point {
    let r = radius as f32;
    Point::new(
        CENTER_X + (r * angle.sin()) as i32,
        CENTER_Y + (r * angle.cos()) as i32,
    )
}

/// Position of face mark `i` (0..60) and whether it is an emphasized
/// five-minute mark.
pub fn face_mark(i: u8) -> (Point, bool) {
    let angle = PI - TWO_PI / 60.0 * f32::from(i);
    (endpoint(angle, FACE_MARK_RADIUS), i % 5 == 0)
}

/// Tracks the minute last drawn so the face repaints only when it changes.
pub struct ClockState {
    last_minute: Option<u8>,
}

impl ClockState {
    pub const fn new() -> Self { Self { last_minute: None } }

    /// True when `minute` differs from the minute last drawn.
    pub fn needs_redraw(&self, minute: u8) -> bool { self.last_minute != Some(minute) }

    /// Record `minute` as drawn.
    pub fn mark_drawn(&mut self, minute: u8) { self.last_minute = Some(minute); }

    /// Force a repaint on the next clock tick (call when leaving the screen).
    pub fn invalidate(&mut self) { self.last_minute = None; }
}

impl Default for ClockState {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use core::f32::consts::FRAC_PI_2;

    use super::*;

    const TOLERANCE: f32 = 1e-5;

    #[test]
    fn test_hour_angle_at_three_oclock() {
        // 3:00 -> pi - pi/2 = pi/2
        assert!((hour_angle(3, 0) - FRAC_PI_2).abs() < TOLERANCE);
    }

    #[test]
    fn test_hour_angle_minute_creep() {
        // 3:45 -> pi - pi/2 - pi/8 = 3*pi/8
        assert!((hour_angle(3, 45) - 3.0 * PI / 8.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_minute_angle_quarter_hours() {
        assert!((minute_angle(0) - PI).abs() < TOLERANCE);
        assert!((minute_angle(15) - FRAC_PI_2).abs() < TOLERANCE);
        assert!((minute_angle(45) + FRAC_PI_2).abs() < TOLERANCE);
    }

    #[test]
    fn test_hour_wraps_past_noon() {
        assert!((hour_angle(15, 0) - hour_angle(3, 0)).abs() < TOLERANCE);
    }

    #[test]
    fn test_endpoint_noon_points_up() {
        // Minute hand at :00 ends straight above the center
        let p = endpoint(minute_angle(0), MINUTE_HAND_RADIUS);
        assert!((p.x - CENTER_X).abs() <= 1);
        assert!((p.y - (CENTER_Y - MINUTE_HAND_RADIUS)).abs() <= 1);
    }

    #[test]
    fn test_endpoint_three_oclock_points_right() {
        let p = endpoint(hour_angle(3, 0), HOUR_HAND_RADIUS);
        assert!((p.x - (CENTER_X + HOUR_HAND_RADIUS)).abs() <= 1);
        assert!((p.y - CENTER_Y).abs() <= 1);
    }

    #[test]
    fn test_every_fifth_mark_is_emphasized() {
        for i in 0..60 {
            let (_, emphasized) = face_mark(i);
            assert_eq!(emphasized, i % 5 == 0);
        }
    }

    #[test]
    fn test_redraw_suppressed_for_unchanged_minute() {
        let mut state = ClockState::new();
        assert!(state.needs_redraw(30));
        state.mark_drawn(30);
        assert!(!state.needs_redraw(30));
        assert!(state.needs_redraw(31));
    }

    #[test]
    fn test_invalidate_forces_redraw_on_entry() {
        let mut state = ClockState::new();
        state.mark_drawn(30);
        state.invalidate();
        assert!(state.needs_redraw(30));
    }
}
