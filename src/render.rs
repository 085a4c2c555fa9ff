//! Numeric readout formatting and flicker-avoiding redraw decisions.
//!
//! The big value is drawn left-aligned at an x position chosen by how many
//! characters it renders to (sign included), so it stays visually centered.
//! Redraws paint glyphs with an opaque background, which covers the previous
//! value whenever the new one is at least as wide; only when the value drops
//! to a narrower width class does the numeric band need wiping first, and
//! [`ValueCell`] remembers the previous class to detect exactly that.
//!
//! Fractional readouts trade precision for width as the magnitude grows
//! (2 decimals below 10, 3 below 100, 4 from 100 up) so the glyphs always
//! fit the round face.

use core::fmt::Write;

use heapless::String;

use crate::obd::DecodedValue;

/// Horizontal start positions, one per width class.
const X_OFFSETS: [i32; 4] = [99, 78, 57, 36];

/// Formatted width of the numeric readout, in characters (sign included).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum WidthClass {
    One,
    Two,
    Three,
    Four,
}

impl WidthClass {
    /// Left edge of the readout for this class.
    pub const fn x_offset(self) -> i32 { X_OFFSETS[self as usize] }

    const fn for_chars(chars: usize) -> Self {
        match chars {
            0 | 1 => Self::One,
            2 => Self::Two,
            3 => Self::Three,
            _ => Self::Four,
        }
    }
}

/// Maximum rendered readout length ("128.0000" plus headroom).
pub const VALUE_CAPACITY: usize = 12;

/// A formatted readout and where to draw it.
#[derive(Debug)]
pub struct Readout {
    pub text: String<VALUE_CAPACITY>,
    pub x: i32,
    pub class: WidthClass,
}

/// Format a decoded value for the big readout.
pub fn format_value(value: DecodedValue) -> Readout {
    let mut text: String<VALUE_CAPACITY> = String::new();
    let class = match value {
        DecodedValue::Integer(v) => {
            let _ = write!(text, "{v}");
            WidthClass::for_chars(text.len())
        }
        DecodedValue::Ratio(v) => {
            let (precision, class) = if v >= 10.0 {
                (if v >= 100.0 { 4 } else { 3 }, WidthClass::Four)
            } else {
                (2, WidthClass::Three)
            };
            let _ = write!(text, "{v:.precision$}");
            class
        }
    };
    Readout {
        text,
        x: class.x_offset(),
        class,
    }
}

/// Remembers the width class last drawn so a narrower successor knows to
/// wipe the numeric band before drawing.
pub struct ValueCell {
    prev: Option<WidthClass>,
}

impl ValueCell {
    pub const fn new() -> Self { Self { prev: None } }

    /// Record `class` as about to be drawn. Returns true when the previous
    /// readout was wider, i.e. the numeric band must be cleared first.
    pub fn advance(&mut self, class: WidthClass) -> bool {
        let clear = matches!(self.prev, Some(prev) if prev > class);
        self.prev = Some(class);
        clear
    }

    /// Forget the previous width, after the whole screen was cleared.
    pub fn reset(&mut self) { self.prev = None; }
}

impl Default for ValueCell {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_classes_are_monotonic() {
        let r7 = format_value(DecodedValue::Integer(7));
        let r42 = format_value(DecodedValue::Integer(42));
        let r500 = format_value(DecodedValue::Integer(500));
        let r5000 = format_value(DecodedValue::Integer(5000));
        assert_eq!(r7.class, WidthClass::One);
        assert_eq!(r42.class, WidthClass::Two);
        assert_eq!(r500.class, WidthClass::Three);
        assert_eq!(r5000.class, WidthClass::Four);
        assert!(r7.x > r42.x && r42.x > r500.x && r500.x > r5000.x);
    }

    #[test]
    fn test_sign_counts_toward_width() {
        assert_eq!(format_value(DecodedValue::Integer(-5)).class, WidthClass::Two);
        assert_eq!(format_value(DecodedValue::Integer(-10)).class, WidthClass::Three);
        assert_eq!(format_value(DecodedValue::Integer(-100)).class, WidthClass::Four);
    }

    #[test]
    fn test_x_offsets() {
        assert_eq!(WidthClass::One.x_offset(), 99);
        assert_eq!(WidthClass::Two.x_offset(), 78);
        assert_eq!(WidthClass::Three.x_offset(), 57);
        assert_eq!(WidthClass::Four.x_offset(), 36);
    }

    #[test]
    fn test_integer_renders_without_decimals() {
        assert_eq!(format_value(DecodedValue::Integer(88)).text.as_str(), "88");
        assert_eq!(format_value(DecodedValue::Integer(-40)).text.as_str(), "-40");
    }

    #[test]
    fn test_progressive_ratio_precision() {
        assert_eq!(format_value(DecodedValue::Ratio(0.997)).text.as_str(), "1.00");
        assert_eq!(format_value(DecodedValue::Ratio(9.5)).text.as_str(), "9.50");
        assert_eq!(format_value(DecodedValue::Ratio(14.7)).text.as_str(), "14.700");
        assert_eq!(format_value(DecodedValue::Ratio(100.25)).text.as_str(), "100.2500");
    }

    #[test]
    fn test_ratio_placement() {
        assert_eq!(format_value(DecodedValue::Ratio(0.997)).x, 57);
        assert_eq!(format_value(DecodedValue::Ratio(14.7)).x, 36);
        assert_eq!(format_value(DecodedValue::Ratio(128.0)).x, 36);
    }

    #[test]
    fn test_clear_on_downward_class_crossing() {
        let mut cell = ValueCell::new();
        assert!(!cell.advance(format_value(DecodedValue::Integer(1000)).class));
        assert!(cell.advance(format_value(DecodedValue::Integer(99)).class));
    }

    #[test]
    fn test_no_clear_when_width_grows_or_holds() {
        let mut cell = ValueCell::new();
        assert!(!cell.advance(WidthClass::Two));
        assert!(!cell.advance(WidthClass::Two));
        assert!(!cell.advance(WidthClass::Four));
    }

    #[test]
    fn test_reset_forgets_previous_width() {
        let mut cell = ValueCell::new();
        cell.advance(WidthClass::Four);
        cell.reset();
        assert!(!cell.advance(WidthClass::One));
    }
}
