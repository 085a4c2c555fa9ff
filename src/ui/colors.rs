//! Color constants for the gauge screens.
//!
//! Rgb565 uses 16 bits per pixel: 5 bits red, 6 bits green, 5 bits blue.
//! This format is native to the GC9A01 panel, so no conversion happens when
//! writing pixels. Standard colors come from the `RgbColor` trait constants;
//! the band/face pairs below are application-specific.

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

// =============================================================================
// Standard Colors
// =============================================================================

/// Pure black. Screen background and the numeric readout band.
pub const BLACK: Rgb565 = Rgb565::BLACK;

/// Pure white. Text, clock hands, emphasized face marks.
pub const WHITE: Rgb565 = Rgb565::WHITE;

/// Pure red. Engine-speed face color.
pub const RED: Rgb565 = Rgb565::RED;

/// Pure blue. Inlet-pressure face color.
pub const BLUE: Rgb565 = Rgb565::BLUE;

/// Dim gray for the unemphasized clock face marks.
pub const GRAY: Rgb565 = Rgb565::new(8, 16, 8);

// =============================================================================
// Band/Face Pairs (one dark band color + one bright face color per theme)
// =============================================================================

/// Oil screens, band.
pub const DARK_GREEN: Rgb565 = Rgb565::new(0, 24, 0);

/// Oil screens, face.
pub const LIGHT_GREEN: Rgb565 = Rgb565::new(13, 51, 13);

/// Water temperature, band.
pub const DARK_BLUE: Rgb565 = Rgb565::new(0, 10, 14);

/// Water temperature, face.
pub const LIGHT_BLUE: Rgb565 = Rgb565::new(21, 54, 28);

/// Engine speed, band.
pub const DARK_RED: Rgb565 = Rgb565::new(17, 0, 0);

/// Inlet pressure, band.
pub const NAVY: Rgb565 = Rgb565::new(0, 0, 16);

/// Ignition advance, band.
pub const DARK_STEEL: Rgb565 = Rgb565::new(4, 12, 16);

/// Ignition advance, face.
pub const STEEL_BLUE: Rgb565 = Rgb565::new(8, 32, 22);

/// O2 screens, band.
pub const DARK_PURPLE: Rgb565 = Rgb565::new(10, 0, 16);

/// O2 screens, face.
pub const PURPLE: Rgb565 = Rgb565::new(16, 0, 31);
