//! Static chrome for each gauge screen: color bands, unit label, title.
//!
//! Everything a screen draws on entry comes from this one table; the render
//! tick afterwards only touches the numeric band and the link icon.

use embedded_graphics::pixelcolor::Rgb565;

use super::colors::{
    BLUE,
    DARK_BLUE,
    DARK_GREEN,
    DARK_PURPLE,
    DARK_RED,
    DARK_STEEL,
    LIGHT_BLUE,
    LIGHT_GREEN,
    NAVY,
    PURPLE,
    RED,
    STEEL_BLUE,
};
use crate::modes::GaugeMode;

/// Static layout of one gauge screen.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Chrome {
    /// Color of the top and middle bands (also backs the link icon).
    pub band: Rgb565,
    /// Fill behind the title block.
    pub face: Rgb565,
    /// Unit label drawn in the middle band.
    pub unit: &'static str,
    /// Two-line title drawn on the face.
    pub title: (&'static str, &'static str),
}

/// Chrome for a screen. The clock has none: a bare black face.
pub const fn chrome_for(mode: GaugeMode) -> Option<Chrome> {
    match mode {
        GaugeMode::OilPressure => Some(Chrome {
            band: DARK_GREEN,
            face: LIGHT_GREEN,
            unit: "PSI",
            title: ("OIL", "PRESSURE"),
        }),
        GaugeMode::OilTemp => Some(Chrome {
            band: DARK_GREEN,
            face: LIGHT_GREEN,
            unit: "CELSIUS",
            title: ("OIL", "TEMP"),
        }),
        GaugeMode::WaterTemp => Some(Chrome {
            band: DARK_BLUE,
            face: LIGHT_BLUE,
            unit: "CELSIUS",
            title: ("WATER", "TEMP"),
        }),
        GaugeMode::Rpm => Some(Chrome {
            band: DARK_RED,
            face: RED,
            unit: "RPM",
            title: ("ENGINE", "SPEED"),
        }),
        GaugeMode::ManifoldPressure => Some(Chrome {
            band: NAVY,
            face: BLUE,
            unit: "kPa",
            title: ("INLET", "PRESSURE"),
        }),
        GaugeMode::IgnitionAdvance => Some(Chrome {
            band: DARK_STEEL,
            face: STEEL_BLUE,
            unit: "BTDC",
            title: ("SPARK", "ADVANCE"),
        }),
        GaugeMode::Clock => None,
        GaugeMode::O2Bank1 => Some(Chrome {
            band: DARK_PURPLE,
            face: PURPLE,
            unit: "AFR",
            title: ("OXYGEN", "SENSOR 1"),
        }),
        GaugeMode::O2Bank2 => Some(Chrome {
            band: DARK_PURPLE,
            face: PURPLE,
            unit: "AFR",
            title: ("OXYGEN", "SENSOR 2"),
        }),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modes::MODE_ORDER;

    #[test]
    fn test_only_clock_lacks_chrome() {
        for mode in MODE_ORDER {
            assert_eq!(chrome_for(mode).is_none(), mode == GaugeMode::Clock);
        }
    }

    #[test]
    fn test_o2_screens_share_theme() {
        let b1 = chrome_for(GaugeMode::O2Bank1).unwrap();
        let b2 = chrome_for(GaugeMode::O2Bank2).unwrap();
        assert_eq!(b1.band, b2.band);
        assert_eq!(b1.unit, b2.unit);
        assert_ne!(b1.title.1, b2.title.1);
    }
}
