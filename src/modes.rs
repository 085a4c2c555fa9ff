//! Gauge screen selection.
//!
//! One screen is active at a time. The button advances through
//! [`MODE_ORDER`] cyclically, and the active screen's ordinal is persisted so
//! the gauge comes back up where it was left.

use crate::obd::Pid;

/// Available gauge screens, in button-cycle order.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum GaugeMode {
    /// Oil pressure, psi. No OBD parameter exists for it on this vehicle;
    /// the screen shows 0 until a dedicated sender is wired in.
    #[default]
    OilPressure,
    /// Oil temperature, degrees C.
    OilTemp,
    /// Coolant temperature, degrees C.
    WaterTemp,
    /// Engine speed, rpm.
    Rpm,
    /// Intake manifold pressure, kPa.
    ManifoldPressure,
    /// Ignition advance, degrees BTDC.
    IgnitionAdvance,
    /// Analog clock.
    Clock,
    /// O2 equivalence ratio, bank 1.
    O2Bank1,
    /// O2 equivalence ratio, bank 2.
    O2Bank2,
}

/// Number of screens in the cycle.
pub const MODE_COUNT: usize = 9;

/// Cycle order; indices double as the persisted ordinal encoding.
pub const MODE_ORDER: [GaugeMode; MODE_COUNT] = [
    GaugeMode::OilPressure,
    GaugeMode::OilTemp,
    GaugeMode::WaterTemp,
    GaugeMode::Rpm,
    GaugeMode::ManifoldPressure,
    GaugeMode::IgnitionAdvance,
    GaugeMode::Clock,
    GaugeMode::O2Bank1,
    GaugeMode::O2Bank2,
];

impl GaugeMode {
    /// Persisted encoding of this screen.
    pub const fn ordinal(self) -> u8 { self as u8 }

    /// Next screen in the cycle (wraps after the last).
    pub const fn next(self) -> Self { MODE_ORDER[(self as usize + 1) % MODE_COUNT] }

    /// Restore a screen from a persisted ordinal.
    ///
    /// Anything out of range (fresh flash reads 0xFF) falls back to the
    /// first screen instead of indexing out of bounds.
    pub const fn from_ordinal(ordinal: u8) -> Self {
        if (ordinal as usize) < MODE_COUNT {
            MODE_ORDER[ordinal as usize]
        } else {
            MODE_ORDER[0]
        }
    }

    /// The parameter polled while this screen is showing, if any.
    pub const fn pid(self) -> Option<Pid> {
        match self {
            Self::OilPressure | Self::Clock => None,
            Self::OilTemp => Some(Pid::OilTemp),
            Self::WaterTemp => Some(Pid::CoolantTemp),
            Self::Rpm => Some(Pid::EngineSpeed),
            Self::ManifoldPressure => Some(Pid::ManifoldPressure),
            Self::IgnitionAdvance => Some(Pid::TimingAdvance),
            Self::O2Bank1 => Some(Pid::O2Bank1),
            Self::O2Bank2 => Some(Pid::O2Bank2),
        }
    }

    /// True for screens whose readout is fractional rather than whole units.
    pub const fn is_fractional(self) -> bool { matches!(self, Self::O2Bank1 | Self::O2Bank2) }
}

// =============================================================================
// Unit Tests
// =============================================================================
