//! OBD-II parameter identifiers and scaling descriptors.
//!
//! Every parameter the gauge understands is listed here together with the
//! rule that turns its raw payload bytes into a physical value. Decoding is
//! entirely table-driven: [`codec::decode`](super::codec::decode) looks up
//! the descriptor and applies it, so adding a parameter is a one-line change.

use super::DecodedValue;

/// Parameters this gauge can request with service 01 ("Show Current Data").
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum Pid {
    /// Engine coolant temperature, degrees C.
    CoolantTemp = 0x05,
    /// Intake manifold absolute pressure, kPa.
    ManifoldPressure = 0x0B,
    /// Engine speed, rpm.
    EngineSpeed = 0x0C,
    /// Ignition timing advance, degrees before top dead center.
    TimingAdvance = 0x0E,
    /// Intake air temperature, degrees C.
    IntakeAirTemp = 0x0F,
    /// O2 sensor equivalence ratio, bank 1.
    O2Bank1 = 0x24,
    /// O2 sensor equivalence ratio, bank 2.
    O2Bank2 = 0x25,
    /// Control module voltage, volts.
    ModuleVoltage = 0x42,
    /// Engine oil temperature, degrees C.
    OilTemp = 0x5C,
}

/// Number of known parameters (one value-store slot each).
pub const PID_COUNT: usize = 9;

/// All known parameters, in ascending code order.
pub const ALL_PIDS: [Pid; PID_COUNT] = [
    Pid::CoolantTemp,
    Pid::ManifoldPressure,
    Pid::EngineSpeed,
    Pid::TimingAdvance,
    Pid::IntakeAirTemp,
    Pid::O2Bank1,
    Pid::O2Bank2,
    Pid::ModuleVoltage,
    Pid::OilTemp,
];

/// Whether a parameter scales to a whole number or a fraction.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Kind {
    Integer,
    Ratio,
}

/// How a response payload converts into a physical value.
///
/// Integer parameters compute `raw / divisor + offset` in integer math
/// (matching the ECU-side definition of each parameter); ratio parameters
/// compute `raw as f32 / divisor as f32`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Scaling {
    /// Payload bytes carrying the measurement (1 or 2, big-endian).
    pub data_len: u8,
    /// Divisor applied to the raw reading.
    pub divisor: i32,
    /// Added after division.
    pub offset: i32,
    /// Integer or fractional result.
    pub kind: Kind,
}

impl Scaling {
    const fn integer(data_len: u8, divisor: i32, offset: i32) -> Self {
        Self {
            data_len,
            divisor,
            offset,
            kind: Kind::Integer,
        }
    }

    const fn ratio(divisor: i32) -> Self {
        Self {
            data_len: 2,
            divisor,
            offset: 0,
            kind: Kind::Ratio,
        }
    }

    /// Apply this descriptor to a raw big-endian reading.
    pub fn apply(self, raw: u32) -> DecodedValue {
        match self.kind {
            Kind::Integer => DecodedValue::Integer(raw as i32 / self.divisor + self.offset),
            Kind::Ratio => DecodedValue::Ratio(raw as f32 / self.divisor as f32),
        }
    }
}

impl Pid {
    /// Wire code of this parameter.
    pub const fn code(self) -> u8 { self as u8 }

    /// Parameter for a wire code, if this gauge knows it.
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0x05 => Some(Self::CoolantTemp),
            0x0B => Some(Self::ManifoldPressure),
            0x0C => Some(Self::EngineSpeed),
            0x0E => Some(Self::TimingAdvance),
            0x0F => Some(Self::IntakeAirTemp),
            0x24 => Some(Self::O2Bank1),
            0x25 => Some(Self::O2Bank2),
            0x42 => Some(Self::ModuleVoltage),
            0x5C => Some(Self::OilTemp),
            _ => None,
        }
    }

    /// Dense index used for value-store slots.
    pub const fn index(self) -> usize {
        match self {
            Self::CoolantTemp => 0,
            Self::ManifoldPressure => 1,
            Self::EngineSpeed => 2,
            Self::TimingAdvance => 3,
            Self::IntakeAirTemp => 4,
            Self::O2Bank1 => 5,
            Self::O2Bank2 => 6,
            Self::ModuleVoltage => 7,
            Self::OilTemp => 8,
        }
    }

    /// Scaling descriptor for this parameter.
    ///
    /// The O2 banks use the two-byte equivalence-ratio prefix
    /// (`(256*A + B) / 32768`), not the four-byte table formula; this is the
    /// encoding the target vehicle's ECU actually sends.
    pub const fn scaling(self) -> Scaling {
        match self {
            Self::CoolantTemp | Self::IntakeAirTemp | Self::OilTemp => Scaling::integer(1, 1, -40),
            Self::ManifoldPressure => Scaling::integer(1, 1, 0),
            Self::EngineSpeed => Scaling::integer(2, 4, 0),
            Self::TimingAdvance => Scaling::integer(1, 2, -64),
            Self::O2Bank1 | Self::O2Bank2 => Scaling::ratio(32768),
            Self::ModuleVoltage => Scaling::ratio(1000),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_roundtrip() {
        for pid in ALL_PIDS {
            assert_eq!(Pid::from_code(pid.code()), Some(pid));
        }
    }

    #[test]
    fn test_unknown_code() {
        assert_eq!(Pid::from_code(0x00), None);
        assert_eq!(Pid::from_code(0xFF), None);
    }

    #[test]
    fn test_indices_are_dense() {
        for (expected, pid) in ALL_PIDS.iter().enumerate() {
            assert_eq!(pid.index(), expected);
        }
    }

    #[test]
    fn test_temperature_scaling() {
        // Raw byte 60 -> 20 C
        assert_eq!(
            Pid::CoolantTemp.scaling().apply(60),
            DecodedValue::Integer(20)
        );
        // Full legal byte range maps to -40..=215 C
        assert_eq!(
            Pid::OilTemp.scaling().apply(0),
            DecodedValue::Integer(-40)
        );
        assert_eq!(
            Pid::OilTemp.scaling().apply(255),
            DecodedValue::Integer(215)
        );
    }

    #[test]
    fn test_engine_speed_scaling() {
        // Raw bytes [0x01, 0x90] -> (256 + 0x90) / 4 = 100 rpm
        assert_eq!(
            Pid::EngineSpeed.scaling().apply(0x0190),
            DecodedValue::Integer(100)
        );
        assert_eq!(
            Pid::EngineSpeed.scaling().apply(0xFFFF),
            DecodedValue::Integer(16383)
        );
    }

    #[test]
    fn test_timing_advance_scaling() {
        assert_eq!(
            Pid::TimingAdvance.scaling().apply(0x80),
            DecodedValue::Integer(0)
        );
        assert_eq!(
            Pid::TimingAdvance.scaling().apply(0),
            DecodedValue::Integer(-64)
        );
        assert_eq!(
            Pid::TimingAdvance.scaling().apply(255),
            DecodedValue::Integer(63)
        );
    }

    #[test]
    fn test_manifold_pressure_is_raw_kpa() {
        assert_eq!(
            Pid::ManifoldPressure.scaling().apply(101),
            DecodedValue::Integer(101)
        );
    }

    #[test]
    fn test_o2_ratio_scaling() {
        // 0x8000 / 32768 = 1.0 (stoichiometric)
        let DecodedValue::Ratio(r) = Pid::O2Bank1.scaling().apply(0x8000) else {
            panic!("expected ratio");
        };
        assert!((r - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_module_voltage_scaling() {
        // 14000 mV -> 14.0 V
        let DecodedValue::Ratio(v) = Pid::ModuleVoltage.scaling().apply(14000) else {
            panic!("expected ratio");
        };
        assert!((v - 14.0).abs() < 1e-6);
    }
}
