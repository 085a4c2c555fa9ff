//! Request construction and response decoding for service 01.
//!
//! Request frame layout (8 bytes, short 11-bit addressing):
//! `[0x02, 0x01, pid, 0, 0, 0, 0, 0]`: two significant bytes, the
//! "Show Current Data" service, then the requested parameter.
//!
//! Response payloads echo the parameter code at byte 2; the measurement
//! follows from byte 3. Dispatch is on the echo, so late or unsolicited
//! responses land in the right slot regardless of what was last requested.

use embedded_can::StandardId;

use super::DecodedValue;
use super::pid::Pid;

/// CAN identifier the ECU listens on for requests.
pub const OBD_REQUEST_ID: StandardId = match StandardId::new(0x700) {
    Some(id) => id,
    None => unreachable!(),
};

/// Count of significant bytes in a request frame.
const REQUEST_LEN: u8 = 0x02;

/// OBD-II service 01, "Show Current Data".
const SERVICE_CURRENT_DATA: u8 = 0x01;

/// Offset of the echoed parameter code within a response payload.
const PID_ECHO_OFFSET: usize = 2;

/// Offset of the first measurement byte within a response payload.
const DATA_OFFSET: usize = 3;

/// Why a received payload could not be decoded.
///
/// These are real faults, reported distinctly from "no data received yet"
/// (which the value store expresses as `None`).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DecodeError {
    /// Payload too short for the echoed parameter's measurement bytes.
    TooShort,
    /// Echoed parameter code is not one this gauge understands.
    UnknownPid(u8),
}

/// Build the fixed 8-byte request frame for `pid`.
pub fn request(pid: Pid) -> [u8; 8] {
    [REQUEST_LEN, SERVICE_CURRENT_DATA, pid.code(), 0, 0, 0, 0, 0]
}

/// Decode a response payload into the parameter it answers and its value.
pub fn decode(data: &[u8]) -> Result<(Pid, DecodedValue), DecodeError> {
    if data.len() <= PID_ECHO_OFFSET {
        return Err(DecodeError::TooShort);
    }

    let code = data[PID_ECHO_OFFSET];
    let pid = Pid::from_code(code).ok_or(DecodeError::UnknownPid(code))?;
    let scaling = pid.scaling();

    if data.len() < DATA_OFFSET + scaling.data_len as usize {
        return Err(DecodeError::TooShort);
    }

    let raw = match scaling.data_len {
        1 => u32::from(data[DATA_OFFSET]),
        _ => 256 * u32::from(data[DATA_OFFSET]) + u32::from(data[DATA_OFFSET + 1]),
    };

    Ok((pid, scaling.apply(raw)))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_layout() {
        let frame = request(Pid::CoolantTemp);
        assert_eq!(frame, [0x02, 0x01, 0x05, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_request_id() {
        assert_eq!(OBD_REQUEST_ID.as_raw(), 0x700);
    }

    #[test]
    fn test_decode_follows_request() {
        // Round trip: the response echoes the pid the request named.
        let req = request(Pid::CoolantTemp);
        let response = [0x03, 0x41, req[2], 60, 0, 0, 0, 0];
        let (pid, value) = decode(&response).unwrap();
        assert_eq!(pid, Pid::CoolantTemp);
        assert_eq!(value, DecodedValue::Integer(20));
    }

    #[test]
    fn test_decode_engine_speed() {
        let response = [0x04, 0x41, 0x0C, 0x01, 0x90, 0, 0, 0];
        let (pid, value) = decode(&response).unwrap();
        assert_eq!(pid, Pid::EngineSpeed);
        assert_eq!(value, DecodedValue::Integer(100));
    }

    #[test]
    fn test_decode_o2_ratio() {
        let response = [0x04, 0x41, 0x24, 0x80, 0x00, 0, 0, 0];
        let (pid, value) = decode(&response).unwrap();
        assert_eq!(pid, Pid::O2Bank1);
        let DecodedValue::Ratio(r) = value else {
            panic!("expected ratio");
        };
        assert!((r - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_decode_unknown_pid() {
        let response = [0x03, 0x41, 0x99, 60, 0, 0, 0, 0];
        assert_eq!(decode(&response), Err(DecodeError::UnknownPid(0x99)));
    }

    #[test]
    fn test_decode_runt_frame() {
        assert_eq!(decode(&[0x03, 0x41]), Err(DecodeError::TooShort));
        // Two-byte parameter with only one measurement byte present
        assert_eq!(decode(&[0x04, 0x41, 0x0C, 0x01]), Err(DecodeError::TooShort));
    }

    #[test]
    fn test_decode_empty() {
        assert_eq!(decode(&[]), Err(DecodeError::TooShort));
    }
}
