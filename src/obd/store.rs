//! Lock-free handoff of decoded values between the CAN task and the render tick.
//!
//! Each parameter gets one cell with a single writer (the CAN task) and a
//! single reader (the render tick). A cell is two words: the value bits,
//! written with one atomic store so the reader can never observe a torn
//! value, and a millisecond stamp that doubles as the validity flag (0 means
//! "never written") and drives the connection liveness check. The target has
//! no OS locking primitives; plain load/store atomics are all this needs.

use core::sync::atomic::{AtomicU32, Ordering};

use super::DecodedValue;
use super::pid::{Kind, PID_COUNT, Pid};

/// How long after the last decoded frame the ECU still counts as connected.
pub const LIVENESS_WINDOW_MS: u32 = 1_000;

struct Cell {
    value: AtomicU32,
    stamp_ms: AtomicU32,
}

impl Cell {
    const fn new() -> Self {
        Self {
            value: AtomicU32::new(0),
            stamp_ms: AtomicU32::new(0),
        }
    }
}

/// One decoded-value slot per parameter, overwritten on each new frame.
pub struct ValueStore {
    cells: [Cell; PID_COUNT],
}

impl ValueStore {
    pub const fn new() -> Self {
        Self {
            cells: [const { Cell::new() }; PID_COUNT],
        }
    }

    /// Publish a decoded value. Single writer: the CAN task.
    pub fn publish(&self, pid: Pid, value: DecodedValue, now_ms: u32) {
        let cell = &self.cells[pid.index()];
        let bits = match value {
            DecodedValue::Integer(v) => v as u32,
            DecodedValue::Ratio(v) => v.to_bits(),
        };
        cell.value.store(bits, Ordering::Release);
        // Stamp 0 is the "never written" sentinel; step over it on wrap.
        cell.stamp_ms.store(now_ms.max(1), Ordering::Release);
    }

    /// Latest value for `pid`, or `None` while no frame has arrived yet.
    ///
    /// Stale data still reads back: the display degrades to the last known
    /// good value, and staleness surfaces through [`Self::is_live`] instead.
    pub fn read(&self, pid: Pid) -> Option<DecodedValue> {
        let cell = &self.cells[pid.index()];
        if cell.stamp_ms.load(Ordering::Acquire) == 0 {
            return None;
        }
        let bits = cell.value.load(Ordering::Acquire);
        Some(match pid.scaling().kind {
            Kind::Integer => DecodedValue::Integer(bits as i32),
            Kind::Ratio => DecodedValue::Ratio(f32::from_bits(bits)),
        })
    }

    /// True while any parameter was updated within the liveness window.
    pub fn is_live(&self, now_ms: u32) -> bool {
        self.cells.iter().any(|cell| {
            let stamp = cell.stamp_ms.load(Ordering::Acquire);
            stamp != 0 && now_ms.wrapping_sub(stamp) <= LIVENESS_WINDOW_MS
        })
    }
}

impl Default for ValueStore {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unwritten_reads_none() {
        let store = ValueStore::new();
        assert_eq!(store.read(Pid::CoolantTemp), None);
        assert!(!store.is_live(0));
    }

    #[test]
    fn test_publish_read_roundtrip_integer() {
        let store = ValueStore::new();
        store.publish(Pid::EngineSpeed, DecodedValue::Integer(3200), 100);
        assert_eq!(store.read(Pid::EngineSpeed), Some(DecodedValue::Integer(3200)));
    }

    #[test]
    fn test_publish_read_roundtrip_negative() {
        let store = ValueStore::new();
        store.publish(Pid::OilTemp, DecodedValue::Integer(-40), 100);
        assert_eq!(store.read(Pid::OilTemp), Some(DecodedValue::Integer(-40)));
    }

    #[test]
    fn test_publish_read_roundtrip_ratio() {
        let store = ValueStore::new();
        store.publish(Pid::O2Bank1, DecodedValue::Ratio(0.997), 100);
        let Some(DecodedValue::Ratio(r)) = store.read(Pid::O2Bank1) else {
            panic!("expected ratio");
        };
        assert!((r - 0.997).abs() < 1e-6);
    }

    #[test]
    fn test_slots_are_independent() {
        let store = ValueStore::new();
        store.publish(Pid::CoolantTemp, DecodedValue::Integer(88), 100);
        assert_eq!(store.read(Pid::OilTemp), None);
    }

    #[test]
    fn test_new_frame_overwrites_slot() {
        let store = ValueStore::new();
        store.publish(Pid::CoolantTemp, DecodedValue::Integer(88), 100);
        store.publish(Pid::CoolantTemp, DecodedValue::Integer(92), 150);
        assert_eq!(store.read(Pid::CoolantTemp), Some(DecodedValue::Integer(92)));
    }

    #[test]
    fn test_liveness_window() {
        let store = ValueStore::new();
        store.publish(Pid::CoolantTemp, DecodedValue::Integer(88), 1_000);
        assert!(store.is_live(1_000));
        assert!(store.is_live(1_000 + LIVENESS_WINDOW_MS));
        assert!(!store.is_live(1_001 + LIVENESS_WINDOW_MS));
        // Value is still readable after the link goes quiet
        assert_eq!(store.read(Pid::CoolantTemp), Some(DecodedValue::Integer(88)));
    }

    #[test]
    fn test_publish_at_zero_still_counts() {
        let store = ValueStore::new();
        store.publish(Pid::CoolantTemp, DecodedValue::Integer(88), 0);
        assert_eq!(store.read(Pid::CoolantTemp), Some(DecodedValue::Integer(88)));
        assert!(store.is_live(1));
    }
}
