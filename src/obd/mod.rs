//! OBD-II protocol support.
//!
//! - [`pid`]: the parameter catalog and per-parameter scaling descriptors
//! - [`codec`]: request frame construction and response payload decoding
//! - [`store`]: lock-free handoff of decoded values from the CAN task to the
//!   render tick

pub mod codec;
pub mod pid;
pub mod store;

pub use codec::{DecodeError, OBD_REQUEST_ID, decode, request};
pub use pid::{Kind, PID_COUNT, Pid, Scaling};
pub use store::ValueStore;

/// A decoded measurement.
///
/// Most parameters scale to whole units and decode as `Integer`; the O2
/// equivalence ratios and the module voltage are `Ratio` values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DecodedValue {
    Integer(i32),
    Ratio(f32),
}
