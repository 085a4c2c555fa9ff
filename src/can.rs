//! CAN bus task: owns the controller, decodes responses, publishes values.
//!
//! The task multiplexes two events: the INT pin dropping (a response frame
//! is waiting in RXB0) and a poll request from the render loop. Decoded
//! values land in the shared [`ValueStore`]; the render tick reads them on
//! its own schedule. Decode work stays short and allocation-free, so a busy
//! bus cannot starve the requests side.

use defmt::{debug, info};
use embassy_futures::select::{Either, select};
use embassy_rp::gpio::Input;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_time::Instant;

use crate::mcp2515::Mcp2515;
use crate::obd::{self, DecodeError, DecodedValue, Pid, ValueStore};

/// Poll requests from the render loop. Bounded and fed with `try_send`:
/// when the queue is full the request is dropped, keeping transmit
/// best-effort end to end.
pub static POLL_REQUESTS: Channel<CriticalSectionRawMutex, Pid, 4> = Channel::new();

/// Decoded-value cells. Written here, read by the render tick.
pub static VALUES: ValueStore = ValueStore::new();

#[embassy_executor::task]
pub async fn can_task(mut can: Mcp2515<'static>, mut int: Input<'static>) {
    info!("CAN task started");

    loop {
        match select(int.wait_for_low(), POLL_REQUESTS.receive()).await {
            Either::First(()) => {
                // Drain everything behind the interrupt before sleeping again
                while can.has_rx0() {
                    let frame = can.read_rx0();
                    handle_payload(&frame.data[..usize::from(frame.dlc)]);
                }
            }
            Either::Second(pid) => {
                let data = obd::request(pid);
                if can.transmit(obd::OBD_REQUEST_ID, &data).is_err() {
                    // Previous frame still pending; this request is dropped
                    debug!("tx busy, request for pid {=u8:#x} dropped", pid.code());
                }
            }
        }
    }
}

fn handle_payload(payload: &[u8]) {
    match obd::decode(payload) {
        Ok((pid, value)) => {
            VALUES.publish(pid, value, Instant::now().as_millis() as u32);

            match (pid, value) {
                (Pid::ManifoldPressure, DecodedValue::Integer(v)) => {
                    debug!("manifold pressure: {} kPa", v);
                }
                (Pid::TimingAdvance, DecodedValue::Integer(v)) => {
                    debug!("timing advance: {} deg BTDC", v);
                }
                _ => {}
            }
        }
        Err(DecodeError::TooShort) => debug!("runt response ignored"),
        Err(DecodeError::UnknownPid(code)) => debug!("unhandled pid {=u8:#x} ignored", code),
    }
}
