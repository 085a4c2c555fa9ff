//! OBD-II Round Gauge Firmware for Raspberry Pi Pico (RP2040)
//!
//! Reads engine telemetry off the vehicle CAN bus (MCP2515 on SPI1) and
//! renders one metric per screen on a Waveshare 1.28" round LCD (GC9A01 on
//! SPI0). A single button cycles through the screens; the active screen is
//! persisted to flash and restored at boot.
//!
//! # Architecture
//!
//! - Main task: the synchronous control loop. Debounces the button, paces
//!   poll requests, reads the latest decoded values, redraws incrementally.
//! - CAN task: owns the MCP2515; sends requests fed through a bounded
//!   channel and publishes decoded responses into lock-free value cells.
//!
//! Nothing ever interrupts a redraw: all drawing happens inside the main
//! task's tick.

#![no_std]
#![no_main]
// Crate-level lints (match lib.rs for consistency)
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

// Modules only used in the binary (not testable on host)
mod can;
mod display;
mod mcp2515;
mod screens;
mod settings;

// Re-export testable modules from library for local use
// (These are defined in lib.rs with host-testable code)
mod button {
    pub use gauge_pico::button::*;
}
mod chrome {
    pub use gauge_pico::chrome::*;
}
mod clock {
    pub use gauge_pico::clock::*;
}
mod colors {
    pub use gauge_pico::colors::*;
}
mod config {
    pub use gauge_pico::config::*;
}
mod modes {
    pub use gauge_pico::modes::*;
}
mod obd {
    pub use gauge_pico::obd::*;
}
mod poll {
    pub use gauge_pico::poll::*;
}
mod render {
    pub use gauge_pico::render::*;
}

use defmt::{info, warn};
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::rtc::{DateTime, DayOfWeek, Rtc};
use embassy_rp::spi::Spi;
use embassy_time::{Instant, Timer};
use {defmt_rtt as _, panic_probe as _};

use crate::button::InputDebouncer;
use crate::can::{POLL_REQUESTS, VALUES, can_task};
use crate::clock::ClockState;
use crate::mcp2515::Mcp2515;
use crate::modes::GaugeMode;
use crate::obd::DecodedValue;
use crate::poll::PollScheduler;
use crate::render::{ValueCell, format_value};

// Program metadata for `picotool info`
#[unsafe(link_section = ".bi_entries")]
#[used]
pub static PICOTOOL_ENTRIES: [embassy_rp::binary_info::EntryAddr; 4] = [
    embassy_rp::binary_info::rp_program_name!(c"obd-round-gauge"),
    embassy_rp::binary_info::rp_program_description!(c"OBD-II engine gauge on a 1.28in round LCD"),
    embassy_rp::binary_info::rp_cargo_version!(),
    embassy_rp::binary_info::rp_program_build_attribute!(),
];

/// Control-loop period. Short enough to keep the 5 ms button debounce honest.
const TICK_MS: u64 = 5;

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("OBD round gauge v{} starting...", env!("CARGO_PKG_VERSION"));

    let p = embassy_rp::init(Default::default());

    // Restore the last active screen (out-of-range ordinals fall back to
    // the first screen rather than indexing out of bounds)
    let mut settings = settings::Settings::new(p.FLASH, p.DMA_CH0);
    let mut mode = GaugeMode::from_ordinal(settings.load_mode().await.unwrap_or(0));
    info!("restored screen ordinal {}", mode.ordinal());

    // Display on SPI0
    let cs = Output::new(p.PIN_17, Level::High);
    let dc = Output::new(p.PIN_16, Level::Low);
    let rst = Output::new(p.PIN_20, Level::High);
    let mut _backlight = Output::new(p.PIN_21, Level::High); // On
    let spi0 = Spi::new_blocking_txonly(p.SPI0, p.PIN_18, p.PIN_19, display::display_spi_config());
    let mut display = display::init_display(spi0, cs, dc, rst);
    info!("display initialized");

    screens::draw_boot_banner(&mut display, env!("CARGO_PKG_VERSION"));

    // CAN controller on SPI1 (MCP2515): CLK=10, MOSI=11, MISO=12, CS=13, INT=14
    let can_cs = Output::new(p.PIN_13, Level::High);
    let spi1 = Spi::new_blocking(p.SPI1, p.PIN_10, p.PIN_11, p.PIN_12, mcp2515::can_spi_config());
    let mut can = Mcp2515::new(spi1, can_cs);
    can.reset();
    Timer::after_millis(10).await;
    match can.configure() {
        Ok(()) => info!("CAN controller up at {} bit/s", config::CAN_BITRATE),
        // Degrade instead of halting: the gauge still runs, values stay at 0
        Err(_) => warn!("CAN controller not responding, gauge runs without bus data"),
    }

    let can_int = Input::new(p.PIN_14, Pull::Up);
    spawner.spawn(can_task(can, can_int)).unwrap();

    // Mode-select button, active-low with internal pull-up
    let button = Input::new(p.PIN_15, Pull::Up);
    let mut debouncer = InputDebouncer::new();

    // Wall clock. No battery backing: free-runs from a fixed epoch until a
    // maintenance tool sets it over the debug link.
    let mut rtc = Rtc::new(p.RTC);
    if !rtc.is_running() {
        let _ = rtc.set_datetime(DateTime {
            year: 2021,
            month: 10,
            day: 7,
            day_of_week: DayOfWeek::Thursday,
            hour: 0,
            minute: 0,
            second: 0,
        });
    }

    // Render state
    let mut scheduler = PollScheduler::new();
    let mut value_cell = ValueCell::new();
    let mut clock_state = ClockState::new();
    let mut was_live = VALUES.is_live(Instant::now().as_millis() as u32);

    screens::draw_chrome(&mut display, mode, was_live);

    info!("main loop starting");

    loop {
        let now_ms = Instant::now().as_millis();

        // Advance to the next screen on a debounced press edge
        if debouncer.pressed_edge(button.is_low(), now_ms) {
            mode = mode.next();
            settings.store_mode(mode.ordinal()).await;
            value_cell.reset();
            clock_state.invalidate();
            was_live = VALUES.is_live(now_ms as u32);
            screens::draw_chrome(&mut display, mode, was_live);
            info!("screen -> {}", mode.ordinal());
        }

        if mode == GaugeMode::Clock {
            let (hour, minute) = match rtc.now() {
                Ok(t) => (t.hour, t.minute),
                Err(_) => (0, 0),
            };
            if clock_state.needs_redraw(minute) {
                screens::draw_clock(&mut display, hour, minute);
                clock_state.mark_drawn(minute);
            }
        } else {
            // Request fresh data for this screen at most every 50 ms
            if let Some(pid) = mode.pid()
                && scheduler.should_poll(now_ms)
            {
                // A full queue means the bus side is behind; the request is
                // dropped, never retried
                let _ = POLL_REQUESTS.try_send(pid);
            }

            // Redraw from the latest decoded value; screens with no data yet
            // (or with no sender wired, like oil pressure) read as zero
            let value = match mode.pid().and_then(|pid| VALUES.read(pid)) {
                Some(v) => v,
                None if mode.is_fractional() => DecodedValue::Ratio(0.0),
                None => DecodedValue::Integer(0),
            };
            let readout = format_value(value);
            let clear_first = value_cell.advance(readout.class);
            screens::draw_value(&mut display, &readout, clear_first);

            // Keep the link icon honest as the ECU comes and goes
            let live = VALUES.is_live(now_ms as u32);
            if live != was_live {
                was_live = live;
                screens::draw_link_icon(&mut display, mode, live);
            }
        }

        Timer::after_millis(TICK_MS).await;
    }
}
