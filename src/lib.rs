//! Gauge library - testable modules for the OBD-II round gauge.
//!
//! This library contains the core logic that can be tested on the host machine.
//! The binary (`main.rs`) uses this library and adds the embedded-specific code:
//! display bring-up, the MCP2515 CAN driver, flash-backed settings and the
//! control loop.
//!
//! # Testing
//!
//! Run tests on host with:
//! ```bash
//! cargo test -p gauge-pico --lib --target x86_64-unknown-linux-gnu  # Linux/macOS
//! cargo test -p gauge-pico --lib --target x86_64-pc-windows-msvc    # Windows
//! ```
//!
//! Tests run with `std` enabled (via `cfg_attr`), allowing use of the standard
//! test framework while the actual firmware runs as `no_std`.

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

// === Pure logic modules (testable on host, no ARM dependencies) ===

// Configuration
pub mod config;

// Input and timing
pub mod button;
pub mod poll;

// Vehicle bus protocol
pub mod obd;

// Screens
pub mod clock;
pub mod modes;
pub mod render;

mod ui {
    pub mod chrome;
    pub mod colors;
}

// Re-export at top level for existing imports
pub use ui::{chrome, colors};
