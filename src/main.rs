//! CAN telemetry dashboard firmware for Raspberry Pi Pico 2 (RP2350).
//!
//! Drives the steering-wheel display over UART and the four shift LEDs from
//! engine controller telemetry.
//!
//! # Architecture
//!
//! All inputs are funneled through one event channel:
//! - Frame source task: posts bus frames (demo generator until the CAN
//!   transceiver bridge is wired)
//! - Tick task: posts a scheduler tick every 10 ms
//! - Button task: posts page-button edges (debounced)
//!
//! The main loop is the only consumer and the only owner of the dashboard
//! state, so frame handling and ticks can never race. After each event the
//! latest tachometer pattern is applied to the LED outputs.

#![cfg_attr(target_arch = "arm", no_std)]
#![cfg_attr(target_arch = "arm", no_main)]
// Crate-level lints (match lib.rs for consistency)
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

// Modules only used in the binary (not testable on host)
#[cfg(target_arch = "arm")]
mod app;
#[cfg(target_arch = "arm")]
mod button;

/// The firmware only runs on the RP2350. Host builds get a stub entry point
/// so `cargo build`/`cargo test` work without the ARM-only dependencies.
#[cfg(not(target_arch = "arm"))]
fn main() {
    eprintln!("fsae-dash targets the RP2350; build with the thumbv8m.main-none-eabihf target");
}
