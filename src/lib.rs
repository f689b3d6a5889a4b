//! Dashboard library - testable core of the CAN telemetry dashboard.
//!
//! This library contains the frame-decode/dispatch pipeline, the screen state
//! machine, the warning-hysteresis engine, and the display command emitter.
//! It is pure logic: no clock, no peripherals, no logging. The binary
//! (`main.rs`) feeds it bus frames, ticks and button edges over a channel and
//! backs the display link with a UART.
//!
//! # Testing
//!
//! Run tests on host with:
//! ```bash
//! cargo test --lib --target x86_64-unknown-linux-gnu  # Linux/macOS
//! cargo test --lib --target x86_64-pc-windows-msvc    # Windows
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

// Configuration
pub mod config;

// Pipeline stages
pub mod decode;
pub mod dispatch;
pub mod frame;
pub mod nextion;
pub mod params;
pub mod silent;

// State
pub mod screens;
pub mod tach;
pub mod timers;
pub mod warnings;

// Single state owner tying the stages together
pub mod dashboard;

// Re-export the types the binary works with
pub use dashboard::{Dashboard, Event};
pub use frame::BusFrame;
pub use nextion::DisplayLink;
pub use screens::Screen;
pub use tach::LedPattern;
