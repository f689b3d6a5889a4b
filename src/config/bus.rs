//! CAN bus and serial link configuration constants.
//!
//! Frame identifiers and scale factors come from the engine controller's
//! dash-manager channel layout. Raw payload fields are big-endian; scale
//! factors convert them to physical units before anything else sees them.

// =============================================================================
// Frame Identifiers (decimal, standard 11-bit IDs)
// =============================================================================

/// Engine speed frame (0x640). RPM in bytes 0-1, manifold pressure in bytes 2-3.
pub const FRAME_ENGINE_SPEED: u16 = 1600;

/// Fuel system frame (0x641). Fuel pressure in bytes 4-5, lambda in bytes 2-3.
pub const FRAME_FUEL_LAMBDA: u16 = 1601;

/// Throttle frame (0x642). Pedal position in bytes 0-1.
pub const FRAME_THROTTLE: u16 = 1602;

/// Oil pressure frame (0x644). Pressure in bytes 6-7.
pub const FRAME_OIL_PRESSURE: u16 = 1604;

/// Wheel speed frame (0x648). Fastest wheel in bytes 6-7.
pub const FRAME_WHEEL_SPEED: u16 = 1608;

/// Engine status frame (0x649). Coolant temp byte 0, oil temp byte 1,
/// battery voltage byte 5.
pub const FRAME_ENGINE_STATUS: u16 = 1609;

/// Gear position frame (0x64D). Gear in the low bits of byte 6.
pub const FRAME_GEAR: u16 = 1613;

// =============================================================================
// Field Scaling
// =============================================================================

/// Gear position occupies the low 3 bits of its byte.
pub const GEAR_MASK: u8 = 0x07;

/// Raw kPa-tenths to PSI: `raw * 0.145038 / 10`.
pub const KPA_RAW_TO_PSI: f32 = 0.145038 / 10.0;

/// Base resolution for tenth-unit channels (manifold pressure, throttle,
/// wheel speed, battery voltage).
pub const TENTHS_SCALE: f32 = 0.1;

/// Lambda channel base resolution.
pub const LAMBDA_SCALE: f32 = 0.01;

/// km/h to mph conversion for wheel speed.
pub const KMH_TO_MPH: f32 = 1.609_344;

// =============================================================================
// Timing and Link Rates
// =============================================================================

/// Silent-window flip interval in milliseconds. While the window is active,
/// only the gear frame is processed so it is never starved by the rest of
/// the bus traffic.
pub const SILENT_WINDOW_MS: u64 = 50;

/// Engine controller bus bitrate (bits per second).
pub const CAN_BITRATE: u32 = 1_000_000;

/// Serial baud rate of the display link.
pub const DISPLAY_BAUD: u32 = 9600;
