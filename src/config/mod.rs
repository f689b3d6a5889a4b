//! Application configuration.
//!
//! - `bus`: CAN frame identifiers, field scale factors, silent-window timing
//! - `thresholds`: warning thresholds, shift points, display icon indices

pub mod bus;
pub mod thresholds;

// Re-export bus constants at config level for convenience
pub use bus::{
    CAN_BITRATE,
    DISPLAY_BAUD,
    FRAME_ENGINE_SPEED,
    FRAME_ENGINE_STATUS,
    FRAME_FUEL_LAMBDA,
    FRAME_GEAR,
    FRAME_OIL_PRESSURE,
    FRAME_THROTTLE,
    FRAME_WHEEL_SPEED,
    GEAR_MASK,
    KMH_TO_MPH,
    KPA_RAW_TO_PSI,
    LAMBDA_SCALE,
    SILENT_WINDOW_MS,
    TENTHS_SCALE,
};
// Re-export threshold constants at config level for convenience
pub use thresholds::{
    COOLANT_ALERT_F,
    COOLANT_WARN_F,
    FUEL_ALERT_PSI,
    FUEL_WARN_PSI,
    GEAR_SHIFT_RPM,
    ICON_WARN_CLEARED,
    ICON_WARN_COOLANT,
    ICON_WARN_FUEL,
    ICON_WARN_OIL_PRESSURE,
    ICON_WARN_OIL_TEMP,
    OIL_ALERT_BANDS,
    OIL_TEMP_ALERT_F,
    OIL_TEMP_WARN_F,
    OIL_WARN_BANDS,
    PIC_DELTA_NEGATIVE,
    PIC_DELTA_POSITIVE,
    WARN_RPM_FLOOR,
};
