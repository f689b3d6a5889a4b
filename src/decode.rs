//! Frame decoder: raw bus frames to typed parameter updates.
//!
//! Decoding is profile-dependent. The pit/diagnostic screen (Params) shows
//! the full engine readout, so its profile extracts more fields from the
//! same frames; every other screen runs the lean profile. Battery voltage,
//! manifold pressure, throttle, lambda and wheel speed are only ever decoded
//! under the Params profile; the asymmetry ships as-is.
//!
//! The decoder is pure: it neither stores values nor emits commands. Unknown
//! identifiers and fields absent from the active profile decode to nothing.

use heapless::Vec;

use crate::config::{
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
    TENTHS_SCALE,
};
use crate::frame::BusFrame;
use crate::params::{ParamCode, ParamValue};

/// Most fields any single frame yields (engine status under Params).
pub const MAX_FIELDS_PER_FRAME: usize = 3;

/// Decoded updates from one frame.
pub type FieldUpdates = Vec<FieldUpdate, MAX_FIELDS_PER_FRAME>;

/// Which field set to extract.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DecodeProfile {
    /// Lean profile for the race/timer/drag screens.
    Standard,
    /// Full readout profile for the Params screen.
    Params,
}

/// One decoded parameter update, in scaled physical units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldUpdate {
    pub code: ParamCode,
    pub value: ParamValue,
}

impl FieldUpdate {
    const fn int(
        code: ParamCode,
        value: i32,
    ) -> Self {
        Self {
            code,
            value: ParamValue::Int(value),
        }
    }

    const fn float(
        code: ParamCode,
        value: f32,
    ) -> Self {
        Self {
            code,
            value: ParamValue::Float(value),
        }
    }
}

/// Engine-status temperature byte to degrees Fahrenheit.
///
/// The controller channel carries the value with a x10 multiplier and a -400
/// adder over tenths of a degree Celsius, which collapses to `raw - 40` °C;
/// the display works in Fahrenheit.
#[inline]
const fn status_temp_f(raw: u8) -> i32 {
    let celsius = raw as i32 - 40;
    celsius * 9 / 5 + 32
}

/// Decode one frame under the given profile.
pub fn decode_frame(
    frame: &BusFrame,
    profile: DecodeProfile,
) -> FieldUpdates {
    let mut updates = FieldUpdates::new();
    let params = profile == DecodeProfile::Params;

    match frame.id {
        FRAME_ENGINE_SPEED => {
            updates.push(FieldUpdate::int(ParamCode::Rpm, frame.be_u16(0) as i32)).ok();
            if params {
                let map_kpa = frame.be_u16(2) as f32 * TENTHS_SCALE;
                updates.push(FieldUpdate::float(ParamCode::ManifoldPressure, map_kpa)).ok();
            }
        }

        FRAME_GEAR => {
            let gear = (frame.data[6] & GEAR_MASK) as i32;
            updates.push(FieldUpdate::int(ParamCode::GearPos, gear)).ok();
        }

        FRAME_ENGINE_STATUS => {
            updates
                .push(FieldUpdate::int(ParamCode::CoolantTemp, status_temp_f(frame.data[0])))
                .ok();
            if params {
                let volts = frame.data[5] as f32 * TENTHS_SCALE;
                updates.push(FieldUpdate::float(ParamCode::BatteryVoltage, volts)).ok();
            }
            updates
                .push(FieldUpdate::int(ParamCode::OilTemp, status_temp_f(frame.data[1])))
                .ok();
        }

        FRAME_OIL_PRESSURE => {
            let psi = frame.be_u16(6) as f32 * KPA_RAW_TO_PSI;
            updates.push(FieldUpdate::float(ParamCode::OilPressure, psi)).ok();
        }

        FRAME_FUEL_LAMBDA => {
            let psi = frame.be_u16(4) as f32 * KPA_RAW_TO_PSI;
            updates.push(FieldUpdate::float(ParamCode::FuelPressure, psi)).ok();
            if params {
                let lambda = frame.be_u16(2) as f32 * LAMBDA_SCALE;
                updates.push(FieldUpdate::float(ParamCode::Lambda, lambda)).ok();
            }
        }

        FRAME_THROTTLE if params => {
            let percent = frame.be_u16(0) as f32 * TENTHS_SCALE;
            updates.push(FieldUpdate::float(ParamCode::Throttle, percent)).ok();
        }

        FRAME_WHEEL_SPEED if params => {
            let mph = frame.be_u16(6) as f32 * TENTHS_SCALE * KMH_TO_MPH;
            updates.push(FieldUpdate::float(ParamCode::MaxWheelSpeed, mph)).ok();
        }

        // Unrecognized identifiers (and profile-gated fields) are ignored.
        _ => {}
    }

    updates
}

// =============================================================================
// Unit Tests
// =============================================================================
