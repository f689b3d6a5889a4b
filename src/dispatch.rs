//! Screen-gated parameter dispatch.
//!
//! Writing a field the active page does not host confuses the display and
//! stalls the serial link, so every parameter carries the set of screens it
//! may be shown on. An update whose code is not allowed on the gating screen
//! is dropped whole: the store is untouched and nothing is emitted. Drops are
//! counted but otherwise silent.
//!
//! Warning-flag codes bypass the gate: their icons exist on every page, and
//! they route into [`WarningState`] instead of the parameter store.

use crate::nextion::{self, DisplayLink};
use crate::params::{ParamCode, ParamStore, ParamValue};
use crate::screens::Screen;
use crate::warnings::{Warning, WarningState};

// =============================================================================
// Screen Sets
// =============================================================================

/// Bitmask over screens a parameter may be displayed on.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ScreenSet(u8);

impl ScreenSet {
    /// No screen accepts the parameter.
    pub const NONE: Self = Self(0);

    /// Every screen accepts the parameter.
    pub const ALL: Self = Self(0xFF);

    /// Set containing exactly the given screens.
    pub const fn of(screens: &[Screen]) -> Self {
        let mut mask = 0u8;
        let mut i = 0;
        while i < screens.len() {
            mask |= 1 << screens[i] as u8;
            i += 1;
        }
        Self(mask)
    }

    /// Whether `screen` is in the set.
    #[inline]
    pub const fn contains(
        self,
        screen: Screen,
    ) -> bool {
        (self.0 & (1 << screen as u8)) != 0
    }
}

/// Screens on which a parameter may be displayed.
pub const fn allowed_screens(code: ParamCode) -> ScreenSet {
    match code {
        // Full-readout fields live on the Params page only.
        ParamCode::CoolantTemp
        | ParamCode::FuelPressure
        | ParamCode::ManifoldPressure
        | ParamCode::OilPressure
        | ParamCode::OilTemp => ScreenSet::of(&[Screen::Params]),

        // Race-view fields.
        ParamCode::FrontBrakePressure | ParamCode::RearBrakePressure | ParamCode::Rpm => {
            ScreenSet::of(&[Screen::Config1])
        }

        ParamCode::GearPos => ScreenSet::of(&[Screen::Config1, Screen::Config2, Screen::DragMode]),

        ParamCode::TimerDeltaPic => ScreenSet::of(&[Screen::Config2]),

        // Text fields and timers are pushed wherever they land.
        ParamCode::BatteryVoltage
        | ParamCode::Lambda
        | ParamCode::Throttle
        | ParamCode::TimerDelta
        | ParamCode::TimerLap1
        | ParamCode::TimerLap2
        | ParamCode::TimerLap3 => ScreenSet::ALL,

        // Warning icons exist on every page (routed before the gate).
        ParamCode::WarnCoolantTemp
        | ParamCode::WarnFuelPressure
        | ParamCode::WarnOilTemp
        | ParamCode::WarnOilPressure => ScreenSet::ALL,

        // Max wheel speed is never accepted by any screen as shipped; the
        // dashboard keeps the running maximum itself.
        ParamCode::MaxWheelSpeed => ScreenSet::NONE,

        // Reserved code, never displayed.
        ParamCode::BspdState => ScreenSet::NONE,
    }
}

// =============================================================================
// Dispatcher
// =============================================================================

/// Applies gated updates to the store and the display.
pub struct Dispatcher {
    dropped: u32,
}

impl Dispatcher {
    pub const fn new() -> Self { Self { dropped: 0 } }

    /// Updates dropped by the screen gate since startup.
    #[inline]
    pub const fn dropped_updates(&self) -> u32 { self.dropped }

    /// Dispatch one (code, value) update against the gating screen.
    ///
    /// Returns whether the update was accepted. Warning codes always route
    /// into `warnings` and emit their icon.
    pub fn dispatch(
        &mut self,
        store: &mut ParamStore,
        warnings: &mut WarningState,
        gating: Screen,
        code: ParamCode,
        value: ParamValue,
        link: &mut impl DisplayLink,
    ) -> bool {
        if let Some(warning) = Warning::from_code(code) {
            let raised = value.as_int() != 0;
            warnings.set(warning, raised);
            emit_warning_icon(link, warning, raised);
            return true;
        }

        if !allowed_screens(code).contains(gating) {
            self.dropped = self.dropped.wrapping_add(1);
            return false;
        }

        store.set(code, value);
        emit_update(link, code, value);
        true
    }
}

impl Default for Dispatcher {
    fn default() -> Self { Self::new() }
}

/// Emit the icon command for a warning flag state.
pub fn emit_warning_icon(
    link: &mut impl DisplayLink,
    warning: Warning,
    raised: bool,
) {
    let pic = if raised {
        warning.raised_icon()
    } else {
        crate::config::ICON_WARN_CLEARED
    };
    nextion::set_picture(link, warning.icon_object(), pic);
}

/// Emit the display command for an accepted (non-warning) update.
fn emit_update(
    link: &mut impl DisplayLink,
    code: ParamCode,
    value: ParamValue,
) {
    match code {
        ParamCode::BatteryVoltage => emit_float_text(link, "Batt", value),
        ParamCode::Lambda => emit_float_text(link, "Lam", value),
        ParamCode::Throttle => emit_float_text(link, "Thrt", value),

        ParamCode::TimerDelta => emit_duration(link, "timer_Delta", value),
        ParamCode::TimerLap1 => emit_duration(link, "timer_R1", value),
        ParamCode::TimerLap2 => emit_duration(link, "timer_R2", value),
        ParamCode::TimerLap3 => emit_duration(link, "timer_R3", value),

        ParamCode::TimerDeltaPic => nextion::set_picture(link, "pic_Delta", value.as_int() as u8),

        ParamCode::CoolantTemp => nextion::set_value(link, "ETC", value.as_int()),
        ParamCode::FrontBrakePressure => nextion::set_value(link, "FrontBP", value.as_int()),
        ParamCode::RearBrakePressure => nextion::set_value(link, "RearBP", value.as_int()),
        ParamCode::FuelPressure => nextion::set_value(link, "fuelPRSR", value.as_int()),
        ParamCode::GearPos => nextion::set_value(link, "gearPos", value.as_int()),
        ParamCode::ManifoldPressure => nextion::set_value(link, "Map", value.as_int()),
        ParamCode::OilPressure => nextion::set_value(link, "oilPRSR", value.as_int()),
        ParamCode::Rpm => nextion::set_value(link, "RPM", value.as_int()),
        ParamCode::MaxWheelSpeed => nextion::set_value(link, "MaxWS", value.as_int()),
        ParamCode::OilTemp => nextion::set_value(link, "oilTEMP", value.as_int()),

        // Warning codes are routed before the gate; the reserved code is
        // never accepted.
        ParamCode::BspdState
        | ParamCode::WarnCoolantTemp
        | ParamCode::WarnFuelPressure
        | ParamCode::WarnOilTemp
        | ParamCode::WarnOilPressure => {}
    }
}

fn emit_float_text(
    link: &mut impl DisplayLink,
    object: &str,
    value: ParamValue,
) {
    match value {
        ParamValue::Float(v) => nextion::set_text_float(link, object, v),
        ParamValue::Int(v) => nextion::set_text_float(link, object, v as f32),
    }
}

fn emit_duration(
    link: &mut impl DisplayLink,
    object: &str,
    value: ParamValue,
) {
    let ms = value.as_int().max(0) as u32;
    nextion::set_text(link, object, &nextion::format_duration(ms));
}

// =============================================================================
// Unit Tests
// =============================================================================
