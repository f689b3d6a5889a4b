//! Single owner of all dashboard state.
//!
//! Every input (bus frame, scheduler tick, page button edge) arrives as an
//! [`Event`] and is handled by one `Dashboard` instance, so the store, screen
//! state, warning flags and silent window are only ever touched from one
//! place. The firmware feeds events through a channel from its producer
//! tasks; tests call [`Dashboard::handle_event`] directly.

use crate::config::{
    COOLANT_ALERT_F,
    COOLANT_WARN_F,
    FRAME_GEAR,
    FUEL_ALERT_PSI,
    OIL_TEMP_ALERT_F,
    OIL_TEMP_WARN_F,
    WARN_RPM_FLOOR,
};
use crate::decode::{DecodeProfile, FieldUpdate, decode_frame};
use crate::dispatch::{Dispatcher, emit_warning_icon};
use crate::frame::BusFrame;
use crate::nextion::{self, DisplayLink};
use crate::params::{ParamCode, ParamStore, ParamValue};
use crate::screens::{Screen, ScreenState};
use crate::silent::SilentWindow;
use crate::tach::{LedPattern, shift_light_pattern};
use crate::timers::TimerBank;
use crate::warnings::{self, ALL_WARNINGS, Warning, WarningState, transition};

/// One input to the dashboard core.
#[derive(Clone, Copy, Debug)]
pub enum Event {
    /// A bus frame arrived.
    Frame(BusFrame),
    /// Periodic scheduler tick.
    Tick,
    /// Driver pressed the page button.
    PageButton,
}

/// All dashboard state, plus the routing between pipeline stages.
pub struct Dashboard {
    store: ParamStore,
    screens: ScreenState,
    warnings: WarningState,
    silent: SilentWindow,
    timers: TimerBank,
    dispatcher: Dispatcher,
    /// Latest decoded engine speed; feeds warning gates and the tachometer
    /// regardless of what the screen gate accepts.
    rpm: u16,
    /// Latest decoded gear position, for the shift-point table.
    gear: u8,
    /// Session maximum wheel speed, never decreasing.
    max_wheel_speed: f32,
    /// Latest computed tachometer pattern.
    lights: LedPattern,
}

impl Dashboard {
    pub const fn new() -> Self {
        Self {
            store: ParamStore::new(),
            screens: ScreenState::new(),
            warnings: WarningState::new(),
            silent: SilentWindow::new(),
            timers: TimerBank::new(),
            dispatcher: Dispatcher::new(),
            rpm: 0,
            gear: 0,
            max_wheel_speed: 0.0,
            lights: LedPattern::OFF,
        }
    }

    /// Bring up the opening screen.
    pub fn startup(
        &mut self,
        link: &mut impl DisplayLink,
    ) {
        self.change_screen(Screen::Params, link);
    }

    /// Handle one event at the given time.
    pub fn handle_event(
        &mut self,
        event: Event,
        now_ms: u64,
        link: &mut impl DisplayLink,
    ) {
        // Both entry points keep the silent window ticking.
        self.silent.poll(now_ms);

        match event {
            Event::Frame(frame) => self.handle_frame(&frame, link),
            Event::Tick => self.handle_tick(now_ms, link),
            Event::PageButton => {
                let next = self.screens.gating_screen().next_in_cycle();
                self.change_screen(next, link);
            }
        }
    }

    // =========================================================================
    // Frame Path
    // =========================================================================

    fn handle_frame(
        &mut self,
        frame: &BusFrame,
        link: &mut impl DisplayLink,
    ) {
        // While the silent window is active, only the gear frame gets through.
        if self.silent.is_active() && frame.id != FRAME_GEAR {
            return;
        }

        let profile = if self.screens.gating_screen() == Screen::Params {
            DecodeProfile::Params
        } else {
            DecodeProfile::Standard
        };

        for update in decode_frame(frame, profile) {
            self.route(update, profile, link);
        }
    }

    /// Apply one decoded update: dispatch it, then run the side effect keyed
    /// by its parameter code.
    fn route(
        &mut self,
        update: FieldUpdate,
        profile: DecodeProfile,
        link: &mut impl DisplayLink,
    ) {
        let alerts = profile == DecodeProfile::Params;
        let FieldUpdate { code, value } = update;

        match code {
            ParamCode::Rpm => {
                self.rpm = value.as_int() as u16;
                self.dispatch(code, value, link);
                self.lights = shift_light_pattern(self.rpm as i32, self.gear);
            }

            ParamCode::GearPos => {
                self.gear = value.as_int() as u8;
                self.dispatch(code, value, link);
            }

            ParamCode::CoolantTemp => {
                let temp = value.as_int();
                self.dispatch(code, value, link);
                self.apply_warning(Warning::CoolantTemp, temp >= COOLANT_WARN_F, link);
                if alerts {
                    if temp >= COOLANT_ALERT_F {
                        self.slowdown_resend(Warning::CoolantTemp, link);
                    } else {
                        self.return_to_last_normal(link);
                    }
                }
            }

            ParamCode::OilTemp => {
                let temp = value.as_int();
                self.dispatch(code, value, link);
                self.apply_warning(Warning::OilTemp, temp >= OIL_TEMP_WARN_F, link);
                if alerts {
                    if temp >= OIL_TEMP_ALERT_F {
                        self.slowdown_resend(Warning::OilTemp, link);
                    } else {
                        self.return_to_last_normal(link);
                    }
                }
            }

            ParamCode::OilPressure => {
                let psi = match value {
                    ParamValue::Float(v) => v,
                    ParamValue::Int(v) => v as f32,
                };
                self.dispatch(code, value, link);
                // Oil pressure is only judged with the engine running.
                if self.rpm > WARN_RPM_FLOOR {
                    self.apply_warning(
                        Warning::OilPressure,
                        warnings::oil_pressure_low(psi, self.rpm),
                        link,
                    );
                    if alerts && warnings::oil_pressure_critical(psi, self.rpm) {
                        self.slowdown_resend(Warning::OilPressure, link);
                    }
                }
            }

            ParamCode::FuelPressure => {
                let psi = match value {
                    ParamValue::Float(v) => v,
                    ParamValue::Int(v) => v as f32,
                };
                self.dispatch(code, value, link);
                self.apply_warning(
                    Warning::FuelPressure,
                    warnings::fuel_pressure_low(psi, self.rpm),
                    link,
                );
                if alerts && psi <= FUEL_ALERT_PSI {
                    self.slowdown_resend(Warning::FuelPressure, link);
                }
            }

            ParamCode::MaxWheelSpeed => {
                // Running maximum lives here; the dispatched value is the
                // maximum, not the sample.
                if let ParamValue::Float(mph) = value
                    && mph > self.max_wheel_speed
                {
                    self.max_wheel_speed = mph;
                }
                self.dispatch(code, ParamValue::Float(self.max_wheel_speed), link);
            }

            // Battery voltage, lambda, throttle, manifold pressure.
            _ => {
                self.dispatch(code, value, link);
            }
        }
    }

    fn handle_tick(
        &mut self,
        now_ms: u64,
        link: &mut impl DisplayLink,
    ) {
        // The master delta mirrors uptime while the engine runs.
        if self.rpm > 0 {
            self.timers.set_delta_ms(now_ms as u32);
            self.dispatch(ParamCode::TimerDelta, ParamValue::Int(now_ms as u32 as i32), link);
        }
    }

    // =========================================================================
    // Warning Routing
    // =========================================================================

    /// Run one hysteresis step and dispatch the resulting flag value, if any.
    fn apply_warning(
        &mut self,
        warning: Warning,
        condition: bool,
        link: &mut impl DisplayLink,
    ) {
        if let Some(raise) = transition(self.warnings.is_raised(warning), condition) {
            self.dispatch(warning.code(), ParamValue::Int(raise as i32), link);
        }
    }

    /// Slow-down alert path: re-send the coolant warning code carrying the
    /// triggering warning's current flag value. This does not change screens.
    fn slowdown_resend(
        &mut self,
        trigger: Warning,
        link: &mut impl DisplayLink,
    ) {
        let flag = self.warnings.is_raised(trigger);
        self.dispatch(ParamCode::WarnCoolantTemp, ParamValue::Int(flag as i32), link);
    }

    // =========================================================================
    // Screen Transitions
    // =========================================================================

    /// Switch the display to `target` and refresh its parameter set.
    pub fn change_screen(
        &mut self,
        target: Screen,
        link: &mut impl DisplayLink,
    ) {
        nextion::select_page(link, target.name());

        if target.is_irregular() {
            self.screens.record_irregular(target);
        } else {
            self.screens.record_normal(target);
            self.push_refresh(target, link);
        }

        // Every transition re-emits all four warning icons, changed or not.
        for warning in ALL_WARNINGS {
            emit_warning_icon(link, warning, self.warnings.is_raised(warning));
        }
    }

    /// Return from an irregular screen to the remembered normal screen.
    /// No-op when no irregular screen is up.
    pub fn return_to_last_normal(
        &mut self,
        link: &mut impl DisplayLink,
    ) {
        if self.screens.is_irregular() {
            self.change_screen(self.screens.gating_screen(), link);
        }
    }

    /// Push the default parameter set for a freshly entered normal screen.
    fn push_refresh(
        &mut self,
        target: Screen,
        link: &mut impl DisplayLink,
    ) {
        match target {
            Screen::Config1 => {
                self.dispatch(ParamCode::Rpm, ParamValue::Int(self.rpm as i32), link);
            }
            Screen::Config2 => {
                for (i, code) in
                    [ParamCode::TimerLap1, ParamCode::TimerLap2, ParamCode::TimerLap3]
                        .into_iter()
                        .enumerate()
                {
                    self.dispatch(code, ParamValue::Int(self.timers.lap_ms(i) as i32), link);
                }
                self.dispatch(
                    ParamCode::TimerDelta,
                    ParamValue::Int(self.timers.delta_ms() as i32),
                    link,
                );
                self.dispatch(
                    ParamCode::TimerDeltaPic,
                    ParamValue::Int(self.timers.delta_pic() as i32),
                    link,
                );
                self.dispatch(ParamCode::Rpm, ParamValue::Int(self.rpm as i32), link);
            }
            Screen::DragMode => {
                self.dispatch(
                    ParamCode::TimerDelta,
                    ParamValue::Int(self.timers.delta_ms() as i32),
                    link,
                );
                self.dispatch(
                    ParamCode::MaxWheelSpeed,
                    ParamValue::Float(self.max_wheel_speed),
                    link,
                );
                self.dispatch(ParamCode::Rpm, ParamValue::Int(self.rpm as i32), link);
            }
            Screen::Params => {
                self.dispatch(
                    ParamCode::MaxWheelSpeed,
                    ParamValue::Float(self.max_wheel_speed),
                    link,
                );
            }
            // Irregular screens carry no refresh set.
            _ => {}
        }
    }

    // =========================================================================
    // External Timer Writes
    // =========================================================================

    /// Update one lap timer (0-2) and push it to the display.
    pub fn set_lap_timer(
        &mut self,
        index: usize,
        ms: u32,
        link: &mut impl DisplayLink,
    ) {
        self.timers.set_lap_ms(index, ms);
        let code = match index {
            0 => ParamCode::TimerLap1,
            1 => ParamCode::TimerLap2,
            2 => ParamCode::TimerLap3,
            _ => return,
        };
        self.dispatch(code, ParamValue::Int(ms as i32), link);
    }

    /// Update the master timer delta and push it to the display.
    pub fn set_timer_delta(
        &mut self,
        ms: u32,
        link: &mut impl DisplayLink,
    ) {
        self.timers.set_delta_ms(ms);
        self.dispatch(ParamCode::TimerDelta, ParamValue::Int(ms as i32), link);
    }

    /// Update the delta sign indication and push it to the display.
    pub fn set_timer_delta_sign(
        &mut self,
        positive: bool,
        link: &mut impl DisplayLink,
    ) {
        self.timers.set_delta_positive(positive);
        self.dispatch(
            ParamCode::TimerDeltaPic,
            ParamValue::Int(self.timers.delta_pic() as i32),
            link,
        );
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Screen currently shown on the panel.
    #[inline]
    pub const fn current_screen(&self) -> Screen { self.screens.current() }

    /// Latest tachometer LED pattern.
    #[inline]
    pub const fn shift_lights(&self) -> LedPattern { self.lights }

    /// Latest decoded engine speed.
    #[inline]
    pub const fn rpm(&self) -> u16 { self.rpm }

    /// Session maximum wheel speed in mph.
    #[inline]
    pub const fn max_wheel_speed(&self) -> f32 { self.max_wheel_speed }

    /// Updates dropped by the screen gate since startup.
    #[inline]
    pub const fn dropped_updates(&self) -> u32 { self.dispatcher.dropped_updates() }

    /// Latest accepted parameter values.
    #[inline]
    pub const fn store(&self) -> &ParamStore { &self.store }

    /// Current warning flags.
    #[inline]
    pub const fn warnings(&self) -> &WarningState { &self.warnings }

    fn dispatch(
        &mut self,
        code: ParamCode,
        value: ParamValue,
        link: &mut impl DisplayLink,
    ) -> bool {
        self.dispatcher.dispatch(
            &mut self.store,
            &mut self.warnings,
            self.screens.gating_screen(),
            code,
            value,
            link,
        )
    }
}

impl Default for Dashboard {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        FRAME_ENGINE_SPEED,
        FRAME_ENGINE_STATUS,
        FRAME_OIL_PRESSURE,
        FRAME_WHEEL_SPEED,
        SILENT_WINDOW_MS,
    };
    use crate::nextion::capture::CaptureLink;

    fn rpm_frame(rpm: u16) -> BusFrame {
        BusFrame::new(FRAME_ENGINE_SPEED, &rpm.to_be_bytes())
    }

    fn oil_pressure_frame(raw: u16) -> BusFrame {
        let [hi, lo] = raw.to_be_bytes();
        BusFrame::new(FRAME_OIL_PRESSURE, &[0, 0, 0, 0, 0, 0, hi, lo])
    }

    /// Engine status frame with both temperatures from raw channel bytes.
    fn status_frame(
        coolant_raw: u8,
        oil_raw: u8,
    ) -> BusFrame {
        BusFrame::new(FRAME_ENGINE_STATUS, &[coolant_raw, oil_raw, 0, 0, 0, 120, 0, 0])
    }

    fn frame_event(frame: BusFrame) -> Event { Event::Frame(frame) }

    #[test]
    fn test_startup_selects_params_and_emits_icons() {
        let mut dash = Dashboard::new();
        let mut link = CaptureLink::new();
        dash.startup(&mut link);

        let commands = link.commands();
        assert_eq!(commands[0], "page Params");
        // MaxWS refresh is gate-dropped, so page + 4 icons is the whole set.
        assert_eq!(commands.len(), 5);
        assert!(commands.contains(&"WARN_ECTO.pic=4".to_string()));
        assert!(commands.contains(&"WARN_FPRSR.pic=4".to_string()));
        assert!(commands.contains(&"WARN_OTEMP.pic=4".to_string()));
        assert!(commands.contains(&"WARN_OPRSR.pic=4".to_string()));
    }

    #[test]
    fn test_every_transition_reemits_four_icons() {
        let mut dash = Dashboard::new();
        let mut link = CaptureLink::new();
        dash.change_screen(Screen::Shift, &mut link);

        let commands = link.commands();
        assert_eq!(commands[0], "page Shift");
        let icons = commands.iter().filter(|c| c.contains(".pic=")).count();
        assert_eq!(icons, 4);
    }

    #[test]
    fn test_gated_update_leaves_store_untouched() {
        let mut dash = Dashboard::new();
        let mut link = CaptureLink::new();
        dash.change_screen(Screen::Config1, &mut link);
        link.clear();

        // Coolant temp is Params-only; on Config1 the store must not move.
        dash.handle_event(frame_event(status_frame(150, 100)), 0, &mut link);
        assert_eq!(dash.store().get(ParamCode::CoolantTemp), ParamValue::Int(0));
        assert!(!link.commands().iter().any(|c| c.starts_with("ETC.")));
        assert!(dash.dropped_updates() > 0);
    }

    #[test]
    fn test_rpm_accepted_on_config1_only() {
        let mut dash = Dashboard::new();
        let mut link = CaptureLink::new();
        dash.change_screen(Screen::Config1, &mut link);
        link.clear();

        dash.handle_event(frame_event(rpm_frame(7000)), 0, &mut link);
        assert_eq!(dash.store().get(ParamCode::Rpm), ParamValue::Int(7000));
        assert_eq!(link.commands(), vec!["RPM.val=7000"]);

        dash.change_screen(Screen::Config2, &mut link);
        link.clear();
        dash.handle_event(frame_event(rpm_frame(8000)), 1, &mut link);
        // Dropped at the gate, but the decoder-side value still advances.
        assert_eq!(dash.store().get(ParamCode::Rpm), ParamValue::Int(7000));
        assert_eq!(dash.rpm(), 8000);
        assert!(link.commands().is_empty());
    }

    #[test]
    fn test_oil_pressure_warning_hysteresis() {
        let mut dash = Dashboard::new();
        let mut link = CaptureLink::new();
        dash.change_screen(Screen::Config1, &mut link);

        // Engine at 6500 RPM.
        dash.handle_event(frame_event(rpm_frame(6500)), 0, &mut link);
        link.clear();

        // 42 PSI at 6500 RPM is inside the 6000-RPM warning band.
        dash.handle_event(frame_event(oil_pressure_frame(2896)), 1, &mut link);
        assert!(dash.warnings().is_raised(Warning::OilPressure));
        assert!(link.commands().contains(&"WARN_OPRSR.pic=10".to_string()));

        // Healthy pressure clears it exactly once.
        link.clear();
        dash.handle_event(frame_event(oil_pressure_frame(3600)), 2, &mut link);
        assert!(!dash.warnings().is_raised(Warning::OilPressure));
        assert!(link.commands().contains(&"WARN_OPRSR.pic=4".to_string()));

        // Further healthy samples emit no icon at all.
        link.clear();
        dash.handle_event(frame_event(oil_pressure_frame(3600)), 3, &mut link);
        assert!(!link.commands().iter().any(|c| c.starts_with("WARN_OPRSR")));
    }

    #[test]
    fn test_oil_pressure_ignored_at_low_rpm() {
        let mut dash = Dashboard::new();
        let mut link = CaptureLink::new();
        dash.change_screen(Screen::Config1, &mut link);
        dash.handle_event(frame_event(rpm_frame(400)), 0, &mut link);
        link.clear();

        dash.handle_event(frame_event(oil_pressure_frame(100)), 1, &mut link);
        assert!(!dash.warnings().is_raised(Warning::OilPressure));
        assert!(!link.commands().iter().any(|c| c.starts_with("WARN_OPRSR")));
    }

    #[test]
    fn test_coolant_alert_resends_flag_on_params() {
        let mut dash = Dashboard::new();
        let mut link = CaptureLink::new();
        dash.startup(&mut link);
        link.clear();

        // raw 156 -> 240F: warn raise plus the alert-path re-send.
        dash.handle_event(frame_event(status_frame(156, 100)), 0, &mut link);
        let ecto_raises = link
            .commands()
            .iter()
            .filter(|c| c.as_str() == "WARN_ECTO.pic=1")
            .count();
        assert_eq!(ecto_raises, 2);
    }

    #[test]
    fn test_cool_sample_returns_from_irregular_screen() {
        let mut dash = Dashboard::new();
        let mut link = CaptureLink::new();
        dash.startup(&mut link);
        dash.change_screen(Screen::SlowDown, &mut link);
        assert_eq!(dash.current_screen(), Screen::SlowDown);
        link.clear();

        // On Params, a sub-alert coolant reading pops the alert screen.
        dash.handle_event(frame_event(status_frame(100, 100)), 0, &mut link);
        assert_eq!(dash.current_screen(), Screen::Params);
        assert!(link.commands().contains(&"page Params".to_string()));
    }

    #[test]
    fn test_return_to_last_normal_idempotent() {
        let mut dash = Dashboard::new();
        let mut link = CaptureLink::new();
        dash.change_screen(Screen::DragMode, &mut link);
        dash.change_screen(Screen::BspdTrig, &mut link);
        link.clear();

        dash.return_to_last_normal(&mut link);
        assert_eq!(dash.current_screen(), Screen::DragMode);
        assert!(link.commands().contains(&"page DragMode".to_string()));

        link.clear();
        dash.return_to_last_normal(&mut link);
        assert!(link.commands().is_empty());
    }

    #[test]
    fn test_silent_window_passes_only_gear() {
        let mut dash = Dashboard::new();
        let mut link = CaptureLink::new();
        dash.change_screen(Screen::Config1, &mut link);
        link.clear();

        // First event at the interval boundary activates the window.
        let gear_frame = BusFrame::new(FRAME_GEAR, &[0, 0, 0, 0, 0, 0, 0x03, 0]);
        dash.handle_event(frame_event(gear_frame), SILENT_WINDOW_MS, &mut link);
        assert_eq!(link.commands(), vec!["gearPos.val=3"]);

        // Any other identifier in the window is discarded without effects.
        link.clear();
        dash.handle_event(frame_event(rpm_frame(9000)), SILENT_WINDOW_MS + 1, &mut link);
        assert!(link.commands().is_empty());
        assert_eq!(dash.rpm(), 0);

        // Window closes after another interval; frames flow again.
        dash.handle_event(frame_event(rpm_frame(9000)), SILENT_WINDOW_MS * 2, &mut link);
        assert_eq!(dash.rpm(), 9000);
    }

    #[test]
    fn test_max_wheel_speed_monotonic() {
        let mut dash = Dashboard::new();
        let mut link = CaptureLink::new();
        dash.startup(&mut link);

        let ws = |raw: u16| {
            let [hi, lo] = raw.to_be_bytes();
            BusFrame::new(FRAME_WHEEL_SPEED, &[0, 0, 0, 0, 0, 0, hi, lo])
        };
        dash.handle_event(frame_event(ws(600)), 0, &mut link);
        let peak = dash.max_wheel_speed();
        assert!(peak > 0.0);

        dash.handle_event(frame_event(ws(300)), 1, &mut link);
        assert_eq!(dash.max_wheel_speed(), peak);

        dash.handle_event(frame_event(ws(700)), 2, &mut link);
        assert!(dash.max_wheel_speed() > peak);
    }

    #[test]
    fn test_tachometer_follows_rpm() {
        let mut dash = Dashboard::new();
        let mut link = CaptureLink::new();
        dash.change_screen(Screen::Config1, &mut link);

        // Neutral: quarter points at 1750.
        dash.handle_event(frame_event(rpm_frame(1000)), 0, &mut link);
        assert_eq!(
            dash.shift_lights(),
            LedPattern {
                green: true,
                orange: false,
                red: false,
                white: false
            }
        );

        dash.handle_event(frame_event(rpm_frame(6900)), 1, &mut link);
        assert!(dash.shift_lights().white);
    }

    #[test]
    fn test_tick_pushes_delta_only_while_running() {
        let mut dash = Dashboard::new();
        let mut link = CaptureLink::new();
        dash.change_screen(Screen::Config2, &mut link);
        link.clear();

        dash.handle_event(Event::Tick, 10, &mut link);
        assert!(link.commands().is_empty());

        dash.handle_event(frame_event(rpm_frame(3000)), 11, &mut link);
        link.clear();
        dash.handle_event(Event::Tick, 65_000, &mut link);
        assert_eq!(link.commands(), vec!["timer_Delta.txt=\"1:05\""]);
    }

    #[test]
    fn test_page_button_cycles_normal_screens() {
        let mut dash = Dashboard::new();
        let mut link = CaptureLink::new();
        dash.startup(&mut link);

        let expected = [Screen::Config1, Screen::Config2, Screen::DragMode, Screen::Params];
        for screen in expected {
            dash.handle_event(Event::PageButton, 0, &mut link);
            assert_eq!(dash.current_screen(), screen);
        }
    }

    #[test]
    fn test_config2_refresh_pushes_timers() {
        let mut dash = Dashboard::new();
        let mut link = CaptureLink::new();
        dash.set_lap_timer(0, 65_000, &mut link);
        dash.set_timer_delta_sign(true, &mut link);
        link.clear();

        dash.change_screen(Screen::Config2, &mut link);
        let commands = link.commands();
        assert_eq!(commands[0], "page Config2");
        assert!(commands.contains(&"timer_R1.txt=\"1:05\"".to_string()));
        assert!(commands.contains(&"timer_R2.txt=\"0:00\"".to_string()));
        assert!(commands.contains(&"pic_Delta.pic=7".to_string()));
        // RPM is a Config1 field; its refresh push drops at the gate.
        assert!(!commands.iter().any(|c| c.starts_with("RPM.")));
    }

    #[test]
    fn test_fuel_alert_resend_without_rpm_gate() {
        let mut dash = Dashboard::new();
        let mut link = CaptureLink::new();
        dash.startup(&mut link);
        link.clear();

        // 30 PSI (raw 2069) with the engine stopped: the warn path stays
        // quiet (RPM gate), the alert path still re-sends the flag value.
        let [hi, lo] = 2069u16.to_be_bytes();
        let frame = BusFrame::new(crate::config::FRAME_FUEL_LAMBDA, &[0, 0, 0, 0, hi, lo, 0, 0]);
        dash.handle_event(frame_event(frame), 0, &mut link);

        let commands = link.commands();
        assert!(!commands.iter().any(|c| c.starts_with("WARN_FPRSR")));
        assert!(commands.contains(&"WARN_ECTO.pic=4".to_string()));
    }
}
