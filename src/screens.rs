//! Screen definitions and the screen state machine's bookkeeping.
//!
//! The display hosts four persistent ("normal") screens the driver cycles
//! through, plus four transient ("irregular") alert screens that overlay the
//! current view and return to it. While an irregular screen is up, the last
//! normal screen's parameter set stays loaded in the display, so decode
//! profile selection and dispatch gating keep keying off the last normal
//! screen.

/// One of the display's pages.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Screen {
    /// Race view: RPM, gear, brake bias pressures.
    Config1,
    /// Timer view: lap timers, master timer delta, RPM, gear.
    Config2,
    /// Acceleration-event view: timer delta, max wheel speed, RPM, gear.
    DragMode,
    /// Pit/diagnostic view: full parameter readout.
    Params,
    /// Brake system plausibility device triggered.
    BspdTrig,
    /// Brake system plausibility device tripped (latched).
    BspdTrip,
    /// Shift-now alert.
    Shift,
    /// Slow-down alert for critical engine readings.
    SlowDown,
}

impl Screen {
    /// Whether this is a transient alert screen.
    #[inline]
    pub const fn is_irregular(self) -> bool {
        matches!(self, Self::BspdTrig | Self::BspdTrip | Self::Shift | Self::SlowDown)
    }

    /// Page name as known to the display HMI.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Config1 => "Config1",
            Self::Config2 => "Config2",
            Self::DragMode => "DragMode",
            Self::Params => "Params",
            Self::BspdTrig => "BSPD_Trig",
            Self::BspdTrip => "BSPD_Trip",
            Self::Shift => "Shift",
            Self::SlowDown => "SlowDown",
        }
    }

    /// Next screen in the driver's page-button cycle
    /// (Config1 -> Config2 -> DragMode -> Params -> Config1).
    ///
    /// Only meaningful for normal screens; the cycle restarts at Config1
    /// otherwise.
    pub const fn next_in_cycle(self) -> Self {
        match self {
            Self::Config1 => Self::Config2,
            Self::Config2 => Self::DragMode,
            Self::DragMode => Self::Params,
            _ => Self::Config1,
        }
    }
}

/// Current screen plus the state needed to return from alert overlays.
pub struct ScreenState {
    /// Screen actually shown on the panel.
    current: Screen,
    /// Most recent normal screen; always a normal variant.
    last_normal: Screen,
    /// Set while an irregular screen is shown.
    irregular: bool,
}

impl ScreenState {
    /// Initial state: the Params screen.
    pub const fn new() -> Self {
        Self {
            current: Screen::Params,
            last_normal: Screen::Params,
            irregular: false,
        }
    }

    /// Screen currently shown on the panel.
    #[inline]
    pub const fn current(&self) -> Screen { self.current }

    /// Screen whose parameter set is loaded (the last normal screen).
    /// Decode profiles and dispatch gating key off this.
    #[inline]
    pub const fn gating_screen(&self) -> Screen { self.last_normal }

    /// Whether an irregular screen is currently shown.
    #[inline]
    pub const fn is_irregular(&self) -> bool { self.irregular }

    /// Record a completed transition to a normal screen.
    pub const fn record_normal(
        &mut self,
        target: Screen,
    ) {
        self.current = target;
        self.last_normal = target;
        self.irregular = false;
    }

    /// Record a completed transition to an irregular screen. The remembered
    /// normal screen is left unchanged.
    pub const fn record_irregular(
        &mut self,
        target: Screen,
    ) {
        self.current = target;
        self.irregular = true;
    }
}

impl Default for ScreenState {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_screen_is_params() {
        let state = ScreenState::new();
        assert_eq!(state.current(), Screen::Params);
        assert_eq!(state.gating_screen(), Screen::Params);
        assert!(!state.is_irregular());
    }

    #[test]
    fn test_irregular_classification() {
        assert!(!Screen::Config1.is_irregular());
        assert!(!Screen::Config2.is_irregular());
        assert!(!Screen::DragMode.is_irregular());
        assert!(!Screen::Params.is_irregular());
        assert!(Screen::BspdTrig.is_irregular());
        assert!(Screen::BspdTrip.is_irregular());
        assert!(Screen::Shift.is_irregular());
        assert!(Screen::SlowDown.is_irregular());
    }

    #[test]
    fn test_irregular_keeps_last_normal() {
        let mut state = ScreenState::new();
        state.record_normal(Screen::DragMode);
        state.record_irregular(Screen::SlowDown);
        assert_eq!(state.current(), Screen::SlowDown);
        assert_eq!(state.gating_screen(), Screen::DragMode);
        assert!(state.is_irregular());
    }

    #[test]
    fn test_normal_clears_irregular_flag() {
        let mut state = ScreenState::new();
        state.record_irregular(Screen::Shift);
        state.record_normal(Screen::Config1);
        assert!(!state.is_irregular());
        assert_eq!(state.current(), Screen::Config1);
        assert_eq!(state.gating_screen(), Screen::Config1);
    }

    #[test]
    fn test_page_cycle_wraps() {
        assert_eq!(Screen::Config1.next_in_cycle(), Screen::Config2);
        assert_eq!(Screen::Config2.next_in_cycle(), Screen::DragMode);
        assert_eq!(Screen::DragMode.next_in_cycle(), Screen::Params);
        assert_eq!(Screen::Params.next_in_cycle(), Screen::Config1);
    }

    #[test]
    fn test_page_names() {
        assert_eq!(Screen::BspdTrig.name(), "BSPD_Trig");
        assert_eq!(Screen::SlowDown.name(), "SlowDown");
        assert_eq!(Screen::DragMode.name(), "DragMode");
    }
}
