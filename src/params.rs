//! Telemetry parameter codes, values, and the latest-value store.
//!
//! Every quantity the dashboard knows about has a stable numeric code that
//! doubles as the store index. Values carry scaled physical units (degrees
//! Fahrenheit, PSI, percent, RPM, milliseconds, mph), never raw bus
//! encodings.

/// Number of parameter codes (store slots).
pub const PARAM_COUNT: usize = 23;

/// Stable identifier for one telemetry or warning quantity.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum ParamCode {
    /// Battery voltage, volts.
    BatteryVoltage = 0,
    /// Brake system plausibility device status. Reserved; never dispatched.
    BspdState = 1,
    /// Engine coolant temperature, degrees Fahrenheit.
    CoolantTemp = 2,
    /// Front brake bias pressure.
    FrontBrakePressure = 3,
    /// Rear brake bias pressure.
    RearBrakePressure = 4,
    /// Fuel pressure, PSI.
    FuelPressure = 5,
    /// Gear position (0 = neutral).
    GearPos = 6,
    /// Engine lambda (air/fuel ratio).
    Lambda = 7,
    /// Manifold air pressure, kPa.
    ManifoldPressure = 8,
    /// Oil pressure, PSI.
    OilPressure = 9,
    /// Engine speed, RPM.
    Rpm = 10,
    /// Throttle pedal position, percent.
    Throttle = 11,
    /// Master timer delta, milliseconds.
    TimerDelta = 12,
    /// Picture selector for the master timer delta sign.
    TimerDeltaPic = 13,
    /// Session-maximum wheel speed, mph.
    MaxWheelSpeed = 14,
    /// Lap timer 1, milliseconds.
    TimerLap1 = 15,
    /// Lap timer 2, milliseconds.
    TimerLap2 = 16,
    /// Lap timer 3, milliseconds.
    TimerLap3 = 17,
    /// Coolant temperature warning flag.
    WarnCoolantTemp = 18,
    /// Fuel pressure warning flag.
    WarnFuelPressure = 19,
    /// Oil temperature warning flag.
    WarnOilTemp = 20,
    /// Oil pressure warning flag.
    WarnOilPressure = 21,
    /// Engine oil temperature, degrees Fahrenheit.
    OilTemp = 22,
}

impl ParamCode {
    /// Store index for this code.
    #[inline]
    pub const fn index(self) -> usize { self as usize }
}

/// A typed parameter value in scaled physical units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParamValue {
    /// Integer quantity (temperatures, RPM, gear, milliseconds, pic indices).
    Int(i32),
    /// Floating quantity (pressures, voltage, lambda, percent, mph).
    Float(f32),
}

impl ParamValue {
    /// Value truncated toward zero, for integer display fields.
    #[inline]
    pub const fn as_int(self) -> i32 {
        match self {
            Self::Int(v) => v,
            Self::Float(v) => v as i32,
        }
    }
}

/// Latest accepted value per parameter code.
///
/// Written only through the screen-gated dispatcher; a gated (dropped) update
/// never touches the store.
pub struct ParamStore {
    values: [ParamValue; PARAM_COUNT],
}

impl ParamStore {
    /// Create a store with every slot zeroed.
    pub const fn new() -> Self {
        Self {
            values: [ParamValue::Int(0); PARAM_COUNT],
        }
    }

    /// Latest accepted value for `code`.
    #[inline]
    pub const fn get(
        &self,
        code: ParamCode,
    ) -> ParamValue {
        self.values[code.index()]
    }

    /// Record an accepted value for `code`.
    #[inline]
    pub const fn set(
        &mut self,
        code: ParamCode,
        value: ParamValue,
    ) {
        self.values[code.index()] = value;
    }
}

impl Default for ParamStore {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Unit Tests
// =============================================================================
