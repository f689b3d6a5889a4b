//! Centralized warning threshold configuration.
//!
//! All thresholds are compile-time constants with validation assertions.
//! This keeps the hysteresis engine, the alert paths, and the tests asserting
//! against the same documented values.
//!
//! # Compile-Time Validation
//!
//! Each threshold group includes `const` assertions that verify threshold
//! ordering at compile time. If thresholds are configured incorrectly
//! (e.g., alert below warn for a temperature), compilation will fail.

// =============================================================================
// Temperature Thresholds (degrees Fahrenheit)
// =============================================================================

/// Coolant temperature that raises the warning icon.
pub const COOLANT_WARN_F: i32 = 220;

/// Coolant temperature that triggers the slow-down alert path.
pub const COOLANT_ALERT_F: i32 = 240;

/// Oil temperature that raises the warning icon.
pub const OIL_TEMP_WARN_F: i32 = 220;

/// Oil temperature that triggers the slow-down alert path.
pub const OIL_TEMP_ALERT_F: i32 = 240;

const _: () = assert!(COOLANT_WARN_F < COOLANT_ALERT_F);
const _: () = assert!(OIL_TEMP_WARN_F < OIL_TEMP_ALERT_F);

// =============================================================================
// Pressure Thresholds (PSI)
// =============================================================================

/// Fuel pressure at or below this raises the warning icon (engine running).
pub const FUEL_WARN_PSI: f32 = 38.0;

/// Fuel pressure at or below this triggers the slow-down alert path.
pub const FUEL_ALERT_PSI: f32 = 35.0;

const _: () = assert!(FUEL_ALERT_PSI < FUEL_WARN_PSI);

/// Oil pressure warning bands, `(rpm_floor, max_psi)`: the icon is raised
/// when pressure is at or below the band limit while RPM is at or above the
/// band floor. Bands are checked as a disjunction.
pub const OIL_WARN_BANDS: [(u16, f32); 3] = [(3000, 25.0), (6000, 45.0), (7000, 50.0)];

/// Oil pressure alert bands, same shape as [`OIL_WARN_BANDS`] but tighter.
pub const OIL_ALERT_BANDS: [(u16, f32); 3] = [(3000, 20.0), (6000, 40.0), (7000, 45.0)];

const _: () = assert!(OIL_ALERT_BANDS[0].1 < OIL_WARN_BANDS[0].1);
const _: () = assert!(OIL_ALERT_BANDS[1].1 < OIL_WARN_BANDS[1].1);
const _: () = assert!(OIL_ALERT_BANDS[2].1 < OIL_WARN_BANDS[2].1);

/// Pressure warnings are only evaluated while the engine turns faster than
/// this (cranking and key-on readings would otherwise trip them).
pub const WARN_RPM_FLOOR: u16 = 500;

// =============================================================================
// Shift Points
// =============================================================================

/// Best shift RPM per gear, indexed by gear position (0 = neutral).
/// Values from the engines group's dyno sweep for the current powertrain.
pub const GEAR_SHIFT_RPM: [u16; 6] = [7000, 13_600, 13_000, 12_500, 12_200, 12_200];

// =============================================================================
// Display Icon Indices
// =============================================================================

/// Raised-state picture index for the coolant temperature warning.
pub const ICON_WARN_COOLANT: u8 = 1;

/// Raised-state picture index for the fuel pressure warning.
pub const ICON_WARN_FUEL: u8 = 2;

/// Raised-state picture index for the oil temperature warning.
pub const ICON_WARN_OIL_TEMP: u8 = 3;

/// Raised-state picture index for the oil pressure warning.
pub const ICON_WARN_OIL_PRESSURE: u8 = 10;

/// Shared cleared-state picture index for all four warnings.
pub const ICON_WARN_CLEARED: u8 = 4;

/// Picture index for a negative master-timer delta.
pub const PIC_DELTA_NEGATIVE: u8 = 6;

/// Picture index for a positive master-timer delta.
pub const PIC_DELTA_POSITIVE: u8 = 7;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oil_bands_ordered_by_rpm() {
        assert!(OIL_WARN_BANDS[0].0 < OIL_WARN_BANDS[1].0);
        assert!(OIL_WARN_BANDS[1].0 < OIL_WARN_BANDS[2].0);
        assert!(OIL_ALERT_BANDS[0].0 < OIL_ALERT_BANDS[1].0);
        assert!(OIL_ALERT_BANDS[1].0 < OIL_ALERT_BANDS[2].0);
    }

    #[test]
    fn test_shift_table_covers_all_gears() {
        assert_eq!(GEAR_SHIFT_RPM.len(), 6);
        for rpm in GEAR_SHIFT_RPM {
            assert!(rpm >= 7000);
        }
    }

    #[test]
    fn test_warning_icons_distinct() {
        let raised = [
            ICON_WARN_COOLANT,
            ICON_WARN_FUEL,
            ICON_WARN_OIL_TEMP,
            ICON_WARN_OIL_PRESSURE,
        ];
        for (i, a) in raised.iter().enumerate() {
            assert_ne!(*a, ICON_WARN_CLEARED);
            for b in &raised[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
