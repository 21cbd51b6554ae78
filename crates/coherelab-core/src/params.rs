//! Control parameters and the validation gateway.
//!
//! **ALL** parameter writes pass through [`ParamField::sanitize`] — it is
//! the single place where non-finite or out-of-domain values fall back to
//! a field's default or domain floor. No other code in the crate adjusts
//! raw input values.

use serde::{Deserialize, Serialize};

/// Default chamber temperature in kelvin (room temperature).
pub const DEFAULT_TEMPERATURE: f64 = 300.0;

/// Default stabilization laser frequency in hertz (green laser line).
pub const DEFAULT_LASER_FREQUENCY: f64 = 532_000_000.0;

/// The seven control inputs for one stabilization session.
///
/// Mutable while a session is a draft; frozen into the finalized
/// [`Session`](crate::session::Session) on completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSet {
    /// Magnetic confinement field in tesla.
    pub magnetic_field: f64,
    /// Electric field in volts/meter.
    pub electric_field: f64,
    /// Chamber temperature in kelvin. Lower is better.
    pub temperature_control: f64,
    /// Vacuum quality in inverse torr. Larger means a better vacuum.
    pub pressure_vacuum: f64,
    /// Stabilization laser frequency in hertz.
    pub laser_frequency: f64,
    /// Measured coherence time in milliseconds.
    pub coherence_time: f64,
    /// Participant count in the entanglement network (1 = no network).
    pub entanglement_depth: u32,
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            magnetic_field: 0.0,
            electric_field: 0.0,
            temperature_control: DEFAULT_TEMPERATURE,
            pressure_vacuum: 1.0,
            laser_frequency: DEFAULT_LASER_FREQUENCY,
            coherence_time: 0.0,
            entanglement_depth: 1,
        }
    }
}

impl ParameterSet {
    /// Read one field as `f64` (the depth is widened).
    pub fn get(&self, field: ParamField) -> f64 {
        match field {
            ParamField::MagneticField => self.magnetic_field,
            ParamField::ElectricField => self.electric_field,
            ParamField::TemperatureControl => self.temperature_control,
            ParamField::PressureVacuum => self.pressure_vacuum,
            ParamField::LaserFrequency => self.laser_frequency,
            ParamField::CoherenceTime => self.coherence_time,
            ParamField::EntanglementDepth => f64::from(self.entanglement_depth),
        }
    }

    /// Write one field, passing the raw value through the validation
    /// gateway first. The stored value is always finite and in-domain.
    pub fn set(&mut self, field: ParamField, value: f64) {
        let value = field.sanitize(value);
        match field {
            ParamField::MagneticField => self.magnetic_field = value,
            ParamField::ElectricField => self.electric_field = value,
            ParamField::TemperatureControl => self.temperature_control = value,
            ParamField::PressureVacuum => self.pressure_vacuum = value,
            ParamField::LaserFrequency => self.laser_frequency = value,
            ParamField::CoherenceTime => self.coherence_time = value,
            // Saturating float-to-int cast; sanitize already floored at 1.
            ParamField::EntanglementDepth => self.entanglement_depth = value as u32,
        }
    }
}

/// Names one control parameter field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamField {
    MagneticField,
    ElectricField,
    TemperatureControl,
    PressureVacuum,
    LaserFrequency,
    CoherenceTime,
    EntanglementDepth,
}

impl ParamField {
    /// Every field, in declaration order.
    pub const ALL: [ParamField; 7] = [
        ParamField::MagneticField,
        ParamField::ElectricField,
        ParamField::TemperatureControl,
        ParamField::PressureVacuum,
        ParamField::LaserFrequency,
        ParamField::CoherenceTime,
        ParamField::EntanglementDepth,
    ];

    /// Default value, used by `start()` and as the non-finite fallback.
    pub fn default_value(self) -> f64 {
        match self {
            Self::TemperatureControl => DEFAULT_TEMPERATURE,
            Self::PressureVacuum => 1.0,
            Self::LaserFrequency => DEFAULT_LASER_FREQUENCY,
            Self::EntanglementDepth => 1.0,
            Self::MagneticField | Self::ElectricField | Self::CoherenceTime => 0.0,
        }
    }

    /// Lowest value the field's domain admits, if it has one.
    fn floor(self) -> Option<f64> {
        match self {
            Self::MagneticField | Self::ElectricField | Self::CoherenceTime => Some(0.0),
            Self::PressureVacuum | Self::EntanglementDepth => Some(1.0),
            Self::TemperatureControl | Self::LaserFrequency => None,
        }
    }

    /// Validate a raw write: non-finite values fall back to the field's
    /// default, below-floor values are raised to the floor, and the
    /// entanglement depth is truncated to a whole participant count.
    pub fn sanitize(self, value: f64) -> f64 {
        let mut value = if value.is_finite() {
            value
        } else {
            self.default_value()
        };
        if let Some(floor) = self.floor() {
            value = value.max(floor);
        }
        if self == Self::EntanglementDepth {
            value = value.trunc();
        }
        value
    }

    /// Parse a field from its wire name (`"magnetic_field"` etc.).
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.to_string() == name)
    }
}

impl std::fmt::Display for ParamField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MagneticField => write!(f, "magnetic_field"),
            Self::ElectricField => write!(f, "electric_field"),
            Self::TemperatureControl => write!(f, "temperature_control"),
            Self::PressureVacuum => write!(f, "pressure_vacuum"),
            Self::LaserFrequency => write!(f, "laser_frequency"),
            Self::CoherenceTime => write!(f, "coherence_time"),
            Self::EntanglementDepth => write!(f, "entanglement_depth"),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = ParameterSet::default();
        assert_eq!(params.temperature_control, 300.0);
        assert_eq!(params.pressure_vacuum, 1.0);
        assert_eq!(params.laser_frequency, 532_000_000.0);
        assert_eq!(params.entanglement_depth, 1);
        assert_eq!(params.magnetic_field, 0.0);
    }

    #[test]
    fn test_sanitize_non_finite_falls_back_to_default() {
        assert_eq!(
            ParamField::TemperatureControl.sanitize(f64::NAN),
            DEFAULT_TEMPERATURE
        );
        assert_eq!(
            ParamField::LaserFrequency.sanitize(f64::INFINITY),
            DEFAULT_LASER_FREQUENCY
        );
        assert_eq!(ParamField::MagneticField.sanitize(f64::NEG_INFINITY), 0.0);
    }

    #[test]
    fn test_sanitize_raises_to_floor() {
        assert_eq!(ParamField::ElectricField.sanitize(-12.0), 0.0);
        assert_eq!(ParamField::PressureVacuum.sanitize(0.2), 1.0);
        assert_eq!(ParamField::EntanglementDepth.sanitize(-3.0), 1.0);
        // Temperature has no floor; sub-zero kelvin is the operator's problem.
        assert_eq!(ParamField::TemperatureControl.sanitize(-10.0), -10.0);
    }

    #[test]
    fn test_sanitize_truncates_depth() {
        assert_eq!(ParamField::EntanglementDepth.sanitize(7.9), 7.0);
    }

    #[test]
    fn test_set_never_stores_nan() {
        let mut params = ParameterSet::default();
        for field in ParamField::ALL {
            params.set(field, f64::NAN);
        }
        for field in ParamField::ALL {
            assert!(params.get(field).is_finite(), "{field} stored non-finite");
        }
    }

    #[test]
    fn test_parse_round_trips_all_fields() {
        for field in ParamField::ALL {
            assert_eq!(ParamField::parse(&field.to_string()), Some(field));
        }
        assert_eq!(ParamField::parse("flux_capacitor"), None);
    }

    #[test]
    fn test_set_and_get() {
        let mut params = ParameterSet::default();
        params.set(ParamField::MagneticField, 42.5);
        params.set(ParamField::EntanglementDepth, 10.0);
        assert_eq!(params.get(ParamField::MagneticField), 42.5);
        assert_eq!(params.entanglement_depth, 10);
    }
}
