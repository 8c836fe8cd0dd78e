use crate::prelude::{Epoch, GeodeticPosition};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Surface meteorological conditions at the receiver location.
/// Any missing field makes the troposphere model that requires it unavailable.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Meteo {
    /// Temperature [°C]
    pub temperature_c: Option<f64>,
    /// Pressure [hPa]
    pub pressure_hpa: Option<f64>,
    /// Relative humidity [%]
    pub humidity_pct: Option<f64>,
}

impl Meteo {
    /// Builds complete [Meteo] conditions
    pub fn new(temperature_c: f64, pressure_hpa: f64, humidity_pct: f64) -> Self {
        Self {
            temperature_c: Some(temperature_c),
            pressure_hpa: Some(pressure_hpa),
            humidity_pct: Some(humidity_pct),
        }
    }

    /// Standard conditions: 20°C, 1013.25 hPa, 50%
    pub fn standard() -> Self {
        Self::new(20.0, 1013.25, 50.0)
    }

    /// Returns (temperature [°C], pressure [hPa], humidity [%])
    /// when all fields are known.
    pub fn complete(&self) -> Option<(f64, f64, f64)> {
        Some((self.temperature_c?, self.pressure_hpa?, self.humidity_pct?))
    }
}

/// Any weather provider should implement the [WeatherSource] trait.
///
/// Conditions are requested once per epoch, at the coarse receiver position.
/// Return None when conditions could not be obtained: the troposphere
/// correction is then skipped and flagged, the epoch is still solved.
pub trait WeatherSource {
    fn meteo(&self, t: Epoch, position: &GeodeticPosition) -> Option<Meteo>;
}

/// Constant [Meteo] conditions, whatever the time and place.
impl WeatherSource for Meteo {
    fn meteo(&self, _: Epoch, _: &GeodeticPosition) -> Option<Meteo> {
        Some(*self)
    }
}
