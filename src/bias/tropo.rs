use log::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    bias::{BiasRuntime, DelayCorrection, Meteo, UnavailableCause},
    prelude::Error,
};

/// Troposphere delay models
#[derive(Default, Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TroposphereModel {
    /// Simplified Saastamoinen model, requires surface [Meteo] conditions.
    #[default]
    Saastamoinen,
    /// Niel model, driven by receiver altitude only (no [Meteo] needed).
    Niel,
}

impl std::str::FromStr for TroposphereModel {
    type Err = Error;
    fn from_str(s: &str) -> Result<TroposphereModel, Error> {
        let c = s.trim().to_lowercase();
        match c.as_str() {
            "saastamoinen" => Ok(TroposphereModel::Saastamoinen),
            "niel" => Ok(TroposphereModel::Niel),
            _ => Err(Error::UnknownTroposphereModel(c)),
        }
    }
}

impl std::fmt::Display for TroposphereModel {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Saastamoinen => write!(f, "Saastamoinen"),
            Self::Niel => write!(f, "Niel"),
        }
    }
}

impl TroposphereModel {
    /// Saastamoinen zenith delay [m]
    /// ## Input
    /// - temperature [°C]
    /// - pressure [hPa]
    /// - relative humidity [%]
    pub fn saastamoinen_zenith_delay_m(temperature_c: f64, pressure_hpa: f64, humidity_pct: f64) -> f64 {
        let t_k = temperature_c + 273.15;
        2.312 / (pressure_hpa - 0.0001 * humidity_pct * (-0.0346 * pressure_hpa / t_k).exp())
    }

    /// Elevation mapping function 1/cos(z), z = 90° - elevation
    pub fn saastamoinen_mapping(elevation_deg: f64) -> f64 {
        let zenith_rad = (90.0 - elevation_deg).to_radians();
        1.0 / zenith_rad.cos()
    }

    fn niel_model(elevation_deg: f64, altitude_m: f64) -> f64 {
        const NS: f64 = 324.8;

        let elev_rad = elevation_deg.to_radians();
        let h_km = altitude_m / 1000.0;

        let f = match elevation_deg < 90.0 {
            true => 1.0_f64 / (elev_rad.sin() + 0.00143 / (elev_rad.tan() + 0.0455)),
            false => 1.0,
        };

        let delta_n = -7.32 * (0.005577 * NS).exp();

        let delta_r =
            (NS + 0.5 * delta_n - NS * h_km - 0.5 * delta_n * h_km.powi(2) + 1430.0 + 732.0)
                * 0.001;

        f * delta_r
    }

    /// Slant troposphere delay [m] for this [BiasRuntime].
    /// The mapping diverges as elevation approaches the horizon: low elevation
    /// satellites should be masked out rather than corrected.
    pub fn bias_m(&self, rtm: &BiasRuntime, meteo: Option<&Meteo>) -> DelayCorrection {
        match self {
            Self::Saastamoinen => {
                let meteo = match meteo {
                    Some(meteo) => meteo,
                    None => return DelayCorrection::Unavailable(UnavailableCause::WeatherUnavailable),
                };

                let (temperature, pressure, humidity) = match meteo.complete() {
                    Some(conditions) => conditions,
                    None => return DelayCorrection::Unavailable(UnavailableCause::IncompleteMeteo),
                };

                let zenith = Self::saastamoinen_zenith_delay_m(temperature, pressure, humidity);
                let mapping = Self::saastamoinen_mapping(rtm.elevation_deg);

                debug!(
                    "{}({}) - saastamoinen zenith={:.6E}m mapf={:.3}",
                    rtm.t, rtm.sv, zenith, mapping
                );

                DelayCorrection::Modeled(zenith * mapping)
            },
            Self::Niel => DelayCorrection::Modeled(Self::niel_model(
                rtm.elevation_deg,
                rtm.rx_geodetic.altitude_m,
            )),
        }
    }
}
