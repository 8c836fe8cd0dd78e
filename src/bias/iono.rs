use std::f64::consts::PI;

use log::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    bias::{BiasRuntime, DelayCorrection, UnavailableCause},
    constants::SECONDS_PER_DAY,
    prelude::{Epoch, Error, TimeScale},
};

/// Sub ionospheric latitude limit [semicircles]
const MAX_SUB_IONO_LAT: f64 = 0.416;

/// Minimal period of the Klobuchar cosine [s]
const MIN_PERIOD_S: f64 = 72_000.0;

/// Night time (constant) vertical delay [s]
const NIGHT_DELAY_S: f64 = 5.0E-9;

/// Slant (obliquity) factor applied to the vertical Klobuchar delay
#[derive(Default, Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ObliquityFactor {
    /// (π/2)/sin(elevation): reference behavior of this crate.
    #[default]
    Legacy,
    /// 1 + 16 (0.53 - E)³, E elevation in semicircles
    /// (GPS interface specification).
    Standard,
}

impl std::str::FromStr for ObliquityFactor {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let c = s.trim().to_lowercase();
        match c.as_str() {
            "legacy" => Ok(Self::Legacy),
            "standard" | "is-gps-200" => Ok(Self::Standard),
            _ => Err(Error::UnknownObliquityFactor(c)),
        }
    }
}

impl ObliquityFactor {
    /// Evaluates the slant factor for this elevation [°]
    pub fn eval(&self, elevation_deg: f64) -> f64 {
        match self {
            Self::Legacy => (PI / 2.0) / elevation_deg.to_radians().sin(),
            Self::Standard => {
                let el_sc = elevation_deg / 180.0;
                1.0 + 16.0 * (0.53 - el_sc).powi(3)
            },
        }
    }
}

/// Ionosphere delay models
#[derive(Default, Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum IonosphereModel {
    /// No broadcast parameters available
    #[default]
    Unknown,
    /// Klobuchar model, from GPS broadcast parameters
    Klobuchar(KbModel),
}

impl IonosphereModel {
    /// Slant ionosphere delay [m] for this [BiasRuntime],
    /// on the [crate::prelude::Carrier] that was tracked
    pub fn bias_m(&self, rtm: &BiasRuntime, obliquity: ObliquityFactor, c_m_s: f64) -> DelayCorrection {
        match self {
            Self::Unknown => DelayCorrection::Unavailable(UnavailableCause::NoIonosphereModel),
            Self::Klobuchar(kb) => {
                let delay_s = kb.bias_s(
                    rtm.t,
                    rtm.rx_geodetic.latitude_deg,
                    rtm.rx_geodetic.longitude_deg,
                    rtm.elevation_deg,
                    rtm.azimuth_deg,
                    obliquity,
                );
                let delay_s = delay_s * rtm.carrier.iono_scaling();
                debug!(
                    "{}({}) - klobuchar delay={:.6E}s ({})",
                    rtm.t, rtm.sv, delay_s, rtm.carrier
                );
                DelayCorrection::Modeled(delay_s * c_m_s)
            },
        }
    }
}

/// Klobuchar Model
#[derive(Clone, Copy, Default, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KbModel {
    /// alpha coefficients (amplitude) [s, s/sc, s/sc², s/sc³]
    pub alpha: [f64; 4],
    /// beta coefficients (period) [s, s/sc, s/sc², s/sc³]
    pub beta: [f64; 4],
}

/// Evaluates the cubic polynomial at x
fn cubic(coefs: &[f64; 4], x: f64) -> f64 {
    coefs[0] + coefs[1] * x + coefs[2] * x.powi(2) + coefs[3] * x.powi(3)
}

/// GPS time of day [s] of this [Epoch]
pub(crate) fn gps_time_of_day(t: Epoch) -> f64 {
    t.to_duration_in_time_scale(TimeScale::GPST)
        .to_seconds()
        .rem_euclid(SECONDS_PER_DAY)
}

impl KbModel {
    pub fn new(alpha: [f64; 4], beta: [f64; 4]) -> Self {
        Self { alpha, beta }
    }

    /// Vertical delay amplitude [s], for this geomagnetic latitude [sc]
    pub(crate) fn amplitude(&self, geomag_lat_sc: f64) -> f64 {
        cubic(&self.alpha, geomag_lat_sc).max(0.0)
    }

    /// Vertical delay period [s], for this geomagnetic latitude [sc]
    pub(crate) fn period(&self, geomag_lat_sc: f64) -> f64 {
        cubic(&self.beta, geomag_lat_sc).max(MIN_PERIOD_S)
    }

    /// Slant delay [s] at `t`
    /// ## Input
    /// - t: [Epoch]
    /// - lat_deg, lon_deg: receiver geodetic coordinates [°]
    /// - elevation_deg, azimuth_deg: satellite angles [°]
    /// - obliquity: [ObliquityFactor]
    pub fn bias_s(
        &self,
        t: Epoch,
        lat_deg: f64,
        lon_deg: f64,
        elevation_deg: f64,
        azimuth_deg: f64,
        obliquity: ObliquityFactor,
    ) -> f64 {
        self.delay_s(
            lat_deg,
            lon_deg,
            elevation_deg,
            azimuth_deg,
            gps_time_of_day(t),
            obliquity,
        )
    }

    /// Slant delay [s], for this GPS time of day [s]
    pub fn delay_s(
        &self,
        lat_deg: f64,
        lon_deg: f64,
        elevation_deg: f64,
        azimuth_deg: f64,
        time_of_day_s: f64,
        obliquity: ObliquityFactor,
    ) -> f64 {
        let elev_sc = elevation_deg / 180.0;
        let azim_rad = azimuth_deg.to_radians();

        // earth centered angle
        let psi = 0.0137 / (elev_sc + 0.11) - 0.022;

        let sub_lat = (lat_deg / 180.0 + psi * azim_rad.cos())
            .clamp(-MAX_SUB_IONO_LAT, MAX_SUB_IONO_LAT);

        let sub_lon = lon_deg / 180.0 + psi * azim_rad.sin() / (sub_lat * PI).cos();

        let geomag_lat = sub_lat + 0.064 * ((sub_lon - 1.617) * PI).cos();

        let local_time = (43_200.0 * sub_lon + time_of_day_s).rem_euclid(SECONDS_PER_DAY);

        let amplitude = self.amplitude(geomag_lat);
        let period = self.period(geomag_lat);

        let x = 2.0 * PI * (local_time - 50_400.0) / period;

        let vertical = if x.abs() < 1.57 {
            NIGHT_DELAY_S + amplitude * (1.0 - x.powi(2) / 2.0 + x.powi(4) / 24.0)
        } else {
            NIGHT_DELAY_S
        };

        vertical * obliquity.eval(elevation_deg)
    }
}
