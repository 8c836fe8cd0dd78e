use anise::constants::SPEED_OF_LIGHT_KM_S;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{bias::Meteo, frames::Ellipsoid};

/// Speed of light in m.s⁻¹
pub const SPEED_OF_LIGHT_M_S: f64 = SPEED_OF_LIGHT_KM_S * 1000.0;

/// WGS84 Earth Frame Ellipsoid semi-major axis (meters)
pub const EARTH_SEMI_MAJOR_AXIS_WGS84: f64 = 6378137.0_f64;

/// WGS84 Earth Frame Ellipsoid first eccentricity
pub const EARTH_ECCENTRICITY_WGS84: f64 = 8.1819190842622E-2;

/// Seconds in one day
pub(crate) const SECONDS_PER_DAY: f64 = 86_400.0;

fn default_speed_of_light() -> f64 {
    SPEED_OF_LIGHT_M_S
}

/// Physical [Constants] every computation is parametrized with.
/// They are injected through the [crate::prelude::Config] rather than
/// read from module level singletons, so they may be varied at will.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Constants {
    /// Speed of light in m.s⁻¹
    #[cfg_attr(feature = "serde", serde(default = "default_speed_of_light"))]
    pub speed_of_light_m_s: f64,

    /// Reference [Ellipsoid]
    #[cfg_attr(feature = "serde", serde(default))]
    pub ellipsoid: Ellipsoid,

    /// Standard atmosphere, used when [Meteo] is explicitly
    /// requested to be the standard one (never as a silent fallback).
    #[cfg_attr(feature = "serde", serde(default = "Meteo::standard"))]
    pub standard_meteo: Meteo,
}

impl Default for Constants {
    fn default() -> Self {
        Self {
            speed_of_light_m_s: default_speed_of_light(),
            ellipsoid: Ellipsoid::WGS84,
            standard_meteo: Meteo::standard(),
        }
    }
}

impl Constants {
    /// Copies and returns [Constants] with updated speed of light (m.s⁻¹)
    pub fn with_speed_of_light(&self, c_m_s: f64) -> Self {
        let mut s = *self;
        s.speed_of_light_m_s = c_m_s;
        s
    }

    /// Copies and returns [Constants] with updated [Ellipsoid]
    pub fn with_ellipsoid(&self, ellipsoid: Ellipsoid) -> Self {
        let mut s = *self;
        s.ellipsoid = ellipsoid;
        s
    }
}
