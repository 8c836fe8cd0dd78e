//! Satellite elevation and azimuth, as seen from the receiver
use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{frames::Ellipsoid, prelude::Error};

/// Norm under which a vector is considered null (meters).
const NULL_NORM: f64 = 1.0E-9;

/// Unit line of sight from the receiver to the satellite.
pub(crate) fn line_of_sight(rx: &Vector3<f64>, sv: &Vector3<f64>) -> Result<Vector3<f64>, Error> {
    let los = sv - rx;
    let norm = los.norm();
    if norm < NULL_NORM || !norm.is_finite() {
        return Err(Error::DegenerateGeometry);
    }
    Ok(los / norm)
}

/// Returns satellite elevation angle in degrees.
///
/// The local vertical is approximated by the geocentric radial direction
/// (receiver position vector), not the ellipsoidal normal. This approximation
/// differs from the geodetic elevation by up to ~0.2° at mid latitudes.
/// See [AngleModel::Topocentric] for the ellipsoidal definition.
pub fn elevation_deg(rx: &Vector3<f64>, sv: &Vector3<f64>) -> Result<f64, Error> {
    let los = line_of_sight(rx, sv)?;
    let r = rx.norm();
    if r < NULL_NORM {
        return Err(Error::DegenerateGeometry);
    }
    let up = rx / r;
    Ok(los.dot(&up).clamp(-1.0, 1.0).asin().to_degrees())
}

/// Returns satellite azimuth angle in degrees, within [0, 360).
///
/// East is normal to both the polar axis and the receiver position vector,
/// North is the cross product of the polar axis and East.
pub fn azimuth_deg(rx: &Vector3<f64>, sv: &Vector3<f64>) -> Result<f64, Error> {
    let los = line_of_sight(rx, sv)?;

    let east = Vector3::new(-rx[1], rx[0], 0.0);
    let east_norm = east.norm();
    if east_norm < NULL_NORM {
        // polar axis: east is undefined
        return Err(Error::DegenerateGeometry);
    }

    let east = east / east_norm;
    let north = Vector3::z().cross(&east);

    Ok(wrap_azimuth(los.dot(&east).atan2(los.dot(&north)).to_degrees()))
}

/// Wraps an angle (degrees) into [0, 360)
fn wrap_azimuth(azimuth: f64) -> f64 {
    let wrapped = azimuth.rem_euclid(360.0);
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// [AngleModel] defines how elevation and azimuth angles are evaluated.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AngleModel {
    /// Geocentric radial direction is "up", see [elevation_deg] and [azimuth_deg].
    /// This is the default and reference behavior.
    #[default]
    Geocentric,
    /// Angles derived from the local North East Up frame
    /// (ellipsoidal normal), at the receiver geodetic coordinates.
    Topocentric,
}

impl std::str::FromStr for AngleModel {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let c = s.trim().to_lowercase();
        match c.as_str() {
            "geocentric" => Ok(Self::Geocentric),
            "topocentric" | "neu" => Ok(Self::Topocentric),
            _ => Err(Error::UnknownAngleModel(c)),
        }
    }
}

impl std::fmt::Display for AngleModel {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Geocentric => write!(f, "geocentric"),
            Self::Topocentric => write!(f, "topocentric"),
        }
    }
}

impl AngleModel {
    /// Returns (elevation, azimuth) angles in degrees
    pub fn angles(
        &self,
        ellipsoid: &Ellipsoid,
        rx: &Vector3<f64>,
        sv: &Vector3<f64>,
    ) -> Result<(f64, f64), Error> {
        match self {
            Self::Geocentric => Ok((elevation_deg(rx, sv)?, azimuth_deg(rx, sv)?)),
            Self::Topocentric => {
                // validates the line of sight
                let _ = line_of_sight(rx, sv)?;

                let reference = ellipsoid.to_geodetic(rx);
                let neu = ellipsoid.to_topocentric(sv, &reference);
                let range = neu.norm();

                let elevation = (neu.up_m / range).clamp(-1.0, 1.0).asin().to_degrees();
                let azimuth = wrap_azimuth(neu.east_m.atan2(neu.north_m).to_degrees());
                Ok((elevation, azimuth))
            },
        }
    }
}
