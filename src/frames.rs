//! Coordinate frames: ECEF, Geodetic and local topocentric (North East Up)
use nalgebra::{Matrix3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::constants::{EARTH_ECCENTRICITY_WGS84, EARTH_SEMI_MAJOR_AXIS_WGS84};

/// Number of fixed point iterations of the ECEF to Geodetic conversion.
/// Converges to sub millimeter accuracy for terrestrial receivers.
const GEODETIC_ITERATIONS: usize = 5;

/// Reference [Ellipsoid] used in every frame conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Ellipsoid {
    /// Semi major axis (meters)
    pub semi_major_axis_m: f64,
    /// First eccentricity
    pub eccentricity: f64,
}

impl Default for Ellipsoid {
    fn default() -> Self {
        Self::WGS84
    }
}

/// Geodetic coordinates
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeodeticPosition {
    /// Latitude in decimal degrees, [-90, 90]
    pub latitude_deg: f64,
    /// Longitude in decimal degrees, (-180, 180]
    pub longitude_deg: f64,
    /// Ellipsoidal height (meters)
    pub altitude_m: f64,
}

impl GeodeticPosition {
    /// Builds new [GeodeticPosition] from
    /// - latitude [ddeg]
    /// - longitude [ddeg]
    /// - altitude above ellipsoid [m]
    pub fn new(latitude_deg: f64, longitude_deg: f64, altitude_m: f64) -> Self {
        Self {
            latitude_deg,
            longitude_deg,
            altitude_m,
        }
    }

    /// Latitude and longitude in radians
    pub fn lat_lon_rad(&self) -> (f64, f64) {
        (self.latitude_deg.to_radians(), self.longitude_deg.to_radians())
    }
}

impl std::fmt::Display for GeodeticPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "lat={:.6}°, lon={:.6}°, alt={:.3}m",
            self.latitude_deg, self.longitude_deg, self.altitude_m
        )
    }
}

/// Offset expressed in the local tangent plane of a reference [GeodeticPosition].
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TopocentricOffset {
    /// North component (meters)
    pub north_m: f64,
    /// East component (meters)
    pub east_m: f64,
    /// Up component (meters)
    pub up_m: f64,
}

impl TopocentricOffset {
    pub fn new(north_m: f64, east_m: f64, up_m: f64) -> Self {
        Self {
            north_m,
            east_m,
            up_m,
        }
    }

    /// Offset magnitude (meters)
    pub fn norm(&self) -> f64 {
        (self.north_m.powi(2) + self.east_m.powi(2) + self.up_m.powi(2)).sqrt()
    }
}

/// ECEF to NEU rotation matrix, parametrized by the reference coordinates.
/// Rows are the north, east and up unit vectors expressed in ECEF.
fn ecef_to_neu_rotation(lat_rad: f64, lon_rad: f64) -> Matrix3<f64> {
    let (sin_lat, cos_lat) = lat_rad.sin_cos();
    let (sin_lon, cos_lon) = lon_rad.sin_cos();
    Matrix3::<f64>::new(
        -sin_lat * cos_lon,
        -sin_lat * sin_lon,
        cos_lat,
        -sin_lon,
        cos_lon,
        0.0_f64,
        cos_lat * cos_lon,
        cos_lat * sin_lon,
        sin_lat,
    )
}

impl Ellipsoid {
    /// WGS84 [Ellipsoid]
    pub const WGS84: Self = Self {
        semi_major_axis_m: EARTH_SEMI_MAJOR_AXIS_WGS84,
        eccentricity: EARTH_ECCENTRICITY_WGS84,
    };

    /// Builds a new custom [Ellipsoid]
    pub fn new(semi_major_axis_m: f64, eccentricity: f64) -> Self {
        Self {
            semi_major_axis_m,
            eccentricity,
        }
    }

    fn e2(&self) -> f64 {
        self.eccentricity.powi(2)
    }

    /// Prime vertical radius of curvature at this latitude (radians)
    pub fn prime_vertical_radius(&self, lat_rad: f64) -> f64 {
        self.semi_major_axis_m / (1.0 - self.e2() * lat_rad.sin().powi(2)).sqrt()
    }

    /// Converts ECEF coordinates (meters) to [GeodeticPosition].
    pub fn to_geodetic(&self, ecef: &Vector3<f64>) -> GeodeticPosition {
        let (x, y, z) = (ecef[0], ecef[1], ecef[2]);
        let e2 = self.e2();

        let p = x.hypot(y);
        let mut lat = z.atan2(p * (1.0 - e2));
        let mut alt = 0.0_f64;

        for _ in 0..GEODETIC_ITERATIONS {
            let n = self.prime_vertical_radius(lat);
            alt = p / lat.cos() - n;
            lat = z.atan2(p * (1.0 - e2 * n / (n + alt)));
        }

        let mut lat_deg = lat.to_degrees();
        if lat_deg > 90.0 {
            lat_deg = 180.0 - lat_deg;
        } else if lat_deg < -90.0 {
            lat_deg = -180.0 - lat_deg;
        }

        let mut lon_deg = y.atan2(x).to_degrees();
        if lon_deg <= -180.0 {
            lon_deg += 360.0;
        }

        GeodeticPosition {
            latitude_deg: lat_deg,
            longitude_deg: lon_deg,
            altitude_m: alt,
        }
    }

    /// Converts [GeodeticPosition] to ECEF coordinates (meters).
    pub fn to_ecef(&self, geodetic: &GeodeticPosition) -> Vector3<f64> {
        let (lat, lon) = geodetic.lat_lon_rad();
        let h = geodetic.altitude_m;
        let n = self.prime_vertical_radius(lat);
        Vector3::new(
            (n + h) * lat.cos() * lon.cos(),
            (n + h) * lat.cos() * lon.sin(),
            ((1.0 - self.e2()) * n + h) * lat.sin(),
        )
    }

    /// Expresses ECEF coordinates (meters) as a [TopocentricOffset]
    /// in the local frame of the `reference` point.
    pub fn to_topocentric(
        &self,
        ecef: &Vector3<f64>,
        reference: &GeodeticPosition,
    ) -> TopocentricOffset {
        let origin = self.to_ecef(reference);
        let (lat, lon) = reference.lat_lon_rad();
        let neu = ecef_to_neu_rotation(lat, lon) * (ecef - origin);
        TopocentricOffset::new(neu[0], neu[1], neu[2])
    }

    /// Converts a [TopocentricOffset] in the local frame of the `reference`
    /// point, back to ECEF coordinates (meters).
    pub fn from_topocentric(
        &self,
        offset: &TopocentricOffset,
        reference: &GeodeticPosition,
    ) -> Vector3<f64> {
        let origin = self.to_ecef(reference);
        let (lat, lon) = reference.lat_lon_rad();
        let neu = Vector3::new(offset.north_m, offset.east_m, offset.up_m);
        origin + ecef_to_neu_rotation(lat, lon).transpose() * neu
    }
}

/// Rotates the 3x3 position block of an ECEF covariance matrix
/// into the local NEU frame of the `reference` point.
pub(crate) fn neu_covariance(q_ecef: &Matrix3<f64>, reference: &GeodeticPosition) -> Matrix3<f64> {
    let (lat, lon) = reference.lat_lon_rad();
    let r = ecef_to_neu_rotation(lat, lon);
    r * q_ecef * r.transpose()
}
