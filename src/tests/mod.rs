mod carrier;
mod cfg;
mod dop;
mod error;
mod iono;

use log::LevelFilter;
use std::sync::Once;

use crate::prelude::{
    Constellation, Epoch, GeodeticPosition, Meteo, Vector3, WeatherSource, SPEED_OF_LIGHT_M_S, SV,
};

static INIT: Once = Once::new();

pub fn init_logger() {
    INIT.call_once(|| {
        env_logger::builder()
            .is_test(true)
            .filter_level(LevelFilter::Debug)
            .init();
    });
}

/// Surveyed receiver coordinates (ECEF, m)
pub const REFERENCE_COORDS_ECEF_M: (f64, f64, f64) = (4331297.3480, 567555.6390, 4633133.7280);

/// GPS orbit radius (m)
pub const GPS_ORBIT_RADIUS_M: f64 = 26_560_000.0;

/// Well spread sky plot, as (elevation, azimuth) in degrees
pub const SKY: [(f64, f64); 8] = [
    (85.0, 0.0),
    (60.0, 45.0),
    (45.0, 135.0),
    (30.0, 225.0),
    (20.0, 315.0),
    (40.0, 270.0),
    (15.0, 90.0),
    (25.0, 180.0),
];

pub fn reference_ecef_m() -> Vector3<f64> {
    Vector3::new(
        REFERENCE_COORDS_ECEF_M.0,
        REFERENCE_COORDS_ECEF_M.1,
        REFERENCE_COORDS_ECEF_M.2,
    )
}

pub fn gps(prn: u8) -> SV {
    SV::new(Constellation::GPS, prn)
}

/// Places a satellite on the GPS orbit sphere, seen from `rx`
/// at this (elevation, azimuth). The local vertical is geocentric.
pub fn sv_position(rx: &Vector3<f64>, elevation_deg: f64, azimuth_deg: f64) -> Vector3<f64> {
    let up = rx.normalize();
    let east = Vector3::new(-rx[1], rx[0], 0.0).normalize();
    let north = up.cross(&east);

    let (el, az) = (elevation_deg.to_radians(), azimuth_deg.to_radians());
    let dir = up * el.sin() + (north * az.cos() + east * az.sin()) * el.cos();

    let b = rx.dot(&dir);
    let rho = -b + (b.powi(2) - rx.norm_squared() + GPS_ORBIT_RADIUS_M.powi(2)).sqrt();
    rx + dir * rho
}

/// Satellites positions for this sky plot
pub fn constellation(rx: &Vector3<f64>, sky: &[(f64, f64)]) -> Vec<Vector3<f64>> {
    sky.iter()
        .map(|(el, az)| sv_position(rx, *el, *az))
        .collect()
}

/// Noise free pseudo ranges, for this receiver clock bias
pub fn pseudo_ranges(rx: &Vector3<f64>, svs: &[Vector3<f64>], clock_bias_s: f64) -> Vec<f64> {
    svs.iter()
        .map(|sv| (sv - rx).norm() + SPEED_OF_LIGHT_M_S * clock_bias_s)
        .collect()
}

/// Helper null implementation, when weather is not available
pub struct NullWeather {}

impl WeatherSource for NullWeather {
    fn meteo(&self, _: Epoch, _: &GeodeticPosition) -> Option<Meteo> {
        None
    }
}
