use nalgebra::{Matrix4, MatrixXx4, Vector3};

use crate::{geometry::line_of_sight, prelude::Error};

pub(crate) mod dop;
pub(crate) mod lsq;
pub(crate) mod solutions;

/// Relative singular value threshold under which
/// the geometry is considered rank deficient.
const RANK_THRESHOLD: f64 = 1.0E-10;

/// [GeometryMatrix] (direction cosines): one row per satellite,
/// unit line of sight from the receiver (3 first columns) and 1 (clock column).
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryMatrix {
    g: MatrixXx4<f64>,
}

impl GeometryMatrix {
    /// Builds a new [GeometryMatrix]
    /// ## Input
    /// - sv_positions: satellites ECEF coordinates [m]
    /// - rx: receiver ECEF coordinates [m]
    pub fn new(sv_positions: &[Vector3<f64>], rx: &Vector3<f64>) -> Result<Self, Error> {
        let mut g = MatrixXx4::<f64>::zeros(sv_positions.len());
        for (i, sv) in sv_positions.iter().enumerate() {
            let los = line_of_sight(rx, sv)?;
            g[(i, 0)] = los[0];
            g[(i, 1)] = los[1];
            g[(i, 2)] = los[2];
            g[(i, 3)] = 1.0_f64;
        }
        Ok(Self { g })
    }

    /// Number of rows (satellites)
    pub fn nrows(&self) -> usize {
        self.g.nrows()
    }

    /// Returns the n×4 matrix
    pub fn matrix(&self) -> &MatrixXx4<f64> {
        &self.g
    }

    /// Returns (GᵗG)⁻¹
    pub fn covariance(&self) -> Result<Matrix4<f64>, Error> {
        normal_inverse(&self.g)
    }
}

/// Verifies that `h` has full column rank (4 independent directions).
pub(crate) fn full_rank(h: &MatrixXx4<f64>) -> bool {
    if h.nrows() < 4 {
        return false;
    }
    let singular = h.clone().svd(false, false).singular_values;
    let max = singular.max();
    let min = singular.min();
    max.is_finite() && max > 0.0 && min / max > RANK_THRESHOLD
}

/// Returns (HᵗH)⁻¹ for a full rank `h`
pub(crate) fn normal_inverse(h: &MatrixXx4<f64>) -> Result<Matrix4<f64>, Error> {
    if !full_rank(h) {
        return Err(Error::SingularGeometry);
    }
    let ht_h: Matrix4<f64> = h.transpose() * h;
    ht_h.try_inverse().ok_or(Error::SingularGeometry)
}
