//! Receiver solution
use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    navigation::lsq::{Convergence, LsqSolution},
    prelude::{Ellipsoid, Epoch, GeodeticPosition},
};

/// [ReceiverSolution] produced by one solver invocation.
/// Never updated afterwards: a refinement produces a new [ReceiverSolution].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReceiverSolution {
    /// [Epoch] of the observations
    pub epoch: Epoch,
    /// Position in meters ECEF
    pub position_m: Vector3<f64>,
    /// Receiver clock bias (s)
    pub clock_bias_s: f64,
    /// [Convergence] status
    pub convergence: Convergence,
    /// Postfit residuals (m), in the order satellites were proposed
    pub residuals_m: Vec<f64>,
}

impl ReceiverSolution {
    pub(crate) fn new(epoch: Epoch, lsq: LsqSolution) -> Self {
        Self {
            epoch,
            position_m: lsq.position_m,
            clock_bias_s: lsq.clock_bias_s,
            convergence: lsq.convergence,
            residuals_m: lsq.residuals_m,
        }
    }

    /// True if this solution converged
    pub fn is_converged(&self) -> bool {
        self.convergence.is_converged()
    }

    /// Latitude, longitude and altitude on this [Ellipsoid]
    pub fn geodetic(&self, ellipsoid: &Ellipsoid) -> GeodeticPosition {
        ellipsoid.to_geodetic(&self.position_m)
    }

    /// 3D distance (m) to a reference ECEF position
    pub fn error_m(&self, reference_m: &Vector3<f64>) -> f64 {
        (self.position_m - reference_m).norm()
    }
}
