//! Per epoch report
use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    prelude::{Carrier, Epoch, Error, ErrorKind},
    solver::EpochSolution,
};

/// [EpochStatus] of an [EpochReport]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EpochStatus {
    /// Both solutions converged
    Solved,
    /// One of the solutions did not converge
    Degraded,
    /// Epoch could not be solved
    Skipped {
        /// [ErrorKind] that caused this epoch to be skipped
        kind: ErrorKind,
        /// Error message
        cause: String,
    },
}

/// [EpochReport] is a flat record of one epoch resolution.
/// Reports do not depend on one another.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EpochReport {
    /// [Epoch] of observation
    pub epoch: Epoch,
    /// [Carrier] that was solved
    pub carrier: Carrier,
    /// Number of satellites that contributed to the refined solution.
    /// On skipped epochs: number of satellites that were still usable.
    pub num_sv: usize,
    /// Coarse position in meters ECEF
    pub coarse_ecef_m: (f64, f64, f64),
    /// Coarse clock bias (s)
    pub coarse_clock_bias_s: f64,
    /// Coarse position error (m), when the reference position is known
    pub coarse_error_m: Option<f64>,
    /// Refined position in meters ECEF
    pub refined_ecef_m: (f64, f64, f64),
    /// Refined clock bias (s)
    pub refined_clock_bias_s: f64,
    /// Refined position error (m), when the reference position is known
    pub refined_error_m: Option<f64>,
    /// Coarse position as (north, east, up) offset in meters
    pub neu_m: (f64, f64, f64),
    /// Position DOP of the coarse geometry
    pub pdop: f64,
    /// Geometric DOP of the coarse geometry
    pub gdop: f64,
    /// True when both solutions converged
    pub converged: bool,
    /// Number of delay corrections that could not be modeled
    pub skipped_corrections: usize,
    /// [EpochStatus]
    pub status: EpochStatus,
}

fn tuple(v: &Vector3<f64>) -> (f64, f64, f64) {
    (v[0], v[1], v[2])
}

impl EpochReport {
    /// Builds [EpochReport] from an [EpochSolution].
    /// ## Input
    /// - solution: [EpochSolution]
    /// - reference_m: known reference position (ECEF, meters), if any
    pub fn from_solution(solution: &EpochSolution, reference_m: Option<&Vector3<f64>>) -> Self {
        let converged = solution.coarse.is_converged() && solution.refined.is_converged();

        Self {
            epoch: solution.epoch,
            carrier: solution.carrier,
            num_sv: solution.refined.residuals_m.len(),
            coarse_ecef_m: tuple(&solution.coarse.position_m),
            coarse_clock_bias_s: solution.coarse.clock_bias_s,
            coarse_error_m: reference_m.map(|r| solution.coarse.error_m(r)),
            refined_ecef_m: tuple(&solution.refined.position_m),
            refined_clock_bias_s: solution.refined.clock_bias_s,
            refined_error_m: reference_m.map(|r| solution.refined.error_m(r)),
            neu_m: (
                solution.neu.north_m,
                solution.neu.east_m,
                solution.neu.up_m,
            ),
            pdop: solution.dop.pdop,
            gdop: solution.dop.gdop,
            converged,
            skipped_corrections: solution.skipped_corrections(),
            status: if converged {
                EpochStatus::Solved
            } else {
                EpochStatus::Degraded
            },
        }
    }

    /// Zero-result [EpochReport] of an epoch that could not be solved
    pub fn skipped(epoch: Epoch, carrier: Carrier, num_sv: usize, cause: &Error) -> Self {
        Self {
            epoch,
            carrier,
            num_sv,
            coarse_ecef_m: Default::default(),
            coarse_clock_bias_s: 0.0,
            coarse_error_m: None,
            refined_ecef_m: Default::default(),
            refined_clock_bias_s: 0.0,
            refined_error_m: None,
            neu_m: Default::default(),
            pdop: 0.0,
            gdop: 0.0,
            converged: false,
            skipped_corrections: 0,
            status: EpochStatus::Skipped {
                kind: cause.kind(),
                cause: cause.to_string(),
            },
        }
    }

    /// True if this epoch was skipped
    pub fn is_skipped(&self) -> bool {
        matches!(self.status, EpochStatus::Skipped { .. })
    }

    /// [ErrorKind] of a skipped epoch
    pub fn skipped_kind(&self) -> Option<ErrorKind> {
        match self.status {
            EpochStatus::Skipped { kind, .. } => Some(kind),
            _ => None,
        }
    }
}
