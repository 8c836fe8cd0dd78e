use log::{debug, warn};

use nalgebra::{DVector, Matrix4, MatrixXx4, Vector3, Vector4};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{cfg::SolverOpts, geometry::line_of_sight, navigation::full_rank, prelude::Error};

/// Lower bound of the damping factor, once steps are accepted
const MIN_DAMPING: f64 = 1.0E-10;

/// Iteration outcome
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Convergence {
    /// Update norm fell below tolerance
    Converged {
        /// Number of iterations
        iterations: usize,
    },
    /// Iteration or damping budget exhausted: best iterate is returned,
    /// but must not be trusted as a converged solution.
    Degraded {
        /// Number of iterations
        iterations: usize,
    },
}

impl Convergence {
    /// True when the solver converged
    pub fn is_converged(&self) -> bool {
        matches!(self, Self::Converged { .. })
    }

    /// Number of iterations that were performed
    pub fn iterations(&self) -> usize {
        match self {
            Self::Converged { iterations } | Self::Degraded { iterations } => *iterations,
        }
    }
}

/// [LsqSolution] is the raw output of the [LeastSquares] solver
#[derive(Debug, Clone, PartialEq)]
pub struct LsqSolution {
    /// Receiver ECEF position [m]
    pub position_m: Vector3<f64>,
    /// Receiver clock bias [s]
    pub clock_bias_s: f64,
    /// [Convergence] status
    pub convergence: Convergence,
    /// Postfit residuals [m], one per satellite
    pub residuals_m: Vec<f64>,
}

/// Levenberg-Marquardt damped Gauss-Newton solver, estimating
/// the receiver position and clock offset (c.dt, in meters)
/// that best explain the pseudo range observations.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct LeastSquares {
    opts: SolverOpts,
}

/// Jacobian and prefit residuals at this state
fn linearize(
    sv_positions_m: &[Vector3<f64>],
    pseudo_ranges_m: &[f64],
    state: &Vector4<f64>,
) -> Result<(MatrixXx4<f64>, DVector<f64>), Error> {
    let rx = state.fixed_rows::<3>(0).into_owned();
    let cdt = state[3];

    let mut h = MatrixXx4::<f64>::zeros(sv_positions_m.len());
    let mut residuals = DVector::<f64>::zeros(sv_positions_m.len());

    for (i, (sv, pr)) in sv_positions_m.iter().zip(pseudo_ranges_m).enumerate() {
        let los = line_of_sight(&rx, sv)?;
        let rho = (sv - rx).norm();

        h[(i, 0)] = -los[0];
        h[(i, 1)] = -los[1];
        h[(i, 2)] = -los[2];
        h[(i, 3)] = 1.0;

        residuals[i] = pr - (rho + cdt);
    }

    Ok((h, residuals))
}

impl LeastSquares {
    pub fn new(opts: SolverOpts) -> Self {
        Self { opts }
    }

    /// Solves for the receiver state.
    /// ## Input
    /// - sv_positions_m: satellites ECEF coordinates [m]
    /// - pseudo_ranges_m: corrected pseudo ranges [m], one per satellite
    /// - initial_m: initial receiver position guess [m]; clock starts at zero
    /// - c_m_s: speed of light [m.s⁻¹]
    ///
    /// The minimal number of satellites is not verified here:
    /// this is up to the caller.
    pub fn solve(
        &self,
        sv_positions_m: &[Vector3<f64>],
        pseudo_ranges_m: &[f64],
        initial_m: Vector3<f64>,
        c_m_s: f64,
    ) -> Result<LsqSolution, Error> {
        if sv_positions_m.len() != pseudo_ranges_m.len() {
            return Err(Error::DimensionMismatch(
                sv_positions_m.len(),
                pseudo_ranges_m.len(),
            ));
        }

        let mut state = Vector4::new(initial_m[0], initial_m[1], initial_m[2], 0.0);
        let mut lambda = self.opts.initial_damping;
        let mut convergence = None;
        let mut iteration = 0;

        let (mut h, mut residuals) = linearize(sv_positions_m, pseudo_ranges_m, &state)?;

        if !full_rank(&h) {
            return Err(Error::SingularGeometry);
        }

        let mut cost = residuals.norm_squared();

        while iteration < self.opts.max_iterations {
            iteration += 1;

            let ht = h.transpose();
            let damped: Matrix4<f64> = &ht * &h + Matrix4::identity() * lambda;
            let ht_r: Vector4<f64> = &ht * &residuals;

            let dx = match damped.cholesky() {
                Some(chol) => chol.solve(&ht_r),
                None => {
                    lambda *= 10.0;
                    if lambda > self.opts.max_damping {
                        warn!("lsq: damping budget exhausted (iter={})", iteration);
                        break;
                    }
                    continue;
                },
            };

            let trial = state + dx;
            let (trial_h, trial_residuals) = linearize(sv_positions_m, pseudo_ranges_m, &trial)?;
            let trial_cost = trial_residuals.norm_squared();
            let step_m = dx.norm();

            if trial_cost <= cost {
                state = trial;
                h = trial_h;
                residuals = trial_residuals;
                cost = trial_cost;
                lambda = (lambda / 10.0).max(MIN_DAMPING);
            } else if step_m >= self.opts.tolerance_m {
                lambda *= 10.0;
                if lambda > self.opts.max_damping {
                    warn!("lsq: damping budget exhausted (iter={})", iteration);
                    break;
                }
                continue;
            }

            debug!(
                "lsq: iter={} |dx|={:.3E}m cost={:.3E} lambda={:.1E}",
                iteration, step_m, cost, lambda
            );

            if step_m < self.opts.tolerance_m {
                convergence = Some(Convergence::Converged {
                    iterations: iteration,
                });
                break;
            }
        }

        let convergence = convergence.unwrap_or(Convergence::Degraded {
            iterations: iteration,
        });

        if !convergence.is_converged() {
            warn!("lsq: did not converge after {} iteration(s)", iteration);
        }

        Ok(LsqSolution {
            position_m: state.fixed_rows::<3>(0).into_owned(),
            clock_bias_s: state[3] / c_m_s,
            convergence,
            residuals_m: residuals.iter().copied().collect(),
        })
    }
}
