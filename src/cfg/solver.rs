//! Solver configuration

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

fn default_max_iterations() -> usize {
    20
}

fn default_tolerance_m() -> f64 {
    1.0E-4
}

fn default_initial_damping() -> f64 {
    1.0E-3
}

fn default_max_damping() -> f64 {
    1.0E10
}

/// [SolverOpts] drive the iterative [crate::prelude::LeastSquares] solver
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolverOpts {
    /// Maximal number of (accepted or rejected) iterations
    #[cfg_attr(feature = "serde", serde(default = "default_max_iterations"))]
    pub max_iterations: usize,

    /// Convergence is declared once the update norm falls below this value (meters)
    #[cfg_attr(feature = "serde", serde(default = "default_tolerance_m"))]
    pub tolerance_m: f64,

    /// Initial Levenberg-Marquardt damping factor
    #[cfg_attr(feature = "serde", serde(default = "default_initial_damping"))]
    pub initial_damping: f64,

    /// The solver gives up when damping grows past this value
    #[cfg_attr(feature = "serde", serde(default = "default_max_damping"))]
    pub max_damping: f64,
}

impl Default for SolverOpts {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
            tolerance_m: default_tolerance_m(),
            initial_damping: default_initial_damping(),
            max_damping: default_max_damping(),
        }
    }
}
