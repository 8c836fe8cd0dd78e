use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::prelude::{Epoch, SV};

/// Classification of an [Error], telling the caller whether to
/// drop a satellite, skip an epoch or abort the current solve.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ErrorKind {
    /// Recoverable per satellite: drop this satellite from the epoch.
    MissingData,
    /// Recoverable per epoch: skip the epoch.
    InsufficientGeometry,
    /// Fatal for the current solve call: retry with another subset, or give up.
    SingularGeometry,
    /// Invalid setup or API misuse.
    Configuration,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// No broadcast clock entry for this [SV] is valid at this [Epoch].
    #[error("{1}({0}): no valid clock correction")]
    ClockCorrectionNotFound(SV, Epoch),

    /// [SV] was proposed without pseudo range observation.
    #[error("{0}: missing pseudo range observation")]
    MissingPseudoRange(SV),

    /// [SV] was proposed without orbital state.
    #[error("{0}: missing orbital state")]
    MissingOrbit(SV),

    /// [SV] orbital state is not a finite position.
    #[error("{0}: invalid orbital state")]
    InvalidOrbit(SV),

    /// Not enough satellites remain after filtering (minimum is 4).
    #[error("insufficient geometry: {0} usable satellite(s)")]
    InsufficientGeometry(usize),

    /// (GᵗG) is not invertible: less than 4 independent directions.
    #[error("singular geometry: normal matrix cannot be inverted")]
    SingularGeometry,

    /// Receiver and satellite coincide (zero length line of sight),
    /// or the receiver lies on the polar axis where azimuth is undefined.
    #[error("degenerate geometry: undefined line of sight")]
    DegenerateGeometry,

    /// Inputs of inconsistent dimensions were handed to the solver.
    #[error("dimension mismatch: {0} positions but {1} pseudo ranges")]
    DimensionMismatch(usize, usize),

    #[error("unknown troposphere model \"{0}\"")]
    UnknownTroposphereModel(String),

    #[error("unknown obliquity factor \"{0}\"")]
    UnknownObliquityFactor(String),

    #[error("unknown angle model \"{0}\"")]
    UnknownAngleModel(String),

    #[error("unknown carrier \"{0}\"")]
    UnknownCarrier(String),
}

impl Error {
    /// Returns the [ErrorKind] of this [Error]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ClockCorrectionNotFound(..)
            | Self::MissingPseudoRange(_)
            | Self::MissingOrbit(_)
            | Self::InvalidOrbit(_) => ErrorKind::MissingData,
            Self::InsufficientGeometry(_) => ErrorKind::InsufficientGeometry,
            Self::SingularGeometry | Self::DegenerateGeometry => ErrorKind::SingularGeometry,
            Self::DimensionMismatch(..)
            | Self::UnknownTroposphereModel(_)
            | Self::UnknownObliquityFactor(_)
            | Self::UnknownAngleModel(_)
            | Self::UnknownCarrier(_) => ErrorKind::Configuration,
        }
    }
}
