#![doc = include_str!("../README.md")]
#![cfg_attr(docrs, feature(doc_cfg))]

extern crate gnss_rs as gnss;

// private modules
mod bias;
mod candidate;
mod carrier;
mod cfg;
mod constants;
mod error;
mod frames;
mod geometry;
mod navigation;
mod report;
mod solver;

#[cfg(test)]
mod tests;

// prelude
pub mod prelude {
    pub use crate::bias::{
        BiasRuntime, DelayCorrection, IonosphereModel, KbModel, Meteo, ObliquityFactor,
        SatelliteCorrections, TroposphereModel, UnavailableCause, WeatherSource,
    };
    pub use crate::candidate::{
        Candidate, ClockCorrection, ClockParameters, EpochObservations, Observation,
        OrbitPosition, Rejection,
    };
    pub use crate::carrier::Carrier;
    pub use crate::cfg::{Config, InitialGuess, Modeling, SolverOpts};
    pub use crate::constants::{Constants, SPEED_OF_LIGHT_M_S};
    pub use crate::error::{Error, ErrorKind};
    pub use crate::frames::{Ellipsoid, GeodeticPosition, TopocentricOffset};
    pub use crate::geometry::{azimuth_deg, elevation_deg, AngleModel};
    pub use crate::navigation::{
        dop::{gdop, pdop, DilutionOfPrecision},
        lsq::{Convergence, LeastSquares, LsqSolution},
        solutions::ReceiverSolution,
        GeometryMatrix,
    };
    pub use crate::report::{EpochReport, EpochStatus};
    pub use crate::solver::{EpochSolution, Solver};
    // re-export
    pub use gnss::prelude::{Constellation, SV};
    pub use hifitime::{Duration, Epoch, TimeScale};
    pub use nalgebra::Vector3;
}

// pub export
pub use error::Error;
