//! Position solving candidate
use itertools::Itertools;
use log::{debug, error};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::prelude::{Carrier, Epoch, Error, Vector3, SV};

mod clock;
pub use clock::{ClockCorrection, ClockParameters};

/// Satellite position, with explicit unit, as handed over by the orbit source.
/// Precise orbit products usually express coordinates in kilometers.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OrbitPosition {
    /// ECEF coordinates in meters
    Meters(Vector3<f64>),
    /// ECEF coordinates in kilometers
    Kilometers(Vector3<f64>),
}

impl OrbitPosition {
    /// Returns ECEF coordinates in meters
    pub fn to_meters(&self) -> Vector3<f64> {
        match self {
            Self::Meters(ecef_m) => *ecef_m,
            Self::Kilometers(ecef_km) => ecef_km * 1.0E3,
        }
    }
}

/// Raw satellite [Observation] at one epoch. Any field may be missing.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Observation {
    /// [SV] Identity
    pub sv: SV,
    /// [Carrier] the pseudo range was tracked on
    pub carrier: Carrier,
    /// Satellite position
    pub position: Option<OrbitPosition>,
    /// Raw pseudo range [m]
    pub pseudo_range_m: Option<f64>,
}

impl Observation {
    /// Builds a complete [Observation]
    pub fn new(sv: SV, carrier: Carrier, position: OrbitPosition, pseudo_range_m: f64) -> Self {
        Self {
            sv,
            carrier,
            position: Some(position),
            pseudo_range_m: Some(pseudo_range_m),
        }
    }
}

/// All [Observation]s sampled at one [Epoch].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EpochObservations {
    /// Sampling [Epoch]
    pub epoch: Epoch,
    /// [Observation]s, one per satellite
    pub observations: Vec<Observation>,
}

impl EpochObservations {
    pub fn new(epoch: Epoch, observations: Vec<Observation>) -> Self {
        Self {
            epoch,
            observations,
        }
    }

    /// [Carrier]s observed at this [Epoch], in ascending order
    pub fn carriers(&self) -> Vec<Carrier> {
        self.observations
            .iter()
            .map(|obs| obs.carrier)
            .unique()
            .sorted()
            .collect()
    }
}

/// [Candidate] is a satellite that contributes to the solution:
/// all required data is present, in meters.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Candidate {
    /// [SV] Identity
    pub sv: SV,
    /// [Carrier] of the pseudo range
    pub carrier: Carrier,
    /// Satellite ECEF position [m]
    pub position_m: Vector3<f64>,
    /// Raw pseudo range [m]
    pub pseudo_range_m: f64,
    /// Resolved [ClockCorrection], when satellite clock bias is being modeled.
    pub clock: Option<ClockCorrection>,
}

impl Candidate {
    /// Pseudo range [m] corrected for satellite clock offset (if any)
    pub fn corrected_pseudo_range_m(&self, t: Epoch, c_m_s: f64) -> f64 {
        match self.clock {
            Some(clock) => clock.correct_pseudo_range(t, self.pseudo_range_m, c_m_s),
            None => self.pseudo_range_m,
        }
    }
}

/// [Rejection] of a satellite, that did not contribute to the solution.
#[derive(Debug, Clone, PartialEq)]
pub struct Rejection {
    /// [SV] Identity
    pub sv: SV,
    /// Cause
    pub cause: Error,
}

/// Reduces raw [Observation]s to the working set of [Candidate]s.
/// Satellites with missing or invalid data are dropped (and reported), never null filled.
/// Observations on other [Carrier]s are ignored.
/// ## Input
/// - t: sampling [Epoch]
/// - carrier: [Carrier] to solve with
/// - observations: raw [Observation]s
/// - clocks: broadcast [ClockParameters], or None when satellite clock bias
///   is not to be compensated
pub(crate) fn prefit(
    t: Epoch,
    carrier: Carrier,
    observations: &[Observation],
    clocks: Option<&[ClockParameters]>,
) -> (Vec<Candidate>, Vec<Rejection>) {
    let mut rejections = Vec::new();

    let candidates = observations
        .iter()
        .filter(|obs| obs.carrier == carrier)
        .filter_map(|obs| match candidate(t, obs, clocks) {
            Ok(cd) => Some(cd),
            Err(cause) => {
                error!("{}({}) - dropped: {}", t, obs.sv, cause);
                rejections.push(Rejection { sv: obs.sv, cause });
                None
            },
        })
        .collect::<Vec<_>>();

    debug!(
        "{} - {} candidate(s), {} rejection(s) on {}",
        t,
        candidates.len(),
        rejections.len(),
        carrier
    );

    (candidates, rejections)
}

fn candidate(
    t: Epoch,
    obs: &Observation,
    clocks: Option<&[ClockParameters]>,
) -> Result<Candidate, Error> {
    let position_m = obs
        .position
        .map(|pos| pos.to_meters())
        .ok_or(Error::MissingOrbit(obs.sv))?;

    if !position_m.iter().all(|x| x.is_finite()) {
        return Err(Error::InvalidOrbit(obs.sv));
    }

    let pseudo_range_m = obs
        .pseudo_range_m
        .filter(|pr| pr.is_finite())
        .ok_or(Error::MissingPseudoRange(obs.sv))?;

    let clock = match clocks {
        Some(clocks) => Some(ClockCorrection::resolve(obs.sv, t, clocks)?),
        None => None,
    };

    Ok(Candidate {
        sv: obs.sv,
        carrier: obs.carrier,
        position_m,
        pseudo_range_m,
        clock,
    })
}
