//! Epoch solver
use log::{debug, error, info, warn};
use nalgebra::Vector3;

use crate::{
    bias::{
        BiasRuntime, DelayCorrection, IonosphereModel, Meteo, SatelliteCorrections,
        TroposphereModel,
    },
    candidate::{prefit, Candidate, ClockParameters, EpochObservations, Rejection},
    cfg::{Config, InitialGuess},
    navigation::{
        dop::DilutionOfPrecision, lsq::LeastSquares, solutions::ReceiverSolution, GeometryMatrix,
    },
    prelude::{Carrier, Epoch, Error, GeodeticPosition, TopocentricOffset, WeatherSource},
    report::EpochReport,
};

/// Everything that was resolved at one [Epoch]
#[derive(Debug, Clone, PartialEq)]
pub struct EpochSolution {
    /// [Epoch] of observation
    pub epoch: Epoch,
    /// [Carrier] that was solved
    pub carrier: Carrier,
    /// Coarse [ReceiverSolution]: satellite clock corrections only
    pub coarse: ReceiverSolution,
    /// Refined [ReceiverSolution]: atmospheric delays compensated
    pub refined: ReceiverSolution,
    /// [DilutionOfPrecision] of the coarse geometry
    pub dop: DilutionOfPrecision,
    /// Coarse position, relative to [Self::reference]
    pub neu: TopocentricOffset,
    /// Reference point of [Self::neu]
    pub reference: GeodeticPosition,
    /// [SatelliteCorrections] of the refined pass
    pub corrections: Vec<SatelliteCorrections>,
    /// [Candidate]s that contributed to the coarse solution
    pub candidates: Vec<Candidate>,
    /// Satellites that were dropped
    pub rejections: Vec<Rejection>,
}

impl EpochSolution {
    /// Number of delay corrections that could not be modeled
    pub fn skipped_corrections(&self) -> usize {
        self.corrections.iter().map(|c| c.skipped()).sum()
    }

    /// Horizontal DOP, at the NEU reference point
    pub fn hdop(&self) -> f64 {
        self.dop.hdop(&self.reference)
    }

    /// Vertical DOP, at the NEU reference point
    pub fn vdop(&self) -> f64 {
        self.dop.vdop(&self.reference)
    }
}

/// [Solver] resolves the receiver position and clock bias, epoch by epoch:
/// a coarse solution first, used to model the atmospheric delays,
/// then a refined solution from the corrected pseudo ranges.
///
/// [Solver::resolve] does not mutate [Solver]: epochs may be solved in parallel.
#[derive(Debug, Clone)]
pub struct Solver {
    /// Solver parametrization
    pub cfg: Config,
    /// [LeastSquares] solver
    lsq: LeastSquares,
}

impl Solver {
    /// Creates a new [Solver]
    /// ## Input
    /// - cfg: Solver [Config]
    pub fn new(cfg: &Config) -> Self {
        if cfg.min_sv < 4 {
            warn!("min_sv={} is not meaningful: 4 satellites are required", cfg.min_sv);
        }
        if cfg.modeling.iono_delay && cfg.ionosphere == IonosphereModel::Unknown {
            warn!("ionosphere modeling enabled without broadcast parameters");
        }
        if cfg.modeling.standard_atmosphere {
            info!("standard atmosphere is used when weather is not available");
        }
        Self {
            lsq: LeastSquares::new(cfg.solver),
            cfg: cfg.clone(),
        }
    }

    /// Resolves one epoch.
    /// ## Input
    /// - observations: [EpochObservations]
    /// - clocks: broadcast [ClockParameters]
    /// - weather: [WeatherSource]
    /// - initial_m: initial guess of the coarse solution (ECEF, meters)
    /// ## Output
    /// - [EpochSolution]
    /// - [Error::InsufficientGeometry] when less than 4 satellites remain:
    ///   this epoch should be skipped
    /// - [Error::SingularGeometry] or [Error::DegenerateGeometry] when
    ///   the geometry does not allow a solution
    pub fn resolve(
        &self,
        observations: &EpochObservations,
        clocks: &[ClockParameters],
        weather: &dyn WeatherSource,
        initial_m: Vector3<f64>,
    ) -> Result<EpochSolution, Error> {
        let (candidates, rejections) = self.candidates(observations, clocks);
        self.solve(observations.epoch, candidates, rejections, weather, initial_m)
    }

    /// Working set of [Candidate]s on the configured [Carrier]
    fn candidates(
        &self,
        observations: &EpochObservations,
        clocks: &[ClockParameters],
    ) -> (Vec<Candidate>, Vec<Rejection>) {
        let clocks = if self.cfg.modeling.sv_clock_bias {
            Some(clocks)
        } else {
            None
        };

        prefit(
            observations.epoch,
            self.cfg.carrier,
            &observations.observations,
            clocks,
        )
    }

    fn solve(
        &self,
        t: Epoch,
        candidates: Vec<Candidate>,
        rejections: Vec<Rejection>,
        weather: &dyn WeatherSource,
        initial_m: Vector3<f64>,
    ) -> Result<EpochSolution, Error> {
        let c = self.cfg.constants.speed_of_light_m_s;
        let ellipsoid = self.cfg.constants.ellipsoid;
        let min_sv = self.cfg.min_sv_required();

        if candidates.len() < min_sv {
            error!("{} - not enough candidates: {}/{}", t, candidates.len(), min_sv);
            return Err(Error::InsufficientGeometry(candidates.len()));
        }

        let positions = candidates
            .iter()
            .map(|cd| cd.position_m)
            .collect::<Vec<_>>();

        let pseudo_ranges = candidates
            .iter()
            .map(|cd| cd.corrected_pseudo_range_m(t, c))
            .collect::<Vec<_>>();

        let coarse = ReceiverSolution::new(
            t,
            self.lsq.solve(&positions, &pseudo_ranges, initial_m, c)?,
        );

        let coarse_geo = coarse.geodetic(&ellipsoid);
        debug!("{} - coarse solution: {}", t, coarse_geo);

        let meteo = self.meteo(t, &coarse_geo, weather);

        let mut corrections = Vec::with_capacity(candidates.len());
        let mut refined_positions = Vec::with_capacity(candidates.len());
        let mut refined_pseudo_ranges = Vec::with_capacity(candidates.len());

        for (cd, pr) in candidates.iter().zip(pseudo_ranges.iter()) {
            let (elevation_deg, azimuth_deg) =
                self.cfg
                    .angle_model
                    .angles(&ellipsoid, &coarse.position_m, &cd.position_m)?;

            if let Some(mask) = self.cfg.min_sv_elevation_deg {
                if elevation_deg < mask {
                    debug!(
                        "{}({}) - below elevation mask (el={:.3}°)",
                        t, cd.sv, elevation_deg
                    );
                    continue;
                }
            }

            let rtm = BiasRuntime {
                t,
                sv: cd.sv,
                carrier: cd.carrier,
                elevation_deg,
                azimuth_deg,
                rx_geodetic: coarse_geo,
            };

            let tropo = if self.cfg.modeling.tropo_delay {
                self.cfg.troposphere.bias_m(&rtm, meteo.as_ref()).finite()
            } else {
                DelayCorrection::default()
            };

            let iono = if self.cfg.modeling.iono_delay {
                self.cfg
                    .ionosphere
                    .bias_m(&rtm, self.cfg.obliquity, c)
                    .finite()
            } else {
                DelayCorrection::default()
            };

            let sv_corrections = SatelliteCorrections {
                sv: cd.sv,
                elevation_deg,
                azimuth_deg,
                tropo,
                iono,
            };

            debug!(
                "{}({}) - el={:.3}° az={:.3}° tropo={:?} iono={:?}",
                t, cd.sv, elevation_deg, azimuth_deg, tropo, iono
            );

            refined_positions.push(cd.position_m);
            refined_pseudo_ranges.push(pr - sv_corrections.total_m());
            corrections.push(sv_corrections);
        }

        if refined_positions.len() < min_sv {
            error!(
                "{} - not enough candidates above elevation mask: {}/{}",
                t,
                refined_positions.len(),
                min_sv
            );
            return Err(Error::InsufficientGeometry(refined_positions.len()));
        }

        let refined = ReceiverSolution::new(
            t,
            self.lsq.solve(
                &refined_positions,
                &refined_pseudo_ranges,
                coarse.position_m,
                c,
            )?,
        );

        let g = GeometryMatrix::new(&positions, &coarse.position_m)?;
        let dop = DilutionOfPrecision::new(&g)?;

        let reference = match self.cfg.reference_position_m {
            Some(reference_m) => ellipsoid.to_geodetic(&reference_m),
            None => GeodeticPosition::default(),
        };

        let neu = ellipsoid.to_topocentric(&coarse.position_m, &reference);

        info!(
            "{} - refined solution: {} (gdop={:.3}, pdop={:.3})",
            t,
            refined.geodetic(&ellipsoid),
            dop.gdop,
            dop.pdop
        );

        Ok(EpochSolution {
            epoch: t,
            carrier: self.cfg.carrier,
            coarse,
            refined,
            dop,
            neu,
            reference,
            corrections,
            candidates,
            rejections,
        })
    }

    /// Resolves all epochs, in order, into a list of [EpochReport]s.
    /// Epochs that could not be solved result in a zero-result [EpochReport].
    pub fn process(
        &self,
        epochs: &[EpochObservations],
        clocks: &[ClockParameters],
        weather: &dyn WeatherSource,
    ) -> Vec<EpochReport> {
        let reference_m = self.cfg.reference_position_m;
        let mut previous_m: Option<Vector3<f64>> = None;

        epochs
            .iter()
            .map(|observations| {
                let initial_m = match self.cfg.initial_guess {
                    InitialGuess::Origin => Vector3::zeros(),
                    InitialGuess::PreviousEpoch => previous_m.unwrap_or_else(Vector3::zeros),
                    InitialGuess::Fixed(initial_m) => initial_m,
                };

                let t = observations.epoch;
                let (candidates, rejections) = self.candidates(observations, clocks);
                let num_candidates = candidates.len();

                match self.solve(t, candidates, rejections, weather, initial_m) {
                    Ok(solution) => {
                        previous_m = Some(solution.coarse.position_m);
                        EpochReport::from_solution(&solution, reference_m.as_ref())
                    },
                    Err(e) => {
                        error!("{} - epoch skipped: {}", t, e);
                        let num_sv = match e {
                            Error::InsufficientGeometry(num_sv) => num_sv,
                            _ => num_candidates,
                        };
                        EpochReport::skipped(t, self.cfg.carrier, num_sv, &e)
                    },
                }
            })
            .collect()
    }

    /// Weather conditions at the coarse receiver position
    fn meteo(
        &self,
        t: Epoch,
        position: &GeodeticPosition,
        weather: &dyn WeatherSource,
    ) -> Option<Meteo> {
        if !self.cfg.modeling.tropo_delay || self.cfg.troposphere != TroposphereModel::Saastamoinen {
            return None;
        }
        match weather.meteo(t, position) {
            Some(meteo) => Some(meteo),
            None if self.cfg.modeling.standard_atmosphere => {
                debug!("{} - using standard atmosphere", t);
                Some(self.cfg.constants.standard_meteo)
            },
            None => {
                warn!("{} - weather unavailable at {}", t, position);
                None
            },
        }
    }
}
