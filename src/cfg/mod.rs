use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::prelude::{
    AngleModel, Carrier, Constants, IonosphereModel, ObliquityFactor, TroposphereModel,
};

mod modeling;
mod solver;

pub use modeling::Modeling;
pub use solver::SolverOpts;

/// Starting point of the coarse solution, at each epoch
#[derive(Default, Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum InitialGuess {
    /// Earth center (0, 0, 0)
    #[default]
    Origin,
    /// Coarse solution of the previous (successfully solved) epoch.
    /// Falls back to [InitialGuess::Origin] on first epoch.
    /// This introduces a sequential dependency between epochs.
    PreviousEpoch,
    /// Fixed ECEF coordinates [m]
    Fixed(Vector3<f64>),
}

fn default_min_sv() -> usize {
    4
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    /// Physical [Constants]
    #[cfg_attr(feature = "serde", serde(default))]
    pub constants: Constants,

    /// Atmospherical and Physical [Modeling] used to improve the accuracy of solution.
    #[cfg_attr(feature = "serde", serde(default))]
    pub modeling: Modeling,

    /// Iterative solver customization
    #[cfg_attr(feature = "serde", serde(default))]
    pub solver: SolverOpts,

    /// [Carrier] whose pseudo ranges are solved. Other channels are ignored:
    /// solve the same batch again to compare channels.
    #[cfg_attr(feature = "serde", serde(default))]
    pub carrier: Carrier,

    /// [TroposphereModel] used when troposphere modeling is enabled
    #[cfg_attr(feature = "serde", serde(default))]
    pub troposphere: TroposphereModel,

    /// Broadcast [IonosphereModel] used when ionosphere modeling is enabled
    #[cfg_attr(feature = "serde", serde(default))]
    pub ionosphere: IonosphereModel,

    /// [ObliquityFactor] applied to the vertical ionosphere delay
    #[cfg_attr(feature = "serde", serde(default))]
    pub obliquity: ObliquityFactor,

    /// [AngleModel] used to evaluate elevation and azimuth angles
    #[cfg_attr(feature = "serde", serde(default))]
    pub angle_model: AngleModel,

    /// Minimal number of satellites required to solve an epoch.
    /// Cannot be lower than 4 (4 unknowns).
    #[cfg_attr(feature = "serde", serde(default = "default_min_sv"))]
    pub min_sv: usize,

    /// Minimal SV elevation angle for an SV to contribute to the refined solution.
    /// Use this as a simple quality criteria.
    #[cfg_attr(feature = "serde", serde(default))]
    pub min_sv_elevation_deg: Option<f64>,

    /// [InitialGuess] of the coarse solution
    #[cfg_attr(feature = "serde", serde(default))]
    pub initial_guess: InitialGuess,

    /// Reference ECEF position [m]. When defined, NEU offsets are expressed
    /// relative to this point and solutions errors are evaluated against it.
    /// NEU offsets are otherwise expressed relative to the geodetic origin (0°, 0°, 0m).
    #[cfg_attr(feature = "serde", serde(default))]
    pub reference_position_m: Option<Vector3<f64>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            constants: Constants::default(),
            modeling: Modeling::default(),
            solver: SolverOpts::default(),
            carrier: Carrier::default(),
            troposphere: TroposphereModel::default(),
            ionosphere: IonosphereModel::default(),
            obliquity: ObliquityFactor::default(),
            angle_model: AngleModel::default(),
            min_sv: default_min_sv(),
            min_sv_elevation_deg: None,
            initial_guess: InitialGuess::default(),
            reference_position_m: None,
        }
    }
}

impl Config {
    /// Returns [Config] for a static receiver surveyed against its
    /// known reference position (ECEF, meters).
    /// You can then customize [Self] as you will.
    pub fn static_preset(reference_position_m: Vector3<f64>) -> Self {
        let mut s = Self::default();
        s.reference_position_m = Some(reference_position_m);
        s.initial_guess = InitialGuess::PreviousEpoch;
        s
    }

    /// Copies and returns [Config] with updated [Modeling]
    pub fn with_modeling(&self, modeling: Modeling) -> Self {
        let mut s = self.clone();
        s.modeling = modeling;
        s
    }

    /// Copies and returns [Config] with updated [Constants]
    pub fn with_constants(&self, constants: Constants) -> Self {
        let mut s = self.clone();
        s.constants = constants;
        s
    }

    /// Copies and returns [Config] with updated [SolverOpts]
    pub fn with_solver_opts(&self, opts: SolverOpts) -> Self {
        let mut s = self.clone();
        s.solver = opts;
        s
    }

    /// Copies and returns [Config] with updated [Carrier]
    pub fn with_carrier(&self, carrier: Carrier) -> Self {
        let mut s = self.clone();
        s.carrier = carrier;
        s
    }

    /// Copies and returns [Config] with updated [TroposphereModel]
    pub fn with_troposphere(&self, model: TroposphereModel) -> Self {
        let mut s = self.clone();
        s.troposphere = model;
        s
    }

    /// Copies and returns [Config] with updated [IonosphereModel]
    pub fn with_ionosphere(&self, model: IonosphereModel) -> Self {
        let mut s = self.clone();
        s.ionosphere = model;
        s
    }

    /// Copies and returns [Config] with updated [ObliquityFactor]
    pub fn with_obliquity(&self, obliquity: ObliquityFactor) -> Self {
        let mut s = self.clone();
        s.obliquity = obliquity;
        s
    }

    /// Copies and returns [Config] with updated [AngleModel]
    pub fn with_angle_model(&self, model: AngleModel) -> Self {
        let mut s = self.clone();
        s.angle_model = model;
        s
    }

    /// Copies and returns [Config] with updated elevation mask [°]
    pub fn with_min_sv_elevation(&self, elevation_deg: f64) -> Self {
        let mut s = self.clone();
        s.min_sv_elevation_deg = Some(elevation_deg);
        s
    }

    /// Copies and returns [Config] with updated [InitialGuess]
    pub fn with_initial_guess(&self, guess: InitialGuess) -> Self {
        let mut s = self.clone();
        s.initial_guess = guess;
        s
    }

    /// Copies and returns [Config] with updated reference position (ECEF, meters)
    pub fn with_reference_position(&self, reference_position_m: Vector3<f64>) -> Self {
        let mut s = self.clone();
        s.reference_position_m = Some(reference_position_m);
        s
    }

    /// Effective minimal number of satellites
    pub(crate) fn min_sv_required(&self) -> usize {
        self.min_sv.max(4)
    }
}
