use crate::prelude::{Carrier, Epoch, GeodeticPosition, SV};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub(crate) mod tropo;
pub use tropo::TroposphereModel;

pub(crate) mod iono;
pub use iono::{IonosphereModel, KbModel, ObliquityFactor};

mod environment;
pub use environment::{Meteo, WeatherSource};

/// Reason why a propagation delay could not be modeled
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UnavailableCause {
    /// Compensation is disabled by [crate::prelude::Modeling]
    Disabled,
    /// [WeatherSource] did not provide any conditions
    WeatherUnavailable,
    /// Some [Meteo] fields are missing
    IncompleteMeteo,
    /// No ionosphere broadcast parameters
    NoIonosphereModel,
    /// Model diverged (non finite value)
    Diverged,
}

impl std::fmt::Display for UnavailableCause {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Disabled => write!(f, "disabled"),
            Self::WeatherUnavailable => write!(f, "weather unavailable"),
            Self::IncompleteMeteo => write!(f, "incomplete meteo"),
            Self::NoIonosphereModel => write!(f, "no ionosphere model"),
            Self::Diverged => write!(f, "model diverged"),
        }
    }
}

/// Propagation delay correction, in meters of delay.
/// An unavailable correction is applied as zero, but remains detectable.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DelayCorrection {
    /// Modeled delay [m]
    Modeled(f64),
    /// Correction skipped
    Unavailable(UnavailableCause),
}

impl Default for DelayCorrection {
    fn default() -> Self {
        Self::Unavailable(UnavailableCause::Disabled)
    }
}

impl DelayCorrection {
    /// Delay [m] to subtract from the pseudo range (0 when unavailable)
    pub fn value_m(&self) -> f64 {
        match self {
            Self::Modeled(delay_m) => *delay_m,
            Self::Unavailable(_) => 0.0,
        }
    }

    /// True when this correction was skipped
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }

    /// Rejects non finite delays
    pub(crate) fn finite(self) -> Self {
        match self {
            Self::Modeled(delay_m) if !delay_m.is_finite() => {
                Self::Unavailable(UnavailableCause::Diverged)
            },
            other => other,
        }
    }
}

/// [BiasRuntime] describes the ongoing conditions, for one satellite.
#[derive(Debug, Copy, Clone)]
pub struct BiasRuntime {
    /// [Epoch]
    pub t: Epoch,
    /// [SV]
    pub sv: SV,
    /// [Carrier] of the pseudo range
    pub carrier: Carrier,
    /// Satellite elevation [°]
    pub elevation_deg: f64,
    /// Satellite azimuth [°]
    pub azimuth_deg: f64,
    /// Receiver coordinates
    pub rx_geodetic: GeodeticPosition,
}

/// Corrections applied to one satellite during the refinement pass
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SatelliteCorrections {
    /// [SV]
    pub sv: SV,
    /// Elevation [°] from the coarse position
    pub elevation_deg: f64,
    /// Azimuth [°] from the coarse position
    pub azimuth_deg: f64,
    /// Troposphere [DelayCorrection]
    pub tropo: DelayCorrection,
    /// Ionosphere [DelayCorrection]
    pub iono: DelayCorrection,
}

impl SatelliteCorrections {
    /// Total delay [m] subtracted from the pseudo range
    pub fn total_m(&self) -> f64 {
        self.tropo.value_m() + self.iono.value_m()
    }

    /// Number of corrections that were skipped (0, 1 or 2)
    pub fn skipped(&self) -> usize {
        self.tropo.is_skipped() as usize + self.iono.is_skipped() as usize
    }
}
