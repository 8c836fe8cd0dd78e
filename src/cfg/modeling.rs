#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

fn default_sv_clock() -> bool {
    true
}

fn default_iono_delay() -> bool {
    true
}

fn default_tropo_delay() -> bool {
    true
}

fn default_standard_atmosphere() -> bool {
    false
}

/// Corrections applied to the pseudo ranges, prior each solving pass
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Modeling {
    /// Compensate for onboard clock offset to system time (+/- 100km).
    /// Satellites without valid clock correction are then dropped.
    #[cfg_attr(feature = "serde", serde(default = "default_sv_clock"))]
    pub sv_clock_bias: bool,

    /// Compensate for troposphere negative impact (+/- 10m)
    #[cfg_attr(feature = "serde", serde(default = "default_tropo_delay"))]
    pub tropo_delay: bool,

    /// Compensate for ionosphere negative impact (+/- 10m).
    /// Requires broadcast [crate::prelude::KbModel] parameters.
    #[cfg_attr(feature = "serde", serde(default = "default_iono_delay"))]
    pub iono_delay: bool,

    /// Use the standard atmosphere of [crate::prelude::Constants]
    /// when the weather source has nothing to offer.
    /// Disabled by default: missing weather should be visible.
    #[cfg_attr(feature = "serde", serde(default = "default_standard_atmosphere"))]
    pub standard_atmosphere: bool,
}

impl Default for Modeling {
    fn default() -> Self {
        Self {
            sv_clock_bias: default_sv_clock(),
            tropo_delay: default_tropo_delay(),
            iono_delay: default_iono_delay(),
            standard_atmosphere: default_standard_atmosphere(),
        }
    }
}

impl Modeling {
    /// [Modeling] where no correction is applied: raw pseudo ranges
    /// are handed to both passes, which then produce the same solution.
    /// Satellites are no longer dropped for lack of clock parameters.
    pub fn no_modeling() -> Modeling {
        Modeling {
            sv_clock_bias: false,
            tropo_delay: false,
            iono_delay: false,
            standard_atmosphere: false,
        }
    }
}
