//! Signal channel of the pseudo range observations
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::prelude::Error;

/// L1 frequency (Hz), to which the broadcast ionosphere model refers
pub(crate) const L1_FREQUENCY_HZ: f64 = 1575.42E6;

/// [Carrier] frequency the pseudo range was tracked on.
/// Several code channels may share one [Carrier] (C2 and P2 on L2 for example):
/// those are solved in separate batches.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Eq, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Carrier {
    /// L1 (GPS/QZSS/SBAS), same frequency as E1
    #[default]
    L1,
    /// L2 (GPS/QZSS)
    L2,
    /// L5 (GPS/QZSS/SBAS), same frequency as E5A
    L5,
    /// E1 (Galileo)
    E1,
    /// E5A (Galileo)
    E5A,
    /// E5B (Galileo)
    E5B,
}

impl std::fmt::Display for Carrier {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::L1 => write!(f, "L1"),
            Self::L2 => write!(f, "L2"),
            Self::L5 => write!(f, "L5"),
            Self::E1 => write!(f, "E1"),
            Self::E5A => write!(f, "E5A"),
            Self::E5B => write!(f, "E5B"),
        }
    }
}

impl std::str::FromStr for Carrier {
    type Err = Error;

    /// Parses a [Carrier] from its name, or from a GPS RINEX
    /// pseudo range code ("C1", "P2", "C5"..).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let c = s.trim().to_uppercase();
        match c.as_str() {
            "L1" | "C1" | "P1" | "C1C" | "C1P" | "C1W" => Ok(Self::L1),
            "L2" | "C2" | "P2" | "C2C" | "C2L" | "C2W" => Ok(Self::L2),
            "L5" | "C5" | "C5I" | "C5Q" | "C5X" => Ok(Self::L5),
            "E1" => Ok(Self::E1),
            "E5A" => Ok(Self::E5A),
            "E5B" => Ok(Self::E5B),
            _ => Err(Error::UnknownCarrier(s.trim().to_string())),
        }
    }
}

impl Carrier {
    /// Carrier frequency (Hz)
    pub fn frequency_hz(&self) -> f64 {
        match self {
            Self::L1 | Self::E1 => L1_FREQUENCY_HZ,
            Self::L2 => 1227.60E6,
            Self::L5 | Self::E5A => 1176.45E6,
            Self::E5B => 1207.14E6,
        }
    }

    /// Scaling of an L1 ionosphere delay to this [Carrier]: (f_L1/f)²
    pub fn iono_scaling(&self) -> f64 {
        (L1_FREQUENCY_HZ / self.frequency_hz()).powi(2)
    }
}
