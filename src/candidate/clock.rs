use std::cmp::Ordering;

use itertools::Itertools;
use log::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::prelude::{Epoch, Error, SV};

/// Broadcast satellite clock parameters, as published by the navigation message.
/// The polynomial is valid from its reference [Epoch] onwards.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClockParameters {
    /// [SV] this entry applies to
    pub sv: SV,
    /// Reference [Epoch] of the polynomial (time of clock)
    pub epoch: Epoch,
    /// Clock bias [s]. Missing in incomplete broadcast records.
    pub bias: Option<f64>,
    /// Clock drift [s/s]
    pub drift: f64,
    /// Clock drift rate [s/s²]
    pub drift_rate: f64,
}

impl ClockParameters {
    /// Builds new [ClockParameters] from (Clock bias [s],
    /// Clock drift [s/s] and Clock drift rate [s/s²]).
    pub fn new(sv: SV, epoch: Epoch, bias: f64, drift: f64, drift_rate: f64) -> Self {
        Self {
            sv,
            epoch,
            bias: Some(bias),
            drift,
            drift_rate,
        }
    }

    /// Builds new [ClockParameters] from coefficients expressed in microseconds
    /// (Clock bias [µs], drift [µs/s], drift rate [µs/s²]),
    /// as precise orbit products report them.
    pub fn from_microseconds(
        sv: SV,
        epoch: Epoch,
        bias_us: f64,
        drift_us: f64,
        drift_rate_us: f64,
    ) -> Self {
        Self::new(
            sv,
            epoch,
            bias_us * 1.0E-6,
            drift_us * 1.0E-6,
            drift_rate_us * 1.0E-6,
        )
    }

    /// Builds [ClockParameters] for which the bias is missing.
    /// They are never selected.
    pub fn incomplete(sv: SV, epoch: Epoch) -> Self {
        Self {
            sv,
            epoch,
            bias: None,
            drift: 0.0,
            drift_rate: 0.0,
        }
    }
}

/// Satellite [ClockCorrection], resolved for one specific epoch.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClockCorrection {
    /// Reference [Epoch] of the selected polynomial
    pub epoch: Epoch,
    /// Clock bias [s]
    pub bias: f64,
    /// Clock drift [s/s]
    pub drift: f64,
    /// Clock drift rate [s/s²]
    pub drift_rate: f64,
}

impl ClockCorrection {
    /// Selects the [ClockCorrection] that applies to `sv` at `t`:
    /// the latest entry whose reference epoch is anterior or equal to `t`,
    /// with a valid clock bias.
    /// ## Input
    /// - sv: [SV] to resolve
    /// - t: query [Epoch]
    /// - entries: broadcast [ClockParameters], in any order, possibly
    ///   describing other satellites
    /// ## Output
    /// - [ClockCorrection] or [Error::ClockCorrectionNotFound]: the caller
    ///   should drop this [SV] from this epoch.
    pub fn resolve(sv: SV, t: Epoch, entries: &[ClockParameters]) -> Result<Self, Error> {
        let selected = entries
            .iter()
            .filter(|entry| entry.sv == sv)
            .sorted_by(|a, b| b.epoch.partial_cmp(&a.epoch).unwrap_or(Ordering::Equal))
            .find_map(|entry| {
                if entry.epoch > t {
                    return None;
                }
                let bias = entry.bias?;
                Some(Self {
                    epoch: entry.epoch,
                    bias,
                    drift: entry.drift,
                    drift_rate: entry.drift_rate,
                })
            })
            .ok_or(Error::ClockCorrectionNotFound(sv, t))?;

        debug!(
            "{}({}): clock correction from {} (bias={:.6E}s)",
            t, sv, selected.epoch, selected.bias
        );

        Ok(selected)
    }

    /// Total clock offset [s] at `t`
    pub fn offset_s(&self, t: Epoch) -> f64 {
        let dt = (t - self.epoch).to_seconds();
        self.bias + self.drift * dt + self.drift_rate * dt.powi(2)
    }

    /// Corrects a raw pseudo range [m] observed at `t`
    pub fn correct_pseudo_range(&self, t: Epoch, pseudo_range_m: f64, c_m_s: f64) -> f64 {
        pseudo_range_m - c_m_s * self.offset_s(t)
    }
}
