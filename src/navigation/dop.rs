use nalgebra::{Matrix3, Matrix4};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    frames::neu_covariance,
    navigation::GeometryMatrix,
    prelude::{Error, GeodeticPosition},
};

/// [DilutionOfPrecision] of a [GeometryMatrix]
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DilutionOfPrecision {
    /// Geometric DOP
    pub gdop: f64,

    /// Position DOP
    pub pdop: f64,

    /// Temporal DOP
    pub tdop: f64,

    /// (GᵗG)⁻¹
    q: Matrix4<f64>,
}

impl DilutionOfPrecision {
    /// Creates new [DilutionOfPrecision].
    /// Fails with [Error::SingularGeometry] when (GᵗG) cannot be inverted:
    /// we never return infinite DOPs.
    pub fn new(g: &GeometryMatrix) -> Result<Self, Error> {
        let q = g.covariance()?;
        Ok(Self {
            gdop: q.trace().sqrt(),
            pdop: (q[(0, 0)] + q[(1, 1)] + q[(2, 2)]).sqrt(),
            tdop: q[(3, 3)].sqrt(),
            q,
        })
    }

    fn q_3x3(&self) -> Matrix3<f64> {
        self.q.fixed_view::<3, 3>(0, 0).into_owned()
    }

    /// Position block expressed in the local NEU frame of `reference`
    fn q_neu(&self, reference: &GeodeticPosition) -> Matrix3<f64> {
        neu_covariance(&self.q_3x3(), reference)
    }

    /// Horizontal DOP at this reference point
    pub fn hdop(&self, reference: &GeodeticPosition) -> f64 {
        let q = self.q_neu(reference);
        (q[(0, 0)] + q[(1, 1)]).sqrt()
    }

    /// Vertical DOP at this reference point
    pub fn vdop(&self, reference: &GeodeticPosition) -> f64 {
        self.q_neu(reference)[(2, 2)].sqrt()
    }
}

/// Returns the GDOP of this [GeometryMatrix]
pub fn gdop(g: &GeometryMatrix) -> Result<f64, Error> {
    Ok(DilutionOfPrecision::new(g)?.gdop)
}

/// Returns the PDOP of this [GeometryMatrix]
pub fn pdop(g: &GeometryMatrix) -> Result<f64, Error> {
    Ok(DilutionOfPrecision::new(g)?.pdop)
}
