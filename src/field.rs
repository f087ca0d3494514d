//! Local plane-strain field states.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;
use std::ops::{Add, AddAssign};

/// The stress tensor and displacement vector at a point of the layer.
///
/// A `Field` is a plain value: the only admissible transformations are
/// component-wise superposition (fields of separate sources add) and rigid
/// rotation of the coordinate axes. The stress tensor is symmetric, so a
/// single shear component `sxy` is stored.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Field {
    pub sxx: f64,
    pub sxy: f64,
    pub syy: f64,
    pub ux: f64,
    pub uy: f64,
}

impl Field {
    /// The zero field. Identity element of superposition.
    pub fn zero() -> Self {
        Self::default()
    }

    /// A pure stress state with no displacement, e.g. a remote background load.
    pub fn from_stress(sxx: f64, sxy: f64, syy: f64) -> Self {
        Self {
            sxx,
            sxy,
            syy,
            ux: 0.0,
            uy: 0.0,
        }
    }

    /// Zeroes all components in place.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Expresses the same physical state in axes rotated by `beta`.
    ///
    /// The displacement transforms as a vector and the stress as a rank-2
    /// tensor. `in_rotated_axes(beta)` followed by `in_rotated_axes(-beta)`
    /// reproduces the original state up to floating-point error.
    pub fn in_rotated_axes(&self, beta: f64) -> Field {
        let (sin, cos) = beta.sin_cos();
        let (sin2, cos2) = (2.0 * beta).sin_cos();
        Field {
            ux: self.ux * cos + self.uy * sin,
            uy: self.uy * cos - self.ux * sin,
            sxx: self.sxx * cos * cos + self.sxy * sin2 + self.syy * sin * sin,
            syy: self.syy * cos * cos - self.sxy * sin2 + self.sxx * sin * sin,
            sxy: (self.syy - self.sxx) * sin * cos + self.sxy * cos2,
        }
    }

    /// First stress invariant `sxx + syy`.
    pub fn trace(&self) -> f64 {
        self.sxx + self.syy
    }

    /// The larger eigenvalue of the 2x2 stress tensor.
    pub fn max_principal_stress(&self) -> f64 {
        let radius = ((self.sxx - self.syy).powi(2) + 4.0 * self.sxy.powi(2)).sqrt();
        (self.sxx + self.syy + radius) / 2.0
    }

    /// Angle of the most tensile principal axis, measured from the x-axis.
    ///
    /// Solves `tan(theta) = (smax - sxx) / sxy`, with the convention that a
    /// vanishing `sxy` gives `+pi/2` for a positive numerator and `-pi/2` for
    /// a negative one. If numerator and denominator both vanish the direction
    /// is undefined and [`Error::UndefinedPrincipalDirection`] is returned.
    pub fn direction_of_max_tensile_stress(&self) -> Result<f64, Error> {
        guarded_atan(self.max_principal_stress() - self.sxx, self.sxy)
    }
}

fn guarded_atan(a: f64, b: f64) -> Result<f64, Error> {
    if b == 0.0 {
        if a > 0.0 {
            Ok(FRAC_PI_2)
        } else if a < 0.0 {
            Ok(-FRAC_PI_2)
        } else {
            Err(Error::UndefinedPrincipalDirection)
        }
    } else {
        Ok((a / b).atan())
    }
}

impl AddAssign for Field {
    fn add_assign(&mut self, other: Field) {
        self.sxx += other.sxx;
        self.sxy += other.sxy;
        self.syy += other.syy;
        self.ux += other.ux;
        self.uy += other.uy;
    }
}

impl Add for Field {
    type Output = Field;

    fn add(mut self, other: Field) -> Field {
        self += other;
        self
    }
}
