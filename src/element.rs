//! Constant displacement-discontinuity boundary elements.
//!
//! A fracture is discretized into straight elements ("breaks") that each carry
//! an unknown shear and normal displacement discontinuity over their length.
//! The closed-form plane-strain solution for a constant discontinuity on a
//! finite segment (Crouch & Starfield) links one element's unknowns to the
//! field it induces anywhere in the layer, and in particular to the tractions
//! it induces at the centers of the other elements.

use crate::field::Field;
use nalgebra::{Matrix2, Point2, Vector2};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Elastic constants shared by every element of a stratum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Elasticity {
    /// Shear modulus G of the rock.
    pub shear_modulus: f64,
    /// Poisson ratio nu of the rock.
    pub poisson_ratio: f64,
}

/// A single straight boundary element of a fracture.
///
/// Geometry (half-length, center, orientation) is fixed at construction; the
/// discontinuities `(ds, dn)` are reassigned every time the owning fracture
/// re-solves its influence system. The sign convention is that of the kernel:
/// an *opening* crack has negative `dn`, so a positive solved `dn` means
/// interpenetration and triggers arrest.
#[derive(Debug, Clone, PartialEq)]
pub struct Break {
    index: i32,
    half_length: f64,
    cx: f64,
    cy: f64,
    beta: f64,
    elasticity: Elasticity,
    sigma_s: f64,
    sigma_n: f64,
    ds: f64,
    dn: f64,
    external: Field,
}

impl Break {
    /// Creates an element with zero discontinuities and no external field.
    ///
    /// `sigma_s` and `sigma_n` are the imposed boundary tractions in the
    /// element's own frame; a fluid pressure `p` on the crack faces imposes
    /// `sigma_n = -p` and `sigma_s = 0`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        index: i32,
        half_length: f64,
        cx: f64,
        cy: f64,
        beta: f64,
        elasticity: Elasticity,
        sigma_s: f64,
        sigma_n: f64,
    ) -> Self {
        Self {
            index,
            half_length,
            cx,
            cy,
            beta,
            elasticity,
            sigma_s,
            sigma_n,
            ds: 0.0,
            dn: 0.0,
            external: Field::zero(),
        }
    }

    /// Signed ordinal along the chain: 0 is the seed, negative indices grow
    /// one tip and positive indices the other.
    pub fn index(&self) -> i32 {
        self.index
    }

    pub fn half_length(&self) -> f64 {
        self.half_length
    }

    pub fn center(&self) -> Point2<f64> {
        Point2::new(self.cx, self.cy)
    }

    pub fn cx(&self) -> f64 {
        self.cx
    }

    pub fn cy(&self) -> f64 {
        self.cy
    }

    /// Orientation angle of the element against the global x-axis.
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Solved shear displacement discontinuity.
    pub fn ds(&self) -> f64 {
        self.ds
    }

    /// Solved normal displacement discontinuity (opening is negative).
    pub fn dn(&self) -> f64 {
        self.dn
    }

    /// Assigns the solved discontinuities. Called by the owning fracture
    /// after every re-solve of the influence system.
    pub fn set_discontinuities(&mut self, ds: f64, dn: f64) {
        self.ds = ds;
        self.dn = dn;
    }

    /// Stores the superposed field of the background load and of all
    /// fractures processed before this element's fracture, evaluated at this
    /// element's center.
    pub fn set_external_field(&mut self, field: Field) {
        self.external = field;
    }

    pub fn external_field(&self) -> Field {
        self.external
    }

    /// Right-hand-side loading `(b_s, b_n)`: imposed boundary tractions minus
    /// the external field's shear/normal projection onto this element's frame.
    pub fn rhs(&self) -> Vector2<f64> {
        let ext = self.external.in_rotated_axes(self.beta);
        Vector2::new(self.sigma_s - ext.sxy, self.sigma_n - ext.syy)
    }

    /// The field this element induces at `(x, y)` (global frame) with its
    /// current discontinuities.
    pub fn induced_field_at(&self, x: f64, y: f64) -> Field {
        let (xl, yl) = self.to_local(x, y);
        self.kernel(xl, yl, self.ds, self.dn).in_rotated_axes(-self.beta)
    }

    /// The 2x2 influence block `[[a_ss, a_sn], [a_ns, a_nn]]` mapping this
    /// element's unit `(ds, dn)` to the shear/normal traction induced at
    /// `receiver`'s center, expressed in `receiver`'s frame.
    ///
    /// Self-influence is the `receiver == self` case of the same evaluation;
    /// the kernel has no symmetry that could be exploited here, so all four
    /// entries are computed.
    pub fn influence_on(&self, receiver: &Break) -> Matrix2<f64> {
        let (xl, yl) = self.to_local(receiver.cx, receiver.cy);
        let relative = receiver.beta - self.beta;
        let from_ds = self.kernel(xl, yl, 1.0, 0.0).in_rotated_axes(relative);
        let from_dn = self.kernel(xl, yl, 0.0, 1.0).in_rotated_axes(relative);
        Matrix2::new(from_ds.sxy, from_dn.sxy, from_ds.syy, from_dn.syy)
    }

    /// Transforms a global point into this element's frame (origin at the
    /// center, x-axis along the element).
    fn to_local(&self, x: f64, y: f64) -> (f64, f64) {
        let dx = x - self.cx;
        let dy = y - self.cy;
        let (sin, cos) = self.beta.sin_cos();
        (dx * cos + dy * sin, dy * cos - dx * sin)
    }

    /// Plane-strain field of constant discontinuities `(ds, dn)` over the
    /// segment `|x| <= a, y = 0`, evaluated at local `(x, y)` and expressed in
    /// the element's own frame.
    ///
    /// `f2..f7` are the derivatives of the Papkovitch potential of the
    /// constant displacement discontinuity; see Crouch & Starfield, eqs.
    /// (5.5.3)-(5.5.5). The `atan2` form of `f3` puts the displacement jump on
    /// the element itself rather than on an arbitrary branch cut.
    fn kernel(&self, x: f64, y: f64, ds: f64, dn: f64) -> Field {
        let a = self.half_length;
        let g = self.elasticity.shear_modulus;
        let nu = self.elasticity.poisson_ratio;
        let c = 1.0 / (4.0 * PI * (1.0 - nu));

        let xm = x - a;
        let xp = x + a;
        let r1s = xm * xm + y * y;
        let r2s = xp * xp + y * y;

        let f2 = c * 0.5 * (r1s.ln() - r2s.ln());
        let f3 = -c * (y.atan2(xm) - y.atan2(xp));
        let f4 = c * (y / r1s - y / r2s);
        let f5 = c * (xm / r1s - xp / r2s);
        let f6 = c * ((xm * xm - y * y) / (r1s * r1s) - (xp * xp - y * y) / (r2s * r2s));
        let f7 = 2.0 * c * y * (xm / (r1s * r1s) - xp / (r2s * r2s));

        let two_g = 2.0 * g;
        Field {
            ux: ds * (2.0 * (1.0 - nu) * f3 - y * f5) + dn * (-(1.0 - 2.0 * nu) * f2 - y * f4),
            uy: ds * ((1.0 - 2.0 * nu) * f2 - y * f4) + dn * (2.0 * (1.0 - nu) * f3 - y * f5),
            sxx: two_g * (ds * (2.0 * f4 + y * f6) + dn * (-f5 + y * f7)),
            syy: two_g * (ds * (-y * f6) + dn * (-f5 - y * f7)),
            sxy: two_g * (ds * (-f5 + y * f7) + dn * (-y * f6)),
        }
    }
}
