//! Fracture chains and their growth engine.
//!
//! A [`Fracture`] is an ordered chain of [`Break`] elements representing one
//! physical crack. Growth is quasi-static: at every step the coupled
//! influence system of all current elements is assembled and solved from
//! scratch by dense LU, interpenetrating elements are clamped (arrest), and
//! both tips are extended by one element along the kinked direction given by
//! the local mode mixity. The re-solve-from-scratch policy is deliberate:
//! each step costs on the order of the cube of the current element count.

use crate::element::{Break, Elasticity};
use crate::error::Error;
use crate::field::Field;
use crate::solver;
use log::{debug, info};
use nalgebra::{DMatrix, DVector, Point2};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::f64::consts::FRAC_PI_2;

/// How the driving fluid pressure loads the elements of a fracture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum PressureLaw {
    /// Every element carries the full pressure as a normal traction.
    #[default]
    Uniform,
}

/// Seed geometry and growth parameters of a single fracture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FractureConfig {
    /// Center of the seed element.
    pub seed_x: f64,
    pub seed_y: f64,
    /// Orientation of the seed element against the global x-axis.
    pub seed_beta: f64,
    /// Half-length of every element; extension is fixed-length.
    pub half_length: f64,
    /// Number of solve-then-extend cycles to run. Each cycle appends one
    /// element at both tips, so a completed fracture has
    /// `2 * growth_steps + 1` elements.
    pub growth_steps: usize,
    /// Fluid pressure driving the fracture open.
    pub pressure: f64,
    pub pressure_law: PressureLaw,
}

/// Observable state of a fracture's growth state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrowthStatus {
    /// Only the seed element exists and nothing has been solved.
    Seeded,
    /// Some growth steps have run but neither terminal state is reached.
    Growing,
    /// The target number of growth steps was reached.
    Complete,
    /// A solved normal discontinuity was non-negative; the crack cannot open
    /// further and growth has stopped. Solved element data is retained.
    Arrested,
}

/// An ordered chain of boundary elements forming one crack.
///
/// The front of the chain is the most negative element index, the back the
/// most positive; elements are only ever inserted at the two ends.
#[derive(Debug, Clone)]
pub struct Fracture {
    breaks: VecDeque<Break>,
    elasticity: Elasticity,
    half_length: f64,
    growth_steps: usize,
    pressure: f64,
    pressure_law: PressureLaw,
    /// Completed solve-then-extend cycles, starting at 1 for the seed.
    realized: usize,
    arrested: bool,
}

impl Fracture {
    /// Seeds a fracture with a single element at the configured position.
    pub fn new(config: &FractureConfig, elasticity: Elasticity) -> Self {
        let (sigma_s, sigma_n) = boundary_tractions(config.pressure, config.pressure_law);
        let seed = Break::new(
            0,
            config.half_length,
            config.seed_x,
            config.seed_y,
            config.seed_beta,
            elasticity,
            sigma_s,
            sigma_n,
        );
        let mut breaks = VecDeque::new();
        breaks.push_back(seed);
        Self {
            breaks,
            elasticity,
            half_length: config.half_length,
            growth_steps: config.growth_steps,
            pressure: config.pressure,
            pressure_law: config.pressure_law,
            realized: 1,
            arrested: false,
        }
    }

    /// Superposed field of every element of this fracture at a global point.
    pub fn induced_field_at(&self, x: f64, y: f64) -> Field {
        let mut field = Field::zero();
        for brk in &self.breaks {
            field += brk.induced_field_at(x, y);
        }
        field
    }

    /// Runs the growth engine to a terminal state.
    ///
    /// `ambient` must return the superposed field of the background load and
    /// of all fractures processed before this one, at an arbitrary point. It
    /// is captured once per element, when the element is created (for the
    /// seed: when growth starts), and enters the boundary conditions through
    /// [`Break::rhs`].
    ///
    /// Each cycle assembles and solves the `2(2k - 1)`-square influence
    /// system (`k` = realized cycles), clamps any interpenetrating element
    /// and flags arrest, then extends both tips by the kink-angle rule. On
    /// arrest the loop stops before extending: no further growth occurs, but
    /// everything already solved is retained.
    pub fn grow<F>(&mut self, ambient: F) -> Result<GrowthStatus, Error>
    where
        F: Fn(f64, f64) -> Field,
    {
        if self.arrested || self.realized > self.growth_steps {
            return Ok(self.status());
        }
        if let Some(front) = self.breaks.front_mut() {
            let field = ambient(front.cx(), front.cy());
            front.set_external_field(field);
        }

        while self.realized <= self.growth_steps && !self.arrested {
            self.solve_current()?;
            if self.arrested {
                info!(
                    "fracture arrested after {} growth cycle(s), {} element(s) retained",
                    self.realized,
                    self.breaks.len()
                );
                break;
            }
            self.extend_tips(&ambient)?;
            self.realized += 1;
        }
        Ok(self.status())
    }

    /// Assembles and solves the influence system for the current chain, then
    /// assigns the solved discontinuities. Any element with a non-negative
    /// normal discontinuity is clamped to zero opening and arrests the whole
    /// fracture; the remaining assignments of the step still complete.
    fn solve_current(&mut self) -> Result<(), Error> {
        let (a, b) = self.assemble();
        debug!(
            "solving {}x{} influence system for {} element(s)",
            a.nrows(),
            a.ncols(),
            self.breaks.len()
        );
        let x = solver::solve_dense(a, b)?;
        for (i, brk) in self.breaks.iter_mut().enumerate() {
            let ds = x[2 * i];
            let mut dn = x[2 * i + 1];
            if dn > 0.0 {
                dn = 0.0;
                self.arrested = true;
            }
            brk.set_discontinuities(ds, dn);
        }
        Ok(())
    }

    /// Builds the dense system: one 2x2 block per (receiver, source) element
    /// pair, one 2-entry right-hand side per receiver.
    fn assemble(&self) -> (DMatrix<f64>, DVector<f64>) {
        let n = 2 * self.breaks.len();
        let mut a = DMatrix::zeros(n, n);
        let mut b = DVector::zeros(n);
        for (i, receiver) in self.breaks.iter().enumerate() {
            for (j, source) in self.breaks.iter().enumerate() {
                let block = source.influence_on(receiver);
                a.fixed_view_mut::<2, 2>(2 * i, 2 * j).copy_from(&block);
            }
            b.fixed_rows_mut::<2>(2 * i).copy_from(&receiver.rhs());
        }
        (a, b)
    }

    /// Appends one element at each tip along the kinked direction.
    ///
    /// The new center sits one half-length along each of the old and new tip
    /// directions (the bisector construction keeps adjacent element ends
    /// coincident); the front tip extends in the negative direction, the
    /// back tip in the positive one.
    fn extend_tips<F>(&mut self, ambient: &F) -> Result<(), Error>
    where
        F: Fn(f64, f64) -> Field,
    {
        let h = self.half_length;
        let index = self.realized as i32;
        let (sigma_s, sigma_n) = boundary_tractions(self.pressure, self.pressure_law);

        for backward in [true, false] {
            let tip = if backward {
                self.breaks.front()
            } else {
                self.breaks.back()
            }
            .expect("fracture always holds at least its seed element");

            let kink = kink_angle(-tip.dn(), -tip.ds())?;
            let beta_new = tip.beta() + kink;
            let sign = if backward { -1.0 } else { 1.0 };
            let x = tip.cx() + sign * h * (beta_new.cos() + tip.beta().cos());
            let y = tip.cy() + sign * h * (beta_new.sin() + tip.beta().sin());

            let mut brk = Break::new(
                if backward { -index } else { index },
                h,
                x,
                y,
                beta_new,
                self.elasticity,
                sigma_s,
                sigma_n,
            );
            brk.set_external_field(ambient(x, y));
            if backward {
                self.breaks.push_front(brk);
            } else {
                self.breaks.push_back(brk);
            }
        }
        Ok(())
    }

    pub fn status(&self) -> GrowthStatus {
        if self.arrested {
            GrowthStatus::Arrested
        } else if self.realized > self.growth_steps {
            GrowthStatus::Complete
        } else if self.realized == 1 {
            GrowthStatus::Seeded
        } else {
            GrowthStatus::Growing
        }
    }

    pub fn is_arrested(&self) -> bool {
        self.arrested
    }

    /// Elements in chain order, from the most negative index to the most
    /// positive.
    pub fn breaks(&self) -> impl Iterator<Item = &Break> {
        self.breaks.iter()
    }

    pub fn num_elements(&self) -> usize {
        self.breaks.len()
    }

    /// Ordered element centers, the polyline a renderer draws for the crack
    /// path.
    pub fn element_centers(&self) -> Vec<Point2<f64>> {
        self.breaks.iter().map(|brk| brk.center()).collect()
    }
}

/// Direction change of a growing tip from its local mode mixity, with
/// `K1 = -dn` and `K2 = -ds` of the tip element as mode-I/II proxies.
///
/// The maximum-circumferential-stress kink angle is
/// `2 atan(-2 K2 / (K1 + sqrt(K1^2 + 8 K2^2)))`. A zero denominator with
/// nonzero `K2` resolves to `-pi/2`; zero over zero only arises for an
/// arrested tip (`K1 <= 0`, `K2 = 0`), which must never be asked for a live
/// growth direction, and is reported as [`Error::DegenerateKinkGeometry`].
pub fn kink_angle(k1: f64, k2: f64) -> Result<f64, Error> {
    let denominator = k1 + (k1 * k1 + 8.0 * k2 * k2).sqrt();
    if denominator == 0.0 {
        if k2 != 0.0 {
            Ok(-FRAC_PI_2)
        } else {
            Err(Error::DegenerateKinkGeometry)
        }
    } else {
        Ok(2.0 * (-2.0 * k2 / denominator).atan())
    }
}

fn boundary_tractions(pressure: f64, law: PressureLaw) -> (f64, f64) {
    match law {
        PressureLaw::Uniform => (0.0, -pressure),
    }
}
