//! A layer of rock holding an ordered collection of fractures.
//!
//! Fractures are processed strictly in insertion order: each one grows
//! against the superposed field of the background load and of the fractures
//! processed *before* it, and never sees the fractures processed after it.
//! This one-directional coupling is the model, not an approximation of a
//! global fixed point.

use crate::element::Elasticity;
use crate::error::Error;
use crate::field::Field;
use crate::fracture::{Fracture, FractureConfig, GrowthStatus};
use itertools::iproduct;
use nalgebra::{DMatrix, Point2};
use serde::{Deserialize, Serialize};

/// Rectangular plotting domain sampled by the grid accessors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DomainBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Default for DomainBounds {
    fn default() -> Self {
        Self {
            x_min: -22.0,
            x_max: 22.0,
            y_min: -22.0,
            y_max: 22.0,
        }
    }
}

/// A regular grid of scalar samples over the domain.
///
/// `values[(j, i)]` is the sample at `(xs[i], ys[j])`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarGrid {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
    pub values: DMatrix<f64>,
}

/// One principal-stress-direction glyph for the vector-field plot.
///
/// The direction is axial, so the sampler emits every node twice, once per
/// signed direction; the magnitude is the maximum principal stress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphSample {
    pub x: f64,
    pub y: f64,
    pub dx: f64,
    pub dy: f64,
}

/// An elastic layer with a shared remote stress state and an ordered
/// collection of fractures.
#[derive(Debug, Clone)]
pub struct Stratum {
    fractures: Vec<Fracture>,
    elasticity: Elasticity,
    background: Field,
    domain: DomainBounds,
}

impl Stratum {
    pub fn new(elasticity: Elasticity) -> Self {
        Self {
            fractures: Vec::new(),
            elasticity,
            background: Field::zero(),
            domain: DomainBounds::default(),
        }
    }

    /// Sets the remote stress applied as background loading to every
    /// fracture and to every sampled field point.
    pub fn set_background_stress(&mut self, sxx: f64, sxy: f64, syy: f64) {
        self.background = Field::from_stress(sxx, sxy, syy);
    }

    pub fn set_domain(&mut self, domain: DomainBounds) {
        self.domain = domain;
    }

    pub fn domain(&self) -> DomainBounds {
        self.domain
    }

    pub fn elasticity(&self) -> Elasticity {
        self.elasticity
    }

    /// Adds a fracture; its seed element is created immediately.
    pub fn add_fracture(&mut self, config: &FractureConfig) {
        self.fractures.push(Fracture::new(config, self.elasticity));
    }

    pub fn fractures(&self) -> &[Fracture] {
        &self.fractures
    }

    /// Grows every fracture in insertion order. Fracture `i` sees the
    /// background stress plus the finished fields of fractures `0..i`.
    ///
    /// Returns the terminal status of each fracture; arrest is a normal
    /// outcome, not an error.
    pub fn calculate(&mut self) -> Result<Vec<GrowthStatus>, Error> {
        let background = self.background;
        let mut statuses = Vec::with_capacity(self.fractures.len());
        for i in 0..self.fractures.len() {
            let (prior, rest) = self.fractures.split_at_mut(i);
            let prior = &*prior;
            let status = rest[0].grow(|x, y| {
                let mut field = background;
                for fracture in prior {
                    field += fracture.induced_field_at(x, y);
                }
                field
            })?;
            statuses.push(status);
        }
        Ok(statuses)
    }

    /// Background stress superposed with every fracture's induced field at a
    /// global point.
    pub fn field_at(&self, x: f64, y: f64) -> Field {
        let mut field = self.background;
        for fracture in &self.fractures {
            field += fracture.induced_field_at(x, y);
        }
        field
    }

    /// Ordered element centers per fracture, the crack-path polylines.
    pub fn fracture_paths(&self) -> Vec<Vec<Point2<f64>>> {
        self.fractures.iter().map(|f| f.element_centers()).collect()
    }

    /// Samples the field trace on a `resolution x resolution` grid over the
    /// domain, normalized so the maximum absolute sample is 0.9 (the heatmap
    /// headroom the renderer expects). An all-zero grid is left unscaled.
    pub fn trace_grid(&self, resolution: usize) -> ScalarGrid {
        let (xs, ys) = self.grid_coordinates(resolution);
        let mut values = DMatrix::zeros(resolution, resolution);
        let mut max_abs: f64 = 0.0;
        for (i, j) in iproduct!(0..resolution, 0..resolution) {
            let trace = self.field_at(xs[i], ys[j]).trace();
            max_abs = max_abs.max(trace.abs());
            values[(j, i)] = trace;
        }
        if max_abs > 0.0 {
            values /= max_abs / 0.9;
        }
        ScalarGrid { xs, ys, values }
    }

    /// Samples the direction of maximum tensile stress on a grid, scaled by
    /// the maximum principal stress and emitted in both signed directions.
    ///
    /// Nodes where the direction is undefined under the model's convention
    /// (vanishing shear and principal-stress excess, see
    /// [`Field::direction_of_max_tensile_stress`]) produce no glyph.
    pub fn principal_direction_samples(&self, resolution: usize) -> Vec<GlyphSample> {
        let (xs, ys) = self.grid_coordinates(resolution);
        let mut samples = Vec::new();
        for (i, j) in iproduct!(0..resolution, 0..resolution) {
            let field = self.field_at(xs[i], ys[j]);
            let angle = match field.direction_of_max_tensile_stress() {
                Ok(angle) => angle,
                Err(_) => continue,
            };
            let magnitude = field.max_principal_stress();
            let (sin, cos) = angle.sin_cos();
            let (dx, dy) = (magnitude * cos, magnitude * sin);
            samples.push(GlyphSample {
                x: xs[i],
                y: ys[j],
                dx,
                dy,
            });
            samples.push(GlyphSample {
                x: xs[i],
                y: ys[j],
                dx: -dx,
                dy: -dy,
            });
        }
        samples
    }

    fn grid_coordinates(&self, resolution: usize) -> (Vec<f64>, Vec<f64>) {
        let d = self.domain;
        let n = resolution as f64;
        let xs = (0..resolution)
            .map(|i| d.x_min + (d.x_max - d.x_min) * i as f64 / n)
            .collect();
        let ys = (0..resolution)
            .map(|j| d.y_min + (d.y_max - d.y_min) * j as f64 / n)
            .collect();
        (xs, ys)
    }
}
