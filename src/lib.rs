//! Quasi-static growth of fluid-pressurized fractures in an elastic rock
//! layer, computed with the 2-D displacement-discontinuity boundary-element
//! method.
//!
//! A [`Stratum`] holds a set of [`Fracture`]s in one elastic medium under a
//! remote background stress. Each fracture is an ordered chain of straight
//! constant-displacement-discontinuity elements ([`Break`]); growth proceeds
//! by repeatedly solving the dense elastic-influence system over the current
//! chain, checking for arrest, and extending both tips along the direction
//! given by the mixed-mode kink-angle criterion. Fractures are processed in a
//! fixed order and each one grows in the superposed field of those processed
//! before it.
//!
//! The crate computes geometry and fields only; rendering is left to an
//! external 2-D backend fed by the sampling accessors on [`Stratum`].

pub mod element;
pub mod error;
pub mod field;
pub mod fracture;
pub mod solver;
pub mod stratum;

pub use crate::element::{Break, Elasticity};
pub use crate::error::Error;
pub use crate::field::Field;
pub use crate::fracture::{Fracture, FractureConfig, GrowthStatus, PressureLaw};
pub use crate::stratum::{DomainBounds, GlyphSample, ScalarGrid, Stratum};

pub extern crate nalgebra;
