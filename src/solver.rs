//! Dense direct solver boundary.

use crate::error::Error;
use nalgebra::{DMatrix, DVector};

/// Solves the square system `a x = b` by dense LU factorization.
///
/// A singular or non-invertible factorization is reported as
/// [`Error::SingularSystem`]; the solution is never left undefined.
///
/// # Panics
///
/// Debug builds panic if `a` is not square or `b` has mismatched length;
/// that is a programmer error at the assembly site, not a runtime condition.
pub fn solve_dense(a: DMatrix<f64>, b: DVector<f64>) -> Result<DVector<f64>, Error> {
    debug_assert_eq!(a.nrows(), a.ncols());
    debug_assert_eq!(a.nrows(), b.len());
    let size = a.nrows();
    a.lu().solve(&b).ok_or(Error::SingularSystem { size })
}
