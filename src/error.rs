use std::fmt;
use std::fmt::{Display, Formatter};

/// Library-wide error type.
///
/// Arrest of a fracture is *not* an error; it is reported as
/// [`GrowthStatus::Arrested`](crate::fracture::GrowthStatus).
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// The direction of maximum tensile stress is undefined because both the
    /// shear component and the principal-stress excess vanish.
    UndefinedPrincipalDirection,
    /// The kink-angle rule was evaluated with a zero denominator and a zero
    /// mode-II term. This only happens for an arrested tip, which must never
    /// reach a live growth decision.
    DegenerateKinkGeometry,
    /// LU factorization of the assembled influence system failed.
    SingularSystem {
        /// Dimension of the square system that could not be factorized.
        size: usize,
    },
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::UndefinedPrincipalDirection => {
                write!(f, "Direction of maximum tensile stress is undefined (0/0)")
            }
            Self::DegenerateKinkGeometry => {
                write!(f, "Kink angle is undefined: zero denominator with zero mode-II term")
            }
            Self::SingularSystem { size } => {
                write!(f, "Failed to factorize singular {}x{} influence system", size, size)
            }
        }
    }
}

impl std::error::Error for Error {}
