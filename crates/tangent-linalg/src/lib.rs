//! # tangent-linalg
//!
//! Dense linear algebra written once over [`tangent_ad::Scalar`].
//!
//! Matrices are plain `nalgebra::DMatrix<S>`. With `S = f64` the routines are
//! ordinary solvers; with `S = Dual<f64, N>` every result carries its
//! derivatives with respect to the `N` seeded inputs, and with `S = Real<f64>`
//! results are bit-identical to the `f64` run.
//!
//! - [`Lu`]: partial-pivoting LU (solve, determinant, inverse)
//! - [`ColPivQr`]: column-pivoting Householder QR (rank, least squares)
//! - [`Eigen`]: real eigen-decomposition of a general square matrix
//!
//! Every pivot, sign and convergence decision looks at values only, so the
//! derivative of each result is the derivative of one fixed sequence of
//! arithmetic operations.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod eigen;
pub mod lu;
pub mod qr;

pub use eigen::{Eigen, EigenConfig};
pub use lu::Lu;
pub use qr::ColPivQr;

use nalgebra::{DMatrix, DVector};
use num_traits::{Float, Zero};
use tangent_ad::Scalar;
use tangent_core::Result;

/// Solve the square system `a x = b` by partial-pivoting LU.
pub fn solve<S: Scalar>(a: DMatrix<S>, b: &DVector<S>) -> Result<DVector<S>> {
    Lu::new(a)?.solve(b)
}

/// Largest absolute entry (by value), or zero for an empty matrix.
pub(crate) fn max_abs<S: Scalar>(m: &DMatrix<S>) -> S::Base {
    m.iter().fold(S::Base::zero(), |acc, x| acc.max(x.value().abs()))
}
