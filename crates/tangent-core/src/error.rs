//! Error types for tangent

use thiserror::Error;

/// tangent error type
///
/// Scalar arithmetic never produces one of these: invalid math surfaces as
/// NaN/Inf in the value or tangent. Only text parsing and the matrix routines
/// are fallible.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Malformed diagnostic text
    #[error("Parse error: {0}")]
    Parse(String),

    /// Operand shapes do not agree
    #[error("Dimension mismatch: expected {expected}, found {found}")]
    Dimension {
        /// Shape the operation required
        expected: String,
        /// Shape that was supplied
        found: String,
    },

    /// Matrix is singular (or rank deficient) to working precision
    #[error("Singular matrix: {0}")]
    Singular(String),

    /// Computation error
    #[error("Computation error: {0}")]
    Computation(String),

    /// Iterative algorithm hit its iteration cap
    #[error("Did not converge after {iterations} iterations")]
    NotConverged {
        /// Iterations performed before giving up
        iterations: usize,
    },

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl Error {
    /// Shorthand for a [`Error::Dimension`] built from two displayable shapes.
    pub fn dimension(expected: impl ToString, found: impl ToString) -> Self {
        Error::Dimension { expected: expected.to_string(), found: found.to_string() }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
