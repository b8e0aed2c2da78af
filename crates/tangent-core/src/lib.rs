//! # tangent-core
//!
//! Shared error and result types for the tangent workspace.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;

pub use error::{Error, Result};
