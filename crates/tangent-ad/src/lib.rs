//! # tangent-ad
//!
//! Drop-in scalar types for generic numeric code.
//!
//! Provides:
//! - **Forward-mode AD** via [`dual::Dual`] numbers carrying `N` tangent lanes
//! - A transparent value wrapper [`real::Real`], bit-identical to its base float
//! - The C math library as methods ([`elementary::Elementary`]) and as free
//!   functions ([`math`]), with chain-rule derivatives on `Dual`
//! - [`limits::NumericLimits`] constants that generic algorithms read their
//!   tolerances from
//! - [`Scalar`] trait for writing generic code over `f32`, `f64`, `Real` and `Dual`
//!
//! Both wrappers also implement `num_traits::Float`, so existing
//! `num-traits`-generic code accepts them unchanged.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod base;
pub mod dual;
pub mod elementary;
pub mod limits;
pub mod math;
pub mod num;
pub mod real;
pub mod scalar;

pub use base::Base;
pub use dual::Dual;
pub use elementary::Elementary;
pub use limits::NumericLimits;
pub use real::Real;
pub use scalar::Scalar;

/// Dual number over `f64` with `N` derivative lanes.
pub type Dual64<const N: usize> = Dual<f64, N>;

/// Dual number over `f32` with `N` derivative lanes.
pub type Dual32<const N: usize> = Dual<f32, N>;

/// Value wrapper over `f64`.
pub type Real64 = Real<f64>;

/// Value wrapper over `f32`.
pub type Real32 = Real<f32>;
