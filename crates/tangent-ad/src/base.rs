//! Primitive floating-point types that can sit underneath [`Real`](crate::real::Real)
//! and [`Dual`](crate::dual::Dual).

use crate::elementary::Elementary;
use crate::limits::NumericLimits;
use num_traits::{Float, FloatConst, FromPrimitive, NumAssign};
use std::fmt::{Debug, Display, LowerExp};
use std::iter::{Product, Sum};
use std::num::ParseFloatError;
use std::str::FromStr;

/// A primitive float (`f32` or `f64`) together with its full math library.
///
/// Standard functions come from [`Float`], the remaining C functions from
/// [`Elementary`], and the limit constants from [`NumericLimits`].
pub trait Base:
    Float
    + FloatConst
    + FromPrimitive
    + NumAssign
    + Elementary
    + NumericLimits
    + Default
    + Debug
    + Display
    + LowerExp
    + FromStr<Err = ParseFloatError>
    + Sum
    + Product
    + Send
    + Sync
    + 'static
{
}

impl Base for f32 {}

impl Base for f64 {}
