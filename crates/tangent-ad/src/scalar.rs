//! [`Scalar`] trait: abstraction over `f32`/`f64`, [`Real`] and [`Dual`]
//! that lets numeric code be written once, then reused both for plain
//! evaluation **and** for forward-mode derivative propagation.

use crate::base::Base;
use crate::dual::Dual;
use crate::elementary::Elementary;
use crate::limits::NumericLimits;
use crate::real::Real;
use num_traits::{Float, FloatConst, NumAssign};
use std::fmt::{Debug, Display};
use std::iter::{Product, Sum};

/// A real scalar type usable in generic numeric code.
///
/// Implemented for `f32`, `f64` (plain evaluation), [`Real`] (value wrapper)
/// and [`Dual`] (forward-mode AD). The full `Float` catalogue, the remaining
/// C functions ([`Elementary`]) and the limit constants ([`NumericLimits`])
/// all come along as supertraits.
pub trait Scalar:
    Float
    + FloatConst
    + NumAssign
    + Elementary
    + NumericLimits
    + Default
    + Debug
    + Display
    + Sum
    + Product
    + Send
    + Sync
    + 'static
{
    /// The primitive float underneath.
    type Base: Base;

    /// Lift a base value (derivative = 0 for AD types).
    fn from_base(v: Self::Base) -> Self;

    /// Extract the primal (function) value.
    fn value(&self) -> Self::Base;

    /// Wrap an `f64` constant, rounding to the base precision if needed.
    fn from_f64(v: f64) -> Self;
}

// --- Primitive implementations ---

macro_rules! impl_scalar_primitive {
    ($($t:ty),*) => {
        $(
            impl Scalar for $t {
                type Base = $t;

                #[inline]
                fn from_base(v: $t) -> Self {
                    v
                }

                #[inline]
                fn value(&self) -> $t {
                    *self
                }

                #[inline]
                fn from_f64(v: f64) -> Self {
                    v as $t
                }
            }
        )*
    };
}

impl_scalar_primitive!(f32, f64);

// --- Wrapper implementations ---

/// `f64` to base precision. Float-to-float casts never fail in `num-traits`
/// (out-of-range values saturate to infinity).
#[inline]
fn base_from_f64<T: Base>(v: f64) -> T {
    T::from_f64(v).unwrap_or_else(T::nan)
}

impl<T: Base> Scalar for Real<T> {
    type Base = T;

    #[inline]
    fn from_base(v: T) -> Self {
        Real::new(v)
    }

    #[inline]
    fn value(&self) -> T {
        Real::value(self)
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        Real::new(base_from_f64(v))
    }
}

impl<T: Base, const N: usize> Scalar for Dual<T, N> {
    type Base = T;

    #[inline]
    fn from_base(v: T) -> Self {
        Dual::constant(v)
    }

    #[inline]
    fn value(&self) -> T {
        self.val
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        Dual::constant(base_from_f64(v))
    }
}
