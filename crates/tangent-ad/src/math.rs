//! Free functions named after the C math library.
//!
//! Each function is generic over [`Scalar`], so the same call evaluates on
//! `f64`, on [`Real<f64>`](crate::real::Real), or propagates derivatives on
//! [`Dual<f64, N>`](crate::dual::Dual):
//!
//! ```
//! use tangent_ad::dual::Dual;
//! use tangent_ad::math::{exp, log1p};
//!
//! fn softplus<S: tangent_ad::Scalar>(x: S) -> S {
//!     log1p(exp(x))
//! }
//!
//! assert!((softplus(0.0_f64) - 2.0_f64.ln()).abs() < 1e-15);
//! let y = softplus(Dual::<f64, 1>::variable(0.0, 0));
//! assert!((y.derivative(0) - 0.5).abs() < 1e-15);
//! ```
//!
//! Out-of-domain arguments follow IEEE-754: the result is NaN or ±∞, never a
//! panic or an error.

use crate::scalar::Scalar;
use std::num::FpCategory;

macro_rules! unary {
    ($($(#[$m:meta])* $name:ident => $method:ident;)*) => {
        $(
            $(#[$m])*
            #[inline]
            pub fn $name<S: Scalar>(x: S) -> S {
                x.$method()
            }
        )*
    };
}

macro_rules! binary {
    ($($(#[$m:meta])* $name:ident => $method:ident;)*) => {
        $(
            $(#[$m])*
            #[inline]
            pub fn $name<S: Scalar>(x: S, y: S) -> S {
                x.$method(y)
            }
        )*
    };
}

unary! {
    /// Sine.
    sin => sin;
    /// Cosine.
    cos => cos;
    /// Tangent.
    tan => tan;
    /// Arc sine.
    asin => asin;
    /// Arc cosine.
    acos => acos;
    /// Arc tangent.
    atan => atan;
    /// Hyperbolic sine.
    sinh => sinh;
    /// Hyperbolic cosine.
    cosh => cosh;
    /// Hyperbolic tangent.
    tanh => tanh;
    /// Inverse hyperbolic sine.
    asinh => asinh;
    /// Inverse hyperbolic cosine.
    acosh => acosh;
    /// Inverse hyperbolic tangent.
    atanh => atanh;
    /// eˣ.
    exp => exp;
    /// 2ˣ.
    exp2 => exp2;
    /// eˣ − 1.
    expm1 => exp_m1;
    /// Natural logarithm.
    log => ln;
    /// Base-10 logarithm.
    log10 => log10;
    /// Base-2 logarithm.
    log2 => log2;
    /// ln(1 + x).
    log1p => ln_1p;
    /// Square root.
    sqrt => sqrt;
    /// Cube root.
    cbrt => cbrt;
    /// Error function.
    erf => erf;
    /// Complementary error function.
    erfc => erfc;
    /// Gamma function (derivative lanes are NaN).
    tgamma => tgamma;
    /// Log-gamma (derivative lanes are NaN).
    lgamma => lgamma;
    /// Round toward +∞.
    ceil => ceil;
    /// Round toward −∞.
    floor => floor;
    /// Round toward zero.
    trunc => trunc;
    /// Round half away from zero.
    round => round;
    /// Round half to even.
    rint => rint;
    /// Round half to even.
    nearbyint => nearbyint;
    /// Absolute value.
    abs => abs;
    /// Absolute value.
    fabs => abs;
    /// Binary exponent as a value.
    logb => logb;
}

binary! {
    /// Four-quadrant arc tangent of `x / y` (`x` is the ordinate).
    atan2 => atan2;
    /// `x` raised to `y`.
    pow => powf;
    /// √(x² + y²) without undue overflow.
    hypot => hypot;
    /// Truncated-division remainder.
    fmod => fmod;
    /// IEEE remainder.
    remainder => remainder;
    /// Magnitude of `x`, sign of `y`.
    copysign => copysign;
    /// Next representable value after `x` toward `y`.
    nextafter => nextafter;
    /// Positive difference.
    fdim => fdim;
    /// Maximum ignoring NaN.
    fmax => fmax;
    /// Minimum ignoring NaN.
    fmin => fmin;
}

/// Same as [`nextafter`]: Rust has no wider `long double` direction type.
#[inline]
pub fn nexttoward<S: Scalar>(x: S, y: S) -> S {
    x.nextafter(y)
}

/// IEEE remainder plus the low bits of the quotient.
#[inline]
pub fn remquo<S: Scalar>(x: S, y: S) -> (S, i32) {
    x.remquo(y)
}

/// `x * y + z` with a single rounding.
#[inline]
pub fn fma<S: Scalar>(x: S, y: S, z: S) -> S {
    x.fma(y, z)
}

/// Mantissa in `[0.5, 1)` and binary exponent.
#[inline]
pub fn frexp<S: Scalar>(x: S) -> (S, i32) {
    x.frexp()
}

/// `x * 2^exp`.
#[inline]
pub fn ldexp<S: Scalar>(x: S, exp: i32) -> S {
    x.ldexp(exp)
}

/// `x * 2^exp`.
#[inline]
pub fn scalbn<S: Scalar>(x: S, exp: i32) -> S {
    x.scalbn(exp)
}

/// Binary exponent as an integer.
#[inline]
pub fn ilogb<S: Scalar>(x: S) -> i32 {
    x.ilogb()
}

/// Split into fractional and integral parts, both with the sign of `x`.
///
/// For ±∞ the fractional part is ±0, matching C.
#[inline]
pub fn modf<S: Scalar>(x: S) -> (S, S) {
    if x.is_infinite() { (S::zero().copysign(x), x) } else { (x.fract(), x.trunc()) }
}

/// Round half away from zero to an integer; `None` if NaN or out of `i64` range.
#[inline]
pub fn lround<S: Scalar>(x: S) -> Option<i64> {
    x.round().to_i64()
}

/// Round half to even to an integer; `None` if NaN or out of `i64` range.
#[inline]
pub fn lrint<S: Scalar>(x: S) -> Option<i64> {
    x.rint().to_i64()
}

/// A quiet NaN.
#[inline]
pub fn nan<S: Scalar>() -> S {
    S::quiet_nan()
}

// --- Classification ---

/// IEEE class of the value.
#[inline]
pub fn fpclassify<S: Scalar>(x: S) -> FpCategory {
    x.classify()
}

/// Neither NaN nor ±∞.
#[inline]
pub fn isfinite<S: Scalar>(x: S) -> bool {
    x.is_finite()
}

/// ±∞.
#[inline]
pub fn isinf<S: Scalar>(x: S) -> bool {
    x.is_infinite()
}

/// NaN.
#[inline]
pub fn isnan<S: Scalar>(x: S) -> bool {
    x.is_nan()
}

/// Normal (not zero, subnormal, infinite or NaN).
#[inline]
pub fn isnormal<S: Scalar>(x: S) -> bool {
    x.is_normal()
}

/// Sign bit set (true for −0.0 and negative NaN).
#[inline]
pub fn signbit<S: Scalar>(x: S) -> bool {
    x.is_sign_negative()
}

// --- Quiet comparisons: false whenever an operand is NaN ---

/// `x > y`.
#[inline]
pub fn isgreater<S: Scalar>(x: S, y: S) -> bool {
    x > y
}

/// `x >= y`.
#[inline]
pub fn isgreaterequal<S: Scalar>(x: S, y: S) -> bool {
    x >= y
}

/// `x < y`.
#[inline]
pub fn isless<S: Scalar>(x: S, y: S) -> bool {
    x < y
}

/// `x <= y`.
#[inline]
pub fn islessequal<S: Scalar>(x: S, y: S) -> bool {
    x <= y
}

/// `x < y || x > y`.
#[inline]
pub fn islessgreater<S: Scalar>(x: S, y: S) -> bool {
    x < y || x > y
}

/// At least one operand is NaN.
#[inline]
pub fn isunordered<S: Scalar>(x: S, y: S) -> bool {
    x.is_nan() || y.is_nan()
}
