//! [`Real<T>`]: a transparent value wrapper around a primitive float.
//!
//! Every operator and math function forwards to the base type, so results are
//! bit-identical to working on the unwrapped `T`. `Real` exists so generic
//! code can be exercised against a user-defined scalar type that is not a
//! primitive, and it is the value-only counterpart of [`Dual`](crate::dual::Dual).

use crate::base::Base;
use crate::dual::Dual;
use std::cmp::Ordering;
use std::fmt;
use std::iter::{Product, Sum};
use std::num::FpCategory;
use std::ops::{
    Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign,
};
use std::str::FromStr;
use tangent_core::Error;

/// A primitive float with value semantics and no extra state.
///
/// ```
/// use tangent_ad::real::Real;
///
/// let x = Real::new(2.0_f64);
/// let y = x * 3.0 + 1.0;
/// assert_eq!(y, 7.0);
/// assert_eq!(f64::from(y.sqrt()), 7.0_f64.sqrt());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct Real<T>(T);

macro_rules! forward_unary {
    ($($name:ident),* $(,)?) => {
        $(
            #[doc = concat!("`", stringify!($name), "` of the wrapped value.")]
            #[inline]
            pub fn $name(self) -> Self {
                Self(self.0.$name())
            }
        )*
    };
}

macro_rules! forward_binary {
    ($($name:ident),* $(,)?) => {
        $(
            #[doc = concat!("`", stringify!($name), "` of the wrapped values.")]
            #[inline]
            pub fn $name(self, other: Self) -> Self {
                Self(self.0.$name(other.0))
            }
        )*
    };
}

macro_rules! forward_predicate {
    ($($name:ident),* $(,)?) => {
        $(
            #[doc = concat!("`", stringify!($name), "` of the wrapped value.")]
            #[inline]
            pub fn $name(self) -> bool {
                self.0.$name()
            }
        )*
    };
}

impl<T: Base> Real<T> {
    /// Wrap a base value.
    #[inline]
    pub fn new(val: T) -> Self {
        Self(val)
    }

    /// The wrapped value.
    #[inline]
    pub fn value(&self) -> T {
        self.0
    }

    /// Unwrap.
    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }

    /// Unary plus.
    #[inline]
    pub fn pos(self) -> Self {
        self
    }

    /// Prefix increment: add one, return the new value.
    #[inline]
    pub fn inc(&mut self) -> Self {
        self.0 += T::one();
        *self
    }

    /// Prefix decrement: subtract one, return the new value.
    #[inline]
    pub fn dec(&mut self) -> Self {
        self.0 -= T::one();
        *self
    }

    /// Postfix increment: add one, return the old value.
    #[inline]
    pub fn post_inc(&mut self) -> Self {
        let old = *self;
        self.0 += T::one();
        old
    }

    /// Postfix decrement: subtract one, return the old value.
    #[inline]
    pub fn post_dec(&mut self) -> Self {
        let old = *self;
        self.0 -= T::one();
        old
    }

    // --- Float catalogue ---

    forward_unary! {
        sin, cos, tan, asin, acos, atan, sinh, cosh, tanh, asinh, acosh, atanh, exp, exp2,
        exp_m1, ln, log2, log10, ln_1p, sqrt, cbrt, recip, abs, signum, floor, ceil, round,
        trunc, fract, to_degrees, to_radians,
    }

    forward_binary! { atan2, hypot, powf, log, max, min, abs_sub, copysign }

    /// Integer power.
    #[inline]
    pub fn powi(self, n: i32) -> Self {
        Self(self.0.powi(n))
    }

    /// Power with any exponent convertible to `Real<T>`.
    #[inline]
    pub fn pow(self, exponent: impl Into<Self>) -> Self {
        Self(self.0.powf(exponent.into().0))
    }

    /// `self * a + b` with a single rounding.
    #[inline]
    pub fn mul_add(self, a: Self, b: Self) -> Self {
        Self(self.0.mul_add(a.0, b.0))
    }

    /// Sine and cosine at once.
    #[inline]
    pub fn sin_cos(self) -> (Self, Self) {
        let (s, c) = self.0.sin_cos();
        (Self(s), Self(c))
    }

    forward_predicate! {
        is_nan, is_infinite, is_finite, is_normal, is_sign_positive, is_sign_negative
    }

    /// IEEE class of the wrapped value.
    #[inline]
    pub fn classify(self) -> FpCategory {
        self.0.classify()
    }

    /// Mantissa, exponent and sign of the wrapped value.
    #[inline]
    pub fn integer_decode(self) -> (u64, i16, i8) {
        self.0.integer_decode()
    }

    // --- Elementary catalogue ---

    forward_unary! { erf, erfc, tgamma, lgamma, rint, nearbyint, logb }

    forward_binary! { fmod, remainder, nextafter, fdim, fmax, fmin }

    /// IEEE remainder plus low quotient bits.
    #[inline]
    pub fn remquo(self, denom: Self) -> (Self, i32) {
        let (r, q) = self.0.remquo(denom.0);
        (Self(r), q)
    }

    /// Fused multiply-add.
    #[inline]
    pub fn fma(self, y: Self, z: Self) -> Self {
        Self(self.0.fma(y.0, z.0))
    }

    /// Mantissa and binary exponent.
    #[inline]
    pub fn frexp(self) -> (Self, i32) {
        let (m, e) = self.0.frexp();
        (Self(m), e)
    }

    /// `self * 2^exp`.
    #[inline]
    pub fn ldexp(self, exp: i32) -> Self {
        Self(self.0.ldexp(exp))
    }

    /// `self * 2^exp`.
    #[inline]
    pub fn scalbn(self, exp: i32) -> Self {
        Self(self.0.scalbn(exp))
    }

    /// Binary exponent as an integer.
    #[inline]
    pub fn ilogb(self) -> i32 {
        self.0.ilogb()
    }
}

impl<T: Base> From<T> for Real<T> {
    #[inline]
    fn from(val: T) -> Self {
        Self(val)
    }
}

// --- Arithmetic: Real op (Real | T) ---

macro_rules! real_binop {
    ($Op:ident, $op:ident, $OpAssign:ident, $op_assign:ident, $sym:tt) => {
        impl<T: Base, R: Into<Real<T>>> $Op<R> for Real<T> {
            type Output = Self;
            #[inline]
            fn $op(self, rhs: R) -> Self {
                Self(self.0 $sym rhs.into().0)
            }
        }

        impl<T: Base, R: Into<Real<T>>> $OpAssign<R> for Real<T> {
            #[inline]
            fn $op_assign(&mut self, rhs: R) {
                *self = *self $sym rhs;
            }
        }
    };
}

real_binop!(Add, add, AddAssign, add_assign, +);
real_binop!(Sub, sub, SubAssign, sub_assign, -);
real_binop!(Mul, mul, MulAssign, mul_assign, *);
real_binop!(Div, div, DivAssign, div_assign, /);
real_binop!(Rem, rem, RemAssign, rem_assign, %);

impl<T: Base> Neg for Real<T> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self(-self.0)
    }
}

// --- Comparison against a bare T ---

impl<T: Base> PartialEq<T> for Real<T> {
    #[inline]
    fn eq(&self, other: &T) -> bool {
        self.0 == *other
    }
}

impl<T: Base> PartialOrd<T> for Real<T> {
    #[inline]
    fn partial_cmp(&self, other: &T) -> Option<Ordering> {
        self.0.partial_cmp(other)
    }
}

// --- Real on the left of a Dual: the Real is a zero-tangent constant ---

macro_rules! real_dual_binop {
    ($($Op:ident, $op:ident, $sym:tt;)*) => {
        $(
            impl<T: Base, const N: usize> $Op<Dual<T, N>> for Real<T> {
                type Output = Dual<T, N>;
                #[inline]
                fn $op(self, rhs: Dual<T, N>) -> Dual<T, N> {
                    Dual::from(self) $sym rhs
                }
            }
        )*
    };
}

real_dual_binop! {
    Add, add, +;
    Sub, sub, -;
    Mul, mul, *;
    Div, div, /;
    Rem, rem, %;
}

impl<T: Base, const N: usize> PartialEq<Dual<T, N>> for Real<T> {
    #[inline]
    fn eq(&self, other: &Dual<T, N>) -> bool {
        self.0 == other.val
    }
}

impl<T: Base, const N: usize> PartialOrd<Dual<T, N>> for Real<T> {
    #[inline]
    fn partial_cmp(&self, other: &Dual<T, N>) -> Option<Ordering> {
        self.0.partial_cmp(&other.val)
    }
}

// --- Primitive on the left ---

macro_rules! primitive_lhs {
    ($($t:ty),*) => {
        $(
            impl Add<Real<$t>> for $t {
                type Output = Real<$t>;
                #[inline]
                fn add(self, rhs: Real<$t>) -> Real<$t> {
                    Real(self + rhs.0)
                }
            }

            impl Sub<Real<$t>> for $t {
                type Output = Real<$t>;
                #[inline]
                fn sub(self, rhs: Real<$t>) -> Real<$t> {
                    Real(self - rhs.0)
                }
            }

            impl Mul<Real<$t>> for $t {
                type Output = Real<$t>;
                #[inline]
                fn mul(self, rhs: Real<$t>) -> Real<$t> {
                    Real(self * rhs.0)
                }
            }

            impl Div<Real<$t>> for $t {
                type Output = Real<$t>;
                #[inline]
                fn div(self, rhs: Real<$t>) -> Real<$t> {
                    Real(self / rhs.0)
                }
            }

            impl Rem<Real<$t>> for $t {
                type Output = Real<$t>;
                #[inline]
                fn rem(self, rhs: Real<$t>) -> Real<$t> {
                    Real(self % rhs.0)
                }
            }

            impl PartialEq<Real<$t>> for $t {
                #[inline]
                fn eq(&self, other: &Real<$t>) -> bool {
                    *self == other.0
                }
            }

            impl PartialOrd<Real<$t>> for $t {
                #[inline]
                fn partial_cmp(&self, other: &Real<$t>) -> Option<Ordering> {
                    self.partial_cmp(&other.0)
                }
            }

            impl From<Real<$t>> for $t {
                #[inline]
                fn from(r: Real<$t>) -> $t {
                    r.0
                }
            }
        )*
    };
}

primitive_lhs!(f32, f64);

// --- Sum / Product ---

impl<T: Base> Sum for Real<T> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self(T::zero()), |acc, x| acc + x)
    }
}

impl<T: Base> Product for Real<T> {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self(T::one()), |acc, x| acc * x)
    }
}

// --- Text ---

impl<T: Base> fmt::Display for Real<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl<T: Base> FromStr for Real<T> {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<T>()
            .map(Self)
            .map_err(|e| Error::Parse(format!("invalid value {s:?}: {e}")))
    }
}
