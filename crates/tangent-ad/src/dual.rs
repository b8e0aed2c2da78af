//! Forward-mode automatic differentiation via dual numbers with `N` tangent lanes.
//!
//! A [`Dual<T, N>`] carries a primal value and the partial derivatives of that
//! value with respect to `N` independent inputs. Every operation applies the
//! chain rule lane by lane, so one evaluation yields the value and the full
//! gradient with respect to all seeded inputs.
//!
//! `N` is part of the type: combining duals with different lane counts does
//! not compile.
//!
//! # Example
//! ```
//! use tangent_ad::dual::Dual;
//!
//! // f(x, y) = x * sin(y)
//! let [x, y] = Dual::seed([2.0_f64, 0.5]);
//! let f = x * y.sin();
//! assert_eq!(f.value(), 2.0 * 0.5_f64.sin());
//! assert_eq!(f.derivative(0), 0.5_f64.sin());     // df/dx
//! assert_eq!(f.derivative(1), 2.0 * 0.5_f64.cos()); // df/dy
//! ```

use crate::base::Base;
use crate::real::Real;
use std::cmp::Ordering;
use std::fmt;
use std::iter::{Product, Sum};
use std::num::FpCategory;
use std::ops::{
    Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign,
};
use std::str::FromStr;
use tangent_core::Error;

/// A dual number: value plus `N` partial derivatives.
///
/// `val` holds the primal value, `dot[i]` the derivative with respect to the
/// `i`-th input. Equality and ordering look at `val` only: two observations of
/// the same real number compare equal whatever their sensitivities.
#[derive(Debug, Clone, Copy)]
pub struct Dual<T, const N: usize> {
    /// Primal (function) value.
    pub val: T,
    /// Tangent (derivative) lanes.
    pub dot: [T; N],
}

impl<T: Base, const N: usize> Dual<T, N> {
    /// Create a dual with an explicit tangent.
    #[inline]
    pub fn new(val: T, dot: [T; N]) -> Self {
        Self { val, dot }
    }

    /// Create a constant (all derivatives zero).
    #[inline]
    pub fn constant(val: T) -> Self {
        Self { val, dot: [T::zero(); N] }
    }

    /// Create the independent variable `index`: unit derivative in that lane,
    /// zero elsewhere.
    #[inline]
    pub fn variable(val: T, index: usize) -> Self {
        debug_assert!(index < N, "lane {index} out of range for {N} lanes");
        Self { val, dot: std::array::from_fn(|k| if k == index { T::one() } else { T::zero() }) }
    }

    /// Seed one variable per input, input `i` on lane `i`.
    pub fn seed(values: [T; N]) -> [Self; N] {
        std::array::from_fn(|i| Self::variable(values[i], i))
    }

    /// Primal value.
    #[inline]
    pub fn value(&self) -> T {
        self.val
    }

    /// Primal value as a [`Real`].
    #[inline]
    pub fn real(&self) -> Real<T> {
        Real::new(self.val)
    }

    /// All derivative lanes.
    #[inline]
    pub fn tangent(&self) -> &[T; N] {
        &self.dot
    }

    /// Derivative with respect to input `index`.
    #[inline]
    pub fn derivative(&self, index: usize) -> T {
        self.dot[index]
    }

    /// Overwrite the derivative with respect to input `index`.
    #[inline]
    pub fn set_derivative(&mut self, index: usize, d: T) {
        self.dot[index] = d;
    }

    /// Apply the chain rule: value `f_val`, local derivative `f_deriv`.
    ///
    /// A lane whose seed is exactly zero stays zero even where `f_deriv` is
    /// infinite or NaN (e.g. `sqrt` at 0), so constants never pick up NaN.
    #[inline(always)]
    fn chain(self, f_val: T, f_deriv: T) -> Self {
        Self { val: f_val, dot: self.dot.map(|d| if d.is_zero() { d } else { d * f_deriv }) }
    }

    /// Piecewise-constant result: new value, every lane zero.
    #[inline(always)]
    fn flat(f_val: T) -> Self {
        Self::constant(f_val)
    }

    /// Same value, every lane NaN (derivative not available).
    #[inline(always)]
    fn undifferentiable(f_val: T) -> Self {
        Self { val: f_val, dot: [T::nan(); N] }
    }

    // --- Unary plus / increments ---

    /// Unary plus.
    #[inline]
    pub fn pos(self) -> Self {
        self
    }

    /// Prefix increment. Lanes are unchanged: d(x + 1) = dx.
    #[inline]
    pub fn inc(&mut self) -> Self {
        self.val += T::one();
        *self
    }

    /// Prefix decrement.
    #[inline]
    pub fn dec(&mut self) -> Self {
        self.val -= T::one();
        *self
    }

    /// Postfix increment: returns the old value.
    #[inline]
    pub fn post_inc(&mut self) -> Self {
        let old = *self;
        self.val += T::one();
        old
    }

    /// Postfix decrement: returns the old value.
    #[inline]
    pub fn post_dec(&mut self) -> Self {
        let old = *self;
        self.val -= T::one();
        old
    }

    // --- Trigonometric ---

    /// d/dx sin(x) = cos(x).
    #[inline]
    pub fn sin(self) -> Self {
        self.chain(self.val.sin(), self.val.cos())
    }

    /// d/dx cos(x) = -sin(x).
    #[inline]
    pub fn cos(self) -> Self {
        self.chain(self.val.cos(), -self.val.sin())
    }

    /// d/dx tan(x) = 1 + tan²(x).
    #[inline]
    pub fn tan(self) -> Self {
        let t = self.val.tan();
        self.chain(t, T::one() + t * t)
    }

    /// Sine and cosine sharing one evaluation.
    #[inline]
    pub fn sin_cos(self) -> (Self, Self) {
        let (s, c) = self.val.sin_cos();
        (self.chain(s, c), self.chain(c, -s))
    }

    /// d/dx asin(x) = 1/√(1 − x²).
    #[inline]
    pub fn asin(self) -> Self {
        self.chain(self.val.asin(), (T::one() - self.val * self.val).sqrt().recip())
    }

    /// d/dx acos(x) = −1/√(1 − x²).
    #[inline]
    pub fn acos(self) -> Self {
        self.chain(self.val.acos(), -(T::one() - self.val * self.val).sqrt().recip())
    }

    /// d/dx atan(x) = 1/(1 + x²).
    #[inline]
    pub fn atan(self) -> Self {
        self.chain(self.val.atan(), (T::one() + self.val * self.val).recip())
    }

    /// Four-quadrant arctangent of `self / other` (`self` is y, `other` is x).
    #[inline]
    pub fn atan2(self, other: Self) -> Self {
        let (y, x) = (self.val, other.val);
        let denom = x * x + y * y;
        Self {
            val: y.atan2(x),
            dot: std::array::from_fn(|k| (x * self.dot[k] - y * other.dot[k]) / denom),
        }
    }

    // --- Hyperbolic ---

    /// d/dx sinh(x) = cosh(x).
    #[inline]
    pub fn sinh(self) -> Self {
        self.chain(self.val.sinh(), self.val.cosh())
    }

    /// d/dx cosh(x) = sinh(x).
    #[inline]
    pub fn cosh(self) -> Self {
        self.chain(self.val.cosh(), self.val.sinh())
    }

    /// d/dx tanh(x) = 1 − tanh²(x).
    #[inline]
    pub fn tanh(self) -> Self {
        let t = self.val.tanh();
        self.chain(t, T::one() - t * t)
    }

    /// d/dx asinh(x) = 1/√(x² + 1).
    #[inline]
    pub fn asinh(self) -> Self {
        self.chain(self.val.asinh(), (self.val * self.val + T::one()).sqrt().recip())
    }

    /// d/dx acosh(x) = 1/√(x² − 1).
    #[inline]
    pub fn acosh(self) -> Self {
        self.chain(self.val.acosh(), (self.val * self.val - T::one()).sqrt().recip())
    }

    /// d/dx atanh(x) = 1/(1 − x²).
    #[inline]
    pub fn atanh(self) -> Self {
        self.chain(self.val.atanh(), (T::one() - self.val * self.val).recip())
    }

    // --- Exponential / logarithmic ---

    /// d/dx exp(x) = exp(x).
    #[inline]
    pub fn exp(self) -> Self {
        let e = self.val.exp();
        self.chain(e, e)
    }

    /// d/dx 2^x = ln2 · 2^x.
    #[inline]
    pub fn exp2(self) -> Self {
        let e = self.val.exp2();
        self.chain(e, T::LN_2() * e)
    }

    /// d/dx (eˣ − 1) = eˣ, recovered from the result as `result + 1`.
    #[inline]
    pub fn exp_m1(self) -> Self {
        let e = self.val.exp_m1();
        self.chain(e, e + T::one())
    }

    /// d/dx ln(x) = 1/x.
    #[inline]
    pub fn ln(self) -> Self {
        self.chain(self.val.ln(), self.val.recip())
    }

    /// Logarithm in an arbitrary (possibly varying) base: ln(x) / ln(base).
    #[inline]
    pub fn log(self, base: Self) -> Self {
        self.ln() / base.ln()
    }

    /// d/dx log10(x) = log10(e)/x.
    #[inline]
    pub fn log10(self) -> Self {
        self.chain(self.val.log10(), T::LOG10_E() / self.val)
    }

    /// d/dx log2(x) = log2(e)/x.
    #[inline]
    pub fn log2(self) -> Self {
        self.chain(self.val.log2(), T::LOG2_E() / self.val)
    }

    /// d/dx ln(1 + x) = 1/(1 + x).
    #[inline]
    pub fn ln_1p(self) -> Self {
        self.chain(self.val.ln_1p(), (T::one() + self.val).recip())
    }

    // --- Powers and roots ---

    /// d/dx √x = 1/(2√x).
    #[inline]
    pub fn sqrt(self) -> Self {
        let s = self.val.sqrt();
        self.chain(s, (s + s).recip())
    }

    /// d/dx ∛x = 1/(3∛x²).
    #[inline]
    pub fn cbrt(self) -> Self {
        let c = self.val.cbrt();
        let three = T::one() + T::one() + T::one();
        self.chain(c, (three * c * c).recip())
    }

    /// d/dx (1/x) = −1/x².
    #[inline]
    pub fn recip(self) -> Self {
        let r = self.val.recip();
        self.chain(r, -r * r)
    }

    /// Integer power: d/dx xⁿ = n·xⁿ⁻¹.
    #[inline]
    pub fn powi(self, n: i32) -> Self {
        if n == 0 {
            return Self::flat(T::one());
        }
        let deriv = T::from_i32(n).unwrap_or_else(T::nan) * self.val.powi(n - 1);
        self.chain(self.val.powi(n), deriv)
    }

    /// `self ^ exponent` with both sides differentiated:
    /// `e·b^(e−1)·db + ln(b)·b^e·de`.
    ///
    /// Each term is dropped on lanes where its seed is exactly zero, so a
    /// constant exponent on a negative base (or a constant base of zero)
    /// does not pull NaN in from `ln`.
    #[inline]
    pub fn powf(self, exponent: Self) -> Self {
        let (b, e) = (self.val, exponent.val);
        let val = b.powf(e);
        let d_base = e * b.powf(e - T::one());
        let d_exp = b.ln() * val;
        Self {
            val,
            dot: std::array::from_fn(|k| {
                let (db, de) = (self.dot[k], exponent.dot[k]);
                let from_base = if db.is_zero() { T::zero() } else { d_base * db };
                let from_exp = if de.is_zero() { T::zero() } else { d_exp * de };
                from_base + from_exp
            }),
        }
    }

    /// [`powf`](Dual::powf) with any exponent convertible to a dual
    /// (`f64`, `Real<f64>`, or another `Dual`).
    #[inline]
    pub fn pow(self, exponent: impl Into<Self>) -> Self {
        self.powf(exponent.into())
    }

    /// √(x² + y²): derivative (x·dx + y·dy)/result.
    #[inline]
    pub fn hypot(self, other: Self) -> Self {
        let (x, y) = (self.val, other.val);
        let h = x.hypot(y);
        Self { val: h, dot: std::array::from_fn(|k| (x * self.dot[k] + y * other.dot[k]) / h) }
    }

    // --- Error and gamma functions ---

    /// d/dx erf(x) = 2/√π · e^(−x²).
    #[inline]
    pub fn erf(self) -> Self {
        let x = self.val;
        self.chain(x.erf(), T::FRAC_2_SQRT_PI() * (-x * x).exp())
    }

    /// d/dx erfc(x) = −2/√π · e^(−x²).
    #[inline]
    pub fn erfc(self) -> Self {
        let x = self.val;
        self.chain(x.erfc(), -T::FRAC_2_SQRT_PI() * (-x * x).exp())
    }

    /// Gamma function. The derivative is not implemented: every lane is NaN.
    #[inline]
    pub fn tgamma(self) -> Self {
        Self::undifferentiable(self.val.tgamma())
    }

    /// Log-gamma. The derivative is not implemented: every lane is NaN.
    #[inline]
    pub fn lgamma(self) -> Self {
        Self::undifferentiable(self.val.lgamma())
    }

    // --- Sign and magnitude ---

    /// d/dx |x| = sign(x), computed as x/|x| so it is NaN at 0.
    #[inline]
    pub fn abs(self) -> Self {
        let a = self.val.abs();
        self.chain(a, self.val / a)
    }

    /// Sign of the value; lanes are zero.
    #[inline]
    pub fn signum(self) -> Self {
        Self::flat(self.val.signum())
    }

    /// Magnitude of `self` with the sign of `sign`.
    #[inline]
    pub fn copysign(self, sign: Self) -> Self {
        let val = self.val.copysign(sign.val);
        self.chain(val, self.val.signum() * val.signum())
    }

    /// Positive difference `max(x − y, 0)`.
    #[inline]
    pub fn fdim(self, other: Self) -> Self {
        let val = self.val.fdim(other.val);
        if self.val > other.val {
            Self { val, dot: std::array::from_fn(|k| self.dot[k] - other.dot[k]) }
        } else {
            Self::flat(val)
        }
    }

    /// Maximum; the derivative follows the selected operand. A NaN operand is
    /// ignored, as in C `fmax`.
    #[inline]
    pub fn fmax(self, other: Self) -> Self {
        let val = self.val.fmax(other.val);
        if other.val.is_nan() || self.val >= other.val {
            Self { val, dot: self.dot }
        } else {
            Self { val, dot: other.dot }
        }
    }

    /// Minimum; the derivative follows the selected operand.
    #[inline]
    pub fn fmin(self, other: Self) -> Self {
        let val = self.val.fmin(other.val);
        if other.val.is_nan() || self.val <= other.val {
            Self { val, dot: self.dot }
        } else {
            Self { val, dot: other.dot }
        }
    }

    /// Alias of [`fmax`](Dual::fmax).
    #[inline]
    pub fn max(self, other: Self) -> Self {
        self.fmax(other)
    }

    /// Alias of [`fmin`](Dual::fmin).
    #[inline]
    pub fn min(self, other: Self) -> Self {
        self.fmin(other)
    }

    /// Positive difference, as `Float::abs_sub`.
    #[inline]
    pub fn abs_sub(self, other: Self) -> Self {
        self.fdim(other)
    }

    // --- Fused operations ---

    /// `self * y + z` rounded once: derivative y·dx + x·dy + dz.
    #[inline]
    pub fn fma(self, y: Self, z: Self) -> Self {
        Self {
            val: self.val.fma(y.val, z.val),
            dot: std::array::from_fn(|k| self.dot[k] * y.val + self.val * y.dot[k] + z.dot[k]),
        }
    }

    /// Same as [`fma`](Dual::fma), using `Float::mul_add` for the value.
    #[inline]
    pub fn mul_add(self, a: Self, b: Self) -> Self {
        Self {
            val: self.val.mul_add(a.val, b.val),
            dot: std::array::from_fn(|k| self.dot[k] * a.val + self.val * a.dot[k] + b.dot[k]),
        }
    }

    // --- Rounding family: piecewise constant, lanes forced to zero ---

    /// Round toward −∞.
    #[inline]
    pub fn floor(self) -> Self {
        Self::flat(self.val.floor())
    }

    /// Round toward +∞.
    #[inline]
    pub fn ceil(self) -> Self {
        Self::flat(self.val.ceil())
    }

    /// Round half away from zero.
    #[inline]
    pub fn round(self) -> Self {
        Self::flat(self.val.round())
    }

    /// Round toward zero.
    #[inline]
    pub fn trunc(self) -> Self {
        Self::flat(self.val.trunc())
    }

    /// Round half to even.
    #[inline]
    pub fn rint(self) -> Self {
        Self::flat(self.val.rint())
    }

    /// Round half to even.
    #[inline]
    pub fn nearbyint(self) -> Self {
        Self::flat(self.val.nearbyint())
    }

    /// Truncated-division remainder. Lanes are zero.
    #[inline]
    pub fn fmod(self, denom: Self) -> Self {
        Self::flat(self.val.fmod(denom.val))
    }

    /// IEEE remainder. Lanes are zero.
    #[inline]
    pub fn remainder(self, denom: Self) -> Self {
        Self::flat(self.val.remainder(denom.val))
    }

    /// IEEE remainder plus low quotient bits. Lanes are zero.
    #[inline]
    pub fn remquo(self, denom: Self) -> (Self, i32) {
        let (r, q) = self.val.remquo(denom.val);
        (Self::flat(r), q)
    }

    /// Fractional part `x − trunc(x)`; slope 1 almost everywhere.
    #[inline]
    pub fn fract(self) -> Self {
        Self { val: self.val.fract(), dot: self.dot }
    }

    // --- Floating-point manipulation ---

    /// Next representable value toward `toward`; lanes follow `self`.
    #[inline]
    pub fn nextafter(self, toward: Self) -> Self {
        Self { val: self.val.nextafter(toward.val), dot: self.dot }
    }

    /// `self * 2^exp`: lanes scale by 2^exp.
    #[inline]
    pub fn ldexp(self, exp: i32) -> Self {
        Self { val: self.val.ldexp(exp), dot: self.dot.map(|d| d.ldexp(exp)) }
    }

    /// `self * 2^exp`.
    #[inline]
    pub fn scalbn(self, exp: i32) -> Self {
        self.ldexp(exp)
    }

    /// Mantissa (with lanes scaled by 2^−exp) and binary exponent.
    #[inline]
    pub fn frexp(self) -> (Self, i32) {
        let (m, e) = self.val.frexp();
        (Self { val: m, dot: self.dot.map(|d| d.ldexp(-e)) }, e)
    }

    /// Binary exponent as an integer.
    #[inline]
    pub fn ilogb(self) -> i32 {
        self.val.ilogb()
    }

    /// Binary exponent as a value. Lanes are zero.
    #[inline]
    pub fn logb(self) -> Self {
        Self::flat(self.val.logb())
    }

    /// Radians to degrees.
    #[inline]
    pub fn to_degrees(self) -> Self {
        self.chain(self.val.to_degrees(), T::one().to_degrees())
    }

    /// Degrees to radians.
    #[inline]
    pub fn to_radians(self) -> Self {
        self.chain(self.val.to_radians(), T::one().to_radians())
    }

    // --- Classification (value only) ---

    /// Whether the value is NaN.
    #[inline]
    pub fn is_nan(self) -> bool {
        self.val.is_nan()
    }

    /// Whether the value is ±∞.
    #[inline]
    pub fn is_infinite(self) -> bool {
        self.val.is_infinite()
    }

    /// Whether the value is neither NaN nor ±∞.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.val.is_finite()
    }

    /// Whether the value is normal.
    #[inline]
    pub fn is_normal(self) -> bool {
        self.val.is_normal()
    }

    /// IEEE class of the value.
    #[inline]
    pub fn classify(self) -> FpCategory {
        self.val.classify()
    }

    /// Whether the sign bit of the value is clear.
    #[inline]
    pub fn is_sign_positive(self) -> bool {
        self.val.is_sign_positive()
    }

    /// Whether the sign bit of the value is set.
    #[inline]
    pub fn is_sign_negative(self) -> bool {
        self.val.is_sign_negative()
    }

    /// Mantissa, exponent and sign of the value.
    #[inline]
    pub fn integer_decode(self) -> (u64, i16, i8) {
        self.val.integer_decode()
    }
}

impl<T: Base, const N: usize> Default for Dual<T, N> {
    fn default() -> Self {
        Self::constant(T::zero())
    }
}

// --- From ---

impl<T: Base, const N: usize> From<T> for Dual<T, N> {
    #[inline]
    fn from(val: T) -> Self {
        Self::constant(val)
    }
}

impl<T: Base, const N: usize> From<Real<T>> for Dual<T, N> {
    #[inline]
    fn from(val: Real<T>) -> Self {
        Self::constant(val.value())
    }
}

// --- Arithmetic: Dual op (Dual | Real | T) ---
//
// The right operand is anything convertible into a dual; constants arrive
// with zero lanes, so one rule per operator covers every pairing.

impl<T: Base, const N: usize, R: Into<Dual<T, N>>> Add<R> for Dual<T, N> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: R) -> Self {
        let rhs = rhs.into();
        Self { val: self.val + rhs.val, dot: std::array::from_fn(|k| self.dot[k] + rhs.dot[k]) }
    }
}

impl<T: Base, const N: usize, R: Into<Dual<T, N>>> Sub<R> for Dual<T, N> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: R) -> Self {
        let rhs = rhs.into();
        Self { val: self.val - rhs.val, dot: std::array::from_fn(|k| self.dot[k] - rhs.dot[k]) }
    }
}

impl<T: Base, const N: usize, R: Into<Dual<T, N>>> Mul<R> for Dual<T, N> {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: R) -> Self {
        let rhs = rhs.into();
        Self {
            val: self.val * rhs.val,
            dot: std::array::from_fn(|k| self.val * rhs.dot[k] + rhs.val * self.dot[k]),
        }
    }
}

impl<T: Base, const N: usize, R: Into<Dual<T, N>>> Div<R> for Dual<T, N> {
    type Output = Self;
    #[inline]
    fn div(self, rhs: R) -> Self {
        let rhs = rhs.into();
        let denom = rhs.val * rhs.val;
        Self {
            val: self.val / rhs.val,
            dot: std::array::from_fn(|k| (self.dot[k] * rhs.val - self.val * rhs.dot[k]) / denom),
        }
    }
}

impl<T: Base, const N: usize, R: Into<Dual<T, N>>> Rem<R> for Dual<T, N> {
    type Output = Self;
    #[inline]
    fn rem(self, rhs: R) -> Self {
        self.fmod(rhs.into())
    }
}

impl<T: Base, const N: usize> Neg for Dual<T, N> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self { val: -self.val, dot: self.dot.map(|d| -d) }
    }
}

macro_rules! dual_op_assign {
    ($OpAssign:ident, $op_assign:ident, $sym:tt) => {
        impl<T: Base, const N: usize, R: Into<Dual<T, N>>> $OpAssign<R> for Dual<T, N> {
            #[inline]
            fn $op_assign(&mut self, rhs: R) {
                *self = *self $sym rhs;
            }
        }
    };
}

dual_op_assign!(AddAssign, add_assign, +);
dual_op_assign!(SubAssign, sub_assign, -);
dual_op_assign!(MulAssign, mul_assign, *);
dual_op_assign!(DivAssign, div_assign, /);
dual_op_assign!(RemAssign, rem_assign, %);

// --- Primitive on the left ---

macro_rules! primitive_lhs {
    ($($t:ty),*) => {
        $(
            impl<const N: usize> Add<Dual<$t, N>> for $t {
                type Output = Dual<$t, N>;
                #[inline]
                fn add(self, rhs: Dual<$t, N>) -> Dual<$t, N> {
                    Dual::constant(self) + rhs
                }
            }

            impl<const N: usize> Sub<Dual<$t, N>> for $t {
                type Output = Dual<$t, N>;
                #[inline]
                fn sub(self, rhs: Dual<$t, N>) -> Dual<$t, N> {
                    Dual::constant(self) - rhs
                }
            }

            impl<const N: usize> Mul<Dual<$t, N>> for $t {
                type Output = Dual<$t, N>;
                #[inline]
                fn mul(self, rhs: Dual<$t, N>) -> Dual<$t, N> {
                    Dual::constant(self) * rhs
                }
            }

            impl<const N: usize> Div<Dual<$t, N>> for $t {
                type Output = Dual<$t, N>;
                #[inline]
                fn div(self, rhs: Dual<$t, N>) -> Dual<$t, N> {
                    Dual::constant(self) / rhs
                }
            }

            impl<const N: usize> Rem<Dual<$t, N>> for $t {
                type Output = Dual<$t, N>;
                #[inline]
                fn rem(self, rhs: Dual<$t, N>) -> Dual<$t, N> {
                    Dual::constant(self) % rhs
                }
            }

            impl<const N: usize> PartialEq<Dual<$t, N>> for $t {
                #[inline]
                fn eq(&self, other: &Dual<$t, N>) -> bool {
                    *self == other.val
                }
            }

            impl<const N: usize> PartialOrd<Dual<$t, N>> for $t {
                #[inline]
                fn partial_cmp(&self, other: &Dual<$t, N>) -> Option<Ordering> {
                    self.partial_cmp(&other.val)
                }
            }
        )*
    };
}

primitive_lhs!(f32, f64);

// --- Comparison: value only ---

impl<T: Base, const N: usize> PartialEq for Dual<T, N> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.val == other.val
    }
}

impl<T: Base, const N: usize> PartialOrd for Dual<T, N> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.val.partial_cmp(&other.val)
    }
}

impl<T: Base, const N: usize> PartialEq<T> for Dual<T, N> {
    #[inline]
    fn eq(&self, other: &T) -> bool {
        self.val == *other
    }
}

impl<T: Base, const N: usize> PartialOrd<T> for Dual<T, N> {
    #[inline]
    fn partial_cmp(&self, other: &T) -> Option<Ordering> {
        self.val.partial_cmp(other)
    }
}

impl<T: Base, const N: usize> PartialEq<Real<T>> for Dual<T, N> {
    #[inline]
    fn eq(&self, other: &Real<T>) -> bool {
        self.val == other.value()
    }
}

impl<T: Base, const N: usize> PartialOrd<Real<T>> for Dual<T, N> {
    #[inline]
    fn partial_cmp(&self, other: &Real<T>) -> Option<Ordering> {
        self.val.partial_cmp(&other.value())
    }
}

// --- Sum / Product ---

impl<T: Base, const N: usize> Sum for Dual<T, N> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::constant(T::zero()), |acc, x| acc + x)
    }
}

impl<T: Base, const N: usize> Product for Dual<T, N> {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::constant(T::one()), |acc, x| acc * x)
    }
}

// --- Text: "value d0 d1 ... d(N-1)" ---

impl<T: Base, const N: usize> fmt::Display for Dual<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.val, f)?;
        for d in &self.dot {
            f.write_str(" ")?;
            fmt::Display::fmt(d, f)?;
        }
        Ok(())
    }
}

impl<T: Base, const N: usize> FromStr for Dual<T, N> {
    type Err = Error;

    /// Parse the value followed by exactly `N` derivative lanes, whitespace
    /// separated.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = s.split_whitespace();
        let mut next = |what: &str| -> Result<T, Error> {
            let tok =
                tokens.next().ok_or_else(|| Error::Parse(format!("missing {what} in {s:?}")))?;
            tok.parse::<T>().map_err(|e| Error::Parse(format!("invalid {what} {tok:?}: {e}")))
        };

        let val = next("value")?;
        let mut dot = [T::zero(); N];
        for (k, d) in dot.iter_mut().enumerate() {
            *d = next(&format!("derivative {k}"))?;
        }

        if let Some(extra) = tokens.next() {
            return Err(Error::Parse(format!(
                "unexpected token {extra:?} after {N} derivatives in {s:?}"
            )));
        }
        Ok(Self { val, dot })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    type D1 = Dual<f64, 1>;

    fn seeded(val: f64, d: f64) -> D1 {
        Dual::new(val, [d])
    }

    /// Central difference of `f` at `x`.
    fn fd(f: impl Fn(f64) -> f64, x: f64) -> f64 {
        let h = 1e-6;
        (f(x + h) - f(x - h)) / (2.0 * h)
    }

    #[test]
    fn test_constant_has_zero_derivative() {
        let c = Dual::<f64, 3>::constant(5.0);
        assert_eq!(c.val, 5.0);
        assert_eq!(c.dot, [0.0; 3]);
        let from_real = Dual::<f64, 2>::from(Real::new(1.5));
        assert_eq!(from_real.tangent(), &[0.0, 0.0]);
    }

    #[test]
    fn test_variable_has_unit_derivative() {
        let x = Dual::<f64, 3>::variable(3.0, 1);
        assert_eq!(x.value(), 3.0);
        assert_eq!(x.dot, [0.0, 1.0, 0.0]);
        let [a, b] = Dual::seed([1.0_f64, 2.0]);
        assert_eq!(a.dot, [1.0, 0.0]);
        assert_eq!(b.dot, [0.0, 1.0]);
    }

    #[test]
    fn test_round_trip_is_exact() {
        let nan_payload = f64::from_bits(0x7ff8_0000_0000_1234);
        for x in [0.1_f64, -0.0, f64::MAX, f64::MIN_POSITIVE, 5e-324, f64::INFINITY, nan_payload] {
            assert_eq!(Dual::<f64, 2>::from(x).value().to_bits(), x.to_bits());
            assert_eq!(Dual::<f64, 3>::from(Real::new(x)).value().to_bits(), x.to_bits());
            assert_eq!(Dual::<f64, 1>::variable(x, 0).real().value().to_bits(), x.to_bits());
            assert_eq!(Dual::<f64, 2>::from(x).dot, [0.0, 0.0]);
        }
        let tiny = f32::from_bits(1);
        assert_eq!(Dual::<f32, 1>::from(tiny).value().to_bits(), 1);
    }

    #[test]
    fn test_arithmetic_rules() {
        let a = seeded(1.0, 2.0);
        let b = seeded(3.0, 4.0);

        let c = a + b;
        assert_eq!(c.val, 4.0);
        assert_eq!(c.dot, [6.0]);

        let c = a - b;
        assert_eq!(c.val, -2.0);
        assert_eq!(c.dot, [-2.0]);

        let c = a * b;
        assert_eq!(c.val, 3.0);
        assert_eq!(c.dot, [10.0]);

        let c = a / b;
        assert_relative_eq!(c.val, 1.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(c.dot[0], 2.0 / 9.0, epsilon = 1e-12);
    }

    #[test]
    fn test_constant_operand_matches_zero_tangent_dual() {
        let x = Dual::<f64, 2>::new(1.7, [0.3, -2.0]);
        let k = 2.5;
        let kd = Dual::<f64, 2>::constant(k);
        let kr = Real::new(k);

        for (lhs, rhs) in [(x + k, x + kd), (x - k, x - kd), (x * k, x * kd), (x / k, x / kd)] {
            assert_eq!(lhs.val.to_bits(), rhs.val.to_bits());
            assert_eq!(lhs.dot.map(f64::to_bits), rhs.dot.map(f64::to_bits));
        }
        assert_eq!((x * kr).dot, (x * kd).dot);
        assert_eq!((k - x).dot, (kd - x).dot);
        assert_eq!((k / x).dot, (kd / x).dot);
        assert_eq!((k * x).dot, (kd * x).dot);
    }

    #[test]
    fn test_compound_and_increment() {
        let mut a = seeded(1.0, 1.0);
        a += 1.0;
        a -= 1.0;
        a *= 2.0;
        a /= 2.0;
        assert_eq!(a.val, 1.0);
        assert_eq!(a.dot, [1.0]);

        let old = a.post_inc();
        assert_eq!((old.val, a.val), (1.0, 2.0));
        assert_eq!(a.dot, [1.0]);
        assert_eq!(a.dec().val, 1.0);
        assert_eq!(a.inc().val, 2.0);
        assert_eq!(a.post_dec().val, 2.0);
        assert_eq!(a.val, 1.0);
    }

    #[test]
    fn test_comparison_ignores_tangent() {
        let a = Dual::<f64, 2>::new(2.0, [1.0, 0.0]);
        let b = Dual::<f64, 2>::new(2.0, [-5.0, 7.0]);
        assert_eq!(a, b);
        assert!(!(a < b) && !(a > b));
        assert!(a <= b && a >= b);
        assert_eq!(a.partial_cmp(&b), Some(Ordering::Equal));
        assert!(a == 2.0 && 2.0 == a);
        assert!(a < 3.0 && 1.0 < a);
        assert!(a == Real::new(2.0));
        assert!(Dual::<f64, 2>::constant(f64::NAN) != Dual::constant(f64::NAN));
    }

    #[test]
    fn test_trig() {
        let x = seeded(1.0, 1.0);
        let s = x.sin();
        assert_relative_eq!(s.val, 0.8415, epsilon = 1e-4);
        assert_relative_eq!(s.dot[0], 0.5403, epsilon = 1e-4);
        let c = x.cos();
        assert_relative_eq!(c.val, 0.5403, epsilon = 1e-4);
        assert_relative_eq!(c.dot[0], -0.8415, epsilon = 1e-4);
        let (s2, c2) = x.sin_cos();
        assert_eq!((s2.dot, c2.dot), (s.dot, c.dot));
    }

    #[test]
    fn test_unary_derivatives_match_finite_differences() {
        type F = (fn(D1) -> D1, fn(f64) -> f64, f64);
        let cases: [F; 26] = [
            (D1::sin, f64::sin, 0.7),
            (D1::cos, f64::cos, 0.7),
            (D1::tan, f64::tan, 0.7),
            (D1::asin, f64::asin, 0.3),
            (D1::acos, f64::acos, 0.3),
            (D1::atan, f64::atan, 0.3),
            (D1::sinh, f64::sinh, 0.9),
            (D1::cosh, f64::cosh, 0.9),
            (D1::tanh, f64::tanh, 0.9),
            (D1::asinh, f64::asinh, 0.9),
            (D1::acosh, f64::acosh, 1.9),
            (D1::atanh, f64::atanh, 0.4),
            (D1::exp, f64::exp, 0.8),
            (D1::exp2, f64::exp2, 0.8),
            (D1::exp_m1, f64::exp_m1, 0.8),
            (D1::ln, f64::ln, 2.3),
            (D1::log10, f64::log10, 2.3),
            (D1::log2, f64::log2, 2.3),
            (D1::ln_1p, f64::ln_1p, 2.3),
            (D1::sqrt, f64::sqrt, 2.3),
            (D1::cbrt, f64::cbrt, 2.3),
            (D1::recip, f64::recip, 2.3),
            (D1::erf, libm::erf, 0.6),
            (D1::erfc, libm::erfc, 0.6),
            (D1::abs, f64::abs, -1.2),
            (D1::to_degrees, f64::to_degrees, 0.2),
        ];
        for (i, (f, g, x)) in cases.into_iter().enumerate() {
            let y = f(D1::variable(x, 0));
            assert_eq!(y.val.to_bits(), g(x).to_bits(), "value of case {i}");
            assert_relative_eq!(y.dot[0], fd(g, x), epsilon = 1e-4, max_relative = 1e-6);
        }
    }

    #[test]
    fn test_binary_derivatives_match_finite_differences() {
        let (x0, y0) = (1.3_f64, 0.6_f64);
        type F2 = (fn(Dual<f64, 2>, Dual<f64, 2>) -> Dual<f64, 2>, fn(f64, f64) -> f64);
        let cases: [F2; 6] = [
            (|x, y| x.atan2(y), f64::atan2),
            (|x, y| x.hypot(y), f64::hypot),
            (|x, y| x.powf(y), f64::powf),
            (|x, y| x.log(y), f64::log),
            (|x, y| x / y, |x, y| x / y),
            (|x, y| x * y, |x, y| x * y),
        ];
        for (i, (f, g)) in cases.into_iter().enumerate() {
            let [x, y] = Dual::seed([x0, y0]);
            let r = f(x, y);
            assert_relative_eq!(r.val, g(x0, y0), epsilon = 1e-14);
            assert_relative_eq!(r.dot[0], fd(|t| g(t, y0), x0), epsilon = 1e-4);
            assert_relative_eq!(r.dot[1], fd(|t| g(x0, t), y0), epsilon = 1e-4);
            assert!(r.dot.iter().all(|d| d.is_finite()), "case {i}");
        }
    }

    #[test]
    fn test_chain_rule_composition() {
        // d/dx sin(exp(x)) = cos(exp(x)) * exp(x)
        let x0 = 0.4_f64;
        let y = D1::variable(x0, 0).exp().sin();
        assert_relative_eq!(y.dot[0], x0.exp().cos() * x0.exp(), epsilon = 1e-12);

        // d/dx ln(sqrt(x)) = 1/(2x)
        let y = D1::variable(3.0, 0).sqrt().ln();
        assert_relative_eq!(y.dot[0], 1.0 / 6.0, epsilon = 1e-12);
    }

    #[test]
    fn test_pow_variants() {
        // Constant exponent on a negative base: no NaN from ln(-2).
        let x = D1::variable(-2.0, 0);
        let y = x.pow(3.0);
        assert_eq!(y.val, -8.0);
        assert_relative_eq!(y.dot[0], 12.0, epsilon = 1e-12);

        // Constant base, variable exponent: d/dx 2^x = ln2 * 2^x.
        let e = D1::variable(3.0, 0);
        let y = Dual::constant(2.0).powf(e);
        assert_relative_eq!(y.dot[0], 2.0_f64.ln() * 8.0, epsilon = 1e-12);

        let y = D1::variable(1.5, 0).powi(4);
        assert_relative_eq!(y.dot[0], 4.0 * 1.5_f64.powi(3), epsilon = 1e-12);
        assert_eq!(D1::variable(0.0, 0).powi(0).dot, [0.0]);
    }

    #[test]
    fn test_rounding_family_has_zero_tangent() {
        let x = Dual::<f64, 3>::new(2.5, [1.0, -3.0, 0.25]);
        for r in [
            x.floor(),
            x.ceil(),
            x.round(),
            x.trunc(),
            x.rint(),
            x.nearbyint(),
            x.fmod(Dual::constant(1.5)),
            x % Dual::new(0.7, [1.0, 1.0, 1.0]),
            x.remainder(Dual::constant(2.0)),
            x.signum(),
        ] {
            assert_eq!(r.dot, [0.0; 3]);
        }
        assert_eq!(x.floor().val, 2.0);
        assert_eq!(x.ceil().val, 3.0);
        assert_eq!(x.round().val, 3.0);
        assert_eq!(x.rint().val, 2.0);
        assert_eq!(x.fmod(Dual::constant(1.5)).val, 1.0);
        assert_eq!(x.fract().dot, x.dot);
    }

    #[test]
    fn test_undefined_derivatives() {
        let g = D1::variable(4.5, 0).tgamma();
        assert_relative_eq!(g.val, libm::tgamma(4.5), epsilon = 1e-12);
        assert!(g.dot[0].is_nan());
        assert!(D1::constant(2.0).lgamma().dot[0].is_nan());

        assert!(D1::variable(0.0, 0).abs().dot[0].is_nan());
        assert_eq!(D1::variable(-3.0, 0).abs().dot, [-1.0]);
        // A constant zero stays clean.
        assert_eq!(D1::constant(0.0).abs().dot, [0.0]);
        assert_eq!(D1::constant(0.0).sqrt().dot, [0.0]);
    }

    #[test]
    fn test_selection_functions() {
        let a = Dual::<f64, 2>::variable(1.0, 0);
        let b = Dual::<f64, 2>::variable(2.0, 1);
        assert_eq!(a.fmax(b).dot, [0.0, 1.0]);
        assert_eq!(a.fmin(b).dot, [1.0, 0.0]);
        assert_eq!(a.max(Dual::constant(f64::NAN)).dot, a.dot);
        assert_eq!(b.fdim(a).val, 1.0);
        assert_eq!(b.fdim(a).dot, [-1.0, 1.0]);
        assert_eq!(a.fdim(b).dot, [0.0, 0.0]);

        let c = Dual::<f64, 1>::variable(3.0, 0).copysign(Dual::constant(-1.0));
        assert_eq!(c.val, -3.0);
        assert_eq!(c.dot, [-1.0]);
    }

    #[test]
    fn test_fused_and_exponent_helpers() {
        let [x, y, z] = Dual::seed([2.0_f64, 3.0, 4.0]);
        let r = x.fma(y, z);
        assert_eq!(r.val, 10.0);
        assert_eq!(r.dot, [3.0, 2.0, 1.0]);
        assert_eq!(x.mul_add(y, z).dot, r.dot);

        let s = D1::variable(3.0, 0).ldexp(2);
        assert_eq!((s.val, s.dot), (12.0, [4.0]));
        let (m, e) = D1::variable(8.0, 0).frexp();
        assert_eq!((m.val, e, m.dot), (0.5, 4, [1.0 / 16.0]));
        assert_eq!(D1::variable(8.0, 0).nextafter(D1::constant(9.0)).dot, [1.0]);
        assert_eq!(D1::variable(8.0, 0).ilogb(), 3);
    }

    #[test]
    fn test_display_and_parse_round_trip() {
        let x = Dual::<f64, 2>::new(1.5, [-2.0, 0.25]);
        let s = x.to_string();
        assert_eq!(s, "1.5 -2 0.25");
        let back: Dual<f64, 2> = s.parse().unwrap();
        assert_eq!(back.val, 1.5);
        assert_eq!(back.dot, [-2.0, 0.25]);
        assert_eq!(format!("{:.2}", Dual::<f64, 1>::new(1.0 / 3.0, [2.0 / 9.0])), "0.33 0.22");
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!("1.0 2.0".parse::<Dual<f64, 2>>(), Err(Error::Parse(_))));
        assert!(matches!("1.0 2.0 3.0 4.0".parse::<Dual<f64, 2>>(), Err(Error::Parse(_))));
        assert!(matches!("1.0 x".parse::<Dual<f64, 1>>(), Err(Error::Parse(_))));
        assert!(matches!("".parse::<Dual<f64, 0>>(), Err(Error::Parse(_))));
        assert_eq!("7".parse::<Dual<f64, 0>>().unwrap().val, 7.0);
    }

    #[test]
    fn test_sum_product() {
        let xs = Dual::seed([1.0_f64, 2.0, 3.0]);
        let s: Dual<f64, 3> = xs.iter().copied().sum();
        assert_eq!(s.val, 6.0);
        assert_eq!(s.dot, [1.0, 1.0, 1.0]);
        let p: Dual<f64, 3> = xs.iter().copied().product();
        assert_eq!(p.val, 6.0);
        assert_eq!(p.dot, [6.0, 3.0, 2.0]);
    }

    #[test]
    fn test_f32_lanes() {
        let x = Dual::<f32, 1>::variable(2.0, 0);
        let y = (x * x + 1.0).ln();
        assert!((y.dot[0] - 0.8).abs() < 1e-6);
    }
}
