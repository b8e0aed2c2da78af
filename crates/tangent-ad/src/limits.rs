//! [`NumericLimits`]: the constants and capability flags a generic numeric
//! algorithm needs to treat a type like a built-in float.
//!
//! Pivot thresholds, convergence tolerances and NaN/Inf sentinels in
//! [`tangent-linalg`] are all taken from here. Wrapped types report the
//! constants of their base type, converted through the one-argument
//! constructor, so `Real::<f64>::machine_epsilon() == Real::from(f64::EPSILON)`.
//!
//! Function names avoid the ones on [`num_traits::Float`] (`epsilon`,
//! `max_value`, ...) so a bound on both traits stays unambiguous.
//!
//! [`tangent-linalg`]: https://docs.rs/tangent-linalg

use crate::base::Base;
use crate::dual::Dual;
use crate::real::Real;

/// Descriptive constants for a real scalar type.
pub trait NumericLimits: Sized {
    /// Whether negative values are representable.
    const IS_SIGNED: bool;
    /// Whether the type only holds integers.
    const IS_INTEGER: bool;
    /// Whether arithmetic is exact (no rounding).
    const IS_EXACT: bool;
    /// Whether the type is a complex number.
    const IS_COMPLEX: bool;
    /// Base of the exponent representation.
    const RADIX: u32;
    /// Mantissa digits in base [`RADIX`](NumericLimits::RADIX).
    const DIGITS: u32;
    /// Decimal digits that survive a text round trip through the type.
    const DIGITS10: u32;
    /// Decimal digits needed to print every value unambiguously.
    const MAX_DIGITS10: u32;
    /// One more than the smallest normal binary exponent.
    const MIN_EXPONENT: i32;
    /// One more than the largest finite binary exponent.
    const MAX_EXPONENT: i32;
    /// Smallest normal decimal exponent.
    const MIN_EXPONENT10: i32;
    /// Largest finite decimal exponent.
    const MAX_EXPONENT10: i32;
    /// Whether `+inf` is representable.
    const HAS_INFINITY: bool;
    /// Whether a quiet NaN is representable.
    const HAS_QUIET_NAN: bool;
    /// Whether a freshly allocated value must be explicitly initialized
    /// before use. `false` for plain old data.
    const REQUIRE_INITIALIZATION: bool;
    /// Relative cost of reading a value (in units of a primitive float read).
    const READ_COST: u32;
    /// Relative cost of an addition.
    const ADD_COST: u32;
    /// Relative cost of a multiplication.
    const MUL_COST: u32;

    /// Distance from 1.0 to the next representable value.
    fn machine_epsilon() -> Self;

    /// Loose tolerance for "approximately zero" tests in iterative algorithms.
    fn dummy_precision() -> Self;

    /// Smallest positive normal value.
    fn min_positive() -> Self;

    /// Smallest positive subnormal value.
    fn denorm_min() -> Self;

    /// Largest finite value.
    fn highest() -> Self;

    /// Most negative finite value.
    fn lowest() -> Self;

    /// Positive infinity.
    fn positive_infinity() -> Self;

    /// Negative infinity.
    fn negative_infinity() -> Self;

    /// A quiet NaN.
    fn quiet_nan() -> Self;
}

macro_rules! impl_primitive_limits {
    ($t:ident, dummy_precision = $dummy:expr, max_digits10 = $max_digits10:expr) => {
        impl NumericLimits for $t {
            const IS_SIGNED: bool = true;
            const IS_INTEGER: bool = false;
            const IS_EXACT: bool = false;
            const IS_COMPLEX: bool = false;
            const RADIX: u32 = $t::RADIX;
            const DIGITS: u32 = $t::MANTISSA_DIGITS;
            const DIGITS10: u32 = $t::DIGITS;
            const MAX_DIGITS10: u32 = $max_digits10;
            const MIN_EXPONENT: i32 = $t::MIN_EXP;
            const MAX_EXPONENT: i32 = $t::MAX_EXP;
            const MIN_EXPONENT10: i32 = $t::MIN_10_EXP;
            const MAX_EXPONENT10: i32 = $t::MAX_10_EXP;
            const HAS_INFINITY: bool = true;
            const HAS_QUIET_NAN: bool = true;
            const REQUIRE_INITIALIZATION: bool = false;
            const READ_COST: u32 = 1;
            const ADD_COST: u32 = 1;
            const MUL_COST: u32 = 1;

            #[inline]
            fn machine_epsilon() -> Self {
                $t::EPSILON
            }

            #[inline]
            fn dummy_precision() -> Self {
                $dummy
            }

            #[inline]
            fn min_positive() -> Self {
                $t::MIN_POSITIVE
            }

            #[inline]
            fn denorm_min() -> Self {
                $t::from_bits(1)
            }

            #[inline]
            fn highest() -> Self {
                $t::MAX
            }

            #[inline]
            fn lowest() -> Self {
                $t::MIN
            }

            #[inline]
            fn positive_infinity() -> Self {
                $t::INFINITY
            }

            #[inline]
            fn negative_infinity() -> Self {
                $t::NEG_INFINITY
            }

            #[inline]
            fn quiet_nan() -> Self {
                $t::NAN
            }
        }
    };
}

impl_primitive_limits!(f64, dummy_precision = 1e-12, max_digits10 = 17);
impl_primitive_limits!(f32, dummy_precision = 1e-5, max_digits10 = 9);

// Wrapped types: same flags, constants lifted through the constructor.
macro_rules! impl_wrapped_limits {
    ([$($g:tt)*] $ty:ty, $ctor:path, add_cost = $add:expr, mul_cost = $mul:expr) => {
        impl<$($g)*> NumericLimits for $ty {
            const IS_SIGNED: bool = T::IS_SIGNED;
            const IS_INTEGER: bool = T::IS_INTEGER;
            const IS_EXACT: bool = T::IS_EXACT;
            const IS_COMPLEX: bool = T::IS_COMPLEX;
            const RADIX: u32 = T::RADIX;
            const DIGITS: u32 = T::DIGITS;
            const DIGITS10: u32 = T::DIGITS10;
            const MAX_DIGITS10: u32 = T::MAX_DIGITS10;
            const MIN_EXPONENT: i32 = T::MIN_EXPONENT;
            const MAX_EXPONENT: i32 = T::MAX_EXPONENT;
            const MIN_EXPONENT10: i32 = T::MIN_EXPONENT10;
            const MAX_EXPONENT10: i32 = T::MAX_EXPONENT10;
            const HAS_INFINITY: bool = T::HAS_INFINITY;
            const HAS_QUIET_NAN: bool = T::HAS_QUIET_NAN;
            const REQUIRE_INITIALIZATION: bool = false;
            const READ_COST: u32 = T::READ_COST;
            const ADD_COST: u32 = $add;
            const MUL_COST: u32 = $mul;

            #[inline]
            fn machine_epsilon() -> Self {
                $ctor(T::machine_epsilon())
            }

            #[inline]
            fn dummy_precision() -> Self {
                $ctor(T::dummy_precision())
            }

            #[inline]
            fn min_positive() -> Self {
                $ctor(T::min_positive())
            }

            #[inline]
            fn denorm_min() -> Self {
                $ctor(T::denorm_min())
            }

            #[inline]
            fn highest() -> Self {
                $ctor(T::highest())
            }

            #[inline]
            fn lowest() -> Self {
                $ctor(T::lowest())
            }

            #[inline]
            fn positive_infinity() -> Self {
                $ctor(T::positive_infinity())
            }

            #[inline]
            fn negative_infinity() -> Self {
                $ctor(T::negative_infinity())
            }

            #[inline]
            fn quiet_nan() -> Self {
                $ctor(T::quiet_nan())
            }
        }
    };
}

impl_wrapped_limits!([T: Base] Real<T>, Real::new, add_cost = T::ADD_COST, mul_cost = T::MUL_COST);

// A dual add touches N+1 lanes; a dual multiply does 2N+1 base multiplies.
impl_wrapped_limits!(
    [T: Base, const N: usize] Dual<T, N>,
    Dual::constant,
    add_cost = T::ADD_COST * (N as u32 + 1),
    mul_cost = T::MUL_COST * (2 * N as u32 + 1) + T::ADD_COST * N as u32
);
