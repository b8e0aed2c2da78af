//! `num-traits` integration for [`Real`] and [`Dual`].
//!
//! With these impls both wrappers satisfy `num_traits::Float`, so any code
//! written against `Float` (or against [`Scalar`](crate::scalar::Scalar))
//! runs unchanged on them. Every method forwards to the inherent method of
//! the same name; Rust resolves `Self::name` to the inherent one first.

use crate::base::Base;
use crate::dual::Dual;
use crate::elementary::Elementary;
use crate::limits::NumericLimits;
use crate::real::Real;
use num_traits::{
    Bounded, Float, FloatConst, FromPrimitive, Num, NumCast, One, Signed, ToPrimitive, Zero,
};
use std::num::FpCategory;

macro_rules! impl_num_traits {
    ([$($g:tt)*] $ty:ty, $ctor:path) => {
        impl<$($g)*> Zero for $ty {
            #[inline]
            fn zero() -> Self {
                $ctor(T::zero())
            }

            #[inline]
            fn is_zero(&self) -> bool {
                self.value().is_zero()
            }
        }

        impl<$($g)*> One for $ty {
            #[inline]
            fn one() -> Self {
                $ctor(T::one())
            }
        }

        impl<$($g)*> Num for $ty {
            type FromStrRadixErr = <T as Num>::FromStrRadixErr;

            fn from_str_radix(s: &str, radix: u32) -> Result<Self, Self::FromStrRadixErr> {
                T::from_str_radix(s, radix).map($ctor)
            }
        }

        impl<$($g)*> ToPrimitive for $ty {
            #[inline]
            fn to_i64(&self) -> Option<i64> {
                self.value().to_i64()
            }

            #[inline]
            fn to_u64(&self) -> Option<u64> {
                self.value().to_u64()
            }

            #[inline]
            fn to_f32(&self) -> Option<f32> {
                self.value().to_f32()
            }

            #[inline]
            fn to_f64(&self) -> Option<f64> {
                self.value().to_f64()
            }
        }

        impl<$($g)*> NumCast for $ty {
            #[inline]
            fn from<P: ToPrimitive>(n: P) -> Option<Self> {
                <T as NumCast>::from(n).map($ctor)
            }
        }

        impl<$($g)*> FromPrimitive for $ty {
            #[inline]
            fn from_i64(n: i64) -> Option<Self> {
                T::from_i64(n).map($ctor)
            }

            #[inline]
            fn from_u64(n: u64) -> Option<Self> {
                T::from_u64(n).map($ctor)
            }

            #[inline]
            fn from_f32(n: f32) -> Option<Self> {
                T::from_f32(n).map($ctor)
            }

            #[inline]
            fn from_f64(n: f64) -> Option<Self> {
                T::from_f64(n).map($ctor)
            }
        }

        impl<$($g)*> Signed for $ty {
            #[inline]
            fn abs(&self) -> Self {
                Self::abs(*self)
            }

            #[inline]
            fn abs_sub(&self, other: &Self) -> Self {
                Self::abs_sub(*self, *other)
            }

            #[inline]
            fn signum(&self) -> Self {
                Self::signum(*self)
            }

            #[inline]
            fn is_positive(&self) -> bool {
                self.value().is_sign_positive()
            }

            #[inline]
            fn is_negative(&self) -> bool {
                self.value().is_sign_negative()
            }
        }

        impl<$($g)*> Bounded for $ty {
            #[inline]
            fn min_value() -> Self {
                <Self as NumericLimits>::lowest()
            }

            #[inline]
            fn max_value() -> Self {
                <Self as NumericLimits>::highest()
            }
        }

        impl<$($g)*> FloatConst for $ty {
            impl_num_traits!(@consts $ctor;
                E, FRAC_1_PI, FRAC_1_SQRT_2, FRAC_2_PI, FRAC_2_SQRT_PI, FRAC_PI_2, FRAC_PI_3,
                FRAC_PI_4, FRAC_PI_6, FRAC_PI_8, LN_10, LN_2, LOG10_E, LOG2_E, PI, SQRT_2, TAU,
                LOG10_2, LOG2_10);
        }

        impl<$($g)*> Float for $ty {
            #[inline]
            fn nan() -> Self {
                $ctor(T::nan())
            }

            #[inline]
            fn infinity() -> Self {
                $ctor(T::infinity())
            }

            #[inline]
            fn neg_infinity() -> Self {
                $ctor(T::neg_infinity())
            }

            #[inline]
            fn neg_zero() -> Self {
                $ctor(T::neg_zero())
            }

            #[inline]
            fn min_value() -> Self {
                $ctor(<T as Float>::min_value())
            }

            #[inline]
            fn min_positive_value() -> Self {
                $ctor(T::min_positive_value())
            }

            #[inline]
            fn epsilon() -> Self {
                $ctor(<T as Float>::epsilon())
            }

            #[inline]
            fn max_value() -> Self {
                $ctor(<T as Float>::max_value())
            }

            #[inline]
            fn classify(self) -> FpCategory {
                Self::classify(self)
            }

            #[inline]
            fn integer_decode(self) -> (u64, i16, i8) {
                Self::integer_decode(self)
            }

            #[inline]
            fn powi(self, n: i32) -> Self {
                Self::powi(self, n)
            }

            #[inline]
            fn sin_cos(self) -> (Self, Self) {
                Self::sin_cos(self)
            }

            #[inline]
            fn mul_add(self, a: Self, b: Self) -> Self {
                Self::mul_add(self, a, b)
            }

            impl_num_traits!(@predicates
                is_nan, is_infinite, is_finite, is_normal, is_sign_positive, is_sign_negative);

            impl_num_traits!(@unary
                floor, ceil, round, trunc, fract, abs, signum, recip, sqrt, exp, exp2, ln,
                log2, log10, to_degrees, to_radians, cbrt, sin, cos, tan, asin, acos, atan,
                exp_m1, ln_1p, sinh, cosh, tanh, asinh, acosh, atanh);

            impl_num_traits!(@binary powf, log, max, min, abs_sub, hypot, atan2, copysign);
        }

        impl<$($g)*> Elementary for $ty {
            impl_num_traits!(@unary erf, erfc, tgamma, lgamma, rint, nearbyint, logb);

            impl_num_traits!(@binary fmod, remainder, nextafter, fdim, fmax, fmin);

            #[inline]
            fn remquo(self, denom: Self) -> (Self, i32) {
                Self::remquo(self, denom)
            }

            #[inline]
            fn fma(self, y: Self, z: Self) -> Self {
                Self::fma(self, y, z)
            }

            #[inline]
            fn frexp(self) -> (Self, i32) {
                Self::frexp(self)
            }

            #[inline]
            fn ldexp(self, exp: i32) -> Self {
                Self::ldexp(self, exp)
            }

            #[inline]
            fn scalbn(self, exp: i32) -> Self {
                Self::scalbn(self, exp)
            }

            #[inline]
            fn ilogb(self) -> i32 {
                Self::ilogb(self)
            }
        }
    };

    (@consts $ctor:path; $($name:ident),*) => {
        $(
            #[inline]
            #[allow(non_snake_case)]
            fn $name() -> Self {
                $ctor(T::$name())
            }
        )*
    };

    (@predicates $($name:ident),*) => {
        $(
            #[inline]
            fn $name(self) -> bool {
                Self::$name(self)
            }
        )*
    };

    (@unary $($name:ident),*) => {
        $(
            #[inline]
            fn $name(self) -> Self {
                Self::$name(self)
            }
        )*
    };

    (@binary $($name:ident),*) => {
        $(
            #[inline]
            fn $name(self, other: Self) -> Self {
                Self::$name(self, other)
            }
        )*
    };
}

impl_num_traits!([T: Base] Real<T>, Real::new);
impl_num_traits!([T: Base, const N: usize] Dual<T, N>, Dual::constant);
