//! C math-library functions that [`num_traits::Float`] does not cover.
//!
//! `Float` already provides the trigonometric, hyperbolic, exponential and
//! rounding families. What is left of the C catalogue (error and gamma
//! functions, IEEE remainders, floating-point manipulation) lives here so that
//! `f32`, `f64`, [`Real`](crate::real::Real) and [`Dual`](crate::dual::Dual)
//! all expose one uniform surface. For the primitive floats every method
//! forwards to the `libm` crate.

/// Elementary functions beyond [`num_traits::Float`].
///
/// Method names deliberately avoid every name already on `Float`, so generic
/// code bounded by both traits never sees an ambiguous call.
pub trait Elementary: Sized {
    /// Error function.
    fn erf(self) -> Self;

    /// Complementary error function `1 - erf(x)`.
    fn erfc(self) -> Self;

    /// Gamma function.
    fn tgamma(self) -> Self;

    /// Natural log of `|Γ(x)|`.
    fn lgamma(self) -> Self;

    /// Remainder of truncated division (C `fmod`), sign of the dividend.
    fn fmod(self, denom: Self) -> Self;

    /// IEEE remainder: `x - n*y` with `n` the nearest integer to `x/y`.
    fn remainder(self, denom: Self) -> Self;

    /// IEEE remainder plus the low bits of the quotient.
    fn remquo(self, denom: Self) -> (Self, i32);

    /// Round to integral value, ties to even.
    fn rint(self) -> Self;

    /// Same as [`rint`](Elementary::rint): Rust never changes the rounding mode.
    fn nearbyint(self) -> Self {
        self.rint()
    }

    /// Next representable value after `self` in the direction of `toward`.
    fn nextafter(self, toward: Self) -> Self;

    /// Positive difference `max(x - y, 0)`.
    fn fdim(self, other: Self) -> Self;

    /// Maximum, ignoring a NaN operand.
    fn fmax(self, other: Self) -> Self;

    /// Minimum, ignoring a NaN operand.
    fn fmin(self, other: Self) -> Self;

    /// Fused multiply-add `self * y + z` with a single rounding.
    fn fma(self, y: Self, z: Self) -> Self;

    /// Split into a mantissa in `[0.5, 1)` and a power-of-two exponent.
    fn frexp(self) -> (Self, i32);

    /// `self * 2^exp`.
    fn ldexp(self, exp: i32) -> Self;

    /// `self * 2^exp` (radix is always 2 here, so identical to `ldexp`).
    fn scalbn(self, exp: i32) -> Self {
        self.ldexp(exp)
    }

    /// Unbiased binary exponent as an integer.
    fn ilogb(self) -> i32;

    /// Unbiased binary exponent as a float (`-inf` at zero, `+inf` at infinity).
    fn logb(self) -> Self;
}

macro_rules! impl_elementary_libm {
    (
        $t:ty,
        erf = $erf:ident,
        erfc = $erfc:ident,
        tgamma = $tgamma:ident,
        lgamma = $lgamma:ident,
        remainder = $remainder:ident,
        remquo = $remquo:ident,
        rint = $rint:ident,
        nextafter = $nextafter:ident,
        fdim = $fdim:ident,
        fmax = $fmax:ident,
        fmin = $fmin:ident,
        fma = $fma:ident,
        frexp = $frexp:ident,
        ldexp = $ldexp:ident,
        ilogb = $ilogb:ident $(,)?
    ) => {
        impl Elementary for $t {
            #[inline]
            fn erf(self) -> Self {
                libm::$erf(self)
            }

            #[inline]
            fn erfc(self) -> Self {
                libm::$erfc(self)
            }

            #[inline]
            fn tgamma(self) -> Self {
                libm::$tgamma(self)
            }

            #[inline]
            fn lgamma(self) -> Self {
                libm::$lgamma(self)
            }

            #[inline]
            fn fmod(self, denom: Self) -> Self {
                // Rust's float `%` is C `fmod`: exact, sign of the dividend.
                self % denom
            }

            #[inline]
            fn remainder(self, denom: Self) -> Self {
                libm::$remainder(self, denom)
            }

            #[inline]
            fn remquo(self, denom: Self) -> (Self, i32) {
                libm::$remquo(self, denom)
            }

            #[inline]
            fn rint(self) -> Self {
                libm::$rint(self)
            }

            #[inline]
            fn nextafter(self, toward: Self) -> Self {
                libm::$nextafter(self, toward)
            }

            #[inline]
            fn fdim(self, other: Self) -> Self {
                libm::$fdim(self, other)
            }

            #[inline]
            fn fmax(self, other: Self) -> Self {
                libm::$fmax(self, other)
            }

            #[inline]
            fn fmin(self, other: Self) -> Self {
                libm::$fmin(self, other)
            }

            #[inline]
            fn fma(self, y: Self, z: Self) -> Self {
                libm::$fma(self, y, z)
            }

            #[inline]
            fn frexp(self) -> (Self, i32) {
                libm::$frexp(self)
            }

            #[inline]
            fn ldexp(self, exp: i32) -> Self {
                libm::$ldexp(self, exp)
            }

            #[inline]
            fn ilogb(self) -> i32 {
                libm::$ilogb(self)
            }

            fn logb(self) -> Self {
                if self == 0.0 {
                    <$t>::NEG_INFINITY
                } else if self.is_nan() {
                    self
                } else if self.is_infinite() {
                    <$t>::INFINITY
                } else {
                    libm::$ilogb(self) as $t
                }
            }
        }
    };
}

impl_elementary_libm!(
    f64,
    erf = erf,
    erfc = erfc,
    tgamma = tgamma,
    lgamma = lgamma,
    remainder = remainder,
    remquo = remquo,
    rint = rint,
    nextafter = nextafter,
    fdim = fdim,
    fmax = fmax,
    fmin = fmin,
    fma = fma,
    frexp = frexp,
    ldexp = ldexp,
    ilogb = ilogb,
);

impl_elementary_libm!(
    f32,
    erf = erff,
    erfc = erfcf,
    tgamma = tgammaf,
    lgamma = lgammaf,
    remainder = remainderf,
    remquo = remquof,
    rint = rintf,
    nextafter = nextafterf,
    fdim = fdimf,
    fmax = fmaxf,
    fmin = fminf,
    fma = fmaf,
    frexp = frexpf,
    ldexp = ldexpf,
    ilogb = ilogbf,
);
