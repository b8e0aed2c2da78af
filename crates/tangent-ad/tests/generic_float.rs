//! Third-party style generic code, written only against `num_traits::Float`,
//! run over the wrapper types.

use approx::assert_relative_eq;
use num_traits::{Float, FromPrimitive};
use tangent_ad::{Dual, Real};

/// Newton's method for the root of `x^3 - c`, knowing nothing about AD.
fn cube_root<F: Float>(c: F) -> F {
    let three = F::from(3.0).unwrap_or_else(F::one);
    let mut x = c.max(F::one());
    for _ in 0..60 {
        let step = (x * x * x - c) / (three * x * x);
        x = x - step;
        if step.abs() <= F::epsilon() * x.abs() {
            break;
        }
    }
    x
}

/// Numerically stable `ln Σ exp(x_i)`.
fn log_sum_exp<F: Float>(xs: &[F]) -> F {
    let m = xs.iter().fold(F::neg_infinity(), |acc, &x| acc.max(x));
    if !m.is_finite() {
        return m;
    }
    m + xs.iter().fold(F::zero(), |acc, &x| acc + (x - m).exp()).ln()
}

/// Trapezoid rule on `[a, b]` with `n` panels.
fn trapezoid<F: Float + FromPrimitive>(f: impl Fn(F) -> F, a: F, b: F, n: usize) -> F {
    let h = (b - a) / F::from_usize(n).unwrap_or_else(F::one);
    let two = F::one() + F::one();
    let mut acc = (f(a) + f(b)) / two;
    for i in 1..n {
        acc = acc + f(a + h * F::from_usize(i).unwrap_or_else(F::zero));
    }
    acc * h
}

#[test]
fn newton_over_dual_differentiates_the_fixed_point() {
    // d cbrt(c) / dc = 1 / (3 c^(2/3)); at c = 8 that is 1/12.
    let r = cube_root(Dual::<f64, 1>::variable(8.0, 0));
    assert_relative_eq!(r.value(), 2.0, epsilon = 1e-12);
    assert_relative_eq!(r.derivative(0), 1.0 / 12.0, epsilon = 1e-10);

    let plain = cube_root(8.0_f64);
    assert_eq!(cube_root(Real::new(8.0)).value(), plain);
}

#[test]
fn log_sum_exp_gradient_is_softmax() {
    let xs = Dual::<f64, 3>::seed([1.0, 2.0, 3.0]);
    let lse = log_sum_exp(&xs);
    let z: f64 = [1.0_f64, 2.0, 3.0].iter().map(|x| x.exp()).sum();
    assert_relative_eq!(lse.value(), z.ln(), epsilon = 1e-12);
    for (i, x) in [1.0_f64, 2.0, 3.0].iter().enumerate() {
        assert_relative_eq!(lse.derivative(i), x.exp() / z, epsilon = 1e-12);
    }
    let total: f64 = lse.dot.iter().sum();
    assert_relative_eq!(total, 1.0, epsilon = 1e-12);
}

#[test]
fn log_sum_exp_passes_infinities_through() {
    let xs = [Dual::<f64, 1>::constant(f64::NEG_INFINITY); 2];
    assert_eq!(log_sum_exp(&xs).value(), f64::NEG_INFINITY);
}

#[test]
fn quadrature_differentiates_under_the_integral() {
    // I(k) = ∫₀¹ sin(k x) dx = (1 - cos k) / k, so I'(1) = sin 1 - (1 - cos 1).
    let k = Dual::<f64, 1>::variable(1.0, 0);
    let zero = Dual::constant(0.0);
    let one = Dual::constant(1.0);
    let i = trapezoid(|x| (k * x).sin(), zero, one, 2000);
    let expected = 1.0_f64.sin() - (1.0 - 1.0_f64.cos());
    assert_relative_eq!(i.value(), 1.0 - 1.0_f64.cos(), epsilon = 1e-6);
    assert_relative_eq!(i.derivative(0), expected, epsilon = 1e-6);
}

#[test]
fn f32_lanes_work_the_same_way() {
    let r = cube_root(Dual::<f32, 1>::variable(27.0, 0));
    assert_relative_eq!(r.value(), 3.0, epsilon = 1e-5);
    assert_relative_eq!(r.derivative(0), 1.0 / 27.0, epsilon = 1e-5);
}
