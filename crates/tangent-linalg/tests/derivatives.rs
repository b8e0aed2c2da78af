//! Derivatives propagated through the decompositions, checked against
//! closed forms and central finite differences.

use approx::assert_relative_eq;
use nalgebra::{DMatrix, DVector};
use tangent_ad::{Dual, Real};
use tangent_linalg::{ColPivQr, Eigen, EigenConfig, Lu, solve};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Lift `a` to one-lane duals, seeding entry `(si, sj)`.
fn seeded(a: &DMatrix<f64>, si: usize, sj: usize) -> DMatrix<Dual<f64, 1>> {
    DMatrix::from_fn(a.nrows(), a.ncols(), |i, j| {
        if (i, j) == (si, sj) { Dual::variable(a[(i, j)], 0) } else { Dual::constant(a[(i, j)]) }
    })
}

fn bumped(a: &DMatrix<f64>, i: usize, j: usize, h: f64) -> DMatrix<f64> {
    let mut out = a.clone();
    out[(i, j)] += h;
    out
}

fn non_symmetric() -> DMatrix<f64> {
    // Eigenvalues 5, 2, 1.
    DMatrix::from_row_slice(3, 3, &[4.0, 1.0, 2.0, 1.0, 3.0, 0.0, 0.5, 1.0, 1.0])
}

// ---------------------------------------------------------------------------
// Linear solve
// ---------------------------------------------------------------------------

#[test]
fn solve_two_by_two_over_every_scalar() {
    let a = DMatrix::from_row_slice(2, 2, &[2.0, -1.0, 8.0, 3.0]);
    let b = DVector::from_vec(vec![3.0, 5.0]);

    let plain = solve(a.clone(), &b).unwrap();
    assert_relative_eq!(plain[0], 1.0, epsilon = 1e-12);
    assert_relative_eq!(plain[1], -1.0, epsilon = 1e-12);

    let wrapped = solve(a.map(Real::new), &b.map(Real::new)).unwrap();
    assert_eq!(wrapped[0].value(), plain[0]);
    assert_eq!(wrapped[1].value(), plain[1]);

    let dual = solve(a.map(Dual::<f64, 2>::constant), &b.map(Dual::constant)).unwrap();
    assert_eq!(dual[0].value(), plain[0]);
    assert_eq!(dual[0].dot, [0.0, 0.0]);
}

#[test]
fn solve_derivative_wrt_rhs_is_inverse_column() {
    let a = DMatrix::from_row_slice(2, 2, &[2.0, -1.0, 8.0, 3.0]);
    let b = DVector::from_vec(vec![Dual::<f64, 1>::variable(3.0, 0), Dual::constant(5.0)]);
    let x = solve(a.map(Dual::constant), &b).unwrap();
    // A⁻¹ = [[3, 1], [-8, 2]] / 14.
    assert_relative_eq!(x[0].derivative(0), 3.0 / 14.0, epsilon = 1e-12);
    assert_relative_eq!(x[1].derivative(0), -8.0 / 14.0, epsilon = 1e-12);
}

#[test]
fn inverse_derivative_matches_closed_form() {
    let a = DMatrix::from_row_slice(3, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 10.0]);
    let inv = Lu::new(a.clone()).unwrap().inverse();
    let dinv = Lu::new(seeded(&a, 0, 1)).unwrap().inverse();

    // d(A⁻¹) = -A⁻¹ E₀₁ A⁻¹
    let mut e01 = DMatrix::<f64>::zeros(3, 3);
    e01[(0, 1)] = 1.0;
    let expected = -(&inv * e01 * &inv);
    for i in 0..3 {
        for j in 0..3 {
            assert_relative_eq!(dinv[(i, j)].value(), inv[(i, j)], epsilon = 1e-12);
            assert_relative_eq!(dinv[(i, j)].derivative(0), expected[(i, j)], epsilon = 1e-10);
        }
    }
}

#[test]
fn least_squares_derivative_matches_finite_difference() {
    let a = DMatrix::from_row_slice(4, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0, 1.0, 3.0]);
    let b = DVector::from_vec(vec![1.1, 2.9, 5.2, 6.8]);
    let h = 1e-6;

    for (si, sj) in [(0, 1), (2, 0), (3, 1)] {
        let x = ColPivQr::new(seeded(&a, si, sj)).solve(&b.map(Dual::constant)).unwrap();
        let xp = ColPivQr::new(bumped(&a, si, sj, h)).solve(&b).unwrap();
        let xm = ColPivQr::new(bumped(&a, si, sj, -h)).solve(&b).unwrap();
        for k in 0..2 {
            let fd = (xp[k] - xm[k]) / (2.0 * h);
            assert_relative_eq!(x[k].derivative(0), fd, epsilon = 1e-6);
        }
    }
}

// ---------------------------------------------------------------------------
// Eigen-decomposition
// ---------------------------------------------------------------------------

#[test]
fn companion_matrix_principal_pair() {
    let a = DMatrix::from_row_slice(2, 2, &[0.0, 1.0, -2.0, -3.0]);
    let h = std::f64::consts::FRAC_1_SQRT_2;

    let wrapped = Eigen::new(a.map(Real::new), &EigenConfig::default()).unwrap();
    let (lambda, v) = wrapped.principal().unwrap();
    assert_relative_eq!(lambda.value(), -1.0, epsilon = 1e-12);
    assert_relative_eq!(v[0].value(), h, epsilon = 1e-3);
    assert_relative_eq!(v[1].value(), -h, epsilon = 1e-3);

    let dual = Eigen::new(a.map(Dual::<f64, 1>::constant), &EigenConfig::default()).unwrap();
    let (lambda, v) = dual.principal().unwrap();
    assert_relative_eq!(lambda.value(), -1.0, epsilon = 1e-12);
    assert_relative_eq!(v[0].value(), h, epsilon = 1e-3);
    assert_relative_eq!(v[1].value(), -h, epsilon = 1e-3);
    assert_eq!(lambda.derivative(0), 0.0);
}

#[test]
fn companion_matrix_eigenvalue_tangents() {
    // dλ/da₁₁ = w₁ v₁ / wᵀv: -1 for λ = -1 and 2 for λ = -2.
    let a = DMatrix::from_row_slice(2, 2, &[0.0, 1.0, -2.0, -3.0]);
    let e = Eigen::new(seeded(&a, 1, 1), &EigenConfig::default()).unwrap();
    let values = e.eigenvalues();
    assert_relative_eq!(values[0].value(), -1.0, epsilon = 1e-12);
    assert_relative_eq!(values[1].value(), -2.0, epsilon = 1e-12);
    assert_relative_eq!(values[0].derivative(0), -1.0, epsilon = 1e-10);
    assert_relative_eq!(values[1].derivative(0), 2.0, epsilon = 1e-10);
}

#[test]
fn eigen_derivatives_match_finite_difference() {
    let a = non_symmetric();
    let cfg = EigenConfig::default();
    let h = 1e-6;

    for (si, sj) in [(0, 0), (0, 2), (2, 1), (1, 0)] {
        let e = Eigen::new(seeded(&a, si, sj), &cfg).unwrap();
        let ep = Eigen::new(bumped(&a, si, sj, h), &cfg).unwrap();
        let em = Eigen::new(bumped(&a, si, sj, -h), &cfg).unwrap();
        for k in 0..3 {
            let fd = (ep.eigenvalues()[k] - em.eigenvalues()[k]) / (2.0 * h);
            assert_relative_eq!(e.eigenvalues()[k].derivative(0), fd, epsilon = 1e-5);
            for i in 0..3 {
                let fd = (ep.eigenvectors()[(i, k)] - em.eigenvectors()[(i, k)]) / (2.0 * h);
                assert_relative_eq!(e.eigenvectors()[(i, k)].derivative(0), fd, epsilon = 1e-5);
            }
        }
    }
}

#[test]
fn eigenvalue_tangents_sum_to_trace_tangent() {
    // Σλ = tr(A), so seeding every diagonal entry gives Σ dλ = n.
    let a = non_symmetric();
    let ad = DMatrix::from_fn(3, 3, |i, j| {
        if i == j { Dual::<f64, 1>::variable(a[(i, j)], 0) } else { Dual::constant(a[(i, j)]) }
    });
    let e = Eigen::new(ad, &EigenConfig::default()).unwrap();
    let total: f64 = e.eigenvalues().iter().map(|l| l.derivative(0)).sum();
    assert_relative_eq!(total, 3.0, epsilon = 1e-10);
}
