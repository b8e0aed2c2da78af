//! Real eigen-decomposition of a general (non-symmetric) square matrix.
//!
//! Eigenvalues are located on the values of the matrix: Householder
//! reduction to upper Hessenberg form, then Wilkinson-shifted QR sweeps with
//! Givens rotations and bottom-up deflation. Each eigenvalue is then refined
//! in `S` arithmetic by the generalized Rayleigh quotient
//!
//! ```text
//! λ = wᵀ A v / wᵀ v
//! ```
//!
//! with `w`, `v` the left and right eigenvectors at the located value. Because
//! `w` and `v` are exact eigenvectors, the tangent of `λ` is the first-order
//! sensitivity `wᵀ dA v / wᵀ v`. Eigenvectors are the null vectors of
//! `A - λ I` (complete-pivoting elimination, free variable set to one), so
//! their tangents follow from the refined `λ`.
//!
//! Only real spectra are supported: a complex conjugate pair is reported as
//! [`Error::Computation`].

use crate::max_abs;
use crate::qr::Reflector;
use nalgebra::{DMatrix, DVector};
use num_traits::{Float, FromPrimitive, One, Zero};
use std::cmp::Ordering;
use std::fmt::Debug;
use tangent_ad::{NumericLimits, Scalar};
use tangent_core::{Error, Result};

/// Configuration for [`Eigen::new`].
#[derive(Debug, Clone)]
pub struct EigenConfig {
    /// QR sweeps allowed per matrix dimension (an `n x n` matrix gets `n` times this).
    pub max_sweeps_per_dim: usize,
    /// Relative deflation tolerance; `None` uses the machine epsilon of the base type.
    pub tol: Option<f64>,
}

impl Default for EigenConfig {
    fn default() -> Self {
        Self { max_sweeps_per_dim: 100, tol: None }
    }
}

/// Eigenvalues (descending) and unit eigenvectors (as columns, first
/// significant component positive).
#[derive(Debug, Clone)]
pub struct Eigen<S: Scalar> {
    values: DVector<S>,
    vectors: DMatrix<S>,
    sweeps: usize,
}

impl<S: Scalar> Eigen<S> {
    /// Decompose the square matrix `a`.
    ///
    /// # Errors
    /// - [`Error::Dimension`] if `a` is not square
    /// - [`Error::Validation`] if an entry is NaN or infinite
    /// - [`Error::Computation`] if the spectrum has a complex pair
    /// - [`Error::NotConverged`] if the sweep budget runs out
    pub fn new(a: DMatrix<S>, config: &EigenConfig) -> Result<Self> {
        let n = a.nrows();
        if a.ncols() != n {
            return Err(Error::dimension("square matrix", format!("{}x{}", n, a.ncols())));
        }
        if a.iter().any(|x| !x.value().is_finite()) {
            return Err(Error::Validation("matrix has non-finite entries".to_string()));
        }
        if n == 0 {
            return Ok(Self { values: DVector::zeros(0), vectors: DMatrix::zeros(0, 0), sweeps: 0 });
        }

        let eps = S::Base::machine_epsilon();
        let tol = config.tol.and_then(S::Base::from_f64).unwrap_or(eps);
        let scale = max_abs(&a);
        let scale = if scale > S::Base::zero() { scale } else { S::Base::one() };

        let vals = a.map(|x| x.value());
        let mut h = vals.clone();
        hessenberg(&mut h);
        let cap = config.max_sweeps_per_dim.saturating_mul(n);
        let (mut lambdas, sweeps) = hessenberg_qr(h, tol, scale, cap)?;
        lambdas.sort_by(|x, y| y.partial_cmp(x).unwrap_or(Ordering::Equal));
        log::debug!("eigen: {n}x{n} converged after {sweeps} QR sweeps");

        // Eigenvalues closer than this share one null space.
        let null_tol = eps.sqrt() * scale;

        let mut values = Vec::with_capacity(n);
        let mut vectors = DMatrix::<S>::zeros(n, n);
        let mut start = 0;
        while start < n {
            let mut end = start + 1;
            while end < n && lambdas[end - 1] - lambdas[end] <= null_tol {
                end += 1;
            }
            let size = end - start;
            let mean = lambdas[start..end].iter().fold(S::Base::zero(), |acc, &l| acc + l)
                / S::Base::from_usize(size).unwrap_or_else(S::Base::one);
            if size > 1 {
                log::debug!("eigen: eigenvalue {mean:?} has multiplicity {size}");
            }

            let shifted = shift_diagonal(&vals, mean);
            let right = null_basis(shifted.clone(), null_tol, size);
            let left = null_basis(shifted.transpose(), null_tol, size);

            for t in 0..size {
                let v0 = &right[t.min(right.len() - 1)];
                let w0 = &left[t.min(left.len() - 1)];
                let lambda = rayleigh(&a, w0, v0, lambdas[start + t]);

                let null_tol_s = S::from_base(null_tol);
                let basis = null_basis(shift_diagonal(&a, lambda), null_tol_s, t + 1);
                let v = normalize(basis[t.min(basis.len() - 1)].clone());
                for i in 0..n {
                    vectors[(i, start + t)] = v[i];
                }
                values.push(lambda);
            }
            start = end;
        }

        Ok(Self { values: DVector::from_vec(values), vectors, sweeps })
    }

    /// Eigenvalues, largest first.
    pub fn eigenvalues(&self) -> &DVector<S> {
        &self.values
    }

    /// Eigenvectors as columns, in the order of [`eigenvalues`](Eigen::eigenvalues).
    pub fn eigenvectors(&self) -> &DMatrix<S> {
        &self.vectors
    }

    /// Largest eigenvalue and its eigenvector; `None` for a 0x0 matrix.
    pub fn principal(&self) -> Option<(S, DVector<S>)> {
        if self.values.is_empty() {
            return None;
        }
        Some((self.values[0], self.vectors.column(0).into_owned()))
    }

    /// QR sweeps spent locating the eigenvalues.
    pub fn sweeps(&self) -> usize {
        self.sweeps
    }
}

/// `m - lambda I`.
fn shift_diagonal<X: Float + Debug + 'static>(m: &DMatrix<X>, lambda: X) -> DMatrix<X> {
    let mut out = m.clone();
    for i in 0..out.nrows() {
        out[(i, i)] = out[(i, i)] - lambda;
    }
    out
}

/// Generalized Rayleigh quotient `wᵀ A v / wᵀ v` with constant `w`, `v`.
///
/// Falls back to the located value (no tangent) when `wᵀ v` vanishes, which
/// happens only for a defective eigenvalue.
fn rayleigh<S: Scalar>(
    a: &DMatrix<S>,
    w: &DVector<S::Base>,
    v: &DVector<S::Base>,
    located: S::Base,
) -> S {
    let n = a.nrows();
    let zero = S::Base::zero();
    let den = (0..n).fold(zero, |acc, i| acc + w[i] * v[i]);
    let norms = w.iter().fold(zero, |acc, &x| acc + x * x).sqrt()
        * v.iter().fold(zero, |acc, &x| acc + x * x).sqrt();
    if den.abs() <= S::Base::machine_epsilon().sqrt() * norms {
        log::warn!("eigen: defective eigenvalue {located:?}; derivative not propagated");
        return S::from_base(located);
    }

    let mut num = S::zero();
    for i in 0..n {
        for j in 0..n {
            let c = w[i] * v[j];
            if c != zero {
                num += a[(i, j)] * S::from_base(c);
            }
        }
    }
    num / S::from_base(den)
}

/// Scale to unit length; flip so the first significant component is positive.
fn normalize<S: Scalar>(v: DVector<S>) -> DVector<S> {
    let norm = v.iter().fold(S::zero(), |acc, &x| acc + x * x).sqrt();
    let mut v = v.map(|x| x / norm);
    let cutoff = S::Base::machine_epsilon().sqrt();
    if let Some(first) = v.iter().find(|x| x.value().abs() > cutoff) {
        if first.value() < S::Base::zero() {
            v = v.map(|x| -x);
        }
    }
    v
}

/// Up to `want` null vectors of the square matrix `m`.
///
/// Gaussian elimination with complete pivoting stops after at most `n - 1`
/// pivots, or when the largest remaining entry is at most `tol`; each free
/// column in turn is set to one and the others to zero. Always returns at
/// least one vector for `n > 0`.
fn null_basis<X: Float + Debug + 'static>(
    mut m: DMatrix<X>,
    tol: X,
    want: usize,
) -> Vec<DVector<X>> {
    let n = m.nrows();
    let mut cols: Vec<usize> = (0..n).collect();
    let mut rank = 0;

    while rank + 1 < n {
        let k = rank;
        let (mut p, mut q, mut best) = (k, k, X::zero());
        for j in k..n {
            for i in k..n {
                let v = m[(i, j)].abs();
                if v > best {
                    best = v;
                    p = i;
                    q = j;
                }
            }
        }
        if best <= tol {
            break;
        }
        m.swap_rows(k, p);
        m.swap_columns(k, q);
        cols.swap(k, q);

        let pivot = m[(k, k)];
        for i in k + 1..n {
            let f = m[(i, k)] / pivot;
            for j in k..n {
                let u = m[(k, j)];
                let cur = m[(i, j)];
                m[(i, j)] = cur - f * u;
            }
        }
        rank += 1;
    }

    let free = n - rank;
    (0..want.clamp(1, free.max(1)))
        .map(|t| {
            let mut y = vec![X::zero(); n];
            y[rank + t] = X::one();
            for k in (0..rank).rev() {
                let s = (k + 1..n).fold(X::zero(), |acc, j| acc + m[(k, j)] * y[j]);
                y[k] = -s / m[(k, k)];
            }
            let mut v = DVector::zeros(n);
            for (j, &c) in cols.iter().enumerate() {
                v[c] = y[j];
            }
            v
        })
        .collect()
}

/// In-place Householder reduction to upper Hessenberg form (similarity).
fn hessenberg<X: Float + Debug + 'static>(h: &mut DMatrix<X>) {
    let n = h.nrows();
    for k in 0..n.saturating_sub(2) {
        let x: Vec<X> = (k + 1..n).map(|i| h[(i, k)]).collect();
        let Some(refl) = Reflector::new(&x) else { continue };
        refl.apply_left(h, k + 1, k + 1..n);
        h[(k + 1, k)] = refl.alpha;
        for i in k + 2..n {
            h[(i, k)] = X::zero();
        }
        refl.apply_right(h, k + 1, 0..n);
    }
}

/// Real eigenvalues of the trailing 2x2 block `[[a, b], [c, d]]`, larger first.
fn eig2<X: Float>(a: X, b: X, c: X, d: X) -> Option<(X, X)> {
    let two = X::one() + X::one();
    let mid = (a + d) / two;
    let half = (a - d) / two;
    let disc = half * half + b * c;
    if disc < X::zero() {
        return None;
    }
    let root = disc.sqrt();
    Some((mid + root, mid - root))
}

/// Shifted QR iteration on an upper Hessenberg matrix. Returns the eigenvalues
/// (unordered) and the number of sweeps used.
fn hessenberg_qr<X: Float + Debug + 'static>(
    mut h: DMatrix<X>,
    tol: X,
    scale: X,
    max_sweeps: usize,
) -> Result<(Vec<X>, usize)> {
    let n = h.nrows();
    let mut eigs = vec![X::zero(); n];
    let mut hi = n;
    let mut sweeps = 0;
    let mut since_deflation = 0;

    while hi > 0 {
        let end = hi - 1;

        // Start of the unreduced block ending at `end`.
        let mut lo = end;
        while lo > 0 {
            let s = h[(lo - 1, lo - 1)].abs() + h[(lo, lo)].abs();
            let s = if s == X::zero() { scale } else { s };
            if h[(lo, lo - 1)].abs() <= tol * s {
                h[(lo, lo - 1)] = X::zero();
                break;
            }
            lo -= 1;
        }

        if lo == end {
            eigs[end] = h[(end, end)];
            hi -= 1;
            since_deflation = 0;
            continue;
        }
        if lo + 1 == end {
            let (a, b, c, d) = (h[(lo, lo)], h[(lo, end)], h[(end, lo)], h[(end, end)]);
            match eig2(a, b, c, d) {
                Some((l1, l2)) => {
                    eigs[lo] = l1;
                    eigs[end] = l2;
                    hi -= 2;
                    since_deflation = 0;
                    continue;
                }
                None => {
                    log::warn!("eigen: complex eigenvalue pair in rows {lo}..={end}");
                    return Err(Error::Computation(
                        "complex conjugate eigenvalue pair; only real spectra are supported"
                            .to_string(),
                    ));
                }
            }
        }

        if sweeps >= max_sweeps {
            log::warn!("eigen: QR iteration hit its cap of {max_sweeps} sweeps");
            return Err(Error::NotConverged { iterations: sweeps });
        }
        sweeps += 1;
        since_deflation += 1;

        let d = h[(end, end)];
        let mu = if since_deflation % 10 == 0 {
            // Exceptional shift to break a stalled cycle.
            d + h[(end, end - 1)].abs()
        } else {
            wilkinson(h[(end - 1, end - 1)], h[(end - 1, end)], h[(end, end - 1)], d)
        };
        qr_sweep(&mut h, lo, end, mu);
    }

    Ok((eigs, sweeps))
}

/// Eigenvalue of `[[a, b], [c, d]]` closest to `d`, or `d` itself when the
/// pair is complex.
fn wilkinson<X: Float>(a: X, b: X, c: X, d: X) -> X {
    match eig2(a, b, c, d) {
        Some((l1, l2)) => {
            if (l1 - d).abs() <= (l2 - d).abs() {
                l1
            } else {
                l2
            }
        }
        None => d,
    }
}

/// One explicitly shifted QR sweep on the block `lo..=end`:
/// `H - mu I = Q R`, then `H ← R Q + mu I`, with Q a product of Givens rotations.
fn qr_sweep<X: Float + Debug + 'static>(h: &mut DMatrix<X>, lo: usize, end: usize, mu: X) {
    for i in lo..=end {
        h[(i, i)] = h[(i, i)] - mu;
    }

    let mut rotations = Vec::with_capacity(end - lo);
    for k in lo..end {
        let (a, b) = (h[(k, k)], h[(k + 1, k)]);
        let r = a.hypot(b);
        let (c, s) = if r == X::zero() { (X::one(), X::zero()) } else { (a / r, b / r) };
        for j in k..=end {
            let (x, y) = (h[(k, j)], h[(k + 1, j)]);
            h[(k, j)] = c * x + s * y;
            h[(k + 1, j)] = c * y - s * x;
        }
        rotations.push((c, s));
    }

    for (offset, (c, s)) in rotations.into_iter().enumerate() {
        let k = lo + offset;
        for i in lo..=end {
            let (x, y) = (h[(i, k)], h[(i, k + 1)]);
            h[(i, k)] = c * x + s * y;
            h[(i, k + 1)] = c * y - s * x;
        }
    }

    for i in lo..=end {
        h[(i, i)] = h[(i, i)] + mu;
    }
}
