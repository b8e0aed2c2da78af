//! Householder QR with column pivoting: `A P = Q R`.
//!
//! Also home of the [`Reflector`] shared with the Hessenberg reduction in
//! [`eigen`](crate::eigen).

use nalgebra::{DMatrix, DVector};
use num_traits::{Float, Zero};
use std::fmt::Debug;
use std::ops::Range;
use tangent_ad::Scalar;
use tangent_core::{Error, Result};

/// Householder reflector `I - beta v vᵀ` that maps `x` onto `alpha e₀`.
#[derive(Debug, Clone)]
pub(crate) struct Reflector<X> {
    pub(crate) v: Vec<X>,
    pub(crate) beta: X,
    pub(crate) alpha: X,
}

impl<X: Float + Debug + 'static> Reflector<X> {
    /// Build the reflector for `x`. `None` when `x` is exactly zero.
    ///
    /// `alpha` takes the sign opposite to `x[0]` (decided on the value), so
    /// `v[0] = x[0] - alpha` never cancels.
    pub(crate) fn new(x: &[X]) -> Option<Self> {
        let first = *x.first()?;
        let norm = x.iter().fold(X::zero(), |acc, &xi| acc + xi * xi).sqrt();
        if norm == X::zero() {
            return None;
        }
        let alpha = if first >= X::zero() { -norm } else { norm };
        let mut v = x.to_vec();
        v[0] = first - alpha;
        let vtv = v.iter().fold(X::zero(), |acc, &vi| acc + vi * vi);
        if vtv == X::zero() {
            return None;
        }
        Some(Self { v, beta: (X::one() + X::one()) / vtv, alpha })
    }

    /// `m ← H m` on rows `r0..r0+len(v)`, columns `cols`.
    pub(crate) fn apply_left(&self, m: &mut DMatrix<X>, r0: usize, cols: Range<usize>) {
        for j in cols {
            let s = self
                .v
                .iter()
                .enumerate()
                .fold(X::zero(), |acc, (i, &vi)| acc + vi * m[(r0 + i, j)])
                * self.beta;
            for (i, &vi) in self.v.iter().enumerate() {
                let cur = m[(r0 + i, j)];
                m[(r0 + i, j)] = cur - s * vi;
            }
        }
    }

    /// `m ← m H` on columns `c0..c0+len(v)`, rows `rows`.
    pub(crate) fn apply_right(&self, m: &mut DMatrix<X>, c0: usize, rows: Range<usize>) {
        for i in rows {
            let s = self
                .v
                .iter()
                .enumerate()
                .fold(X::zero(), |acc, (j, &vj)| acc + m[(i, c0 + j)] * vj)
                * self.beta;
            for (j, &vj) in self.v.iter().enumerate() {
                let cur = m[(i, c0 + j)];
                m[(i, c0 + j)] = cur - s * vj;
            }
        }
    }

    /// `b ← H b` on entries `r0..r0+len(v)`.
    pub(crate) fn apply_vector(&self, b: &mut DVector<X>, r0: usize) {
        let s = self.v.iter().enumerate().fold(X::zero(), |acc, (i, &vi)| acc + vi * b[r0 + i])
            * self.beta;
        for (i, &vi) in self.v.iter().enumerate() {
            let cur = b[r0 + i];
            b[r0 + i] = cur - s * vi;
        }
    }
}

/// Column-pivoting Householder QR of an `m x n` matrix.
///
/// At step `k` the remaining column with the largest norm (by value) is
/// swapped into place, so the diagonal of `R` is non-increasing in
/// magnitude and [`rank`](ColPivQr::rank) can be read off it.
#[derive(Debug, Clone)]
pub struct ColPivQr<S: Scalar> {
    r: DMatrix<S>,
    reflectors: Vec<Option<Reflector<S>>>,
    perm: Vec<usize>,
}

impl<S: Scalar> ColPivQr<S> {
    /// Factorize `a`.
    pub fn new(mut a: DMatrix<S>) -> Self {
        let (m, n) = a.shape();
        let mut perm: Vec<usize> = (0..n).collect();
        let mut reflectors = Vec::with_capacity(m.min(n));

        for k in 0..m.min(n) {
            let col_norm2 = |a: &DMatrix<S>, j: usize| {
                (k..m).map(|i| a[(i, j)].value().powi(2)).sum::<S::Base>()
            };
            let mut best = k;
            let mut best_norm2 = col_norm2(&a, k);
            for j in k + 1..n {
                let nj = col_norm2(&a, j);
                if nj > best_norm2 {
                    best = j;
                    best_norm2 = nj;
                }
            }
            if best != k {
                a.swap_columns(k, best);
                perm.swap(k, best);
            }

            let x: Vec<S> = (k..m).map(|i| a[(i, k)]).collect();
            let refl = Reflector::new(&x);
            if let Some(h) = &refl {
                h.apply_left(&mut a, k, k + 1..n);
                a[(k, k)] = h.alpha;
                for i in k + 1..m {
                    a[(i, k)] = S::zero();
                }
            }
            reflectors.push(refl);
        }

        Self { r: a, reflectors, perm }
    }

    /// The upper-trapezoidal factor `R` (`m x n`).
    pub fn r(&self) -> &DMatrix<S> {
        &self.r
    }

    /// Column permutation: column `j` of `R` comes from column `perm[j]` of `A`.
    pub fn permutation(&self) -> &[usize] {
        &self.perm
    }

    /// The orthogonal factor `Q` (`m x m`), formed explicitly.
    pub fn q(&self) -> DMatrix<S> {
        let m = self.r.nrows();
        let mut q = DMatrix::<S>::identity(m, m);
        for (k, refl) in self.reflectors.iter().enumerate().rev() {
            if let Some(h) = refl {
                h.apply_left(&mut q, k, 0..m);
            }
        }
        q
    }

    /// Number of diagonal entries of `R` above `threshold` times the largest one.
    pub fn rank(&self, threshold: S::Base) -> usize {
        let diag: Vec<S::Base> =
            (0..self.r.nrows().min(self.r.ncols())).map(|k| self.r[(k, k)].value().abs()).collect();
        let max = diag.iter().fold(S::Base::zero(), |acc, &d| acc.max(d));
        if max == S::Base::zero() {
            return 0;
        }
        diag.iter().filter(|&&d| d > threshold * max).count()
    }

    /// Least-squares solution of `a x ≈ b` (exact for square full-rank `a`).
    ///
    /// Rank is decided with `S::dummy_precision()` relative to the largest
    /// diagonal of `R`; a rank-deficient (or wide) system is
    /// [`Error::Singular`].
    pub fn solve(&self, b: &DVector<S>) -> Result<DVector<S>> {
        let (m, n) = self.r.shape();
        if b.len() != m {
            return Err(Error::dimension(
                format!("right-hand side of length {m}"),
                format!("length {}", b.len()),
            ));
        }
        let rank = self.rank(S::dummy_precision().value());
        if rank < n {
            return Err(Error::Singular(format!("rank {rank} < {n} columns")));
        }

        let mut y = b.clone();
        for (k, refl) in self.reflectors.iter().enumerate() {
            if let Some(h) = refl {
                h.apply_vector(&mut y, k);
            }
        }

        let mut z = vec![S::zero(); n];
        for k in (0..n).rev() {
            let mut s = y[k];
            for j in k + 1..n {
                s -= self.r[(k, j)] * z[j];
            }
            z[k] = s / self.r[(k, k)];
        }

        let mut x = DVector::<S>::zeros(n);
        for (j, &p) in self.perm.iter().enumerate() {
            x[p] = z[j];
        }
        Ok(x)
    }
}
