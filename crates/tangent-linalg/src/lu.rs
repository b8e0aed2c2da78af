//! LU decomposition with partial pivoting: `P A = L U`.

use nalgebra::{DMatrix, DVector};
use num_traits::Float;
use tangent_ad::Scalar;
use tangent_core::{Error, Result};

/// Doolittle LU factors of a square matrix, packed in one matrix
/// (unit-diagonal `L` strictly below the diagonal, `U` on and above it).
#[derive(Debug, Clone)]
pub struct Lu<S: Scalar> {
    lu: DMatrix<S>,
    perm: Vec<usize>,
    odd_swaps: bool,
}

impl<S: Scalar> Lu<S> {
    /// Factorize `a`, pivoting each column on its largest-magnitude value.
    ///
    /// # Errors
    /// [`Error::Dimension`] if `a` is not square, [`Error::Singular`] if a
    /// pivot is zero to working precision (`|p| <= S::min_positive()`).
    pub fn new(mut a: DMatrix<S>) -> Result<Self> {
        let n = a.nrows();
        if a.ncols() != n {
            return Err(Error::dimension("square matrix", format!("{}x{}", n, a.ncols())));
        }

        let tiny = S::min_positive().value();
        let mut perm: Vec<usize> = (0..n).collect();
        let mut odd_swaps = false;

        for k in 0..n {
            let mut p = k;
            let mut best = a[(k, k)].value().abs();
            for i in k + 1..n {
                let v = a[(i, k)].value().abs();
                if v > best {
                    p = i;
                    best = v;
                }
            }
            if best <= tiny || best.is_nan() {
                log::warn!("LU: zero pivot in column {k} of a {n}x{n} matrix");
                return Err(Error::Singular(format!("zero pivot in column {k}")));
            }
            if p != k {
                a.swap_rows(p, k);
                perm.swap(p, k);
                odd_swaps = !odd_swaps;
            }

            let pivot = a[(k, k)];
            for i in k + 1..n {
                let l = a[(i, k)] / pivot;
                a[(i, k)] = l;
                for j in k + 1..n {
                    let u = a[(k, j)];
                    let cur = a[(i, j)];
                    a[(i, j)] = cur - l * u;
                }
            }
        }

        Ok(Self { lu: a, perm, odd_swaps })
    }

    /// Matrix dimension.
    pub fn dim(&self) -> usize {
        self.lu.nrows()
    }

    /// Row permutation: row `i` of `L U` is row `perm[i]` of `A`.
    pub fn permutation(&self) -> &[usize] {
        &self.perm
    }

    /// Unit lower-triangular factor.
    pub fn l(&self) -> DMatrix<S> {
        let n = self.dim();
        DMatrix::from_fn(n, n, |i, j| match i.cmp(&j) {
            std::cmp::Ordering::Greater => self.lu[(i, j)],
            std::cmp::Ordering::Equal => S::one(),
            std::cmp::Ordering::Less => S::zero(),
        })
    }

    /// Upper-triangular factor.
    pub fn u(&self) -> DMatrix<S> {
        let n = self.dim();
        DMatrix::from_fn(n, n, |i, j| if i <= j { self.lu[(i, j)] } else { S::zero() })
    }

    /// Solve `a x = b`.
    pub fn solve(&self, b: &DVector<S>) -> Result<DVector<S>> {
        let n = self.dim();
        if b.len() != n {
            return Err(Error::dimension(
                format!("right-hand side of length {n}"),
                format!("length {}", b.len()),
            ));
        }
        Ok(self.substitute(|i| b[i]))
    }

    /// `det(a)`: product of the pivots, negated for an odd row permutation.
    pub fn determinant(&self) -> S {
        let det = (0..self.dim()).fold(S::one(), |acc, k| acc * self.lu[(k, k)]);
        if self.odd_swaps { -det } else { det }
    }

    /// `a⁻¹`, one column per unit right-hand side.
    pub fn inverse(&self) -> DMatrix<S> {
        let n = self.dim();
        let mut inv = DMatrix::<S>::zeros(n, n);
        for j in 0..n {
            let col = self.substitute(|i| if i == j { S::one() } else { S::zero() });
            for i in 0..n {
                inv[(i, j)] = col[i];
            }
        }
        inv
    }

    /// Forward then back substitution for the right-hand side `rhs(i)`.
    fn substitute(&self, rhs: impl Fn(usize) -> S) -> DVector<S> {
        let n = self.dim();
        let mut y = DVector::<S>::from_fn(n, |i, _| rhs(self.perm[i]));
        for i in 0..n {
            let mut s = y[i];
            for j in 0..i {
                s -= self.lu[(i, j)] * y[j];
            }
            y[i] = s;
        }
        for i in (0..n).rev() {
            let mut s = y[i];
            for j in i + 1..n {
                s -= self.lu[(i, j)] * y[j];
            }
            y[i] = s / self.lu[(i, i)];
        }
        y
    }
}
