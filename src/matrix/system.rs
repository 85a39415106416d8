//! A validated linear system `A·x = b` borrowed for the duration of a solve.

use crate::core::traits::{MatShape, MatrixGet};
use crate::error::JError;
use num_traits::Float;

/// Coefficient matrix and right-hand side, checked for the Jacobi preconditions.
///
/// The matrix must be square, `b` must match its order, and every diagonal entry must be
/// finite and not negligible relative to the largest entry of its row
/// (`|a_ii| > ε_machine · max_j |a_ij|`).
pub struct System<'a, M: ?Sized, T> {
    a: &'a M,
    b: &'a [T],
}

impl<'a, M, T> Clone for System<'a, M, T>
where
    M: ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, M: ?Sized, T> Copy for System<'a, M, T> {}

impl<'a, M, T> System<'a, M, T>
where
    M: MatrixGet<T> + MatShape + ?Sized,
    T: Float,
{
    pub fn new(a: &'a M, b: &'a [T]) -> Result<Self, JError> {
        let (rows, cols) = (a.nrows(), a.ncols());
        if rows != cols {
            return Err(JError::DimensionMismatch(format!(
                "matrix is {}x{}, expected a square matrix",
                rows, cols
            )));
        }
        if b.len() != rows {
            return Err(JError::DimensionMismatch(format!(
                "right-hand side has length {}, matrix order is {}",
                b.len(),
                rows
            )));
        }
        for i in 0..rows {
            let aii = a.get(i, i);
            let row_max = (0..cols)
                .map(|j| a.get(i, j).abs())
                .fold(T::zero(), T::max);
            if !aii.is_finite() || aii.abs() <= T::epsilon() * row_max {
                return Err(JError::ZeroDiagonal(i));
            }
        }
        Ok(Self { a, b })
    }

    /// Order of the system.
    pub fn n(&self) -> usize {
        self.b.len()
    }

    pub fn matrix(&self) -> &'a M {
        self.a
    }

    pub fn rhs(&self) -> &'a [T] {
        self.b
    }

    /// `|a_ii| ≥ Σ_{j≠i} |a_ij|` for every row.
    pub fn is_diagonally_dominant(&self) -> bool {
        let n = self.n();
        (0..n).all(|i| {
            let off = (0..n)
                .filter(|&j| j != i)
                .fold(T::zero(), |acc, j| acc + self.a.get(i, j).abs());
            self.a.get(i, i).abs() >= off
        })
    }

    /// Largest `|a_ii|`; bounds the residual by the update norm (`r = D·(x_{k+1} − x_k)`).
    pub fn max_abs_diagonal(&self) -> T {
        (0..self.n())
            .map(|i| self.a.get(i, i).abs())
            .fold(T::zero(), T::max)
    }
}
