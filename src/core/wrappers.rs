//! Wrappers for faer dense matrix types.
//!
//! Implements the core traits for `faer::Mat` and `faer::MatRef` so they can be handed to
//! the Jacobi kernel and the residual helpers directly.
//!
//! # References
//! - [faer crate documentation](https://docs.rs/faer)

use crate::core::traits::{MatShape, MatrixGet};
use faer::{Mat, MatRef};

impl<T: Copy> MatrixGet<T> for Mat<T> {
    #[inline]
    fn get(&self, i: usize, j: usize) -> T {
        self[(i, j)]
    }
}

impl<'a, T: Copy> MatrixGet<T> for MatRef<'a, T> {
    #[inline]
    fn get(&self, i: usize, j: usize) -> T {
        self[(i, j)]
    }
}

impl<T> MatShape for Mat<T> {
    fn nrows(&self) -> usize {
        self.nrows()
    }
    fn ncols(&self) -> usize {
        self.ncols()
    }
}

impl<'a, T> MatShape for MatRef<'a, T> {
    fn nrows(&self) -> usize {
        MatRef::nrows(self)
    }
    fn ncols(&self) -> usize {
        MatRef::ncols(self)
    }
}
