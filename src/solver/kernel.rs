//! Jacobi row update.
//!
//! `next_i = (b_i − Σ_{j≠i} a_ij · current_j) / a_ii`
//!
//! The sum always runs over `j` in ascending order, so a row's new value is bit-identical
//! no matter which worker or policy computes it. Only `current` is read; only the row's own
//! slot of `next` is written.

use crate::core::traits::MatrixGet;
use crate::schedule::Chunk;
use crate::utils::reduce::MaxNorm;
use num_traits::Float;

/// New value of row `i` and its absolute change `|next_i − current_i|`.
#[inline]
pub fn update_row<M, T>(a: &M, b: &[T], current: &[T], i: usize) -> (T, T)
where
    M: MatrixGet<T> + ?Sized,
    T: Float,
{
    let mut sum = T::zero();
    for (j, &xj) in current.iter().enumerate() {
        if j != i {
            sum = sum + a.get(i, j) * xj;
        }
    }
    let value = (b[i] - sum) / a.get(i, i);
    (value, (value - current[i]).abs())
}

/// Update every row of `chunk`, writing into `out` (the chunk's slice of the next iterate).
///
/// Returns the largest change in the chunk.
pub fn update_chunk<M, T>(a: &M, b: &[T], current: &[T], chunk: Chunk, out: &mut [T]) -> T
where
    M: MatrixGet<T> + ?Sized,
    T: Float,
{
    debug_assert_eq!(out.len(), chunk.len());
    let mut local = MaxNorm::identity();
    for (slot, i) in out.iter_mut().zip(chunk.range()) {
        let (value, delta) = update_row(a, b, current, i);
        *slot = value;
        local = MaxNorm::combine(local, delta);
    }
    local
}
