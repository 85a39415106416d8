//! Residual evaluation: `r = b − A·x`.

use crate::core::traits::{MatShape, MatrixGet};
use num_traits::Float;

/// Residual vector `b − A·x`.
pub fn residual<M, T>(a: &M, x: &[T], b: &[T]) -> Vec<T>
where
    M: MatrixGet<T> + MatShape + ?Sized,
    T: Float,
{
    assert_eq!(a.ncols(), x.len(), "Input vector x has incorrect length");
    assert_eq!(a.nrows(), b.len(), "Right-hand side b has incorrect length");
    (0..a.nrows())
        .map(|i| {
            let ax = (0..a.ncols()).fold(T::zero(), |acc, j| acc + a.get(i, j) * x[j]);
            b[i] - ax
        })
        .collect()
}

/// `max_i |b − A·x|_i`.
pub fn residual_inf_norm<M, T>(a: &M, x: &[T], b: &[T]) -> T
where
    M: MatrixGet<T> + MatShape + ?Sized,
    T: Float,
{
    residual(a, x, b)
        .into_iter()
        .fold(T::zero(), |m, r| m.max(r.abs()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use faer::Mat;

    #[test]
    fn exact_solution_has_zero_residual() {
        let a = Mat::from_fn(2, 2, |i, j| if i == j { 2.0 } else { 1.0 });
        let x = vec![1.0, 1.0];
        let b = vec![3.0, 3.0];
        assert_eq!(residual_inf_norm(&a, &x, &b), 0.0);
        assert_eq!(residual(&a, &[0.0, 0.0], &b), vec![3.0, 3.0]);
    }
}
