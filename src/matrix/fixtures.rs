//! Problem constructors used by the demo, the benchmarks and the tests.

use faer::Mat;
use num_traits::Float;

/// The classic model problem: `a_ii = n + 1`, `a_ij = 1` off the diagonal, `b_i = 2i + 1`.
///
/// Strictly diagonally dominant for every `n`, so Jacobi converges.
pub fn model_problem<T: Float>(n: usize) -> (Mat<T>, Vec<T>) {
    let diag = T::from(n + 1).unwrap_or_else(T::one);
    let a = Mat::from_fn(n, n, |i, j| if i == j { diag } else { T::one() });
    let b = (0..n)
        .map(|i| T::from(2 * i + 1).unwrap_or_else(T::zero))
        .collect();
    (a, b)
}

/// Make `a` strictly diagonally dominant by replacing each diagonal entry with
/// `margin + Σ_{j≠i} |a_ij|` (sign preserved, positive when zero).
pub fn make_diagonally_dominant<T: Float>(a: &mut Mat<T>, margin: T) {
    let n = a.nrows().min(a.ncols());
    for i in 0..n {
        let off = (0..a.ncols())
            .filter(|&j| j != i)
            .fold(T::zero(), |acc, j| acc + a[(i, j)].abs());
        let sign = if a[(i, i)] < T::zero() { -T::one() } else { T::one() };
        a[(i, i)] = sign * (off + margin);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::System;

    #[test]
    fn model_problem_entries() {
        let (a, b) = model_problem::<f64>(4);
        assert_eq!(a[(2, 2)], 5.0);
        assert_eq!(a[(0, 3)], 1.0);
        assert_eq!(b, vec![1.0, 3.0, 5.0, 7.0]);
        assert!(System::new(&a, &b).unwrap().is_diagonally_dominant());
    }

    #[test]
    fn dominance_is_restored() {
        let mut a = Mat::from_fn(3, 3, |i, j| if i == j { -0.5 } else { (i + j) as f64 });
        make_diagonally_dominant(&mut a, 1.0);
        let b = vec![0.0; 3];
        let sys = System::new(&a, &b).unwrap();
        assert!(sys.is_diagonally_dominant());
        assert!(a[(0, 0)] < 0.0);
    }
}
