//! Race-free maximum reduction for the convergence norm.
//!
//! Each worker folds its own deltas into a local partial; the partials are merged on the
//! calling thread after the barrier. `combine` is associative and commutative with identity
//! zero (deltas are non-negative), so the merged value does not depend on which worker saw
//! which row or in what order. NaN is absorbing, so a diverging row can never be hidden.

use num_traits::Float;

#[derive(Debug, Clone, Copy, Default)]
pub struct MaxNorm;

impl MaxNorm {
    #[inline]
    pub fn identity<T: Float>() -> T {
        T::zero()
    }

    #[inline]
    pub fn combine<T: Float>(a: T, b: T) -> T {
        if a.is_nan() || b.is_nan() {
            T::nan()
        } else if b > a {
            b
        } else {
            a
        }
    }

    /// Merge worker-local partial maxima.
    pub fn reduce<T: Float, I: IntoIterator<Item = T>>(partials: I) -> T {
        partials.into_iter().fold(Self::identity(), Self::combine)
    }
}
