//! Core linear-algebra traits for parjacobi.

/// Shape of a two-dimensional operator.
pub trait MatShape {
    fn nrows(&self) -> usize;
    fn ncols(&self) -> usize;
}

/// Random access to individual entries.
pub trait MatrixGet<T> {
    /// Entry a_ij.
    fn get(&self, i: usize, j: usize) -> T;
}
