//! Contiguous storage for full triangular lattices.

use std::ops::{Index, IndexMut};

/// A `(steps + 1) × (steps + 1)` lattice stored in one row-major buffer.
///
/// Row `i` is the time step. Only entries `(i, j)` with `j <= i` are
/// written by the engines; the rest keep `T::default()`.
///
/// # Examples
/// ```
/// use pricer_lattice::TriangularGrid;
///
/// let mut grid = TriangularGrid::<f64>::new(2);
/// grid[(1, 1)] = 3.5;
/// assert_eq!(grid.dim(), 3);
/// assert_eq!(grid.layer(1), &[0.0, 3.5]);
/// assert_eq!(grid[(0, 2)], 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TriangularGrid<T> {
    dim: usize,
    cells: Vec<T>,
}

impl<T: Copy + Default> TriangularGrid<T> {
    /// Allocates a zeroed grid for `steps` time steps.
    pub fn new(steps: usize) -> Self {
        let dim = steps + 1;
        Self {
            dim,
            cells: vec![T::default(); dim * dim],
        }
    }

    /// Side length, `steps + 1`.
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of time steps.
    #[inline]
    pub fn steps(&self) -> usize {
        self.dim - 1
    }

    /// Entry at `(step, node)`, or `None` outside the square.
    #[inline]
    pub fn get(&self, step: usize, node: usize) -> Option<T> {
        (step < self.dim && node < self.dim).then(|| self.cells[step * self.dim + node])
    }

    /// Full row of length `dim`, including the unused tail.
    #[inline]
    pub fn row(&self, step: usize) -> &[T] {
        &self.cells[step * self.dim..(step + 1) * self.dim]
    }

    /// Populated part of a row: the `step + 1` live nodes.
    #[inline]
    pub fn layer(&self, step: usize) -> &[T] {
        &self.row(step)[..=step]
    }

    /// Iterates over full rows from step 0 to maturity.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.cells.chunks(self.dim)
    }

    /// Copies the grid into nested vectors.
    pub fn to_nested(&self) -> Vec<Vec<T>> {
        self.rows().map(<[T]>::to_vec).collect()
    }
}

impl<T> TriangularGrid<T> {
    #[inline]
    fn offset(&self, step: usize, node: usize) -> usize {
        assert!(
            step < self.dim && node < self.dim,
            "lattice index ({}, {}) out of bounds for dimension {}",
            step,
            node,
            self.dim
        );
        step * self.dim + node
    }
}

/// Panics when either index is outside the `dim × dim` square.
impl<T> Index<(usize, usize)> for TriangularGrid<T> {
    type Output = T;

    #[inline]
    fn index(&self, (step, node): (usize, usize)) -> &T {
        &self.cells[self.offset(step, node)]
    }
}

impl<T> IndexMut<(usize, usize)> for TriangularGrid<T> {
    #[inline]
    fn index_mut(&mut self, (step, node): (usize, usize)) -> &mut T {
        let offset = self.offset(step, node);
        &mut self.cells[offset]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape() {
        let grid = TriangularGrid::<bool>::new(4);
        assert_eq!(grid.dim(), 5);
        assert_eq!(grid.steps(), 4);
        assert_eq!(grid.rows().count(), 5);
        assert!(grid.rows().all(|row| row.len() == 5));
    }

    #[test]
    fn test_get_bounds() {
        let mut grid = TriangularGrid::<f64>::new(1);
        grid[(1, 0)] = 2.0;
        assert_eq!(grid.get(1, 0), Some(2.0));
        assert_eq!(grid.get(2, 0), None);
        assert_eq!(grid.get(0, 2), None);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_index_past_row_end_panics() {
        let mut grid = TriangularGrid::<f64>::new(2);
        grid[(1, 0)] = 7.0;
        // (0, 3) would alias (1, 0) in the flat buffer
        let _ = grid[(0, 3)];
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_index_mut_past_row_end_panics() {
        let mut grid = TriangularGrid::<bool>::new(2);
        grid[(0, 3)] = true;
    }

    #[test]
    fn test_to_nested() {
        let mut grid = TriangularGrid::<u8>::new(1);
        grid[(0, 0)] = 1;
        grid[(1, 1)] = 7;
        assert_eq!(grid.to_nested(), vec![vec![1, 0], vec![0, 7]]);
    }
}
