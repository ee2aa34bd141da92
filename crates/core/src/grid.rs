//! The coordinate grid of a canvas.
//!
//! Both warps iterate over every destination pixel. [`Grid`] enumerates
//! those pixels in row-major order and owns the edge-clamping rule used for
//! pickup coordinates.

use glam::DVec2;

use crate::error::MarblingError;

/// Channels stored per pixel.
pub const CHANNELS: usize = 3;

/// Dimensions of an H×W canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    height: usize,
    width: usize,
}

impl Grid {
    /// Returns `MarblingError::InvalidDimensions` if either dimension is
    /// zero or if `height * width * CHANNELS` overflows `usize`.
    pub fn new(height: usize, width: usize) -> Result<Self, MarblingError> {
        if height == 0 || width == 0 {
            return Err(MarblingError::InvalidDimensions);
        }
        height
            .checked_mul(width)
            .and_then(|n| n.checked_mul(CHANNELS))
            .ok_or(MarblingError::InvalidDimensions)?;
        Ok(Self { height, width })
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of pixels.
    pub fn len(&self) -> usize {
        self.height * self.width
    }

    /// Always false: a grid has at least one pixel.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Number of channel values in a buffer of this size.
    pub fn buffer_len(&self) -> usize {
        self.len() * CHANNELS
    }

    /// Pixel index of `(row, col)` in row-major order.
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    /// All `(row, col)` pairs, row by row.
    pub fn coords(&self) -> Coords {
        Coords {
            width: self.width,
            next: 0,
            end: self.len(),
        }
    }

    /// The `(row, col)` pairs of a single row.
    pub fn row(&self, row: usize) -> Coords {
        let start = (row * self.width).min(self.len());
        Coords {
            width: self.width,
            next: start,
            end: (start + self.width).min(self.len()),
        }
    }

    /// Whether a floating-point coordinate lies inside `[0, H-1] × [0, W-1]`.
    pub fn contains(&self, p: DVec2) -> bool {
        (0.0..=self.max_row()).contains(&p.x) && (0.0..=self.max_col()).contains(&p.y)
    }

    /// Clamps `p` component-wise onto the canvas edge.
    ///
    /// Returns the clamped point and whether any component moved.
    pub fn clamp(&self, p: DVec2) -> (DVec2, bool) {
        let q = DVec2::new(p.x.clamp(0.0, self.max_row()), p.y.clamp(0.0, self.max_col()));
        (q, q != p)
    }

    fn max_row(&self) -> f64 {
        (self.height - 1) as f64
    }

    fn max_col(&self) -> f64 {
        (self.width - 1) as f64
    }
}

/// Row-major iterator over pixel coordinates.
#[derive(Debug, Clone)]
pub struct Coords {
    width: usize,
    next: usize,
    end: usize,
}

impl Iterator for Coords {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let i = self.next;
        self.next += 1;
        Some((i / self.width, i % self.width))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.end - self.next;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Coords {}

impl DoubleEndedIterator for Coords {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        self.end -= 1;
        Some((self.end / self.width, self.end % self.width))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_zero_dimensions() {
        assert!(matches!(Grid::new(0, 4), Err(MarblingError::InvalidDimensions)));
        assert!(matches!(Grid::new(4, 0), Err(MarblingError::InvalidDimensions)));
    }

    #[test]
    fn new_rejects_overflow() {
        assert!(matches!(
            Grid::new(usize::MAX / 2, 2),
            Err(MarblingError::InvalidDimensions)
        ));
    }

    #[test]
    fn coords_are_row_major() {
        let grid = Grid::new(2, 3).unwrap();
        let all: Vec<_> = grid.coords().collect();
        assert_eq!(all, vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]);
    }

    #[test]
    fn coords_is_exact_size_and_restartable() {
        let grid = Grid::new(7, 5).unwrap();
        let it = grid.coords();
        assert_eq!(it.len(), 35);
        assert_eq!(grid.coords().count(), grid.coords().count());
    }

    #[test]
    fn coords_index_matches_position() {
        let grid = Grid::new(4, 6).unwrap();
        for (i, (row, col)) in grid.coords().enumerate() {
            assert_eq!(grid.index(row, col), i);
        }
    }

    #[test]
    fn row_yields_one_row() {
        let grid = Grid::new(3, 4).unwrap();
        let row: Vec<_> = grid.row(1).collect();
        assert_eq!(row, vec![(1, 0), (1, 1), (1, 2), (1, 3)]);
        assert_eq!(grid.row(3).count(), 0);
    }

    #[test]
    fn coords_reverse() {
        let grid = Grid::new(2, 2).unwrap();
        let rev: Vec<_> = grid.coords().rev().collect();
        assert_eq!(rev, vec![(1, 1), (1, 0), (0, 1), (0, 0)]);
    }

    #[test]
    fn clamp_pins_to_edges() {
        let grid = Grid::new(10, 20).unwrap();
        let (q, moved) = grid.clamp(DVec2::new(-3.2, 25.0));
        assert_eq!(q, DVec2::new(0.0, 19.0));
        assert!(moved);
        let (q, moved) = grid.clamp(DVec2::new(4.5, 7.25));
        assert_eq!(q, DVec2::new(4.5, 7.25));
        assert!(!moved);
    }

    #[test]
    fn contains_is_inclusive_of_last_index() {
        let grid = Grid::new(3, 3).unwrap();
        assert!(grid.contains(DVec2::new(2.0, 2.0)));
        assert!(!grid.contains(DVec2::new(2.0001, 0.0)));
        assert!(!grid.contains(DVec2::new(0.0, -0.1)));
    }
}
