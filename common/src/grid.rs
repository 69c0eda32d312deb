use std::ops::{Deref, DerefMut};

/// Row-major 2D grid of samples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    samples: Vec<T>,
    width: usize,
    height: usize,
}

impl<T> Grid<T> {
    pub fn new(width: usize, height: usize, samples: Vec<T>) -> Self {
        assert_eq!(
            samples.len(),
            width * height,
            "samples length must equal width * height"
        );
        Self {
            samples,
            width,
            height,
        }
    }

    /// Builds a grid by evaluating `f(row, col)` for every cell in row-major order.
    pub fn from_fn<F>(width: usize, height: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> T,
    {
        let mut samples = Vec::with_capacity(width * height);
        for row in 0..height {
            for col in 0..width {
                samples.push(f(row, col));
            }
        }
        Self {
            samples,
            width,
            height,
        }
    }

    #[inline]
    pub fn row(&self, row: usize) -> &[T] {
        let start = row * self.width;
        &self.samples[start..start + self.width]
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn samples(&self) -> &[T] {
        &self.samples
    }

    #[inline]
    pub fn samples_mut(&mut self) -> &mut [T] {
        &mut self.samples
    }
}

impl<T: Default + Clone> Grid<T> {
    pub fn new_default(width: usize, height: usize) -> Self {
        Self {
            samples: vec![T::default(); width * height],
            width,
            height,
        }
    }
}

impl<T> Deref for Grid<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.samples
    }
}

impl<T> DerefMut for Grid<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_stores_dimensions() {
        let grid = Grid::new(3, 2, vec![10, 20, 30, 40, 50, 60]);
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.len(), 6);
    }

    #[test]
    #[should_panic(expected = "samples length must equal width * height")]
    fn test_new_panics_on_size_mismatch() {
        Grid::new(3, 2, vec![1, 2, 3]);
    }

    #[test]
    fn test_from_fn_visits_row_major() {
        let grid = Grid::from_fn(3, 2, |row, col| (row * 10 + col) as i32);
        assert_eq!(grid.samples(), &[0, 1, 2, 10, 11, 12]);
        assert_eq!(grid.row(0), &[0, 1, 2]);
        assert_eq!(grid.row(1), &[10, 11, 12]);
    }

    #[test]
    fn test_new_default_and_deref_mut() {
        let mut grid: Grid<i32> = Grid::new_default(4, 1);
        assert_eq!(grid.samples(), &[0; 4]);
        grid[2] = 5;
        grid.samples_mut()[3] = 7;
        assert_eq!(grid.samples(), &[0, 0, 5, 7]);
    }
}
