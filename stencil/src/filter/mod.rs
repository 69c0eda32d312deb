//! Square convolution kernels with signed integer coefficients.

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StencilError};

/// Immutable `dimension × dimension` kernel, coefficients stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    dimension: usize,
    coefficients: Vec<i32>,
}

impl Filter {
    pub fn new(dimension: usize, coefficients: Vec<i32>) -> Result<Self> {
        if dimension == 0 || dimension % 2 == 0 {
            return Err(StencilError::InvalidFilterDimension(dimension));
        }
        let expected = dimension * dimension;
        if coefficients.len() != expected {
            return Err(StencilError::CoefficientCount {
                dimension,
                expected,
                actual: coefficients.len(),
            });
        }
        Ok(Self {
            dimension,
            coefficients,
        })
    }

    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Half-width of the kernel: `dimension / 2`.
    #[inline]
    pub fn radius(&self) -> usize {
        self.dimension / 2
    }

    #[inline]
    pub fn coefficient(&self, row: usize, col: usize) -> i32 {
        self.coefficients[row * self.dimension + col]
    }

    #[inline]
    pub fn coefficients(&self) -> &[i32] {
        &self.coefficients
    }

    #[inline]
    pub(crate) fn coefficient_row(&self, row: usize) -> &[i32] {
        let start = row * self.dimension;
        &self.coefficients[start..start + self.dimension]
    }
}

#[rustfmt::skip]
const LAPLACIAN_3: [i32; 9] = [
    0, 1, 0,
    1, -4, 1,
    0, 1, 0,
];

#[rustfmt::skip]
const LAPLACIAN_5: [i32; 25] = [
    -1, -1, -1, -1, -1,
    -1, -1, -1, -1, -1,
    -1, -1, 24, -1, -1,
    -1, -1, -1, -1, -1,
    -1, -1, -1, -1, -1,
];

#[rustfmt::skip]
const LAPLACIAN_OF_GAUSSIAN_9: [i32; 81] = [
    0, 1, 1,   2,   2,   2, 1, 1, 0,
    1, 2, 4,   5,   5,   5, 4, 2, 1,
    1, 4, 5,   3,   0,   3, 5, 4, 1,
    2, 5, 3, -12, -24, -12, 3, 5, 2,
    2, 5, 0, -24, -40, -24, 0, 5, 2,
    2, 5, 3, -12, -24, -12, 3, 5, 2,
    1, 4, 5,   3,   0,   3, 5, 4, 1,
    1, 2, 4,   5,   5,   5, 4, 2, 1,
    0, 1, 1,   2,   2,   2, 1, 1, 0,
];

/// Named kernels available to configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuiltinFilter {
    Laplacian3,
    Laplacian5,
    LaplacianOfGaussian9,
    Identity,
}

impl BuiltinFilter {
    pub const ALL: [BuiltinFilter; 4] = [
        BuiltinFilter::Laplacian3,
        BuiltinFilter::Laplacian5,
        BuiltinFilter::LaplacianOfGaussian9,
        BuiltinFilter::Identity,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            BuiltinFilter::Laplacian3 => "laplacian3",
            BuiltinFilter::Laplacian5 => "laplacian5",
            BuiltinFilter::LaplacianOfGaussian9 => "laplacian_of_gaussian9",
            BuiltinFilter::Identity => "identity",
        }
    }

    pub fn filter(&self) -> Filter {
        let (dimension, coefficients): (usize, &[i32]) = match self {
            BuiltinFilter::Laplacian3 => (3, &LAPLACIAN_3),
            BuiltinFilter::Laplacian5 => (5, &LAPLACIAN_5),
            BuiltinFilter::LaplacianOfGaussian9 => (9, &LAPLACIAN_OF_GAUSSIAN_9),
            BuiltinFilter::Identity => (1, &[1]),
        };
        Filter {
            dimension,
            coefficients: coefficients.to_vec(),
        }
    }
}

impl std::fmt::Display for BuiltinFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
