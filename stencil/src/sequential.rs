use crate::error::{check_grid, Result};
use crate::evaluate::convolve_at;
use crate::extrema::Extrema;
use crate::filter::Filter;

/// Single-threaded reference: convolve every sample in row-major order, then
/// normalize the whole destination with the global extrema.
///
/// Returns the extrema of the convolution sums before normalization.
pub fn apply_filter_sequential(
    filter: &Filter,
    source: &[i32],
    destination: &mut [i32],
    width: usize,
    height: usize,
) -> Result<Extrema> {
    check_grid(width, height, source.len(), destination.len())?;

    let mut extrema = Extrema::EMPTY;
    for row in 0..height {
        for col in 0..width {
            let sum = convolve_at(filter, source, width, height, row, col);
            destination[row * width + col] = sum;
            extrema.include(sum);
        }
    }

    for value in destination.iter_mut() {
        *value = extrema.normalize(*value);
    }

    Ok(extrema)
}
