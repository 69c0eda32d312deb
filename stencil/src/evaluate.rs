use crate::filter::Filter;

/// Convolution sum for the sample at `(row, col)`.
///
/// Neighbors outside `[0, height) × [0, width)` contribute nothing. The window
/// is clipped to the grid up front, which drops exactly those terms.
/// Accumulation wraps on 32-bit overflow.
#[inline]
pub fn convolve_at(
    filter: &Filter,
    source: &[i32],
    width: usize,
    height: usize,
    row: usize,
    col: usize,
) -> i32 {
    debug_assert!(row < height && col < width);
    debug_assert_eq!(source.len(), width * height);

    let radius = filter.radius();
    let row_lo = row.saturating_sub(radius);
    let row_hi = (row + radius).min(height - 1);
    let col_lo = col.saturating_sub(radius);
    let col_hi = (col + radius).min(width - 1);

    let mut sum = 0i32;
    for src_row in row_lo..=row_hi {
        let coeffs = filter.coefficient_row(src_row + radius - row);
        let samples = &source[src_row * width..(src_row + 1) * width];
        for src_col in col_lo..=col_hi {
            let coeff = coeffs[src_col + radius - col];
            sum = sum.wrapping_add(samples[src_col].wrapping_mul(coeff));
        }
    }
    sum
}
