#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StencilError {
    #[error("Filter dimension must be odd and positive, got {0}")]
    InvalidFilterDimension(usize),
    #[error("Filter of dimension {dimension} needs {expected} coefficients, got {actual}")]
    CoefficientCount {
        dimension: usize,
        expected: usize,
        actual: usize,
    },
    #[error("Grid dimensions must be positive, got {width}x{height}")]
    EmptyGrid { width: usize, height: usize },
    #[error("{buffer} buffer holds {actual} samples, expected {expected}")]
    BufferLength {
        buffer: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("Thread count must be positive")]
    NoThreads,
    #[error("Work queue chunk size must be positive")]
    ZeroChunk,
    #[error("Worker {tid} panicked")]
    WorkerPanicked { tid: usize },
}

pub type Result<T> = std::result::Result<T, StencilError>;

/// Rejects empty grids and buffers whose length does not match `width * height`.
pub(crate) fn check_grid(
    width: usize,
    height: usize,
    source_len: usize,
    destination_len: usize,
) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(StencilError::EmptyGrid { width, height });
    }
    let expected = width * height;
    if source_len != expected {
        return Err(StencilError::BufferLength {
            buffer: "source",
            expected,
            actual: source_len,
        });
    }
    if destination_len != expected {
        return Err(StencilError::BufferLength {
            buffer: "destination",
            expected,
            actual: destination_len,
        });
    }
    Ok(())
}
