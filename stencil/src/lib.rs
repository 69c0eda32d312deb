//! Stencil - parallel integer convolution with global normalization.
//!
//! Applies a square kernel to a 2D grid of `i32` samples and rescales the
//! result into `[0, 255]` using the minimum and maximum over all produced
//! values. The parallel engine splits the grid between a fixed set of worker
//! threads using one of four [`Partition`] disciplines and reproduces the
//! sequential reference bit for bit.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use stencil::{apply_filter_parallel, BuiltinFilter, Partition, RunConfig};
//!
//! let filter = BuiltinFilter::Laplacian3.filter();
//! let mut output = vec![0; width * height];
//! let config = RunConfig::work_queue(8, 32);
//! let report = apply_filter_parallel(&filter, &input, &mut output, width, height, &config)?;
//! ```

pub mod config;
mod engine;
pub mod error;
pub mod evaluate;
pub mod experiment;
pub mod extrema;
mod filter;
pub mod partition;
mod sequential;
pub mod tile_queue;

pub use config::{RunConfig, DEFAULT_CHUNK};
pub use engine::{apply_filter_parallel, filter_grid, RunReport, WorkerStats};
pub use error::{Result, StencilError};
pub use extrema::{normalize, Extrema};
pub use filter::{BuiltinFilter, Filter};
pub use partition::Partition;
pub use sequential::apply_filter_sequential;
