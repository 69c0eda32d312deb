//! Scheduling disciplines that split a grid between workers.
//!
//! Three static splits assign each worker a fixed block of rows or columns,
//! computed from `tid` alone. The work queue instead hands out square tiles
//! from a shared list (see [`crate::tile_queue`]).

#[cfg(test)]
mod tests;

use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Partition {
    /// Contiguous row blocks, each row scanned full width.
    #[default]
    RowShards,
    /// Contiguous column blocks, columns as the outer loop.
    ColumnShardsColumnMajor,
    /// Contiguous column blocks, rows as the outer loop.
    ColumnShardsRowMajor,
    /// Square tiles claimed dynamically from a shared cursor.
    WorkQueue,
}

impl Partition {
    pub const ALL: [Partition; 4] = [
        Partition::RowShards,
        Partition::ColumnShardsColumnMajor,
        Partition::ColumnShardsRowMajor,
        Partition::WorkQueue,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Partition::RowShards => "row_shards",
            Partition::ColumnShardsColumnMajor => "column_shards_column_major",
            Partition::ColumnShardsRowMajor => "column_shards_row_major",
            Partition::WorkQueue => "work_queue",
        }
    }

    pub fn is_static(&self) -> bool {
        !matches!(self, Partition::WorkQueue)
    }

    /// Cells owned by worker `tid` under a static split, `None` for the work queue.
    pub fn static_region(
        &self,
        tid: usize,
        nthreads: usize,
        width: usize,
        height: usize,
    ) -> Option<Region> {
        let region = match self {
            Partition::RowShards => Region {
                rows: shard_range(height, tid, nthreads),
                cols: 0..width,
                traversal: Traversal::RowMajor,
            },
            Partition::ColumnShardsColumnMajor => Region {
                rows: 0..height,
                cols: shard_range(width, tid, nthreads),
                traversal: Traversal::ColumnMajor,
            },
            Partition::ColumnShardsRowMajor => Region {
                rows: 0..height,
                cols: shard_range(width, tid, nthreads),
                traversal: Traversal::RowMajor,
            },
            Partition::WorkQueue => return None,
        };
        Some(region)
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Block `[tid * block, (tid + 1) * block)` of `0..extent` with
/// `block = extent / nthreads`. The last worker runs through `extent`,
/// absorbing the remainder.
pub fn shard_range(extent: usize, tid: usize, nthreads: usize) -> Range<usize> {
    debug_assert!(nthreads > 0 && tid < nthreads);
    let block = extent / nthreads;
    let start = tid * block;
    let end = if tid == nthreads - 1 {
        extent
    } else {
        start + block
    };
    start..end
}

/// Loop nesting used to visit a [`Region`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Traversal {
    RowMajor,
    ColumnMajor,
}

/// Rectangular set of cells visited in a fixed order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub rows: Range<usize>,
    pub cols: Range<usize>,
    pub traversal: Traversal,
}

impl Region {
    pub fn len(&self) -> usize {
        self.rows.len() * self.cols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.cols.is_empty()
    }

    #[inline]
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(usize, usize),
    {
        match self.traversal {
            Traversal::RowMajor => {
                for row in self.rows.clone() {
                    for col in self.cols.clone() {
                        f(row, col);
                    }
                }
            }
            Traversal::ColumnMajor => {
                for col in self.cols.clone() {
                    for row in self.rows.clone() {
                        f(row, col);
                    }
                }
            }
        }
    }
}

/// Top-left corner of a `chunk × chunk` tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    pub row: usize,
    pub col: usize,
}

impl Tile {
    /// Cells of this tile, truncated at the grid edge.
    pub fn region(&self, chunk: usize, width: usize, height: usize) -> Region {
        Region {
            rows: self.row..(self.row + chunk).min(height),
            cols: self.col..(self.col + chunk).min(width),
            traversal: Traversal::RowMajor,
        }
    }
}

/// Tiles striding the grid by `chunk` in both dimensions, row-major.
/// Yields `ceil(height / chunk) * ceil(width / chunk)` tiles.
pub fn tile_grid(width: usize, height: usize, chunk: usize) -> Vec<Tile> {
    assert!(chunk > 0, "chunk must be > 0");
    let mut tiles = Vec::with_capacity(width.div_ceil(chunk) * height.div_ceil(chunk));
    for row in (0..height).step_by(chunk) {
        for col in (0..width).step_by(chunk) {
            tiles.push(Tile { row, col });
        }
    }
    tiles
}
