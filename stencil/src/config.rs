use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StencilError};
use crate::partition::Partition;

/// Default tile side length for [`Partition::WorkQueue`].
pub const DEFAULT_CHUNK: usize = 32;

/// Parameters of a single parallel run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub partition: Partition,
    /// Number of worker threads spawned for the run.
    pub threads: usize,
    /// Tile side length; only read by [`Partition::WorkQueue`].
    pub chunk: usize,
}

impl RunConfig {
    pub fn new(partition: Partition, threads: usize) -> Self {
        Self {
            partition,
            threads,
            chunk: DEFAULT_CHUNK,
        }
    }

    pub fn work_queue(threads: usize, chunk: usize) -> Self {
        Self {
            partition: Partition::WorkQueue,
            threads,
            chunk,
        }
    }

    pub fn with_chunk(mut self, chunk: usize) -> Self {
        self.chunk = chunk;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.threads == 0 {
            return Err(StencilError::NoThreads);
        }
        if self.partition == Partition::WorkQueue && self.chunk == 0 {
            return Err(StencilError::ZeroChunk);
        }
        Ok(())
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        let threads = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        Self::new(Partition::default(), threads)
    }
}

impl fmt::Display for RunConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} threads={}", self.partition, self.threads)?;
        if self.partition == Partition::WorkQueue {
            write!(f, " chunk={}", self.chunk)?;
        }
        Ok(())
    }
}
