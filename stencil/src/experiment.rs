//! Benchmark matrix for the `stencil_bench` runner.
//!
//! A [`BenchConfig`] describes which filters, partitions, thread counts and
//! chunk sizes to time against the sequential baseline.

use std::fmt;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use common::Grid;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::RunConfig;
use crate::filter::BuiltinFilter;
use crate::partition::Partition;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    /// Width of the generated grid; ignored when `input` is set.
    pub width: usize,
    /// Height of the generated grid; ignored when `input` is set.
    pub height: usize,
    pub seed: u64,
    /// Graymap to filter instead of a generated grid.
    pub input: Option<PathBuf>,
    /// Where to write the normalized baseline output. The filter name is
    /// appended to the file stem.
    pub output: Option<PathBuf>,
    pub filters: Vec<BuiltinFilter>,
    pub partitions: Vec<Partition>,
    pub threads: Vec<usize>,
    /// Tile sizes tried for [`Partition::WorkQueue`].
    pub chunks: Vec<usize>,
    pub repetitions: usize,
    pub log_level: String,
    /// Directory for rolling log files; console only when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 1024,
            seed: 0x5eed,
            input: None,
            output: None,
            filters: BuiltinFilter::ALL.to_vec(),
            partitions: Partition::ALL.to_vec(),
            threads: vec![1, 2, 4, 8],
            chunks: vec![1, 2, 4, 8, 16, 32],
            repetitions: 3,
            log_level: "info".to_string(),
            log_dir: Some(PathBuf::from("logs")),
        }
    }
}

impl BenchConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yml::Error> {
        serde_yml::from_str(yaml)
    }

    /// Expands the matrix: one run per partition and thread count, times
    /// every chunk size for the work queue.
    pub fn runs(&self) -> Vec<RunConfig> {
        let mut runs = Vec::new();
        for &partition in &self.partitions {
            for &threads in &self.threads {
                if partition == Partition::WorkQueue {
                    runs.extend(
                        self.chunks
                            .iter()
                            .map(|&chunk| RunConfig::work_queue(threads, chunk)),
                    );
                } else {
                    runs.push(RunConfig::new(partition, threads));
                }
            }
        }
        runs
    }

    /// Seeded grid of samples in `[0, 255]`.
    pub fn random_grid(&self) -> Grid<i32> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        Grid::from_fn(self.width, self.height, |_, _| rng.random_range(0..=255))
    }
}

/// Wall-clock statistics over repeated runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub runs: usize,
    pub min: Duration,
    pub mean: Duration,
}

impl fmt::Display for Timing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "min {:.3} ms, mean {:.3} ms over {} runs",
            self.min.as_secs_f64() * 1e3,
            self.mean.as_secs_f64() * 1e3,
            self.runs
        )
    }
}

/// Number of timed calls for `repetitions`: at least one, at most `u32::MAX`
/// so the total duration divides exactly by the call count.
fn repetition_count(repetitions: usize) -> u32 {
    u32::try_from(repetitions).unwrap_or(u32::MAX).max(1)
}

/// Runs `f` `repetitions` times (at least once) and times each call.
pub fn measure<E, F>(repetitions: usize, mut f: F) -> Result<Timing, E>
where
    F: FnMut() -> Result<(), E>,
{
    let runs = repetition_count(repetitions);
    let mut min = Duration::MAX;
    let mut total = Duration::ZERO;
    for _ in 0..runs {
        let started = Instant::now();
        f()?;
        let elapsed = started.elapsed();
        min = min.min(elapsed);
        total += elapsed;
    }
    Ok(Timing {
        runs: runs as usize,
        min,
        mean: total / runs,
    })
}
