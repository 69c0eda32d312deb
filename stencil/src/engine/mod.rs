//! Thread-pool orchestrator for parallel filtering.
//!
//! A run spawns `threads` workers that share one [`RunState`]. Each worker
//! steps through [`Phase`]s:
//!
//! `Compute → PublishLocalExtrema → AwaitPublication → (ResetCursor →
//! AwaitCursorReset) → Normalize → Done`
//!
//! The bracketed phases only apply to [`Partition::WorkQueue`], whose cursor
//! is exhausted after the compute sweep. The first barrier makes every local
//! extrema pair visible; the second keeps workers from claiming tiles before
//! the designated worker has rewound the cursor.


use std::sync::Barrier;
use std::thread;
use std::time::{Duration, Instant};

use common::Grid;

use crate::config::RunConfig;
use crate::error::{check_grid, Result, StencilError};
use crate::evaluate::convolve_at;
use crate::extrema::{Extrema, ExtremaBoard};
use crate::filter::Filter;
use crate::partition::Partition;
use crate::tile_queue::TileQueue;

/// Worker that rewinds the tile cursor between the two sweeps.
const CURSOR_RESETTER: usize = 0;

/// What one worker did during the compute sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerStats {
    pub tid: usize,
    /// Samples convolved.
    pub cells: usize,
    /// Tiles claimed; always zero for static partitions.
    pub tiles: usize,
    /// Extrema of the samples this worker produced.
    pub local: Extrema,
}

/// Result of a parallel run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Global extrema of the convolution sums before normalization.
    pub extrema: Extrema,
    /// One entry per worker, ordered by `tid`.
    pub workers: Vec<WorkerStats>,
    pub elapsed: Duration,
}

/// Raw destination pointer shared by all workers.
/// SAFETY: callers must ensure each index is touched by one worker at a time.
#[derive(Clone, Copy)]
struct TargetPtr {
    ptr: *mut i32,
    len: usize,
}
unsafe impl Send for TargetPtr {}
unsafe impl Sync for TargetPtr {}

impl TargetPtr {
    fn new(target: &mut [i32]) -> Self {
        Self {
            ptr: target.as_mut_ptr(),
            len: target.len(),
        }
    }

    /// SAFETY: `idx < len` and no other worker accesses `idx` concurrently.
    #[inline]
    unsafe fn store(self, idx: usize, value: i32) {
        debug_assert!(idx < self.len);
        self.ptr.add(idx).write(value);
    }

    /// SAFETY: same contract as [`TargetPtr::store`].
    #[inline]
    unsafe fn load(self, idx: usize) -> i32 {
        debug_assert!(idx < self.len);
        self.ptr.add(idx).read()
    }
}

/// State shared by every worker of one run; dropped when the run returns.
struct RunState<'a> {
    filter: &'a Filter,
    source: &'a [i32],
    target: TargetPtr,
    width: usize,
    height: usize,
    partition: Partition,
    threads: usize,
    barrier: Barrier,
    board: ExtremaBoard,
    queue: Option<TileQueue>,
}

impl RunState<'_> {
    /// Visits every cell owned by `tid` in the current sweep. Returns the number
    /// of tiles claimed.
    ///
    /// Static partitions yield the same region on every call. The work queue
    /// yields whatever tiles this worker wins from the shared cursor.
    fn visit<F>(&self, tid: usize, mut f: F) -> usize
    where
        F: FnMut(usize, usize),
    {
        match &self.queue {
            Some(queue) => {
                let mut claimed = 0;
                while let Some(tile) = queue.claim() {
                    claimed += 1;
                    queue.region(tile).for_each(&mut f);
                }
                claimed
            }
            None => {
                if let Some(region) =
                    self.partition
                        .static_region(tid, self.threads, self.width, self.height)
                {
                    region.for_each(f);
                }
                0
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Compute,
    PublishLocalExtrema,
    AwaitPublication,
    ResetCursor,
    AwaitCursorReset,
    Normalize,
    Done,
}

struct Worker<'s, 'a> {
    tid: usize,
    state: &'s RunState<'a>,
    local: Extrema,
    global: Extrema,
    cells: usize,
    tiles: usize,
}

impl<'s, 'a> Worker<'s, 'a> {
    fn new(tid: usize, state: &'s RunState<'a>) -> Self {
        Self {
            tid,
            state,
            local: Extrema::EMPTY,
            global: Extrema::EMPTY,
            cells: 0,
            tiles: 0,
        }
    }

    fn run(mut self) -> WorkerStats {
        let mut phase = Phase::Compute;
        while phase != Phase::Done {
            phase = self.step(phase);
        }

        tracing::trace!(
            tid = self.tid,
            cells = self.cells,
            tiles = self.tiles,
            "worker finished"
        );

        WorkerStats {
            tid: self.tid,
            cells: self.cells,
            tiles: self.tiles,
            local: self.local,
        }
    }

    fn step(&mut self, phase: Phase) -> Phase {
        let state = self.state;
        match phase {
            Phase::Compute => {
                self.compute();
                Phase::PublishLocalExtrema
            }
            Phase::PublishLocalExtrema => {
                state.board.publish(self.tid, self.local);
                Phase::AwaitPublication
            }
            Phase::AwaitPublication => {
                state.barrier.wait();
                self.global = state.board.reduce();
                if state.queue.is_some() {
                    Phase::ResetCursor
                } else {
                    Phase::Normalize
                }
            }
            Phase::ResetCursor => {
                if self.tid == CURSOR_RESETTER {
                    if let Some(queue) = &state.queue {
                        queue.rewind();
                    }
                }
                Phase::AwaitCursorReset
            }
            Phase::AwaitCursorReset => {
                state.barrier.wait();
                Phase::Normalize
            }
            Phase::Normalize => {
                self.normalize();
                Phase::Done
            }
            Phase::Done => Phase::Done,
        }
    }

    fn compute(&mut self) {
        let state = self.state;
        let (width, height) = (state.width, state.height);
        let mut local = Extrema::EMPTY;
        let mut cells = 0;

        let tiles = state.visit(self.tid, |row, col| {
            let sum = convolve_at(state.filter, state.source, width, height, row, col);
            // SAFETY: regions handed out by `visit` are disjoint across workers.
            unsafe { state.target.store(row * width + col, sum) };
            local.include(sum);
            cells += 1;
        });

        self.local = local;
        self.cells = cells;
        self.tiles = tiles;
    }

    fn normalize(&mut self) {
        let state = self.state;
        let width = state.width;
        let global = self.global;

        state.visit(self.tid, |row, col| {
            let idx = row * width + col;
            // SAFETY: regions handed out by `visit` are disjoint across workers.
            unsafe { state.target.store(idx, global.normalize(state.target.load(idx))) };
        });
    }
}

/// Filters `source` into `destination` on `config.threads` workers, then
/// normalizes `destination` into `[0, 255]` using the global extrema.
///
/// The output is identical to [`crate::apply_filter_sequential`] for every
/// partition, thread count and chunk size. Invalid configuration is rejected
/// before any worker is spawned.
pub fn apply_filter_parallel(
    filter: &Filter,
    source: &[i32],
    destination: &mut [i32],
    width: usize,
    height: usize,
    config: &RunConfig,
) -> Result<RunReport> {
    config.validate()?;
    check_grid(width, height, source.len(), destination.len())?;

    let started = Instant::now();
    let threads = config.threads;
    let state = RunState {
        filter,
        source,
        target: TargetPtr::new(destination),
        width,
        height,
        partition: config.partition,
        threads,
        barrier: Barrier::new(threads),
        board: ExtremaBoard::new(threads),
        queue: (config.partition == Partition::WorkQueue)
            .then(|| TileQueue::new(width, height, config.chunk)),
    };

    tracing::debug!(
        width,
        height,
        filter_dimension = filter.dimension(),
        tiles = state.queue.as_ref().map_or(0, |queue| queue.tiles().len()),
        "starting {}",
        config
    );

    let outcomes: Vec<thread::Result<WorkerStats>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..threads)
            .map(|tid| {
                let state = &state;
                thread::Builder::new()
                    .name(format!("stencil-{tid}"))
                    .spawn_scoped(scope, move || Worker::new(tid, state).run())
                    .unwrap_or_else(|e| panic!("Failed to spawn stencil worker {tid}: {e}"))
            })
            .collect();
        handles.into_iter().map(|h| h.join()).collect()
    });

    let mut workers = Vec::with_capacity(threads);
    for (tid, outcome) in outcomes.into_iter().enumerate() {
        match outcome {
            Ok(stats) => workers.push(stats),
            Err(_) => {
                tracing::error!(tid, "stencil worker panicked");
                return Err(StencilError::WorkerPanicked { tid });
            }
        }
    }

    let extrema = state.board.reduce();
    let elapsed = started.elapsed();
    tracing::debug!(
        min = extrema.min,
        max = extrema.max,
        elapsed_us = elapsed.as_micros() as u64,
        "finished {}",
        config
    );

    Ok(RunReport {
        extrema,
        workers,
        elapsed,
    })
}

/// Filters a whole grid into a freshly allocated one.
pub fn filter_grid(filter: &Filter, source: &Grid<i32>, config: &RunConfig) -> Result<Grid<i32>> {
    let mut destination = Grid::new_default(source.width(), source.height());
    apply_filter_parallel(
        filter,
        source.samples(),
        destination.samples_mut(),
        source.width(),
        source.height(),
        config,
    )?;
    Ok(destination)
}
