//! Local/global min-max tracking and normalization into `[0, 255]`.

use std::sync::atomic::{AtomicI32, Ordering};

/// Upper bound of the normalized output range.
pub const NORMALIZED_MAX: i64 = 255;

/// Running minimum and maximum of produced samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extrema {
    pub min: i32,
    pub max: i32,
}

impl Extrema {
    /// Identity for [`Extrema::merge`]: no samples seen.
    pub const EMPTY: Extrema = Extrema {
        min: i32::MAX,
        max: i32::MIN,
    };

    #[inline]
    pub fn include(&mut self, value: i32) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    #[inline]
    pub fn merge(self, other: Extrema) -> Extrema {
        Extrema {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }

    #[inline]
    pub fn normalize(&self, value: i32) -> i32 {
        normalize(value, self.min, self.max)
    }
}

impl Default for Extrema {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl FromIterator<i32> for Extrema {
    fn from_iter<I: IntoIterator<Item = i32>>(iter: I) -> Self {
        let mut extrema = Extrema::EMPTY;
        for v in iter {
            extrema.include(v);
        }
        extrema
    }
}

/// Rescales `value` from `[gmin, gmax]` to `[0, 255]` with truncating division.
///
/// When `gmin == gmax` the value is returned unchanged.
#[inline]
pub fn normalize(value: i32, gmin: i32, gmax: i32) -> i32 {
    if gmin == gmax {
        return value;
    }
    let scaled = (value as i64 - gmin as i64) * NORMALIZED_MAX / (gmax as i64 - gmin as i64);
    scaled as i32
}

/// Per-run publication array: slot `2*tid` holds worker `tid`'s local minimum,
/// slot `2*tid + 1` its local maximum.
///
/// Each worker writes only its own pair. Readers must wait on the run barrier
/// after every worker has published.
#[derive(Debug)]
pub struct ExtremaBoard {
    slots: Box<[AtomicI32]>,
}

impl ExtremaBoard {
    pub fn new(workers: usize) -> Self {
        let slots = (0..workers)
            .flat_map(|_| {
                [
                    AtomicI32::new(Extrema::EMPTY.min),
                    AtomicI32::new(Extrema::EMPTY.max),
                ]
            })
            .collect();
        Self { slots }
    }

    pub fn workers(&self) -> usize {
        self.slots.len() / 2
    }

    pub fn publish(&self, tid: usize, local: Extrema) {
        self.slots[2 * tid].store(local.min, Ordering::Release);
        self.slots[2 * tid + 1].store(local.max, Ordering::Release);
    }

    pub fn local(&self, tid: usize) -> Extrema {
        Extrema {
            min: self.slots[2 * tid].load(Ordering::Acquire),
            max: self.slots[2 * tid + 1].load(Ordering::Acquire),
        }
    }

    /// Scans every published pair. Called redundantly by each worker.
    pub fn reduce(&self) -> Extrema {
        (0..self.workers())
            .map(|tid| self.local(tid))
            .fold(Extrema::EMPTY, Extrema::merge)
    }
}
