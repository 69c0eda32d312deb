//! Shared tile list with a mutex-guarded cursor.

use parking_lot::Mutex;

use crate::partition::{tile_grid, Region, Tile};

/// Immutable tile list plus the index of the next unclaimed tile.
///
/// The lock covers only the read-and-advance of the cursor; callers process
/// a claimed tile after the guard is released.
#[derive(Debug)]
pub struct TileQueue {
    tiles: Vec<Tile>,
    chunk: usize,
    width: usize,
    height: usize,
    next: Mutex<usize>,
}

impl TileQueue {
    pub fn new(width: usize, height: usize, chunk: usize) -> Self {
        Self {
            tiles: tile_grid(width, height, chunk),
            chunk,
            width,
            height,
            next: Mutex::new(0),
        }
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Claims the tile at the cursor, or `None` once the list is exhausted.
    pub fn claim(&self) -> Option<Tile> {
        let mut next = self.next.lock();
        let tile = *self.tiles.get(*next)?;
        *next += 1;
        Some(tile)
    }

    /// Moves the cursor back to the first tile.
    pub fn rewind(&self) {
        *self.next.lock() = 0;
    }

    /// Cells of `tile`, clipped to the grid.
    pub fn region(&self, tile: Tile) -> Region {
        tile.region(self.chunk, self.width, self.height)
    }
}
