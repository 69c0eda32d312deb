use super::*;

/// Counts how many times each cell is visited by the given regions.
fn coverage(width: usize, height: usize, regions: &[Region]) -> Vec<u32> {
    let mut hits = vec![0u32; width * height];
    for region in regions {
        region.for_each(|row, col| hits[row * width + col] += 1);
    }
    hits
}

fn static_regions(partition: Partition, width: usize, height: usize, n: usize) -> Vec<Region> {
    (0..n)
        .map(|tid| partition.static_region(tid, n, width, height).unwrap())
        .collect()
}

// ============================================================================
// Shard ranges
// ============================================================================

#[test]
fn test_shard_range_even_split() {
    let ranges: Vec<_> = (0..4).map(|tid| shard_range(12, tid, 4)).collect();
    assert_eq!(ranges, vec![0..3, 3..6, 6..9, 9..12]);
}

#[test]
fn test_shard_range_last_absorbs_remainder() {
    let ranges: Vec<_> = (0..3).map(|tid| shard_range(11, tid, 3)).collect();
    assert_eq!(ranges, vec![0..3, 3..6, 6..11]);
}

#[test]
fn test_shard_range_more_threads_than_extent() {
    // block = 0: every worker but the last gets nothing.
    let ranges: Vec<_> = (0..5).map(|tid| shard_range(3, tid, 5)).collect();
    assert_eq!(ranges, vec![0..0, 0..0, 0..0, 0..0, 0..3]);
}

// ============================================================================
// Static coverage
// ============================================================================

#[test]
fn test_static_partitions_cover_grid_exactly_once() {
    for partition in [
        Partition::RowShards,
        Partition::ColumnShardsColumnMajor,
        Partition::ColumnShardsRowMajor,
    ] {
        for (width, height) in [(1, 1), (5, 5), (7, 3), (3, 7), (16, 9), (33, 1)] {
            for n in [1, 2, 3, 5, 17] {
                let hits = coverage(width, height, &static_regions(partition, width, height, n));
                assert!(
                    hits.iter().all(|&h| h == 1),
                    "{partition} {width}x{height} n={n}: {hits:?}"
                );
            }
        }
    }
}

#[test]
fn test_row_shards_scan_full_rows() {
    let region = Partition::RowShards.static_region(1, 3, 10, 9).unwrap();
    assert_eq!(region.rows, 3..6);
    assert_eq!(region.cols, 0..10);
    assert_eq!(region.len(), 30);
}

#[test]
fn test_column_variants_share_cells_but_not_order() {
    let col_major = Partition::ColumnShardsColumnMajor
        .static_region(0, 2, 4, 3)
        .unwrap();
    let row_major = Partition::ColumnShardsRowMajor
        .static_region(0, 2, 4, 3)
        .unwrap();
    assert_eq!(col_major.rows, row_major.rows);
    assert_eq!(col_major.cols, row_major.cols);

    let mut a = Vec::new();
    col_major.for_each(|r, c| a.push((r, c)));
    let mut b = Vec::new();
    row_major.for_each(|r, c| b.push((r, c)));

    assert_eq!(a, vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]);
    assert_eq!(b, vec![(0, 0), (0, 1), (1, 0), (1, 1), (2, 0), (2, 1)]);
}

#[test]
fn test_work_queue_has_no_static_region() {
    assert!(Partition::WorkQueue.static_region(0, 1, 4, 4).is_none());
    assert!(!Partition::WorkQueue.is_static());
    assert!(Partition::RowShards.is_static());
}

#[test]
fn test_empty_region() {
    let region = Partition::RowShards.static_region(0, 4, 5, 2).unwrap();
    assert!(region.is_empty());
    assert_eq!(region.len(), 0);
    let mut visited = 0;
    region.for_each(|_, _| visited += 1);
    assert_eq!(visited, 0);
}

// ============================================================================
// Tiles
// ============================================================================

#[test]
fn test_tile_grid_count_uses_ceiling() {
    assert_eq!(tile_grid(10, 7, 3).len(), 4 * 3);
    assert_eq!(tile_grid(9, 9, 3).len(), 9);
    assert_eq!(tile_grid(5, 5, 100).len(), 1);
    assert_eq!(tile_grid(5, 5, 1).len(), 25);
}

#[test]
fn test_tile_grid_is_row_major() {
    let tiles = tile_grid(5, 4, 2);
    let corners: Vec<_> = tiles.iter().map(|t| (t.row, t.col)).collect();
    assert_eq!(
        corners,
        vec![(0, 0), (0, 2), (0, 4), (2, 0), (2, 2), (2, 4)]
    );
}

#[test]
fn test_tile_region_is_clipped() {
    let region = Tile { row: 4, col: 3 }.region(4, 5, 6);
    assert_eq!(region.rows, 4..6);
    assert_eq!(region.cols, 3..5);
}

#[test]
fn test_tiles_cover_grid_exactly_once() {
    for (width, height) in [(1, 1), (5, 5), (7, 3), (16, 9), (33, 2)] {
        for chunk in [1, 2, 3, 4, 8, 64] {
            let regions: Vec<Region> = tile_grid(width, height, chunk)
                .iter()
                .map(|t| t.region(chunk, width, height))
                .collect();
            let hits = coverage(width, height, &regions);
            assert!(
                hits.iter().all(|&h| h == 1),
                "{width}x{height} chunk={chunk}"
            );
        }
    }
}

#[test]
#[should_panic(expected = "chunk must be > 0")]
fn test_tile_grid_zero_chunk_panics() {
    tile_grid(4, 4, 0);
}

#[test]
fn test_partition_serde_names() {
    for partition in Partition::ALL {
        let parsed: Partition = serde_yml::from_str(partition.name()).unwrap();
        assert_eq!(parsed, partition);
    }
}
