//! The fixed-tile scan strategy.
//!
//! The input is partitioned into a bounded number of contiguous tiles and
//! the scan runs in three phases over that partition:
//! 1. reduce each tile to a single total (one independent task per tile)
//! 2. exclusive-scan the small array of tile totals, producing each tile's
//!    carry-in offset (inherently sequential, runs on a single owner)
//! 3. re-scan each tile seeded with its carry-in (one independent task per
//!    tile)
//!
//! The phase boundaries are full barriers. No tile may begin phase 3 until
//! *every* tile has finished phase 1 and phase 2 has completed and become
//! visible: reading a carry-in early yields silently wrong results, not a
//! crash. An executor that parallelizes phases 1 and 3 owns those barriers;
//! [`tiled_scan_serial`] gets them for free by being sequential and is the
//! reference the parallel backends must match exactly.
//!
//! The tile-summary scratch is sized by the tile count (bounded by the
//! available parallelism), never by the data size, and is provided by the
//! caller so this crate stays allocation-free.

use crate::combine::CombineOp;
use crate::scan::{ScanKind, reduce, scan_into};
use crate::view::{SequenceView, SequenceViewMut};

/// Describes how `size` elements are partitioned into contiguous tiles.
///
/// Every tile except the last spans `ceil(size / requested_tiles)` elements
/// and the last absorbs the remainder (which may be smaller, never larger).
/// When `size` is small the effective tile count degrades so that no tile
/// is ever empty: an empty tile would shift the positional meaning of the
/// summary array, and there is nothing for it to contribute anyway.
#[derive(Clone, Copy, Debug)]
pub struct TileLayout {
    size: usize,
    tile_size: usize,
    n_tiles: usize,
}

impl TileLayout {
    /// Partition `size` elements into at most `requested_tiles` tiles.
    ///
    /// `size == 0` is not an error; it produces a layout with zero tiles.
    pub fn new(size: usize, requested_tiles: usize) -> Result<Self, &'static str> {
        if requested_tiles == 0 {
            return Err("the tile count must be positive");
        }
        if size == 0 {
            return Ok(Self {
                size,
                tile_size: 0,
                n_tiles: 0,
            });
        }
        let tile_size = size.div_ceil(requested_tiles);
        // recomputing the count from the tile size is what guarantees the
        // last tile is never empty (e.g. size=4, requested=3 gives 2 tiles
        // of 2 rather than tiles of 2, 2 and 0)
        let n_tiles = size.div_ceil(tile_size);
        Ok(Self {
            size,
            tile_size,
            n_tiles,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn n_tiles(&self) -> usize {
        self.n_tiles
    }

    /// the half-open index interval `[begin, end)` covered by `tile`
    ///
    /// The tiles partition `[0, size)` exactly: no gaps, no overlaps.
    pub fn tile_bounds(&self, tile: usize) -> (usize, usize) {
        let begin = tile * self.tile_size;
        let end = (begin + self.tile_size).min(self.size);
        (begin, end)
    }
}

/// Run the full three-phase tiled scan sequentially, returning the total
/// fold of the input.
///
/// `summaries` and `carries` each need one entry per tile; their contents
/// on entry are ignored. The phase structure is identical to what a
/// parallel executor runs, so this function doubles as the equivalence
/// oracle for those backends.
pub fn tiled_scan_serial<T, C>(
    input: &SequenceView<'_, T>,
    output: &mut SequenceViewMut<'_, T>,
    combine: &C,
    kind: ScanKind,
    layout: &TileLayout,
    summaries: &mut [T],
    carries: &mut [T],
) -> Result<T, &'static str>
where
    T: Clone,
    C: CombineOp<T>,
{
    if input.len() != layout.size() || output.len() != layout.size() {
        return Err("the layout doesn't match the input/output length");
    }
    if summaries.len() != layout.n_tiles() || carries.len() != layout.n_tiles() {
        return Err("each scratch slice needs exactly one entry per tile");
    }

    // phase 1: reduce each tile separately
    for t in 0..layout.n_tiles() {
        let (begin, end) = layout.tile_bounds(t);
        summaries[t] = reduce(&input.range(begin, end), combine, combine.identity());
    }

    // phase 2: exclusive-scan the tile totals into per-tile carry-ins.
    // The returned running value is the reduction of every tile, i.e. the
    // total fold of the whole input.
    let total = scan_into(
        &SequenceView::from_slice(summaries),
        &mut SequenceViewMut::from_slice(carries),
        combine,
        combine.identity(),
        ScanKind::Exclusive,
    );

    // phase 3: scan each tile separately, seeded with its carry-in
    for t in 0..layout.n_tiles() {
        let (begin, end) = layout.tile_bounds(t);
        scan_into(
            &input.range(begin, end),
            &mut output.range_mut(begin, end),
            combine,
            carries[t].clone(),
            kind,
        );
    }

    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combine::Sum;

    #[test]
    fn layout_even_split() {
        let layout = TileLayout::new(8, 4).unwrap();
        assert_eq!(layout.n_tiles(), 4);
        assert_eq!(layout.tile_bounds(0), (0, 2));
        assert_eq!(layout.tile_bounds(3), (6, 8));
    }

    #[test]
    fn layout_last_tile_absorbs_remainder() {
        let layout = TileLayout::new(9, 4).unwrap();
        // ceil(9 / 4) = 3, so we get 3 tiles of 3 rather than 4 tiles
        assert_eq!(layout.n_tiles(), 3);
        assert_eq!(layout.tile_bounds(2), (6, 9));

        let layout = TileLayout::new(10, 4).unwrap();
        assert_eq!(layout.n_tiles(), 4);
        assert_eq!(layout.tile_bounds(3), (9, 10));
    }

    #[test]
    fn layout_never_produces_empty_tiles() {
        for size in 0..40_usize {
            for requested in 1..12_usize {
                let layout = TileLayout::new(size, requested).unwrap();
                assert!(layout.n_tiles() <= requested);
                let mut covered = 0;
                for t in 0..layout.n_tiles() {
                    let (begin, end) = layout.tile_bounds(t);
                    assert_eq!(begin, covered);
                    assert!(end > begin, "size={size} requested={requested} t={t}");
                    covered = end;
                }
                assert_eq!(covered, size);
            }
        }
    }

    #[test]
    fn layout_degrades_when_size_is_small() {
        let layout = TileLayout::new(3, 8).unwrap();
        assert_eq!(layout.n_tiles(), 3);
    }

    #[test]
    fn layout_rejects_zero_tiles() {
        assert!(TileLayout::new(9, 0).is_err());
    }

    #[test]
    fn serial_driver_matches_the_plain_scan() {
        let input = [3_i64, 1, 7, 0, 1, 4, 5, 9, 2];
        let mut out = [0_i64; 9];
        let layout = TileLayout::new(9, 3).unwrap();
        let mut summaries = [0_i64; 3];
        let mut carries = [0_i64; 3];
        let total = tiled_scan_serial(
            &SequenceView::from_slice(&input),
            &mut SequenceViewMut::from_slice(&mut out),
            &Sum,
            ScanKind::Exclusive,
            &layout,
            &mut summaries,
            &mut carries,
        )
        .unwrap();
        assert_eq!(out, [0, 3, 4, 11, 11, 12, 16, 21, 30]);
        assert_eq!(total, 32);
    }

    #[test]
    fn serial_driver_empty_input() {
        let input: [i64; 0] = [];
        let mut out: [i64; 0] = [];
        let layout = TileLayout::new(0, 4).unwrap();
        let total = tiled_scan_serial(
            &SequenceView::from_slice(&input),
            &mut SequenceViewMut::from_slice(&mut out),
            &Sum,
            ScanKind::Exclusive,
            &layout,
            &mut [],
            &mut [],
        )
        .unwrap();
        assert_eq!(total, 0);
    }

    #[test]
    fn serial_driver_rejects_bad_scratch() {
        let input = [1_i64, 2, 3, 4];
        let mut out = [0_i64; 4];
        let layout = TileLayout::new(4, 2).unwrap();
        let mut too_small = [0_i64; 1];
        let mut carries = [0_i64; 2];
        assert!(
            tiled_scan_serial(
                &SequenceView::from_slice(&input),
                &mut SequenceViewMut::from_slice(&mut out),
                &Sum,
                ScanKind::Exclusive,
                &layout,
                &mut too_small,
                &mut carries,
            )
            .is_err()
        );
    }
}
