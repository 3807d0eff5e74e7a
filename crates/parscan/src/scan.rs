//! The public entry points: validate, pick defaults, allocate scratch, and
//! hand off to an executor.

use crate::error::Error;
use crate::parallel_rayon::RayonExecutor;
use parscan_nostd_internal::{
    CombineOp, Executor, ScanKind, SequenceView, SequenceViewMut, scan_into,
};
use std::thread::available_parallelism;

fn check_lengths(input_len: usize, output_len: usize) -> Result<(), Error> {
    if input_len == output_len {
        Ok(())
    } else {
        Err(Error::shape_mismatch(input_len, output_len))
    }
}

fn worker_count() -> usize {
    available_parallelism().map(|n| n.get()).unwrap_or(1)
}

/// Sequentially scan `input` into `output`, returning the total fold.
///
/// This is the plain single-pass loop: the baseline the parallel
/// strategies must reproduce element-for-element, and the right tool when
/// the input is too small to be worth partitioning.
pub fn scan_seq<T, C>(input: &[T], output: &mut [T], combine: &C, kind: ScanKind) -> Result<T, Error>
where
    T: Clone,
    C: CombineOp<T>,
{
    check_lengths(input.len(), output.len())?;
    Ok(scan_into(
        &SequenceView::from_slice(input),
        &mut SequenceViewMut::from_slice(output),
        combine,
        combine.identity(),
        kind,
    ))
}

/// Scan `input` into `output` with the three-phase tiled strategy,
/// returning the total fold.
///
/// `tile_count == 0` selects the available hardware parallelism. The tile
/// count only affects performance, never the output (and it degrades
/// automatically when the input is smaller than the requested count).
///
/// On error the output is untouched. A panicking combine op aborts the
/// scan and propagates.
pub fn tiled_scan<T, C>(
    input: &[T],
    output: &mut [T],
    combine: &C,
    kind: ScanKind,
    tile_count: usize,
) -> Result<T, Error>
where
    T: Clone + Send + Sync,
    C: CombineOp<T> + Sync,
{
    check_lengths(input.len(), output.len())?;
    let tile_count = if tile_count == 0 {
        worker_count()
    } else {
        tile_count
    };
    RayonExecutor
        .drive_tiled(
            SequenceView::from_slice(input),
            SequenceViewMut::from_slice(output),
            combine,
            kind,
            tile_count,
        )
        .map_err(Error::internal)
}

/// Scan `input` into `output` with the divide-and-conquer
/// splittable-accumulator strategy, returning the total fold.
///
/// `grain_size` bounds the minimum range size below which splitting stops;
/// `0` selects a default aiming for a handful of leaves per worker. Like
/// the tile count, the grain size only affects performance, never the
/// output.
///
/// On error the output is untouched. A panicking combine op aborts the
/// scan and propagates.
pub fn fork_join_scan<T, C>(
    input: &[T],
    output: &mut [T],
    combine: &C,
    kind: ScanKind,
    grain_size: usize,
) -> Result<T, Error>
where
    T: Clone + Send + Sync,
    C: CombineOp<T> + Sync,
{
    check_lengths(input.len(), output.len())?;
    let grain_size = if grain_size == 0 {
        default_grain(input.len())
    } else {
        grain_size
    };
    RayonExecutor
        .drive_fork_join(
            SequenceView::from_slice(input),
            SequenceViewMut::from_slice(output),
            combine,
            kind,
            grain_size,
        )
        .map_err(Error::internal)
}

// aim for roughly 4 leaves per worker so the pool has slack to steal,
// without splitting so fine that per-task overhead dominates
fn default_grain(len: usize) -> usize {
    (len / (4 * worker_count())).max(1)
}
