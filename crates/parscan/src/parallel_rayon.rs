//! Implements the rayon-backed work-stealing backend

use parscan_nostd_internal::{
    CombineOp, Executor, ScanAccumulator, ScanKind, SequenceView, SequenceViewMut, TileLayout,
    reduce, scan_into,
};
use rayon::prelude::*;

/// Runs both scan strategies on rayon's global work-stealing pool.
///
/// The split points and phase structure are deterministic (they depend only
/// on the input length, tile count and grain size, never on which worker
/// runs what), so repeated runs over the same data produce identical output
/// regardless of scheduling, and, for exactly-associative combines,
/// output identical to [`SerialExecutor`](crate::SerialExecutor).
///
/// A combine operation that panics inside the pool aborts the whole scan;
/// rayon propagates the panic to the caller.
#[derive(Default)]
pub struct RayonExecutor;

impl Executor for RayonExecutor {
    fn drive_tiled<T, C>(
        &mut self,
        input: SequenceView<'_, T>,
        output: SequenceViewMut<'_, T>,
        combine: &C,
        kind: ScanKind,
        tile_count: usize,
    ) -> Result<T, &'static str>
    where
        T: Clone + Send + Sync,
        C: CombineOp<T> + Sync,
    {
        if input.len() != output.len() {
            return Err("input and output must have the same length");
        }
        let layout = TileLayout::new(input.len(), tile_count)?;
        let n_tiles = layout.n_tiles();
        if n_tiles == 0 {
            return Ok(combine.identity());
        }

        // phase 1: reduce each tile separately. Collecting is the barrier:
        // no summary entry is readable until every tile has produced one.
        let mut summaries: Vec<T> = Vec::with_capacity(n_tiles);
        (0..n_tiles)
            .into_par_iter()
            .map(|t| {
                let (begin, end) = layout.tile_bounds(t);
                reduce(&input.range(begin, end), combine, combine.identity())
            })
            .collect_into_vec(&mut summaries);

        // phase 2: exclusive-scan the tile totals on this thread (the
        // single owner); the array is tile-count-sized, so there is nothing
        // worth parallelizing
        let mut carries = vec![combine.identity(); n_tiles];
        let total = scan_into(
            &SequenceView::from_slice(&summaries),
            &mut SequenceViewMut::from_slice(&mut carries),
            combine,
            combine.identity(),
            ScanKind::Exclusive,
        );

        // phase 3: hand each tile exclusive ownership of its output range
        // and scan it with its carry-in. The carries vector is complete and
        // frozen before any of these tasks can start.
        let mut tiles: Vec<SequenceViewMut<'_, T>> = Vec::with_capacity(n_tiles);
        let mut rest = output;
        for t in 0..n_tiles - 1 {
            let (begin, end) = layout.tile_bounds(t);
            let (tile, tail) = rest.split_at(end - begin);
            tiles.push(tile);
            rest = tail;
        }
        tiles.push(rest);

        tiles.into_par_iter().enumerate().for_each(|(t, mut tile)| {
            let (begin, end) = layout.tile_bounds(t);
            let _ = scan_into(
                &input.range(begin, end),
                &mut tile,
                combine,
                carries[t].clone(),
                kind,
            );
        });

        Ok(total)
    }

    fn drive_fork_join<'a, T, C>(
        &mut self,
        input: SequenceView<'a, T>,
        output: SequenceViewMut<'a, T>,
        combine: &'a C,
        kind: ScanKind,
        grain_size: usize,
    ) -> Result<T, &'static str>
    where
        T: Clone + Send + Sync,
        C: CombineOp<T> + Sync,
    {
        if grain_size == 0 {
            return Err("the grain size must be positive");
        }
        let unit = ScanAccumulator::new(input, output, combine, kind)?;
        let (tree, total) = upsweep(unit, combine, grain_size);
        downsweep(tree, combine.identity(), combine);
        Ok(total)
    }
}

/// The split tree left behind by [`upsweep`]: leaves hold the still-bound
/// scan units (each has completed its reduce-only pass), branches remember
/// their left subtree's total so [`downsweep`] can resolve the right
/// subtree's prefix without waiting on the left.
enum ScanTree<'a, T, C: CombineOp<T>> {
    Leaf(ScanAccumulator<'a, T, C>),
    Branch {
        left_total: T,
        left: Box<ScanTree<'a, T, C>>,
        right: Box<ScanTree<'a, T, C>>,
    },
}

/// First sweep: recursively split the unit down to `grain` elements and run
/// the reduce-only pass on every leaf, in parallel. Returns the tree of
/// units plus the subtree's total fold.
///
/// Each split re-seeds the right sibling at the identity, so every leaf's
/// accumulation is purely local; the unknown prefixes are resolved by the
/// downsweep.
fn upsweep<'a, T, C>(
    unit: ScanAccumulator<'a, T, C>,
    combine: &C,
    grain: usize,
) -> (ScanTree<'a, T, C>, T)
where
    T: Clone + Send + Sync,
    C: CombineOp<T> + Sync,
{
    if unit.len() <= grain {
        let mut unit = unit;
        unit.process_reduce();
        let total = unit.accumulated().clone();
        (ScanTree::Leaf(unit), total)
    } else {
        let mid = unit.len() / 2;
        let (left, right) = unit.split_at(mid);
        let ((left_tree, left_total), (right_tree, right_total)) = rayon::join(
            || upsweep(left, combine, grain),
            || upsweep(right, combine, grain),
        );
        // join the sibling totals right-to-left: the left subtree's
        // accumulation folds in on the left of the combine
        let total = combine.combine(&left_total, &right_total);
        (
            ScanTree::Branch {
                left_total,
                left: Box::new(left_tree),
                right: Box::new(right_tree),
            },
            total,
        )
    }
}

/// Second sweep: walk the tree carrying each subtree's resolved prefix and
/// run the final scan pass on every leaf, in parallel.
///
/// Descending right merges the left subtree's (already complete) total into
/// the carried prefix before the right subtree may scan. This is the merge-order
/// precondition, enforced here by data dependency rather than by trusting
/// the scheduler.
fn downsweep<'a, T, C>(tree: ScanTree<'a, T, C>, prefix: T, combine: &C)
where
    T: Clone + Send + Sync,
    C: CombineOp<T> + Sync,
{
    match tree {
        ScanTree::Leaf(mut unit) => {
            unit.set_prefix(prefix);
            unit.process_scan();
        }
        ScanTree::Branch {
            left_total,
            left,
            right,
        } => {
            let right_prefix = combine.combine(&prefix, &left_total);
            rayon::join(
                || downsweep(*left, prefix, combine),
                || downsweep(*right, right_prefix, combine),
            );
        }
    }
}
