//! The sequential leaf primitives that both parallel strategies are built
//! out of: folding a range to a single value, and scanning a range while
//! writing the running totals.

use crate::combine::CombineOp;
use crate::view::{SequenceView, SequenceViewMut};

/// Selects which running total lands in each output slot.
///
/// The two conventions differ only in whether the element at a position has
/// already been folded into the value written there. Exactly one write/fold
/// ordering is implemented per convention (in [`scan_into`]) and every
/// strategy goes through it, so the conventions can't drift apart between
/// the tiled and the divide-and-conquer code paths.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanKind {
    /// `out[i]` holds the fold of all elements *before* position `i`
    Exclusive,
    /// `out[i]` holds the fold of all elements up to *and including* `i`
    Inclusive,
}

/// Fold `initial` with each element of `seq` in ascending index order and
/// return the final value. Writes nothing.
///
/// Seeded with the identity this computes the total of the range; seeded
/// with an earlier running value it continues that fold.
pub fn reduce<T, C>(seq: &SequenceView<'_, T>, combine: &C, initial: T) -> T
where
    C: CombineOp<T>,
{
    let mut acc = initial;
    for i in 0..seq.len() {
        acc = combine.combine(&acc, &seq[i]);
    }
    acc
}

/// Scan `input` into `output` (same length), seeded at `initial`, and
/// return the final running value (the reduction of the whole range).
///
/// Callers rely on the return value to chain carry-ins: the tiled strategy
/// feeds each tile's return into the tile-summary array, and the summary
/// array's own exclusive scan produces each tile's seed. A zero-length
/// range performs no writes and returns `initial` unchanged.
///
/// A length mismatch between `input` and `output` is a caller bug, not a
/// recoverable condition, so it panics rather than returning an error.
pub fn scan_into<T, C>(
    input: &SequenceView<'_, T>,
    output: &mut SequenceViewMut<'_, T>,
    combine: &C,
    initial: T,
    kind: ScanKind,
) -> T
where
    T: Clone,
    C: CombineOp<T>,
{
    assert_eq!(
        input.len(),
        output.len(),
        "input and output ranges must have the same length"
    );
    let mut running = initial;
    match kind {
        ScanKind::Exclusive => {
            // write the total *before* this position, then fold
            for i in 0..input.len() {
                output[i] = running.clone();
                running = combine.combine(&running, &input[i]);
            }
        }
        ScanKind::Inclusive => {
            // fold first so the write covers this position too
            for i in 0..input.len() {
                running = combine.combine(&running, &input[i]);
                output[i] = running.clone();
            }
        }
    }
    running
}
