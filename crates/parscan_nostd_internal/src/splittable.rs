//! The divide-and-conquer scan strategy.
//!
//! # Splittable Accumulation
//!
//! A [`ScanAccumulator`] is a stateful unit bound to one contiguous
//! sub-range of the scan: it walks its range in ascending order, folding
//! elements into a private running accumulation and (on the final pass)
//! writing the running totals into its own slice of the output.
//!
//! The interesting part is what happens when a scheduler splits a unit in
//! two so the halves can run on different workers. The right-hand sibling
//! cannot know the fold of everything before it (the left half may not
//! have run yet), so it is re-seeded at the *identity* rather than at the
//! parent's current accumulation. Every value the sibling subsequently
//! accumulates (or writes) is therefore only ever relative to what it has
//! itself seen: locally correct modulo an unknown prefix. Resolving that
//! prefix is deferred to [`ScanAccumulator::merge`], which folds a
//! completed predecessor's accumulation into the unit's running total
//! *before* the unit processes the rest of its range.
//!
//! This is what makes out-of-order parallel execution correct: splits can
//! happen anywhere, siblings can run whenever, and as long as every unit's
//! prefix is resolved (by merging, in right-to-left order relative to final
//! range position) before its output is considered final, the result is
//! indistinguishable from a strictly sequential left-to-right scan.
//!
//! Merging only ever touches the scalar accumulator that is carried forward
//! into unprocessed ranges; it never rewrites output a unit has already
//! emitted. A scheduler that lets a unit write output *before* its prefix
//! is known must instead run that unit's range twice: once in reduce-only
//! mode ([`process_reduce`], no writes) to learn the range's total, and
//! once in scan mode ([`process_scan`]) after the prefix has been resolved.
//! The rayon backend in the `parscan` crate does exactly that; the serial
//! driver below resolves prefixes eagerly and gets away with a single scan
//! pass per leaf.
//!
//! [`process_reduce`]: ScanAccumulator::process_reduce
//! [`process_scan`]: ScanAccumulator::process_scan

use crate::combine::CombineOp;
use crate::scan::{ScanKind, reduce, scan_into};
use crate::view::{SequenceView, SequenceViewMut};

/// A splittable scan unit bound to a sub-range of the input and output.
///
/// The unit owns its slice of the output exclusively, so no two units can
/// ever write the same index.
pub struct ScanAccumulator<'a, T, C: CombineOp<T>> {
    input: SequenceView<'a, T>,
    output: SequenceViewMut<'a, T>,
    acc: T,
    combine: &'a C,
    kind: ScanKind,
}

impl<'a, T, C> ScanAccumulator<'a, T, C>
where
    T: Clone,
    C: CombineOp<T>,
{
    /// Bind a unit to the full range, with the accumulation seeded at the
    /// identity.
    pub fn new(
        input: SequenceView<'a, T>,
        output: SequenceViewMut<'a, T>,
        combine: &'a C,
        kind: ScanKind,
    ) -> Result<Self, &'static str> {
        if input.len() != output.len() {
            return Err("a scan unit needs input and output ranges of the same length");
        }
        Ok(Self {
            acc: combine.identity(),
            input,
            output,
            combine,
            kind,
        })
    }

    pub fn len(&self) -> usize {
        self.input.len()
    }

    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
    }

    /// the fold of everything this unit has seen so far (merged
    /// predecessors included)
    pub fn accumulated(&self) -> &T {
        &self.acc
    }

    /// Split the unit into two siblings covering `[0, mid)` and
    /// `[mid, len)`.
    ///
    /// The left sibling continues the parent's logical position and keeps
    /// its accumulation; the right sibling is re-seeded at the identity
    /// (its prefix is unknown until a later `merge`). The split is
    /// consuming on purpose: the two siblings take disjoint ownership of
    /// the parent's output range, so the parent must no longer exist.
    ///
    /// Panics if `mid > len` (caller bug).
    pub fn split_at(self, mid: usize) -> (Self, Self) {
        let right_acc = self.combine.identity();
        let (input_left, input_right) = self.input.split_at(mid);
        let (output_left, output_right) = self.output.split_at(mid);
        (
            Self {
                input: input_left,
                output: output_left,
                acc: self.acc,
                combine: self.combine,
                kind: self.kind,
            },
            Self {
                input: input_right,
                output: output_right,
                acc: right_acc,
                combine: self.combine,
                kind: self.kind,
            },
        )
    }

    /// The preliminary, reduce-only pass: fold every bound element into the
    /// accumulation without writing any output.
    ///
    /// Used by schedulers that need a range's total before its prefix is
    /// known (the range is processed again, in scan mode, once it is).
    pub fn process_reduce(&mut self) {
        self.acc = reduce(&self.input, self.combine, self.acc.clone());
    }

    /// The final pass: walk the bound range, writing each position's
    /// running total into the output and folding the element into the
    /// accumulation.
    ///
    /// The write/fold ordering per [`ScanKind`] is the single one
    /// implemented by [`scan_into`]; afterwards the accumulation holds the
    /// fold of the unit's entire range on top of whatever prefix had been
    /// merged in.
    pub fn process_scan(&mut self) {
        self.acc = scan_into(
            &self.input,
            &mut self.output,
            self.combine,
            self.acc.clone(),
            self.kind,
        );
    }

    /// Fold a completed predecessor's accumulation into this unit's running
    /// total.
    ///
    /// # Preconditions (the scheduler's obligations, not emergent behavior)
    /// - `sibling`'s range lies logically *before* every element this unit
    ///   has yet to process, and
    /// - `sibling` has already completed its own pass over its full range
    ///   (so its accumulation is final).
    ///
    /// The predecessor lands on the *left* of the combine, as required for
    /// non-commutative operations. Output this unit already emitted is
    /// untouched; merges act only through the accumulation carried forward.
    pub fn merge(&mut self, sibling: &Self) {
        self.acc = self.combine.combine(&sibling.acc, &self.acc);
    }

    /// Install a fully-resolved prefix for this unit's range.
    ///
    /// Equivalent to merging every preceding sibling (in right-to-left
    /// order) into a freshly seeded unit; schedulers that carried the
    /// preceding accumulation around as a bare total use this instead of
    /// [`merge`]. Must happen before [`process_scan`].
    ///
    /// [`merge`]: ScanAccumulator::merge
    /// [`process_scan`]: ScanAccumulator::process_scan
    pub fn set_prefix(&mut self, prefix: T) {
        self.acc = prefix;
    }

    /// the total fold over everything the unit has seen, merges included
    pub fn final_value(self) -> T {
        self.acc
    }
}

/// Run the splittable-accumulator scan without a scheduler: recursively
/// split down to `grain` elements, scan the left sibling, merge it into the
/// right sibling, then scan the right. Returns the total fold.
///
/// Processing left-before-right means every unit's prefix is resolved by
/// the time it scans, so a single pass per leaf suffices. The result is
/// identical to any correctly-ordered parallel execution of the same
/// protocol, which is what makes this the equivalence oracle for the
/// parallel backend.
pub fn scan_splittable_serial<T, C>(unit: ScanAccumulator<'_, T, C>, grain: usize) -> T
where
    T: Clone,
    C: CombineOp<T>,
{
    assert!(grain > 0, "the grain size must be positive");
    split_process_merge(unit, grain).final_value()
}

fn split_process_merge<'a, T, C>(
    unit: ScanAccumulator<'a, T, C>,
    grain: usize,
) -> ScanAccumulator<'a, T, C>
where
    T: Clone,
    C: CombineOp<T>,
{
    if unit.len() <= grain {
        let mut unit = unit;
        unit.process_scan();
        unit
    } else {
        let mid = unit.len() / 2;
        let (left, mut right) = unit.split_at(mid);
        let left = split_process_merge(left, grain);
        // the left subtree is fully resolved, so its accumulation (prefix
        // included) is exactly the right sibling's missing prefix
        right.merge(&left);
        split_process_merge(right, grain)
    }
}
