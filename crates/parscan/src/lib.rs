/*!
Provides parallelized routines for computing prefix scans (cumulative
folds) over sequences with a caller-supplied associative combine operation.

# High-Level: Prefix Scans

A scan computes, for every position of a sequence, the fold of all elements
before it (exclusive) or up to and including it (inclusive). With addition
as the combine operation this is the familiar running total; the machinery
here works for any associative operation with an identity element.

Two parallel strategies are implemented behind one data contract (input
sequence, combine operation, identity, output sequence):

- [`tiled_scan`] partitions the input into a bounded number of tiles,
  reduces each tile in parallel, exclusive-scans the small array of tile
  totals to learn each tile's carry-in offset, then re-scans each tile in
  parallel seeded with its carry-in.
- [`fork_join_scan`] recursively splits the range on a work-stealing pool.
  Each split carries an independent accumulator seeded at the identity, and
  sibling accumulators are merged after the fact, right-to-left, to resolve
  every range's prefix before its output is finalized (see
  [`ScanAccumulator`]).

Both produce output identical to the sequential [`scan_seq`], element for
element: exactly so for combine operations that are exactly associative
(integer arithmetic), and up to re-association for ones that aren't
(floating point addition).

# Example

```
use parscan::{ScanKind, Sum, scan_seq};

let input = [3, 1, 7, 0, 1, 4, 5, 9, 2];
let mut output = [0; 9];
let total = scan_seq(&input, &mut output, &Sum, ScanKind::Exclusive)?;
assert_eq!(output, [0, 3, 4, 11, 11, 12, 16, 21, 30]);
assert_eq!(total, 32);
# Ok::<(), parscan::Error>(())
```

# Developer Guide

The algorithmic core lives in [`parscan_nostd_internal`]; this crate adds
the allocating entry points, the error type, and the executors that supply
actual parallelism behind the [`Executor`] seam.
*/

#![deny(rustdoc::broken_intra_doc_links)]

// inform build-system of the crates in this package
mod error;
mod parallel_rayon;
mod parallel_serial;
mod scan;

// pull in symbols that are visible outside of the package
pub use error::Error;
pub use parallel_rayon::RayonExecutor;
pub use parallel_serial::SerialExecutor;
pub use parscan_nostd_internal::{
    CombineOp, Executor, FnCombine, Max, Product, ScanAccumulator, ScanKind, SequenceView,
    SequenceViewMut, Sum, TileLayout, reduce, scan_into,
};
pub use scan::{fork_join_scan, scan_seq, tiled_scan};
