//! Our parallelism abstraction: the seam between the scan algorithms and
//! whatever fork-join machinery actually runs them.
//!
//! The algorithms in this crate never spawn work themselves. They describe
//! independent tasks (per-tile phases, splittable units) plus the ordering
//! constraints between them, and an [`Executor`] supplies the actual
//! parallelism: a work-stealing pool, scoped threads, or plain serial
//! execution on the calling thread. Keeping the ordering requirements
//! explicit on this trait (rather than letting them emerge from one
//! particular scheduler's join order) is what lets any fork-join backend
//! satisfy them.

use crate::combine::CombineOp;
use crate::scan::ScanKind;
use crate::view::{SequenceView, SequenceViewMut};

/// A backend capable of driving both scan strategies.
///
/// Implementations must uphold the ordering contracts of the strategies
/// they parallelize; correctness (not memory safety) depends on it:
///
/// - **Tiled** ([`drive_tiled`]): phases 1 and 3 may each run their
///   per-tile tasks in any order and on any workers, but a full barrier is
///   required after phase 1 (every tile total recorded) and after phase 2
///   (every carry-in computed and visible) before any phase-3 task starts.
///   Phase 2 is sequential over a tile-count-sized array and must run on a
///   single owner.
/// - **Fork-join** ([`drive_fork_join`]): ranges may be split and
///   processed in any order, but a unit's output pass must not run until
///   the accumulations of *all* preceding ranges have been merged into it,
///   with earlier accumulations on the left of the combine (see
///   [`ScanAccumulator::merge`]).
///
/// Both entry points return the total fold of the input and leave the
/// output untouched when they report an error.
///
/// [`drive_tiled`]: Executor::drive_tiled
/// [`drive_fork_join`]: Executor::drive_fork_join
/// [`ScanAccumulator::merge`]: crate::ScanAccumulator::merge
pub trait Executor {
    /// Run the three-phase tiled scan with at most `tile_count` tiles.
    ///
    /// `tile_count` must be positive; the effective count degrades for
    /// small inputs (see [`TileLayout`](crate::TileLayout)).
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
        C: CombineOp<T> + Sync;

    /// Run the splittable-accumulator scan, splitting ranges no smaller
    /// than `grain_size` elements.
    ///
    /// `grain_size` must be positive.
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
        C: CombineOp<T> + Sync;
}
