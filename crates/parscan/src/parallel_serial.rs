//! Implements the "serial" backend for driving scans

use parscan_nostd_internal::{
    CombineOp, Executor, ScanAccumulator, ScanKind, SequenceView, SequenceViewMut, TileLayout,
    scan_splittable_serial, tiled_scan_serial,
};

/// Runs both scan strategies on the calling thread.
///
/// The phase structure and split/merge protocol are exactly the ones the
/// parallel backend runs, just without the parallelism, so for data with an
/// exactly-associative combine (integers, not floats) the two backends
/// produce bitwise identical output. That makes this executor the natural
/// reference in tests, and a reasonable choice when inputs are small enough
/// that forking isn't worth it.
pub struct SerialExecutor;

impl Executor for SerialExecutor {
    fn drive_tiled<T, C>(
        &mut self,
        input: SequenceView<'_, T>,
        mut output: SequenceViewMut<'_, T>,
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
        let mut summaries = vec![combine.identity(); layout.n_tiles()];
        let mut carries = vec![combine.identity(); layout.n_tiles()];
        tiled_scan_serial(
            &input,
            &mut output,
            combine,
            kind,
            &layout,
            &mut summaries,
            &mut carries,
        )
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
        Ok(scan_splittable_serial(unit, grain_size))
    }
}
