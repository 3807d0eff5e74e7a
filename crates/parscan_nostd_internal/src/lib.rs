#![no_std]
mod combine;
mod parallel;
mod scan;
mod splittable;
mod tiled;
mod view;

pub use combine::{CombineOp, FnCombine, Max, Product, Sum};
pub use parallel::Executor;
pub use scan::{ScanKind, reduce, scan_into};
pub use splittable::{ScanAccumulator, scan_splittable_serial};
pub use tiled::{TileLayout, tiled_scan_serial};
pub use view::{SequenceView, SequenceViewMut};
