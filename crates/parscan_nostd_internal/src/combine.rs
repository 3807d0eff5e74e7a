//! Define the combine-operation machinery (that doesn't require the
//! standard lib)
//!
//! # Combine Machinery
//!
//! Every scan in this crate is a cumulative fold: it walks a sequence and
//! repeatedly combines a running value with the next element. The binary
//! operation doing the combining is supplied by the caller and is the only
//! thing the algorithms know about the element type.
//!
//! Two requirements are placed on the operation (neither can be checked at
//! runtime, so they are trusted):
//! - it must be associative. The parallel strategies re-associate the fold
//!   across tiles/splits, so a non-associative operation produces outputs
//!   that depend on the partitioning. (This is why the test suites operate
//!   on integer values: floating point addition is famously not strictly
//!   associative.)
//! - the identity must be neutral on both sides:
//!   `combine(e, x) == x == combine(x, e)`. Every independent accumulation
//!   path is seeded with the identity so that partial results can be merged
//!   later without re-deriving what was already folded.
//!
//! The operation must not have side effects that are observable across
//! concurrent invocations; the parallel executors will call it from multiple
//! threads at once.

/// An associative binary operation bundled with its identity value.
///
/// Implementations for the common arithmetic folds over primitive types are
/// provided ([`Sum`], [`Product`], [`Max`]). Arbitrary closures can be
/// adapted with [`FnCombine`].
pub trait CombineOp<T> {
    /// fold `a` and `b` into a single value.
    ///
    /// `a` always holds the logically-earlier accumulation. Implementations
    /// of non-commutative operations must respect that ordering.
    fn combine(&self, a: &T, b: &T) -> T;

    /// the neutral element used to seed every independent accumulation path
    fn identity(&self) -> T;
}

/// Adapts a plain closure (plus an identity value) into a [`CombineOp`].
///
/// This is the escape hatch for callers that don't want to define a type:
/// the closure is trusted to be associative and the value to be its
/// identity.
pub struct FnCombine<T, F> {
    op: F,
    identity: T,
}

impl<T: Clone, F: Fn(&T, &T) -> T> FnCombine<T, F> {
    pub fn new(op: F, identity: T) -> Self {
        Self { op, identity }
    }
}

impl<T: Clone, F: Fn(&T, &T) -> T> CombineOp<T> for FnCombine<T, F> {
    fn combine(&self, a: &T, b: &T) -> T {
        (self.op)(a, b)
    }

    fn identity(&self) -> T {
        self.identity.clone()
    }
}

/// Addition, with `0` as the identity.
#[derive(Clone, Copy)]
pub struct Sum;

/// Multiplication, with `1` as the identity.
#[derive(Clone, Copy)]
pub struct Product;

/// Maximum, with the type's minimum value as the identity.
///
/// Only provided for the integer widths (for floats, the choice between
/// `MIN` and negative infinity is ambiguous enough that callers should spell
/// out what they want with [`FnCombine`]).
#[derive(Clone, Copy)]
pub struct Max;

macro_rules! impl_arith_combine {
    ($($t:ty),*) => {$(
        impl CombineOp<$t> for Sum {
            fn combine(&self, a: &$t, b: &$t) -> $t {
                *a + *b
            }

            fn identity(&self) -> $t {
                0 as $t
            }
        }

        impl CombineOp<$t> for Product {
            fn combine(&self, a: &$t, b: &$t) -> $t {
                *a * *b
            }

            fn identity(&self) -> $t {
                1 as $t
            }
        }
    )*};
}

impl_arith_combine!(i32, i64, u32, u64, usize, f32, f64);

macro_rules! impl_max_combine {
    ($($t:ty),*) => {$(
        impl CombineOp<$t> for Max {
            fn combine(&self, a: &$t, b: &$t) -> $t {
                (*a).max(*b)
            }

            fn identity(&self) -> $t {
                <$t>::MIN
            }
        }
    )*};
}

impl_max_combine!(i32, i64, u32, u64, usize);
