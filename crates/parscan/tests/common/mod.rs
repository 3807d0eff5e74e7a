use parscan::{CombineOp, ScanKind};
use rand::distr::{Distribution, Uniform};
use rand_xoshiro::Xoshiro256PlusPlus;
use rand_xoshiro::rand_core::SeedableRng;

/// An independent sequential reference scan (deliberately *not* implemented
/// in terms of the crate's primitives, so it can serve as an oracle).
/// Returns the output sequence and the total fold.
#[allow(dead_code)]
pub fn oracle_scan<T, C>(input: &[T], combine: &C, kind: ScanKind) -> (Vec<T>, T)
where
    T: Clone,
    C: CombineOp<T>,
{
    let mut output = Vec::with_capacity(input.len());
    let mut running = combine.identity();
    for x in input {
        match kind {
            ScanKind::Exclusive => {
                output.push(running.clone());
                running = combine.combine(&running, x);
            }
            ScanKind::Inclusive => {
                running = combine.combine(&running, x);
                output.push(running.clone());
            }
        }
    }
    (output, running)
}

/// Build a reproducible vector of small integers.
///
/// We intentionally use integers so that the combine operation is exactly
/// associative and every strategy/backend/partitioning must agree bitwise.
#[allow(dead_code)]
pub fn random_ints(len: usize, seed: u64) -> Vec<i64> {
    let mut my_rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let dist = Uniform::try_from(-5..10).unwrap();
    (0..len).map(|_| i64::from(dist.sample(&mut my_rng))).collect()
}
