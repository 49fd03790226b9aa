//! Deterministic per-worker RNG wrapper.
//!
//! # Determinism strategy
//!
//! Each parallel worker owns exactly one `WorkerRng`, seeded by:
//!
//!   seed = global_seed XOR (partition * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive partition IDs uniformly across the seed space.
//! Within one worker the stream is strictly sequential: every sampling and
//! collision draw consumes from it in the order trials are processed.
//!
//! Consequence: a run is reproducible for a fixed seed *and* a fixed
//! partition count.  Changing the partition count changes which worker draws
//! which collision, so trajectories differ.  This is a documented property
//! of the method, not a defect.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::PartitionId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Per-worker deterministic RNG.
///
/// The type is `Send` but intentionally not `Sync`: a worker's stream must
/// never be shared between threads.  Pass `&mut WorkerRng` explicitly into
/// every sampling call — there is no implicit global generator.
pub struct WorkerRng(SmallRng);

impl WorkerRng {
    /// Seed directly from a 64-bit value (single-partition runs and tests).
    pub fn new(seed: u64) -> Self {
        WorkerRng(SmallRng::seed_from_u64(seed))
    }

    /// Seed deterministically from the run's global seed and a partition ID.
    pub fn for_partition(global_seed: u64, partition: PartitionId) -> Self {
        let seed = global_seed ^ (partition.0 as u64).wrapping_mul(MIXING_CONSTANT);
        WorkerRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `WorkerRng` with a different seed offset — useful for
    /// giving a test fixture its own stream without disturbing the main one.
    pub fn child(&mut self, offset: u64) -> WorkerRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        WorkerRng(SmallRng::seed_from_u64(child_seed))
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Sample a uniformly distributed value of any `Standard`-distributed type.
    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    /// Uniform sample in `[0, 1)`.
    #[inline]
    pub fn sample01(&mut self) -> f64 {
        self.0.r#gen::<f64>()
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }
}
