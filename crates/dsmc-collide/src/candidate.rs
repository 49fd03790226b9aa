//! Per-trial candidate bookkeeping.
//!
//! Within one collision trial a parcel must not be picked twice; across
//! trials the full occupancy is available again.  The list keeps consumed
//! IDs at its tail so a reset is O(1) and no allocation happens per trial.

use dsmc_core::{ParcelId, WorkerRng};

/// A cell occupancy's working copy for candidate-pair selection.
pub struct CandidateList {
    ids:       Vec<ParcelId>,
    available: usize,
}

impl CandidateList {
    /// Snapshot `occupancy` as the candidate pool.
    pub fn new(occupancy: &[ParcelId]) -> Self {
        Self { ids: occupancy.to_vec(), available: occupancy.len() }
    }

    /// Candidates not yet consumed in the current trial.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.available
    }

    /// Draw one candidate uniformly without replacement, or `None` when the
    /// pool is exhausted.
    pub fn take_uniform(&mut self, rng: &mut WorkerRng) -> Option<ParcelId> {
        if self.available == 0 {
            return None;
        }
        let pick = rng.gen_range(0..self.available);
        self.available -= 1;
        self.ids.swap(pick, self.available);
        Some(self.ids[self.available])
    }

    /// Make every candidate available again for the next trial.
    #[inline]
    pub fn reset(&mut self) {
        self.available = self.ids.len();
    }
}
