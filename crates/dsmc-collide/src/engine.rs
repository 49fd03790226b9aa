//! The No-Time-Counter collision loop.

use dsmc_core::{CellId, WorkerRng};
use dsmc_cloud::{CellIndex, Mesh, ParticleStore};

use crate::{BinaryCollisionModel, CandidateList, PartnerSelection, ReactionModel};

/// Counters accumulated over one collision sweep.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CollisionStats {
    /// Candidate pairs tested.
    pub trials: u64,
    /// Pairs accepted and collided.
    pub accepted: u64,
    /// Accepted pairs that also reacted.
    pub reactions: u64,
}

impl CollisionStats {
    pub fn merge(&mut self, other: CollisionStats) {
        self.trials += other.trials;
        self.accepted += other.accepted;
        self.reactions += other.reactions;
    }
}

/// Per-cell NTC candidate selection and acceptance, dispatching to the
/// configured collision, partner-selection, and reaction strategies.
///
/// For a cell with `N` occupants, per-parcel weight `W` (the equivalent real
/// molecules, scaled by the mean radial weighting factor of the occupants),
/// volume `V`, and running maximum `(σT·cR)max`, the candidate count is
///
///   trials = N·(N−1)·W·(σT·cR)max·Δt / (2V) + remainder
///
/// Only the integer part runs this step; the fraction is stored back as the
/// cell's next-step remainder, so the long-run expected collision count
/// matches the analytic rate regardless of step-size truncation.
pub struct CollisionEngine {
    model:    Box<dyn BinaryCollisionModel>,
    partner:  Box<dyn PartnerSelection>,
    reaction: Box<dyn ReactionModel>,
    /// Real molecules represented by one parcel of unit RWF.
    equivalent_particles: f64,
}

impl CollisionEngine {
    pub fn new(
        model: Box<dyn BinaryCollisionModel>,
        partner: Box<dyn PartnerSelection>,
        reaction: Box<dyn ReactionModel>,
        equivalent_particles: f64,
    ) -> Self {
        Self { model, partner, reaction, equivalent_particles }
    }

    /// Run the NTC sweep over every cell for one step of length `dt`.
    pub fn collide_all<M: Mesh>(
        &self,
        rng: &mut WorkerRng,
        store: &mut ParticleStore,
        index: &mut CellIndex,
        mesh: &M,
        dt: f64,
    ) -> CollisionStats {
        let mut stats = CollisionStats::default();
        for c in 0..index.cell_count() {
            let cell = CellId(c as u32);
            stats.merge(self.collide_cell(rng, store, index, cell, mesh.cell_volume(cell), dt));
        }
        stats
    }

    /// One cell's trials.  Fewer than two occupants is a silent skip; the
    /// remainder still accumulates nothing because the trial count is zero.
    fn collide_cell(
        &self,
        rng: &mut WorkerRng,
        store: &mut ParticleStore,
        index: &mut CellIndex,
        cell: CellId,
        volume: f64,
        dt: f64,
    ) -> CollisionStats {
        let mut stats = CollisionStats::default();
        let (n, mean_rwf, mut candidates) = {
            let occupancy = index.occupancy(cell);
            let n = occupancy.len();
            if n < 2 {
                return stats;
            }
            let rwf_sum: f64 = occupancy
                .iter()
                .filter_map(|&id| store.get(id))
                .map(|p| p.rwf)
                .sum();
            (n, rwf_sum / n as f64, CandidateList::new(occupancy))
        };

        // The acceptance test normalizes by the maximum as it stood when the
        // trial count was computed; in-sweep ratchet updates only take effect
        // next step.
        let sigma_tc_r_max = index.sigma_tc_r_max(cell);
        let weight = self.equivalent_particles * mean_rwf;
        let expected = (n * (n - 1)) as f64 * weight * sigma_tc_r_max * dt / (2.0 * volume)
            + index.remainder(cell);
        let trials = expected.floor();
        index.set_remainder(cell, expected - trials);

        for _ in 0..trials as u64 {
            candidates.reset();
            let Some((ia, ib)) = self.partner.select(rng, &mut candidates) else {
                break;
            };
            stats.trials += 1;

            let (a, b) = store.pair_mut(ia, ib);
            let observed = self.model.sigma_tc_r(a, b);
            index.ratchet_sigma_tc_r(cell, observed);
            // Degenerate pairs (zero relative speed) give observed = 0 and
            // fall through the acceptance test.
            if observed / sigma_tc_r_max > rng.sample01() {
                stats.accepted += 1;
                if self.reaction.react(rng, a, b) {
                    stats.reactions += 1;
                }
                self.model.collide(rng, a, b);
            }
        }
        stats
    }
}
