//! Strategy seams of the collision engine.
//!
//! Three pluggable contracts, resolved by name through the
//! [`ModelRegistry`][crate::ModelRegistry] at configuration time:
//! cross-section/scattering, partner selection, and chemistry.  Concrete
//! models hold their own shared-read access to the species table; the engine
//! never looks species properties up itself.

use dsmc_core::{ParcelId, WorkerRng};
use dsmc_cloud::Parcel;

use crate::CandidateList;

// ── Binary collision ─────────────────────────────────────────────────────────

/// Cross-section and post-collision mechanics for one accepted pair.
impl std::fmt::Debug for dyn BinaryCollisionModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn BinaryCollisionModel")
    }
}

pub trait BinaryCollisionModel: Send + Sync {
    /// Total collision cross-section × relative speed for the pair, m³/s.
    ///
    /// Zero relative speed must give zero (the trial is then rejected with
    /// certainty rather than erroring).
    fn sigma_tc_r(&self, a: &Parcel, b: &Parcel) -> f64;

    /// Update both parcels' velocities (and internal state, for inelastic
    /// models) in place.  Must conserve momentum and total energy.
    fn collide(&self, rng: &mut WorkerRng, a: &mut Parcel, b: &mut Parcel);
}

// ── Partner selection ────────────────────────────────────────────────────────

/// Chooses the candidate pair for one trial.
///
/// Alternate strategies may bias the choice (e.g. towards sub-cell
/// neighbours); the default draws both uniformly.
pub trait PartnerSelection: Send + Sync {
    /// Pick two distinct parcels from the pool, or `None` when fewer than
    /// two candidates remain.  Implementations consume from `candidates`;
    /// the engine resets the pool between trials.
    fn select(
        &self,
        rng: &mut WorkerRng,
        candidates: &mut CandidateList,
    ) -> Option<(ParcelId, ParcelId)>;
}

/// Uniform selection without replacement within the trial.
pub struct UniformPartnerSelection;

impl PartnerSelection for UniformPartnerSelection {
    fn select(
        &self,
        rng: &mut WorkerRng,
        candidates: &mut CandidateList,
    ) -> Option<(ParcelId, ParcelId)> {
        if candidates.remaining() < 2 {
            return None;
        }
        let a = candidates.take_uniform(rng)?;
        let b = candidates.take_uniform(rng)?;
        Some((a, b))
    }
}

// ── Chemistry ────────────────────────────────────────────────────────────────

/// Chemistry hook for an accepted collision, invoked before scattering.
///
/// A reacting model may change species identities and redistribute internal
/// energy; it must leave the pair in a state whose total energy the
/// scattering step can conserve.
pub trait ReactionModel: Send + Sync {
    /// Returns `true` if a reaction occurred.
    fn react(&self, rng: &mut WorkerRng, a: &mut Parcel, b: &mut Parcel) -> bool;
}

/// Chemistry disabled; every collision is non-reacting.
pub struct NoReaction;

impl ReactionModel for NoReaction {
    fn react(&self, _rng: &mut WorkerRng, _a: &mut Parcel, _b: &mut Parcel) -> bool {
        false
    }
}
