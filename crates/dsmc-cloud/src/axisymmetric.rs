//! Radial weighting for axisymmetric domains.
//!
//! An axisymmetric slice represents an annular wedge of the full 3-D domain:
//! the real volume a cell stands for grows with its radius.  Scaling each
//! parcel's statistical weight by a radial weighting factor (RWF) keeps the
//! simulated number density equal to the correct 3-D real-particle density
//! without exploding the parcel count near the axis.
//!
//! The factor grows linearly from 1 on the axis to `max_rwf` at
//! `radial_extent` (particle-based weighting; the parcel's own radius is
//! used, not its cell centre's).  It enters the NTC trial count through the
//! per-parcel weight term and the weight assigned to injected parcels; the
//! collision acceptance test is unchanged.

use dsmc_core::Vec3;

use crate::ParticleStore;

/// Axis of revolution of the axisymmetric slice.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RevolutionAxis {
    X,
    Y,
    Z,
}

/// Radial weighting configuration for an axisymmetric run.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AxisymmetricWeighting {
    /// Axis of revolution (default in the reference implementation: x).
    pub axis: RevolutionAxis,
    /// Radial extent of the domain, m.
    pub radial_extent: f64,
    /// Weighting factor at `radial_extent`; 1 disables weighting.
    pub max_rwf: f64,
}

impl AxisymmetricWeighting {
    /// Distance of `position` from the revolution axis.
    #[inline]
    pub fn radius(&self, position: Vec3) -> f64 {
        match self.axis {
            RevolutionAxis::X => (position.y * position.y + position.z * position.z).sqrt(),
            RevolutionAxis::Y => (position.x * position.x + position.z * position.z).sqrt(),
            RevolutionAxis::Z => (position.x * position.x + position.y * position.y).sqrt(),
        }
    }

    /// Radial weighting factor at `position`, clamped to `[1, max_rwf]`.
    #[inline]
    pub fn rwf_at(&self, position: Vec3) -> f64 {
        let frac = (self.radius(position) / self.radial_extent).clamp(0.0, 1.0);
        1.0 + (self.max_rwf - 1.0) * frac
    }

    /// Refresh every parcel's stored RWF from its current position.
    ///
    /// Run after the move phase, before collisions, so the trial-count weight
    /// term sees up-to-date factors.
    pub fn apply(&self, store: &mut ParticleStore) {
        for (_, parcel) in store.iter_mut() {
            parcel.rwf = self.rwf_at(parcel.position);
        }
    }
}
