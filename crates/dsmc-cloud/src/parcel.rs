//! The simulated particle ("parcel") record.

use dsmc_core::{CellId, SpeciesId, Vec3};

/// One simulated parcel, representing a statistical weight of real molecules
/// of a single species.
///
/// A parcel is owned exclusively by the [`ParticleStore`][crate::ParticleStore]
/// and mutated in place by the move, collision, and sampling phases.  The
/// `cell` field is a plain index into the occupancy structure (no
/// back-pointer), kept consistent by [`CellIndex`][crate::CellIndex].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Parcel {
    /// Position, m.
    pub position: Vec3,
    /// Linear velocity, m/s.
    pub velocity: Vec3,
    /// Continuous rotational energy, J.
    pub rotational_energy: f64,
    /// Quantum level per vibrational mode of the species (length equals the
    /// species' mode count; empty for atoms).
    pub vibrational_levels: Vec<u16>,
    /// Electronic level index (0 = ground state).
    pub electronic_level: u16,
    /// Species type.
    pub species: SpeciesId,
    /// Owning cell.  `CellId::INVALID` only transiently, before the first
    /// occupancy build.
    pub cell: CellId,
    /// Radial weighting factor.  1.0 everywhere except in axisymmetric runs,
    /// where it scales this parcel's effective statistical weight.
    pub rwf: f64,
}

impl Parcel {
    /// Construct a parcel in its internal ground state.
    pub fn new(position: Vec3, velocity: Vec3, species: SpeciesId, vibrational_mode_count: usize) -> Self {
        Self {
            position,
            velocity,
            rotational_energy:  0.0,
            vibrational_levels: vec![0; vibrational_mode_count],
            electronic_level:   0,
            species,
            cell: CellId::INVALID,
            rwf:  1.0,
        }
    }

    /// Translational kinetic energy for a molecule of mass `mass`, J.
    #[inline]
    pub fn translational_energy(&self, mass: f64) -> f64 {
        0.5 * mass * self.velocity.mag_sqr()
    }
}
