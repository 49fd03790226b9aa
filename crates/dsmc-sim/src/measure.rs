//! Whole-domain aggregate measurements.

use dsmc_core::Vec3;
use dsmc_cloud::ParticleStore;
use dsmc_species::SpeciesTable;

/// Aggregates over the local parcel population, weighted by each parcel's
/// effective statistical weight (`W·rwf`).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InfoMeasurements {
    /// Live parcels on this partition.
    pub parcel_count: usize,
    /// Total represented mass, kg.
    pub mass: f64,
    /// Total linear momentum, kg·m/s.
    pub linear_momentum: Vec3,
    /// Total translational kinetic energy, J.
    pub kinetic_energy: f64,
    /// Total rotational energy, J.
    pub rotational_energy: f64,
    /// Total vibrational energy, J.
    pub vibrational_energy: f64,
    /// Total electronic excitation energy, J.
    pub electronic_energy: f64,
}

impl InfoMeasurements {
    /// Scan the store once and accumulate every aggregate.
    pub fn measure(
        store: &ParticleStore,
        species: &SpeciesTable,
        equivalent_particles: f64,
    ) -> Self {
        let mut info = Self::default();
        for (_, parcel) in store.iter() {
            let props = species.get(parcel.species);
            let weight = equivalent_particles * parcel.rwf;

            info.parcel_count += 1;
            info.mass += weight * props.mass;
            info.linear_momentum += parcel.velocity * (weight * props.mass);
            info.kinetic_energy += weight * parcel.translational_energy(props.mass);
            info.rotational_energy += weight * parcel.rotational_energy;
            for (m, mode) in props.vibrational_modes.iter().enumerate() {
                info.vibrational_energy += weight * mode.level_energy(parcel.vibrational_levels[m]);
            }
            if let Some(level) = props.electronic_levels.get(parcel.electronic_level as usize) {
                info.electronic_energy += weight * level.energy;
            }
        }
        info
    }

    /// Translational plus internal energy, J.
    #[inline]
    pub fn total_energy(&self) -> f64 {
        self.kinetic_energy + self.internal_energy()
    }

    /// Rotational + vibrational + electronic energy, J.
    #[inline]
    pub fn internal_energy(&self) -> f64 {
        self.rotational_energy + self.vibrational_energy + self.electronic_energy
    }
}
