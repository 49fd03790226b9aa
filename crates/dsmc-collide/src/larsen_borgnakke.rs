//! VHS collisions with Larsen–Borgnakke internal-energy exchange.

use std::sync::Arc;

use dsmc_core::{SMALL, WorkerRng};
use dsmc_cloud::Parcel;
use dsmc_sampling::{
    post_collision_electronic_level, post_collision_rotational_energy,
    post_collision_vibrational_level, VibrationalRelaxation,
};
use dsmc_species::SpeciesTable;

use crate::vhs::{elastic_scatter, VariableHardSphere};
use crate::BinaryCollisionModel;

/// Relaxation collision numbers for the internal modes.
///
/// A mode participates in the exchange with probability `1/Z` per accepted
/// collision; the vibrational number is temperature-dependent and computed
/// inside the sampler from each mode's reference data.
#[derive(Clone, Copy, Debug)]
pub struct RelaxationNumbers {
    /// Rotational collision number Z_rot.
    pub rotational: f64,
    /// Electronic collision number Z_el.
    pub electronic: f64,
    /// Overrides the computed vibrational collision number when set.
    pub fixed_vibrational: Option<f64>,
}

impl Default for RelaxationNumbers {
    fn default() -> Self {
        // Bird's standard values for air-like mixtures.
        Self { rotational: 5.0, electronic: 500.0, fixed_vibrational: None }
    }
}

/// The inelastic workhorse model: VHS cross-section and scattering, with
/// rotational, vibrational, and electronic energy redistributed through the
/// Larsen–Borgnakke scheme before the translational scatter.
///
/// Each accepted pair pools the relative-motion kinetic energy with one
/// internal mode of one molecule at a time; whatever the mode does not take
/// returns to the pool, and the final pool sets the post-collision relative
/// speed.  Total energy is conserved to round-off.
pub struct LarsenBorgnakkeVariableHardSphere {
    vhs:     VariableHardSphere,
    species: Arc<SpeciesTable>,
    relax:   RelaxationNumbers,
}

impl LarsenBorgnakkeVariableHardSphere {
    pub fn new(species: Arc<SpeciesTable>, relax: RelaxationNumbers) -> Self {
        Self { vhs: VariableHardSphere::new(Arc::clone(&species)), species, relax }
    }

    /// Run the internal-energy exchange for one molecule of the pair,
    /// returning the updated translational pool.
    fn exchange_internal(
        &self,
        rng: &mut WorkerRng,
        parcel: &mut Parcel,
        omega_pair: f64,
        mut e_trans: f64,
    ) -> f64 {
        let props = self.species.get(parcel.species);

        if props.has_rotation() && rng.sample01() < 1.0 / self.relax.rotational {
            let pool = e_trans + parcel.rotational_energy;
            let chi_b = 2.5 - omega_pair;
            let fraction = post_collision_rotational_energy(rng, props.rotational_dof, chi_b);
            parcel.rotational_energy = fraction * pool;
            e_trans = pool - parcel.rotational_energy;
        }

        for (m, mode) in props.vibrational_modes.iter().enumerate() {
            let level = parcel.vibrational_levels[m];
            let pool = e_trans + mode.level_energy(level);
            let relax = VibrationalRelaxation {
                omega:         omega_pair,
                fixed_z:       self.relax.fixed_vibrational,
                post_reaction: false,
            };
            let new_level = post_collision_vibrational_level(rng, level, mode, pool, relax);
            parcel.vibrational_levels[m] = new_level;
            e_trans = pool - mode.level_energy(new_level);
        }

        if props.electronic_levels.len() > 1 && rng.sample01() < 1.0 / self.relax.electronic {
            let current = props.electronic_levels[parcel.electronic_level as usize].energy;
            let pool = e_trans + current;
            let new_level =
                post_collision_electronic_level(rng, &props.electronic_levels, omega_pair, pool);
            parcel.electronic_level = new_level;
            e_trans = pool - props.electronic_levels[new_level as usize].energy;
        }

        e_trans
    }
}

impl BinaryCollisionModel for LarsenBorgnakkeVariableHardSphere {
    fn sigma_tc_r(&self, a: &Parcel, b: &Parcel) -> f64 {
        self.vhs.sigma_tc_r(a, b)
    }

    fn collide(&self, rng: &mut WorkerRng, a: &mut Parcel, b: &mut Parcel) {
        let pa = self.species.get(a.species);
        let pb = self.species.get(b.species);
        let m_r = pa.mass * pb.mass / (pa.mass + pb.mass);
        let omega_pair = 0.5 * (pa.viscosity_index + pb.viscosity_index);

        let c_r = (a.velocity - b.velocity).magnitude();
        let mut e_trans = 0.5 * m_r * c_r * c_r;
        e_trans = self.exchange_internal(rng, a, omega_pair, e_trans);
        e_trans = self.exchange_internal(rng, b, omega_pair, e_trans);

        let post_c_r = (2.0 * e_trans.max(0.0) / m_r).sqrt();
        if post_c_r < SMALL && c_r < SMALL {
            return;
        }
        elastic_scatter(rng, a, b, pa.mass, pb.mass, post_c_r);
    }
}
