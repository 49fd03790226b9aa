//! Larsen–Borgnakke post-collision energy redistribution.
//!
//! Given the collision energy `Ec` pooled by an accepted pair, these routines
//! decide how much of it lands in one internal mode.  None of them touches
//! translational energy directly: each returns an energy fraction or a
//! quantum level, and the caller returns the residual to the relative-motion
//! energy.  Total energy is conserved by construction.

use dsmc_core::{BOLTZMANN, SMALL, WorkerRng};
use dsmc_species::{ElectronicLevel, VibrationalMode};

use crate::equipartition::pick_from_cumulative;

/// Sample the fraction `x ∈ [0, 1]` of pooled energy given to mode A, where
/// the two competing modes contribute `ChiA` and `ChiB` effective degrees of
/// freedom halves.
///
/// Acceptance-rejection on the beta-like density
/// `f(x) ∝ x^(ChiA−1)·(1−x)^(ChiB−1)` normalized to a unit-height envelope,
/// per Bird's formulation.  Both Chi at 1 degenerates to a plain uniform
/// draw.
pub fn energy_ratio(rng: &mut WorkerRng, chi_a: f64, chi_b: f64) -> f64 {
    let a = chi_a - 1.0;
    let b = chi_b - 1.0;
    if a < SMALL && b < SMALL {
        return rng.sample01();
    }
    loop {
        let x: f64 = rng.sample01();
        let p = if a < SMALL {
            (1.0 - x).powf(b)
        } else if b < SMALL {
            x.powf(a)
        } else {
            ((a + b) * x / a).powf(a) * ((a + b) * (1.0 - x) / b).powf(b)
        };
        if p > rng.sample01() {
            return x;
        }
    }
}

/// Fraction of the collision energy given to rotation, for a molecule with
/// `rotational_dof` rotational degrees of freedom against a translational
/// pool of `chi_b` half-degrees.
///
/// Zero rotational degrees of freedom short-circuits to 0.
pub fn post_collision_rotational_energy(
    rng: &mut WorkerRng,
    rotational_dof: f64,
    chi_b: f64,
) -> f64 {
    if rotational_dof < SMALL {
        return 0.0;
    }
    energy_ratio(rng, 0.5 * rotational_dof, chi_b)
}

/// Relaxation parameters for one quantum vibrational exchange.
///
/// `fixed_z` overrides the temperature-dependent collision number when set;
/// `post_reaction` forces redistribution regardless of the collision number
/// (reaction products must thermalize their vibrational pool).
#[derive(Clone, Copy, Debug)]
pub struct VibrationalRelaxation {
    /// VHS viscosity-temperature exponent ω of the pair.
    pub omega: f64,
    /// Fixed vibrational collision number; `None` computes Zv from the
    /// Millikan–White-style fit on the mode's parameters.
    pub fixed_z: Option<f64>,
    /// `true` immediately after a chemical reaction.
    pub post_reaction: bool,
}

/// Sample a post-collision vibrational quantum level for `mode` out of the
/// pooled collision energy `ec`, J.
///
/// The quantum Larsen–Borgnakke scheme: the highest accessible level is
/// `i_max = floor(Ec/kθv)`; a candidate level drawn uniformly from
/// `0..=i_max` is accepted against the density-of-states envelope
/// `P = (1 − i·kθv/Ec)^(1.5−ω)`.  Outside the post-reaction path the
/// exchange only happens with probability `1/Zv`, where the vibrational
/// collision number comes from the mode's dissociation temperature and
/// reference data:
///
///   Tcoll = i_max·θv / (3.5 − ω)
///   Zv    = (θd/Tcoll)^ω · Zref^[((θd/Tcoll)^⅓ − 1)/((θd/Tref)^⅓ − 1)]
///
/// Returns the parcel's `current_level` unchanged when the exchange is
/// declined or no level is accessible.
pub fn post_collision_vibrational_level(
    rng: &mut WorkerRng,
    current_level: u16,
    mode: &VibrationalMode,
    ec: f64,
    relax: VibrationalRelaxation,
) -> u16 {
    let level_quantum = BOLTZMANN * mode.theta_v;
    let i_max = (ec / level_quantum) as u16;
    if i_max == 0 {
        return if relax.post_reaction { 0 } else { current_level };
    }

    if !relax.post_reaction {
        let z_v = match relax.fixed_z {
            Some(z) => z,
            None => {
                let t_coll = i_max as f64 * mode.theta_v / (3.5 - relax.omega);
                let exponent = ((mode.theta_d / t_coll).powf(1.0 / 3.0) - 1.0)
                    / ((mode.theta_d / mode.ref_temp_zv).powf(1.0 / 3.0) - 1.0);
                (mode.theta_d / t_coll).powf(relax.omega) * mode.z_ref.powf(exponent)
            }
        };
        if rng.sample01() >= 1.0 / z_v.max(1.0) {
            return current_level;
        }
    }

    loop {
        let candidate = rng.gen_range(0..=i_max.min(mode.max_level()));
        let p = (1.0 - candidate as f64 * level_quantum / ec).powf(1.5 - relax.omega);
        if p > rng.sample01() {
            return candidate;
        }
    }
}

/// Sample a post-collision electronic level out of the pooled collision
/// energy `ec`, J.
///
/// Accessible levels (`E_j < Ec`) are weighted by
/// `g_j·(Ec − E_j)^(1.5−ω)` — degeneracy times the translational density of
/// states left over after the excitation.  An empty table returns ground.
pub fn post_collision_electronic_level(
    rng: &mut WorkerRng,
    levels: &[ElectronicLevel],
    omega: f64,
    ec: f64,
) -> u16 {
    if levels.len() < 2 {
        return 0;
    }
    let mut cumulative = Vec::with_capacity(levels.len());
    let mut total = 0.0;
    for level in levels {
        if level.energy < ec {
            total += level.degeneracy as f64 * (ec - level.energy).powf(1.5 - omega);
        }
        cumulative.push(total);
    }
    pick_from_cumulative(rng, &cumulative)
}
