//! Equilibrium internal-energy draws.
//!
//! Continuous rotational energy follows Bird's acceptance-rejection form;
//! discrete vibrational and electronic levels come from cumulative Boltzmann
//! tables built per call (the tables are tiny — tens of levels at most).

use dsmc_core::{BOLTZMANN, SMALL, WorkerRng};
use dsmc_species::{ElectronicLevel, VibrationalMode};

/// Draw a continuous rotational energy for `rotational_dof` degrees of
/// freedom at `temperature`, J.
///
/// Zero degrees of freedom returns 0.  Exactly two (linear molecules, the
/// common case) has the analytic inverse `−kT·ln r`; other counts use
/// acceptance-rejection on `f(x) ∝ (x/a)^a·e^{a−x}` with `a = dof/2 − 1`.
pub fn equipartition_rotational_energy(
    rng: &mut WorkerRng,
    temperature: f64,
    rotational_dof: f64,
) -> f64 {
    if rotational_dof < SMALL {
        return 0.0;
    }
    if (rotational_dof - 2.0).abs() < SMALL {
        let r: f64 = rng.sample01().max(f64::MIN_POSITIVE);
        return -r.ln() * BOLTZMANN * temperature;
    }
    let a = 0.5 * rotational_dof - 1.0;
    loop {
        // Tail beyond x = 10 carries negligible probability mass.
        let x = 10.0 * rng.sample01();
        let p = (x / a).powf(a) * (a - x).exp();
        if p > rng.sample01() {
            return x * BOLTZMANN * temperature;
        }
    }
}

/// Draw a vibrational quantum level from the Boltzmann distribution of
/// `mode`'s harmonic ladder at `temperature`.
///
/// Level populations follow `p_i ∝ e^{−i·θv/T}` up to the dissociation cap
/// `floor(θd/θv)`.
pub fn equipartition_vibrational_level(
    rng: &mut WorkerRng,
    temperature: f64,
    mode: &VibrationalMode,
) -> u16 {
    let max_level = mode.max_level();
    if max_level == 0 {
        return 0;
    }
    let mut cumulative = Vec::with_capacity(max_level as usize + 1);
    let mut total = 0.0;
    for i in 0..=max_level {
        total += (-(i as f64) * mode.theta_v / temperature).exp();
        cumulative.push(total);
    }
    pick_from_cumulative(rng, &cumulative)
}

/// Draw an electronic level from the degeneracy-weighted Boltzmann
/// distribution `p_j ∝ g_j·e^{−E_j/kT}` at `temperature`.
///
/// An empty level table (electronic mode not modelled) returns ground.
pub fn equipartition_electronic_level(
    rng: &mut WorkerRng,
    temperature: f64,
    levels: &[ElectronicLevel],
) -> u16 {
    if levels.len() < 2 {
        return 0;
    }
    let kt = BOLTZMANN * temperature;
    let mut cumulative = Vec::with_capacity(levels.len());
    let mut total = 0.0;
    for level in levels {
        total += level.degeneracy as f64 * (-level.energy / kt).exp();
        cumulative.push(total);
    }
    pick_from_cumulative(rng, &cumulative)
}

/// Index of the first cumulative entry exceeding a uniform draw over the
/// total weight.
pub(crate) fn pick_from_cumulative(rng: &mut WorkerRng, cumulative: &[f64]) -> u16 {
    let total = match cumulative.last() {
        Some(&t) if t > 0.0 => t,
        _ => return 0,
    };
    let target = rng.sample01() * total;
    cumulative
        .iter()
        .position(|&c| c > target)
        .unwrap_or(cumulative.len() - 1) as u16
}
