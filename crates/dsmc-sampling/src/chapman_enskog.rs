//! First-order non-equilibrium (Chapman–Enskog) sampling.
//!
//! Near a boundary embedded in a temperature or velocity gradient the gas is
//! not Maxwellian; the first-order Chapman–Enskog distribution corrects the
//! equilibrium form with the local heat flux and deviatoric stress:
//!
//!   f(Ĉ) = f_M(Ĉ)·[1 + Φ(Ĉ)],
//!   Φ(Ĉ) = (4/5)·(q̂·Ĉ)·(Ĉ² − 5/2) − 2·τ̂:ĈĈ
//!
//! where `Ĉ = C/√(2kT/m)` is the peculiar velocity in thermal units,
//! `q̂ = q/(p·√(2kT/m))` and `τ̂ = τ/p`.  Sampling is acceptance-rejection
//! against the equilibrium draw (Garcia & Alder's scheme): the perturbation
//! is bounded on the thermally relevant ball `|Ĉ| ≤ CUTOFF` and the
//! candidate kept with probability `(1 + Φ)/(1 + Φ_max)`.
//!
//! The generalized variant extends the bias to the internal modes, coupling
//! each mode's energy deviation to its own heat-flux vector, and adds a
//! species diffusion velocity to the mean drift.

use dsmc_core::{BOLTZMANN, SMALL, SymmTensor3, Vec3, WorkerRng};
use dsmc_species::SpeciesProperties;

use crate::equipartition::{equipartition_rotational_energy, equipartition_vibrational_level};
use crate::maxwell::{equilibrium_velocity, most_probable_speed};

/// Peculiar speeds beyond this many thermal units carry negligible
/// probability mass and are excluded from the envelope bound.
const CUTOFF: f64 = 3.0;

// ── Moments ──────────────────────────────────────────────────────────────────

/// Local flow moments driving the translational perturbation.
#[derive(Clone, Copy, Debug, Default)]
pub struct CeMoments {
    /// Translational heat-flux vector, W/m².
    pub heat_flux: Vec3,
    /// Deviatoric (traceless) shear-stress tensor, Pa.
    pub shear_stress: SymmTensor3,
    /// Static pressure, Pa.  Normalizes both moments; non-positive values
    /// disable the perturbation entirely.
    pub pressure: f64,
}

/// Moments for the generalized variant: one heat-flux vector per energy
/// mode plus the species diffusion velocity.
#[derive(Clone, Copy, Debug, Default)]
pub struct GeneralizedCeMoments {
    pub translational: CeMoments,
    /// Rotational heat-flux vector, W/m².
    pub rotational_heat_flux: Vec3,
    /// Vibrational heat-flux vector, W/m².
    pub vibrational_heat_flux: Vec3,
    /// Species diffusion velocity added to the mean drift, m/s.
    pub diffusion_velocity: Vec3,
}

/// One parcel's worth of jointly sampled state from the generalized draw.
#[derive(Clone, Debug)]
pub struct SampledState {
    pub velocity: Vec3,
    pub rotational_energy: f64,
    pub vibrational_levels: Vec<u16>,
}

// ── Translational draw ───────────────────────────────────────────────────────

/// Draw a velocity from the first-order Chapman–Enskog distribution at
/// `temperature` about `drift`, m/s.
///
/// Degenerates to the plain equilibrium draw when the moments vanish or the
/// pressure is non-positive.
pub fn chapman_enskog_velocity(
    rng: &mut WorkerRng,
    temperature: f64,
    mass: f64,
    drift: Vec3,
    moments: &CeMoments,
) -> Vec3 {
    let c_mp = most_probable_speed(temperature, mass);
    if moments.pressure < SMALL {
        return equilibrium_velocity(rng, temperature, mass, drift);
    }
    let q_hat = moments.heat_flux * (1.0 / (moments.pressure * c_mp));
    let tau_hat = moments.shear_stress * (1.0 / moments.pressure);
    if q_hat.magnitude() < SMALL && tau_hat.norm() < SMALL {
        return equilibrium_velocity(rng, temperature, mass, drift);
    }

    // Worst-case |Φ| on |Ĉ| ≤ CUTOFF bounds the envelope.
    let phi_max = 0.8 * q_hat.magnitude() * CUTOFF * (CUTOFF * CUTOFF + 2.5)
        + 2.0 * tau_hat.norm() * CUTOFF * CUTOFF;
    loop {
        let c = equilibrium_velocity(rng, temperature, mass, Vec3::ZERO) * (1.0 / c_mp);
        let phi = (0.8 * q_hat.dot(c) * (c.mag_sqr() - 2.5) - 2.0 * tau_hat.quadratic_form(c))
            .max(-1.0);
        if (1.0 + phi) / (1.0 + phi_max) > rng.sample01() {
            return drift + c * c_mp;
        }
    }
}

// ── Generalized draw ─────────────────────────────────────────────────────────

/// Jointly draw a velocity and internal-energy set for one parcel from the
/// generalized Chapman–Enskog distribution.
///
/// The translational part uses [`chapman_enskog_velocity`] with the diffusion
/// velocity folded into the drift.  Each internal mode is then drawn from its
/// equilibrium distribution and re-biased against the coupling term
///
///   1 + q̂_mode·Ĉ·(ε/⟨ε⟩ − 1)
///
/// which correlates above-average mode energy with motion down the mode's
/// heat-flux vector.  Modes with zero degrees of freedom or zero heat flux
/// fall through to the unbiased equilibrium draw.
pub fn generalized_chapman_enskog(
    rng: &mut WorkerRng,
    temperature: f64,
    species: &SpeciesProperties,
    drift: Vec3,
    moments: &GeneralizedCeMoments,
) -> SampledState {
    let c_mp = most_probable_speed(temperature, species.mass);
    let velocity = chapman_enskog_velocity(
        rng,
        temperature,
        species.mass,
        drift + moments.diffusion_velocity,
        &moments.translational,
    );
    let c_hat = (velocity - drift - moments.diffusion_velocity) * (1.0 / c_mp);
    let pressure = moments.translational.pressure;
    let kt = BOLTZMANN * temperature;

    let rotational_energy = if !species.has_rotation() {
        0.0
    } else {
        let mean = 0.5 * species.rotational_dof * kt;
        biased_mode_draw(
            rng,
            c_hat,
            moments.rotational_heat_flux,
            pressure,
            c_mp,
            mean,
            |rng| equipartition_rotational_energy(rng, temperature, species.rotational_dof),
        )
    };

    let vibrational_levels = species
        .vibrational_modes
        .iter()
        .map(|mode| {
            let mean = kt; // harmonic-oscillator mean at full excitation
            let level = biased_mode_draw(
                rng,
                c_hat,
                moments.vibrational_heat_flux,
                pressure,
                c_mp,
                mean,
                |rng| {
                    mode.level_energy(equipartition_vibrational_level(rng, temperature, mode))
                },
            );
            (level / (BOLTZMANN * mode.theta_v)).round() as u16
        })
        .collect();

    SampledState { velocity, rotational_energy, vibrational_levels }
}

/// Acceptance-rejection over an equilibrium mode draw with the heat-flux
/// coupling bias.  `mean` is the mode's equilibrium mean energy.
fn biased_mode_draw<F>(
    rng: &mut WorkerRng,
    c_hat: Vec3,
    heat_flux: Vec3,
    pressure: f64,
    c_mp: f64,
    mean: f64,
    mut draw: F,
) -> f64
where
    F: FnMut(&mut WorkerRng) -> f64,
{
    if pressure < SMALL || heat_flux.magnitude() < SMALL || mean < SMALL {
        return draw(rng);
    }
    let q_hat = heat_flux * (1.0 / (pressure * c_mp));
    let coupling = q_hat.dot(c_hat);
    // The deviation ε/⟨ε⟩ − 1 is bounded below by −1 and in practice above
    // by a few means; cap the envelope there.
    let phi_max = coupling.abs() * 4.0;
    loop {
        let energy = draw(rng);
        let phi = (coupling * (energy / mean - 1.0)).max(-1.0);
        if (1.0 + phi) / (1.0 + phi_max) > rng.sample01() {
            return energy;
        }
    }
}
