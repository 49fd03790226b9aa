//! Equilibrium (Maxwell–Boltzmann) velocity sampling.
//!
//! The velocity vector is built from a one-sided speed draw plus an isotropic
//! direction, which together reproduce the full Maxwell–Boltzmann vector
//! distribution.  The speed comes from a gamma(3/2) transform: with
//! `r1, r2, r3` uniform in (0, 1],
//!
//!   E/kT = −ln r1 − ln r2 · cos²(π/2 · r3)
//!
//! samples the kinetic-energy density `f(E) ∝ √E·e^{−E/kT}`, and
//! `v = √(2E/m)` is then Maxwell-distributed.  No Gaussian generator needed.

use std::f64::consts::{FRAC_PI_2, PI};

use dsmc_core::{Vec3, WorkerRng, BOLTZMANN};

/// Most probable thermal speed `√(2kT/m)`, m/s.
///
/// Also the velocity scale that non-dimensionalizes the Chapman–Enskog
/// perturbation.
#[inline]
pub fn most_probable_speed(temperature: f64, mass: f64) -> f64 {
    (2.0 * BOLTZMANN * temperature / mass).sqrt()
}

/// Mean thermal speed `√(8kT/πm)`, m/s.
#[inline]
pub fn maxwellian_average_speed(temperature: f64, mass: f64) -> f64 {
    (8.0 * BOLTZMANN * temperature / (PI * mass)).sqrt()
}

/// Root-mean-square thermal speed `√(3kT/m)`, m/s.
#[inline]
pub fn maxwellian_rms_speed(temperature: f64, mass: f64) -> f64 {
    (3.0 * BOLTZMANN * temperature / mass).sqrt()
}

/// Draw a speed from the Maxwell speed distribution at `temperature` for a
/// molecule of `mass`, m/s.
pub fn maxwellian_speed(rng: &mut WorkerRng, temperature: f64, mass: f64) -> f64 {
    let r1: f64 = rng.sample01().max(f64::MIN_POSITIVE);
    let r2: f64 = rng.sample01().max(f64::MIN_POSITIVE);
    let c = (FRAC_PI_2 * rng.sample01()).cos();
    let energy = BOLTZMANN * temperature * (-r1.ln() - r2.ln() * c * c);
    (2.0 * energy / mass).sqrt()
}

/// Draw a unit vector uniformly over the sphere.
pub fn isotropic_direction(rng: &mut WorkerRng) -> Vec3 {
    let mu: f64 = 2.0 * rng.sample01() - 1.0;
    let phi = 2.0 * PI * rng.sample01();
    let s = (1.0 - mu * mu).sqrt();
    Vec3::new(mu, s * phi.cos(), s * phi.sin())
}

/// Draw an equilibrium thermal velocity about `drift`, m/s.
pub fn equilibrium_velocity(
    rng: &mut WorkerRng,
    temperature: f64,
    mass: f64,
    drift: Vec3,
) -> Vec3 {
    drift + maxwellian_speed(rng, temperature, mass) * isotropic_direction(rng)
}
