//! Variable Hard Sphere (VHS) elastic collisions.

use std::f64::consts::PI;
use std::sync::Arc;

use dsmc_core::{BOLTZMANN, SMALL, Vec3, WorkerRng};
use dsmc_cloud::Parcel;
use dsmc_sampling::isotropic_direction;
use dsmc_species::SpeciesTable;

use crate::BinaryCollisionModel;

/// Bird's VHS model: the cross-section shrinks with relative speed as
/// `cR^(1−2ω)`, reproducing the measured viscosity-temperature power law;
/// scattering is isotropic in the centre-of-mass frame.
pub struct VariableHardSphere {
    species: Arc<SpeciesTable>,
}

impl VariableHardSphere {
    pub fn new(species: Arc<SpeciesTable>) -> Self {
        Self { species }
    }

    /// Total VHS cross-section for the pair at relative speed `c_r`, m².
    ///
    ///   σT = π·dAB²·[2kTref/(mr·cR²)]^(ω−½) / Γ(5/2 − ω)
    ///
    /// with pair parameters averaged per Bird's mixing rule.
    pub fn sigma_t(&self, a: &Parcel, b: &Parcel, c_r: f64) -> f64 {
        let pa = self.species.get(a.species);
        let pb = self.species.get(b.species);
        let d_ab = 0.5 * (pa.diameter + pb.diameter);
        let omega = 0.5 * (pa.viscosity_index + pb.viscosity_index);
        let t_ref = 0.5 * (pa.reference_temperature + pb.reference_temperature);
        let m_r = pa.mass * pb.mass / (pa.mass + pb.mass);

        PI * d_ab
            * d_ab
            * (2.0 * BOLTZMANN * t_ref / (m_r * c_r * c_r)).powf(omega - 0.5)
            / gamma(2.5 - omega)
    }
}

impl BinaryCollisionModel for VariableHardSphere {
    fn sigma_tc_r(&self, a: &Parcel, b: &Parcel) -> f64 {
        let c_r = (a.velocity - b.velocity).magnitude();
        if c_r < SMALL {
            return 0.0;
        }
        self.sigma_t(a, b, c_r) * c_r
    }

    fn collide(&self, rng: &mut WorkerRng, a: &mut Parcel, b: &mut Parcel) {
        let ma = self.species.get(a.species).mass;
        let mb = self.species.get(b.species).mass;
        let c_r = (a.velocity - b.velocity).magnitude();
        elastic_scatter(rng, a, b, ma, mb, c_r);
    }
}

/// Isotropic centre-of-mass scattering at relative speed `c_r`.
///
/// Momentum conservation is exact by construction; the relative speed (and
/// with it kinetic energy) is carried over unchanged, so the only change is
/// the relative direction.
pub(crate) fn elastic_scatter(
    rng: &mut WorkerRng,
    a: &mut Parcel,
    b: &mut Parcel,
    ma: f64,
    mb: f64,
    c_r: f64,
) {
    let total = ma + mb;
    let u_cm = (a.velocity * ma + b.velocity * mb) * (1.0 / total);
    let post_rel: Vec3 = isotropic_direction(rng) * c_r;
    a.velocity = u_cm + post_rel * (mb / total);
    b.velocity = u_cm - post_rel * (ma / total);
}

/// Γ(x) for x > 0 via the Lanczos approximation (g = 7, n = 9).
///
/// Only evaluated at `2.5 − ω` with ω ∈ (0.5, 1), so the reflection branch
/// exists purely for completeness.
pub(crate) fn gamma(x: f64) -> f64 {
    const G: [f64; 9] = [
        0.999_999_999_999_809_93,
        676.520_368_121_885_1,
        -1259.139_216_722_402_8,
        771.323_428_777_653_1,
        -176.615_029_162_140_6,
        12.507_343_278_686_905,
        -0.138_571_095_265_720_12,
        9.984_369_578_019_572e-6,
        1.505_632_735_149_311_6e-7,
    ];
    if x < 0.5 {
        return PI / ((PI * x).sin() * gamma(1.0 - x));
    }
    let x = x - 1.0;
    let mut acc = G[0];
    for (i, &g) in G.iter().enumerate().skip(1) {
        acc += g / (x + i as f64);
    }
    let t = x + 7.5;
    (2.0 * PI).sqrt() * t.powf(x + 0.5) * (-t).exp() * acc
}
