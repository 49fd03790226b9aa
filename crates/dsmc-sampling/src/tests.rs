//! Statistical tests for the sampling routines.
//!
//! Moment checks use sample sizes large enough that failures indicate real
//! distribution errors, not noise; tolerances sit several standard errors
//! out.  Seeds are fixed so every run draws the same stream.

use std::f64::consts::PI;

use dsmc_core::{BOLTZMANN, SymmTensor3, Vec3, WorkerRng};
use dsmc_species::{ElectronicLevel, SpeciesProperties, VibrationalMode};

use crate::{
    chapman_enskog_velocity, energy_ratio, equilibrium_velocity, equipartition_electronic_level,
    equipartition_rotational_energy, equipartition_vibrational_level, generalized_chapman_enskog,
    isotropic_direction, maxwellian_average_speed, maxwellian_rms_speed, maxwellian_speed,
    most_probable_speed, post_collision_electronic_level,
    post_collision_rotational_energy, post_collision_vibrational_level, CeMoments,
    GeneralizedCeMoments, VibrationalRelaxation,
};

const T: f64 = 300.0;
const ARGON_MASS: f64 = 6.63e-26;

fn nitrogen_mode() -> VibrationalMode {
    VibrationalMode { theta_v: 3371.0, theta_d: 113_500.0, z_ref: 52_560.0, ref_temp_zv: 3371.0 }
}

fn nitrogen() -> SpeciesProperties {
    SpeciesProperties {
        name: "N2".into(),
        mass: 4.65e-26,
        diameter: 4.17e-10,
        rotational_dof: 2.0,
        vibrational_modes: vec![nitrogen_mode()],
        electronic_levels: Vec::new(),
        reference_temperature: 273.0,
        viscosity_index: 0.74,
    }
}

// ── Maxwell ──────────────────────────────────────────────────────────────────

mod maxwell {
    use super::*;

    #[test]
    fn characteristic_speeds_are_ordered() {
        // c_mp < c_mean < c_rms, with the textbook ratios √2 : √(8/π) : √3.
        let mp = most_probable_speed(T, ARGON_MASS);
        let mean = maxwellian_average_speed(T, ARGON_MASS);
        let rms = maxwellian_rms_speed(T, ARGON_MASS);
        assert!(mp < mean && mean < rms);
        assert!((mean / mp - (4.0 / PI).sqrt()).abs() < 1e-12);
        assert!((rms / mp - (1.5f64).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn speed_mean_matches_kinetic_theory() {
        let mut rng = WorkerRng::new(1);
        const N: usize = 100_000;
        let sum: f64 = (0..N).map(|_| maxwellian_speed(&mut rng, T, ARGON_MASS)).sum();
        let expected = maxwellian_average_speed(T, ARGON_MASS);
        let rel = (sum / N as f64 - expected).abs() / expected;
        assert!(rel < 0.01, "mean speed off by {rel:.4}");
    }

    #[test]
    fn directions_are_unit_and_unbiased() {
        let mut rng = WorkerRng::new(2);
        let mut mean = Vec3::ZERO;
        const N: usize = 50_000;
        for _ in 0..N {
            let d = isotropic_direction(&mut rng);
            assert!((d.magnitude() - 1.0).abs() < 1e-12);
            mean += d;
        }
        assert!((mean * (1.0 / N as f64)).magnitude() < 0.02);
    }

    #[test]
    fn equilibrium_velocity_equipartitions_energy() {
        // ⟨½m|v|²⟩ = (3/2)kT about zero drift.
        let mut rng = WorkerRng::new(3);
        const N: usize = 100_000;
        let sum: f64 = (0..N)
            .map(|_| 0.5 * ARGON_MASS * equilibrium_velocity(&mut rng, T, ARGON_MASS, Vec3::ZERO).mag_sqr())
            .sum();
        let expected = 1.5 * BOLTZMANN * T;
        let rel = (sum / N as f64 - expected).abs() / expected;
        assert!(rel < 0.01, "mean kinetic energy off by {rel:.4}");
    }

    #[test]
    fn drift_shifts_the_mean() {
        let mut rng = WorkerRng::new(4);
        let drift = Vec3::new(500.0, 0.0, 0.0);
        const N: usize = 50_000;
        let mut mean = Vec3::ZERO;
        for _ in 0..N {
            mean += equilibrium_velocity(&mut rng, T, ARGON_MASS, drift);
        }
        mean = mean * (1.0 / N as f64);
        assert!((mean.x - 500.0).abs() < 5.0);
        assert!(mean.y.abs() < 5.0 && mean.z.abs() < 5.0);
    }
}

// ── Equipartition ────────────────────────────────────────────────────────────

mod equipartition {
    use super::*;

    #[test]
    fn rotational_mean_is_half_kt_per_dof() {
        // ⟨E⟩ = (dof/2)·kT for both the analytic dof=2 path and the
        // acceptance-rejection path.
        for dof in [2.0, 3.0] {
            let mut rng = WorkerRng::new(5);
            const N: usize = 100_000;
            let sum: f64 = (0..N)
                .map(|_| equipartition_rotational_energy(&mut rng, T, dof))
                .sum();
            let expected = 0.5 * dof * BOLTZMANN * T;
            let rel = (sum / N as f64 - expected).abs() / expected;
            assert!(rel < 0.02, "dof {dof}: rotational mean off by {rel:.4}");
        }
    }

    #[test]
    fn zero_rotational_dof_gives_zero() {
        let mut rng = WorkerRng::new(6);
        assert_eq!(equipartition_rotational_energy(&mut rng, T, 0.0), 0.0);
    }

    #[test]
    fn vibrational_levels_follow_boltzmann_ratios() {
        // Chi-square test of the sampled level populations against
        // p_i ∝ e^{−i·θv/T} over the first six levels plus a tail bin.
        let mode = nitrogen_mode();
        let temperature = 3000.0;
        let mut rng = WorkerRng::new(7);
        const N: usize = 100_000;
        const HEAD: usize = 6;

        let mut observed = [0usize; HEAD + 1];
        for _ in 0..N {
            let level = equipartition_vibrational_level(&mut rng, temperature, &mode) as usize;
            observed[level.min(HEAD)] += 1;
        }

        let ratio = (-mode.theta_v / temperature).exp();
        let norm = (1.0 - ratio) / (1.0 - ratio.powi(mode.max_level() as i32 + 1));
        let mut expected = [0.0f64; HEAD + 1];
        for (i, e) in expected.iter_mut().enumerate().take(HEAD) {
            *e = N as f64 * norm * ratio.powi(i as i32);
        }
        expected[HEAD] = N as f64 - expected[..HEAD].iter().sum::<f64>();

        let chi2: f64 = observed
            .iter()
            .zip(&expected)
            .map(|(&o, &e)| (o as f64 - e).powi(2) / e)
            .sum();
        // 6 degrees of freedom; p = 0.001 critical value is 22.5.
        assert!(chi2 < 22.5, "chi-square {chi2:.1} rejects the Boltzmann populations");
    }

    #[test]
    fn electronic_levels_follow_degenerate_boltzmann() {
        // Two levels with g = (1, 3): population ratio 3·e^{−E/kT}.
        let gap = 2.0 * BOLTZMANN * T;
        let levels = [
            ElectronicLevel { energy: 0.0, degeneracy: 1 },
            ElectronicLevel { energy: gap, degeneracy: 3 },
        ];
        let mut rng = WorkerRng::new(8);
        const N: usize = 100_000;
        let excited = (0..N)
            .filter(|_| equipartition_electronic_level(&mut rng, T, &levels) == 1)
            .count();
        let expected_ratio = 3.0 * (-2.0f64).exp();
        let observed_ratio = excited as f64 / (N - excited) as f64;
        let rel = (observed_ratio - expected_ratio).abs() / expected_ratio;
        assert!(rel < 0.05, "excited/ground ratio off by {rel:.4}");
    }

    #[test]
    fn missing_electronic_table_returns_ground() {
        let mut rng = WorkerRng::new(9);
        assert_eq!(equipartition_electronic_level(&mut rng, T, &[]), 0);
    }
}

// ── Larsen–Borgnakke ─────────────────────────────────────────────────────────

mod larsen_borgnakke {
    use super::*;

    #[test]
    fn energy_ratio_mean_matches_beta() {
        // Beta(a, b) mean is a/(a+b).
        for (chi_a, chi_b) in [(1.0, 1.0), (1.0, 1.5), (2.5, 1.5)] {
            let mut rng = WorkerRng::new(10);
            const N: usize = 50_000;
            let sum: f64 = (0..N).map(|_| energy_ratio(&mut rng, chi_a, chi_b)).sum();
            let expected = chi_a / (chi_a + chi_b);
            let rel = (sum / N as f64 - expected).abs() / expected;
            assert!(rel < 0.02, "chi ({chi_a}, {chi_b}): ratio mean off by {rel:.4}");
        }
    }

    #[test]
    fn energy_ratio_stays_in_unit_interval() {
        let mut rng = WorkerRng::new(11);
        for _ in 0..10_000 {
            let x = energy_ratio(&mut rng, 1.5, 2.5);
            assert!((0.0..=1.0).contains(&x));
        }
    }

    #[test]
    fn rotational_fraction_zero_without_dof() {
        let mut rng = WorkerRng::new(12);
        assert_eq!(post_collision_rotational_energy(&mut rng, 0.0, 1.5), 0.0);
    }

    #[test]
    fn rotational_fraction_is_a_valid_split() {
        let mut rng = WorkerRng::new(13);
        for _ in 0..1_000 {
            let x = post_collision_rotational_energy(&mut rng, 2.0, 1.5);
            assert!((0.0..=1.0).contains(&x));
        }
    }

    #[test]
    fn vibrational_level_energy_never_exceeds_pool() {
        let mode = nitrogen_mode();
        let ec = 8.0 * BOLTZMANN * mode.theta_v;
        let relax =
            VibrationalRelaxation { omega: 0.74, fixed_z: Some(1.0), post_reaction: false };
        let mut rng = WorkerRng::new(14);
        for _ in 0..2_000 {
            let level = post_collision_vibrational_level(&mut rng, 3, &mode, ec, relax);
            assert!(mode.level_energy(level) <= ec);
        }
    }

    #[test]
    fn vibrational_exchange_declined_keeps_level() {
        // An enormous fixed collision number makes 1/Zv ≈ 0: the parcel's
        // level must come back untouched.
        let mode = nitrogen_mode();
        let ec = 8.0 * BOLTZMANN * mode.theta_v;
        let relax =
            VibrationalRelaxation { omega: 0.74, fixed_z: Some(1.0e12), post_reaction: false };
        let mut rng = WorkerRng::new(15);
        for _ in 0..1_000 {
            assert_eq!(post_collision_vibrational_level(&mut rng, 5, &mode, ec, relax), 5);
        }
    }

    #[test]
    fn post_reaction_always_redistributes() {
        // Post-reaction sampling ignores Zv and must reach excited levels.
        let mode = nitrogen_mode();
        let ec = 8.0 * BOLTZMANN * mode.theta_v;
        let relax =
            VibrationalRelaxation { omega: 0.74, fixed_z: Some(1.0e12), post_reaction: true };
        let mut rng = WorkerRng::new(16);
        let excited = (0..2_000)
            .filter(|_| post_collision_vibrational_level(&mut rng, 0, &mode, ec, relax) > 0)
            .count();
        assert!(excited > 100, "only {excited} draws left the ground state");
    }

    #[test]
    fn tiny_pool_short_circuits() {
        let mode = nitrogen_mode();
        let ec = 0.5 * BOLTZMANN * mode.theta_v; // below the first quantum
        let relax = VibrationalRelaxation { omega: 0.74, fixed_z: None, post_reaction: false };
        let mut rng = WorkerRng::new(17);
        assert_eq!(post_collision_vibrational_level(&mut rng, 2, &mode, ec, relax), 2);
    }

    #[test]
    fn electronic_level_respects_accessible_energy() {
        let levels = [
            ElectronicLevel { energy: 0.0, degeneracy: 1 },
            ElectronicLevel { energy: 1.0e-20, degeneracy: 3 },
            ElectronicLevel { energy: 5.0e-19, degeneracy: 5 },
        ];
        // Pool covers level 1 but not level 2.
        let ec = 1.0e-19;
        let mut rng = WorkerRng::new(18);
        let mut reached = [false; 3];
        for _ in 0..5_000 {
            reached[post_collision_electronic_level(&mut rng, &levels, 0.74, ec) as usize] = true;
        }
        assert!(reached[0] && reached[1]);
        assert!(!reached[2], "sampled a level above the energy pool");
    }
}

// ── Chapman–Enskog ───────────────────────────────────────────────────────────

mod chapman_enskog {
    use super::*;

    #[test]
    fn zero_moments_reduce_to_equilibrium() {
        // With no perturbation the draw consumes the identical stream as the
        // plain equilibrium sampler.
        let mut a = WorkerRng::new(19);
        let mut b = WorkerRng::new(19);
        let ce = chapman_enskog_velocity(&mut a, T, ARGON_MASS, Vec3::ZERO, &CeMoments {
            pressure: 101_325.0,
            ..CeMoments::default()
        });
        let eq = equilibrium_velocity(&mut b, T, ARGON_MASS, Vec3::ZERO);
        assert_eq!(ce, eq);
    }

    #[test]
    fn heat_flux_skews_the_third_moment() {
        // A heat-flux vector along +x must produce a positive empirical
        // heat-flux moment ⟨ĉx·ĉ²⟩ without shifting the mean velocity.
        let pressure = 101_325.0;
        let c_mp = most_probable_speed(T, ARGON_MASS);
        let moments = CeMoments {
            heat_flux: Vec3::new(0.1 * pressure * c_mp, 0.0, 0.0),
            shear_stress: SymmTensor3::ZERO,
            pressure,
        };
        let mut rng = WorkerRng::new(20);
        const N: usize = 200_000;
        let mut mean = Vec3::ZERO;
        let mut q_moment = 0.0;
        for _ in 0..N {
            let c = chapman_enskog_velocity(&mut rng, T, ARGON_MASS, Vec3::ZERO, &moments)
                * (1.0 / c_mp);
            mean += c;
            q_moment += c.x * c.mag_sqr();
        }
        mean = mean * (1.0 / N as f64);
        q_moment /= N as f64;
        assert!(mean.magnitude() < 0.02, "heat flux must not shift the mean, got {mean}");
        assert!(q_moment > 0.05, "third moment {q_moment:.4} does not follow the heat flux");
    }

    #[test]
    fn shear_stress_deforms_the_variances() {
        // Positive τ̂xx / negative τ̂yy suppresses x-spread relative to y.
        let pressure = 101_325.0;
        let moments = CeMoments {
            heat_flux: Vec3::ZERO,
            shear_stress: SymmTensor3 { xx: 0.2 * pressure, yy: -0.2 * pressure, ..SymmTensor3::ZERO },
            pressure,
        };
        let mut rng = WorkerRng::new(21);
        const N: usize = 100_000;
        let (mut var_x, mut var_y) = (0.0, 0.0);
        for _ in 0..N {
            let v = chapman_enskog_velocity(&mut rng, T, ARGON_MASS, Vec3::ZERO, &moments);
            var_x += v.x * v.x;
            var_y += v.y * v.y;
        }
        assert!(var_x < 0.95 * var_y, "stress did not deform the distribution");
    }

    #[test]
    fn generalized_draw_couples_rotation_to_heat_flux() {
        // Rotational heat flux along +x: parcels moving along +x should carry
        // above-average rotational energy (positive covariance).
        let species = nitrogen();
        let pressure = 101_325.0;
        let c_mp = most_probable_speed(T, species.mass);
        let moments = GeneralizedCeMoments {
            translational: CeMoments { pressure, ..CeMoments::default() },
            rotational_heat_flux: Vec3::new(0.2 * pressure * c_mp, 0.0, 0.0),
            ..GeneralizedCeMoments::default()
        };
        let mut rng = WorkerRng::new(22);
        const N: usize = 100_000;
        let mean_rot = BOLTZMANN * T; // dof = 2
        let mut cov = 0.0;
        for _ in 0..N {
            let s = generalized_chapman_enskog(&mut rng, T, &species, Vec3::ZERO, &moments);
            cov += (s.velocity.x / c_mp) * (s.rotational_energy / mean_rot - 1.0);
        }
        cov /= N as f64;
        assert!(cov > 0.01, "covariance {cov:.4} shows no mode coupling");
    }

    #[test]
    fn diffusion_velocity_shifts_the_mean() {
        let species = nitrogen();
        let moments = GeneralizedCeMoments {
            translational: CeMoments { pressure: 101_325.0, ..CeMoments::default() },
            diffusion_velocity: Vec3::new(120.0, 0.0, 0.0),
            ..GeneralizedCeMoments::default()
        };
        let mut rng = WorkerRng::new(23);
        const N: usize = 50_000;
        let mut mean = Vec3::ZERO;
        for _ in 0..N {
            mean += generalized_chapman_enskog(&mut rng, T, &species, Vec3::ZERO, &moments).velocity;
        }
        mean = mean * (1.0 / N as f64);
        assert!((mean.x - 120.0).abs() < 5.0, "diffusion drift missing, mean {mean}");
    }
}
