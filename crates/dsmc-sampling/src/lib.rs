//! `dsmc-sampling` — draws from the kinetic-theory distributions DSMC needs.
//!
//! # Crate layout
//!
//! | Module              | Contents                                              |
//! |---------------------|-------------------------------------------------------|
//! | [`maxwell`]         | Equilibrium (Maxwell–Boltzmann) velocity sampling     |
//! | [`chapman_enskog`]  | First-order non-equilibrium velocity perturbation     |
//! | [`equipartition`]   | Equilibrium rotational / vibrational / electronic draws |
//! | [`larsen_borgnakke`]| Post-collision energy redistribution                  |
//!
//! # Conventions
//!
//! Every routine takes `&mut WorkerRng` explicitly — there is no hidden
//! generator state, and a worker's draw order is exactly the call order.
//!
//! # Error policy
//!
//! None of these routines returns a `Result`.  Degenerate inputs short-circuit
//! to physically sensible values: zero degrees of freedom gives zero energy or
//! the ground level, and zero available energy gives the ground level.
//! Non-positive temperatures are the caller's responsibility; they are not
//! validated here.

pub mod chapman_enskog;
pub mod equipartition;
pub mod larsen_borgnakke;
pub mod maxwell;

#[cfg(test)]
mod tests;

pub use chapman_enskog::{
    chapman_enskog_velocity, generalized_chapman_enskog, CeMoments, GeneralizedCeMoments,
    SampledState,
};
pub use equipartition::{
    equipartition_electronic_level, equipartition_rotational_energy,
    equipartition_vibrational_level,
};
pub use larsen_borgnakke::{
    energy_ratio, post_collision_electronic_level, post_collision_rotational_energy,
    post_collision_vibrational_level, VibrationalRelaxation,
};
pub use maxwell::{
    equilibrium_velocity, isotropic_direction, maxwellian_average_speed, maxwellian_rms_speed,
    maxwellian_speed, most_probable_speed,
};
