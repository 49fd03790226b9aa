//! `dsmc-collide` — the No-Time-Counter binary collision engine.
//!
//! # Crate layout
//!
//! | Module               | Contents                                         |
//! |----------------------|--------------------------------------------------|
//! | [`engine`]           | `CollisionEngine` — the per-cell NTC sweep       |
//! | [`candidate`]        | Per-trial candidate-pair bookkeeping             |
//! | [`model`]            | Strategy traits + trivial implementations        |
//! | [`vhs`]              | Variable Hard Sphere cross-section/scattering    |
//! | [`larsen_borgnakke`] | VHS with internal-energy exchange                |
//! | [`registry`]         | String-keyed model factories                     |
//! | [`error`]            | `CollideError`, `CollideResult<T>`               |
//!
//! The engine owns no physics: cross-sections, scattering, partner choice,
//! and chemistry all arrive as boxed strategies resolved by name from the
//! [`ModelRegistry`] during configuration.

pub mod candidate;
pub mod engine;
pub mod error;
pub mod larsen_borgnakke;
pub mod model;
pub mod registry;
pub mod vhs;


pub use candidate::CandidateList;
pub use engine::{CollisionEngine, CollisionStats};
pub use error::{CollideError, CollideResult};
pub use larsen_borgnakke::{LarsenBorgnakkeVariableHardSphere, RelaxationNumbers};
pub use model::{
    BinaryCollisionModel, NoReaction, PartnerSelection, ReactionModel, UniformPartnerSelection,
};
pub use registry::{ModelContext, ModelRegistry};
pub use vhs::VariableHardSphere;
