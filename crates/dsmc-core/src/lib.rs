//! `dsmc-core` — foundational types for the `rust-dsmc` particle framework.
//!
//! This crate is a dependency of every other `dsmc-*` crate.  It intentionally
//! has no `dsmc-*` dependencies and minimal external ones (only `rand`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module        | Contents                                                 |
//! |---------------|----------------------------------------------------------|
//! | [`ids`]       | `ParcelId`, `CellId`, `SpeciesId`, `PartitionId`         |
//! | [`vector`]    | `Vec3`, `SymmTensor3`                                    |
//! | [`constants`] | Boltzmann constant, degeneracy guard threshold           |
//! | [`time`]      | `Step`, `StepClock`, `RunConfig`                         |
//! | [`rng`]       | `WorkerRng` (one sequential stream per worker)           |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types; needed |
//! |         | by restart checkpointing in `dsmc-cloud`.                  |

pub mod constants;
pub mod ids;
pub mod rng;
pub mod time;
pub mod vector;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use constants::{AVOGADRO, BOLTZMANN, SMALL};
pub use ids::{CellId, ParcelId, PartitionId, SpeciesId};
pub use rng::WorkerRng;
pub use time::{RunConfig, Step, StepClock};
pub use vector::{SymmTensor3, Vec3};
