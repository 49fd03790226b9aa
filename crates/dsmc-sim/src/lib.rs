//! `dsmc-sim` — assembles the engine crates into a runnable step loop.
//!
//! # Crate layout
//!
//! | Module       | Contents                                              |
//! |--------------|-------------------------------------------------------|
//! | [`sim`]      | `DsmcSim` — the per-step phase sequence               |
//! | [`builder`]  | `SimBuilder` — validation and model resolution        |
//! | [`observer`] | `StepObserver` hooks, `NoopObserver`                  |
//! | [`mover`]    | `Mover` seam, ballistic `FreeFlight` default          |
//! | [`measure`]  | `InfoMeasurements` domain aggregates                  |
//! | [`error`]    | `SimError`, `SimResult<T>`                            |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Rayon scan phase in the occupancy reconciliation.      |
//! | `serde`    | Serialize/Deserialize on checkpointable state.         |
//!
//! # Determinism
//!
//! One sequential RNG stream per worker, seeded from the run seed and the
//! partition ID.  A fixed seed and a fixed partition count reproduce a run
//! exactly; changing the partition count changes which worker draws which
//! collision and therefore the trajectory.  That is a property of the
//! method, not a defect.

pub mod builder;
pub mod error;
pub mod measure;
pub mod mover;
pub mod observer;
pub mod sim;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use measure::InfoMeasurements;
pub use mover::{FreeFlight, Mover};
pub use observer::{NoopObserver, StepObserver};
pub use sim::DsmcSim;
