//! `dsmc-cloud` — parcel storage and the spatial occupancy index.
//!
//! # Crate layout
//!
//! | Module           | Contents                                                  |
//! |------------------|-----------------------------------------------------------|
//! | [`parcel`]       | `Parcel` — one simulated particle                         |
//! | [`store`]        | `ParticleStore` — slot-stable slab owning all parcels     |
//! | [`cell_index`]   | `CellIndex` — occupancy lists + NTC ratchet/remainder     |
//! | [`mesh`]         | `Mesh` collaborator trait, `UniformGridMesh` test mesh    |
//! | [`axisymmetric`] | Radial weighting factors (RWF)                            |
//! | [`error`]        | `CloudError`, `CloudResult<T>`                            |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                      |
//! |------------|-------------------------------------------------------------|
//! | `parallel` | Rayon scan phase in `rebuild_incremental`.                  |
//! | `serde`    | Serialize/Deserialize on `Parcel` and `CellCheckpoint`.     |
//!
//! # The occupancy contract
//!
//! The store and the index move together: every mutation that changes which
//! cell a parcel belongs to goes through `CellIndex` so that the partition
//! invariant (each live parcel in exactly one list) holds at every step
//! boundary.  The per-cell `(σT·cR)` ratchet and the fractional collision
//! remainder live beside the occupancy lists because the three arrays must
//! be resized together on every mesh epoch change.

pub mod axisymmetric;
pub mod cell_index;
pub mod error;
pub mod mesh;
pub mod parcel;
pub mod store;

#[cfg(test)]
mod tests;

pub use axisymmetric::{AxisymmetricWeighting, RevolutionAxis};
pub use cell_index::{CellCheckpoint, CellIndex};
pub use error::{CloudError, CloudResult};
pub use mesh::{Mesh, UniformGridMesh};
pub use parcel::Parcel;
pub use store::ParticleStore;
