//! `dsmc-species` — constant per-species properties and configuration loading.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                  |
//! |----------------|-----------------------------------------------------------|
//! | [`properties`] | `SpeciesProperties`, mode tables, `SpeciesTable`          |
//! | [`loader`]     | CSV loading with fatal validation                         |
//! | [`error`]      | `SpeciesError`, `SpeciesResult<T>`                        |
//!
//! The table is built once at startup and shared read-only afterwards; all
//! other crates refer to species purely by `SpeciesId`.

pub mod error;
pub mod loader;
pub mod properties;


pub use error::{SpeciesError, SpeciesResult};
pub use loader::{load_species_csv, load_species_reader};
pub use properties::{ElectronicLevel, SpeciesProperties, SpeciesTable, VibrationalMode};
