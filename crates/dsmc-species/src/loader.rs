//! CSV species loader.
//!
//! # CSV format
//!
//! One row per species.  Scalar columns are plain numbers; the two mode-table
//! columns pack their entries with `|` between modes/levels and `:` between
//! fields, and may be left empty for species without that mode.
//!
//! ```csv
//! name,mass,diameter,rotational_dof,viscosity_index,reference_temperature,vibrational_modes,electronic_levels
//! Ar,66.3e-27,4.17e-10,0,0.81,273.0,,
//! N2,46.5e-27,4.17e-10,2,0.74,273.0,3371:113500:52560:3371,0:1|1.0e-18:3
//! ```
//!
//! **`vibrational_modes`**: `thetaV:thetaD:Zref:TrefZv` per mode.
//! **`electronic_levels`**: `energy:degeneracy` per level, ground state first.
//!
//! Missing or malformed entries are fatal — the simulation cannot proceed
//! with an incomplete species table.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::{
    ElectronicLevel, SpeciesError, SpeciesProperties, SpeciesResult, SpeciesTable,
    VibrationalMode,
};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct SpeciesRecord {
    name:                  String,
    mass:                  f64,
    diameter:              f64,
    rotational_dof:        f64,
    viscosity_index:       f64,
    reference_temperature: f64,
    vibrational_modes:     String,
    electronic_levels:     String,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a validated [`SpeciesTable`] from a CSV file.
pub fn load_species_csv(path: &Path) -> SpeciesResult<SpeciesTable> {
    let file = std::fs::File::open(path).map_err(SpeciesError::Io)?;
    load_species_reader(file)
}

/// Like [`load_species_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or embedded tables.
pub fn load_species_reader<R: Read>(reader: R) -> SpeciesResult<SpeciesTable> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut list = Vec::new();

    for result in csv_reader.deserialize::<SpeciesRecord>() {
        let row = result.map_err(|e| SpeciesError::Parse(e.to_string()))?;
        list.push(SpeciesProperties {
            vibrational_modes: parse_vibrational_modes(&row.name, &row.vibrational_modes)?,
            electronic_levels: parse_electronic_levels(&row.name, &row.electronic_levels)?,
            name:                  row.name,
            mass:                  row.mass,
            diameter:              row.diameter,
            rotational_dof:        row.rotational_dof,
            viscosity_index:       row.viscosity_index,
            reference_temperature: row.reference_temperature,
        });
    }

    SpeciesTable::new(list)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_vibrational_modes(species: &str, field: &str) -> SpeciesResult<Vec<VibrationalMode>> {
    if field.trim().is_empty() {
        return Ok(vec![]);
    }
    field
        .split('|')
        .map(|entry| {
            let parts: Vec<f64> = entry
                .split(':')
                .map(|p| p.trim().parse::<f64>())
                .collect::<Result<_, _>>()
                .map_err(|_| bad_mode(species, entry))?;
            if parts.len() != 4 {
                return Err(bad_mode(species, entry));
            }
            Ok(VibrationalMode {
                theta_v:     parts[0],
                theta_d:     parts[1],
                z_ref:       parts[2],
                ref_temp_zv: parts[3],
            })
        })
        .collect()
}

fn parse_electronic_levels(species: &str, field: &str) -> SpeciesResult<Vec<ElectronicLevel>> {
    if field.trim().is_empty() {
        return Ok(vec![]);
    }
    field
        .split('|')
        .map(|entry| {
            let (energy, degeneracy) = entry
                .split_once(':')
                .ok_or_else(|| bad_level(species, entry))?;
            Ok(ElectronicLevel {
                energy: energy
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| bad_level(species, entry))?,
                degeneracy: degeneracy
                    .trim()
                    .parse::<u32>()
                    .map_err(|_| bad_level(species, entry))?,
            })
        })
        .collect()
}

fn bad_mode(species: &str, entry: &str) -> SpeciesError {
    SpeciesError::Parse(format!(
        "species {species:?}: invalid vibrational mode {entry:?}: expected thetaV:thetaD:Zref:TrefZv"
    ))
}

fn bad_level(species: &str, entry: &str) -> SpeciesError {
    SpeciesError::Parse(format!(
        "species {species:?}: invalid electronic level {entry:?}: expected energy:degeneracy"
    ))
}
