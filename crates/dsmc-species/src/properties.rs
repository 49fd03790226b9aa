//! Constant per-species properties and the species table.
//!
//! Properties are immutable after table construction and shared read-only by
//! every component via `SpeciesId`.  Parcels only ever carry IDs handed out
//! by the table, so lookup by a parcel's species ID is total.

use std::collections::HashMap;

use dsmc_core::{BOLTZMANN, SMALL, SpeciesId};

use crate::{SpeciesError, SpeciesResult};

// ── Mode tables ───────────────────────────────────────────────────────────────

/// One vibrational mode of a molecule (simple harmonic oscillator ladder).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VibrationalMode {
    /// Characteristic vibrational temperature θv, K.
    pub theta_v: f64,
    /// Characteristic dissociation temperature θd, K.  Caps the accessible
    /// level ladder at `floor(θd/θv)`.
    pub theta_d: f64,
    /// Reference vibrational collision number Z_ref at `ref_temp_zv`.
    pub z_ref: f64,
    /// Reference temperature at which Z_ref was measured, K.
    pub ref_temp_zv: f64,
}

impl VibrationalMode {
    /// Highest bound level of this mode's ladder.
    #[inline]
    pub fn max_level(&self) -> u16 {
        (self.theta_d / self.theta_v) as u16
    }

    /// Energy of quantum level `i`, J.
    #[inline]
    pub fn level_energy(&self, level: u16) -> f64 {
        level as f64 * BOLTZMANN * self.theta_v
    }
}

/// One electronic level (energy above ground plus degeneracy).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElectronicLevel {
    /// Level energy above ground state, J.
    pub energy: f64,
    /// Level degeneracy g.
    pub degeneracy: u32,
}

// ── SpeciesProperties ─────────────────────────────────────────────────────────

/// Constant properties of one species type.
///
/// `reference_temperature` and `viscosity_index` parameterize the VHS
/// collision cross-section; the mode tables drive internal-energy sampling.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpeciesProperties {
    /// Species name as declared in configuration (e.g. "N2").
    pub name: String,
    /// Molecular mass, kg.
    pub mass: f64,
    /// Effective (VHS reference) diameter, m.
    pub diameter: f64,
    /// Rotational degrees of freedom (0 for atoms, 2 for linear molecules).
    pub rotational_dof: f64,
    /// Vibrational modes; empty for atoms.
    pub vibrational_modes: Vec<VibrationalMode>,
    /// Electronic levels including the ground state; may be empty when the
    /// electronic mode is not modelled for this species.
    pub electronic_levels: Vec<ElectronicLevel>,
    /// VHS reference temperature, K.
    pub reference_temperature: f64,
    /// VHS viscosity-temperature exponent ω.
    pub viscosity_index: f64,
}

impl SpeciesProperties {
    /// Number of vibrational modes.
    #[inline]
    pub fn vibrational_mode_count(&self) -> usize {
        self.vibrational_modes.len()
    }

    /// `true` if the species carries any rotational energy.
    #[inline]
    pub fn has_rotation(&self) -> bool {
        self.rotational_dof > SMALL
    }

    fn validate(&self) -> SpeciesResult<()> {
        let check = |what: &'static str, got: f64| {
            if got <= 0.0 {
                Err(SpeciesError::NonPositive { name: self.name.clone(), what, got })
            } else {
                Ok(())
            }
        };
        check("mass", self.mass)?;
        check("diameter", self.diameter)?;
        check("reference temperature", self.reference_temperature)?;
        check("viscosity index", self.viscosity_index)?;
        for mode in &self.vibrational_modes {
            check("vibrational characteristic temperature", mode.theta_v)?;
            check("dissociation temperature", mode.theta_d)?;
            check("reference collision number", mode.z_ref)?;
            check("Z_ref reference temperature", mode.ref_temp_zv)?;
        }
        Ok(())
    }
}

// ── SpeciesTable ──────────────────────────────────────────────────────────────

/// The immutable table of all declared species.
///
/// The position of an entry maps to its `SpeciesId`: if the table holds
/// `(N2, O2, CO2)` then N2 has ID 0, O2 ID 1, CO2 ID 2.
#[derive(Debug)]
pub struct SpeciesTable {
    list:    Vec<SpeciesProperties>,
    by_name: HashMap<String, SpeciesId>,
}

impl SpeciesTable {
    /// Build and validate a table.  Errors are fatal configuration errors:
    /// empty tables, duplicate names, and non-physical parameters all refuse
    /// to construct.
    pub fn new(list: Vec<SpeciesProperties>) -> SpeciesResult<Self> {
        if list.is_empty() {
            return Err(SpeciesError::EmptyTable);
        }
        let mut by_name = HashMap::with_capacity(list.len());
        for (i, props) in list.iter().enumerate() {
            props.validate()?;
            if by_name.insert(props.name.clone(), SpeciesId(i as u16)).is_some() {
                return Err(SpeciesError::DuplicateName(props.name.clone()));
            }
        }
        Ok(Self { list, by_name })
    }

    /// Number of species types.
    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Properties for `id`.
    ///
    /// Lookup is total for every ID the table handed out; indexing with a
    /// foreign ID is a programming error and panics like any slice index.
    #[inline]
    pub fn get(&self, id: SpeciesId) -> &SpeciesProperties {
        &self.list[id.index()]
    }

    /// Fallible lookup for validating externally supplied IDs.
    pub fn try_get(&self, id: SpeciesId) -> SpeciesResult<&SpeciesProperties> {
        self.list.get(id.index()).ok_or(SpeciesError::Unknown(id))
    }

    /// Resolve a species name to its ID.
    pub fn id_of(&self, name: &str) -> SpeciesResult<SpeciesId> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| SpeciesError::UnknownName(name.to_owned()))
    }

    /// Iterator over `(SpeciesId, &SpeciesProperties)` in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (SpeciesId, &SpeciesProperties)> {
        self.list
            .iter()
            .enumerate()
            .map(|(i, p)| (SpeciesId(i as u16), p))
    }
}
