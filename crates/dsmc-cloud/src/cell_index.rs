//! Per-cell occupancy lists and collision bookkeeping state.
//!
//! # Invariants
//!
//! 1. Every live parcel appears in exactly one cell's occupancy list, and the
//!    union of all lists is the full parcel set (no duplicates).
//! 2. `sigma_tc_r_max` is monotonically non-decreasing within one mesh epoch;
//!    it resets only on [`rebuild_from_scratch`][CellIndex::rebuild_from_scratch].
//! 3. The collision remainder is carried between steps and conserved within
//!    an epoch; it resets together with the ratchet on a rebuild.
//! 4. The three per-cell arrays (occupancy, ratchet, remainder) always have
//!    identical length — they are resized only together.
//!
//! Invariant 3's reset across a repartition is an accepted approximation:
//! cells are new objects after a repartition and the collision rate
//! re-converges within a few steps.

use dsmc_core::{CellId, ParcelId};

use crate::{CloudError, CloudResult, Mesh, ParticleStore};

// ── CellIndex ────────────────────────────────────────────────────────────────

/// Maps cells to the parcels they contain, plus the per-cell NTC state that
/// must stay in lockstep with the cell array: the `(σT·cR)` running maximum
/// and the fractional collision-trial remainder.
pub struct CellIndex {
    occupancy:      Vec<Vec<ParcelId>>,
    sigma_tc_r_max: Vec<f64>,
    remainder:      Vec<f64>,
    /// Value the ratchet restarts from on a rebuild.  Chosen at construction
    /// from an initial temperature estimate; must be positive or no trial is
    /// ever attempted in a fresh cell.
    initial_sigma_tc_r: f64,
}

impl CellIndex {
    /// An index over `cell_count` empty cells.
    ///
    /// `initial_sigma_tc_r` seeds the per-cell ratchet (Bird initializes it
    /// from the most probable thermal speed and the reference cross-section).
    pub fn new(cell_count: usize, initial_sigma_tc_r: f64) -> Self {
        Self {
            occupancy:      vec![Vec::new(); cell_count],
            sigma_tc_r_max: vec![initial_sigma_tc_r; cell_count],
            remainder:      vec![0.0; cell_count],
            initial_sigma_tc_r,
        }
    }

    /// Number of cells currently indexed.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.occupancy.len()
    }

    /// Parcels currently in `cell`.
    #[inline]
    pub fn occupancy(&self, cell: CellId) -> &[ParcelId] {
        &self.occupancy[cell.index()]
    }

    /// Total parcels across all occupancy lists (for invariant checks).
    pub fn total_occupancy(&self) -> usize {
        self.occupancy.iter().map(Vec::len).sum()
    }

    // ── Insert / remove / migrate ─────────────────────────────────────────

    /// Record `id` as belonging to `cell` and update the parcel's
    /// back-reference.  O(1) amortized.
    pub fn insert(&mut self, store: &mut ParticleStore, id: ParcelId, cell: CellId) -> CloudResult<()> {
        if cell.index() >= self.occupancy.len() {
            return Err(CloudError::CellOutOfRange(cell));
        }
        let parcel = store.get_mut(id).ok_or(CloudError::ParcelNotLive(id))?;
        parcel.cell = cell;
        self.occupancy[cell.index()].push(id);
        Ok(())
    }

    /// Remove `id` from its recorded cell's list and delete it from the
    /// store, returning the parcel.  O(occupancy of that cell).
    pub fn remove(&mut self, store: &mut ParticleStore, id: ParcelId) -> CloudResult<crate::Parcel> {
        let cell = store.get(id).ok_or(CloudError::ParcelNotLive(id))?.cell;
        let list = &mut self.occupancy[cell.index()];
        let pos = list
            .iter()
            .position(|&p| p == id)
            .ok_or(CloudError::ParcelNotIndexed(id))?;
        list.swap_remove(pos);
        // Slot was just verified live.
        Ok(store.remove(id).expect("parcel verified live"))
    }

    /// Move `id` from its recorded cell to `to` without touching the store
    /// slot.  O(occupancy of the old cell).
    pub fn migrate(&mut self, store: &mut ParticleStore, id: ParcelId, to: CellId) -> CloudResult<()> {
        if to.index() >= self.occupancy.len() {
            return Err(CloudError::CellOutOfRange(to));
        }
        let parcel = store.get_mut(id).ok_or(CloudError::ParcelNotLive(id))?;
        let from = parcel.cell;
        parcel.cell = to;
        let list = &mut self.occupancy[from.index()];
        let pos = list
            .iter()
            .position(|&p| p == id)
            .ok_or(CloudError::ParcelNotIndexed(id))?;
        list.swap_remove(pos);
        self.occupancy[to.index()].push(id);
        Ok(())
    }

    // ── Rebuilds ──────────────────────────────────────────────────────────

    /// Reconstruct all occupancy lists by scanning the parcel set, resizing
    /// every per-cell array to the mesh's current cell count.
    ///
    /// Required whenever the mesh is regenerated (topology change or
    /// load-balance repartition): cell IDs are not stable across such events.
    /// The `sigma_tc_r_max` ratchet and the collision remainder restart at
    /// their initial values — a new mesh epoch begins.
    ///
    /// Parcels that no cell contains are removed from the store and returned;
    /// the boundary collaborator should already have removed them during the
    /// move phase, so a non-empty return normally means escaped strays.
    pub fn rebuild_from_scratch<M: Mesh>(
        &mut self,
        store: &mut ParticleStore,
        mesh:  &M,
    ) -> Vec<ParcelId> {
        let n = mesh.cell_count();
        self.occupancy.clear();
        self.occupancy.resize_with(n, Vec::new);
        self.sigma_tc_r_max.clear();
        self.sigma_tc_r_max.resize(n, self.initial_sigma_tc_r);
        self.remainder.clear();
        self.remainder.resize(n, 0.0);

        let mut strays = Vec::new();
        for (id, parcel) in store.iter_mut() {
            match mesh.locate(parcel.position) {
                Some(cell) => {
                    parcel.cell = cell;
                    self.occupancy[cell.index()].push(id);
                }
                None => strays.push(id),
            }
        }
        for &id in &strays {
            store.remove(id);
        }
        strays
    }

    /// Reconcile only parcels whose recorded cell no longer matches their
    /// mesh location (the post-move fix-up).  Ratchet and remainder are
    /// untouched — the mesh epoch continues.
    ///
    /// Returns stray parcels removed, as in
    /// [`rebuild_from_scratch`][Self::rebuild_from_scratch].
    pub fn rebuild_incremental<M: Mesh>(
        &mut self,
        store: &mut ParticleStore,
        mesh:  &M,
    ) -> Vec<ParcelId> {
        // Scan phase: collect (parcel, new cell) for every mismatch.  With
        // the `parallel` feature this scan runs on Rayon; the apply phase is
        // always sequential so list mutation order stays deterministic.
        let moved: Vec<(ParcelId, Option<CellId>)> = self.scan_mismatches(store, mesh);

        let mut strays = Vec::new();
        for (id, new_cell) in moved {
            match new_cell {
                Some(cell) => {
                    // migrate() re-reads parcel.cell, which is still the old one.
                    self.migrate(store, id, cell)
                        .expect("mismatch scan produced a live, indexed parcel");
                }
                None => {
                    self.remove(store, id)
                        .expect("mismatch scan produced a live, indexed parcel");
                    strays.push(id);
                }
            }
        }
        strays
    }

    #[cfg(not(feature = "parallel"))]
    fn scan_mismatches<M: Mesh>(
        &self,
        store: &ParticleStore,
        mesh:  &M,
    ) -> Vec<(ParcelId, Option<CellId>)> {
        store
            .iter()
            .filter_map(|(id, p)| {
                let located = mesh.locate(p.position);
                (located != Some(p.cell)).then_some((id, located))
            })
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn scan_mismatches<M: Mesh>(
        &self,
        store: &ParticleStore,
        mesh:  &M,
    ) -> Vec<(ParcelId, Option<CellId>)> {
        use rayon::prelude::*;

        store
            .slots()
            .par_iter()
            .enumerate()
            .filter_map(|(i, slot)| {
                let p = slot.as_ref()?;
                let located = mesh.locate(p.position);
                (located != Some(p.cell)).then_some((ParcelId(i as u32), located))
            })
            .collect()
    }

    // ── NTC collision state ───────────────────────────────────────────────

    /// Current `(σT·cR)` running maximum for `cell`.
    #[inline]
    pub fn sigma_tc_r_max(&self, cell: CellId) -> f64 {
        self.sigma_tc_r_max[cell.index()]
    }

    /// Ratchet the running maximum upward.  Values below the current maximum
    /// are ignored — the ratchet never decreases within a mesh epoch.
    #[inline]
    pub fn ratchet_sigma_tc_r(&mut self, cell: CellId, observed: f64) {
        let slot = &mut self.sigma_tc_r_max[cell.index()];
        if observed > *slot {
            *slot = observed;
        }
    }

    /// Fractional collision-trial remainder carried from the previous step.
    #[inline]
    pub fn remainder(&self, cell: CellId) -> f64 {
        self.remainder[cell.index()]
    }

    /// Store the fraction left over after this step's integer trial count.
    #[inline]
    pub fn set_remainder(&mut self, cell: CellId, value: f64) {
        self.remainder[cell.index()] = value;
    }

    // ── Restart checkpoint ────────────────────────────────────────────────

    /// Snapshot the persisted per-cell state (`sigma_tc_r_max` + remainder).
    ///
    /// Restoring this bit-compatibly on restart keeps short-run collision
    /// statistics unbiased; a freshly generated mesh instead starts from
    /// defaults via [`CellIndex::new`].
    pub fn checkpoint(&self) -> CellCheckpoint {
        CellCheckpoint {
            sigma_tc_r_max: self.sigma_tc_r_max.clone(),
            remainder:      self.remainder.clone(),
        }
    }

    /// Restore a checkpoint taken on the same mesh.
    pub fn restore(&mut self, checkpoint: CellCheckpoint) -> CloudResult<()> {
        let n = self.occupancy.len();
        if checkpoint.sigma_tc_r_max.len() != n || checkpoint.remainder.len() != n {
            return Err(CloudError::CheckpointMismatch {
                expected: n,
                got:      checkpoint.sigma_tc_r_max.len(),
            });
        }
        self.sigma_tc_r_max = checkpoint.sigma_tc_r_max;
        self.remainder = checkpoint.remainder;
        Ok(())
    }
}

// ── CellCheckpoint ───────────────────────────────────────────────────────────

/// Persisted per-cell collision state for restarts.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellCheckpoint {
    pub sigma_tc_r_max: Vec<f64>,
    pub remainder:      Vec<f64>,
}
