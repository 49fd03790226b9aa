//! The mesh collaborator contract.
//!
//! Mesh geometry, motion, and topology-change notification are owned by an
//! external collaborator; this core only needs cell counts, cell volumes,
//! and point location.  Cell IDs are valid for one mesh epoch: any topology
//! change or repartition invalidates them all and requires
//! [`CellIndex::rebuild_from_scratch`][crate::CellIndex::rebuild_from_scratch].

use dsmc_core::{CellId, Vec3};

/// Read-only view of the local mesh partition.
pub trait Mesh: Send + Sync {
    /// Number of cells in this partition's mesh.
    fn cell_count(&self) -> usize;

    /// Volume of `cell`, m³.
    fn cell_volume(&self, cell: CellId) -> f64;

    /// The cell containing `position`, or `None` if the point lies outside
    /// this partition.
    fn locate(&self, position: Vec3) -> Option<CellId>;
}

// ── UniformGridMesh ──────────────────────────────────────────────────────────

/// An axis-aligned uniform Cartesian grid.
///
/// The simplest possible [`Mesh`]; real runs wrap the host CFD mesh instead.
/// Exists so the engine, tests, and demos have a concrete geometry to stand
/// on.
#[derive(Clone, Debug)]
pub struct UniformGridMesh {
    origin:  Vec3,
    spacing: f64,
    nx: usize,
    ny: usize,
    nz: usize,
}

impl UniformGridMesh {
    /// `nx × ny × nz` cubic cells of side `spacing`, anchored at `origin`.
    pub fn new(origin: Vec3, spacing: f64, nx: usize, ny: usize, nz: usize) -> Self {
        Self { origin, spacing, nx, ny, nz }
    }

    /// A single cubic cell of side `spacing` — the workhorse of unit tests.
    pub fn single_cell(spacing: f64) -> Self {
        Self::new(Vec3::ZERO, spacing, 1, 1, 1)
    }

    /// Extent of the grid along each axis, m.
    pub fn extent(&self) -> Vec3 {
        Vec3::new(
            self.nx as f64 * self.spacing,
            self.ny as f64 * self.spacing,
            self.nz as f64 * self.spacing,
        )
    }
}

impl Mesh for UniformGridMesh {
    fn cell_count(&self) -> usize {
        self.nx * self.ny * self.nz
    }

    fn cell_volume(&self, _cell: CellId) -> f64 {
        self.spacing * self.spacing * self.spacing
    }

    fn locate(&self, position: Vec3) -> Option<CellId> {
        let rel = position - self.origin;
        if rel.x < 0.0 || rel.y < 0.0 || rel.z < 0.0 {
            return None;
        }
        let (i, j, k) = (
            (rel.x / self.spacing) as usize,
            (rel.y / self.spacing) as usize,
            (rel.z / self.spacing) as usize,
        );
        if i >= self.nx || j >= self.ny || k >= self.nz {
            return None;
        }
        Some(CellId(((k * self.ny + j) * self.nx + i) as u32))
    }
}
