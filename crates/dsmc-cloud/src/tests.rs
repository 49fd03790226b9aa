//! Unit tests for parcel storage and the occupancy index.

use dsmc_core::{CellId, ParcelId, SpeciesId, Vec3, WorkerRng};

use crate::{
    AxisymmetricWeighting, CellIndex, CloudError, Mesh, Parcel, ParticleStore, RevolutionAxis,
    UniformGridMesh,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parcel_at(x: f64, y: f64, z: f64) -> Parcel {
    Parcel::new(Vec3::new(x, y, z), Vec3::ZERO, SpeciesId(0), 0)
}

/// 4×1×1 row of unit cells along x.
fn row_mesh() -> UniformGridMesh {
    UniformGridMesh::new(Vec3::ZERO, 1.0, 4, 1, 1)
}

/// Assert the occupancy partition invariant: the union of all occupancy
/// lists equals the live parcel set, with no duplicates.
fn assert_partition_invariant(index: &CellIndex, store: &ParticleStore) {
    let mut seen: Vec<ParcelId> = Vec::new();
    for c in 0..index.cell_count() {
        for &id in index.occupancy(CellId(c as u32)) {
            assert!(!seen.contains(&id), "{id} appears in two occupancy lists");
            assert_eq!(
                store.get(id).expect("indexed parcel must be live").cell,
                CellId(c as u32),
                "back-reference out of sync for {id}"
            );
            seen.push(id);
        }
    }
    assert_eq!(seen.len(), store.len(), "occupancy does not cover the parcel set");
}

// ── ParticleStore ─────────────────────────────────────────────────────────────

mod store {
    use super::*;

    #[test]
    fn insert_remove_recycles_slots() {
        let mut store = ParticleStore::new();
        let a = store.insert(parcel_at(0.0, 0.0, 0.0));
        let b = store.insert(parcel_at(1.0, 0.0, 0.0));
        assert_eq!(store.len(), 2);
        assert_ne!(a, b);

        store.remove(a).unwrap();
        assert_eq!(store.len(), 1);
        assert!(store.get(a).is_none());

        // Freed slot is reused; b is untouched.
        let c = store.insert(parcel_at(2.0, 0.0, 0.0));
        assert_eq!(c, a);
        assert!(store.get(b).is_some());
    }

    #[test]
    fn remove_twice_is_none() {
        let mut store = ParticleStore::new();
        let id = store.insert(parcel_at(0.0, 0.0, 0.0));
        assert!(store.remove(id).is_some());
        assert!(store.remove(id).is_none());
    }

    #[test]
    fn pair_mut_gives_disjoint_refs() {
        let mut store = ParticleStore::new();
        let a = store.insert(parcel_at(0.0, 0.0, 0.0));
        let b = store.insert(parcel_at(1.0, 0.0, 0.0));
        let (pa, pb) = store.pair_mut(a, b);
        pa.velocity = Vec3::new(1.0, 0.0, 0.0);
        pb.velocity = Vec3::new(-1.0, 0.0, 0.0);
        assert_eq!(store.get(a).unwrap().velocity.x, 1.0);
        assert_eq!(store.get(b).unwrap().velocity.x, -1.0);
    }

    #[test]
    #[should_panic(expected = "distinct")]
    fn pair_mut_same_id_panics() {
        let mut store = ParticleStore::new();
        let a = store.insert(parcel_at(0.0, 0.0, 0.0));
        let _ = store.pair_mut(a, a);
    }

    #[test]
    fn drain_empties_store() {
        let mut store = ParticleStore::new();
        store.insert(parcel_at(0.0, 0.0, 0.0));
        store.insert(parcel_at(1.0, 0.0, 0.0));
        let drained = store.drain();
        assert_eq!(drained.len(), 2);
        assert!(store.is_empty());
    }
}

// ── CellIndex ─────────────────────────────────────────────────────────────────

mod cell_index {
    use super::*;

    #[test]
    fn partition_invariant_under_insert_remove_migrate() {
        let mesh = row_mesh();
        let mut store = ParticleStore::new();
        let mut index = CellIndex::new(mesh.cell_count(), 1.0e-16);

        let ids: Vec<ParcelId> = (0..8)
            .map(|i| {
                let id = store.insert(parcel_at(0.5 + (i % 4) as f64, 0.5, 0.5));
                let cell = mesh.locate(store.get(id).unwrap().position).unwrap();
                index.insert(&mut store, id, cell).unwrap();
                id
            })
            .collect();
        assert_partition_invariant(&index, &store);

        index.remove(&mut store, ids[3]).unwrap();
        index.migrate(&mut store, ids[0], CellId(2)).unwrap();
        assert_partition_invariant(&index, &store);
        assert_eq!(store.len(), 7);
        assert_eq!(index.total_occupancy(), 7);
    }

    #[test]
    fn insert_out_of_range_errors() {
        let mut store = ParticleStore::new();
        let mut index = CellIndex::new(2, 1.0e-16);
        let id = store.insert(parcel_at(0.0, 0.0, 0.0));
        assert!(matches!(
            index.insert(&mut store, id, CellId(9)),
            Err(CloudError::CellOutOfRange(_))
        ));
    }

    #[test]
    fn rebuild_from_scratch_relocates_everything() {
        let mesh = row_mesh();
        let mut store = ParticleStore::new();
        let mut index = CellIndex::new(1, 1.0e-16); // wrong size on purpose

        for i in 0..4 {
            store.insert(parcel_at(0.5 + i as f64, 0.5, 0.5));
        }
        let strays = index.rebuild_from_scratch(&mut store, &mesh);
        assert!(strays.is_empty());
        assert_eq!(index.cell_count(), 4);
        for c in 0..4 {
            assert_eq!(index.occupancy(CellId(c)).len(), 1);
        }
        assert_partition_invariant(&index, &store);
    }

    #[test]
    fn rebuild_from_scratch_drops_strays_and_resets_ratchet() {
        let mesh = row_mesh();
        let mut store = ParticleStore::new();
        let mut index = CellIndex::new(mesh.cell_count(), 1.0e-16);

        let inside = store.insert(parcel_at(0.5, 0.5, 0.5));
        let outside = store.insert(parcel_at(-3.0, 0.5, 0.5));
        index.ratchet_sigma_tc_r(CellId(0), 5.0);
        index.set_remainder(CellId(0), 0.7);

        let strays = index.rebuild_from_scratch(&mut store, &mesh);
        assert_eq!(strays, vec![outside]);
        assert!(store.get(outside).is_none());
        assert!(store.get(inside).is_some());
        // New mesh epoch: ratchet and remainder restart.
        assert_eq!(index.sigma_tc_r_max(CellId(0)), 1.0e-16);
        assert_eq!(index.remainder(CellId(0)), 0.0);
    }

    #[test]
    fn incremental_rebuild_matches_scratch_rebuild() {
        // Property: for an identical parcel position set, incremental
        // reconciliation and a scratch rebuild produce the same mapping.
        let mesh = row_mesh();
        let mut rng = WorkerRng::new(99);

        let mut store_a = ParticleStore::new();
        let mut index_a = CellIndex::new(mesh.cell_count(), 1.0e-16);
        for _ in 0..32 {
            let id = store_a.insert(parcel_at(rng.gen_range(0.0..4.0), 0.5, 0.5));
            let cell = mesh.locate(store_a.get(id).unwrap().position).unwrap();
            index_a.insert(&mut store_a, id, cell).unwrap();
        }

        // Move a subset of parcels, then reconcile incrementally…
        let moved: Vec<ParcelId> = store_a.iter().map(|(id, _)| id).step_by(3).collect();
        for &id in &moved {
            store_a.get_mut(id).unwrap().position = parcel_at(rng.gen_range(0.0..4.0), 0.5, 0.5).position;
        }
        let strays = index_a.rebuild_incremental(&mut store_a, &mesh);
        assert!(strays.is_empty());
        assert_partition_invariant(&index_a, &store_a);

        // …and compare against a scratch rebuild of the same positions.
        let mut store_b = ParticleStore::new();
        for (_, p) in store_a.iter() {
            store_b.insert(p.clone());
        }
        let mut index_b = CellIndex::new(mesh.cell_count(), 1.0e-16);
        index_b.rebuild_from_scratch(&mut store_b, &mesh);

        for ((id_a, pa), (_, pb)) in store_a.iter().zip(store_b.iter()) {
            assert_eq!(pa.cell, pb.cell, "mapping differs for {id_a}");
        }
    }

    #[test]
    fn incremental_rebuild_preserves_ratchet_and_remainder() {
        let mesh = row_mesh();
        let mut store = ParticleStore::new();
        let mut index = CellIndex::new(mesh.cell_count(), 1.0e-16);
        let id = store.insert(parcel_at(0.5, 0.5, 0.5));
        index.insert(&mut store, id, CellId(0)).unwrap();

        index.ratchet_sigma_tc_r(CellId(0), 2.5);
        index.set_remainder(CellId(0), 0.4);
        store.get_mut(id).unwrap().position = Vec3::new(2.5, 0.5, 0.5);
        index.rebuild_incremental(&mut store, &mesh);

        assert_eq!(store.get(id).unwrap().cell, CellId(2));
        assert_eq!(index.sigma_tc_r_max(CellId(0)), 2.5);
        assert_eq!(index.remainder(CellId(0)), 0.4);
    }

    #[test]
    fn ratchet_never_decreases() {
        let mut index = CellIndex::new(1, 1.0e-16);
        index.ratchet_sigma_tc_r(CellId(0), 3.0);
        index.ratchet_sigma_tc_r(CellId(0), 1.0);
        assert_eq!(index.sigma_tc_r_max(CellId(0)), 3.0);
        index.ratchet_sigma_tc_r(CellId(0), 4.0);
        assert_eq!(index.sigma_tc_r_max(CellId(0)), 4.0);
    }

    #[test]
    fn checkpoint_roundtrip_is_bit_exact() {
        let mut index = CellIndex::new(3, 1.0e-16);
        index.ratchet_sigma_tc_r(CellId(1), 0.123456789e-15);
        index.set_remainder(CellId(2), 0.999999999);

        let checkpoint = index.checkpoint();
        let mut restored = CellIndex::new(3, 1.0e-16);
        restored.restore(checkpoint.clone()).unwrap();

        for c in 0..3u32 {
            assert_eq!(restored.sigma_tc_r_max(CellId(c)), index.sigma_tc_r_max(CellId(c)));
            assert_eq!(restored.remainder(CellId(c)), index.remainder(CellId(c)));
        }
        assert_eq!(restored.checkpoint(), checkpoint);
    }

    #[test]
    fn checkpoint_size_mismatch_errors() {
        let index = CellIndex::new(3, 1.0e-16);
        let mut other = CellIndex::new(5, 1.0e-16);
        assert!(matches!(
            other.restore(index.checkpoint()),
            Err(CloudError::CheckpointMismatch { expected: 5, got: 3 })
        ));
    }
}

// ── Axisymmetric weighting ────────────────────────────────────────────────────

mod axisymmetric {
    use super::*;

    fn weighting() -> AxisymmetricWeighting {
        AxisymmetricWeighting {
            axis:          RevolutionAxis::X,
            radial_extent: 1.0,
            max_rwf:       10.0,
        }
    }

    #[test]
    fn rwf_is_one_on_axis_and_max_at_extent() {
        let w = weighting();
        assert_eq!(w.rwf_at(Vec3::new(5.0, 0.0, 0.0)), 1.0);
        assert!((w.rwf_at(Vec3::new(0.0, 1.0, 0.0)) - 10.0).abs() < 1e-12);
        // Beyond the extent the factor clamps.
        assert!((w.rwf_at(Vec3::new(0.0, 2.0, 0.0)) - 10.0).abs() < 1e-12);
    }

    #[test]
    fn apply_updates_every_parcel() {
        let w = weighting();
        let mut store = ParticleStore::new();
        let near = store.insert(parcel_at(0.0, 0.1, 0.0));
        let far = store.insert(parcel_at(0.0, 0.9, 0.0));
        w.apply(&mut store);
        assert!(store.get(near).unwrap().rwf < store.get(far).unwrap().rwf);
    }

    #[test]
    fn weighted_density_reproduces_real_density_per_radial_bin() {
        // Injecting parcels so that each carries weight W·rwf(r) must
        // reproduce a uniform real-particle number density across radial
        // bins whose real volume grows linearly with radius.  With a linear
        // RWF the per-parcel weight exactly cancels the annular volume
        // growth, so (Σ rwf)/bin_volume should be flat within sampling noise.
        let w = weighting();
        let mut rng = WorkerRng::new(7);
        const BINS: usize = 5;
        const PER_BIN: usize = 4000;

        let mut weighted: [f64; BINS] = [0.0; BINS];
        for bin in 0..BINS {
            // Parcel count per bin is uniform (what an axisymmetric slice
            // mesh holds); real density comes from the weights.
            for _ in 0..PER_BIN {
                let r = (bin as f64 + rng.sample01()) / BINS as f64;
                weighted[bin] += w.rwf_at(Vec3::new(0.0, r, 0.0));
            }
        }

        // Annular bin "volume" per unit depth ∝ (r_out² − r_in²) ∝ 2·bin+1.
        let density: Vec<f64> = weighted
            .iter()
            .enumerate()
            .map(|(bin, &sum)| sum / (2 * bin + 1) as f64)
            .collect();
        let mean = density.iter().sum::<f64>() / BINS as f64;
        for (bin, d) in density.iter().enumerate() {
            let rel = (d - mean).abs() / mean;
            assert!(
                rel < 0.35,
                "bin {bin}: weighted density {d:.1} deviates {rel:.2} from mean {mean:.1}"
            );
        }
        // The outermost bin must carry roughly (BINS·2−1)× the axis bin's
        // raw weight, confirming the linear growth actually happened.
        assert!(weighted[BINS - 1] / weighted[0] > 3.0);
    }
}

// ── UniformGridMesh ───────────────────────────────────────────────────────────

mod mesh {
    use super::*;

    #[test]
    fn locate_maps_cells_correctly() {
        let mesh = UniformGridMesh::new(Vec3::ZERO, 1.0, 2, 2, 1);
        assert_eq!(mesh.cell_count(), 4);
        assert_eq!(mesh.locate(Vec3::new(0.5, 0.5, 0.5)), Some(CellId(0)));
        assert_eq!(mesh.locate(Vec3::new(1.5, 0.5, 0.5)), Some(CellId(1)));
        assert_eq!(mesh.locate(Vec3::new(0.5, 1.5, 0.5)), Some(CellId(2)));
        assert_eq!(mesh.locate(Vec3::new(-0.5, 0.5, 0.5)), None);
        assert_eq!(mesh.locate(Vec3::new(2.5, 0.5, 0.5)), None);
    }

    #[test]
    fn volume_is_spacing_cubed() {
        let mesh = UniformGridMesh::single_cell(2.0);
        assert_eq!(mesh.cell_volume(CellId(0)), 8.0);
    }
}
