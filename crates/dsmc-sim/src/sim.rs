//! The `DsmcSim` struct and its step loop.

use std::sync::Arc;

use dsmc_balance::{BalanceOutcome, LoadBalancer, Partitioner};
use dsmc_cloud::{AxisymmetricWeighting, CellIndex, Mesh, Parcel, ParticleStore};
use dsmc_collide::{CollisionEngine, CollisionStats};
use dsmc_core::{ParcelId, RunConfig, SpeciesId, StepClock, Vec3, WorkerRng};
use dsmc_species::SpeciesTable;

use crate::{InfoMeasurements, Mover, SimResult, StepObserver};

/// The main simulation runner for one worker's partition.
///
/// `DsmcSim<M, P>` owns the local parcel population and drives the per-step
/// phase sequence:
///
/// 1. **Move**: the [`Mover`] advances every parcel (ballistic by default;
///    real runs wrap the host mesh's tracking and boundaries here).
/// 2. **Reconcile**: the occupancy index migrates parcels whose cell changed
///    and removes strays that left the domain.
/// 3. **Weight**: in axisymmetric runs, refresh each parcel's RWF from its
///    new radius.
/// 4. **Collide**: the NTC sweep runs cell by cell.
/// 5. **Measure**: on the configured interval, aggregate domain measurements
///    go to the observer.
/// 6. **Balance**: on the configured interval the load balancer gathers
///    global counts; a repartition invalidates all cell IDs and forces a
///    scratch rebuild of the occupancy index before the next step.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct DsmcSim<M: Mesh, P: Partitioner> {
    /// Global run configuration (steps, seed, timestep, weight).
    pub config: RunConfig,

    /// Simulation clock — tracks the current step and maps to physical time.
    pub clock: StepClock,

    /// Immutable species table shared with the collision models.
    pub species: Arc<SpeciesTable>,

    /// All parcels on this partition.
    pub store: ParticleStore,

    /// Occupancy lists plus per-cell NTC state.
    pub index: CellIndex,

    /// The local mesh partition.
    pub mesh: M,

    pub(crate) engine:      CollisionEngine,
    pub(crate) mover:       Box<dyn Mover>,
    pub(crate) partitioner: P,
    pub(crate) balancer:    LoadBalancer,
    pub(crate) weighting:   Option<AxisymmetricWeighting>,
    pub(crate) rng:         WorkerRng,
}

impl<M: Mesh, P: Partitioner> std::fmt::Debug for DsmcSim<M, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DsmcSim").finish_non_exhaustive()
    }
}

impl<M: Mesh, P: Partitioner> DsmcSim<M, P> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run from the current step to `config.end_step()`, calling observer
    /// hooks at every step boundary.
    pub fn run<O: StepObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        while self.clock.current_step < self.config.end_step() {
            self.process_step(observer)?;
        }
        observer.on_run_end(self.clock.current_step);
        Ok(())
    }

    /// Run exactly `n` steps from the current position (ignores `end_step`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_steps<O: StepObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.process_step(observer)?;
        }
        Ok(())
    }

    /// Insert a parcel at its position's cell, applying the radial weighting
    /// factor if configured.  Returns `None` when the position lies outside
    /// this partition's mesh.
    pub fn inject(&mut self, mut parcel: Parcel) -> Option<ParcelId> {
        let cell = self.mesh.locate(parcel.position)?;
        if let Some(weighting) = &self.weighting {
            parcel.rwf = weighting.rwf_at(parcel.position);
        }
        let id = self.store.insert(parcel);
        self.index
            .insert(&mut self.store, id, cell)
            .expect("freshly inserted parcel is live and the cell was just located");
        Some(id)
    }

    /// Convenience injection from plain state.
    pub fn inject_at(&mut self, position: Vec3, velocity: Vec3, species: SpeciesId) -> Option<ParcelId> {
        let modes = self.species.get(species).vibrational_mode_count();
        self.inject(Parcel::new(position, velocity, species, modes))
    }

    /// Force a synchronized repartition at the next opportunity, regardless
    /// of the measured imbalance.
    pub fn force_rebalance<O: StepObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let outcome = self.balancer.step(&mut self.partitioner, self.store.len(), true)?;
        if let BalanceOutcome::Repartitioned { imbalance } = outcome {
            self.index.rebuild_from_scratch(&mut self.store, &self.mesh);
            observer.on_repartition(self.clock.current_step, imbalance);
        }
        Ok(())
    }

    /// Aggregate measurements over the current population.
    pub fn measure(&self) -> InfoMeasurements {
        InfoMeasurements::measure(&self.store, &self.species, self.config.equivalent_particles)
    }

    // ── Core step processing ──────────────────────────────────────────────

    fn process_step<O: StepObserver>(&mut self, observer: &mut O) -> SimResult<CollisionStats> {
        let now = self.clock.current_step;
        let dt = self.clock.dt_secs;
        observer.on_step_start(now);

        // ── Phase 1: move ─────────────────────────────────────────────────
        self.mover.move_parcels(&mut self.store, dt);

        // ── Phase 2: reconcile occupancy ──────────────────────────────────
        //
        // Incremental: only parcels whose cell changed are touched; parcels
        // the mover left outside the mesh are removed as strays.
        self.index.rebuild_incremental(&mut self.store, &self.mesh);

        // ── Phase 3: refresh radial weights ───────────────────────────────
        if let Some(weighting) = &self.weighting {
            weighting.apply(&mut self.store);
        }

        // ── Phase 4: collisions ───────────────────────────────────────────
        let stats =
            self.engine
                .collide_all(&mut self.rng, &mut self.store, &mut self.index, &self.mesh, dt);
        observer.on_step_end(now, &stats);

        // ── Phase 5: measurements ─────────────────────────────────────────
        if self.config.measure_interval_steps > 0
            && now.0.is_multiple_of(self.config.measure_interval_steps)
        {
            observer.on_measurements(now, &self.measure());
        }

        // ── Phase 6: load balance ─────────────────────────────────────────
        //
        // A repartition is a global barrier; every cell ID is stale after it,
        // so the occupancy index restarts the mesh epoch from scratch.
        let outcome = self.balancer.step(&mut self.partitioner, self.store.len(), false)?;
        if let BalanceOutcome::Repartitioned { imbalance } = outcome {
            self.index.rebuild_from_scratch(&mut self.store, &self.mesh);
            observer.on_repartition(now, imbalance);
        }

        self.clock.advance();
        Ok(stats)
    }
}
