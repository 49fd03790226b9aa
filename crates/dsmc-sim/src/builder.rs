//! Fluent builder for constructing a [`DsmcSim`].

use std::f64::consts::PI;
use std::sync::Arc;

use dsmc_balance::{BalanceConfig, LoadBalancer, Partitioner};
use dsmc_cloud::{AxisymmetricWeighting, CellIndex, Mesh, ParticleStore};
use dsmc_collide::{CollisionEngine, ModelContext, ModelRegistry, RelaxationNumbers};
use dsmc_core::{RunConfig, WorkerRng};
use dsmc_sampling::most_probable_speed;
use dsmc_species::SpeciesTable;

use crate::{DsmcSim, FreeFlight, Mover, SimError, SimResult};

/// Fluent builder for [`DsmcSim<M, P>`].
///
/// # Required inputs
///
/// - [`RunConfig`] — steps, seed, timestep, statistical weight
/// - [`SpeciesTable`] — validated species properties
/// - `M: Mesh` — the local mesh partition
/// - `P: Partitioner` — the parallel decomposition
///   (use [`dsmc_balance::SinglePartition`] for serial runs)
///
/// # Optional inputs (have defaults)
///
/// | Method                  | Default                          |
/// |-------------------------|----------------------------------|
/// | `.collision_model(s)`   | `"variableHardSphere"`           |
/// | `.partner_model(s)`     | `"uniform"`                      |
/// | `.reaction_model(s)`    | `"none"`                         |
/// | `.registry(r)`          | `ModelRegistry::with_builtin_models()` |
/// | `.relaxation(r)`        | `RelaxationNumbers::default()`   |
/// | `.mover(m)`             | [`FreeFlight`]                   |
/// | `.axisymmetric(w)`      | off                              |
/// | `.balance(c)`           | `BalanceConfig::default()`       |
/// | `.initial_sigma_tc_r(v)`| VHS estimate at each species' reference temperature |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, species, mesh, SinglePartition)
///     .collision_model("larsenBorgnakkeVariableHardSphere")
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<M: Mesh, P: Partitioner> {
    config:      RunConfig,
    species:     Arc<SpeciesTable>,
    mesh:        M,
    partitioner: P,
    registry:    Option<ModelRegistry>,
    collision:   String,
    partner:     String,
    reaction:    String,
    relaxation:  RelaxationNumbers,
    mover:       Option<Box<dyn Mover>>,
    weighting:   Option<AxisymmetricWeighting>,
    balance:     BalanceConfig,
    initial_sigma_tc_r: Option<f64>,
}

impl<M: Mesh, P: Partitioner> SimBuilder<M, P> {
    /// Create a builder with all required inputs.
    pub fn new(config: RunConfig, species: Arc<SpeciesTable>, mesh: M, partitioner: P) -> Self {
        Self {
            config,
            species,
            mesh,
            partitioner,
            registry:   None,
            collision:  "variableHardSphere".to_owned(),
            partner:    "uniform".to_owned(),
            reaction:   "none".to_owned(),
            relaxation: RelaxationNumbers::default(),
            mover:      None,
            weighting:  None,
            balance:    BalanceConfig::default(),
            initial_sigma_tc_r: None,
        }
    }

    /// Select the binary collision model by its registered name.
    pub fn collision_model(mut self, name: &str) -> Self {
        self.collision = name.to_owned();
        self
    }

    /// Select the partner-selection strategy by its registered name.
    pub fn partner_model(mut self, name: &str) -> Self {
        self.partner = name.to_owned();
        self
    }

    /// Select the reaction model by its registered name.
    pub fn reaction_model(mut self, name: &str) -> Self {
        self.reaction = name.to_owned();
        self
    }

    /// Replace the built-in model registry (e.g. to add custom models).
    pub fn registry(mut self, registry: ModelRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Internal-mode relaxation collision numbers.
    pub fn relaxation(mut self, relaxation: RelaxationNumbers) -> Self {
        self.relaxation = relaxation;
        self
    }

    /// Replace the default ballistic mover.
    pub fn mover(mut self, mover: Box<dyn Mover>) -> Self {
        self.mover = Some(mover);
        self
    }

    /// Enable axisymmetric radial weighting.
    pub fn axisymmetric(mut self, weighting: AxisymmetricWeighting) -> Self {
        self.weighting = Some(weighting);
        self
    }

    /// Load-balance interval and threshold.
    pub fn balance(mut self, balance: BalanceConfig) -> Self {
        self.balance = balance;
        self
    }

    /// Seed value for every cell's `(σT·cR)` ratchet.
    ///
    /// Defaults to a hard-sphere estimate, `π·d²·√(2kTref/m)`, maximized
    /// over the species table.  Anything positive works — the ratchet
    /// converges within a few steps — but a value near the true product
    /// avoids a burst of over- or under-selection at startup.
    pub fn initial_sigma_tc_r(mut self, value: f64) -> Self {
        self.initial_sigma_tc_r = Some(value);
        self
    }

    /// Validate inputs, resolve the configured models, and return a
    /// ready-to-run [`DsmcSim`].
    pub fn build(self) -> SimResult<DsmcSim<M, P>> {
        if self.config.dt_secs <= 0.0 {
            return Err(SimError::Config(format!(
                "timestep must be positive, got {}",
                self.config.dt_secs
            )));
        }
        if self.config.equivalent_particles <= 0.0 {
            return Err(SimError::Config(format!(
                "equivalent particles must be positive, got {}",
                self.config.equivalent_particles
            )));
        }
        if let Some(sigma) = self.initial_sigma_tc_r
            && sigma <= 0.0
        {
            return Err(SimError::Config(format!(
                "initial sigmaTcR must be positive, got {sigma}"
            )));
        }

        let registry = self.registry.unwrap_or_else(ModelRegistry::with_builtin_models);
        let ctx = ModelContext {
            species:    Arc::clone(&self.species),
            relaxation: self.relaxation,
        };
        let engine = CollisionEngine::new(
            registry.collision(&self.collision, &ctx)?,
            registry.partner(&self.partner, &ctx)?,
            registry.reaction(&self.reaction, &ctx)?,
            self.config.equivalent_particles,
        );

        let initial_sigma_tc_r = self
            .initial_sigma_tc_r
            .unwrap_or_else(|| hard_sphere_sigma_tc_r(&self.species));
        let index = CellIndex::new(self.mesh.cell_count(), initial_sigma_tc_r);
        let rng = WorkerRng::for_partition(self.config.seed, self.partitioner.local_partition());

        Ok(DsmcSim {
            clock:       self.config.make_clock(),
            config:      self.config,
            species:     self.species,
            store:       ParticleStore::new(),
            index,
            mesh:        self.mesh,
            engine,
            mover:       self.mover.unwrap_or_else(|| Box::new(FreeFlight)),
            partitioner: self.partitioner,
            balancer:    LoadBalancer::new(self.balance),
            weighting:   self.weighting,
            rng,
        })
    }
}

/// Startup ratchet seed: the hard-sphere cross-section times the most
/// probable thermal speed at each species' reference temperature, maximized
/// over the table.
fn hard_sphere_sigma_tc_r(species: &SpeciesTable) -> f64 {
    species
        .iter()
        .map(|(_, p)| {
            PI * p.diameter * p.diameter * most_probable_speed(p.reference_temperature, p.mass)
        })
        .fold(0.0, f64::max)
}
