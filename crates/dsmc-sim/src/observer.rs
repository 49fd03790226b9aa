//! Step-loop observer hooks for progress reporting and data collection.

use dsmc_core::Step;
use dsmc_collide::CollisionStats;

use crate::InfoMeasurements;

/// Callbacks invoked by [`DsmcSim::run`][crate::DsmcSim::run] at key points
/// in the step loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — collision-rate printer
///
/// ```rust,ignore
/// struct RatePrinter;
///
/// impl StepObserver for RatePrinter {
///     fn on_step_end(&mut self, step: Step, stats: &CollisionStats) {
///         println!("{step}: {} collisions / {} trials", stats.accepted, stats.trials);
///     }
/// }
/// ```
pub trait StepObserver {
    /// Called at the very start of each step, before the move phase.
    fn on_step_start(&mut self, _step: Step) {}

    /// Called after the collision phase with that step's counters.
    fn on_step_end(&mut self, _step: Step, _stats: &CollisionStats) {}

    /// Called every `config.measure_interval_steps` steps with the freshly
    /// aggregated domain measurements.
    fn on_measurements(&mut self, _step: Step, _info: &InfoMeasurements) {}

    /// Called after a load-balance repartition, once the occupancy index has
    /// been rebuilt for the new mesh epoch.
    fn on_repartition(&mut self, _step: Step, _imbalance: f64) {}

    /// Called once after the final step completes.
    fn on_run_end(&mut self, _final_step: Step) {}
}

/// A [`StepObserver`] that does nothing.
pub struct NoopObserver;

impl StepObserver for NoopObserver {}
