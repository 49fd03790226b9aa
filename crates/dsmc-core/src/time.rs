//! Simulation time model.
//!
//! # Design
//!
//! Time is represented as a monotonically increasing `Step` counter.  The
//! mapping to physical time is held in `StepClock`:
//!
//!   elapsed = step * dt_secs
//!
//! Using an integer step as the canonical time unit means all scheduling
//! arithmetic (load-balance intervals, measurement intervals) is exact and
//! comparisons are O(1); the physical timestep only enters the collision
//! rate and the move phase.

use std::fmt;

// ── Step ─────────────────────────────────────────────────────────────────────

/// An absolute simulation step counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Step(pub u64);

impl Step {
    pub const ZERO: Step = Step(0);

    /// Return the step `n` after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Step {
        Step(self.0 + n)
    }

    /// Steps elapsed from `earlier` to `self`.
    #[inline]
    pub fn since(self, earlier: Step) -> u64 {
        self.0 - earlier.0
    }
}

impl std::ops::Add<u64> for Step {
    type Output = Step;
    #[inline]
    fn add(self, rhs: u64) -> Step {
        Step(self.0 + rhs)
    }
}

impl std::ops::Sub for Step {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Step) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", self.0)
    }
}

// ── StepClock ────────────────────────────────────────────────────────────────

/// Converts between step counts and physical seconds.
///
/// `StepClock` is cheap to copy and intentionally holds no heap data.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepClock {
    /// Physical duration of one step, seconds.
    pub dt_secs: f64,
    /// The current step — advanced by `StepClock::advance()` each iteration.
    pub current_step: Step,
}

impl StepClock {
    pub fn new(dt_secs: f64) -> Self {
        Self { dt_secs, current_step: Step::ZERO }
    }

    /// Advance the clock by one step.
    #[inline]
    pub fn advance(&mut self) {
        self.current_step = Step(self.current_step.0 + 1);
    }

    /// Elapsed physical seconds since step 0.
    #[inline]
    pub fn elapsed_secs(&self) -> f64 {
        self.current_step.0 as f64 * self.dt_secs
    }
}

impl fmt::Display for StepClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (t = {:.6e} s)", self.current_step, self.elapsed_secs())
    }
}

// ── RunConfig ────────────────────────────────────────────────────────────────

/// Top-level run configuration.
///
/// Typically assembled by the application from its own configuration source
/// and passed to the simulation builder.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunConfig {
    /// Physical timestep, seconds.
    pub dt_secs: f64,

    /// Total steps to simulate.
    pub total_steps: u64,

    /// Master RNG seed.  The same seed and the same partition count always
    /// produce identical results; a different partition count changes the
    /// order collisions are drawn in and therefore the trajectory.
    pub seed: u64,

    /// Number of real molecules represented by one parcel of unit radial
    /// weight (the global statistical weight `W`).
    pub equivalent_particles: f64,

    /// Emit an `on_measurements` observer callback every N steps.
    /// 0 disables aggregate measurements.
    pub measure_interval_steps: u64,
}

impl RunConfig {
    /// The step at which the run ends (exclusive upper bound).
    #[inline]
    pub fn end_step(&self) -> Step {
        Step(self.total_steps)
    }

    /// Construct a `StepClock` pre-configured for this run.
    pub fn make_clock(&self) -> StepClock {
        StepClock::new(self.dt_secs)
    }
}
