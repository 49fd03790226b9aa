//! Interval-driven balance checks and the repartition decision.

use crate::{BalanceError, BalanceResult, Partitioner};

/// When and how aggressively to rebalance.
#[derive(Clone, Copy, Debug)]
pub struct BalanceConfig {
    /// Steps between balance checks; 0 disables checking entirely.
    pub interval_steps: u64,
    /// Max/mean parcel-count ratio above which a repartition triggers.
    pub imbalance_threshold: f64,
}

impl Default for BalanceConfig {
    fn default() -> Self {
        Self { interval_steps: 100, imbalance_threshold: 1.25 }
    }
}

/// Outcome of one balance check.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum BalanceOutcome {
    /// Not due this step; nothing was gathered.
    NotDue,
    /// Counts gathered, imbalance under threshold.
    Balanced { imbalance: f64 },
    /// The mesh was repartitioned.  Cell IDs are stale: the caller must
    /// rebuild its occupancy index from scratch before the next collision
    /// phase.
    Repartitioned { imbalance: f64 },
}

/// Tracks the check interval and drives the repartition protocol.
pub struct LoadBalancer {
    config: BalanceConfig,
    steps_since_check: u64,
}

impl LoadBalancer {
    pub fn new(config: BalanceConfig) -> Self {
        Self { config, steps_since_check: 0 }
    }

    /// Max/mean ratio of the per-partition parcel counts.  An empty run
    /// (zero parcels everywhere) counts as perfectly balanced.
    pub fn imbalance(counts: &[usize]) -> f64 {
        let total: usize = counts.iter().sum();
        if counts.is_empty() || total == 0 {
            return 1.0;
        }
        let mean = total as f64 / counts.len() as f64;
        let max = counts.iter().copied().max().unwrap_or(0) as f64;
        max / mean
    }

    /// Advance the step counter and, when the interval elapses (or `forced`),
    /// run the gather/decide/repartition protocol through `partitioner`.
    ///
    /// Inconsistent global state (wrong gather width) is fatal and aborts the
    /// check with an error rather than risking a partial repartition.
    pub fn step<P: Partitioner>(
        &mut self,
        partitioner: &mut P,
        local_count: usize,
        forced: bool,
    ) -> BalanceResult<BalanceOutcome> {
        self.steps_since_check += 1;
        let due = self.config.interval_steps > 0
            && self.steps_since_check >= self.config.interval_steps;
        if !due && !forced {
            return Ok(BalanceOutcome::NotDue);
        }
        self.steps_since_check = 0;

        let counts = partitioner.gather_counts(local_count)?;
        if counts.len() != partitioner.partition_count() {
            return Err(BalanceError::CountMismatch {
                expected: partitioner.partition_count(),
                got:      counts.len(),
            });
        }

        let imbalance = Self::imbalance(&counts);
        if imbalance > self.config.imbalance_threshold || forced {
            partitioner.repartition(&counts)?;
            Ok(BalanceOutcome::Repartitioned { imbalance })
        } else {
            Ok(BalanceOutcome::Balanced { imbalance })
        }
    }
}
