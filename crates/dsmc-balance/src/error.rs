use thiserror::Error;

use dsmc_core::PartitionId;

/// Load-balancing failures are fatal: a partial repartition would leave the
/// occupancy invariant corrupted across workers, so the run must abort.
#[derive(Debug, Error)]
pub enum BalanceError {
    #[error("partition count disagreement: expected {expected} counts, gathered {got}")]
    CountMismatch { expected: usize, got: usize },

    #[error("partition {0} reported inconsistent global state: {1}")]
    InconsistentState(PartitionId, String),

    #[error("repartition failed: {0}")]
    RepartitionFailed(String),
}

pub type BalanceResult<T> = Result<T, BalanceError>;
