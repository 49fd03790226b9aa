use thiserror::Error;

use dsmc_balance::BalanceError;
use dsmc_collide::CollideError;
use dsmc_species::SpeciesError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("species configuration error: {0}")]
    Species(#[from] SpeciesError),

    #[error("collision model resolution failed: {0}")]
    Collide(#[from] CollideError),

    #[error("load balancing failed: {0}")]
    Balance(#[from] BalanceError),
}

pub type SimResult<T> = Result<T, SimError>;
