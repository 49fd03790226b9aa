use thiserror::Error;

use dsmc_core::{CellId, ParcelId};

#[derive(Debug, Error)]
pub enum CloudError {
    #[error("cell {0} is out of range for the current mesh epoch")]
    CellOutOfRange(CellId),

    #[error("parcel {0} is not live in the store")]
    ParcelNotLive(ParcelId),

    #[error("parcel {0} missing from its recorded cell's occupancy list")]
    ParcelNotIndexed(ParcelId),

    #[error("checkpoint has {got} cells but the index has {expected}")]
    CheckpointMismatch { expected: usize, got: usize },
}

pub type CloudResult<T> = Result<T, CloudError>;
