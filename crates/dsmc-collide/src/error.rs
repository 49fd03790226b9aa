use thiserror::Error;

#[derive(Debug, Error)]
pub enum CollideError {
    #[error("no {kind} model registered under {name:?}")]
    UnknownModel { kind: &'static str, name: String },
}

pub type CollideResult<T> = Result<T, CollideError>;
