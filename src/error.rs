use crate::model::MoveToken;
use thiserror::Error;

/// Failures while reading or writing move notation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotationError {
    #[error("Invalid move: {0}")]
    InvalidMove(String),

    #[error("Unknown rotation: {0}")]
    UnknownRotation(String),

    #[error("Unknown rotation value: {0:?}")]
    UnknownToken(MoveToken),
}

/// Outcome of a single queued move, as seen by whoever enqueued it.
#[derive(Error, Debug)]
pub enum MoveError {
    #[error(transparent)]
    Failed(#[from] anyhow::Error),

    #[error("move was discarded before it started")]
    Discarded,
}
