//! Error types for the training core

use thiserror::Error;

/// Errors raised by the agent, the predictor and the display collaborators
///
/// Game outcomes (collisions, stalls) are not errors; they are reported
/// through `StepResult`.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration rejected at construction time
    #[error("Configuration error: {0}")]
    InvalidConfig(String),

    /// Predictor produced non-finite values
    #[error("Predictor diverged: {0}")]
    Diverged(String),

    /// Tensor data could not be converted
    #[error("Tensor error: {0}")]
    Tensor(String),

    /// Terminal drawing or event polling failed
    #[error("Display error: {0}")]
    Display(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
