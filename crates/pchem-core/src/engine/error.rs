use thiserror::Error;

use super::config::ConfigError;
use crate::core::error::EvaluationError;
use crate::core::io::FileLoadError;
use crate::core::kinetics::MechanismError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Evaluation failed: {source}")]
    Evaluation {
        #[from]
        source: EvaluationError,
    },

    #[error("Mechanism analysis failed: {source}")]
    Mechanism {
        #[from]
        source: MechanismError,
    },

    #[error(transparent)]
    FileLoad(#[from] FileLoadError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}
