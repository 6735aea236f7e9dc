//! Bookkeeping for proposed reaction mechanisms: summing elementary steps,
//! spotting intermediates, and deriving the rate law a mechanism predicts.

pub mod mechanism;
pub mod rate_law;
pub mod reaction;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MechanismError {
    #[error("Cannot parse reaction '{input}': {reason}")]
    Parse { input: String, reason: String },

    #[error("Unknown step treatment '{0}'. Expected 'slow', 'rapid-equilibrium' or 'steady-state'.")]
    UnknownTreatment(String),

    #[error("Step '{label}' has molecularity {count}; no elementary step beyond termolecular is known")]
    Molecularity { label: String, count: u32 },

    #[error("Intermediate '{species}' cannot be eliminated: {reason}")]
    UnresolvedIntermediate { species: String, reason: String },

    #[error("A mechanism needs at least one elementary step")]
    NoSteps,
}
