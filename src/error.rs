//! src/error.rs
//!
//! Fouttypes voor de RIS-kern en de loader. Validatiefouten worden vóór het
//! samplen opgeworpen, zodat er nooit een gedeeltelijke collectie ontstaat.

use thiserror::Error;

/// Alle fouten die de crate kan teruggeven.
#[derive(Debug, Error)]
pub enum RisError {
    /// De graaf heeft geen edge property map met de opgegeven naam.
    #[error("graph must have an edge property map named '{0}' for probabilities")]
    MissingProbability(String),

    /// De property map bestaat, maar is niet van een floating-point soort.
    #[error("edge property '{name}' must be a float type, but got {found}")]
    WrongPropertyKind { name: String, found: &'static str },

    /// Een kans ligt buiten [0, 1] of is NaN.
    #[error("edge {edge} has probability {value}, expected a value in [0, 1]")]
    ProbabilityOutOfRange { edge: usize, value: f64 },

    /// Het aantal waarden in een property map komt niet overeen met het aantal kanten.
    #[error("edge property '{name}' has {len} values for {edges} edges")]
    PropertyLength { name: String, len: usize, edges: usize },

    /// Een regel in een edge-list kon niet worden geparset (1-gebaseerd regelnummer).
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RisError>;
