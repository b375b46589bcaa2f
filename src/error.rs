// Error types for the decision engine

use thiserror::Error;

/// Conditions under which a tick cannot be evaluated
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// No player in the snapshot carries our configured name
    #[error("no player named '{name}' in board snapshot")]
    MissingSelf { name: String },

    /// The snapshot is internally inconsistent
    #[error("invalid board snapshot: {reason}")]
    InvalidSnapshot { reason: String },
}
