//! Error types for the core crate.

use thiserror::Error;

/// Errors produced while building, running or post-processing a phase
/// estimation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AlgoError {
    /// A transform or estimation register needs at least one qubit.
    #[error("Number of qubits must be at least 1, got {0}")]
    InvalidQubitCount(u32),

    /// The phase is NaN or infinite.
    #[error("Phase must be a finite number, got {0}")]
    InvalidPhase(f64),

    /// The frequency table has no entries.
    #[error("Measurement counts are empty; nothing to estimate from")]
    EmptyCounts,

    /// A bitstring does not match the counting register.
    #[error("Invalid bitstring '{bitstring}': expected {expected} binary digits")]
    InvalidBitstring {
        /// The offending key of the frequency table.
        bitstring: String,
        /// Width of the counting register.
        expected: u32,
    },

    /// Circuit builder returned an error.
    #[error("Circuit IR error: {0}")]
    Ir(#[from] qpe_ir::IrError),

    /// The backend rejected or failed the run.
    #[error("Backend error: {0}")]
    Hal(#[from] qpe_hal::HalError),
}

/// Result type for phase estimation operations.
pub type AlgoResult<T> = Result<T, AlgoError>;
