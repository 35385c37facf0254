//! Backend trait.
//!
//! The [`Backend`] trait is the service boundary between circuit construction
//! and simulation: given a circuit and a shot count, produce a measurement
//! frequency table.
//!
//! ```text
//!   capabilities() ──→ validate() ──→ run()
//!    (sync, &ref)       (async)       (async)
//! ```
//!
//! | Method | Kind | Required | Returns |
//! |--------|------|----------|---------|
//! | `name()` | sync | yes | `&str` |
//! | `capabilities()` | sync | yes | `&Capabilities` |
//! | `validate()` | async | provided | `HalResult<ValidationResult>` |
//! | `run()` | async | yes | `HalResult<ExecutionResult>` |

use async_trait::async_trait;
use tracing::debug;

use qpe_ir::Circuit;

use crate::capability::Capabilities;
use crate::error::{HalError, HalResult};
use crate::result::ExecutionResult;

/// Trait for simulation backends.
///
/// # Contract
///
/// - `capabilities()` MUST be synchronous and infallible; capabilities are
///   cached at construction time.
/// - `run()` MUST return counts whose bitstrings are exactly
///   `circuit.num_clbits()` characters wide and whose total equals `shots`.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Get the name of this backend.
    fn name(&self) -> &str;

    /// Get the capabilities of this backend.
    fn capabilities(&self) -> &Capabilities;

    /// Check a circuit and shot count against the backend's capabilities.
    ///
    /// The default implementation checks qubit count, shot range, and gate
    /// support.
    async fn validate(&self, circuit: &Circuit, shots: u32) -> HalResult<ValidationResult> {
        let caps = self.capabilities();
        let mut reasons = vec![];

        if circuit.num_qubits() > caps.num_qubits as usize {
            reasons.push(format!(
                "circuit has {} qubits but {} supports {}",
                circuit.num_qubits(),
                self.name(),
                caps.num_qubits
            ));
        }
        if shots == 0 || shots > caps.max_shots {
            reasons.push(format!(
                "shots must be in 1..={}, got {shots}",
                caps.max_shots
            ));
        }
        for gate in circuit.instructions().iter().filter_map(|i| i.as_gate()) {
            if !caps.gate_set.contains(gate.name()) {
                reasons.push(format!("unsupported gate '{}'", gate.name()));
            }
        }

        debug!(backend = self.name(), issues = reasons.len(), "validated circuit");

        if reasons.is_empty() {
            Ok(ValidationResult::Valid)
        } else {
            Ok(ValidationResult::Invalid { reasons })
        }
    }

    /// Execute a circuit for `shots` trials and return its frequency table.
    async fn run(&self, circuit: &Circuit, shots: u32) -> HalResult<ExecutionResult>;
}

/// Result of circuit validation against backend constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// Circuit can be run as-is.
    Valid,
    /// Circuit cannot run on this backend.
    Invalid {
        /// Reasons the circuit is invalid.
        reasons: Vec<String>,
    },
}

impl ValidationResult {
    /// Check if the circuit is valid.
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    /// Convert into a `HalResult`, joining the reasons of an invalid circuit.
    pub fn into_result(self) -> HalResult<()> {
        match self {
            ValidationResult::Valid => Ok(()),
            ValidationResult::Invalid { reasons } => {
                Err(HalError::InvalidCircuit(reasons.join("; ")))
            }
        }
    }
}
