//! Backend capability introspection.

use serde::{Deserialize, Serialize};

/// Capabilities of a simulation backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Capabilities {
    /// Name of the backend.
    pub name: String,
    /// Number of qubits available.
    pub num_qubits: u32,
    /// Supported gate set.
    pub gate_set: GateSet,
    /// Maximum number of shots per run.
    pub max_shots: u32,
    /// Whether this is a simulator (`true`) vs real hardware (`false`).
    pub is_simulator: bool,
}

impl Capabilities {
    /// Create capabilities for a statevector simulator.
    pub fn simulator(num_qubits: u32) -> Self {
        Self {
            name: "simulator".into(),
            num_qubits,
            gate_set: GateSet::standard(),
            max_shots: 1_000_000,
            is_simulator: true,
        }
    }
}

/// Set of gates a backend can execute, by IR gate name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateSet {
    /// Single-qubit gates supported.
    pub single_qubit: Vec<String>,
    /// Two-qubit gates supported.
    pub two_qubit: Vec<String>,
}

impl GateSet {
    /// Every gate the IR can express.
    pub fn standard() -> Self {
        Self {
            single_qubit: ["x", "h"].map(String::from).to_vec(),
            two_qubit: ["cp", "swap"].map(String::from).to_vec(),
        }
    }

    /// Check whether `name` is supported.
    pub fn contains(&self, name: &str) -> bool {
        self.single_qubit
            .iter()
            .chain(&self.two_qubit)
            .any(|g| g == name)
    }
}
