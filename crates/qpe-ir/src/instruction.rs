//! Circuit instructions combining gates with operands.

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::StandardGate;
use crate::qubit::{ClbitId, QubitId};

/// The kind of instruction in a circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InstructionKind {
    /// A quantum gate operation.
    Gate(StandardGate),
    /// Measurement of each qubit into the classical bit at the same position.
    Measure,
}

/// A complete instruction with operands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    /// The kind of instruction.
    pub kind: InstructionKind,
    /// Qubits this instruction operates on.
    pub qubits: Vec<QubitId>,
    /// Classical bits this instruction operates on (for measure).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub clbits: Vec<ClbitId>,
}

impl Instruction {
    /// Create a gate instruction.
    pub fn gate(gate: StandardGate, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: InstructionKind::Gate(gate),
            qubits: qubits.into_iter().collect(),
            clbits: vec![],
        }
    }

    /// Create a single-qubit gate instruction.
    pub fn single_qubit_gate(gate: StandardGate, qubit: QubitId) -> Self {
        Self::gate(gate, [qubit])
    }

    /// Create a two-qubit gate instruction.
    pub fn two_qubit_gate(gate: StandardGate, q1: QubitId, q2: QubitId) -> Self {
        Self::gate(gate, [q1, q2])
    }

    /// Create a measurement instruction.
    pub fn measure(qubit: QubitId, clbit: ClbitId) -> Self {
        Self {
            kind: InstructionKind::Measure,
            qubits: vec![qubit],
            clbits: vec![clbit],
        }
    }

    /// Check if this is a measurement.
    pub fn is_measure(&self) -> bool {
        matches!(self.kind, InstructionKind::Measure)
    }

    /// Get the gate if this is a gate instruction.
    pub fn as_gate(&self) -> Option<&StandardGate> {
        match &self.kind {
            InstructionKind::Gate(g) => Some(g),
            InstructionKind::Measure => None,
        }
    }

    /// Get the name of the instruction.
    pub fn name(&self) -> &str {
        match &self.kind {
            InstructionKind::Gate(g) => g.name(),
            InstructionKind::Measure => "measure",
        }
    }

    /// The adjoint instruction: same operands, inverted gate.
    ///
    /// Fails for measurements.
    pub fn inverse(&self) -> IrResult<Self> {
        match &self.kind {
            InstructionKind::Gate(g) => Ok(Self {
                kind: InstructionKind::Gate(g.inverse()),
                qubits: self.qubits.clone(),
                clbits: vec![],
            }),
            InstructionKind::Measure => Err(IrError::NonUnitary(self.name().to_string())),
        }
    }

    /// Relabel qubit operands through `map`, where `map[i]` is the new id of qubit `i`.
    ///
    /// Fails if an operand has no entry in `map`.
    pub fn remap_qubits(&self, map: &[QubitId]) -> IrResult<Self> {
        let qubits = self
            .qubits
            .iter()
            .map(|q| {
                map.get(q.index()).copied().ok_or(IrError::QubitNotFound {
                    qubit: *q,
                    gate_name: Some(self.name().to_string()),
                })
            })
            .collect::<IrResult<Vec<_>>>()?;
        Ok(Self {
            kind: self.kind.clone(),
            qubits,
            clbits: self.clbits.clone(),
        })
    }
}

impl std::fmt::Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            InstructionKind::Gate(g) => write!(f, "{g}")?,
            InstructionKind::Measure => write!(f, "measure")?,
        }
        for (i, q) in self.qubits.iter().enumerate() {
            let sep = if i == 0 { " " } else { ", " };
            write!(f, "{sep}{q}")?;
        }
        for c in &self.clbits {
            write!(f, " -> {c}")?;
        }
        Ok(())
    }
}
