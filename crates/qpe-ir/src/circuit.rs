//! High-level circuit builder API.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::StandardGate;
use crate::instruction::{Instruction, InstructionKind};
use crate::qubit::{ClbitId, QubitId};

/// Suffix appended to the name of an inverted circuit.
const INVERSE_SUFFIX: &str = "_dg";

/// A quantum circuit: an ordered sequence of instructions over a fixed
/// number of qubits and classical bits.
///
/// Every instruction is validated when appended, so an operand index is
/// always below [`num_qubits`](Self::num_qubits) /
/// [`num_clbits`](Self::num_clbits).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCircuit")]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Number of qubits.
    num_qubits: u32,
    /// Number of classical bits.
    num_clbits: u32,
    /// Instructions in application order.
    instructions: Vec<Instruction>,
}

/// Wire form of [`Circuit`], validated on conversion.
#[derive(Deserialize)]
struct RawCircuit {
    name: String,
    num_qubits: u32,
    num_clbits: u32,
    instructions: Vec<Instruction>,
}

impl TryFrom<RawCircuit> for Circuit {
    type Error = IrError;

    fn try_from(raw: RawCircuit) -> IrResult<Self> {
        let mut circuit = Self::with_size(raw.name, raw.num_qubits, raw.num_clbits);
        for inst in raw.instructions {
            circuit.apply(inst)?;
        }
        Ok(circuit)
    }
}

impl Circuit {
    /// Create a new empty circuit with no qubits.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_size(name, 0, 0)
    }

    /// Create a circuit with a given number of qubits and classical bits.
    pub fn with_size(name: impl Into<String>, num_qubits: u32, num_clbits: u32) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            num_clbits,
            instructions: vec![],
        }
    }

    /// Validate and append an instruction.
    pub fn apply(&mut self, instruction: Instruction) -> IrResult<&mut Self> {
        self.check(&instruction)?;
        self.instructions.push(instruction);
        Ok(self)
    }

    fn check(&self, instruction: &Instruction) -> IrResult<()> {
        let gate_name = || Some(instruction.name().to_string());

        match &instruction.kind {
            InstructionKind::Gate(gate) => {
                let got = instruction.qubits.len() as u32;
                if got != gate.num_qubits() {
                    return Err(IrError::QubitCountMismatch {
                        gate_name: gate.name().to_string(),
                        expected: gate.num_qubits(),
                        got,
                    });
                }
                if gate.is_controlled() && instruction.qubits[0] == instruction.qubits[1] {
                    return Err(IrError::DuplicateQubit {
                        qubit: instruction.qubits[0],
                        gate_name: gate_name(),
                    });
                }
            }
            InstructionKind::Measure => {
                if instruction.qubits.len() != instruction.clbits.len() {
                    return Err(IrError::QubitCountMismatch {
                        gate_name: "measure".into(),
                        expected: instruction.clbits.len() as u32,
                        got: instruction.qubits.len() as u32,
                    });
                }
            }
        }

        if let Some(&qubit) = instruction.qubits.iter().find(|q| q.0 >= self.num_qubits) {
            return Err(IrError::QubitNotFound {
                qubit,
                gate_name: gate_name(),
            });
        }
        if let Some(&clbit) = instruction.clbits.iter().find(|c| c.0 >= self.num_clbits) {
            return Err(IrError::ClbitNotFound {
                clbit,
                gate_name: gate_name(),
            });
        }
        Ok(())
    }

    fn gate1(&mut self, gate: StandardGate, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(gate, qubit))
    }

    fn gate2(&mut self, gate: StandardGate, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(gate, q1, q2))
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate1(StandardGate::H, qubit)
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate1(StandardGate::X, qubit)
    }

    // =========================================================================
    // Two-qubit gates
    // =========================================================================

    /// Apply controlled-phase gate.
    pub fn cp(&mut self, theta: f64, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.gate2(StandardGate::CP(theta), control, target)
    }

    /// Apply SWAP gate. `swap(q, q)` is accepted and acts as identity.
    pub fn swap(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.gate2(StandardGate::Swap, q1, q2)
    }

    // =========================================================================
    // Other operations
    // =========================================================================

    /// Measure a qubit to a classical bit.
    pub fn measure(&mut self, qubit: QubitId, clbit: ClbitId) -> IrResult<&mut Self> {
        self.apply(Instruction::measure(qubit, clbit))
    }

    /// Measure each qubit into the classical bit at the same position.
    pub fn measure_into(
        &mut self,
        qubits: impl IntoIterator<Item = QubitId>,
        clbits: impl IntoIterator<Item = ClbitId>,
    ) -> IrResult<&mut Self> {
        let qubits: Vec<_> = qubits.into_iter().collect();
        let clbits: Vec<_> = clbits.into_iter().collect();
        if qubits.len() != clbits.len() {
            return Err(IrError::QubitCountMismatch {
                gate_name: "measure".into(),
                expected: clbits.len() as u32,
                got: qubits.len() as u32,
            });
        }
        for (q, c) in qubits.into_iter().zip(clbits) {
            self.measure(q, c)?;
        }
        Ok(self)
    }

    /// Append every instruction of `other`, with qubit `i` of `other` placed
    /// on the `i`-th entry of `qubits`.
    ///
    /// Classical operands keep their indices.
    pub fn append(
        &mut self,
        other: &Circuit,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        let map: Vec<QubitId> = qubits.into_iter().collect();
        if map.len() != other.num_qubits as usize {
            return Err(IrError::QubitCountMismatch {
                gate_name: other.name.clone(),
                expected: other.num_qubits,
                got: map.len() as u32,
            });
        }
        for inst in &other.instructions {
            self.apply(inst.remap_qubits(&map)?)?;
        }
        Ok(self)
    }

    /// The adjoint circuit: instructions in reverse order, each inverted.
    ///
    /// Fails if the circuit contains a measurement.
    pub fn inverse(&self) -> IrResult<Circuit> {
        let instructions = self
            .instructions
            .iter()
            .rev()
            .map(Instruction::inverse)
            .collect::<IrResult<Vec<_>>>()?;

        let name = match self.name.strip_suffix(INVERSE_SUFFIX) {
            Some(base) => base.to_string(),
            None => format!("{}{INVERSE_SUFFIX}", self.name),
        };

        Ok(Self {
            name,
            num_qubits: self.num_qubits,
            num_clbits: self.num_clbits,
            instructions,
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits as usize
    }

    /// Get the number of classical bits.
    pub fn num_clbits(&self) -> usize {
        self.num_clbits as usize
    }

    /// Instructions in application order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Number of instructions.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Whether the circuit has no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Get the circuit depth: the longest chain of instructions sharing a
    /// qubit or classical bit.
    pub fn depth(&self) -> usize {
        let mut qubit_level = vec![0usize; self.num_qubits()];
        let mut clbit_level = vec![0usize; self.num_clbits()];
        let mut depth = 0;

        for inst in &self.instructions {
            let level = inst
                .qubits
                .iter()
                .map(|q| qubit_level[q.index()])
                .chain(inst.clbits.iter().map(|c| clbit_level[c.index()]))
                .max()
                .unwrap_or(0)
                + 1;
            for q in &inst.qubits {
                qubit_level[q.index()] = level;
            }
            for c in &inst.clbits {
                clbit_level[c.index()] = level;
            }
            depth = depth.max(level);
        }
        depth
    }

    /// Count instructions by name.
    pub fn count_ops(&self) -> FxHashMap<&str, usize> {
        let mut counts = FxHashMap::default();
        for inst in &self.instructions {
            *counts.entry(inst.name()).or_insert(0) += 1;
        }
        counts
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> IrResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize from JSON, re-validating every instruction.
    pub fn from_json(json: &str) -> IrResult<Self> {
        let raw: RawCircuit = serde_json::from_str(json)?;
        Self::try_from(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_new_circuit() {
        let circuit = Circuit::new("test");
        assert_eq!(circuit.name(), "test");
        assert_eq!(circuit.num_qubits(), 0);
        assert_eq!(circuit.num_clbits(), 0);
        assert!(circuit.is_empty());
    }

    #[test]
    fn test_circuit_with_size() {
        let circuit = Circuit::with_size("test", 3, 2);
        assert_eq!(circuit.num_qubits(), 3);
        assert_eq!(circuit.num_clbits(), 2);
    }

    #[test]
    fn test_fluent_api() {
        let mut circuit = Circuit::with_size("test", 2, 2);
        circuit
            .h(QubitId(0))
            .unwrap()
            .cp(PI, QubitId(0), QubitId(1))
            .unwrap()
            .measure(QubitId(0), ClbitId(0))
            .unwrap()
            .measure(QubitId(1), ClbitId(1))
            .unwrap();

        assert_eq!(circuit.len(), 4);
        assert_eq!(circuit.depth(), 3); // H, CP, parallel measures
    }

    #[test]
    fn test_qubit_out_of_range() {
        let mut circuit = Circuit::with_size("test", 2, 1);
        let err = circuit.cp(PI, QubitId(0), QubitId(2)).unwrap_err();
        assert!(matches!(
            err,
            IrError::QubitNotFound {
                qubit: QubitId(2),
                ..
            }
        ));
        assert!(circuit.is_empty());

        let err = circuit.measure(QubitId(0), ClbitId(1)).unwrap_err();
        assert!(matches!(err, IrError::ClbitNotFound { .. }));
    }

    #[test]
    fn test_controlled_gate_rejects_same_operand() {
        let mut circuit = Circuit::with_size("test", 2, 0);
        let err = circuit.cp(PI, QubitId(1), QubitId(1)).unwrap_err();
        assert!(matches!(err, IrError::DuplicateQubit { .. }));
    }

    #[test]
    fn test_self_swap_allowed() {
        let mut circuit = Circuit::with_size("test", 1, 0);
        circuit.swap(QubitId(0), QubitId(0)).unwrap();
        assert_eq!(circuit.len(), 1);
    }

    #[test]
    fn test_wrong_arity() {
        let mut circuit = Circuit::with_size("test", 2, 0);
        let err = circuit
            .apply(Instruction::gate(StandardGate::H, [QubitId(0), QubitId(1)]))
            .unwrap_err();
        assert!(matches!(
            err,
            IrError::QubitCountMismatch {
                expected: 1,
                got: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_inverse_reverses_and_negates() {
        let mut circuit = Circuit::with_size("ops", 2, 0);
        circuit
            .h(QubitId(0))
            .unwrap()
            .cp(PI / 2.0, QubitId(1), QubitId(0))
            .unwrap()
            .swap(QubitId(0), QubitId(1))
            .unwrap();

        let inv = circuit.inverse().unwrap();
        assert_eq!(inv.name(), "ops_dg");
        let names: Vec<_> = inv.instructions().iter().map(Instruction::name).collect();
        assert_eq!(names, vec!["swap", "cp", "h"]);
        assert_eq!(
            inv.instructions()[1].as_gate(),
            Some(&StandardGate::CP(-PI / 2.0))
        );

        assert_eq!(inv.inverse().unwrap(), circuit);
    }

    #[test]
    fn test_inverse_rejects_measure() {
        let mut circuit = Circuit::with_size("m", 1, 1);
        circuit.measure(QubitId(0), ClbitId(0)).unwrap();
        assert!(matches!(circuit.inverse(), Err(IrError::NonUnitary(_))));
    }

    #[test]
    fn test_append_on_subregister() {
        let mut sub = Circuit::with_size("sub", 2, 0);
        sub.h(QubitId(0)).unwrap().cp(1.0, QubitId(1), QubitId(0)).unwrap();

        let mut circuit = Circuit::with_size("outer", 4, 0);
        circuit.append(&sub, [QubitId(2), QubitId(3)]).unwrap();

        assert_eq!(circuit.instructions()[0].qubits, vec![QubitId(2)]);
        assert_eq!(
            circuit.instructions()[1].qubits,
            vec![QubitId(3), QubitId(2)]
        );

        let err = circuit.append(&sub, [QubitId(0)]).unwrap_err();
        assert!(matches!(err, IrError::QubitCountMismatch { .. }));
    }

    #[test]
    fn test_measure_into() {
        let mut circuit = Circuit::with_size("m", 3, 2);
        circuit
            .measure_into([QubitId(0), QubitId(1)], [ClbitId(0), ClbitId(1)])
            .unwrap();
        assert_eq!(circuit.count_ops().get("measure"), Some(&2));

        assert!(
            circuit
                .measure_into([QubitId(0), QubitId(1)], [ClbitId(0)])
                .is_err()
        );
    }

    #[test]
    fn test_json_roundtrip_revalidates() {
        let mut circuit = Circuit::with_size("json", 2, 1);
        circuit
            .h(QubitId(0))
            .unwrap()
            .cp(0.5, QubitId(0), QubitId(1))
            .unwrap()
            .measure(QubitId(0), ClbitId(0))
            .unwrap();

        let json = circuit.to_json().unwrap();
        assert_eq!(Circuit::from_json(&json).unwrap(), circuit);

        let bad = json.replace("\"num_qubits\": 2", "\"num_qubits\": 1");
        assert!(matches!(
            Circuit::from_json(&bad),
            Err(IrError::QubitNotFound { .. })
        ));
    }

    #[test]
    fn test_serde_deserialize_validates_operands() {
        let json = r#"{
            "name": "bad",
            "num_qubits": 1,
            "num_clbits": 1,
            "instructions": [
                { "kind": { "Gate": "H" }, "qubits": [5] }
            ]
        }"#;
        let err = serde_json::from_str::<Circuit>(json).unwrap_err();
        assert!(err.to_string().contains("not found"), "{err}");

        let ok = json.replace("[5]", "[0]");
        let circuit: Circuit = serde_json::from_str(&ok).unwrap();
        assert_eq!(circuit.len(), 1);
    }
}
