//! Phase estimation circuit builder.
//!
//! The unitary is the single-qubit phase gate `P(2πφ)` with eigenstate `|1⟩`.
//! Counting qubit `i` controls `U^(2^i)`, which for a phase gate is one
//! controlled phase of angle `2πφ·2^i`.

use std::f64::consts::TAU;

use qpe_ir::{Circuit, ClbitId, QubitId};
use tracing::debug;

use crate::error::{AlgoError, AlgoResult};
use crate::extract::MAX_COUNT_QUBITS;
use crate::transform::{QftLayout, inverse_qft_with_layout};

/// Build the estimation circuit for `phase` with `n_count` counting qubits,
/// using the default transform layout.
///
/// Qubits `0..n_count` are the counting register, qubit `n_count` holds the
/// eigenstate. Counting qubit `i` is measured into classical bit `i`.
pub fn qpe_circuit(n_count: u32, phase: f64) -> AlgoResult<Circuit> {
    qpe_circuit_with_layout(n_count, phase, QftLayout::default())
}

/// Build the estimation circuit with the given transform layout.
///
/// `phase` is taken modulo 1. `n_count` must be in `1..=64`, the widest
/// register whose outcome can be read back as a phase.
pub fn qpe_circuit_with_layout(n_count: u32, phase: f64, layout: QftLayout) -> AlgoResult<Circuit> {
    if n_count == 0 || n_count > MAX_COUNT_QUBITS {
        return Err(AlgoError::InvalidQubitCount(n_count));
    }
    if !phase.is_finite() {
        return Err(AlgoError::InvalidPhase(phase));
    }
    let phase = phase.rem_euclid(1.0);
    let target = QubitId(n_count);

    let num_qubits = n_count
        .checked_add(1)
        .ok_or(AlgoError::InvalidQubitCount(n_count))?;
    let mut circuit = Circuit::with_size(format!("qpe{n_count}"), num_qubits, n_count);

    // Eigenstate preparation
    circuit.x(target)?;

    // Phase kickback onto the counting register
    for i in 0..n_count {
        let angle = TAU * phase * f64::from(i).exp2();
        circuit.h(QubitId(i))?.cp(angle, QubitId(i), target)?;
    }

    let iqft = inverse_qft_with_layout(n_count, layout)?;
    circuit.append(&iqft, (0..n_count).map(QubitId))?;

    circuit.measure_into((0..n_count).map(QubitId), (0..n_count).map(ClbitId))?;

    debug!(
        n_count,
        phase,
        %layout,
        ops = circuit.len(),
        depth = circuit.depth(),
        "built phase estimation circuit"
    );
    Ok(circuit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qpe_ir::StandardGate;

    #[test]
    fn test_register_sizes() {
        let circuit = qpe_circuit(3, 0.125).unwrap();
        assert_eq!(circuit.num_qubits(), 4);
        assert_eq!(circuit.num_clbits(), 3);
    }

    #[test]
    fn test_prefix_is_preparation_and_kickback() {
        let circuit = qpe_circuit(2, 0.25).unwrap();
        let ops = circuit.instructions();

        assert_eq!(ops[0].as_gate(), Some(&StandardGate::X));
        assert_eq!(ops[0].qubits, [QubitId(2)]);

        assert_eq!(ops[1].as_gate(), Some(&StandardGate::H));
        assert_eq!(ops[1].qubits, [QubitId(0)]);
        assert_eq!(ops[2].as_gate(), Some(&StandardGate::CP(TAU * 0.25)));
        assert_eq!(ops[2].qubits, [QubitId(0), QubitId(2)]);

        assert_eq!(ops[3].qubits, [QubitId(1)]);
        assert_eq!(ops[4].as_gate(), Some(&StandardGate::CP(TAU * 0.5)));
    }

    #[test]
    fn test_measurements_are_terminal_and_aligned() {
        let circuit = qpe_circuit(4, 0.3).unwrap();
        let measures: Vec<_> = circuit
            .instructions()
            .iter()
            .skip_while(|inst| !inst.is_measure())
            .collect();

        assert_eq!(measures.len(), 4);
        for (i, inst) in measures.iter().enumerate() {
            assert!(inst.is_measure());
            assert_eq!(inst.qubits[0].index(), i);
            assert_eq!(inst.clbits[0].index(), i);
        }
    }

    #[test]
    fn test_phase_reduced_modulo_one() {
        let wrapped = qpe_circuit(3, 1.125).unwrap();
        let plain = qpe_circuit(3, 0.125).unwrap();
        assert_eq!(wrapped, plain);

        let negative = qpe_circuit(3, -0.875).unwrap();
        assert_eq!(negative, plain);
    }

    #[test]
    fn test_invalid_arguments() {
        assert!(matches!(
            qpe_circuit(0, 0.125),
            Err(AlgoError::InvalidQubitCount(0))
        ));
        assert!(matches!(
            qpe_circuit(65, 0.125),
            Err(AlgoError::InvalidQubitCount(65))
        ));
        assert!(matches!(
            qpe_circuit(u32::MAX, 0.125),
            Err(AlgoError::InvalidQubitCount(u32::MAX))
        ));
        assert!(matches!(
            qpe_circuit(3, f64::NAN),
            Err(AlgoError::InvalidPhase(_))
        ));
        assert!(matches!(
            qpe_circuit(3, f64::INFINITY),
            Err(AlgoError::InvalidPhase(_))
        ));
    }
}
