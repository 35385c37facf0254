//! Backend-level tests for the statevector simulator.

use qpe_adapter_sim::{SamplingMode, SimulatorBackend};
use qpe_hal::{Backend, HalError};
use qpe_ir::{Circuit, ClbitId, QubitId};
use std::f64::consts::PI;

/// Bell pair, with the CNOT written as H, CP(π), H on the target.
fn bell() -> Circuit {
    let mut circuit = Circuit::with_size("bell", 2, 2);
    circuit
        .h(QubitId(0))
        .unwrap()
        .h(QubitId(1))
        .unwrap()
        .cp(PI, QubitId(0), QubitId(1))
        .unwrap()
        .h(QubitId(1))
        .unwrap()
        .measure(QubitId(0), ClbitId(0))
        .unwrap()
        .measure(QubitId(1), ClbitId(1))
        .unwrap();
    circuit
}

// ---------------------------------------------------------------------------
// Counts
// ---------------------------------------------------------------------------

#[tokio::test]
async fn bell_state_only_correlated_outcomes() {
    let backend = SimulatorBackend::new().with_seed(1);
    let result = backend.run(&bell(), 1000).await.unwrap();

    assert_eq!(result.shots, 1000);
    let counts = &result.counts;
    assert_eq!(counts.get("00") + counts.get("11"), 1000);
    assert_eq!(counts.get("01") + counts.get("10"), 0);
    assert!(result.execution_time_ms.is_some());
}

#[tokio::test]
async fn clbit_zero_is_rightmost_character() {
    let mut circuit = Circuit::with_size("order", 3, 3);
    circuit.x(QubitId(0)).unwrap();
    circuit
        .measure_into(
            [QubitId(0), QubitId(1), QubitId(2)],
            [ClbitId(0), ClbitId(1), ClbitId(2)],
        )
        .unwrap();

    let backend = SimulatorBackend::new().with_seed(3);
    let result = backend.run(&circuit, 10).await.unwrap();
    assert_eq!(result.counts.get("001"), 10);
}

#[tokio::test]
async fn bitstring_width_follows_classical_register() {
    // Eigenstate qubit is not measured: bitstrings only cover the 2 clbits.
    let mut circuit = Circuit::with_size("narrow", 3, 2);
    circuit
        .x(QubitId(2))
        .unwrap()
        .x(QubitId(1))
        .unwrap()
        .measure_into([QubitId(0), QubitId(1)], [ClbitId(0), ClbitId(1)])
        .unwrap();

    let backend = SimulatorBackend::new().with_seed(5);
    let result = backend.run(&circuit, 64).await.unwrap();
    assert_eq!(result.counts.len(), 1);
    assert_eq!(result.counts.get("10"), 64);
}

#[tokio::test]
async fn seeded_runs_are_reproducible() {
    let a = SimulatorBackend::new().with_seed(42);
    let b = SimulatorBackend::new().with_seed(42);

    let ra = a.run(&bell(), 500).await.unwrap();
    let rb = b.run(&bell(), 500).await.unwrap();
    assert_eq!(ra.counts, rb.counts);
    assert_eq!(ra.counts.total_shots(), 500);
}

#[tokio::test]
async fn expected_mode_is_noise_free() {
    let backend = SimulatorBackend::new().with_sampling(SamplingMode::Expected);
    let result = backend.run(&bell(), 4096).await.unwrap();

    assert_eq!(result.counts.get("00"), 2048);
    assert_eq!(result.counts.get("11"), 2048);
    assert_eq!(result.counts.len(), 2);
}

#[tokio::test]
async fn probabilities_cover_register() {
    let backend = SimulatorBackend::new();
    let probs = backend.probabilities(&bell()).unwrap();

    assert_eq!(probs.len(), 2);
    assert_eq!(probs[0].0, "00");
    assert_eq!(probs[1].0, "11");
    for (_, p) in &probs {
        assert!((p - 0.5).abs() < 1e-12);
    }
}

// ---------------------------------------------------------------------------
// Rejections
// ---------------------------------------------------------------------------

#[tokio::test]
async fn too_many_qubits() {
    let backend = SimulatorBackend::with_max_qubits(5);
    let circuit = Circuit::with_size("test", 10, 0);

    let result = backend.run(&circuit, 100).await;
    assert!(matches!(result, Err(HalError::CircuitTooLarge(_))));

    let validation = backend.validate(&circuit, 100).await.unwrap();
    assert!(!validation.is_valid());
}

#[tokio::test]
async fn zero_shots_rejected() {
    let backend = SimulatorBackend::new();
    let result = backend.run(&bell(), 0).await;
    assert!(matches!(result, Err(HalError::InvalidShots(_))));
}

#[tokio::test]
async fn mid_circuit_measurement_rejected() {
    let mut circuit = Circuit::with_size("mid", 1, 1);
    circuit
        .measure(QubitId(0), ClbitId(0))
        .unwrap()
        .x(QubitId(0))
        .unwrap();

    let backend = SimulatorBackend::new();
    let result = backend.run(&circuit, 10).await;
    assert!(matches!(result, Err(HalError::Unsupported(_))));
}
