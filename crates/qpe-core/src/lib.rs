//! `qpe-core`: quantum phase estimation and its scaling study.
//!
//! Builds phase estimation circuits for the phase gate `P(2πφ)`, turns the
//! measured frequency table into a phase estimate, and sweeps the counting
//! register size to show how the estimation error shrinks.
//!
//! - [`transform`]: Fourier transform and its inverse, in two qubit layouts
//! - [`estimation`]: the full estimation circuit
//! - [`extract`]: counts to phase, and the error against the true phase
//! - [`study`]: the sequential sweep over a [`qpe_hal::Backend`]
//!
//! # Quick start
//!
//! ```rust
//! use qpe_core::{estimate_phase, qpe_circuit};
//! use qpe_hal::Counts;
//!
//! let circuit = qpe_circuit(3, 0.125).unwrap();
//! assert_eq!(circuit.num_qubits(), 4);
//! assert_eq!(circuit.num_clbits(), 3);
//!
//! let counts: Counts = [("001", 4096)].into_iter().collect();
//! assert_eq!(estimate_phase(&counts, 3).unwrap(), 0.125);
//! ```

pub mod error;
pub mod estimation;
pub mod extract;
pub mod study;
pub mod transform;

pub use error::{AlgoError, AlgoResult};
pub use estimation::{qpe_circuit, qpe_circuit_with_layout};
pub use extract::{MAX_COUNT_QUBITS, estimate_phase, phase_error};
pub use study::{
    DEFAULT_QUBIT_RANGE, DEFAULT_SHOTS, DEFAULT_TRUE_PHASE, ErrorSeries, ScalingStudy, SweepPoint,
};
pub use transform::{QftLayout, inverse_qft, inverse_qft_with_layout, qft, qft_with_layout};
