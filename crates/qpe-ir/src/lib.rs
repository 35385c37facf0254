//! QPE Circuit Intermediate Representation
//!
//! This crate provides the circuit data structures used throughout the
//! workspace: an ordered list of validated instructions over a fixed qubit and
//! classical-bit register.
//!
//! # Core Components
//!
//! - **Qubits and Classical Bits**: [`QubitId`], [`ClbitId`]
//! - **Gates**: [`StandardGate`] with concrete angles
//! - **Instructions**: [`Instruction`] combining gates with their operands
//! - **Circuit**: [`Circuit`] builder with inversion and sub-register composition
//!
//! # Example: Inverting a Fragment
//!
//! ```rust
//! use qpe_ir::{Circuit, QubitId};
//! use std::f64::consts::PI;
//!
//! let mut fragment = Circuit::with_size("fragment", 2, 0);
//! fragment.h(QubitId(0)).unwrap();
//! fragment.cp(PI / 2.0, QubitId(1), QubitId(0)).unwrap();
//!
//! let adjoint = fragment.inverse().unwrap();
//! assert_eq!(adjoint.name(), "fragment_dg");
//! assert_eq!(adjoint.inverse().unwrap(), fragment);
//!
//! // Place the adjoint on qubits 1 and 2 of a larger register
//! let mut circuit = Circuit::with_size("outer", 3, 0);
//! circuit.append(&adjoint, [QubitId(1), QubitId(2)]).unwrap();
//! assert_eq!(circuit.len(), 2);
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `X` | 1 | Pauli-X, eigenstate preparation |
//! | `H` | 1 | Hadamard gate |
//! | `CP` | 2 | Controlled phase |
//! | `Swap` | 2 | SWAP gate |

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::StandardGate;
pub use instruction::{Instruction, InstructionKind};
pub use qubit::{ClbitId, QubitId};
