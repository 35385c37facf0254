//! QPE Local Statevector Simulator
//!
//! This crate provides the local simulation collaborator for the QPE scaling
//! study. It evolves a full statevector, so results are exact up to sampling,
//! but memory grows as `2^n`: keep circuits to ~20 qubits.
//!
//! # Features
//!
//! - **Exact Evolution**: full statevector over every gate in `qpe-ir`
//! - **Terminal Measurement**: counts over the classical register only
//! - **Seedable Sampling**: reproducible shot noise via [`SimulatorBackend::with_seed`]
//! - **Expected Counts**: [`SamplingMode::Expected`] removes sampling noise
//!
//! # Performance
//!
//! | Qubits | Memory | Simulation Speed |
//! |--------|--------|------------------|
//! | 8 | ~4 KB | Instant |
//! | 15 | ~512 KB | Fast |
//! | 20 | ~16 MB | Moderate |
//!
//! # Example
//!
//! ```ignore
//! use qpe_adapter_sim::SimulatorBackend;
//! use qpe_hal::Backend;
//! use qpe_ir::{Circuit, ClbitId, QubitId};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let backend = SimulatorBackend::new().with_seed(7);
//!
//!     let mut circuit = Circuit::with_size("coin", 1, 1);
//!     circuit.h(QubitId(0))?.measure(QubitId(0), ClbitId(0))?;
//!
//!     let result = backend.run(&circuit, 1000).await?;
//!     // Expect ~50% "0" and ~50% "1"
//!     println!("Results: {:?}", result.counts);
//!     Ok(())
//! }
//! ```

mod simulator;
mod statevector;

pub use simulator::{SamplingMode, SimulatorBackend};
pub use statevector::Statevector;
