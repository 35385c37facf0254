//! QPE Hardware Abstraction Layer
//!
//! The boundary between circuit construction and simulation. Anything that can
//! turn a [`qpe_ir::Circuit`] plus a shot count into a measurement frequency
//! table implements [`Backend`], so exact statevector, shot-sampling, or
//! hardware backends can be substituted without touching circuit builders.
//!
//! - [`Backend`]: capability interface (`capabilities`, `validate`, `run`)
//! - [`Capabilities`] / [`GateSet`]: what a backend accepts
//! - [`Counts`] / [`ExecutionResult`]: measurement outcomes
//!
//! # Implementing a Backend
//!
//! ```ignore
//! use qpe_hal::{Backend, Capabilities, ExecutionResult, HalResult};
//! use qpe_ir::Circuit;
//! use async_trait::async_trait;
//!
//! struct MyBackend {
//!     capabilities: Capabilities,
//! }
//!
//! #[async_trait]
//! impl Backend for MyBackend {
//!     fn name(&self) -> &str { "my_backend" }
//!
//!     fn capabilities(&self) -> &Capabilities {
//!         &self.capabilities
//!     }
//!
//!     async fn run(&self, circuit: &Circuit, shots: u32) -> HalResult<ExecutionResult> {
//!         # todo!()
//!     }
//! }
//! ```

pub mod backend;
pub mod capability;
pub mod error;
pub mod result;

pub use backend::{Backend, ValidationResult};
pub use capability::{Capabilities, GateSet};
pub use error::{HalError, HalResult};
pub use result::{Counts, ExecutionResult};
