//! CLI command implementations.

pub mod circuit;
pub mod common;
pub mod estimate;
pub mod sweep;
pub mod version;
