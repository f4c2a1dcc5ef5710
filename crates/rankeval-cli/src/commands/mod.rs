//! CLI command implementations.

pub mod eval;
pub mod init;
pub mod metrics;
