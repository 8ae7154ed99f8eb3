//! Shared test utilities used across gridlink crates.
//!
//! The crate deliberately does not depend on `gridlink-core`: fixtures are
//! plain tuples and strings so both unit and integration tests can turn them
//! into core types without a dependency cycle.

pub mod csv;
pub mod scenario;
pub mod tracing;
