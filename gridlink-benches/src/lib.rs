//! Benchmark support crate for gridlink.
//!
//! Provides a seeded synthetic grid generator and parameter types used by
//! the Criterion benchmarks for spanning forest construction, routing and
//! outage simulation.

pub mod error;
pub mod params;
pub mod source;
