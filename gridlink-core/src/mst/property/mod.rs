//! Property-based tests for the Kruskal spanning forest.
//!
//! Compares Kruskal against a brute-force oracle that enumerates every
//! subset of candidate links on small graphs, and checks the structural
//! invariants of the returned forest.

mod oracle;
mod strategies;
