//! Kingdoms territory optimizer library.
//!
//! Exposes the board model, placement and verification, the search phases,
//! the solver session, and the text protocol for use by the binaries,
//! integration tests, and benches.

pub mod batch;
pub mod board;
pub mod engine;
pub mod eval;
pub mod protocol;
pub mod search;
pub mod testcase;
