//! Text protocol.
//!
//! Parsing of problem instances from stdin and encoding of solutions in the
//! two-panel wire format.

pub mod parser;
pub mod writer;

pub use parser::{parse_problem, InputError, Problem, MAX_OWNERS};
pub use writer::{encode_panels, encode_problem, write_panels};
