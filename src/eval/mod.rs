//! Solution evaluation.
//!
//! Greedy piece placement and owner scoring for region maps, plus an
//! independent verifier for encoded solutions.

pub mod placement;
pub mod verify;

pub use placement::{best_piece, can_place, place_all, Placement};
pub use verify::{verify, Verdict, VerifyError};
