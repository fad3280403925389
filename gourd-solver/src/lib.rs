//! Front ends of the gourd SAT solver.
//!
//! The CDCL engine lives in [`gourd_core`]; this crate adds the encoders which turn puzzles into
//! clauses and back, and the `gourd-solver` binary which reads DIMACS instances and puzzles.
pub mod encoders;

pub use gourd_core;
