//! Encoders which translate a problem into clauses over DIMACS variables, and translate a model of
//! those clauses back into a solution of the problem.
pub mod non_consecutive_sudoku;
