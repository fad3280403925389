use std::fmt::Display;

use gourd_core::InputError;
use gourd_solver::encoders::non_consecutive_sudoku::DecodeError;
use gourd_solver::encoders::non_consecutive_sudoku::PuzzleParseError;
use thiserror::Error;

use crate::parsers::dimacs::DimacsParseError;

pub(crate) type GourdResult<T> = Result<T, GourdError>;

#[derive(Error, Debug)]
pub(crate) enum GourdError {
    #[error("IO error, more details: {0}")]
    IOError(#[from] std::io::Error),
    #[error("The file {0} is not supported.")]
    InvalidInstanceFile(String),
    #[error("The dimacs file was invalid, more details: {0}")]
    InvalidDimacs(#[from] DimacsParseError),
    #[error("The puzzle was invalid, more details: {0}")]
    InvalidPuzzle(#[from] PuzzleParseError),
    #[error("The clauses could not be given to the solver, more details: {0}")]
    InvalidClause(#[from] InputError),
    #[error("The model could not be decoded, more details: {0}")]
    Decode(#[from] DecodeError),
    #[error("The solution is inconsistent with the instance.")]
    InconsistentSolution,
}

impl GourdError {
    pub(crate) fn invalid_instance(path: impl Display) -> Self {
        Self::InvalidInstanceFile(format!("{path}"))
    }
}
