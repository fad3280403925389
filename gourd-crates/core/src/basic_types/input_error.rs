use thiserror::Error;

/// A clause that cannot be given to the solver. Input is validated before search starts, so these
/// errors never surface once solving has begun.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InputError {
    #[error("clause {clause_index} contains the literal 0, which is reserved as a terminator")]
    ZeroLiteral { clause_index: usize },

    #[error(
        "clause {clause_index} contains literal {literal}, but only variables 1..={num_variables} exist"
    )]
    VariableOutOfRange {
        literal: i32,
        num_variables: usize,
        clause_index: usize,
    },
}
