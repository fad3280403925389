use std::fmt::Display;

use crate::basic_types::Solution;
#[cfg(doc)]
use crate::termination::TerminationCondition;
#[cfg(doc)]
use crate::Solver;

/// The result of a call to [`Solver::satisfy`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SatisfactionResult {
    /// Indicates that a solution was found and provides the [`Solution`], which satisfies every
    /// clause given to the [`Solver`].
    Satisfiable(Solution),
    /// Indicates that there is no solution to the clauses.
    Unsatisfiable,
    /// Indicates that it is not known whether a solution exists. This is likely due to a
    /// [`TerminationCondition`] triggering.
    Unknown,
}

/// The status reported by [`crate::solve`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SolveStatus {
    /// Indicates that a model was found, which is given in [`SolveOutcome::model`].
    Sat,
    /// Indicates that no assignment satisfies the clauses.
    Unsat,
    /// Indicates that the search stopped before it was known whether a model exists.
    Unknown,
}

impl Display for SolveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolveStatus::Sat => write!(f, "SAT"),
            SolveStatus::Unsat => write!(f, "UNSAT"),
            SolveStatus::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// A [`SatisfactionResult`] flattened into a status and a DIMACS model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolveOutcome {
    pub status: SolveStatus,
    /// Holds exactly one literal per variable, `v` if variable `v` is true and `-v` otherwise.
    /// Only present when the status is [`SolveStatus::Sat`].
    pub model: Option<Vec<i32>>,
}

impl SolveOutcome {
    pub fn is_sat(&self) -> bool {
        self.status == SolveStatus::Sat
    }
}

impl From<SatisfactionResult> for SolveOutcome {
    fn from(result: SatisfactionResult) -> Self {
        match result {
            SatisfactionResult::Satisfiable(solution) => SolveOutcome {
                status: SolveStatus::Sat,
                model: Some(solution.as_dimacs_model()),
            },
            SatisfactionResult::Unsatisfiable => SolveOutcome {
                status: SolveStatus::Unsat,
                model: None,
            },
            SatisfactionResult::Unknown => SolveOutcome {
                status: SolveStatus::Unknown,
                model: None,
            },
        }
    }
}
