use std::fs::File;
use std::path::Path;

use gourd_core::results::Solution;
use gourd_solver::encoders::non_consecutive_sudoku::Grid;
use gourd_solver::encoders::non_consecutive_sudoku::Puzzle;

use crate::parsers::dimacs::parse_cnf;
use crate::parsers::dimacs::DimacsFormula;
use crate::result::GourdError;
use crate::result::GourdResult;

/// Re-reads the instance and checks that `solution` assigns every variable declared in its header
/// and satisfies every clause.
pub(crate) fn verify_cnf_solution(
    instance_path: impl AsRef<Path>,
    solution: &Solution,
) -> GourdResult<()> {
    let formula = parse_cnf::<DimacsFormula>(File::open(instance_path)?, ())?;
    if solution.num_variables() != formula.num_variables {
        return Err(GourdError::InconsistentSolution);
    }

    let is_violated = |clause: &Vec<i32>| {
        !clause
            .iter()
            .any(|&literal| solution.is_dimacs_literal_true(literal))
    };

    if formula.clauses.iter().any(is_violated) {
        Err(GourdError::InconsistentSolution)
    } else {
        Ok(())
    }
}

pub(crate) fn verify_puzzle_solution(puzzle: &Puzzle, grid: &Grid) -> GourdResult<()> {
    if grid.is_valid_non_consecutive(puzzle) {
        Ok(())
    } else {
        Err(GourdError::InconsistentSolution)
    }
}
