use log::debug;
use log::info;

use super::results::SatisfactionResult;
use super::results::SolveOutcome;
use crate::basic_types::InputError;
use crate::engine::preprocessing::normalise_clause;
use crate::engine::CdclExecutionFlag;
use crate::engine::CdclSolver;
use crate::gourd_assert_advanced;
use crate::options::SolverOptions;
use crate::statistics::log_statistic;
use crate::termination::Indefinite;
use crate::termination::TerminationCondition;
use crate::variables::Literal;

/// The main interaction point, which takes the clauses of a formula and decides whether they are
/// satisfiable.
///
/// Clauses are given in DIMACS form: variable `v` is the integer `v` and its negation is `-v`.
///
/// ```rust
/// # use gourd_core::Solver;
/// # use gourd_core::results::SatisfactionResult;
/// # use gourd_core::termination::Indefinite;
/// let mut solver = Solver::new(2);
///
/// solver.add_clause(&[1, 2]).expect("both variables exist");
/// solver.add_clause(&[-1, 2]).expect("both variables exist");
/// solver.add_clause(&[1, -2]).expect("both variables exist");
///
/// match solver.satisfy(&mut Indefinite) {
///     SatisfactionResult::Satisfiable(solution) => assert!(solution.is_dimacs_literal_true(2)),
///     _ => panic!("the clauses are satisfiable"),
/// }
/// ```
///
/// The search is not incremental; adding a clause after [`Solver::satisfy`] discards the previous
/// search and the next call starts from scratch. A search which was stopped by its
/// [`TerminationCondition`] is resumed by the next call if no clause was added in between.
#[derive(Debug)]
pub struct Solver {
    options: SolverOptions,
    num_variables: usize,
    /// The normalised clauses, without tautologies.
    clauses: Vec<Vec<Literal>>,
    /// Every clause given to [`Solver::add_clause`], including rejected ones and tautologies.
    num_clauses_added: usize,
    last_search: Option<CdclSolver>,
}

impl Solver {
    /// Creates a solver over the variables `1..=num_variables` with the default options.
    pub fn new(num_variables: usize) -> Solver {
        Solver::with_options(num_variables, SolverOptions::default())
    }

    pub fn with_options(num_variables: usize, options: SolverOptions) -> Solver {
        Solver {
            options,
            num_variables,
            clauses: Vec::new(),
            num_clauses_added: 0,
            last_search: None,
        }
    }

    pub fn num_variables(&self) -> usize {
        self.num_variables
    }

    /// The number of clauses given to [`Solver::add_clause`], whether or not they were accepted.
    pub fn num_clauses(&self) -> usize {
        self.num_clauses_added
    }

    /// Adds a clause in DIMACS form, e.g. `[1, -3]` for `x1 v ~x3`.
    ///
    /// A clause containing `0` or a variable outside `1..=num_variables` is rejected and the
    /// formula is left unchanged. The empty clause is accepted and makes the formula
    /// unsatisfiable.
    pub fn add_clause(&mut self, clause: &[i32]) -> Result<(), InputError> {
        let clause_index = self.num_clauses_added;
        self.num_clauses_added += 1;

        let Some(literals) = normalise_clause(clause, clause_index, self.num_variables)? else {
            debug!("Clause {clause_index} is a tautology and is left out");
            return Ok(());
        };

        self.clauses.push(literals);
        self.last_search = None;
        Ok(())
    }

    /// Decides whether the clauses are satisfiable, unless `termination` triggers first.
    pub fn satisfy(&mut self, termination: &mut impl TerminationCondition) -> SatisfactionResult {
        let search = self.last_search.get_or_insert_with(|| {
            CdclSolver::new(self.num_variables, self.clauses.iter().cloned(), &self.options)
        });

        match search.solve(termination) {
            CdclExecutionFlag::Feasible => {
                let solution = search.solution();
                gourd_assert_advanced!(
                    self.clauses.iter().all(|clause| clause
                        .iter()
                        .any(|&literal| solution.is_literal_true(literal))),
                    "the solution falsifies an input clause"
                );
                info!("Found a solution");
                SatisfactionResult::Satisfiable(solution)
            }
            CdclExecutionFlag::Infeasible => {
                info!("The clauses are unsatisfiable");
                SatisfactionResult::Unsatisfiable
            }
            CdclExecutionFlag::Timeout => SatisfactionResult::Unknown,
        }
    }

    /// Logs the statistics of the last search, if statistic logging is configured.
    pub fn log_statistics(&self) {
        log_statistic("numberOfVariables", self.num_variables);
        log_statistic("numberOfClauses", self.clauses.len());
        if let Some(search) = &self.last_search {
            search.log_statistics();
        }
    }
}

/// Decides whether `clauses` over the variables `1..=num_variables` are satisfiable.
///
/// The search runs until it reaches a conclusion, so the status is never
/// [`SolveStatus::Unknown`](super::results::SolveStatus::Unknown).
///
/// ```rust
/// # use gourd_core::results::SolveStatus;
/// let outcome = gourd_core::solve(&[vec![1], vec![-1]], 1).expect("the clauses are well-formed");
/// assert_eq!(SolveStatus::Unsat, outcome.status);
/// assert_eq!(None, outcome.model);
/// ```
pub fn solve(clauses: &[Vec<i32>], num_variables: usize) -> Result<SolveOutcome, InputError> {
    let mut solver = Solver::new(num_variables);
    for clause in clauses {
        solver.add_clause(clause)?;
    }

    Ok(solver.satisfy(&mut Indefinite).into())
}
