//! # Gourd
//! Gourd is a conflict-driven clause learning (CDCL) SAT solver. Given a formula in conjunctive
//! normal form over a fixed set of boolean variables, it decides whether a satisfying assignment
//! exists and produces one if it does.
//!
//! The search propagates unit clauses to a fixpoint, decides on an unassigned variable when
//! propagation stalls, and analyses every conflict into a learned clause at the first unique
//! implication point. The learned clause determines how far the search backjumps.
//!
//! # Usage
//! The simplest entry point is [`solve`], which takes the clauses in DIMACS form:
//! ```rust
//! # use gourd_core::results::SolveStatus;
//! let clauses = vec![vec![1, 2], vec![-1, 2], vec![1, -2]];
//!
//! let outcome = gourd_core::solve(&clauses, 2).expect("every literal refers to variable 1 or 2");
//!
//! assert_eq!(SolveStatus::Sat, outcome.status);
//! assert_eq!(Some(vec![1, 2]), outcome.model);
//! ```
//!
//! A [`Solver`] gives control over how the search is performed through
//! [`options::SolverOptions`], and over when it gives up through a
//! [`termination::TerminationCondition`]:
//! ```rust
//! # use gourd_core::Solver;
//! # use gourd_core::options::DecisionPolicyKind;
//! # use gourd_core::options::PropagatorKind;
//! # use gourd_core::options::SolverOptions;
//! # use gourd_core::results::SatisfactionResult;
//! # use gourd_core::termination::TimeBudget;
//! # use std::time::Duration;
//! let options = SolverOptions {
//!     propagator: PropagatorKind::WatchedLiterals,
//!     decision_policy: DecisionPolicyKind::Vsids,
//!     ..Default::default()
//! };
//! let mut solver = Solver::with_options(3, options);
//! solver.add_clause(&[1, 2, 3]).expect("valid clause");
//! solver.add_clause(&[-1]).expect("valid clause");
//!
//! let mut termination = TimeBudget::starting_now(Duration::from_secs(10));
//! if let SatisfactionResult::Satisfiable(solution) = solver.satisfy(&mut termination) {
//!     assert!(!solution.is_dimacs_literal_true(1));
//! }
//! ```
pub(crate) mod asserts;
pub(crate) mod basic_types;
pub(crate) mod branching;
pub mod containers;
pub(crate) mod engine;
pub mod statistics;

pub use convert_case;
pub use rand;

// A private module with public use, so that everything in the API is exported from the crate
// root, e.g. `gourd_core::Solver` rather than `gourd_core::api::Solver`.
mod api;

pub use api::*;

pub use crate::basic_types::Random;
