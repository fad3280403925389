//! The state shared by all components of the search: the assignment and the clauses.
mod assignments;
mod clause_database;

pub(crate) use assignments::Assignments;
pub(crate) use assignments::EnqueueConflict;
pub(crate) use clause_database::Clause;
pub(crate) use clause_database::ClauseDatabase;
