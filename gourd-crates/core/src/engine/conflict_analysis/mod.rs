//! Conflict analysis derives a learned clause from a conflicting clause by resolving over the
//! reasons on the trail, until exactly one literal of the conflict level remains (the first unique
//! implication point).
mod learned_clause;
mod learned_clause_minimiser;
mod resolution_conflict_analyser;

pub(crate) use learned_clause::LearnedClause;
pub(crate) use learned_clause_minimiser::LearnedClauseMinimiser;
pub(crate) use resolution_conflict_analyser::ConflictAnalyser;
