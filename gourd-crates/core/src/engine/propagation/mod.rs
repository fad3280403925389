//! Boolean constraint propagation: repeatedly assign the last unassigned literal of clauses whose
//! other literals are all false, until nothing changes or a clause is falsified.
//!
//! Two engines are available. [`NaivePropagator`] scans every clause until a fixpoint is reached.
//! [`WatchedLiteralPropagator`] only visits clauses in which one of two watched literals became
//! false. Without a conflict both reach the same fixpoint. Both find a conflict whenever unit
//! propagation can derive one, although not necessarily the same conflicting clause.
mod naive_scan;
mod watched_literals;

use std::fmt::Debug;
use std::fmt::Display;

pub(crate) use naive_scan::NaivePropagator;
pub(crate) use watched_literals::WatchedLiteralPropagator;

use crate::basic_types::ClauseReference;
use crate::engine::sat::Assignments;
use crate::engine::sat::ClauseDatabase;

/// The available propagation engines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum PropagatorKind {
    /// Scan every clause until a full pass assigns nothing.
    #[default]
    NaiveScan,
    /// Two watched literals per clause.
    WatchedLiterals,
}

impl Display for PropagatorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PropagatorKind::NaiveScan => write!(f, "naive-scan"),
            PropagatorKind::WatchedLiterals => write!(f, "watched-literals"),
        }
    }
}

pub(crate) trait ClausalPropagator: Debug {
    /// Called for every clause once it is in the database. Learned clauses are announced after
    /// the search has backjumped, when every literal but the first is false.
    fn clause_added(&mut self, reference: ClauseReference, clause_database: &ClauseDatabase);

    /// Propagate until a fixpoint is reached. On a conflict, the falsified clause is returned.
    ///
    /// Every assignment is enqueued with the clause which became unit as its reason.
    fn propagate(
        &mut self,
        assignments: &mut Assignments,
        clause_database: &ClauseDatabase,
    ) -> Result<(), ClauseReference>;

    /// Called after the assignment has been backtracked.
    fn synchronise(&mut self, _assignments: &Assignments) {}
}
