//! Branching decides which literal to assign once propagation has reached a fixpoint and
//! variables remain unassigned.
//!
//! Every [`DecisionPolicyKind`] is complete: a policy only runs out of decisions once every
//! variable is assigned.
mod input_order;
mod jeroslow_wang;
mod vsids;

use std::fmt::Debug;
use std::fmt::Display;

pub(crate) use input_order::InputOrder;
pub(crate) use jeroslow_wang::JeroslowWang;
pub(crate) use vsids::Vsids;
pub use vsids::VsidsOptions;

use crate::engine::sat::Assignments;
use crate::variables::Literal;
use crate::variables::PropositionalVariable;

/// The available branching heuristics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum DecisionPolicyKind {
    /// The unassigned variable with the smallest index, set to true.
    #[default]
    InputOrder,
    /// The unassigned variable which occurred most in recent conflicts, set to its last value.
    Vsids,
    /// The unassigned literal occurring most in short clauses.
    JeroslowWang,
}

impl Display for DecisionPolicyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecisionPolicyKind::InputOrder => write!(f, "input-order"),
            DecisionPolicyKind::Vsids => write!(f, "vsids"),
            DecisionPolicyKind::JeroslowWang => write!(f, "jeroslow-wang"),
        }
    }
}

pub(crate) trait DecisionPolicy: Debug {
    /// The literal to decide on, or `None` if every variable is assigned.
    fn next_decision(&mut self, assignments: &Assignments) -> Option<Literal>;

    /// Called for every variable which takes part in the analysis of a conflict.
    fn on_conflict_variable(&mut self, _variable: PropositionalVariable) {}

    /// Called once a conflict has been analysed.
    fn on_conflict(&mut self) {}

    /// Called for every literal which is unassigned by backtracking.
    fn on_unassign(&mut self, _literal: Literal) {}

    fn on_learned_clause(&mut self, _literals: &[Literal]) {}
}
