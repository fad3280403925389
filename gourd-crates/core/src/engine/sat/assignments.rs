use thiserror::Error;

use crate::basic_types::ClauseReference;
use crate::basic_types::Trail;
use crate::containers::KeyedVec;
use crate::gourd_assert_moderate;
use crate::gourd_assert_simple;
use crate::variables::Literal;
use crate::variables::PropositionalVariable;

/// The partial assignment of the search, together with the trail of assigned literals.
///
/// For every assigned variable the store records its truth value, the decision level at which it
/// was assigned, and its reason: `None` for decisions (and root facts without a clause, such as
/// pure literals), or the clause which became unit and forced the assignment.
#[derive(Clone, Debug, Default)]
pub(crate) struct Assignments {
    assignment_info: KeyedVec<PropositionalVariable, AssignmentInfo>,
    trail: Trail<Literal>,
}

/// Returned by [`Assignments::enqueue`] when the literal is already assigned false.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("literal {literal} cannot be set to true, it is already false")]
pub(crate) struct EnqueueConflict {
    pub(crate) literal: Literal,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum AssignmentInfo {
    Assigned {
        truth_value: bool,
        decision_level: usize,
        reason: Option<ClauseReference>,
    },
    #[default]
    Unassigned,
}

impl Assignments {
    pub(crate) fn new(num_variables: usize) -> Assignments {
        Assignments {
            assignment_info: KeyedVec::with_len(num_variables, AssignmentInfo::Unassigned),
            trail: Trail::default(),
        }
    }

    pub(crate) fn num_variables(&self) -> usize {
        self.assignment_info.len()
    }

    pub(crate) fn num_assigned(&self) -> usize {
        self.trail.len()
    }

    pub(crate) fn all_assigned(&self) -> bool {
        self.num_assigned() == self.num_variables()
    }

    /// The number of open decision levels; 0 before the first decision.
    pub(crate) fn current_level(&self) -> usize {
        self.trail.get_decision_level()
    }

    pub(crate) fn is_at_root(&self) -> bool {
        self.current_level() == 0
    }

    /// `Some(true)` if `literal` is satisfied, `Some(false)` if it is falsified and `None` if its
    /// variable is unassigned.
    pub(crate) fn value_of(&self, literal: Literal) -> Option<bool> {
        match self.assignment_info[literal.get_propositional_variable()] {
            AssignmentInfo::Assigned { truth_value, .. } => {
                Some(truth_value == literal.is_positive())
            }
            AssignmentInfo::Unassigned => None,
        }
    }

    pub(crate) fn is_literal_true(&self, literal: Literal) -> bool {
        self.value_of(literal) == Some(true)
    }

    pub(crate) fn is_literal_false(&self, literal: Literal) -> bool {
        self.value_of(literal) == Some(false)
    }

    pub(crate) fn is_variable_assigned(&self, variable: PropositionalVariable) -> bool {
        self.assignment_info[variable] != AssignmentInfo::Unassigned
    }

    /// The truth value of `variable`, if it is assigned.
    pub(crate) fn variable_value(&self, variable: PropositionalVariable) -> Option<bool> {
        match self.assignment_info[variable] {
            AssignmentInfo::Assigned { truth_value, .. } => Some(truth_value),
            AssignmentInfo::Unassigned => None,
        }
    }

    /// # Panics
    /// If `variable` is unassigned.
    pub(crate) fn level_of(&self, variable: PropositionalVariable) -> usize {
        match self.assignment_info[variable] {
            AssignmentInfo::Assigned { decision_level, .. } => decision_level,
            AssignmentInfo::Unassigned => {
                panic!("unassigned variable {variable} does not have a decision level")
            }
        }
    }

    /// # Panics
    /// If `variable` is unassigned.
    pub(crate) fn reason_of(&self, variable: PropositionalVariable) -> Option<ClauseReference> {
        match self.assignment_info[variable] {
            AssignmentInfo::Assigned { reason, .. } => reason,
            AssignmentInfo::Unassigned => {
                panic!("unassigned variable {variable} does not have a reason")
            }
        }
    }

    /// Whether `variable` is assigned without a reason above the root, i.e. by a decision.
    pub(crate) fn is_decision(&self, variable: PropositionalVariable) -> bool {
        matches!(
            self.assignment_info[variable],
            AssignmentInfo::Assigned {
                decision_level,
                reason: None,
                ..
            } if decision_level > 0
        )
    }

    /// The assigned literals in the order in which they were assigned.
    pub(crate) fn trail(&self) -> &[Literal] {
        &self.trail
    }

    pub(crate) fn literals_at_level(&self, level: usize) -> &[Literal] {
        self.trail.values_at_level(level)
    }

    /// The decision of the given level, which is the first literal assigned at that level.
    pub(crate) fn decision_at_level(&self, level: usize) -> Option<Literal> {
        gourd_assert_simple!(level > 0, "the root level has no decision");
        self.literals_at_level(level).first().copied()
    }

    /// Make `literal` true at the current decision level.
    ///
    /// If the literal is already true nothing changes, in particular its level and reason are
    /// kept. If it is already false, the assignment is rejected with an [`EnqueueConflict`].
    pub(crate) fn enqueue(
        &mut self,
        literal: Literal,
        reason: Option<ClauseReference>,
    ) -> Result<(), EnqueueConflict> {
        match self.value_of(literal) {
            Some(true) => Ok(()),
            Some(false) => Err(EnqueueConflict { literal }),
            None => {
                self.assignment_info[literal.get_propositional_variable()] =
                    AssignmentInfo::Assigned {
                        truth_value: literal.is_positive(),
                        decision_level: self.current_level(),
                        reason,
                    };
                self.trail.push(literal);
                Ok(())
            }
        }
    }

    /// Open a new decision level. Literals enqueued from now on belong to the new level.
    pub(crate) fn new_decision_level(&mut self) {
        self.trail.new_decision_level()
    }

    /// Unassign every literal assigned above `level` and close those levels. Does nothing if
    /// `level` is not below the current level.
    ///
    /// The unassigned literals are returned most recent first. The store is already consistent
    /// when this method returns, so the iterator may be dropped without being consumed.
    pub(crate) fn cancel_until(&mut self, level: usize) -> impl Iterator<Item = Literal> + '_ {
        let unassigned = if level < self.current_level() {
            for &literal in self.trail.values_above_level(level) {
                gourd_assert_moderate!(
                    self.level_of(literal.get_propositional_variable()) > level
                );
                self.assignment_info[literal.get_propositional_variable()] =
                    AssignmentInfo::Unassigned;
            }

            Some(self.trail.synchronise(level))
        } else {
            None
        };

        unassigned.into_iter().flatten()
    }

    pub(crate) fn variables(&self) -> impl Iterator<Item = PropositionalVariable> + '_ {
        self.assignment_info.keys()
    }

    /// The value of every variable, unassigned variables being false.
    pub(crate) fn values_defaulting_to_false(&self) -> KeyedVec<PropositionalVariable, bool> {
        let mut values = KeyedVec::with_len(self.num_variables(), false);
        for variable in self.variables() {
            values[variable] = self.variable_value(variable).unwrap_or(false);
        }
        values
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroI32;

    use super::*;
    use crate::containers::StorageKey;

    fn lit(code: i32) -> Literal {
        Literal::from_dimacs(NonZeroI32::new(code).unwrap())
    }

    fn reason(id: usize) -> Option<ClauseReference> {
        Some(ClauseReference::create_from_index(id))
    }

    #[test]
    fn value_of_follows_the_polarity() {
        let mut assignments = Assignments::new(2);
        assignments.enqueue(lit(-1), None).unwrap();

        assert_eq!(Some(true), assignments.value_of(lit(-1)));
        assert_eq!(Some(false), assignments.value_of(lit(1)));
        assert_eq!(None, assignments.value_of(lit(2)));
    }

    #[test]
    fn enqueueing_a_true_literal_keeps_the_original_reason() {
        let mut assignments = Assignments::new(1);

        assignments.enqueue(lit(1), reason(0)).unwrap();
        assignments.enqueue(lit(1), reason(1)).unwrap();

        assert_eq!(1, assignments.trail().len());
        assert_eq!(reason(0), assignments.reason_of(lit(1).get_propositional_variable()));
    }

    #[test]
    fn enqueueing_a_false_literal_is_a_conflict() {
        let mut assignments = Assignments::new(1);
        assignments.enqueue(lit(1), None).unwrap();

        let result = assignments.enqueue(lit(-1), reason(3));

        assert_eq!(Err(EnqueueConflict { literal: lit(-1) }), result);
        assert_eq!(Some(true), assignments.value_of(lit(1)));
    }

    #[test]
    fn literals_are_assigned_at_the_current_level() {
        let mut assignments = Assignments::new(3);
        assignments.enqueue(lit(1), reason(0)).unwrap();
        assignments.new_decision_level();
        assignments.enqueue(lit(2), None).unwrap();
        assignments.enqueue(lit(-3), reason(1)).unwrap();

        assert_eq!(0, assignments.level_of(lit(1).get_propositional_variable()));
        assert_eq!(1, assignments.level_of(lit(2).get_propositional_variable()));
        assert_eq!(1, assignments.level_of(lit(3).get_propositional_variable()));
        assert!(assignments.is_decision(lit(2).get_propositional_variable()));
        assert!(!assignments.is_decision(lit(3).get_propositional_variable()));
        assert_eq!(Some(lit(2)), assignments.decision_at_level(1));
    }

    #[test]
    fn cancel_until_unassigns_everything_above_the_level() {
        let mut assignments = Assignments::new(4);
        assignments.enqueue(lit(1), None).unwrap();
        assignments.new_decision_level();
        assignments.enqueue(lit(2), None).unwrap();
        assignments.new_decision_level();
        assignments.enqueue(lit(3), None).unwrap();
        assignments.enqueue(lit(-4), reason(0)).unwrap();

        let unassigned = assignments.cancel_until(1).collect::<Vec<_>>();

        assert_eq!(vec![lit(-4), lit(3)], unassigned);
        assert_eq!(1, assignments.current_level());
        assert_eq!(&[lit(1), lit(2)], assignments.trail());
        assert_eq!(None, assignments.value_of(lit(3)));
        assert_eq!(None, assignments.value_of(lit(4)));
        assert!(assignments
            .trail()
            .iter()
            .all(|literal| assignments.level_of(literal.get_propositional_variable()) <= 1));
    }

    #[test]
    fn cancel_until_a_higher_level_is_a_no_op() {
        let mut assignments = Assignments::new(2);
        assignments.new_decision_level();
        assignments.enqueue(lit(1), None).unwrap();

        assert_eq!(0, assignments.cancel_until(1).count());
        assert_eq!(0, assignments.cancel_until(5).count());
        assert_eq!(1, assignments.current_level());
        assert_eq!(Some(true), assignments.value_of(lit(1)));
    }

    #[test]
    fn dropping_the_unassigned_literals_leaves_a_consistent_store() {
        let mut assignments = Assignments::new(2);
        assignments.new_decision_level();
        assignments.enqueue(lit(1), None).unwrap();
        assignments.enqueue(lit(2), reason(0)).unwrap();

        let _ = assignments.cancel_until(0);

        assert_eq!(0, assignments.num_assigned());
        assert_eq!(None, assignments.value_of(lit(1)));
        assert_eq!(None, assignments.value_of(lit(2)));
    }

    #[test]
    fn backtracking_restores_the_state_at_level_creation() {
        let mut assignments = Assignments::new(3);
        assignments.enqueue(lit(1), None).unwrap();
        assignments.new_decision_level();
        let snapshot = assignments.clone();

        assignments.enqueue(lit(2), None).unwrap();
        assignments.new_decision_level();
        assignments.enqueue(lit(-3), None).unwrap();
        let _ = assignments.cancel_until(0);
        assignments.new_decision_level();

        assert_eq!(snapshot.trail(), assignments.trail());
        assert_eq!(snapshot.assignment_info, assignments.assignment_info);
    }
}
