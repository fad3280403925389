use super::DecisionPolicy;
use crate::containers::StorageKey;
use crate::engine::sat::Assignments;
use crate::variables::Literal;
use crate::variables::PropositionalVariable;

/// Decides on the unassigned variable with the smallest index and sets it to true.
///
/// Every variable below `next_index` is assigned, so the scan resumes where it stopped until
/// backtracking unassigns a smaller variable.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct InputOrder {
    next_index: usize,
}

impl DecisionPolicy for InputOrder {
    fn next_decision(&mut self, assignments: &Assignments) -> Option<Literal> {
        while self.next_index < assignments.num_variables() {
            let variable = PropositionalVariable::create_from_index(self.next_index);
            if !assignments.is_variable_assigned(variable) {
                return Some(Literal::new(variable, true));
            }

            self.next_index += 1;
        }

        None
    }

    fn on_unassign(&mut self, literal: Literal) {
        self.next_index = self
            .next_index
            .min(literal.get_propositional_variable().index());
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroI32;

    use super::*;

    fn lit(code: i32) -> Literal {
        Literal::from_dimacs(NonZeroI32::new(code).unwrap())
    }

    #[test]
    fn smallest_unassigned_variable_is_decided_true() {
        let mut assignments = Assignments::new(3);
        assignments.enqueue(lit(-1), None).unwrap();

        let mut policy = InputOrder::default();

        assert_eq!(Some(lit(2)), policy.next_decision(&assignments));
    }

    #[test]
    fn unassigned_variables_are_reconsidered() {
        let mut assignments = Assignments::new(2);
        let mut policy = InputOrder::default();

        assignments.new_decision_level();
        assignments.enqueue(lit(1), None).unwrap();
        assignments.enqueue(lit(2), None).unwrap();
        assert_eq!(None, policy.next_decision(&assignments));

        for literal in assignments.cancel_until(0) {
            policy.on_unassign(literal);
        }

        assert_eq!(Some(lit(1)), policy.next_decision(&assignments));
    }
}
