use super::DecisionPolicy;
use crate::containers::KeyValueHeap;
use crate::containers::KeyedVec;
use crate::containers::StorageKey;
use crate::engine::sat::Assignments;
use crate::variables::Literal;
use crate::variables::PropositionalVariable;

/// The (one-sided) Jeroslow-Wang heuristic: the score of a literal is `Σ 2^-|C|` over the clauses
/// `C` containing it, so literals of short clauses weigh most. The unassigned literal with the
/// highest score is decided on; ties go to the smallest variable and then to true.
///
/// Learned clauses are added to the scores when they are learned.
#[derive(Debug)]
pub(crate) struct JeroslowWang {
    scores: KeyedVec<Literal, f64>,
    /// Every variable is keyed by the highest score of its two literals.
    heap: KeyValueHeap<PropositionalVariable, f64>,
}

impl JeroslowWang {
    pub(crate) fn new<'a>(
        num_variables: usize,
        clauses: impl IntoIterator<Item = &'a [Literal]>,
    ) -> JeroslowWang {
        let mut scores = KeyedVec::with_len(2 * num_variables, 0.0);
        for clause in clauses {
            let weight = clause_weight(clause);
            for &literal in clause {
                scores[literal] += weight;
            }
        }

        let mut heap = KeyValueHeap::default();
        for index in 0..num_variables {
            let variable = PropositionalVariable::create_from_index(index);
            heap.grow(variable, best_score(&scores, variable));
        }

        JeroslowWang { scores, heap }
    }
}

fn clause_weight(clause: &[Literal]) -> f64 {
    0.5_f64.powi(clause.len().min(i32::MAX as usize) as i32)
}

fn best_score(scores: &KeyedVec<Literal, f64>, variable: PropositionalVariable) -> f64 {
    scores[Literal::new(variable, true)].max(scores[Literal::new(variable, false)])
}

impl DecisionPolicy for JeroslowWang {
    fn next_decision(&mut self, assignments: &Assignments) -> Option<Literal> {
        while let Some(candidate) = self.heap.peek_max() {
            if assignments.is_variable_assigned(candidate) {
                let _ = self.heap.pop_max();
            } else {
                let positive = Literal::new(candidate, true);
                let is_positive = self.scores[positive] >= self.scores[!positive];
                return Some(Literal::new(candidate, is_positive));
            }
        }

        None
    }

    fn on_unassign(&mut self, literal: Literal) {
        self.heap.restore_key(literal.get_propositional_variable());
    }

    fn on_learned_clause(&mut self, literals: &[Literal]) {
        let weight = clause_weight(literals);
        for &literal in literals {
            let variable = literal.get_propositional_variable();
            let previous_best = best_score(&self.scores, variable);

            self.scores[literal] += weight;

            let improvement = best_score(&self.scores, variable) - previous_best;
            if improvement > 0.0 {
                self.heap.increment(variable, improvement);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroI32;

    use super::*;

    fn lit(code: i32) -> Literal {
        Literal::from_dimacs(NonZeroI32::new(code).unwrap())
    }

    fn clauses(clauses: &[&[i32]]) -> Vec<Vec<Literal>> {
        clauses
            .iter()
            .map(|clause| clause.iter().map(|&code| lit(code)).collect())
            .collect()
    }

    fn policy(num_variables: usize, input: &[&[i32]]) -> JeroslowWang {
        let clauses = clauses(input);
        JeroslowWang::new(num_variables, clauses.iter().map(Vec::as_slice))
    }

    #[test]
    fn literals_of_short_clauses_are_preferred() {
        let assignments = Assignments::new(3);
        let mut policy = policy(3, &[&[1, 2, 3], &[-3, 1, 2], &[-3, -1]]);

        assert_eq!(Some(lit(-3)), policy.next_decision(&assignments));
    }

    #[test]
    fn ties_go_to_the_smallest_variable_set_true() {
        let assignments = Assignments::new(2);
        let mut policy = policy(2, &[&[-1, 2], &[1, -2]]);

        assert_eq!(Some(lit(1)), policy.next_decision(&assignments));
    }

    #[test]
    fn learned_clauses_change_the_scores() {
        let mut assignments = Assignments::new(3);
        let mut policy = policy(3, &[&[1, 2, 3]]);

        assignments.new_decision_level();
        assignments.enqueue(lit(1), None).unwrap();
        assert_eq!(Some(lit(2)), policy.next_decision(&assignments));

        policy.on_learned_clause(&[lit(-2)]);
        for literal in assignments.cancel_until(0) {
            policy.on_unassign(literal);
        }

        assert_eq!(Some(lit(-2)), policy.next_decision(&assignments));
    }
}
