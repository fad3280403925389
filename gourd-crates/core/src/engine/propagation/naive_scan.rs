use super::ClausalPropagator;
use crate::basic_types::ClauseReference;
use crate::engine::sat::Assignments;
use crate::engine::sat::ClauseDatabase;
use crate::variables::Literal;

/// Scans the whole clause database until a full pass assigns nothing.
///
/// A pass costs time linear in the size of the formula, which makes this engine slow on large
/// instances, but it keeps no state at all and therefore needs no bookkeeping on backtracking.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct NaivePropagator;

enum ClauseStatus {
    Satisfied,
    Falsified,
    Unit(Literal),
    Unresolved,
}

impl NaivePropagator {
    fn inspect(literals: &[Literal], assignments: &Assignments) -> ClauseStatus {
        let mut unassigned_literal = None;
        let mut num_unassigned = 0;

        for &literal in literals {
            match assignments.value_of(literal) {
                Some(true) => return ClauseStatus::Satisfied,
                Some(false) => {}
                None => {
                    num_unassigned += 1;
                    unassigned_literal = Some(literal);
                }
            }
        }

        match (num_unassigned, unassigned_literal) {
            (0, _) => ClauseStatus::Falsified,
            (1, Some(literal)) => ClauseStatus::Unit(literal),
            _ => ClauseStatus::Unresolved,
        }
    }
}

impl ClausalPropagator for NaivePropagator {
    fn clause_added(&mut self, _reference: ClauseReference, _clause_database: &ClauseDatabase) {}

    fn propagate(
        &mut self,
        assignments: &mut Assignments,
        clause_database: &ClauseDatabase,
    ) -> Result<(), ClauseReference> {
        loop {
            let mut has_assigned = false;

            for (reference, clause) in clause_database.iter() {
                match NaivePropagator::inspect(clause.get_literal_slice(), assignments) {
                    ClauseStatus::Falsified => return Err(reference),
                    ClauseStatus::Unit(literal) => {
                        assignments
                            .enqueue(literal, Some(reference))
                            .map_err(|_| reference)?;
                        has_assigned = true;
                    }
                    ClauseStatus::Satisfied | ClauseStatus::Unresolved => {}
                }
            }

            if !has_assigned {
                return Ok(());
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

    fn database(clauses: &[&[i32]]) -> ClauseDatabase {
        let mut clause_database = ClauseDatabase::default();
        for clause in clauses {
            let _ = clause_database.add_clause(clause.iter().map(|&code| lit(code)).collect());
        }
        clause_database
    }

    #[test]
    fn chains_of_implications_are_followed_to_the_fixpoint() {
        // The clauses are ordered so that one pass is not enough.
        let clause_database = database(&[&[-3, 4], &[-2, 3], &[-1, 2]]);
        let mut assignments = Assignments::new(4);
        assignments.new_decision_level();
        assignments.enqueue(lit(1), None).unwrap();

        let result = NaivePropagator.propagate(&mut assignments, &clause_database);

        assert_eq!(Ok(()), result);
        assert_eq!(&[lit(1), lit(2), lit(3), lit(4)], assignments.trail());
        assert!(assignments.reason_of(lit(4).get_propositional_variable()).is_some());
    }

    #[test]
    fn falsified_clause_is_reported() {
        let clause_database = database(&[&[-1, 2], &[-1, -2]]);
        let mut assignments = Assignments::new(2);
        assignments.new_decision_level();
        assignments.enqueue(lit(1), None).unwrap();

        let result = NaivePropagator.propagate(&mut assignments, &clause_database);

        let conflict = result.unwrap_err();
        assert!(clause_database
            .get_literal_slice(conflict)
            .iter()
            .all(|&literal| assignments.is_literal_false(literal)));
    }

    #[test]
    fn unit_clauses_are_propagated_at_the_root() {
        let clause_database = database(&[&[2], &[-2, -1]]);
        let mut assignments = Assignments::new(2);

        let result = NaivePropagator.propagate(&mut assignments, &clause_database);

        assert_eq!(Ok(()), result);
        assert_eq!(Some(true), assignments.value_of(lit(-1)));
        assert_eq!(0, assignments.level_of(lit(1).get_propositional_variable()));
    }
}
