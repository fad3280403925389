use std::mem;

use super::ClausalPropagator;
use crate::basic_types::ClauseReference;
use crate::containers::KeyedVec;
use crate::engine::sat::Assignments;
use crate::engine::sat::ClauseDatabase;
use crate::gourd_assert_moderate;
use crate::gourd_assert_simple;
use crate::variables::Literal;

/// A clause in the watch list of one of its two watched literals.
#[derive(Clone, Copy, Debug)]
struct ClauseWatcher {
    clause_reference: ClauseReference,
    /// Some literal of the clause. If it is true the clause is satisfied and does not have to be
    /// inspected.
    cached_literal: Literal,
}

/// Two-watched-literal propagation.
///
/// Every clause with at least two literals watches two of its literals which are not false, or
/// which are false at the highest levels of the clause. A clause can only become unit or
/// falsified once one of its watched literals is falsified, so only those clauses are visited.
///
/// Clauses are immutable in the [`ClauseDatabase`]; the watched positions are kept here instead.
/// Unit clauses are not watched, they are enqueued when propagating at the root.
#[derive(Debug, Default)]
pub(crate) struct WatchedLiteralPropagator {
    /// `watch_lists[l]` holds the clauses watching `l`, visited when `l` becomes false.
    watch_lists: KeyedVec<Literal, Vec<ClauseWatcher>>,
    watched_positions: KeyedVec<ClauseReference, [usize; 2]>,
    unit_clauses: Vec<ClauseReference>,
    num_unit_clauses_propagated: usize,
    empty_clauses: Vec<ClauseReference>,
    /// The next trail entry whose watchers have to be visited.
    queue_head: usize,
}

impl WatchedLiteralPropagator {
    pub(crate) fn new(num_variables: usize) -> WatchedLiteralPropagator {
        WatchedLiteralPropagator {
            watch_lists: KeyedVec::with_len(2 * num_variables, Vec::new()),
            ..Default::default()
        }
    }

    fn start_watching(&mut self, literal: Literal, watcher: ClauseWatcher) {
        self.watch_lists.accommodate(literal, Vec::new());
        self.watch_lists[literal].push(watcher);
    }

    fn propagate_unit_clauses(
        &mut self,
        assignments: &mut Assignments,
        clause_database: &ClauseDatabase,
    ) -> Result<(), ClauseReference> {
        while self.num_unit_clauses_propagated < self.unit_clauses.len() {
            gourd_assert_simple!(
                assignments.is_at_root(),
                "unit clauses can only be propagated at the root"
            );

            let reference = self.unit_clauses[self.num_unit_clauses_propagated];
            self.num_unit_clauses_propagated += 1;

            assignments
                .enqueue(clause_database[reference][0], Some(reference))
                .map_err(|_| reference)?;
        }

        Ok(())
    }

    /// Visit the clauses watching `!true_literal`. On a conflict the remaining watchers are kept
    /// and the falsified clause is returned.
    fn propagate_literal(
        &mut self,
        true_literal: Literal,
        assignments: &mut Assignments,
        clause_database: &ClauseDatabase,
    ) -> Result<(), ClauseReference> {
        let false_literal = !true_literal;
        if self.watch_lists[false_literal].is_empty() {
            return Ok(());
        }

        let mut watchers = mem::take(&mut self.watch_lists[false_literal]);
        let mut conflict = None;

        let mut current_index = 0;
        let mut end_index = 0;
        while current_index < watchers.len() {
            let watcher = watchers[current_index];
            current_index += 1;

            if assignments.is_literal_true(watcher.cached_literal) {
                watchers[end_index] = watcher;
                end_index += 1;
                continue;
            }

            let clause_reference = watcher.clause_reference;
            let literals = clause_database.get_literal_slice(clause_reference);

            // Position 1 is made to hold the falsified watch.
            let mut positions = self.watched_positions[clause_reference];
            if literals[positions[0]] == false_literal {
                positions.swap(0, 1);
            }
            gourd_assert_moderate!(literals[positions[1]] == false_literal);

            let other_watched_literal = literals[positions[0]];
            if assignments.is_literal_true(other_watched_literal) {
                watchers[end_index] = ClauseWatcher {
                    clause_reference,
                    cached_literal: other_watched_literal,
                };
                end_index += 1;
                self.watched_positions[clause_reference] = positions;
                continue;
            }

            let replacement = (0..literals.len()).find(|&index| {
                index != positions[0]
                    && index != positions[1]
                    && !assignments.is_literal_false(literals[index])
            });

            if let Some(index) = replacement {
                positions[1] = index;
                self.watched_positions[clause_reference] = positions;
                self.start_watching(
                    literals[index],
                    ClauseWatcher {
                        clause_reference,
                        cached_literal: other_watched_literal,
                    },
                );
                continue;
            }

            // No replacement, so the clause is unit or falsified and keeps its watches.
            self.watched_positions[clause_reference] = positions;
            watchers[end_index] = watcher;
            end_index += 1;

            if assignments
                .enqueue(other_watched_literal, Some(clause_reference))
                .is_err()
            {
                conflict = Some(clause_reference);

                while current_index < watchers.len() {
                    watchers[end_index] = watchers[current_index];
                    current_index += 1;
                    end_index += 1;
                }
            }
        }

        watchers.truncate(end_index);
        gourd_assert_moderate!(self.watch_lists[false_literal].is_empty());
        self.watch_lists[false_literal] = watchers;

        match conflict {
            Some(clause_reference) => Err(clause_reference),
            None => Ok(()),
        }
    }
}

impl ClausalPropagator for WatchedLiteralPropagator {
    fn clause_added(&mut self, reference: ClauseReference, clause_database: &ClauseDatabase) {
        let literals = clause_database.get_literal_slice(reference);
        self.watched_positions.accommodate(reference, [0, 1]);

        match literals.len() {
            0 => self.empty_clauses.push(reference),
            1 => self.unit_clauses.push(reference),
            _ => {
                self.start_watching(
                    literals[0],
                    ClauseWatcher {
                        clause_reference: reference,
                        cached_literal: literals[1],
                    },
                );
                self.start_watching(
                    literals[1],
                    ClauseWatcher {
                        clause_reference: reference,
                        cached_literal: literals[0],
                    },
                );
            }
        }
    }

    fn propagate(
        &mut self,
        assignments: &mut Assignments,
        clause_database: &ClauseDatabase,
    ) -> Result<(), ClauseReference> {
        if let Some(&reference) = self.empty_clauses.first() {
            return Err(reference);
        }

        self.propagate_unit_clauses(assignments, clause_database)?;

        while self.queue_head < assignments.num_assigned() {
            let true_literal = assignments.trail()[self.queue_head];
            self.queue_head += 1;

            self.watch_lists.accommodate(!true_literal, Vec::new());
            self.propagate_literal(true_literal, assignments, clause_database)?;
        }

        Ok(())
    }

    fn synchronise(&mut self, assignments: &Assignments) {
        self.queue_head = self.queue_head.min(assignments.num_assigned());
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroI32;

    use super::*;

    fn lit(code: i32) -> Literal {
        Literal::from_dimacs(NonZeroI32::new(code).unwrap())
    }

    fn watched(num_variables: usize, clauses: &[&[i32]]) -> (WatchedLiteralPropagator, ClauseDatabase) {
        let mut propagator = WatchedLiteralPropagator::new(num_variables);
        let mut clause_database = ClauseDatabase::default();
        for clause in clauses {
            let reference =
                clause_database.add_clause(clause.iter().map(|&code| lit(code)).collect());
            propagator.clause_added(reference, &clause_database);
        }
        (propagator, clause_database)
    }

    #[test]
    fn implications_are_followed_through_the_watches() {
        let (mut propagator, clause_database) = watched(4, &[&[-3, 4], &[-2, 3], &[-1, 2]]);
        let mut assignments = Assignments::new(4);
        assignments.new_decision_level();
        assignments.enqueue(lit(1), None).unwrap();

        let result = propagator.propagate(&mut assignments, &clause_database);

        assert_eq!(Ok(()), result);
        assert_eq!(&[lit(1), lit(2), lit(3), lit(4)], assignments.trail());
    }

    #[test]
    fn watches_move_to_unassigned_literals() {
        let (mut propagator, clause_database) = watched(3, &[&[1, 2, 3]]);
        let mut assignments = Assignments::new(3);

        assignments.new_decision_level();
        assignments.enqueue(lit(-1), None).unwrap();
        assert_eq!(Ok(()), propagator.propagate(&mut assignments, &clause_database));
        assert_eq!(None, assignments.value_of(lit(3)));

        assignments.new_decision_level();
        assignments.enqueue(lit(-2), None).unwrap();
        assert_eq!(Ok(()), propagator.propagate(&mut assignments, &clause_database));
        assert_eq!(Some(true), assignments.value_of(lit(3)));
    }

    #[test]
    fn falsified_clause_is_reported() {
        let (mut propagator, clause_database) = watched(2, &[&[-1, 2], &[-1, -2]]);
        let mut assignments = Assignments::new(2);
        assignments.new_decision_level();
        assignments.enqueue(lit(1), None).unwrap();

        let conflict = propagator
            .propagate(&mut assignments, &clause_database)
            .unwrap_err();

        assert!(clause_database
            .get_literal_slice(conflict)
            .iter()
            .all(|&literal| assignments.is_literal_false(literal)));
    }

    #[test]
    fn propagation_resumes_correctly_after_backtracking() {
        let (mut propagator, clause_database) = watched(3, &[&[-1, 2], &[-1, -2, 3]]);
        let mut assignments = Assignments::new(3);

        assignments.new_decision_level();
        assignments.enqueue(lit(1), None).unwrap();
        assert_eq!(Ok(()), propagator.propagate(&mut assignments, &clause_database));
        assert_eq!(3, assignments.num_assigned());

        let _ = assignments.cancel_until(0);
        propagator.synchronise(&assignments);

        assignments.new_decision_level();
        assignments.enqueue(lit(1), None).unwrap();
        assert_eq!(Ok(()), propagator.propagate(&mut assignments, &clause_database));
        assert_eq!(&[lit(1), lit(2), lit(3)], assignments.trail());
    }

    #[test]
    fn unit_and_empty_clauses_are_handled_at_the_root() {
        let (mut propagator, clause_database) = watched(2, &[&[2], &[-2, -1]]);
        let mut assignments = Assignments::new(2);

        assert_eq!(Ok(()), propagator.propagate(&mut assignments, &clause_database));
        assert_eq!(Some(true), assignments.value_of(lit(-1)));

        let (mut propagator, clause_database) = watched(1, &[&[1], &[]]);
        let mut assignments = Assignments::new(1);
        assert!(propagator
            .propagate(&mut assignments, &clause_database)
            .is_err());
    }
}
