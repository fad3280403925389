use super::LearnedClause;
use super::LearnedClauseMinimiser;
use crate::basic_types::ClauseReference;
use crate::containers::KeyedVec;
use crate::engine::sat::Assignments;
use crate::engine::sat::ClauseDatabase;
use crate::gourd_assert_advanced;
use crate::gourd_assert_moderate;
use crate::gourd_assert_simple;
use crate::variables::Literal;
use crate::variables::PropositionalVariable;

/// Computes the first unique implication point (1-UIP) learned clause of a conflict.
///
/// Starting from the conflicting clause, the analyser repeatedly resolves with the reason of the
/// most recently assigned literal of the conflict level which occurs in the working clause, until
/// exactly one literal of the conflict level is left. Literals of lower levels are collected into
/// the learned clause and literals of the root level are dropped, since they are false in every
/// assignment the search can still reach.
#[derive(Debug, Default)]
pub(crate) struct ConflictAnalyser {
    seen: KeyedVec<PropositionalVariable, bool>,
    minimise_learned_clauses: bool,
    minimiser: LearnedClauseMinimiser,
}

impl ConflictAnalyser {
    pub(crate) fn new(num_variables: usize, minimise_learned_clauses: bool) -> ConflictAnalyser {
        ConflictAnalyser {
            seen: KeyedVec::with_len(num_variables, false),
            minimise_learned_clauses,
            minimiser: LearnedClauseMinimiser::default(),
        }
    }

    /// Analyse `conflict`, a clause whose literals are all false.
    ///
    /// Every variable which takes part in the resolution is passed to
    /// `on_variable_in_conflict`, this is where branching heuristics bump their activities.
    ///
    /// # Panics
    /// If the search is at the root, where a conflict means the formula is unsatisfiable.
    pub(crate) fn analyse(
        &mut self,
        conflict: ClauseReference,
        assignments: &Assignments,
        clause_database: &ClauseDatabase,
        mut on_variable_in_conflict: impl FnMut(PropositionalVariable),
    ) -> LearnedClause {
        gourd_assert_simple!(
            !assignments.is_at_root(),
            "conflicts at the root cannot be analysed"
        );
        gourd_assert_moderate!(
            clause_database
                .get_literal_slice(conflict)
                .iter()
                .all(|&literal| assignments.is_literal_false(literal)),
            "the conflicting clause {} is not falsified",
            clause_database[conflict]
        );

        let current_level = assignments.current_level();
        let trail = assignments.trail();

        // Index 0 is reserved for the asserting literal, which is only known at the end.
        let mut literals = vec![trail[trail.len() - 1]];
        let mut backjump_level = 0;

        let mut num_current_level_literals_to_inspect = 0_usize;
        let mut next_trail_index = trail.len() - 1;
        let mut next_literal: Option<Literal> = None;

        loop {
            let clause_reference = match next_literal {
                None => conflict,
                Some(propagated_literal) => {
                    match assignments.reason_of(propagated_literal.get_propositional_variable()) {
                        Some(reason) => reason,
                        // A decision is the first literal of its level, it can only be reached
                        // once it is the last literal of the level left to inspect.
                        None => {
                            literals[0] = !propagated_literal;
                            break;
                        }
                    }
                }
            };

            for &reason_literal in clause_database.get_literal_slice(clause_reference) {
                let variable = reason_literal.get_propositional_variable();

                // Resolving on the propagated literal removes it from the working clause.
                if next_literal.is_some_and(|literal| literal.get_propositional_variable() == variable)
                {
                    continue;
                }

                let level = assignments.level_of(variable);
                if level == 0 || self.seen[variable] {
                    continue;
                }

                self.seen[variable] = true;
                on_variable_in_conflict(variable);

                if level == current_level {
                    num_current_level_literals_to_inspect += 1;
                } else {
                    literals.push(reason_literal);

                    if level > backjump_level {
                        backjump_level = level;
                        let last_index = literals.len() - 1;
                        literals.swap(1, last_index);
                    }
                }
            }

            gourd_assert_simple!(
                num_current_level_literals_to_inspect > 0,
                "the working clause has no literal of the conflict level"
            );

            while !self.seen[trail[next_trail_index].get_propositional_variable()] {
                next_trail_index -= 1;
                gourd_assert_advanced!(
                    assignments.level_of(trail[next_trail_index].get_propositional_variable())
                        == current_level,
                    "walked past the start of the conflict level"
                );
            }

            let propagated_literal = trail[next_trail_index];
            next_literal = Some(propagated_literal);
            self.seen[propagated_literal.get_propositional_variable()] = false;
            num_current_level_literals_to_inspect -= 1;

            if num_current_level_literals_to_inspect == 0 {
                literals[0] = !propagated_literal;
                break;
            }

            next_trail_index -= 1;
        }

        for literal in &literals {
            self.seen[literal.get_propositional_variable()] = false;
        }

        let mut learned_clause = LearnedClause {
            literals,
            backjump_level,
        };

        if self.minimise_learned_clauses {
            self.minimiser
                .remove_dominated_literals(&mut learned_clause, assignments, clause_database);
            learned_clause.backjump_level = learned_clause
                .literals
                .get(1)
                .map(|literal| assignments.level_of(literal.get_propositional_variable()))
                .unwrap_or(0);
        }

        gourd_assert_moderate!(self.seen.iter().all(|&seen| !seen));
        gourd_assert_simple!(
            is_asserting(&learned_clause, assignments),
            "learned clause {:?} is not asserting at level {}",
            learned_clause.literals,
            learned_clause.backjump_level
        );

        learned_clause
    }

    pub(crate) fn num_minimised_literals(&self) -> u64 {
        self.minimiser.num_literals_removed_total()
    }
}

/// Whether exactly one literal is of the current level, every other literal is false at the
/// backjump level, and the backjump level is the highest level among the other literals.
fn is_asserting(learned_clause: &LearnedClause, assignments: &Assignments) -> bool {
    let current_level = assignments.current_level();
    let level_of = |literal: &Literal| assignments.level_of(literal.get_propositional_variable());

    let Some(asserting_literal) = learned_clause.literals.first() else {
        return false;
    };

    let other_levels_are_lower = learned_clause.literals[1..]
        .iter()
        .all(|literal| level_of(literal) <= learned_clause.backjump_level);
    let backjump_level_is_tight = learned_clause
        .literals
        .get(1)
        .map(|literal| level_of(literal) == learned_clause.backjump_level)
        .unwrap_or(learned_clause.backjump_level == 0);

    level_of(asserting_literal) == current_level
        && assignments.is_literal_false(*asserting_literal)
        && learned_clause.backjump_level < current_level
        && other_levels_are_lower
        && backjump_level_is_tight
}
