use super::LearnedClause;
use crate::basic_types::HashMap;
use crate::basic_types::HashSet;
use crate::engine::sat::Assignments;
use crate::engine::sat::ClauseDatabase;
use crate::gourd_assert_moderate;
use crate::gourd_assert_simple;
use crate::variables::Literal;

/// The recursion depth after which a literal is conservatively considered not redundant.
const MAX_DEPTH: usize = 500;

/// Removes literals from a learned clause which are implied by the other literals of the clause.
///
/// A literal is dominated if the reasons on the trail derive it from a subset of the other
/// literals of the clause; dropping it keeps the clause entailed by the formula. The asserting
/// literal is never removed.
///
/// The labelling follows "Minimizing learned clauses" (Sörensson and Biere, SAT'09) and
/// "Improved conflict-clause minimization leads to improved propositional proof traces" (Van
/// Gelder, SAT'09). Labels are computed for the true literals on the trail, i.e. the negations of
/// the literals in the learned clause.
#[derive(Debug, Default)]
pub(crate) struct LearnedClauseMinimiser {
    current_depth: usize,
    allowed_decision_levels: HashSet<usize>,
    labels: HashMap<Literal, Label>,
    num_literals_removed_total: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Label {
    /// In the learned clause, but not yet known whether it is redundant.
    Seen,
    /// Cannot be derived from the literals of the learned clause.
    Poison,
    /// Derivable from the literals of the learned clause.
    Removable,
    /// In the learned clause and not redundant.
    Keep,
}

impl LearnedClauseMinimiser {
    /// Remove the dominated literals of `learned_clause`. Afterwards index 1 again holds a literal
    /// of the highest remaining level.
    pub(crate) fn remove_dominated_literals(
        &mut self,
        learned_clause: &mut LearnedClause,
        assignments: &Assignments,
        clause_database: &ClauseDatabase,
    ) {
        let num_literals_before_minimisation = learned_clause.literals.len();

        self.initialise(learned_clause, assignments);

        let mut end_position = 1;
        for index in 1..learned_clause.literals.len() {
            let learned_literal = learned_clause.literals[index];

            self.compute_label(!learned_literal, assignments, clause_database);

            let label = self.labels[&!learned_literal];
            if label == Label::Poison || label == Label::Keep {
                learned_clause.literals[end_position] = learned_literal;
                end_position += 1;
            }
        }
        learned_clause.literals.truncate(end_position);

        if learned_clause.literals.len() > 1 {
            let highest = (1..learned_clause.literals.len())
                .max_by_key(|&index| {
                    assignments.level_of(learned_clause.literals[index].get_propositional_variable())
                })
                .unwrap_or(1);
            learned_clause.literals.swap(1, highest);
        }

        self.clean_up();

        self.num_literals_removed_total +=
            (num_literals_before_minimisation - learned_clause.literals.len()) as u64;
    }

    pub(crate) fn num_literals_removed_total(&self) -> u64 {
        self.num_literals_removed_total
    }

    fn compute_label(
        &mut self,
        input_literal: Literal,
        assignments: &Assignments,
        clause_database: &ClauseDatabase,
    ) {
        gourd_assert_moderate!(assignments.is_literal_true(input_literal));

        if matches!(
            self.labels.get(&input_literal),
            Some(Label::Poison | Label::Removable | Label::Keep)
        ) {
            return;
        }

        let variable = input_literal.get_propositional_variable();

        if self.current_depth == MAX_DEPTH {
            self.assign_label(input_literal, Label::Poison);
            return;
        }

        // Literals of the learned clause which are decisions are labelled during initialisation,
        // any other decision cannot be derived.
        let reason = match assignments.reason_of(variable) {
            Some(reason) if assignments.level_of(variable) > 0 => reason,
            _ => {
                self.assign_label(input_literal, Label::Poison);
                return;
            }
        };

        if !self
            .allowed_decision_levels
            .contains(&assignments.level_of(variable))
        {
            self.assign_label(input_literal, Label::Poison);
            return;
        }

        self.current_depth += 1;
        for &reason_literal in clause_database.get_literal_slice(reason) {
            if reason_literal.get_propositional_variable() == variable {
                continue;
            }

            let antecedent = !reason_literal;
            if assignments.level_of(antecedent.get_propositional_variable()) == 0 {
                continue;
            }

            self.compute_label(antecedent, assignments, clause_database);

            if self.labels[&antecedent] == Label::Poison {
                let label = if self.labels.get(&input_literal) == Some(&Label::Seen) {
                    Label::Keep
                } else {
                    Label::Poison
                };
                self.assign_label(input_literal, label);
                self.current_depth -= 1;
                return;
            }
        }
        self.current_depth -= 1;

        self.assign_label(input_literal, Label::Removable);
    }

    fn assign_label(&mut self, literal: Literal, label: Label) {
        gourd_assert_moderate!(
            !matches!(self.labels.get(&literal), Some(existing) if *existing != Label::Seen),
            "cannot relabel literal {literal}"
        );
        let _ = self.labels.insert(literal, label);
    }

    fn initialise(&mut self, learned_clause: &LearnedClause, assignments: &Assignments) {
        gourd_assert_simple!(self.current_depth == 0);

        let _ = self
            .labels
            .insert(!learned_clause.asserting_literal(), Label::Keep);

        for &learned_literal in &learned_clause.literals[1..] {
            let literal = !learned_literal;
            let variable = literal.get_propositional_variable();

            let label = if assignments.is_decision(variable) {
                Label::Keep
            } else {
                Label::Seen
            };
            let _ = self.labels.insert(literal, label);

            let _ = self
                .allowed_decision_levels
                .insert(assignments.level_of(variable));
        }
    }

    fn clean_up(&mut self) {
        gourd_assert_simple!(self.current_depth == 0);

        self.allowed_decision_levels.clear();
        self.labels.clear();
    }
}
