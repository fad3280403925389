use std::fmt::Display;
use std::ops::Index;

use itertools::Itertools;

use crate::basic_types::ClauseReference;
use crate::containers::KeyedVec;
use crate::variables::Literal;

/// A disjunction of literals.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Clause {
    literals: Vec<Literal>,
    is_learned: bool,
}

impl Clause {
    pub(crate) fn get_literal_slice(&self) -> &[Literal] {
        &self.literals
    }

    pub(crate) fn len(&self) -> usize {
        self.literals.len()
    }

    pub(crate) fn is_learned(&self) -> bool {
        self.is_learned
    }
}

impl Index<usize> for Clause {
    type Output = Literal;

    fn index(&self, index: usize) -> &Literal {
        &self.literals[index]
    }
}

impl Display for Clause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({})", self.literals.iter().join(" v "))
    }
}

/// Owns every clause of the search: the input clauses followed by the learned clauses.
///
/// The database only grows. A [`ClauseReference`] therefore stays valid for as long as the
/// database exists, which is what allows the assignment store to use references as reasons.
#[derive(Clone, Debug, Default)]
pub(crate) struct ClauseDatabase {
    clauses: KeyedVec<ClauseReference, Clause>,
    num_learned_clauses: usize,
}

impl ClauseDatabase {
    pub(crate) fn add_clause(&mut self, literals: Vec<Literal>) -> ClauseReference {
        self.clauses.push(Clause {
            literals,
            is_learned: false,
        })
    }

    pub(crate) fn add_learned_clause(&mut self, literals: Vec<Literal>) -> ClauseReference {
        self.num_learned_clauses += 1;
        self.clauses.push(Clause {
            literals,
            is_learned: true,
        })
    }

    pub(crate) fn get_clause(&self, reference: ClauseReference) -> &Clause {
        &self.clauses[reference]
    }

    pub(crate) fn get_literal_slice(&self, reference: ClauseReference) -> &[Literal] {
        self.clauses[reference].get_literal_slice()
    }

    pub(crate) fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    pub(crate) fn num_learned_clauses(&self) -> usize {
        self.num_learned_clauses
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (ClauseReference, &Clause)> {
        self.clauses.iter_enumerated()
    }

    #[cfg(test)]
    pub(crate) fn learned_clauses(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter().filter(|clause| clause.is_learned())
    }
}

impl Index<ClauseReference> for ClauseDatabase {
    type Output = Clause;

    fn index(&self, reference: ClauseReference) -> &Clause {
        self.get_clause(reference)
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroI32;

    use super::*;

    fn clause(codes: &[i32]) -> Vec<Literal> {
        codes
            .iter()
            .map(|&code| Literal::from_dimacs(NonZeroI32::new(code).unwrap()))
            .collect()
    }

    #[test]
    fn references_are_stable_across_appends() {
        let mut database = ClauseDatabase::default();

        let first = database.add_clause(clause(&[1, -2]));
        let learned = database.add_learned_clause(clause(&[2]));
        let _ = database.add_clause(clause(&[-1, 3]));

        assert_eq!(clause(&[1, -2]), database.get_literal_slice(first));
        assert!(database[learned].is_learned());
        assert!(!database[first].is_learned());
        assert_eq!(3, database.num_clauses());
        assert_eq!(1, database.num_learned_clauses());
    }

    #[test]
    fn clauses_are_displayed_as_disjunctions() {
        let mut database = ClauseDatabase::default();
        let reference = database.add_clause(clause(&[1, -2, 3]));

        assert_eq!("(x1 v ~x2 v x3)", database[reference].to_string());
    }
}
