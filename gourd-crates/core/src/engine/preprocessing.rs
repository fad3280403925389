//! Validation and normalisation of input clauses, and pure literal detection.
use std::num::NonZeroI32;

use crate::basic_types::HashSet;
use crate::basic_types::InputError;
use crate::containers::KeyedVec;
use crate::containers::StorageKey;
use crate::variables::Literal;
use crate::variables::PropositionalVariable;

/// Convert the DIMACS clause at `clause_index` to literals.
///
/// Duplicate literals are merged, keeping the first occurrence. A tautology (a clause containing
/// a literal and its negation) is satisfied by every assignment and yields `None`. Every literal
/// is validated, including those after the complementary pair of a tautology.
pub(crate) fn normalise_clause(
    dimacs_clause: &[i32],
    clause_index: usize,
    num_variables: usize,
) -> Result<Option<Vec<Literal>>, InputError> {
    let mut literals = Vec::with_capacity(dimacs_clause.len());
    let mut present: HashSet<Literal> = HashSet::default();
    let mut is_tautology = false;

    for &dimacs_literal in dimacs_clause {
        let literal = to_literal(dimacs_literal, clause_index, num_variables)?;

        is_tautology |= present.contains(&!literal);
        if present.insert(literal) {
            literals.push(literal);
        }
    }

    Ok((!is_tautology).then_some(literals))
}

fn to_literal(
    dimacs_literal: i32,
    clause_index: usize,
    num_variables: usize,
) -> Result<Literal, InputError> {
    let Some(dimacs_literal) = NonZeroI32::new(dimacs_literal) else {
        return Err(InputError::ZeroLiteral { clause_index });
    };

    if dimacs_literal.unsigned_abs().get() as usize > num_variables {
        return Err(InputError::VariableOutOfRange {
            literal: dimacs_literal.get(),
            num_variables,
            clause_index,
        });
    }

    Ok(Literal::from_dimacs(dimacs_literal))
}

/// The literals whose negation occurs in none of `clauses`, while they occur themselves.
///
/// Setting a pure literal to true never falsifies a clause, so it preserves satisfiability. It can
/// however exclude models, so this is not applied when every model matters.
pub(crate) fn pure_literals<'a>(
    num_variables: usize,
    clauses: impl IntoIterator<Item = &'a [Literal]>,
) -> Vec<Literal> {
    let mut occurs: KeyedVec<Literal, bool> = KeyedVec::with_len(2 * num_variables, false);
    for clause in clauses {
        for &literal in clause {
            occurs[literal] = true;
        }
    }

    (0..num_variables)
        .map(PropositionalVariable::create_from_index)
        .filter_map(|variable| {
            let positive = Literal::new(variable, true);
            match (occurs[positive], occurs[!positive]) {
                (true, false) => Some(positive),
                (false, true) => Some(!positive),
                _ => None,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(code: i32) -> Literal {
        Literal::from_dimacs(NonZeroI32::new(code).unwrap())
    }

    #[test]
    fn duplicates_are_merged_in_order() {
        let clause = normalise_clause(&[3, -1, 3, 2, -1], 0, 3).unwrap();

        assert_eq!(Some(vec![lit(3), lit(-1), lit(2)]), clause);
    }

    #[test]
    fn tautologies_are_dropped() {
        assert_eq!(Ok(None), normalise_clause(&[1, 2, -1], 0, 2));
    }

    #[test]
    fn empty_clause_is_kept() {
        assert_eq!(Ok(Some(vec![])), normalise_clause(&[], 0, 2));
    }

    #[test]
    fn malformed_literals_are_rejected() {
        assert_eq!(
            Err(InputError::ZeroLiteral { clause_index: 4 }),
            normalise_clause(&[1, 0], 4, 2)
        );
        assert_eq!(
            Err(InputError::VariableOutOfRange {
                literal: -3,
                num_variables: 2,
                clause_index: 1
            }),
            normalise_clause(&[1, -3], 1, 2)
        );
    }

    #[test]
    fn malformed_literals_after_a_complementary_pair_are_rejected() {
        assert_eq!(
            Err(InputError::ZeroLiteral { clause_index: 0 }),
            normalise_clause(&[1, -1, 0], 0, 1)
        );
        assert_eq!(
            Err(InputError::VariableOutOfRange {
                literal: 5,
                num_variables: 1,
                clause_index: 2
            }),
            normalise_clause(&[1, -1, 5], 2, 1)
        );
    }

    #[test]
    fn pure_literals_occur_in_one_polarity_only() {
        let clauses = [vec![lit(1), lit(-2)], vec![lit(1), lit(2), lit(-3)]];

        let pure = pure_literals(4, clauses.iter().map(Vec::as_slice));

        assert_eq!(vec![lit(1), lit(-3)], pure);
    }
}
