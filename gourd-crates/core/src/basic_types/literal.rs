use std::fmt::Display;
use std::num::NonZeroI32;
use std::ops::Not;

use crate::containers::StorageKey;

/// A boolean variable. Variables are indexed from 0 internally; DIMACS variable `v` is stored at
/// index `v - 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PropositionalVariable {
    index: u32,
}

impl PropositionalVariable {
    pub fn new(index: u32) -> PropositionalVariable {
        PropositionalVariable { index }
    }

    /// The variable for a 1-based DIMACS index.
    ///
    /// # Panics
    /// When `dimacs_index` is 0, which is not a DIMACS variable.
    pub fn from_dimacs_index(dimacs_index: u32) -> PropositionalVariable {
        assert!(dimacs_index > 0, "0 is not a DIMACS variable index");
        PropositionalVariable::new(dimacs_index - 1)
    }

    pub fn get_index(&self) -> u32 {
        self.index
    }

    pub fn dimacs_index(&self) -> u32 {
        self.index + 1
    }
}

impl StorageKey for PropositionalVariable {
    fn index(&self) -> usize {
        self.index as usize
    }

    fn create_from_index(index: usize) -> Self {
        PropositionalVariable::new(index as u32)
    }
}

impl Display for PropositionalVariable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "x{}", self.dimacs_index())
    }
}

/// A variable together with a polarity, encoded as `2 * variable + is_positive` so that the two
/// literals of a variable are adjacent and can index per-literal storage directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Literal {
    code: u32,
}

impl Literal {
    pub fn new(variable: PropositionalVariable, is_positive: bool) -> Literal {
        Literal {
            code: variable.index * 2 + is_positive as u32,
        }
    }

    /// Convert a DIMACS literal, e.g. `-3` becomes the negative literal of the third variable.
    pub fn from_dimacs(dimacs_literal: NonZeroI32) -> Literal {
        Literal::new(
            PropositionalVariable::from_dimacs_index(dimacs_literal.unsigned_abs().get()),
            dimacs_literal.get().is_positive(),
        )
    }

    pub fn to_dimacs(self) -> i32 {
        let index = self.get_propositional_variable().dimacs_index() as i32;
        if self.is_positive() {
            index
        } else {
            -index
        }
    }

    pub fn is_positive(&self) -> bool {
        (self.code & 1) == 1
    }

    pub fn is_negative(&self) -> bool {
        !self.is_positive()
    }

    pub fn get_propositional_variable(&self) -> PropositionalVariable {
        PropositionalVariable::new(self.code / 2)
    }
}

impl Not for Literal {
    type Output = Literal;

    fn not(self) -> Literal {
        Literal {
            code: self.code ^ 1,
        }
    }
}

impl StorageKey for Literal {
    fn index(&self) -> usize {
        self.code as usize
    }

    fn create_from_index(index: usize) -> Self {
        Literal { code: index as u32 }
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_negative() {
            write!(f, "~{}", self.get_propositional_variable())
        } else {
            write!(f, "{}", self.get_propositional_variable())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dimacs(code: i32) -> NonZeroI32 {
        NonZeroI32::new(code).unwrap()
    }

    #[test]
    fn dimacs_literals_map_to_zero_based_variables() {
        let literal = Literal::from_dimacs(dimacs(-3));

        assert_eq!(2, literal.get_propositional_variable().get_index());
        assert!(literal.is_negative());
        assert_eq!(-3, literal.to_dimacs());
    }

    #[test]
    #[should_panic(expected = "0 is not a DIMACS variable index")]
    fn dimacs_index_zero_is_not_a_variable() {
        let _ = PropositionalVariable::from_dimacs_index(0);
    }

    #[test]
    fn negation_flips_only_the_polarity() {
        let literal = Literal::from_dimacs(dimacs(5));

        assert_eq!(-5, (!literal).to_dimacs());
        assert_eq!(
            literal.get_propositional_variable(),
            (!literal).get_propositional_variable()
        );
        assert_eq!(literal, !!literal);
    }

    #[test]
    fn literals_of_one_variable_have_adjacent_indices() {
        let variable = PropositionalVariable::new(4);

        let positive = Literal::new(variable, true);
        let negative = Literal::new(variable, false);

        assert_eq!(8, negative.index());
        assert_eq!(9, positive.index());
    }

    #[test]
    fn display_uses_dimacs_numbering() {
        assert_eq!("~x2", Literal::from_dimacs(dimacs(-2)).to_string());
        assert_eq!("x7", Literal::from_dimacs(dimacs(7)).to_string());
    }
}
