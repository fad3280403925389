use crate::containers::KeyedVec;
use crate::variables::Literal;
use crate::variables::PropositionalVariable;

/// A complete assignment of all variables of a formula.
///
/// Variables which the search never needed to assign are reported as false.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    values: KeyedVec<PropositionalVariable, bool>,
}

impl Solution {
    pub(crate) fn new(values: KeyedVec<PropositionalVariable, bool>) -> Solution {
        Solution { values }
    }

    pub fn num_variables(&self) -> usize {
        self.values.len()
    }

    pub fn value(&self, variable: PropositionalVariable) -> bool {
        self.values[variable]
    }

    /// Whether the literal with the given DIMACS code is true.
    ///
    /// # Panics
    /// When the variable of `dimacs_literal` does not exist.
    pub fn is_dimacs_literal_true(&self, dimacs_literal: i32) -> bool {
        let variable = PropositionalVariable::from_dimacs_index(dimacs_literal.unsigned_abs());
        self.values[variable] == dimacs_literal.is_positive()
    }

    pub fn is_literal_true(&self, literal: Literal) -> bool {
        self.values[literal.get_propositional_variable()] == literal.is_positive()
    }

    /// The model in DIMACS form: for every variable `v` in `1..=n`, `v` if it is true and `-v`
    /// otherwise.
    pub fn as_dimacs_model(&self) -> Vec<i32> {
        self.values
            .iter_enumerated()
            .map(|(variable, &value)| Literal::new(variable, value).to_dimacs())
            .collect()
    }
}
