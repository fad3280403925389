use crate::variables::Literal;

/// The result of conflict analysis.
///
/// The asserting literal is stored at index 0. If the clause has more than one literal, index 1
/// holds a literal assigned at `backjump_level`, the highest level among the remaining literals.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct LearnedClause {
    pub(crate) literals: Vec<Literal>,
    pub(crate) backjump_level: usize,
}

impl LearnedClause {
    pub(crate) fn asserting_literal(&self) -> Literal {
        self.literals[0]
    }

    pub(crate) fn is_unit(&self) -> bool {
        self.literals.len() == 1
    }
}
