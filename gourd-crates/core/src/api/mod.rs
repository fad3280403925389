mod outputs;
pub(crate) mod solver;

pub mod results {
    //! Contains the outputs of solving with the [`Solver`].
    //!
    //! [`SatisfactionResult`] is returned by [`Solver::satisfy`] and holds the [`Solution`] when
    //! one is found. [`SolveOutcome`] is the flattened form returned by [`crate::solve`], with the
    //! model given as DIMACS literals.
    pub use crate::api::outputs::SatisfactionResult;
    pub use crate::api::outputs::SolveOutcome;
    pub use crate::api::outputs::SolveStatus;
    pub use crate::basic_types::Solution;
    #[cfg(doc)]
    use crate::Solver;
}

pub mod variables {
    //! Contains the variables which are used by the [`Solver`].
    //!
    //! A [`PropositionalVariable`] is a boolean variable and a [`Literal`] is a variable together
    //! with a polarity. Clauses are given to the [`Solver`] in DIMACS form, where variable `v` is
    //! the integer `v` and its negation is `-v`.
    pub use crate::basic_types::Literal;
    pub use crate::basic_types::PropositionalVariable;
    #[cfg(doc)]
    use crate::Solver;
}

pub mod options {
    //! Contains the options which can be passed to the [`Solver`].
    //!
    //! These influence the following aspects:
    //! - How clauses are propagated
    //! - Which variable is decided on next
    //! - When the search restarts
    //! - Whether learned clauses are minimised
    pub use crate::basic_types::sequence_generators::SequenceGeneratorType;
    pub use crate::branching::DecisionPolicyKind;
    pub use crate::branching::VsidsOptions;
    pub use crate::engine::PropagatorKind;
    pub use crate::engine::RestartOptions;
    pub use crate::engine::SolverOptions;
    #[cfg(doc)]
    use crate::Solver;
}

pub mod termination {
    //! Contains the conditions which are used to determine when the [`Solver`] should terminate
    //! even when it is not yet known whether the clauses are satisfiable.
    //!
    //! A [`TerminationCondition`] is polled by the [`Solver`] before every decision. The most
    //! common example is [`TimeBudget`], which stops the [`Solver`] once the time budget is
    //! exceeded.
    pub use crate::engine::termination::Combinator;
    pub use crate::engine::termination::ConflictBudget;
    pub use crate::engine::termination::DecisionBudget;
    pub use crate::engine::termination::Indefinite;
    pub use crate::engine::termination::TerminationCondition;
    pub use crate::engine::termination::TimeBudget;
    #[cfg(doc)]
    use crate::Solver;
}

pub use solver::solve;
pub use solver::Solver;

pub use crate::basic_types::InputError;
