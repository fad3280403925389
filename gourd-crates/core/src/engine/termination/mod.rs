//! A [`TerminationCondition`] is polled by the solver during search. It tells the solver to give
//! up, even though no conclusion has been reached yet. The most common example is
//! [`TimeBudget`], which gives the solver a fixed amount of wall-clock time.

mod combinator;
mod conflict_budget;
mod decision_budget;
mod indefinite;
mod time_budget;

pub use combinator::Combinator;
pub use conflict_budget::ConflictBudget;
pub use decision_budget::DecisionBudget;
pub use indefinite::Indefinite;
pub use time_budget::TimeBudget;

/// Determines when the solver should give up searching.
pub trait TerminationCondition {
    /// Returns `true` when the solver should stop, `false` otherwise.
    fn should_stop(&mut self) -> bool;

    fn decision_has_been_made(&mut self) {}

    fn conflict_has_been_found(&mut self) {}
}

impl<T: TerminationCondition> TerminationCondition for Option<T> {
    fn should_stop(&mut self) -> bool {
        match self {
            Some(t) => t.should_stop(),
            None => false,
        }
    }

    fn decision_has_been_made(&mut self) {
        if let Some(t) = self {
            t.decision_has_been_made()
        }
    }

    fn conflict_has_been_found(&mut self) {
        if let Some(t) = self {
            t.conflict_has_been_found()
        }
    }
}

impl<T: TerminationCondition + ?Sized> TerminationCondition for &mut T {
    fn should_stop(&mut self) -> bool {
        (**self).should_stop()
    }

    fn decision_has_been_made(&mut self) {
        (**self).decision_has_been_made()
    }

    fn conflict_has_been_found(&mut self) {
        (**self).conflict_has_been_found()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_condition_never_stops() {
        let mut termination: Option<DecisionBudget> = None;
        termination.decision_has_been_made();

        assert!(!termination.should_stop());
    }

    #[test]
    fn combinator_stops_when_either_side_stops() {
        let mut termination = Combinator::new(DecisionBudget::new(2), ConflictBudget::new(1));
        assert!(!termination.should_stop());

        termination.conflict_has_been_found();
        assert!(termination.should_stop());
    }

    #[test]
    fn decision_budget_counts_decisions() {
        let mut termination = DecisionBudget::new(2);

        termination.decision_has_been_made();
        assert!(!termination.should_stop());
        termination.decision_has_been_made();
        assert!(termination.should_stop());
    }

    #[test]
    fn exhausted_time_budget_stops() {
        let mut termination = TimeBudget::starting_now(std::time::Duration::ZERO);
        assert!(termination.should_stop());
    }
}
