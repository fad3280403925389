use std::time::Instant;

use log::debug;
use log::trace;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use super::conflict_analysis::ConflictAnalyser;
use super::preprocessing::pure_literals;
use super::propagation::ClausalPropagator;
use super::propagation::NaivePropagator;
use super::propagation::PropagatorKind;
use super::propagation::WatchedLiteralPropagator;
use super::restart_strategy::RestartOptions;
use super::restart_strategy::RestartStrategy;
use super::sat::Assignments;
use super::sat::ClauseDatabase;
use super::solver_statistics::SolverStatistics;
use crate::basic_types::ClauseReference;
use crate::basic_types::Solution;
use crate::branching::DecisionPolicy;
use crate::branching::DecisionPolicyKind;
use crate::branching::InputOrder;
use crate::branching::JeroslowWang;
use crate::branching::Vsids;
use crate::branching::VsidsOptions;
use crate::gourd_assert_moderate;
use crate::gourd_assert_simple;
use crate::statistics::log_statistic_postfix;
use crate::statistics::should_log_statistics;
use crate::statistics::MovingAverage;
use crate::statistics::StatisticLogger;
use crate::termination::TerminationCondition;
use crate::variables::Literal;

/// Options for the solver which determine how the search is performed.
///
/// The default is the plain CDCL search: naive propagation, input order branching with true
/// first, no restarts and no clause minimisation.
#[derive(Debug, Clone)]
pub struct SolverOptions {
    pub propagator: PropagatorKind,
    pub decision_policy: DecisionPolicyKind,
    pub restart_options: RestartOptions,
    pub vsids_options: VsidsOptions,
    /// Remove literals from learned clauses which are implied by the other literals.
    pub learned_clause_minimisation: bool,
    /// Set every pure literal to true at the root before the search starts.
    pub pure_literal_elimination: bool,
    /// The random generator used by the heuristics, seeded for reproducible runs.
    pub random_generator: SmallRng,
}

impl Default for SolverOptions {
    fn default() -> Self {
        SolverOptions {
            propagator: PropagatorKind::default(),
            decision_policy: DecisionPolicyKind::default(),
            restart_options: RestartOptions::default(),
            vsids_options: VsidsOptions::default(),
            learned_clause_minimisation: false,
            pure_literal_elimination: false,
            random_generator: SmallRng::seed_from_u64(42),
        }
    }
}

/// The outcome of [`CdclSolver::solve`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum CdclExecutionFlag {
    /// Every variable is assigned and no clause is falsified.
    Feasible,
    /// A conflict was derived at the root.
    Infeasible,
    /// The termination condition triggered before a conclusion was reached.
    Timeout,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SearchState {
    Propagate,
    Conflict(ClauseReference),
    Decide,
    Sat,
    Unsat,
}

/// Conflict-driven clause learning over a fixed set of clauses.
///
/// The search alternates between propagating to a fixpoint and deciding on an unassigned
/// literal. Every conflict above the root is analysed into an asserting learned clause; the
/// search then backjumps to the level where that clause becomes unit and propagates its asserting
/// literal. A conflict at the root proves the clauses unsatisfiable.
#[derive(Debug)]
pub(crate) struct CdclSolver {
    assignments: Assignments,
    clause_database: ClauseDatabase,
    propagator: Box<dyn ClausalPropagator>,
    decision_policy: Box<dyn DecisionPolicy>,
    conflict_analyser: ConflictAnalyser,
    restart_strategy: RestartStrategy,
    state: SearchState,
    statistics: SolverStatistics,
}

impl CdclSolver {
    /// Create a solver over `clauses`, which must be normalised: no duplicate literals, no
    /// tautologies and only variables below `num_variables`.
    pub(crate) fn new(
        num_variables: usize,
        clauses: impl IntoIterator<Item = Vec<Literal>>,
        options: &SolverOptions,
    ) -> CdclSolver {
        let mut clause_database = ClauseDatabase::default();
        for clause in clauses {
            let _ = clause_database.add_clause(clause);
        }

        let mut propagator: Box<dyn ClausalPropagator> = match options.propagator {
            PropagatorKind::NaiveScan => Box::new(NaivePropagator),
            PropagatorKind::WatchedLiterals => {
                Box::new(WatchedLiteralPropagator::new(num_variables))
            }
        };
        for (reference, _) in clause_database.iter() {
            propagator.clause_added(reference, &clause_database);
        }

        let decision_policy: Box<dyn DecisionPolicy> = match options.decision_policy {
            DecisionPolicyKind::InputOrder => Box::new(InputOrder::default()),
            DecisionPolicyKind::Vsids => Box::new(Vsids::new(
                num_variables,
                options.vsids_options,
                &mut options.random_generator.clone(),
            )),
            DecisionPolicyKind::JeroslowWang => Box::new(JeroslowWang::new(
                num_variables,
                clause_database
                    .iter()
                    .map(|(_, clause)| clause.get_literal_slice()),
            )),
        };

        let mut assignments = Assignments::new(num_variables);
        if options.pure_literal_elimination {
            let pure_literals = pure_literals(
                num_variables,
                clause_database
                    .iter()
                    .map(|(_, clause)| clause.get_literal_slice()),
            );
            debug!("Setting {} pure literals at the root", pure_literals.len());

            for literal in pure_literals {
                let enqueue_result = assignments.enqueue(literal, None);
                gourd_assert_simple!(enqueue_result.is_ok());
            }
        }

        CdclSolver {
            assignments,
            clause_database,
            propagator,
            decision_policy,
            conflict_analyser: ConflictAnalyser::new(
                num_variables,
                options.learned_clause_minimisation,
            ),
            restart_strategy: RestartStrategy::new(options.restart_options),
            state: SearchState::Propagate,
            statistics: SolverStatistics::default(),
        }
    }

    /// Search until the clauses are proven satisfiable or unsatisfiable, or until `termination`
    /// triggers. A search which timed out can be resumed by calling this method again.
    pub(crate) fn solve(
        &mut self,
        termination: &mut impl TerminationCondition,
    ) -> CdclExecutionFlag {
        let start_time = Instant::now();
        debug!(
            "Starting search over {} variables and {} clauses",
            self.assignments.num_variables(),
            self.clause_database.num_clauses()
        );

        let flag = loop {
            self.state = match self.state {
                SearchState::Propagate => self.propagate(),
                SearchState::Conflict(conflict) => {
                    self.statistics.engine_statistics.num_conflicts += 1;
                    termination.conflict_has_been_found();

                    if self.assignments.is_at_root() {
                        SearchState::Unsat
                    } else {
                        self.resolve_conflict(conflict);
                        SearchState::Propagate
                    }
                }
                SearchState::Decide => {
                    if termination.should_stop() {
                        debug!("Search terminated before reaching a conclusion");
                        break CdclExecutionFlag::Timeout;
                    }

                    if self.restart_strategy.should_restart() {
                        self.restart();
                    }

                    self.decide(termination)
                }
                SearchState::Sat => break CdclExecutionFlag::Feasible,
                SearchState::Unsat => break CdclExecutionFlag::Infeasible,
            };
        };

        self.statistics.engine_statistics.time_spent_in_solver += start_time.elapsed();
        self.statistics.engine_statistics.num_blocked_restarts =
            self.restart_strategy.number_of_blocked_restarts();
        self.statistics.learned_clause_statistics.num_minimised_literals =
            self.conflict_analyser.num_minimised_literals();

        debug!(
            "Search finished: {flag:?}, {} clauses learned so far",
            self.clause_database.num_learned_clauses()
        );
        flag
    }

    fn propagate(&mut self) -> SearchState {
        let num_assigned_before = self.assignments.num_assigned();
        let result = self
            .propagator
            .propagate(&mut self.assignments, &self.clause_database);
        self.statistics.engine_statistics.num_propagations +=
            (self.assignments.num_assigned() - num_assigned_before) as u64;

        match result {
            Err(conflict) => SearchState::Conflict(conflict),
            Ok(()) if self.assignments.all_assigned() => SearchState::Sat,
            Ok(()) => SearchState::Decide,
        }
    }

    fn decide(&mut self, termination: &mut impl TerminationCondition) -> SearchState {
        let Some(decision) = self.decision_policy.next_decision(&self.assignments) else {
            gourd_assert_simple!(self.assignments.all_assigned());
            return SearchState::Sat;
        };
        gourd_assert_moderate!(
            !self
                .assignments
                .is_variable_assigned(decision.get_propositional_variable()),
            "decided on the assigned literal {decision}"
        );

        self.assignments.new_decision_level();
        let enqueue_result = self.assignments.enqueue(decision, None);
        gourd_assert_simple!(enqueue_result.is_ok());

        self.statistics.engine_statistics.num_decisions += 1;
        self.statistics.engine_statistics.peak_depth = self
            .statistics
            .engine_statistics
            .peak_depth
            .max(self.assignments.current_level() as u64);
        termination.decision_has_been_made();

        SearchState::Propagate
    }

    fn resolve_conflict(&mut self, conflict: ClauseReference) {
        let current_level = self.assignments.current_level();
        let num_assigned = self.assignments.num_assigned() as u64;

        let decision_policy = &mut self.decision_policy;
        let learned_clause = self.conflict_analyser.analyse(
            conflict,
            &self.assignments,
            &self.clause_database,
            |variable| decision_policy.on_conflict_variable(variable),
        );
        self.decision_policy.on_conflict();
        self.restart_strategy.notify_conflict(num_assigned);

        let statistics = &mut self.statistics.learned_clause_statistics;
        statistics.num_learned_clauses += 1;
        statistics
            .average_conflict_size
            .add_term(self.clause_database[conflict].len() as u64);
        statistics
            .average_learned_clause_length
            .add_term(learned_clause.literals.len() as u64);
        statistics
            .average_backjump_distance
            .add_term((current_level - learned_clause.backjump_level) as u64);
        if learned_clause.is_unit() {
            statistics.num_unit_clauses_learned += 1;
            debug!("Learned unit clause {}", learned_clause.asserting_literal());
        }
        trace!(
            "Conflict on {} clause {conflict} at level {current_level} (decision {:?}), learned \
             {:?} and backjumping to level {}",
            if self.clause_database[conflict].is_learned() {
                "learned"
            } else {
                "input"
            },
            self.assignments.decision_at_level(current_level),
            learned_clause.literals,
            learned_clause.backjump_level
        );

        self.backtrack(learned_clause.backjump_level);

        let asserting_literal = learned_clause.asserting_literal();
        let reference = self
            .clause_database
            .add_learned_clause(learned_clause.literals);
        self.propagator
            .clause_added(reference, &self.clause_database);
        self.decision_policy
            .on_learned_clause(self.clause_database.get_literal_slice(reference));

        let enqueue_result = self.assignments.enqueue(asserting_literal, Some(reference));
        gourd_assert_simple!(
            enqueue_result.is_ok(),
            "the asserting literal {asserting_literal} is false after backjumping"
        );
    }

    fn restart(&mut self) {
        if !self.assignments.is_at_root() {
            debug!(
                "Restarting after {} conflicts",
                self.statistics.engine_statistics.num_conflicts
            );
            self.backtrack(0);
            self.statistics.engine_statistics.num_restarts += 1;
        }

        self.restart_strategy.notify_restart();
    }

    fn backtrack(&mut self, level: usize) {
        for literal in self.assignments.cancel_until(level) {
            self.decision_policy.on_unassign(literal);
        }
        self.propagator.synchronise(&self.assignments);
    }

    /// The current assignment, with unassigned variables set to false.
    pub(crate) fn solution(&self) -> Solution {
        Solution::new(self.assignments.values_defaulting_to_false())
    }

    pub(crate) fn log_statistics(&self) {
        if should_log_statistics() {
            self.statistics.log(StatisticLogger::default());
            log_statistic_postfix();
        }
    }

    #[cfg(test)]
    pub(crate) fn assignments(&self) -> &Assignments {
        &self.assignments
    }

    #[cfg(test)]
    pub(crate) fn clause_database(&self) -> &ClauseDatabase {
        &self.clause_database
    }
}
