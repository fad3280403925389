use std::time::Duration;

use crate::create_statistics_struct;
use crate::statistics::log_statistic;
use crate::statistics::CumulativeMovingAverage;
use crate::statistics::Statistic;
use crate::statistics::StatisticLogger;

/// The statistics gathered during a single search.
#[derive(Debug, Default)]
pub(crate) struct SolverStatistics {
    pub(crate) engine_statistics: EngineStatistics,
    pub(crate) learned_clause_statistics: LearnedClauseStatistics,
}

impl SolverStatistics {
    pub(crate) fn log(&self, statistic_logger: StatisticLogger) {
        log_statistic("decisions", self.engine_statistics.num_decisions);
        log_statistic("conflicts", self.engine_statistics.num_conflicts);
        log_statistic("propagations", self.engine_statistics.num_propagations);
        log_statistic("restarts", self.engine_statistics.num_restarts);
        log_statistic("blockedRestarts", self.engine_statistics.num_blocked_restarts);
        log_statistic("peakDepth", self.engine_statistics.peak_depth);
        log_statistic(
            "solveTime",
            self.engine_statistics.time_spent_in_solver.as_secs_f64(),
        );
        self.learned_clause_statistics.log(statistic_logger)
    }
}

#[derive(Debug, Default)]
pub(crate) struct EngineStatistics {
    pub(crate) num_decisions: u64,
    pub(crate) num_conflicts: u64,
    /// The number of literals assigned by propagation.
    pub(crate) num_propagations: u64,
    pub(crate) num_restarts: u64,
    pub(crate) num_blocked_restarts: u64,
    /// The highest decision level reached.
    pub(crate) peak_depth: u64,
    pub(crate) time_spent_in_solver: Duration,
}

create_statistics_struct!(
    /// The statistics related to clause learning
    LearnedClauseStatistics {
        num_learned_clauses: u64,
        /// The number of learned clauses which have a size of 1
        num_unit_clauses_learned: u64,
        /// The average number of literals in a conflicting clause
        average_conflict_size: CumulativeMovingAverage<u64>,
        average_learned_clause_length: CumulativeMovingAverage<u64>,
        /// The average number of levels which are undone after a conflict
        average_backjump_distance: CumulativeMovingAverage<u64>,
        /// The number of literals removed from learned clauses by recursive minimisation
        num_minimised_literals: u64,
});
