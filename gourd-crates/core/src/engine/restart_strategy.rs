use log::warn;

use crate::basic_types::sequence_generators::ConstantSequence;
use crate::basic_types::sequence_generators::GeometricSequence;
use crate::basic_types::sequence_generators::LubySequence;
use crate::basic_types::sequence_generators::SequenceGenerator;
use crate::basic_types::sequence_generators::SequenceGeneratorType;
use crate::statistics::CumulativeMovingAverage;
use crate::statistics::MovingAverage;

/// The options which determine when the search restarts.
///
/// A restart backtracks to the root while keeping every learned clause. The number of conflicts
/// between two restarts follows [`RestartOptions::sequence_generator_type`], scaled by
/// [`RestartOptions::base_interval`]. A due restart is skipped while the search assigns clearly
/// more variables than on average, since it is then likely close to a solution.
#[derive(Debug, Clone, Copy)]
pub struct RestartOptions {
    /// Restarts are disabled altogether; the search never leaves a branch voluntarily.
    pub no_restarts: bool,
    pub sequence_generator_type: SequenceGeneratorType,
    /// Multiplies every element of the restart sequence. With constant restarts and a base
    /// interval of 50, a restart is triggered every 50 conflicts.
    pub base_interval: u64,
    /// The minimum number of conflicts before the first restart is considered.
    pub min_num_conflicts_before_first_restart: u64,
    /// A restart is blocked if the number of assigned variables at a conflict exceeds the
    /// average number at conflicts multiplied by this coefficient.
    pub num_assigned_coef: f64,
    /// The factor of the geometric sequence `x_i = x_{i-1} * geometric_coef`.
    pub geometric_coef: f64,
}

impl Default for RestartOptions {
    fn default() -> Self {
        Self {
            no_restarts: true,
            sequence_generator_type: SequenceGeneratorType::Constant,
            base_interval: 50,
            min_num_conflicts_before_first_restart: 0,
            num_assigned_coef: 1.4,
            geometric_coef: 1.5,
        }
    }
}

#[derive(Debug)]
pub(crate) struct RestartStrategy {
    is_enabled: bool,
    sequence_generator: Box<dyn SequenceGenerator>,
    number_of_conflicts_encountered_since_restart: u64,
    /// Restarts are not considered before this many conflicts since the last restart.
    number_of_conflicts_until_restart: u64,
    minimum_number_of_conflicts_before_first_restart: u64,
    number_of_variables_coefficient: f64,
    number_of_assigned_variables_moving_average: CumulativeMovingAverage<u64>,
    number_of_restarts: u64,
    number_of_blocked_restarts: u64,
}

impl Default for RestartStrategy {
    fn default() -> Self {
        RestartStrategy::new(RestartOptions::default())
    }
}

impl RestartStrategy {
    pub(crate) fn new(options: RestartOptions) -> Self {
        let base_interval = if options.base_interval == 0 {
            warn!("A restart base interval of 0 is not allowed, using 1 instead");
            1
        } else {
            options.base_interval
        };

        let mut sequence_generator: Box<dyn SequenceGenerator> =
            match options.sequence_generator_type {
                SequenceGeneratorType::Constant => Box::new(ConstantSequence::new(base_interval)),
                SequenceGeneratorType::Geometric => Box::new(GeometricSequence::new(
                    base_interval,
                    options.geometric_coef,
                )),
                SequenceGeneratorType::Luby => Box::new(LubySequence::new(base_interval)),
            };

        let number_of_conflicts_until_restart = sequence_generator.next();

        RestartStrategy {
            is_enabled: !options.no_restarts,
            sequence_generator,
            number_of_conflicts_encountered_since_restart: 0,
            number_of_conflicts_until_restart,
            minimum_number_of_conflicts_before_first_restart: options
                .min_num_conflicts_before_first_restart,
            number_of_variables_coefficient: options.num_assigned_coef,
            number_of_assigned_variables_moving_average: CumulativeMovingAverage::default(),
            number_of_restarts: 0,
            number_of_blocked_restarts: 0,
        }
    }

    /// Whether the search should backtrack to the root before its next decision.
    pub(crate) fn should_restart(&self) -> bool {
        self.is_enabled
            && !self.should_wait_for_first_restart()
            && self.number_of_conflicts_encountered_since_restart
                >= self.number_of_conflicts_until_restart
    }

    fn should_wait_for_first_restart(&self) -> bool {
        self.number_of_restarts == 0
            && self.number_of_conflicts_encountered_since_restart
                < self.minimum_number_of_conflicts_before_first_restart
    }

    /// Register a conflict which occurred with `number_of_assigned_variables` variables assigned.
    pub(crate) fn notify_conflict(&mut self, number_of_assigned_variables: u64) {
        if !self.is_enabled {
            return;
        }

        self.number_of_assigned_variables_moving_average
            .add_term(number_of_assigned_variables);
        self.number_of_conflicts_encountered_since_restart += 1;

        if self.should_block_restart(number_of_assigned_variables) {
            self.number_of_blocked_restarts += 1;
            self.reset_values();
        }
    }

    fn should_block_restart(&self, number_of_assigned_variables: u64) -> bool {
        if self.should_wait_for_first_restart() {
            return false;
        }

        let close_to_solution = number_of_assigned_variables as f64
            > self.number_of_assigned_variables_moving_average.value()
                * self.number_of_variables_coefficient;

        self.should_restart() && close_to_solution
    }

    pub(crate) fn notify_restart(&mut self) {
        self.number_of_restarts += 1;
        self.reset_values();
    }

    fn reset_values(&mut self) {
        self.number_of_conflicts_until_restart = self.sequence_generator.next();
        self.number_of_conflicts_encountered_since_restart = 0;
    }

    pub(crate) fn number_of_blocked_restarts(&self) -> u64 {
        self.number_of_blocked_restarts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enabled(sequence_generator_type: SequenceGeneratorType) -> RestartStrategy {
        RestartStrategy::new(RestartOptions {
            no_restarts: false,
            sequence_generator_type,
            base_interval: 2,
            // Never block.
            num_assigned_coef: f64::INFINITY,
            ..Default::default()
        })
    }

    #[test]
    fn disabled_strategy_never_restarts() {
        let mut strategy = RestartStrategy::default();
        for _ in 0..1000 {
            strategy.notify_conflict(1);
        }

        assert!(!strategy.should_restart());
    }

    #[test]
    fn constant_restarts_are_evenly_spaced() {
        let mut strategy = enabled(SequenceGeneratorType::Constant);

        strategy.notify_conflict(1);
        assert!(!strategy.should_restart());
        strategy.notify_conflict(1);
        assert!(strategy.should_restart());

        strategy.notify_restart();
        assert!(!strategy.should_restart());
        strategy.notify_conflict(1);
        strategy.notify_conflict(1);
        assert!(strategy.should_restart());
    }

    #[test]
    fn luby_restarts_follow_the_sequence() {
        let mut strategy = enabled(SequenceGeneratorType::Luby);

        let mut intervals = Vec::new();
        for _ in 0..5 {
            let mut conflicts = 0;
            while !strategy.should_restart() {
                strategy.notify_conflict(1);
                conflicts += 1;
            }
            strategy.notify_restart();
            intervals.push(conflicts);
        }

        assert_eq!(vec![2, 2, 4, 2, 2], intervals);
    }

    #[test]
    fn restarts_are_blocked_close_to_a_solution() {
        let mut strategy = RestartStrategy::new(RestartOptions {
            no_restarts: false,
            base_interval: 2,
            num_assigned_coef: 1.4,
            ..Default::default()
        });

        strategy.notify_conflict(10);
        strategy.notify_conflict(100);

        assert!(!strategy.should_restart());
        assert_eq!(1, strategy.number_of_blocked_restarts());
    }
}
