use log::warn;

use super::DecisionPolicy;
use crate::basic_types::Random;
use crate::containers::KeyValueHeap;
use crate::containers::KeyedVec;
use crate::containers::StorageKey;
use crate::engine::sat::Assignments;
use crate::variables::Literal;
use crate::variables::PropositionalVariable;

/// The options of the [VSIDS \[1\]](https://dl.acm.org/doi/pdf/10.1145/378239.379017) heuristic.
///
/// # Bibliography
/// \[1\] M. W. Moskewicz, C. F. Madigan, Y. Zhao, L. Zhang, and S. Malik, ‘Chaff: Engineering an
/// efficient SAT solver’, in Proceedings of the 38th annual Design Automation Conference, 2001, pp.
/// 530–535.
#[derive(Clone, Copy, Debug)]
pub struct VsidsOptions {
    /// After every conflict the bump increment is multiplied by `1 / decay_factor`, which makes
    /// recent conflicts weigh more. Must lie in `(0, 1]`.
    pub decay_factor: f64,
    /// Decide on the value a variable had before it was last unassigned, rather than on true.
    pub phase_saving: bool,
    /// Every variable starts with an activity drawn uniformly from `[0, initial_activity_noise)`.
    /// With 0 all activities start equal and the input order breaks the ties.
    pub initial_activity_noise: f64,
}

impl Default for VsidsOptions {
    fn default() -> Self {
        VsidsOptions {
            decay_factor: 0.95,
            phase_saving: true,
            initial_activity_noise: 0.0,
        }
    }
}

const DEFAULT_VSIDS_INCREMENT: f64 = 1.0;
const DEFAULT_VSIDS_MAX_THRESHOLD: f64 = 1e100;

/// Variable State Independent Decaying Sum: decides on the unassigned variable which has
/// appeared most in (recent) conflicts.
#[derive(Debug)]
pub(crate) struct Vsids {
    heap: KeyValueHeap<PropositionalVariable, f64>,
    /// How much the activity of a variable is increased when it appears in a conflict. Grows
    /// after every conflict, see [`Vsids::decay_activities`].
    increment: f64,
    /// Once an activity reaches this value, all activities are divided by it.
    max_threshold: f64,
    decay_factor: f64,
    /// The value each variable had when it was last unassigned, initially true.
    saved_phases: KeyedVec<PropositionalVariable, bool>,
    phase_saving: bool,
}

impl Vsids {
    pub(crate) fn new(num_variables: usize, options: VsidsOptions, random: &mut dyn Random) -> Vsids {
        if num_variables == 0 {
            warn!("The VSIDS decision policy was not provided with any variables");
        }

        let mut heap = KeyValueHeap::default();
        for index in 0..num_variables {
            let initial_activity = if options.initial_activity_noise > 0.0 {
                random.generate_f64() * options.initial_activity_noise
            } else {
                0.0
            };
            heap.grow(PropositionalVariable::create_from_index(index), initial_activity);
        }

        Vsids {
            heap,
            increment: DEFAULT_VSIDS_INCREMENT,
            max_threshold: DEFAULT_VSIDS_MAX_THRESHOLD,
            decay_factor: options.decay_factor,
            saved_phases: KeyedVec::with_len(num_variables, true),
            phase_saving: options.phase_saving,
        }
    }

    fn bump_activity(&mut self, variable: PropositionalVariable) {
        let activity = self.heap.get_value(variable);
        if activity + self.increment >= self.max_threshold {
            self.heap.divide_values(self.max_threshold);
            self.increment /= self.max_threshold;
        }

        self.heap.increment(variable, self.increment);
    }

    /// Increasing the increment is equivalent to decaying every activity, without touching them.
    fn decay_activities(&mut self) {
        self.increment *= 1.0 / self.decay_factor;
    }
}

impl DecisionPolicy for Vsids {
    fn next_decision(&mut self, assignments: &Assignments) -> Option<Literal> {
        // Assigned variables are removed lazily, they are restored once they are unassigned.
        while let Some(candidate) = self.heap.peek_max() {
            if assignments.is_variable_assigned(candidate) {
                let _ = self.heap.pop_max();
            } else {
                return Some(Literal::new(candidate, self.saved_phases[candidate]));
            }
        }

        None
    }

    fn on_conflict_variable(&mut self, variable: PropositionalVariable) {
        self.bump_activity(variable);
    }

    fn on_conflict(&mut self) {
        self.decay_activities();
    }

    fn on_unassign(&mut self, literal: Literal) {
        let variable = literal.get_propositional_variable();
        self.heap.restore_key(variable);

        if self.phase_saving {
            self.saved_phases[variable] = literal.is_positive();
        }
    }
}
