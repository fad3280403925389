use super::SequenceGenerator;

/// The Luby sequence 1, 1, 2, 1, 1, 2, 4, 1, 1, 2, 1, 1, 2, 4, 8, ... scaled by a base interval.
///
/// Each element is computed in constant time with Knuth's "reluctant doubling" formulation.
#[derive(Debug, Copy, Clone)]
pub(crate) struct LubySequence {
    u: i64,
    v: i64,
    base: u64,
}

impl LubySequence {
    pub(crate) fn new(base: u64) -> LubySequence {
        LubySequence { u: 1, v: 1, base }
    }
}

impl SequenceGenerator for LubySequence {
    fn next(&mut self) -> u64 {
        let value = self.v as u64;
        if (self.u & -self.u) == self.v {
            self.u += 1;
            self.v = 1;
        } else {
            self.v *= 2;
        }
        value * self.base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn luby_recursive(i: u64) -> u64 {
        let k = (i + 1).ilog2();
        if (i + 1).is_power_of_two() {
            1 << (k - 1)
        } else {
            luby_recursive(i + 1 - (1 << k))
        }
    }

    #[test]
    fn prefix_matches_the_definition() {
        let mut sequence = LubySequence::new(1);
        let prefix = (0..15).map(|_| sequence.next()).collect::<Vec<_>>();

        assert_eq!(vec![1, 1, 2, 1, 1, 2, 4, 1, 1, 2, 1, 1, 2, 4, 8], prefix);
    }

    #[test]
    fn scaled_sequence_matches_recursive_formulation() {
        let mut sequence = LubySequence::new(50);
        for i in 1..10_000 {
            assert_eq!(luby_recursive(i) * 50, sequence.next());
        }
    }
}
