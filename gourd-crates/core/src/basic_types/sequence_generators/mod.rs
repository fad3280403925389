//! Sequences which determine the number of conflicts between two restarts.
mod constant_sequence;
mod geometric_sequence;
mod luby_sequence;

use std::fmt::Debug;

pub(crate) use constant_sequence::ConstantSequence;
pub(crate) use geometric_sequence::GeometricSequence;
pub(crate) use luby_sequence::LubySequence;

pub(crate) trait SequenceGenerator: Debug {
    fn next(&mut self) -> u64;
}

/// The kind of sequence used to space out restarts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum SequenceGeneratorType {
    /// Every interval has the same length.
    #[default]
    Constant,
    /// Every interval is a constant factor longer than the previous one.
    Geometric,
    /// Intervals follow the Luby sequence 1, 1, 2, 1, 1, 2, 4, ...
    Luby,
}

impl std::fmt::Display for SequenceGeneratorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SequenceGeneratorType::Constant => write!(f, "constant"),
            SequenceGeneratorType::Geometric => write!(f, "geometric"),
            SequenceGeneratorType::Luby => write!(f, "luby"),
        }
    }
}
