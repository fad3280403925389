mod clause_reference;
mod hash_structures;
mod input_error;
mod literal;
mod random;
pub(crate) mod sequence_generators;
mod solution;
mod trail;

pub(crate) use clause_reference::ClauseReference;
pub(crate) use hash_structures::HashMap;
pub(crate) use hash_structures::HashSet;
pub use input_error::InputError;
pub use literal::Literal;
pub use literal::PropositionalVariable;
pub use random::Random;
pub use solution::Solution;
pub(crate) use trail::Trail;
