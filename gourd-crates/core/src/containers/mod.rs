//! Containers which are indexed by solver-specific keys rather than plain `usize`s.
mod key_value_heap;
mod keyed_vec;

pub use key_value_heap::KeyValueHeap;
pub use keyed_vec::KeyedVec;
pub use keyed_vec::StorageKey;
