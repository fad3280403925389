use std::fmt::Debug;
use std::fmt::Display;

use crate::containers::StorageKey;

/// A handle to a clause in the [`ClauseDatabase`](crate::engine::sat::ClauseDatabase).
///
/// References are assigned in insertion order and stay valid for the lifetime of the database,
/// since clauses are never deleted.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct ClauseReference {
    id: u32,
}

impl StorageKey for ClauseReference {
    fn index(&self) -> usize {
        self.id as usize
    }

    fn create_from_index(index: usize) -> Self {
        ClauseReference { id: index as u32 }
    }
}

impl Debug for ClauseReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "clause#{}", self.id)
    }
}

impl Display for ClauseReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id)
    }
}
