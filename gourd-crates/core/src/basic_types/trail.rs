use std::iter::Rev;
use std::ops::Deref;
use std::vec::Drain;

use crate::gourd_assert_simple;

/// A chronological stack of entries partitioned into decision levels.
///
/// Level 0 starts at the bottom of the stack; every call to [`Trail::new_decision_level`] opens
/// a new level which starts at the current length.
#[derive(Clone, Debug)]
pub(crate) struct Trail<T> {
    /// At index `i` is the position on the trail where decision level `i + 1` starts.
    level_starts: Vec<usize>,
    entries: Vec<T>,
}

impl<T> Default for Trail<T> {
    fn default() -> Self {
        Trail {
            level_starts: Vec::new(),
            entries: Vec::new(),
        }
    }
}

impl<T> Trail<T> {
    pub(crate) fn new_decision_level(&mut self) {
        self.level_starts.push(self.entries.len());
    }

    pub(crate) fn get_decision_level(&self) -> usize {
        self.level_starts.len()
    }

    /// The entries which were pushed while `level` was the current decision level.
    pub(crate) fn values_at_level(&self, level: usize) -> &[T] {
        gourd_assert_simple!(level <= self.get_decision_level());

        let start = if level == 0 {
            0
        } else {
            self.level_starts[level - 1]
        };

        let end = if level == self.get_decision_level() {
            self.entries.len()
        } else {
            self.level_starts[level]
        };

        &self.entries[start..end]
    }

    /// The entries pushed at decision levels strictly greater than `level`.
    pub(crate) fn values_above_level(&self, level: usize) -> &[T] {
        if level >= self.get_decision_level() {
            &[]
        } else {
            &self.entries[self.level_starts[level]..]
        }
    }

    /// Remove every entry above `new_level`. The removed entries are yielded most recent first.
    pub(crate) fn synchronise(&mut self, new_level: usize) -> Rev<Drain<'_, T>> {
        gourd_assert_simple!(new_level < self.get_decision_level());

        let new_len = self.level_starts[new_level];
        self.level_starts.truncate(new_level);

        self.entries.drain(new_len..).rev()
    }

    pub(crate) fn push(&mut self, entry: T) {
        self.entries.push(entry)
    }
}

impl<T> Deref for Trail<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pushed_values_are_observed_through_indexing() {
        let mut trail = Trail::default();

        let expected = [1, 2, 3, 4];
        for &entry in expected.iter() {
            trail.push(entry);
        }

        assert_eq!(&expected, trail.deref());
    }

    #[test]
    fn backtracking_is_nonchronological() {
        let mut trail = Trail::default();
        trail.push(1);

        trail.new_decision_level();
        trail.push(2);
        trail.new_decision_level();
        trail.push(3);
        trail.new_decision_level();
        trail.push(4);

        let _ = trail.synchronise(1);

        assert_eq!(&[1, 2], trail.deref());
        assert_eq!(1, trail.get_decision_level());
    }

    #[test]
    fn removed_entries_are_given_most_recent_first() {
        let mut trail = Trail::default();
        trail.push(1);

        trail.new_decision_level();
        trail.push(2);
        trail.new_decision_level();
        trail.push(3);
        trail.push(4);

        let removed = trail.synchronise(0).collect::<Vec<_>>();

        assert_eq!(vec![4, 3, 2], removed);
        assert_eq!(0, trail.get_decision_level());
    }

    #[test]
    fn empty_levels_are_tracked() {
        let mut trail = Trail::default();
        trail.push(1);
        trail.new_decision_level();
        trail.new_decision_level();
        trail.push(2);

        assert_eq!(&[1], trail.values_at_level(0));
        assert!(trail.values_at_level(1).is_empty());
        assert_eq!(&[2], trail.values_at_level(2));
    }
}
