//! A max-heap over keys `0..n` with floating point priorities, used to pick the most active
//! variable. Keys can be removed temporarily (when their variable is assigned) and restored later
//! (when it is unassigned again) without losing their priority.
//!
//! Ties are broken towards the smaller key so the order in which keys leave the heap is fully
//! determined by their priorities and indices.
use std::ops::AddAssign;
use std::ops::DivAssign;

use super::KeyedVec;
use super::StorageKey;
use crate::gourd_assert_moderate;

#[derive(Debug, Clone)]
pub struct KeyValueHeap<Key, Value> {
    /// The priorities in heap order; the priority of key `k` is at
    /// `values[map_key_to_position[k]]`.
    values: Vec<Value>,
    map_key_to_position: KeyedVec<Key, usize>,
    map_position_to_key: Vec<Key>,
    /// Positions `0..end_position` form the heap, the remaining positions hold removed keys.
    end_position: usize,
}

impl<Key, Value> Default for KeyValueHeap<Key, Value> {
    fn default() -> Self {
        Self {
            values: Vec::new(),
            map_key_to_position: KeyedVec::default(),
            map_position_to_key: Vec::new(),
            end_position: 0,
        }
    }
}

impl<Key, Value> KeyValueHeap<Key, Value>
where
    Key: StorageKey + Copy,
    Value: AddAssign<Value> + DivAssign<Value> + PartialOrd + Default + Copy,
{
    /// The key with the highest priority, without removing it.
    pub fn peek_max(&self) -> Option<Key> {
        if self.end_position == 0 {
            None
        } else {
            Some(self.map_position_to_key[0])
        }
    }

    /// Removes and returns the key with the highest priority.
    pub fn pop_max(&mut self) -> Option<Key> {
        let best_key = self.peek_max()?;
        self.delete_key(best_key);
        Some(best_key)
    }

    pub fn get_value(&self, key: Key) -> Value {
        self.values[self.map_key_to_position[key]]
    }

    /// Increment the priority of `key`. This also works for removed keys, their new priority is
    /// used when they are restored.
    pub fn increment(&mut self, key: Key, increment: Value) {
        let position = self.map_key_to_position[key];
        self.values[position] += increment;

        if self.is_key_present(key) {
            self.sift_up(position);
        }
    }

    /// Put a removed key back into the heap. Does nothing if the key is present.
    pub fn restore_key(&mut self, key: Key) {
        if !self.is_key_present(key) {
            let position = self.map_key_to_position[key];
            gourd_assert_moderate!(position >= self.end_position);

            self.swap_positions(position, self.end_position);
            self.end_position += 1;
            self.sift_up(self.end_position - 1);
        }
    }

    /// Temporarily remove `key` from the heap. Does nothing if the key is not present.
    pub fn delete_key(&mut self, key: Key) {
        if self.is_key_present(key) {
            let position = self.map_key_to_position[key];
            self.swap_positions(position, self.end_position - 1);
            self.end_position -= 1;

            if position < self.end_position {
                self.sift_down(position);
                self.sift_up(position);
            }
        }
    }

    /// The number of keys that were ever added, including removed ones.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.end_position == 0
    }

    pub fn is_key_present(&self, key: Key) -> bool {
        key.index() < self.map_key_to_position.len()
            && self.map_key_to_position[key] < self.end_position
    }

    /// Add a new key. Keys must be added in order `0, 1, 2, ...`.
    pub fn grow(&mut self, key: Key, value: Value) {
        let last_position = self.values.len();
        gourd_assert_moderate!(key.index() == last_position);

        self.values.push(value);
        let _ = self.map_key_to_position.push(last_position);
        self.map_position_to_key.push(key);

        self.swap_positions(self.end_position, last_position);
        self.end_position += 1;
        self.sift_up(self.end_position - 1);
    }

    /// Divide every priority, including those of removed keys, by `divisor`.
    pub fn divide_values(&mut self, divisor: Value) {
        for value in self.values.iter_mut() {
            *value /= divisor;
        }
    }

    /// Whether the entry at position `a` should be closer to the top than the one at `b`.
    fn is_better(&self, a: usize, b: usize) -> bool {
        if self.values[a] > self.values[b] {
            true
        } else if self.values[a] < self.values[b] {
            false
        } else {
            self.map_position_to_key[a].index() < self.map_position_to_key[b].index()
        }
    }

    fn swap_positions(&mut self, a: usize, b: usize) {
        let key_a = self.map_position_to_key[a];
        let key_b = self.map_position_to_key[b];

        self.values.swap(a, b);
        self.map_position_to_key.swap(a, b);
        self.map_key_to_position.swap(key_a.index(), key_b.index());
    }

    fn sift_up(&mut self, mut position: usize) {
        while position > 0 {
            let parent = (position - 1) / 2;
            if !self.is_better(position, parent) {
                break;
            }

            self.swap_positions(parent, position);
            position = parent;
        }
    }

    fn sift_down(&mut self, mut position: usize) {
        loop {
            let left = 2 * position + 1;
            let right = left + 1;

            let mut best = position;
            if left < self.end_position && self.is_better(left, best) {
                best = left;
            }
            if right < self.end_position && self.is_better(right, best) {
                best = right;
            }

            if best == position {
                break;
            }

            self.swap_positions(position, best);
            position = best;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::KeyValueHeap;

    fn heap_with(values: &[f64]) -> KeyValueHeap<usize, f64> {
        let mut heap = KeyValueHeap::default();
        for (key, &value) in values.iter().enumerate() {
            heap.grow(key, value);
        }
        heap
    }

    #[test]
    fn keys_are_popped_by_decreasing_value() {
        let mut heap = heap_with(&[2.0, 7.0, 5.0, 1.0]);

        let popped = std::iter::from_fn(|| heap.pop_max()).collect::<Vec<_>>();

        assert_eq!(vec![1, 2, 0, 3], popped);
    }

    #[test]
    fn ties_are_broken_towards_the_smallest_key() {
        let mut heap = heap_with(&[0.0, 0.0, 0.0, 0.0]);

        let popped = std::iter::from_fn(|| heap.pop_max()).collect::<Vec<_>>();

        assert_eq!(vec![0, 1, 2, 3], popped);
    }

    #[test]
    fn restored_keys_keep_their_incremented_value() {
        let mut heap = heap_with(&[1.0, 2.0, 3.0]);

        heap.delete_key(0);
        heap.increment(0, 10.0);
        assert_eq!(Some(2), heap.peek_max());

        heap.restore_key(0);
        assert_eq!(Some(0), heap.peek_max());
        assert!((heap.get_value(0) - 11.0).abs() < f64::EPSILON);
    }

    #[test]
    fn dividing_preserves_the_order() {
        let mut heap = heap_with(&[4.0, 8.0, 6.0]);

        heap.divide_values(2.0);

        assert_eq!(Some(1), heap.pop_max());
        assert_eq!(Some(2), heap.pop_max());
        assert_eq!(Some(0), heap.pop_max());
        assert!(heap.is_empty());
        assert_eq!(None, heap.pop_max());
    }
}
