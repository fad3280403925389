use std::marker::PhantomData;
use std::ops::Index;
use std::ops::IndexMut;

/// A vector which can only be indexed by `Key`, e.g. per-variable data indexed by
/// [`PropositionalVariable`](crate::variables::PropositionalVariable) or per-literal data indexed
/// by [`Literal`](crate::variables::Literal).
///
/// This prevents accidentally indexing per-literal storage with a variable index (or vice versa),
/// which is an easy mistake to make when both are plain integers.
#[derive(Debug, PartialEq, Eq)]
pub struct KeyedVec<Key, Value> {
    key: PhantomData<Key>,
    elements: Vec<Value>,
}

impl<Key, Value: Clone> Clone for KeyedVec<Key, Value> {
    fn clone(&self) -> Self {
        Self {
            key: PhantomData,
            elements: self.elements.clone(),
        }
    }
}

impl<Key, Value> Default for KeyedVec<Key, Value> {
    fn default() -> Self {
        Self {
            key: PhantomData,
            elements: Vec::default(),
        }
    }
}

impl<Key, Value: Clone> KeyedVec<Key, Value> {
    /// Create a vector with `len` slots, each holding `value`.
    pub fn with_len(len: usize, value: Value) -> Self {
        Self {
            key: PhantomData,
            elements: vec![value; len],
        }
    }

    /// Make sure `key` is a valid index, filling new slots with `default_value`.
    pub fn accommodate(&mut self, key: Key, default_value: Value)
    where
        Key: StorageKey,
    {
        if key.index() >= self.elements.len() {
            self.elements.resize(key.index() + 1, default_value);
        }
    }
}

impl<Key: StorageKey, Value> KeyedVec<Key, Value> {
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Add a new value to the vector and return the key under which it is stored.
    pub fn push(&mut self, value: Value) -> Key {
        self.elements.push(value);

        Key::create_from_index(self.elements.len() - 1)
    }

    pub fn keys(&self) -> impl Iterator<Item = Key> {
        (0..self.elements.len()).map(Key::create_from_index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'_ Value> {
        self.elements.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &'_ mut Value> {
        self.elements.iter_mut()
    }

    /// Iterate over `(key, value)` pairs in key order.
    pub fn iter_enumerated(&self) -> impl Iterator<Item = (Key, &'_ Value)> {
        self.elements
            .iter()
            .enumerate()
            .map(|(index, value)| (Key::create_from_index(index), value))
    }

    pub(crate) fn swap(&mut self, a: usize, b: usize) {
        self.elements.swap(a, b)
    }
}

impl<Key: StorageKey, Value> Index<Key> for KeyedVec<Key, Value> {
    type Output = Value;

    fn index(&self, index: Key) -> &Self::Output {
        &self.elements[index.index()]
    }
}

impl<Key: StorageKey, Value> Index<&Key> for KeyedVec<Key, Value> {
    type Output = Value;

    fn index(&self, index: &Key) -> &Self::Output {
        &self.elements[index.index()]
    }
}

impl<Key: StorageKey, Value> IndexMut<Key> for KeyedVec<Key, Value> {
    fn index_mut(&mut self, index: Key) -> &mut Self::Output {
        &mut self.elements[index.index()]
    }
}

impl StorageKey for usize {
    fn index(&self) -> usize {
        *self
    }

    fn create_from_index(index: usize) -> Self {
        index
    }
}

/// A key which maps onto a dense index range starting at 0.
pub trait StorageKey: Clone {
    fn index(&self) -> usize;

    fn create_from_index(index: usize) -> Self;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pushed_values_are_retrievable_by_their_key() {
        let mut keyed_vec: KeyedVec<usize, &str> = KeyedVec::default();

        let first = keyed_vec.push("first");
        let second = keyed_vec.push("second");

        assert_eq!("first", keyed_vec[first]);
        assert_eq!("second", keyed_vec[second]);
        assert_eq!(2, keyed_vec.len());
    }

    #[test]
    fn accommodate_grows_but_never_shrinks() {
        let mut keyed_vec: KeyedVec<usize, u32> = KeyedVec::with_len(2, 7);

        keyed_vec.accommodate(4, 0);
        assert_eq!(vec![7, 7, 0, 0, 0], keyed_vec.iter().copied().collect::<Vec<_>>());

        keyed_vec.accommodate(1, 9);
        assert_eq!(5, keyed_vec.len());
    }

    #[test]
    fn enumeration_yields_keys_in_order() {
        let keyed_vec: KeyedVec<usize, char> = KeyedVec::with_len(3, 'x');

        let keys = keyed_vec
            .iter_enumerated()
            .map(|(key, _)| key)
            .collect::<Vec<_>>();

        assert_eq!(vec![0, 1, 2], keys);
    }
}
