//! Keyed Table

use super::*;
use std::borrow::Borrow;
use std::collections::hash_map::{Entry, HashMap};
use std::fmt::Debug;
use std::hash::Hash;

/// A table of values indexed by a hashable key.
#[derive(Clone, Debug)]
pub struct KeyedTable<K, V>
where
    K: Hash + Eq,
{
    /// Stores the values.
    entries: HashMap<K, V>,
}

impl<K, V> KeyedTable<K, V>
where
    K: Hash + Eq,
{
    /// Returns an empty table.
    pub fn new() -> Self {
        Self { entries: HashMap::new() }
    }

    /// Inserts a value, returning the value it replaced.
    ///
    /// * `key`   - The key.
    /// * `value` - The value.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.entries.insert(key, value)
    }

    /// Inserts a value for a key that must not be present yet.
    ///
    /// * `key`   - The key.
    /// * `value` - The value.
    pub fn insert_new(&mut self, key: K, value: V) -> SymbolResult<&V>
    where
        K: Debug,
    {
        match self.entries.entry(key) {
            Entry::Occupied(e) => Err(SymbolError::DuplicateKey(format!("{:?}", e.key()))),
            Entry::Vacant(e) => Ok(e.insert(value)),
        }
    }

    /// Lookup the value for a key. If it is not stored, insert the value
    /// returned by `f` first.
    ///
    /// * `key` - The key.
    /// * `f`   - Creates the value for a missing key.
    pub fn lookup_or_insert_with<F>(&mut self, key: K, f: F) -> &V
    where
        F: FnOnce() -> V,
    {
        self.entries.entry(key).or_insert_with(f)
    }

    /// Returns the value for a key.
    ///
    /// * `key` - The key.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.get(key)
    }

    /// Returns the value for a key as mutable.
    ///
    /// * `key` - The key.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.get_mut(key)
    }

    /// Returns true if the key is stored.
    ///
    /// * `key` - The key.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.contains_key(key)
    }

    /// Removes a key and returns its value.
    ///
    /// * `key` - The key.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.remove(key)
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the entries in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter()
    }

    /// Clear the table.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<K, V> Default for KeyedTable<K, V>
where
    K: Hash + Eq,
{
    /// Returns an empty `KeyedTable`.
    fn default() -> Self {
        Self::new()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
