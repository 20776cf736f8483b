//! Convenience operations over caller-owned maps.
//!
//! The helpers never own or construct a map; they query or mutate the one
//! they are called on. Any container implementing [`Mapping`] (or
//! [`ReadOnlyMapping`] for the lookup-only helpers) gets them through the
//! blanket [`MapExt`] / [`ReadOnlyMapExt`] impls.
//!
//! Keys must be valid, comparable values; the `Eq + Hash` / `Ord` bounds of
//! the provided impls enforce that at compile time.
//!
//! No locking happens here. Concurrent use is only as safe as the map itself.

use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

use crate::error::MapError;

/// Lookup-only view of a key-unique map.
pub trait ReadOnlyMapping {
    type Key;
    type Value;

    fn lookup(&self, key: &Self::Key) -> Option<&Self::Value>;

    fn len(&self) -> usize;

    fn contains(&self, key: &Self::Key) -> bool {
        self.lookup(key).is_some()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Mutable key-unique map.
pub trait Mapping: ReadOnlyMapping {
    /// Insert or overwrite, returning the previous value.
    fn store(&mut self, key: Self::Key, value: Self::Value) -> Option<Self::Value>;

    /// Remove an entry, returning its value.
    fn evict(&mut self, key: &Self::Key) -> Option<Self::Value>;
}

impl<K: Eq + Hash, V, S: BuildHasher> ReadOnlyMapping for HashMap<K, V, S> {
    type Key = K;
    type Value = V;

    fn lookup(&self, key: &K) -> Option<&V> {
        self.get(key)
    }

    fn len(&self) -> usize {
        HashMap::len(self)
    }
}

impl<K: Eq + Hash, V, S: BuildHasher> Mapping for HashMap<K, V, S> {
    fn store(&mut self, key: K, value: V) -> Option<V> {
        self.insert(key, value)
    }

    fn evict(&mut self, key: &K) -> Option<V> {
        self.remove(key)
    }
}

impl<K: Ord, V> ReadOnlyMapping for BTreeMap<K, V> {
    type Key = K;
    type Value = V;

    fn lookup(&self, key: &K) -> Option<&V> {
        self.get(key)
    }

    fn len(&self) -> usize {
        BTreeMap::len(self)
    }
}

impl<K: Ord, V> Mapping for BTreeMap<K, V> {
    fn store(&mut self, key: K, value: V) -> Option<V> {
        self.insert(key, value)
    }

    fn evict(&mut self, key: &K) -> Option<V> {
        self.remove(key)
    }
}

/// Borrowed, non-mutable view over any map.
///
/// Only [`ReadOnlyMapping`] is implemented for it, so code holding a
/// `ReadOnly` can look entries up but never change them.
#[derive(Debug)]
pub struct ReadOnly<'a, M: ?Sized>(&'a M);

impl<M: ?Sized> Clone for ReadOnly<'_, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M: ?Sized> Copy for ReadOnly<'_, M> {}

impl<'a, M: ?Sized> ReadOnly<'a, M> {
    pub fn new(map: &'a M) -> Self {
        Self(map)
    }
}

impl<M: ReadOnlyMapping + ?Sized> ReadOnlyMapping for ReadOnly<'_, M> {
    type Key = M::Key;
    type Value = M::Value;

    fn lookup(&self, key: &M::Key) -> Option<&M::Value> {
        self.0.lookup(key)
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}

/// Helpers available on every [`ReadOnlyMapping`].
pub trait ReadOnlyMapExt: ReadOnlyMapping {
    /// Look up a plain value, returning `None` when the key is absent.
    ///
    /// Unlike [`MapExt::get_value`], absence and a stored default value are
    /// never conflated.
    fn get_read_only_nullable_value(&self, key: &Self::Key) -> Option<Self::Value>
    where
        Self::Value: Copy,
    {
        self.lookup(key).copied()
    }

    fn as_read_only(&self) -> ReadOnly<'_, Self> {
        ReadOnly::new(self)
    }
}

impl<M: ReadOnlyMapping + ?Sized> ReadOnlyMapExt for M {}

/// Helpers available on every [`Mapping`].
pub trait MapExt: Mapping {
    /// Insert `value`, overwriting any existing entry, and return it.
    fn add_or_update(&mut self, key: Self::Key, value: Self::Value) -> Self::Value
    where
        Self::Value: Clone,
    {
        self.store(key, value.clone());
        value
    }

    /// Replace an existing value with `replace(existing)`, or insert `value`
    /// unchanged when the key is absent.
    ///
    /// `replace` only runs on update, never on the freshly inserted default.
    /// Fails with [`MapError::InvalidArgument`] when `replace` is `None`,
    /// before the map is touched. If `replace` panics, the existing entry is
    /// left as it was.
    fn add_or_update_with<F>(
        &mut self,
        key: Self::Key,
        value: Self::Value,
        replace: Option<F>,
    ) -> Result<Self::Value, MapError>
    where
        Self::Value: Clone,
        F: FnOnce(Self::Value) -> Self::Value,
    {
        let replace = replace.ok_or(MapError::InvalidArgument { name: "replace" })?;
        // The map is only written once `replace` has returned.
        let next = match self.lookup(&key).cloned() {
            Some(existing) => replace(existing),
            None => value,
        };
        self.store(key, next.clone());
        Ok(next)
    }

    /// Return the stored value, or `Default::default()` when the key is absent.
    ///
    /// Cannot tell an absent key from one storing the default; use
    /// [`ReadOnlyMapping::contains`] or [`MapExt::get_nullable_value`] for that.
    fn get_value(&self, key: &Self::Key) -> Self::Value
    where
        Self::Value: Default + Clone,
    {
        self.lookup(key).cloned().unwrap_or_default()
    }

    /// Look up a plain value, returning `None` when the key is absent.
    fn get_nullable_value(&self, key: &Self::Key) -> Option<Self::Value>
    where
        Self::Value: Copy,
    {
        self.lookup(key).copied()
    }

    /// Insert a new entry and return its value.
    ///
    /// Fails with [`MapError::DuplicateKey`] and leaves the map untouched if
    /// the key is already present.
    fn add_and_return(
        &mut self,
        key: Self::Key,
        value: Self::Value,
    ) -> Result<Self::Value, MapError>
    where
        Self::Value: Clone,
    {
        if self.contains(&key) {
            return Err(MapError::DuplicateKey);
        }
        self.store(key, value.clone());
        Ok(value)
    }

    /// Remove an entry and return the value it held.
    ///
    /// Fails with [`MapError::KeyNotFound`] if the key is absent.
    fn remove_and_return(&mut self, key: &Self::Key) -> Result<Self::Value, MapError> {
        self.evict(key).ok_or(MapError::KeyNotFound)
    }

    /// Remove an entry if present. Never fails; `None` means nothing changed.
    fn try_remove(&mut self, key: &Self::Key) -> Option<Self::Value> {
        self.evict(key)
    }
}

impl<M: Mapping + ?Sized> MapExt for M {}
