/// Adaptive key-value container for trie children
///
/// Most trie nodes have a handful of children, where a linear scan over a
/// small vector beats hashing. Nodes that grow past [`MAX_SLICE`] entries
/// are promoted to a `HashMap` once and stay there. The representation is
/// invisible to callers.
use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

/// The largest number of pairs kept in the scan representation.
const MAX_SLICE: usize = 8;

#[derive(Debug)]
pub(crate) enum Mapping<K, V> {
    /// Few pairs: kept in insertion order, looked up by scan.
    Slice(Vec<(K, V)>),
    /// Many pairs: promoted to a hash map.
    Map(HashMap<K, V>),
}

impl<K, V> Default for Mapping<K, V> {
    fn default() -> Self {
        Mapping::Slice(Vec::new())
    }
}

impl<K: Eq + Hash, V> Mapping<K, V> {
    /// Returns the value for `key`, if present.
    pub(crate) fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        match self {
            Mapping::Slice(entries) => entries
                .iter()
                .find(|(k, _)| k.borrow() == key)
                .map(|(_, v)| v),
            Mapping::Map(map) => map.get(key),
        }
    }

    /// Returns a mutable reference to the value for `key`, inserting
    /// `default()` first if the key is absent.
    pub(crate) fn get_or_insert_with(&mut self, key: K, default: impl FnOnce() -> V) -> &mut V {
        // Promote before an insert that would overflow the slice.
        let promote = match &*self {
            Mapping::Slice(entries) => {
                entries.len() >= MAX_SLICE && !entries.iter().any(|(k, _)| *k == key)
            }
            Mapping::Map(_) => false,
        };
        if promote {
            if let Mapping::Slice(entries) = self {
                *self = Mapping::Map(std::mem::take(entries).into_iter().collect());
            }
        }
        match self {
            Mapping::Slice(entries) => {
                if let Some(found) = entries.iter().position(|(k, _)| *k == key) {
                    return &mut entries[found].1;
                }
                entries.push((key, default()));
                let last = entries.len() - 1;
                &mut entries[last].1
            }
            Mapping::Map(map) => map.entry(key).or_insert_with(default),
        }
    }

}
