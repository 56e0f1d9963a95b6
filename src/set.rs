use compare::{Compare, Natural};

use crate::empty::Empty;
use crate::error::RbtError;
use crate::rb::{Iter, Rbt, Stats};

/// Set maintains a collection of unique keys in comparator order,
/// backed by the same red-black engine as [`Rbt`].
#[derive(Clone)]
pub struct Set<K, C = Natural<K>>
where
    C: Compare<K>,
{
    index: Rbt<K, Empty, C>,
}

/// Different ways to construct a new Set instance.
impl<K> Set<K>
where
    K: Ord,
{
    /// Create an empty instance of Set, identified by `name`, ordered
    /// by the natural order of its keys.
    pub fn new<S>(name: S) -> Set<K>
    where
        S: AsRef<str>,
    {
        Set {
            index: Rbt::new(name),
        }
    }
}

impl<K, C> Set<K, C>
where
    C: Compare<K>,
{
    /// Create an empty instance of Set ordered by `cmp`.
    pub fn with_cmp<S>(name: S, cmp: C) -> Set<K, C>
    where
        S: AsRef<str>,
    {
        Set {
            index: Rbt::with_cmp(name, cmp),
        }
    }

    /// Identify this instance.
    #[inline]
    pub fn id(&self) -> String {
        self.index.id()
    }

    /// Return number of keys in this instance.
    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Check whether this set is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Insert key into the set. If key is already present the set is
    /// left untouched and false is returned.
    pub fn insert(&mut self, key: K) -> bool {
        self.index.create(key, Empty {}).is_none()
    }

    /// Remove key from the set, returning whether it was present.
    /// Removing an absent key is a no-op.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        C: Compare<Q, K>,
        Q: ?Sized,
    {
        self.index.delete(key).is_some()
    }

    /// Check whether key is present in the set.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        C: Compare<Q, K>,
        Q: ?Sized,
    {
        self.index.contains(key)
    }

    /// Return the least key, or None when the set is empty.
    pub fn min(&self) -> Option<&K> {
        self.index.min().map(|(key, _)| key)
    }

    /// Return the greatest key, or None when the set is empty.
    pub fn max(&self) -> Option<&K> {
        self.index.max().map(|(key, _)| key)
    }

    /// Return an iterator over all keys in this instance, in
    /// comparator order.
    pub fn iter(&self) -> SetIter<K> {
        SetIter {
            inner: self.index.iter(),
        }
    }

    /// Remove every key from this instance.
    pub fn clear(&mut self) {
        self.index.clear()
    }

    /// Validate the underlying tree, refer to
    /// [`Rbt::validate`] for the rules checked.
    pub fn validate(&self) -> Result<Stats, RbtError<K>>
    where
        K: Clone,
    {
        self.index.validate()
    }
}

/// Set algebra. Each operation builds a new set, iterating one input
/// in comparator order while membership-testing the other, O(n log m).
impl<K, C> Set<K, C>
where
    K: Clone,
    C: Compare<K> + Clone,
{
    /// Return a new set holding every key present in either set.
    pub fn union(&self, other: &Set<K, C>) -> Set<K, C> {
        let name = format!("{}|{}", self.id(), other.id());
        let mut result = Set::with_cmp(name, self.index.cmp().clone());
        for key in self.iter() {
            result.insert(key.clone());
        }
        for key in other.iter() {
            result.insert(key.clone());
        }
        result
    }

    /// Return a new set holding the keys present in both sets.
    pub fn intersection(&self, other: &Set<K, C>) -> Set<K, C> {
        let name = format!("{}&{}", self.id(), other.id());
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        let mut result = Set::with_cmp(name, self.index.cmp().clone());
        for key in small.iter() {
            if large.contains(key) {
                result.insert(key.clone());
            }
        }
        result
    }

    /// Return a new set holding the keys of this set that are not
    /// present in `other`.
    pub fn difference(&self, other: &Set<K, C>) -> Set<K, C> {
        let name = format!("{}-{}", self.id(), other.id());
        let mut result = Set::with_cmp(name, self.index.cmp().clone());
        for key in self.iter() {
            if !other.contains(key) {
                result.insert(key.clone());
            }
        }
        result
    }
}

/// Lazy iterator over every key in a [`Set`] instance, in comparator
/// order.
pub struct SetIter<'a, K> {
    inner: Iter<'a, K, Empty>,
}

impl<'a, K> Iterator for SetIter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }
}
