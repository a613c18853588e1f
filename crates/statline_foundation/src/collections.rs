//! Persistent collections with structural sharing.
//!
//! A thin wrapper around the `im` crate's persistent structures, used where a
//! list must keep display order and must never hold the same value twice.

use std::fmt;
use std::hash::Hash;
use std::iter::FromIterator;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Persistent, insertion-ordered list without duplicates.
///
/// Cloning is O(1). Membership checks are O(log n).
#[derive(Clone)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(from = "Vec<T>", into = "Vec<T>"),
    serde(bound(
        serialize = "T: Serialize + Clone + Eq + Hash",
        deserialize = "T: Deserialize<'de> + Clone + Eq + Hash"
    ))
)]
pub struct UniqueList<T>
where
    T: Clone + Eq + Hash,
{
    order: im::Vector<T>,
    members: im::HashSet<T>,
}

impl<T: Clone + Eq + Hash> UniqueList<T> {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self {
            order: im::Vector::new(),
            members: im::HashSet::new(),
        }
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns true if the list contains the value.
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.members.contains(value)
    }

    /// Appends the value unless it is already present.
    ///
    /// Returns true if the value was added.
    pub fn push(&mut self, value: T) -> bool {
        if self.members.contains(&value) {
            return false;
        }
        self.members.insert(value.clone());
        self.order.push_back(value);
        true
    }

    /// Returns an iterator over the elements in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.order.iter()
    }

    /// Gets an element by position.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.order.get(index)
    }
}

impl<T: Clone + Eq + Hash> Default for UniqueList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Eq + Hash + fmt::Debug> fmt::Debug for UniqueList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: Clone + Eq + Hash> PartialEq for UniqueList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.order == other.order
    }
}

impl<T: Clone + Eq + Hash> Eq for UniqueList<T> {}

impl<T: Clone + Eq + Hash> FromIterator<T> for UniqueList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        for value in iter {
            list.push(value);
        }
        list
    }
}

impl<T: Clone + Eq + Hash> From<Vec<T>> for UniqueList<T> {
    fn from(values: Vec<T>) -> Self {
        values.into_iter().collect()
    }
}

impl<T: Clone + Eq + Hash> From<UniqueList<T>> for Vec<T> {
    fn from(list: UniqueList<T>) -> Self {
        list.order.into_iter().collect()
    }
}

impl<'a, T: Clone + Eq + Hash> IntoIterator for &'a UniqueList<T> {
    type Item = &'a T;
    type IntoIter = im::vector::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.order.iter()
    }
}
