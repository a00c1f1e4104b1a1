//! Ordering predicates and key extraction.
//!
//! A tree never asks whether two keys are *equal*. It only asks whether one
//! orders strictly before the other, and treats two keys as equivalent when
//! neither does. Any [`Compare`] implementation must therefore be a strict
//! weak order: irreflexive, transitive, and with transitive equivalence.

use core::cmp::Ordering;

/// A strict weak ordering over keys of type `K`.
///
/// # Examples
///
/// ```
/// use sumi_tree::{Compare, Greater, Less};
///
/// assert!(Less.less(&1, &2));
/// assert!(Greater.less(&2, &1));
/// assert!(!Less.less(&2, &2));
/// ```
pub trait Compare<K: ?Sized> {
    /// Returns true if `a` orders strictly before `b`.
    fn less(&self, a: &K, b: &K) -> bool;

    /// Returns true if neither key orders before the other.
    #[inline]
    fn equivalent(&self, a: &K, b: &K) -> bool {
        !self.less(a, b) && !self.less(b, a)
    }

    /// Derives a total [`Ordering`] from [`less`](Self::less).
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        if self.less(a, b) {
            Ordering::Less
        } else if self.less(b, a) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }
}

/// Ascending order through [`Ord`]. The default comparator.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Less;

impl<K: Ord + ?Sized> Compare<K> for Less {
    #[inline]
    fn less(&self, a: &K, b: &K) -> bool {
        a < b
    }
}

/// Descending order through [`Ord`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Greater;

impl<K: Ord + ?Sized> Compare<K> for Greater {
    #[inline]
    fn less(&self, a: &K, b: &K) -> bool {
        b < a
    }
}

/// Adapts a `less-than` closure into a [`Compare`].
///
/// ```
/// use sumi_tree::{OrderBy, RBTreeSet};
///
/// // Case-insensitive set: "Apple" and "apple" are the same key.
/// let mut set = RBTreeSet::with_comparator(OrderBy(|a: &String, b: &String| {
///     a.to_lowercase() < b.to_lowercase()
/// }));
/// assert!(set.insert("Apple".to_string()).1);
/// assert!(!set.insert("apple".to_string()).1);
/// assert_eq!(set.len(), 1);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct OrderBy<F>(pub F);

impl<K: ?Sized, F> Compare<K> for OrderBy<F>
where
    F: Fn(&K, &K) -> bool,
{
    #[inline]
    fn less(&self, a: &K, b: &K) -> bool {
        (self.0)(a, b)
    }
}

/// Maps a stored value to the key it is ordered by.
pub(crate) trait KeyOf<T> {
    /// The key type.
    type Key: ?Sized;

    /// Borrows the key out of `value`.
    fn key_of<'a>(&self, value: &'a T) -> &'a Self::Key;
}

/// The value is its own key. Used by sets.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub(crate) struct Identity;

impl<T> KeyOf<T> for Identity {
    type Key = T;

    #[inline]
    fn key_of<'a>(&self, value: &'a T) -> &'a T {
        value
    }
}

/// The first component of a pair is the key. Used by maps.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub(crate) struct First;

impl<K, V> KeyOf<(K, V)> for First {
    type Key = K;

    #[inline]
    fn key_of<'a>(&self, value: &'a (K, V)) -> &'a K {
        &value.0
    }
}
