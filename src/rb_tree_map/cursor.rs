//! Position-based access to an `RBTreeMap`.

use super::RBTreeMap;
use crate::compare::Compare;
use crate::cursor::Cursor;

impl<K, V, C> RBTreeMap<K, V, C> {
    /// Returns a cursor at the entry with the minimum key, or [`end`](Self::end)
    /// if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use sumi_tree::RBTreeMap;
    ///
    /// let map = RBTreeMap::from([(2, "b"), (1, "a")]);
    /// assert_eq!(map.get_at(map.begin()), Some((&1, &"a")));
    ///
    /// let empty: RBTreeMap<i32, i32> = RBTreeMap::new();
    /// assert_eq!(empty.begin(), empty.end());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn begin(&self) -> Cursor {
        self.raw.begin()
    }

    /// Returns the one-past-the-last cursor.
    #[must_use]
    pub fn end(&self) -> Cursor {
        Cursor::END
    }

    /// Returns the cursor after `cursor`.
    ///
    /// Advancing the last entry yields [`end`](Self::end), advancing `end`
    /// stays at `end`, and advancing the before-first position yields
    /// [`begin`](Self::begin).
    ///
    /// # Panics
    ///
    /// May panic if `cursor` addresses an erased entry.
    ///
    /// # Complexity
    ///
    /// O(log n) worst case, O(1) amortized over a full traversal.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn next(&self, cursor: Cursor) -> Cursor {
        self.raw.next(cursor)
    }

    /// Returns the cursor before `cursor`.
    ///
    /// Stepping back from [`end`](Self::end) yields the entry with the
    /// maximum key. Stepping back from the first entry yields the
    /// before-first position, which stays put.
    ///
    /// # Panics
    ///
    /// May panic if `cursor` addresses an erased entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use sumi_tree::RBTreeMap;
    ///
    /// let map = RBTreeMap::from([(1, "a"), (2, "b")]);
    /// let last = map.prev(map.end());
    /// assert_eq!(map.get_at(last), Some((&2, &"b")));
    ///
    /// let before = map.prev(map.begin());
    /// assert!(before.is_before_first());
    /// assert_eq!(map.next(before), map.begin());
    /// ```
    #[must_use]
    pub fn prev(&self, cursor: Cursor) -> Cursor {
        self.raw.prev(cursor)
    }

    /// Returns the entry at `cursor`, or `None` at either boundary.
    ///
    /// # Panics
    ///
    /// May panic if `cursor` addresses an erased entry.
    #[must_use]
    pub fn get_at(&self, cursor: Cursor) -> Option<(&K, &V)> {
        self.raw.get_at(cursor).map(|(key, value)| (key, value))
    }

    /// Returns the entry at `cursor` with a mutable value, or `None` at
    /// either boundary.
    ///
    /// # Panics
    ///
    /// May panic if `cursor` addresses an erased entry.
    pub fn get_at_mut(&mut self, cursor: Cursor) -> Option<(&K, &mut V)> {
        self.raw.get_at_mut(cursor).map(|(key, value)| (&*key, value))
    }

    /// Removes the entry at `cursor`.
    ///
    /// Returns the removed entry and a cursor to the entry that followed it
    /// ([`end`](Self::end) if it was the last). Cursors to other entries stay
    /// valid.
    ///
    /// # Panics
    ///
    /// Panics if `cursor` is a boundary or addresses an erased entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use sumi_tree::RBTreeMap;
    ///
    /// let mut map: RBTreeMap<i32, char> = (0..6).zip('a'..).collect();
    ///
    /// // Erase every even key in one forward pass.
    /// let mut cursor = map.begin();
    /// while let Some((&key, _)) = map.get_at(cursor) {
    ///     cursor = if key % 2 == 0 { map.erase(cursor).1 } else { map.next(cursor) };
    /// }
    /// assert!(map.keys().eq(&[1, 3, 5]));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn erase(&mut self, cursor: Cursor) -> ((K, V), Cursor) {
        self.raw.erase_at(cursor)
    }
}

impl<K, V, C: Compare<K>> RBTreeMap<K, V, C> {
    /// Returns a cursor at the entry for `key`, or [`end`](Self::end) if the
    /// key is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use sumi_tree::RBTreeMap;
    ///
    /// let map = RBTreeMap::from([(1, "a")]);
    /// assert_eq!(map.get_at(map.find(&1)), Some((&1, &"a")));
    /// assert!(map.find(&2).is_end());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn find(&self, key: &K) -> Cursor {
        Cursor::from_handle(self.raw.find(key))
    }

    /// Returns a cursor at the first entry whose key does not order before
    /// `key`, or [`end`](Self::end) if there is none.
    ///
    /// # Examples
    ///
    /// ```
    /// use sumi_tree::RBTreeMap;
    ///
    /// let map = RBTreeMap::from([(10, ()), (20, ()), (30, ())]);
    /// assert_eq!(map.get_at(map.lower_bound(&20)), Some((&20, &())));
    /// assert_eq!(map.get_at(map.lower_bound(&25)), Some((&30, &())));
    /// assert!(map.lower_bound(&31).is_end());
    /// ```
    pub fn lower_bound(&self, key: &K) -> Cursor {
        Cursor::from_handle(self.raw.lower_bound(key))
    }

    /// Returns a cursor at the first entry whose key orders after `key`, or
    /// [`end`](Self::end) if there is none.
    ///
    /// # Examples
    ///
    /// ```
    /// use sumi_tree::RBTreeMap;
    ///
    /// let map = RBTreeMap::from([(10, ()), (20, ()), (30, ())]);
    /// assert_eq!(map.get_at(map.upper_bound(&20)), Some((&30, &())));
    /// assert!(map.upper_bound(&30).is_end());
    /// ```
    pub fn upper_bound(&self, key: &K) -> Cursor {
        Cursor::from_handle(self.raw.upper_bound(key))
    }
}
