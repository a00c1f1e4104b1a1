//! Position-based access to an `RBTreeSet`.

use super::RBTreeSet;
use crate::compare::Compare;
use crate::cursor::Cursor;

impl<T, C> RBTreeSet<T, C> {
    /// Returns a cursor at the minimum element, or [`end`](Self::end) if the
    /// set is empty.
    #[must_use]
    pub fn begin(&self) -> Cursor {
        self.raw.begin()
    }

    /// Returns the one-past-the-last cursor.
    #[must_use]
    pub fn end(&self) -> Cursor {
        Cursor::END
    }

    /// Returns the cursor after `cursor`. See
    /// [`RBTreeMap::next`](crate::RBTreeMap::next) for boundary behavior.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn next(&self, cursor: Cursor) -> Cursor {
        self.raw.next(cursor)
    }

    /// Returns the cursor before `cursor`. Stepping back from
    /// [`end`](Self::end) yields the maximum element.
    ///
    /// # Examples
    ///
    /// ```
    /// use sumi_tree::RBTreeSet;
    ///
    /// let set = RBTreeSet::from([1, 2, 3]);
    /// let mut cursor = set.end();
    /// let mut reversed = Vec::new();
    /// loop {
    ///     cursor = set.prev(cursor);
    ///     match set.get_at(cursor) {
    ///         Some(&x) => reversed.push(x),
    ///         None => break,
    ///     }
    /// }
    /// assert_eq!(reversed, [3, 2, 1]);
    /// ```
    #[must_use]
    pub fn prev(&self, cursor: Cursor) -> Cursor {
        self.raw.prev(cursor)
    }

    /// Returns the element at `cursor`, or `None` at either boundary.
    ///
    /// # Panics
    ///
    /// May panic if `cursor` addresses an erased element.
    #[must_use]
    pub fn get_at(&self, cursor: Cursor) -> Option<&T> {
        self.raw.get_at(cursor)
    }

    /// Removes the element at `cursor`, returning it and a cursor to the
    /// element that followed it.
    ///
    /// # Panics
    ///
    /// Panics if `cursor` is a boundary or addresses an erased element.
    ///
    /// # Examples
    ///
    /// ```
    /// use sumi_tree::RBTreeSet;
    ///
    /// let mut set = RBTreeSet::from([10, 20, 30]);
    /// let (removed, next) = set.erase(set.find(&20));
    /// assert_eq!(removed, 20);
    /// assert_eq!(set.get_at(next), Some(&30));
    /// ```
    pub fn erase(&mut self, cursor: Cursor) -> (T, Cursor) {
        self.raw.erase_at(cursor)
    }
}

impl<T, C: Compare<T>> RBTreeSet<T, C> {
    /// Returns a cursor at the element equivalent to `value`, or
    /// [`end`](Self::end) if there is none.
    pub fn find(&self, value: &T) -> Cursor {
        Cursor::from_handle(self.raw.find(value))
    }

    /// Returns a cursor at the first element that does not order before
    /// `value`, or [`end`](Self::end) if there is none.
    pub fn lower_bound(&self, value: &T) -> Cursor {
        Cursor::from_handle(self.raw.lower_bound(value))
    }

    /// Returns a cursor at the first element that orders after `value`, or
    /// [`end`](Self::end) if there is none.
    ///
    /// # Examples
    ///
    /// ```
    /// use sumi_tree::RBTreeSet;
    ///
    /// let set = RBTreeSet::from([1, 3, 5]);
    /// let mut cursor = set.lower_bound(&2);
    /// let stop = set.upper_bound(&4);
    /// let mut window: Vec<&i32> = Vec::new();
    /// while cursor != stop {
    ///     window.extend(set.get_at(cursor));
    ///     cursor = set.next(cursor);
    /// }
    /// assert_eq!(window, [&3]);
    /// ```
    pub fn upper_bound(&self, value: &T) -> Cursor {
        Cursor::from_handle(self.raw.upper_bound(value))
    }
}
