use crate::raw::Handle;

/// A position in an [`RBTreeMap`](crate::RBTreeMap) or
/// [`RBTreeSet`](crate::RBTreeSet).
///
/// A cursor is a plain token: it does not borrow the collection, and it is
/// resolved by passing it back to the collection that produced it (for
/// example with `get_at`, `next`, `prev`, or `erase`). Besides element
/// positions there are two boundary positions, [`end`](crate::RBTreeMap::end)
/// (one past the last element) and "before first" (one before the first
/// element). Stepping back from the end lands on the last element; stepping
/// forward from before-first lands on the first.
///
/// Inserting never invalidates a cursor. Erasing invalidates only cursors
/// at the erased element. Using an invalidated cursor, or a cursor from a
/// different collection, is a logic error; it panics when the slot is vacant
/// and otherwise addresses an unspecified element.
///
/// # Examples
///
/// ```
/// use sumi_tree::RBTreeSet;
///
/// let set = RBTreeSet::from([10, 20]);
/// let last = set.prev(set.end());
/// assert_eq!(set.get_at(last), Some(&20));
/// assert!(set.prev(set.begin()).is_before_first());
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Cursor(pub(crate) Position);

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub(crate) enum Position {
    BeforeFirst,
    Node(Handle),
    End,
}

impl Cursor {
    pub(crate) const END: Self = Cursor(Position::End);
    pub(crate) const BEFORE_FIRST: Self = Cursor(Position::BeforeFirst);

    pub(crate) const fn at(handle: Handle) -> Self {
        Cursor(Position::Node(handle))
    }

    pub(crate) fn from_handle(handle: Option<Handle>) -> Self {
        handle.map_or(Self::END, Self::at)
    }

    /// The node this cursor addresses, if it is not a boundary.
    pub(crate) const fn handle(self) -> Option<Handle> {
        match self.0 {
            Position::Node(handle) => Some(handle),
            Position::BeforeFirst | Position::End => None,
        }
    }

    /// Returns true for the one-past-the-last position.
    #[must_use]
    pub const fn is_end(self) -> bool {
        matches!(self.0, Position::End)
    }

    /// Returns true for the one-before-the-first position.
    #[must_use]
    pub const fn is_before_first(self) -> bool {
        matches!(self.0, Position::BeforeFirst)
    }
}
