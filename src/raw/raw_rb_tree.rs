use alloc::vec::Vec;
use core::iter::FusedIterator;

use log::{debug, trace, warn};

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Color, Node, Side};
use crate::compare::{Compare, KeyOf};
use crate::cursor::{Cursor, Position};
use crate::error::AllocError;

/// The red-black tree engine backing `RBTreeMap` and `RBTreeSet`.
///
/// Values of type `T` are ordered by the key `X` extracts from them, under
/// the strict weak order `C`. Keys are unique: two keys are the same key when
/// neither orders before the other.
///
/// Invariants after every completed mutation:
/// - the root, if any, is black;
/// - no red node has a red parent;
/// - every path from a node down to an absent child crosses the same number
///   of black nodes;
/// - `leftmost`/`rightmost` are the minimum/maximum nodes, and are both `None`
///   exactly when `root` is;
/// - `len` is the number of nodes reachable from `root`.
#[derive(Clone)]
pub(crate) struct RawRBTree<T, X, C> {
    /// Arena storing all tree nodes.
    nodes: Arena<Node<T>>,
    root: Option<Handle>,
    /// Cached minimum node, for O(1) `begin`.
    leftmost: Option<Handle>,
    /// Cached maximum node, for O(1) `prev(end)`.
    rightmost: Option<Handle>,
    len: usize,
    key_of: X,
    compare: C,
}

/// Outcome of `locate_insertion_point`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum InsertPosition {
    /// The key is new. A node for it belongs on `side` of `parent`, or at the
    /// root when `parent` is `None`.
    Vacant { parent: Option<Handle>, side: Side },
    /// A node with an equivalent key already exists.
    Occupied(Handle),
}

impl<T, X, C> RawRBTree<T, X, C> {
    /// Creates a new, empty tree.
    pub(crate) const fn new(key_of: X, compare: C) -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            leftmost: None,
            rightmost: None,
            len: 0,
            key_of,
            compare,
        }
    }

    /// Creates a new tree with room for `capacity` nodes.
    pub(crate) fn with_capacity(capacity: usize, key_of: X, compare: C) -> Self {
        debug!("reserving {capacity} node slots");
        Self {
            nodes: Arena::with_capacity(capacity),
            ..Self::new(key_of, compare)
        }
    }

    /// Returns the number of values in the tree.
    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the tree contains no values.
    pub(crate) const fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the number of node slots allocated.
    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub(crate) fn compare(&self) -> &C {
        &self.compare
    }

    /// Drops every value. Nodes live in one arena, so teardown is a flat pass
    /// over its slots regardless of tree shape.
    pub(crate) fn clear(&mut self) {
        debug!("clearing tree of {} nodes", self.len);
        self.nodes.clear();
        self.root = None;
        self.leftmost = None;
        self.rightmost = None;
        self.len = 0;
    }

    /// Allocates a detached red node holding `value`.
    pub(crate) fn create_node(&mut self, value: T) -> Handle {
        self.nodes.alloc(Node::new(value))
    }

    /// Fallible form of [`create_node`](Self::create_node).
    pub(crate) fn try_create_node(&mut self, value: T) -> Result<Handle, AllocError> {
        self.nodes.try_alloc(Node::new(value))
    }

    /// Releases a node's slot and hands back its value. The node must already
    /// be unlinked from the tree.
    pub(crate) fn destroy_node(&mut self, node: Handle) -> T {
        self.nodes.take(node).into_value()
    }

    #[cfg(test)]
    pub(crate) fn root(&self) -> Option<Handle> {
        self.root
    }

    /// The minimum node.
    pub(crate) fn first(&self) -> Option<Handle> {
        self.leftmost
    }

    /// The maximum node.
    pub(crate) fn last(&self) -> Option<Handle> {
        self.rightmost
    }

    #[inline]
    pub(crate) fn value(&self, node: Handle) -> &T {
        self.nodes.get(node).value()
    }

    #[inline]
    pub(crate) fn value_mut(&mut self, node: Handle) -> &mut T {
        self.nodes.get_mut(node).value_mut()
    }

    #[inline]
    fn node(&self, handle: Handle) -> &Node<T> {
        self.nodes.get(handle)
    }

    #[inline]
    fn node_mut(&mut self, handle: Handle) -> &mut Node<T> {
        self.nodes.get_mut(handle)
    }

    #[inline]
    fn parent(&self, node: Handle) -> Option<Handle> {
        self.node(node).parent()
    }

    #[inline]
    fn child(&self, node: Handle, side: Side) -> Option<Handle> {
        self.node(node).child(side)
    }

    /// Absent links are black.
    #[inline]
    fn is_red(&self, link: Option<Handle>) -> bool {
        link.is_some_and(|node| self.node(node).is_red())
    }

    #[inline]
    fn set_color(&mut self, node: Handle, color: Color) {
        self.node_mut(node).set_color(color);
    }

    /// The side of `parent` that `child` hangs on.
    #[inline]
    fn side_in_parent(&self, child: Handle, parent: Handle) -> Side {
        if self.node(parent).left() == Some(child) {
            Side::Left
        } else {
            Side::Right
        }
    }

    /// Points the link that held `old` (a child of `parent`, or the root) at
    /// `new`. Does not touch `new`'s parent link.
    fn replace_child(&mut self, parent: Option<Handle>, old: Handle, new: Option<Handle>) {
        match parent {
            None => self.root = new,
            Some(parent) => {
                let side = self.side_in_parent(old, parent);
                self.node_mut(parent).set_child(side, new);
            }
        }
    }

    pub(crate) fn minimum(&self, node: Handle) -> Handle {
        extreme(&self.nodes, node, Side::Left)
    }

    pub(crate) fn maximum(&self, node: Handle) -> Handle {
        extreme(&self.nodes, node, Side::Right)
    }

    /// The next node in key order.
    pub(crate) fn successor(&self, node: Handle) -> Option<Handle> {
        step(&self.nodes, node, Side::Right)
    }

    /// The previous node in key order.
    pub(crate) fn predecessor(&self, node: Handle) -> Option<Handle> {
        step(&self.nodes, node, Side::Left)
    }

    pub(crate) fn begin(&self) -> Cursor {
        Cursor::from_handle(self.leftmost)
    }

    /// Advances a cursor. Saturates at the end.
    pub(crate) fn next(&self, cursor: Cursor) -> Cursor {
        match cursor.0 {
            Position::BeforeFirst => self.begin(),
            Position::Node(node) => Cursor::from_handle(self.successor(node)),
            Position::End => Cursor::END,
        }
    }

    /// Steps a cursor back. Stepping back from the end yields the maximum;
    /// saturates before the first element.
    pub(crate) fn prev(&self, cursor: Cursor) -> Cursor {
        let previous = match cursor.0 {
            Position::End => self.rightmost,
            Position::Node(node) => self.predecessor(node),
            Position::BeforeFirst => None,
        };
        previous.map_or(Cursor::BEFORE_FIRST, Cursor::at)
    }

    /// Resolves a cursor to its value. Boundaries have none.
    pub(crate) fn get_at(&self, cursor: Cursor) -> Option<&T> {
        cursor.handle().map(|node| self.value(node))
    }

    pub(crate) fn get_at_mut(&mut self, cursor: Cursor) -> Option<&mut T> {
        cursor.handle().map(|node| self.value_mut(node))
    }

    /// Rotates the subtree rooted at `pivot` toward `dir`, lifting the child
    /// on the opposite side into `pivot`'s place. In-order sequence is kept.
    ///
    /// ```text
    ///   rotate(x, Left)              rotate(x, Right)
    ///
    ///     x            y               x          y
    ///    / \          / \             / \        / \
    ///   a   y   =>   x   c           y   c  =>  a   x
    ///      / \      / \             / \            / \
    ///     b   c    a   b           a   b          b   c
    /// ```
    fn rotate(&mut self, pivot: Handle, dir: Side) {
        let heavy = dir.opposite();
        let Some(top) = self.child(pivot, heavy) else {
            unreachable!("rotation pivot {pivot:?} has no {heavy:?} child");
        };

        let inner = self.child(top, dir);
        self.node_mut(pivot).set_child(heavy, inner);
        if let Some(inner) = inner {
            self.node_mut(inner).set_parent(Some(pivot));
        }

        let parent = self.parent(pivot);
        self.node_mut(top).set_parent(parent);
        self.replace_child(parent, pivot, Some(top));

        self.node_mut(top).set_child(dir, Some(pivot));
        self.node_mut(pivot).set_parent(Some(top));
    }

    /// Links a freshly created node below `parent` and rebalances.
    fn attach(&mut self, node: Handle, parent: Option<Handle>, side: Side) {
        self.node_mut(node).set_parent(parent);
        match parent {
            None => {
                self.root = Some(node);
                self.leftmost = Some(node);
                self.rightmost = Some(node);
            }
            Some(parent) => {
                self.node_mut(parent).set_child(side, Some(node));
                match side {
                    Side::Left if self.leftmost == Some(parent) => self.leftmost = Some(node),
                    Side::Right if self.rightmost == Some(parent) => self.rightmost = Some(node),
                    Side::Left | Side::Right => {}
                }
            }
        }
        self.insert_rebalance(node);
        self.len += 1;
    }

    /// Restores the red-black invariants after `node` was attached as a leaf.
    fn insert_rebalance(&mut self, node: Handle) {
        self.set_color(node, Color::Red);

        let mut x = node;
        while let Some(parent) = self.parent(x) {
            if !self.node(parent).is_red() {
                break;
            }
            // The root is black, so a red parent has a parent of its own.
            let Some(grandparent) = self.parent(parent) else {
                break;
            };

            let side = self.side_in_parent(parent, grandparent);
            let uncle = self.child(grandparent, side.opposite());

            if self.is_red(uncle) {
                trace!("insert fix-up: red uncle, pushing red up to {grandparent:?}");
                self.set_color(parent, Color::Black);
                if let Some(uncle) = uncle {
                    self.set_color(uncle, Color::Black);
                }
                self.set_color(grandparent, Color::Red);
                x = grandparent;
                continue;
            }

            let mut top = parent;
            if self.child(parent, side.opposite()) == Some(x) {
                trace!("insert fix-up: triangle at {parent:?}");
                self.rotate(parent, side);
                top = x;
            }

            trace!("insert fix-up: line at {grandparent:?}");
            self.set_color(top, Color::Black);
            self.set_color(grandparent, Color::Red);
            self.rotate(grandparent, side.opposite());
            break;
        }

        if let Some(root) = self.root {
            self.set_color(root, Color::Black);
        }
    }

    /// Unlinks and frees `node`, returning its value and its in-order
    /// successor. Handles to every other node stay valid.
    pub(crate) fn erase(&mut self, node: Handle) -> (T, Option<Handle>) {
        let next = self.successor(node);
        self.unlink(node);
        let value = self.destroy_node(node);
        self.len -= 1;
        (value, next)
    }

    /// Erases the node under `cursor`, returning its value and a cursor to
    /// the position that followed it.
    ///
    /// # Panics
    /// Panics if `cursor` is a boundary or its node is no longer live.
    pub(crate) fn erase_at(&mut self, cursor: Cursor) -> (T, Cursor) {
        let Some(node) = cursor.handle() else {
            panic!("cannot erase at boundary cursor {cursor:?}");
        };
        assert!(self.nodes.contains(node), "cannot erase through stale cursor {cursor:?}");

        let (value, next) = self.erase(node);
        (value, Cursor::from_handle(next))
    }

    /// Detaches `z` from the tree structure and rebalances.
    ///
    /// A node with two children is replaced by its successor `y`, which takes
    /// over `z`'s links and color; the node physically leaving its position is
    /// then `y`, which has at most one child.
    fn unlink(&mut self, z: Handle) {
        let z_parent = self.parent(z);
        let z_left = self.child(z, Side::Left);
        let z_right = self.child(z, Side::Right);

        // `x` moves into the vacated position; `x_parent` is its new parent,
        // recorded separately because `x` may be absent.
        let (x, x_parent, removed_color) = if let (Some(z_left), Some(z_right)) = (z_left, z_right) {
            let y = self.minimum(z_right);
            let x = self.child(y, Side::Right);
            trace!("erase: splicing successor {y:?} into {z:?}");

            self.node_mut(z_left).set_parent(Some(y));
            self.node_mut(y).set_child(Side::Left, Some(z_left));

            let x_parent = if y == z_right {
                Some(y)
            } else {
                let y_parent = self.parent(y);
                if let Some(x) = x {
                    self.node_mut(x).set_parent(y_parent);
                }
                if let Some(y_parent) = y_parent {
                    self.node_mut(y_parent).set_child(Side::Left, x);
                }
                self.node_mut(y).set_child(Side::Right, Some(z_right));
                self.node_mut(z_right).set_parent(Some(y));
                y_parent
            };

            self.replace_child(z_parent, z, Some(y));
            self.node_mut(y).set_parent(z_parent);

            let y_color = self.node(y).color();
            let z_color = self.node(z).color();
            self.set_color(y, z_color);

            // `z` had two children, so it was neither extremum.
            (x, x_parent, y_color)
        } else {
            let x = z_left.or(z_right);
            if let Some(x) = x {
                self.node_mut(x).set_parent(z_parent);
            }
            self.replace_child(z_parent, z, x);

            if self.leftmost == Some(z) {
                self.leftmost = match x {
                    Some(x) => Some(self.minimum(x)),
                    None => z_parent,
                };
            }
            if self.rightmost == Some(z) {
                self.rightmost = match x {
                    Some(x) => Some(self.maximum(x)),
                    None => z_parent,
                };
            }

            (x, z_parent, self.node(z).color())
        };

        if removed_color == Color::Black {
            self.erase_rebalance(x, x_parent);
        }
    }

    /// Resolves the black-height deficit left at `x` (child of `x_parent`)
    /// after a black node was removed.
    fn erase_rebalance(&mut self, mut x: Option<Handle>, mut x_parent: Option<Handle>) {
        while x != self.root && !self.is_red(x) {
            let Some(parent) = x_parent else {
                break;
            };

            let side = if self.child(parent, Side::Left) == x {
                Side::Left
            } else {
                Side::Right
            };
            let far = side.opposite();

            // The removed black node guarantees the other side has black height >= 1.
            let Some(mut sibling) = self.child(parent, far) else {
                unreachable!("black-height deficit under {parent:?} without a sibling");
            };

            if self.node(sibling).is_red() {
                trace!("erase fix-up: red sibling {sibling:?}");
                self.set_color(sibling, Color::Black);
                self.set_color(parent, Color::Red);
                self.rotate(parent, side);
                let Some(next) = self.child(parent, far) else {
                    unreachable!("red sibling rotation left {parent:?} without a sibling");
                };
                sibling = next;
            }

            let near_child = self.child(sibling, side);
            let far_child = self.child(sibling, far);

            if !self.is_red(near_child) && !self.is_red(far_child) {
                trace!("erase fix-up: black sibling {sibling:?} with black children");
                self.set_color(sibling, Color::Red);
                x = Some(parent);
                x_parent = self.parent(parent);
                continue;
            }

            if !self.is_red(far_child) {
                trace!("erase fix-up: red near child under {sibling:?}");
                if let Some(near_child) = near_child {
                    self.set_color(near_child, Color::Black);
                }
                self.set_color(sibling, Color::Red);
                self.rotate(sibling, far);
                let Some(next) = self.child(parent, far) else {
                    unreachable!("near child rotation left {parent:?} without a sibling");
                };
                sibling = next;
            }

            trace!("erase fix-up: red far child under {sibling:?}");
            let parent_color = self.node(parent).color();
            self.set_color(sibling, parent_color);
            self.set_color(parent, Color::Black);
            if let Some(far_child) = self.child(sibling, far) {
                self.set_color(far_child, Color::Black);
            }
            self.rotate(parent, side);
            break;
        }

        if let Some(x) = x {
            self.set_color(x, Color::Black);
        }
    }

    /// Handles of every node in key order.
    pub(crate) fn in_order_handles(&self) -> Vec<Handle> {
        let mut handles = Vec::with_capacity(self.len);
        let mut current = self.leftmost;
        while let Some(node) = current {
            handles.push(node);
            current = self.successor(node);
        }
        handles
    }

    /// Moves every value out in key order, leaving the tree empty.
    pub(crate) fn drain_to_vec(&mut self) -> Vec<T> {
        let values = self
            .in_order_handles()
            .into_iter()
            .map(|node| self.nodes.take(node).into_value())
            .collect();
        self.clear();
        values
    }

    pub(crate) fn iter(&self) -> Iter<'_, T> {
        Iter {
            nodes: &self.nodes,
            front: self.leftmost,
            back: self.rightmost,
            remaining: self.len,
        }
    }

    /// Mutable references to every value in key order.
    ///
    /// The references are gathered up front: each arena slot is borrowed
    /// exactly once and then placed at its in-order position.
    pub(crate) fn iter_mut(&mut self) -> alloc::vec::IntoIter<&mut T> {
        let order = self.in_order_handles();
        let slot_count = order.iter().map(|node| node.to_index() + 1).max().unwrap_or(0);

        let mut rank = alloc::vec![0usize; slot_count];
        for (position, node) in order.iter().enumerate() {
            rank[node.to_index()] = position;
        }

        let mut placed: Vec<Option<&mut T>> = core::iter::repeat_with(|| None).take(order.len()).collect();
        for (node, slot) in self.nodes.iter_mut() {
            placed[rank[node.to_index()]] = Some(slot.value_mut());
        }
        placed.into_iter().flatten().collect::<Vec<_>>().into_iter()
    }
}

impl<T, X: KeyOf<T>, C: Compare<X::Key>> RawRBTree<T, X, C> {
    #[inline]
    fn key(&self, node: Handle) -> &X::Key {
        self.key_of.key_of(self.node(node).value())
    }

    #[inline]
    fn less(&self, a: &X::Key, b: &X::Key) -> bool {
        self.compare.less(a, b)
    }

    /// Finds where `key` would be attached, or the node already holding an
    /// equivalent key.
    ///
    /// The descent goes left when `key` orders before the current node and
    /// right otherwise, so an equivalent key ends up as the in-order
    /// predecessor of the vacant slot. Duplicates are detected by checking
    /// that predecessor: the key is new only if the predecessor orders
    /// strictly before it.
    pub(crate) fn locate_insertion_point(&self, key: &X::Key) -> InsertPosition {
        let mut parent = None;
        let mut side = Side::Left;
        let mut current = self.root;
        while let Some(node) = current {
            parent = Some(node);
            side = if self.less(key, self.key(node)) {
                Side::Left
            } else {
                Side::Right
            };
            current = self.child(node, side);
        }

        let Some(parent) = parent else {
            return InsertPosition::Vacant { parent: None, side };
        };
        let vacant = InsertPosition::Vacant {
            parent: Some(parent),
            side,
        };

        let predecessor = match side {
            Side::Right => parent,
            // Nothing precedes the minimum.
            Side::Left if self.leftmost == Some(parent) => return vacant,
            Side::Left => match self.predecessor(parent) {
                Some(predecessor) => predecessor,
                None => return vacant,
            },
        };

        if self.less(self.key(predecessor), key) {
            vacant
        } else {
            InsertPosition::Occupied(predecessor)
        }
    }

    /// Inserts `value` unless an equivalent key is present.
    ///
    /// Returns the node holding the key and whether `value` was inserted. A
    /// rejected `value` is dropped.
    ///
    /// # Panics
    /// Panics if every addressable node slot is in use.
    pub(crate) fn insert_unique(&mut self, value: T) -> (Handle, bool) {
        match self.locate_insertion_point(self.key_of.key_of(&value)) {
            InsertPosition::Occupied(existing) => (existing, false),
            InsertPosition::Vacant { parent, side } => {
                let node = self.create_node(value);
                self.attach(node, parent, side);
                (node, true)
            }
        }
    }

    /// Fallible form of [`insert_unique`](Self::insert_unique). The node is
    /// allocated before any link changes, so on error the tree is untouched.
    pub(crate) fn try_insert_unique(&mut self, value: T) -> Result<(Handle, bool), AllocError> {
        match self.locate_insertion_point(self.key_of.key_of(&value)) {
            InsertPosition::Occupied(existing) => Ok((existing, false)),
            InsertPosition::Vacant { parent, side } => {
                let node = self
                    .try_create_node(value)
                    .inspect_err(|error| warn!("insert failed after {} nodes: {error}", self.len))?;
                self.attach(node, parent, side);
                Ok((node, true))
            }
        }
    }

    /// The first node whose key does not order before `key`.
    pub(crate) fn lower_bound(&self, key: &X::Key) -> Option<Handle> {
        let mut candidate = None;
        let mut current = self.root;
        while let Some(node) = current {
            if self.less(self.key(node), key) {
                current = self.child(node, Side::Right);
            } else {
                candidate = Some(node);
                current = self.child(node, Side::Left);
            }
        }
        candidate
    }

    /// The first node whose key orders after `key`.
    pub(crate) fn upper_bound(&self, key: &X::Key) -> Option<Handle> {
        let mut candidate = None;
        let mut current = self.root;
        while let Some(node) = current {
            if self.less(key, self.key(node)) {
                candidate = Some(node);
                current = self.child(node, Side::Left);
            } else {
                current = self.child(node, Side::Right);
            }
        }
        candidate
    }

    /// The node holding a key equivalent to `key`.
    pub(crate) fn find(&self, key: &X::Key) -> Option<Handle> {
        self.lower_bound(key).filter(|&node| !self.less(key, self.key(node)))
    }
}

/// Follows `side` links down from `node` as far as they go.
fn extreme<T>(nodes: &Arena<Node<T>>, mut node: Handle, side: Side) -> Handle {
    while let Some(child) = nodes.get(node).child(side) {
        node = child;
    }
    node
}

/// In-order neighbour of `node`: `Right` steps to the successor, `Left` to
/// the predecessor.
fn step<T>(nodes: &Arena<Node<T>>, node: Handle, toward: Side) -> Option<Handle> {
    if let Some(child) = nodes.get(node).child(toward) {
        return Some(extreme(nodes, child, toward.opposite()));
    }

    let mut current = node;
    while let Some(parent) = nodes.get(current).parent() {
        if nodes.get(parent).child(toward.opposite()) == Some(current) {
            return Some(parent);
        }
        current = parent;
    }
    None
}

/// In-order iterator over the values of a `RawRBTree`.
pub(crate) struct Iter<'a, T> {
    nodes: &'a Arena<Node<T>>,
    front: Option<Handle>,
    back: Option<Handle>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.front?;
        self.remaining -= 1;
        self.front = step(self.nodes, node, Side::Right);
        Some(self.nodes.get(node).value())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.back?;
        self.remaining -= 1;
        self.back = step(self.nodes, node, Side::Left);
        Some(self.nodes.get(node).value())
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter { ..*self }
    }
}
