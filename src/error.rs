use alloc::collections::TryReserveError;

use thiserror::Error;

/// The error returned when a tree cannot obtain storage for a new node.
///
/// Returned by [`RBTreeMap::try_insert`](crate::RBTreeMap::try_insert) and
/// [`RBTreeSet::try_insert`](crate::RBTreeSet::try_insert). When it is
/// returned the collection is exactly as it was before the call.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AllocError {
    /// Every node slot the tree can address is occupied.
    #[error("tree is at maximum node capacity ({max})")]
    CapacityOverflow {
        /// The largest number of nodes the tree can hold.
        max: usize,
    },
    /// The allocator refused to grow the node storage.
    #[error("node allocation failed")]
    AllocFailed(#[from] TryReserveError),
}
