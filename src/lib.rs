//! Red-black tree collections for Rust.
//!
//! This crate provides [`RBTreeMap`] and [`RBTreeSet`], ordered collections
//! built on one red-black tree engine. Each element lives in its own node, so
//! positions can be held as [`Cursor`]s that survive unrelated inserts and
//! erasures, and stepped forward or backward from either end.
//!
//! Ordering is supplied by a [`Compare`] implementation instead of being fixed
//! to [`Ord`]: the default [`Less`] sorts ascending, [`Greater`] descending,
//! and [`OrderBy`] adapts any strict weak order given as a closure. Keys are
//! equal when neither orders before the other.
//!
//! # Example
//!
//! ```
//! use sumi_tree::RBTreeMap;
//!
//! let mut scores = RBTreeMap::new();
//! scores.insert("Alice", 100);
//! scores.insert("Bob", 85);
//! scores.insert("Carol", 92);
//!
//! // Inserting an existing key keeps the stored entry.
//! let (at, inserted) = scores.insert("Bob", 0);
//! assert!(!inserted);
//! assert_eq!(scores.get_at(at), Some((&"Bob", &85)));
//!
//! // Walk from the back with a cursor.
//! let last = scores.prev(scores.end());
//! assert_eq!(scores.get_at(last), Some((&"Carol", &92)));
//!
//! // Erasing returns the removed entry and the position after it.
//! let ((name, _), next) = scores.erase(scores.find(&"Alice"));
//! assert_eq!(name, "Alice");
//! assert_eq!(next, scores.begin());
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Stable cursors** - Inserting never invalidates a cursor; erasing invalidates only the erased position
//! - **Custom orderings** - Any strict weak order, not just `Ord`
//! - **Fallible insertion** - `try_insert` reports allocation failure and leaves the collection unchanged
//!
//! # Implementation
//!
//! Nodes live in a single arena and refer to each other by index, so there
//! are no owning pointer cycles and dropping a tree is a flat pass over its
//! storage. The minimum and maximum nodes are cached for O(1) access to both
//! ends. Inserts and erasures rebalance with at most three rotations.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod compare;
mod cursor;
mod error;
mod raw;

pub mod rb_tree_map;
pub mod rb_tree_set;

pub use compare::{Compare, Greater, Less, OrderBy};
pub use cursor::Cursor;
pub use error::AllocError;
pub use rb_tree_map::RBTreeMap;
pub use rb_tree_set::RBTreeSet;
