//! In-memory index of {key, value} entries, kept sorted by a pluggable
//! comparator over a self-balancing [red-black][rbt] binary search tree.
//!
//! * [`Rbt`] type for key/value indexing.
//! * [`Set`] type for indexing a collection of unique keys, with set
//!   algebra on top.
//!
//! Keys default to their natural [`Ord`] order; any comparator from the
//! [compare] crate can be supplied instead via the `with_cmp`
//! constructors. Containers are single threaded by design, Rust's
//! borrow rules serialize mutation against reads, including lazy
//! iteration.
//!
//! [rbt]: https://en.wikipedia.org/wiki/Red-black_tree
//! [compare]: https://docs.rs/compare

mod depth;
mod empty;
mod error;
mod rb;
mod set;

pub use crate::depth::Depth;
pub use crate::empty::Empty;
pub use crate::error::RbtError;
pub use crate::rb::{Iter, Node, Range, Rbt, Reverse, Stats, Traversal};
pub use crate::set::{Set, SetIter};

#[cfg(test)]
mod rb_test;
