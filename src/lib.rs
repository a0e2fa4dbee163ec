//! # An in-memory B+ tree index
//!
//! `bplus-index` maps ordered keys to values with a B+ tree.  All values live
//! in the leaves, which are linked in key order; internal nodes hold only the
//! routing keys used to pick a child during descent.  Nodes split as soon as
//! they fill up, and the tree grows in height only when the root splits.
//!
//! The tree supports insertion, point lookup and in-order iteration.  There
//! is no deletion.
//!
//! ```
//! use bplus_index::BPlusTree;
//!
//! let mut t = BPlusTree::new(4).unwrap();
//! for k in [10, 20, 5, 6, 12, 30, 7, 17] {
//!     t.insert(k, k * 100);
//! }
//!
//! assert_eq!(t.search(&6), Some(&600));
//! assert_eq!(t.search(&99), None);
//! assert!(t.keys().copied().eq([5, 6, 7, 10, 12, 17, 20, 30]));
//! ```

mod bplus;
pub use bplus::{BPlusTree, Iter, DEFAULT_ORDER, MIN_ORDER};

mod error;
pub use error::TreeError;

#[cfg(feature = "serde")]
mod serde;
