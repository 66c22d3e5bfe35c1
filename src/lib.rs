//! An ordered map built on a skip list.
//!
//! [SkipList](SkipList) maps keys to values in the order given by a pluggable
//! [Comparator](comparator::Comparator). Lookups, insertions and removals take expected
//! logarithmic time, and the map can be walked in both directions through
//! [cursors](cursor) or bounded to a half-open key interval with [SkipList::range].
//!
//! ```
//! use skippy_map::{cursor::Cursor, SkipList};
//!
//! let mut list = SkipList::new();
//! for i in 0..20 {
//!     list.set(i, i * 2);
//! }
//!
//! assert_eq!(list.get(&5), Some(&10));
//!
//! let mut range = list.range(5, 8);
//! let mut keys = Vec::new();
//! while range.move_next() {
//!     keys.push(*range.key().unwrap());
//! }
//! assert_eq!(keys, vec![5, 6, 7]);
//! ```
#![warn(
    // missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]
pub mod comparator;
pub mod skiplist;

mod internal;

pub use internal::skiplist::{cursor, iter};
pub use internal::utils::DEFAULT_MAX_LEVEL;
pub use skiplist::{IntMap, SkipList, StringMap};
