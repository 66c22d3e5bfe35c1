//! The map type and its common instantiations.

pub use crate::internal::skiplist::SkipList;

/// A map over integer keys in ascending order.
pub type IntMap<V> = SkipList<i64, V>;

/// A map over string keys in lexicographic order.
pub type StringMap<V> = SkipList<String, V>;
