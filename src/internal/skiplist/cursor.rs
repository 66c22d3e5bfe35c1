//! Cursors over a [SkipList](super::SkipList).
//!
//! A cursor sits either on a node or in the gap just before one, and moves one node at a
//! time along level 0 in either direction. Cursors borrow the list, so the list cannot be
//! mutated while one is alive.

use super::SkipList;
use crate::comparator::{Comparator, Natural};
use crate::internal::utils::{Link, NodeId, Tower};

/// The movement protocol shared by [ListCursor](ListCursor) and [RangeCursor](RangeCursor).
///
/// Every move reports whether it happened. A failed move leaves the cursor where it was.
pub trait Cursor<'a> {
    type Key: 'a;
    type Value: 'a;

    /// Steps to the next node.
    fn move_next(&mut self) -> bool;

    /// Steps to the previous node.
    fn move_prev(&mut self) -> bool;

    /// The key under the cursor, or `None` if the cursor is not on a node yet.
    fn key(&self) -> Option<&'a Self::Key>;

    /// The value under the cursor, or `None` if the cursor is not on a node yet.
    fn value(&self) -> Option<&'a Self::Value>;

    /// Moves to the first node whose key is not less than `key`.
    fn seek(&mut self, key: &Self::Key) -> bool;

    /// Releases the cursor. Dropping it has the same effect.
    fn close(self)
    where
        Self: Sized,
    {
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Position {
    /// In the gap before a node; `Before(None)` is the gap after the last node.
    Before(Link),
    At(NodeId),
}

/// An unbounded cursor, created by [SkipList::cursor](SkipList::cursor) and the `seek`
/// family of methods.
pub struct ListCursor<'a, K, V, C = Natural> {
    list: &'a SkipList<K, V, C>,
    pos: Position,
}

impl<'a, K, V, C> ListCursor<'a, K, V, C> {
    fn new(list: &'a SkipList<K, V, C>, pos: Position) -> Self {
        ListCursor { list, pos }
    }

    /// The entry under the cursor.
    pub fn entry(&self) -> Option<(&'a K, &'a V)> {
        let list = self.list;

        match self.pos {
            Position::At(id) => Some(list.entry(id)),
            Position::Before(_) => None,
        }
    }

    fn peek_next(&self) -> Link {
        match self.pos {
            Position::Before(next) => next,
            Position::At(id) => self.list.nodes[id].next(),
        }
    }

    fn peek_prev(&self) -> Link {
        match self.pos {
            Position::Before(Some(id)) | Position::At(id) => self.list.nodes[id].backward,
            Position::Before(None) => self.list.state.footer,
        }
    }

    fn key_of(&self, id: NodeId) -> &'a K {
        let list = self.list;
        &list.nodes[id].key
    }
}

impl<'a, K, V, C> ListCursor<'a, K, V, C>
where
    C: Comparator<K>,
{
    /// Finds the first node not less than `key`. The search starts at the current node when
    /// it is known to precede `key`, and at the head otherwise.
    fn locate(&self, key: &K) -> Link {
        let start = match self.pos {
            Position::At(id) if self.list.cmp.less_than(self.key_of(id), key) => Tower::Node(id),
            _ => Tower::Head,
        };

        self.list.find_from(start, key, None)
    }
}

impl<'a, K, V, C> Cursor<'a> for ListCursor<'a, K, V, C>
where
    K: 'a,
    V: 'a,
    C: Comparator<K>,
{
    type Key = K;
    type Value = V;

    fn move_next(&mut self) -> bool {
        match self.peek_next() {
            Some(next) => {
                self.pos = Position::At(next);
                true
            }
            None => false,
        }
    }

    fn move_prev(&mut self) -> bool {
        match self.peek_prev() {
            Some(prev) => {
                self.pos = Position::At(prev);
                true
            }
            None => false,
        }
    }

    fn key(&self) -> Option<&'a K> {
        self.entry().map(|(key, _)| key)
    }

    fn value(&self) -> Option<&'a V> {
        self.entry().map(|(_, val)| val)
    }

    fn seek(&mut self, key: &K) -> bool {
        match self.locate(key) {
            Some(found) => {
                self.pos = Position::At(found);
                true
            }
            None => false,
        }
    }
}

/// Yields the entry reached by each successful [move_next](Cursor::move_next). The entry
/// under the cursor when iteration starts is not yielded, so a cursor from
/// [SkipList::seek](SkipList::seek) continues with the node after the one it landed on.
impl<'a, K, V, C> Iterator for ListCursor<'a, K, V, C>
where
    K: 'a,
    V: 'a,
    C: Comparator<K>,
{
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.move_next() {
            self.entry()
        } else {
            None
        }
    }
}

/// A cursor confined to the half-open key interval `[lower, upper)`, created by
/// [SkipList::range](SkipList::range).
pub struct RangeCursor<'a, K, V, C = Natural> {
    inner: ListCursor<'a, K, V, C>,
    lower: K,
    upper: K,
}

impl<'a, K, V, C> RangeCursor<'a, K, V, C> {
    /// The inclusive lower bound.
    pub fn lower(&self) -> &K {
        &self.lower
    }

    /// The exclusive upper bound.
    pub fn upper(&self) -> &K {
        &self.upper
    }

    pub fn entry(&self) -> Option<(&'a K, &'a V)> {
        self.inner.entry()
    }
}

impl<'a, K, V, C> RangeCursor<'a, K, V, C>
where
    C: Comparator<K>,
{
    fn below_upper(&self, key: &K) -> bool {
        self.inner.list.cmp.less_than(key, &self.upper)
    }

    fn below_lower(&self, key: &K) -> bool {
        self.inner.list.cmp.less_than(key, &self.lower)
    }

    fn in_window(&self, key: &K) -> bool {
        !self.below_lower(key) && self.below_upper(key)
    }
}

impl<'a, K, V, C> Cursor<'a> for RangeCursor<'a, K, V, C>
where
    K: 'a,
    V: 'a,
    C: Comparator<K>,
{
    type Key = K;
    type Value = V;

    fn move_next(&mut self) -> bool {
        match self.inner.peek_next() {
            Some(next) if self.below_upper(self.inner.key_of(next)) => {
                self.inner.pos = Position::At(next);
                true
            }
            _ => false,
        }
    }

    fn move_prev(&mut self) -> bool {
        // from the starting gap, stepping back lands on the first node of the window
        let prev = match self.inner.pos {
            Position::Before(Some(start)) => Some(start),
            _ => self.inner.peek_prev(),
        };

        match prev {
            Some(prev) if self.in_window(self.inner.key_of(prev)) => {
                self.inner.pos = Position::At(prev);
                true
            }
            _ => false,
        }
    }

    fn key(&self) -> Option<&'a K> {
        self.inner.key()
    }

    fn value(&self) -> Option<&'a V> {
        self.inner.value()
    }

    fn seek(&mut self, key: &K) -> bool {
        if self.below_lower(key) || !self.below_upper(key) {
            return false;
        }

        match self.inner.locate(key) {
            Some(found) if self.below_upper(self.inner.key_of(found)) => {
                self.inner.pos = Position::At(found);
                true
            }
            _ => false,
        }
    }
}

impl<'a, K, V, C> Iterator for RangeCursor<'a, K, V, C>
where
    K: 'a,
    V: 'a,
    C: Comparator<K>,
{
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.move_next() {
            self.entry()
        } else {
            None
        }
    }
}

impl<K, V, C> SkipList<K, V, C> {
    /// A cursor positioned before the first node.
    pub fn cursor(&self) -> ListCursor<'_, K, V, C> {
        ListCursor::new(self, Position::Before(self.head.levels[0]))
    }

    /// A cursor on the first node, or `None` if the list is empty.
    pub fn seek_to_first(&self) -> Option<ListCursor<'_, K, V, C>> {
        let first = self.head.levels[0]?;
        Some(ListCursor::new(self, Position::At(first)))
    }

    /// A cursor on the last node, or `None` if the list is empty.
    pub fn seek_to_last(&self) -> Option<ListCursor<'_, K, V, C>> {
        let last = self.state.footer?;
        Some(ListCursor::new(self, Position::At(last)))
    }
}

impl<K, V, C> SkipList<K, V, C>
where
    C: Comparator<K>,
{
    /// A cursor on the first node whose key is not less than `key`, or `None` if there is
    /// no such node.
    pub fn seek(&self, key: &K) -> Option<ListCursor<'_, K, V, C>> {
        let found = self.find_from(Tower::Head, key, None)?;
        Some(ListCursor::new(self, Position::At(found)))
    }

    /// A cursor over the keys in `[from, to)`, positioned just before the first of them.
    pub fn range(&self, from: K, to: K) -> RangeCursor<'_, K, V, C> {
        let start = self.find_from(Tower::Head, &from, None);

        RangeCursor {
            inner: ListCursor::new(self, Position::Before(start)),
            lower: from,
            upper: to,
        }
    }
}
