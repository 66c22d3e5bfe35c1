use core::{fmt::Debug, mem};

use crate::comparator::{ByLessThan, Comparator, LessThan, Natural};
use crate::internal::utils::{
    GeneratesLevel, Head, LevelRng, Link, Node, NodeId, Nodes, Tower, DEFAULT_MAX_LEVEL,
};

pub mod cursor;
pub mod iter;

/// An ordered map backed by a skip list.
///
/// Nodes live in an arena and link to one-another through their ids: every node carries one
/// forward link per level it was drawn at and a single backward link to its predecessor on
/// level 0. Keys are ordered by the list's [Comparator](Comparator), which defaults to the
/// key's [Ord](Ord) implementation.
pub struct SkipList<K, V, C = Natural> {
    pub(crate) head: Head,
    pub(crate) nodes: Nodes<K, V>,
    pub(crate) state: ListState,
    pub(crate) cmp: C,
}

pub(crate) struct ListState {
    pub(crate) len: usize,
    pub(crate) max_level: usize,
    /// The node holding the largest key.
    pub(crate) footer: Link,
    pub(crate) levels: LevelRng,
}

impl ListState {
    fn new() -> Self {
        ListState {
            len: 0,
            max_level: DEFAULT_MAX_LEVEL,
            footer: None,
            levels: LevelRng::new(),
        }
    }
}

/// The outcome of a search: the last tower before the key on every level, and the first
/// node whose key is not less than the key.
pub(crate) struct SearchResult {
    pub(crate) prev: Vec<Tower>,
    pub(crate) target: Link,
}

impl<K, V> SkipList<K, V, Natural>
where
    K: Ord,
{
    /// Instantiates a new, empty [SkipList](SkipList) ordered by `K`'s [Ord](Ord).
    pub fn new() -> Self {
        Self::with_comparator(Natural)
    }
}

impl<K, V> Default for SkipList<K, V, Natural>
where
    K: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> SkipList<K, V, ByLessThan>
where
    K: LessThan,
{
    /// Instantiates a new, empty [SkipList](SkipList) ordered by the keys' own
    /// [LessThan](LessThan) implementation.
    pub fn by_less_than() -> Self {
        Self::with_comparator(ByLessThan)
    }
}

impl<K, V, C> SkipList<K, V, C> {
    /// Instantiates a new, empty [SkipList](SkipList) ordered by `cmp`.
    pub fn with_comparator(cmp: C) -> Self {
        SkipList {
            head: Head::new(),
            nodes: Nodes::new(),
            state: ListState::new(),
            cmp,
        }
    }

    /// Sets the ceiling on the level a new node can be drawn at.
    pub fn with_max_level(mut self, max_level: usize) -> Self {
        self.set_max_level(max_level);
        self
    }

    /// Seeds the level generator, making the shape of the list reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.state.levels = LevelRng::seeded(seed);
        self
    }

    pub fn len(&self) -> usize {
        self.state.len
    }

    pub fn is_empty(&self) -> bool {
        self.state.len < 1
    }

    /// The highest level currently in use.
    pub fn level(&self) -> usize {
        self.head.level()
    }

    pub fn max_level(&self) -> usize {
        self.state.max_level
    }

    /// Changes the ceiling on future level draws. Nodes already in the list keep their level.
    pub fn set_max_level(&mut self, max_level: usize) {
        log::debug!(
            "max level changed from {} to {}",
            self.state.max_level,
            max_level
        );
        self.state.max_level = max_level;
    }

    /// Levels are drawn up to the configured maximum, or the current level if the list
    /// already grew past it.
    fn effective_max_level(&self) -> usize {
        core::cmp::max(self.level(), self.state.max_level)
    }

    pub fn comparator(&self) -> &C {
        &self.cmp
    }

    /// Removes every entry, keeping the comparator and configuration.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = Head::new();
        self.state.len = 0;
        self.state.footer = None;
    }

    /// The entry with the smallest key.
    pub fn first(&self) -> Option<(&K, &V)> {
        self.head.levels[0].map(|id| self.entry(id))
    }

    /// The entry with the largest key.
    pub fn last(&self) -> Option<(&K, &V)> {
        self.state.footer.map(|id| self.entry(id))
    }

    /// Removes and returns the entry with the smallest key.
    pub fn remove_first(&mut self) -> Option<(K, V)> {
        let first = self.head.levels[0]?;

        // nothing precedes the first node, so the head is its predecessor on every level
        let prev = vec![Tower::Head; self.level() + 1];
        let Node { key, val, .. } = self.unlink(first, &prev);

        Some((key, val))
    }

    pub(crate) fn entry(&self, id: NodeId) -> (&K, &V) {
        let node = &self.nodes[id];
        (&node.key, &node.val)
    }

    pub(crate) fn levels(&self, tower: Tower) -> &[Link] {
        match tower {
            Tower::Head => &self.head.levels[..],
            Tower::Node(id) => &self.nodes[id].levels[..],
        }
    }

    fn levels_mut(&mut self, tower: Tower) -> &mut [Link] {
        match tower {
            Tower::Head => &mut self.head.levels[..],
            Tower::Node(id) => &mut self.nodes[id].levels[..],
        }
    }

    /// Splices `id` in after the towers in `prev` on every level of its own tower.
    fn link(&mut self, id: NodeId, prev: &[Tower]) {
        let height = self.nodes[id].height();

        for (level, &tower) in prev.iter().enumerate().take(height) {
            let next = self.levels(tower)[level];
            self.nodes[id].levels[level] = next;
            self.levels_mut(tower)[level] = Some(id);
        }

        if let Some(next) = self.nodes[id].next() {
            self.nodes[next].backward = Some(id);
        }
    }

    /// Logically removes the node from the list by linking its adjacent nodes to one-another,
    /// then hands the node back out of the arena.
    fn unlink(&mut self, id: NodeId, prev: &[Tower]) -> Node<K, V> {
        let (backward, next) = {
            let node = &self.nodes[id];
            (node.backward, node.next())
        };

        if self.state.footer == Some(id) {
            self.state.footer = backward;
        }

        if let Some(next) = next {
            self.nodes[next].backward = backward;
        }

        for (level, &tower) in prev.iter().enumerate() {
            // past the node's own height the predecessors point elsewhere
            if self.levels(tower)[level] != Some(id) {
                break;
            }

            let skip = self.nodes[id].levels[level];
            self.levels_mut(tower)[level] = skip;
        }

        let before = self.level();
        self.head.shrink();
        if self.level() < before {
            log::trace!("list shrunk from level {} to {}", before, self.level());
        }

        self.state.len -= 1;
        self.nodes.dealloc(id)
    }
}

impl<K, V, C> SkipList<K, V, C>
where
    C: Comparator<K>,
{
    /// Walks from the top of `start` down to level 0, moving forward on each level while the
    /// next key is less than `key`. The tower reached on each level is recorded in `update`.
    /// Returns the first node whose key is not less than `key`.
    ///
    /// `start` must be the head or a node whose key is less than `key`.
    pub(crate) fn find_from(
        &self,
        start: Tower,
        key: &K,
        mut update: Option<&mut [Tower]>,
    ) -> Link {
        let mut curr = start;

        for level in (0..self.levels(start).len()).rev() {
            while let Some(next) = self.levels(curr)[level] {
                if !self.cmp.less_than(&self.nodes[next].key, key) {
                    break;
                }
                curr = Tower::Node(next);
            }

            if let Some(update) = update.as_deref_mut() {
                update[level] = curr;
            }
        }

        self.levels(curr)[0]
    }

    fn find(&self, key: &K) -> SearchResult {
        let mut prev = vec![Tower::Head; self.level() + 1];
        let target = self.find_from(Tower::Head, key, Some(prev.as_mut_slice()));

        SearchResult { prev, target }
    }

    /// The node holding exactly `key`, if any.
    fn find_exact(&self, key: &K) -> Link {
        self.find_from(Tower::Head, key, None)
            .filter(|&id| self.cmp.equal(&self.nodes[id].key, key))
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.find_exact(key).map(|id| &self.nodes[id].val)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let id = self.find_exact(key)?;
        Some(&mut self.nodes[id].val)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.find_exact(key).is_some()
    }

    /// The entry with the smallest key that is not less than `key`.
    pub fn get_greater_or_equal(&self, key: &K) -> Option<(&K, &V)> {
        self.find_from(Tower::Head, key, None).map(|id| self.entry(id))
    }

    /// Associates `val` with `key`. If the key is already present its value is replaced in
    /// place and the old value is returned.
    pub fn set(&mut self, key: K, mut val: V) -> Option<V> {
        let SearchResult { mut prev, target } = self.find(&key);

        if let Some(id) = target {
            if self.cmp.equal(&self.nodes[id].key, &key) {
                mem::swap(&mut self.nodes[id].val, &mut val);
                return Some(val);
            }
        }

        let ceiling = self.effective_max_level();
        let level = self.state.levels.gen_level(ceiling);

        if level > self.level() {
            log::trace!("list grew from level {} to {}", self.level(), level);
            self.head.grow_to(level);
            prev.resize(level + 1, Tower::Head);
        }

        let new_max = match self.state.footer {
            Some(footer) => self.cmp.less_than(&self.nodes[footer].key, &key),
            None => true,
        };

        let mut node = Node::new(key, val, level);
        if let Tower::Node(before) = prev[0] {
            node.backward = Some(before);
        }

        let id = self.nodes.alloc(node);
        self.link(id, &prev);
        self.state.len += 1;

        if new_max {
            self.state.footer = Some(id);
        }

        None
    }

    /// Removes `key` from the list, returning its value if it was present.
    pub fn delete(&mut self, key: &K) -> Option<V> {
        self.remove(key).map(|(_, val)| val)
    }

    /// Removes `key` from the list, returning the stored key and value if it was present.
    pub fn remove(&mut self, key: &K) -> Option<(K, V)> {
        let SearchResult { prev, target } = self.find(key);
        let id = target.filter(|&id| self.cmp.equal(&self.nodes[id].key, key))?;

        let Node { key, val, .. } = self.unlink(id, &prev);

        Some((key, val))
    }

    /// Removes and returns the entry with the largest key.
    pub fn remove_last(&mut self) -> Option<(K, V)> {
        let last = self.state.footer?;
        let SearchResult { prev, .. } = self.find(&self.nodes[last].key);

        let Node { key, val, .. } = self.unlink(last, &prev);

        Some((key, val))
    }
}

impl<K, V, C> Debug for SkipList<K, V, C>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

#[cfg(test)]
impl<K, V, C> SkipList<K, V, C>
where
    C: Comparator<K>,
{
    /// Walks every level and panics if the structure is inconsistent.
    pub(crate) fn check_invariants(&self) {
        let mut count = 0;
        let mut prev: Link = None;
        let mut curr = self.head.levels[0];

        while let Some(id) = curr {
            let node = &self.nodes[id];
            assert_eq!(node.backward, prev, "broken backward link");
            if let Some(prev) = prev {
                assert!(self.cmp.less_than(&self.nodes[prev].key, &node.key));
            }
            assert!(node.height() <= self.level() + 1);

            count += 1;
            prev = curr;
            curr = node.next();
        }

        assert_eq!(count, self.len());
        assert_eq!(count, self.nodes.live());
        assert_eq!(self.state.footer, prev);

        for level in 1..=self.level() {
            let mut curr = self.head.levels[level];
            let mut last: Link = None;

            while let Some(id) = curr {
                let node = &self.nodes[id];
                assert!(node.height() > level);
                if let Some(last) = last {
                    assert!(self.cmp.less_than(&self.nodes[last].key, &node.key));
                }
                last = curr;
                curr = node.levels[level];
            }
        }

        if self.level() > 0 {
            assert!(self.head.levels[self.level()].is_some(), "empty top level");
        }
    }
}
