use super::SkipList;
use crate::comparator::{Comparator, Natural};
use crate::internal::utils::{Link, Nodes};
use core::iter::{DoubleEndedIterator, ExactSizeIterator, FromIterator, IntoIterator, Iterator};

/// A borrowing iterator over the entries of a [SkipList](SkipList) in key order.
pub struct Iter<'a, K, V> {
    nodes: &'a Nodes<K, V>,
    front: Link,
    back: Link,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn from_list<C>(list: &'a SkipList<K, V, C>) -> Self {
        Iter {
            nodes: &list.nodes,
            front: list.head.levels[0],
            back: list.state.footer,
            remaining: list.len(),
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let nodes = self.nodes;
        let node = &nodes[self.front?];

        self.front = node.next();
        self.remaining -= 1;

        Some((&node.key, &node.val))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V> DoubleEndedIterator for Iter<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let nodes = self.nodes;
        let node = &nodes[self.back?];

        self.back = node.backward;
        self.remaining -= 1;

        Some((&node.key, &node.val))
    }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {}

impl<'a, K, V, C> IntoIterator for &'a SkipList<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        Iter::from_list(self)
    }
}

/// An owning iterator that drains a [SkipList](SkipList) in key order.
pub struct IntoIter<K, V, C = Natural> {
    list: SkipList<K, V, C>,
}

impl<K, V, C> IntoIter<K, V, C> {
    pub(crate) fn from_list(list: SkipList<K, V, C>) -> Self {
        IntoIter { list }
    }
}

impl<K, V, C> Iterator for IntoIter<K, V, C> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.list.remove_first()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len(), Some(self.list.len()))
    }
}

impl<K, V, C> DoubleEndedIterator for IntoIter<K, V, C>
where
    C: Comparator<K>,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        self.list.remove_last()
    }
}

impl<K, V, C> ExactSizeIterator for IntoIter<K, V, C> {}

impl<K, V, C> IntoIterator for SkipList<K, V, C> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V, C>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::from_list(self)
    }
}

impl<K, V> FromIterator<(K, V)> for SkipList<K, V, Natural>
where
    K: Ord,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<K, V, C> Extend<(K, V)> for SkipList<K, V, C>
where
    C: Comparator<K>,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.set(k, v);
        }
    }
}

impl<K, V, C> SkipList<K, V, C> {
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::from_list(self)
    }
}

#[cfg(test)]
mod iter_test {
    use super::*;

    #[test]
    fn test_iter_in_order() {
        let mut list = SkipList::new();
        for key in [4, 3, 5, 1, 9, 2, 7] {
            list.set(key, key * 10);
        }

        let keys: Vec<_> = list.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec![1, 2, 3, 4, 5, 7, 9]);

        let vals: Vec<_> = list.iter().rev().map(|(_, v)| *v).collect();
        assert_eq!(vals, vec![90, 70, 50, 40, 30, 20, 10]);

        assert_eq!(list.iter().len(), 7);
    }

    #[test]
    fn test_iter_from_both_ends() {
        let list: SkipList<_, _> = (0..6).map(|i| (i, ())).collect();
        let mut iter = list.iter();

        assert_eq!(iter.next().map(|(k, _)| *k), Some(0));
        assert_eq!(iter.next_back().map(|(k, _)| *k), Some(5));
        assert_eq!(iter.next().map(|(k, _)| *k), Some(1));
        assert_eq!(iter.next_back().map(|(k, _)| *k), Some(4));
        assert_eq!(iter.len(), 2);
        assert_eq!(iter.next().map(|(k, _)| *k), Some(2));
        assert_eq!(iter.next_back().map(|(k, _)| *k), Some(3));
        assert!(iter.next().is_none());
        assert!(iter.next_back().is_none());
    }

    #[test]
    fn test_traverse() {
        let mut list = SkipList::new();
        for _ in 0..100 {
            list.set(rand::random::<u8>(), ());
        }

        let mut prev = None;
        for (k, _) in &list {
            if let Some(prev) = prev {
                assert!(*k > prev);
            }
            prev = Some(*k);
        }
    }

    #[test]
    fn test_into_iter() {
        let list: SkipList<_, _> = [(3, "c"), (1, "a"), (2, "b")].into_iter().collect();

        let drained: Vec<_> = list.into_iter().collect();
        assert_eq!(drained, vec![(1, "a"), (2, "b"), (3, "c")]);
    }

    #[test]
    fn test_into_iter_rev() {
        let list: SkipList<_, _> = (0..50).map(|i| (i, i)).collect();
        let mut iter = list.into_iter();

        assert_eq!(iter.len(), 50);
        assert_eq!(iter.next_back(), Some((49, 49)));
        assert_eq!(iter.next(), Some((0, 0)));

        let rest: Vec<_> = iter.rev().map(|(k, _)| k).collect();
        assert_eq!(rest, (1..49).rev().collect::<Vec<_>>());
    }

    #[test]
    fn test_extend_overwrites() {
        let mut list = SkipList::new();
        list.extend((0..10).map(|i| (i, 0)));
        list.extend((5..15).map(|i| (i, 1)));

        assert_eq!(list.len(), 15);
        assert_eq!(list.get(&4), Some(&0));
        assert_eq!(list.get(&5), Some(&1));
        list.check_invariants();
    }
}
