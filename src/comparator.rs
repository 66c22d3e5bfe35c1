//! Orderings a [SkipList](crate::SkipList) can be built over.
//!
//! A [Comparator](Comparator) is a strict "less than" predicate. It must be irreflexive and
//! transitive over every key stored in the list; two keys are treated as equal when neither
//! is less than the other.

/// A total order over keys of type `K`, expressed as a strict "less than".
pub trait Comparator<K: ?Sized> {
    fn less_than(&self, left: &K, right: &K) -> bool;

    /// Whether `left` and `right` occupy the same position in the order.
    fn equal(&self, left: &K, right: &K) -> bool {
        !self.less_than(left, right) && !self.less_than(right, left)
    }
}

impl<K: ?Sized, F> Comparator<K> for F
where
    F: Fn(&K, &K) -> bool,
{
    fn less_than(&self, left: &K, right: &K) -> bool {
        self(left, right)
    }
}

/// Orders keys by their [Ord](Ord) implementation. This covers integer and string maps.
///
/// Equality uses [PartialEq](PartialEq) while the search path uses `<`, so `Natural`
/// assumes the type's `Ord` and `Eq` agree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Natural;

impl<K: Ord + ?Sized> Comparator<K> for Natural {
    fn less_than(&self, left: &K, right: &K) -> bool {
        left < right
    }

    fn equal(&self, left: &K, right: &K) -> bool {
        left == right
    }
}

/// Keys that know how to order themselves without a full [Ord](Ord) implementation.
pub trait LessThan {
    fn less_than(&self, other: &Self) -> bool;
}

/// Orders keys through their [LessThan](LessThan) implementation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ByLessThan;

impl<K: LessThan + ?Sized> Comparator<K> for ByLessThan {
    fn less_than(&self, left: &K, right: &K) -> bool {
        left.less_than(right)
    }
}

#[cfg(test)]
mod comparator_test {
    use super::*;

    struct Version(u32, u32);

    impl LessThan for Version {
        fn less_than(&self, other: &Self) -> bool {
            (self.0, self.1) < (other.0, other.1)
        }
    }

    #[test]
    fn test_natural() {
        assert!(Natural.less_than(&1, &2));
        assert!(!Natural.less_than(&2, &2));
        assert!(Natural.equal(&2, &2));
        assert!(Natural.less_than("abc", "abd"));
    }

    #[test]
    fn test_natural_equal_follows_eq() {
        // both orderings agree for well-behaved keys
        for (l, r) in [(1, 1), (1, 2), (3, 2)] {
            let by_order = !Natural.less_than(&l, &r) && !Natural.less_than(&r, &l);
            assert_eq!(Natural.equal(&l, &r), by_order);
        }

        assert!(Natural.equal("abc", "abc"));
        assert!(!Natural.equal("abc", "abd"));
    }

    #[test]
    fn test_closure() {
        let reverse = |l: &i32, r: &i32| l > r;
        assert!(reverse.less_than(&3, &1));
        assert!(reverse.equal(&3, &3));
        assert!(!reverse.equal(&3, &1));
    }

    #[test]
    fn test_by_less_than() {
        assert!(ByLessThan.less_than(&Version(1, 2), &Version(1, 3)));
        assert!(!ByLessThan.less_than(&Version(2, 0), &Version(1, 9)));
        assert!(ByLessThan.equal(&Version(4, 4), &Version(4, 4)));
    }
}
