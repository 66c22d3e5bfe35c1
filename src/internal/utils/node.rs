use core::{
    fmt::Debug,
    ops::{Index, IndexMut},
};

/// Stable address of a [Node](Node) inside its [Nodes](Nodes) arena.
pub(crate) type NodeId = usize;

/// A forward link. `None` marks the end of a level.
pub(crate) type Link = Option<NodeId>;

/// A pointer tower as seen by the search path: either the list head or a real node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Tower {
    Head,
    Node(NodeId),
}

/// Head stores the first pointer tower at the beginning of the list. Its height always
/// matches the current level of the list.
pub(crate) struct Head {
    pub(crate) levels: Vec<Link>,
}

impl Head {
    pub(crate) fn new() -> Self {
        Head { levels: vec![None] }
    }

    /// Index of the highest level in use.
    pub(crate) fn level(&self) -> usize {
        self.levels.len() - 1
    }

    pub(crate) fn grow_to(&mut self, level: usize) {
        if level > self.level() {
            self.levels.resize(level + 1, None);
        }
    }

    /// Drops trailing levels that no longer lead anywhere, never going below level 0.
    pub(crate) fn shrink(&mut self) {
        while self.level() > 0 && self.levels[self.level()].is_none() {
            self.levels.pop();
        }
    }
}

pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) val: V,
    pub(crate) levels: Vec<Link>,
    pub(crate) backward: Link,
}

impl<K, V> Node<K, V> {
    pub(crate) fn new(key: K, val: V, level: usize) -> Self {
        Node {
            key,
            val,
            levels: vec![None; level + 1],
            backward: None,
        }
    }

    pub(crate) fn height(&self) -> usize {
        self.levels.len()
    }

    pub(crate) fn next(&self) -> Link {
        self.levels[0]
    }
}

impl<K, V> PartialEq for Node<K, V>
where
    K: PartialEq,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.val == other.val
    }
}

impl<K, V> Debug for Node<K, V>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("key", &self.key)
            .field("val", &self.val)
            .field("height", &self.height())
            .field("levels", &self.levels)
            .field("backward", &self.backward)
            .finish()
    }
}

/// Arena owning every node of a list. Removed slots are recycled so ids stay small
/// and a node's id never changes while it is linked.
pub(crate) struct Nodes<K, V> {
    slots: Vec<Option<Node<K, V>>>,
    free: Vec<NodeId>,
}

impl<K, V> Nodes<K, V> {
    pub(crate) fn new() -> Self {
        Nodes {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    pub(crate) fn alloc(&mut self, node: Node<K, V>) -> NodeId {
        match self.free.pop() {
            Some(id) => {
                self.slots[id] = Some(node);
                id
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        }
    }

    pub(crate) fn dealloc(&mut self, id: NodeId) -> Node<K, V> {
        match self.slots.get_mut(id).and_then(Option::take) {
            Some(node) => {
                self.free.push(id);
                node
            }
            None => panic!("node {} is not allocated", id),
        }
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }

    /// Number of live nodes.
    #[cfg(test)]
    pub(crate) fn live(&self) -> usize {
        self.slots.len() - self.free.len()
    }
}

impl<K, V> Index<NodeId> for Nodes<K, V> {
    type Output = Node<K, V>;

    fn index(&self, id: NodeId) -> &Self::Output {
        match self.slots.get(id) {
            Some(Some(node)) => node,
            _ => panic!("dangling node id {}", id),
        }
    }
}

impl<K, V> IndexMut<NodeId> for Nodes<K, V> {
    fn index_mut(&mut self, id: NodeId) -> &mut Self::Output {
        match self.slots.get_mut(id) {
            Some(Some(node)) => node,
            _ => panic!("dangling node id {}", id),
        }
    }
}

#[cfg(test)]
mod node_test {
    use super::*;

    #[test]
    fn test_new_node() {
        let node = Node::new(100, "hello", 0);
        let other = Node {
            key: 100,
            val: "hello",
            levels: vec![None],
            backward: None,
        };

        println!("node 1: {:?}, node 2: {:?}", node, other);

        assert_eq!(node, other);
        assert_eq!(node.height(), 1);
        assert_eq!(node.next(), None);
    }

    #[test]
    fn test_head_grow_and_shrink() {
        let mut head = Head::new();
        assert_eq!(head.level(), 0);

        head.grow_to(4);
        assert_eq!(head.level(), 4);

        head.levels[2] = Some(7);
        head.shrink();
        assert_eq!(head.level(), 2);

        head.levels[2] = None;
        head.levels[0] = None;
        head.shrink();
        assert_eq!(head.level(), 0);
    }

    #[test]
    fn test_slots_are_recycled() {
        let mut nodes = Nodes::new();
        let a = nodes.alloc(Node::new(1, (), 0));
        let b = nodes.alloc(Node::new(2, (), 3));

        assert_eq!(nodes.live(), 2);
        assert_eq!(nodes[b].height(), 4);

        let removed = nodes.dealloc(a);
        assert_eq!(removed.key, 1);
        assert_eq!(nodes.live(), 1);

        let c = nodes.alloc(Node::new(3, (), 1));
        assert_eq!(c, a);
        assert_eq!(nodes[c].key, 3);
    }

    #[test]
    #[should_panic]
    fn test_dealloc_twice() {
        let mut nodes = Nodes::new();
        let a = nodes.alloc(Node::new(1, (), 0));
        nodes.dealloc(a);
        nodes.dealloc(a);
    }
}
