use smallvec::SmallVec;

use crate::edges::{Edge, EdgeList};

/// A node's compressed prefix. Four symbols inline covers the short runs
/// splits produce; longer runs spill to the heap.
pub(crate) type Prefix<S> = SmallVec<[S; 4]>;

/// A stored entry: the key exactly as the caller spelled it, and its value.
#[derive(Clone, Debug)]
pub(crate) struct Leaf<V> {
    pub(crate) key: Box<str>,
    pub(crate) value: V,
}

impl<V> Leaf<V> {
    #[inline]
    pub(crate) fn key(&self) -> &str {
        &self.key
    }
}

/// One tree node: a compressed run of symbols, sorted outgoing edges, and an
/// optional leaf for the key ending exactly here.
#[derive(Clone, Debug)]
pub(crate) struct Node<S, V> {
    pub(crate) prefix: Prefix<S>,
    pub(crate) edges: EdgeList<S, V>,
    pub(crate) leaf: Option<Box<Leaf<V>>>,
}

impl<S, V> Node<S, V> {
    #[inline]
    pub(crate) fn new_inner(prefix: Prefix<S>) -> Self {
        Self { prefix, edges: EdgeList::new(), leaf: None }
    }

    #[inline]
    pub(crate) fn new_leaf(prefix: Prefix<S>, key: &str, value: V) -> Self {
        Self {
            prefix,
            edges: EdgeList::new(),
            leaf: Some(Box::new(Leaf { key: key.into(), value })),
        }
    }

    #[inline]
    pub(crate) fn value(&self) -> Option<&V> {
        self.leaf.as_deref().map(|leaf| &leaf.value)
    }

    #[inline]
    pub(crate) fn value_mut(&mut self) -> Option<&mut V> {
        self.leaf.as_deref_mut().map(|leaf| &mut leaf.value)
    }

    /// Stores `value` under `key` at this node, returning the value it
    /// replaces. An existing leaf keeps its original key spelling.
    pub(crate) fn set_leaf(&mut self, key: &str, value: V) -> Option<V> {
        match &mut self.leaf {
            Some(leaf) => Some(std::mem::replace(&mut leaf.value, value)),
            None => {
                self.leaf = Some(Box::new(Leaf { key: key.into(), value }));
                None
            }
        }
    }

    /// Splits this node at `at`, the first unmatched prefix position: the
    /// prefix tail, the edges, and the leaf all move into a new child, and
    /// this node keeps `prefix[..at]` with a single edge to that child.
    pub(crate) fn split_at(&mut self, at: usize)
    where
        S: Ord,
    {
        debug_assert!(at < self.prefix.len());
        let mut tail: Prefix<S> = self.prefix.drain(at..).collect();
        let symbol = tail.remove(0);
        let child = Node {
            prefix: tail,
            edges: std::mem::replace(&mut self.edges, EdgeList::new()),
            leaf: self.leaf.take(),
        };
        self.edges.insert(symbol, child);
    }

    /// Merges this node with its only child: the edge symbol and the child's
    /// prefix append onto this prefix, and the child's edges and leaf are
    /// adopted. Caller checks the single-edge, no-leaf precondition.
    pub(crate) fn compress(&mut self) {
        debug_assert!(self.leaf.is_none() && self.edges.len() == 1);
        let Edge { symbol, node } = self.edges.take_sole();
        self.prefix.push(symbol);
        self.prefix.extend(node.prefix);
        self.edges = node.edges;
        self.leaf = node.leaf;
    }

    /// Number of leaves in this subtree, counted by walking it.
    pub(crate) fn count_leaves(&self) -> usize {
        let mut count = usize::from(self.leaf.is_some());
        for edge in self.edges.iter() {
            count += edge.node.count_leaves();
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use smallvec::smallvec;

    use super::*;

    #[test]
    fn split_moves_tail_edges_and_leaf() {
        let mut node: Node<u8, &str> = Node::new_leaf(smallvec![b'o', b'r', b'n'], "torn", "TORN");
        node.split_at(1);

        assert_eq!(node.prefix.as_slice(), b"o");
        assert!(node.leaf.is_none());
        assert_eq!(node.edges.len(), 1);

        let edge = node.edges.iter().next().unwrap();
        assert_eq!(edge.symbol, b'r');
        assert_eq!(edge.node.prefix.as_slice(), b"n");
        assert_eq!(edge.node.value(), Some(&"TORN"));
    }

    #[test]
    fn split_at_start_leaves_empty_prefix() {
        let mut node: Node<u8, i32> = Node::new_leaf(smallvec![b'a', b'b'], "ab", 1);
        node.split_at(0);

        assert!(node.prefix.is_empty());
        let edge = node.edges.iter().next().unwrap();
        assert_eq!(edge.symbol, b'a');
        assert_eq!(edge.node.prefix.as_slice(), b"b");
    }

    #[test]
    fn compress_rejoins_single_chains() {
        let mut node: Node<u8, &str> = Node::new_inner(smallvec![b'o']);
        node.edges.insert(b'r', Node::new_leaf(smallvec![b'n'], "torn", "TORN"));
        node.compress();

        assert_eq!(node.prefix.as_slice(), b"orn");
        assert_eq!(node.value(), Some(&"TORN"));
        assert!(node.edges.is_empty());
    }

    #[test]
    fn count_leaves_spans_subtree() {
        let mut node: Node<u8, i32> = Node::new_leaf(smallvec![], "t", 0);
        node.edges.insert(b'a', Node::new_leaf(smallvec![], "ta", 1));
        node.edges.insert(b'o', Node::new_inner(smallvec![]));
        assert_eq!(node.count_leaves(), 2);
    }
}
