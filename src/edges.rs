use std::cmp::Ordering;
use std::slice;

use crate::node::Node;

/// One labeled child: `symbol` is the first symbol of the path into `node`;
/// the rest of that path sits in the node's own `prefix`.
#[derive(Clone, Debug)]
pub(crate) struct Edge<S, V> {
    pub(crate) symbol: S,
    pub(crate) node: Node<S, V>,
}

/// A node's outgoing edges, sorted ascending by symbol, one per distinct
/// next-symbol.
///
/// Binary search bounds branching lookup by `log(edges)`, and in-order
/// iteration is lexical for free.
#[derive(Clone, Debug)]
pub(crate) struct EdgeList<S, V> {
    edges: Vec<Edge<S, V>>,
}

impl<S, V> EdgeList<S, V> {
    pub(crate) fn new() -> Self {
        Self { edges: Vec::new() }
    }

    pub(crate) fn len(&self) -> usize {
        self.edges.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Binary search with a caller-supplied probe. `cmp` orders a stored
    /// symbol against the probe, `binary_search_by` style.
    pub(crate) fn search(&self, mut cmp: impl FnMut(&S) -> Ordering) -> Result<usize, usize> {
        self.edges.binary_search_by(move |edge| cmp(&edge.symbol))
    }

    pub(crate) fn seek(&self, cmp: impl FnMut(&S) -> Ordering) -> Option<&Node<S, V>> {
        let at = self.search(cmp).ok()?;
        Some(&self.edges[at].node)
    }

    pub(crate) fn seek_mut(&mut self, cmp: impl FnMut(&S) -> Ordering) -> Option<&mut Node<S, V>> {
        let at = self.search(cmp).ok()?;
        Some(&mut self.edges[at].node)
    }

    pub(crate) fn node_at(&self, at: usize) -> &Node<S, V> {
        &self.edges[at].node
    }

    pub(crate) fn node_at_mut(&mut self, at: usize) -> &mut Node<S, V> {
        &mut self.edges[at].node
    }

    /// Inserts a new edge, keeping the array sorted. The symbol must not be
    /// present yet.
    pub(crate) fn insert(&mut self, symbol: S, node: Node<S, V>)
    where
        S: Ord,
    {
        let at = self.edges.binary_search_by(|edge| edge.symbol.cmp(&symbol));
        debug_assert!(at.is_err(), "duplicate edge symbol");
        let (Ok(at) | Err(at)) = at;
        self.edges.insert(at, Edge { symbol, node });
    }

    /// Removes the edge at `at`, returning its child.
    pub(crate) fn remove_at(&mut self, at: usize) -> Node<S, V> {
        self.edges.remove(at).node
    }

    /// Takes the only remaining edge; the compress step consumes it.
    pub(crate) fn take_sole(&mut self) -> Edge<S, V> {
        debug_assert_eq!(self.edges.len(), 1, "take_sole on {} edges", self.edges.len());
        self.edges.remove(0)
    }

    pub(crate) fn clear(&mut self) {
        self.edges.clear();
    }

    pub(crate) fn iter(&self) -> slice::Iter<'_, Edge<S, V>> {
        self.edges.iter()
    }
}
