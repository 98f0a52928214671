//! The tree engine: descent, mutation, and the split/compress/prune
//! operations that keep the structure canonical after every change.

use std::fmt;

use crate::iter::{Iter, PathIter};
use crate::keys::KeySpace;
use crate::node::{Leaf, Node, Prefix};
use crate::stepper::Stepper;

/// An ordered map from string keys to values, stored as an edge-compressed
/// radix tree.
///
/// The key space `K` fixes how keys decompose into symbols: single bytes
/// ([`Bytes`](crate::keys::Bytes)), Unicode code points
/// ([`Chars`](crate::keys::Chars)), or path segments
/// ([`Paths`](crate::keys::Paths)). Runs of single-child nodes collapse into
/// one node's prefix, so the tree spends nodes only where keys diverge:
/// every operation costs O(key length), and lookups never allocate.
///
/// Method names and return shapes follow the standard library's maps:
/// [`insert`](Self::insert) returns the replaced value, [`remove`](Self::remove)
/// the removed one, [`get`](Self::get) borrows. On top of the map basics the
/// tree answers prefix questions: [`iter_prefix`](Self::iter_prefix),
/// [`iter_path`](Self::iter_path), and a branchable [`stepper`](Self::stepper).
///
/// # Examples
///
/// ```
/// use stemtree::ByteTree;
///
/// let mut tree = ByteTree::new();
/// tree.insert("tom", 1);
/// tree.insert("tomato", 2);
/// tree.insert("tornado", 3);
///
/// assert_eq!(tree.get("tom"), Some(&1));
/// assert_eq!(tree.len(), 3);
///
/// let stems: Vec<&str> = tree.iter_prefix("tom").map(|(key, _)| key).collect();
/// assert_eq!(stems, ["tom", "tomato"]);
/// ```
#[derive(Clone)]
pub struct RadixTree<K: KeySpace, V> {
    pub(crate) key_space: K,
    pub(crate) root: Node<K::Symbol, V>,
    pub(crate) size: usize,
}

impl<K: KeySpace + Default, V> RadixTree<K, V> {
    /// Creates an empty tree with the key space's default configuration.
    pub fn new() -> Self {
        Self::with_key_space(K::default())
    }
}

impl<K: KeySpace + Default, V> Default for RadixTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: KeySpace, V> RadixTree<K, V> {
    /// Creates an empty tree around a configured key space.
    ///
    /// # Examples
    ///
    /// ```
    /// use stemtree::{Paths, RadixTree};
    ///
    /// let mut tree = RadixTree::with_key_space(Paths::with_separator(':'));
    /// tree.insert("usr:local:bin", ());
    /// assert_eq!(tree.get(":usr:local:bin:"), Some(&()));
    /// ```
    pub fn with_key_space(key_space: K) -> Self {
        Self { key_space, root: Node::new_inner(Prefix::new()), size: 0 }
    }

    /// The key space this tree segments keys with.
    pub fn key_space(&self) -> &K {
        &self.key_space
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.size
    }

    /// True if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the value stored for exactly `key`.
    ///
    /// The descent is O(key length) and allocates nothing.
    pub fn get(&self, key: &str) -> Option<&V> {
        let mut node = &self.root;
        let mut offset = 0;
        for sym in self.key_space.segments(key) {
            if offset < node.prefix.len() {
                if K::cmp_symbol(&node.prefix[offset], sym).is_eq() {
                    offset += 1;
                    continue;
                }
                return None;
            }
            node = node.edges.seek(|stored| K::cmp_symbol(stored, sym))?;
            offset = 0;
        }
        if offset < node.prefix.len() {
            return None;
        }
        node.value()
    }

    /// Mutable counterpart of [`get`](Self::get).
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let mut node = &mut self.root;
        let mut offset = 0;
        for sym in self.key_space.segments(key) {
            if offset < node.prefix.len() {
                if K::cmp_symbol(&node.prefix[offset], sym).is_eq() {
                    offset += 1;
                    continue;
                }
                return None;
            }
            node = node.edges.seek_mut(|stored| K::cmp_symbol(stored, sym))?;
            offset = 0;
        }
        if offset < node.prefix.len() {
            return None;
        }
        node.value_mut()
    }

    /// Inserts `value` under `key`, returning the value it replaces.
    ///
    /// `None` means the key was new. Mutation allocates only for structural
    /// change: a split branch node, the new leaf, and the stored key.
    ///
    /// # Examples
    ///
    /// ```
    /// use stemtree::ByteTree;
    ///
    /// let mut tree = ByteTree::new();
    /// assert_eq!(tree.insert("tom", 1), None);
    /// assert_eq!(tree.insert("tom", 2), Some(1));
    /// assert_eq!(tree.get("tom"), Some(&2));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, key: &str, value: V) -> Option<V> {
        let mut syms = self.key_space.segments(key);
        let replaced = Self::insert_descend(&mut self.root, &mut syms, key, value);
        if replaced.is_none() {
            self.size += 1;
        }
        replaced
    }

    fn insert_descend<'k>(
        node: &mut Node<K::Symbol, V>,
        syms: &mut K::Segments<'k>,
        key: &'k str,
        value: V,
    ) -> Option<V> {
        let mut offset = 0;
        loop {
            let Some(sym) = syms.next() else {
                // Key exhausted. Landing inside the prefix splits the node
                // so the leaf sits exactly at the key's end.
                if offset < node.prefix.len() {
                    node.split_at(offset);
                }
                return node.set_leaf(key, value);
            };
            if offset < node.prefix.len() {
                if K::cmp_symbol(&node.prefix[offset], sym).is_eq() {
                    offset += 1;
                    continue;
                }
                // Diverged inside the prefix: branch here. The split child
                // and the new leaf get distinct edge symbols.
                node.split_at(offset);
                let rest = Self::own_rest(syms);
                node.edges.insert(K::to_symbol(sym), Node::new_leaf(rest, key, value));
                return None;
            }
            match node.edges.search(|stored| K::cmp_symbol(stored, sym)) {
                Ok(at) => return Self::insert_descend(node.edges.node_at_mut(at), syms, key, value),
                Err(_) => {
                    let rest = Self::own_rest(syms);
                    node.edges.insert(K::to_symbol(sym), Node::new_leaf(rest, key, value));
                    return None;
                }
            }
        }
    }

    /// Owns the unconsumed remainder of a key as a new node's prefix.
    fn own_rest(syms: &mut K::Segments<'_>) -> Prefix<K::Symbol> {
        syms.map(|sym| K::to_symbol(sym)).collect()
    }

    /// Removes `key`, returning its value.
    ///
    /// Nodes emptied by the removal are pruned from their parents, and a
    /// parent left with a single child and no value is merged with that
    /// child, so the tree stays canonical.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let mut syms = self.key_space.segments(key);
        let leaf = Self::remove_descend(&mut self.root, &mut syms)?;
        self.size -= 1;
        Some(leaf.value)
    }

    fn remove_descend<'k>(
        node: &mut Node<K::Symbol, V>,
        syms: &mut K::Segments<'k>,
    ) -> Option<Box<Leaf<V>>> {
        let mut offset = 0;
        loop {
            let Some(sym) = syms.next() else {
                if offset < node.prefix.len() {
                    return None;
                }
                return node.leaf.take();
            };
            if offset < node.prefix.len() {
                if K::cmp_symbol(&node.prefix[offset], sym).is_eq() {
                    offset += 1;
                    continue;
                }
                return None;
            }
            let at = node.edges.search(|stored| K::cmp_symbol(stored, sym)).ok()?;
            let leaf = Self::remove_descend(node.edges.node_at_mut(at), syms)?;
            Self::restore(node, at);
            return Some(leaf);
        }
    }

    /// Removes every entry whose key starts with `prefix`, returning how
    /// many were removed. The prefix may end partway into a node's own
    /// prefix; the node's whole subtree is covered either way. An empty
    /// prefix clears the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use stemtree::ByteTree;
    ///
    /// let mut tree = ByteTree::new();
    /// for key in ["tom", "tomato", "tornado"] {
    ///     tree.insert(key, ());
    /// }
    /// assert_eq!(tree.remove_prefix("tom"), 2);
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn remove_prefix(&mut self, prefix: &str) -> usize {
        let mut syms = self.key_space.segments(prefix);
        let removed = Self::remove_prefix_descend(&mut self.root, &mut syms);
        self.size -= removed;
        removed
    }

    fn remove_prefix_descend<'k>(
        node: &mut Node<K::Symbol, V>,
        syms: &mut K::Segments<'k>,
    ) -> usize {
        let mut offset = 0;
        loop {
            let Some(sym) = syms.next() else {
                // Prefix consumed, possibly inside this node's own prefix:
                // either way the whole subtree goes.
                let removed = node.count_leaves();
                node.leaf = None;
                node.edges.clear();
                return removed;
            };
            if offset < node.prefix.len() {
                if K::cmp_symbol(&node.prefix[offset], sym).is_eq() {
                    offset += 1;
                    continue;
                }
                return 0;
            }
            let Ok(at) = node.edges.search(|stored| K::cmp_symbol(stored, sym)) else {
                return 0;
            };
            let removed = Self::remove_prefix_descend(node.edges.node_at_mut(at), syms);
            if removed > 0 {
                Self::restore(node, at);
            }
            return removed;
        }
    }

    /// Re-establishes the structural invariants for the child at `at` after
    /// a removal somewhere below it: a child with neither leaf nor edges is
    /// pruned, one with no leaf and a single edge is compressed. At most one
    /// of the two ever applies per removal.
    fn restore(node: &mut Node<K::Symbol, V>, at: usize) {
        let child = node.edges.node_at(at);
        if child.leaf.is_some() {
            return;
        }
        if child.edges.is_empty() {
            node.edges.remove_at(at);
        } else if child.edges.len() == 1 {
            node.edges.node_at_mut(at).compress();
        }
    }

    /// Iterates every entry in lexical key order.
    ///
    /// The iterator borrows the tree. Clone it to branch the enumeration:
    /// clones advance independently over the shared nodes.
    pub fn iter(&self) -> Iter<'_, K::Symbol, V> {
        Iter::new(&self.root)
    }

    /// Iterates the entries whose keys start with `prefix`, in lexical
    /// order. A prefix matching nothing yields an empty iterator.
    pub fn iter_prefix(&self, prefix: &str) -> Iter<'_, K::Symbol, V> {
        let mut node = &self.root;
        let mut offset = 0;
        for sym in self.key_space.segments(prefix) {
            if offset < node.prefix.len() {
                if K::cmp_symbol(&node.prefix[offset], sym).is_eq() {
                    offset += 1;
                    continue;
                }
                return Iter::empty();
            }
            match node.edges.seek(|stored| K::cmp_symbol(stored, sym)) {
                Some(child) => {
                    node = child;
                    offset = 0;
                }
                None => return Iter::empty(),
            }
        }
        Iter::new(node)
    }

    /// Iterates the stored entries whose keys are prefixes of `key`,
    /// shortest first, including the root entry (key `""`) when present.
    ///
    /// # Examples
    ///
    /// ```
    /// use stemtree::ByteTree;
    ///
    /// let mut tree = ByteTree::new();
    /// tree.insert("tom", "TOM");
    /// tree.insert("tomato", "TOMATO");
    ///
    /// let path: Vec<&str> = tree.iter_path("tomatoes").map(|(key, _)| key).collect();
    /// assert_eq!(path, ["tom", "tomato"]);
    /// ```
    pub fn iter_path<'k>(&self, key: &'k str) -> PathIter<'_, 'k, K, V> {
        PathIter::new(&self.root, self.key_space.segments(key))
    }

    /// A cursor at the root, to be advanced one symbol at a time.
    pub fn stepper(&self) -> Stepper<'_, K, V> {
        Stepper::new(&self.root)
    }
}

impl<K: KeySpace, V: fmt::Debug> fmt::Debug for RadixTree<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
