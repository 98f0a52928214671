//! Structural introspection: a pre-order visitor over the tree's nodes.
//!
//! Regular iteration hides the node structure on purpose. For debugging,
//! visualization, and tests that pin down the exact shape the tree has
//! settled into, [`RadixTree::inspect`] walks the real nodes and reports
//! per-node facts through [`InspectEntry`].

use crate::keys::KeySpace;
use crate::node::Node;
use crate::tree::RadixTree;

/// Per-node facts reported by [`RadixTree::inspect`], one per visited node.
#[derive(Debug)]
pub struct InspectEntry<'a, S, V> {
    /// Symbol on the edge from the parent. `None` at the root.
    pub edge: Option<&'a S>,
    /// The node's compressed prefix, excluding the edge symbol.
    pub prefix: &'a [S],
    /// Full key spelled by the symbols from the root to this node.
    pub key: &'a str,
    /// Distance from the root in nodes.
    pub depth: usize,
    /// Number of outgoing edges.
    pub children: usize,
    /// The value stored at this node, if any.
    pub value: Option<&'a V>,
}

impl<K: KeySpace, V> RadixTree<K, V> {
    /// Visits every node in pre-order, children in symbol order.
    ///
    /// `visit` returning `true` stops the walk. The `key` handed to the
    /// visitor is rebuilt from the stored symbols, so for segmented key
    /// spaces it is the canonical spelling, not necessarily the one a key
    /// was inserted with.
    ///
    /// # Examples
    ///
    /// Dump the structure, one line per node:
    ///
    /// ```
    /// use stemtree::ByteTree;
    ///
    /// let mut tree = ByteTree::new();
    /// for key in ["tom", "tomato", "tornado"] {
    ///     tree.insert(key, ());
    /// }
    ///
    /// let mut lines = Vec::new();
    /// tree.inspect(|node| {
    ///     let pad = node.depth * 2;
    ///     lines.push(format!("{:pad$}{:?} -> {}", "", node.key, node.children));
    ///     false
    /// });
    /// assert_eq!(
    ///     lines,
    ///     [
    ///         "\"\" -> 1",
    ///         "  \"to\" -> 2",
    ///         "    \"tom\" -> 1",
    ///         "      \"tomato\" -> 0",
    ///         "    \"tornado\" -> 0",
    ///     ]
    /// );
    /// ```
    pub fn inspect<F>(&self, mut visit: F)
    where
        F: FnMut(InspectEntry<'_, K::Symbol, V>) -> bool,
    {
        let mut key = String::new();
        self.inspect_node(&self.root, None, &mut key, 0, &mut visit);
    }

    fn inspect_node<F>(
        &self,
        node: &Node<K::Symbol, V>,
        edge: Option<&K::Symbol>,
        key: &mut String,
        depth: usize,
        visit: &mut F,
    ) -> bool
    where
        F: FnMut(InspectEntry<'_, K::Symbol, V>) -> bool,
    {
        let rewind = key.len();
        if let Some(symbol) = edge {
            self.key_space.push_symbol(key, symbol);
        }
        for symbol in &node.prefix {
            self.key_space.push_symbol(key, symbol);
        }

        let mut stop = visit(InspectEntry {
            edge,
            prefix: node.prefix.as_slice(),
            key: key.as_str(),
            depth,
            children: node.edges.len(),
            value: node.value(),
        });
        if !stop {
            for e in node.edges.iter() {
                if self.inspect_node(&e.node, Some(&e.symbol), key, depth + 1, visit) {
                    stop = true;
                    break;
                }
            }
        }

        key.truncate(rewind);
        stop
    }
}

#[cfg(test)]
mod tests {
    use crate::{ByteTree, PathTree};

    #[test]
    fn entries_expose_edges_and_prefixes() {
        let mut tree = ByteTree::new();
        tree.insert("tom", 1);
        tree.insert("tomato", 2);

        let mut entries = Vec::new();
        tree.inspect(|node| {
            entries.push((
                node.edge.copied(),
                node.prefix.to_vec(),
                node.key.to_owned(),
                node.value.copied(),
            ));
            false
        });
        assert_eq!(
            entries,
            [
                (None, vec![], "".to_owned(), None),
                (Some(b't'), b"om".to_vec(), "tom".to_owned(), Some(1)),
                (Some(b'a'), b"to".to_vec(), "tomato".to_owned(), Some(2)),
            ]
        );
    }

    #[test]
    fn stop_short_circuits_the_walk() {
        let mut tree = ByteTree::new();
        for key in ["tom", "tomato", "tornado"] {
            tree.insert(key, ());
        }

        let mut visited = Vec::new();
        tree.inspect(|node| {
            visited.push(node.key.to_owned());
            node.key == "tom"
        });
        assert_eq!(visited, ["", "to", "tom"]);
    }

    #[test]
    fn segment_keys_rejoin_with_the_separator() {
        let mut tree = PathTree::new();
        tree.insert("usr/local", ());
        tree.insert("/usr/share/", ());

        let mut keys = Vec::new();
        tree.inspect(|node| {
            keys.push(node.key.to_owned());
            false
        });
        assert_eq!(keys, ["", "usr", "usr/local", "usr/share"]);
    }
}
