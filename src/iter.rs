//! Tree iterators: lexical enumeration and ancestor walks.

use crate::keys::KeySpace;
use crate::node::Node;

/// Iterates a subtree's entries in lexical key order.
///
/// Returned by [`RadixTree::iter`](crate::RadixTree::iter) and
/// [`RadixTree::iter_prefix`](crate::RadixTree::iter_prefix). Cloning the
/// iterator branches the enumeration: both copies continue independently
/// from the same position.
pub struct Iter<'t, S, V> {
    stack: Vec<&'t Node<S, V>>,
}

impl<'t, S, V> Iter<'t, S, V> {
    pub(crate) fn new(start: &'t Node<S, V>) -> Self {
        Self { stack: vec![start] }
    }

    pub(crate) fn empty() -> Self {
        Self { stack: Vec::new() }
    }
}

// Not derived: the stack holds shared references, so cloning needs no
// bounds on `S` or `V`.
impl<S, V> Clone for Iter<'_, S, V> {
    fn clone(&self) -> Self {
        Self { stack: self.stack.clone() }
    }
}

impl<'t, S, V> Iterator for Iter<'t, S, V> {
    type Item = (&'t str, &'t V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            // Children go on in reverse so the smallest edge pops first.
            for edge in node.edges.iter().rev() {
                self.stack.push(&edge.node);
            }
            if let Some(leaf) = node.leaf.as_deref() {
                return Some((leaf.key(), &leaf.value));
            }
        }
        None
    }
}

/// Iterates the stored entries lying on the descent path of one key,
/// shortest first.
///
/// Returned by [`RadixTree::iter_path`](crate::RadixTree::iter_path).
pub struct PathIter<'t, 'k, K: KeySpace, V> {
    node: Option<&'t Node<K::Symbol, V>>,
    syms: K::Segments<'k>,
    check_leaf: bool,
}

impl<'t, 'k, K: KeySpace, V> PathIter<'t, 'k, K, V> {
    pub(crate) fn new(root: &'t Node<K::Symbol, V>, syms: K::Segments<'k>) -> Self {
        Self { node: Some(root), syms, check_leaf: true }
    }

    /// Consumes symbols down to the next node boundary. `None` when the key
    /// runs out, diverges, or ends inside a child's prefix.
    fn descend(&mut self, node: &'t Node<K::Symbol, V>) -> Option<&'t Node<K::Symbol, V>> {
        let sym = self.syms.next()?;
        let child = node.edges.seek(|stored| K::cmp_symbol(stored, sym))?;
        for stored in &child.prefix {
            match self.syms.next() {
                Some(sym) if K::cmp_symbol(stored, sym).is_eq() => {}
                _ => return None,
            }
        }
        Some(child)
    }
}

impl<'t, K: KeySpace, V> Iterator for PathIter<'t, '_, K, V> {
    type Item = (&'t str, &'t V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let node = self.node?;
            if self.check_leaf {
                self.check_leaf = false;
                if let Some(leaf) = node.leaf.as_deref() {
                    return Some((leaf.key(), &leaf.value));
                }
            }
            self.node = self.descend(node);
            self.check_leaf = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::ByteTree;

    #[test]
    fn lexical_order() {
        let mut tree = ByteTree::new();
        for key in ["tornado", "tom", "tommy", "tomato"] {
            tree.insert(key, ());
        }
        let keys: Vec<&str> = tree.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["tom", "tomato", "tommy", "tornado"]);
    }

    #[test]
    fn clone_branches_mid_stream() {
        let mut tree = ByteTree::new();
        for key in ["ab", "abc", "abd", "b", "ba", "bc"] {
            tree.insert(key, ());
        }

        let mut iter = tree.iter();
        iter.next();
        iter.next();

        let fork = iter.clone();
        let rest: Vec<&str> = iter.map(|(k, _)| k).collect();
        let fork_rest: Vec<&str> = fork.map(|(k, _)| k).collect();
        assert_eq!(rest, ["abd", "b", "ba", "bc"]);
        assert_eq!(fork_rest, rest);
    }

    #[test]
    fn path_hits_every_stored_ancestor() {
        let mut tree = ByteTree::new();
        tree.insert("", "ROOT");
        tree.insert("tom", "TOM");
        tree.insert("tomato", "TOMATO");
        tree.insert("tomatoes", "TOMATOES");

        let path: Vec<(&str, &&str)> = tree.iter_path("tomato").collect();
        assert_eq!(path, [("", &"ROOT"), ("tom", &"TOM"), ("tomato", &"TOMATO")]);

        let path: Vec<&str> = tree.iter_path("tox").map(|(k, _)| k).collect();
        assert_eq!(path, [""]);

        assert_eq!(tree.iter_path("").count(), 1);
    }
}
