//! Symbol-at-a-time descent over a borrowed tree.

use crate::keys::KeySpace;
use crate::node::Node;

/// A cursor that walks the tree one symbol at a time.
///
/// Returned by [`RadixTree::stepper`](crate::RadixTree::stepper). Feed it
/// symbols as they arrive; each [`step`](Self::step) either advances the
/// cursor or reports a dead end, and [`value`](Self::value) answers whether
/// the symbols consumed so far spell a stored key. Cloning the cursor
/// branches the descent, so divergent continuations can be probed without
/// rewinding.
///
/// # Examples
///
/// ```
/// use stemtree::ByteTree;
///
/// let mut tree = ByteTree::new();
/// tree.insert("tom", "TOM");
/// tree.insert("tomato", "TOMATO");
/// tree.insert("torn", "TORN");
///
/// let mut cursor = tree.stepper();
/// assert!(cursor.step(b't'));
/// assert!(cursor.step(b'o'));
/// assert_eq!(cursor.value(), None);
///
/// // Branch where the keys diverge.
/// let mut fork = cursor.clone();
/// assert!(cursor.step(b'm'));
/// assert_eq!(cursor.value(), Some(&"TOM"));
/// assert!(fork.step(b'r'));
/// assert!(fork.step(b'n'));
/// assert_eq!(fork.value(), Some(&"TORN"));
/// ```
pub struct Stepper<'t, K: KeySpace, V> {
    node: &'t Node<K::Symbol, V>,
    offset: usize,
}

impl<'t, K: KeySpace, V> Stepper<'t, K, V> {
    pub(crate) fn new(root: &'t Node<K::Symbol, V>) -> Self {
        Self { node: root, offset: 0 }
    }

    /// Advances the cursor by one symbol.
    ///
    /// Returns `false` when no stored key continues with `symbol`; a failed
    /// step leaves the cursor where it was.
    pub fn step(&mut self, symbol: K::Ref<'_>) -> bool {
        if self.offset < self.node.prefix.len() {
            if K::cmp_symbol(&self.node.prefix[self.offset], symbol).is_eq() {
                self.offset += 1;
                return true;
            }
            return false;
        }
        match self.node.edges.seek(|stored| K::cmp_symbol(stored, symbol)) {
            Some(child) => {
                self.node = child;
                self.offset = 0;
                true
            }
            None => false,
        }
    }

    /// The entry stored exactly at the cursor, if the symbols consumed so
    /// far spell a stored key.
    pub fn entry(&self) -> Option<(&'t str, &'t V)> {
        if self.offset < self.node.prefix.len() {
            return None;
        }
        let leaf = self.node.leaf.as_deref()?;
        Some((leaf.key(), &leaf.value))
    }

    /// The value stored exactly at the cursor.
    pub fn value(&self) -> Option<&'t V> {
        self.entry().map(|(_, value)| value)
    }
}

// Not derived: the cursor borrows the tree, so cloning needs no bounds on
// `K` or `V`.
impl<K: KeySpace, V> Clone for Stepper<'_, K, V> {
    fn clone(&self) -> Self {
        Self { node: self.node, offset: self.offset }
    }
}
