//! An edge-compressed radix tree keyed by strings, generic over how keys
//! split into symbols: raw bytes, Unicode code points, or path segments.
//!
//! Single-child chains collapse into node prefixes, so dense key sets with
//! long shared stems stay shallow. Beyond the usual map operations the tree
//! answers prefix queries ([`RadixTree::iter_prefix`]), walks the stored
//! ancestors of a key ([`RadixTree::iter_path`]), and descends symbol by
//! symbol through a branchable cursor ([`RadixTree::stepper`]).
//!
//! ```
//! use stemtree::PathTree;
//!
//! let mut files = PathTree::new();
//! files.insert("/etc/hosts", 1);
//! files.insert("/etc/ssh/sshd_config", 2);
//! files.insert("/var/log/auth.log", 3);
//!
//! // Separator spelling is irrelevant at segment granularity.
//! assert_eq!(files.get("etc//hosts/"), Some(&1));
//!
//! let under_etc: Vec<&str> = files.iter_prefix("/etc").map(|(key, _)| key).collect();
//! assert_eq!(under_etc, ["/etc/hosts", "/etc/ssh/sshd_config"]);
//! ```
//!
//! All reads borrow the tree, so shared references iterate and step
//! concurrently; mutation takes `&mut self` and the borrow checker keeps
//! the two apart.

mod edges;
mod inspect;
mod iter;
pub mod keys;
mod node;
mod stepper;
mod tree;

pub use crate::inspect::InspectEntry;
pub use crate::iter::{Iter, PathIter};
pub use crate::keys::{Bytes, Chars, KeySpace, Paths};
pub use crate::stepper::Stepper;
pub use crate::tree::RadixTree;

/// Tree keyed by UTF-8 bytes.
pub type ByteTree<V> = RadixTree<Bytes, V>;

/// Tree keyed by Unicode code points.
pub type CharTree<V> = RadixTree<Chars, V>;

/// Tree keyed by separator-delimited path segments.
pub type PathTree<V> = RadixTree<Paths, V>;
