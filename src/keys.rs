//! Key segmentation.
//!
//! A [`KeySpace`] fixes the granularity at which one tree reads its keys:
//! single UTF-8 bytes ([`Bytes`]), Unicode code points ([`Chars`]), or
//! separator-delimited path segments ([`Paths`]). The engine is the same for
//! all three; only the symbol type and the way a key string splits into
//! symbols differ.

use std::cmp::Ordering;
use std::fmt::Debug;
use std::fmt::Write as _;

/// Decomposition of string keys into the symbol sequence a tree is keyed by.
///
/// Stored symbols ([`Symbol`](Self::Symbol)) live in node prefixes and edge
/// labels; lookups instead work with [`Ref`](Self::Ref), a cheap borrowed
/// form produced by [`segments`](Self::segments), so descending the tree
/// never allocates.
pub trait KeySpace {
    /// Owned symbol, stored in node prefixes and edge labels.
    type Symbol: Clone + Ord + Debug;
    /// Borrowed symbol, produced while segmenting a key. May borrow from the
    /// key (path segments do); always cheap to copy.
    type Ref<'k>: Copy;
    /// Iterator over the symbols of one key.
    type Segments<'k>: Iterator<Item = Self::Ref<'k>>;

    /// Splits `key` into symbols. Borrows `key` and never allocates.
    fn segments<'k>(&self, key: &'k str) -> Self::Segments<'k>;

    /// Orders a stored symbol against a borrowed one.
    fn cmp_symbol(stored: &Self::Symbol, sym: Self::Ref<'_>) -> Ordering;

    /// Owned form of a borrowed symbol. Only the mutation path calls this.
    fn to_symbol(sym: Self::Ref<'_>) -> Self::Symbol;

    /// Appends `symbol`, plus any separator the key space uses, to a key
    /// being rebuilt for display.
    fn push_symbol(&self, key: &mut String, symbol: &Self::Symbol);
}

/// Keys at UTF-8 byte granularity.
///
/// The densest segmentation: every byte of the key is one symbol, and edge
/// order is raw byte order, which for UTF-8 text coincides with code point
/// order, so iteration stays lexical.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Bytes;

impl KeySpace for Bytes {
    type Symbol = u8;
    type Ref<'k> = u8;
    type Segments<'k> = std::str::Bytes<'k>;

    fn segments<'k>(&self, key: &'k str) -> Self::Segments<'k> {
        key.bytes()
    }

    fn cmp_symbol(stored: &u8, sym: u8) -> Ordering {
        stored.cmp(&sym)
    }

    fn to_symbol(sym: u8) -> u8 {
        sym
    }

    fn push_symbol(&self, key: &mut String, symbol: &u8) {
        // A split multi-byte sequence is not `str`-representable, so
        // anything non-ASCII renders as an escape.
        let b = *symbol;
        if b.is_ascii() && !b.is_ascii_control() {
            key.push(b as char);
        } else {
            let _ = write!(key, "\\x{b:02x}");
        }
    }
}

/// Keys at Unicode code point granularity.
///
/// One symbol per `char`, so multi-byte characters never split across nodes
/// and every node boundary is a valid string position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Chars;

impl KeySpace for Chars {
    type Symbol = char;
    type Ref<'k> = char;
    type Segments<'k> = std::str::Chars<'k>;

    fn segments<'k>(&self, key: &'k str) -> Self::Segments<'k> {
        key.chars()
    }

    fn cmp_symbol(stored: &char, sym: char) -> Ordering {
        stored.cmp(&sym)
    }

    fn to_symbol(sym: char) -> char {
        sym
    }

    fn push_symbol(&self, key: &mut String, symbol: &char) {
        key.push(*symbol);
    }
}

/// Keys at path-segment granularity.
///
/// `"/a//b/"` segments as `["a", "b"]`: separator runs collapse and leading
/// or trailing separators carry no meaning, so `"a/b"`, `"/a/b"` and
/// `"a/b/"` name the same key. The tree stores the spelling a key was first
/// inserted with and returns it on enumeration. Lookup borrows segments out
/// of the query string; nothing is allocated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Paths {
    separator: char,
}

impl Paths {
    /// A key space splitting on `separator` instead of `'/'`.
    pub fn with_separator(separator: char) -> Self {
        Self { separator }
    }

    /// The separator this key space splits on.
    pub fn separator(&self) -> char {
        self.separator
    }
}

impl Default for Paths {
    fn default() -> Self {
        Self { separator: '/' }
    }
}

impl KeySpace for Paths {
    type Symbol = Box<str>;
    type Ref<'k> = &'k str;
    type Segments<'k> = PathSegments<'k>;

    fn segments<'k>(&self, key: &'k str) -> Self::Segments<'k> {
        PathSegments { rest: key, separator: self.separator }
    }

    fn cmp_symbol(stored: &Box<str>, sym: &str) -> Ordering {
        stored.as_ref().cmp(sym)
    }

    fn to_symbol(sym: &str) -> Box<str> {
        Box::from(sym)
    }

    fn push_symbol(&self, key: &mut String, symbol: &Box<str>) {
        if !key.is_empty() {
            key.push(self.separator);
        }
        key.push_str(symbol);
    }
}

/// Iterator over the non-empty segments of a path key.
#[derive(Clone, Debug)]
pub struct PathSegments<'k> {
    rest: &'k str,
    separator: char,
}

impl<'k> Iterator for PathSegments<'k> {
    type Item = &'k str;

    fn next(&mut self) -> Option<&'k str> {
        loop {
            if self.rest.is_empty() {
                return None;
            }
            match self.rest.find(self.separator) {
                Some(0) => self.rest = &self.rest[self.separator.len_utf8()..],
                Some(at) => {
                    let segment = &self.rest[..at];
                    self.rest = &self.rest[at + self.separator.len_utf8()..];
                    return Some(segment);
                }
                None => {
                    let segment = self.rest;
                    self.rest = "";
                    return Some(segment);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(path: &str) -> Vec<&str> {
        Paths::default().segments(path).collect()
    }

    #[test]
    fn path_segments_basic() {
        assert_eq!(split("/a/b/c"), ["a", "b", "c"]);
        assert_eq!(split("a/b/c"), ["a", "b", "c"]);
        assert_eq!(split("lone"), ["lone"]);
    }

    #[test]
    fn path_segments_collapse_separators() {
        assert_eq!(split("/home//jwaits/"), ["home", "jwaits"]);
        assert_eq!(split("///"), Vec::<&str>::new());
        assert_eq!(split(""), Vec::<&str>::new());
    }

    #[test]
    fn path_segments_custom_separator() {
        let space = Paths::with_separator(':');
        let parts: Vec<&str> = space.segments("usr:local:bin").collect();
        assert_eq!(parts, ["usr", "local", "bin"]);
        assert_eq!(space.separator(), ':');
    }

    #[test]
    fn byte_rendering_escapes_non_ascii() {
        let mut key = String::new();
        for b in "tré".bytes() {
            Bytes.push_symbol(&mut key, &b);
        }
        assert_eq!(key, "tr\\xc3\\xa9");
    }

    #[test]
    fn path_rendering_rejoins_segments() {
        let space = Paths::default();
        let mut key = String::new();
        for segment in ["usr", "local"] {
            space.push_symbol(&mut key, &Box::from(segment));
        }
        assert_eq!(key, "usr/local");
    }
}
