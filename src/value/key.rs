//! Object member keys.
//!
//! A key is normally a byte sequence. When the numeric-key dialect is
//! active the reader produces a synthetic integer key instead, which keeps
//! the parsed form observable; writers render it as the decimal string.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use indexmap::Equivalent;

use super::string::ByteString;

/// Key of an object member.
///
/// Identity ignores the static-borrow flag of byte keys. A numeric key and
/// the byte key spelling the same decimal are distinct keys; both
/// serialize identically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectKey {
    /// Ordinary byte-sequence key.
    Bytes(ByteString),
    /// Synthetic key produced for bare-integer members under the
    /// numeric-key dialect.
    Index(u64),
}

impl ObjectKey {
    /// Borrow a program-lifetime key without copying.
    pub const fn from_static(bytes: &'static [u8]) -> Self {
        ObjectKey::Bytes(ByteString::from_static(bytes))
    }

    /// The key bytes, when this is a byte key.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            ObjectKey::Bytes(b) => Some(b.as_bytes()),
            ObjectKey::Index(_) => None,
        }
    }

    /// Rendering used by writers and `member_names`: the key bytes as
    /// UTF-8 (lossy), or the decimal form of a numeric key.
    pub fn display_name(&self) -> String {
        match self {
            ObjectKey::Bytes(b) => b.to_string_lossy().into_owned(),
            ObjectKey::Index(i) => i.to_string(),
        }
    }
}

impl From<&str> for ObjectKey {
    fn from(s: &str) -> Self {
        ObjectKey::Bytes(ByteString::from(s))
    }
}

impl From<String> for ObjectKey {
    fn from(s: String) -> Self {
        ObjectKey::Bytes(ByteString::from(s))
    }
}

impl From<&[u8]> for ObjectKey {
    fn from(bytes: &[u8]) -> Self {
        ObjectKey::Bytes(ByteString::from(bytes))
    }
}

impl From<u64> for ObjectKey {
    fn from(index: u64) -> Self {
        ObjectKey::Index(index)
    }
}

impl PartialOrd for ObjectKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ObjectKey {
    /// Numeric keys order among themselves by value and before any byte
    /// key; byte keys order by length then lexicographic bytes.
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (ObjectKey::Index(a), ObjectKey::Index(b)) => a.cmp(b),
            (ObjectKey::Index(_), ObjectKey::Bytes(_)) => Ordering::Less,
            (ObjectKey::Bytes(_), ObjectKey::Index(_)) => Ordering::Greater,
            (ObjectKey::Bytes(a), ObjectKey::Bytes(b)) => a.cmp(b),
        }
    }
}

impl Hash for ObjectKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            ObjectKey::Bytes(b) => {
                state.write_u8(0);
                b.hash(state);
            }
            ObjectKey::Index(i) => {
                state.write_u8(1);
                i.hash(state);
            }
        }
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())
    }
}

/// Borrowed lookup form for byte keys; hashes identically to
/// [`ObjectKey::Bytes`] so map lookups need no allocation.
pub(crate) struct BytesKey<'a>(pub(crate) &'a [u8]);

impl Hash for BytesKey<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u8(0);
        self.0.hash(state);
    }
}

impl Equivalent<ObjectKey> for BytesKey<'_> {
    fn equivalent(&self, key: &ObjectKey) -> bool {
        key.as_bytes() == Some(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_key_identity_ignores_static_flag() {
        let a = ObjectKey::from_static(b"name");
        let b = ObjectKey::from("name");
        assert_eq!(a, b);
    }

    #[test]
    fn test_numeric_key_distinct_from_spelled_key() {
        assert_ne!(ObjectKey::Index(5), ObjectKey::from("5"));
    }

    #[test]
    fn test_ordering() {
        assert!(ObjectKey::Index(1) < ObjectKey::Index(2));
        assert!(ObjectKey::Index(9) < ObjectKey::from("a"));
        assert!(ObjectKey::from("z") < ObjectKey::from("aa"));
    }

    #[test]
    fn test_display_name() {
        assert_eq!(ObjectKey::from("k").display_name(), "k");
        assert_eq!(ObjectKey::Index(42).display_name(), "42");
    }
}
