//! An ordered BSON document: a string-keyed mapping that preserves insertion
//! order through decode, encode, and mutation.

use std::iter::{Extend, FromIterator};

use indexmap::IndexMap;

use crate::{bson::Bson, oid::ObjectId};

/// An ordered mapping from `String` keys to [`Bson`] values.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    inner: IndexMap<String, Bson>,
}

/// Declares a typed accessor that returns `Ok(&V)`/`Ok(V)` when the key is
/// present and holds the expected variant, `Err(NotPresent)` when absent, and
/// `Err(UnexpectedType)` otherwise.
macro_rules! value_accessor {
    ($name:ident, $ret:ty, $variant:pat => $extract:expr) => {
        #[allow(missing_docs)]
        pub fn $name(&self, key: &str) -> Result<$ret, ValueAccessError> {
            match self.inner.get(key) {
                None => Err(ValueAccessError::NotPresent),
                Some(value) => match value {
                    $variant => Ok($extract),
                    other => Err(ValueAccessError::UnexpectedType(other.bson_type_name())),
                },
            }
        }
    };
}

impl Document {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of top-level keys.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if the document has no keys.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns `true` if `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    /// Inserts `value` under `key`, returning the previous value if any.
    /// Re-inserting an existing key updates it in place without moving it to
    /// the end (matching `indexmap`'s `insert` semantics).
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Bson>) -> Option<Bson> {
        self.inner.insert(key.into(), value.into())
    }

    /// Removes `key`, returning its value if present. Shifts subsequent keys
    /// down by one position to preserve relative order.
    pub fn remove(&mut self, key: &str) -> Option<Bson> {
        self.inner.shift_remove(key)
    }

    /// Borrows the value at `key`.
    pub fn get(&self, key: &str) -> Option<&Bson> {
        self.inner.get(key)
    }

    /// Mutably borrows the value at `key`.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Bson> {
        self.inner.get_mut(key)
    }

    /// Iterates over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Bson> {
        self.inner.iter()
    }

    /// Iterates over keys in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Bson> {
        self.inner.keys()
    }

    /// Iterates over values in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, Bson> {
        self.inner.values()
    }

    value_accessor! { get_f64, f64, Bson::Double(v) => *v }
    value_accessor! { get_str, &str, Bson::String(v) => v.as_str() }
    value_accessor! { get_array, &[Bson], Bson::Array(v) => v.as_slice() }
    value_accessor! { get_document, &Document, Bson::Document(v) => v }
    value_accessor! { get_bool, bool, Bson::Boolean(v) => *v }
    value_accessor! { get_i32, i32, Bson::Int32(v) => *v }
    value_accessor! { get_i64, i64, Bson::Int64(v) => *v }
    value_accessor! { get_object_id, ObjectId, Bson::ObjectId(v) => *v }
    value_accessor! { get_timestamp, crate::timestamp::Timestamp, Bson::Timestamp(v) => *v }
    value_accessor! { get_binary, &crate::binary::Binary, Bson::Binary(v) => v }
}

/// The error returned by [`Document`]'s typed accessors.
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum ValueAccessError {
    /// The requested key was not present in the document.
    #[error("key not present")]
    NotPresent,

    /// The requested key was present but held a different variant.
    #[error("unexpected BSON type: {0}")]
    UnexpectedType(&'static str),
}

impl FromIterator<(String, Bson)> for Document {
    fn from_iter<I: IntoIterator<Item = (String, Bson)>>(iter: I) -> Self {
        Document {
            inner: IndexMap::from_iter(iter),
        }
    }
}

impl Extend<(String, Bson)> for Document {
    fn extend<I: IntoIterator<Item = (String, Bson)>>(&mut self, iter: I) {
        self.inner.extend(iter);
    }
}

impl IntoIterator for Document {
    type Item = (String, Bson);
    type IntoIter = indexmap::map::IntoIter<String, Bson>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = (&'a String, &'a Bson);
    type IntoIter = indexmap::map::Iter<'a, String, Bson>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}

/// Convenience macro for building a [`Document`] from key/value pairs.
///
/// ```
/// use bson_codec::doc;
///
/// let d = doc! {
///     "name" => "felix",
///     "age" => 4,
/// };
/// assert_eq!(d.get_str("name"), Ok("felix"));
/// ```
#[macro_export]
macro_rules! doc {
    () => { $crate::document::Document::new() };
    ( $( $key:expr => $value:expr ),* $(,)? ) => {{
        let mut doc = $crate::document::Document::new();
        $( doc.insert($key, $value); )*
        doc
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_insertion_order() {
        let mut d = Document::new();
        d.insert("z", 1);
        d.insert("a", 2);
        d.insert("m", 3);
        let keys: Vec<_> = d.keys().cloned().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn remove_preserves_relative_order() {
        let mut d = Document::new();
        d.insert("a", 1);
        d.insert("b", 2);
        d.insert("c", 3);
        d.remove("b");
        let keys: Vec<_> = d.keys().cloned().collect();
        assert_eq!(keys, vec!["a", "c"]);
    }

    #[test]
    fn typed_accessors() {
        let mut d = Document::new();
        d.insert("n", 42i32);
        d.insert("s", "hi");
        assert_eq!(d.get_i32("n"), Ok(42));
        assert_eq!(d.get_str("s"), Ok("hi"));
        assert_eq!(d.get_str("n"), Err(ValueAccessError::UnexpectedType("int32")));
        assert_eq!(d.get_str("missing"), Err(ValueAccessError::NotPresent));
    }

    #[test]
    fn doc_macro_builds_document() {
        let d = doc! {
            "a" => 1,
            "b" => "two",
        };
        assert_eq!(d.get_i32("a"), Ok(1));
        assert_eq!(d.get_str("b"), Ok("two"));
    }
}
