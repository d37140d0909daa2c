//! The [`Bson`] value model: a closed tagged union over every BSON element
//! type.

use crate::{
    binary::Binary,
    code::JavaScriptCodeWithScope,
    datetime::DateTime,
    dbref::DBRef,
    document::Document,
    oid::ObjectId,
    regex::Regex,
    timestamp::Timestamp,
};

/// A BSON value.
#[derive(Debug, Clone, PartialEq)]
pub enum Bson {
    Double(f64),
    String(String),
    Array(Vec<Bson>),
    Document(Document),
    Binary(Binary),
    /// A Binary subtype 3 or 4 payload decoded as a UUID under the given
    /// representation.
    Uuid(uuid::Uuid, crate::uuid::UuidRepresentation),
    /// The deprecated Undefined type. Round-trips as [`Bson::Null`] on
    /// re-encode.
    Undefined,
    ObjectId(ObjectId),
    Boolean(bool),
    DateTime(DateTime),
    Null,
    RegularExpression(Regex),
    /// The legacy DBPointer element (tag 0x0C): a collection name plus an
    /// ObjectId, with no extra fields or database.
    DbPointer(DBRef),
    JavaScriptCode(String),
    JavaScriptCodeWithScope(JavaScriptCodeWithScope),
    Int32(i32),
    Timestamp(Timestamp),
    Int64(i64),
    MinKey,
    MaxKey,
    /// A DBRef produced by the `$ref`/`$id`/`$db` document-level rewrite.
    DBRef(DBRef),
}

impl Bson {
    /// A short, stable name for this value's variant, used in error messages.
    pub fn bson_type_name(&self) -> &'static str {
        match self {
            Bson::Double(_) => "double",
            Bson::String(_) => "string",
            Bson::Array(_) => "array",
            Bson::Document(_) => "document",
            Bson::Binary(_) => "binary",
            Bson::Uuid(..) => "uuid",
            Bson::Undefined => "undefined",
            Bson::ObjectId(_) => "object_id",
            Bson::Boolean(_) => "bool",
            Bson::DateTime(_) => "date_time",
            Bson::Null => "null",
            Bson::RegularExpression(_) => "regex",
            Bson::DbPointer(_) => "db_pointer",
            Bson::JavaScriptCode(_) => "javascript",
            Bson::JavaScriptCodeWithScope(_) => "javascript_with_scope",
            Bson::Int32(_) => "int32",
            Bson::Timestamp(_) => "timestamp",
            Bson::Int64(_) => "int64",
            Bson::MinKey => "min_key",
            Bson::MaxKey => "max_key",
            Bson::DBRef(_) => "dbref",
        }
    }
}

macro_rules! impl_from {
    ($variant:ident, $t:ty) => {
        impl From<$t> for Bson {
            fn from(v: $t) -> Self {
                Bson::$variant(v.into())
            }
        }
    };
}

impl_from!(Double, f64);
impl_from!(String, String);
impl_from!(Boolean, bool);
impl_from!(Int32, i32);
impl_from!(Int64, i64);
impl_from!(ObjectId, ObjectId);
impl_from!(Document, Document);
impl_from!(DateTime, DateTime);
impl_from!(Timestamp, Timestamp);
impl_from!(RegularExpression, Regex);
impl_from!(Binary, Binary);
impl_from!(DBRef, DBRef);

impl From<&str> for Bson {
    fn from(v: &str) -> Self {
        Bson::String(v.to_owned())
    }
}

impl From<Vec<Bson>> for Bson {
    fn from(v: Vec<Bson>) -> Self {
        Bson::Array(v)
    }
}

impl<T: Into<Bson>> From<Option<T>> for Bson {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Bson::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_names_are_distinct() {
        let samples = vec![
            Bson::Double(1.0),
            Bson::String("s".into()),
            Bson::Array(vec![]),
            Bson::Boolean(true),
            Bson::Null,
            Bson::Int32(1),
            Bson::Int64(1),
            Bson::MinKey,
            Bson::MaxKey,
        ];
        let names: std::collections::HashSet<_> =
            samples.iter().map(Bson::bson_type_name).collect();
        assert_eq!(names.len(), samples.len());
    }

    #[test]
    fn from_conversions() {
        let b: Bson = 5i32.into();
        assert_eq!(b, Bson::Int32(5));
        let b: Bson = "hi".into();
        assert_eq!(b, Bson::String("hi".to_owned()));
        let b: Bson = true.into();
        assert_eq!(b, Bson::Boolean(true));
    }
}
