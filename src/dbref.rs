//! Module containing functionality related to BSON DBRefs.

use crate::{bson::Bson, document::Document};

/// A logical reference to a document in another collection (and optionally
/// another database), recognized on decode either from the legacy tag 0x0C
/// element or from a document carrying `$ref`/`$id` (and optionally `$db`)
/// keys.
#[derive(Debug, Clone, PartialEq)]
pub struct DBRef {
    /// The referenced collection's name.
    pub collection: String,

    /// The referenced document's `_id`.
    pub id: Bson,

    /// The referenced database's name, if given.
    pub database: Option<String>,

    /// Any keys beyond `$ref`/`$id`/`$db` present on the original document.
    pub extra: Document,
}
