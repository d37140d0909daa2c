//! Module containing functionality related to BSON JavaScript code values.

use crate::document::Document;

/// JavaScript code together with a scope document in which it should be
/// evaluated. Plain code with no scope is carried directly as
/// `Bson::JavaScriptCode(String)`.
#[derive(Debug, Clone, PartialEq)]
pub struct JavaScriptCodeWithScope {
    /// The JavaScript source.
    pub code: String,

    /// The scope document the code closes over.
    pub scope: Document,
}
