//! Encoding and decoding support for BSON, the binary document format used by
//! MongoDB.
//!
//! ```
//! use bson_codec::{doc, decode, encode};
//!
//! let document = doc! {
//!     "name" => "felix",
//!     "age" => 4,
//! };
//! let bytes = encode(&document).unwrap();
//! let decoded = decode(&bytes).unwrap();
//! assert_eq!(decoded.get_str("name"), Ok("felix"));
//! ```

pub mod binary;
pub mod bson;
pub mod code;
pub mod datetime;
pub mod dbref;
pub mod decoder;
pub mod document;
pub mod encoder;
pub mod error;
pub mod oid;
pub mod primitive;
pub mod regex;
pub mod spec;
pub mod timestamp;
pub mod uuid;

pub use crate::{
    binary::{Binary, BinarySubtype},
    bson::Bson,
    code::JavaScriptCodeWithScope,
    datetime::DateTime,
    dbref::DBRef,
    decoder::{DecoderOptions, decode_all as decode_all_with_options, decode_document},
    document::{Document, ValueAccessError},
    encoder::{encode_document, EncoderOptions},
    error::{Error, ErrorKind, Result},
    oid::ObjectId,
    regex::{Regex, RegexFlags},
    timestamp::Timestamp,
    uuid::UuidRepresentation,
};

/// Encodes `document` into its BSON byte representation using default
/// encoder options (no key checking, standard UUID representation).
pub fn encode(document: &Document) -> Result<Vec<u8>> {
    encoder::encode_document(document, &EncoderOptions::default())
}

/// Decodes a single BSON document from the front of `buffer` using default
/// decoder options.
///
/// Trailing bytes beyond the document are ignored; use [`is_valid`] to
/// reject them, or [`decode_all`] to require them to form further documents.
pub fn decode(buffer: &[u8]) -> Result<Document> {
    decoder::decode_document(buffer, &DecoderOptions::default()).map(|(doc, _)| doc)
}

/// Decodes every document packed back-to-back in `buffer`, requiring the
/// entire buffer to be consumed.
pub fn decode_all(buffer: &[u8]) -> Result<Vec<Document>> {
    decoder::decode_all(buffer, &DecoderOptions::default())
}

/// Returns `true` if `buffer` holds exactly one well-formed BSON document
/// with no trailing bytes.
pub fn is_valid(buffer: &[u8]) -> bool {
    decoder::is_valid(buffer)
}

/// Reports whether this build has a native (e.g. C-extension-backed) codec
/// available. This implementation is pure Rust and never does, so this
/// always returns `false`; it exists for parity with the source driver's
/// capability-probing entry point.
pub fn has_native() -> bool {
    false
}
