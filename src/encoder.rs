//! Encoding [`Bson`]/[`Document`] values into BSON bytes.

use crate::{
    bson::Bson,
    document::Document,
    error::{Error, Result},
    primitive,
    spec::ElementType,
    uuid::{self, UuidRepresentation},
};

/// Options controlling encode-time policy.
#[derive(Copy, Clone, Debug)]
pub struct EncoderOptions {
    /// When set, keys are rejected with `InvalidDocument` if they start with
    /// `$` or contain `.`. MongoDB reserves both for its own use; driver
    /// callers that build a DBRef's `$ref`/`$id`/`$db` keys disable this.
    pub check_keys: bool,

    /// The UUID byte-order convention used when encoding a [`Bson::Uuid`]
    /// value whose carried representation differs, or when the caller
    /// constructs one without a representation context. In practice this
    /// codec always encodes a `Bson::Uuid` under the representation it
    /// carries; this option exists for parity with the source driver's
    /// top-level encode entry point.
    pub uuid_representation: UuidRepresentation,
}

impl Default for EncoderOptions {
    fn default() -> Self {
        EncoderOptions {
            check_keys: false,
            uuid_representation: UuidRepresentation::Standard,
        }
    }
}

/// Encodes `doc` into a complete BSON document: 4-byte length prefix,
/// element sequence, trailing NUL.
///
/// If `doc` has an `_id` key, it is written first regardless of its
/// insertion position, matching driver behavior that always places the
/// primary key at the front of the wire document.
pub fn encode_document(doc: &Document, options: &EncoderOptions) -> Result<Vec<u8>> {
    finish_document(encode_elements(doc, options, true)?)
}

/// Encodes a document's key/value pairs only (no length prefix or trailing
/// NUL), used to build embedded documents, array backing documents, and
/// code-with-scope scopes in addition to top-level documents. `reorder_id`
/// places `_id` first when present; this only applies at the top level,
/// matching driver behavior that puts the primary key at the front of the
/// outermost document without disturbing the field order of nested ones.
fn encode_elements(doc: &Document, options: &EncoderOptions, reorder_id: bool) -> Result<Vec<u8>> {
    let mut body = Vec::new();
    if reorder_id {
        if let Some(id) = doc.get("_id") {
            write_element(&mut body, "_id", id, options)?;
        }
    }
    for (key, value) in doc.iter() {
        if reorder_id && key == "_id" {
            continue;
        }
        write_element(&mut body, key, value, options)?;
    }
    Ok(body)
}

/// Wraps `body` (an element sequence) into a complete document envelope.
fn finish_document(body: Vec<u8>) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(4 + body.len() + 1);
    let total_len: i32 = (4 + body.len() + 1)
        .try_into()
        .map_err(|_| Error::integer_overflow(body.len()))?;
    primitive::write_i32(&mut out, total_len);
    out.extend_from_slice(&body);
    out.push(0);
    Ok(out)
}

fn check_key(key: &str, options: &EncoderOptions) -> Result<()> {
    if !options.check_keys {
        return Ok(());
    }
    if key.starts_with('$') {
        return Err(Error::invalid_document(format!(
            "key {key:?} must not start with '$'"
        )));
    }
    if key.contains('.') {
        return Err(Error::invalid_document(format!(
            "key {key:?} must not contain '.'"
        )));
    }
    Ok(())
}

fn write_element(buf: &mut Vec<u8>, key: &str, value: &Bson, options: &EncoderOptions) -> Result<()> {
    check_key(key, options).map_err(|e| e.with_key(key))?;
    write_tag(buf, element_type(value));
    primitive::write_cstring(buf, key, true).map_err(|e| e.with_key(key))?;
    write_value(buf, value, options).map_err(|e| e.with_key(key))
}

fn write_tag(buf: &mut Vec<u8>, tag: ElementType) {
    buf.push(tag as u8);
}

fn element_type(value: &Bson) -> ElementType {
    match value {
        Bson::Double(_) => ElementType::Double,
        Bson::String(_) => ElementType::String,
        Bson::Array(_) => ElementType::Array,
        Bson::Document(_) => ElementType::EmbeddedDocument,
        Bson::Binary(_) => ElementType::Binary,
        Bson::Uuid(..) => ElementType::Binary,
        Bson::Undefined => ElementType::Undefined,
        Bson::ObjectId(_) => ElementType::ObjectId,
        Bson::Boolean(_) => ElementType::Boolean,
        Bson::DateTime(_) => ElementType::DateTime,
        Bson::Null => ElementType::Null,
        Bson::RegularExpression(_) => ElementType::RegularExpression,
        Bson::DbPointer(_) => ElementType::DbPointer,
        Bson::JavaScriptCode(_) => ElementType::JavaScriptCode,
        Bson::JavaScriptCodeWithScope(_) => ElementType::JavaScriptCodeWithScope,
        Bson::Int32(_) => ElementType::Int32,
        Bson::Timestamp(_) => ElementType::Timestamp,
        Bson::Int64(_) => ElementType::Int64,
        Bson::MinKey => ElementType::MinKey,
        Bson::MaxKey => ElementType::MaxKey,
        Bson::DBRef(_) => ElementType::EmbeddedDocument,
    }
}

fn write_value(buf: &mut Vec<u8>, value: &Bson, options: &EncoderOptions) -> Result<()> {
    match value {
        Bson::Double(v) => primitive::write_f64(buf, *v),
        Bson::String(v) => primitive::write_string(buf, v),
        Bson::Array(items) => {
            let array_doc = array_to_document(items);
            let body = encode_elements(&array_doc, options, false)?;
            buf.extend_from_slice(&finish_document(body)?);
        }
        Bson::Document(doc) => {
            let body = encode_elements(doc, options, false)?;
            buf.extend_from_slice(&finish_document(body)?);
        }
        Bson::Binary(binary) => {
            write_binary_payload(buf, u8::from(binary.subtype), &binary.bytes);
        }
        Bson::Uuid(u, rep) => {
            let binary = uuid::uuid_to_binary(*u, *rep);
            write_binary_payload(buf, u8::from(binary.subtype), &binary.bytes);
        }
        Bson::Undefined => {}
        Bson::ObjectId(oid) => buf.extend_from_slice(&oid.bytes()),
        Bson::Boolean(b) => buf.push(if *b { 1 } else { 0 }),
        Bson::DateTime(dt) => primitive::write_i64(buf, dt.timestamp_millis()),
        Bson::Null => {}
        Bson::RegularExpression(regex) => {
            primitive::write_cstring(buf, &regex.pattern, true)?;
            primitive::write_cstring(buf, &regex.options, true)?;
        }
        Bson::DbPointer(dbref) => {
            primitive::write_string(buf, &dbref.collection);
            let Bson::ObjectId(oid) = &dbref.id else {
                return Err(Error::unsupported_type(
                    "DbPointer id must be an ObjectId",
                ));
            };
            buf.extend_from_slice(&oid.bytes());
        }
        Bson::JavaScriptCode(code) => primitive::write_string(buf, code),
        Bson::JavaScriptCodeWithScope(code_with_scope) => {
            let mut inner = Vec::new();
            primitive::write_string(&mut inner, &code_with_scope.code);
            let scope_body = encode_elements(&code_with_scope.scope, options, false)?;
            inner.extend_from_slice(&finish_document(scope_body)?);
            let total_len: i32 = (4 + inner.len())
                .try_into()
                .map_err(|_| Error::integer_overflow(inner.len()))?;
            primitive::write_i32(buf, total_len);
            buf.extend_from_slice(&inner);
        }
        Bson::Int32(v) => primitive::write_i32(buf, *v),
        Bson::Timestamp(ts) => {
            primitive::write_u32(buf, ts.increment);
            primitive::write_u32(buf, ts.time);
        }
        Bson::Int64(v) => primitive::write_i64(buf, *v),
        Bson::MinKey | Bson::MaxKey => {}
        Bson::DBRef(dbref) => {
            let inner_options = EncoderOptions {
                check_keys: false,
                ..*options
            };
            let doc = dbref_to_document(dbref);
            let body = encode_elements(&doc, &inner_options, false)?;
            buf.extend_from_slice(&finish_document(body)?);
        }
    }
    Ok(())
}

fn write_binary_payload(buf: &mut Vec<u8>, subtype: u8, bytes: &[u8]) {
    let len = bytes.len() as i32;
    primitive::write_i32(buf, len);
    buf.push(subtype);
    buf.extend_from_slice(bytes);
}

/// Builds the document-shaped wire form of a BSON array: keys `"0"`, `"1"`,
/// ... in order.
fn array_to_document(items: &[Bson]) -> Document {
    items
        .iter()
        .enumerate()
        .map(|(i, v)| (i.to_string(), v.clone()))
        .collect()
}

/// Builds the `$ref`/`$id`/`$db`/extras document form of a [`DBRef`].
fn dbref_to_document(dbref: &crate::dbref::DBRef) -> Document {
    let mut doc = Document::new();
    doc.insert("$ref", dbref.collection.clone());
    doc.insert("$id", dbref.id.clone());
    if let Some(database) = &dbref.database {
        doc.insert("$db", database.clone());
    }
    for (key, value) in dbref.extra.iter() {
        doc.insert(key.clone(), value.clone());
    }
    doc
}

/// Encodes the smallest of Int32/Int64 that losslessly represents `n`,
/// matching the integer-width-selection rule applied when building documents
/// from host-language integers wider than what BSON's wire types need.
pub fn bson_int_for(n: i64) -> Bson {
    match i32::try_from(n) {
        Ok(v) => Bson::Int32(v),
        Err(_) => Bson::Int64(n),
    }
}

/// Encodes the smallest of Int32/Int64 that losslessly represents an
/// unsigned value, or an overflow error if it exceeds what a signed 64-bit
/// BSON integer can hold.
pub fn bson_int_for_u64(n: u64) -> Result<Bson> {
    if let Ok(v) = i32::try_from(n) {
        return Ok(Bson::Int32(v));
    }
    match i64::try_from(n) {
        Ok(v) => Ok(Bson::Int64(v)),
        Err(_) => Err(Error::integer_overflow(n)),
    }
}
