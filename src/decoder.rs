//! Decoding BSON bytes into [`Bson`]/[`Document`] values.

use std::convert::TryFrom;

use crate::{
    bson::Bson,
    dbref::DBRef,
    document::Document,
    error::{Error, Result},
    oid::ObjectId,
    primitive,
    regex::Regex,
    spec::{BinarySubtype, ElementType},
    timestamp::Timestamp,
    uuid::{self, UuidRepresentation},
};

/// Options controlling how ambiguous or representation-dependent values are
/// decoded.
#[derive(Copy, Clone, Debug)]
pub struct DecoderOptions {
    /// Whether decoded [`crate::datetime::DateTime`] values should be framed
    /// as UTC-aware by the caller. This codec's internal representation is
    /// always a UTC millisecond count; the flag exists for parity with the
    /// source driver's API and otherwise has no effect.
    pub utc_tz_aware: bool,

    /// The UUID byte-order convention to apply to Binary subtype 3 and 4
    /// payloads.
    pub uuid_representation: UuidRepresentation,

    /// Whether to attempt compiling decoded regular expressions into a host
    /// engine. This codec has no host regex engine to compile into, so
    /// regular expressions always decode to their uninterpreted
    /// [`Regex`](crate::regex::Regex) form regardless of this setting; the
    /// field is kept for parity with the source driver's API.
    pub compile_regex: bool,
}

impl Default for DecoderOptions {
    fn default() -> Self {
        DecoderOptions {
            utc_tz_aware: false,
            uuid_representation: UuidRepresentation::Standard,
            compile_regex: true,
        }
    }
}

/// Decodes a single BSON document from the front of `buffer`, returning the
/// document and the number of bytes consumed.
///
/// The top-level document is never subject to the `$ref`/`$id` DBRef
/// rewrite: that rewrite produces a [`Bson`] value, and a value can only
/// appear nested under a key, never as the document itself.
pub fn decode_document(buffer: &[u8], options: &DecoderOptions) -> Result<(Document, usize)> {
    let total_len = read_envelope_len(buffer)?;
    let body = &buffer[4..total_len - 1];
    let doc = decode_elements(body, options)?;
    Ok((doc, total_len))
}

/// Decodes every document packed back-to-back in `buffer`, requiring the
/// entire buffer to be consumed.
pub fn decode_all(buffer: &[u8], options: &DecoderOptions) -> Result<Vec<Document>> {
    let mut position = 0;
    let mut docs = Vec::new();
    while position < buffer.len() {
        let (doc, consumed) = decode_document(&buffer[position..], options)?;
        docs.push(doc);
        position += consumed;
    }
    Ok(docs)
}

/// Returns `true` if `buffer` holds exactly one well-formed BSON document
/// with no trailing bytes.
pub fn is_valid(buffer: &[u8]) -> bool {
    match decode_document(buffer, &DecoderOptions::default()) {
        Ok((_, consumed)) => consumed == buffer.len(),
        Err(_) => false,
    }
}

/// Reads and validates the 4-byte little-endian length envelope at the start
/// of `buffer`, checking it against the buffer length and the trailing NUL.
fn read_envelope_len(buffer: &[u8]) -> Result<usize> {
    let mut position = 0;
    let declared = primitive::read_i32(buffer, &mut position)?;
    if declared < 5 {
        return Err(Error::invalid_bson(format!(
            "document length {declared} is smaller than the minimum of 5"
        )));
    }
    let declared = declared as usize;
    if declared > buffer.len() {
        return Err(Error::invalid_bson(format!(
            "document declares length {declared} but only {} bytes are available",
            buffer.len()
        )));
    }
    if buffer[declared - 1] != 0 {
        return Err(Error::invalid_bson(
            "document is not terminated by a NUL byte",
        ));
    }
    Ok(declared)
}

/// Decodes the element sequence between a document's length prefix and its
/// trailing NUL, applying no document-level rewrite.
fn decode_elements(data: &[u8], options: &DecoderOptions) -> Result<Document> {
    let mut position = 0;
    let mut doc = Document::new();
    while position < data.len() {
        let tag_byte = primitive::read_u8(data, &mut position)?;
        let tag = ElementType::try_from(tag_byte)
            .map_err(|b| Error::invalid_bson(format!("unrecognized element type tag 0x{b:02x}")))?;
        let key = primitive::read_cstring(data, &mut position)?;
        let value = decode_value(tag, data, &mut position, options)
            .map_err(|e| if e.key.is_none() { e.with_key(key.clone()) } else { e })?;
        doc.insert(key, value);
    }
    Ok(doc)
}

/// Decodes one element value for the already-consumed `tag`, at `position`
/// within `data`.
fn decode_value(
    tag: ElementType,
    data: &[u8],
    position: &mut usize,
    options: &DecoderOptions,
) -> Result<Bson> {
    Ok(match tag {
        ElementType::Double => Bson::Double(primitive::read_f64(data, position)?),
        ElementType::String => Bson::String(primitive::read_string(data, position)?),
        ElementType::EmbeddedDocument => decode_embedded_document_value(data, position, options)?,
        ElementType::Array => decode_array(data, position, options)?,
        ElementType::Binary => decode_binary(data, position, options)?,
        ElementType::Undefined => Bson::Null,
        ElementType::ObjectId => {
            let bytes = primitive::read_bytes(data, position, 12)?;
            let mut arr = [0u8; 12];
            arr.copy_from_slice(bytes);
            Bson::ObjectId(ObjectId::from_bytes(arr))
        }
        ElementType::Boolean => {
            let b = primitive::read_u8(data, position)?;
            Bson::Boolean(b == 1)
        }
        ElementType::DateTime => {
            let millis = primitive::read_i64(data, position)?;
            Bson::DateTime(crate::datetime::DateTime::from_millis(millis))
        }
        ElementType::Null => Bson::Null,
        ElementType::RegularExpression => {
            let pattern = primitive::read_cstring(data, position)?;
            let opts = primitive::read_cstring(data, position)?;
            let _ = options.compile_regex;
            Bson::RegularExpression(Regex::new(pattern, opts))
        }
        ElementType::DbPointer => {
            let collection = primitive::read_string(data, position)?;
            let bytes = primitive::read_bytes(data, position, 12)?;
            let mut arr = [0u8; 12];
            arr.copy_from_slice(bytes);
            Bson::DbPointer(DBRef {
                collection,
                id: Bson::ObjectId(ObjectId::from_bytes(arr)),
                database: None,
                extra: Document::new(),
            })
        }
        ElementType::JavaScriptCode => Bson::JavaScriptCode(primitive::read_string(data, position)?),
        ElementType::Symbol => Bson::String(primitive::read_string(data, position)?),
        ElementType::JavaScriptCodeWithScope => {
            let _total_len = primitive::read_i32(data, position)?;
            let code = primitive::read_string(data, position)?;
            let scope = decode_document_value(data, position, options)?;
            Bson::JavaScriptCodeWithScope(crate::code::JavaScriptCodeWithScope { code, scope })
        }
        ElementType::Int32 => Bson::Int32(primitive::read_i32(data, position)?),
        ElementType::Timestamp => {
            let increment = primitive::read_u32(data, position)?;
            let time = primitive::read_u32(data, position)?;
            Bson::Timestamp(Timestamp { time, increment })
        }
        ElementType::Int64 => Bson::Int64(primitive::read_i64(data, position)?),
        ElementType::MinKey => Bson::MinKey,
        ElementType::MaxKey => Bson::MaxKey,
    })
}

/// Decodes a nested document's envelope (length-prefixed, NUL-terminated),
/// advancing `position` past it, without any `$ref` rewrite. Used for array
/// backing documents and code-with-scope scopes, neither of which is
/// meaningfully a DBRef.
fn decode_document_value(
    data: &[u8],
    position: &mut usize,
    options: &DecoderOptions,
) -> Result<Document> {
    let remaining = &data[*position..];
    let len = read_envelope_len(remaining)?;
    let doc = decode_elements(&remaining[4..len - 1], options)?;
    *position += len;
    Ok(doc)
}

/// Decodes an embedded document element (tag 0x03), applying the `$ref`/`$id`
/// document-level rewrite into a [`Bson::DBRef`] when both keys are present.
fn decode_embedded_document_value(
    data: &[u8],
    position: &mut usize,
    options: &DecoderOptions,
) -> Result<Bson> {
    let mut doc = decode_document_value(data, position, options)?;
    let is_dbref = matches!(doc.get("$ref"), Some(Bson::String(_))) && doc.contains_key("$id");
    if !is_dbref {
        return Ok(Bson::Document(doc));
    }
    let collection = match doc.remove("$ref") {
        Some(Bson::String(s)) => s,
        _ => unreachable!("checked above"),
    };
    let id = doc.remove("$id").expect("checked above");
    let database = match doc.remove("$db") {
        Some(Bson::String(s)) => Some(s),
        _ => None,
    };
    Ok(Bson::DBRef(DBRef {
        collection,
        id,
        database,
        extra: doc,
    }))
}

/// Decodes a BSON array (tag 0x04): a document-shaped wire form whose keys
/// are the decimal string indices `"0"`, `"1"`, ... Reconstruction reads
/// indices in order and stops at the first gap, discarding any other keys
/// present in the backing document.
fn decode_array(data: &[u8], position: &mut usize, options: &DecoderOptions) -> Result<Bson> {
    let mut doc = decode_document_value(data, position, options)?;
    let mut values = Vec::new();
    let mut index = 0usize;
    while let Some(value) = doc.remove(&index.to_string()) {
        values.push(value);
        index += 1;
    }
    Ok(Bson::Array(values))
}

/// Decodes a Binary element (tag 0x05), including the redundant inner length
/// for the deprecated subtype 0x02 and the UUID subtypes 0x03/0x04.
fn decode_binary(data: &[u8], position: &mut usize, options: &DecoderOptions) -> Result<Bson> {
    let declared_len = primitive::read_i32(data, position)?;
    if declared_len < 0 {
        return Err(Error::invalid_bson(format!(
            "negative binary length {declared_len}"
        )));
    }
    let mut len = declared_len as usize;
    let subtype_byte = primitive::read_u8(data, position)?;
    let subtype = BinarySubtype::from(subtype_byte);

    if subtype_byte == 0x02 {
        let inner_len = primitive::read_i32(data, position)?;
        if inner_len < 0 || inner_len as usize + 4 != len {
            return Err(Error::invalid_bson(
                "binary subtype 0x02 inner length does not match outer length minus 4",
            ));
        }
        len = inner_len as usize;
    }

    let payload = primitive::read_bytes(data, position, len)?;

    if subtype_byte == 0x03 || subtype_byte == 0x04 {
        let uuid = uuid::decode_uuid_bytes(payload, options.uuid_representation)?;
        return Ok(Bson::Uuid(uuid, options.uuid_representation));
    }

    Ok(Bson::Binary(crate::binary::Binary {
        subtype,
        bytes: payload.to_vec(),
    }))
}
