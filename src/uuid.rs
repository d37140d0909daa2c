//! UUID sub-encodings used for BSON Binary subtypes 3 (legacy) and 4 (standard).
//!
//! Different drivers have historically stored 128-bit UUIDs in different byte
//! orders under the same wire subtypes. A UUID encoded under one
//! representation MUST be decoded under the same representation to round-trip.

use crate::{
    binary::{Binary, BinarySubtype},
    error::{Error, Result},
};

/// The representation used when converting between a [`uuid::Uuid`] and a
/// [`Binary`] value.
#[non_exhaustive]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum UuidRepresentation {
    /// The canonical representation (Binary subtype 0x04, big-endian bytes).
    Standard,
    /// The legacy representation used by the C# driver (Binary subtype 0x03,
    /// with the first three GUID fields byte-reversed).
    CSharpLegacy,
    /// The legacy representation used by the Java driver (Binary subtype
    /// 0x03, with the two 8-byte halves each reversed).
    JavaLegacy,
}

impl UuidRepresentation {
    fn binary_subtype(self) -> BinarySubtype {
        match self {
            UuidRepresentation::Standard => BinarySubtype::Uuid,
            UuidRepresentation::CSharpLegacy | UuidRepresentation::JavaLegacy => {
                BinarySubtype::UuidOld
            }
        }
    }
}

/// Reorders a 16-byte UUID payload between its canonical big-endian layout
/// and the byte order a given representation stores on the wire. The
/// permutation is its own inverse, so the same function serializes and
/// deserializes.
fn reorder(mut bytes: [u8; 16], rep: UuidRepresentation) -> [u8; 16] {
    match rep {
        UuidRepresentation::Standard => {}
        UuidRepresentation::CSharpLegacy => {
            bytes[0..4].reverse();
            bytes[4..6].reverse();
            bytes[6..8].reverse();
        }
        UuidRepresentation::JavaLegacy => {
            bytes[0..8].reverse();
            bytes[8..16].reverse();
        }
    }
    bytes
}

/// Serializes a [`uuid::Uuid`] into a [`Binary`] value under the given
/// representation.
pub fn uuid_to_binary(uuid: uuid::Uuid, rep: UuidRepresentation) -> Binary {
    let bytes = reorder(uuid.into_bytes(), rep).to_vec();
    Binary {
        subtype: rep.binary_subtype(),
        bytes,
    }
}

/// Reconstructs a [`uuid::Uuid`] from a raw 16-byte Binary payload under the
/// given representation, without regard to the payload's subtype byte.
///
/// The wire format doesn't disambiguate byte order by subtype: both subtype 3
/// and subtype 4 payloads are interpreted under whatever representation the
/// caller configured, matching historical driver behavior where the subtype
/// byte alone cannot tell legacy byte order from standard. [`binary_to_uuid`]
/// is the subtype-checked convenience built on top of this for callers who
/// want that stricter contract.
pub(crate) fn decode_uuid_bytes(bytes: &[u8], rep: UuidRepresentation) -> Result<uuid::Uuid> {
    if bytes.len() != 16 {
        return Err(Error::invalid_bson(format!(
            "invalid UUID length: expected 16 bytes, got {}",
            bytes.len()
        )));
    }
    let mut buf = [0u8; 16];
    buf.copy_from_slice(bytes);
    Ok(uuid::Uuid::from_bytes(reorder(buf, rep)))
}

/// Deserializes a [`Binary`] value into a [`uuid::Uuid`] according to the
/// given representation. Fails if the subtype doesn't match what the
/// representation requires, or the payload isn't 16 bytes.
pub fn binary_to_uuid(binary: &Binary, rep: UuidRepresentation) -> Result<uuid::Uuid> {
    let expected_subtype = rep.binary_subtype();
    if binary.subtype != expected_subtype {
        return Err(Error::invalid_bson(format!(
            "UUID representation mismatch: {:?} requires binary subtype {:?}, got {:?}",
            rep, expected_subtype, binary.subtype
        )));
    }
    decode_uuid_bytes(&binary.bytes, rep)
}
