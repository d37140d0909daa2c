//! Module containing functionality related to BSON binary values.

pub use crate::spec::BinarySubtype;
use crate::error::{Error, Result};
use std::fmt::{self, Display};

/// A BSON binary value: a subtype byte plus an opaque byte payload.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Binary {
    /// The subtype of the bytes.
    pub subtype: BinarySubtype,

    /// The binary bytes.
    pub bytes: Vec<u8>,
}

impl Display for Binary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Binary(0x{:x}, {})",
            u8::from(self.subtype),
            base64::encode(&self.bytes)
        )
    }
}

impl Binary {
    /// Creates a [`Binary`] from a base64-encoded string and an optional subtype
    /// (defaulting to [`BinarySubtype::Generic`]).
    pub fn from_base64(
        input: impl AsRef<str>,
        subtype: impl Into<Option<BinarySubtype>>,
    ) -> Result<Self> {
        let bytes = base64::decode(input.as_ref()).map_err(Error::invalid_bson)?;
        Ok(Binary {
            subtype: subtype.into().unwrap_or(BinarySubtype::Generic),
            bytes,
        })
    }

    /// Returns the base64 text encoding of the binary payload.
    pub fn to_base64(&self) -> String {
        base64::encode(&self.bytes)
    }
}

/// Minimal base64 support, grounded on the teacher's use of the `base64` crate
/// for `Binary`'s text encoding.
mod base64 {
    pub use ::base64::engine::general_purpose::STANDARD as ENGINE;
    use ::base64::Engine as _;

    pub fn encode(bytes: &[u8]) -> String {
        ENGINE.encode(bytes)
    }

    pub fn decode(s: &str) -> Result<Vec<u8>, ::base64::DecodeError> {
        ENGINE.decode(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base64_round_trip() {
        let bin = Binary {
            subtype: BinarySubtype::Generic,
            bytes: vec![1, 2, 3, 4],
        };
        let encoded = bin.to_base64();
        let decoded = Binary::from_base64(encoded, BinarySubtype::Generic).unwrap();
        assert_eq!(bin, decoded);
    }

    #[test]
    fn display_shows_subtype_and_base64() {
        let bin = Binary {
            subtype: BinarySubtype::Uuid,
            bytes: vec![0xAB],
        };
        assert_eq!(bin.to_string(), format!("Binary(0x4, {})", bin.to_base64()));
    }
}
