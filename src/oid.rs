//! Module containing functionality related to BSON ObjectIds.
//!
//! Only the on-wire contract is implemented here: a 12-byte value with a hex
//! text form. Generation (timestamp/process-id/counter construction) is a
//! convenience of a database client and is out of scope for this codec.

use std::{convert::TryInto, fmt, str::FromStr};

use crate::error::{Error, Result};

const LENGTH: usize = 12;

/// A 12-byte BSON ObjectId.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId {
    bytes: [u8; LENGTH],
}

impl ObjectId {
    /// Constructs an `ObjectId` from its raw 12-byte representation.
    pub const fn from_bytes(bytes: [u8; LENGTH]) -> Self {
        Self { bytes }
    }

    /// Returns the raw 12 bytes of this `ObjectId`.
    pub const fn bytes(&self) -> [u8; LENGTH] {
        self.bytes
    }

    /// Parses an `ObjectId` from its 24-character hex string representation.
    pub fn parse_str(s: impl AsRef<str>) -> Result<Self> {
        let s = s.as_ref();
        if s.len() != LENGTH * 2 {
            return Err(Error::invalid_bson(format!(
                "invalid ObjectId hex length: expected {}, got {}",
                LENGTH * 2,
                s.len()
            )));
        }
        let vec = hex::decode(s).map_err(Error::invalid_bson)?;
        let bytes: [u8; LENGTH] = vec
            .try_into()
            .map_err(|_| Error::invalid_bson("ObjectId hex did not decode to 12 bytes"))?;
        Ok(Self::from_bytes(bytes))
    }

    /// Returns the lowercase hex string representation of this `ObjectId`.
    pub fn to_hex(self) -> String {
        hex::encode(self.bytes)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId(\"{}\")", self.to_hex())
    }
}

impl FromStr for ObjectId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_str(s)
    }
}

impl From<[u8; LENGTH]> for ObjectId {
    fn from(bytes: [u8; LENGTH]) -> Self {
        Self::from_bytes(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trip() {
        let hex = "507f1f77bcf86cd799439011";
        let oid = ObjectId::parse_str(hex).unwrap();
        assert_eq!(oid.to_hex(), hex);
        assert_eq!(oid.to_string(), hex);
    }

    #[test]
    fn rejects_short_hex() {
        assert!(ObjectId::parse_str("abcd").is_err());
    }

    #[test]
    fn rejects_non_hex() {
        assert!(ObjectId::parse_str("zz0f1f77bcf86cd799439011").is_err());
    }

    #[test]
    fn bytes_round_trip() {
        let bytes = [1u8, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12];
        assert_eq!(ObjectId::from_bytes(bytes).bytes(), bytes);
    }
}
