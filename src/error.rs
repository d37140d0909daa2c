//! Error types returned by this crate.

use thiserror::Error;

/// The result type for all fallible operations in this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// An error produced while encoding or decoding BSON.
#[derive(Clone, Debug, Error)]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,

    /// A human-readable message with more detail, if any.
    pub message: Option<String>,

    /// The document key associated with the error, if any.
    pub key: Option<String>,

    /// The array index associated with the error, if any.
    pub index: Option<usize>,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(key) = self.key.as_deref() {
            write!(f, " (key: \"{key}\")")?;
        }
        if let Some(index) = self.index {
            write!(f, " (index: {index})")?;
        }
        if let Some(message) = self.message.as_deref() {
            write!(f, ": {message}")?;
        }
        Ok(())
    }
}

/// The kinds of errors that can occur in this crate.
///
/// Maps directly onto the error taxonomy: structural decode failures
/// (`InvalidBson`), encode-time policy violations (`InvalidDocument`),
/// out-of-range integers (`IntegerOverflow`), and values/inputs of an
/// unsupported shape (`Type`).
#[derive(Clone, Debug, Error)]
pub enum ErrorKind {
    /// Malformed BSON bytes were encountered while decoding: truncation, a
    /// missing trailing NUL, a bad length field, an unrecognized type tag, or
    /// invalid UTF-8 in a key or string.
    #[error("invalid BSON")]
    InvalidBson,

    /// An encode-time policy violation: a non-string key, or (when key
    /// checking is enabled) a key starting with `$` or containing `.`.
    #[error("invalid document")]
    InvalidDocument,

    /// An integer value did not fit in the signed 64-bit range BSON supports.
    #[error("integer overflow")]
    IntegerOverflow,

    /// A value of a type not supported by this codec was passed to the
    /// encoder.
    #[error("unsupported type")]
    Type,
}

impl Error {
    pub(crate) fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            key: None,
            index: None,
        }
    }

    pub(crate) fn with_message(mut self, message: impl ToString) -> Self {
        self.message = Some(message.to_string());
        self
    }

    pub(crate) fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub(crate) fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    pub(crate) fn invalid_bson(message: impl ToString) -> Self {
        Self::new(ErrorKind::InvalidBson).with_message(message)
    }

    pub(crate) fn invalid_document(message: impl ToString) -> Self {
        Self::new(ErrorKind::InvalidDocument).with_message(message)
    }

    pub(crate) fn integer_overflow(n: impl std::fmt::Display) -> Self {
        Self::new(ErrorKind::IntegerOverflow)
            .with_message(format!("{n} does not fit in a signed 64-bit BSON integer"))
    }

    pub(crate) fn unsupported_type(message: impl ToString) -> Self {
        Self::new(ErrorKind::Type).with_message(message)
    }

    /// Returns `true` if this error is an [`ErrorKind::InvalidBson`].
    pub fn is_invalid_bson(&self) -> bool {
        matches!(self.kind, ErrorKind::InvalidBson)
    }
}
