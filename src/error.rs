//! # Error Types
//!
//! All operations return [`Result<T, SleError>`](SleError). The variants keep
//! the error kinds a caller has to tell apart (wrong password, unsupported
//! container, unsupported stream operation, plain I/O) as separate cases.

use std::io;
use thiserror::Error;

/// The error type for all SLE container operations.
#[derive(Error, Debug)]
pub enum SleError {
    /// I/O error from the underlying raw stream, propagated unchanged.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Header parsing or validation error.
    ///
    /// Raised for:
    /// - invalid magic bytes
    /// - key size field other than 128/192/256
    /// - stored header length inconsistent with the version layout
    /// - non-UTF-8 file name
    #[error("Header error: {0}")]
    Header(String),

    /// The version tag is not one of the three known revisions.
    #[error("Unsupported version: {0}")]
    UnsupportedVersion(u8),

    /// The verification block did not decrypt to the expected marker.
    ///
    /// Open a fresh stream with another password; the failed instance is gone.
    #[error("Password is not correct")]
    WrongPassword,

    /// Seek or position change on a forward-only (legacy) container.
    #[error("Operation not supported: {0}")]
    NotSupported(&'static str),

    /// Invalid configuration detected before any I/O (key size, empty password).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Ciphertext is truncated or its padding is malformed.
    #[error("Corrupt container: {0}")]
    Corrupt(String),

    /// The device identifier backing the counter nonce could not be read.
    #[error("Device identifier error: {0}")]
    Device(String),

    /// A previous operation failed; the stream is unusable.
    #[error("Stream is faulted by an earlier error")]
    Faulted,

    /// The stream was closed.
    #[error("Stream is disposed")]
    Disposed,
}

impl SleError {
    /// `true` for errors describing the container bytes themselves.
    pub fn is_format_error(&self) -> bool {
        matches!(self, SleError::Header(_) | SleError::UnsupportedVersion(_))
    }

    fn io_kind(&self) -> io::ErrorKind {
        match self {
            SleError::Io(e) => e.kind(),
            SleError::NotSupported(_) => io::ErrorKind::Unsupported,
            SleError::WrongPassword => io::ErrorKind::PermissionDenied,
            SleError::Config(_) => io::ErrorKind::InvalidInput,
            SleError::Header(_) | SleError::UnsupportedVersion(_) | SleError::Corrupt(_) => {
                io::ErrorKind::InvalidData
            }
            SleError::Device(_) | SleError::Faulted | SleError::Disposed => io::ErrorKind::Other,
        }
    }
}

impl From<SleError> for io::Error {
    /// I/O errors pass through untouched; everything else is wrapped so it can
    /// be recovered with `io::Error::get_ref()` + `downcast_ref::<SleError>()`.
    fn from(err: SleError) -> Self {
        match err {
            SleError::Io(e) => e,
            other => io::Error::new(other.io_kind(), other),
        }
    }
}
