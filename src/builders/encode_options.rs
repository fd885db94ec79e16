//! src/builders/encode_options.rs
//! Options for creating a container

use crate::consts::NONCE_SIZE;
use crate::crypto::nonce::NonceSource;
use crate::header::{FormatVersion, KeySize};

/// How a new container is written.
///
/// Defaults: newest version (v1.5), AES-256, no file name, this device's nonce.
///
/// # Thread Safety
///
/// Plain data; `Send + Sync`, cheap to clone and share across batch jobs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodeOptions {
    version: FormatVersion,
    key_size: KeySize,
    file_name: Option<String>,
    nonce: NonceSource,
}

impl EncodeOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Target container version. Legacy versions are supported for compatibility.
    #[must_use]
    pub fn with_version(mut self, version: FormatVersion) -> Self {
        self.version = version;
        self
    }

    #[must_use]
    pub fn with_key_size(mut self, key_size: KeySize) -> Self {
        self.key_size = key_size;
        self
    }

    /// Original file name recorded in v1.1+ headers (ignored by v1.0).
    #[must_use]
    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_nonce_source(mut self, nonce: NonceSource) -> Self {
        self.nonce = nonce;
        self
    }

    /// Shortcut for `with_nonce_source(NonceSource::Fixed(bytes))`.
    #[must_use]
    pub fn with_fixed_nonce(self, bytes: [u8; NONCE_SIZE]) -> Self {
        self.with_nonce_source(NonceSource::Fixed(bytes))
    }

    pub const fn version(&self) -> FormatVersion {
        self.version
    }

    pub const fn key_size(&self) -> KeySize {
        self.key_size
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn nonce_source(&self) -> &NonceSource {
        &self.nonce
    }
}
