//! src/builders/decode_options.rs
//! Options for opening a container

use crate::consts::NONCE_SIZE;
use crate::crypto::nonce::NonceSource;

/// How an existing container is opened.
///
/// Only v1.5 containers use any of this; the nonce is resolved once at open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    nonce: NonceSource,
}

impl DecodeOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_nonce_source(mut self, nonce: NonceSource) -> Self {
        self.nonce = nonce;
        self
    }

    #[must_use]
    pub fn with_fixed_nonce(self, bytes: [u8; NONCE_SIZE]) -> Self {
        self.with_nonce_source(NonceSource::Fixed(bytes))
    }

    pub fn nonce_source(&self) -> &NonceSource {
        &self.nonce
    }
}
