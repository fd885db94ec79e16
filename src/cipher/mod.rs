// src/cipher/mod.rs

//! Per-version cipher strategy.
//!
//! | Version | Mode                       | Padding | IV / nonce                      | Seekable |
//! |---------|----------------------------|---------|---------------------------------|----------|
//! | v1.0    | AES-CBC                    | zeros   | fixed ASCII IV                  | no       |
//! | v1.1    | AES-CBC                    | PKCS#7  | fixed ASCII IV                  | no       |
//! | v1.5    | counter mode over AES-ECB  | none    | device nonce ‖ LE block index   | yes      |
//!
//! The strategy is chosen once from the header; the read and write paths never
//! re-check the version.

pub mod cbc;
pub mod ctr;

pub use cbc::{CbcDecryptor, CbcEncryptor, Padding};
pub use ctr::CounterKeystream;

use crate::aliases::{Iv16, PasswordString};
use crate::consts::LEGACY_IV;
use crate::crypto::block::BlockCipher;
use crate::crypto::kdf::padded::derive_padded_key;
use crate::crypto::nonce::NonceSource;
use crate::error::SleError;
use crate::header::{FormatVersion, Header};
use tracing::debug;

/// Cipher construction for one container.
#[derive(Debug)]
pub enum CipherStrategy {
    /// v1.0 / v1.1: CBC from the fixed IV.
    Cbc { cipher: BlockCipher, padding: Padding },
    /// v1.5: XOR with the counter keystream.
    Counter(CounterKeystream),
}

impl CipherStrategy {
    /// Derive the key and build the strategy for `header`.
    ///
    /// The nonce source is only consulted for v1.5. Fails before any I/O on
    /// an unusable key size or an unavailable device id.
    pub fn for_header(
        header: &Header,
        password: &PasswordString,
        nonce: &NonceSource,
    ) -> Result<Self, SleError> {
        let key = derive_padded_key(password, header.key_size());
        let cipher = BlockCipher::new(&key, header.key_size())?;

        let strategy = match header.version() {
            FormatVersion::V1_0 => CipherStrategy::Cbc {
                cipher,
                padding: Padding::Zeros,
            },
            FormatVersion::V1_1 => CipherStrategy::Cbc {
                cipher,
                padding: Padding::Pkcs7,
            },
            FormatVersion::V1_5 => {
                let nonce = nonce.resolve()?;
                CipherStrategy::Counter(CounterKeystream::new(cipher, &nonce))
            }
        };

        debug!(
            version = ?header.version(),
            key_bits = header.key_size().bits(),
            seekable = header.version().is_seekable(),
            "Cipher strategy selected"
        );
        Ok(strategy)
    }

    /// The fixed IV both CBC revisions chain from.
    pub fn legacy_iv() -> Iv16 {
        Iv16::new(LEGACY_IV)
    }
}
