// src/lib.rs

//! Reader and writer for SLE encrypted file containers.
//!
//! A container is `[header][verification block][ciphertext]`. Three format
//! revisions exist: v1.0 and v1.1 use AES-CBC and are forward-only, v1.5 uses
//! a counter keystream over AES-ECB and supports random access.

pub mod aliases;
#[cfg(feature = "batch-ops")]
pub mod batch_ops;
pub mod builders;
pub mod cipher;
pub mod consts;
pub mod convert;
pub mod crypto;
pub mod decryptor;
pub mod encryptor;
pub mod error;
pub mod header;
pub mod utils;

// High-level API
pub use decryptor::{decrypt, SleReader, StreamState};
pub use encryptor::{encrypt, SleWriter};
pub use error::SleError;

pub use builders::{DecodeOptions, EncodeOptions};
pub use crypto::nonce::NonceSource;
pub use header::{read_version, FormatVersion, Header, KeySize};

// Key derivation is public for tools that inspect keys or containers directly.
pub use crypto::kdf::padded::derive_padded_key;

#[cfg(feature = "batch-ops")]
pub use batch_ops::{decrypt_batch, encrypt_batch};

pub use convert::convert_to_latest;
