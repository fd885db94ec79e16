// src/crypto/rng.rs
//! OS randomness for generated passwords

use crate::aliases::PasswordString;
use crate::error::SleError;
use rand::{rngs::OsRng, TryRngCore};
use std::io;

/// Generate a random lowercase-hex password of exactly `chars` characters.
///
/// Hex keeps every character one UTF-8 byte, so the password maps onto the
/// derived key byte-for-byte when `chars` equals the key length.
pub fn random_hex_password(chars: usize) -> Result<PasswordString, SleError> {
    let mut bytes = vec![0u8; chars.div_ceil(2)];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| SleError::Io(io::Error::other(e)))?;

    let mut password = hex::encode(&bytes);
    password.truncate(chars);
    Ok(PasswordString::new(password))
}
