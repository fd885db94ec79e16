//! src/crypto/kdf/padded.rs
//! Truncate-or-pad password → AES key derivation

use crate::aliases::{PasswordString, SessionKey};
use crate::consts::KEY_PAD_CHAR;
use crate::header::KeySize;
use std::iter;

/// Derive the AES key for `key_size` from a password.
///
/// With `N = key_size.bytes()`:
/// - the first `N` characters are kept, or the password is right-padded with
///   `'0'` up to `N` characters;
/// - the result is encoded as UTF-8 and cut to `N` bytes, so multi-byte
///   characters can never produce an over-long key.
///
/// Deterministic and infallible; an empty password yields `N` ASCII zeros.
/// Two passwords sharing the same first `N` characters derive the same key.
///
/// # Example
///
/// ```
/// use slecrypt::aliases::PasswordString;
/// use slecrypt::header::KeySize;
/// use slecrypt::derive_padded_key;
///
/// let key = derive_padded_key(&PasswordString::new("pw".to_string()), KeySize::Aes128);
/// assert_eq!(key.expose_secret().as_slice(), b"pw00000000000000");
/// ```
#[inline]
pub fn derive_padded_key(password: &PasswordString, key_size: KeySize) -> SessionKey {
    let n = key_size.bytes();

    let fitted: String = password
        .expose_secret()
        .chars()
        .chain(iter::repeat(KEY_PAD_CHAR))
        .take(n)
        .collect();

    let mut key = fitted.into_bytes();
    key.truncate(n);
    SessionKey::new(key)
}
