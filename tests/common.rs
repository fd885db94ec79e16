//! tests/common.rs
//! Common constants and utilities shared across test files

use slecrypt::aliases::PasswordString;
use slecrypt::{decrypt, encrypt, DecodeOptions, EncodeOptions, FormatVersion};
use std::io::Cursor;

/// Standard test password used across test files
#[allow(dead_code)] // Used across multiple test files
pub const TEST_PASSWORD: &str = "pw";

/// Fixed counter nonce so tests never depend on the host's device id
#[allow(dead_code)]
pub const TEST_NONCE: [u8; 8] = *b"device01";

#[allow(dead_code)]
pub const TEST_DATA: &[u8] = b"HELLO_WORLD_TEST";

/// Plaintext sizes around the block boundary, plus one multi-chunk payload
#[allow(dead_code)]
pub const TEST_SIZES: &[usize] = &[0, 1, 15, 16, 17, 1_000_000];

#[allow(dead_code)]
pub fn password(text: &str) -> PasswordString {
    PasswordString::new(text.to_string())
}

#[allow(dead_code)]
pub fn encode_options(version: FormatVersion) -> EncodeOptions {
    EncodeOptions::new()
        .with_version(version)
        .with_fixed_nonce(TEST_NONCE)
}

#[allow(dead_code)]
pub fn decode_options() -> DecodeOptions {
    DecodeOptions::new().with_fixed_nonce(TEST_NONCE)
}

/// Deterministic test payload that differs from block to block
#[allow(dead_code)]
pub fn payload(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i.wrapping_mul(31) ^ (i >> 8)) as u8).collect()
}

#[allow(dead_code)]
pub fn lock(plain: &[u8], pw: &str, options: &EncodeOptions) -> Vec<u8> {
    let mut out = Vec::<u8>::new();
    encrypt(Cursor::new(plain), &mut out, &password(pw), options).unwrap();
    out
}

#[allow(dead_code)]
pub fn unlock(container: &[u8], pw: &str) -> Vec<u8> {
    let mut out = Vec::<u8>::new();
    decrypt(Cursor::new(container), &mut out, &password(pw), &decode_options()).unwrap();
    out
}

/// What a decoder yields for `plain`: v1.0 keeps zero padding up to the block boundary.
#[allow(dead_code)]
pub fn expected_plaintext(plain: &[u8], version: FormatVersion) -> Vec<u8> {
    let mut expected = plain.to_vec();
    if version == FormatVersion::V1_0 {
        expected.resize(plain.len().div_ceil(16) * 16, 0);
    }
    expected
}
