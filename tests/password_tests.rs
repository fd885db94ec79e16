//! tests/password_tests.rs
//! Verification block behaviour

mod common;
use common::{decode_options, encode_options, lock, password, TEST_DATA, TEST_PASSWORD};

use slecrypt::{decrypt, DecodeOptions, FormatVersion, KeySize, SleError, SleReader};
use std::io::{Cursor, Read};

#[test]
fn hello_world_scenario() {
    let options = encode_options(FormatVersion::V1_5).with_key_size(KeySize::Aes256);
    let container = lock(TEST_DATA, TEST_PASSWORD, &options);

    let err = SleReader::open_with(Cursor::new(&container), &password("wrong"), &decode_options())
        .unwrap_err();
    assert!(matches!(err, SleError::WrongPassword));

    let mut reader =
        SleReader::open_with(Cursor::new(&container), &password(TEST_PASSWORD), &decode_options())
            .unwrap();
    let mut out = Vec::<u8>::new();
    reader.read_to_end(&mut out).unwrap();
    assert_eq!(out, TEST_DATA);
}

#[test]
fn wrong_password_rejected_for_every_version() {
    for version in FormatVersion::ALL {
        // Payloads below one block must not surface as padding errors.
        for size in [0usize, 5, 64] {
            let container = lock(&vec![9u8; size], "correct horse", &encode_options(version));
            let mut out = Vec::<u8>::new();
            let err = decrypt(
                Cursor::new(&container),
                &mut out,
                &password("battery staple"),
                &decode_options(),
            )
            .unwrap_err();
            assert!(matches!(err, SleError::WrongPassword), "{version:?} {size}");
            assert!(out.is_empty());
        }
    }
}

#[test]
fn passwords_sharing_the_key_prefix_are_equivalent() {
    // Only the first key-length characters reach the key.
    let options = encode_options(FormatVersion::V1_1).with_key_size(KeySize::Aes128);
    let container = lock(b"data", "0123456789abcdefTAIL-A", &options);
    let mut out = Vec::<u8>::new();
    decrypt(
        Cursor::new(&container),
        &mut out,
        &password("0123456789abcdefTAIL-B"),
        &decode_options(),
    )
    .unwrap();
    assert_eq!(out, b"data");
}

#[test]
fn v1_5_needs_the_locking_device_nonce() {
    let container = lock(TEST_DATA, TEST_PASSWORD, &encode_options(FormatVersion::V1_5));
    let other_device = DecodeOptions::new().with_fixed_nonce(*b"device02");
    let err = SleReader::open_with(Cursor::new(&container), &password(TEST_PASSWORD), &other_device)
        .unwrap_err();
    assert!(matches!(err, SleError::WrongPassword));
}

#[test]
fn device_id_source_matches_on_both_sides() {
    let options = encode_options(FormatVersion::V1_5)
        .with_nonce_source(slecrypt::NonceSource::DeviceId("laptop-7".into()));
    let container = lock(TEST_DATA, TEST_PASSWORD, &options);

    let decode = DecodeOptions::new()
        .with_nonce_source(slecrypt::NonceSource::DeviceId("  laptop-7\n".into()));
    let mut reader =
        SleReader::open_with(Cursor::new(&container), &password(TEST_PASSWORD), &decode).unwrap();
    let mut out = Vec::<u8>::new();
    reader.read_to_end(&mut out).unwrap();
    assert_eq!(out, TEST_DATA);
}

#[test]
fn wrong_password_maps_to_permission_denied_io_error() {
    let container = lock(TEST_DATA, TEST_PASSWORD, &encode_options(FormatVersion::V1_1));
    let err: std::io::Error =
        SleReader::open_with(Cursor::new(&container), &password("nope"), &decode_options())
            .unwrap_err()
            .into();
    assert_eq!(err.kind(), std::io::ErrorKind::PermissionDenied);
}

#[test]
fn missing_verification_block_is_a_format_error() {
    let container = lock(b"", TEST_PASSWORD, &encode_options(FormatVersion::V1_5));
    let truncated = &container[..container.len() - 4];
    let err = SleReader::open_with(
        Cursor::new(truncated),
        &password(TEST_PASSWORD),
        &decode_options(),
    )
    .unwrap_err();
    assert!(matches!(err, SleError::Header(_)));
}

#[test]
fn empty_password_is_refused_on_open() {
    for version in FormatVersion::ALL {
        let container = lock(TEST_DATA, TEST_PASSWORD, &encode_options(version));
        let mut out = Vec::<u8>::new();
        let err = decrypt(Cursor::new(&container), &mut out, &password(""), &decode_options())
            .unwrap_err();
        assert!(matches!(err, SleError::Config(_)), "{version:?}");
        assert!(out.is_empty());
    }
}
