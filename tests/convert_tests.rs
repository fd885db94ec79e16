//! tests/convert_tests.rs
//! Legacy → v1.5 conversion

mod common;
use common::{decode_options, encode_options, lock, password, payload, TEST_PASSWORD};

use slecrypt::{convert_to_latest, read_version, FormatVersion, KeySize, SleError, SleReader};
use std::io::{Cursor, Read};

fn read_all(container: &[u8], pw: &slecrypt::aliases::PasswordString) -> Vec<u8> {
    let mut reader = SleReader::open_with(Cursor::new(container), pw, &decode_options()).unwrap();
    let mut out = Vec::<u8>::new();
    reader.read_to_end(&mut out).unwrap();
    out
}

#[test]
fn legacy_containers_convert_with_new_password() {
    let plain = payload(70_001);
    for version in [FormatVersion::V1_0, FormatVersion::V1_1] {
        let legacy = lock(&plain, TEST_PASSWORD, &encode_options(version));
        let mut converted = Vec::<u8>::new();
        let new_pw = password("fresh password");

        let generated = convert_to_latest(
            Cursor::new(&legacy),
            &mut converted,
            &password(TEST_PASSWORD),
            Some(&new_pw),
            &decode_options(),
            &encode_options(version),
        )
        .unwrap();
        assert!(generated.is_none());

        assert_eq!(read_version(Cursor::new(&converted)).unwrap(), FormatVersion::V1_5);
        // 70_001 is not block-aligned: v1.0 padding survives the conversion.
        let out = read_all(&converted, &new_pw);
        assert_eq!(&out[..plain.len()], &plain[..], "{version:?}");
        assert!(out[plain.len()..].iter().all(|&b| b == 0));
    }
}

#[test]
fn missing_or_empty_password_generates_one() {
    let legacy = lock(b"secret", TEST_PASSWORD, &encode_options(FormatVersion::V1_1));
    for new_pw in [None, Some(password(""))] {
        let mut converted = Vec::<u8>::new();
        let generated = convert_to_latest(
            Cursor::new(&legacy),
            &mut converted,
            &password(TEST_PASSWORD),
            new_pw.as_ref(),
            &decode_options(),
            &encode_options(FormatVersion::V1_5).with_key_size(KeySize::Aes192),
        )
        .unwrap()
        .unwrap();

        assert_eq!(generated.expose_secret().len(), 24);
        assert_eq!(read_all(&converted, &generated), b"secret");
    }
}

#[test]
fn wrong_old_password_is_reported() {
    let legacy = lock(b"secret", TEST_PASSWORD, &encode_options(FormatVersion::V1_0));
    let err = convert_to_latest(
        Cursor::new(&legacy),
        Vec::<u8>::new(),
        &password("wrong"),
        Some(&password("new")),
        &decode_options(),
        &encode_options(FormatVersion::V1_5),
    )
    .err()
    .expect("conversion must fail");
    assert!(matches!(err, SleError::WrongPassword));
}
