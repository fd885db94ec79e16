//! # Constants
//!
//! Wire-format constants of the SLE container. Changing any value here breaks
//! compatibility with existing containers.

/// Magic bytes at offset 0 of every container.
pub const SLE_MAGIC: [u8; 3] = *b"SLE";

/// Version tag of the oldest revision (AES-CBC, zero padding).
pub const TAG_V1_0: u8 = 0x01;

/// Version tag of the middle revision (AES-CBC, PKCS#7 padding).
pub const TAG_V1_1: u8 = 0x02;

/// Version tag of the newest revision (seekable AES counter mode).
pub const TAG_V1_5: u8 = 0x03;

/// Size of the fixed header prefix: magic, version tag, key size, header length.
pub const HEADER_PREFIX_LEN: usize = 10;

/// Size of the file-name length field in v1.1+ headers.
pub const FILE_NAME_LEN_FIELD: usize = 2;

/// Upper bound on the stored header length.
///
/// Rejects corrupt length fields before any allocation happens.
pub const MAX_HEADER_LEN: u32 = 64 * 1024;

/// AES block size in bytes. Also the size of the verification block.
pub const BLOCK_SIZE: usize = 16;

/// Plaintext of the verification block.
pub const PASSWORD_MARKER: [u8; BLOCK_SIZE] = *b"PASSWORD_CORRECT";

/// Fixed IV shared by both CBC revisions.
pub const LEGACY_IV: [u8; BLOCK_SIZE] = *b"HqVQ2YgUnUlRNp5Z";

/// Character used to right-pad short passwords during key derivation.
pub const KEY_PAD_CHAR: char = '0';

/// Length of the device-bound counter nonce.
pub const NONCE_SIZE: usize = 8;

/// Environment variable overriding the device identifier used for the nonce.
pub const DEVICE_ID_ENV: &str = "SLE_DEVICE_ID";

/// Salt passed to the machine fingerprint builder.
pub const DEVICE_ID_SALT: &str = "sle-container-nonce";

/// Chunk size used by the convenience copy loops.
pub const COPY_CHUNK_SIZE: usize = 64 * 1024;
