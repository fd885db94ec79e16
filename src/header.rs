//! # Header Codec
//!
//! Parses and serializes the container preamble. All integers are little-endian.
//!
//! ```text
//! offset  size  field
//!  0       3    magic          "SLE"
//!  3       1    version tag    0x01 (v1.0) | 0x02 (v1.1) | 0x03 (v1.5)
//!  4       2    key size bits  128 | 192 | 256
//!  6       4    header length  total preamble size in bytes
//! 10       ...  version tail   v1.0: empty
//!                              v1.1, v1.5: u16 name length + UTF-8 file name
//! ```
//!
//! The codec has no cipher knowledge.

use crate::consts::{
    FILE_NAME_LEN_FIELD, HEADER_PREFIX_LEN, MAX_HEADER_LEN, SLE_MAGIC, TAG_V1_0, TAG_V1_1,
    TAG_V1_5,
};
use crate::error::SleError;
use std::io::{Read, Write};

/// Container format revision.
///
/// Fixed at creation; selects the header tail, cipher mode, padding and seekability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum FormatVersion {
    /// AES-CBC with zero padding.
    V1_0,
    /// AES-CBC with PKCS#7 padding.
    V1_1,
    /// AES counter mode over ECB; random access.
    #[default]
    V1_5,
}

impl FormatVersion {
    /// The newest revision, produced by default.
    pub const LATEST: FormatVersion = FormatVersion::V1_5;

    /// Every known revision, oldest first.
    pub const ALL: [FormatVersion; 3] = [FormatVersion::V1_0, FormatVersion::V1_1, FormatVersion::V1_5];

    /// Version byte stored at header offset 3.
    pub const fn tag(self) -> u8 {
        match self {
            FormatVersion::V1_0 => TAG_V1_0,
            FormatVersion::V1_1 => TAG_V1_1,
            FormatVersion::V1_5 => TAG_V1_5,
        }
    }

    /// Map a stored version byte back; unknown tags are [`SleError::UnsupportedVersion`].
    pub fn from_tag(tag: u8) -> Result<Self, SleError> {
        match tag {
            TAG_V1_0 => Ok(FormatVersion::V1_0),
            TAG_V1_1 => Ok(FormatVersion::V1_1),
            TAG_V1_5 => Ok(FormatVersion::V1_5),
            other => Err(SleError::UnsupportedVersion(other)),
        }
    }

    /// Only the counter-mode revision supports `Seek`, `len` and `position`.
    pub const fn is_seekable(self) -> bool {
        matches!(self, FormatVersion::V1_5)
    }

    /// Whether the header carries the original file name record.
    pub const fn has_file_name(self) -> bool {
        !matches!(self, FormatVersion::V1_0)
    }
}

/// AES key size recorded in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeySize {
    Aes128,
    Aes192,
    #[default]
    Aes256,
}

impl KeySize {
    /// Key size in bits, as stored in the header.
    pub const fn bits(self) -> u16 {
        match self {
            KeySize::Aes128 => 128,
            KeySize::Aes192 => 192,
            KeySize::Aes256 => 256,
        }
    }

    /// Key length in bytes (`bits / 8`).
    pub const fn bytes(self) -> usize {
        self.bits() as usize / 8
    }

    /// Accepts only 128, 192 or 256.
    pub fn from_bits(bits: u16) -> Result<Self, SleError> {
        match bits {
            128 => Ok(KeySize::Aes128),
            192 => Ok(KeySize::Aes192),
            256 => Ok(KeySize::Aes256),
            other => Err(SleError::Config(format!(
                "invalid key size {other} (expected 128, 192 or 256)"
            ))),
        }
    }
}

/// Parsed container preamble.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    version: FormatVersion,
    key_size: KeySize,
    file_name: Option<String>,
    header_len: u32,
}

impl Header {
    /// Build a header for a new container, computing its stored length.
    ///
    /// The file name is dropped for v1.0, whose layout has no room for it.
    pub fn new(
        version: FormatVersion,
        key_size: KeySize,
        file_name: Option<&str>,
    ) -> Result<Self, SleError> {
        let file_name = if version.has_file_name() {
            file_name.map(str::to_owned)
        } else {
            None
        };
        let header_len = computed_len(version, file_name.as_deref().map_or(0, str::len))?;
        Ok(Self {
            version,
            key_size,
            file_name,
            header_len,
        })
    }

    pub fn version(&self) -> FormatVersion {
        self.version
    }

    pub fn key_size(&self) -> KeySize {
        self.key_size
    }

    /// Original file name stored by v1.1+ containers. `None` for v1.0 or an empty record.
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    /// Total preamble size in bytes.
    pub fn header_len(&self) -> u32 {
        self.header_len
    }

    /// Raw offset of ciphertext byte 0 (header plus verification block).
    pub fn payload_offset(&self) -> u64 {
        u64::from(self.header_len) + crate::consts::BLOCK_SIZE as u64
    }

    /// Read exactly `header_len` bytes from a reader positioned at the container start.
    pub fn parse<R: Read>(reader: &mut R) -> Result<Self, SleError> {
        let mut prefix = [0u8; HEADER_PREFIX_LEN];
        reader.read_exact(&mut prefix).map_err(short_header)?;

        if prefix[..3] != SLE_MAGIC {
            return Err(SleError::Header(
                "Not an SLE container: invalid magic".into(),
            ));
        }

        let version = FormatVersion::from_tag(prefix[3])?;
        let bits = u16::from_le_bytes([prefix[4], prefix[5]]);
        let key_size = KeySize::from_bits(bits)
            .map_err(|_| SleError::Header(format!("invalid key size field: {bits}")))?;
        let header_len = u32::from_le_bytes([prefix[6], prefix[7], prefix[8], prefix[9]]);

        if header_len > MAX_HEADER_LEN {
            return Err(SleError::Header(format!(
                "header length {header_len} exceeds limit"
            )));
        }

        let file_name = if version.has_file_name() {
            let mut len_field = [0u8; FILE_NAME_LEN_FIELD];
            reader.read_exact(&mut len_field).map_err(short_header)?;
            let name_len = u16::from_le_bytes(len_field) as usize;

            if computed_len(version, name_len).ok() != Some(header_len) {
                return Err(SleError::Header(format!(
                    "stored header length {header_len} does not match file name length {name_len}"
                )));
            }

            let mut name = vec![0u8; name_len];
            reader.read_exact(&mut name).map_err(short_header)?;
            let name = String::from_utf8(name)
                .map_err(|_| SleError::Header("file name is not valid UTF-8".into()))?;
            (!name.is_empty()).then_some(name)
        } else {
            if header_len != HEADER_PREFIX_LEN as u32 {
                return Err(SleError::Header(format!(
                    "v1.0 header length must be {HEADER_PREFIX_LEN}, found {header_len}"
                )));
            }
            None
        };

        Ok(Self {
            version,
            key_size,
            file_name,
            header_len,
        })
    }

    /// Serialize to exactly `header_len` bytes.
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.header_len as usize);
        out.extend_from_slice(&SLE_MAGIC);
        out.push(self.version.tag());
        out.extend_from_slice(&self.key_size.bits().to_le_bytes());
        out.extend_from_slice(&self.header_len.to_le_bytes());

        if self.version.has_file_name() {
            let name = self.file_name.as_deref().unwrap_or_default().as_bytes();
            // `new` bounded the name through `computed_len`
            out.extend_from_slice(&(name.len() as u16).to_le_bytes());
            out.extend_from_slice(name);
        }
        debug_assert_eq!(out.len(), self.header_len as usize);
        out
    }

    #[inline]
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), SleError> {
        writer.write_all(&self.serialize()).map_err(SleError::Io)
    }
}

/// Header length implied by a version and its file name byte length.
fn computed_len(version: FormatVersion, name_len: usize) -> Result<u32, SleError> {
    if !version.has_file_name() {
        return Ok(HEADER_PREFIX_LEN as u32);
    }
    let total = HEADER_PREFIX_LEN + FILE_NAME_LEN_FIELD + name_len;
    // Bounded by the same MAX_HEADER_LEN that `parse` enforces.
    if name_len > u16::MAX as usize || total > MAX_HEADER_LEN as usize {
        return Err(SleError::Config(format!(
            "file name too long ({name_len} bytes)"
        )));
    }
    Ok(total as u32)
}

fn short_header(e: std::io::Error) -> SleError {
    if e.kind() == std::io::ErrorKind::UnexpectedEof {
        SleError::Header("truncated header".into())
    } else {
        SleError::Io(e)
    }
}

/// Read and validate only the container version.
///
/// No password is needed; handy for listing locked files. Reads at most the
/// 10-byte fixed prefix.
///
/// # Example
///
/// ```
/// use slecrypt::header::{read_version, FormatVersion};
/// use std::io::Cursor;
///
/// let prefix = b"SLE\x03\x00\x01\x0c\x00\x00\x00";
/// assert_eq!(read_version(Cursor::new(prefix))?, FormatVersion::V1_5);
/// # Ok::<(), slecrypt::SleError>(())
/// ```
pub fn read_version<R: Read>(mut reader: R) -> Result<FormatVersion, SleError> {
    let mut prefix = [0u8; 4];
    reader.read_exact(&mut prefix).map_err(short_header)?;

    if prefix[..3] != SLE_MAGIC {
        return Err(SleError::Header(
            "Not an SLE container: invalid magic".into(),
        ));
    }
    FormatVersion::from_tag(prefix[3])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn real_world_prefixes() {
        let cases = &[
            ("534c4501000100", FormatVersion::V1_0),
            ("534c4502000100", FormatVersion::V1_1),
            ("534c4503000100", FormatVersion::V1_5),
        ];

        for &(hex, expected) in cases {
            let bytes = hex::decode(hex).unwrap();
            assert_eq!(read_version(Cursor::new(&bytes)).unwrap(), expected);
        }
    }

    #[test]
    fn v1_0_layout_is_ten_bytes() {
        let header = Header::new(FormatVersion::V1_0, KeySize::Aes128, Some("ignored.txt")).unwrap();
        let bytes = header.serialize();
        assert_eq!(hex::encode(&bytes), "534c450180000a000000");
        assert_eq!(header.file_name(), None);
        assert_eq!(header.payload_offset(), 26);
    }

    #[test]
    fn v1_5_layout_carries_file_name() {
        let header = Header::new(FormatVersion::V1_5, KeySize::Aes256, Some("a.txt")).unwrap();
        let bytes = header.serialize();
        assert_eq!(hex::encode(&bytes), "534c45030001110000000500612e747874");
        assert_eq!(header.header_len(), 17);

        let parsed = Header::parse(&mut Cursor::new(&bytes)).unwrap();
        assert_eq!(parsed, header);
    }

    #[test]
    fn parse_stops_at_header_end() {
        let header = Header::new(FormatVersion::V1_1, KeySize::Aes192, None).unwrap();
        let mut bytes = header.serialize();
        bytes.extend_from_slice(b"payload");

        let mut cursor = Cursor::new(&bytes);
        Header::parse(&mut cursor).unwrap();
        assert_eq!(cursor.position(), 12);
    }

    #[test]
    fn unknown_tag_is_unsupported() {
        let err = read_version(Cursor::new(b"SLE\x07")).unwrap_err();
        assert!(matches!(err, SleError::UnsupportedVersion(7)));
    }

    #[test]
    fn name_length_is_bounded_by_header_limit() {
        let largest = MAX_HEADER_LEN as usize - HEADER_PREFIX_LEN - FILE_NAME_LEN_FIELD;
        let name = "n".repeat(largest);
        let header = Header::new(FormatVersion::V1_1, KeySize::Aes128, Some(name.as_str())).unwrap();
        assert_eq!(header.header_len(), MAX_HEADER_LEN);
        let parsed = Header::parse(&mut Cursor::new(header.serialize())).unwrap();
        assert_eq!(parsed, header);

        let err = Header::new(FormatVersion::V1_5, KeySize::Aes128, Some(format!("{name}n").as_str()))
            .unwrap_err();
        assert!(matches!(err, SleError::Config(_)));
    }

    #[test]
    fn mismatched_length_is_rejected() {
        let mut bytes = Header::new(FormatVersion::V1_5, KeySize::Aes256, Some("x"))
            .unwrap()
            .serialize();
        bytes[6] = 0x20;
        let err = Header::parse(&mut Cursor::new(&bytes)).unwrap_err();
        assert!(matches!(err, SleError::Header(_)));
    }

    #[test]
    fn invalid_key_size_field_is_format_error() {
        let bytes = hex::decode("534c450140000a000000").unwrap();
        let err = Header::parse(&mut Cursor::new(&bytes)).unwrap_err();
        assert!(err.is_format_error());
    }
}
