//! src/decryptor/decrypt.rs
//! Whole-container decryption into a writer

use crate::aliases::PasswordString;
use crate::builders::DecodeOptions;
use crate::consts::COPY_CHUNK_SIZE;
use crate::decryptor::reader::SleReader;
use crate::error::SleError;
use std::io::{Read, Write};
use tracing::debug;

/// Decrypt a complete container from `input` into `output`.
///
/// Works on sequential sources for every version. Returns the number of
/// plaintext bytes written. For v1.0 that count includes the zero padding up
/// to the next block boundary, which the format cannot tell apart from data.
#[inline(always)]
pub fn decrypt<R, W>(
    input: R,
    mut output: W,
    password: &PasswordString,
    options: &DecodeOptions,
) -> Result<u64, SleError>
where
    R: Read,
    W: Write,
{
    let mut reader = SleReader::from_reader(input, password, options)?;
    let version = reader.version();

    let mut buf = vec![0u8; COPY_CHUNK_SIZE];
    let mut total = 0u64;
    loop {
        let n = reader.read_plain(&mut buf)?;
        if n == 0 {
            break;
        }
        output.write_all(&buf[..n])?;
        total += n as u64;
    }
    output.flush()?;
    reader.close();

    debug!(?version, bytes = total, "Container decrypted");
    Ok(total)
}
