//! src/encryptor/encrypt.rs
//! Whole-container encryption from a reader

use crate::aliases::PasswordString;
use crate::builders::EncodeOptions;
use crate::consts::COPY_CHUNK_SIZE;
use crate::encryptor::writer::SleWriter;
use crate::error::SleError;
use std::io::{self, Read, Write};

/// Encrypt everything readable from `input` into a new container on `output`.
///
/// Returns the number of plaintext bytes consumed.
#[inline(always)]
pub fn encrypt<R, W>(
    mut input: R,
    output: W,
    password: &PasswordString,
    options: &EncodeOptions,
) -> Result<u64, SleError>
where
    R: Read,
    W: Write,
{
    let mut writer = SleWriter::new(output, password, options)?;

    let mut buf = vec![0u8; COPY_CHUNK_SIZE];
    loop {
        let n = match input.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(SleError::Io(e)),
        };
        writer.write_plain(&buf[..n])?;
    }

    let total = writer.bytes_written();
    writer.finish()?;
    Ok(total)
}
