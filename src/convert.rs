//! src/convert.rs
//! Re-lock any container as the newest version
//!
//! Legacy containers (v1.0, v1.1) are forward-only and cannot be seeked.
//! `convert_to_latest` streams one through decrypt and encrypt at the same
//! time, so memory stays constant regardless of file size.

use crate::aliases::PasswordString;
use crate::builders::{DecodeOptions, EncodeOptions};
use crate::crypto::rng::random_hex_password;
use crate::error::SleError;
use crate::header::FormatVersion;
use crate::{decrypt, encrypt};
use pipe::pipe;
use std::io::{self, Read, Write};
use std::thread;
use tracing::debug;

/// Decrypt `input` with `old_password` and write it to `output` as a v1.5 container.
///
/// `encode` supplies key size, file name and nonce; its version is ignored.
///
/// # Passwords
/// - `new_password = Some(pw)` re-locks with `pw`
/// - `None` or an empty password generates a random hex password as long as
///   the key, so it uses the whole key space
///
/// On a wrong old password nothing is decrypted, but `output` may already
/// hold the new header; discard it.
///
/// # Returns
/// - `Ok(Some(generated))` if a random password was created
/// - `Ok(None)` if a password was supplied
pub fn convert_to_latest<R, W>(
    input: R,
    output: W,
    old_password: &PasswordString,
    new_password: Option<&PasswordString>,
    decode: &DecodeOptions,
    encode: &EncodeOptions,
) -> Result<Option<PasswordString>, SleError>
where
    R: Read + Send,
    W: Write + Send,
{
    let encode = encode.clone().with_version(FormatVersion::LATEST);

    let generated = match new_password {
        Some(pw) if !pw.expose_secret().is_empty() => None,
        _ => Some(random_hex_password(encode.key_size().bytes())?),
    };
    let new_pass = match (&generated, new_password) {
        (Some(pw), _) | (None, Some(pw)) => pw,
        (None, None) => return Err(SleError::Config("no password to re-lock with".into())),
    };

    let (plain_bytes, _) = thread::scope(|s| {
        let (pipe_reader, pipe_writer) = pipe();

        let decrypt_thread = s.spawn(move || decrypt(input, pipe_writer, old_password, decode));
        let encrypt_thread = s.spawn({
            let encode = &encode;
            move || encrypt(pipe_reader, output, new_pass, encode)
        });

        let decrypted = decrypt_thread.join().map_err(|_| panicked("decrypt"))?;
        let encrypted = encrypt_thread.join().map_err(|_| panicked("encrypt"))?;

        match (decrypted, encrypted) {
            (Ok(d), Ok(e)) => Ok((d, e)),
            // The decrypt side only sees a closed pipe; report why it closed.
            (Err(SleError::Io(e)), Err(enc)) if e.kind() == io::ErrorKind::BrokenPipe => {
                Err(enc)
            }
            (Err(e), _) | (Ok(_), Err(e)) => Err(e),
        }
    })?;

    debug!(
        bytes = plain_bytes,
        generated = generated.is_some(),
        "Container converted to newest version"
    );
    Ok(generated)
}

fn panicked(side: &str) -> SleError {
    SleError::Io(io::Error::other(format!("{side} thread panicked")))
}
