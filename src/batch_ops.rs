//! src/batch_ops.rs
//! Parallel lock/unlock of many independent containers (feature `batch-ops`)
//!
//! Every pair gets its own stream instance; nothing is shared between jobs
//! except the read-only password and options. The first error aborts the batch.

use crate::aliases::PasswordString;
use crate::builders::{DecodeOptions, EncodeOptions};
use crate::{decrypt, encrypt, SleError};
use rayon::prelude::*;
use std::io::{Read, Write};

/// Encrypt every `(source, destination)` pair in parallel.
///
/// Returns the plaintext byte count of each pair, in input order.
pub fn encrypt_batch<R, W>(
    batch: &mut [(R, W)],
    password: &PasswordString,
    options: &EncodeOptions,
) -> Result<Vec<u64>, SleError>
where
    R: Read + Send,
    W: Write + Send,
{
    batch
        .par_iter_mut()
        .map(|(src, dst)| encrypt(src, dst, password, options))
        .collect()
}

/// Decrypt every `(container, destination)` pair in parallel.
pub fn decrypt_batch<R, W>(
    batch: &mut [(R, W)],
    password: &PasswordString,
    options: &DecodeOptions,
) -> Result<Vec<u64>, SleError>
where
    R: Read + Send,
    W: Write + Send,
{
    batch
        .par_iter_mut()
        .map(|(src, dst)| decrypt(src, dst, password, options))
        .collect()
}
