//! src/decryptor/legacy.rs
//! Forward-only CBC payload reader for v1.0 / v1.1
//!
//! Ciphertext is pulled in chunks. The trailing block of each chunk is held
//! back until more input proves it is not the final block, so padding is only
//! ever stripped from the real end of the chain.

use crate::cipher::{CbcDecryptor, Padding};
use crate::consts::{BLOCK_SIZE, COPY_CHUNK_SIZE};
use crate::error::SleError;
use crate::utils::read_fill;
use std::io::Read;

pub(crate) struct CbcReader<R> {
    chain: CbcDecryptor,
    padding: Padding,
    ciphertext: Vec<u8>,
    plaintext: Vec<u8>,
    plain_pos: usize,
    finished: bool,
    inner: R,
}

impl<R: Read> CbcReader<R> {
    /// `chain` must already have consumed the verification block.
    pub(crate) fn new(inner: R, chain: CbcDecryptor, padding: Padding) -> Self {
        Self {
            chain,
            padding,
            ciphertext: Vec::with_capacity(COPY_CHUNK_SIZE + BLOCK_SIZE),
            plaintext: Vec::with_capacity(COPY_CHUNK_SIZE + BLOCK_SIZE),
            plain_pos: 0,
            finished: false,
            inner,
        }
    }

    pub(crate) fn read_plain(&mut self, buf: &mut [u8]) -> Result<usize, SleError> {
        if buf.is_empty() {
            return Ok(0);
        }
        loop {
            let available = self.plaintext.len() - self.plain_pos;
            if available > 0 {
                let n = available.min(buf.len());
                buf[..n].copy_from_slice(&self.plaintext[self.plain_pos..self.plain_pos + n]);
                self.plain_pos += n;
                return Ok(n);
            }
            if self.finished {
                return Ok(0);
            }
            self.decrypt_chunk()?;
        }
    }

    fn decrypt_chunk(&mut self) -> Result<(), SleError> {
        self.plaintext.clear();
        self.plain_pos = 0;

        let start = self.ciphertext.len();
        self.ciphertext.resize(start + COPY_CHUNK_SIZE, 0);
        let n = read_fill(&mut self.inner, &mut self.ciphertext[start..])?;
        self.ciphertext.truncate(start + n);
        let eof = n < COPY_CHUNK_SIZE;

        let usable = if eof {
            if self.ciphertext.len() % BLOCK_SIZE != 0 {
                return Err(SleError::Corrupt(
                    "ciphertext length is not a multiple of the block size".into(),
                ));
            }
            self.ciphertext.len()
        } else {
            (self.ciphertext.len() / BLOCK_SIZE).saturating_sub(1) * BLOCK_SIZE
        };

        for chunk in self.ciphertext[..usable].chunks_exact(BLOCK_SIZE) {
            let mut block = [0u8; BLOCK_SIZE];
            block.copy_from_slice(chunk);
            self.chain.decrypt_block(&mut block);
            self.plaintext.extend_from_slice(&block);
        }
        self.ciphertext.drain(..usable);

        if eof {
            self.finished = true;
            match self.plaintext.len().checked_sub(BLOCK_SIZE) {
                Some(last) => {
                    let mut block = [0u8; BLOCK_SIZE];
                    block.copy_from_slice(&self.plaintext[last..]);
                    let keep = self.padding.unpad(&block)?;
                    self.plaintext.truncate(last + keep);
                }
                // A held-back block always reaches this point, so an empty
                // plaintext here means the payload had no blocks at all.
                None if self.padding == Padding::Pkcs7 => {
                    return Err(SleError::Corrupt("missing PKCS#7 final block".into()));
                }
                None => {}
            }
        }
        Ok(())
    }
}

impl<R> CbcReader<R> {
    pub(crate) fn into_inner(self) -> R {
        self.inner
    }
}
