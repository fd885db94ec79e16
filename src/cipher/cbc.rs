//! src/cipher/cbc.rs
//! AES-CBC chaining and padding for v1.0 / v1.1 containers
//!
//! Both legacy revisions chain from the fixed ASCII IV. The verification
//! marker is the first plaintext block of the chain; padding covers the end of
//! the whole chain.

use crate::aliases::{Block16, Iv16};
use crate::consts::BLOCK_SIZE;
use crate::crypto::block::BlockCipher;
use crate::error::SleError;
use crate::utils::xor_blocks;

/// Final-block padding scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Padding {
    /// Fill with `0x00`; nothing is added when the data is block-aligned.
    /// Not removable on decode.
    Zeros,
    /// PKCS#7: always adds 1..=16 bytes.
    Pkcs7,
}

impl Padding {
    /// Pad the trailing partial block (`tail.len() < 16`).
    ///
    /// `None` means no final block is emitted.
    pub fn pad(self, tail: &[u8]) -> Option<[u8; BLOCK_SIZE]> {
        debug_assert!(tail.len() < BLOCK_SIZE);
        match self {
            Padding::Zeros if tail.is_empty() => None,
            Padding::Zeros => {
                let mut block = [0u8; BLOCK_SIZE];
                block[..tail.len()].copy_from_slice(tail);
                Some(block)
            }
            Padding::Pkcs7 => {
                let pad = (BLOCK_SIZE - tail.len()) as u8;
                let mut block = [pad; BLOCK_SIZE];
                block[..tail.len()].copy_from_slice(tail);
                Some(block)
            }
        }
    }

    /// Number of plaintext bytes to keep from the decrypted final block.
    pub fn unpad(self, block: &[u8; BLOCK_SIZE]) -> Result<usize, SleError> {
        match self {
            Padding::Zeros => Ok(BLOCK_SIZE),
            Padding::Pkcs7 => {
                let pad = block[BLOCK_SIZE - 1];
                if pad == 0 || pad as usize > BLOCK_SIZE {
                    return Err(SleError::Corrupt("invalid PKCS#7 padding".into()));
                }
                // Compare every padding byte before deciding.
                let diff = block[BLOCK_SIZE - pad as usize..]
                    .iter()
                    .fold(0u8, |acc, &b| acc | (b ^ pad));
                if diff != 0 {
                    return Err(SleError::Corrupt("corrupt PKCS#7 padding".into()));
                }
                Ok(BLOCK_SIZE - pad as usize)
            }
        }
    }
}

/// CBC encrypt direction. Holds the previous ciphertext block.
#[derive(Debug)]
pub struct CbcEncryptor {
    cipher: BlockCipher,
    prev: Block16,
}

impl CbcEncryptor {
    pub fn new(cipher: BlockCipher, iv: &Iv16) -> Self {
        Self {
            cipher,
            prev: Block16::new(*iv.expose_secret()),
        }
    }

    #[inline(always)]
    pub fn encrypt_block(&mut self, block: &mut [u8; BLOCK_SIZE]) {
        let plain = *block;
        xor_blocks(&plain, self.prev.expose_secret(), block);
        self.cipher.encrypt_block(block);
        self.prev.expose_secret_mut().copy_from_slice(block);
    }
}

/// CBC decrypt direction. Holds the previous ciphertext block.
#[derive(Debug)]
pub struct CbcDecryptor {
    cipher: BlockCipher,
    prev: Block16,
}

impl CbcDecryptor {
    pub fn new(cipher: BlockCipher, iv: &Iv16) -> Self {
        Self {
            cipher,
            prev: Block16::new(*iv.expose_secret()),
        }
    }

    #[inline(always)]
    pub fn decrypt_block(&mut self, block: &mut [u8; BLOCK_SIZE]) {
        let ciphertext = *block;
        self.cipher.decrypt_block(block);
        let decrypted = *block;
        xor_blocks(&decrypted, self.prev.expose_secret(), block);
        self.prev.expose_secret_mut().copy_from_slice(&ciphertext);
    }
}
