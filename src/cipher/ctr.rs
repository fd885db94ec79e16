//! src/cipher/ctr.rs
//! Hand-built counter mode over AES-ECB (v1.5 containers)
//!
//! Keystream block `i` is `AES(nonce ‖ i as u64 LE)`. Data byte at logical
//! position `p` is XORed with byte `p % 16` of keystream block `p / 16`.
//! Encryption and decryption are the same operation, and any position can be
//! reached without touching earlier blocks.

use crate::aliases::{Block16, CounterBlock16, Nonce8};
use crate::consts::{BLOCK_SIZE, NONCE_SIZE};
use crate::crypto::block::BlockCipher;
use crate::utils::xor_in_place;

#[derive(Debug)]
pub struct CounterKeystream {
    cipher: BlockCipher,
    counter: CounterBlock16,
}

impl CounterKeystream {
    pub fn new(cipher: BlockCipher, nonce: &Nonce8) -> Self {
        let mut counter = CounterBlock16::new([0u8; BLOCK_SIZE]);
        counter.expose_secret_mut()[..NONCE_SIZE].copy_from_slice(nonce.expose_secret());
        Self { cipher, counter }
    }

    /// Keystream block for logical block `index`.
    #[inline(always)]
    pub fn block(&self, index: u64) -> Block16 {
        let mut block = Block16::new(*self.counter.expose_secret());
        block.expose_secret_mut()[NONCE_SIZE..].copy_from_slice(&index.to_le_bytes());
        self.cipher.encrypt_block(block.expose_secret_mut());
        block
    }

    /// XOR `data` with the keystream starting at logical byte `position`.
    ///
    /// Leading bytes of the first keystream block (`position % 16`) and unused
    /// trailing bytes of the last one are discarded.
    pub fn apply(&self, position: u64, data: &mut [u8]) {
        let mut index = position / BLOCK_SIZE as u64;
        let mut skip = (position % BLOCK_SIZE as u64) as usize;
        let mut done = 0;

        while done < data.len() {
            let keystream = self.block(index);
            let mask = &keystream.expose_secret()[skip..];
            let n = mask.len().min(data.len() - done);

            xor_in_place(&mut data[done..done + n], &mask[..n]);

            done += n;
            skip = 0;
            index = index.wrapping_add(1);
        }
    }
}
