//! src/crypto/block.rs
//! AES-128/192/256 single-block primitive, key size chosen from the header

use crate::aliases::SessionKey;
use crate::consts::BLOCK_SIZE;
use crate::error::SleError;
use crate::header::KeySize;
use aes::cipher::{BlockDecrypt, BlockEncrypt, KeyInit};
use aes::{Aes128, Aes192, Aes256, Block as AesBlock};
use std::fmt;

/// Raw AES block cipher for one of the three key sizes.
///
/// Modes (CBC, counter) are layered on top in [`crate::cipher`].
pub enum BlockCipher {
    Aes128(Aes128),
    Aes192(Aes192),
    Aes256(Aes256),
}

impl BlockCipher {
    /// Build the cipher from a derived key.
    ///
    /// Fails with [`SleError::Config`] if the key length does not match `key_size`.
    pub fn new(key: &SessionKey, key_size: KeySize) -> Result<Self, SleError> {
        let key = key.expose_secret().as_slice();
        if key.len() != key_size.bytes() {
            return Err(SleError::Config(format!(
                "key is {} bytes, AES-{} needs {}",
                key.len(),
                key_size.bits(),
                key_size.bytes()
            )));
        }

        let invalid = |_| SleError::Config("invalid AES key length".into());
        Ok(match key_size {
            KeySize::Aes128 => BlockCipher::Aes128(Aes128::new_from_slice(key).map_err(invalid)?),
            KeySize::Aes192 => BlockCipher::Aes192(Aes192::new_from_slice(key).map_err(invalid)?),
            KeySize::Aes256 => BlockCipher::Aes256(Aes256::new_from_slice(key).map_err(invalid)?),
        })
    }

    pub fn key_size(&self) -> KeySize {
        match self {
            BlockCipher::Aes128(_) => KeySize::Aes128,
            BlockCipher::Aes192(_) => KeySize::Aes192,
            BlockCipher::Aes256(_) => KeySize::Aes256,
        }
    }

    #[inline(always)]
    pub fn encrypt_block(&self, block: &mut [u8; BLOCK_SIZE]) {
        let block = AesBlock::from_mut_slice(block);
        match self {
            BlockCipher::Aes128(c) => c.encrypt_block(block),
            BlockCipher::Aes192(c) => c.encrypt_block(block),
            BlockCipher::Aes256(c) => c.encrypt_block(block),
        }
    }

    #[inline(always)]
    pub fn decrypt_block(&self, block: &mut [u8; BLOCK_SIZE]) {
        let block = AesBlock::from_mut_slice(block);
        match self {
            BlockCipher::Aes128(c) => c.decrypt_block(block),
            BlockCipher::Aes192(c) => c.decrypt_block(block),
            BlockCipher::Aes256(c) => c.decrypt_block(block),
        }
    }
}

impl fmt::Debug for BlockCipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlockCipher(AES-{})", self.key_size().bits())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(bytes: &[u8]) -> SessionKey {
        SessionKey::new(bytes.to_vec())
    }

    // FIPS-197 Appendix C.1
    #[test]
    fn aes128_fips197_vector() {
        let k = hex::decode("000102030405060708090a0b0c0d0e0f").unwrap();
        let cipher = BlockCipher::new(&key(&k), KeySize::Aes128).unwrap();

        let mut block: [u8; 16] = hex::decode("00112233445566778899aabbccddeeff")
            .unwrap()
            .try_into()
            .unwrap();
        cipher.encrypt_block(&mut block);
        assert_eq!(hex::encode(block), "69c4e0d86a7b0430d8cdb78070b4c55a");

        cipher.decrypt_block(&mut block);
        assert_eq!(hex::encode(block), "00112233445566778899aabbccddeeff");
    }

    // FIPS-197 Appendix C.3
    #[test]
    fn aes256_fips197_vector() {
        let k = hex::decode("000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f")
            .unwrap();
        let cipher = BlockCipher::new(&key(&k), KeySize::Aes256).unwrap();

        let mut block: [u8; 16] = hex::decode("00112233445566778899aabbccddeeff")
            .unwrap()
            .try_into()
            .unwrap();
        cipher.encrypt_block(&mut block);
        assert_eq!(hex::encode(block), "8ea2b7ca516745bfeafc49904b496089");
    }

    #[test]
    fn key_length_mismatch_is_config_error() {
        let err = BlockCipher::new(&key(&[0u8; 16]), KeySize::Aes256).unwrap_err();
        assert!(matches!(err, SleError::Config(_)));
    }
}
