// src/crypto/mod.rs

//! Low-level crypto primitives.
//!
//! - [`block`]: AES single-block cipher for 128/192/256-bit keys
//! - [`kdf`]: password → key derivation
//! - [`nonce`]: device-bound counter nonce
//! - [`rng`]: OS randomness

pub mod block;
pub mod kdf;
pub mod nonce;
pub mod rng;
