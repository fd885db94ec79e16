//! # Secure-Gate Type Aliases
//!
//! Type aliases for secret-bearing buffers, built on [`secure-gate`](https://github.com/Slurp9187/secure-gate).
//! Every type here requires an explicit `.expose_secret()` / `.expose_secret_mut()`
//! to reach the bytes, so secrets are never printed or copied by accident.
//!
//! ## Type Categories
//!
//! ### Generic Secure Buffers
//! - [`SpanBuffer<N>`] - secure stack buffer of any size `N`
//!
//! ### Fixed-Size Types
//! - [`Block16`] - one AES block (plaintext, ciphertext or keystream)
//! - [`CounterBlock16`] - `nonce ‖ block index` input of the counter keystream
//! - [`Iv16`] - CBC initialization vector
//! - [`Nonce8`] - device-bound counter-mode nonce
//!
//! ### Dynamic Secrets
//! - [`PasswordString`] - user password
//! - [`SessionKey`] - derived AES key (16, 24 or 32 bytes)

use secure_gate::{Dynamic, Fixed};

// ─────────────────────────────────────────────────────────────────────────────
// SpanBuffer: generic secure stack buffer (direct alias to secure-gate's Fixed)
// ─────────────────────────────────────────────────────────────────────────────
pub type SpanBuffer<const N: usize> = Fixed<[u8; N]>;

// Semantic sub-types, compile-time sized
pub type Block16 = SpanBuffer<16>; // one AES block
pub type CounterBlock16 = SpanBuffer<16>; // nonce ‖ LE block index
pub type Iv16 = SpanBuffer<16>; // legacy CBC IV
pub type Nonce8 = SpanBuffer<8>; // v1.5 counter nonce

// ─────────────────────────────────────────────────────────────────────────────
// Dynamic secrets
// ─────────────────────────────────────────────────────────────────────────────
pub type PasswordString = Dynamic<String>;
pub type SessionKey = Dynamic<Vec<u8>>;
