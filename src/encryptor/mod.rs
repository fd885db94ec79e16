// src/encryptor/mod.rs

//! Encoding side.
//!
//! Core API: [`SleWriter`] for streaming writes, [`encrypt`] for a whole
//! input in one call.

pub(crate) mod encrypt;
pub(crate) mod writer;

pub use encrypt::encrypt;
pub use writer::SleWriter;
