// src/decryptor/mod.rs

//! Decoding side.
//!
//! Core API: [`SleReader`] for streaming or random access, [`decrypt`] for a
//! whole container in one call.

pub(crate) mod decrypt;
pub(crate) mod legacy;
pub(crate) mod reader;

pub use decrypt::decrypt;
pub use reader::{SleReader, StreamState};
