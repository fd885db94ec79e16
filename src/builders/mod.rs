//! # Builders
//!
//! Option builders for opening and creating containers.
//!
//! ## Modules
//!
//! - [`encode_options`] - version, key size, file name and nonce for new containers
//! - [`decode_options`] - nonce source for opening v1.5 containers
//!
//! Both use `with_*` methods on top of `Default`, so the common case is
//! `EncodeOptions::default()` / `DecodeOptions::default()`.

pub mod decode_options;
pub mod encode_options;

pub use decode_options::DecodeOptions;
pub use encode_options::EncodeOptions;
