//! # Key Derivation
//!
//! SLE containers derive the AES key directly from the password text: no salt,
//! no iterations. See [`padded`] for the exact rule.
//!
//! For most use cases the high-level [`encrypt`](crate::encrypt) and
//! [`decrypt`](crate::decrypt) functions handle key derivation automatically.

pub mod padded;
