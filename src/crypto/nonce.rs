//! src/crypto/nonce.rs
//! Device-bound counter nonce for v1.5 containers
//!
//! The nonce is not stored in the container. Both sides recompute it from a
//! device identifier, so a v1.5 container only opens on a device that yields
//! the same identifier (or when the caller supplies it explicitly).

use crate::aliases::Nonce8;
use crate::consts::{DEVICE_ID_ENV, DEVICE_ID_SALT, NONCE_SIZE};
use crate::error::SleError;
use machineid_rs::{Encryption, HWIDComponent, IdBuilder};
use sha2::{Digest, Sha256};
use tracing::debug;

/// Where the v1.5 counter nonce comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum NonceSource {
    /// This machine's identifier: `SLE_DEVICE_ID` if set, else the system fingerprint.
    #[default]
    Device,
    /// An explicit device identifier, e.g. the one of the machine that locked the file.
    DeviceId(String),
    /// Raw nonce bytes.
    Fixed([u8; NONCE_SIZE]),
}

impl NonceSource {
    /// Resolve to the 8 nonce bytes.
    pub fn resolve(&self) -> Result<Nonce8, SleError> {
        match self {
            NonceSource::Fixed(bytes) => Ok(Nonce8::new(*bytes)),
            NonceSource::DeviceId(id) => Ok(nonce_from_device_id(id)),
            NonceSource::Device => {
                let id = device_id()?;
                Ok(nonce_from_device_id(&id))
            }
        }
    }
}

/// First 8 bytes of SHA-256 over the trimmed identifier.
#[inline]
pub fn nonce_from_device_id(id: &str) -> Nonce8 {
    let digest = Sha256::digest(id.trim().as_bytes());
    let mut nonce = [0u8; NONCE_SIZE];
    nonce.copy_from_slice(&digest[..NONCE_SIZE]);
    Nonce8::new(nonce)
}

/// Identifier of the current device.
///
/// `SLE_DEVICE_ID` wins when set to a non-blank value; otherwise the OS system
/// id is fingerprinted with `machineid-rs`.
pub fn device_id() -> Result<String, SleError> {
    if let Ok(id) = std::env::var(DEVICE_ID_ENV) {
        if !id.trim().is_empty() {
            debug!(source = DEVICE_ID_ENV, "Using device id from environment");
            return Ok(id);
        }
    }

    let id = IdBuilder::new(Encryption::SHA256)
        .add_component(HWIDComponent::SystemID)
        .build(DEVICE_ID_SALT)
        .map_err(|e| SleError::Device(e.to_string()))?;
    debug!(source = "system", "Using device id from machine fingerprint");
    Ok(id)
}
