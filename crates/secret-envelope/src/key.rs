//! [`MasterKey`]: the process-wide secret key for envelope encryption.

use aes_gcm::aead::OsRng;

use crate::error::ConfigurationError;

/// Byte length of the master key (32 bytes = 256 bits).
pub const KEY_LEN: usize = 32;

/// Fixed-size buffer holding exactly [`KEY_LEN`] bytes of key material.
///
/// Constructed once at process startup and passed by reference into
/// whichever component encrypts or decrypts; immutable thereafter, so it is
/// safely shared across arbitrarily many concurrent calls with no locking.
/// When this type is dropped, the memory is overwritten with zeroes to
/// minimise the window during which key material lives in RAM.
#[derive(Clone)]
pub struct MasterKey(Box<[u8; KEY_LEN]>);

impl MasterKey {
    /// Decode a hex-encoded key as provisioned in the environment.
    ///
    /// Validation is structural only: a well-formed but operationally weak
    /// value such as the all-zero key is accepted. Provision keys with the
    /// `keygen` tool rather than choosing them by hand.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidKeyEncoding`] if `key_hex` is
    /// not valid hex, or [`ConfigurationError::InvalidKeyLength`] if it
    /// decodes to anything other than [`KEY_LEN`] bytes.
    pub fn from_hex(key_hex: &str) -> Result<Self, ConfigurationError> {
        let bytes =
            hex::decode(key_hex).map_err(|_| ConfigurationError::InvalidKeyEncoding)?;
        if bytes.len() != KEY_LEN {
            return Err(ConfigurationError::InvalidKeyLength(bytes.len()));
        }
        let mut buf = Box::new([0u8; KEY_LEN]);
        buf.copy_from_slice(&bytes);
        Ok(Self(buf))
    }

    /// Generate a fresh random key from the OS CSPRNG.
    pub fn generate() -> Self {
        use aes_gcm::aead::rand_core::RngCore;
        let mut buf = Box::new([0u8; KEY_LEN]);
        OsRng.fill_bytes(&mut buf[..]);
        Self(buf)
    }

    /// Hex-encode the raw key bytes for operator provisioning.
    ///
    /// Only the `keygen` tool has a reason to call this; request-handling
    /// code never transmits or logs key material.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0[..])
    }

    /// Raw key bytes, exposed only to the cipher layer.
    pub(crate) fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl Drop for MasterKey {
    fn drop(&mut self) {
        // Zero the key material on drop.
        self.0.iter_mut().for_each(|b| *b = 0);
    }
}

impl std::fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material — not even in debug builds.
        f.write_str("MasterKey([REDACTED])")
    }
}
