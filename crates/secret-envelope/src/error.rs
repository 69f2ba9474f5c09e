//! Closed error set for the envelope core.
//!
//! Callers pattern-match on these kinds rather than string-matching
//! messages. No variant ever carries plaintext or key material.

use thiserror::Error;

use crate::key::KEY_LEN;

/// Errors raised while loading or validating the master key at startup.
///
/// All variants are fatal: a process without a valid key must not serve
/// requests.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// `MASTER_KEY` is absent (or blank) in the environment.
    #[error("MASTER_KEY is required and is not set")]
    MissingKey,

    /// The configured key value is not a valid hex string.
    #[error("master key is not valid hex")]
    InvalidKeyEncoding,

    /// The configured key decoded to the wrong number of bytes.
    #[error("master key has invalid length: expected {KEY_LEN} bytes, got {0}")]
    InvalidKeyLength(usize),

    /// The environment configuration source could not be read.
    #[error("failed to read configuration from environment: {0}")]
    Environment(#[from] config::ConfigError),
}

/// Errors raised while encrypting a plaintext.
#[derive(Debug, Error)]
pub enum EncryptionError {
    /// The AEAD primitive itself failed (should be unreachable with a valid
    /// key and nonce). Surfaced to callers as a generic failure, not retried.
    #[error("aead encryption failed")]
    Aead,
}

/// Errors raised while decrypting a stored envelope.
///
/// Recovered per record at the call site: one unreadable record is reported
/// as such and must not abort the surrounding read or listing operation.
#[derive(Debug, Error)]
pub enum DecryptionError {
    /// A stored field is not valid hex, has the wrong decoded length, or the
    /// authenticated bytes are not UTF-8.
    #[error("malformed envelope: {0}")]
    MalformedEnvelope(String),

    /// The authentication tag does not match the supplied ciphertext and
    /// nonce — tampering, corruption, or the wrong key. No plaintext is
    /// returned, even partially. Retrying with identical inputs always
    /// fails identically.
    #[error("authentication failed")]
    AuthenticationFailed,
}
