//! Authenticated envelope encryption for stored user secrets.
//!
//! Each secret is sealed with AES-256-GCM under a single process-wide
//! 32-byte master key and persisted as three independent hex-encoded text
//! fields:
//!
//! ```text
//! ciphertext   same byte length as the plaintext (no padding)
//! nonce        16 bytes, fresh and random per encryption
//! authTag      16 bytes, covers ciphertext and nonce under the key
//! ```
//!
//! The triple is meaningful only together with the exact key that produced
//! it, and any single-bit change to any field makes decryption fail — no
//! partial plaintext is ever returned. The master key is loaded once at
//! startup from the `MASTER_KEY` environment variable and held, immutable,
//! for the process lifetime; a process without a valid key must not serve
//! requests.
//!
//! This crate is intentionally free of HTTP and database dependencies. The
//! storage/API layer persists and reassembles the triple; this crate owns
//! the key lifecycle and the encrypt/decrypt contract.

pub mod config;
pub mod envelope;
pub mod error;
pub mod key;
pub mod record;

mod cipher;

pub use cipher::{NONCE_LEN, TAG_LEN};
pub use config::Config;
pub use envelope::{decrypt, encrypt, EncryptedEnvelope};
pub use error::{ConfigurationError, DecryptionError, EncryptionError};
pub use key::{MasterKey, KEY_LEN};
pub use record::SecretRecord;
