//! AES-256-GCM sealing and opening of individual secret values.
//!
//! **Nonce discipline:** a fresh 128-bit nonce is drawn from the OS CSPRNG
//! for every seal and stored alongside the ciphertext. A (key, nonce) pair
//! must never repeat — GCM nonce reuse breaks both confidentiality and
//! authentication.
//!
//! The tag is kept detached from the ciphertext so that the stored
//! ciphertext has exactly the byte length of the plaintext.

use aes_gcm::{
    aead::{consts::U16, AeadInPlace, KeyInit, OsRng},
    aes::Aes256,
    AesGcm, Key, Nonce, Tag,
};

use crate::error::{DecryptionError, EncryptionError};
use crate::key::MasterKey;

/// Byte length of the per-encryption nonce (16 bytes = 128 bits).
pub const NONCE_LEN: usize = 16;

/// Byte length of the authentication tag (16 bytes = 128 bits).
pub const TAG_LEN: usize = 16;

/// AES-256-GCM parameterised with the 128-bit nonce the envelope stores.
type SecretCipher = AesGcm<Aes256, U16>;

/// Raw byte output of one seal operation, before hex framing.
pub(crate) struct RawEnvelope {
    /// Nonce drawn for this call only.
    pub nonce: [u8; NONCE_LEN],
    /// Ciphertext, same byte length as the plaintext.
    pub ciphertext: Vec<u8>,
    /// Detached authentication tag over ciphertext and nonce.
    pub tag: [u8; TAG_LEN],
}

fn build_cipher(key: &MasterKey) -> SecretCipher {
    SecretCipher::new(Key::<SecretCipher>::from_slice(key.as_bytes()))
}

/// Seal `plaintext` under `key` with a fresh random nonce.
///
/// # Errors
///
/// Returns [`EncryptionError::Aead`] on an internal AEAD failure (should be
/// unreachable with a valid key and nonce).
pub(crate) fn seal(key: &MasterKey, plaintext: &[u8]) -> Result<RawEnvelope, EncryptionError> {
    let cipher = build_cipher(key);

    // Use OsRng for a cryptographically secure random nonce.
    use aes_gcm::aead::rand_core::RngCore;
    let mut nonce_bytes = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce_bytes);

    let mut ciphertext = plaintext.to_vec();
    let tag = cipher
        .encrypt_in_place_detached(Nonce::<U16>::from_slice(&nonce_bytes), b"", &mut ciphertext)
        .map_err(|_| EncryptionError::Aead)?;

    let mut tag_bytes = [0u8; TAG_LEN];
    tag_bytes.copy_from_slice(tag.as_slice());

    Ok(RawEnvelope {
        nonce: nonce_bytes,
        ciphertext,
        tag: tag_bytes,
    })
}

/// Open a sealed value back to plaintext bytes.
///
/// The primitive recomputes the tag over the supplied ciphertext and nonce
/// and compares it in constant time.
///
/// # Errors
///
/// Returns [`DecryptionError::AuthenticationFailed`] on tag mismatch —
/// tampered data, corruption, or the wrong key.
pub(crate) fn open(
    key: &MasterKey,
    nonce: &[u8; NONCE_LEN],
    ciphertext: &[u8],
    tag: &[u8; TAG_LEN],
) -> Result<Vec<u8>, DecryptionError> {
    let cipher = build_cipher(key);

    let mut plaintext = ciphertext.to_vec();
    cipher
        .decrypt_in_place_detached(
            Nonce::<U16>::from_slice(nonce),
            b"",
            &mut plaintext,
            Tag::from_slice(tag),
        )
        .map_err(|_| DecryptionError::AuthenticationFailed)?;

    Ok(plaintext)
}
