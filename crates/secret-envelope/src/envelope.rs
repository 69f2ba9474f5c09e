//! Hex-framed encrypted envelopes: the public encrypt and decrypt
//! operations.
//!
//! An envelope is three independent hex-encoded text fields — ciphertext,
//! nonce, and authentication tag. The fields are stored and transmitted
//! separately (no concatenated binary format) and are meaningful only in
//! combination with the exact key that produced them. An envelope is never
//! mutated in place: an update replaces all three fields with a fresh
//! encryption.

use serde::{Deserialize, Serialize};

use crate::cipher::{self, NONCE_LEN, TAG_LEN};
use crate::error::{DecryptionError, EncryptionError};
use crate::key::MasterKey;

/// One encrypted secret as persisted by the storage layer.
///
/// Wire and column names are `ciphertext`, `nonce`, and `authTag`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptedEnvelope {
    /// Hex-encoded ciphertext, same byte length as the plaintext.
    pub ciphertext: String,
    /// Hex-encoded 16-byte nonce, fresh and random per encryption.
    pub nonce: String,
    /// Hex-encoded 16-byte authentication tag.
    pub auth_tag: String,
}

/// Encrypt `plaintext` under `key` into a fresh [`EncryptedEnvelope`].
///
/// A new random nonce is drawn for this call only — never derived from
/// content, a counter, or a timestamp. No length bound is enforced here;
/// the request-validation layer owns the plaintext bound, and any length
/// actually given round-trips intact. No plaintext or key material is
/// logged.
///
/// # Errors
///
/// Returns [`EncryptionError::Aead`] only on an underlying primitive
/// failure, which is treated as fatal for the request and not retried.
pub fn encrypt(key: &MasterKey, plaintext: &str) -> Result<EncryptedEnvelope, EncryptionError> {
    let sealed = cipher::seal(key, plaintext.as_bytes())?;
    Ok(EncryptedEnvelope {
        ciphertext: hex::encode(&sealed.ciphertext),
        nonce: hex::encode(sealed.nonce),
        auth_tag: hex::encode(sealed.tag),
    })
}

/// Decrypt an [`EncryptedEnvelope`] back to the exact original plaintext.
///
/// Deterministic and side-effect-free: identical inputs and key always
/// produce the identical result.
///
/// # Errors
///
/// Returns [`DecryptionError::MalformedEnvelope`] if any field is not valid
/// hex or the nonce/tag decode to the wrong length, and
/// [`DecryptionError::AuthenticationFailed`] on tag mismatch. Plaintext is
/// never returned, even partially, when verification fails.
pub fn decrypt(key: &MasterKey, envelope: &EncryptedEnvelope) -> Result<String, DecryptionError> {
    let ciphertext = decode_hex(&envelope.ciphertext, "ciphertext")?;
    let nonce = decode_fixed::<NONCE_LEN>(&envelope.nonce, "nonce")?;
    let tag = decode_fixed::<TAG_LEN>(&envelope.auth_tag, "auth tag")?;

    let plaintext = cipher::open(key, &nonce, &ciphertext, &tag)?;
    String::from_utf8(plaintext)
        .map_err(|_| DecryptionError::MalformedEnvelope("plaintext is not valid UTF-8".into()))
}

fn decode_hex(field_hex: &str, field: &str) -> Result<Vec<u8>, DecryptionError> {
    hex::decode(field_hex)
        .map_err(|_| DecryptionError::MalformedEnvelope(format!("{field} is not valid hex")))
}

fn decode_fixed<const N: usize>(field_hex: &str, field: &str) -> Result<[u8; N], DecryptionError> {
    let bytes = decode_hex(field_hex, field)?;
    if bytes.len() != N {
        return Err(DecryptionError::MalformedEnvelope(format!(
            "{} must be exactly {} bytes, got {}",
            field,
            N,
            bytes.len()
        )));
    }
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flip_bit(field_hex: &str, byte_index: usize, mask: u8) -> String {
        let mut bytes = hex::decode(field_hex).unwrap();
        bytes[byte_index] ^= mask;
        hex::encode(bytes)
    }

    #[test]
    fn encrypt_decrypt_round_trip() {
        let key = MasterKey::generate();
        let envelope = encrypt(&key, "a short stored secret").unwrap();
        assert_eq!(decrypt(&key, &envelope).unwrap(), "a short stored secret");
    }

    #[test]
    fn multi_byte_utf8_round_trips() {
        let key = MasterKey::generate();
        let plaintext = "pässwörter — 秘密 🔐";
        let envelope = encrypt(&key, plaintext).unwrap();
        assert_eq!(decrypt(&key, &envelope).unwrap(), plaintext);
    }

    #[test]
    fn empty_plaintext_round_trips() {
        let key = MasterKey::generate();
        let envelope = encrypt(&key, "").unwrap();
        assert_eq!(envelope.ciphertext, "");
        assert_eq!(decrypt(&key, &envelope).unwrap(), "");
    }

    #[test]
    fn fields_are_hex_of_expected_length() {
        let key = MasterKey::generate();
        let envelope = encrypt(&key, "four").unwrap();
        // Hex doubles the byte length.
        assert_eq!(envelope.ciphertext.len(), 8);
        assert_eq!(envelope.nonce.len(), NONCE_LEN * 2);
        assert_eq!(envelope.auth_tag.len(), TAG_LEN * 2);
    }

    #[test]
    fn same_plaintext_encrypts_differently() {
        let key = MasterKey::generate();
        let a = encrypt(&key, "same plaintext").unwrap();
        let b = encrypt(&key, "same plaintext").unwrap();
        assert_ne!(a.nonce, b.nonce);
        assert_ne!(a.ciphertext, b.ciphertext);
    }

    #[test]
    fn wrong_key_fails_authentication() {
        let k1 = MasterKey::generate();
        let k2 = MasterKey::generate();
        let envelope = encrypt(&k1, "secret").unwrap();
        assert!(matches!(
            decrypt(&k2, &envelope),
            Err(DecryptionError::AuthenticationFailed)
        ));
    }

    #[test]
    fn any_single_bit_flip_in_ciphertext_fails() {
        let key = MasterKey::generate();
        let envelope = encrypt(&key, "bits").unwrap();
        let ciphertext_len = hex::decode(&envelope.ciphertext).unwrap().len();
        for byte_index in 0..ciphertext_len {
            for bit in 0..8 {
                let mut tampered = envelope.clone();
                tampered.ciphertext = flip_bit(&envelope.ciphertext, byte_index, 1 << bit);
                assert!(
                    matches!(
                        decrypt(&key, &tampered),
                        Err(DecryptionError::AuthenticationFailed)
                    ),
                    "flip at byte {byte_index} bit {bit} was not detected"
                );
            }
        }
    }

    #[test]
    fn bit_flip_in_nonce_fails() {
        let key = MasterKey::generate();
        let envelope = encrypt(&key, "bits").unwrap();
        let mut tampered = envelope.clone();
        tampered.nonce = flip_bit(&envelope.nonce, 0, 0x01);
        assert!(matches!(
            decrypt(&key, &tampered),
            Err(DecryptionError::AuthenticationFailed)
        ));
    }

    #[test]
    fn bit_flip_in_tag_fails() {
        let key = MasterKey::generate();
        let envelope = encrypt(&key, "bits").unwrap();
        let mut tampered = envelope.clone();
        tampered.auth_tag = flip_bit(&envelope.auth_tag, TAG_LEN - 1, 0x80);
        assert!(matches!(
            decrypt(&key, &tampered),
            Err(DecryptionError::AuthenticationFailed)
        ));
    }

    #[test]
    fn non_hex_fields_are_malformed_not_a_panic() {
        let key = MasterKey::generate();
        let envelope = EncryptedEnvelope {
            ciphertext: "not-hex".into(),
            nonce: "alsonothex".into(),
            auth_tag: "nope".into(),
        };
        assert!(matches!(
            decrypt(&key, &envelope),
            Err(DecryptionError::MalformedEnvelope(_))
        ));
    }

    #[test]
    fn wrong_nonce_length_is_malformed() {
        let key = MasterKey::generate();
        let mut envelope = encrypt(&key, "secret").unwrap();
        envelope.nonce = "aabb".into();
        match decrypt(&key, &envelope) {
            Err(DecryptionError::MalformedEnvelope(msg)) => {
                assert!(msg.contains("nonce"), "got: {msg}");
            }
            other => panic!("expected malformed envelope, got {other:?}"),
        }
    }

    #[test]
    fn wrong_tag_length_is_malformed() {
        let key = MasterKey::generate();
        let mut envelope = encrypt(&key, "secret").unwrap();
        envelope.auth_tag = "aa".repeat(TAG_LEN - 1);
        assert!(matches!(
            decrypt(&key, &envelope),
            Err(DecryptionError::MalformedEnvelope(_))
        ));
    }

    #[test]
    fn odd_length_hex_is_malformed() {
        let key = MasterKey::generate();
        let mut envelope = encrypt(&key, "secret").unwrap();
        envelope.ciphertext.push('a');
        assert!(matches!(
            decrypt(&key, &envelope),
            Err(DecryptionError::MalformedEnvelope(_))
        ));
    }

    #[test]
    fn wire_shape_uses_camel_case_auth_tag() {
        let key = MasterKey::generate();
        let envelope = encrypt(&key, "secret").unwrap();
        let json = serde_json::to_value(&envelope).unwrap();
        assert!(json.get("ciphertext").is_some());
        assert!(json.get("nonce").is_some());
        assert!(json.get("authTag").is_some());

        let decoded: EncryptedEnvelope = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, envelope);
    }
}
