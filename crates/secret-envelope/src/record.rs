//! Secret records: the storage-facing shape that carries an envelope
//! alongside its identity and timestamps.
//!
//! The storage layer persists these fields as separate columns and
//! reassembles them on read. Row ownership lives in `owner_id`; access
//! control beyond that is enforced outside this crate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::envelope::{self, EncryptedEnvelope};
use crate::error::{DecryptionError, EncryptionError};
use crate::key::MasterKey;

/// Minimum plaintext length accepted by the request-validation layer.
pub const MIN_SECRET_CHARS: usize = 1;

/// Maximum plaintext length accepted by the request-validation layer.
///
/// The bound is enforced before a plaintext reaches [`SecretRecord::seal`];
/// encryption itself neither truncates nor rejects any length it is given.
pub const MAX_SECRET_CHARS: usize = 10_000;

/// One stored secret: envelope fields plus record identity and timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretRecord {
    /// Record identifier.
    pub id: Uuid,
    /// Owning user; rows are only ever read back by their owner.
    pub owner_id: Uuid,
    /// The encrypted triple, persisted as three separate text columns.
    #[serde(flatten)]
    pub envelope: EncryptedEnvelope,
    /// Creation time, set once.
    pub created_at: DateTime<Utc>,
    /// Last write time; bumped on every reseal.
    pub updated_at: DateTime<Utc>,
}

impl SecretRecord {
    /// Encrypt `plaintext` into a brand-new record for `owner_id`.
    pub fn seal(
        key: &MasterKey,
        owner_id: Uuid,
        plaintext: &str,
    ) -> Result<Self, EncryptionError> {
        let envelope = envelope::encrypt(key, plaintext)?;
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            owner_id,
            envelope,
            created_at: now,
            updated_at: now,
        })
    }

    /// Replace the stored envelope with a fresh encryption of `plaintext`.
    ///
    /// All three envelope fields are replaced together; a partial field
    /// edit is never valid.
    pub fn reseal(&mut self, key: &MasterKey, plaintext: &str) -> Result<(), EncryptionError> {
        self.envelope = envelope::encrypt(key, plaintext)?;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Decrypt this record's envelope back to plaintext.
    ///
    /// # Errors
    ///
    /// Propagates [`DecryptionError`] from the envelope; callers translate
    /// it into a per-record "decryption error" for the end user.
    pub fn open(&self, key: &MasterKey) -> Result<String, DecryptionError> {
        envelope::decrypt(key, &self.envelope)
    }
}

/// Decrypt a batch of records, one result per record.
///
/// An unreadable record yields an error in its slot and is logged with its
/// id only — never plaintext or key material — while sibling records
/// decrypt normally.
pub fn open_all(
    key: &MasterKey,
    records: &[SecretRecord],
) -> Vec<Result<String, DecryptionError>> {
    records
        .iter()
        .map(|record| {
            record.open(key).map_err(|e| {
                warn!(record_id = %record.id, error = %e, "secret record failed to decrypt");
                e
            })
        })
        .collect()
}
