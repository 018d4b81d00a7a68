//! Backend-agnostic preference store trait.
//!
//! The decision pipeline depends only on this interface, so a real
//! persistent store can be substituted without touching the pipeline.
//! A lookup returns a point-in-time snapshot; no read-your-writes
//! guarantee is required across separate requests.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::prefs::PreferenceRecord;

/// Keyed storage of per-user preference records.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Resolve a user id to its preference record.
    ///
    /// Absence is not an error — it is the "user has no configured
    /// policy" outcome the pipeline treats as default-allow.
    async fn get(&self, user_id: &str) -> Result<Option<PreferenceRecord>, StoreError>;

    /// Store a record for a user, replacing any existing record
    /// wholesale. No partial merge.
    async fn set(&self, user_id: &str, record: PreferenceRecord) -> Result<(), StoreError>;
}
