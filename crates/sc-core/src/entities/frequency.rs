use serde::{Deserialize, Serialize};

/// Token count of one gloss by one speaker in one document.
///
/// At most one record exists per `(speaker_id, document_id, gloss_id)`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FrequencyRecord {
    pub id: i64,
    pub speaker_id: i64,
    pub document_id: i64,
    pub gloss_id: i64,
    pub frequency: i64,
}
