//! Record type for the plain sentence stream.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One persisted row of the `sentence_source` stream. The id is a dense
/// integer sequence so gaps in the table reveal dropped rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentenceRecord {
    pub id: i64,
    pub content: String,
    pub event_time: DateTime<Utc>,
}
