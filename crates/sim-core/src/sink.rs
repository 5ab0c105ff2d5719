//! Sink traits the generators write through.
//!
//! Each generator is generic over its sink so the same simulation logic runs
//! against a database in production and an in-memory recorder in tests. A
//! sink reports failure through its `Result`; the caller decides whether a
//! failed insert aborts the run. Sinks must not be assumed idempotent, so
//! callers only update their own state after an insert returns `Ok`.

use crate::events::UserEvent;
use crate::sensors::{MaintenanceEvent, SensorAlert, SensorReading};
use crate::sentences::SentenceRecord;
use async_trait::async_trait;

/// Destination for the e-commerce event stream.
#[async_trait]
pub trait EventSink {
    /// Persist one event row.
    async fn insert_event(&self, event: &UserEvent) -> anyhow::Result<()>;

    /// Largest numeric event id already persisted under `prefix`, or `None`
    /// when no rows exist. Used to seed the id sequence on startup.
    async fn max_event_id(&self, prefix: &str) -> anyhow::Result<Option<i64>>;
}

/// Destination for the sentence stream.
#[async_trait]
pub trait SentenceSink {
    async fn insert_sentence(&self, sentence: &SentenceRecord) -> anyhow::Result<()>;
}

/// Destination for the sensor telemetry stream and its side tables.
#[async_trait]
pub trait ReadingSink {
    async fn insert_reading(&self, reading: &SensorReading) -> anyhow::Result<()>;

    async fn insert_alert(&self, alert: &SensorAlert) -> anyhow::Result<()>;

    async fn insert_maintenance(&self, event: &MaintenanceEvent) -> anyhow::Result<()>;
}
