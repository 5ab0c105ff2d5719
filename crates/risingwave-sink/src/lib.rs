//! RisingWave implementation of the stream-sim sink traits.
//!
//! Speaks pgwire through `tokio-postgres`: one connection, one parameterized
//! INSERT per record, no retries. Tables are created by the downstream
//! pipeline's SQL, not here; this crate only writes rows (and reads the
//! persisted event-id maximum once at startup).

pub mod error;

pub use error::RisingWaveSinkError;

use async_trait::async_trait;
use sim_core::{
    EventSink, MaintenanceEvent, ReadingSink, SensorAlert, SensorReading, SentenceRecord,
    SentenceSink, UserEvent,
};
use tokio_postgres::{Client, NoTls};

/// RisingWave's default local endpoint: pgwire on 4566, user `root`, no
/// password, database `dev`.
pub const DEFAULT_CONNECTION_STRING: &str =
    "host=localhost port=4566 dbname=dev user=root password=";

/// A connected RisingWave client implementing every sink trait.
pub struct RisingWaveSink {
    client: Client,
}

impl RisingWaveSink {
    /// Connect and probe the endpoint with `SELECT 1`. The connection driver
    /// runs on a spawned task for the life of the sink.
    pub async fn connect(connection_string: &str) -> Result<Self, RisingWaveSinkError> {
        let (client, connection) = tokio_postgres::connect(connection_string, NoTls).await?;

        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!("RisingWave connection error: {e}");
            }
        });

        client.simple_query("SELECT 1").await?;

        Ok(Self { client })
    }
}

/// Seeding query for the event-id counter: strips `prefix` off every
/// persisted event id and takes the numeric maximum.
fn max_id_query(prefix: &str) -> String {
    format!(
        "SELECT MAX(CAST(SUBSTRING(event_id FROM {}) AS BIGINT)) FROM user_events",
        prefix.len() + 1
    )
}

#[async_trait]
impl EventSink for RisingWaveSink {
    async fn insert_event(&self, event: &UserEvent) -> anyhow::Result<()> {
        let event_data = serde_json::to_value(&event.event_data)?;
        self.client
            .execute(
                "INSERT INTO user_events \
                 (event_id, user_id, session_id, event_type, product_id, page_url, \
                  referrer_url, device_type, event_time, event_data) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
                &[
                    &event.event_id,
                    &event.user_id,
                    &event.session_id,
                    &event.event_type.as_str(),
                    &event.product_id,
                    &event.page_url,
                    &event.referrer_url,
                    &event.device_type.as_str(),
                    &event.event_time,
                    &event_data,
                ],
            )
            .await
            .map_err(RisingWaveSinkError::Postgres)?;
        Ok(())
    }

    async fn max_event_id(&self, prefix: &str) -> anyhow::Result<Option<i64>> {
        let row = self
            .client
            .query_one(&max_id_query(prefix), &[])
            .await
            .map_err(RisingWaveSinkError::Postgres)?;
        let max: Option<i64> = row
            .try_get(0)
            .map_err(|e| RisingWaveSinkError::MaxId(e.to_string()))?;
        Ok(max)
    }
}

#[async_trait]
impl SentenceSink for RisingWaveSink {
    async fn insert_sentence(&self, sentence: &SentenceRecord) -> anyhow::Result<()> {
        self.client
            .execute(
                "INSERT INTO sentence_source (id, content, event_time) VALUES ($1, $2, $3)",
                &[&sentence.id, &sentence.content, &sentence.event_time],
            )
            .await
            .map_err(RisingWaveSinkError::Postgres)?;
        Ok(())
    }
}

#[async_trait]
impl ReadingSink for RisingWaveSink {
    async fn insert_reading(&self, reading: &SensorReading) -> anyhow::Result<()> {
        self.client
            .execute(
                "INSERT INTO sensor_readings \
                 (reading_id, sensor_id, reading_type, reading_value, reading_unit, \
                  battery_level, signal_strength, reading_time, reading_data) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
                &[
                    &reading.reading_id,
                    &reading.sensor_id,
                    &reading.reading_type.as_str(),
                    &reading.reading_value,
                    &reading.reading_unit,
                    &reading.battery_level,
                    &reading.signal_strength,
                    &reading.reading_time,
                    &reading.reading_data,
                ],
            )
            .await
            .map_err(RisingWaveSinkError::Postgres)?;
        Ok(())
    }

    async fn insert_alert(&self, alert: &SensorAlert) -> anyhow::Result<()> {
        self.client
            .execute(
                "INSERT INTO alerts \
                 (alert_id, sensor_id, alert_type, severity, alert_time, is_resolved, notes) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7)",
                &[
                    &alert.alert_id,
                    &alert.sensor_id,
                    &alert.alert_type.as_str(),
                    &alert.severity,
                    &alert.alert_time,
                    &alert.is_resolved,
                    &alert.notes,
                ],
            )
            .await
            .map_err(RisingWaveSinkError::Postgres)?;
        Ok(())
    }

    async fn insert_maintenance(&self, event: &MaintenanceEvent) -> anyhow::Result<()> {
        self.client
            .execute(
                "INSERT INTO maintenance_events \
                 (event_id, sensor_id, event_type, technician_id, event_time, notes) \
                 VALUES ($1, $2, $3, $4, $5, $6)",
                &[
                    &event.event_id,
                    &event.sensor_id,
                    &event.event_type.as_str(),
                    &event.technician_id,
                    &event.event_time,
                    &event.notes,
                ],
            )
            .await
            .map_err(RisingWaveSinkError::Postgres)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_id_query_skips_the_prefix() {
        assert_eq!(
            max_id_query("E"),
            "SELECT MAX(CAST(SUBSTRING(event_id FROM 2) AS BIGINT)) FROM user_events"
        );
        assert_eq!(
            max_id_query("EVT"),
            "SELECT MAX(CAST(SUBSTRING(event_id FROM 4) AS BIGINT)) FROM user_events"
        );
    }
}
