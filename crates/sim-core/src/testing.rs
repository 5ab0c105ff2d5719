//! In-memory sinks for exercising generators without a database.
//!
//! These live in the library (not behind `cfg(test)`) because the generator
//! crates use them from their own test modules.

use crate::events::UserEvent;
use crate::sensors::{MaintenanceEvent, SensorAlert, SensorReading};
use crate::sentences::SentenceRecord;
use crate::sink::{EventSink, ReadingSink, SentenceSink};
use anyhow::bail;
use async_trait::async_trait;
use tokio::sync::Mutex;

/// Sink that appends every row to an in-memory log.
///
/// Optionally simulates a database that already holds rows
/// (`with_max_event_id`) or one that goes away mid-run (`fail_after_events`).
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<UserEvent>>,
    sentences: Mutex<Vec<SentenceRecord>>,
    readings: Mutex<Vec<SensorReading>>,
    alerts: Mutex<Vec<SensorAlert>>,
    maintenance: Mutex<Vec<MaintenanceEvent>>,
    max_event_id: Option<i64>,
    fail_after_events: Option<usize>,
    fail_after_readings: Option<usize>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pretend the event table already contains ids up to `max`.
    pub fn with_max_event_id(max: i64) -> Self {
        Self {
            max_event_id: Some(max),
            ..Self::default()
        }
    }

    /// Accept `n` event inserts, then fail every one after that.
    pub fn fail_after_events(n: usize) -> Self {
        Self {
            fail_after_events: Some(n),
            ..Self::default()
        }
    }

    /// Accept `n` reading inserts, then fail every one after that.
    pub fn fail_after_readings(n: usize) -> Self {
        Self {
            fail_after_readings: Some(n),
            ..Self::default()
        }
    }

    pub async fn events(&self) -> Vec<UserEvent> {
        self.events.lock().await.clone()
    }

    pub async fn event_count(&self) -> usize {
        self.events.lock().await.len()
    }

    pub async fn sentences(&self) -> Vec<SentenceRecord> {
        self.sentences.lock().await.clone()
    }

    pub async fn readings(&self) -> Vec<SensorReading> {
        self.readings.lock().await.clone()
    }

    pub async fn alerts(&self) -> Vec<SensorAlert> {
        self.alerts.lock().await.clone()
    }

    pub async fn maintenance(&self) -> Vec<MaintenanceEvent> {
        self.maintenance.lock().await.clone()
    }
}

#[async_trait]
impl EventSink for RecordingSink {
    async fn insert_event(&self, event: &UserEvent) -> anyhow::Result<()> {
        let mut events = self.events.lock().await;
        if let Some(limit) = self.fail_after_events {
            if events.len() >= limit {
                bail!("sink rejected event {} after {limit} inserts", event.event_id);
            }
        }
        events.push(event.clone());
        Ok(())
    }

    async fn max_event_id(&self, _prefix: &str) -> anyhow::Result<Option<i64>> {
        Ok(self.max_event_id)
    }
}

#[async_trait]
impl SentenceSink for RecordingSink {
    async fn insert_sentence(&self, sentence: &SentenceRecord) -> anyhow::Result<()> {
        self.sentences.lock().await.push(sentence.clone());
        Ok(())
    }
}

#[async_trait]
impl ReadingSink for RecordingSink {
    async fn insert_reading(&self, reading: &SensorReading) -> anyhow::Result<()> {
        let mut readings = self.readings.lock().await;
        if let Some(limit) = self.fail_after_readings {
            if readings.len() >= limit {
                bail!(
                    "sink rejected reading {} after {limit} inserts",
                    reading.reading_id
                );
            }
        }
        readings.push(reading.clone());
        Ok(())
    }

    async fn insert_alert(&self, alert: &SensorAlert) -> anyhow::Result<()> {
        self.alerts.lock().await.push(alert.clone());
        Ok(())
    }

    async fn insert_maintenance(&self, event: &MaintenanceEvent) -> anyhow::Result<()> {
        self.maintenance.lock().await.push(event.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{DeviceType, EventData, EventType};
    use chrono::Utc;

    fn sample_event(event_id: &str) -> UserEvent {
        UserEvent {
            event_id: event_id.to_string(),
            user_id: "U001".to_string(),
            session_id: "S1000".to_string(),
            event_type: EventType::Pageview,
            product_id: None,
            page_url: "/home".to_string(),
            referrer_url: None,
            device_type: DeviceType::Mobile,
            event_time: Utc::now(),
            event_data: EventData::Pageview { scroll_depth: 50 },
        }
    }

    #[tokio::test]
    async fn test_recording_sink_preserves_insert_order() {
        let sink = RecordingSink::new();
        sink.insert_event(&sample_event("E1")).await.unwrap();
        sink.insert_event(&sample_event("E2")).await.unwrap();

        let events = sink.events().await;
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].event_id, "E1");
        assert_eq!(events[1].event_id, "E2");
    }

    #[tokio::test]
    async fn test_fail_after_events_rejects_and_does_not_record() {
        let sink = RecordingSink::fail_after_events(1);
        sink.insert_event(&sample_event("E1")).await.unwrap();

        let err = sink.insert_event(&sample_event("E2")).await;
        assert!(err.is_err());
        assert_eq!(sink.event_count().await, 1);
    }

    #[tokio::test]
    async fn test_max_event_id_reflects_configuration() {
        let empty = RecordingSink::new();
        assert_eq!(empty.max_event_id("E").await.unwrap(), None);

        let seeded = RecordingSink::with_max_event_id(17);
        assert_eq!(seeded.max_event_id("E").await.unwrap(), Some(17));
    }
}
