//! Core types for the stream-sim generators.
//!
//! This crate provides the foundational pieces shared by every simulated
//! stream:
//!
//! - [`UserEvent`] and its payload types - the session-aware e-commerce stream
//! - [`SentenceRecord`] - the sentence stream
//! - [`SensorReading`], [`SensorAlert`], [`MaintenanceEvent`] - the IoT stream
//! - [`EventSink`], [`SentenceSink`], [`ReadingSink`] - the persistence
//!   boundary each generator writes finished records to
//! - [`IdSequence`] - prefixed monotonic id counters
//!
//! # Architecture
//!
//! ```text
//! sim-core (this crate)
//!    │
//!    ├─── ecommerce-events   (session-aware event generator)
//!    ├─── sentence-stream    (memoryless sentence picker)
//!    ├─── iot-readings       (per-sensor reading synthesizer)
//!    └─── risingwave-sink    (implements the sink traits over pgwire)
//! ```
//!
//! The generators are generic over the sink traits, so tests drive them
//! against the in-memory sinks in [`testing`] while the CLI wires in the
//! RisingWave implementation.

pub mod events;
pub mod sensors;
pub mod sentences;
pub mod sequence;
pub mod sink;
pub mod testing;

// Re-exports for convenience
pub use events::{DeviceType, EventData, EventType, PaymentMethod, UserEvent};
pub use sensors::{
    AlertKind, MaintenanceEvent, MaintenanceKind, ReadingType, SensorAlert, SensorReading,
};
pub use sentences::SentenceRecord;
pub use sequence::IdSequence;
pub use sink::{EventSink, ReadingSink, SentenceSink};
