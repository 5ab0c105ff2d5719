//! Error types for the RisingWave sink.

use thiserror::Error;

/// Errors that can occur while connecting to or writing through RisingWave.
#[derive(Error, Debug)]
pub enum RisingWaveSinkError {
    /// Connection or query error from the pgwire client.
    #[error("RisingWave error: {0}")]
    Postgres(#[from] tokio_postgres::Error),

    /// The seeding query returned something other than one nullable integer.
    #[error("Unexpected max-id result: {0}")]
    MaxId(String),
}
