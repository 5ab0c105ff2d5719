//! stream-sim: synthetic event streams for RisingWave analytics pipelines.
//!
//! Three generators, each writing a continuous stream of plausible rows into
//! a RisingWave endpoint so downstream materialized views have something to
//! chew on:
//!
//! - `ecommerce` - session-aware visitor events ([`ecommerce_events`])
//! - `sentences` - uniformly drawn sample sentences ([`sentence_stream`])
//! - `sensors` - IoT telemetry with alerts and maintenance ([`iot_readings`])
//!
//! The generators are generic over the sink traits in [`sim_core`]; the
//! binary wires in [`risingwave_sink::RisingWaveSink`], while tests drive
//! the same runners against in-memory sinks.

use clap::Args;

/// Connection options for the RisingWave sink, shared by every subcommand.
#[derive(Args, Clone, Debug)]
pub struct SinkOpts {
    /// RisingWave connection string (pgwire)
    #[arg(
        long,
        default_value = risingwave_sink::DEFAULT_CONNECTION_STRING,
        env = "RISINGWAVE_CONNECTION_STRING"
    )]
    pub connection_string: String,
}

/// Sets up a shutdown signal handler.
///
/// The returned receiver fires once on Ctrl+C; the runners observe it both
/// between ticks and during their paced sleep, so a stop takes effect within
/// one interval.
pub fn setup_shutdown_handler() -> tokio::sync::broadcast::Receiver<()> {
    let (shutdown_tx, shutdown_rx) = tokio::sync::broadcast::channel(1);

    tokio::spawn(async move {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C signal handler");

        tracing::info!("Received interrupt signal (Ctrl+C)");
        let _ = shutdown_tx.send(());
    });

    shutdown_rx
}
