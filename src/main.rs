//! Command-line interface for stream-sim
//!
//! # Usage Examples
//!
//! ```bash
//! # Session-aware e-commerce events, one per second, forever
//! stream-sim ecommerce
//!
//! # 100 events against a remote endpoint, reproducibly
//! stream-sim ecommerce --limit 100 --seed 42 \
//!   --connection-string "host=rw.internal port=4566 dbname=dev user=root"
//!
//! # Sentences every half second
//! stream-sim sentences --interval 0.5
//!
//! # Sensor telemetry with the default 5s cadence
//! stream-sim sensors
//! ```
//!
//! The endpoint can also come from `RISINGWAVE_CONNECTION_STRING`; log
//! verbosity is controlled with `RUST_LOG`.

use anyhow::Context;
use clap::{Parser, Subcommand};
use ecommerce_events::EventStreamArgs;
use iot_readings::SensorStreamArgs;
use risingwave_sink::RisingWaveSink;
use sentence_stream::SentenceStreamArgs;
use stream_sim::{setup_shutdown_handler, SinkOpts};

#[derive(Parser)]
#[command(name = "stream-sim")]
#[command(about = "Synthetic event streams for RisingWave analytics pipelines")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Emit session-aware e-commerce events into user_events
    Ecommerce {
        #[command(flatten)]
        args: EventStreamArgs,

        #[command(flatten)]
        sink: SinkOpts,
    },

    /// Emit random sample sentences into sentence_source
    Sentences {
        #[command(flatten)]
        args: SentenceStreamArgs,

        #[command(flatten)]
        sink: SinkOpts,
    },

    /// Emit IoT sensor readings into sensor_readings, with alert and
    /// maintenance side effects
    Sensors {
        #[command(flatten)]
        args: SensorStreamArgs,

        #[command(flatten)]
        sink: SinkOpts,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Ecommerce { args, sink } => {
            let sink = RisingWaveSink::connect(&sink.connection_string)
                .await
                .context("Failed to connect to RisingWave")?;
            let shutdown = setup_shutdown_handler();
            let emitted = ecommerce_events::run_event_stream(&sink, &args, shutdown)
                .await
                .context("E-commerce event stream failed")?;
            tracing::info!(emitted, "e-commerce event stream finished");
        }
        Commands::Sentences { args, sink } => {
            let sink = RisingWaveSink::connect(&sink.connection_string)
                .await
                .context("Failed to connect to RisingWave")?;
            let shutdown = setup_shutdown_handler();
            let emitted = sentence_stream::run_sentence_stream(&sink, &args, shutdown)
                .await
                .context("Sentence stream failed")?;
            tracing::info!(emitted, "sentence stream finished");
        }
        Commands::Sensors { args, sink } => {
            let sink = RisingWaveSink::connect(&sink.connection_string)
                .await
                .context("Failed to connect to RisingWave")?;
            let shutdown = setup_shutdown_handler();
            let emitted = iot_readings::run_sensor_stream(&sink, &args, shutdown)
                .await
                .context("Sensor telemetry stream failed")?;
            tracing::info!(emitted, "sensor telemetry stream finished");
        }
    }

    Ok(())
}
