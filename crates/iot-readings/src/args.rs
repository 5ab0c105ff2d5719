//! CLI argument definitions for the sensor telemetry stream.

use clap::Args;

#[derive(Args, Clone, Debug)]
pub struct SensorStreamArgs {
    /// Seconds to pause between readings
    #[arg(long, default_value = "5.0")]
    pub interval: f64,

    /// Stop after this many readings (unlimited when omitted)
    #[arg(long)]
    pub limit: Option<u64>,

    /// Seed for a reproducible stream (OS entropy when omitted)
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Default for SensorStreamArgs {
    fn default() -> Self {
        Self {
            interval: 5.0,
            limit: None,
            seed: None,
        }
    }
}
