//! CLI argument definitions for the sentence stream.

use clap::Args;

#[derive(Args, Clone, Debug)]
pub struct SentenceStreamArgs {
    /// Seconds to pause between inserted sentences
    #[arg(long, default_value = "2.0")]
    pub interval: f64,

    /// Stop after this many sentences (unlimited when omitted)
    #[arg(long)]
    pub limit: Option<u64>,

    /// Id of the first inserted row, above any seeded test data
    #[arg(long, default_value = "100")]
    pub start_id: i64,

    /// Seed for a reproducible stream (OS entropy when omitted)
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Default for SentenceStreamArgs {
    fn default() -> Self {
        Self {
            interval: 2.0,
            limit: None,
            start_id: 100,
            seed: None,
        }
    }
}
