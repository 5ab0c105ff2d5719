//! CLI argument definitions for the e-commerce event stream.

use clap::Args;

/// Tuning knobs for the session-aware event generator.
#[derive(Args, Clone, Debug)]
pub struct EventStreamArgs {
    /// Seconds to pause between emitted events
    #[arg(long, default_value = "1.0")]
    pub interval: f64,

    /// Stop after this many events (unlimited when omitted)
    #[arg(long)]
    pub limit: Option<u64>,

    /// Chance of continuing an active session instead of opening a new one
    #[arg(long, default_value = "0.8")]
    pub continuation_probability: f64,

    /// Active-session count above which random pruning starts
    #[arg(long, default_value = "10")]
    pub max_active_sessions: usize,

    /// Sessions evicted by one pruning pass
    #[arg(long, default_value = "2")]
    pub prune_count: usize,

    /// Prefix for minted event ids
    #[arg(long, default_value = "E")]
    pub event_id_prefix: String,

    /// Number the event id sequence starts from
    #[arg(long, default_value = "1000")]
    pub event_id_start: i64,

    /// Prefix for minted session ids
    #[arg(long, default_value = "S")]
    pub session_id_prefix: String,

    /// Base offset session id numbers are derived from
    #[arg(long, default_value = "1000")]
    pub session_id_base: i64,

    /// Seed for a reproducible stream (OS entropy when omitted)
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Default for EventStreamArgs {
    fn default() -> Self {
        Self {
            interval: 1.0,
            limit: None,
            continuation_probability: 0.8,
            max_active_sessions: 10,
            prune_count: 2,
            event_id_prefix: "E".to_string(),
            event_id_start: 1000,
            session_id_prefix: "S".to_string(),
            session_id_base: 1000,
            seed: None,
        }
    }
}
