//! The emission loop: one persisted event per tick, paced and cancellable.

use crate::args::EventStreamArgs;
use crate::catalog;
use crate::factory;
use crate::model;
use crate::registry::{SessionChoice, SessionRegistry};
use anyhow::ensure;
use rand::rngs::StdRng;
use rand::SeedableRng;
use sim_core::{EventSink, IdSequence, UserEvent};
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::TryRecvError;

/// Session-aware event generator. Owns the registry, the id sequence, and
/// the RNG; emits one event per [`step`](Self::step).
pub struct EventSimulator {
    registry: SessionRegistry,
    event_ids: IdSequence,
    continuation_probability: f64,
    max_active_sessions: usize,
    prune_count: usize,
    rng: StdRng,
}

impl EventSimulator {
    pub fn new(args: &EventStreamArgs) -> Self {
        let rng = match args.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            registry: SessionRegistry::new(&args.session_id_prefix, args.session_id_base),
            event_ids: IdSequence::new(&args.event_id_prefix, args.event_id_start),
            continuation_probability: args.continuation_probability,
            max_active_sessions: args.max_active_sessions,
            prune_count: args.prune_count,
            rng,
        }
    }

    /// Skip past event ids already persisted by an earlier run.
    pub fn resume_after(&mut self, max_persisted: Option<i64>) {
        self.event_ids.advance_past(max_persisted);
    }

    pub fn active_sessions(&self) -> &SessionRegistry {
        &self.registry
    }

    /// Produce and persist the next event.
    ///
    /// A continued session whose recorded state is already terminal is
    /// dropped and the pick retried; such picks do not emit. The registry is
    /// only updated after the sink accepts the event, so a failed insert
    /// leaves every session exactly as it was.
    pub async fn step<S: EventSink>(&mut self, sink: &S) -> anyhow::Result<UserEvent> {
        loop {
            let choice = self
                .registry
                .continue_or_start(&mut self.rng, self.continuation_probability);

            let (session_id, user_id, device_type, outcome) = match choice {
                SessionChoice::Continue {
                    session_id,
                    last_event,
                } => match model::next_outcome(&mut self.rng, &last_event) {
                    Some(outcome) => (
                        session_id,
                        last_event.user_id.clone(),
                        last_event.device_type,
                        outcome,
                    ),
                    None => {
                        tracing::debug!(%session_id, "dropping completed session");
                        self.registry.remove(&session_id);
                        continue;
                    }
                },
                SessionChoice::StartNew { session_id } => (
                    session_id,
                    catalog::random_user(&mut self.rng).to_string(),
                    catalog::random_device(&mut self.rng),
                    model::opening_outcome(&mut self.rng),
                ),
            };

            let event = factory::build_event(
                &mut self.rng,
                self.event_ids.next_id(),
                &session_id,
                &user_id,
                device_type,
                outcome,
            );

            sink.insert_event(&event).await?;

            if event.event_type.is_terminal() {
                self.registry.remove(&session_id);
            } else {
                self.registry.record_step(event.clone());
            }

            let evicted = self.registry.prune_over_capacity(
                self.max_active_sessions,
                self.prune_count,
                &mut self.rng,
            );
            if !evicted.is_empty() {
                tracing::debug!(?evicted, "pruned sessions over capacity");
            }

            return Ok(event);
        }
    }
}

/// Drive an [`EventSimulator`] against `sink` until the configured limit is
/// reached or a shutdown message arrives. Returns the number of events
/// emitted.
///
/// Shutdown is observed both between ticks and during the paced sleep, so a
/// stop request takes effect within one interval. A sink failure aborts the
/// run without retrying.
pub async fn run_event_stream<S: EventSink>(
    sink: &S,
    args: &EventStreamArgs,
    mut shutdown: broadcast::Receiver<()>,
) -> anyhow::Result<u64> {
    ensure!(
        (0.0..=1.0).contains(&args.continuation_probability),
        "continuation probability must be within 0.0..=1.0, got {}",
        args.continuation_probability
    );
    ensure!(
        args.interval.is_finite() && args.interval >= 0.0,
        "interval must be a non-negative number of seconds, got {}",
        args.interval
    );

    let mut simulator = EventSimulator::new(args);
    let max_persisted = sink.max_event_id(&args.event_id_prefix).await?;
    simulator.resume_after(max_persisted);
    if let Some(max) = max_persisted {
        tracing::info!(max, "resuming event ids after the persisted maximum");
    }

    let interval = Duration::from_secs_f64(args.interval);
    let mut emitted: u64 = 0;

    tracing::info!(
        interval_secs = args.interval,
        limit = args.limit,
        "starting e-commerce event stream"
    );

    while args.limit.map_or(true, |limit| emitted < limit) {
        match shutdown.try_recv() {
            Err(TryRecvError::Empty) => {}
            _ => break,
        }

        let event = simulator.step(sink).await?;
        emitted += 1;
        tracing::info!(
            event_type = %event.event_type,
            user_id = %event.user_id,
            session_id = %event.session_id,
            "inserted event"
        );

        if args.limit.is_some_and(|limit| emitted >= limit) {
            break;
        }

        tokio::select! {
            _ = shutdown.recv() => break,
            _ = tokio::time::sleep(interval) => {}
        }
    }

    tracing::info!(emitted, "event stream stopped");
    Ok(emitted)
}
