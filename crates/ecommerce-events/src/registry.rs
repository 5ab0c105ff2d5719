//! Active-session bookkeeping.

use rand::seq::SliceRandom;
use rand::Rng;
use sim_core::UserEvent;
use std::collections::BTreeMap;

/// What the emission loop should do this tick: move an existing session
/// forward or open a new one.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionChoice {
    Continue {
        session_id: String,
        last_event: UserEvent,
    },
    StartNew {
        session_id: String,
    },
}

/// In-memory map from session id to that session's last emitted event.
///
/// A session exists exactly while it has a recorded last event. Ordered
/// storage keeps seeded runs reproducible: the n-th key is the same key on
/// every run with the same seed.
#[derive(Debug)]
pub struct SessionRegistry {
    sessions: BTreeMap<String, UserEvent>,
    id_prefix: String,
    id_base: i64,
}

impl SessionRegistry {
    /// Empty registry minting session ids as `<prefix><base + active count>`.
    pub fn new(id_prefix: impl Into<String>, id_base: i64) -> Self {
        Self {
            sessions: BTreeMap::new(),
            id_prefix: id_prefix.into(),
            id_base,
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn last_event(&self, session_id: &str) -> Option<&UserEvent> {
        self.sessions.get(session_id)
    }

    /// Sessions and their last events, ordered by session id.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &UserEvent)> {
        self.sessions.iter()
    }

    /// With probability `continuation_probability` (and at least one active
    /// session) pick a uniformly random session to continue; otherwise mint
    /// a fresh session id from the prefix, base offset, and current active
    /// count.
    ///
    /// `continuation_probability` must be within `0.0..=1.0`.
    pub fn continue_or_start<R: Rng>(
        &self,
        rng: &mut R,
        continuation_probability: f64,
    ) -> SessionChoice {
        if !self.sessions.is_empty() && rng.gen_bool(continuation_probability) {
            let index = rng.gen_range(0..self.sessions.len());
            if let Some((session_id, last_event)) = self.sessions.iter().nth(index) {
                return SessionChoice::Continue {
                    session_id: session_id.clone(),
                    last_event: last_event.clone(),
                };
            }
        }
        SessionChoice::StartNew {
            session_id: format!(
                "{}{}",
                self.id_prefix,
                self.id_base + self.sessions.len() as i64
            ),
        }
    }

    /// Commit `event` as its session's last event. Recording over a live
    /// session replaces that session's state.
    pub fn record_step(&mut self, event: UserEvent) {
        self.sessions.insert(event.session_id.clone(), event);
    }

    /// Drop a finished or abandoned session, returning its last event when
    /// it was present.
    pub fn remove(&mut self, session_id: &str) -> Option<UserEvent> {
        self.sessions.remove(session_id)
    }

    /// When the active count exceeds `max_active`, evict `prune_count`
    /// uniformly random sessions regardless of their state. Returns the
    /// evicted ids. This bounds memory for sessions that never purchase.
    pub fn prune_over_capacity<R: Rng>(
        &mut self,
        max_active: usize,
        prune_count: usize,
        rng: &mut R,
    ) -> Vec<String> {
        if self.sessions.len() <= max_active {
            return Vec::new();
        }
        let keys: Vec<String> = self.sessions.keys().cloned().collect();
        let evicted: Vec<String> = keys.choose_multiple(rng, prune_count).cloned().collect();
        for session_id in &evicted {
            self.sessions.remove(session_id);
        }
        evicted
    }
}
