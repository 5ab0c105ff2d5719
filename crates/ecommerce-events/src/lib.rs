//! Session-aware e-commerce event generation.
//!
//! Models a small population of concurrent visitor sessions, each advancing
//! through a weighted state machine (browse, product interest, cart,
//! checkout, purchase) one event per tick. Continuity is per session: user
//! and device stay fixed, referrers chain from page to page, and cart totals
//! flow from the checkout into the purchase that settles them. A purchase
//! ends its session in the same tick.
//!
//! [`run_event_stream`] is the entry point; it drives an [`EventSimulator`]
//! against any [`sim_core::EventSink`] implementation.

pub mod args;
pub mod catalog;
pub mod factory;
pub mod model;
pub mod registry;
pub mod simulator;

pub use args::EventStreamArgs;
pub use model::{TransitionOutcome, TRANSITIONS};
pub use registry::{SessionChoice, SessionRegistry};
pub use simulator::{run_event_stream, EventSimulator};
