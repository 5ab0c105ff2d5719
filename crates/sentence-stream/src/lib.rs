//! Sentence stream generation.
//!
//! The simplest of the simulated streams: no session state, no carried
//! context, just one uniformly drawn sentence per tick with a dense integer
//! id. Downstream pipelines use it for word-count style aggregations.

pub mod args;
pub mod stream;

pub use args::SentenceStreamArgs;
pub use stream::{run_sentence_stream, SENTENCES};
