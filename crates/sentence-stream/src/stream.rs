//! The memoryless sentence picker: every tick is an independent draw.

use crate::args::SentenceStreamArgs;
use anyhow::ensure;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sim_core::{SentenceRecord, SentenceSink};
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::TryRecvError;

/// Sample sentences the stream draws from.
pub const SENTENCES: [&str; 20] = [
    "The quick brown fox jumps over the lazy dog.",
    "Stream processing enables real-time analytics and monitoring.",
    "RisingWave is a distributed SQL streaming database.",
    "Data in motion requires different processing paradigms than data at rest.",
    "Streaming analytics helps businesses respond to events in real time.",
    "Kafka is often used as a message broker for streaming applications.",
    "Window functions allow aggregation over specific time periods.",
    "Watermarks help manage late-arriving data in stream processing.",
    "Materialized views in streaming databases maintain up-to-date results.",
    "Continuous queries run forever, unlike traditional batch queries.",
    "Event time and processing time are two different concepts in streaming.",
    "The sentence stream pipeline counts words in real time.",
    "Tumbling windows are fixed size, non-overlapping time intervals.",
    "Machine learning models can be applied to streaming data too.",
    "Distributed stream processing scales to handle high data volumes.",
    "The benefits of streaming include lower latency and real-time insights.",
    "SQL simplifies complex stream processing operations.",
    "Stream processing is a paradigm shift in how we think about data.",
    "Modern businesses require real-time data for decision making.",
    "Streaming enables new applications that weren't possible with batch processing.",
];

/// Insert one uniformly drawn sentence per tick until the configured limit
/// is reached or a shutdown message arrives. Ids are dense from `start_id`,
/// so gaps in the table reveal dropped rows. Returns the number of rows
/// inserted.
pub async fn run_sentence_stream<S: SentenceSink>(
    sink: &S,
    args: &SentenceStreamArgs,
    mut shutdown: broadcast::Receiver<()>,
) -> anyhow::Result<u64> {
    ensure!(
        args.interval.is_finite() && args.interval >= 0.0,
        "interval must be a non-negative number of seconds, got {}",
        args.interval
    );

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let interval = Duration::from_secs_f64(args.interval);
    let mut next_id = args.start_id;
    let mut emitted: u64 = 0;

    tracing::info!(
        interval_secs = args.interval,
        limit = args.limit,
        "starting sentence stream"
    );

    while args.limit.map_or(true, |limit| emitted < limit) {
        match shutdown.try_recv() {
            Err(TryRecvError::Empty) => {}
            _ => break,
        }

        let content = SENTENCES[rng.gen_range(0..SENTENCES.len())];
        let record = SentenceRecord {
            id: next_id,
            content: content.to_string(),
            event_time: Utc::now(),
        };
        sink.insert_sentence(&record).await?;
        next_id += 1;
        emitted += 1;
        tracing::info!(id = record.id, content, "inserted sentence");

        if args.limit.is_some_and(|limit| emitted >= limit) {
            break;
        }

        tokio::select! {
            _ = shutdown.recv() => break,
            _ = tokio::time::sleep(interval) => {}
        }
    }

    tracing::info!(emitted, "sentence stream stopped");
    Ok(emitted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sim_core::testing::RecordingSink;

    fn args_with_limit(limit: u64) -> SentenceStreamArgs {
        SentenceStreamArgs {
            interval: 0.0,
            limit: Some(limit),
            seed: Some(42),
            ..SentenceStreamArgs::default()
        }
    }

    #[tokio::test]
    async fn test_ids_are_dense_from_the_start_id() {
        let sink = RecordingSink::new();
        let (_shutdown_tx, shutdown_rx) = broadcast::channel(1);

        let emitted = run_sentence_stream(&sink, &args_with_limit(5), shutdown_rx)
            .await
            .unwrap();
        assert_eq!(emitted, 5);

        let rows = sink.sentences().await;
        assert_eq!(rows.len(), 5);
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.id, 100 + i as i64);
            assert!(SENTENCES.contains(&row.content.as_str()));
        }
    }

    #[tokio::test]
    async fn test_start_id_is_honored() {
        let sink = RecordingSink::new();
        let (_shutdown_tx, shutdown_rx) = broadcast::channel(1);
        let mut args = args_with_limit(1);
        args.start_id = 9000;

        run_sentence_stream(&sink, &args, shutdown_rx).await.unwrap();
        assert_eq!(sink.sentences().await[0].id, 9000);
    }

    #[tokio::test]
    async fn test_same_seed_draws_the_same_sentences() {
        let (_shutdown_tx, rx_a) = broadcast::channel::<()>(1);
        let (_shutdown_tx_b, rx_b) = broadcast::channel::<()>(1);
        let sink_a = RecordingSink::new();
        let sink_b = RecordingSink::new();

        run_sentence_stream(&sink_a, &args_with_limit(10), rx_a)
            .await
            .unwrap();
        run_sentence_stream(&sink_b, &args_with_limit(10), rx_b)
            .await
            .unwrap();

        let contents_a: Vec<String> = sink_a
            .sentences()
            .await
            .into_iter()
            .map(|row| row.content)
            .collect();
        let contents_b: Vec<String> = sink_b
            .sentences()
            .await
            .into_iter()
            .map(|row| row.content)
            .collect();
        assert_eq!(contents_a, contents_b);
    }

    #[tokio::test]
    async fn test_shutdown_before_the_first_tick_inserts_nothing() {
        let sink = RecordingSink::new();
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
        shutdown_tx.send(()).unwrap();

        let args = SentenceStreamArgs {
            interval: 0.0,
            ..SentenceStreamArgs::default()
        };
        let emitted = run_sentence_stream(&sink, &args, shutdown_rx).await.unwrap();
        assert_eq!(emitted, 0);
        assert!(sink.sentences().await.is_empty());
    }
}
