//! # Integration Test Flows
//!
//! A telemetry-style pipeline built from the public crates:
//!
//! ```text
//! producer threads ──insert──► SharedAggregationQueue ──drain_into──► ChannelSink
//!                                   │ observer                            │
//!                                   ▼                                     ▼
//!                              QueueMetrics                         async listener
//! ```
//!
//! Checked end to end:
//!
//! 1. Every update reaches the listener exactly once
//! 2. Updates from one source arrive in the order they were produced
//! 3. A full bounded queue refuses new rounds until drained
//! 4. A vanished listener never costs a value

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;
    use tokio::time::timeout;

    use aggregation_queue::{
        AggregationQueue, Bin, ChannelSink, QueueConfig, QueueError, SharedAggregationQueue,
        SinkError,
    };
    use queue_telemetry::{QueueMetrics, TelemetryConfig};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    /// Channel update as a telemetry source would emit it.
    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Sample {
        seq: u32,
        value: f64,
    }

    fn observed_queue(config: QueueConfig) -> (SharedAggregationQueue<String, Sample>, QueueMetrics) {
        let metrics = QueueMetrics::new(&TelemetryConfig::default()).expect("metrics");
        let queue = AggregationQueue::with_config(config).with_observer(Arc::new(metrics.clone()));
        (SharedAggregationQueue::from_queue(queue), metrics)
    }

    fn spawn_producers(
        queue: &SharedAggregationQueue<String, Sample>,
        sources: u32,
        updates: u32,
    ) -> Vec<thread::JoinHandle<()>> {
        (0..sources)
            .map(|source| {
                let queue = queue.clone();
                thread::spawn(move || {
                    for seq in 0..updates {
                        let sample = Sample {
                            seq,
                            value: f64::from(seq) * 0.5,
                        };
                        queue.insert(format!("source-{source}"), sample);
                        if seq % 16 == 0 {
                            thread::yield_now();
                        }
                    }
                })
            })
            .collect()
    }

    fn record(seen: &mut HashMap<String, Vec<u32>>, bin: Bin<String, Sample>) {
        for (source, sample) in bin {
            seen.entry(source).or_default().push(sample.seq);
        }
    }

    // =============================================================================
    // FLOW: PRODUCERS → QUEUE → CHANNEL → LISTENER
    // =============================================================================

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_every_update_delivered_once_in_source_order() {
        const SOURCES: u32 = 6;
        const UPDATES: u32 = 200;

        let (queue, metrics) = observed_queue(QueueConfig::default());
        let (mut sink, mut receiver) = ChannelSink::channel();

        let producers = spawn_producers(&queue, SOURCES, UPDATES);

        // Notifier: drain whatever is queued until producers finish
        let notifier_queue = queue.clone();
        let notifier = thread::spawn(move || {
            let mut rounds = 0usize;
            for producer in producers {
                rounds += notifier_queue.drain_into(&mut sink).expect("listener alive");
                producer.join().expect("producer panicked");
            }
            rounds += notifier_queue.drain_into(&mut sink).expect("listener alive");
            rounds
        });

        let rounds = notifier.join().expect("notifier panicked");
        assert!(queue.is_empty());

        let mut seen: HashMap<String, Vec<u32>> = HashMap::new();
        for _ in 0..rounds {
            let bin = timeout(Duration::from_secs(1), receiver.recv())
                .await
                .expect("timeout")
                .expect("bin");
            assert!(!bin.is_empty());
            record(&mut seen, bin);
        }

        let expected: Vec<u32> = (0..UPDATES).collect();
        assert_eq!(seen.len(), SOURCES as usize);
        for seqs in seen.values() {
            assert_eq!(seqs, &expected);
        }

        assert_eq!(metrics.values_inserted.get(), u64::from(SOURCES * UPDATES));
        assert_eq!(metrics.bins_created.get(), rounds as u64);
        assert_eq!(metrics.bins_drained.get(), rounds as u64);
        assert_eq!(metrics.bins_pending.get(), 0);
    }

    #[test]
    fn test_one_round_per_repeat_without_consumer() {
        let (queue, metrics) = observed_queue(QueueConfig::default());
        for round in 0..5u32 {
            for channel in ["temp", "pressure", "voltage"] {
                queue.insert(
                    channel.to_string(),
                    Sample {
                        seq: round,
                        value: 0.0,
                    },
                );
            }
        }

        assert_eq!(queue.len(), 5);
        assert_eq!(metrics.bins_created.get(), 5);

        for round in 0..5u32 {
            let bin = queue.poll().expect("round");
            assert_eq!(bin.len(), 3);
            assert!(bin.iter().all(|(_, sample)| sample.seq == round));
        }
        assert!(queue.poll().is_none());
    }

    // =============================================================================
    // FLOW: BOUNDED QUEUE
    // =============================================================================

    #[test]
    fn test_bounded_queue_refuses_until_drained() {
        let (queue, metrics) = observed_queue(QueueConfig::bounded(2));
        let sample = |seq| Sample { seq, value: 1.0 };

        assert_eq!(queue.try_insert("temp".to_string(), sample(0)), Ok(0));
        assert_eq!(queue.try_insert("temp".to_string(), sample(1)), Ok(1));
        assert_eq!(
            queue.try_insert("temp".to_string(), sample(2)),
            Err(QueueError::CapacityExceeded { max_bins: 2 })
        );
        // Other channels still fit in open rounds
        assert_eq!(queue.try_insert("volt".to_string(), sample(0)), Ok(0));
        assert_eq!(metrics.inserts_rejected.get(), 1);

        let first = queue.poll().expect("first round");
        assert_eq!(first.len(), 2);
        assert_eq!(queue.try_insert("temp".to_string(), sample(2)), Ok(1));
    }

    // =============================================================================
    // FLOW: LISTENER GOES AWAY
    // =============================================================================

    #[tokio::test]
    async fn test_closed_listener_keeps_rounds_for_next_listener() {
        let (queue, _metrics) = observed_queue(QueueConfig::default());
        for seq in 0..3 {
            queue.insert("temp".to_string(), Sample { seq, value: 0.0 });
        }

        let (mut dead_sink, dead_receiver) = ChannelSink::channel();
        drop(dead_receiver);
        assert_eq!(
            queue.drain_into(&mut dead_sink),
            Err(QueueError::Sink(SinkError::Closed))
        );
        assert_eq!(queue.len(), 3);

        let (mut sink, mut receiver) = ChannelSink::channel();
        assert_eq!(queue.drain_into(&mut sink), Ok(3));

        let mut seqs = Vec::new();
        while let Ok(bin) = receiver.try_recv() {
            seqs.push(bin.get(&"temp".to_string()).map(|s| s.seq));
        }
        assert_eq!(seqs, vec![Some(0), Some(1), Some(2)]);
    }
}
