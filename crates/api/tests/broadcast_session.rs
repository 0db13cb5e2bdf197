//! Tests for the per-subscriber broadcast loop.
//!
//! Sessions run against an in-memory store and a recording sink under a
//! paused clock, so tick timing is exact.

mod common;

use std::future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use common::FakeStore;
use sensorhub_api::ws::{BroadcastSession, SessionEnd, SessionRegistry, SnapshotSink, TransportError};
use sensorhub_core::cache::ThresholdCache;
use sensorhub_core::synthesis::{Snapshot, SynthesisEngine};
use sensorhub_core::threshold::{self, Threshold};
use tokio_util::sync::CancellationToken;

const INTERVAL: Duration = Duration::from_millis(100);

/// Records every snapshot; optionally fails on the n-th write (1-based).
#[derive(Default)]
struct RecordingSink {
    sent: Vec<Snapshot>,
    fail_on: Option<usize>,
    attempts: usize,
}

impl RecordingSink {
    fn failing_on(n: usize) -> Self {
        Self {
            fail_on: Some(n),
            ..Self::default()
        }
    }
}

#[async_trait]
impl SnapshotSink for RecordingSink {
    async fn send_snapshot(&mut self, snapshot: &Snapshot) -> Result<(), TransportError> {
        self.attempts += 1;
        if self.fail_on == Some(self.attempts) {
            return Err(TransportError::Write(axum::Error::new("connection reset")));
        }
        self.sent.push(snapshot.clone());
        Ok(())
    }
}

fn engine(store: Arc<FakeStore>, cache: Arc<ThresholdCache>) -> SynthesisEngine {
    SynthesisEngine::new(store, cache)
}

fn spawn_session(
    conn_id: &'static str,
    engine: SynthesisEngine,
    mut sink: RecordingSink,
    shutdown: CancellationToken,
) -> tokio::task::JoinHandle<(SessionEnd, RecordingSink)> {
    tokio::spawn(async move {
        let end = BroadcastSession::new(conn_id, engine, INTERVAL)
            .run(&mut sink, future::pending(), shutdown)
            .await;
        (end, sink)
    })
}

// ---------------------------------------------------------------------------
// Test: one subscriber's write failure leaves the others running
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn write_failure_ends_only_that_session() {
    let store = FakeStore::new();
    let cache = Arc::new(ThresholdCache::with_defaults());
    let engine = engine(store.clone(), cache);
    let registry = SessionRegistry::new();

    let a = spawn_session(
        "a",
        engine.clone(),
        RecordingSink::failing_on(5),
        registry.register("a".to_string()).await,
    );
    let b = spawn_session(
        "b",
        engine,
        RecordingSink::default(),
        registry.register("b".to_string()).await,
    );

    let (end_a, sink_a) = a.await.unwrap();
    assert_eq!(end_a, SessionEnd::WriteFailed);
    assert_eq!(sink_a.sent.len(), 4);

    tokio::time::sleep(INTERVAL * 5 + INTERVAL / 2).await;
    registry.shutdown_all().await;

    let (end_b, sink_b) = b.await.unwrap();
    assert_eq!(end_b, SessionEnd::Shutdown);
    assert!(sink_b.sent.len() >= 9, "b delivered {}", sink_b.sent.len());
}

// ---------------------------------------------------------------------------
// Test: a failed synthesis pass skips the tick without ending the session
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn synthesis_failure_skips_the_tick() {
    let store = FakeStore::new();
    store.fail_reads(true);
    let cache = Arc::new(ThresholdCache::with_defaults());
    let shutdown = CancellationToken::new();

    let session = spawn_session(
        "flaky",
        engine(store.clone(), cache),
        RecordingSink::default(),
        shutdown.clone(),
    );

    // Ticks at 100, 200 and 300 ms fail.
    tokio::time::sleep(INTERVAL * 3 + INTERVAL / 2).await;
    store.fail_reads(false);
    // Ticks at 400, 500 and 600 ms succeed.
    tokio::time::sleep(INTERVAL * 3).await;
    shutdown.cancel();

    let (end, sink) = session.await.unwrap();
    assert_eq!(end, SessionEnd::Shutdown);
    assert_eq!(sink.sent.len(), 3);
    assert_eq!(sink.attempts, 3);
}

// ---------------------------------------------------------------------------
// Test: a threshold update shows up on the next tick
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn threshold_update_reaches_the_next_snapshot() {
    let store = FakeStore::new();
    let cache = Arc::new(ThresholdCache::with_defaults());
    let shutdown = CancellationToken::new();

    let session = spawn_session(
        "watcher",
        engine(store.clone(), Arc::clone(&cache)),
        RecordingSink::default(),
        shutdown.clone(),
    );

    tokio::time::sleep(INTERVAL + INTERVAL / 2).await;
    threshold::update_threshold(
        store.as_ref(),
        &cache,
        Threshold::new("humidity", 40.0, 60.0),
    )
    .await
    .unwrap();
    tokio::time::sleep(INTERVAL).await;
    shutdown.cancel();

    let (_, sink) = session.await.unwrap();
    assert_eq!(sink.sent.len(), 2);

    let humidity_bound = |snapshot: &Snapshot| {
        snapshot
            .thresholds
            .iter()
            .find(|t| t.sensor_type == "humidity")
            .map(|t| (t.min_value, t.max_value))
            .unwrap()
    };
    assert_eq!(humidity_bound(&sink.sent[0]), (30.0, 80.0));
    assert_eq!(humidity_bound(&sink.sent[1]), (40.0, 60.0));

    // The newest humidity reading comes first and was drawn from the new bound.
    let newest = sink.sent[1]
        .data
        .iter()
        .find(|r| r.sensor_type == "humidity")
        .unwrap();
    assert!((40.0..=60.0).contains(&newest.value));
}

// ---------------------------------------------------------------------------
// Test: the first snapshot arrives one interval after the session opens
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn first_tick_waits_one_interval() {
    let store = FakeStore::new();
    let cache = Arc::new(ThresholdCache::with_defaults());
    let shutdown = CancellationToken::new();

    let session = spawn_session(
        "patient",
        engine(store.clone(), cache),
        RecordingSink::default(),
        shutdown.clone(),
    );

    tokio::time::sleep(INTERVAL / 2).await;
    assert_eq!(store.reading_count(), 0);
    shutdown.cancel();

    let (end, sink) = session.await.unwrap();
    assert_eq!(end, SessionEnd::Shutdown);
    assert!(sink.sent.is_empty());
}

// ---------------------------------------------------------------------------
// Test: the session ends as soon as the subscriber goes away
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn disconnect_ends_the_session() {
    let store = FakeStore::new();
    let cache = Arc::new(ThresholdCache::with_defaults());
    let mut sink = RecordingSink::default();

    let end = BroadcastSession::new("leaver", engine(store, cache), INTERVAL)
        .run(
            &mut sink,
            tokio::time::sleep(INTERVAL * 2 + INTERVAL / 2),
            CancellationToken::new(),
        )
        .await;

    assert_eq!(end, SessionEnd::Disconnected);
    assert_eq!(sink.sent.len(), 2);
}

// ---------------------------------------------------------------------------
// Test: every snapshot carries one fresh reading per type
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn snapshot_holds_history_for_every_type() {
    let store = FakeStore::new();
    let cache = Arc::new(ThresholdCache::with_defaults());
    let mut sink = RecordingSink::default();

    BroadcastSession::new("counter", engine(store.clone(), cache), INTERVAL)
        .run(
            &mut sink,
            tokio::time::sleep(INTERVAL * 3 + INTERVAL / 2),
            CancellationToken::new(),
        )
        .await;

    assert_eq!(store.reading_count(), 9);
    let last = sink.sent.last().unwrap();
    for ty in ["humidity", "pressure", "temperature"] {
        assert_eq!(last.data.iter().filter(|r| r.sensor_type == ty).count(), 3);
    }
}
