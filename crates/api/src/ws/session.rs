//! The per-subscriber broadcast loop.
//!
//! A session is open from a successful upgrade until the subscriber
//! disconnects, a write fails or the server shuts down. Every tick runs the
//! synthesis engine and pushes a [`Snapshot`]. A failed synthesis pass skips
//! the tick; a failed write ends the session.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use axum::extract::ws::{Message, WebSocket};
use futures::stream::SplitSink;
use futures::SinkExt;
use sensorhub_core::synthesis::{Snapshot, SynthesisEngine};
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Failure to deliver a snapshot to a subscriber.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Failed to encode snapshot: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("WebSocket write failed: {0}")]
    Write(#[from] axum::Error),
}

/// Outbound half of a subscriber channel.
#[async_trait]
pub trait SnapshotSink: Send {
    async fn send_snapshot(&mut self, snapshot: &Snapshot) -> Result<(), TransportError>;
}

#[async_trait]
impl SnapshotSink for SplitSink<WebSocket, Message> {
    async fn send_snapshot(&mut self, snapshot: &Snapshot) -> Result<(), TransportError> {
        let text = serde_json::to_string(snapshot)?;
        self.send(Message::Text(text.into())).await?;
        Ok(())
    }
}

/// Why a session stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The subscriber closed the connection or the read side failed.
    Disconnected,
    /// Writing a snapshot failed.
    WriteFailed,
    /// The server is shutting down.
    Shutdown,
}

/// Pushes a snapshot to one subscriber on a fixed interval.
pub struct BroadcastSession {
    conn_id: String,
    engine: SynthesisEngine,
    interval: Duration,
}

impl BroadcastSession {
    pub fn new(conn_id: impl Into<String>, engine: SynthesisEngine, interval: Duration) -> Self {
        Self {
            conn_id: conn_id.into(),
            engine,
            interval,
        }
    }

    /// Drive the session until it ends.
    ///
    /// The first tick fires one `interval` after the call. `disconnected`
    /// resolves when the subscriber goes away; `shutdown` is cancelled when
    /// the server stops.
    pub async fn run<T, D>(
        self,
        sink: &mut T,
        disconnected: D,
        shutdown: CancellationToken,
    ) -> SessionEnd
    where
        T: SnapshotSink + ?Sized,
        D: Future<Output = ()>,
    {
        let conn_id = self.conn_id.as_str();
        let mut ticker = tokio::time::interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(disconnected);

        tracing::info!(
            conn_id = %conn_id,
            interval_ms = self.interval.as_millis() as u64,
            "Broadcast session open"
        );

        let mut ticks: u64 = 0;
        let mut delivered: u64 = 0;
        let end = loop {
            tokio::select! {
                () = &mut disconnected => break SessionEnd::Disconnected,
                () = shutdown.cancelled() => break SessionEnd::Shutdown,
                _ = ticker.tick() => {
                    ticks += 1;
                    let snapshot = match self.engine.snapshot().await {
                        Ok(snapshot) => snapshot,
                        Err(e) => {
                            tracing::warn!(
                                conn_id = %conn_id,
                                tick = ticks,
                                error = %e,
                                "Synthesis failed, skipping tick"
                            );
                            continue;
                        }
                    };

                    if let Err(e) = sink.send_snapshot(&snapshot).await {
                        tracing::debug!(conn_id = %conn_id, tick = ticks, error = %e, "Snapshot write failed");
                        break SessionEnd::WriteFailed;
                    }
                    delivered += 1;
                }
            }
        };

        tracing::info!(
            conn_id = %conn_id,
            ticks,
            delivered,
            reason = ?end,
            "Broadcast session closed"
        );
        end
    }
}
