use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde_json::{json, Map, Value};
use shared::protocol::{event_timestamp, StatsSummary, TrackedEvent};
use thiserror::Error;
use tokio::{sync::Mutex, task::JoinHandle};
use tracing::{debug, warn};

pub mod gallery;

/// Sentinel actor id used when the host never supplies a real one.
pub const ANONYMOUS_ACTOR_ID: &str = "anonymous";

/// Seam to the hosting shell. The core only depends on its ability to
/// eventually provide an actor id; everything else about the host is
/// irrelevant here.
#[async_trait]
pub trait HostBridge: Send + Sync {
    async fn actor_id(&self) -> Option<String>;
}

/// Null bridge for shells (and tests) without a host environment.
pub struct MissingHostBridge;

#[async_trait]
impl HostBridge for MissingHostBridge {
    async fn actor_id(&self) -> Option<String> {
        None
    }
}

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub endpoint: String,
    pub actor_poll_attempts: usize,
    pub actor_poll_interval: Duration,
    pub debounce_quiet_period: Duration,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://analytics.example.com/collect".to_string(),
            actor_poll_attempts: 6,
            actor_poll_interval: Duration::from_millis(500),
            debounce_quiet_period: Duration::from_secs(3),
        }
    }
}

#[derive(Debug, Error)]
pub enum SinkDeliveryError {
    #[error("sink request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("sink responded with status {0}")]
    Status(reqwest::StatusCode),
}

struct LoggerState {
    actor_id: Option<String>,
    dedup_markers: HashMap<String, Instant>,
}

/// Emits named interaction events to the remote sink. Delivery failures are
/// logged and swallowed; they never reach the caller and never block
/// browsing. Dedup markers live in memory for the session, keyed by the
/// caller's (event name + discriminator) string, each with its own TTL.
pub struct InteractionLogger {
    http: Client,
    config: LoggerConfig,
    bridge: Arc<dyn HostBridge>,
    state: Mutex<LoggerState>,
}

impl InteractionLogger {
    pub fn new(bridge: Arc<dyn HostBridge>, config: LoggerConfig) -> Arc<Self> {
        Arc::new(Self {
            http: Client::new(),
            config,
            bridge,
            state: Mutex::new(LoggerState {
                actor_id: None,
                dedup_markers: HashMap::new(),
            }),
        })
    }

    /// Push path for shells that already know the actor id at startup.
    pub async fn set_actor_id(&self, actor_id: impl Into<String>) {
        self.state.lock().await.actor_id = Some(actor_id.into());
    }

    /// Session cache first, then a bounded poll of the host bridge (the id
    /// arrives asynchronously on real hosts), then the anonymous sentinel.
    /// The sentinel is never cached: a later event may still find the id.
    async fn resolve_actor_id(&self) -> String {
        if let Some(actor_id) = self.state.lock().await.actor_id.clone() {
            return actor_id;
        }

        for attempt in 0..self.config.actor_poll_attempts {
            if let Some(actor_id) = self.bridge.actor_id().await {
                self.state.lock().await.actor_id = Some(actor_id.clone());
                return actor_id;
            }
            if attempt + 1 < self.config.actor_poll_attempts {
                tokio::time::sleep(self.config.actor_poll_interval).await;
            }
        }

        warn!(
            attempts = self.config.actor_poll_attempts,
            "actor id unresolved; emitting as anonymous"
        );
        ANONYMOUS_ACTOR_ID.to_string()
    }

    /// Emits one event unconditionally.
    pub async fn track(&self, event: &str, detail: Map<String, Value>) {
        let payload = TrackedEvent {
            actor_id: self.resolve_actor_id().await,
            event: event.to_string(),
            ts: event_timestamp(Utc::now()),
            detail,
        };
        if let Err(err) = self.deliver(&payload).await {
            warn!(event = payload.event.as_str(), "analytics delivery failed: {err}");
        }
    }

    /// Emits at most once per dedup key within `ttl`. Returns whether the
    /// event was actually emitted. Check-then-set is atomic for the single
    /// logical session thread; expired markers are pruned on the way.
    pub async fn track_once(
        &self,
        dedup_key: &str,
        ttl: Duration,
        event: &str,
        detail: Map<String, Value>,
    ) -> bool {
        {
            let mut state = self.state.lock().await;
            let now = Instant::now();
            state.dedup_markers.retain(|_, expires_at| *expires_at > now);
            if state.dedup_markers.contains_key(dedup_key) {
                debug!(key = dedup_key, "event suppressed by dedup marker");
                return false;
            }
            state.dedup_markers.insert(dedup_key.to_string(), now + ttl);
        }
        self.track(event, detail).await;
        true
    }

    async fn deliver(&self, payload: &TrackedEvent) -> Result<(), SinkDeliveryError> {
        let response = self
            .http
            .post(&self.config.endpoint)
            .json(payload)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(SinkDeliveryError::Status(response.status()));
        }
        debug!(event = payload.event.as_str(), "analytics event delivered");
        Ok(())
    }
}

/// Builds an event detail map from a `json!` object literal.
pub fn detail(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

struct DebounceInner {
    min: f64,
    max: f64,
    sum: f64,
    count: u64,
    moved: bool,
    pending: Option<JoinHandle<()>>,
}

impl DebounceInner {
    fn reset(&mut self) {
        self.min = 0.0;
        self.max = 0.0;
        self.sum = 0.0;
        self.count = 0;
        self.moved = false;
    }
}

/// Coalesces a burst of slider-driven value changes into one summary event.
/// Every `record` cancels the pending flush and arms a new one; the summary
/// goes out only after a quiet period with no further change, and not at all
/// if the value never left its baseline.
pub struct StatsDebouncer {
    logger: Arc<InteractionLogger>,
    event: String,
    baseline: Option<f64>,
    quiet_period: Duration,
    inner: Arc<Mutex<DebounceInner>>,
}

impl StatsDebouncer {
    pub fn new(
        logger: Arc<InteractionLogger>,
        event: impl Into<String>,
        baseline: Option<f64>,
    ) -> Arc<Self> {
        let quiet_period = logger.config.debounce_quiet_period;
        Arc::new(Self {
            logger,
            event: event.into(),
            baseline,
            quiet_period,
            inner: Arc::new(Mutex::new(DebounceInner {
                min: 0.0,
                max: 0.0,
                sum: 0.0,
                count: 0,
                moved: false,
                pending: None,
            })),
        })
    }

    pub async fn record(self: &Arc<Self>, value: f64) {
        let mut inner = self.inner.lock().await;
        if inner.count == 0 {
            inner.min = value;
            inner.max = value;
        } else {
            inner.min = inner.min.min(value);
            inner.max = inner.max.max(value);
        }
        inner.sum += value;
        inner.count += 1;
        inner.moved |= self.baseline.map_or(true, |baseline| value != baseline);

        if let Some(pending) = inner.pending.take() {
            pending.abort();
        }
        let debouncer = Arc::clone(self);
        inner.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(debouncer.quiet_period).await;
            debouncer.flush().await;
        }));
    }

    async fn flush(&self) {
        let summary = {
            let mut inner = self.inner.lock().await;
            inner.pending = None;
            if inner.count == 0 || !inner.moved {
                debug!(event = self.event.as_str(), "debounced stats never moved; skipping flush");
                inner.reset();
                return;
            }
            let summary = StatsSummary {
                min: inner.min,
                max: inner.max,
                mean: inner.sum / inner.count as f64,
                count: inner.count,
            };
            inner.reset();
            summary
        };

        self.logger
            .track(
                &self.event,
                detail(json!({
                    "min": summary.min,
                    "max": summary.max,
                    "mean": summary.mean,
                    "count": summary.count,
                })),
            )
            .await;
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;

#[cfg(test)]
#[path = "tests/gallery_tests.rs"]
mod gallery_tests;
