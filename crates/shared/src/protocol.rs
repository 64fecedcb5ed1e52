use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One outbound analytics message. The sink receives exactly this shape,
/// once per emitted, non-deduplicated event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedEvent {
    pub actor_id: String,
    pub event: String,
    /// ISO-8601 with millisecond precision and no timezone offset.
    pub ts: String,
    #[serde(default)]
    pub detail: Map<String, Value>,
}

/// Running summary a debounced emitter accumulates over a burst of
/// slider-driven changes before flushing as one event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatsSummary {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub count: u64,
}

pub fn event_timestamp(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%dT%H:%M:%S%.3f").to_string()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn timestamp_has_millisecond_precision_and_no_offset() {
        let instant = Utc.with_ymd_and_hms(2024, 3, 5, 7, 9, 11).unwrap()
            + chrono::Duration::milliseconds(42);
        assert_eq!(event_timestamp(instant), "2024-03-05T07:09:11.042");
    }
}
