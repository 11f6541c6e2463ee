use std::collections::VecDeque;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use chartcast_core::config::RECENT_EVENTS_CAP;

/// One accepted alert, as kept for the debug page.
#[derive(Debug, Clone, Serialize)]
pub struct RecentEvent {
    pub timestamp: DateTime<Utc>,
    pub payload: Value,
    pub caption: String,
}

/// Bounded in-memory log of recently accepted alerts, newest first.
///
/// Best-effort and local to one process: capacity [`RECENT_EVENTS_CAP`],
/// nothing is persisted, and replicas do not see each other's events.
/// Append and truncate happen under one lock so concurrent requests never
/// corrupt the sequence.
pub struct EventRecorder {
    events: Mutex<VecDeque<RecentEvent>>,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(VecDeque::with_capacity(RECENT_EVENTS_CAP)),
        }
    }

    /// Prepend an event, evicting the oldest past capacity.
    pub fn record(&self, timestamp: DateTime<Utc>, payload: Value, caption: String) {
        let mut events = self.events.lock().expect("event buffer poisoned");
        events.push_front(RecentEvent {
            timestamp,
            payload,
            caption,
        });
        events.truncate(RECENT_EVENTS_CAP);
    }

    /// Newest-first copy of the current buffer.
    pub fn snapshot(&self) -> Vec<RecentEvent> {
        self.events
            .lock()
            .expect("event buffer poisoned")
            .iter()
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.events.lock().expect("event buffer poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for EventRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp_millis(1_732_902_300_000).unwrap()
    }

    #[test]
    fn keeps_only_the_newest_at_capacity() {
        let recorder = EventRecorder::new();
        for i in 0..=RECENT_EVENTS_CAP {
            recorder.record(now(), json!({"seq": i}), format!("caption {i}"));
        }

        let events = recorder.snapshot();
        assert_eq!(events.len(), RECENT_EVENTS_CAP);
        // 51 appends of 0..=50: 0 was evicted, 50 is newest
        assert_eq!(events[0].payload["seq"], RECENT_EVENTS_CAP);
        assert_eq!(events[RECENT_EVENTS_CAP - 1].payload["seq"], 1);
    }

    #[test]
    fn snapshot_is_newest_first() {
        let recorder = EventRecorder::new();
        recorder.record(now(), json!({"seq": 1}), "first".into());
        recorder.record(now(), json!({"seq": 2}), "second".into());

        let events = recorder.snapshot();
        assert_eq!(events[0].caption, "second");
        assert_eq!(events[1].caption, "first");
    }

    #[test]
    fn concurrent_appends_never_exceed_capacity() {
        use std::sync::Arc;

        let recorder = Arc::new(EventRecorder::new());
        let mut handles = Vec::new();
        for t in 0..8 {
            let recorder = Arc::clone(&recorder);
            handles.push(std::thread::spawn(move || {
                for i in 0..20 {
                    recorder.record(now(), json!({"thread": t, "seq": i}), String::new());
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(recorder.len(), RECENT_EVENTS_CAP);
    }
}
