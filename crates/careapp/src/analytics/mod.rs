//! Local analytics: a visit counter and a bounded, newest-first event log.
//!
//! Recording is best-effort. Every operation on [`EventStore`] absorbs
//! storage failures and corrupt stored values: reads substitute a default
//! (0 visits, empty log) and writes are dropped with a warning. A write that
//! depends on a read the backend refused is skipped, so stored data is never
//! replaced by a default. Nothing is ever returned as an error to the caller.
//!
//! # Example
//!
//! ```
//! use careapp::analytics::{payload, EventStore};
//! use careapp::storage::MemoryStore;
//!
//! let mut analytics = EventStore::new(MemoryStore::new());
//! assert_eq!(analytics.record_visit(), Some(1));
//! analytics.record_event("tab_change", payload([("tab", "timeline")]));
//!
//! let stats = analytics.read_stats();
//! assert_eq!(stats.visit_count, 1);
//! assert_eq!(stats.event_log[0].name, "tab_change");
//! assert_eq!(stats.event_log[1].name, "visit");
//! ```

mod event;
mod fallback;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::storage::KeyValueStore;

pub use event::{payload, Event, Payload};
pub use fallback::{Fallback, FallbackCause};

/// Key holding the visit counter as a decimal string.
pub const VISIT_KEY: &str = "careapp_visits";

/// Key holding the JSON-encoded event log.
pub const EVENTS_KEY: &str = "careapp_events";

/// Maximum number of events kept by default.
pub const DEFAULT_CAPACITY: usize = 200;

/// Name of the event appended by [`EventStore::record_visit`].
pub const VISIT_EVENT: &str = "visit";

/// Snapshot of the local analytics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    /// Number of recorded application loads.
    pub visit_count: u64,
    /// Recorded events, newest first.
    pub event_log: Vec<Event>,
}

/// Current wall-clock time in milliseconds since the Unix epoch.
#[must_use]
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Parse a stored counter from its leading decimal digits.
///
/// Trailing garbage is ignored (`"12abc"` is 12), matching counters written by
/// earlier clients. No leading digit means the value is corrupt.
fn parse_count(raw: &str) -> Option<u64> {
    let trimmed = raw.trim_start();
    let digits = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .map_or(trimmed, |end| &trimmed[..end]);
    digits.parse().ok()
}

/// Best-effort event recorder over a key-value store.
#[derive(Debug)]
pub struct EventStore<S> {
    store: S,
    capacity: usize,
    clock: fn() -> i64,
}

impl<S: KeyValueStore> EventStore<S> {
    /// Create a recorder keeping [`DEFAULT_CAPACITY`] events.
    pub fn new(store: S) -> Self {
        Self::with_capacity(store, DEFAULT_CAPACITY)
    }

    /// Create a recorder keeping at most `capacity` events.
    pub fn with_capacity(store: S, capacity: usize) -> Self {
        Self {
            store,
            capacity,
            clock: now_millis,
        }
    }

    /// Replace the timestamp source.
    #[must_use]
    pub fn with_clock(mut self, clock: fn() -> i64) -> Self {
        self.clock = clock;
        self
    }

    /// Maximum number of events kept.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consume the recorder, returning the underlying store.
    pub fn into_inner(self) -> S {
        self.store
    }

    /// Read the visit counter.
    pub fn visit_count(&self) -> Fallback<u64> {
        Fallback::resolve(self.store.get(VISIT_KEY), parse_count)
    }

    /// Read the event log, newest first.
    pub fn event_log(&self) -> Fallback<Vec<Event>> {
        Fallback::resolve(self.store.get(EVENTS_KEY), |raw| {
            serde_json::from_str(raw).ok()
        })
    }

    /// Count one application load.
    ///
    /// Increments and persists the counter, then appends a `visit` event with
    /// payload `{count, ts}`. Returns the new count, or `None` if the counter
    /// could not be read from or persisted to the backend.
    pub fn record_visit(&mut self) -> Option<u64> {
        let Some(current) = self.visit_count().into_writable() else {
            warn!("Visit not counted: stored count could not be read");
            return None;
        };
        let count = current.saturating_add(1);
        let now = (self.clock)();

        if let Err(e) = self.store.set(VISIT_KEY, &count.to_string()) {
            warn!("Failed to persist visit count: {}", e);
            return None;
        }

        let visit = payload([("count", Value::from(count)), ("ts", Value::from(now))]);
        self.append(Event::new(VISIT_EVENT, visit, now));
        debug!("Recorded visit {}", count);
        Some(count)
    }

    /// Prepend a named event to the log, dropping the oldest past capacity.
    pub fn record_event(&mut self, name: &str, payload: Payload) {
        let now = (self.clock)();
        self.append(Event::new(name, payload, now));
    }

    /// Read the counter and log, substituting defaults independently.
    pub fn read_stats(&self) -> Stats {
        Stats {
            visit_count: self.visit_count().into_inner(),
            event_log: self.event_log().into_inner(),
        }
    }

    /// Erase both the counter and the log.
    pub fn clear(&mut self) {
        for key in [VISIT_KEY, EVENTS_KEY] {
            if let Err(e) = self.store.remove(key) {
                warn!("Failed to clear {}: {}", key, e);
            }
        }
        debug!("Cleared local analytics");
    }

    fn append(&mut self, event: Event) {
        let name = event.name.clone();
        if let Err(e) = self.try_append(event) {
            warn!("Dropped event '{}': {}", name, e);
        }
    }

    fn try_append(&mut self, event: Event) -> Result<()> {
        let mut log = self
            .event_log()
            .into_writable()
            .ok_or_else(|| Error::unavailable("stored event log could not be read"))?;
        log.insert(0, event);
        log.truncate(self.capacity);

        let encoded = serde_json::to_string(&log)?;
        self.store.set(EVENTS_KEY, &encoded)
    }
}
