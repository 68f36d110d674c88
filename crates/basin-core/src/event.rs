//! Catalog lifecycle event infrastructure.
//!
//! Every committed mutation (create, alter, drop) produces a structured
//! event. Events are pure observability: they are emitted only after the
//! store confirms the write, emission is best-effort and never fails the
//! operation, and consumers must not drive control flow from them.
//!
//! The sink is an explicit collaborator handed to the registry at
//! construction, so there is no process-wide mutable logging state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::catalog::{Principal, Revision};
use crate::name::CatalogIdent;

/// Version of the event schema. Increment on breaking changes.
pub const REGISTRY_EVENT_VERSION: u32 = 1;

/// Lifecycle actions that produce events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum CatalogAction {
    /// A catalog record was created.
    Created,
    /// A catalog record was altered (change set committed).
    Altered,
    /// A catalog record was dropped.
    Dropped,
}

impl std::fmt::Display for CatalogAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Created => "CREATED",
            Self::Altered => "ALTERED",
            Self::Dropped => "DROPPED",
        };
        write!(f, "{s}")
    }
}

/// A committed lifecycle event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryEvent {
    /// Schema version for evolution.
    pub event_version: u32,

    /// Unique event identifier (ULID format).
    pub event_id: String,

    /// When the event occurred (UTC).
    pub occurred_at: DateTime<Utc>,

    /// The lifecycle action taken.
    pub action: CatalogAction,

    /// The catalog the action applied to.
    pub ident: CatalogIdent,

    /// Revision of the record after the action (`None` for drops).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revision: Option<Revision>,

    /// Principal that performed the action.
    pub principal: Principal,
}

impl RegistryEvent {
    /// Creates an event for a committed action.
    #[must_use]
    pub fn new(
        action: CatalogAction,
        ident: CatalogIdent,
        revision: Option<Revision>,
        principal: Principal,
    ) -> Self {
        Self {
            event_version: REGISTRY_EVENT_VERSION,
            event_id: ulid::Ulid::new().to_string(),
            occurred_at: Utc::now(),
            action,
            ident,
            revision,
            principal,
        }
    }
}

/// Trait for event sinks.
///
/// Implementations should be lightweight and non-blocking; buffer internally
/// if delivery is slow.
pub trait EventSink: Send + Sync {
    /// Emits one event.
    fn emit(&self, event: RegistryEvent);

    /// Flushes any buffered events. Default implementation is a no-op.
    fn flush(&self) {}
}

/// Event emitter handed to the registry at construction.
#[derive(Clone)]
pub struct EventEmitter {
    sink: Arc<dyn EventSink>,
}

impl std::fmt::Debug for EventEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventEmitter").finish_non_exhaustive()
    }
}

impl EventEmitter {
    /// Creates an emitter with the given sink.
    #[must_use]
    pub fn new(sink: Arc<dyn EventSink>) -> Self {
        Self { sink }
    }

    /// Creates an emitter that logs events via tracing (production default).
    #[must_use]
    pub fn with_tracing() -> Self {
        Self::new(Arc::new(TracingEventSink))
    }

    /// Creates an emitter backed by a capturing test sink.
    #[must_use]
    pub fn with_test_sink(sink: Arc<TestEventSink>) -> Self {
        Self::new(sink)
    }

    /// Emits an event to the configured sink.
    pub fn emit(&self, event: RegistryEvent) {
        self.sink.emit(event);
    }

    /// Flushes any buffered events.
    pub fn flush(&self) {
        self.sink.flush();
    }
}

/// Sink that emits events as structured tracing records under the
/// `registry` target.
#[derive(Debug, Default, Clone)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn emit(&self, event: RegistryEvent) {
        tracing::info!(
            target: "registry",
            event_id = %event.event_id,
            action = %event.action,
            ident = %event.ident,
            revision = ?event.revision.map(Revision::value),
            principal = %event.principal,
            "catalog_lifecycle"
        );
    }
}

/// Test sink that captures events for assertions.
#[derive(Debug, Default)]
pub struct TestEventSink {
    events: std::sync::Mutex<Vec<RegistryEvent>>,
}

impl TestEventSink {
    /// Creates a new empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of all captured events.
    #[must_use]
    pub fn events(&self) -> Vec<RegistryEvent> {
        self.events
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// Returns the number of captured events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.lock().map(|guard| guard.len()).unwrap_or(0)
    }

    /// Returns true if no events have been captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clears all captured events.
    pub fn clear(&self) {
        if let Ok(mut guard) = self.events.lock() {
            guard.clear();
        }
    }

    /// Returns the last captured event, if any.
    #[must_use]
    pub fn last(&self) -> Option<RegistryEvent> {
        self.events
            .lock()
            .ok()
            .and_then(|guard| guard.last().cloned())
    }

    /// Finds events by action.
    #[must_use]
    pub fn find_by_action(&self, action: CatalogAction) -> Vec<RegistryEvent> {
        self.events
            .lock()
            .map(|guard| {
                guard
                    .iter()
                    .filter(|e| e.action == action)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl EventSink for TestEventSink {
    fn emit(&self, event: RegistryEvent) {
        if let Ok(mut guard) = self.events.lock() {
            guard.push(event);
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    fn ident() -> CatalogIdent {
        CatalogIdent::of("prod-lake", "warehouse").expect("valid ident")
    }

    #[test]
    fn action_display() {
        assert_eq!(CatalogAction::Created.to_string(), "CREATED");
        assert_eq!(CatalogAction::Altered.to_string(), "ALTERED");
        assert_eq!(CatalogAction::Dropped.to_string(), "DROPPED");
    }

    #[test]
    fn event_has_unique_ids() {
        let a = RegistryEvent::new(
            CatalogAction::Created,
            ident(),
            Some(Revision::initial()),
            Principal::anonymous(),
        );
        let b = RegistryEvent::new(
            CatalogAction::Created,
            ident(),
            Some(Revision::initial()),
            Principal::anonymous(),
        );
        assert_ne!(a.event_id, b.event_id);
        assert_eq!(a.event_version, REGISTRY_EVENT_VERSION);
    }

    #[test]
    fn test_sink_captures_events() {
        let sink = Arc::new(TestEventSink::new());
        let emitter = EventEmitter::with_test_sink(sink.clone());

        emitter.emit(RegistryEvent::new(
            CatalogAction::Created,
            ident(),
            Some(Revision::initial()),
            Principal::anonymous(),
        ));
        emitter.emit(RegistryEvent::new(
            CatalogAction::Dropped,
            ident(),
            None,
            Principal::anonymous(),
        ));

        assert_eq!(sink.len(), 2);
        assert_eq!(sink.find_by_action(CatalogAction::Created).len(), 1);
        assert_eq!(
            sink.last().expect("event").action,
            CatalogAction::Dropped
        );

        sink.clear();
        assert!(sink.is_empty());
    }

    #[test]
    fn event_serde_roundtrip() {
        let event = RegistryEvent::new(
            CatalogAction::Altered,
            ident(),
            Some(Revision::initial().next()),
            Principal::new("user:alice").expect("valid"),
        );

        let json = serde_json::to_string(&event).expect("serialize");
        assert!(json.contains("\"action\":\"ALTERED\""));

        let parsed: RegistryEvent = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed.event_id, event.event_id);
        assert_eq!(parsed.action, event.action);
        assert_eq!(parsed.revision, event.revision);
    }

    #[test]
    fn drop_event_skips_revision() {
        let event = RegistryEvent::new(
            CatalogAction::Dropped,
            ident(),
            None,
            Principal::anonymous(),
        );
        let json = serde_json::to_string(&event).expect("serialize");
        assert!(!json.contains("revision"));
    }
}
