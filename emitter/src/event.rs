use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Closed set of event classes the routing policy discriminates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    Default,
    Lightweight,
    /// Part of the public event surface but never routed: heavyweight
    /// payloads go through a dedicated offline upload path.
    Heavyweight,
}

/// One unit of telemetry. Built by the caller right before emission and
/// immutable afterwards; once routed it is shared read-only with every
/// selected pipeline behind an `Arc`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TelemetryEvent {
    pub uuid: Uuid,
    pub name: String,
    pub category: EventCategory,
    pub properties: HashMap<String, Value>,
}

impl TelemetryEvent {
    pub fn new(name: impl Into<String>, category: EventCategory) -> TelemetryEvent {
        TelemetryEvent {
            uuid: Uuid::now_v7(),
            name: name.into(),
            category,
            properties: HashMap::new(),
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: Value) -> TelemetryEvent {
        self.properties.insert(key.into(), value);
        self
    }
}

/// What the router consumes. Carries at most one event and lives only for
/// the duration of one `route` call; a request without an event routes to
/// nowhere, which is a no-op rather than an error.
#[derive(Debug, Default)]
pub struct RoutingRequest {
    event: Option<TelemetryEvent>,
}

impl RoutingRequest {
    pub fn single(event: TelemetryEvent) -> RoutingRequest {
        RoutingRequest { event: Some(event) }
    }

    pub fn empty() -> RoutingRequest {
        RoutingRequest { event: None }
    }

    pub fn into_event(self) -> Option<TelemetryEvent> {
        self.event
    }
}

impl From<TelemetryEvent> for RoutingRequest {
    fn from(event: TelemetryEvent) -> RoutingRequest {
        RoutingRequest::single(event)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{EventCategory, RoutingRequest, TelemetryEvent};

    #[test]
    fn events_get_distinct_uuids() {
        let a = TelemetryEvent::new("match_start", EventCategory::Default);
        let b = TelemetryEvent::new("match_start", EventCategory::Default);

        assert_ne!(a.uuid, b.uuid);
    }

    #[test]
    fn properties_accumulate() {
        let event = TelemetryEvent::new("match_start", EventCategory::Lightweight)
            .with_property("map", json!("de_dust2"))
            .with_property("party", json!({"size": 4, "cross_play": true}));

        assert_eq!(event.properties.len(), 2);
        assert_eq!(event.properties["map"], json!("de_dust2"));
        assert_eq!(event.properties["party"]["size"], json!(4));
    }

    #[test]
    fn empty_request_carries_no_event() {
        assert!(RoutingRequest::empty().into_event().is_none());

        let event = TelemetryEvent::new("match_start", EventCategory::Default);
        let wrapped = RoutingRequest::from(event.clone()).into_event();
        assert_eq!(wrapped, Some(event));
    }
}
