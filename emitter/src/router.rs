use std::collections::HashMap;
use std::sync::Arc;

use metrics::counter;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::api::PipelineError;
use crate::event::{EventCategory, RoutingRequest};
use crate::prometheus::report_dropped_events;
use crate::registry::{PipelineId, PipelineRegistry};

/// Category -> eligible pipelines table. Fixed at router construction and
/// evaluated once per event; lookup cost never depends on registry size or
/// per-event configuration, since this sits on the hot path of every
/// emitted event.
#[derive(Clone)]
pub struct RoutingPolicy {
    routes: HashMap<EventCategory, Vec<PipelineId>>,
}

impl Default for RoutingPolicy {
    /// The shipped table: Default and Lightweight events go to the common
    /// telemetry pipeline, everything else routes to nowhere.
    fn default() -> RoutingPolicy {
        RoutingPolicy::new([
            (EventCategory::Default, vec![PipelineId::CommonTelemetry]),
            (EventCategory::Lightweight, vec![PipelineId::CommonTelemetry]),
        ])
    }
}

impl RoutingPolicy {
    pub fn new(routes: impl IntoIterator<Item = (EventCategory, Vec<PipelineId>)>) -> RoutingPolicy {
        RoutingPolicy {
            routes: routes.into_iter().collect(),
        }
    }

    pub fn eligible(&self, category: EventCategory) -> &[PipelineId] {
        self.routes
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// The pending result of one pipeline accepting one event. Awaiting it is
/// optional: dropping the handle detaches the task and the dispatch keeps
/// running under the pipeline's own lifecycle.
pub struct DispatchHandle {
    pipeline: PipelineId,
    task: JoinHandle<Result<(), PipelineError>>,
}

impl DispatchHandle {
    pub fn pipeline(&self) -> PipelineId {
        self.pipeline
    }

    pub async fn outcome(self) -> Result<(), PipelineError> {
        match self.task.await {
            Ok(result) => result,
            Err(e) if e.is_panic() => Err(PipelineError::DispatchPanicked),
            Err(_) => Err(PipelineError::DispatchCancelled),
        }
    }
}

/// Applies the routing policy and fans events out to eligible pipelines.
///
/// `route` only starts dispatches, it never awaits them, so it returns as
/// soon as every selected pipeline's task has been spawned. The registry is
/// read-only here, so a router can be shared across tasks freely.
pub struct Router {
    registry: PipelineRegistry,
    policy: RoutingPolicy,
}

impl Router {
    pub fn new(registry: PipelineRegistry) -> Router {
        Router::with_policy(registry, RoutingPolicy::default())
    }

    pub fn with_policy(registry: PipelineRegistry, policy: RoutingPolicy) -> Router {
        Router { registry, policy }
    }

    /// Routing never fails. Requests without an event, categories with no
    /// table entry and eligible-but-unregistered pipelines all just shrink
    /// the returned collection towards empty. Must be called from within a
    /// tokio runtime.
    pub fn route(&self, request: RoutingRequest) -> Vec<DispatchHandle> {
        let Some(event) = request.into_event() else {
            report_dropped_events("empty_request", 1);
            return Vec::new();
        };

        let eligible = self.policy.eligible(event.category);
        if eligible.is_empty() {
            debug!(category = ?event.category, uuid = %event.uuid, "no pipeline eligible for category");
            report_dropped_events("unroutable_category", 1);
            return Vec::new();
        }

        let event = Arc::new(event);
        let mut handles = Vec::with_capacity(eligible.len());
        for id in eligible {
            let Some(pipeline) = self.registry.get(*id) else {
                debug!(pipeline = id.as_str(), "eligible pipeline not registered, skipping");
                continue;
            };

            // Spawning isolates each dispatch at the start boundary: no
            // pipeline code runs on the caller's stack, and a panicking
            // task fails only its own handle.
            let event = Arc::clone(&event);
            let task = tokio::spawn(async move { pipeline.accept(event).await });

            counter!("emitter_pipeline_dispatches_total", "pipeline" => id.as_str()).increment(1);
            handles.push(DispatchHandle { pipeline: *id, task });
        }

        handles
    }
}

#[cfg(test)]
mod tests {
    use super::RoutingPolicy;
    use crate::event::EventCategory;
    use crate::registry::PipelineId;

    #[test]
    fn default_policy_table() {
        let policy = RoutingPolicy::default();

        assert_eq!(
            policy.eligible(EventCategory::Default),
            [PipelineId::CommonTelemetry]
        );
        assert_eq!(
            policy.eligible(EventCategory::Lightweight),
            [PipelineId::CommonTelemetry]
        );
        assert!(policy.eligible(EventCategory::Heavyweight).is_empty());
    }

    #[test]
    fn custom_policy_can_fan_out() {
        let policy = RoutingPolicy::new([(
            EventCategory::Default,
            vec![PipelineId::CommonTelemetry, PipelineId::Print],
        )]);

        assert_eq!(
            policy.eligible(EventCategory::Default),
            [PipelineId::CommonTelemetry, PipelineId::Print]
        );
        assert!(policy.eligible(EventCategory::Lightweight).is_empty());
    }
}
