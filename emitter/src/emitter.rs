use std::sync::Arc;

use telemetry::TelemetryClient;

use crate::config::Config;
use crate::event::{EventCategory, RoutingRequest, TelemetryEvent};
use crate::pipelines::common_telemetry::CommonTelemetryPipeline;
use crate::pipelines::print::PrintPipeline;
use crate::registry::{PipelineId, PipelineRegistry};
use crate::router::{DispatchHandle, Router, RoutingPolicy};

/// Caller-facing entry point. Holds nothing beyond its router, so it is
/// cheap to clone and share across tasks. Typically built once per process
/// or once per logical player session; multiple emitters with independent
/// routers and registries can coexist.
#[derive(Clone)]
pub struct Emitter {
    router: Arc<Router>,
}

impl Emitter {
    pub fn new(router: Router) -> Emitter {
        Emitter {
            router: Arc::new(router),
        }
    }

    /// Assembles the default wiring from configuration: the common
    /// telemetry pipeline, or the print pipeline when `print_pipeline` is
    /// set.
    pub fn from_config(config: &Config) -> anyhow::Result<Emitter> {
        let mut registry = PipelineRegistry::new();

        if config.print_pipeline {
            registry.register(PipelineId::Print, PrintPipeline {});
            let policy = RoutingPolicy::new([
                (EventCategory::Default, vec![PipelineId::Print]),
                (EventCategory::Lightweight, vec![PipelineId::Print]),
            ]);
            return Ok(Emitter::new(Router::with_policy(registry, policy)));
        }

        let client = TelemetryClient::new(config.telemetry())?;
        registry.register(
            PipelineId::CommonTelemetry,
            CommonTelemetryPipeline::new(client),
        );

        Ok(Emitter::new(Router::new(registry)))
    }

    /// Emitting never fails: the returned collection holds one handle per
    /// pipeline the event was dispatched to, and an event nothing was
    /// eligible for yields an empty collection. Callers may await any
    /// subset of the handles, or none.
    pub fn emit(&self, event: TelemetryEvent) -> Vec<DispatchHandle> {
        self.router.route(RoutingRequest::single(event))
    }
}
