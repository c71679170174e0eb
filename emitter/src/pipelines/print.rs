use std::sync::Arc;

use async_trait::async_trait;
use metrics::counter;
use tracing::info;

use crate::api::PipelineError;
use crate::event::TelemetryEvent;
use crate::pipelines::Pipeline;

/// Logs events instead of shipping them. Local development stand-in for
/// the real transports.
pub struct PrintPipeline {}

#[async_trait]
impl Pipeline for PrintPipeline {
    async fn accept(&self, event: Arc<TelemetryEvent>) -> Result<(), PipelineError> {
        info!("event: {:?}", event);
        counter!("emitter_events_delivered_total", "pipeline" => "print").increment(1);

        Ok(())
    }
}
