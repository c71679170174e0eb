use std::sync::Arc;

use async_trait::async_trait;
use metrics::counter;
use telemetry::{TelemetryClient, TelemetryError, TelemetryRecord};

use crate::api::PipelineError;
use crate::event::TelemetryEvent;
use crate::pipelines::Pipeline;
use crate::time::{SystemClock, TimeSource};

/// Delivers events to the common telemetry backend, one ingestion envelope
/// per event. Batching, timeouts and endpoint details live in the
/// `telemetry` client; this type only translates between the event model
/// and the wire envelope.
#[derive(Clone)]
pub struct CommonTelemetryPipeline {
    client: TelemetryClient,
    timesource: Arc<dyn TimeSource + Send + Sync>,
}

impl CommonTelemetryPipeline {
    pub fn new(client: TelemetryClient) -> CommonTelemetryPipeline {
        CommonTelemetryPipeline::with_timesource(client, SystemClock {})
    }

    pub fn with_timesource<TS>(client: TelemetryClient, timesource: TS) -> CommonTelemetryPipeline
    where
        TS: TimeSource + Send + Sync + 'static,
    {
        CommonTelemetryPipeline {
            client,
            timesource: Arc::new(timesource),
        }
    }

    fn envelope(&self, event: &TelemetryEvent) -> Result<TelemetryRecord, PipelineError> {
        let data = serde_json::to_value(event).map_err(|e| {
            tracing::error!("failed to encode event {}: {}", event.uuid, e);
            PipelineError::NonRetryable
        })?;

        Ok(TelemetryRecord {
            name: event.name.clone(),
            time: self.timesource.current_time(),
            ingestion_key: self.client.ingestion_key().to_string(),
            data,
        })
    }
}

#[async_trait]
impl Pipeline for CommonTelemetryPipeline {
    async fn accept(&self, event: Arc<TelemetryEvent>) -> Result<(), PipelineError> {
        let record = self.envelope(&event)?;

        match self.client.send(record).await {
            Ok(()) => {
                counter!("emitter_events_delivered_total", "pipeline" => "common_telemetry")
                    .increment(1);
                Ok(())
            }
            Err(e @ TelemetryError::Rejected { status: 413 }) => {
                tracing::error!("event {} too large for ingestion: {}", event.uuid, e);
                Err(PipelineError::EventTooBig)
            }
            Err(e) if e.is_retryable() => {
                tracing::error!("failed to deliver event {}: {}", event.uuid, e);
                Err(PipelineError::Retryable)
            }
            Err(e) => {
                tracing::error!("event {} rejected: {}", event.uuid, e);
                Err(PipelineError::NonRetryable)
            }
        }
    }
}
