use std::sync::Arc;

use async_trait::async_trait;

use crate::api::PipelineError;
use crate::event::TelemetryEvent;

pub mod common_telemetry;
pub mod print;

/// A transport capable of delivering one event. Implementations own all
/// retry, batching, persistence and authentication details; the router only
/// relies on the returned future eventually resolving, exactly once.
///
/// `accept` must not mutate the event (it can't: the event is shared
/// read-only) and must not assume it is the only pipeline receiving it.
#[async_trait]
pub trait Pipeline {
    async fn accept(&self, event: Arc<TelemetryEvent>) -> Result<(), PipelineError>;
}
