use std::sync::Arc;

use crate::pipelines::Pipeline;

/// Closed set of transport identities. Extending it means adding a variant
/// and recompiling; identifiers never come from external input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineId {
    CommonTelemetry,
    Print,
}

impl PipelineId {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineId::CommonTelemetry => "common_telemetry",
            PipelineId::Print => "print",
        }
    }
}

/// Owns the active pipelines for one router, keyed by identifier.
///
/// Registration happens at construction time; the registry is read-only
/// while routing, so routers can be shared across tasks without locking.
/// Iteration follows insertion order, which keeps the order of dispatch
/// handles deterministic within a process run.
#[derive(Default, Clone)]
pub struct PipelineRegistry {
    entries: Vec<(PipelineId, Arc<dyn Pipeline + Send + Sync>)>,
}

impl PipelineRegistry {
    pub fn new() -> PipelineRegistry {
        PipelineRegistry::default()
    }

    /// Inserts or replaces the pipeline for `id`. A replaced entry keeps
    /// its original position so iteration order stays stable.
    pub fn register<P>(&mut self, id: PipelineId, pipeline: P)
    where
        P: Pipeline + Send + Sync + 'static,
    {
        let pipeline: Arc<dyn Pipeline + Send + Sync> = Arc::new(pipeline);
        match self.entries.iter_mut().find(|(existing, _)| *existing == id) {
            Some(entry) => entry.1 = pipeline,
            None => self.entries.push((id, pipeline)),
        }
    }

    pub fn get(&self, id: PipelineId) -> Option<Arc<dyn Pipeline + Send + Sync>> {
        self.entries
            .iter()
            .find(|(existing, _)| *existing == id)
            .map(|(_, pipeline)| Arc::clone(pipeline))
    }

    pub fn iter(&self) -> impl Iterator<Item = (PipelineId, &Arc<dyn Pipeline + Send + Sync>)> {
        self.entries.iter().map(|(id, pipeline)| (*id, pipeline))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
