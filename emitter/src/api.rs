use thiserror::Error;

/// What a pipeline can report back through its dispatch handle. The router
/// moves these through untouched; only callers interpret them.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PipelineError {
    #[error("transient pipeline failure, please retry")]
    Retryable,
    #[error("event rejected by the pipeline")]
    NonRetryable,
    #[error("maximum event size exceeded")]
    EventTooBig,
    #[error("pipeline dispatch panicked")]
    DispatchPanicked,
    #[error("pipeline dispatch was cancelled before completing")]
    DispatchCancelled,
}
