pub mod api;
pub mod config;
pub mod emitter;
pub mod event;
pub mod pipelines;
pub mod prometheus;
pub mod registry;
pub mod router;
pub mod time;
