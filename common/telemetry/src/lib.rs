//! HTTP ingestion client for the common telemetry backend.
//!
//! This crate only knows how to deliver already-built telemetry records to
//! the ingestion endpoint. Routing decisions, event schemas and retry policy
//! above single-request granularity all live in the `emitter` crate.

use std::time::Duration;

use metrics::counter;
use reqwest::header::CONTENT_TYPE;
use reqwest::Url;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::info;

#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("invalid ingestion endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
    #[error("ingestion endpoint must be http or https, got {0}")]
    UnsupportedScheme(String),
    #[error("failed to serialize record: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("ingestion endpoint rejected the record: status {status}")]
    Rejected { status: u16 },
    #[error("failed to reach ingestion endpoint: {0}")]
    Connection(#[from] reqwest::Error),
}

impl TelemetryError {
    /// Whether a later attempt with the same record could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            TelemetryError::Connection(_) => true,
            TelemetryError::Rejected { status } => *status >= 500,
            TelemetryError::InvalidEndpoint(_)
            | TelemetryError::UnsupportedScheme(_)
            | TelemetryError::Serialization(_) => false,
        }
    }
}

/// One envelope as the ingestion endpoint expects it: a record name, an
/// ISO-8601 timestamp, the ingestion key of the sending application and an
/// opaque data blob.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TelemetryRecord {
    pub name: String,
    pub time: String,
    #[serde(rename = "iKey")]
    pub ingestion_key: String,
    pub data: Value,
}

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub endpoint: String,
    pub ingestion_key: String,
    pub request_timeout: Duration,
}

#[derive(Clone)]
pub struct TelemetryClient {
    http: reqwest::Client,
    endpoint: Url,
    ingestion_key: String,
}

impl TelemetryClient {
    pub fn new(config: TelemetryConfig) -> Result<TelemetryClient, TelemetryError> {
        let endpoint = Url::parse(&config.endpoint)?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(TelemetryError::UnsupportedScheme(
                endpoint.scheme().to_string(),
            ));
        }

        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        info!("sending telemetry to {}", endpoint);
        Ok(TelemetryClient {
            http,
            endpoint,
            ingestion_key: config.ingestion_key,
        })
    }

    pub fn ingestion_key(&self) -> &str {
        &self.ingestion_key
    }

    pub async fn send(&self, record: TelemetryRecord) -> Result<(), TelemetryError> {
        let payload = serde_json::to_string(&record).map_err(|e| {
            tracing::error!("failed to serialize record: {}", e);
            TelemetryError::from(e)
        })?;

        let response = self
            .http
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            counter!("telemetry_records_sent_total").increment(1);
            Ok(())
        } else {
            counter!("telemetry_records_rejected_total").increment(1);
            tracing::error!("record rejected by ingestion endpoint: {}", status);
            Err(TelemetryError::Rejected {
                status: status.as_u16(),
            })
        }
    }

    /// Posts every record concurrently and waits for the slowest one.
    /// Individual rejections are counted and logged but do not abort the
    /// rest of the batch; the first error observed is returned.
    pub async fn send_batch(&self, records: Vec<TelemetryRecord>) -> Result<(), TelemetryError> {
        let mut set = JoinSet::new();

        for record in records {
            let client = self.clone();
            set.spawn(async move { client.send(record).await });
        }

        let mut first_error = None;
        while let Some(joined) = set.join_next().await {
            if let Ok(Err(e)) = joined {
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }

        match first_error {
            None => Ok(()),
            Some(e) => Err(e),
        }
    }
}
