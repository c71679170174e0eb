use std::time::Duration;

use envconfig::Envconfig;

#[derive(Envconfig, Clone)]
pub struct Config {
    /// Log events instead of shipping them; local development only.
    #[envconfig(default = "false")]
    pub print_pipeline: bool,

    pub telemetry_endpoint: String,
    pub telemetry_ingestion_key: String,

    #[envconfig(default = "10")]
    pub telemetry_request_timeout_secs: u64,
}

impl Config {
    pub fn telemetry(&self) -> telemetry::TelemetryConfig {
        telemetry::TelemetryConfig {
            endpoint: self.telemetry_endpoint.clone(),
            ingestion_key: self.telemetry_ingestion_key.clone(),
            request_timeout: Duration::from_secs(self.telemetry_request_timeout_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use envconfig::Envconfig;

    use super::Config;

    #[test]
    fn config_from_environment() {
        let vars = HashMap::from([
            (
                String::from("TELEMETRY_ENDPOINT"),
                String::from("https://collector.example.com/v2/track"),
            ),
            (
                String::from("TELEMETRY_INGESTION_KEY"),
                String::from("test-key"),
            ),
            (
                String::from("TELEMETRY_REQUEST_TIMEOUT_SECS"),
                String::from("3"),
            ),
        ]);

        let config = Config::init_from_hashmap(&vars).expect("invalid configuration");
        assert!(!config.print_pipeline);

        let telemetry = config.telemetry();
        assert_eq!(telemetry.endpoint, "https://collector.example.com/v2/track");
        assert_eq!(telemetry.ingestion_key, "test-key");
        assert_eq!(telemetry.request_timeout, Duration::from_secs(3));
    }

    #[test]
    fn endpoint_is_required() {
        let vars = HashMap::from([(
            String::from("TELEMETRY_INGESTION_KEY"),
            String::from("test-key"),
        )]);

        assert!(Config::init_from_hashmap(&vars).is_err());
    }
}
