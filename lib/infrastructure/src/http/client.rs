use std::time::Duration;

use reqwest_middleware::ClientWithMiddleware;
use reqwest_tracing::TracingMiddleware;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpClientConfig {
    /// Request timeout in seconds, covering connect and body download
    pub timeout: u64,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self { timeout: 10 }
    }
}

impl HttpClientConfig {
    pub fn new(timeout: u64) -> Self {
        Self { timeout }
    }

    pub fn new_tracing_client(&self) -> anyhow::Result<ClientWithMiddleware> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(self.timeout))
            .build()?;

        Ok(reqwest_middleware::ClientBuilder::new(client)
            .with(TracingMiddleware::default())
            .build())
    }
}
