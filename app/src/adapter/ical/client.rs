use anyhow::{Context, bail};
use infrastructure::HttpClientConfig;
use reqwest_middleware::ClientWithMiddleware;

const MAX_RESPONSE_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct CalendarClient {
    client: ClientWithMiddleware,
    max_response_bytes: usize,
}

impl CalendarClient {
    pub fn new(config: &HttpClientConfig) -> anyhow::Result<Self> {
        let client = config
            .new_tracing_client()
            .context("Error building calendar HTTP client")?;

        Ok(Self {
            client,
            max_response_bytes: MAX_RESPONSE_BYTES,
        })
    }

    #[tracing::instrument(skip_all, fields(host = %redact(url)))]
    pub async fn fetch(&self, url: &str) -> anyhow::Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Network error fetching calendar from {}", redact(url)))?;

        let status = response.status();
        if !status.is_success() {
            bail!("Calendar fetch from {} failed with HTTP status {}", redact(url), status);
        }

        if let Some(length) = response.content_length() {
            if length as usize > self.max_response_bytes {
                bail!(
                    "Calendar too large ({} bytes > {} bytes)",
                    length,
                    self.max_response_bytes
                );
            }
        }

        let bytes = response.bytes().await.context("Error reading calendar body")?;
        if bytes.len() > self.max_response_bytes {
            bail!(
                "Calendar too large ({} bytes > {} bytes)",
                bytes.len(),
                self.max_response_bytes
            );
        }

        String::from_utf8(bytes.to_vec()).context("Calendar is not valid UTF-8")
    }
}

/// Feed URLs often embed private tokens, only the host is safe to log
fn redact(url: &str) -> String {
    reqwest::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_owned))
        .unwrap_or_else(|| "***redacted-url***".to_owned())
}
