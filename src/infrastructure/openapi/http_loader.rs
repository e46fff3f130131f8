//! HTTP-based OpenAPI document loader

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::generation::{GenerationError, OpenApiLoader, Result};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches OpenAPI documents over HTTP(S)
pub struct HttpOpenApiLoader {
    client: Client,
}

impl HttpOpenApiLoader {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(|e| GenerationError::load(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

pub(crate) fn is_http_source(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

#[async_trait]
impl OpenApiLoader for HttpOpenApiLoader {
    async fn load(&self, source: &str) -> Result<String> {
        if !is_http_source(source) {
            return Err(GenerationError::load(format!(
                "HttpOpenApiLoader only handles HTTP(S) URLs, got: {source}"
            )));
        }

        debug!("Fetching OpenAPI document from {source}");
        let response = self.client.get(source).send().await.map_err(|e| {
            GenerationError::load(format!("Failed to fetch OpenAPI document from {source}: {e}"))
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(GenerationError::load(format!(
                "HTTP {status} when fetching {source}"
            )));
        }

        response
            .text()
            .await
            .map_err(|e| GenerationError::load(format!("Failed to read response body: {e}")))
    }
}
