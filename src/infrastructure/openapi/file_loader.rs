//! File-based OpenAPI document loader

use async_trait::async_trait;
use tracing::debug;

use crate::generation::{GenerationError, OpenApiLoader, Result};

/// Reads OpenAPI documents from the local filesystem
///
/// Accepts plain paths as well as `file://` URLs.
pub struct FileOpenApiLoader;

impl FileOpenApiLoader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileOpenApiLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OpenApiLoader for FileOpenApiLoader {
    async fn load(&self, source: &str) -> Result<String> {
        let path = source.strip_prefix("file://").unwrap_or(source);
        debug!("Reading OpenAPI document from {path}");

        tokio::fs::read_to_string(path)
            .await
            .map_err(|e| GenerationError::load(format!("Failed to read {path}: {e}")))
    }
}
