//! Loader that picks a strategy from the shape of the source

use async_trait::async_trait;
use tracing::debug;

use super::http_loader::is_http_source;
use super::{FileOpenApiLoader, HttpOpenApiLoader};
use crate::generation::{OpenApiLoader, Result};

/// Loads from HTTP(S) URLs or local paths
pub struct CompositeOpenApiLoader {
    http: HttpOpenApiLoader,
    file: FileOpenApiLoader,
}

impl CompositeOpenApiLoader {
    pub fn new() -> Result<Self> {
        Ok(Self {
            http: HttpOpenApiLoader::new()?,
            file: FileOpenApiLoader::new(),
        })
    }
}

#[async_trait]
impl OpenApiLoader for CompositeOpenApiLoader {
    async fn load(&self, source: &str) -> Result<String> {
        if is_http_source(source) {
            debug!("Using HTTP loader for {source}");
            self.http.load(source).await
        } else {
            debug!("Using file loader for {source}");
            self.file.load(source).await
        }
    }
}
