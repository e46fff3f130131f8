//! Filesystem-based artifact writer implementation

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::generation::{Artifact, ArtifactWriter, GenerationError, Result};

/// Writes artifacts to the filesystem, replacing existing files
pub struct FileSystemArtifactWriter;

impl FileSystemArtifactWriter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSystemArtifactWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ArtifactWriter for FileSystemArtifactWriter {
    fn write_artifacts(&self, output_dir: &Path, artifacts: &[Artifact]) -> Result<()> {
        fs::create_dir_all(output_dir).map_err(|source| GenerationError::Io {
            path: output_dir.to_path_buf(),
            source,
        })?;

        for artifact in artifacts {
            let path = artifact.path_in(output_dir);
            fs::write(&path, artifact.content.as_bytes())
                .map_err(|source| GenerationError::Io {
                    path: path.clone(),
                    source,
                })?;
            debug!("Wrote {} ({} bytes)", path.display(), artifact.content.len());
        }

        Ok(())
    }
}
