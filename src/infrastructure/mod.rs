//! Infrastructure layer - concrete implementations of domain ports

pub mod generation;
pub mod openapi;
pub mod output;

pub use generation::TeraCodeRenderer;
pub use openapi::{CompositeOpenApiLoader, FileOpenApiLoader, HttpOpenApiLoader};
pub use output::FileSystemArtifactWriter;
