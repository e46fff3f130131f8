//! Port interfaces for the generation domain

use std::path::Path;

use async_trait::async_trait;

use crate::generation::{Artifact, Result};

/// Templates the generator renders, from single items up to whole files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodeTemplate {
    /// Private `static` caller of one operation
    Caller,
    /// Trait method declaration of one operation
    TraitMethod,
    /// Trait method implementation of one operation
    ImplMethod,
    /// `{ClassName}.g.rs`
    ExtensionsFile,
    /// `{ClassName with Models}.g.rs`
    ModelsFile,
    /// `TypeAliases.g.rs`
    TypeAliasesFile,
}

impl CodeTemplate {
    pub fn all() -> &'static [CodeTemplate] {
        &[
            CodeTemplate::Caller,
            CodeTemplate::TraitMethod,
            CodeTemplate::ImplMethod,
            CodeTemplate::ExtensionsFile,
            CodeTemplate::ModelsFile,
            CodeTemplate::TypeAliasesFile,
        ]
    }

    /// Name the template is registered under
    pub fn name(self) -> &'static str {
        match self {
            CodeTemplate::Caller => "caller.rs",
            CodeTemplate::TraitMethod => "trait_method.rs",
            CodeTemplate::ImplMethod => "impl_method.rs",
            CodeTemplate::ExtensionsFile => "extensions.rs",
            CodeTemplate::ModelsFile => "models.rs",
            CodeTemplate::TypeAliasesFile => "type_aliases.rs",
        }
    }
}

/// Renders generated source text from a template and a JSON context
pub trait CodeRenderer: Send + Sync {
    fn render(&self, template: CodeTemplate, context: &serde_json::Value) -> Result<String>;
}

/// Persists generated artifacts
pub trait ArtifactWriter: Send + Sync {
    /// Write every artifact below `output_dir`, creating it when missing
    fn write_artifacts(&self, output_dir: &Path, artifacts: &[Artifact]) -> Result<()>;
}

/// Loads the raw text of an OpenAPI document
#[async_trait]
pub trait OpenApiLoader: Send + Sync {
    /// Load an OpenAPI document from a source (file path or URL)
    async fn load(&self, source: &str) -> Result<String>;
}
