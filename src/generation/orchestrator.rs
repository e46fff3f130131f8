//! Generation orchestration - coordinates the generation workflow
//!
//! `parse → resolve base URL → extension methods and aliases → models →
//! artifacts`, with every failure, panics included, returned as a
//! [`GenerationError`].

use std::any::Any;
use std::backtrace::Backtrace;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use openapiv3::OpenAPI;
use tracing::{debug, info};

use crate::generation::{
    Artifact, ArtifactWriter, CodeRenderer, ExtensionContext, ExtensionMethodGenerator,
    GenerationError, GenerationSession, GeneratorOptions, GeneratorResult, ModelGenerator, Result,
    TYPE_ALIASES_FILE, UrlParser,
};
use crate::infrastructure::generation::TeraCodeRenderer;
use crate::infrastructure::output::FileSystemArtifactWriter;

/// Turns an OpenAPI document into typed client bindings
pub struct OpenApiCodeGenerator {
    options: GeneratorOptions,
    renderer: Option<Arc<dyn CodeRenderer>>,
    writer: Arc<dyn ArtifactWriter>,
}

impl OpenApiCodeGenerator {
    /// Create a generator using the embedded templates and the filesystem writer
    pub fn new(options: GeneratorOptions) -> Self {
        Self {
            options,
            renderer: None,
            writer: Arc::new(FileSystemArtifactWriter::new()),
        }
    }

    pub fn with_renderer(mut self, renderer: Arc<dyn CodeRenderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    pub fn with_writer(mut self, writer: Arc<dyn ArtifactWriter>) -> Self {
        self.writer = writer;
        self
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// Generate bindings for a JSON or YAML document.
    ///
    /// Artifacts are written below `output_path` when one is configured.
    pub fn generate(&self, raw_spec: &str) -> Result<GeneratorResult> {
        // 1. Validate options
        self.options.validate()?;

        // 2-4. Parse, resolve and render; panics become values
        let result = catch_unwind(AssertUnwindSafe(|| self.generate_in_memory(raw_spec)))
            .map_err(unexpected_panic)??;

        // 5. Persist
        if let Some(output_dir) = &self.options.output_path {
            self.writer.write_artifacts(output_dir, &result.artifacts)?;
            info!(
                "Wrote {} files to {}",
                result.artifacts.len(),
                output_dir.display()
            );
        }

        Ok(result)
    }

    fn generate_in_memory(&self, raw_spec: &str) -> Result<GeneratorResult> {
        let document = parse_document(raw_spec, self.options.version_override.as_deref())?;
        let base = UrlParser::resolve_base(&document, self.options.base_url_override.as_deref())?;
        debug!("Base URL {} with base path '{}'", base.base_url, base.base_path);

        let renderer: Arc<dyn CodeRenderer> = match &self.renderer {
            Some(renderer) => Arc::clone(renderer),
            None => Arc::new(TeraCodeRenderer::new()?),
        };
        let mut session = GenerationSession::new();

        let context = ExtensionContext::new(&self.options, &base);
        let extensions =
            ExtensionMethodGenerator::new(&document, context).generate(renderer.as_ref(), &mut session)?;
        let models_code = ModelGenerator::new(&document).generate_models(renderer.as_ref())?;

        info!(
            "Generated {} methods and {} alias pairs for {}",
            extensions.methods.len(),
            session.type_aliases.len(),
            self.options.class_name
        );

        let artifacts = vec![
            Artifact::new(
                self.options.extensions_file_name(),
                extensions.methods_code.clone(),
            ),
            Artifact::new(self.options.models_file_name(), models_code.clone()),
            Artifact::new(TYPE_ALIASES_FILE, extensions.type_aliases_code.clone()),
        ];

        Ok(GeneratorResult {
            extension_methods_code: extensions.methods_code,
            models_code,
            type_aliases_code: extensions.type_aliases_code,
            methods: extensions.methods,
            artifacts,
        })
    }
}

/// Parse a JSON or YAML OpenAPI 3.x document.
///
/// `version_override` replaces the document's `openapi` field before the
/// version is checked.
pub fn parse_document(raw_spec: &str, version_override: Option<&str>) -> Result<OpenAPI> {
    let mut value: serde_json::Value = match serde_json::from_str(raw_spec) {
        Ok(value) => value,
        Err(json_error) => {
            let yaml: serde_yaml::Value = serde_yaml::from_str(raw_spec).map_err(|yaml_error| {
                GenerationError::parse(format!(
                    "document is neither valid JSON ({json_error}) nor valid YAML ({yaml_error})"
                ))
            })?;
            yaml_to_json(yaml)
        }
    };

    let Some(root) = value.as_object_mut() else {
        return Err(GenerationError::parse(
            "document root must be a mapping of OpenAPI fields",
        ));
    };

    if let Some(version) = version_override {
        debug!("Overriding OpenAPI version with {version}");
        root.insert(
            "openapi".to_string(),
            serde_json::Value::String(version.to_string()),
        );
    }

    match root.get("openapi") {
        Some(serde_json::Value::String(version)) if version.starts_with("3.") => {}
        Some(other) => {
            let version = other.as_str().map_or_else(|| other.to_string(), str::to_string);
            return Err(GenerationError::parse(format!(
                "unsupported OpenAPI version '{version}': only 3.x documents are supported (use --version to override)"
            )));
        }
        None => {
            return Err(GenerationError::parse(
                "missing 'openapi' version field (Swagger 2.0 documents are not supported)",
            ));
        }
    }

    serde_json::from_value(value).map_err(|e| GenerationError::parse(e.to_string()))
}

/// YAML allows non-string keys (`200:`); JSON objects do not
fn yaml_to_json(value: serde_yaml::Value) -> serde_json::Value {
    match value {
        serde_yaml::Value::Null => serde_json::Value::Null,
        serde_yaml::Value::Bool(b) => serde_json::Value::Bool(b),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                serde_json::Value::from(i)
            } else if let Some(u) = n.as_u64() {
                serde_json::Value::from(u)
            } else {
                n.as_f64()
                    .and_then(serde_json::Number::from_f64)
                    .map_or(serde_json::Value::Null, serde_json::Value::Number)
            }
        }
        serde_yaml::Value::String(s) => serde_json::Value::String(s),
        serde_yaml::Value::Sequence(items) => {
            serde_json::Value::Array(items.into_iter().map(yaml_to_json).collect())
        }
        serde_yaml::Value::Mapping(mapping) => serde_json::Value::Object(
            mapping
                .into_iter()
                .map(|(key, value)| (yaml_key(key), yaml_to_json(value)))
                .collect(),
        ),
        serde_yaml::Value::Tagged(tagged) => yaml_to_json(tagged.value),
    }
}

fn yaml_key(key: serde_yaml::Value) -> String {
    match key {
        serde_yaml::Value::String(s) => s,
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Null => "null".to_string(),
        other => yaml_to_json(other).to_string(),
    }
}

fn unexpected_panic(payload: Box<dyn Any + Send>) -> GenerationError {
    let message = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic payload".to_string());

    GenerationError::Unexpected {
        kind: "panic".to_string(),
        message,
        backtrace: Backtrace::force_capture().to_string(),
    }
}
