//! Tera-based code renderer implementation

use tera::{Context, Tera};
use tracing::debug;

use crate::generation::{CodeRenderer, CodeTemplate, GenerationError, Result};

const HEADER_TEMPLATE: (&str, &str) = ("header.rs", include_str!("../../../templates/header.rs.tera"));

/// Templates compiled into the binary, keyed by their registered name
const EMBEDDED_TEMPLATES: &[(CodeTemplate, &str)] = &[
    (
        CodeTemplate::Caller,
        include_str!("../../../templates/caller.rs.tera"),
    ),
    (
        CodeTemplate::TraitMethod,
        include_str!("../../../templates/trait_method.rs.tera"),
    ),
    (
        CodeTemplate::ImplMethod,
        include_str!("../../../templates/impl_method.rs.tera"),
    ),
    (
        CodeTemplate::ExtensionsFile,
        include_str!("../../../templates/extensions.rs.tera"),
    ),
    (
        CodeTemplate::ModelsFile,
        include_str!("../../../templates/models.rs.tera"),
    ),
    (
        CodeTemplate::TypeAliasesFile,
        include_str!("../../../templates/type_aliases.rs.tera"),
    ),
];

/// Tera-based renderer over the embedded templates
pub struct TeraCodeRenderer {
    tera: Tera,
}

impl TeraCodeRenderer {
    /// Compile the embedded templates
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        // Registered names end in `.rs`, so Tera never HTML-escapes output
        tera.autoescape_on(vec![]);

        let mut templates = vec![HEADER_TEMPLATE];
        templates.extend(
            EMBEDDED_TEMPLATES
                .iter()
                .map(|(template, content)| (template.name(), *content)),
        );
        tera.add_raw_templates(templates)?;

        debug!("Compiled {} code templates", EMBEDDED_TEMPLATES.len() + 1);
        Ok(Self { tera })
    }

    /// Compile a renderer with one template replaced, used to exercise render failures
    #[cfg(test)]
    fn with_override(template: CodeTemplate, content: &str) -> Result<Self> {
        let mut renderer = Self::new()?;
        renderer.tera.add_raw_template(template.name(), content)?;
        Ok(renderer)
    }
}

impl CodeRenderer for TeraCodeRenderer {
    fn render(&self, template: CodeTemplate, context: &serde_json::Value) -> Result<String> {
        if !context.is_object() {
            return Err(GenerationError::Render(format!(
                "context for template '{}' must be a JSON object",
                template.name()
            )));
        }
        let tera_context = Context::from_serialize(context)?;
        Ok(self.tera.render(template.name(), &tera_context)?)
    }
}
