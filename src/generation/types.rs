//! Core types for the generation domain

use std::fmt;
use std::path::{Path, PathBuf};

use openapiv3::{Operation, PathItem};
use serde::Serialize;

use crate::generation::shape::CallShape;
use crate::generation::utils::{sanitize_identifier, to_type_name};
use crate::generation::{GenerationError, TypeRef};

/// File that receives the `Ok*`/`Error*` aliases
pub const TYPE_ALIASES_FILE: &str = "TypeAliases.g.rs";

/// HTTP verbs that produce bindings, in emission order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpVerb {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpVerb {
    /// Get all supported verbs in the order operations are visited
    pub fn all() -> &'static [HttpVerb] {
        &[
            HttpVerb::Get,
            HttpVerb::Post,
            HttpVerb::Put,
            HttpVerb::Patch,
            HttpVerb::Delete,
        ]
    }

    /// Upper-case wire name
    pub fn as_str(self) -> &'static str {
        match self {
            HttpVerb::Get => "GET",
            HttpVerb::Post => "POST",
            HttpVerb::Put => "PUT",
            HttpVerb::Patch => "PATCH",
            HttpVerb::Delete => "DELETE",
        }
    }

    /// Word used to derive method names when no `operationId` is given
    pub fn verb_word(self) -> &'static str {
        match self {
            HttpVerb::Get => "Get",
            HttpVerb::Post => "Create",
            HttpVerb::Put => "Update",
            HttpVerb::Patch => "Patch",
            HttpVerb::Delete => "Delete",
        }
    }

    /// Variant of the runtime's `Method` enum
    pub fn runtime_variant(self) -> &'static str {
        match self {
            HttpVerb::Get => "Get",
            HttpVerb::Post => "Post",
            HttpVerb::Put => "Put",
            HttpVerb::Patch => "Patch",
            HttpVerb::Delete => "Delete",
        }
    }

    /// POST, PUT and PATCH always carry a body, declared or not
    pub fn has_body(self) -> bool {
        matches!(self, HttpVerb::Post | HttpVerb::Put | HttpVerb::Patch)
    }

    /// The operation declared for this verb on a path item
    pub fn operation(self, item: &PathItem) -> Option<&Operation> {
        match self {
            HttpVerb::Get => item.get.as_ref(),
            HttpVerb::Post => item.post.as_ref(),
            HttpVerb::Put => item.put.as_ref(),
            HttpVerb::Patch => item.patch.as_ref(),
            HttpVerb::Delete => item.delete.as_ref(),
        }
    }
}

impl fmt::Display for HttpVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a parameter travels on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
}

/// A resolved operation parameter
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterInfo {
    /// Name as declared in the document
    pub name: String,
    /// Identifier used at the call site
    pub ident: String,
    pub type_ref: TypeRef,
    pub location: ParameterLocation,
    pub required: bool,
    /// Rust literal for a primitive default, e.g. `10` or `"available"`
    pub default_literal: Option<String>,
}

impl ParameterInfo {
    /// Optional parameters are `Option<T>` at the call site
    pub fn is_optional(&self) -> bool {
        !self.required
    }

    /// Type written in the public signature
    pub fn call_site_type(&self) -> String {
        if self.is_optional() {
            format!("Option<{}>", self.type_ref.rust_type())
        } else {
            self.type_ref.rust_type()
        }
    }
}

/// Everything the generator derives from one (path, verb) pair
#[derive(Debug, Clone, PartialEq)]
pub struct OperationDescriptor {
    pub path: String,
    pub verb: HttpVerb,
    pub operation_id: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub parameters: Vec<ParameterInfo>,
    /// Present exactly when the verb carries a body
    pub request_body: Option<TypeRef>,
    pub success_type: TypeRef,
    pub error_type: TypeRef,
}

impl OperationDescriptor {
    pub fn parameters_in(&self, location: ParameterLocation) -> Vec<&ParameterInfo> {
        self.parameters
            .iter()
            .filter(|p| p.location == location)
            .collect()
    }
}

/// One argument of a public binding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureParam {
    pub ident: String,
    pub type_name: String,
}

/// A fully emitted binding
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedMethod {
    /// Unique PascalCase name, e.g. `ListPets` or `ListPets2`
    pub name: String,
    /// Public `async fn` name
    pub fn_name: String,
    /// Name of the private `static` caller
    pub caller_name: String,
    pub verb: HttpVerb,
    pub shape: CallShape,
    /// Required params, then body, then optional params
    pub signature_params: Vec<SignatureParam>,
    /// Full `async fn` signature including `cancellation`
    pub signature: String,
    /// Type of the single value handed to the caller
    pub caller_params_type: String,
    /// Expression building the path, e.g. `format!("/v1/pets/{pet_id}")`
    pub path_expression: String,
    pub query_expression: Option<String>,
    pub success_type: TypeRef,
    pub error_type: TypeRef,
    pub caller_source: String,
    pub declaration_source: String,
    pub impl_source: String,
}

/// A pair of `Ok*`/`Error*` aliases for one success type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeAliasEntry {
    pub stem: String,
    pub ok_alias: String,
    pub error_alias: String,
    pub success_type: String,
    pub error_type: String,
}

/// Generated file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub file_name: String,
    pub content: String,
}

impl Artifact {
    pub fn new<S: Into<String>, C: Into<String>>(file_name: S, content: C) -> Self {
        Self {
            file_name: file_name.into(),
            content: content.into(),
        }
    }

    /// Destination of this artifact under an output directory
    pub fn path_in(&self, dir: &Path) -> PathBuf {
        dir.join(&self.file_name)
    }
}

/// Result of a successful generation
#[derive(Debug, Clone)]
pub struct GeneratorResult {
    pub extension_methods_code: String,
    pub models_code: String,
    pub type_aliases_code: String,
    pub methods: Vec<GeneratedMethod>,
    pub artifacts: Vec<Artifact>,
}

/// Generator configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Module the generated files are included into, e.g. `Generated` or `api.v1`
    pub namespace: String,
    /// Name of the extension trait and of the bindings file
    pub class_name: String,
    /// Directory receiving the artifacts; nothing is written when `None`
    pub output_path: Option<PathBuf>,
    pub base_url_override: Option<String>,
    /// Replaces the document's `openapi` version before parsing
    pub version_override: Option<String>,
    /// Crate the emitted code imports its HTTP runtime from
    pub runtime_crate: String,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            namespace: "Generated".to_string(),
            class_name: "ApiExtensions".to_string(),
            output_path: None,
            base_url_override: None,
            version_override: None,
            runtime_crate: "http_runtime".to_string(),
        }
    }
}

impl GeneratorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_namespace<S: Into<String>>(mut self, namespace: S) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn with_class_name<S: Into<String>>(mut self, class_name: S) -> Self {
        self.class_name = class_name.into();
        self
    }

    pub fn with_output_path<P: Into<PathBuf>>(mut self, output_path: P) -> Self {
        self.output_path = Some(output_path.into());
        self
    }

    pub fn with_base_url_override<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url_override = Some(base_url.into());
        self
    }

    pub fn with_version_override<S: Into<String>>(mut self, version: S) -> Self {
        self.version_override = Some(version.into());
        self
    }

    pub fn with_runtime_crate<S: Into<String>>(mut self, runtime_crate: S) -> Self {
        self.runtime_crate = runtime_crate.into();
        self
    }

    /// Validate the options before any work is done
    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.namespace_segments().is_empty() {
            return Err(GenerationError::config(format!(
                "namespace '{}' does not contain a valid module name",
                self.namespace
            )));
        }
        if self.class_name.trim().is_empty() {
            return Err(GenerationError::config("class name cannot be empty"));
        }
        let runtime = self.runtime_crate.trim_start_matches("::");
        if runtime.is_empty()
            || !runtime
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':')
        {
            return Err(GenerationError::config(format!(
                "runtime crate '{}' is not a valid path",
                self.runtime_crate
            )));
        }
        Ok(())
    }

    fn namespace_segments(&self) -> Vec<String> {
        self.namespace
            .split(['.', ':'])
            .map(str::trim)
            .filter(|s| !s.is_empty() && *s != "crate")
            .map(sanitize_identifier)
            .collect()
    }

    /// Rust module path for the namespace: `My.Api` → `crate::my::api`
    pub fn module_path(&self) -> String {
        let mut path = vec!["crate".to_string()];
        path.extend(self.namespace_segments());
        path.join("::")
    }

    /// Runtime crate as an absolute path
    pub fn runtime_path(&self) -> String {
        format!("::{}", self.runtime_crate.trim_start_matches("::"))
    }

    /// Name of the emitted extension trait
    pub fn trait_name(&self) -> String {
        to_type_name(&self.class_name)
    }

    pub fn extensions_file_name(&self) -> String {
        format!("{}.g.rs", self.class_name)
    }

    /// `ApiExtensions` → `ApiModels.g.rs`; names without `Extensions` get a `Models` suffix
    pub fn models_file_name(&self) -> String {
        let replaced = self.class_name.replace("Extensions", "Models");
        if replaced == self.class_name {
            format!("{}Models.g.rs", self.class_name)
        } else {
            format!("{replaced}.g.rs")
        }
    }
}
