//! Extension method generation
//!
//! Walks the paths of a document and turns every supported operation into
//! a private `static` caller plus a public method on the extension trait.
//! Operations are visited in path declaration order and, per path, in the
//! verb order of [`HttpVerb::all`].

use std::collections::HashSet;

use once_cell::sync::Lazy;
use openapiv3::{
    MediaType, OpenAPI, Operation, Parameter, ParameterData, ParameterSchemaOrContent, PathItem,
    ReferenceOr, RequestBody, Response, Responses, StatusCode,
};
use regex::Regex;
use serde_json::json;
use tracing::{debug, warn};

use crate::generation::naming::{MethodNames, base_method_name};
use crate::generation::sanitizers::{doc_comment, escape_format_braces, rust_string_literal};
use crate::generation::shape::{BODY_IDENT, CallShape};
use crate::generation::type_mapping::map_type;
use crate::generation::url_parser::ResolvedBase;
use crate::generation::utils::{sanitize_identifier, to_screaming_snake_case};
use crate::generation::{
    CodeRenderer, CodeTemplate, GeneratedMethod, GenerationSession, GeneratorOptions, HttpVerb,
    OperationDescriptor, ParameterInfo, ParameterLocation, Result, SignatureParam, TypeRef,
};

/// Identifier of the cancellation token in every public signature
pub const CANCELLATION_IDENT: &str = "cancellation";

static PLACEHOLDER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{([^{}]+)\}").expect("valid regex"));

/// Everything the emitted bindings need to know about their surroundings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionContext {
    /// Namespace as configured, e.g. `Generated`
    pub namespace: String,
    /// Rust module path the generated files live in, e.g. `crate::generated`
    pub module_path: String,
    pub class_name: String,
    pub trait_name: String,
    pub base_url: String,
    pub base_path: String,
    /// Absolute path of the runtime crate, e.g. `::http_runtime`
    pub runtime_path: String,
}

impl ExtensionContext {
    pub fn new(options: &GeneratorOptions, base: &ResolvedBase) -> Self {
        Self {
            namespace: options.namespace.clone(),
            module_path: options.module_path(),
            class_name: options.class_name.clone(),
            trait_name: options.trait_name(),
            base_url: base.base_url.clone(),
            base_path: base.base_path.clone(),
            runtime_path: options.runtime_path(),
        }
    }

    /// Name of the emitted base URL constant, e.g. `API_EXTENSIONS_BASE_URL`
    pub fn base_url_const(&self) -> String {
        format!("{}_BASE_URL", to_screaming_snake_case(&self.class_name))
    }
}

/// Output of [`ExtensionMethodGenerator::generate`]
#[derive(Debug, Clone)]
pub struct ExtensionOutput {
    pub methods_code: String,
    pub type_aliases_code: String,
    pub methods: Vec<GeneratedMethod>,
}

/// Generates the extension trait, its callers and the alias file
pub struct ExtensionMethodGenerator<'a> {
    document: &'a OpenAPI,
    context: ExtensionContext,
}

impl<'a> ExtensionMethodGenerator<'a> {
    pub fn new(document: &'a OpenAPI, context: ExtensionContext) -> Self {
        Self { document, context }
    }

    /// Render the bindings file and the alias file
    pub fn generate(
        &self,
        renderer: &dyn CodeRenderer,
        session: &mut GenerationSession,
    ) -> Result<ExtensionOutput> {
        let mut methods = Vec::new();
        for descriptor in self.operation_descriptors() {
            let base_name = base_method_name(
                &descriptor.path,
                descriptor.verb,
                descriptor.operation_id.as_deref(),
            );
            let names = session.method_names.register(&base_name);
            let method = self.build_method(&descriptor, names, renderer)?;

            session.type_aliases.register(
                &method.success_type,
                &method.error_type,
                &self.context.module_path,
                &self.context.runtime_path,
            );
            debug!(
                "{} {} -> {} ({:?})",
                descriptor.verb, descriptor.path, method.fn_name, method.shape
            );
            methods.push(method);
        }

        let method_sources: Vec<serde_json::Value> = methods
            .iter()
            .map(|method| {
                json!({
                    "caller_source": method.caller_source,
                    "declaration_source": method.declaration_source,
                    "impl_source": method.impl_source,
                })
            })
            .collect();

        let methods_code = renderer.render(
            CodeTemplate::ExtensionsFile,
            &json!({
                "runtime": self.context.runtime_path,
                "trait_name": self.context.trait_name,
                "base_url_const": self.context.base_url_const(),
                "base_url_literal": rust_string_literal(&self.context.base_url),
                "methods": method_sources,
            }),
        )?;
        let type_aliases_code = session.type_aliases.render(renderer)?;

        Ok(ExtensionOutput {
            methods_code,
            type_aliases_code,
            methods,
        })
    }

    /// Describe every supported operation of the document
    pub fn operation_descriptors(&self) -> Vec<OperationDescriptor> {
        let mut descriptors = Vec::new();

        for (path, item) in &self.document.paths.paths {
            let ReferenceOr::Item(item) = item else {
                debug!("Skipping referenced path item {path}");
                continue;
            };

            let before = descriptors.len();
            for &verb in HttpVerb::all() {
                if let Some(operation) = verb.operation(item) {
                    descriptors.push(self.describe(path, verb, item, operation));
                }
            }

            if item.head.is_some() || item.options.is_some() || item.trace.is_some() {
                debug!("Ignoring HEAD/OPTIONS/TRACE operations on {path}");
            }
            if descriptors.len() == before {
                debug!("Path {path} has no supported operations");
            }
        }

        descriptors
    }

    fn describe(
        &self,
        path: &str,
        verb: HttpVerb,
        item: &PathItem,
        operation: &Operation,
    ) -> OperationDescriptor {
        let request_body = verb.has_body().then(|| {
            operation
                .request_body
                .as_ref()
                .and_then(|body| self.resolve_request_body(body))
                .and_then(|body| preferred_media(&body.content))
                .and_then(|media| media.schema.as_ref())
                .map_or(TypeRef::Object, map_type)
        });

        let success_type = if verb == HttpVerb::Delete {
            TypeRef::Unit
        } else {
            self.response_type(&operation.responses, is_success, true)
                .unwrap_or(TypeRef::Object)
        };
        let error_type = self
            .response_type(&operation.responses, is_error, false)
            .unwrap_or_else(TypeRef::string);

        OperationDescriptor {
            path: path.to_string(),
            verb,
            operation_id: operation.operation_id.clone(),
            summary: operation.summary.clone(),
            description: operation.description.clone(),
            parameters: self.parameters(path, verb, item, operation),
            request_body,
            success_type,
            error_type,
        }
    }

    /// Merged, resolved and identifier-safe parameters, path parameters in template order
    fn parameters(
        &self,
        path: &str,
        verb: HttpVerb,
        item: &PathItem,
        operation: &Operation,
    ) -> Vec<ParameterInfo> {
        let mut merged: Vec<(&ParameterData, ParameterLocation)> = Vec::new();
        let declared = item.parameters.iter().chain(operation.parameters.iter());
        for parameter in declared {
            let Some(parameter) = self.resolve_parameter(parameter) else {
                continue;
            };
            let Some((data, location)) = parameter_parts(parameter) else {
                debug!("Dropping cookie parameter on {verb} {path}");
                continue;
            };
            // Operation parameters come last and replace path-item ones
            match merged
                .iter()
                .position(|(existing, loc)| existing.name == data.name && *loc == location)
            {
                Some(index) => merged[index] = (data, location),
                None => merged.push((data, location)),
            }
        }

        let placeholders: Vec<&str> = PLACEHOLDER_RE
            .captures_iter(path)
            .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
            .collect();

        let mut path_params = Vec::new();
        let mut other_params = Vec::new();
        for (data, location) in merged {
            if location == ParameterLocation::Path && !placeholders.contains(&data.name.as_str()) {
                warn!(
                    "Path parameter '{}' of {verb} {path} does not appear in the path; ignoring it",
                    data.name
                );
                continue;
            }
            let info = parameter_info(data, location);
            if location == ParameterLocation::Path {
                path_params.push(info);
            } else {
                other_params.push(info);
            }
        }

        for placeholder in &placeholders {
            if !path_params.iter().any(|p| p.name == *placeholder) {
                warn!(
                    "Path placeholder '{{{placeholder}}}' of {verb} {path} is not declared; treating it as a required string"
                );
                path_params.push(ParameterInfo {
                    name: placeholder.to_string(),
                    ident: String::new(),
                    type_ref: TypeRef::string(),
                    location: ParameterLocation::Path,
                    required: true,
                    default_literal: None,
                });
            }
        }
        path_params.sort_by_key(|p| placeholders.iter().position(|name| *name == p.name));

        let mut parameters: Vec<ParameterInfo> = path_params.into_iter().chain(other_params).collect();
        assign_identifiers(&mut parameters);
        parameters
    }

    fn resolve_parameter<'d>(&'d self, parameter: &'d ReferenceOr<Parameter>) -> Option<&'d Parameter> {
        let mut current = parameter;
        for _ in 0..8 {
            match current {
                ReferenceOr::Item(item) => return Some(item),
                ReferenceOr::Reference { reference } => {
                    let name = reference.trim_start_matches("#/components/parameters/");
                    current = self
                        .document
                        .components
                        .as_ref()
                        .and_then(|components| components.parameters.get(name))?;
                }
            }
        }
        warn!("Parameter reference chain is too deep or circular; dropping it");
        None
    }

    fn resolve_request_body<'d>(&'d self, body: &'d ReferenceOr<RequestBody>) -> Option<&'d RequestBody> {
        match body {
            ReferenceOr::Item(item) => Some(item),
            ReferenceOr::Reference { reference } => {
                let name = reference.trim_start_matches("#/components/requestBodies/");
                match self
                    .document
                    .components
                    .as_ref()
                    .and_then(|components| components.request_bodies.get(name))
                {
                    Some(ReferenceOr::Item(item)) => Some(item),
                    _ => None,
                }
            }
        }
    }

    fn resolve_response<'d>(&'d self, response: &'d ReferenceOr<Response>) -> Option<&'d Response> {
        match response {
            ReferenceOr::Item(item) => Some(item),
            ReferenceOr::Reference { reference } => {
                let name = reference.trim_start_matches("#/components/responses/");
                match self
                    .document
                    .components
                    .as_ref()
                    .and_then(|components| components.responses.get(name))
                {
                    Some(ReferenceOr::Item(item)) => Some(item),
                    _ => None,
                }
            }
        }
    }

    /// Type of the first response whose status matches: explicit codes first,
    /// then ranges, then (when allowed) `default`
    fn response_type(
        &self,
        responses: &Responses,
        matches_status: fn(&StatusCode) -> bool,
        use_default: bool,
    ) -> Option<TypeRef> {
        let explicit = responses
            .responses
            .iter()
            .find(|(status, _)| matches!(status, StatusCode::Code(_)) && matches_status(status));
        let range = || {
            responses
                .responses
                .iter()
                .find(|(status, _)| matches!(status, StatusCode::Range(_)) && matches_status(status))
        };

        let response = explicit
            .or_else(range)
            .map(|(_, response)| response)
            .or(if use_default {
                responses.default.as_ref()
            } else {
                None
            })?;

        let schema = self
            .resolve_response(response)
            .and_then(|response| preferred_media(&response.content))
            .and_then(|media| media.schema.as_ref());

        Some(match schema {
            Some(schema) => map_type(schema),
            None if use_default => TypeRef::Object,
            None => TypeRef::string(),
        })
    }

    fn build_method(
        &self,
        descriptor: &OperationDescriptor,
        names: MethodNames,
        renderer: &dyn CodeRenderer,
    ) -> Result<GeneratedMethod> {
        let path_params = descriptor.parameters_in(ParameterLocation::Path);
        let query_params = descriptor.parameters_in(ParameterLocation::Query);
        let header_params = descriptor.parameters_in(ParameterLocation::Header);
        let caller_params: Vec<&ParameterInfo> =
            path_params.iter().chain(query_params.iter()).copied().collect();

        // Headers ride along with the caller value but do not shape it
        let shape = CallShape::classify(
            path_params.len(),
            query_params.len(),
            descriptor.request_body.is_some(),
        );
        let body_type = descriptor
            .request_body
            .as_ref()
            .map_or_else(|| "()".to_string(), TypeRef::rust_type);
        let header_idents: Vec<String> = header_params.iter().map(|p| p.ident.clone()).collect();
        let header_types: Vec<String> = header_params.iter().map(|p| p.call_site_type()).collect();
        let caller_params_type = attach_headers(
            shape,
            shape.caller_type(&caller_params, &body_type),
            &header_types,
        );
        let caller_pattern = attach_headers(shape, shape.caller_pattern(&caller_params), &header_idents);
        let call_arguments =
            attach_headers(shape, shape.call_arguments(&caller_params), &header_idents);
        let header_calls: String = header_params
            .iter()
            .map(|p| format!(".header({}, {})", rust_string_literal(&p.name), param_value(p)))
            .collect();

        let full_path = format!("{}{}", self.context.base_path, descriptor.path);
        let (path_template, path_args) = format_template(&full_path, &path_params);
        let path_expression = if path_params.is_empty() {
            format!("String::from({})", rust_string_literal(&full_path))
        } else {
            format_call(&path_template, &path_args)
        };
        let query_expression = (!query_params.is_empty()).then(|| {
            let pairs: Vec<String> = query_params
                .iter()
                .map(|p| format!("({}, {})", rust_string_literal(&p.name), param_value(p)))
                .collect();
            format!("rt::query_string(&[{}])", pairs.join(", "))
        });
        let url_expression = match &query_expression {
            Some(query) => {
                let mut args = path_args.clone();
                args.push(query.clone());
                format_call(&format!("{path_template}{{}}"), &args)
            }
            None => path_expression.clone(),
        };

        let public_params: Vec<&ParameterInfo> =
            caller_params.iter().chain(header_params.iter()).copied().collect();
        let signature_params = signature_params(&public_params, descriptor.request_body.as_ref());
        let success_rust = descriptor.success_type.rust_type();
        let error_rust = descriptor.error_type.rust_type();
        let mut arguments: Vec<String> = vec!["&self".to_string()];
        arguments.extend(
            signature_params
                .iter()
                .map(|p| format!("{}: {}", p.ident, p.type_name)),
        );
        arguments.push(format!("{CANCELLATION_IDENT}: &rt::CancellationToken"));
        let signature = format!(
            "async fn {}({}) -> ::std::result::Result<{success_rust}, rt::HttpError<{error_rust}>>",
            names.fn_name,
            arguments.join(", ")
        );

        let success_deserializer = if descriptor.success_type.is_unit() {
            "rt::deserialize_unit".to_string()
        } else {
            format!("rt::deserialize_json::<{success_rust}>")
        };
        let error_deserializer = if descriptor.error_type.is_string() {
            "rt::deserialize_text".to_string()
        } else {
            format!("rt::deserialize_json::<{error_rust}>")
        };

        let caller_source = renderer.render(
            CodeTemplate::Caller,
            &json!({
                "verb": descriptor.verb.as_str(),
                "path": full_path,
                "caller_name": names.caller_name,
                "params_type": caller_params_type,
                "success_type": success_rust,
                "error_type": error_rust,
                "method": descriptor.verb.runtime_variant(),
                "base_url_const": self.context.base_url_const(),
                "pattern": caller_pattern,
                "url_expression": url_expression,
                "header_calls": header_calls,
                "has_body": shape.has_body(),
                "success_deserializer": success_deserializer,
                "error_deserializer": error_deserializer,
            }),
        )?;
        let declaration_source = renderer.render(
            CodeTemplate::TraitMethod,
            &json!({
                "doc_comment": doc_comment(&method_docs(descriptor, &full_path), "    "),
                "signature": signature,
            }),
        )?;
        let impl_source = renderer.render(
            CodeTemplate::ImplMethod,
            &json!({
                "signature": signature,
                "caller_name": names.caller_name,
                "call_arguments": call_arguments,
            }),
        )?;

        Ok(GeneratedMethod {
            name: names.name,
            fn_name: names.fn_name,
            caller_name: names.caller_name,
            verb: descriptor.verb,
            shape,
            signature_params,
            signature,
            caller_params_type,
            path_expression,
            query_expression,
            success_type: descriptor.success_type.clone(),
            error_type: descriptor.error_type.clone(),
            caller_source: caller_source.trim_end().to_string(),
            declaration_source: declaration_source.trim_end().to_string(),
            impl_source: impl_source.trim_end().to_string(),
        })
    }
}

fn is_success(status: &StatusCode) -> bool {
    match status {
        StatusCode::Code(code) => (200..300).contains(code),
        StatusCode::Range(range) => *range == 2,
    }
}

fn is_error(status: &StatusCode) -> bool {
    match status {
        StatusCode::Code(code) => (400..600).contains(code),
        StatusCode::Range(range) => *range == 4 || *range == 5,
    }
}

/// JSON content when declared, otherwise the first media type
fn preferred_media<'c>(
    content: impl IntoIterator<Item = (&'c String, &'c MediaType)>,
) -> Option<&'c MediaType> {
    let entries: Vec<(&String, &MediaType)> = content.into_iter().collect();
    entries
        .iter()
        .find(|(media_type, _)| media_type.as_str() == "application/json")
        .or_else(|| entries.iter().find(|(media_type, _)| media_type.contains("json")))
        .or_else(|| entries.first())
        .map(|(_, media)| *media)
}

fn parameter_parts(parameter: &Parameter) -> Option<(&ParameterData, ParameterLocation)> {
    match parameter {
        Parameter::Query { parameter_data, .. } => Some((parameter_data, ParameterLocation::Query)),
        Parameter::Header { parameter_data, .. } => {
            Some((parameter_data, ParameterLocation::Header))
        }
        Parameter::Path { parameter_data, .. } => Some((parameter_data, ParameterLocation::Path)),
        Parameter::Cookie { .. } => None,
    }
}

fn parameter_info(data: &ParameterData, location: ParameterLocation) -> ParameterInfo {
    let schema = match &data.format {
        ParameterSchemaOrContent::Schema(schema) => Some(schema),
        ParameterSchemaOrContent::Content(content) => {
            preferred_media(content).and_then(|media| media.schema.as_ref())
        }
    };
    let type_ref = schema.map_or(TypeRef::Object, map_type);
    let default_literal = match schema {
        Some(ReferenceOr::Item(item)) => item.schema_data.default.as_ref().and_then(default_literal),
        _ => None,
    };

    ParameterInfo {
        name: data.name.clone(),
        ident: String::new(),
        type_ref,
        location,
        required: location == ParameterLocation::Path || data.required,
        default_literal,
    }
}

/// Rust literal for a primitive JSON default; structured defaults are ignored
fn default_literal(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(rust_string_literal(s)),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Sanitizes identifiers, keeping them clear of the body and cancellation
/// arguments and of each other
fn assign_identifiers(parameters: &mut [ParameterInfo]) {
    let mut used: HashSet<String> = [BODY_IDENT, CANCELLATION_IDENT]
        .iter()
        .map(|s| s.to_string())
        .collect();

    for parameter in parameters.iter_mut() {
        let mut ident = sanitize_identifier(&parameter.name);
        if ident == BODY_IDENT || ident == CANCELLATION_IDENT {
            ident.push('_');
        }
        let mut candidate = ident.clone();
        let mut suffix = 2;
        while !used.insert(candidate.clone()) {
            candidate = format!("{ident}{suffix}");
            suffix += 1;
        }
        parameter.ident = candidate;
    }
}

/// `format!` template of a path plus its positional arguments.
///
/// Literal text is escaped. Placeholders of primitive parameters capture the
/// identifier inline; any other type is rendered by a positional argument.
fn format_template(full_path: &str, path_params: &[&ParameterInfo]) -> (String, Vec<String>) {
    let mut template = String::new();
    let mut args = Vec::new();
    let mut last = 0;
    for caps in PLACEHOLDER_RE.captures_iter(full_path) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        template.push_str(&escape_format_braces(&full_path[last..whole.start()]));
        match path_params.iter().find(|p| p.name == name.as_str()) {
            Some(param) if param.type_ref.is_primitive() => {
                template.push('{');
                template.push_str(&param.ident);
                template.push('}');
            }
            Some(param) => {
                template.push_str("{}");
                args.push(text_of(&param.ident, &param.type_ref));
            }
            None => template.push_str(&escape_format_braces(whole.as_str())),
        }
        last = whole.end();
    }
    template.push_str(&escape_format_braces(&full_path[last..]));
    (template, args)
}

fn format_call(template: &str, args: &[String]) -> String {
    let mut parts = vec![rust_string_literal(template)];
    parts.extend(args.iter().cloned());
    format!("format!({})", parts.join(", "))
}

/// Wraps the shape's caller value together with the header values
fn attach_headers(shape: CallShape, shaped: String, headers: &[String]) -> String {
    let headers = match headers {
        [] => return shaped,
        [single] => single.clone(),
        many => format!("({})", many.join(", ")),
    };
    if shape == CallShape::Unit {
        headers
    } else {
        format!("({shaped}, {headers})")
    }
}

/// Text of a borrowed value: `Display` for primitives, comma-joined lists,
/// JSON for everything else
fn text_of(value: &str, type_ref: &TypeRef) -> String {
    match type_ref {
        TypeRef::Primitive(_) => format!("{value}.to_string()"),
        TypeRef::List(inner) => format!(
            "{value}.iter().map({}).collect::<Vec<_>>().join(\",\")",
            item_to_text(inner)
        ),
        _ => format!("::serde_json::to_string({value}).unwrap_or_default()"),
    }
}

/// Function expression turning `&T` into text
fn item_to_text(type_ref: &TypeRef) -> String {
    match type_ref {
        TypeRef::Primitive(_) => "ToString::to_string".to_string(),
        TypeRef::List(_) => format!("|values| {}", text_of("values", type_ref)),
        _ => "|value| ::serde_json::to_string(value).unwrap_or_default()".to_string(),
    }
}

/// Expression of type `Option<String>` for one query pair or header
fn param_value(param: &ParameterInfo) -> String {
    let ident = &param.ident;
    if param.required {
        return format!("Some({})", text_of(ident, &param.type_ref));
    }

    let to_text = item_to_text(&param.type_ref);
    match &param.default_literal {
        Some(literal) => format!(
            "Some({ident}.as_ref().map_or_else(|| ({literal}).to_string(), {to_text}))"
        ),
        None => format!("{ident}.as_ref().map({to_text})"),
    }
}

/// Public parameters: required ones, then the body, then optional ones
fn signature_params(caller_params: &[&ParameterInfo], body: Option<&TypeRef>) -> Vec<SignatureParam> {
    let to_param = |p: &&ParameterInfo| SignatureParam {
        ident: p.ident.clone(),
        type_name: p.call_site_type(),
    };

    let mut params: Vec<SignatureParam> = caller_params
        .iter()
        .filter(|p| p.required)
        .map(to_param)
        .collect();
    if let Some(body) = body {
        params.push(SignatureParam {
            ident: BODY_IDENT.to_string(),
            type_name: body.rust_type(),
        });
    }
    params.extend(caller_params.iter().filter(|p| p.is_optional()).map(to_param));
    params
}

fn method_docs(descriptor: &OperationDescriptor, full_path: &str) -> String {
    let mut sections: Vec<String> = Vec::new();
    if let Some(summary) = &descriptor.summary {
        sections.push(summary.clone());
    }
    if let Some(description) = &descriptor.description {
        if descriptor.summary.as_deref() != Some(description.as_str()) {
            sections.push(description.clone());
        }
    }
    sections.push(format!("`{} {}`", descriptor.verb, full_path));
    sections.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::Primitive;
    use crate::infrastructure::generation::TeraCodeRenderer;
    use tracing_test::traced_test;

    fn document(value: serde_json::Value) -> OpenAPI {
        serde_json::from_value(value).unwrap()
    }

    fn context(base_url: &str, base_path: &str) -> ExtensionContext {
        ExtensionContext::new(
            &GeneratorOptions::default(),
            &ResolvedBase::new(base_url, base_path),
        )
    }

    fn petstore() -> OpenAPI {
        document(json!({
            "openapi": "3.0.0",
            "info": { "title": "Petstore", "version": "1.0.0" },
            "servers": [{ "url": "https://api.test.com/v1" }],
            "paths": {
                "/pets": {
                    "get": {
                        "operationId": "listPets",
                        "summary": "List all pets",
                        "parameters": [
                            { "name": "limit", "in": "query", "schema": { "type": "integer", "format": "int32" } }
                        ],
                        "responses": {
                            "200": {
                                "description": "A paged array of pets",
                                "content": { "application/json": { "schema": {
                                    "type": "array", "items": { "$ref": "#/components/schemas/Pet" }
                                } } }
                            },
                            "default": {
                                "description": "unexpected error",
                                "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Error" } } }
                            }
                        }
                    },
                    "post": {
                        "operationId": "createPets",
                        "requestBody": {
                            "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Pet" } } }
                        },
                        "responses": {
                            "201": {
                                "description": "Created",
                                "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Pet" } } }
                            }
                        }
                    }
                },
                "/pets/{petId}": {
                    "parameters": [
                        { "name": "petId", "in": "path", "required": true, "schema": { "type": "string" } }
                    ],
                    "get": {
                        "operationId": "showPetById",
                        "responses": {
                            "200": {
                                "description": "Expected response to a valid request",
                                "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Pet" } } }
                            },
                            "404": {
                                "description": "Not found",
                                "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Error" } } }
                            }
                        }
                    },
                    "delete": {
                        "operationId": "deletePet",
                        "responses": { "204": { "description": "Deleted" } }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Pet": {
                        "type": "object",
                        "required": ["id", "name"],
                        "properties": {
                            "id": { "type": "integer", "format": "int64" },
                            "name": { "type": "string" }
                        }
                    },
                    "Error": {
                        "type": "object",
                        "properties": { "message": { "type": "string" } }
                    }
                }
            }
        }))
    }

    fn generate(doc: &OpenAPI, ctx: ExtensionContext) -> ExtensionOutput {
        let renderer = TeraCodeRenderer::new().unwrap();
        let mut session = GenerationSession::new();
        ExtensionMethodGenerator::new(doc, ctx)
            .generate(&renderer, &mut session)
            .unwrap()
    }

    fn method<'m>(output: &'m ExtensionOutput, fn_name: &str) -> &'m GeneratedMethod {
        output
            .methods
            .iter()
            .find(|m| m.fn_name == fn_name)
            .unwrap_or_else(|| panic!("missing method {fn_name}"))
    }

    #[test]
    fn test_descriptors_follow_path_and_verb_order() {
        let doc = petstore();
        let generator = ExtensionMethodGenerator::new(&doc, context("https://api.test.com", "/v1"));
        let visited: Vec<(HttpVerb, String)> = generator
            .operation_descriptors()
            .into_iter()
            .map(|d| (d.verb, d.path))
            .collect();
        assert_eq!(
            visited,
            vec![
                (HttpVerb::Get, "/pets".to_string()),
                (HttpVerb::Post, "/pets".to_string()),
                (HttpVerb::Get, "/pets/{petId}".to_string()),
                (HttpVerb::Delete, "/pets/{petId}".to_string()),
            ]
        );
    }

    #[test]
    fn test_response_types() {
        let doc = petstore();
        let generator = ExtensionMethodGenerator::new(&doc, context("https://api.test.com", "/v1"));
        let descriptors = generator.operation_descriptors();

        assert_eq!(descriptors[0].success_type, TypeRef::list(TypeRef::named("Pet")));
        // `default` is never an error response
        assert_eq!(descriptors[0].error_type, TypeRef::string());
        assert_eq!(descriptors[1].success_type, TypeRef::named("Pet"));
        assert_eq!(descriptors[1].request_body, Some(TypeRef::named("Pet")));
        assert_eq!(descriptors[2].error_type, TypeRef::named("Error"));
        assert_eq!(descriptors[3].success_type, TypeRef::Unit);
        assert_eq!(descriptors[3].request_body, None);
    }

    #[test]
    fn test_petstore_methods_and_shapes() {
        let doc = petstore();
        let output = generate(&doc, context("https://api.test.com", "/v1"));
        let names: Vec<&str> = output.methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["ListPets", "CreatePets", "ShowPetById", "DeletePet"]);

        let list = method(&output, "list_pets");
        assert_eq!(list.shape, CallShape::Query { composite: false });
        assert_eq!(
            list.signature,
            "async fn list_pets(&self, limit: Option<i32>, cancellation: &rt::CancellationToken) -> ::std::result::Result<Vec<Pet>, rt::HttpError<String>>"
        );
        assert_eq!(list.path_expression, "String::from(\"/v1/pets\")");
        assert_eq!(
            list.query_expression.as_deref(),
            Some("rt::query_string(&[(\"limit\", limit.as_ref().map(ToString::to_string))])")
        );

        let create = method(&output, "create_pets");
        assert_eq!(create.shape, CallShape::BodyOnly);
        assert_eq!(create.caller_params_type, "Pet");

        let show = method(&output, "show_pet_by_id");
        assert_eq!(show.shape, CallShape::Path { composite: false });
        assert_eq!(show.path_expression, "format!(\"/v1/pets/{pet_id}\")");

        let delete = method(&output, "delete_pet");
        assert_eq!(delete.success_type, TypeRef::Unit);
        assert!(delete.signature.ends_with("::std::result::Result<(), rt::HttpError<String>>"));
    }

    #[test]
    fn test_petstore_emitted_code() {
        let doc = petstore();
        let output = generate(&doc, context("https://api.test.com", "/v1"));
        let code = &output.methods_code;

        assert!(code.contains("use ::http_runtime as rt;"));
        assert!(code.contains("pub const API_EXTENSIONS_BASE_URL: &str = \"https://api.test.com\";"));
        assert!(code.contains(
            "static LIST_PETS_CALLER: rt::RestCaller<Option<i32>, Vec<Pet>, String> ="
        ));
        assert!(code.contains(
            "|limit: &Option<i32>| rt::RequestParts::new(format!(\"/v1/pets{}\", rt::query_string(&[(\"limit\", limit.as_ref().map(ToString::to_string))]))),"
        ));
        assert!(code.contains("|body: &Pet| rt::RequestParts::new(String::from(\"/v1/pets\")).json(body),"));
        assert!(code.contains("rt::deserialize_json::<Vec<Pet>>,"));
        assert!(code.contains("rt::deserialize_json::<Error>,"));
        assert!(code.contains("rt::deserialize_unit,"));
        assert!(code.contains("rt::deserialize_text,"));
        assert!(code.contains("#[allow(async_fn_in_trait)]\npub trait ApiExtensions {"));
        assert!(code.contains("impl ApiExtensions for rt::HttpClient {"));
        assert!(code.contains("    /// List all pets\n    ///\n    /// `GET /v1/pets`\n    async fn list_pets("));
        assert!(code.contains("        LIST_PETS_CALLER.send(self, limit, cancellation).await"));
        assert!(code.contains("        SHOW_PET_BY_ID_CALLER.send(self, pet_id, cancellation).await"));
        assert!(code.contains("        DELETE_PET_CALLER.send(self, pet_id, cancellation).await"));
    }

    #[test]
    fn test_one_alias_pair_per_distinct_success_type() {
        let doc = petstore();
        let output = generate(&doc, context("https://api.test.com", "/v1"));
        let code = &output.type_aliases_code;

        assert!(code.contains("pub type OkPet = crate::generated::Pet;"));
        assert!(code.contains("pub type OkPetList = ::std::vec::Vec<crate::generated::Pet>;"));
        assert!(code.contains("pub type OkUnit = ();"));
        assert!(code.contains(
            "pub type ErrorPet = ::http_runtime::HttpError<::std::string::String>;"
        ));
        assert_eq!(code.matches("pub type Ok").count(), 3);
        assert_eq!(code.matches("pub type Error").count(), 3);
    }

    #[test]
    fn test_model_and_list_with_same_stem_both_get_aliases() {
        let doc = document(json!({
            "openapi": "3.0.0",
            "info": { "title": "t", "version": "1" },
            "paths": {
                "/a": { "get": { "operationId": "getA", "responses": { "200": { "description": "ok", "content": { "application/json": { "schema": { "$ref": "#/components/schemas/PetList" } } } } } } },
                "/b": { "get": { "operationId": "getB", "responses": { "200": { "description": "ok", "content": { "application/json": { "schema": { "type": "array", "items": { "$ref": "#/components/schemas/Pet" } } } } } } } }
            },
            "components": {
                "schemas": {
                    "Pet": { "type": "object", "properties": { "name": { "type": "string" } } },
                    "PetList": { "type": "object", "properties": { "total": { "type": "integer" } } }
                }
            }
        }));
        let output = generate(&doc, context("https://x.com", ""));
        let code = &output.type_aliases_code;

        assert!(code.contains("pub type OkPetList = crate::generated::PetList;"));
        assert!(code.contains("pub type OkPetList2 = ::std::vec::Vec<crate::generated::Pet>;"));
        assert!(code.contains("pub type ErrorPetList2 ="));
        assert_eq!(code.matches("pub type Ok").count(), 2);
    }

    #[test]
    fn test_relative_base_path_prefixes_every_path() {
        let doc = document(json!({
            "openapi": "3.0.0",
            "info": { "title": "t", "version": "1" },
            "paths": {
                "/test": { "get": { "responses": { "200": { "description": "ok" } } } }
            }
        }));
        let output = generate(&doc, context("https://example.com", "/api/v1"));
        assert!(output.methods_code.contains("https://example.com"));
        assert!(output.methods_code.contains("/api/v1/test"));

        let get = &output.methods[0];
        assert_eq!(get.name, "GetTest");
        assert_eq!(get.shape, CallShape::Unit);
        assert_eq!(get.success_type, TypeRef::Object);
        assert!(output.methods_code.contains("|_: &()| rt::RequestParts::new(String::from(\"/api/v1/test\")),"));
        assert!(output.methods_code.contains("GET_TEST_CALLER.send(self, (), cancellation).await"));
    }

    #[test]
    fn test_parameter_merging_and_resolution() {
        let doc = document(json!({
            "openapi": "3.0.0",
            "info": { "title": "t", "version": "1" },
            "paths": {
                "/owners/{ownerId}/pets/{petId}": {
                    "parameters": [
                        { "name": "petId", "in": "path", "required": true, "schema": { "type": "string" } },
                        { "name": "verbose", "in": "query", "schema": { "type": "boolean" } }
                    ],
                    "get": {
                        "parameters": [
                            { "name": "petId", "in": "path", "required": true, "schema": { "type": "integer", "format": "int64" } },
                            { "$ref": "#/components/parameters/Limit" },
                            { "name": "X-Trace", "in": "header", "schema": { "type": "string" } },
                            { "name": "session", "in": "cookie", "schema": { "type": "string" } }
                        ],
                        "responses": { "200": { "description": "ok" } }
                    }
                }
            },
            "components": {
                "parameters": {
                    "Limit": { "name": "limit", "in": "query", "required": true, "schema": { "type": "integer" } }
                }
            }
        }));
        let generator = ExtensionMethodGenerator::new(&doc, context("https://x.com", ""));
        let descriptor = &generator.operation_descriptors()[0];

        let summary: Vec<(&str, ParameterLocation, bool)> = descriptor
            .parameters
            .iter()
            .map(|p| (p.name.as_str(), p.location, p.required))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("ownerId", ParameterLocation::Path, true),
                ("petId", ParameterLocation::Path, true),
                ("verbose", ParameterLocation::Query, false),
                ("limit", ParameterLocation::Query, true),
                ("X-Trace", ParameterLocation::Header, false),
            ]
        );
        // The operation's declaration wins over the path item's
        assert_eq!(descriptor.parameters[1].type_ref, TypeRef::Primitive(Primitive::I64));
        // Undeclared placeholders become required strings
        assert_eq!(descriptor.parameters[0].type_ref, TypeRef::string());

        let output = generate(&doc, context("https://x.com", ""));
        let get = &output.methods[0];
        assert_eq!(get.shape, CallShape::Path { composite: true });
        assert_eq!(
            get.caller_params_type,
            "((String, i64, Option<bool>, i32), Option<String>)"
        );
        assert_eq!(
            get.path_expression,
            "format!(\"/owners/{owner_id}/pets/{pet_id}\")"
        );
        let signature_idents: Vec<&str> =
            get.signature_params.iter().map(|p| p.ident.as_str()).collect();
        assert_eq!(
            signature_idents,
            vec!["owner_id", "pet_id", "limit", "verbose", "x_trace"]
        );
        assert!(!get.signature.contains("session"));
        assert!(output.methods_code.contains(
            ".header(\"X-Trace\", x_trace.as_ref().map(ToString::to_string))"
        ));
    }

    #[test]
    fn test_header_parameters_reach_signature_and_request() {
        let doc = document(json!({
            "openapi": "3.0.0",
            "info": { "title": "t", "version": "1" },
            "paths": {
                "/pets": {
                    "get": {
                        "operationId": "listPets",
                        "parameters": [
                            { "name": "X-Api-Key", "in": "header", "required": true, "schema": { "type": "string" } }
                        ],
                        "responses": { "200": { "description": "ok" } }
                    },
                    "post": {
                        "operationId": "createPet",
                        "parameters": [
                            { "name": "X-Api-Key", "in": "header", "required": true, "schema": { "type": "string" } },
                            { "name": "X-Request-Id", "in": "header", "schema": { "type": "string" } }
                        ],
                        "requestBody": {
                            "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Pet" } } }
                        },
                        "responses": { "201": { "description": "created" } }
                    }
                }
            }
        }));
        let output = generate(&doc, context("https://x.com", ""));
        let code = &output.methods_code;

        // Headers never change the call shape
        let list = method(&output, "list_pets");
        assert_eq!(list.shape, CallShape::Unit);
        assert_eq!(list.caller_params_type, "String");
        assert_eq!(
            list.signature,
            "async fn list_pets(&self, x_api_key: String, cancellation: &rt::CancellationToken) -> ::std::result::Result<::serde_json::Value, rt::HttpError<String>>"
        );
        assert!(code.contains(
            "|x_api_key: &String| rt::RequestParts::new(String::from(\"/pets\")).header(\"X-Api-Key\", Some(x_api_key.to_string())),"
        ));
        assert!(code.contains("LIST_PETS_CALLER.send(self, x_api_key, cancellation).await"));

        let create = method(&output, "create_pet");
        assert_eq!(create.shape, CallShape::BodyOnly);
        assert_eq!(create.caller_params_type, "(Pet, (String, Option<String>))");
        let idents: Vec<&str> = create.signature_params.iter().map(|p| p.ident.as_str()).collect();
        assert_eq!(idents, vec!["x_api_key", "body", "x_request_id"]);
        assert!(code.contains(
            "|(body, (x_api_key, x_request_id)): &(Pet, (String, Option<String>))| rt::RequestParts::new(String::from(\"/pets\")).header(\"X-Api-Key\", Some(x_api_key.to_string())).header(\"X-Request-Id\", x_request_id.as_ref().map(ToString::to_string)).json(body),"
        ));
        assert!(code.contains(
            "CREATE_PET_CALLER.send(self, (body, (x_api_key, x_request_id)), cancellation).await"
        ));
    }

    #[test]
    fn test_structured_path_and_query_values() {
        let doc = document(json!({
            "openapi": "3.0.0",
            "info": { "title": "t", "version": "1" },
            "paths": {
                "/items/{ids}": {
                    "get": {
                        "operationId": "getItems",
                        "parameters": [
                            { "name": "ids", "in": "path", "required": true, "schema": { "type": "array", "items": { "type": "integer" } } },
                            { "name": "filter", "in": "query", "schema": { "$ref": "#/components/schemas/Filter" } }
                        ],
                        "responses": { "200": { "description": "ok" } }
                    }
                }
            }
        }));
        let output = generate(&doc, context("https://x.com", ""));
        let get = &output.methods[0];

        assert_eq!(
            get.path_expression,
            "format!(\"/items/{}\", ids.iter().map(ToString::to_string).collect::<Vec<_>>().join(\",\"))"
        );
        assert!(output.methods_code.contains(
            "rt::RequestParts::new(format!(\"/items/{}{}\", ids.iter().map(ToString::to_string).collect::<Vec<_>>().join(\",\"), rt::query_string(&[(\"filter\", filter.as_ref().map(|value| ::serde_json::to_string(value).unwrap_or_default()))])))"
        ));
    }

    #[test]
    fn test_params_with_body_and_renamed_identifiers() {
        let doc = document(json!({
            "openapi": "3.0.0",
            "info": { "title": "t", "version": "1" },
            "paths": {
                "/pets/{petId}": {
                    "put": {
                        "operationId": "updatePet",
                        "parameters": [
                            { "name": "petId", "in": "path", "required": true, "schema": { "type": "integer", "format": "int64" } },
                            { "name": "body", "in": "query", "schema": { "type": "string" } },
                            { "name": "cancellation", "in": "query", "required": true, "schema": { "type": "string" } }
                        ],
                        "requestBody": {
                            "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Pet" } } }
                        },
                        "responses": { "200": { "description": "ok" } }
                    }
                },
                "/search": {
                    "post": {
                        "operationId": "search",
                        "parameters": [
                            { "name": "q", "in": "query", "required": true, "schema": { "type": "string" } }
                        ],
                        "responses": { "200": { "description": "ok" } }
                    }
                }
            }
        }));
        let output = generate(&doc, context("https://x.com", ""));

        let update = &output.methods[0];
        assert_eq!(update.shape, CallShape::ParamsWithBody { composite: true });
        assert_eq!(
            update.caller_params_type,
            "((i64, Option<String>, String), Pet)"
        );
        assert_eq!(
            update.signature,
            "async fn update_pet(&self, pet_id: i64, cancellation_: String, body: Pet, body_: Option<String>, cancellation: &rt::CancellationToken) -> ::std::result::Result<::serde_json::Value, rt::HttpError<String>>"
        );
        assert!(output.methods_code.contains(
            "|((pet_id, body_, cancellation_), body): &((i64, Option<String>, String), Pet)|"
        ));
        assert!(output.methods_code.contains(
            "UPDATE_PET_CALLER.send(self, ((pet_id, body_, cancellation_), body), cancellation).await"
        ));

        // Query plus a body without a declared request body schema
        let search = &output.methods[1];
        assert_eq!(search.shape, CallShape::ParamsWithBody { composite: false });
        assert_eq!(search.caller_params_type, "(String, ::serde_json::Value)");
        assert!(output.methods_code.contains(
            "rt::RequestParts::new(format!(\"/search{}\", rt::query_string(&[(\"q\", Some(q.to_string()))]))).json(body),"
        ));
    }

    #[test]
    fn test_default_values_and_list_query_values() {
        let doc = document(json!({
            "openapi": "3.0.0",
            "info": { "title": "t", "version": "1" },
            "paths": {
                "/pets": {
                    "get": {
                        "parameters": [
                            { "name": "limit", "in": "query", "schema": { "type": "integer", "default": 10 } },
                            { "name": "status", "in": "query", "schema": { "type": "string", "default": "available" } },
                            { "name": "tags", "in": "query", "required": true, "schema": { "type": "array", "items": { "type": "string" } } },
                            { "name": "ids", "in": "query", "schema": { "type": "array", "items": { "type": "integer" } } }
                        ],
                        "responses": { "200": { "description": "ok" } }
                    }
                }
            }
        }));
        let output = generate(&doc, context("https://x.com", ""));
        let get = &output.methods[0];

        assert_eq!(get.shape, CallShape::Query { composite: true });
        assert_eq!(
            get.caller_params_type,
            "(Option<i32>, Option<String>, Vec<String>, Option<Vec<i32>>)"
        );
        let query = get.query_expression.as_deref().unwrap();
        assert!(query.contains(
            "(\"limit\", Some(limit.as_ref().map_or_else(|| (10).to_string(), ToString::to_string)))"
        ));
        assert!(query.contains(
            "(\"status\", Some(status.as_ref().map_or_else(|| (\"available\").to_string(), ToString::to_string)))"
        ));
        assert!(query.contains(
            "(\"tags\", Some(tags.iter().map(ToString::to_string).collect::<Vec<_>>().join(\",\")))"
        ));
        assert!(query.contains(
            "(\"ids\", ids.as_ref().map(|values| values.iter().map(ToString::to_string).collect::<Vec<_>>().join(\",\")))"
        ));
    }

    #[test]
    fn test_name_collisions_and_path_based_names() {
        let doc = document(json!({
            "openapi": "3.0.0",
            "info": { "title": "t", "version": "1" },
            "paths": {
                "/a": { "get": { "operationId": "Foo", "responses": {} } },
                "/b": { "get": { "operationId": "foo", "responses": {} } },
                "/users/{id}": {
                    "get": { "responses": {} },
                    "put": { "responses": {} },
                    "patch": { "responses": {} }
                },
                "/users": { "get": { "responses": {} } }
            }
        }));
        let output = generate(&doc, context("https://x.com", ""));
        let names: Vec<&str> = output.methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Foo", "Foo2", "GetUsers", "UpdateUsers", "PatchUsers", "GetUsers2"]
        );
    }

    #[test]
    fn test_response_edge_cases() {
        let doc = document(json!({
            "openapi": "3.0.0",
            "info": { "title": "t", "version": "1" },
            "paths": {
                "/ranged": {
                    "get": {
                        "responses": {
                            "2XX": {
                                "description": "ok",
                                "content": { "application/json": { "schema": { "type": "integer" } } }
                            },
                            "5XX": {
                                "description": "error",
                                "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Problem" } } }
                            }
                        }
                    }
                },
                "/fallback": {
                    "get": {
                        "responses": {
                            "default": {
                                "description": "anything",
                                "content": { "text/plain": { "schema": { "type": "string" } } }
                            }
                        }
                    }
                },
                "/shared": {
                    "get": {
                        "responses": { "200": { "$ref": "#/components/responses/Ok" } }
                    }
                }
            },
            "components": {
                "responses": {
                    "Ok": {
                        "description": "shared",
                        "content": { "application/json": { "schema": { "type": "array", "items": { "$ref": "#/components/schemas/Pet" } } } }
                    }
                }
            }
        }));
        let generator = ExtensionMethodGenerator::new(&doc, context("https://x.com", ""));
        let descriptors = generator.operation_descriptors();

        assert_eq!(descriptors[0].success_type, TypeRef::Primitive(Primitive::I32));
        assert_eq!(descriptors[0].error_type, TypeRef::named("Problem"));
        assert_eq!(descriptors[1].success_type, TypeRef::string());
        assert_eq!(descriptors[2].success_type, TypeRef::list(TypeRef::named("Pet")));
    }

    #[test]
    fn test_referenced_path_items_are_skipped() {
        let doc = document(json!({
            "openapi": "3.0.0",
            "info": { "title": "t", "version": "1" },
            "paths": {
                "/remote": { "$ref": "other.yaml#/paths/~1remote" },
                "/local": { "get": { "responses": {} } }
            }
        }));
        let output = generate(&doc, context("https://x.com", ""));
        assert_eq!(output.methods.len(), 1);
        assert_eq!(output.methods[0].name, "GetLocal");
    }

    #[test]
    #[traced_test]
    fn test_undeclared_path_parameters_are_dropped_with_warning() {
        let doc = document(json!({
            "openapi": "3.0.0",
            "info": { "title": "Stale", "version": "1.0.0" },
            "paths": {
                "/reports": {
                    "get": {
                        "operationId": "listReports",
                        "parameters": [
                            { "name": "reportId", "in": "path", "required": true, "schema": { "type": "string" } }
                        ],
                        "responses": { "200": { "description": "ok" } }
                    }
                }
            }
        }));
        let generator = ExtensionMethodGenerator::new(&doc, context("https://x.com", ""));
        let descriptor = &generator.operation_descriptors()[0];

        assert!(descriptor.parameters.is_empty());
        assert!(logs_contain("Path parameter 'reportId'"));
        assert!(logs_contain("does not appear in the path"));
    }

    #[test]
    fn test_format_template_escapes_literal_braces() {
        let id = ParameterInfo {
            name: "id".to_string(),
            ident: "id".to_string(),
            type_ref: TypeRef::string(),
            location: ParameterLocation::Path,
            required: true,
            default_literal: None,
        };
        assert_eq!(
            format_template("/v1/items/{id}", &[&id]),
            ("/v1/items/{id}".to_string(), vec![])
        );
        assert_eq!(
            format_template("/v1/{other}/x", &[&id]),
            ("/v1/{{other}}/x".to_string(), vec![])
        );

        let filter = ParameterInfo {
            name: "filter".to_string(),
            ident: "filter".to_string(),
            type_ref: TypeRef::named("Filter"),
            ..id.clone()
        };
        assert_eq!(
            format_template("/v1/{id}/{filter}", &[&id, &filter]),
            (
                "/v1/{id}/{}".to_string(),
                vec!["::serde_json::to_string(filter).unwrap_or_default()".to_string()]
            )
        );
    }
}
