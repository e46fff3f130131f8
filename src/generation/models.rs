//! Model generation from `components.schemas`
//!
//! Object schemas become serde structs, everything else becomes a type alias
//! of its mapped type. Declarations keep the order of the document.

use std::collections::{HashMap, HashSet};

use openapiv3::{OpenAPI, ReferenceOr, Schema, SchemaKind, Type};
use serde::Serialize;
use serde_json::json;
use tracing::debug;

use crate::generation::sanitizers::{doc_comment, rust_string_literal};
use crate::generation::type_mapping::{map_schema, map_type};
use crate::generation::utils::{sanitize_identifier, to_type_name};
use crate::generation::{CodeRenderer, CodeTemplate, Result, TypeRef};

const OPTIONAL_FIELD_ATTRIBUTE: &str = r#"#[serde(default, skip_serializing_if = "Option::is_none")]"#;

/// One field of a generated struct
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDefinition {
    /// Property name on the wire
    pub name: String,
    pub ident: String,
    pub type_name: String,
    pub required: bool,
    pub doc_comment: String,
    pub attributes: Vec<String>,
}

/// One generated declaration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelDefinition {
    pub name: String,
    pub doc_comment: String,
    /// `pub struct` when true, `pub type` otherwise
    pub is_struct: bool,
    pub fields: Vec<FieldDefinition>,
    /// Aliased type for non-struct declarations
    pub target: Option<String>,
}

/// Generates the models file of a document
pub struct ModelGenerator<'a> {
    document: &'a OpenAPI,
}

impl<'a> ModelGenerator<'a> {
    pub fn new(document: &'a OpenAPI) -> Self {
        Self { document }
    }

    /// Declarations for every component schema, in declaration order
    pub fn model_definitions(&self) -> Vec<ModelDefinition> {
        let Some(components) = &self.document.components else {
            return Vec::new();
        };

        let schemas: Vec<(String, &ReferenceOr<Schema>)> = components
            .schemas
            .iter()
            .map(|(name, schema)| (to_type_name(name), schema))
            .collect();
        let graph = ValueGraph::new(&schemas);

        schemas
            .iter()
            .map(|(name, schema)| {
                let definition = model_definition(name, schema, &graph);
                debug!(
                    "Model {} -> {}",
                    definition.name,
                    if definition.is_struct { "struct" } else { "alias" }
                );
                definition
            })
            .collect()
    }

    /// Render the models file
    pub fn generate_models(&self, renderer: &dyn CodeRenderer) -> Result<String> {
        let models = self.model_definitions();
        renderer.render(CodeTemplate::ModelsFile, &json!({ "models": models }))
    }
}

/// By-value references between models. A field whose type leads back to its
/// own model is boxed, or the struct would contain itself.
struct ValueGraph {
    edges: HashMap<String, Vec<String>>,
}

impl ValueGraph {
    fn new(schemas: &[(String, &ReferenceOr<Schema>)]) -> Self {
        let edges = schemas
            .iter()
            .map(|(name, schema)| (name.clone(), value_references(schema)))
            .collect();
        Self { edges }
    }

    fn needs_box(&self, model: &str, field_type: &TypeRef) -> bool {
        match field_type {
            TypeRef::Named(target) => self.reaches(target, model),
            _ => false,
        }
    }

    fn reaches(&self, from: &str, target: &str) -> bool {
        let mut visited = HashSet::new();
        let mut pending = vec![from];
        while let Some(current) = pending.pop() {
            if current == target {
                return true;
            }
            if !visited.insert(current) {
                continue;
            }
            if let Some(next) = self.edges.get(current) {
                pending.extend(next.iter().map(String::as_str));
            }
        }
        false
    }
}

/// Models a schema holds by value: plain `$ref`s and `$ref` properties
fn value_references(schema: &ReferenceOr<Schema>) -> Vec<String> {
    let named = |type_ref: TypeRef| match type_ref {
        TypeRef::Named(name) => Some(name),
        _ => None,
    };

    match schema {
        ReferenceOr::Reference { .. } => named(map_type(schema)).into_iter().collect(),
        ReferenceOr::Item(item) => match object_members(item) {
            Some((properties, _)) => properties
                .iter()
                .filter_map(|(_, property)| named(map_type(*property)))
                .collect(),
            None => named(map_schema(item)).into_iter().collect(),
        },
    }
}

fn model_definition(name: &str, schema: &ReferenceOr<Schema>, graph: &ValueGraph) -> ModelDefinition {
    let item = match schema {
        ReferenceOr::Reference { .. } => return alias_definition(name, String::new(), map_type(schema)),
        ReferenceOr::Item(item) => item,
    };

    let doc = item
        .schema_data
        .description
        .as_deref()
        .or(item.schema_data.title.as_deref())
        .map(|text| doc_comment(text, ""))
        .unwrap_or_default();

    match object_members(item) {
        Some((properties, required)) => ModelDefinition {
            name: name.to_string(),
            doc_comment: doc,
            is_struct: true,
            fields: field_definitions(name, &properties, required, graph),
            target: None,
        },
        None => alias_definition(name, doc, map_schema(item)),
    }
}

fn alias_definition(name: &str, doc_comment: String, target: TypeRef) -> ModelDefinition {
    ModelDefinition {
        name: name.to_string(),
        doc_comment,
        is_struct: false,
        fields: Vec::new(),
        target: Some(target.rust_type()),
    }
}

type Property<'s> = (&'s String, &'s ReferenceOr<Box<Schema>>);

/// Properties and required names of an object schema
fn object_members(schema: &Schema) -> Option<(Vec<Property<'_>>, &[String])> {
    match &schema.schema_kind {
        SchemaKind::Type(Type::Object(object)) => {
            Some((object.properties.iter().collect(), &object.required))
        }
        SchemaKind::Any(any)
            if any.typ.as_deref() == Some("object")
                || (any.typ.is_none() && !any.properties.is_empty()) =>
        {
            Some((any.properties.iter().collect(), &any.required))
        }
        _ => None,
    }
}

fn field_definitions(
    model_name: &str,
    properties: &[Property<'_>],
    required: &[String],
    graph: &ValueGraph,
) -> Vec<FieldDefinition> {
    let mut seen: HashMap<String, usize> = HashMap::new();

    properties
        .iter()
        .map(|&(property, schema)| {
            let base_ident = sanitize_identifier(property);
            let count = seen.entry(base_ident.clone()).or_insert(0);
            *count += 1;
            let ident = if *count == 1 {
                base_ident
            } else {
                format!("{base_ident}{count}")
            };

            let is_required = required.iter().any(|r| r == property);
            let mapped = map_type(schema);
            let inner = if graph.needs_box(model_name, &mapped) {
                format!("Box<{}>", mapped.rust_type())
            } else {
                mapped.rust_type()
            };

            let mut attributes = Vec::new();
            if ident != *property {
                attributes.push(format!("#[serde(rename = {})]", rust_string_literal(property)));
            }
            if !is_required {
                attributes.push(OPTIONAL_FIELD_ATTRIBUTE.to_string());
            }

            let doc = match schema {
                ReferenceOr::Item(item) => item
                    .schema_data
                    .description
                    .as_deref()
                    .map(|text| doc_comment(text, "    "))
                    .unwrap_or_default(),
                ReferenceOr::Reference { .. } => String::new(),
            };

            FieldDefinition {
                name: property.clone(),
                ident,
                type_name: if is_required {
                    inner
                } else {
                    format!("Option<{inner}>")
                },
                required: is_required,
                doc_comment: doc,
                attributes,
            }
        })
        .collect()
}
