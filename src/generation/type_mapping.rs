//! Schema to Rust type mapping
//!
//! [`map_type`] is the single place where OpenAPI schemas become target
//! types. It is pure and total: every schema maps to some [`TypeRef`], and
//! anything the generator does not understand becomes the generic object
//! type (`::serde_json::Value`).

use std::borrow::Borrow;
use std::fmt;

use openapiv3::{
    AnySchema, IntegerFormat, NumberFormat, ReferenceOr, Schema, SchemaKind, Type,
    VariantOrUnknownOrEmpty,
};
use serde::Serialize;

use crate::generation::utils::to_type_name;

/// Scalar target types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Primitive {
    I32,
    I64,
    F32,
    F64,
    Bool,
    String,
}

impl Primitive {
    /// Name of the type inside generated code
    pub fn rust_name(self) -> &'static str {
        match self {
            Primitive::I32 => "i32",
            Primitive::I64 => "i64",
            Primitive::F32 => "f32",
            Primitive::F64 => "f64",
            Primitive::Bool => "bool",
            Primitive::String => "String",
        }
    }

    /// Name that cannot be shadowed by a generated model
    pub fn qualified_name(self) -> &'static str {
        match self {
            Primitive::String => "::std::string::String",
            other => other.rust_name(),
        }
    }

    fn stem(self) -> &'static str {
        match self {
            Primitive::I32 => "I32",
            Primitive::I64 => "I64",
            Primitive::F32 => "F32",
            Primitive::F64 => "F64",
            Primitive::Bool => "Bool",
            Primitive::String => "String",
        }
    }
}

/// A resolved target type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    /// A model declared in the generated models file
    Named(String),
    /// `Vec<T>`
    List(Box<TypeRef>),
    Primitive(Primitive),
    /// The generic object type, used whenever a schema cannot be resolved
    Object,
    /// The zero-value type, used for DELETE responses
    Unit,
}

impl TypeRef {
    pub fn named<S: Into<String>>(name: S) -> Self {
        TypeRef::Named(name.into())
    }

    pub fn list(inner: TypeRef) -> Self {
        TypeRef::List(Box::new(inner))
    }

    pub fn string() -> Self {
        TypeRef::Primitive(Primitive::String)
    }

    pub fn is_unit(&self) -> bool {
        matches!(self, TypeRef::Unit)
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, TypeRef::Primitive(_))
    }

    /// True for plain strings, which error bodies are read as raw text
    pub fn is_string(&self) -> bool {
        matches!(self, TypeRef::Primitive(Primitive::String))
    }

    /// Type as written inside the generated module.
    pub fn rust_type(&self) -> String {
        match self {
            TypeRef::Named(name) => name.clone(),
            TypeRef::List(inner) => format!("Vec<{}>", inner.rust_type()),
            TypeRef::Primitive(primitive) => primitive.rust_name().to_string(),
            TypeRef::Object => "::serde_json::Value".to_string(),
            TypeRef::Unit => "()".to_string(),
        }
    }

    /// Fully qualified type; named models live under `module_path`.
    ///
    /// ```
    /// use openapi_bindgen::generation::TypeRef;
    ///
    /// let pets = TypeRef::list(TypeRef::named("Pet"));
    /// assert_eq!(
    ///     pets.qualified("crate::generated"),
    ///     "::std::vec::Vec<crate::generated::Pet>"
    /// );
    /// ```
    pub fn qualified(&self, module_path: &str) -> String {
        match self {
            TypeRef::Named(name) => format!("{module_path}::{name}"),
            TypeRef::List(inner) => format!("::std::vec::Vec<{}>", inner.qualified(module_path)),
            TypeRef::Primitive(primitive) => primitive.qualified_name().to_string(),
            TypeRef::Object => "::serde_json::Value".to_string(),
            TypeRef::Unit => "()".to_string(),
        }
    }

    /// Identifier-safe stem used to name the `Ok*`/`Error*` aliases
    pub fn alias_stem(&self) -> String {
        match self {
            TypeRef::Named(name) => name.clone(),
            TypeRef::List(inner) => format!("{}List", inner.alias_stem()),
            TypeRef::Primitive(primitive) => primitive.stem().to_string(),
            TypeRef::Object => "Object".to_string(),
            TypeRef::Unit => "Unit".to_string(),
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rust_type())
    }
}

/// Extracts the type name from a `$ref` such as `#/components/schemas/Pet`.
pub fn reference_name(reference: &str) -> String {
    let last = reference.rsplit('/').next().unwrap_or(reference);
    to_type_name(&last.replace("~1", "/").replace("~0", "~"))
}

/// Maps a schema or schema reference to its target type.
///
/// Works for both `ReferenceOr<Schema>` (parameters, media types, component
/// schemas) and `ReferenceOr<Box<Schema>>` (properties, array items).
pub fn map_type<S: Borrow<Schema>>(schema: &ReferenceOr<S>) -> TypeRef {
    match schema {
        ReferenceOr::Reference { reference } => TypeRef::Named(reference_name(reference)),
        ReferenceOr::Item(item) => map_schema(<S as Borrow<Schema>>::borrow(item)),
    }
}

/// Maps an inline schema.
pub fn map_schema(schema: &Schema) -> TypeRef {
    match &schema.schema_kind {
        SchemaKind::Type(Type::String(_)) => TypeRef::string(),
        SchemaKind::Type(Type::Integer(integer)) => match &integer.format {
            VariantOrUnknownOrEmpty::Item(IntegerFormat::Int64) => {
                TypeRef::Primitive(Primitive::I64)
            }
            _ => TypeRef::Primitive(Primitive::I32),
        },
        SchemaKind::Type(Type::Number(number)) => match &number.format {
            VariantOrUnknownOrEmpty::Item(NumberFormat::Double) => {
                TypeRef::Primitive(Primitive::F64)
            }
            _ => TypeRef::Primitive(Primitive::F32),
        },
        SchemaKind::Type(Type::Boolean { .. }) => TypeRef::Primitive(Primitive::Bool),
        SchemaKind::Type(Type::Array(array)) => TypeRef::list(
            array
                .items
                .as_ref()
                .map_or(TypeRef::Object, |items| map_type(items)),
        ),
        SchemaKind::Any(any) => map_any_schema(any),
        // Objects and composition (allOf/oneOf/anyOf/not) are not resolved
        _ => TypeRef::Object,
    }
}

/// Schemas that mix keywords deserialize as `Any`; fall back on their `type`.
fn map_any_schema(any: &AnySchema) -> TypeRef {
    match any.typ.as_deref() {
        Some("string") => TypeRef::string(),
        Some("integer") if any.format.as_deref() == Some("int64") => {
            TypeRef::Primitive(Primitive::I64)
        }
        Some("integer") => TypeRef::Primitive(Primitive::I32),
        Some("number") if any.format.as_deref() == Some("double") => {
            TypeRef::Primitive(Primitive::F64)
        }
        Some("number") => TypeRef::Primitive(Primitive::F32),
        Some("boolean") => TypeRef::Primitive(Primitive::Bool),
        Some("array") => TypeRef::list(
            any.items
                .as_ref()
                .map_or(TypeRef::Object, |items| map_type(items)),
        ),
        _ => TypeRef::Object,
    }
}
