//! Generation domain module - turns OpenAPI documents into typed bindings
//!
//! The pipeline resolves the base URL of the document ([`UrlParser`]), emits
//! one binding per operation together with the `Ok*`/`Error*` aliases
//! ([`ExtensionMethodGenerator`]), emits the models of `components.schemas`
//! ([`ModelGenerator`]) and assembles the artifacts
//! ([`OpenApiCodeGenerator`]).

pub mod errors;
pub mod extension_methods;
pub mod models;
pub mod naming;
pub mod orchestrator;
pub mod sanitizers;
pub mod session;
pub mod shape;
pub mod traits;
pub mod type_aliases;
pub mod type_mapping;
pub mod types;
pub mod url_parser;
pub mod utils;

pub use errors::*;
pub use extension_methods::{ExtensionContext, ExtensionMethodGenerator, ExtensionOutput};
pub use models::{FieldDefinition, ModelDefinition, ModelGenerator};
pub use naming::{MethodNameRegistry, MethodNames};
pub use orchestrator::*;
pub use session::GenerationSession;
pub use shape::CallShape;
pub use traits::*;
pub use type_aliases::TypeAliasRegistry;
pub use type_mapping::{Primitive, TypeRef, map_type};
pub use types::*;
pub use url_parser::{ResolvedBase, UrlParser};
