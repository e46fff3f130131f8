//! # openapi-bindgen
//!
//! Generates strongly-typed Rust client bindings from OpenAPI 3.x documents.
//!
//! For every operation the generator emits a private `static` request
//! caller and a public `async fn` on an extension trait implemented for the
//! runtime's HTTP client, plus serde models for `components.schemas` and a
//! file of `Ok*`/`Error*` result aliases.
//!
//! ```no_run
//! use openapi_bindgen::{GeneratorOptions, OpenApiCodeGenerator};
//!
//! let raw = std::fs::read_to_string("petstore.yaml")?;
//! let options = GeneratorOptions::new()
//!     .with_namespace("Petstore")
//!     .with_output_path("src/petstore");
//! let result = OpenApiCodeGenerator::new(options).generate(&raw)?;
//! println!("{} bindings", result.methods.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(unsafe_code)]

pub mod generation;
pub mod infrastructure;

pub use generation::{
    GenerationError, GeneratorOptions, GeneratorResult, OpenApiCodeGenerator, parse_document,
};
