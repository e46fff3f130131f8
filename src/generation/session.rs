//! Per-call generation state

use crate::generation::naming::MethodNameRegistry;
use crate::generation::type_aliases::TypeAliasRegistry;

/// Registries shared by the generators of a single `generate` call.
///
/// A fresh session is created for every call, so concurrent generations
/// never observe each other's names or aliases.
#[derive(Debug, Default)]
pub struct GenerationSession {
    pub method_names: MethodNameRegistry,
    pub type_aliases: TypeAliasRegistry,
}

impl GenerationSession {
    pub fn new() -> Self {
        Self::default()
    }
}
