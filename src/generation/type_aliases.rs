//! `Ok*`/`Error*` alias registry
//!
//! Every distinct success type gets one pair of aliases. The error half
//! comes from the first operation that produced the success type. Two types
//! with the same stem (a `PetList` model and `Vec<Pet>`) are told apart by a
//! numeric suffix on the later one.

use std::collections::{BTreeMap, HashSet};

use serde_json::json;
use tracing::debug;

use crate::generation::{CodeRenderer, CodeTemplate, Result, TypeAliasEntry, TypeRef};

/// Collects alias pairs during one generation run
#[derive(Debug, Default)]
pub struct TypeAliasRegistry {
    /// Keyed by the qualified success type
    entries: BTreeMap<String, TypeAliasEntry>,
    stems: HashSet<String>,
}

impl TypeAliasRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the success/error pair of an operation.
    ///
    /// Returns false when the success type already has an alias pair.
    pub fn register(
        &mut self,
        success: &TypeRef,
        error: &TypeRef,
        module_path: &str,
        runtime_path: &str,
    ) -> bool {
        let success_type = success.qualified(module_path);
        if self.entries.contains_key(&success_type) {
            return false;
        }

        let stem = self.unique_stem(success.alias_stem());
        debug!("Alias pair Ok{stem}/Error{stem} for {success_type}");
        self.entries.insert(
            success_type.clone(),
            TypeAliasEntry {
                ok_alias: format!("Ok{stem}"),
                error_alias: format!("Error{stem}"),
                success_type,
                error_type: format!("{runtime_path}::HttpError<{}>", error.qualified(module_path)),
                stem,
            },
        );
        true
    }

    fn unique_stem(&mut self, base: String) -> String {
        let mut stem = base.clone();
        let mut suffix = 2;
        while self.stems.contains(&stem) {
            stem = format!("{base}{suffix}");
            suffix += 1;
        }
        self.stems.insert(stem.clone());
        stem
    }

    /// Entries sorted by stem
    pub fn entries(&self) -> Vec<TypeAliasEntry> {
        let mut entries: Vec<TypeAliasEntry> = self.entries.values().cloned().collect();
        entries.sort_by(|a, b| a.stem.cmp(&b.stem));
        entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render `TypeAliases.g.rs`
    pub fn render(&self, renderer: &dyn CodeRenderer) -> Result<String> {
        renderer.render(
            CodeTemplate::TypeAliasesFile,
            &json!({ "aliases": self.entries() }),
        )
    }
}
