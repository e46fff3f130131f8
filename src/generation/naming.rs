//! Method naming for generated bindings
//!
//! Names come from the `operationId` when there is one, otherwise from the
//! verb and the last literal path segment. The [`MethodNameRegistry`] hands
//! out unique names for one generation run.

use std::collections::HashSet;

use tracing::debug;

use crate::generation::HttpVerb;
use crate::generation::utils::{
    sanitize_identifier, split_words, to_proper_case, to_screaming_snake_case, to_snake_case,
    words_to_proper_case,
};

/// Names derived for one operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodNames {
    /// PascalCase name, e.g. `ListPets`
    pub name: String,
    /// Public `async fn` name, e.g. `list_pets`
    pub fn_name: String,
    /// Private caller static, e.g. `LIST_PETS_CALLER`
    pub caller_name: String,
}

impl MethodNames {
    fn from_name(name: String) -> Self {
        Self {
            fn_name: sanitize_identifier(&name),
            caller_name: format!("{}_CALLER", to_screaming_snake_case(&name)),
            name,
        }
    }
}

/// Tracks names already handed out during one generation run
#[derive(Debug, Default)]
pub struct MethodNameRegistry {
    used: HashSet<String>,
}

impl MethodNameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserves `base`, or `base2`, `base3`, … when it is taken.
    ///
    /// Uniqueness is checked on the snake_case form so that the emitted fn
    /// names and caller statics never clash either.
    pub fn register(&mut self, base: &str) -> MethodNames {
        if self.used.insert(to_snake_case(base)) {
            return MethodNames::from_name(base.to_string());
        }

        let mut suffix = 2;
        loop {
            let candidate = format!("{base}{suffix}");
            if self.used.insert(to_snake_case(&candidate)) {
                debug!("Method name {base} already taken, using {candidate}");
                return MethodNames::from_name(candidate);
            }
            suffix += 1;
        }
    }

    pub fn len(&self) -> usize {
        self.used.len()
    }

    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }
}

/// PascalCase base name of an operation, before collision handling.
///
/// # Examples
/// ```
/// use openapi_bindgen::generation::HttpVerb;
/// use openapi_bindgen::generation::naming::base_method_name;
///
/// assert_eq!(base_method_name("/pets", HttpVerb::Get, Some("listPets")), "ListPets");
/// assert_eq!(base_method_name("/pets", HttpVerb::Get, Some("GET_pets")), "Pets");
/// assert_eq!(base_method_name("/pets/{petId}", HttpVerb::Put, None), "UpdatePets");
/// ```
pub fn base_method_name(path: &str, verb: HttpVerb, operation_id: Option<&str>) -> String {
    operation_id
        .and_then(|id| name_from_operation_id(id, verb))
        .unwrap_or_else(|| name_from_path(path, verb))
}

fn name_from_operation_id(operation_id: &str, verb: HttpVerb) -> Option<String> {
    let mut words = split_words(operation_id);

    if words
        .last()
        .is_some_and(|last| last.eq_ignore_ascii_case(verb.as_str()))
    {
        words.pop();
    }
    if words
        .first()
        .is_some_and(|first| is_leading_verb(operation_id, first, verb))
    {
        words.remove(0);
    }

    if words.is_empty() {
        return None;
    }
    let name = words_to_proper_case(&words);
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        return Some(format!("{}{name}", verb.verb_word()));
    }
    Some(name)
}

/// A leading verb is noise when written as a separate word (`get_pets`,
/// `Get-Pets`) or in upper case (`GETPets`). camelCase `getPets` keeps it.
fn is_leading_verb(operation_id: &str, first_word: &str, verb: HttpVerb) -> bool {
    let verb = verb.as_str();
    if !first_word.eq_ignore_ascii_case(verb) {
        return false;
    }
    first_word == verb
        || operation_id
            .get(verb.len()..)
            .and_then(|rest| rest.chars().next())
            .is_some_and(|next| !next.is_ascii_alphanumeric())
}

fn name_from_path(path: &str, verb: HttpVerb) -> String {
    let segment = path
        .split('/')
        .rev()
        .find(|segment| !segment.is_empty() && !segment.starts_with('{'))
        .map(to_proper_case)
        .filter(|segment| !segment.is_empty())
        .unwrap_or_else(|| "Root".to_string());
    format!("{}{segment}", verb.verb_word())
}
