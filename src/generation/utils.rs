//! String transformation utilities for code generation
//!
//! These utilities turn OpenAPI names (operation ids, schema names, parameter
//! names, path segments) into identifiers that are valid in the emitted Rust.

/// Splits a name into words.
///
/// Any run of non-alphanumeric characters is a single separator, and case
/// changes start a new word (`findPetsByStatus`, `HTTPResponse`). The words
/// keep their original casing.
///
/// # Examples
/// ```
/// use openapi_bindgen::generation::utils::split_words;
///
/// assert_eq!(split_words("findPetsByStatus"), vec!["find", "Pets", "By", "Status"]);
/// assert_eq!(split_words("read_item__item_id__get"), vec!["read", "item", "item", "id", "get"]);
/// assert_eq!(split_words("getHTTPResponse"), vec!["get", "HTTP", "Response"]);
/// ```
pub fn split_words(s: &str) -> Vec<String> {
    let chars: Vec<char> = s.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &ch) in chars.iter().enumerate() {
        if !ch.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if ch.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lowercase = chars.get(i + 1).is_some_and(|c| c.is_lowercase());
            // Split on "aB", "1B" and at the end of an acronym ("HTTPResponse")
            if prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_is_lowercase)
            {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(ch);
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Capitalizes the first character of a word and lowercases the rest.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
    }
}

/// Converts a string to snake_case format for Rust identifiers.
///
/// # Examples
/// ```
/// use openapi_bindgen::generation::utils::to_snake_case;
///
/// assert_eq!(to_snake_case("findPetsByStatus"), "find_pets_by_status");
/// assert_eq!(to_snake_case("FindPetsByStatus"), "find_pets_by_status");
/// assert_eq!(to_snake_case("find-pets-by-status"), "find_pets_by_status");
/// assert_eq!(to_snake_case("get HTTP Response"), "get_http_response");
/// ```
pub fn to_snake_case(s: &str) -> String {
    split_words(s)
        .iter()
        .map(|word| word.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// Converts a string to SCREAMING_SNAKE_CASE, used for emitted statics and consts.
pub fn to_screaming_snake_case(s: &str) -> String {
    to_snake_case(s).to_uppercase()
}

/// Converts a string to UpperCamelCase (PascalCase).
///
/// # Examples
/// ```
/// use openapi_bindgen::generation::utils::to_proper_case;
///
/// assert_eq!(to_proper_case("find_pets_by_status"), "FindPetsByStatus");
/// assert_eq!(to_proper_case("http_response"), "HttpResponse");
/// assert_eq!(to_proper_case("find-pets-by-status"), "FindPetsByStatus");
/// ```
pub fn to_proper_case(s: &str) -> String {
    split_words(s).iter().map(|word| capitalize(word)).collect()
}

/// Joins already-split words into PascalCase.
pub fn words_to_proper_case<S: AsRef<str>>(words: &[S]) -> String {
    words.iter().map(|word| capitalize(word.as_ref())).collect()
}

fn is_rust_keyword(s: &str) -> bool {
    matches!(
        s,
        "as" | "break"
            | "const"
            | "continue"
            | "crate"
            | "else"
            | "enum"
            | "extern"
            | "false"
            | "fn"
            | "for"
            | "if"
            | "impl"
            | "in"
            | "let"
            | "loop"
            | "match"
            | "mod"
            | "move"
            | "mut"
            | "pub"
            | "ref"
            | "return"
            | "self"
            | "Self"
            | "static"
            | "struct"
            | "super"
            | "trait"
            | "true"
            | "type"
            | "unsafe"
            | "use"
            | "where"
            | "while"
            | "async"
            | "await"
            | "dyn"
            | "abstract"
            | "become"
            | "box"
            | "do"
            | "final"
            | "macro"
            | "override"
            | "priv"
            | "typeof"
            | "unsized"
            | "virtual"
            | "yield"
            | "try"
            | "gen"
    )
}

/// Sanitizes a string to be a valid Rust field, parameter or function name.
///
/// The name is converted to snake_case, reserved keywords get a trailing
/// underscore and names that would start with a digit get a leading one.
///
/// # Examples
/// ```
/// use openapi_bindgen::generation::utils::sanitize_identifier;
///
/// assert_eq!(sanitize_identifier("type"), "type_");
/// assert_eq!(sanitize_identifier("firstName"), "first_name");
/// assert_eq!(sanitize_identifier("2fa"), "_2fa");
/// ```
pub fn sanitize_identifier(s: &str) -> String {
    let snake_case = to_snake_case(s);
    if snake_case.is_empty() {
        return "value".to_string();
    }
    if snake_case.starts_with(|c: char| c.is_ascii_digit()) {
        return format!("_{snake_case}");
    }
    if is_rust_keyword(&snake_case) {
        return format!("{snake_case}_");
    }
    snake_case
}

/// Turns a schema name into a Rust type name.
///
/// Names that already are PascalCase identifiers are kept verbatim so that
/// `Pet` or `PetDTO` survive unchanged; anything else is PascalCased.
///
/// # Examples
/// ```
/// use openapi_bindgen::generation::utils::to_type_name;
///
/// assert_eq!(to_type_name("Pet"), "Pet");
/// assert_eq!(to_type_name("pet-status"), "PetStatus");
/// assert_eq!(to_type_name("3dModel"), "Model3dModel");
/// ```
pub fn to_type_name(s: &str) -> String {
    let already_valid = s.starts_with(|c: char| c.is_ascii_uppercase())
        && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    let name = if already_valid {
        s.to_string()
    } else {
        to_proper_case(s)
    };

    if name.is_empty() {
        "Model".to_string()
    } else if name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("Model{name}")
    } else if name == "Self" {
        "SelfModel".to_string()
    } else {
        name
    }
}
