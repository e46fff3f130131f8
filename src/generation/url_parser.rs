//! Base URL and base path resolution
//!
//! Every emitted binding is bound to one absolute base URL (scheme and
//! authority) and prefixes its path template with one base path. Both come
//! from the document's first server entry, optionally replaced by a
//! caller-supplied override.

use once_cell::sync::Lazy;
use openapiv3::OpenAPI;
use regex::Regex;
use tracing::{debug, warn};
use url::Url;

use crate::generation::{GenerationError, Result};

/// Stand-in for `{variable}` segments while a templated server URL is parsed
const PLACEHOLDER: &str = "placeholder";

static TEMPLATE_VAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{[^{}]*\}").expect("valid regex"));

/// Absolute base URL and the path prefix of every operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedBase {
    /// `scheme://authority`, without a path
    pub base_url: String,
    /// Path prefix without a trailing slash, possibly empty
    pub base_path: String,
}

impl ResolvedBase {
    pub fn new<U: Into<String>, P: Into<String>>(base_url: U, base_path: P) -> Self {
        Self {
            base_url: base_url.into(),
            base_path: base_path.into(),
        }
    }
}

/// Resolves the base URL used by generated bindings
pub struct UrlParser;

impl UrlParser {
    /// Resolve `(base_url, base_path)` from the document's first server.
    ///
    /// # Errors
    /// - [`GenerationError::MissingServer`] when no server URL is declared
    /// - [`GenerationError::RelativeServerUrl`] for a relative URL without override
    /// - [`GenerationError::InvalidServerUrl`] when the URL cannot be parsed
    /// - [`GenerationError::UnsupportedScheme`] for anything but http/https
    pub fn resolve_base(
        document: &OpenAPI,
        base_url_override: Option<&str>,
    ) -> Result<ResolvedBase> {
        let server_url = document
            .servers
            .first()
            .map(|server| server.url.as_str())
            .unwrap_or_default();
        Self::resolve_server_url(server_url, base_url_override)
    }

    /// Resolve a single server URL; see [`UrlParser::resolve_base`].
    pub fn resolve_server_url(
        server_url: &str,
        base_url_override: Option<&str>,
    ) -> Result<ResolvedBase> {
        let server_url = server_url.trim();
        if server_url.is_empty() {
            return Err(GenerationError::MissingServer);
        }

        let override_url = base_url_override
            .map(|url| url.trim().trim_end_matches('/'))
            .filter(|url| !url.is_empty());

        // 1. Relative servers only make sense against an override
        if server_url.starts_with('/') {
            let Some(base_url) = override_url else {
                return Err(GenerationError::RelativeServerUrl {
                    url: server_url.to_string(),
                });
            };
            debug!("Relative server URL {server_url} resolved against {base_url}");
            return Ok(ResolvedBase::new(
                base_url,
                server_url.trim_end_matches('/'),
            ));
        }

        // 2. Parse, substituting template variables for the parse only
        let templated = TEMPLATE_VAR_RE.is_match(server_url);
        let parse_target = if templated {
            TEMPLATE_VAR_RE
                .replace_all(server_url, PLACEHOLDER)
                .into_owned()
        } else {
            server_url.to_string()
        };

        let parsed = match Url::parse(&parse_target) {
            Ok(url) => url,
            Err(err) => {
                if let Some(base_url) = override_url {
                    warn!("Server URL '{server_url}' is not parseable ({err}); using {base_url}");
                    return Ok(ResolvedBase::new(base_url, ""));
                }
                return Err(GenerationError::InvalidServerUrl {
                    url: server_url.to_string(),
                    reason: err.to_string(),
                });
            }
        };

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(GenerationError::UnsupportedScheme {
                url: server_url.to_string(),
                scheme: parsed.scheme().to_string(),
            });
        }

        // 3. A valid absolute override replaces scheme, authority and path
        if let Some(base_url) = override_url {
            match parse_absolute(base_url) {
                Some(url) => return Ok(ResolvedBase::new(authority(&url), trimmed_path(&url))),
                None => warn!(
                    "Ignoring baseUrlOverride '{base_url}': not an absolute http(s) URL"
                ),
            }
        }

        let base_path = trimmed_path(&parsed);
        if templated {
            return Ok(ResolvedBase::new(
                original_authority(server_url),
                base_path,
            ));
        }
        Ok(ResolvedBase::new(authority(&parsed), base_path))
    }
}

fn parse_absolute(url: &str) -> Option<Url> {
    Url::parse(url)
        .ok()
        .filter(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
}

fn authority(url: &Url) -> String {
    let mut base = format!("{}://{}", url.scheme(), url.host_str().unwrap_or_default());
    if let Some(port) = url.port() {
        base.push_str(&format!(":{port}"));
    }
    base
}

fn trimmed_path(url: &Url) -> String {
    url.path().trim_end_matches('/').to_string()
}

/// Scheme and authority of the unparsed URL, template variables intact
fn original_authority(server_url: &str) -> String {
    let authority_start = server_url.find("://").map_or(0, |idx| idx + 3);
    match server_url[authority_start..].find('/') {
        Some(idx) => server_url[..authority_start + idx].to_string(),
        None => server_url.trim_end_matches('/').to_string(),
    }
}
