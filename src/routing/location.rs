//! Navigation targets.
//!
//! A location is whatever the browser (or a caller) hands the router:
//! a path-form string such as `/edit-request/7?tab=2#notes`, or an absolute
//! `http(s)` URL.

use std::collections::BTreeMap;
use serde::Serialize;
use url::{form_urlencoded, Url};

/// A location split into its routing-relevant parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    /// Raw (still percent-encoded) path, always starting with `/`.
    pub path: String,
    /// Decoded query pairs. Later duplicates win.
    pub query: BTreeMap<String, String>,
    /// Fragment without the leading `#`.
    pub hash: Option<String>,
}

impl Location {
    pub fn parse(input: &str) -> Self {
        // `//x` is a path here, never a scheme-relative URL.
        if !input.starts_with('/') {
            if let Ok(url) = Url::parse(input) {
                if matches!(url.scheme(), "http" | "https") {
                    return Self::from_parts(url.path(), url.query(), url.fragment());
                }
            }
        }

        let (rest, hash) = match input.split_once('#') {
            Some((rest, hash)) => (rest, Some(hash)),
            None => (input, None),
        };
        let (path, query) = match rest.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (rest, None),
        };
        Self::from_parts(path, query, hash)
    }

    fn from_parts(path: &str, query: Option<&str>, hash: Option<&str>) -> Self {
        let path = if path.is_empty() {
            "/".to_string()
        } else if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };

        let query = query
            .map(|q| {
                form_urlencoded::parse(q.as_bytes())
                    .map(|(k, v)| (k.into_owned(), v.into_owned()))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            path,
            query,
            hash: hash.filter(|h| !h.is_empty()).map(str::to_string),
        }
    }

    /// Remove the history base from the path.
    ///
    /// Returns `None` when the path lies outside the base. A base of `/`
    /// (or empty) leaves every path untouched.
    pub fn strip_base(&self, base: &str) -> Option<String> {
        let base = base.trim_end_matches('/');
        if base.is_empty() {
            return Some(self.path.clone());
        }
        let rest = self.path.strip_prefix(base)?;
        if rest.is_empty() {
            Some("/".to_string())
        } else if rest.starts_with('/') {
            Some(rest.to_string())
        } else {
            None
        }
    }
}

/// Prefix a table path with the history base.
pub fn with_base(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    format!("{base}{path}")
}
