//! Path pattern matching.
//!
//! # Responsibilities
//! - Compile `/a/:b` style patterns into segments
//! - Match decoded request segments against a pattern
//! - Render a concrete path back from a pattern and params
//!
//! # Design Decisions
//! - Segment-wise comparison, no regex
//! - Empty segments are significant (`//x` is not `/x`)
//! - A parameter matches exactly one non-empty segment
//! - Static segments are case-insensitive unless `sensitive` is set

use std::collections::BTreeMap;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use serde::{Deserialize, Serialize};

use crate::routing::error::PatternError;

/// Characters escaped when a parameter value is written into a path.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Matching switches shared by every route in a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchOptions {
    /// Reject a trailing slash that the pattern does not declare.
    pub strict: bool,
    /// Compare static segments case-sensitively.
    pub sensitive: bool,
}

/// A single compiled pattern segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    Static(String),
    Param(String),
}

/// A compiled path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    source: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    /// Compile a pattern. It must start with `/`.
    pub fn parse(pattern: &str) -> Result<Self, PatternError> {
        let rest = pattern
            .strip_prefix('/')
            .ok_or_else(|| PatternError::MissingLeadingSlash {
                pattern: pattern.to_string(),
            })?;

        let mut segments = Vec::new();
        let mut seen: Vec<&str> = Vec::new();
        for raw in rest.split('/') {
            match raw.strip_prefix(':') {
                Some(name) => {
                    if !is_param_name(name) {
                        return Err(PatternError::InvalidParamName {
                            pattern: pattern.to_string(),
                            name: name.to_string(),
                        });
                    }
                    if seen.contains(&name) {
                        return Err(PatternError::DuplicateParam {
                            pattern: pattern.to_string(),
                            name: name.to_string(),
                        });
                    }
                    seen.push(name);
                    segments.push(Segment::Param(name.to_string()));
                }
                None => segments.push(Segment::Static(raw.to_string())),
            }
        }

        Ok(Self {
            source: pattern.to_string(),
            segments,
        })
    }

    /// The pattern text as declared.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Parameter names in declaration order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Static(_) => None,
        })
    }

    /// Pattern with parameter names erased. Two patterns with the same shape
    /// match exactly the same paths.
    pub fn shape(&self) -> Vec<Option<&str>> {
        self.segments
            .iter()
            .map(|s| match s {
                Segment::Static(text) => Some(text.as_str()),
                Segment::Param(_) => None,
            })
            .collect()
    }

    /// Match already-split, decoded request segments.
    pub fn matches(
        &self,
        segments: &[String],
        options: &MatchOptions,
    ) -> Option<BTreeMap<String, String>> {
        // A pattern that already ends in `/` does not absorb another one.
        let ends_in_slash =
            matches!(self.segments.last(), Some(Segment::Static(s)) if s.is_empty());
        let segments = match segments.split_last() {
            Some((last, init))
                if !options.strict
                    && !ends_in_slash
                    && last.is_empty()
                    && segments.len() == self.segments.len() + 1 =>
            {
                init
            }
            _ => segments,
        };

        if segments.len() != self.segments.len() {
            return None;
        }

        let mut params = BTreeMap::new();
        for (pattern, actual) in self.segments.iter().zip(segments) {
            match pattern {
                Segment::Static(text) => {
                    let equal = if options.sensitive {
                        text == actual
                    } else {
                        text.eq_ignore_ascii_case(actual)
                    };
                    if !equal {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    if actual.is_empty() {
                        return None;
                    }
                    params.insert(name.clone(), actual.clone());
                }
            }
        }
        Some(params)
    }

    /// Render a concrete path. Returns the name of the first missing
    /// parameter on failure.
    pub fn build<'a>(&'a self, params: &BTreeMap<String, String>) -> Result<String, &'a str> {
        let mut parts = Vec::with_capacity(self.segments.len());
        for segment in &self.segments {
            match segment {
                Segment::Static(text) => parts.push(text.clone()),
                Segment::Param(name) => match params.get(name) {
                    Some(value) if !value.is_empty() => {
                        parts.push(utf8_percent_encode(value, SEGMENT).to_string())
                    }
                    _ => return Err(name.as_str()),
                },
            }
        }
        Ok(format!("/{}", parts.join("/")))
    }
}

/// Split a request path into percent-decoded segments.
///
/// The leading slash is dropped; everything after it is split verbatim, so
/// `/` yields one empty segment and `//x` yields `["", "x"]`.
pub fn split_path(path: &str) -> Vec<String> {
    let rest = path.strip_prefix('/').unwrap_or(path);
    rest.split('/').map(decode_segment).collect()
}

fn decode_segment(raw: &str) -> String {
    percent_decode_str(raw)
        .decode_utf8()
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| raw.to_string())
}

fn is_param_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
