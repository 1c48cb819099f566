//! Path parameter validation.
//!
//! Captured values are always forwarded as strings. A rule only decides
//! whether a value is well-formed enough to be forwarded at all.

use std::collections::BTreeMap;
use std::fmt;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Shape a captured parameter value must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamRule {
    /// Any non-empty segment.
    #[default]
    Segment,
    /// ASCII digits only.
    Numeric,
    /// A hyphenated or simple-form UUID.
    Uuid,
}

impl ParamRule {
    pub fn check(&self, value: &str) -> bool {
        match self {
            ParamRule::Segment => !value.is_empty(),
            ParamRule::Numeric => !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()),
            ParamRule::Uuid => Uuid::parse_str(value).is_ok(),
        }
    }
}

impl fmt::Display for ParamRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamRule::Segment => f.write_str("segment"),
            ParamRule::Numeric => f.write_str("numeric"),
            ParamRule::Uuid => f.write_str("uuid"),
        }
    }
}

/// Rules keyed by parameter name. Names without an entry use
/// [`ParamRule::Segment`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParamRules(BTreeMap<String, ParamRule>);

impl ParamRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, rule: ParamRule) -> Self {
        self.0.insert(name.into(), rule);
        self
    }

    pub fn rule_for(&self, name: &str) -> ParamRule {
        self.0.get(name).copied().unwrap_or_default()
    }

    /// Returns the first parameter that violates its rule.
    pub fn first_violation<'a>(
        &self,
        params: &'a BTreeMap<String, String>,
    ) -> Option<(&'a str, &'a str, ParamRule)> {
        params.iter().find_map(|(name, value)| {
            let rule = self.rule_for(name);
            (!rule.check(value)).then_some((name.as_str(), value.as_str(), rule))
        })
    }
}
