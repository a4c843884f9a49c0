//! Font rules keyed by style selector.
//!
//! A `FontSettings` value is always handled as one snapshot: the settings form
//! replaces it wholesale and the stylesheet engine only ever reads it.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Font assignment for one UI region.
///
/// Missing or `null` fields deserialize as "disabled, no font, default
/// fallback" so a partially written settings file never fails to load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontRule {
    /// Whether this rule contributes to the applied stylesheet.
    #[serde(default = "crate::defaults::bool_false", deserialize_with = "null_as_default")]
    pub enabled: bool,

    /// Human-readable family name, e.g. "Roboto Slab". Empty means unset.
    #[serde(default, deserialize_with = "null_as_default")]
    pub font: String,

    /// Generic family listed after the chosen font.
    #[serde(default = "crate::defaults::fallback", deserialize_with = "fallback_or_default")]
    pub fallback: String,
}

impl Default for FontRule {
    fn default() -> Self {
        Self {
            enabled: false,
            font: String::new(),
            fallback: crate::defaults::fallback(),
        }
    }
}

impl FontRule {
    /// An enabled rule for `font` with the default fallback.
    pub fn enabled(font: impl Into<String>) -> Self {
        Self {
            enabled: true,
            font: font.into(),
            ..Self::default()
        }
    }

    /// Builder-style fallback override; blank input keeps the default.
    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        let fallback = fallback.into();
        self.fallback = if fallback.trim().is_empty() {
            crate::defaults::fallback()
        } else {
            fallback
        };
        self
    }

    /// The sole contribution predicate: enabled and naming a font.
    pub fn contributes(&self) -> bool {
        self.enabled && !self.font.is_empty()
    }

    /// Fallback family, substituting the default when the field was blanked
    /// after construction.
    pub fn effective_fallback(&self) -> &str {
        if self.fallback.trim().is_empty() {
            crate::defaults::FALLBACK_FAMILY
        } else {
            &self.fallback
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn fallback_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?
        .filter(|f| !f.trim().is_empty())
        .unwrap_or_else(crate::defaults::fallback))
}

/// Mapping from selector to its rule.
///
/// Backed by a `BTreeMap` so every traversal, and therefore every generated
/// stylesheet, is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FontSettings {
    rules: BTreeMap<String, FontRule>,
}

impl FontSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn get(&self, selector: &str) -> Option<&FontRule> {
        self.rules.get(selector)
    }

    /// Insert or replace the whole rule for `selector`.
    pub fn insert(&mut self, selector: impl Into<String>, rule: FontRule) -> Option<FontRule> {
        self.rules.insert(selector.into(), rule)
    }

    /// Builder-style `insert`.
    pub fn with_rule(mut self, selector: impl Into<String>, rule: FontRule) -> Self {
        self.insert(selector, rule);
        self
    }

    /// All `(selector, rule)` pairs in selector order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FontRule)> {
        self.rules.iter().map(|(s, r)| (s.as_str(), r))
    }

    /// Only the rules that currently contribute to the stylesheet.
    pub fn contributing(&self) -> impl Iterator<Item = (&str, &FontRule)> {
        self.iter().filter(|(_, rule)| rule.contributes())
    }
}

impl<S: Into<String>> FromIterator<(S, FontRule)> for FontSettings {
    fn from_iter<I: IntoIterator<Item = (S, FontRule)>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().map(|(s, r)| (s.into(), r)).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a FontSettings {
    type Item = (&'a String, &'a FontRule);
    type IntoIter = std::collections::btree_map::Iter<'a, String, FontRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
