//! Settings form glue.
//!
//! The form posts flat `"<selector>.<property>"` fields. This module turns
//! them into a `FontSettings` snapshot and builds the rows the form renders.

use regionfonts_config::{DEFAULT_REGIONS, FontRule, FontSettings};

/// A submitted form value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormValue {
    Bool(bool),
    Text(String),
}

impl FormValue {
    /// Checkbox semantics: text values "true", "on", "1" and "yes" count as set.
    pub fn as_bool(&self) -> bool {
        match self {
            FormValue::Bool(b) => *b,
            FormValue::Text(s) => matches!(
                s.trim().to_ascii_lowercase().as_str(),
                "true" | "on" | "1" | "yes"
            ),
        }
    }

    pub fn as_text(&self) -> String {
        match self {
            FormValue::Bool(b) => b.to_string(),
            FormValue::Text(s) => s.clone(),
        }
    }
}

impl From<bool> for FormValue {
    fn from(value: bool) -> Self {
        FormValue::Bool(value)
    }
}

impl From<&str> for FormValue {
    fn from(value: &str) -> Self {
        FormValue::Text(value.to_string())
    }
}

impl From<String> for FormValue {
    fn from(value: String) -> Self {
        FormValue::Text(value)
    }
}

/// Build a full settings snapshot from submitted fields.
///
/// Keys split at the last `.` because selectors themselves contain dots.
/// Every selector seen starts from the default rule, so the result replaces
/// the stored mapping wholesale.
pub fn settings_from_form<K, I>(fields: I) -> FontSettings
where
    K: AsRef<str>,
    I: IntoIterator<Item = (K, FormValue)>,
{
    let mut settings = FontSettings::new();
    for (key, value) in fields {
        let key = key.as_ref();
        let Some((selector, property)) = key.rsplit_once('.') else {
            log::debug!("Ignoring form field without property: {:?}", key);
            continue;
        };
        let selector = selector.trim();
        if selector.is_empty() {
            log::debug!("Ignoring form field without selector: {:?}", key);
            continue;
        }

        let mut rule = settings.get(selector).cloned().unwrap_or_default();
        match property {
            "enabled" => rule.enabled = value.as_bool(),
            "font" => rule.font = value.as_text().trim().to_string(),
            "fallback" => rule = rule.with_fallback(value.as_text().trim()),
            other => {
                log::debug!("Ignoring unknown form property {:?} for {}", other, selector);
                continue;
            }
        }
        settings.insert(selector, rule);
    }
    settings
}

/// One row of the settings form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormEntry {
    pub selector: String,
    pub label: String,
    pub rule: FontRule,
}

/// Rows for every default region, each with its stored or default rule.
pub fn form_entries(settings: &FontSettings) -> Vec<FormEntry> {
    DEFAULT_REGIONS
        .iter()
        .map(|region| FormEntry {
            selector: region.selector.to_string(),
            label: region.label.to_string(),
            rule: region.rule_in(settings),
        })
        .collect()
}
