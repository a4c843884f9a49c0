//! Enabled-font resolution.

use regionfonts_config::FontSettings;

/// Ordered set of distinct font family names.
///
/// Order is first appearance during insertion; membership is exact string
/// equality (case and whitespace sensitive).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontFamilies {
    names: Vec<String>,
}

impl FontFamilies {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `name` unless already present. Returns whether it was added.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.contains(&name) {
            return false;
        }
        self.names.push(name);
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.names
    }
}

impl<S: Into<String>> FromIterator<S> for FontFamilies {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut families = Self::new();
        for name in iter {
            families.insert(name);
        }
        families
    }
}

/// Distinct fonts named by enabled rules.
///
/// A rule contributes only when it is enabled and names a font. Iteration
/// follows selector order, so the result is stable for a given snapshot.
pub fn resolve(settings: &FontSettings) -> FontFamilies {
    settings
        .contributing()
        .map(|(_, rule)| rule.font.as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use regionfonts_config::FontRule;

    #[test]
    fn test_resolve_empty() {
        assert!(resolve(&FontSettings::new()).is_empty());
    }

    #[test]
    fn test_resolve_dedupes_shared_font() {
        let settings = FontSettings::new()
            .with_rule("a", FontRule::enabled("Roboto").with_fallback(""))
            .with_rule("b", FontRule::enabled("Roboto").with_fallback(""));
        let families = resolve(&settings);
        assert_eq!(families.as_slice(), &["Roboto".to_string()]);
    }

    #[test]
    fn test_resolve_skips_disabled_and_empty() {
        let settings = FontSettings::new()
            .with_rule(".a", FontRule::enabled("Lato"))
            .with_rule(
                ".b",
                FontRule {
                    enabled: false,
                    font: "Inter".to_string(),
                    ..FontRule::default()
                },
            )
            .with_rule(".c", FontRule::enabled(""));
        let families = resolve(&settings);
        assert_eq!(families.len(), 1);
        assert!(families.contains("Lato"));
        assert!(!families.contains("Inter"));
        assert!(!families.contains(""));
    }

    #[test]
    fn test_resolve_is_case_and_whitespace_sensitive() {
        let settings = FontSettings::new()
            .with_rule(".a", FontRule::enabled("Open Sans"))
            .with_rule(".b", FontRule::enabled("open sans"))
            .with_rule(".c", FontRule::enabled("Open  Sans"));
        assert_eq!(resolve(&settings).len(), 3);
    }

    #[test]
    fn test_resolve_is_stable() {
        let settings = FontSettings::new()
            .with_rule(".z", FontRule::enabled("Lato"))
            .with_rule(".a", FontRule::enabled("Inter"))
            .with_rule(".m", FontRule::enabled("Lato"));
        assert_eq!(resolve(&settings), resolve(&settings.clone()));
    }

    #[test]
    fn test_families_insert_reports_duplicates() {
        let mut families = FontFamilies::new();
        assert!(families.insert("Lato"));
        assert!(!families.insert("Lato"));
        assert_eq!(families.iter().collect::<Vec<_>>(), vec!["Lato"]);
    }
}
