//! Stylesheet resource lifecycle.
//!
//! Each apply is a full replacement: both resource kinds go from whatever
//! state they were in, to absent, to installed. The manager keeps no state
//! between calls, so concurrent or repeated applies settle on whichever call
//! installed its rule resource last.

use crate::request::font_source_url;
use crate::resolver::{FontFamilies, resolve};
use crate::rules::rule_text;
use crate::sink::{ResourceHandle, ResourceKind, ResourceSink};
use regionfonts_config::{Config, FontDisplay, FontSettings};

/// What one apply left installed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedStylesheets {
    /// `None` when no font needed fetching.
    pub font_source: Option<ResourceHandle>,
    pub rules: ResourceHandle,
    /// Previously installed resources removed by this apply, both kinds.
    pub removed: usize,
}

#[derive(Debug, Clone)]
pub struct StylesheetManager {
    endpoint: String,
    display: FontDisplay,
}

impl Default for StylesheetManager {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl StylesheetManager {
    pub fn new(endpoint: impl Into<String>, display: FontDisplay) -> Self {
        Self {
            endpoint: endpoint.into(),
            display,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.font_endpoint.clone(), config.font_display)
    }

    /// Swap both resources in `sink` for ones built from `families` and
    /// `settings`.
    ///
    /// With no families the font-source slot is only cleared. The rule
    /// resource is always installed, even when empty, so the slot stays
    /// singular.
    pub fn apply<S: ResourceSink + ?Sized>(
        &self,
        sink: &mut S,
        families: &FontFamilies,
        settings: &FontSettings,
    ) -> AppliedStylesheets {
        let url = font_source_url(&self.endpoint, families, self.display);

        let mut removed = sink.remove_all_of_kind(ResourceKind::FontSource);
        let font_source = url.map(|url| {
            log::debug!("Requesting fonts: {}", url);
            sink.install(ResourceKind::FontSource, &url)
        });

        let css = rule_text(settings);
        removed += sink.remove_all_of_kind(ResourceKind::Rules);
        let rules = sink.install(ResourceKind::Rules, &css);

        log::info!(
            "Applied {} font famil{} to {} region(s)",
            families.len(),
            if families.len() == 1 { "y" } else { "ies" },
            settings.contributing().count()
        );
        AppliedStylesheets {
            font_source,
            rules,
            removed,
        }
    }

    /// `resolve` then `apply` for one snapshot.
    pub fn apply_settings<S: ResourceSink + ?Sized>(
        &self,
        sink: &mut S,
        settings: &FontSettings,
    ) -> AppliedStylesheets {
        let families = resolve(settings);
        self.apply(sink, &families, settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::StyleDocument;
    use regionfonts_config::FontRule;

    fn sample() -> FontSettings {
        FontSettings::new()
            .with_rule(".window-title", FontRule::enabled("Open Sans").with_fallback("serif"))
            .with_rule(".window-content", FontRule::enabled("Roboto Slab"))
    }

    #[test]
    fn test_apply_installs_both_resources() {
        let mut doc = StyleDocument::new();
        let applied = StylesheetManager::default().apply_settings(&mut doc, &sample());

        assert!(applied.font_source.is_some());
        assert_eq!(applied.removed, 0);
        assert_eq!(
            doc.font_source_links(),
            vec!["https://fonts.googleapis.com/css2?family=Roboto+Slab|Open+Sans&display=swap"]
        );
        let css = doc.rules_text().unwrap();
        assert!(css.contains(".window-title {\n    font-family: \"Open Sans\", serif !important;"));
    }

    #[test]
    fn test_apply_twice_is_idempotent() {
        let manager = StylesheetManager::default();
        let mut doc = StyleDocument::new();
        manager.apply_settings(&mut doc, &sample());
        let first = doc.render_head();
        let applied = manager.apply_settings(&mut doc, &sample());

        assert_eq!(applied.removed, 2);
        assert_eq!(doc.font_source_links().len(), 1);
        assert_eq!(doc.rule_styles().len(), 1);
        assert_eq!(doc.render_head(), first);
    }

    #[test]
    fn test_apply_all_disabled_clears_font_source() {
        let manager = StylesheetManager::default();
        let mut doc = StyleDocument::new();
        manager.apply_settings(&mut doc, &sample());

        let disabled = FontSettings::new().with_rule(".window-title", FontRule::default());
        let applied = manager.apply_settings(&mut doc, &disabled);

        assert_eq!(applied.font_source, None);
        assert!(doc.font_source_links().is_empty());
        assert_eq!(doc.rule_styles(), vec![""]);
    }

    #[test]
    fn test_apply_uses_configured_endpoint_and_display() {
        let config = Config {
            font_endpoint: "https://fonts.example.net/css".to_string(),
            font_display: FontDisplay::Block,
            ..Config::default()
        };
        let mut doc = StyleDocument::for_endpoint(&config.font_endpoint);
        StylesheetManager::from_config(&config).apply_settings(
            &mut doc,
            &FontSettings::new().with_rule(".a", FontRule::enabled("Lato")),
        );
        assert_eq!(
            doc.font_source_links(),
            vec!["https://fonts.example.net/css?family=Lato&display=block"]
        );
    }
}
