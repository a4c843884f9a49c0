//! The apply cycle.
//!
//! `FontsModule` wires a `SettingsStore` to a `ResourceSink`: it runs one
//! apply when the host reaches its init point and again after every settings
//! form submission.

use crate::form::{FormValue, settings_from_form};
use regionfonts_config::{Config, FontSettings, SettingsStore};
use regionfonts_styles::{AppliedStylesheets, ResourceSink, StylesheetManager, resolve};

/// Result of a settings form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Fonts were re-applied in place.
    Applied(AppliedStylesheets),
    /// `reload_on_change` is set; the host should rebuild its document and
    /// call `init` on the fresh one.
    ReloadRequested,
}

pub struct FontsModule<S, K> {
    store: S,
    sink: K,
    manager: StylesheetManager,
    reload_on_change: bool,
}

impl<S, K> std::fmt::Debug for FontsModule<S, K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontsModule")
            .field("manager", &self.manager)
            .field("reload_on_change", &self.reload_on_change)
            .finish_non_exhaustive()
    }
}

impl<S: SettingsStore, K: ResourceSink> FontsModule<S, K> {
    pub fn new(config: &Config, store: S, sink: K) -> Self {
        Self {
            store,
            sink,
            manager: StylesheetManager::from_config(config),
            reload_on_change: config.reload_on_change,
        }
    }

    /// Host init point: apply whatever is stored.
    pub fn init(&mut self) -> AppliedStylesheets {
        log::info!("Initializing region fonts");
        self.apply()
    }

    /// Read the store and (re)install both stylesheet resources.
    pub fn apply(&mut self) -> AppliedStylesheets {
        let settings = self.store.get();
        self.apply_snapshot(&settings)
    }

    fn apply_snapshot(&mut self, settings: &FontSettings) -> AppliedStylesheets {
        let families = resolve(settings);
        self.manager.apply(&mut self.sink, &families, settings)
    }

    /// Settings form submission: convert, persist, then re-apply unless a
    /// full reload was configured.
    pub fn submit<Key, I>(&mut self, fields: I) -> SubmitOutcome
    where
        Key: AsRef<str>,
        I: IntoIterator<Item = (Key, FormValue)>,
    {
        let settings = settings_from_form(fields);
        self.replace_settings(settings)
    }

    /// Persist a complete snapshot, then react per `reload_on_change`.
    ///
    /// A failed write is logged; the apply still uses whatever the store
    /// returns afterwards.
    pub fn replace_settings(&mut self, settings: FontSettings) -> SubmitOutcome {
        let count = settings.len();
        match self.store.set(settings) {
            Ok(()) => log::info!("Font settings updated ({} rule(s))", count),
            Err(e) => log::error!("Failed to save font settings: {}", e),
        }

        if self.reload_on_change {
            log::info!("Reload on change enabled; requesting document reload");
            return SubmitOutcome::ReloadRequested;
        }
        SubmitOutcome::Applied(self.apply())
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    /// Swap in a fresh sink (e.g. after a document reload), returning the old one.
    pub fn replace_sink(&mut self, sink: K) -> K {
        std::mem::replace(&mut self.sink, sink)
    }

    pub fn reload_on_change(&self) -> bool {
        self.reload_on_change
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regionfonts_config::{ConfigError, FontRule, MemorySettingsStore};
    use regionfonts_styles::StyleDocument;

    /// Store whose writes always fail.
    struct ReadOnlyStore(FontSettings);

    impl SettingsStore for ReadOnlyStore {
        fn get(&self) -> FontSettings {
            self.0.clone()
        }

        fn set(&self, _settings: FontSettings) -> Result<(), ConfigError> {
            Err(ConfigError::Validation("read-only".to_string()))
        }
    }

    #[test]
    fn test_init_on_empty_store() {
        let mut module = FontsModule::new(
            &Config::default(),
            MemorySettingsStore::new(),
            StyleDocument::new(),
        );
        let applied = module.init();
        assert_eq!(applied.font_source, None);
        assert_eq!(module.sink().rules_text(), Some(""));
    }

    #[test]
    fn test_failed_write_still_applies_stored() {
        let stored = FontSettings::new().with_rule(".a", FontRule::enabled("Lato"));
        let mut module = FontsModule::new(
            &Config::default(),
            ReadOnlyStore(stored),
            StyleDocument::new(),
        );
        let outcome = module.submit([(".b.font", FormValue::from("Inter"))]);

        assert!(matches!(outcome, SubmitOutcome::Applied(_)));
        let css = module.sink().rules_text().unwrap();
        assert!(css.contains("\"Lato\""));
        assert!(!css.contains("Inter"));
    }

    #[test]
    fn test_replace_sink_returns_old() {
        let mut module = FontsModule::new(
            &Config::default(),
            MemorySettingsStore::new(),
            StyleDocument::new(),
        );
        module.init();
        let old = module.replace_sink(StyleDocument::new());
        assert_eq!(old.rule_styles().len(), 1);
        assert!(module.sink().elements().is_empty());
    }
}
