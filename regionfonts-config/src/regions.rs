//! Default configurable regions.
//!
//! The settings form lists these in order; any other selector stored in the
//! settings is still applied, it just has no form row.

use crate::font_rule::{FontRule, FontSettings};

/// A named UI region targeted by a style selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub selector: &'static str,
    pub label: &'static str,
}

impl Region {
    /// The stored rule for this region, or the default rule when unset.
    pub fn rule_in(&self, settings: &FontSettings) -> FontRule {
        settings.get(self.selector).cloned().unwrap_or_default()
    }
}

pub const DEFAULT_REGIONS: &[Region] = &[
    Region {
        selector: ".window-title",
        label: "Window Titles",
    },
    Region {
        selector: ".window-content",
        label: "Window Content",
    },
    Region {
        selector: ".dialog .dialog-content",
        label: "Dialog Content",
    },
    Region {
        selector: ".chat-message .message-header",
        label: "Chat Headers",
    },
    Region {
        selector: ".chat-message .message-content",
        label: "Chat Content",
    },
    Region {
        selector: ".sidebar-tab .directory-header",
        label: "Sidebar Headers",
    },
    Region {
        selector: ".journal-entry-content",
        label: "Journal Content",
    },
];

/// Look up a default region by selector.
pub fn find_region(selector: &str) -> Option<&'static Region> {
    DEFAULT_REGIONS.iter().find(|r| r.selector == selector)
}
