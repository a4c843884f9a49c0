//! Default value functions for configuration.
//!
//! Used as `#[serde(default = "crate::defaults::...")]` attributes on
//! `Config` and `FontRule` fields.

/// Generic family used when a rule names none.
pub const FALLBACK_FAMILY: &str = "sans-serif";

/// Base URL of the hosted-font CSS API.
pub const FONT_ENDPOINT: &str = "https://fonts.googleapis.com/css2";

pub fn fallback() -> String {
    FALLBACK_FAMILY.to_string()
}

pub fn font_endpoint() -> String {
    FONT_ENDPOINT.to_string()
}

pub fn watch_debounce_ms() -> u64 {
    250
}

pub fn log_level() -> crate::types::LogLevel {
    crate::types::LogLevel::Info
}

pub fn bool_false() -> bool {
    false
}
