//! regionfonts: map named UI regions to web-hosted font families.
//!
//! The engine lives in `regionfonts-styles` and the settings model in
//! `regionfonts-config`; this crate is the host glue around them: the apply
//! cycle, the settings form conversion, logging and the CLI.

pub mod cli;
pub mod debug;
pub mod form;
pub mod module;

pub use form::{FormEntry, FormValue, form_entries, settings_from_form};
pub use module::{FontsModule, SubmitOutcome};
