//! Font application engine for regionfonts.
//!
//! Turns a `FontSettings` snapshot into two stylesheet resources:
//! - a font-source resource that fetches every enabled family from the font
//!   host in one request
//! - a rule resource binding each enabled selector to its family
//!
//! # Architecture
//!
//! `resolve` derives the distinct enabled families. `StylesheetManager`
//! builds both resources and swaps them into a `ResourceSink`, always removing
//! by a stable marker before installing, so repeated applies never accumulate
//! resources. `StyleDocument` is an in-memory sink that models a document
//! head and renders it as HTML.

pub mod document;
pub mod manager;
pub mod request;
pub mod resolver;
pub mod rules;
pub mod sink;

// Re-export main types for convenience
pub use document::{HeadElement, StyleDocument};
pub use manager::{AppliedStylesheets, StylesheetManager};
pub use request::font_source_url;
pub use resolver::{FontFamilies, resolve};
pub use rules::rule_text;
pub use sink::{RULES_ELEMENT_ID, ResourceHandle, ResourceKind, ResourceSink};
