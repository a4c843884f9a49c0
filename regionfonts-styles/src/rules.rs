//! Rule-resource text: one block per contributing selector.

use regionfonts_config::FontSettings;
use std::fmt::Write;

/// CSS for every enabled rule that names a font.
///
/// Each block lists the chosen family (quoted) then the rule's fallback, and
/// carries `!important` so it overrides a region's own font declarations.
/// Blocks follow selector order and are separated by a blank line; output is
/// empty when nothing contributes.
pub fn rule_text(settings: &FontSettings) -> String {
    let mut css = String::new();
    for (selector, rule) in settings.contributing() {
        if !css.is_empty() {
            css.push('\n');
        }
        // Writing into a String cannot fail.
        let _ = writeln!(
            css,
            "{selector} {{\n    font-family: \"{}\", {} !important;\n}}",
            quote_family(&rule.font),
            rule.effective_fallback()
        );
    }
    css
}

/// Escape a family name for use inside a double-quoted CSS string.
fn quote_family(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        match c {
            '"' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            '\n' | '\r' => out.push(' '),
            _ => out.push(c),
        }
    }
    out
}
