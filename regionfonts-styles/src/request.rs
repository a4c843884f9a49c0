//! Font-source request URL construction.
//!
//! The query syntax joins words of a family name with `+` and separates
//! families with `|`:
//! `<endpoint>?family=Roboto+Slab|Open+Sans&display=swap`.

use crate::resolver::FontFamilies;
use regionfonts_config::FontDisplay;

/// Separator between words of one family name.
pub const FAMILY_WORD_SEPARATOR: &str = "+";

/// Separator between families.
pub const FAMILY_SEPARATOR: &str = "|";

/// One family name in query form: whitespace runs become `+`, and characters
/// that would end the parameter or split the family list are percent-encoded.
pub fn family_param(name: &str) -> String {
    name.split_whitespace()
        .map(encode_word)
        .collect::<Vec<_>>()
        .join(FAMILY_WORD_SEPARATOR)
}

fn encode_word(word: &str) -> String {
    let mut encoded = String::with_capacity(word.len());
    for c in word.chars() {
        match c {
            '%' => encoded.push_str("%25"),
            '&' => encoded.push_str("%26"),
            '#' => encoded.push_str("%23"),
            '+' => encoded.push_str("%2B"),
            '|' => encoded.push_str("%7C"),
            '=' => encoded.push_str("%3D"),
            _ => encoded.push(c),
        }
    }
    encoded
}

/// Build the single request URL for `families`, or `None` when there is
/// nothing to fetch.
pub fn font_source_url(
    endpoint: &str,
    families: &FontFamilies,
    display: FontDisplay,
) -> Option<String> {
    let mut params: Vec<String> = Vec::with_capacity(families.len());
    for param in families.iter().map(family_param) {
        // Names differing only in spacing collapse to one query entry.
        if !param.is_empty() && !params.contains(&param) {
            params.push(param);
        }
    }
    if params.is_empty() {
        return None;
    }

    let query = format!(
        "family={}&display={}",
        params.join(FAMILY_SEPARATOR),
        display.as_str()
    );
    match url::Url::parse(endpoint) {
        Ok(mut url) => {
            url.set_query(Some(&query));
            Some(url.to_string())
        }
        Err(e) => {
            log::warn!("Font endpoint '{}' does not parse ({}); using it verbatim", endpoint, e);
            Some(format!("{endpoint}?{query}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENDPOINT: &str = "https://fonts.googleapis.com/css2";

    #[test]
    fn test_family_param_collapses_whitespace() {
        assert_eq!(family_param("Roboto Slab"), "Roboto+Slab");
        assert_eq!(family_param(" Open \t Sans "), "Open+Sans");
        assert_eq!(family_param("Lato"), "Lato");
    }

    #[test]
    fn test_family_param_encodes_query_delimiters() {
        assert_eq!(family_param("A&B Sans"), "A%26B+Sans");
        assert_eq!(family_param("C# Mono"), "C%23+Mono");
        assert_eq!(family_param("Fira|Code"), "Fira%7CCode");
        assert_eq!(family_param("100% Sans+"), "100%25+Sans%2B");
    }

    #[test]
    fn test_url_delimiters_in_family_stay_in_family_param() {
        let families: FontFamilies = ["A&B Sans", "C#"].into_iter().collect();
        let url = font_source_url(ENDPOINT, &families, FontDisplay::Swap).unwrap();
        assert_eq!(
            url,
            "https://fonts.googleapis.com/css2?family=A%26B+Sans|C%23&display=swap"
        );

        let parsed = url::Url::parse(&url).unwrap();
        assert_eq!(parsed.fragment(), None);
        let pairs: Vec<(String, String)> = parsed.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("family".to_string(), "A&B Sans|C#".to_string()),
                ("display".to_string(), "swap".to_string()),
            ]
        );
    }

    #[test]
    fn test_url_empty_families() {
        assert_eq!(
            font_source_url(ENDPOINT, &FontFamilies::new(), FontDisplay::Swap),
            None
        );
    }

    #[test]
    fn test_url_single_family() {
        let families: FontFamilies = ["Roboto Slab"].into_iter().collect();
        assert_eq!(
            font_source_url(ENDPOINT, &families, FontDisplay::Swap).as_deref(),
            Some("https://fonts.googleapis.com/css2?family=Roboto+Slab&display=swap")
        );
    }

    #[test]
    fn test_url_multiple_families_keep_order() {
        let families: FontFamilies = ["Open Sans", "Lato", "Roboto Slab"].into_iter().collect();
        assert_eq!(
            font_source_url(ENDPOINT, &families, FontDisplay::Optional).as_deref(),
            Some(
                "https://fonts.googleapis.com/css2?family=Open+Sans|Lato|Roboto+Slab&display=optional"
            )
        );
    }

    #[test]
    fn test_url_spacing_variants_collapse() {
        let families: FontFamilies = ["Open Sans", "Open  Sans"].into_iter().collect();
        let url = font_source_url(ENDPOINT, &families, FontDisplay::Swap).unwrap();
        assert_eq!(url.matches("Open+Sans").count(), 1);
    }

    #[test]
    fn test_url_blank_family_only() {
        let families: FontFamilies = ["   "].into_iter().collect();
        assert_eq!(font_source_url(ENDPOINT, &families, FontDisplay::Swap), None);
    }

    #[test]
    fn test_url_unparsable_endpoint_used_verbatim() {
        let families: FontFamilies = ["Lato"].into_iter().collect();
        assert_eq!(
            font_source_url("fonts/css2", &families, FontDisplay::Swap).as_deref(),
            Some("fonts/css2?family=Lato&display=swap")
        );
    }
}
