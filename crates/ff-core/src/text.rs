use std::sync::OnceLock;

use regex::Regex;

/// Mermaid's entity code for a literal double quote.
pub const QUOTE_ENTITY: &str = "#quot;";

/// Placeholder label the form editor gives a section nobody has titled.
pub const DEFAULT_SECTION_TITLE: &str = "Section title";

const STRIPPED_CHARS: &[char] = &['(', ')', '/', ';', '<', '>', ':', '[', ']', '{', '}', '|'];

/// Makes `raw` safe to place inside a flowchart node or edge label.
///
/// Quotes become [`QUOTE_ENTITY`], characters the renderer cannot show are
/// dropped and whitespace is collapsed. Running it twice gives the same
/// result as running it once.
pub fn sanitize_label(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(ch) = rest.chars().next() {
        if rest.starts_with(QUOTE_ENTITY) {
            escaped.push_str(QUOTE_ENTITY);
            rest = &rest[QUOTE_ENTITY.len()..];
            continue;
        }
        match ch {
            '"' => escaped.push_str(QUOTE_ENTITY),
            stripped if STRIPPED_CHARS.contains(&stripped) => {}
            kept => escaped.push(kept),
        }
        rest = &rest[ch.len_utf8()..];
    }
    collapse_whitespace(&escaped)
}

pub fn collapse_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Splits `"12. Rest of label"` into `(12, " Rest of label")`.
pub fn parse_numbered_label(raw: &str) -> Option<(u32, &str)> {
    let caps = numbered_label_regex().captures(raw)?;
    let number = caps.get(1)?.as_str().parse::<u32>().ok()?;
    let rest = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
    Some((number, rest))
}

/// Builds the `"K. label"` form the editor shows for a section in
/// destination dropdowns.
pub fn compose_section_title(ordinal: usize, label: &str) -> String {
    format!("{}. {}", ordinal, label).trim_end().to_string()
}

pub fn normalize_section_label(raw: &str) -> &str {
    if raw == DEFAULT_SECTION_TITLE {
        ""
    } else {
        raw
    }
}

fn numbered_label_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"(?s)^(\d{1,5})\.(.*)$").expect("numbered label regex"))
}

#[cfg(test)]
mod text_tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn sanitize_label_strips_unrenderable_characters() {
        assert_eq!(
            sanitize_label("Age (years): <18 / 18+; [x] {y} a|b"),
            "Age years 18 18+ x y ab"
        );
    }

    #[test]
    fn sanitize_label_escapes_quotes_with_entity() {
        assert_eq!(
            sanitize_label(r#"Say "hello" twice"#),
            "Say #quot;hello#quot; twice"
        );
    }

    #[test]
    fn sanitize_label_keeps_existing_entity() {
        let once = sanitize_label(r#"a "b""#);
        assert_eq!(sanitize_label(&once), once);
        assert_eq!(sanitize_label("#quot;"), "#quot;");
        assert_eq!(sanitize_label("#quot(;"), "#quot");
    }

    #[test]
    fn sanitize_label_collapses_whitespace() {
        assert_eq!(sanitize_label("  one \n\t two  "), "one two");
    }

    #[test]
    fn parse_numbered_label_reads_leading_number() {
        assert_eq!(
            parse_numbered_label("12. What is it? Text Required"),
            Some((12, " What is it? Text Required"))
        );
        assert_eq!(parse_numbered_label("3."), Some((3, "")));
        assert_eq!(parse_numbered_label("Question 3."), None);
        assert_eq!(parse_numbered_label("123456. too long"), None);
        assert_eq!(parse_numbered_label("7 no period"), None);
    }

    #[test]
    fn compose_section_title_trims_empty_label() {
        assert_eq!(compose_section_title(2, "Details"), "2. Details");
        assert_eq!(compose_section_title(3, ""), "3.");
    }

    #[test]
    fn normalize_section_label_drops_placeholder() {
        assert_eq!(normalize_section_label(DEFAULT_SECTION_TITLE), "");
        assert_eq!(normalize_section_label("Contact"), "Contact");
    }

    proptest! {
        #[test]
        fn sanitize_label_is_idempotent(raw in ".{0,64}") {
            let once = sanitize_label(&raw);
            prop_assert_eq!(sanitize_label(&once), once);
        }

        #[test]
        fn sanitize_label_output_has_no_raw_quotes_or_stripped_chars(raw in ".{0,64}") {
            let cleaned = sanitize_label(&raw);
            let without_entities = cleaned.replace(QUOTE_ENTITY, "");
            prop_assert!(!without_entities.contains('"'));
            prop_assert!(!without_entities.chars().any(|ch| STRIPPED_CHARS.contains(&ch)));
        }
    }
}
