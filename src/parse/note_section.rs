use std::sync::LazyLock;

use regex::Regex;

/// Heading line that opens the snapshot section
pub const SECTION_HEADING: &str = "Amazing Marvin";

/// Line that opens and closes the section
pub const SECTION_RULE: &str = "___";

static SECTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)___\nAmazing Marvin\n(?P<body>[\s\S]*?)\n___").expect("valid section pattern")
});

/// Replace the body of the snapshot section in `document`, or append a new
/// section when there is none. Surrounding whitespace is trimmed.
pub fn splice_section(document: &str, body: &str) -> String {
    let updated = match SECTION_RE.captures(document).and_then(|c| c.name("body")) {
        Some(existing) => format!(
            "{}{}{}",
            &document[..existing.start()],
            body,
            &document[existing.end()..]
        ),
        None => format!("{document}\n{SECTION_RULE}\n{SECTION_HEADING}\n{body}\n{SECTION_RULE}"),
    };
    updated.trim().to_string()
}

/// Join checklist lines into a section body
pub fn section_body(lines: &[String]) -> String {
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_append_when_missing() {
        let doc = "# 2026-10-18\n\nSome notes\n";
        let out = splice_section(doc, "- [ ] A");
        assert_eq!(
            out,
            "# 2026-10-18\n\nSome notes\n\n___\nAmazing Marvin\n- [ ] A\n___"
        );
    }

    #[test]
    fn test_replace_existing() {
        let doc = "intro\n___\nAmazing Marvin\n- [ ] Old\n  - [ ] Older\n___\noutro";
        let out = splice_section(doc, "- [ ] New");
        assert_eq!(out, "intro\n___\nAmazing Marvin\n- [ ] New\n___\noutro");
    }

    #[test]
    fn test_replace_is_stable() {
        let once = splice_section("", "- [ ] A");
        let twice = splice_section(&once, "- [ ] A");
        assert_eq!(once, "___\nAmazing Marvin\n- [ ] A\n___");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_heading_case_insensitive() {
        let doc = "___\namazing marvin\nold\n___";
        assert_eq!(splice_section(doc, "new"), "___\namazing marvin\nnew\n___");
    }

    #[test]
    fn test_empty_body_section_replaced() {
        let doc = "x\n___\nAmazing Marvin\n\n___";
        assert_eq!(splice_section(doc, "- [ ] B"), "x\n___\nAmazing Marvin\n- [ ] B\n___");
    }

    #[test]
    fn test_body_with_dollar_signs_kept_literal() {
        let doc = "___\nAmazing Marvin\nold\n___";
        assert_eq!(
            splice_section(doc, "- [ ] Pay $1 to $name"),
            "___\nAmazing Marvin\n- [ ] Pay $1 to $name\n___"
        );
    }

    #[test]
    fn test_section_body() {
        let lines = vec!["- [ ] A".to_string(), "  - [ ] B".to_string()];
        assert_eq!(section_body(&lines), "- [ ] A\n  - [ ] B");
    }
}
