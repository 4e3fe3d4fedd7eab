//! Query input normalization and merge.

/// Trim and collapse every run of whitespace to a single space.
pub fn normalize_text(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Merge user text and image-derived text into one query.
///
/// Non-empty parts are normalized and joined with a single space. Both parts
/// empty yields `""`, which the engine rejects.
pub fn merge(text: Option<&str>, image_text: Option<&str>) -> String {
    [text, image_text]
        .into_iter()
        .flatten()
        .map(normalize_text)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_collapses_whitespace() {
        assert_eq!(normalize_text("  red \t summer\n dress  "), "red summer dress");
        assert_eq!(normalize_text("   "), "");
    }

    #[test]
    fn merge_text_only() {
        assert_eq!(merge(Some("  hello  world "), Some("")), "hello world");
    }

    #[test]
    fn merge_both_parts() {
        assert_eq!(
            merge(Some("iphone"), Some("orange smartphone\nglass back")),
            "iphone orange smartphone glass back"
        );
    }

    #[test]
    fn merge_image_only() {
        assert_eq!(merge(None, Some(" black chair ")), "black chair");
    }

    #[test]
    fn merge_nothing_is_empty() {
        assert_eq!(merge(Some(""), Some("")), "");
        assert_eq!(merge(None, None), "");
        assert_eq!(merge(Some("  "), None), "");
    }
}
