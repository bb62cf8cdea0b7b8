// src/utils.rs

/// Collapse runs of whitespace and newlines into single spaces
pub fn clean_text(text: &str) -> String {
    text.lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whether an inline style string declares `display: none`
pub fn style_hides_element(style: &str) -> bool {
    style.split(';').any(|declaration| {
        let mut parts = declaration.splitn(2, ':');
        let property = parts.next().unwrap_or_default().trim();
        let value = parts.next().unwrap_or_default().trim();
        property.eq_ignore_ascii_case("display") && value.to_ascii_lowercase().starts_with("none")
    })
}

/// Append declarations to an inline style, keeping whatever was there
pub fn merge_inline_style(original: Option<&str>, extra: &str) -> String {
    match original.map(str::trim).filter(|s| !s.is_empty()) {
        Some(original) if original.ends_with(';') => format!("{} {}", original, extra),
        Some(original) => format!("{}; {}", original, extra),
        None => extra.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text() {
        assert_eq!(clean_text("  Senior\n\n   Rust   Engineer \n"), "Senior Rust Engineer");
        assert_eq!(clean_text("\n \n"), "");
    }

    #[test]
    fn test_style_hides_element() {
        assert!(style_hides_element("display:none"));
        assert!(style_hides_element("color: red; DISPLAY : None !important"));
        assert!(!style_hides_element("display: block"));
        assert!(!style_hides_element("visibility: hidden"));
        assert!(!style_hides_element(""));
    }

    #[test]
    fn test_merge_inline_style() {
        assert_eq!(merge_inline_style(None, "border: 1px"), "border: 1px");
        assert_eq!(merge_inline_style(Some("  "), "border: 1px"), "border: 1px");
        assert_eq!(
            merge_inline_style(Some("color: red"), "border: 1px"),
            "color: red; border: 1px"
        );
        assert_eq!(
            merge_inline_style(Some("color: red;"), "border: 1px"),
            "color: red; border: 1px"
        );
    }
}
