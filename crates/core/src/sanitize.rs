//! Named-section stripping for generated markdown.
//!
//! A `SectionFilter` names the heading text of a section that should not
//! reach the stored record. The HTML pass lives in the client crate (it
//! needs a DOM); this module holds the textual pass, which catches what the
//! HTML pass misses after markdown conversion.

use serde::{Deserialize, Serialize};

/// Removes one named section from crawled content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionFilter {
    heading: String,
}

impl SectionFilter {
    pub fn new(heading: impl Into<String>) -> Self {
        Self { heading: heading.into() }
    }

    /// Heading text matched by this filter.
    pub fn heading(&self) -> &str {
        &self.heading
    }

    /// Markdown marker that starts the section (`"## " + heading`).
    pub fn marker(&self) -> String {
        format!("## {}", self.heading)
    }

    /// Cut `markdown` at the first occurrence of the section marker.
    ///
    /// Everything from the marker on is dropped and trailing whitespace is
    /// trimmed. Text without the marker is returned unchanged.
    pub fn strip_markdown(&self, markdown: &str) -> String {
        strip_section_markdown(markdown, &self.marker())
    }
}

/// Apply every filter's textual pass in order.
pub fn strip_sections_markdown(markdown: &str, filters: &[SectionFilter]) -> String {
    filters
        .iter()
        .fold(markdown.to_string(), |text, filter| filter.strip_markdown(&text))
}

fn strip_section_markdown(markdown: &str, marker: &str) -> String {
    match markdown.find(marker) {
        Some(idx) => markdown[..idx].trim_end().to_string(),
        None => markdown.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = "# Title\n\nIntro text.\n\n## Body\n\nMain content.\n\n## Related links\n\n- a\n- b\n";

    #[test]
    fn test_marker() {
        let filter = SectionFilter::new("Related links");
        assert_eq!(filter.marker(), "## Related links");
        assert_eq!(filter.heading(), "Related links");
    }

    #[test]
    fn test_strip_markdown_truncates() {
        let filter = SectionFilter::new("Related links");
        let stripped = filter.strip_markdown(PAGE);
        assert_eq!(stripped, "# Title\n\nIntro text.\n\n## Body\n\nMain content.");
    }

    #[test]
    fn test_strip_markdown_absent_section() {
        let filter = SectionFilter::new("References");
        assert_eq!(filter.strip_markdown(PAGE), PAGE);
    }

    #[test]
    fn test_strip_markdown_idempotent() {
        let filter = SectionFilter::new("Related links");
        let once = filter.strip_markdown(PAGE);
        let twice = filter.strip_markdown(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_strip_markdown_deeper_heading_matches() {
        // "### Related links" contains the "## Related links" marker
        let filter = SectionFilter::new("Related links");
        let stripped = filter.strip_markdown("Text.\n\n### Related links\nx");
        assert_eq!(stripped, "Text.\n\n#");
    }

    #[test]
    fn test_strip_markdown_at_start() {
        let filter = SectionFilter::new("Related links");
        assert_eq!(filter.strip_markdown("## Related links\n- a"), "");
    }

    #[test]
    fn test_strip_sections_applies_all() {
        let filters = vec![SectionFilter::new("Related links"), SectionFilter::new("Body")];
        let stripped = strip_sections_markdown(PAGE, &filters);
        assert_eq!(stripped, "# Title\n\nIntro text.");
    }

    #[test]
    fn test_strip_sections_no_filters() {
        assert_eq!(strip_sections_markdown(PAGE, &[]), PAGE);
    }
}
