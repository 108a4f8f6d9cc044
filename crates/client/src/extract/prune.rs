//! DOM-level pruning applied to rendered HTML before markdown generation.

use crawlmark_core::SectionFilter;
use scraper::{Html, Selector};

/// Remove excluded tags and filtered sections from `html`.
///
/// - Every element matching an entry of `excluded_tags` is detached.
/// - For each filter, every `h1`..`h6` whose text contains the filter's
///   heading has its parent container detached. A heading sitting directly
///   under `<body>` is detached on its own.
///
/// When nothing matches, the input is returned untouched rather than
/// re-serialized.
pub fn prune_html(html: &str, excluded_tags: &[String], filters: &[SectionFilter]) -> String {
    if excluded_tags.is_empty() && filters.is_empty() {
        return html.to_string();
    }

    let mut document = Html::parse_document(html);
    let mut doomed = Vec::new();

    for tag in excluded_tags {
        match Selector::parse(tag) {
            Ok(selector) => doomed.extend(document.select(&selector).map(|el| el.id())),
            Err(e) => tracing::warn!("skipping excluded tag {tag:?}: {e}"),
        }
    }

    if !filters.is_empty() {
        let headings = Selector::parse("h1, h2, h3, h4, h5, h6").expect("invalid selector");
        for heading in document.select(&headings) {
            let text = heading.text().collect::<String>();
            if !filters.iter().any(|f| text.contains(f.heading())) {
                continue;
            }

            let container = heading
                .parent()
                .filter(|p| p.value().as_element().is_some_and(|el| !matches!(el.name(), "body" | "html")));

            match container {
                Some(parent) => doomed.push(parent.id()),
                None => doomed.push(heading.id()),
            }
        }
    }

    if doomed.is_empty() {
        return html.to_string();
    }

    for id in doomed {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }

    document.html()
}

/// Remove the section named by `filter` from `html`.
pub fn strip_section_html(html: &str, filter: &SectionFilter) -> String {
    prune_html(html, &[], std::slice::from_ref(filter))
}

/// Remove every element matching one of `tags` from `html`.
pub fn remove_tags(html: &str, tags: &[String]) -> String {
    prune_html(html, tags, &[])
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html>
        <head><title>Test</title></head>
        <body>
            <nav><a href="/">Home</a></nav>
            <main>
                <div class="article"><h1>Heading</h1><p>Keep this paragraph.</p></div>
                <div class="related">
                    <h2><span>Related</span> links</h2>
                    <ul><li>Other page</li></ul>
                </div>
            </main>
            <footer>Copyright</footer>
        </body>
        </html>
    "#;

    #[test]
    fn test_strip_section_removes_container() {
        let stripped = strip_section_html(PAGE, &SectionFilter::new("Related links"));
        assert!(!stripped.contains("Related"));
        assert!(!stripped.contains("Other page"));
        assert!(stripped.contains("Keep this paragraph."));
        assert!(stripped.contains("<footer>"));
    }

    #[test]
    fn test_strip_section_absent_is_untouched() {
        let stripped = strip_section_html(PAGE, &SectionFilter::new("References"));
        assert_eq!(stripped, PAGE);
    }

    #[test]
    fn test_strip_section_heading_under_body() {
        let html = "<html><body><h2>Related links</h2><p>Body text.</p></body></html>";
        let stripped = strip_section_html(html, &SectionFilter::new("Related links"));
        assert!(!stripped.contains("Related links"));
        assert!(stripped.contains("Body text."));
    }

    #[test]
    fn test_remove_tags() {
        let stripped = remove_tags(PAGE, &["nav".to_string(), "footer".to_string()]);
        assert!(!stripped.contains("Home"));
        assert!(!stripped.contains("Copyright"));
        assert!(stripped.contains("Keep this paragraph."));
        assert!(stripped.contains("Other page"));
    }

    #[test]
    fn test_remove_tags_skips_invalid_selector() {
        let stripped = remove_tags(PAGE, &["<<".to_string(), "footer".to_string()]);
        assert!(!stripped.contains("Copyright"));
        assert!(stripped.contains("Home"));
    }

    #[test]
    fn test_prune_html_combined() {
        let filters = vec![SectionFilter::new("Related links")];
        let pruned = prune_html(PAGE, &["nav".to_string()], &filters);
        assert!(!pruned.contains("Home"));
        assert!(!pruned.contains("Other page"));
        assert!(pruned.contains("Keep this paragraph."));
    }

    #[test]
    fn test_prune_html_nothing_configured() {
        assert_eq!(prune_html(PAGE, &[], &[]), PAGE);
    }
}
