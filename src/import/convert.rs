//! HTML to Markdown conversion.
//!
//! The importer only needs "HTML in, Markdown out", so conversion sits
//! behind [`HtmlConverter`]. [`Html2Md`] is the default implementation.

/// Converts an HTML fragment to Markdown text.
pub trait HtmlConverter {
    fn to_markdown(&self, html: &str) -> String;
}

/// Converter backed by the `html2md` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct Html2Md;

impl HtmlConverter for Html2Md {
    fn to_markdown(&self, html: &str) -> String {
        html2md::parse_html(html).trim().to_string()
    }
}

impl<F> HtmlConverter for F
where
    F: Fn(&str) -> String,
{
    fn to_markdown(&self, html: &str) -> String {
        self(html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_has_no_tags() {
        let md = Html2Md.to_markdown("<h1>X</h1>");
        assert!(md.contains('X'));
        assert!(!md.contains('<'));
        assert!(!md.contains("h1"));
    }

    #[test]
    fn test_block_structure_preserved() {
        let md = Html2Md.to_markdown("<p>First</p><p>Second with <strong>bold</strong></p>");
        let first = md.find("First").unwrap();
        let second = md.find("Second").unwrap();
        assert!(first < second);
        assert!(md[first..second].contains('\n'));
        assert!(md.contains("**bold**"));
    }

    #[test]
    fn test_closure_converter() {
        let upper = |html: &str| html.to_uppercase();
        assert_eq!(upper.to_markdown("<p>a</p>"), "<P>A</P>");
    }
}
