//! Flattens an html document into structure-aware plain text
//!
//! The goals:
//! - Newlines inside the html are ignored, as a browser would ignore them
//! - Repeated newlines and spaces are collapsed
//! - Newlines only around headings and paragraphs, or when explicit (`br`, `pre`)
//! - Table cells are separated by a tab, rows by a newline
//! - List items start on a new line with a hyphen
use std::borrow::Cow;

use ego_tree::iter::Edge;
use scraper::{Html, Node};

use crate::element_kind::ElementKind;
use crate::noise::remove_noise;
use crate::normalize::{strip_excessive_whitespace, strip_newlines};
use crate::options::FlattenOptions;

/// Turns html into plain text suitable for a language model.
///
/// Noise elements (navigation, scripts, footers, cookie dialogs, ...) are removed first; see
/// [`FlattenOptions`]. The output never starts or ends with whitespace and may be empty.
///
/// # Example
///
/// ```
/// # use tessel_html::DocumentFlattener;
/// let text = DocumentFlattener::default()
///     .flatten_str("<h1>Title</h1><ul><li>one</li><li>two</li></ul><script>x()</script>");
///
/// assert_eq!(text, "Title\n- one\n- two");
/// ```
#[derive(Debug, Clone, Default)]
pub struct DocumentFlattener {
    options: FlattenOptions,
}

impl DocumentFlattener {
    pub fn new(options: FlattenOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &FlattenOptions {
        &self.options
    }

    /// Parses and flattens raw html. Parsing is lenient and never fails.
    pub fn flatten_str(&self, html: &str) -> String {
        self.flatten(Html::parse_document(html))
    }

    /// Flattens a parsed document.
    #[tracing::instrument(skip_all, name = "html.flatten", level = "trace")]
    pub fn flatten(&self, mut document: Html) -> String {
        let removed = remove_noise(&mut document, &self.options);
        tracing::trace!(removed, "Removed noise elements");

        let mut state = RenderState::new(&self.options.table_cell_separator);

        for edge in document.tree.root().traverse() {
            match edge {
                Edge::Open(node) => state.open(node.value()),
                Edge::Close(node) => state.close(node.value()),
            }
        }

        strip_excessive_whitespace(&state.text)
    }
}

/// Bookkeeping for a single walk over a document
#[derive(Debug)]
struct RenderState<'a> {
    text: String,
    table_cell_separator: &'a str,
    /// Set right after a list marker, so a paragraph directly inside the item adds no newline
    list_element_start: bool,
    /// Set after headings and line breaks, a single leading space of the next text is dropped
    last_added_newline: bool,
    /// Number of open `table` elements
    table_depth: usize,
    /// Whether the current table row already has a cell
    row_has_cell: bool,
    /// Number of open `pre` elements
    verbatim_depth: usize,
}

impl<'a> RenderState<'a> {
    fn new(table_cell_separator: &'a str) -> Self {
        Self {
            text: String::new(),
            table_cell_separator,
            list_element_start: false,
            last_added_newline: false,
            table_depth: 0,
            row_has_cell: false,
            verbatim_depth: 0,
        }
    }

    fn in_table(&self) -> bool {
        self.table_depth > 0
    }

    fn in_verbatim(&self) -> bool {
        self.verbatim_depth > 0
    }

    fn open(&mut self, node: &Node) {
        match node {
            Node::Text(text) => self.push_text(text),
            Node::Element(element) => self.open_element(ElementKind::from_tag(element.name())),
            // Comments, doctypes and processing instructions carry no visible text
            _ => {}
        }
    }

    fn close(&mut self, node: &Node) {
        let Node::Element(element) = node else {
            return;
        };

        match ElementKind::from_tag(element.name()) {
            ElementKind::Table => self.table_depth = self.table_depth.saturating_sub(1),
            ElementKind::Preformatted => {
                self.verbatim_depth = self.verbatim_depth.saturating_sub(1);
            }
            _ => {}
        }
    }

    fn open_element(&mut self, kind: ElementKind) {
        match kind {
            ElementKind::Table => self.table_depth += 1,
            ElementKind::TableRow if self.in_table() => {
                self.text.push('\n');
                self.row_has_cell = false;
            }
            ElementKind::TableCell if self.in_table() => {
                if self.row_has_cell {
                    self.text.push_str(self.table_cell_separator);
                }
                self.row_has_cell = true;
            }
            // Tracked inside tables as well, where cell text is collapsed regardless
            ElementKind::Preformatted => self.verbatim_depth += 1,
            // Inside a table only rows and cells shape the text
            _ if self.in_table() => {}
            ElementKind::Paragraph => {
                if !self.list_element_start {
                    self.text.push('\n');
                }
            }
            ElementKind::Heading | ElementKind::LineBreak => {
                self.text.push('\n');
                self.list_element_start = false;
                self.last_added_newline = true;
            }
            ElementKind::ListItem => {
                self.text.push_str("\n- ");
                self.list_element_start = true;
            }
            ElementKind::TableRow | ElementKind::TableCell | ElementKind::Other => {}
        }
    }

    fn push_text(&mut self, fragment: &str) {
        let collapsed;
        let mut fragment = fragment;

        // Rows are separated by newlines, so cells cannot contain any
        if self.in_table() {
            collapsed = fragment.replace('\n', " ");
            fragment = collapsed.trim();
        }

        // Line breaks already ended the line, a leading space would indent the next one
        if self.last_added_newline {
            if let Some(rest) = fragment.strip_prefix(' ') {
                fragment = rest;
                self.last_added_newline = false;
            }
        }

        if fragment.is_empty() {
            return;
        }

        let content = if self.in_verbatim() {
            Cow::Borrowed(fragment)
        } else {
            strip_newlines(fragment)
        };

        // Don't fuse words of separate elements
        let ends_with_word = self.text.chars().last().is_some_and(|c| !c.is_whitespace());
        let starts_with_word = content.chars().next().is_some_and(|c| !c.is_whitespace());
        if ends_with_word && starts_with_word {
            self.text.push(' ');
        }

        self.text.push_str(&content);
        self.list_element_start = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn flatten(html: &str) -> String {
        DocumentFlattener::default().flatten_str(html)
    }

    #[test_case("<p>foo</p><p>bar</p>", "foo\nbar"; "paragraphs")]
    #[test_case("<div>foo</div><div>bar</div>", "foo\nbar"; "divs")]
    #[test_case("<div>foo</div>bar", "foo bar"; "text after a block joins its line")]
    #[test_case("<span>foo</span><span>bar</span>", "foo bar"; "adjacent inline text")]
    #[test_case("<span>foo </span><span>bar</span>", "foo bar"; "no double space")]
    #[test_case("<b>foo</b>\n\n<i>bar</i>", "foo bar"; "source newlines are spaces")]
    #[test_case("<h1>Title</h1><p>text</p>", "Title\ntext"; "heading")]
    #[test_case("<h5>Small</h5>text", "Small text"; "h5 is inline")]
    #[test_case("one<br> two", "one\ntwo"; "line break drops leading space")]
    #[test_case("<ul><li>one</li><li>two</li></ul>", "- one\n- two"; "list")]
    #[test_case("<ul><li><p>one</p></li><li><div>two</div></li></ul>", "- one\n- two"; "paragraph in list item")]
    #[test_case("<p></p>", ""; "empty")]
    #[test_case("<!-- hidden -->visible", "visible"; "comments")]
    fn test_flatten(html: &str, expected: &str) {
        assert_eq!(flatten(html), expected);
    }

    #[test]
    fn test_table_rows_and_cells() {
        let html = "<table><tr><td>a</td><td>b</td></tr><tr><td>c</td><td>d</td></tr></table>";

        assert_eq!(flatten(html), "a\tb\nc\td");
    }

    #[test]
    fn test_table_with_header_and_source_formatting() {
        let html = indoc! {"
            <table>
              <thead>
                <tr><th>Name</th><th>Value</th></tr>
              </thead>
              <tbody>
                <tr>
                  <td>
                    first
                    row
                  </td>
                  <td><p>1</p></td>
                </tr>
              </tbody>
            </table>
        "};

        assert_eq!(flatten(html), "Name\tValue\nfirst row\t1");
    }

    #[test]
    fn test_table_scope_ends_after_table() {
        let html = "<table><tr><td>cell</td></tr></table><p>after</p><ul><li>item</li></ul>";

        assert_eq!(flatten(html), "cell\nafter\n- item");
    }

    #[test]
    fn test_nested_table_keeps_outer_scope() {
        let html = "<table><tr><td><table><tr><td>inner</td></tr></table></td><td>outer</td></tr></table><p>after</p>";

        let text = flatten(html);
        assert!(text.ends_with("outer\nafter"), "{text:?}");
        assert!(!text.contains("\n\n"));
    }

    #[test]
    fn test_preformatted_keeps_newlines() {
        let html =
            "<p>intro\ntext</p><div><pre>fn main() {\n    run();\n}</pre></div><p>outro\ntext</p>";

        assert_eq!(
            flatten(html),
            "intro text\nfn main() {\n run();\n}\noutro text"
        );
    }

    #[test]
    fn test_preformatted_inside_table_cell_is_collapsed() {
        let html = "<table><tr><td><pre>a\nb</pre></td></tr></table>";

        assert_eq!(flatten(html), "a b");
    }

    #[test]
    fn test_preformatted_with_nested_elements() {
        let html = "<pre><code><span>let</span> x = 1;\nlet y = 2;</code></pre>after\nthis";

        assert_eq!(flatten(html), "let x = 1;\nlet y = 2; after this");
    }

    #[test]
    fn test_removes_noise() {
        let html = indoc! {r#"
            <html>
              <head><title>Page</title><script>alert("script")</script></head>
              <body>
                <nav>navigation</nav>
                <div id="CybotCookiebotDialog"><p>cookies</p></div>
                <div class="wrapper sidebar">sidebar content</div>
                <p>main content</p>
                <footer class="footer">footer content</footer>
                <div class="footer">more footer</div>
              </body>
            </html>
        "#};

        let text = flatten(html);

        assert_eq!(text, "Page\nmain content");
    }

    #[test]
    fn test_output_is_trimmed_and_normalized() {
        let html = "  <div>  <p>  spaced   out  </p>  </div>  <br>  ";

        let text = flatten(html);

        assert_eq!(text, "spaced out");
        assert_eq!(strip_excessive_whitespace(&text), text);
    }

    #[test]
    fn test_custom_separator() {
        let options = FlattenOptions::builder()
            .table_cell_separator(";")
            .build()
            .unwrap();
        let flattener = DocumentFlattener::new(options);

        assert_eq!(
            flattener.flatten_str("<table><tr><td>a</td><td>b</td><td>c</td></tr></table>"),
            "a;b;c"
        );
    }

    #[test]
    fn test_flatten_is_deterministic() {
        let html = "<h2>A</h2><p>b <em>c</em></p><ol><li>d</li></ol>";
        let flattener = DocumentFlattener::default();

        assert_eq!(flattener.flatten_str(html), flattener.flatten_str(html));
        assert_eq!(flattener.flatten_str(html), "A\nb c\n- d");
    }
}
