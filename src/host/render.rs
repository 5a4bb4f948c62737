//! Document to styled terminal lines.
//!
//! A deliberately small layout: block elements start and end a line, inline
//! elements and text flow into the current one. Buttons render as
//! `[ label ]` and are the only thing focus applies to.

use crate::dom::{Document, Dom};
use crate::types::{Attr, NodeId};

// =============================================================================
// Lines
// =============================================================================

/// A run of text drawn with one set of attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub attr: Attr,
}

/// One terminal row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    pub spans: Vec<Span>,
}

impl Line {
    /// Plain text of the line, attributes dropped.
    pub fn text(&self) -> String {
        self.spans.iter().map(|span| span.text.as_str()).collect()
    }

    /// Display width in columns (one per char).
    pub fn width(&self) -> usize {
        self.spans.iter().map(|span| span.text.chars().count()).sum()
    }
}

const INLINE_TAGS: &[&str] = &[
    "span", "a", "b", "strong", "i", "em", "u", "code", "small", "label", "button",
];

fn is_inline(tag: &str) -> bool {
    INLINE_TAGS.contains(&tag)
}

fn tag_attr(tag: &str) -> Attr {
    match tag {
        "h1" | "h2" | "h3" | "b" | "strong" => Attr::BOLD,
        "i" | "em" | "small" => Attr::DIM,
        "u" => Attr::UNDERLINE,
        _ => Attr::NONE,
    }
}

// =============================================================================
// Line Builder
// =============================================================================

#[derive(Default)]
struct LineBuilder {
    lines: Vec<Line>,
    current: Vec<Span>,
}

impl LineBuilder {
    fn push(&mut self, text: &str, attr: Attr) {
        if text.is_empty() {
            return;
        }
        match self.current.last_mut() {
            Some(last) if last.attr == attr => last.text.push_str(text),
            _ => self.current.push(Span {
                text: text.to_string(),
                attr,
            }),
        }
    }

    fn break_line(&mut self) {
        if !self.current.is_empty() {
            self.lines.push(Line {
                spans: std::mem::take(&mut self.current),
            });
        }
    }

    fn finish(mut self) -> Vec<Line> {
        self.break_line();
        self.lines
    }
}

// =============================================================================
// Render
// =============================================================================

/// Lay out the subtree under `root` as terminal lines.
///
/// `focused` is drawn inverse when it is a button.
pub fn render_lines(document: &Document, root: NodeId, focused: Option<NodeId>) -> Vec<Line> {
    let mut builder = LineBuilder::default();
    for child in document.children(root) {
        walk(document, child, Attr::NONE, focused, &mut builder);
    }
    builder.finish()
}

fn walk(
    document: &Document,
    node: NodeId,
    inherited: Attr,
    focused: Option<NodeId>,
    out: &mut LineBuilder,
) {
    if document.is_text(node) {
        if let Some(text) = document.text_content(node) {
            // Indentation between tags in a formatted template
            if text.trim().is_empty() && text.contains('\n') {
                return;
            }
            out.push(&text, inherited);
        }
        return;
    }

    let Some(tag) = document.tag_name(node).map(|tag| tag.to_ascii_lowercase()) else {
        return;
    };

    match tag.as_str() {
        "br" => out.break_line(),
        "button" => {
            let label = document.text_content(node).unwrap_or_default();
            let attr = if focused == Some(node) {
                inherited | Attr::INVERSE
            } else {
                inherited
            };
            out.push(&format!("[ {} ]", label.trim()), attr);
        }
        _ => {
            let block = !is_inline(&tag);
            if block {
                out.break_line();
            }
            let attr = inherited | tag_attr(&tag);
            for child in document.children(node) {
                walk(document, child, attr, focused, out);
            }
            if block {
                out.break_line();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(markup: &str, focus_button: bool) -> Vec<Line> {
        let doc = Document::new();
        let body = doc.body();
        doc.set_inner_html(body, markup).unwrap();
        let focused = if focus_button {
            doc.get_elements_by_tag_name(body, "button").first().copied()
        } else {
            None
        };
        render_lines(&doc, body, focused)
    }

    #[test]
    fn test_blocks_break_lines() {
        let lines = render("<h1>Title</h1><p>one <b>two</b></p><div>three</div>", false);
        let texts: Vec<String> = lines.iter().map(Line::text).collect();
        assert_eq!(texts, vec!["Title", "one two", "three"]);
    }

    #[test]
    fn test_heading_is_bold() {
        let lines = render("<h1>Title</h1>", false);
        assert_eq!(lines[0].spans[0].attr, Attr::BOLD);
    }

    #[test]
    fn test_inline_spans_merge_by_attr() {
        let lines = render("<p>a<span>b</span><b>c</b></p>", false);
        assert_eq!(lines[0].spans.len(), 2);
        assert_eq!(lines[0].spans[0].text, "ab");
        assert_eq!(lines[0].spans[1].attr, Attr::BOLD);
    }

    #[test]
    fn test_button_label_and_focus() {
        let plain = render("<p>x</p><button>Update</button>", false);
        assert_eq!(plain[1].text(), "[ Update ]");
        assert_eq!(plain[1].spans[0].attr, Attr::NONE);

        let focused = render("<p>x</p><button>Update</button>", true);
        assert_eq!(focused[1].spans[0].attr, Attr::INVERSE);
    }

    #[test]
    fn test_template_indentation_is_not_drawn() {
        let lines = render("<div>\n  <h1>A</h1>\n  <p>b<span> </span>c</p>\n</div>", false);
        let texts: Vec<String> = lines.iter().map(Line::text).collect();
        assert_eq!(texts, vec!["A", "b c"]);
    }

    #[test]
    fn test_unknown_tags_are_blocks() {
        let lines = render("<h1>A</h1><clock><p>00:00:00</p></clock>", false);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].width(), 8);
    }
}
