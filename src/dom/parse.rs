//! Markup parsing for [`Document`](super::Document).
//!
//! Fragments are parsed with `tl` and converted into an owned tree before any
//! node is inserted, so a parse failure never leaves a half-replaced node.

use crate::error::DomError;

/// Owned parse result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ParsedNode {
    Element {
        tag: String,
        attributes: Vec<(String, String)>,
        children: Vec<ParsedNode>,
    },
    Text(String),
}

/// Parse an HTML fragment.
pub(crate) fn parse_fragment(markup: &str) -> Result<Vec<ParsedNode>, DomError> {
    let dom = tl::parse(markup, tl::ParserOptions::default())
        .map_err(|err| DomError::Parse(format!("{err:?}")))?;

    let parser = dom.parser();
    Ok(dom
        .children()
        .iter()
        .filter_map(|handle| convert(*handle, parser, true))
        .collect())
}

/// Whitespace-only text is dropped between top-level nodes and kept verbatim
/// inside elements, where it may be a bound value.
fn convert(handle: tl::NodeHandle, parser: &tl::Parser, top_level: bool) -> Option<ParsedNode> {
    let node = handle.get(parser)?;

    match node {
        tl::Node::Tag(tag) => {
            let name = tag.name().as_utf8_str().to_lowercase();

            let attributes = tag
                .attributes()
                .iter()
                .map(|(key, value)| {
                    let key: &str = key.as_ref();
                    let value = value.map(|v| decode_entities(&v)).unwrap_or_default();
                    (key.to_string(), value)
                })
                .collect();

            let children = tag
                .children()
                .top()
                .iter()
                .filter_map(|child| convert(*child, parser, false))
                .collect();

            Some(ParsedNode::Element {
                tag: name,
                attributes,
                children,
            })
        }
        tl::Node::Raw(bytes) => {
            let text = bytes.as_utf8_str();
            if top_level && text.trim().is_empty() {
                None
            } else {
                Some(ParsedNode::Text(decode_entities(&text)))
            }
        }
        tl::Node::Comment(_) => None,
    }
}

/// Decode the entities produced by [`escape_text`](super::escape_text), plus `&#39;`.
pub(crate) fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested_elements() {
        let nodes = parse_fragment(r#"<div><h1 id="t">Hi</h1><clock></clock></div>"#).unwrap();
        assert_eq!(
            nodes,
            vec![ParsedNode::Element {
                tag: "div".into(),
                attributes: vec![],
                children: vec![
                    ParsedNode::Element {
                        tag: "h1".into(),
                        attributes: vec![("id".into(), "t".into())],
                        children: vec![ParsedNode::Text("Hi".into())],
                    },
                    ParsedNode::Element {
                        tag: "clock".into(),
                        attributes: vec![],
                        children: vec![],
                    },
                ],
            }]
        );
    }

    #[test]
    fn test_top_level_whitespace_is_dropped() {
        let nodes = parse_fragment("<p>a</p>\n   <p>b</p>").unwrap();
        assert_eq!(nodes.len(), 2);
    }

    #[test]
    fn test_whitespace_inside_element_is_kept() {
        let nodes = parse_fragment(r#"<p><span id="ng-1">   </span></p>"#).unwrap();
        let ParsedNode::Element { children, .. } = &nodes[0] else {
            panic!("expected element");
        };
        let ParsedNode::Element { children, .. } = &children[0] else {
            panic!("expected span");
        };
        assert_eq!(children, &vec![ParsedNode::Text("   ".into())]);
    }

    #[test]
    fn test_decode_entities() {
        assert_eq!(decode_entities("a &lt;b&gt; &amp;lt;"), "a <b> &lt;");
        assert_eq!(decode_entities("none"), "none");
    }
}
