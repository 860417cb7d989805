//! HTML tree provider.
//!
//! Thin wrapper around html5ever/rcdom: parses the rich-text field value
//! into an `RcDom`, locates the body content, and minifies whitespace before
//! transformation. The transformer never navigates parent pointers, so the
//! minification pass is free to rebuild child vectors in place.

use std::cell::RefCell;

use html5ever::Attribute;
use html5ever::ParseOpts;
use html5ever::parse_document;
use html5ever::tendril::{StrTendril, TendrilSink};
use html5ever::tree_builder::TreeBuilderOpts;
use markup5ever_rcdom::{Handle, Node, NodeData, RcDom};

/// Parse a rich-text HTML value.
///
/// html5ever is error-recovering: any input yields a tree, so malformed rich
/// text degrades during transformation instead of failing here.
pub(crate) fn parse(html: &str) -> RcDom {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            drop_doctype: true,
            ..Default::default()
        },
        ..Default::default()
    };
    parse_document(RcDom::default(), opts)
        .from_utf8()
        .one(html.as_bytes())
}

/// Locate the node whose children are the parsed fragment: the `<body>`
/// element that html5ever synthesizes around the field value.
pub(crate) fn content_root(dom: &RcDom) -> Handle {
    let document = dom.document.clone();
    let html = document
        .children
        .borrow()
        .iter()
        .find(|child| tag_name(child) == Some("html"))
        .cloned();
    let Some(html) = html else {
        return document;
    };
    let body = html
        .children
        .borrow()
        .iter()
        .find(|child| tag_name(child) == Some("body"))
        .cloned();
    body.unwrap_or(html)
}

pub(crate) fn tag_name(node: &Handle) -> Option<&str> {
    match &node.data {
        NodeData::Element { name, .. } => Some(name.local.as_ref()),
        _ => None,
    }
}

/// Look up an attribute value by local name.
pub(crate) fn attr(attrs: &[Attribute], name: &str) -> Option<String> {
    attrs
        .iter()
        .find(|attr| attr.name.local.as_ref() == name)
        .map(|attr| attr.value.to_string())
}

/// Minify whitespace across the parsed tree.
///
/// Collapses whitespace runs in text nodes to a single space, drops
/// whitespace-only text between block-level siblings (source pretty-printing
/// is not content), and trims the edges of flow blocks such as paragraphs
/// and headings. Runs before transformation, standing in for the minifier
/// the CMS pipeline applies to rich text.
pub(crate) fn minify_whitespace(node: &Handle) {
    let (keep_blank, trim_edges) = match tag_name(node) {
        Some(tag) => (keeps_inline_whitespace(tag), is_flow_block(tag)),
        // Document node: children are block-level by construction.
        None => (false, false),
    };

    {
        let mut children = node.children.borrow_mut();

        for child in children.iter_mut() {
            if let NodeData::Text { contents } = &child.data {
                let collapsed = collapse_whitespace(&contents.borrow());
                *child = text_node(collapsed);
            }
        }

        if !keep_blank {
            children.retain(|child| !is_blank_text(child));
        }

        if trim_edges && !children.is_empty() {
            let leading = trimmed_text(&children[0], |text| text.trim_start());
            match leading {
                Some(value) if value.is_empty() => {
                    children.remove(0);
                }
                Some(value) => children[0] = text_node(value),
                None => {}
            }
            if let Some(last) = children.len().checked_sub(1) {
                let trailing = trimmed_text(&children[last], |text| text.trim_end());
                match trailing {
                    Some(value) if value.is_empty() => {
                        children.remove(last);
                    }
                    Some(value) => children[last] = text_node(value),
                    None => {}
                }
            }
        }
    }

    for child in node.children.borrow().iter() {
        if matches!(child.data, NodeData::Element { .. }) {
            minify_whitespace(child);
        }
    }
}

fn trimmed_text(child: &Handle, trim: impl Fn(&str) -> &str) -> Option<String> {
    match &child.data {
        NodeData::Text { contents } => {
            let borrowed = contents.borrow();
            let trimmed = trim(&borrowed);
            if trimmed.len() == borrowed.len() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        _ => None,
    }
}

fn text_node(value: String) -> Handle {
    Node::new(NodeData::Text {
        contents: RefCell::new(StrTendril::from(value.as_str())),
    })
}

fn is_blank_text(node: &Handle) -> bool {
    match &node.data {
        NodeData::Text { contents } => contents
            .borrow()
            .chars()
            .all(|c| c.is_ascii_whitespace()),
        _ => false,
    }
}

fn collapse_whitespace(text: &str) -> String {
    let mut collapsed = String::with_capacity(text.len());
    let mut in_run = false;
    for c in text.chars() {
        if c.is_ascii_whitespace() {
            if !in_run {
                collapsed.push(' ');
            }
            in_run = true;
        } else {
            collapsed.push(c);
            in_run = false;
        }
    }
    collapsed
}

/// Flow blocks hold inline content directly; their text edges are trimmed.
fn is_flow_block(tag: &str) -> bool {
    matches!(
        tag,
        "p" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "li" | "td"
    )
}

/// Whitespace between the children of these tags separates inline runs and
/// must survive minification. Everything else is block structure, where
/// whitespace-only text is formatting noise.
fn keeps_inline_whitespace(tag: &str) -> bool {
    is_flow_block(tag)
        || matches!(
            tag,
            "a" | "strong"
                | "em"
                | "sup"
                | "sub"
                | "code"
                | "b"
                | "i"
                | "u"
                | "s"
                | "q"
                | "span"
                | "small"
                | "abbr"
                | "mark"
        )
}
