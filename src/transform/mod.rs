//! The tree transformer.
//!
//! A depth-first pre-order walk over the minified rcdom tree that builds the
//! Structured Content Tree. The parsed tree is read only; typed nodes are
//! allocated into owned child vectors, one builder per container kind, so
//! the containment rules of [`crate::tree`] hold by construction.
//!
//! Degradation rules for out-of-contract input: unknown elements and
//! elements that cannot exist in the current container are unwrapped
//! (replaced by their children, which keep being visited in the same
//! container), leaf elements missing their required attributes are removed,
//! and comments/doctypes are always removed. Nothing here returns an error;
//! only resolver callbacks can fail.
//!
//! Adjacent text is merged at construction time: every text append first
//! checks whether the previously built sibling is a text node. Because the
//! walk is strictly depth-first pre-order, "previously built" is
//! well-defined and the merge is transitive across unwrapped wrappers.

mod embed;
mod link;
mod tags;

use std::collections::HashMap;

use log::debug;
use markup5ever_rcdom::{Handle, NodeData};

use crate::error::ResolveError;
use crate::resolver::{LinkedItems, ResolverSet, RichTextElement, RichTextImage, RichTextLink};
use crate::tree::{
    BlockNode, Heading, InlineNode, LinkNode, List, ListItem, ListNode, Paragraph, Root, Span,
    SpanNode, Table, TableCell, TableNode, TableRow, TableRowNode, Text,
};

use tags::{TagKind, classify};

/// Lookup tables and callbacks threaded through the walk.
pub(crate) struct TransformContext<'a> {
    /// Image metadata by image id.
    pub(crate) images: HashMap<&'a str, &'a RichTextImage>,
    /// Link metadata by item id.
    pub(crate) links: HashMap<&'a str, &'a RichTextLink>,
    /// Linked content items by codename.
    pub(crate) linked_items: &'a LinkedItems,
    pub(crate) resolvers: &'a ResolverSet,
}

impl<'a> TransformContext<'a> {
    pub(crate) fn new(
        element: &'a RichTextElement,
        linked_items: &'a LinkedItems,
        resolvers: &'a ResolverSet,
    ) -> Self {
        Self {
            images: element
                .images
                .iter()
                .map(|image| (image.image_id.as_str(), image))
                .collect(),
            links: element
                .links
                .iter()
                .map(|link| (link.link_id.as_str(), link))
                .collect(),
            linked_items,
            resolvers,
        }
    }
}

/// Build the Structured Content Tree from the minified content root.
pub(crate) fn build_root(content: &Handle, ctx: &TransformContext) -> Result<Root, ResolveError> {
    let mut children = Vec::new();
    push_blocks(content, &mut children, ctx)?;
    Ok(Root { children })
}

/// Visit the children of `node` in a block-level container (the root, or an
/// unwrapped wrapper at root level).
fn push_blocks(
    node: &Handle,
    out: &mut Vec<BlockNode>,
    ctx: &TransformContext,
) -> Result<(), ResolveError> {
    for child in node.children.borrow().iter() {
        let NodeData::Element { name, attrs, .. } = &child.data else {
            if let NodeData::Text { .. } = &child.data {
                debug!("dropping stray text at block level");
            }
            continue;
        };
        let tag = name.local.as_ref();
        match classify(tag) {
            TagKind::Heading(level) => out.push(BlockNode::Heading(Heading {
                level,
                children: inline_children(child, ctx)?,
            })),
            TagKind::Paragraph => out.push(BlockNode::Paragraph(Paragraph {
                children: inline_children(child, ctx)?,
            })),
            TagKind::List(list_type) => {
                let mut items = Vec::new();
                push_list_items(child, &mut items, ctx)?;
                out.push(BlockNode::List(List {
                    list_type,
                    children: items,
                }));
            }
            TagKind::Table => {
                let mut rows = Vec::new();
                push_table_rows(child, &mut rows, ctx)?;
                out.push(BlockNode::Table(Table { children: rows }));
            }
            TagKind::Image => match embed::asset(&attrs.borrow(), ctx)? {
                Some(asset) => out.push(BlockNode::Asset(asset)),
                None => debug!("removing <img> without asset attributes"),
            },
            TagKind::Embed => match embed::component(&attrs.borrow(), ctx)? {
                Some(component) => out.push(BlockNode::Component(component)),
                None => debug!("removing <object> without codename"),
            },
            TagKind::LineBreak => debug!("removing <br> at block level"),
            // Wrapper tags and anything outside the allow-list expose their
            // children to this container.
            TagKind::Figure | TagKind::TableBody | TagKind::Other => {
                push_blocks(child, out, ctx)?;
            }
            // Structural/inline tags that cannot stand at block level are
            // unwrapped too; their inline content has no home here and is
            // dropped by the recursive visit.
            TagKind::ListItem
            | TagKind::TableRow
            | TagKind::TableCell
            | TagKind::Mark(_)
            | TagKind::Anchor => {
                debug!("unwrapping misplaced <{tag}> at block level");
                push_blocks(child, out, ctx)?;
            }
        }
    }
    Ok(())
}

/// Collect the inline content of a heading, paragraph, list item or cell.
fn inline_children(node: &Handle, ctx: &TransformContext) -> Result<Vec<InlineNode>, ResolveError> {
    let mut out = Vec::new();
    push_inline(node, &mut out, ctx)?;
    Ok(out)
}

fn push_inline(
    node: &Handle,
    out: &mut Vec<InlineNode>,
    ctx: &TransformContext,
) -> Result<(), ResolveError> {
    for child in node.children.borrow().iter() {
        match &child.data {
            NodeData::Text { contents } => append_inline_text(out, &contents.borrow()),
            NodeData::Element { name, attrs, .. } => {
                let tag = name.local.as_ref();
                match classify(tag) {
                    TagKind::Mark(mark) => {
                        let mut span = Span {
                            marks: vec![mark],
                            children: Vec::new(),
                        };
                        push_span(child, &mut span, ctx)?;
                        out.push(InlineNode::Span(span));
                    }
                    TagKind::Anchor => match link::build(child, &attrs.borrow(), ctx)? {
                        Some(built) => out.push(InlineNode::Link(built)),
                        None => debug!("removing <a> without link discriminant"),
                    },
                    TagKind::LineBreak => append_inline_text(out, "\n"),
                    TagKind::Image | TagKind::Embed => {
                        debug!("removing misplaced <{tag}> in inline content");
                    }
                    // Everything else, allow-listed or not, unwraps into the
                    // current inline run.
                    _ => push_inline(child, out, ctx)?,
                }
            }
            _ => {}
        }
    }
    Ok(())
}

/// Visit the children of a mark tag that collapsed into `span`.
///
/// A nested mark tag appends its mark to the span under construction and
/// keeps feeding the same span, which is exactly the outer-to-inner
/// mark-compounding rule.
fn push_span(node: &Handle, span: &mut Span, ctx: &TransformContext) -> Result<(), ResolveError> {
    for child in node.children.borrow().iter() {
        match &child.data {
            NodeData::Text { contents } => append_span_text(span, &contents.borrow()),
            NodeData::Element { name, attrs, .. } => {
                let tag = name.local.as_ref();
                match classify(tag) {
                    TagKind::Mark(mark) => {
                        span.marks.push(mark);
                        push_span(child, span, ctx)?;
                    }
                    TagKind::Anchor => match link::build(child, &attrs.borrow(), ctx)? {
                        Some(built) => span.children.push(SpanNode::Link(built)),
                        None => debug!("removing <a> without link discriminant"),
                    },
                    TagKind::LineBreak => append_span_text(span, "\n"),
                    TagKind::Image | TagKind::Embed => {
                        debug!("removing misplaced <{tag}> in inline content");
                    }
                    _ => push_span(child, span, ctx)?,
                }
            }
            _ => {}
        }
    }
    Ok(())
}

/// Visit the children of an `<a>` element.
fn push_link_children(
    node: &Handle,
    out: &mut Vec<LinkNode>,
    ctx: &TransformContext,
) -> Result<(), ResolveError> {
    for child in node.children.borrow().iter() {
        match &child.data {
            NodeData::Text { contents } => append_link_text(out, &contents.borrow()),
            NodeData::Element { name, .. } => {
                let tag = name.local.as_ref();
                match classify(tag) {
                    TagKind::Mark(mark) => {
                        let mut span = Span {
                            marks: vec![mark],
                            children: Vec::new(),
                        };
                        push_span(child, &mut span, ctx)?;
                        out.push(LinkNode::Span(span));
                    }
                    TagKind::LineBreak => append_link_text(out, "\n"),
                    TagKind::Image | TagKind::Embed => {
                        debug!("removing misplaced <{tag}> in link content");
                    }
                    // Nested anchors are out of contract; unwrap keeps their
                    // text in the enclosing link.
                    _ => push_link_children(child, out, ctx)?,
                }
            }
            _ => {}
        }
    }
    Ok(())
}

fn push_list_items(
    node: &Handle,
    out: &mut Vec<ListNode>,
    ctx: &TransformContext,
) -> Result<(), ResolveError> {
    for child in node.children.borrow().iter() {
        let NodeData::Element { name, .. } = &child.data else {
            continue;
        };
        match classify(name.local.as_ref()) {
            TagKind::ListItem => out.push(ListNode::ListItem(ListItem {
                children: inline_children(child, ctx)?,
            })),
            TagKind::Image | TagKind::Embed | TagKind::LineBreak => {
                debug!("removing misplaced <{}> in list", name.local);
            }
            _ => push_list_items(child, out, ctx)?,
        }
    }
    Ok(())
}

fn push_table_rows(
    node: &Handle,
    out: &mut Vec<TableNode>,
    ctx: &TransformContext,
) -> Result<(), ResolveError> {
    for child in node.children.borrow().iter() {
        let NodeData::Element { name, .. } = &child.data else {
            continue;
        };
        match classify(name.local.as_ref()) {
            TagKind::TableRow => {
                let mut cells = Vec::new();
                push_table_cells(child, &mut cells, ctx)?;
                out.push(TableNode::TableRow(TableRow { children: cells }));
            }
            TagKind::Image | TagKind::Embed | TagKind::LineBreak => {
                debug!("removing misplaced <{}> in table", name.local);
            }
            // tbody and any other wrapper reparent their rows directly
            // under the table.
            _ => push_table_rows(child, out, ctx)?,
        }
    }
    Ok(())
}

fn push_table_cells(
    node: &Handle,
    out: &mut Vec<TableRowNode>,
    ctx: &TransformContext,
) -> Result<(), ResolveError> {
    for child in node.children.borrow().iter() {
        let NodeData::Element { name, .. } = &child.data else {
            continue;
        };
        match classify(name.local.as_ref()) {
            TagKind::TableCell => out.push(TableRowNode::TableCell(TableCell {
                children: inline_children(child, ctx)?,
            })),
            TagKind::Image | TagKind::Embed | TagKind::LineBreak => {
                debug!("removing misplaced <{}> in table row", name.local);
            }
            _ => push_table_cells(child, out, ctx)?,
        }
    }
    Ok(())
}

fn append_inline_text(out: &mut Vec<InlineNode>, text: &str) {
    if let Some(InlineNode::Text(last)) = out.last_mut() {
        last.value.push_str(text);
    } else {
        out.push(InlineNode::Text(Text {
            value: text.to_string(),
        }));
    }
}

fn append_span_text(span: &mut Span, text: &str) {
    if let Some(SpanNode::Text(last)) = span.children.last_mut() {
        last.value.push_str(text);
    } else {
        span.children.push(SpanNode::Text(Text {
            value: text.to_string(),
        }));
    }
}

fn append_link_text(out: &mut Vec<LinkNode>, text: &str) {
    if let Some(LinkNode::Text(last)) = out.last_mut() {
        last.value.push_str(text);
    } else {
        out.push(LinkNode::Text(Text {
            value: text.to_string(),
        }));
    }
}
