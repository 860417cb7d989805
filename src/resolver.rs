//! The public entry point: rich-text field in, Structured Content Tree out.
//!
//! A [`RichTextResolver`] holds an optional set of enrichment callbacks and
//! resolves one field per call: parse → minify → transform → normalize.
//! `resolve` is a pure function of its inputs; nothing is retained between
//! calls, so independent resolutions may run concurrently without
//! coordination.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{BoxError, ResolveError};
use crate::html;
use crate::transform::{self, TransformContext};
use crate::tree::{BlockNode, InlineNode, Root};

/// A rich-text field value with its attached per-field metadata, as
/// delivered by the CMS alongside the HTML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RichTextElement {
    /// The rich-text HTML dialect produced by the CMS editor.
    pub html: String,
    /// Image metadata for assets embedded in this field.
    #[serde(default)]
    pub images: Vec<RichTextImage>,
    /// Link metadata for content item links in this field.
    #[serde(default)]
    pub links: Vec<RichTextLink>,
}

/// Image metadata attached to a rich-text field, keyed by image id during
/// transformation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RichTextImage {
    pub image_id: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub description: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// Link metadata attached to a rich-text field, keyed by the linked item id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RichTextLink {
    pub link_id: String,
    pub codename: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub url_slug: String,
}

/// Content items referenced by a rich-text field, keyed by codename.
pub type LinkedItems = HashMap<String, ContentItem>;

/// A linked content item. Opaque to the core beyond its `system` shape;
/// `elements` is carried only for caller-supplied resolvers to inspect.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub system: ContentItemSystem,
    #[serde(default)]
    pub elements: serde_json::Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentItemSystem {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub codename: String,
    #[serde(rename = "type")]
    pub item_type: String,
}

/// Rewrites an asset URL (CDN rewrites, image transformation parameters).
pub type AssetUrlResolver = Box<dyn Fn(&str) -> Result<String, BoxError> + Send + Sync>;

/// Produces the site URL for a linked content item, or `None` when the item
/// kind has no route.
pub type ContentItemUrlResolver =
    Box<dyn Fn(&ContentItem) -> Result<Option<String>, BoxError> + Send + Sync>;

/// Produces the opaque payload stored on component nodes, or `None` when
/// the item kind is not handled.
pub type ComponentItemResolver =
    Box<dyn Fn(&ContentItem) -> Result<Option<serde_json::Value>, BoxError> + Send + Sync>;

/// Optional enrichment callbacks. Each one is independently optional;
/// leaving one out skips that enrichment entirely (the affected fields stay
/// unset, they are never defaulted).
#[derive(Default)]
pub struct ResolverSet {
    pub asset_url: Option<AssetUrlResolver>,
    pub content_item_url: Option<ContentItemUrlResolver>,
    pub component_item: Option<ComponentItemResolver>,
}

impl ResolverSet {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_asset_url(
        mut self,
        resolver: impl Fn(&str) -> Result<String, BoxError> + Send + Sync + 'static,
    ) -> Self {
        self.asset_url = Some(Box::new(resolver));
        self
    }

    #[must_use]
    pub fn with_content_item_url(
        mut self,
        resolver: impl Fn(&ContentItem) -> Result<Option<String>, BoxError> + Send + Sync + 'static,
    ) -> Self {
        self.content_item_url = Some(Box::new(resolver));
        self
    }

    #[must_use]
    pub fn with_component_item(
        mut self,
        resolver: impl Fn(&ContentItem) -> Result<Option<serde_json::Value>, BoxError>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        self.component_item = Some(Box::new(resolver));
        self
    }
}

/// Resolves rich-text fields into Structured Content Trees.
#[derive(Default)]
pub struct RichTextResolver {
    resolvers: ResolverSet,
}

impl RichTextResolver {
    /// A resolver without enrichment callbacks.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resolvers(resolvers: ResolverSet) -> Self {
        Self { resolvers }
    }

    /// Resolve one rich-text field.
    ///
    /// Malformed rich text degrades to a smaller tree; the only error is a
    /// failing caller-supplied resolver callback, propagated unchanged.
    pub fn resolve(
        &self,
        element: &RichTextElement,
        linked_items: &LinkedItems,
    ) -> Result<Root, ResolveError> {
        let dom = html::parse(&element.html);
        let content = html::content_root(&dom);
        html::minify_whitespace(&content);

        let ctx = TransformContext::new(element, linked_items, &self.resolvers);
        let mut root = transform::build_root(&content, &ctx)?;
        normalize_empty(&mut root);
        Ok(root)
    }
}

/// Collapse the CMS "no content" sentinel to an empty root.
///
/// The editor stores an empty field as a single paragraph containing only a
/// line break, which transforms into one block with one `Text("\n")` child.
/// Both that shape and an already-empty root normalize to zero children, so
/// the one-paragraph-with-linebreak shape never escapes.
fn normalize_empty(root: &mut Root) {
    if is_sentinel_empty(root) {
        root.children.clear();
    }
}

fn is_sentinel_empty(root: &Root) -> bool {
    let [only] = root.children.as_slice() else {
        return root.children.is_empty();
    };
    let inline = match only {
        BlockNode::Paragraph(p) => &p.children,
        BlockNode::Heading(h) => &h.children,
        _ => return false,
    };
    matches!(inline.as_slice(), [InlineNode::Text(text)] if text.value == "\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{Paragraph, Text};

    fn paragraph_root(value: &str) -> Root {
        Root {
            children: vec![BlockNode::Paragraph(Paragraph {
                children: vec![InlineNode::Text(Text {
                    value: value.into(),
                })],
            })],
        }
    }

    #[test]
    fn sentinel_paragraph_collapses() {
        let mut root = paragraph_root("\n");
        normalize_empty(&mut root);
        assert!(root.children.is_empty());
    }

    #[test]
    fn empty_root_stays_empty() {
        let mut root = Root::default();
        normalize_empty(&mut root);
        assert!(root.children.is_empty());
    }

    #[test]
    fn content_is_not_collapsed() {
        let mut root = paragraph_root("x");
        normalize_empty(&mut root);
        assert_eq!(root.children.len(), 1);

        let mut root = paragraph_root("\n\n");
        normalize_empty(&mut root);
        assert_eq!(root.children.len(), 1);
    }

    #[test]
    fn two_blocks_are_not_collapsed() {
        let mut root = paragraph_root("\n");
        root.children.push(BlockNode::Paragraph(Paragraph {
            children: vec![],
        }));
        normalize_empty(&mut root);
        assert_eq!(root.children.len(), 2);
    }
}
