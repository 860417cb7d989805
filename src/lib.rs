//! Resolves CMS rich-text HTML into a typed, serializable Structured
//! Content Tree (SCT).
//!
//! Rich-text fields arrive as a constrained HTML dialect plus per-field
//! metadata: image dimensions, link targets, and the content items the field
//! references. This crate turns that bundle into a strongly typed tree of
//! block and inline nodes — headings, paragraphs, lists, tables, assets,
//! embedded components, spans with formatting marks, and discriminated
//! links — suitable for rendering or JSON delivery.
//!
//! The resolver does not fetch anything: callers hand it the field and its
//! linked items, and may plug in up to three enrichment callbacks (asset
//! URLs, content item URLs, component payloads). Malformed rich text never
//! fails resolution; unknown tags are unwrapped and broken embeds dropped.
//!
//! ```
//! use rich_text_resolver::{LinkedItems, RichTextElement, RichTextResolver};
//!
//! let element = RichTextElement {
//!     html: "<p>Hello <strong>world</strong></p>".into(),
//!     ..Default::default()
//! };
//!
//! let resolver = RichTextResolver::new();
//! let tree = resolver.resolve(&element, &LinkedItems::new()).unwrap();
//!
//! assert_eq!(tree.children.len(), 1);
//! println!("{}", serde_json::to_string_pretty(&tree).unwrap());
//! ```

pub mod error;
pub mod resolver;
pub mod tree;

mod html;
mod transform;

pub use error::{BoxError, ResolveError};
pub use resolver::{
    AssetUrlResolver, ComponentItemResolver, ContentItem, ContentItemSystem,
    ContentItemUrlResolver, LinkedItems, ResolverSet, RichTextElement, RichTextImage,
    RichTextLink, RichTextResolver,
};
pub use tree::{
    Asset, AssetData, BlockNode, Component, ComponentData, ComponentKind, Heading, InlineNode,
    Link, LinkData, LinkNode, List, ListItem, ListNode, ListType, MarkType, Paragraph, Root, Span,
    SpanNode, Table, TableCell, TableNode, TableRow, TableRowNode, Text,
};
