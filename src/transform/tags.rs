//! Tag classification for the rich-text dialect.
//!
//! The CMS allows a fixed set of HTML5 elements inside rich text; everything
//! else is unwrapped during transformation. Classification is a closed match
//! so adding a tag forces a decision in every container builder.

use crate::tree::{ListType, MarkType};

/// Transform behavior of a rich-text element tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TagKind {
    Heading(u8),
    Paragraph,
    List(ListType),
    ListItem,
    Table,
    /// Pure HTML wrapper inside tables; always unwrapped.
    TableBody,
    TableRow,
    TableCell,
    /// Pure HTML wrapper around image assets; always unwrapped.
    Figure,
    /// `<img>`: becomes an asset leaf.
    Image,
    /// `<object>`: becomes a component/item reference leaf.
    Embed,
    Mark(MarkType),
    Anchor,
    LineBreak,
    /// Not in the allow-list; replaced by its children.
    Other,
}

pub(crate) fn classify(tag: &str) -> TagKind {
    match tag {
        "h1" => TagKind::Heading(1),
        "h2" => TagKind::Heading(2),
        "h3" => TagKind::Heading(3),
        "h4" => TagKind::Heading(4),
        "h5" => TagKind::Heading(5),
        "h6" => TagKind::Heading(6),
        "p" => TagKind::Paragraph,
        "ol" => TagKind::List(ListType::Ordered),
        "ul" => TagKind::List(ListType::Unordered),
        "li" => TagKind::ListItem,
        "table" => TagKind::Table,
        "tbody" => TagKind::TableBody,
        "tr" => TagKind::TableRow,
        "td" => TagKind::TableCell,
        "figure" => TagKind::Figure,
        "img" => TagKind::Image,
        "object" => TagKind::Embed,
        "strong" => TagKind::Mark(MarkType::Strong),
        "em" => TagKind::Mark(MarkType::Emphasis),
        "sup" => TagKind::Mark(MarkType::Superscript),
        "sub" => TagKind::Mark(MarkType::Subscript),
        "code" => TagKind::Mark(MarkType::Code),
        "a" => TagKind::Anchor,
        "br" => TagKind::LineBreak,
        _ => TagKind::Other,
    }
}
