//! The Structured Content Tree (SCT) node types.
//!
//! This is the output model of rich-text resolution: an ordered, rooted tree
//! whose root holds block-level nodes and whose inline content is expressed
//! as spans with mark lists instead of nested formatting markup.
//!
//! Containment is encoded in the types themselves. Each container owns a
//! vector of a dedicated child enum, so an invalid shape (a paragraph inside
//! a span, a list item at the root) is unrepresentable rather than merely
//! discouraged. Every node and every `LinkData` variant serializes with a
//! `type` discriminant, matching the wire shape consumed by presentation
//! layers.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

/// Root of a resolved rich-text field.
///
/// Either holds at least one block-level node, or exactly zero children (the
/// canonical representation of an empty field, see
/// [`crate::resolver::RichTextResolver::resolve`]).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Root {
    pub children: Vec<BlockNode>,
}

impl Serialize for Root {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut root = serializer.serialize_struct("Root", 2)?;
        root.serialize_field("type", "root")?;
        root.serialize_field("children", &self.children)?;
        root.end()
    }
}

/// A node that may appear directly under the root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BlockNode {
    Heading(Heading),
    Paragraph(Paragraph),
    List(List),
    Table(Table),
    Asset(Asset),
    Component(Component),
}

/// Heading block, `level` in `1..=6`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heading {
    pub level: u8,
    pub children: Vec<InlineNode>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    pub children: Vec<InlineNode>,
}

/// Ordered or unordered list; contains list items only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct List {
    pub list_type: ListType,
    pub children: Vec<ListNode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListType {
    Ordered,
    Unordered,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ListNode {
    ListItem(ListItem),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    pub children: Vec<InlineNode>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub children: Vec<TableNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TableNode {
    TableRow(TableRow),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    pub children: Vec<TableRowNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TableRowNode {
    TableCell(TableCell),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableCell {
    pub children: Vec<InlineNode>,
}

/// A node that may appear inside headings, paragraphs, list items and table
/// cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum InlineNode {
    Span(Span),
    Link(Link),
    Text(Text),
}

/// Inline run with formatting marks.
///
/// `marks` lists the collapsed formatting tags in outer-to-inner order, so
/// `<strong><em>x</em></strong>` yields one span with
/// `[MarkType::Strong, MarkType::Emphasis]` rather than two nested spans.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub marks: Vec<MarkType>,
    pub children: Vec<SpanNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SpanNode {
    Link(Link),
    Text(Text),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkType {
    Strong,
    Emphasis,
    Superscript,
    Subscript,
    Code,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub data: LinkData,
    pub children: Vec<LinkNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum LinkNode {
    Span(Span),
    Text(Text),
}

/// Discriminated link payload.
///
/// The optional `internal` fields are enrichment: codename/type/slug come
/// from the field's link metadata, `item_url` from a caller-supplied content
/// item URL resolver. Absent enrichment stays absent; it is never defaulted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum LinkData {
    #[serde(rename_all = "camelCase")]
    Internal {
        item_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        item_codename: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        item_type: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        item_url_slug: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        item_url: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    External {
        url: String,
        title: String,
        open_in_new_window: bool,
    },
    Email {
        email: String,
        subject: String,
    },
    Phone {
        phone: String,
    },
    #[serde(rename_all = "camelCase")]
    Asset {
        asset_id: String,
        url: String,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub value: String,
}

/// Image asset embedded in rich text. Leaf node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub data: AssetData,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetData {
    pub asset_id: String,
    pub image_id: String,
    pub url: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

/// Embedded content reference. Leaf node.
///
/// `kind` distinguishes inlined components from merely linked items; `item`
/// is the opaque payload produced by a caller-supplied component item
/// resolver, when one was configured and the codename could be looked up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub data: ComponentData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentData {
    #[serde(rename = "type")]
    pub kind: ComponentKind,
    pub codename: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    Component,
    Item,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn root_serializes_with_type_tag() {
        let root = Root {
            children: vec![BlockNode::Paragraph(Paragraph {
                children: vec![InlineNode::Text(Text { value: "x".into() })],
            })],
        };
        let value = serde_json::to_value(&root).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "root",
                "children": [{
                    "type": "paragraph",
                    "children": [{ "type": "text", "value": "x" }],
                }],
            })
        );
    }

    #[test]
    fn span_marks_serialize_lowercase() {
        let span = Span {
            marks: vec![MarkType::Strong, MarkType::Superscript],
            children: vec![SpanNode::Text(Text { value: "x".into() })],
        };
        let value = serde_json::to_value(InlineNode::Span(span)).unwrap();
        assert_eq!(value["type"], "span");
        assert_eq!(value["marks"], json!(["strong", "superscript"]));
    }

    #[test]
    fn internal_link_omits_absent_enrichment() {
        let data = LinkData::Internal {
            item_id: "t1".into(),
            item_codename: None,
            item_type: None,
            item_url_slug: None,
            item_url: None,
        };
        let value = serde_json::to_value(&data).unwrap();
        assert_eq!(value, json!({ "type": "internal", "itemId": "t1" }));
    }

    #[test]
    fn list_items_carry_type_tags() {
        let list = List {
            list_type: ListType::Ordered,
            children: vec![ListNode::ListItem(ListItem { children: vec![] })],
        };
        let value = serde_json::to_value(BlockNode::List(list)).unwrap();
        assert_eq!(value["listType"], "ordered");
        assert_eq!(value["children"][0]["type"], "listItem");
    }

    #[test]
    fn component_data_kind_serializes_as_type() {
        let component = Component {
            data: ComponentData {
                kind: ComponentKind::Item,
                codename: "product".into(),
                item: None,
            },
        };
        let value = serde_json::to_value(BlockNode::Component(component)).unwrap();
        assert_eq!(value["type"], "component");
        assert_eq!(value["data"], json!({ "type": "item", "codename": "product" }));
    }
}
