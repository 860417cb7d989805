//! `<img>` and `<object>` element resolution.
//!
//! Both become leaf nodes. Assets are enriched with width/height from the
//! field's image metadata and optionally a rewritten URL; embeds are
//! enriched with a resolved payload when the codename can be looked up in
//! the linked items and a component item resolver is configured.

use html5ever::Attribute;

use crate::error::ResolveError;
use crate::html;
use crate::tree::{Asset, AssetData, Component, ComponentData, ComponentKind};

use super::TransformContext;

/// Build an asset from an `<img>` element, or `None` when the element
/// carries neither a source nor an asset id and has to be removed.
pub(super) fn asset(
    attrs: &[Attribute],
    ctx: &TransformContext,
) -> Result<Option<Asset>, ResolveError> {
    let url = html::attr(attrs, "src");
    let asset_id = html::attr(attrs, "data-asset-id");
    if url.is_none() && asset_id.is_none() {
        return Ok(None);
    }

    let mut data = AssetData {
        asset_id: asset_id.unwrap_or_default(),
        image_id: html::attr(attrs, "data-image-id").unwrap_or_default(),
        url: url.unwrap_or_default(),
        description: html::attr(attrs, "alt").unwrap_or_default(),
        width: None,
        height: None,
    };

    if let Some(image) = ctx.images.get(data.image_id.as_str()) {
        data.width = image.width;
        data.height = image.height;
    }

    if let Some(resolver) = ctx.resolvers.asset_url.as_ref() {
        data.url = resolver(&data.url).map_err(|source| ResolveError::Resolver {
            resolver: "asset URL",
            source,
        })?;
    }

    Ok(Some(Asset { data }))
}

/// Build a component/item reference from an `<object>` element, or `None`
/// when the codename is missing and the element has to be removed.
pub(super) fn component(
    attrs: &[Attribute],
    ctx: &TransformContext,
) -> Result<Option<Component>, ResolveError> {
    let Some(codename) = html::attr(attrs, "data-codename") else {
        return Ok(None);
    };

    // `data-rel` is a pure discriminant: "link" marks a referenced item,
    // anything else (including absence) an inlined component.
    let kind = if html::attr(attrs, "data-rel").as_deref() == Some("link") {
        ComponentKind::Item
    } else {
        ComponentKind::Component
    };

    let mut item = None;
    if let (Some(resolver), Some(linked)) = (
        ctx.resolvers.component_item.as_ref(),
        ctx.linked_items.get(&codename),
    ) {
        item = resolver(linked).map_err(|source| ResolveError::Resolver {
            resolver: "component item",
            source,
        })?;
    }

    Ok(Some(Component {
        data: ComponentData {
            kind,
            codename,
            item,
        },
    }))
}
