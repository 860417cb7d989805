//! `<a>` element resolution.
//!
//! Classifies a link by strict attribute precedence: item id, then asset id,
//! then email address, then phone number, then plain `href`. A link with no
//! usable discriminant is removed together with its subtree.

use html5ever::Attribute;
use markup5ever_rcdom::Handle;

use crate::error::ResolveError;
use crate::html;
use crate::tree::{Link, LinkData};

use super::TransformContext;

pub(super) fn build(
    node: &Handle,
    attrs: &[Attribute],
    ctx: &TransformContext,
) -> Result<Option<Link>, ResolveError> {
    let Some(data) = link_data(attrs, ctx)? else {
        return Ok(None);
    };
    let mut children = Vec::new();
    super::push_link_children(node, &mut children, ctx)?;
    Ok(Some(Link { data, children }))
}

fn link_data(attrs: &[Attribute], ctx: &TransformContext) -> Result<Option<LinkData>, ResolveError> {
    if let Some(item_id) = html::attr(attrs, "data-item-id") {
        return Ok(Some(internal_link(item_id, ctx)?));
    }
    if let Some(asset_id) = html::attr(attrs, "data-asset-id") {
        return Ok(Some(LinkData::Asset {
            asset_id,
            url: html::attr(attrs, "href").unwrap_or_default(),
        }));
    }
    if let Some(email) = html::attr(attrs, "data-email-address") {
        return Ok(Some(LinkData::Email {
            email,
            subject: html::attr(attrs, "data-email-subject").unwrap_or_default(),
        }));
    }
    if let Some(phone) = html::attr(attrs, "data-phone-number") {
        return Ok(Some(LinkData::Phone { phone }));
    }
    if let Some(url) = html::attr(attrs, "href") {
        return Ok(Some(LinkData::External {
            url,
            title: html::attr(attrs, "title").unwrap_or_default(),
            open_in_new_window: html::attr(attrs, "data-new-window").as_deref() == Some("true"),
        }));
    }
    Ok(None)
}

/// Internal links are enriched from the field's link metadata, and, when a
/// content item URL resolver is configured and the linked item is known,
/// with a resolved URL.
fn internal_link(item_id: String, ctx: &TransformContext) -> Result<LinkData, ResolveError> {
    let meta = ctx.links.get(item_id.as_str()).copied();

    let mut item_url = None;
    if let (Some(meta), Some(resolver)) = (meta, ctx.resolvers.content_item_url.as_ref()) {
        if let Some(item) = ctx.linked_items.get(&meta.codename) {
            item_url = resolver(item).map_err(|source| ResolveError::Resolver {
                resolver: "content item URL",
                source,
            })?;
        }
    }

    Ok(LinkData::Internal {
        item_id,
        item_codename: meta.map(|m| m.codename.clone()),
        item_type: meta.map(|m| m.item_type.clone()),
        item_url_slug: meta.map(|m| m.url_slug.clone()),
        item_url,
    })
}
