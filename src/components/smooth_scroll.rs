use log::{debug, warn};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, Event, HtmlAnchorElement, ScrollBehavior, ScrollToOptions};

use crate::dom::{self, Disposer, PageContext};
use crate::error::Result;

const HASH_LINK_SELECTOR: &str = "a[href^=\"#\"]";

/// What a click on an in-page anchor should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkAction {
    /// Not ours: let the browser navigate.
    Pass,
    /// Swallow the navigation but do nothing else (bare `#`).
    Suppress,
    /// Swallow the navigation and scroll to the element with this id.
    ScrollTo(String),
}

/// Classifies an anchor from its `href` attribute and its parsed `hash`.
/// Routed hashes (containing `:`) are left to the browser.
pub fn classify(href: &str, hash: &str) -> LinkAction {
    if !href.starts_with('#') || hash.contains(':') {
        return LinkAction::Pass;
    }
    match href.strip_prefix('#') {
        Some(id) if !id.is_empty() => LinkAction::ScrollTo(id.to_string()),
        _ => LinkAction::Suppress,
    }
}

/// Document offset to scroll to so the target sits right below the header.
pub fn destination(target_viewport_top: f64, page_offset: f64, header_height: f64) -> f64 {
    target_viewport_top + page_offset - header_height
}

fn hash_link(event: &Event) -> Option<HtmlAnchorElement> {
    let element = event.target()?.dyn_into::<Element>().ok()?;
    if !element.matches(HASH_LINK_SELECTOR).unwrap_or(false) {
        return None;
    }
    element.dyn_into::<HtmlAnchorElement>().ok()
}

fn scroll_to(ctx: &PageContext, href: &str, id: &str) -> Result<()> {
    let Some(target) = ctx.document.get_element_by_id(id) else {
        return Ok(());
    };

    let header_height = ctx
        .query_html(&ctx.config.header_selector)?
        .map(|header| f64::from(header.offset_height()))
        .unwrap_or(0.0);
    let top = destination(
        target.get_bounding_client_rect().top(),
        ctx.window.page_y_offset()?,
        header_height,
    );

    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    ctx.window.scroll_to_with_scroll_to_options(&options);

    // Update URL without jumping
    ctx.window
        .history()?
        .push_state_with_url(&JsValue::NULL, "", Some(href))?;
    Ok(())
}

pub fn mount(ctx: &PageContext) -> Result<Vec<Disposer>> {
    let page = ctx.clone();
    let listener = dom::listen(ctx.document.as_ref(), "click", move |event| {
        let Some(anchor) = hash_link(&event) else {
            return;
        };
        let href = anchor.get_attribute("href").unwrap_or_default();
        match classify(&href, &anchor.hash()) {
            LinkAction::Pass => {}
            LinkAction::Suppress => event.prevent_default(),
            LinkAction::ScrollTo(id) => {
                event.prevent_default();
                if let Err(err) = scroll_to(&page, &href, &id) {
                    warn!("smooth scroll to #{}: {}", id, err);
                }
            }
        }
    })?;

    debug!("smooth scroll mounted");
    Ok(vec![listener])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_hash_scrolls_to_id() {
        assert_eq!(classify("#services", "#services"), LinkAction::ScrollTo("services".to_string()));
    }

    #[test]
    fn bare_hash_is_suppressed() {
        assert_eq!(classify("#", ""), LinkAction::Suppress);
    }

    #[test]
    fn routed_hash_passes_through() {
        assert_eq!(classify("#:~:text=pricing", "#:~:text=pricing"), LinkAction::Pass);
        assert_eq!(classify("#route:detail", "#route:detail"), LinkAction::Pass);
    }

    #[test]
    fn non_hash_href_passes_through() {
        assert_eq!(classify("/about#team", "#team"), LinkAction::Pass);
    }

    #[test]
    fn destination_subtracts_header_height() {
        assert_eq!(destination(300.0, 1200.0, 80.0), 1420.0);
        assert_eq!(destination(-40.0, 500.0, 0.0), 460.0);
    }
}
