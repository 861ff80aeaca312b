use log::{debug, warn};
use wasm_bindgen::JsCast;
use web_sys::HtmlImageElement;

use crate::dom::{self, Disposer, PageContext};
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageLoad {
    Loaded,
    Failed,
}

impl ImageLoad {
    /// Outcome of an image that may have settled before we got to it.
    /// A finished image with no intrinsic width failed; `None` means it is
    /// still loading and its `error` event is yet to come.
    pub fn from_settled(complete: bool, natural_width: u32) -> Option<Self> {
        match (complete, natural_width) {
            (false, _) => None,
            (true, 0) => Some(ImageLoad::Failed),
            (true, _) => Some(ImageLoad::Loaded),
        }
    }
}

/// `display` value to force for an image after it settles; `None` leaves it alone.
pub fn display_override(load: ImageLoad) -> Option<&'static str> {
    match load {
        ImageLoad::Failed => Some("none"),
        ImageLoad::Loaded => None,
    }
}

fn settle(image: &HtmlImageElement, load: ImageLoad) {
    if let Some(display) = display_override(load) {
        if let Err(err) = image.style().set_property("display", display) {
            warn!("image fallback: {:?}", err);
        }
    }
}

pub fn mount(ctx: &PageContext) -> Result<Vec<Disposer>> {
    let images: Vec<HtmlImageElement> = ctx
        .query_all(&ctx.config.image_selector)?
        .into_iter()
        .filter_map(|el| el.dyn_into::<HtmlImageElement>().ok())
        .collect();

    let mut disposers = Vec::with_capacity(images.len());
    for image in images {
        // Images that failed before the module started never fire `error` again.
        // An image without a source is complete but never failed.
        if !image.current_src().is_empty() {
            if let Some(load) = ImageLoad::from_settled(image.complete(), image.natural_width()) {
                settle(&image, load);
                continue;
            }
        }
        let target = image.clone();
        disposers.push(dom::listen(image.as_ref(), "error", move |_| {
            settle(&target, ImageLoad::Failed);
        })?);
    }
    debug!("image fallback watching {} images", disposers.len());
    Ok(disposers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_images_are_hidden() {
        assert_eq!(display_override(ImageLoad::Failed), Some("none"));
    }

    #[test]
    fn settled_images_are_classified() {
        assert_eq!(ImageLoad::from_settled(true, 0), Some(ImageLoad::Failed));
        assert_eq!(ImageLoad::from_settled(true, 640), Some(ImageLoad::Loaded));
        assert_eq!(ImageLoad::from_settled(false, 0), None);
        assert_eq!(ImageLoad::from_settled(false, 640), None);
    }

    #[test]
    fn failed_before_mount_is_hidden() {
        let load = ImageLoad::from_settled(true, 0).unwrap();
        assert_eq!(display_override(load), Some("none"));
    }

    #[test]
    fn loaded_images_are_untouched() {
        assert_eq!(display_override(ImageLoad::Loaded), None);
    }
}
