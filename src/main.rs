use log::{info, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::Document;

use nelsa_site::config::SiteConfig;
use nelsa_site::init_logging;
use nelsa_site::site::Site;

fn start(document: &Document) {
    let config = SiteConfig::from_document(document).unwrap_or_else(|err| {
        warn!("ignoring inline config: {}", err);
        SiteConfig::default()
    });
    match Site::mount(config) {
        // Listeners live for the whole page view.
        Ok(site) => std::mem::forget(site),
        Err(err) => warn!("site not mounted: {}", err),
    }
}

fn main() {
    // Initialize console error panic hook and logging
    init_logging();

    info!("Starting site scripts");
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        warn!("no document, nothing to enhance");
        return;
    };

    if document.ready_state() != "loading" {
        start(&document);
        return;
    }
    let doc = document.clone();
    let on_ready = Closure::once_into_js(move || start(&doc));
    if let Err(err) = document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref()) {
        warn!("could not wait for DOMContentLoaded: {:?}", err);
    }
}
