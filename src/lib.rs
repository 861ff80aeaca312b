//! Interactive polish for the NELSA marketing pages: sticky header, smooth
//! in-page scrolling, mobile navigation, reveal and count-up animations,
//! contact form validation with toasts, FAQ accordion, hero entrance and
//! broken-image fallback.
//!
//! The binary entry point mounts everything on page load. The same
//! components are exported to JavaScript through [`mount_site`] and
//! [`mount_component`].

pub mod components;
pub mod config;
pub mod dom;
pub mod error;
pub mod site;

use wasm_bindgen::prelude::*;

use components::Component;
use config::SiteConfig;
use dom::PageContext;
use site::Site;

/// Sets up the panic hook and console logger. Safe to call more than once.
pub fn init_logging() {
    console_error_panic_hook::set_once();
    // Errors only when a logger is already installed.
    let _ = console_log::init_with_level(config::log_level());
}

/// Handle returned to JavaScript; `dispose()` removes every listener it owns.
#[wasm_bindgen]
pub struct SiteHandle {
    site: Option<Site>,
}

#[wasm_bindgen]
impl SiteHandle {
    #[wasm_bindgen(getter, js_name = listenerCount)]
    pub fn listener_count(&self) -> usize {
        self.site.as_ref().map_or(0, Site::listener_count)
    }

    pub fn dispose(&mut self) {
        if let Some(site) = self.site.take() {
            site.dispose();
        }
    }
}

impl From<Site> for SiteHandle {
    fn from(site: Site) -> Self {
        Self { site: Some(site) }
    }
}

#[wasm_bindgen(js_name = mountSite)]
pub fn mount_site(config: JsValue) -> Result<SiteHandle, JsValue> {
    init_logging();
    let site = Site::mount(SiteConfig::from_js(config)?)?;
    Ok(site.into())
}

#[wasm_bindgen(js_name = mountComponent)]
pub fn mount_component(name: &str, config: JsValue) -> Result<SiteHandle, JsValue> {
    init_logging();
    let component: Component = name.parse()?;
    let ctx = PageContext::from_global(SiteConfig::from_js(config)?)?;
    Ok(Site::mount_components(&ctx, &[component]).into())
}
