use log::Level;
use serde::Deserialize;
use wasm_bindgen::JsValue;
use web_sys::Document;

use crate::error::Result;

/// Id of the inline `<script type="application/json">` block a page can use
/// to override any of the defaults below.
pub const INLINE_CONFIG_ID: &str = "site-config";

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug  // Verbose when running a dev build locally
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

/// Selectors and tuning constants for every component.
///
/// Every key is optional when deserializing; missing keys keep the values
/// the site markup was written against.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub header_selector: String,
    /// Pixels of vertical scroll after which the header counts as scrolled.
    pub scroll_threshold: f64,

    pub nav_toggle_selector: String,
    pub nav_menu_selector: String,
    pub nav_link_selector: String,

    pub reveal_selector: String,
    pub reveal_threshold: f64,
    pub reveal_root_margin: String,

    pub count_selector: String,
    pub count_threshold: f64,
    pub count_duration_ms: u32,
    pub frame_interval_ms: u32,

    pub form_id: String,
    pub toast_id: String,
    pub toast_duration_ms: u32,

    pub faq_question_selector: String,

    pub hero_selector: String,
    pub hero_animation: String,

    pub image_selector: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            header_selector: ".header".to_string(),
            scroll_threshold: 50.0,
            nav_toggle_selector: ".nav-toggle".to_string(),
            nav_menu_selector: ".nav-menu".to_string(),
            nav_link_selector: ".nav-menu a".to_string(),
            reveal_selector: ".feature-card, .service-card, .stat".to_string(),
            reveal_threshold: 0.1,
            reveal_root_margin: "0px 0px -50px 0px".to_string(),
            count_selector: ".stat-number".to_string(),
            count_threshold: 0.5,
            count_duration_ms: 2000,
            frame_interval_ms: 16,
            form_id: "contactForm".to_string(),
            toast_id: "toast".to_string(),
            toast_duration_ms: 5000,
            faq_question_selector: ".faq-question".to_string(),
            hero_selector: ".hero-content".to_string(),
            hero_animation: "fadeInUp 1s ease-out".to_string(),
            image_selector: "img".to_string(),
        }
    }
}

impl SiteConfig {
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Decodes an object handed over from JavaScript. `undefined` and `null`
    /// mean "use the defaults".
    pub fn from_js(value: JsValue) -> Result<Self> {
        if value.is_undefined() || value.is_null() {
            return Ok(Self::default());
        }
        Ok(serde_wasm_bindgen::from_value(value)?)
    }

    /// Reads the inline config block if the page has one.
    pub fn from_document(document: &Document) -> Result<Self> {
        match document
            .get_element_by_id(INLINE_CONFIG_ID)
            .and_then(|el| el.text_content())
        {
            Some(raw) if !raw.trim().is_empty() => Self::from_json(&raw),
            _ => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_site_markup() {
        let config = SiteConfig::default();
        assert_eq!(config.scroll_threshold, 50.0);
        assert_eq!(config.count_duration_ms, 2000);
        assert_eq!(config.toast_duration_ms, 5000);
        assert_eq!(config.reveal_root_margin, "0px 0px -50px 0px");
        assert_eq!(config.form_id, "contactForm");
    }

    #[test]
    fn partial_json_keeps_remaining_defaults() {
        let config = SiteConfig::from_json(r#"{"scroll_threshold": 120, "toast_id": "notice"}"#).unwrap();
        assert_eq!(config.scroll_threshold, 120.0);
        assert_eq!(config.toast_id, "notice");
        assert_eq!(config.header_selector, ".header");
        assert_eq!(config.hero_animation, "fadeInUp 1s ease-out");
    }

    #[test]
    fn empty_object_is_default() {
        assert_eq!(SiteConfig::from_json("{}").unwrap(), SiteConfig::default());
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = SiteConfig::from_json("{ scroll_threshold: ").unwrap_err();
        assert!(matches!(err, crate::error::Error::Config(_)));
    }
}
