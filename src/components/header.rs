use std::cell::Cell;
use std::rc::Rc;

use log::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, Window};

use crate::dom::{self, Disposer, PageContext};
use crate::error::Result;

pub const SCROLLED_CLASS: &str = "scrolled";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderState {
    Top,
    Scrolled,
}

impl HeaderState {
    pub fn from_offset(offset: f64, threshold: f64) -> Self {
        if offset > threshold {
            HeaderState::Scrolled
        } else {
            HeaderState::Top
        }
    }

    pub fn is_scrolled(self) -> bool {
        self == HeaderState::Scrolled
    }
}

/// Guard flag that lets at most one update be scheduled per animation frame.
#[derive(Debug, Default)]
pub struct FrameThrottle {
    ticking: Cell<bool>,
}

impl FrameThrottle {
    /// Returns true when the caller should schedule a frame.
    pub fn request(&self) -> bool {
        !self.ticking.replace(true)
    }

    pub fn complete(&self) {
        self.ticking.set(false);
    }
}

fn render(window: &Window, header: &Element, threshold: f64) {
    let offset = window.scroll_y().unwrap_or(0.0);
    let state = HeaderState::from_offset(offset, threshold);
    if let Err(err) = dom::set_class(header, SCROLLED_CLASS, state.is_scrolled()) {
        warn!("sticky header: {}", err);
    }
}

pub fn mount(ctx: &PageContext) -> Result<Vec<Disposer>> {
    let Some(header) = ctx.query(&ctx.config.header_selector)? else {
        debug!("sticky header: no {} on page", ctx.config.header_selector);
        return Ok(Vec::new());
    };
    let threshold = ctx.config.scroll_threshold;

    // Initial check
    render(&ctx.window, &header, threshold);

    let throttle = Rc::new(FrameThrottle::default());
    let window = ctx.window.clone();
    let listener = dom::listen(ctx.window.as_ref(), "scroll", move |_| {
        if !throttle.request() {
            return;
        }
        let (win, target, guard) = (window.clone(), header.clone(), throttle.clone());
        let frame = Closure::once_into_js(move || {
            render(&win, &target, threshold);
            guard.complete();
        });
        if let Err(err) = window.request_animation_frame(frame.unchecked_ref()) {
            warn!("sticky header: frame request failed: {:?}", err);
            throttle.complete();
        }
    })?;

    debug!("sticky header mounted");
    Ok(vec![listener])
}
