//! Thin helpers over web-sys shared by the components.
//!
//! Listeners and observers are handed back as [`Disposer`]s: dropping one (or
//! calling [`Disposer::dispose`]) detaches whatever it guards.

use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Array;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, Window,
};

use crate::config::SiteConfig;
use crate::error::{Error, Result};

const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

/// Runs its callback exactly once, either on `dispose()` or on drop.
#[must_use = "dropping a Disposer immediately detaches what it guards"]
pub struct Disposer(Option<Box<dyn FnOnce()>>);

impl Disposer {
    pub fn new(f: impl FnOnce() + 'static) -> Self {
        Disposer(Some(Box::new(f)))
    }

    pub fn dispose(mut self) {
        self.run();
    }

    fn run(&mut self) {
        if let Some(f) = self.0.take() {
            f();
        }
    }
}

impl Drop for Disposer {
    fn drop(&mut self) {
        self.run();
    }
}

/// Everything a component needs to mount on the current page.
#[derive(Clone)]
pub struct PageContext {
    pub window: Window,
    pub document: Document,
    pub config: Rc<SiteConfig>,
    pub reduced_motion: bool,
}

impl PageContext {
    pub fn from_global(config: SiteConfig) -> Result<Self> {
        let window = web_sys::window().ok_or(Error::NoWindow)?;
        let document = window.document().ok_or(Error::NoDocument)?;
        let reduced_motion = prefers_reduced_motion(&window);
        Ok(Self {
            window,
            document,
            config: Rc::new(config),
            reduced_motion,
        })
    }

    pub fn query(&self, selector: &str) -> Result<Option<Element>> {
        Ok(self.document.query_selector(selector)?)
    }

    pub fn query_html(&self, selector: &str) -> Result<Option<HtmlElement>> {
        Ok(self
            .query(selector)?
            .and_then(|el| el.dyn_into::<HtmlElement>().ok()))
    }

    pub fn query_all(&self, selector: &str) -> Result<Vec<Element>> {
        let list = self.document.query_selector_all(selector)?;
        Ok((0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect())
    }
}

pub fn prefers_reduced_motion(window: &Window) -> bool {
    matches!(window.match_media(REDUCED_MOTION_QUERY), Ok(Some(list)) if list.matches())
}

/// Registers `handler` for `event` on `target`; the returned disposer removes it.
pub fn listen<F>(target: &EventTarget, event: &'static str, handler: F) -> Result<Disposer>
where
    F: FnMut(Event) + 'static,
{
    let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;

    let target = target.clone();
    Ok(Disposer::new(move || {
        if let Err(err) = target.remove_event_listener_with_callback(event, callback.as_ref().unchecked_ref()) {
            log::warn!("failed to remove {} listener: {:?}", event, err);
        }
        drop(callback);
    }))
}

/// Watches `elements` for viewport intersection. `on_entry` receives every
/// entry together with the observer so it can unobserve one-shot targets.
/// The returned disposer disconnects the observer.
pub fn observe<F>(
    elements: &[Element],
    threshold: f64,
    root_margin: Option<&str>,
    mut on_entry: F,
) -> Result<Disposer>
where
    F: FnMut(&IntersectionObserverEntry, &IntersectionObserver) + 'static,
{
    let callback = Closure::wrap(Box::new(move |entries: Array, observer: IntersectionObserver| {
        for entry in entries.iter() {
            if let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() {
                on_entry(&entry, &observer);
            }
        }
    }) as Box<dyn FnMut(Array, IntersectionObserver)>);

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(threshold));
    if let Some(margin) = root_margin {
        options.set_root_margin(margin);
    }
    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    for element in elements {
        observer.observe(element);
    }

    Ok(Disposer::new(move || {
        observer.disconnect();
        drop(callback);
    }))
}

/// Adds or removes `class` so that its presence equals `on`.
pub fn set_class(element: &Element, class: &str, on: bool) -> Result<()> {
    let list = element.class_list();
    if on {
        list.add_1(class)?;
    } else {
        list.remove_1(class)?;
    }
    Ok(())
}

pub fn aria_bool(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn disposer_runs_once_on_dispose() {
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let disposer = Disposer::new(move || counter.set(counter.get() + 1));
        disposer.dispose();
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn disposer_runs_on_drop() {
        let calls = Rc::new(Cell::new(0));
        {
            let counter = calls.clone();
            let _disposer = Disposer::new(move || counter.set(counter.get() + 1));
        }
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn aria_bool_strings() {
        assert_eq!(aria_bool(true), "true");
        assert_eq!(aria_bool(false), "false");
    }
}
