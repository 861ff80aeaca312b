use std::cell::Cell;
use std::rc::Rc;

use log::{debug, warn};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Node};

use crate::dom::{self, Disposer, PageContext};
use crate::error::Result;

pub const ACTIVE_CLASS: &str = "active";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEvent {
    ToggleClick,
    LinkClick,
    OutsideClick,
}

impl MenuState {
    pub fn next(self, event: MenuEvent) -> Self {
        match (self, event) {
            (MenuState::Closed, MenuEvent::ToggleClick) => MenuState::Open,
            (MenuState::Open, MenuEvent::ToggleClick) => MenuState::Closed,
            (_, MenuEvent::LinkClick | MenuEvent::OutsideClick) => MenuState::Closed,
        }
    }

    pub fn is_open(self) -> bool {
        self == MenuState::Open
    }

    pub fn view(self) -> MenuView {
        let open = self.is_open();
        MenuView {
            active: open,
            aria_expanded: dom::aria_bool(open),
            body_overflow: if open { "hidden" } else { "" },
        }
    }
}

/// DOM projection of a [`MenuState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuView {
    pub active: bool,
    pub aria_expanded: &'static str,
    pub body_overflow: &'static str,
}

#[derive(Clone)]
struct Menu {
    toggle: Element,
    panel: Element,
    document: Document,
    state: Rc<Cell<MenuState>>,
}

impl Menu {
    fn apply(&self, event: MenuEvent) {
        let next = self.state.get().next(event);
        self.state.set(next);
        if let Err(err) = self.render(next.view()) {
            warn!("mobile menu: {}", err);
        }
    }

    fn render(&self, view: MenuView) -> Result<()> {
        dom::set_class(&self.toggle, ACTIVE_CLASS, view.active)?;
        dom::set_class(&self.panel, ACTIVE_CLASS, view.active)?;
        self.toggle.set_attribute("aria-expanded", view.aria_expanded)?;
        if let Some(body) = self.document.body() {
            body.style().set_property("overflow", view.body_overflow)?;
        }
        Ok(())
    }

    fn contains(&self, target: Option<&Node>) -> bool {
        self.toggle.contains(target) || self.panel.contains(target)
    }
}

pub fn mount(ctx: &PageContext) -> Result<Vec<Disposer>> {
    let config = &ctx.config;
    let (Some(toggle), Some(panel)) = (
        ctx.query(&config.nav_toggle_selector)?,
        ctx.query(&config.nav_menu_selector)?,
    ) else {
        debug!("mobile menu: toggle or menu missing");
        return Ok(Vec::new());
    };

    let menu = Menu {
        toggle,
        panel,
        document: ctx.document.clone(),
        state: Rc::new(Cell::new(MenuState::Closed)),
    };
    let mut disposers = Vec::new();

    let on_toggle = menu.clone();
    disposers.push(dom::listen(menu.toggle.as_ref(), "click", move |_| {
        on_toggle.apply(MenuEvent::ToggleClick);
    })?);

    // Close menu when clicking on links
    for link in ctx.query_all(&config.nav_link_selector)? {
        let on_link = menu.clone();
        disposers.push(dom::listen(link.as_ref(), "click", move |_| {
            on_link.apply(MenuEvent::LinkClick);
        })?);
    }

    // Close menu when clicking outside
    let outside = menu.clone();
    disposers.push(dom::listen(ctx.document.as_ref(), "click", move |event| {
        if !outside.state.get().is_open() {
            return;
        }
        let target = event.target().and_then(|t| t.dyn_into::<Node>().ok());
        if !outside.contains(target.as_ref()) {
            outside.apply(MenuEvent::OutsideClick);
        }
    })?);

    debug!("mobile menu mounted");
    Ok(disposers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_closed() {
        assert_eq!(MenuState::default(), MenuState::Closed);
        assert_eq!(MenuState::default().view().aria_expanded, "false");
    }

    #[test]
    fn even_toggles_return_to_closed() {
        for clicks in [2, 4, 10] {
            let state = (0..clicks).fold(MenuState::Closed, |s, _| s.next(MenuEvent::ToggleClick));
            assert_eq!(state, MenuState::Closed);
            assert_eq!(state.view().aria_expanded, "false");
        }
        let odd = (0..3).fold(MenuState::Closed, |s, _| s.next(MenuEvent::ToggleClick));
        assert_eq!(odd, MenuState::Open);
    }

    #[test]
    fn link_click_always_closes() {
        assert_eq!(MenuState::Open.next(MenuEvent::LinkClick), MenuState::Closed);
        assert_eq!(MenuState::Closed.next(MenuEvent::LinkClick), MenuState::Closed);
    }

    #[test]
    fn outside_click_closes() {
        assert_eq!(MenuState::Open.next(MenuEvent::OutsideClick), MenuState::Closed);
    }

    #[test]
    fn open_view_locks_scroll() {
        let view = MenuState::Open.view();
        assert!(view.active);
        assert_eq!(view.aria_expanded, "true");
        assert_eq!(view.body_overflow, "hidden");

        let closed = MenuState::Closed.view();
        assert!(!closed.active);
        assert_eq!(closed.body_overflow, "");
    }
}
