use log::{debug, warn};

use crate::dom::{self, Disposer, PageContext};
use crate::error::Result;

pub const REVEALED_CLASS: &str = "revealed";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RevealState {
    #[default]
    Pending,
    Revealed,
}

/// What the observer does with one intersection entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealStep {
    /// Not visible yet; keep observing.
    Wait,
    /// Add the class and stop observing.
    Reveal,
    /// Already revealed; stop observing without touching the class.
    Release,
}

impl RevealState {
    /// The `revealed` class is the per-element source of truth.
    pub fn from_class(has_revealed_class: bool) -> Self {
        if has_revealed_class {
            RevealState::Revealed
        } else {
            RevealState::Pending
        }
    }

    /// One-shot: a revealed element is never un-revealed or revealed again.
    pub fn step(self, is_intersecting: bool) -> RevealStep {
        match self {
            RevealState::Revealed => RevealStep::Release,
            RevealState::Pending if is_intersecting => RevealStep::Reveal,
            RevealState::Pending => RevealStep::Wait,
        }
    }
}

pub fn mount(ctx: &PageContext) -> Result<Vec<Disposer>> {
    if ctx.reduced_motion {
        debug!("reveal: reduced motion preferred, skipping");
        return Ok(Vec::new());
    }
    let elements = ctx.query_all(&ctx.config.reveal_selector)?;
    if elements.is_empty() {
        return Ok(Vec::new());
    }

    let observer = dom::observe(
        &elements,
        ctx.config.reveal_threshold,
        Some(&ctx.config.reveal_root_margin),
        |entry, observer| {
            let target = entry.target();
            let state = RevealState::from_class(target.class_list().contains(REVEALED_CLASS));
            match state.step(entry.is_intersecting()) {
                RevealStep::Wait => {}
                RevealStep::Reveal => {
                    if let Err(err) = target.class_list().add_1(REVEALED_CLASS) {
                        warn!("reveal: {:?}", err);
                    }
                    observer.unobserve(&target);
                }
                RevealStep::Release => observer.unobserve(&target),
            }
        },
    )?;

    debug!("reveal observing {} elements", elements.len());
    Ok(vec![observer])
}
