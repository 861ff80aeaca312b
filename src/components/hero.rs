use log::debug;

use crate::dom::{Disposer, PageContext};
use crate::error::Result;

/// Animation to apply to the hero block, if any.
pub fn entrance(animation: &str, reduced_motion: bool) -> Option<&str> {
    (!reduced_motion && !animation.is_empty()).then_some(animation)
}

/// One-shot: nothing to tear down afterwards.
pub fn mount(ctx: &PageContext) -> Result<Vec<Disposer>> {
    let Some(animation) = entrance(&ctx.config.hero_animation, ctx.reduced_motion) else {
        return Ok(Vec::new());
    };
    if let Some(hero) = ctx.query_html(&ctx.config.hero_selector)? {
        hero.style().set_property("animation", animation)?;
        debug!("hero animation applied");
    }
    Ok(Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skipped_under_reduced_motion() {
        assert_eq!(entrance("fadeInUp 1s ease-out", true), None);
    }

    #[test]
    fn applied_otherwise() {
        assert_eq!(entrance("fadeInUp 1s ease-out", false), Some("fadeInUp 1s ease-out"));
        assert_eq!(entrance("", false), None);
    }
}
