use log::{debug, info, warn};

use crate::components::Component;
use crate::config::SiteConfig;
use crate::dom::{Disposer, PageContext};
use crate::error::Result;

/// All listeners and observers registered on the current page.
#[derive(Default)]
pub struct Site {
    disposers: Vec<Disposer>,
}

impl Site {
    pub fn mount(config: SiteConfig) -> Result<Self> {
        let ctx = PageContext::from_global(config)?;
        Ok(Self::mount_components(&ctx, &Component::ALL))
    }

    /// Mounts each component in order. A component that fails is logged and
    /// skipped; the others still mount.
    pub fn mount_components(ctx: &PageContext, components: &[Component]) -> Self {
        if ctx.reduced_motion {
            debug!("reduced motion preferred");
        }
        let mut site = Site::default();
        for component in components {
            match component.mount(ctx) {
                Ok(disposers) => site.disposers.extend(disposers),
                Err(err) => warn!("{} not mounted: {}", component, err),
            }
        }
        info!("site mounted with {} listeners", site.disposers.len());
        site
    }

    pub fn listener_count(&self) -> usize {
        self.disposers.len()
    }

    /// Detaches everything, in mount order.
    pub fn dispose(self) {
        for disposer in self.disposers {
            disposer.dispose();
        }
    }
}
