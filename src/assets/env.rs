//! Capabilities handed to bundles during registration

use crate::assets::BundleRegistry;
use crate::context::RenderContext;
use crate::error::Result;
use crate::renderer::AssetRenderer;
use crate::types::{Params, Section};

/// Renderer plus bundle registry
///
/// Passed explicitly into [`AssetBundle::register`](crate::bundle::AssetBundle::register)
/// so bundles never reach for global services.
#[derive(Clone)]
pub struct AssetEnv {
    renderer: AssetRenderer,
    registry: BundleRegistry,
}

impl AssetEnv {
    pub fn new(renderer: AssetRenderer, registry: BundleRegistry) -> Self {
        Self { renderer, registry }
    }

    pub fn renderer(&self) -> &AssetRenderer {
        &self.renderer
    }

    pub fn registry(&self) -> &BundleRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut BundleRegistry {
        &mut self.registry
    }

    /// Resolve `id` and register it into `context`
    pub fn register(&self, context: &mut RenderContext, id: &str, params: &Params) -> Result<()> {
        let bundle = self.registry.resolve(id)?;
        bundle.register(context, self, params)
    }

    /// Register several bundles into a fresh context and return it
    pub fn render_page<'a, I>(&self, ids: I) -> Result<RenderContext>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut context = RenderContext::new();
        let params = Params::new();

        for id in ids {
            self.register(&mut context, id, &params)?;
        }

        log::debug!(
            "Rendered page with {} bundles ({} head bytes)",
            context.ledger().len(),
            context.section(Section::Head).len()
        );
        Ok(context)
    }
}
