//! Markup primitives used while assembling bundle sections

use crate::asset::MetaTag;
use crate::error::Result;
use crate::html::{self, LinkTag, UrlConfig};
use crate::types::{Params, VENDOR_PREFIX};
use crate::view::{HandlebarsViews, ViewLocator, ViewRenderer};
use std::sync::Arc;

/// Renders views and tags for bundles
///
/// Holds the host's view renderer, the override locator and the URL
/// settings. Shared read-only across renders.
#[derive(Clone)]
pub struct AssetRenderer {
    views: Arc<dyn ViewRenderer>,
    locator: Arc<dyn ViewLocator>,
    urls: UrlConfig,
}

impl AssetRenderer {
    /// Create a renderer from explicit capabilities
    pub fn new(views: Arc<dyn ViewRenderer>, locator: Arc<dyn ViewLocator>, urls: UrlConfig) -> Self {
        Self {
            views,
            locator,
            urls,
        }
    }

    /// Use one template set for both rendering and override lookup
    pub fn from_views(views: HandlebarsViews, urls: UrlConfig) -> Self {
        let views = Arc::new(views);
        Self::new(views.clone(), views, urls)
    }

    /// URL settings
    pub fn urls(&self) -> &UrlConfig {
        &self.urls
    }

    /// Render a view, preferring a `vendor/` override when one exists
    pub fn render_view(&self, view: &str, params: &Params) -> Result<String> {
        let custom = override_path(view);

        if self.locator.locate(&custom) {
            log::debug!("Rendering override {} for view {}", custom, view);
            return self.views.render(&custom, params);
        }

        self.views.render(view, params)
    }

    /// Render a `<meta>` tag
    pub fn render_meta(&self, tag: &MetaTag) -> String {
        html::meta_tag(tag)
    }

    /// Render a `<script>` tag
    pub fn render_js(&self, src: &str, index_page: bool) -> String {
        html::script_tag(src, index_page, &self.urls)
    }

    /// Render a `<link>` tag
    pub fn render_css(&self, link: &LinkTag) -> String {
        html::link_tag(link, &self.urls)
    }
}

/// Path of the override template for `view`
pub fn override_path(view: &str) -> String {
    format!("{}{}", VENDOR_PREFIX, view.replace('\\', "/"))
}
