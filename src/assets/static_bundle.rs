//! Data-only bundle built from declared resource lists

use crate::asset::{BundleResources, Dependency, MetaEntry, MetaTag, ViewEntry};
use crate::bundle::AssetBundle;
use crate::error::{AssetError, Result};
use crate::html::{LinkTag, ScriptTag};
use crate::types::{BundleId, Params};

/// Bundle whose behavior is fully described by its resources
///
/// Covers every bundle that needs no registration hooks: manifest entries
/// and most code-defined bundles.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticBundle {
    id: BundleId,
    resources: BundleResources,
}

impl StaticBundle {
    /// Create an empty bundle; fails on a blank id
    pub fn new(id: impl Into<BundleId>) -> Result<Self> {
        Self::with_resources(id, BundleResources::new())
    }

    /// Create a bundle from existing resource lists
    pub fn with_resources(id: impl Into<BundleId>, resources: BundleResources) -> Result<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(AssetError::InvalidBundleId(id));
        }

        Ok(Self { id, resources })
    }

    /// Mutable access to the resource lists
    pub fn resources_mut(&mut self) -> &mut BundleResources {
        &mut self.resources
    }

    /// Add a stylesheet: an href with default attributes or a full [`LinkTag`]
    pub fn css(mut self, link: impl Into<LinkTag>) -> Self {
        self.resources.css.push(link.into());
        self
    }

    /// Add a script: a src or a [`ScriptTag`]
    pub fn js(mut self, script: impl Into<ScriptTag>) -> Self {
        self.resources.js.push(script.into());
        self
    }

    /// Add a `name => content` meta entry
    pub fn meta(mut self, name: impl Into<String>, content: impl Into<String>) -> Self {
        self.resources.meta.push(MetaEntry::named(name, content));
        self
    }

    /// Add a structured meta descriptor
    pub fn meta_tag(mut self, tag: MetaTag) -> Self {
        self.resources.meta.push(MetaEntry::Tag(tag));
        self
    }

    pub fn view(mut self, view: impl Into<String>) -> Self {
        self.resources.views.push(ViewEntry::Positional(view.into()));
        self
    }

    pub fn view_with(mut self, view: impl Into<String>, params: Params) -> Self {
        self.resources.views.push(ViewEntry::named(view, params));
        self
    }

    pub fn begin_body_css(mut self, link: impl Into<LinkTag>) -> Self {
        self.resources.begin_body_css.push(link.into());
        self
    }

    pub fn begin_body_js(mut self, script: impl Into<ScriptTag>) -> Self {
        self.resources.begin_body_js.push(script.into());
        self
    }

    pub fn begin_body_view(mut self, view: impl Into<String>) -> Self {
        self.resources
            .begin_body_views
            .push(ViewEntry::Positional(view.into()));
        self
    }

    pub fn begin_body_view_with(mut self, view: impl Into<String>, params: Params) -> Self {
        self.resources
            .begin_body_views
            .push(ViewEntry::named(view, params));
        self
    }

    pub fn end_body_css(mut self, link: impl Into<LinkTag>) -> Self {
        self.resources.end_body_css.push(link.into());
        self
    }

    pub fn end_body_js(mut self, script: impl Into<ScriptTag>) -> Self {
        self.resources.end_body_js.push(script.into());
        self
    }

    pub fn end_body_view(mut self, view: impl Into<String>) -> Self {
        self.resources
            .end_body_views
            .push(ViewEntry::Positional(view.into()));
        self
    }

    pub fn end_body_view_with(mut self, view: impl Into<String>, params: Params) -> Self {
        self.resources.end_body_views.push(ViewEntry::named(view, params));
        self
    }

    /// Depend on another bundle, registered without parameters
    pub fn depends_on(mut self, id: impl Into<BundleId>) -> Self {
        self.resources.dependencies.push(Dependency::Plain(id.into()));
        self
    }

    /// Depend on another bundle, registered with `params`
    pub fn depends_on_with(mut self, id: impl Into<BundleId>, params: Params) -> Self {
        self.resources
            .dependencies
            .push(Dependency::with_params(id, params));
        self
    }
}

impl AssetBundle for StaticBundle {
    fn id(&self) -> &str {
        &self.id
    }

    fn resources(&self) -> &BundleResources {
        &self.resources
    }
}
