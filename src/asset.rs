//! Asset entry representations
//!
//! Meta, view and dependency lists accept two shapes each: a bare value
//! (positional) or a value carrying its own parameters (named). The shape is
//! fixed when the entry is built, so rendering never has to guess.

use crate::html::{LinkTag, ScriptTag};
use crate::types::{BundleId, Params};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default attribute used by `<meta>` tags
pub const DEFAULT_META_ATTRIBUTE: &str = "name";

/// Structured `<meta>` descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaTag {
    /// Value of the identifying attribute
    pub name: String,
    /// Value of the `content` attribute
    pub content: String,
    /// Identifying attribute (`name`, `property`, `http-equiv`, ...)
    pub attribute: String,
}

impl MetaTag {
    /// Create a meta tag identified by `name="..."`
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            attribute: DEFAULT_META_ATTRIBUTE.to_string(),
        }
    }

    /// Use another identifying attribute
    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = attribute.into();
        self
    }
}

/// Entry of a bundle's meta list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetaEntry {
    /// Full descriptor, rendered as-is
    Tag(MetaTag),
    /// `name => content` pair
    Named { name: String, content: String },
}

impl MetaEntry {
    /// `name => content` entry
    pub fn named(name: impl Into<String>, content: impl Into<String>) -> Self {
        MetaEntry::Named {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Tag descriptor the entry renders as
    pub fn to_tag(&self) -> MetaTag {
        match self {
            MetaEntry::Tag(tag) => tag.clone(),
            MetaEntry::Named { name, content } => MetaTag::new(name.clone(), content.clone()),
        }
    }
}

impl From<MetaTag> for MetaEntry {
    fn from(tag: MetaTag) -> Self {
        MetaEntry::Tag(tag)
    }
}

/// Entry of a bundle's view list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ViewEntry {
    /// View rendered without parameters
    Positional(String),
    /// View rendered with its own parameters
    Named {
        view: String,
        #[serde(default)]
        params: Params,
    },
}

impl ViewEntry {
    /// View with parameters
    pub fn named(view: impl Into<String>, params: Params) -> Self {
        ViewEntry::Named {
            view: view.into(),
            params,
        }
    }

    /// View reference
    pub fn view(&self) -> &str {
        match self {
            ViewEntry::Positional(view) => view,
            ViewEntry::Named { view, .. } => view,
        }
    }
}

impl From<&str> for ViewEntry {
    fn from(view: &str) -> Self {
        ViewEntry::Positional(view.to_string())
    }
}

impl From<String> for ViewEntry {
    fn from(view: String) -> Self {
        ViewEntry::Positional(view)
    }
}

/// Declared dependency on another bundle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Dependency {
    /// Registered without parameters
    Plain(BundleId),
    /// Registered with the given parameters
    WithParams {
        id: BundleId,
        #[serde(default)]
        params: Params,
    },
}

impl Dependency {
    /// Dependency with parameters
    pub fn with_params(id: impl Into<BundleId>, params: Params) -> Self {
        Dependency::WithParams {
            id: id.into(),
            params,
        }
    }

    /// Identifier of the bundle depended upon
    pub fn id(&self) -> &str {
        match self {
            Dependency::Plain(id) => id,
            Dependency::WithParams { id, .. } => id,
        }
    }

    /// Parameters passed to the dependency's registration
    pub fn params(&self) -> Params {
        match self {
            Dependency::Plain(_) => Params::new(),
            Dependency::WithParams { params, .. } => params.clone(),
        }
    }
}

impl From<&str> for Dependency {
    fn from(id: &str) -> Self {
        Dependency::Plain(id.to_string())
    }
}

impl From<String> for Dependency {
    fn from(id: String) -> Self {
        Dependency::Plain(id)
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dependency::Plain(id) => write!(f, "{}", id),
            Dependency::WithParams { id, params } => write!(f, "{}({} params)", id, params.len()),
        }
    }
}

/// Declarative resource lists of a bundle
///
/// Head receives `css`, `js`, `meta` and `views`; the begin/end body
/// sections receive their own css, js and view lists. Order inside each
/// list is emission order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BundleResources {
    pub meta: Vec<MetaEntry>,
    pub views: Vec<ViewEntry>,
    pub css: Vec<LinkTag>,
    pub js: Vec<ScriptTag>,
    pub begin_body_css: Vec<LinkTag>,
    pub begin_body_js: Vec<ScriptTag>,
    pub begin_body_views: Vec<ViewEntry>,
    pub end_body_css: Vec<LinkTag>,
    pub end_body_js: Vec<ScriptTag>,
    pub end_body_views: Vec<ViewEntry>,
    pub dependencies: Vec<Dependency>,
}

impl BundleResources {
    /// Create empty resource lists
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the bundle emits nothing and depends on nothing
    pub fn is_empty(&self) -> bool {
        self.meta.is_empty()
            && self.views.is_empty()
            && self.css.is_empty()
            && self.js.is_empty()
            && self.begin_body_css.is_empty()
            && self.begin_body_js.is_empty()
            && self.begin_body_views.is_empty()
            && self.end_body_css.is_empty()
            && self.end_body_js.is_empty()
            && self.end_body_views.is_empty()
            && self.dependencies.is_empty()
    }
}
