//! # page_assets
//!
//! Asset bundles for server-rendered pages.
//!
//! A bundle groups stylesheets, scripts, meta tags and view partials under
//! an id. Registering a bundle against a [`RenderContext`](context::RenderContext)
//! writes its markup into the `head`, `beginBody` and `endBody` sections,
//! once per render, after its dependencies.
//!
//! ## Example
//!
//! ```rust
//! use page_assets::prelude::*;
//!
//! let manifest = Manifest::from_toml_str(r#"
//!     [[bundle]]
//!     id = "core"
//!     css = ["core.css"]
//!
//!     [[bundle]]
//!     id = "widget"
//!     js = ["widget.js"]
//!     depends = ["core"]
//! "#).unwrap();
//!
//! let env = manifest.into_env(HandlebarsViews::new()).unwrap();
//! let page = env.render_page(["widget"]).unwrap();
//!
//! assert!(page.section(Section::Head).starts_with("<link href=\"core.css\""));
//! ```

pub mod asset;
pub mod assets;
pub mod bundle;
pub mod context;
pub mod error;
pub mod html;
pub mod renderer;
pub mod types;
pub mod view;

pub mod prelude {
    //! Commonly used types and traits
    pub use crate::asset::{BundleResources, Dependency, MetaEntry, MetaTag, ViewEntry};
    pub use crate::assets::{AssetEnv, BundleRegistry, Manifest, StaticBundle};
    pub use crate::bundle::AssetBundle;
    pub use crate::context::RenderContext;
    pub use crate::error::{AssetError, Result};
    pub use crate::html::{LinkTag, ScriptTag, UrlConfig};
    pub use crate::renderer::AssetRenderer;
    pub use crate::types::{Params, Section};
    pub use crate::view::{HandlebarsViews, ViewLocator, ViewRenderer};
}
