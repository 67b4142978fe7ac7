//! TOML bundle manifest
//!
//! Declares bundles, their dependencies and the templates their views use:
//!
//! ```toml
//! [urls]
//! base_url = "/static"
//!
//! [[bundle]]
//! id = "core"
//! css = ["core.css", { href = "print.css", media = "print" }]
//! meta = [{ name = "viewport", content = "width=device-width" }]
//! views = ["partials/analytics", { view = "partials/banner", params = { text = "hi" } }]
//! depends = ["jquery", { id = "theme", params = { dark = true } }]
//!
//! [bundle.end_body]
//! js = ["core.js", { src = "routes.js", index_page = true }]
//!
//! [templates]
//! "partials/analytics" = "<!-- analytics -->"
//! ```

use crate::asset::{BundleResources, Dependency, MetaEntry, ViewEntry};
use crate::assets::{AssetEnv, BundleRegistry, StaticBundle};
use crate::error::{AssetError, Result};
use crate::html::{LinkTag, ScriptTag, UrlConfig};
use crate::renderer::AssetRenderer;
use crate::types::BundleId;
use crate::view::HandlebarsViews;
use hashbrown::HashSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Resources injected into one of the body sections
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BodyResources {
    #[serde(default)]
    pub css: Vec<LinkTag>,
    #[serde(default)]
    pub js: Vec<ScriptTag>,
    #[serde(default)]
    pub views: Vec<ViewEntry>,
}

/// One `[[bundle]]` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleDefinition {
    pub id: BundleId,
    #[serde(default)]
    pub css: Vec<LinkTag>,
    #[serde(default)]
    pub js: Vec<ScriptTag>,
    #[serde(default)]
    pub meta: Vec<MetaEntry>,
    #[serde(default)]
    pub views: Vec<ViewEntry>,
    #[serde(default)]
    pub depends: Vec<Dependency>,
    #[serde(default)]
    pub begin_body: BodyResources,
    #[serde(default)]
    pub end_body: BodyResources,
}

impl BundleDefinition {
    /// Build the bundle described by this table
    pub fn to_bundle(&self) -> Result<StaticBundle> {
        let resources = BundleResources {
            meta: self.meta.clone(),
            views: self.views.clone(),
            css: self.css.clone(),
            js: self.js.clone(),
            begin_body_css: self.begin_body.css.clone(),
            begin_body_js: self.begin_body.js.clone(),
            begin_body_views: self.begin_body.views.clone(),
            end_body_css: self.end_body.css.clone(),
            end_body_js: self.end_body.js.clone(),
            end_body_views: self.end_body.views.clone(),
            dependencies: self.depends.clone(),
        };

        StaticBundle::with_resources(self.id.clone(), resources)
    }
}

/// Parsed manifest file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub urls: UrlConfig,
    #[serde(default, rename = "bundle")]
    pub bundles: Vec<BundleDefinition>,
    #[serde(default)]
    pub templates: BTreeMap<String, String>,
}

impl Manifest {
    /// Parse a manifest from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| AssetError::Manifest(e.to_string()))
    }

    /// Read and parse a manifest file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let manifest = Self::from_toml_str(&contents)?;

        log::info!(
            "Loaded {} bundles and {} templates from {}",
            manifest.bundles.len(),
            manifest.templates.len(),
            path.display()
        );
        Ok(manifest)
    }

    /// Check that ids are unique and every dependency is declared
    pub fn validate(&self) -> Result<()> {
        let mut ids = HashSet::new();
        for bundle in &self.bundles {
            if !ids.insert(bundle.id.as_str()) {
                return Err(AssetError::Manifest(format!(
                    "bundle {} is declared twice",
                    bundle.id
                )));
            }
        }

        for bundle in &self.bundles {
            if let Some(missing) = bundle.depends.iter().find(|d| !ids.contains(d.id())) {
                return Err(AssetError::Manifest(format!(
                    "bundle {} depends on unknown bundle {}",
                    bundle.id,
                    missing.id()
                )));
            }
        }

        Ok(())
    }

    /// Build a registry holding every declared bundle
    pub fn registry(&self) -> Result<BundleRegistry> {
        let mut registry = BundleRegistry::new();
        for definition in &self.bundles {
            registry.insert(definition.to_bundle()?)?;
        }
        Ok(registry)
    }

    /// Validate and build an environment, adding the manifest's templates to `views`
    pub fn into_env(self, mut views: HandlebarsViews) -> Result<AssetEnv> {
        self.validate()?;

        for (name, source) in &self.templates {
            views.register_template(name, source)?;
        }

        let registry = self.registry()?;
        Ok(AssetEnv::new(
            AssetRenderer::from_views(views, self.urls),
            registry,
        ))
    }
}
