//! Bundle Registry - id lookup for shared bundle instances
//!
//! Resolves dependency ids to the bundles registered under them. Bundles
//! are stored behind `Arc` so one instance serves every render.

use crate::bundle::AssetBundle;
use crate::error::{AssetError, Result};
use crate::types::BundleId;
use hashbrown::{HashMap, HashSet};
use std::sync::Arc;

/// Registry of named bundles
#[derive(Clone, Default)]
pub struct BundleRegistry {
    /// Bundles by id
    bundles: HashMap<BundleId, Arc<dyn AssetBundle>>,

    /// Ids in insertion order
    order: Vec<BundleId>,
}

impl BundleRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a bundle
    pub fn insert<B: AssetBundle + 'static>(&mut self, bundle: B) -> Result<()> {
        self.insert_shared(Arc::new(bundle))
    }

    /// Add an already shared bundle; fails if its id is taken
    pub fn insert_shared(&mut self, bundle: Arc<dyn AssetBundle>) -> Result<()> {
        let id = bundle.id().to_string();

        if self.bundles.contains_key(&id) {
            return Err(AssetError::DuplicateBundle(id));
        }

        log::debug!("Adding bundle {} to registry", id);
        self.order.push(id.clone());
        self.bundles.insert(id, bundle);
        Ok(())
    }

    /// Look up a bundle
    pub fn get(&self, id: &str) -> Option<Arc<dyn AssetBundle>> {
        self.bundles.get(id).cloned()
    }

    /// Look up a bundle, failing if it is unknown
    pub fn resolve(&self, id: &str) -> Result<Arc<dyn AssetBundle>> {
        self.get(id)
            .ok_or_else(|| AssetError::BundleNotFound(id.to_string()))
    }

    /// Check if a bundle exists
    pub fn contains(&self, id: &str) -> bool {
        self.bundles.contains_key(id)
    }

    /// Bundle ids in insertion order
    pub fn ids(&self) -> &[BundleId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.bundles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }

    /// Order in which registering `id` injects bundle content
    ///
    /// Dependencies come first; each bundle appears once and cycles are cut
    /// the same way registration cuts them.
    pub fn dependency_order(&self, id: &str) -> Result<Vec<BundleId>> {
        let mut seen = HashSet::new();
        let mut order = Vec::new();
        self.visit(id, &mut seen, &mut order)?;
        Ok(order)
    }

    fn visit(
        &self,
        id: &str,
        seen: &mut HashSet<BundleId>,
        order: &mut Vec<BundleId>,
    ) -> Result<()> {
        if !seen.insert(id.to_string()) {
            return Ok(());
        }

        let bundle = self.resolve(id)?;
        for dependency in &bundle.resources().dependencies {
            self.visit(dependency.id(), seen, order)?;
        }

        order.push(id.to_string());
        Ok(())
    }
}
