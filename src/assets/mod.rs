//! Bundle definitions, lookup and manifest loading

pub mod env;
pub mod manifest;
pub mod registry;
pub mod static_bundle;

pub use env::AssetEnv;
pub use manifest::{BodyResources, BundleDefinition, Manifest};
pub use registry::BundleRegistry;
pub use static_bundle::StaticBundle;
