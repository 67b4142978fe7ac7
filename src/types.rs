//! Core types and constants

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Identifier of a bundle, used as the dedup key
pub type BundleId = String;

/// Parameter map handed to views and dependency registrations
pub type Params = Map<String, Value>;

/// Key under which the registration ledger is exported in the data bag
pub const LEDGER_KEY: &str = "__assets";

/// Prefix of override templates that replace a bundle's default view
pub const VENDOR_PREFIX: &str = "vendor/";

/// Named output region of a render context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Section {
    /// Inside `<head>`
    Head,
    /// Right after `<body>`
    BeginBody,
    /// Right before `</body>`
    EndBody,
}

impl Section {
    /// All sections in document order
    pub const ALL: [Section; 3] = [Section::Head, Section::BeginBody, Section::EndBody];

    /// Section name as used by templates
    pub fn name(&self) -> &'static str {
        match self {
            Section::Head => "head",
            Section::BeginBody => "beginBody",
            Section::EndBody => "endBody",
        }
    }

    /// Parse a section name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.name() == name)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_names() {
        assert_eq!(Section::Head.name(), "head");
        assert_eq!(Section::BeginBody.to_string(), "beginBody");
        assert_eq!(Section::from_name("endBody"), Some(Section::EndBody));
        assert_eq!(Section::from_name("footer"), None);
    }
}
