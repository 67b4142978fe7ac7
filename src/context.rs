//! Per-render context: data bag, registration ledger and output sections

use crate::error::{AssetError, Result};
use crate::types::{BundleId, Params, Section, LEDGER_KEY};
use hashbrown::HashMap;
use serde_json::Value;

/// State of one page render
///
/// Bundles borrow the context for the duration of a registration call.
/// Sections are append-only: content written between
/// [`open_section`](Self::open_section) and [`end_section`](Self::end_section)
/// is added after everything already in that section.
#[derive(Debug, Default)]
pub struct RenderContext {
    /// Free-form view data
    data: Params,
    /// Registered bundle ids; completed bundles in injection order
    ledger: Vec<BundleId>,
    /// Accumulated fragments per section
    sections: HashMap<Section, Vec<String>>,
    /// Open sections with their pending buffers (innermost last)
    open: Vec<(Section, String)>,
    /// Content written while no section was open
    output: String,
    /// Bundles whose registration is in progress (innermost last)
    registering: Vec<BundleId>,
}

impl RenderContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context seeded with view data
    ///
    /// A string list under `__assets` (as written by
    /// [`into_data`](Self::into_data)) becomes the ledger, so bundles
    /// registered by an earlier render are not injected again.
    pub fn with_data(data: Params) -> Self {
        let mut context = Self::default();
        context.set_data(data);
        context
    }

    /// View data
    pub fn data(&self) -> &Params {
        &self.data
    }

    /// Mutable view data
    pub fn data_mut(&mut self) -> &mut Params {
        &mut self.data
    }

    /// Replace the view data, adopting any `__assets` ledger it carries
    pub fn set_data(&mut self, mut data: Params) {
        if let Some(ids) = take_ledger(&mut data) {
            for id in ids {
                self.mark_registered(&id);
            }
        }
        self.data = data;
    }

    /// Registered bundle ids
    ///
    /// A bundle enters the ledger when it is marked and moves to the end
    /// once its sections are injected, so completed bundles appear in the
    /// order their content was written.
    pub fn ledger(&self) -> &[BundleId] {
        &self.ledger
    }

    /// True if `id` is in the ledger
    pub fn is_registered(&self, id: &str) -> bool {
        self.ledger.iter().any(|entry| entry == id)
    }

    /// Add `id` to the ledger; false if it was already there
    pub fn mark_registered(&mut self, id: &str) -> bool {
        if self.is_registered(id) {
            return false;
        }

        self.ledger.push(id.to_string());
        true
    }

    /// Start writing into `section`
    pub fn open_section(&mut self, section: Section) {
        self.open.push((section, String::new()));
    }

    /// Write into the innermost open section, or into the main output
    pub fn write(&mut self, content: &str) {
        match self.open.last_mut() {
            Some((_, buffer)) => buffer.push_str(content),
            None => self.output.push_str(content),
        }
    }

    /// Close the innermost open section and append its buffer
    pub fn end_section(&mut self) -> Result<()> {
        let (section, buffer) = self.open.pop().ok_or(AssetError::SectionNotOpen)?;
        self.sections.entry(section).or_default().push(buffer);
        Ok(())
    }

    /// Concatenated content of a section
    pub fn section(&self, section: Section) -> String {
        self.sections
            .get(&section)
            .map(|fragments| fragments.concat())
            .unwrap_or_default()
    }

    /// Individual injections into a section, in call order
    pub fn section_fragments(&self, section: Section) -> &[String] {
        self.sections
            .get(&section)
            .map(|fragments| fragments.as_slice())
            .unwrap_or(&[])
    }

    /// Content written outside of any section
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Export the view data with the ledger stored under `__assets`
    pub fn into_data(self) -> Params {
        let mut data = self.data;
        let ledger = self.ledger.into_iter().map(Value::String).collect();
        data.insert(LEDGER_KEY.to_string(), Value::Array(ledger));
        data
    }

    /// Move `id` to the end of the ledger after its content was injected
    pub(crate) fn settle(&mut self, id: &str) {
        if let Some(pos) = self.ledger.iter().position(|entry| entry == id) {
            let entry = self.ledger.remove(pos);
            self.ledger.push(entry);
        }
    }

    pub(crate) fn enter(&mut self, id: &str) {
        self.registering.push(id.to_string());
    }

    pub(crate) fn leave(&mut self) {
        self.registering.pop();
    }

    /// True while the bundle `id` is registering its dependencies
    pub fn is_registering(&self, id: &str) -> bool {
        self.registering.iter().any(|entry| entry == id)
    }
}

/// Remove `__assets` from `data` when it holds a list of ids
fn take_ledger(data: &mut Params) -> Option<Vec<BundleId>> {
    let ids: Vec<BundleId> = match data.get(LEDGER_KEY)? {
        Value::Array(entries) => entries
            .iter()
            .map(|entry| entry.as_str().map(str::to_string))
            .collect::<Option<_>>()?,
        other => {
            log::warn!("Ignoring {} in view data: expected a list, got {}", LEDGER_KEY, other);
            return None;
        }
    };

    data.remove(LEDGER_KEY);
    Some(ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ledger() {
        let mut ctx = RenderContext::new();
        assert!(!ctx.is_registered("core"));
        assert!(ctx.mark_registered("core"));
        assert!(!ctx.mark_registered("core"));
        assert!(ctx.mark_registered("widget"));
        assert_eq!(ctx.ledger(), ["core", "widget"]);
    }

    #[test]
    fn test_settle_moves_to_end() {
        let mut ctx = RenderContext::new();
        ctx.mark_registered("widget");
        ctx.mark_registered("core");
        ctx.settle("core");
        ctx.settle("widget");
        assert_eq!(ctx.ledger(), ["core", "widget"]);

        ctx.settle("unknown");
        assert_eq!(ctx.ledger(), ["core", "widget"]);
    }

    #[test]
    fn test_sections_accumulate() {
        let mut ctx = RenderContext::new();

        ctx.open_section(Section::Head);
        ctx.write("a");
        ctx.end_section().unwrap();

        ctx.open_section(Section::Head);
        ctx.write("b");
        ctx.write("c");
        ctx.end_section().unwrap();

        assert_eq!(ctx.section(Section::Head), "abc");
        assert_eq!(ctx.section_fragments(Section::Head), ["a", "bc"]);
        assert_eq!(ctx.section(Section::EndBody), "");
    }

    #[test]
    fn test_nested_sections() {
        let mut ctx = RenderContext::new();
        ctx.open_section(Section::Head);
        ctx.write("outer");
        ctx.open_section(Section::EndBody);
        ctx.write("inner");
        ctx.end_section().unwrap();
        ctx.end_section().unwrap();

        assert_eq!(ctx.section(Section::Head), "outer");
        assert_eq!(ctx.section(Section::EndBody), "inner");
    }

    #[test]
    fn test_write_outside_section() {
        let mut ctx = RenderContext::new();
        ctx.write("<html>");
        assert_eq!(ctx.output(), "<html>");
        assert!(matches!(ctx.end_section(), Err(AssetError::SectionNotOpen)));
    }

    #[test]
    fn test_into_data_exports_ledger() {
        let mut data = Params::new();
        data.insert("title".to_string(), json!("Home"));
        let mut ctx = RenderContext::with_data(data);
        ctx.mark_registered("core");

        let data = ctx.into_data();
        assert_eq!(data["title"], json!("Home"));
        assert_eq!(data[LEDGER_KEY], json!(["core"]));
    }

    #[test]
    fn test_with_data_adopts_exported_ledger() {
        let mut first = RenderContext::new();
        first.mark_registered("core");
        first.mark_registered("widget");
        first.data_mut().insert("title".to_string(), json!("Home"));

        let second = RenderContext::with_data(first.into_data());
        assert_eq!(second.ledger(), ["core", "widget"]);
        assert!(second.is_registered("core"));
        assert!(!second.data().contains_key(LEDGER_KEY));
        assert_eq!(second.data()["title"], json!("Home"));

        let round_trip = second.into_data();
        assert_eq!(round_trip[LEDGER_KEY], json!(["core", "widget"]));
    }

    #[test]
    fn test_set_data_merges_ledger_without_duplicates() {
        let mut ctx = RenderContext::new();
        ctx.mark_registered("core");

        let mut data = Params::new();
        data.insert(LEDGER_KEY.to_string(), json!(["core", "theme", "theme"]));
        ctx.set_data(data);

        assert_eq!(ctx.ledger(), ["core", "theme"]);
        assert!(ctx.data().is_empty());
    }

    #[test]
    fn test_malformed_ledger_left_in_data() {
        let mut data = Params::new();
        data.insert(LEDGER_KEY.to_string(), json!("core"));
        let ctx = RenderContext::with_data(data);
        assert!(ctx.ledger().is_empty());
        assert_eq!(ctx.data()[LEDGER_KEY], json!("core"));

        let mut data = Params::new();
        data.insert(LEDGER_KEY.to_string(), json!(["core", 1]));
        let ctx = RenderContext::with_data(data);
        assert!(ctx.ledger().is_empty());
        assert!(ctx.data().contains_key(LEDGER_KEY));
    }
}
