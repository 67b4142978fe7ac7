//! View rendering and override lookup
//!
//! The bundle layer only needs two capabilities from the host: render a
//! named template with an isolated parameter map, and tell whether a given
//! template path exists. [`HandlebarsViews`] provides both from an in-memory
//! template set.

use crate::error::{AssetError, Result};
use crate::types::Params;
use handlebars::Handlebars;

/// Renders a view template to markup
///
/// Implementations must render with `params` as the only data in scope.
pub trait ViewRenderer: Send + Sync {
    /// Render `view` with `params`
    fn render(&self, view: &str, params: &Params) -> Result<String>;
}

/// Reports whether a template exists at a given path
pub trait ViewLocator: Send + Sync {
    /// True if a template is available at `path`
    fn locate(&self, path: &str) -> bool;
}

/// Handlebars-backed template set
pub struct HandlebarsViews {
    handlebars: Handlebars<'static>,
}

impl HandlebarsViews {
    /// Create an empty template set
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(false);

        Self { handlebars }
    }

    /// Register (or replace) a template
    pub fn register_template(&mut self, name: &str, source: &str) -> Result<()> {
        self.handlebars
            .register_template_string(name, source)
            .map_err(|e| AssetError::Template {
                name: name.to_string(),
                message: e.to_string(),
            })
    }

    /// Builder form of [`register_template`](Self::register_template)
    pub fn with_template(mut self, name: &str, source: &str) -> Result<Self> {
        self.register_template(name, source)?;
        Ok(self)
    }

    /// Names of all registered templates
    pub fn template_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .handlebars
            .get_templates()
            .keys()
            .map(|s| s.as_str())
            .collect();
        names.sort_unstable();
        names
    }
}

impl Default for HandlebarsViews {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewRenderer for HandlebarsViews {
    fn render(&self, view: &str, params: &Params) -> Result<String> {
        if !self.handlebars.has_template(view) {
            return Err(AssetError::ViewNotFound(view.to_string()));
        }

        self.handlebars
            .render(view, params)
            .map_err(|e| AssetError::Render {
                view: view.to_string(),
                message: e.to_string(),
            })
    }
}

impl ViewLocator for HandlebarsViews {
    fn locate(&self, path: &str) -> bool {
        self.handlebars.has_template(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_with_params() {
        let views = HandlebarsViews::new()
            .with_template("greeting", "<p>Hello {{name}}</p>")
            .unwrap();

        let mut params = Params::new();
        params.insert("name".to_string(), json!("<World>"));

        let html = views.render("greeting", &params).unwrap();
        assert_eq!(html, "<p>Hello &lt;World&gt;</p>");
    }

    #[test]
    fn test_render_missing_view() {
        let views = HandlebarsViews::new();
        let err = views.render("nope", &Params::new()).unwrap_err();
        assert!(matches!(err, AssetError::ViewNotFound(ref v) if v == "nope"));
    }

    #[test]
    fn test_missing_params_render_empty() {
        let views = HandlebarsViews::new()
            .with_template("t", "[{{missing}}]")
            .unwrap();
        assert_eq!(views.render("t", &Params::new()).unwrap(), "[]");
    }

    #[test]
    fn test_invalid_template() {
        let mut views = HandlebarsViews::new();
        let err = views.register_template("bad", "{{#if}}").unwrap_err();
        assert!(matches!(err, AssetError::Template { .. }));
    }

    #[test]
    fn test_locate_and_names() {
        let views = HandlebarsViews::new()
            .with_template("b", "")
            .unwrap()
            .with_template("vendor/a", "")
            .unwrap();

        assert!(views.locate("vendor/a"));
        assert!(!views.locate("vendor/b"));
        assert_eq!(views.template_names(), vec!["b", "vendor/a"]);
    }
}
