//! The asset bundle trait and its registration protocol
//!
//! A bundle is a named set of stylesheets, scripts, meta tags and view
//! partials. Registering it against a [`RenderContext`] writes its markup
//! into the `head`, `beginBody` and `endBody` sections exactly once per
//! render, after its dependencies have done the same.
//!
//! ## Example
//!
//! ```rust
//! use page_assets::prelude::*;
//!
//! let core = StaticBundle::new("core").unwrap().css("core.css");
//! let widget = StaticBundle::new("widget")
//!     .unwrap()
//!     .js("widget.js")
//!     .depends_on("core");
//!
//! let mut registry = BundleRegistry::new();
//! registry.insert(core).unwrap();
//! registry.insert(widget).unwrap();
//!
//! let env = AssetEnv::new(AssetRenderer::from_views(HandlebarsViews::new(), UrlConfig::default()), registry);
//! let mut context = RenderContext::new();
//! env.register(&mut context, "widget", &Params::new()).unwrap();
//!
//! assert_eq!(context.ledger(), ["core", "widget"]);
//! ```

use crate::asset::{BundleResources, ViewEntry};
use crate::assets::AssetEnv;
use crate::context::RenderContext;
use crate::error::Result;
use crate::html::{LinkTag, ScriptTag};
use crate::renderer::AssetRenderer;
use crate::types::{Params, Section};

/// A bundle of page assets
///
/// Implementors provide an id and their resource lists, and may hook into
/// registration through [`before_register`](Self::before_register) and
/// [`after_register`](Self::after_register). The remaining methods are
/// provided and should not be overridden.
pub trait AssetBundle: Send + Sync {
    /// Identity of the bundle, unique within a registry
    fn id(&self) -> &str;

    /// Declared resources and dependencies
    fn resources(&self) -> &BundleResources;

    /// Called after the ledger mark, before dependencies are registered
    fn before_register(&self, _context: &mut RenderContext, _params: &Params) -> Result<()> {
        Ok(())
    }

    /// Called after the bundle's sections have been injected
    fn after_register(&self, _context: &mut RenderContext, _params: &Params) -> Result<()> {
        Ok(())
    }

    /// Markup for the `head` section: css, js, meta, then views
    fn get_head(&self, renderer: &AssetRenderer) -> Result<String> {
        let resources = self.resources();
        let mut html = render_links(renderer, &resources.css);
        html.push_str(&render_scripts(renderer, &resources.js));

        for entry in &resources.meta {
            html.push_str(&renderer.render_meta(&entry.to_tag()));
        }

        html.push_str(&render_views(renderer, &resources.views)?);
        Ok(html)
    }

    /// Markup for the `beginBody` section: css, js, then views
    fn get_begin_body(&self, renderer: &AssetRenderer) -> Result<String> {
        let resources = self.resources();
        let mut html = render_links(renderer, &resources.begin_body_css);
        html.push_str(&render_scripts(renderer, &resources.begin_body_js));
        html.push_str(&render_views(renderer, &resources.begin_body_views)?);
        Ok(html)
    }

    /// Markup for the `endBody` section: css, js, then views
    fn get_end_body(&self, renderer: &AssetRenderer) -> Result<String> {
        let resources = self.resources();
        let mut html = render_links(renderer, &resources.end_body_css);
        html.push_str(&render_scripts(renderer, &resources.end_body_js));
        html.push_str(&render_views(renderer, &resources.end_body_views)?);
        Ok(html)
    }

    /// True if this bundle is already in the context's ledger
    fn is_registered(&self, context: &RenderContext) -> bool {
        context.is_registered(self.id())
    }

    /// Add this bundle to the ledger; false (and no change) if present
    fn mark_registered(&self, context: &mut RenderContext) -> bool {
        context.mark_registered(self.id())
    }

    /// Register the bundle and its dependencies into `context`
    ///
    /// A second call for the same context is a no-op. Errors abort the
    /// remaining steps; sections already written stay written.
    fn register(&self, context: &mut RenderContext, env: &AssetEnv, params: &Params) -> Result<()> {
        if !self.mark_registered(context) {
            log::debug!("Bundle {} already registered", self.id());
            return Ok(());
        }

        context.enter(self.id());
        let result = register_marked(self, context, env, params);
        context.leave();
        result
    }

    /// Write `content` into `section` of the context
    fn inject_section(
        &self,
        context: &mut RenderContext,
        section: Section,
        content: &str,
    ) -> Result<()> {
        context.open_section(section);
        context.write(content);
        context.end_section()
    }
}

/// Steps of [`AssetBundle::register`] that follow the ledger mark
fn register_marked<B: AssetBundle + ?Sized>(
    bundle: &B,
    context: &mut RenderContext,
    env: &AssetEnv,
    params: &Params,
) -> Result<()> {
    log::debug!("Registering bundle {}", bundle.id());

    bundle.before_register(context, params)?;

    for dependency in &bundle.resources().dependencies {
        if context.is_registering(dependency.id()) {
            log::warn!(
                "Skipping cyclic dependency {} -> {}",
                bundle.id(),
                dependency.id()
            );
            continue;
        }

        let target = env.registry().resolve(dependency.id())?;
        target.register(context, env, &dependency.params())?;
    }

    let renderer = env.renderer();
    let head = bundle.get_head(renderer)?;
    bundle.inject_section(context, Section::Head, &head)?;

    let begin_body = bundle.get_begin_body(renderer)?;
    bundle.inject_section(context, Section::BeginBody, &begin_body)?;

    let end_body = bundle.get_end_body(renderer)?;
    bundle.inject_section(context, Section::EndBody, &end_body)?;
    context.settle(bundle.id());

    bundle.after_register(context, params)
}

fn render_links(renderer: &AssetRenderer, links: &[LinkTag]) -> String {
    links.iter().map(|link| renderer.render_css(link)).collect()
}

fn render_scripts(renderer: &AssetRenderer, scripts: &[ScriptTag]) -> String {
    scripts
        .iter()
        .map(|script| renderer.render_js(&script.src, script.index_page))
        .collect()
}

fn render_views(renderer: &AssetRenderer, views: &[ViewEntry]) -> Result<String> {
    let empty = Params::new();
    let mut html = String::new();

    for entry in views {
        let rendered = match entry {
            ViewEntry::Named { view, params } => renderer.render_view(view, params)?,
            ViewEntry::Positional(view) => renderer.render_view(view, &empty)?,
        };
        html.push_str(&rendered);
    }

    Ok(html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::{MetaEntry, MetaTag};
    use crate::assets::{BundleRegistry, StaticBundle};
    use crate::error::AssetError;
    use crate::html::UrlConfig;
    use crate::view::HandlebarsViews;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn renderer() -> AssetRenderer {
        let views = HandlebarsViews::new()
            .with_template("partials/nav", "<nav></nav>")
            .unwrap()
            .with_template("partials/banner", "<div>{{text}}</div>")
            .unwrap();
        AssetRenderer::from_views(views, UrlConfig::default())
    }

    fn env_with(bundles: Vec<StaticBundle>) -> AssetEnv {
        let mut registry = BundleRegistry::new();
        for bundle in bundles {
            registry.insert(bundle).unwrap();
        }
        AssetEnv::new(renderer(), registry)
    }

    #[test]
    fn test_head_order_css_js_meta_views() {
        let mut params = Params::new();
        params.insert("text".to_string(), json!("hi"));

        let bundle = StaticBundle::new("page")
            .unwrap()
            .view("partials/nav")
            .meta("viewport", "width=device-width")
            .js("a.js")
            .css("a.css")
            .css("b.css")
            .view_with("partials/banner", params);

        let head = bundle.get_head(&renderer()).unwrap();
        let positions: Vec<usize> = [
            "a.css",
            "b.css",
            "a.js",
            "viewport",
            "<nav></nav>",
            "<div>hi</div>",
        ]
        .iter()
        .map(|needle| head.find(needle).unwrap())
        .collect();

        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{}", head);
    }

    #[test]
    fn test_mixed_meta_shapes() {
        let bundle = StaticBundle::new("seo")
            .unwrap()
            .meta("viewport", "width=device-width")
            .meta_tag(MetaTag::new("og:title", "Home").with_attribute("property"));

        assert!(matches!(bundle.resources().meta[0], MetaEntry::Named { .. }));
        assert!(matches!(bundle.resources().meta[1], MetaEntry::Tag(_)));

        let head = bundle.get_head(&renderer()).unwrap();
        assert_eq!(
            head,
            "<meta name=\"viewport\" content=\"width=device-width\" />\n\
             <meta property=\"og:title\" content=\"Home\" />\n"
        );
    }

    #[test]
    fn test_body_sections() {
        let bundle = StaticBundle::new("body")
            .unwrap()
            .begin_body_view("partials/nav")
            .begin_body_css("top.css")
            .end_body_js("bottom.js")
            .end_body_css("bottom.css");

        let r = renderer();
        let begin = bundle.get_begin_body(&r).unwrap();
        assert!(begin.find("top.css").unwrap() < begin.find("<nav>").unwrap());

        let end = bundle.get_end_body(&r).unwrap();
        assert!(end.find("bottom.css").unwrap() < end.find("bottom.js").unwrap());
        assert_eq!(bundle.get_head(&r).unwrap(), "");
    }

    #[test]
    fn test_register_is_idempotent() {
        let env = env_with(vec![StaticBundle::new("core").unwrap().css("core.css")]);
        let bundle = env.registry().resolve("core").unwrap();
        let mut ctx = RenderContext::new();

        assert!(!bundle.is_registered(&ctx));
        bundle.register(&mut ctx, &env, &Params::new()).unwrap();
        assert!(bundle.is_registered(&ctx));
        let head = ctx.section(Section::Head);

        bundle.register(&mut ctx, &env, &Params::new()).unwrap();
        assert_eq!(ctx.section(Section::Head), head);
        assert_eq!(ctx.section_fragments(Section::Head).len(), 1);
    }

    #[test]
    fn test_mark_registered_on_fresh_context() {
        let bundle = StaticBundle::new("core").unwrap();
        let mut ctx = RenderContext::new();
        assert!(bundle.mark_registered(&mut ctx));
        assert_eq!(ctx.ledger(), ["core"]);
        assert!(!bundle.mark_registered(&mut ctx));
        assert_eq!(ctx.ledger(), ["core"]);
    }

    #[test]
    fn test_dependency_registers_first() {
        let env = env_with(vec![
            StaticBundle::new("core").unwrap().css("core.css"),
            StaticBundle::new("widget")
                .unwrap()
                .js("widget.js")
                .depends_on("core"),
        ]);

        let mut ctx = RenderContext::new();
        env.register(&mut ctx, "widget", &Params::new()).unwrap();

        assert_eq!(
            ctx.section(Section::Head),
            "<link href=\"core.css\" rel=\"stylesheet\" type=\"text/css\" />\n\
             <script src=\"widget.js\" type=\"text/javascript\"></script>\n"
        );
        assert_eq!(ctx.ledger(), ["core", "widget"]);
    }

    #[test]
    fn test_missing_dependency_aborts() {
        let env = env_with(vec![StaticBundle::new("widget")
            .unwrap()
            .js("widget.js")
            .depends_on("ghost")]);

        let mut ctx = RenderContext::new();
        let err = env.register(&mut ctx, "widget", &Params::new()).unwrap_err();
        assert!(matches!(err, AssetError::BundleNotFound(ref id) if id == "ghost"));
        assert_eq!(ctx.section(Section::Head), "");
        assert_eq!(ctx.ledger(), ["widget"]);
    }

    #[test]
    fn test_missing_view_propagates() {
        let env = env_with(vec![StaticBundle::new("broken")
            .unwrap()
            .css("ok.css")
            .view("partials/missing")]);

        let mut ctx = RenderContext::new();
        let err = env.register(&mut ctx, "broken", &Params::new()).unwrap_err();
        assert!(matches!(err, AssetError::ViewNotFound(_)));
    }

    #[test]
    fn test_self_dependency_terminates() {
        let env = env_with(vec![StaticBundle::new("loop")
            .unwrap()
            .css("loop.css")
            .depends_on("loop")]);

        let mut ctx = RenderContext::new();
        env.register(&mut ctx, "loop", &Params::new()).unwrap();
        assert_eq!(ctx.ledger(), ["loop"]);
        assert_eq!(ctx.section_fragments(Section::Head).len(), 1);
    }

    #[test]
    fn test_cycle_terminates() {
        let env = env_with(vec![
            StaticBundle::new("a").unwrap().css("a.css").depends_on("b"),
            StaticBundle::new("b").unwrap().css("b.css").depends_on("a"),
        ]);

        let mut ctx = RenderContext::new();
        env.register(&mut ctx, "a", &Params::new()).unwrap();
        assert_eq!(ctx.ledger(), ["b", "a"]);

        let head = ctx.section(Section::Head);
        assert!(head.find("b.css").unwrap() < head.find("a.css").unwrap());
    }

    struct Hooked {
        inner: StaticBundle,
        before: Arc<AtomicUsize>,
        after: Arc<AtomicUsize>,
    }

    impl AssetBundle for Hooked {
        fn id(&self) -> &str {
            self.inner.id()
        }

        fn resources(&self) -> &BundleResources {
            self.inner.resources()
        }

        fn before_register(&self, context: &mut RenderContext, params: &Params) -> Result<()> {
            self.before.fetch_add(1, Ordering::SeqCst);
            context
                .data_mut()
                .insert("theme".to_string(), params.get("theme").cloned().unwrap_or_default());
            Ok(())
        }

        fn after_register(&self, context: &mut RenderContext, _params: &Params) -> Result<()> {
            assert!(context.section(Section::Head).contains("hooked.css"));
            self.after.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[test]
    fn test_hooks_run_once() {
        let before = Arc::new(AtomicUsize::new(0));
        let after = Arc::new(AtomicUsize::new(0));
        let bundle = Hooked {
            inner: StaticBundle::new("hooked").unwrap().css("hooked.css"),
            before: before.clone(),
            after: after.clone(),
        };

        let env = env_with(vec![]);
        let mut ctx = RenderContext::new();
        let mut params = Params::new();
        params.insert("theme".to_string(), json!("dark"));

        bundle.register(&mut ctx, &env, &params).unwrap();
        bundle.register(&mut ctx, &env, &params).unwrap();

        assert_eq!(before.load(Ordering::SeqCst), 1);
        assert_eq!(after.load(Ordering::SeqCst), 1);
        assert_eq!(ctx.data()["theme"], json!("dark"));
    }
}
