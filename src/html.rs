//! HTML tag builders for `<meta>`, `<script>` and `<link>`
//!
//! Relative references are resolved against a [`UrlConfig`]; absolute ones
//! (`https://...`, `//cdn...`) are emitted untouched. Attribute values are
//! always escaped.

use crate::asset::MetaTag;
use serde::{Deserialize, Serialize};

/// Base URL settings used to resolve relative asset references
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlConfig {
    /// Prefix for relative references (empty leaves them untouched)
    #[serde(default)]
    pub base_url: String,
    /// Front controller inserted after the base URL when a tag asks for it
    #[serde(default)]
    pub index_page: String,
}

impl UrlConfig {
    /// Create a config with only a base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            index_page: String::new(),
        }
    }

    /// Set the index page
    pub fn with_index_page(mut self, index_page: impl Into<String>) -> Self {
        self.index_page = index_page.into();
        self
    }

    /// Resolve a reference to the URL written into the tag
    pub fn resolve(&self, reference: &str, index_page: bool) -> String {
        if is_absolute(reference) || self.base_url.is_empty() {
            return reference.to_string();
        }

        let mut url = self.base_url.trim_end_matches('/').to_string();
        url.push('/');

        if index_page && !self.index_page.is_empty() {
            url.push_str(self.index_page.trim_matches('/'));
            url.push('/');
        }

        url.push_str(reference.trim_start_matches('/'));
        url
    }
}

fn is_absolute(reference: &str) -> bool {
    reference.starts_with("//") || reference.contains("://")
}

/// Attributes of a `<link>` tag
///
/// Deserializes from a bare href (`"a.css"`) or a table of attributes
/// (`{ href = "print.css", media = "print" }`); omitted attributes take the
/// stylesheet defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "LinkRepr")]
pub struct LinkTag {
    pub href: String,
    pub rel: String,
    #[serde(rename = "type")]
    pub link_type: String,
    pub title: String,
    pub media: String,
    pub index_page: bool,
    pub hreflang: String,
}

impl LinkTag {
    /// Stylesheet link with default attributes
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            rel: "stylesheet".to_string(),
            link_type: "text/css".to_string(),
            title: String::new(),
            media: String::new(),
            index_page: false,
            hreflang: String::new(),
        }
    }

    pub fn with_rel(mut self, rel: impl Into<String>) -> Self {
        self.rel = rel.into();
        self
    }

    pub fn with_type(mut self, link_type: impl Into<String>) -> Self {
        self.link_type = link_type.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_media(mut self, media: impl Into<String>) -> Self {
        self.media = media.into();
        self
    }

    pub fn with_index_page(mut self, index_page: bool) -> Self {
        self.index_page = index_page;
        self
    }

    pub fn with_hreflang(mut self, hreflang: impl Into<String>) -> Self {
        self.hreflang = hreflang.into();
        self
    }
}

impl From<&str> for LinkTag {
    fn from(href: &str) -> Self {
        LinkTag::new(href)
    }
}

impl From<String> for LinkTag {
    fn from(href: String) -> Self {
        LinkTag::new(href)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LinkRepr {
    Href(String),
    Attributes {
        href: String,
        rel: Option<String>,
        #[serde(rename = "type")]
        link_type: Option<String>,
        #[serde(default)]
        title: String,
        #[serde(default)]
        media: String,
        #[serde(default)]
        index_page: bool,
        #[serde(default)]
        hreflang: String,
    },
}

impl From<LinkRepr> for LinkTag {
    fn from(repr: LinkRepr) -> Self {
        match repr {
            LinkRepr::Href(href) => LinkTag::new(href),
            LinkRepr::Attributes {
                href,
                rel,
                link_type,
                title,
                media,
                index_page,
                hreflang,
            } => {
                let defaults = LinkTag::new(href);
                LinkTag {
                    rel: rel.unwrap_or(defaults.rel),
                    link_type: link_type.unwrap_or(defaults.link_type),
                    title,
                    media,
                    index_page,
                    hreflang,
                    href: defaults.href,
                }
            }
        }
    }
}

/// A `<script>` reference
///
/// Deserializes from a bare src (`"app.js"`) or
/// `{ src = "app.js", index_page = true }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ScriptRepr")]
pub struct ScriptTag {
    pub src: String,
    /// Resolve through [`UrlConfig::index_page`]
    pub index_page: bool,
}

impl ScriptTag {
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            index_page: false,
        }
    }

    pub fn with_index_page(mut self, index_page: bool) -> Self {
        self.index_page = index_page;
        self
    }
}

impl From<&str> for ScriptTag {
    fn from(src: &str) -> Self {
        ScriptTag::new(src)
    }
}

impl From<String> for ScriptTag {
    fn from(src: String) -> Self {
        ScriptTag::new(src)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ScriptRepr {
    Src(String),
    Attributes {
        src: String,
        #[serde(default)]
        index_page: bool,
    },
}

impl From<ScriptRepr> for ScriptTag {
    fn from(repr: ScriptRepr) -> Self {
        match repr {
            ScriptRepr::Src(src) => ScriptTag::new(src),
            ScriptRepr::Attributes { src, index_page } => ScriptTag { src, index_page },
        }
    }
}

/// Escape a value for use inside a double-quoted attribute
pub fn escape_attr(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Build a `<meta>` tag
pub fn meta_tag(tag: &MetaTag) -> String {
    format!(
        "<meta {}=\"{}\" content=\"{}\" />\n",
        escape_attr(&tag.attribute),
        escape_attr(&tag.name),
        escape_attr(&tag.content)
    )
}

/// Build a `<script>` tag
pub fn script_tag(src: &str, index_page: bool, urls: &UrlConfig) -> String {
    format!(
        "<script src=\"{}\" type=\"text/javascript\"></script>\n",
        escape_attr(&urls.resolve(src, index_page))
    )
}

/// Build a `<link>` tag
pub fn link_tag(link: &LinkTag, urls: &UrlConfig) -> String {
    let mut tag = format!(
        "<link href=\"{}\" rel=\"{}\"",
        escape_attr(&urls.resolve(&link.href, link.index_page)),
        escape_attr(&link.rel)
    );

    let optional = [
        ("type", &link.link_type),
        ("media", &link.media),
        ("title", &link.title),
        ("hreflang", &link.hreflang),
    ];
    for (name, value) in optional {
        if !value.is_empty() {
            tag.push_str(&format!(" {}=\"{}\"", name, escape_attr(value)));
        }
    }

    tag.push_str(" />\n");
    tag
}
