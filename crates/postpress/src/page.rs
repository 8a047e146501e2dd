//! Core traits and structs to define the pages of a blog.
//!
//! Every page implements the [`Route`] trait. Routes are passed to [`publish()`](crate::publish) through the
//! [`routes!`](crate::routes) macro.
use std::error::Error;

use crate::content::markdown::escape_attr;
use crate::content::{ContentCollection, ContentRecord, MarkdownOptions};
use crate::errors::MarkdownError;
use crate::navigation::NavigationConfig;

/// Error type returned by a failed render.
pub type RenderError = Box<dyn Error + Send + Sync>;

/// The result of a page render, either the HTML of the page or an error.
///
/// Usually built through one of its `From` implementations.
///
/// ## Example
/// ```rs
/// use postpress::page::prelude::*;
///
/// pub struct About;
///
/// impl Route for About {
///   fn urls(&self, _: &ContentCollection) -> Vec<String> {
///     vec!["/about".into()]
///   }
///
///   fn render(&self, _: &PageContext) -> RenderResult {
///     "<h1>关于我</h1>".into()
///   }
/// }
/// ```
#[derive(Debug)]
pub enum RenderResult {
    Text(String),
    Err(RenderError),
}

impl From<String> for RenderResult {
    fn from(val: String) -> Self {
        RenderResult::Text(val)
    }
}

impl From<&str> for RenderResult {
    fn from(val: &str) -> Self {
        RenderResult::Text(val.to_string())
    }
}

impl<T, E> From<Result<T, E>> for RenderResult
where
    T: Into<RenderResult>,
    E: Into<RenderError>,
{
    fn from(val: Result<T, E>) -> Self {
        match val {
            Ok(page) => page.into(),
            Err(e) => RenderResult::Err(e.into()),
        }
    }
}

/// A page, or a family of pages sharing one template.
pub trait Route: Sync {
    /// URLs rendered by this route. Called once per build, after the content is loaded.
    fn urls(&self, content: &ContentCollection) -> Vec<String>;

    fn render(&self, ctx: &PageContext) -> RenderResult;
}

/// Everything a page can read while rendering.
pub struct PageContext<'a> {
    pub content: &'a ContentCollection,
    pub navigation: &'a NavigationConfig,
    /// The URL being rendered, e.g. `/posts/dev/hello`.
    pub current_url: &'a str,
    /// The base URL as defined in [`BuildOptions::base_url`](crate::BuildOptions::base_url)
    pub base_url: &'a Option<String>,
    pub markdown: &'a MarkdownOptions,
}

impl<'a> PageContext<'a> {
    /// Returns the canonical URL for the current page. If [`BuildOptions::base_url`](crate::BuildOptions::base_url)
    /// is not set, this will return `None`.
    pub fn canonical_url(&self) -> Option<String> {
        self.base_url
            .as_ref()
            .map(|base| format!("{}{}", base.trim_end_matches('/'), self.current_url))
    }

    /// The post published at the current URL, if any.
    pub fn current_record(&self) -> Option<&'a ContentRecord> {
        self.content.get_by_url(self.current_url)
    }

    /// Last non-empty segment of the current URL, e.g. `dev` for `/categories/dev`.
    pub fn last_segment(&self) -> &'a str {
        self.current_url
            .rsplit('/')
            .find(|segment| !segment.is_empty())
            .unwrap_or_default()
    }

    /// Render the body of `record` with the build's markdown options.
    pub fn render_markdown(&self, record: &ContentRecord) -> Result<String, MarkdownError> {
        record.render(self.markdown)
    }
}

/// Renders the page written in place of a page whose render failed.
///
/// Rendering the fallback can't fail: whatever it returns is written as is.
pub trait ErrorBoundary: Sync {
    fn render(&self, ctx: &PageContext, error: &(dyn Error + Send + Sync)) -> String;
}

/// Minimal fallback page, used when no other boundary is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultErrorBoundary;

impl ErrorBoundary for DefaultErrorBoundary {
    fn render(&self, ctx: &PageContext, error: &(dyn Error + Send + Sync)) -> String {
        format!(
            concat!(
                "<!DOCTYPE html><html lang=\"zh-CN\"><head><meta charset=\"utf-8\"><title>出错了</title></head>",
                "<body><main><h1>出错了</h1><h2>页面暂时无法访问</h2>",
                "<p>抱歉，页面加载时遇到了问题。</p>",
                "<p><code data-url=\"{}\">{}</code></p>",
                "<a href=\"{}\">重试</a> <a href=\"/\">返回首页</a></main></body></html>"
            ),
            escape_attr(ctx.current_url),
            escape_attr(&error.to_string()),
            escape_attr(ctx.current_url),
        )
    }
}

pub mod prelude {
    //! Re-exports of the most commonly used types and traits for defining pages.
    pub use super::{ErrorBoundary, PageContext, RenderError, RenderResult, Route};
    pub use crate::content::{ContentCollection, ContentRecord};
    pub use crate::navigation::{NavigationConfig, NavigationEntry, category_key, category_route};
}
