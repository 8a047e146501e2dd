use std::path::PathBuf;

use crate::content::MarkdownOptions;
use crate::page::{DefaultErrorBoundary, ErrorBoundary};

/// postpress build options. Should be passed to [`publish()`](crate::publish()).
///
/// ## Examples
/// Default values:
/// ```rs
/// use postpress::{publish, routes, BuildOptions, BuildOutput};
/// use postpress::navigation::NavigationSpec;
///
/// fn main() -> Result<BuildOutput, Box<dyn std::error::Error>> {
///   publish(routes![], &NavigationSpec::default(), BuildOptions::default())
/// }
/// ```
/// Custom values:
/// ```rs
/// use postpress::{publish, routes, BuildOptions, BuildOutput, ContentOptions};
/// use postpress::navigation::NavigationSpec;
///
/// fn main() -> Result<BuildOutput, Box<dyn std::error::Error>> {
///   publish(
///     routes![],
///     &NavigationSpec::default(),
///     BuildOptions {
///       output_dir: "public".into(),
///       content: ContentOptions {
///         content_dir: "content/posts".into(),
///         ..Default::default()
///       },
///       ..Default::default()
///     },
///   )
/// }
/// ```
pub struct BuildOptions {
    /// Base URL for the site, e.g. `https://example.com`. Used to build canonical URLs through
    /// [`PageContext::canonical_url`](crate::page::PageContext::canonical_url).
    pub base_url: Option<String>,

    pub output_dir: PathBuf,
    pub static_dir: PathBuf,

    /// Whether to clean the output directory before building.
    pub clean_output_dir: bool,

    pub content: ContentOptions,

    pub markdown: MarkdownOptions,

    /// Directory receiving `posts.json` and `navigation.json`. `None` skips writing them.
    pub generated_dir: Option<PathBuf>,

    /// Renders the fallback page written in place of a page whose render failed.
    pub error_boundary: Box<dyn ErrorBoundary>,
}

/// Where posts live and how their URLs are built.
#[derive(Debug, Clone)]
pub struct ContentOptions {
    /// Defaults to `posts`.
    pub content_dir: PathBuf,

    /// Glob pattern, relative to `content_dir`, matching source documents. Defaults to `**/*.mdx`.
    pub pattern: String,

    /// Prefix of every post URL. Defaults to `/posts`.
    pub url_prefix: String,
}

impl Default for ContentOptions {
    fn default() -> Self {
        Self {
            content_dir: "posts".into(),
            pattern: "**/*.mdx".into(),
            url_prefix: "/posts".into(),
        }
    }
}

/// Provides default values for [`crate::publish()`]. Designed to work for most blogs.
impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            base_url: None,
            output_dir: "dist".into(),
            static_dir: "static".into(),
            clean_output_dir: true,
            content: ContentOptions::default(),
            markdown: MarkdownOptions::default(),
            generated_dir: Some(".postpress/generated".into()),
            error_boundary: Box::new(DefaultErrorBoundary),
        }
    }
}
