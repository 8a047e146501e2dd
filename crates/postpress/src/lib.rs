#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

// Modules the end-user will interact directly or indirectly with
pub mod content;
pub mod errors;
pub mod navigation;
pub mod page;

mod routing;

// Exports for end-users
pub use build::build_site;
pub use build::metadata::{BuildOutput, PageOutput, StaticFileOutput};
pub use build::options::{BuildOptions, ContentOptions};

mod build;
mod templating;

#[cfg(feature = "maud")]
#[cfg_attr(docsrs, doc(cfg(feature = "maud")))]
pub mod maud {
    //! Traits and methods for [Maud](https://maud.lambda.xyz), a macro for writing HTML templates.
    //!
    //! ## Example
    //! ```rs
    //! use postpress::page::prelude::*;
    //! use maud::html;
    //!
    //! pub struct Index;
    //!
    //! impl Route for Index {
    //!   fn urls(&self, _: &ContentCollection) -> Vec<String> {
    //!     vec!["/".into()]
    //!   }
    //!
    //!   fn render(&self, ctx: &PageContext) -> RenderResult {
    //!     html! {
    //!       (ctx.navigation)
    //!       h1 { "Just be funny" }
    //!     }
    //!     .into()
    //!   }
    //! }
    //! ```
    pub use crate::templating::maud_ext::*;
}

// Internal modules
mod logging;

use logging::init_logging;
use navigation::NavigationSpec;
use page::Route;

#[macro_export]
/// Helps to define every route that should be built by [`publish()`].
///
/// ## Example
/// ```rs
/// use postpress::{publish, routes, BuildOptions, BuildOutput};
/// use postpress::navigation::NavigationSpec;
///
/// # mod routes {
/// #   use postpress::page::prelude::*;
/// #   pub struct Index;
/// #   impl Route for Index {
/// #      fn urls(&self, _: &ContentCollection) -> Vec<String> { vec!["/".into()] }
/// #      fn render(&self, _: &PageContext) -> RenderResult { "Hello, world!".into() }
/// #   }
/// # }
///
/// fn main() -> Result<BuildOutput, Box<dyn std::error::Error>> {
///     publish(
///         routes![routes::Index],
///         &NavigationSpec::default(),
///         BuildOptions::default(),
///     )
/// }
/// ```
macro_rules! routes {
    [$($route:expr),*] => {
        &[$(&$route),*]
    };
}

/// The version of postpress being used.
///
/// Can be used to create a generator tag in the output HTML.
///
/// ## Example
/// ```rs
/// use postpress::GENERATOR;
///
/// format!("<meta name=\"generator\" content=\"{}\">", GENERATOR);
/// ```
pub const GENERATOR: &str = concat!("postpress v", env!("CARGO_PKG_VERSION"));

/// Entrypoint. Installs the logger, then loads the posts and writes the site.
///
/// ## Example
/// Should be called from the main function of the binary crate.
/// ```rs
/// use postpress::{publish, routes, BuildOptions, BuildOutput};
/// use postpress::navigation::NavigationSpec;
///
/// fn main() -> Result<BuildOutput, Box<dyn std::error::Error>> {
///   publish(
///     routes![],
///     &NavigationSpec::default(),
///     BuildOptions::default(),
///   )
/// }
/// ```
pub fn publish(
    routes: &[&dyn Route],
    navigation: &NavigationSpec,
    options: BuildOptions,
) -> Result<BuildOutput, Box<dyn std::error::Error>> {
    init_logging();

    Ok(build_site(routes, navigation, &options)?)
}
