use std::env;
use std::path::Path;

use postpress::navigation::NavigationSpec;
use postpress::{BuildOptions, BuildOutput, ContentOptions, publish, routes};

mod error_boundary;
mod layout;
mod navigation;
mod routes;

use error_boundary::SiteErrorBoundary;
use routes::*;

const DEFAULT_HOST_URL: &str = "http://localhost:3000";
const NAVIGATION_FILE: &str = "navigation.yaml";

fn main() -> Result<BuildOutput, Box<dyn std::error::Error>> {
    let host_url = env::var("WEBSITE_HOST_URL").unwrap_or_else(|_| DEFAULT_HOST_URL.to_string());

    let navigation = if Path::new(NAVIGATION_FILE).exists() {
        NavigationSpec::load(NAVIGATION_FILE)?
    } else {
        navigation::site_navigation()
    };

    publish(
        routes![Index, PostPage, CategoryPage::new(&navigation), About, NotFound],
        &navigation,
        BuildOptions {
            base_url: Some(host_url),
            content: ContentOptions {
                content_dir: "posts".into(),
                ..Default::default()
            },
            error_boundary: Box::new(SiteErrorBoundary),
            ..Default::default()
        },
    )
}
