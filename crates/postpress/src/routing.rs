use std::path::{Path, PathBuf};

/// A URL whose last segment has an extension, like `/404.html` or `/feed.xml`, is written as is.
pub fn guess_if_url_is_endpoint(url: &str) -> bool {
    let real_path = Path::new(url);

    real_path.extension().is_some()
}

/// Path of the file a URL is written to, e.g. `/posts/dev/hello` -> `dist/posts/dev/hello/index.html`.
pub fn url_to_file_path(url: &str, output_dir: &Path) -> PathBuf {
    let mut path = PathBuf::from(output_dir);
    path.extend(url.split('/').filter(|s| !s.is_empty() && *s != "." && *s != ".."));

    if !guess_if_url_is_endpoint(url) {
        path.push("index.html");
    }

    path
}
