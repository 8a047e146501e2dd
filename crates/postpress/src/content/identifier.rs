use std::path::{Component, Path};

/// Turn a document path, relative to the content directory, into its path identifier.
///
/// The extension is stripped, separators become `/`, and a trailing `index` segment is dropped, so
/// `notes/rust.mdx` is `notes/rust` and `notes/index.mdx` is `notes`.
pub fn path_identifier(relative_path: &Path) -> String {
    let without_extension = relative_path.with_extension("");

    let mut segments: Vec<String> = without_extension
        .components()
        .filter_map(|component| match component {
            Component::Normal(segment) => Some(segment.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    if segments.last().is_some_and(|last| last == "index") {
        segments.pop();
    }

    segments.join("/")
}

/// Join a URL prefix such as `/posts` with a path identifier.
pub fn identifier_url(prefix: &str, identifier: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    if identifier.is_empty() {
        format!("{}/", prefix)
    } else {
        format!("{}/{}", prefix, identifier)
    }
}
