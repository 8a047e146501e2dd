//! Generated data consumed outside of the HTML pages, e.g. by client-side search.
use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use serde::Serialize;

use crate::content::ContentCollection;
use crate::errors::BuildError;
use crate::navigation::NavigationConfig;

pub const POSTS_ARTIFACT: &str = "posts.json";
pub const NAVIGATION_ARTIFACT: &str = "navigation.json";

/// Write `posts.json` and `navigation.json` into `dir`, returning their paths.
pub fn write_artifacts(
    dir: &Path,
    content: &ContentCollection,
    navigation: &NavigationConfig,
) -> Result<Vec<PathBuf>, BuildError> {
    fs::create_dir_all(dir).map_err(|source| BuildError::WriteFailed {
        path: dir.to_path_buf(),
        source,
    })?;

    let posts = write_json(&dir.join(POSTS_ARTIFACT), content)?;
    let navigation = write_json(&dir.join(NAVIGATION_ARTIFACT), navigation)?;

    Ok(vec![posts, navigation])
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<PathBuf, BuildError> {
    let json = serde_json::to_string_pretty(value).map_err(|source| BuildError::Artifact {
        path: path.to_path_buf(),
        source,
    })?;

    fs::write(path, json).map_err(|source| BuildError::WriteFailed {
        path: path.to_path_buf(),
        source,
    })?;

    info!(target: "build", "wrote {}", path.display());
    Ok(path.to_path_buf())
}
