//! Error types for postpress.
use std::fmt::{self, Debug, Formatter};
use std::path::PathBuf;
use thiserror::Error;

use crate::content::schema::FieldType;

macro_rules! impl_debug_for_error {
    ($($t:ty),*) => {
        $(
            impl Debug for $t {
                fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                    // Errors returned from main are printed with Debug, thiserror only gives us Display.
                    write!(f, "{}", self)
                }
            }
        )*
    };
}

/// A source document whose header block does not match the declared schema.
#[derive(Error, Clone, PartialEq)]
#[error("{path}: field `{field}` {violation}")]
pub struct SchemaError {
    pub path: PathBuf,
    pub field: String,
    pub violation: SchemaViolation,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaViolation {
    #[error("is required but missing")]
    Missing,
    #[error("must be a {expected}, found {found}")]
    WrongType {
        expected: FieldType,
        found: &'static str,
    },
    #[error("is not a valid date: `{0}`")]
    InvalidDate(String),
}

#[derive(Error)]
pub enum ContentError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("{path}: could not parse the header block")]
    Frontmatter {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("{path}: the header block must be a mapping of field names to values")]
    MalformedHeader { path: PathBuf },

    #[error("`{url}` is produced by both {first} and {second}")]
    Collision {
        url: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("Failed to read content file: {path}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid content pattern `{pattern}`")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("Failed to list content files")]
    Glob(#[from] glob::GlobError),
}

#[derive(Error)]
pub enum MarkdownError {
    #[error("Theme `{0}` not found in default themes and could not be loaded from file")]
    UnknownTheme(String),

    #[error("Failed to highlight code block")]
    Highlight(#[from] syntect::Error),
}

#[derive(Error)]
pub enum NavigationError {
    #[error("Failed to read navigation file: {path}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid navigation file")]
    Parse(#[from] serde_yaml::Error),
}

#[derive(Error)]
pub enum BuildError {
    #[error(transparent)]
    Content(#[from] ContentError),

    #[error("Failed to write generated data `{path}`")]
    Artifact {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write `{path}`")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl_debug_for_error!(SchemaError, ContentError, MarkdownError, NavigationError, BuildError);
