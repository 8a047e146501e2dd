//! Core functions and structs to load the posts of the blog.
//!
//! Every source document becomes one [`ContentRecord`]: its header block is validated against
//! [`schema::POST_FIELDS`] and its URL is computed from its path. All records of one build form a
//! [`ContentCollection`], which is immutable once loaded.
//!
//! ## Example
//! ```rs
//! use postpress::ContentOptions;
//! use postpress::content::ContentCollection;
//!
//! let content = ContentCollection::load(&ContentOptions::default())?;
//! for post in content.filter_by_category("dev") {
//!     println!("{} -> {}", post.title, post.url);
//! }
//! ```
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{DateTime, Utc};
use glob::glob as glob_fs;
use log::{debug, info};
use rustc_hash::FxHashMap;
use serde::Serialize;
use serde_yaml::{Mapping, Value};

mod frontmatter;
mod highlight;
mod identifier;
pub mod markdown;
pub mod schema;
mod slugger;

pub use frontmatter::{split_frontmatter, strip_esm};
pub use identifier::{identifier_url, path_identifier};
pub use markdown::{
    MarkdownHeading, MarkdownOptions, collect_headings,
    components::{AnchoredHeading, HeadingComponent, LinkComponent, MarkdownComponents},
    render_markdown, render_markdown_with_options,
};
pub use slugger::{Slugger, slugify};

use crate::ContentOptions;
use crate::errors::{ContentError, MarkdownError};
use crate::logging::{FormatElapsedTimeOptions, format_elapsed_time};

/// One validated post.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentRecord {
    /// Path identifier, e.g. `dev/rust-tips` for `posts/dev/rust-tips.mdx`.
    pub id: String,
    /// `/posts/` followed by the path identifier. Unique within a collection.
    pub url: String,
    pub title: String,
    pub date: DateTime<Utc>,
    pub category: String,
    pub description: String,
    pub tags: Option<String>,
    pub cover: Option<String>,
    pub slug: Option<String>,
    pub source_path: PathBuf,
    /// Markdown following the header block. MDX import/export statements are already removed.
    pub body: String,
    pub headings: Vec<MarkdownHeading>,
}

impl ContentRecord {
    /// The comma-separated `tags` field, split and trimmed.
    pub fn tags(&self) -> Vec<&str> {
        self.tags
            .as_deref()
            .map(|tags| {
                tags.split([',', '，'])
                    .map(str::trim)
                    .filter(|tag| !tag.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn render(&self, options: &MarkdownOptions) -> Result<String, MarkdownError> {
        render_markdown_with_options(&self.body, options)
    }
}

/// Extract one record from a source document.
///
/// `relative_path` is the document's path inside [`ContentOptions::content_dir`]; errors report the full path.
pub fn extract_record(
    relative_path: &Path,
    source: &str,
    options: &ContentOptions,
) -> Result<ContentRecord, ContentError> {
    let source_path = options.content_dir.join(relative_path);
    let document = split_frontmatter(source);

    let header = match document.header {
        Some(header) => match serde_yaml::from_str::<Value>(&header) {
            Ok(Value::Mapping(mapping)) => mapping,
            Ok(Value::Null) => Mapping::new(),
            Ok(_) => return Err(ContentError::MalformedHeader { path: source_path }),
            Err(source) => {
                return Err(ContentError::Frontmatter {
                    path: source_path,
                    source,
                });
            }
        },
        None => Mapping::new(),
    };

    let fields = schema::validate(&header, &source_path)?;

    let is_mdx = relative_path.extension().is_some_and(|ext| ext == "mdx");
    let body = if is_mdx {
        strip_esm(document.body)
    } else {
        document.body.to_string()
    };

    let id = path_identifier(relative_path);
    let url = identifier_url(&options.url_prefix, &id);
    let headings = collect_headings(&body);

    Ok(ContentRecord {
        id,
        url,
        title: fields.title,
        date: fields.date,
        category: fields.category,
        description: fields.description,
        tags: fields.tags,
        cover: fields.cover,
        slug: fields.slug,
        source_path,
        body,
        headings,
    })
}

/// All the posts of one build, in discovery order.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct ContentCollection {
    records: Vec<ContentRecord>,
}

impl ContentCollection {
    /// Build a collection from already extracted records, rejecting two records with the same URL.
    pub fn from_records(records: Vec<ContentRecord>) -> Result<Self, ContentError> {
        let mut seen: FxHashMap<&str, &Path> = FxHashMap::default();

        for record in &records {
            if let Some(first) = seen.insert(&record.url, &record.source_path) {
                return Err(ContentError::Collision {
                    url: record.url.clone(),
                    first: first.to_path_buf(),
                    second: record.source_path.clone(),
                });
            }
        }

        Ok(Self { records })
    }

    /// Build a collection from in-memory `(relative path, source)` documents, in the given order.
    pub fn from_documents<P, S>(
        documents: impl IntoIterator<Item = (P, S)>,
        options: &ContentOptions,
    ) -> Result<Self, ContentError>
    where
        P: AsRef<Path>,
        S: AsRef<str>,
    {
        let records = documents
            .into_iter()
            .map(|(path, source)| extract_record(path.as_ref(), source.as_ref(), options))
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_records(records)
    }

    /// Glob [`ContentOptions::pattern`] inside [`ContentOptions::content_dir`] and extract every match.
    ///
    /// Documents are discovered in path order.
    pub fn load(options: &ContentOptions) -> Result<Self, ContentError> {
        let start = Instant::now();
        let pattern = options.content_dir.join(&options.pattern);
        let pattern = pattern.to_string_lossy();

        let entries = glob_fs(&pattern).map_err(|source| ContentError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;

        let mut records = vec![];
        for entry in entries {
            let path = entry?;
            if !path.is_file() {
                continue;
            }

            let source = std::fs::read_to_string(&path).map_err(|source| ContentError::ReadFailed {
                path: path.clone(),
                source,
            })?;
            let relative_path =
                pathdiff::diff_paths(&path, &options.content_dir).unwrap_or_else(|| path.clone());

            let record = extract_record(&relative_path, &source, options)?;
            debug!(target: "content", "{} -> {}", path.display(), record.url);
            records.push(record);
        }

        let collection = Self::from_records(records)?;
        info!(target: "content", "loaded {} posts from {} in {}", collection.len(), options.content_dir.display(), format_elapsed_time(start.elapsed(), &FormatElapsedTimeOptions::default()));

        Ok(collection)
    }

    pub fn records(&self) -> &[ContentRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ContentRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Find a record by its path identifier.
    pub fn get(&self, id: &str) -> Option<&ContentRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn get_by_url(&self, url: &str) -> Option<&ContentRecord> {
        self.records.iter().find(|record| record.url == url)
    }

    /// Records whose category is exactly `category`, in discovery order.
    pub fn filter_by_category(&self, category: &str) -> Vec<&ContentRecord> {
        self.records
            .iter()
            .filter(|record| record.category == category)
            .collect()
    }

    /// Number of records in `category`. Zero when nothing matches.
    pub fn count_by_category(&self, category: &str) -> usize {
        self.filter_by_category(category).len()
    }

    /// Every record, newest first. Records published at the same time keep their discovery order.
    pub fn sorted_by_date(&self) -> Vec<&ContentRecord> {
        let mut records: Vec<&ContentRecord> = self.records.iter().collect();
        records.sort_by(|a, b| b.date.cmp(&a.date));
        records
    }

    /// Distinct categories with their number of records, in order of first appearance.
    pub fn categories(&self) -> Vec<(&str, usize)> {
        let mut categories: Vec<(&str, usize)> = vec![];
        for record in &self.records {
            match categories
                .iter_mut()
                .find(|(category, _)| *category == record.category)
            {
                Some((_, count)) => *count += 1,
                None => categories.push((&record.category, 1)),
            }
        }
        categories
    }
}

impl<'a> IntoIterator for &'a ContentCollection {
    type Item = &'a ContentRecord;
    type IntoIter = std::slice::Iter<'a, ContentRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SchemaViolation;

    fn post(title: &str, date: &str, category: &str) -> String {
        format!(
            "---\ntitle: {title}\ndate: {date}\ncategory: {category}\ndescription: About {title}\n---\n\n# {title}\n\nBody.\n"
        )
    }

    fn collection(documents: &[(&str, String)]) -> Result<ContentCollection, ContentError> {
        ContentCollection::from_documents(documents.iter().cloned(), &ContentOptions::default())
    }

    #[test]
    fn test_extract_record() {
        let options = ContentOptions::default();
        let source = "---\ntitle: Rust tips\ndate: 2024-05-01\ncategory: dev\ndescription: Tips\ntags: rust, tooling\n---\n\n## First tip\n";
        let record = extract_record(Path::new("dev/rust-tips.mdx"), source, &options).unwrap();

        assert_eq!(record.id, "dev/rust-tips");
        assert_eq!(record.url, "/posts/dev/rust-tips");
        assert_eq!(record.title, "Rust tips");
        assert_eq!(record.category, "dev");
        assert_eq!(record.source_path, Path::new("posts/dev/rust-tips.mdx"));
        assert_eq!(record.tags(), vec!["rust", "tooling"]);
        assert_eq!(record.headings.len(), 1);
        assert_eq!(record.headings[0].id, "first-tip");
        assert_eq!(record.body, "## First tip\n");
    }

    #[test]
    fn test_url_prefix_is_configurable() {
        let options = ContentOptions {
            url_prefix: "/blog".into(),
            ..Default::default()
        };
        let record =
            extract_record(Path::new("hello.mdx"), &post("Hello", "2024-01-01", "dev"), &options)
                .unwrap();

        assert_eq!(record.url, "/blog/hello");
    }

    #[test]
    fn test_mdx_imports_are_removed_from_body() {
        let source = "---\ntitle: a\ndate: 2024-01-01\ncategory: dev\ndescription: b\n---\nimport { BlurImage } from '@/components/BlurImage'\n\n<BlurImage src=\"/a.png\" alt=\"a\" />\n";
        let record =
            extract_record(Path::new("a.mdx"), source, &ContentOptions::default()).unwrap();

        assert!(!record.body.contains("import"));
        assert!(record.body.contains("<BlurImage"));
    }

    #[test]
    fn test_missing_header_reports_title() {
        let err = extract_record(Path::new("bare.mdx"), "# No header\n", &ContentOptions::default())
            .unwrap_err();

        match err {
            ContentError::Schema(err) => {
                assert_eq!(err.field, "title");
                assert_eq!(err.violation, SchemaViolation::Missing);
                assert_eq!(err.path, Path::new("posts/bare.mdx"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_category_fails_the_collection() {
        let broken = "---\ntitle: a\ndate: 2024-01-01\ndescription: b\n---\n".to_string();
        let err = collection(&[
            ("ok.mdx", post("Ok", "2024-01-01", "dev")),
            ("broken.mdx", broken),
        ])
        .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("posts/broken.mdx"), "{message}");
        assert!(message.contains("category"), "{message}");
    }

    #[test]
    fn test_header_must_be_a_mapping() {
        let err = extract_record(
            Path::new("list.mdx"),
            "---\n- a\n- b\n---\n",
            &ContentOptions::default(),
        )
        .unwrap_err();

        assert!(matches!(err, ContentError::MalformedHeader { .. }));
    }

    #[test]
    fn test_invalid_yaml() {
        let err = extract_record(
            Path::new("bad.mdx"),
            "---\ntitle: [unclosed\n---\n",
            &ContentOptions::default(),
        )
        .unwrap_err();

        assert!(matches!(err, ContentError::Frontmatter { .. }));
    }

    #[test]
    fn test_index_and_file_with_same_identifier_collide() {
        let err = collection(&[
            ("foo.mdx", post("Foo", "2024-01-01", "dev")),
            ("foo/index.mdx", post("Foo again", "2024-01-02", "dev")),
        ])
        .unwrap_err();

        match err {
            ContentError::Collision { url, first, second } => {
                assert_eq!(url, "/posts/foo");
                assert_eq!(first, Path::new("posts/foo.mdx"));
                assert_eq!(second, Path::new("posts/foo/index.mdx"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_filter_and_count_by_category() {
        let content = collection(&[
            ("b.mdx", post("B", "2024-02-01", "dev")),
            ("a.mdx", post("A", "2024-03-01", "ai")),
            ("c.mdx", post("C", "2024-01-01", "dev")),
        ])
        .unwrap();

        let dev: Vec<&str> = content
            .filter_by_category("dev")
            .iter()
            .map(|record| record.title.as_str())
            .collect();
        assert_eq!(dev, vec!["B", "C"]);

        for category in ["dev", "ai", "thoughts", ""] {
            let count = content.count_by_category(category);
            assert_eq!(count, content.filter_by_category(category).len());
            assert_eq!(count, content.count_by_category(category));
        }
        assert_eq!(content.count_by_category("thoughts"), 0);
        assert!(content.filter_by_category("thoughts").is_empty());
    }

    #[test]
    fn test_category_match_is_exact() {
        let content = collection(&[("a.mdx", post("A", "2024-01-01", "Dev"))]).unwrap();

        assert_eq!(content.count_by_category("dev"), 0);
        assert_eq!(content.count_by_category("Dev"), 1);
    }

    #[test]
    fn test_sorted_by_date() {
        let content = collection(&[
            ("old.mdx", post("Old", "2023-01-01", "dev")),
            ("new.mdx", post("New", "2024-06-01", "ai")),
            ("same-a.mdx", post("Same A", "2024-01-01", "dev")),
            ("same-b.mdx", post("Same B", "2024-01-01", "dev")),
        ])
        .unwrap();

        let titles: Vec<&str> = content
            .sorted_by_date()
            .into_iter()
            .map(|record| record.title.as_str())
            .collect();
        assert_eq!(titles, vec!["New", "Same A", "Same B", "Old"]);

        // Discovery order is left alone
        assert_eq!(content.records()[0].title, "Old");
    }

    #[test]
    fn test_categories_and_lookup() {
        let content = collection(&[
            ("a.mdx", post("A", "2024-01-01", "dev")),
            ("b.mdx", post("B", "2024-01-01", "reading")),
            ("c.mdx", post("C", "2024-01-01", "dev")),
        ])
        .unwrap();

        assert_eq!(content.categories(), vec![("dev", 2), ("reading", 1)]);
        assert_eq!(content.get("b").map(|r| r.title.as_str()), Some("B"));
        assert_eq!(content.get_by_url("/posts/c").map(|r| r.title.as_str()), Some("C"));
        assert!(content.get("missing").is_none());
    }

    #[test]
    fn test_tags_accept_fullwidth_commas() {
        let source = "---\ntitle: a\ndate: 2024-01-01\ncategory: dev\ndescription: b\ntags: 随笔，生活, \n---\n";
        let record =
            extract_record(Path::new("a.mdx"), source, &ContentOptions::default()).unwrap();

        assert_eq!(record.tags(), vec!["随笔", "生活"]);
    }
}
