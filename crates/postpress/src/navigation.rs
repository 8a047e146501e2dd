//! The site menu: hand-authored links merged with per-category post counts.
//!
//! A [`NavigationSpec`] describes the menu, [`derive_navigation`] turns it into a [`NavigationConfig`] for one
//! [`ContentCollection`]. Counts are copied into the config: they describe the collection at build time and
//! never change afterwards.
//!
//! ## Example
//! ```yaml
//! main:
//!   - { href: /, label: 首页, icon: home }
//! posts:
//!   - { key: dev, label: 编程开发, icon: laptop-code }
//! online:
//!   - { href: "https://github.com/macongcong", label: GitHub, icon: github }
//! ```
use std::fs;
use std::path::Path;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::content::ContentCollection;
use crate::errors::NavigationError;

/// Opaque reference to an icon. Which artwork it maps to is up to the templates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IconRef(String);

impl IconRef {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Where a menu entry points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NavTarget {
    /// A path on this site, e.g. `/about`.
    Internal(String),
    /// A URL on another site.
    External(String),
}

impl NavTarget {
    pub fn href(&self) -> &str {
        match self {
            NavTarget::Internal(path) => path,
            NavTarget::External(url) => url,
        }
    }

    pub fn is_external(&self) -> bool {
        matches!(self, NavTarget::External(_))
    }
}

impl From<String> for NavTarget {
    fn from(href: String) -> Self {
        if href.starts_with("http://") || href.starts_with("https://") || href.starts_with("//") {
            NavTarget::External(href)
        } else {
            NavTarget::Internal(href)
        }
    }
}

impl From<&str> for NavTarget {
    fn from(href: &str) -> Self {
        NavTarget::from(href.to_string())
    }
}

impl From<NavTarget> for String {
    fn from(target: NavTarget) -> Self {
        match target {
            NavTarget::Internal(href) | NavTarget::External(href) => href,
        }
    }
}

/// One menu item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationEntry {
    #[serde(rename = "href")]
    pub target: NavTarget,
    pub label: String,
    pub icon: IconRef,
    /// Number of posts behind this entry, for entries derived from a category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl NavigationEntry {
    pub fn new(href: impl Into<NavTarget>, label: impl Into<String>, icon: &str) -> Self {
        Self {
            target: href.into(),
            label: label.into(),
            icon: IconRef::new(icon),
            count: None,
        }
    }
}

/// A category shown in the posts section of the menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryLink {
    /// Value of the `category` field of the posts it counts.
    pub key: String,
    pub label: String,
    pub icon: IconRef,
}

impl CategoryLink {
    pub fn new(key: impl Into<String>, label: impl Into<String>, icon: &str) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            icon: IconRef::new(icon),
        }
    }
}

/// The authored menu, before counts are attached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationSpec {
    pub main: Vec<NavigationEntry>,
    pub posts: Vec<CategoryLink>,
    pub projects: Vec<NavigationEntry>,
    pub online: Vec<NavigationEntry>,
}

impl NavigationSpec {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, NavigationError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, NavigationError> {
        let path = path.as_ref();
        let yaml = fs::read_to_string(path).map_err(|source| NavigationError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&yaml)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Main,
    Posts,
    Projects,
    Online,
}

impl Section {
    pub const ALL: [Section; 4] = [Section::Main, Section::Posts, Section::Projects, Section::Online];

    pub fn name(&self) -> &'static str {
        match self {
            Section::Main => "main",
            Section::Posts => "posts",
            Section::Projects => "projects",
            Section::Online => "online",
        }
    }
}

/// The finished menu, consumed by templates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NavigationConfig {
    pub main: Vec<NavigationEntry>,
    pub posts: Vec<NavigationEntry>,
    pub projects: Vec<NavigationEntry>,
    pub online: Vec<NavigationEntry>,
}

impl NavigationConfig {
    pub fn section(&self, section: Section) -> &[NavigationEntry] {
        match section {
            Section::Main => &self.main,
            Section::Posts => &self.posts,
            Section::Projects => &self.projects,
            Section::Online => &self.online,
        }
    }

    /// Sections in menu order.
    pub fn sections(&self) -> impl Iterator<Item = (Section, &[NavigationEntry])> {
        Section::ALL
            .into_iter()
            .map(move |section| (section, self.section(section)))
    }
}

const CATEGORY_PREFIX: &str = "/categories/";

/// URL of the page listing the posts of a category.
pub fn category_route(key: &str) -> String {
    format!("{}{}", CATEGORY_PREFIX, key)
}

/// The category key of a URL built by [`category_route`]. Keys may contain `/`.
pub fn category_key(url: &str) -> Option<&str> {
    url.strip_prefix(CATEGORY_PREFIX)
        .map(|key| key.trim_end_matches('/'))
        .filter(|key| !key.is_empty())
}

/// Attach post counts to the posts section of `spec`. Other sections are copied as they are.
///
/// Every category of the spec gets an entry, in spec order, even when no post belongs to it.
pub fn derive_navigation(spec: &NavigationSpec, content: &ContentCollection) -> NavigationConfig {
    let posts = spec
        .posts
        .iter()
        .map(|category| {
            let count = content.count_by_category(&category.key);
            debug!(target: "navigation", "{} ({}): {} posts", category.label, category.key, count);

            NavigationEntry {
                target: NavTarget::Internal(category_route(&category.key)),
                label: category.label.clone(),
                icon: category.icon.clone(),
                count: Some(count),
            }
        })
        .collect();

    for (category, count) in content.categories() {
        if !spec.posts.iter().any(|declared| declared.key == category) {
            warn!(target: "navigation", "{} posts use category `{}`, which has no menu entry", count, category);
        }
    }

    NavigationConfig {
        main: spec.main.clone(),
        posts,
        projects: spec.projects.clone(),
        online: spec.online.clone(),
    }
}
