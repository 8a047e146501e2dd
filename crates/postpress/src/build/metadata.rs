use std::{path::PathBuf, process::Termination, time::Instant};

/// Metadata returned by [`publish()`](crate::publish) for a single page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageOutput {
    pub url: String,
    pub file_path: PathBuf,
    /// The page failed to render and the error boundary was written instead.
    pub fell_back: bool,
}

/// Metadata returned by [`publish()`](crate::publish) for a single static file.
///
/// A static file is copied to the output directory without any processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticFileOutput {
    pub file_path: PathBuf,
    pub original_path: PathBuf,
}

/// Metadata returned by [`publish()`](crate::publish) after a build.
#[derive(Debug)]
pub struct BuildOutput {
    pub start_time: Instant,
    /// Number of posts in the content collection.
    pub records: usize,
    pub pages: Vec<PageOutput>,
    pub static_files: Vec<StaticFileOutput>,
    /// `posts.json` and `navigation.json`, when written.
    pub artifacts: Vec<PathBuf>,
}

impl BuildOutput {
    pub fn new(start_time: Instant) -> Self {
        Self {
            start_time,
            records: 0,
            pages: Vec::new(),
            static_files: Vec::new(),
            artifacts: Vec::new(),
        }
    }

    pub(crate) fn add_page(&mut self, url: String, file_path: PathBuf, fell_back: bool) {
        self.pages.push(PageOutput {
            url,
            file_path,
            fell_back,
        });
    }

    pub(crate) fn add_static_file(&mut self, file_path: PathBuf, original_path: PathBuf) {
        self.static_files.push(StaticFileOutput {
            file_path,
            original_path,
        });
    }

    pub fn page(&self, url: &str) -> Option<&PageOutput> {
        self.pages.iter().find(|page| page.url == url)
    }

    /// Pages replaced by the error boundary.
    pub fn failed_pages(&self) -> impl Iterator<Item = &PageOutput> {
        self.pages.iter().filter(|page| page.fell_back)
    }
}

impl Default for BuildOutput {
    fn default() -> Self {
        Self::new(Instant::now())
    }
}

impl Termination for BuildOutput {
    fn report(self) -> std::process::ExitCode {
        0.into()
    }
}
