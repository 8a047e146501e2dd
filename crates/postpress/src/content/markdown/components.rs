// Component traits that hide pulldown-cmark implementation details

use super::escape_attr;

/// Trait for custom heading components
pub trait HeadingComponent {
    /// Render the opening tag
    fn render_start(&self, level: u8, id: &str, classes: &[&str]) -> String;

    /// Render the closing tag (optional)
    fn render_end(&self, level: u8) -> String {
        format!("</h{}>", level)
    }
}

/// Trait for custom link components
pub trait LinkComponent {
    /// Render the opening tag
    fn render_start(&self, url: &str, title: Option<&str>, autolink: bool) -> String;

    /// Render the closing tag
    fn render_end(&self) -> String {
        "</a>".to_string()
    }
}

/// Default heading: an `id` on the heading and an empty anchor link to it as its first child.
pub struct AnchoredHeading {
    pub anchor_class: String,
}

impl Default for AnchoredHeading {
    fn default() -> Self {
        Self {
            anchor_class: "anchor".to_string(),
        }
    }
}

impl HeadingComponent for AnchoredHeading {
    fn render_start(&self, level: u8, id: &str, classes: &[&str]) -> String {
        let id = escape_attr(id);
        let class_attr = if classes.is_empty() {
            String::new()
        } else {
            format!(" class=\"{}\"", escape_attr(&classes.join(" ")))
        };

        format!(
            "<h{level} id=\"{id}\"{class_attr}><a class=\"{}\" aria-hidden=\"true\" tabindex=\"-1\" href=\"#{id}\"></a>",
            escape_attr(&self.anchor_class)
        )
    }
}

/// Registry for custom markdown components
pub struct MarkdownComponents {
    pub heading: Box<dyn HeadingComponent + Send + Sync>,
    pub link: Option<Box<dyn LinkComponent + Send + Sync>>,
}

impl Default for MarkdownComponents {
    fn default() -> Self {
        Self {
            heading: Box::new(AnchoredHeading::default()),
            link: None,
        }
    }
}

impl MarkdownComponents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn heading(mut self, component: impl HeadingComponent + Send + Sync + 'static) -> Self {
        self.heading = Box::new(component);
        self
    }

    pub fn link(mut self, component: impl LinkComponent + Send + Sync + 'static) -> Self {
        self.link = Some(Box::new(component));
        self
    }
}
