use pulldown_cmark::{
    CodeBlockKind, CowStr, Event, LinkType, Options, Parser, Tag, TagEnd, TextMergeStream,
};
use pulldown_cmark_escape::{FmtWriter, escape_html};
use serde::Serialize;

pub mod autolink;
pub mod components;

use self::autolink::{Segment, find_links};
use self::components::MarkdownComponents;
use super::{highlight::CodeBlock, highlight::resolve_theme, slugger::Slugger};
use crate::errors::MarkdownError;

/// Represents a Markdown heading.
///
/// Collected for every post at build time, can be used to generate a table of contents. The `id` is the one
/// the rendered heading carries, so `#{id}` links always land.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkdownHeading {
    pub title: String,
    pub id: String,
    pub level: u8,
    pub classes: Vec<String>,
}

/// Options for [`render_markdown_with_options`].
pub struct MarkdownOptions {
    /// Name of a syntect default theme, or path to a `.tmTheme` file. Defaults to `base16-ocean.dark`.
    pub highlight_theme: String,
    pub components: MarkdownComponents,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            highlight_theme: "base16-ocean.dark".to_string(),
            components: MarkdownComponents::default(),
        }
    }
}

fn parser_options() -> Options {
    Options::ENABLE_YAML_STYLE_METADATA_BLOCKS
        | Options::ENABLE_HEADING_ATTRIBUTES
        | Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_GFM
}

pub(crate) fn escape_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    // Writing into a String can't fail.
    let _ = escape_html(FmtWriter(&mut escaped), value);
    escaped
}

/// Collect the headings of a Markdown document, with the IDs [`render_markdown`] gives them.
pub fn collect_headings(content: &str) -> Vec<MarkdownHeading> {
    let mut slugger = Slugger::new();
    let events: Vec<Event> = Parser::new_ext(content, parser_options()).collect();

    let mut headings = vec![];
    for (i, event) in events.iter().enumerate() {
        if let Event::Start(Tag::Heading {
            level, id, classes, ..
        }) = event
        {
            let title = find_matching_heading_end(&events, i)
                .map(|end| get_text_from_events(&events[i + 1..end]))
                .unwrap_or_default();
            let id = match id {
                Some(id) => id.to_string(),
                None => slugger.slugify(&title),
            };

            headings.push(MarkdownHeading {
                title,
                id,
                level: *level as u8,
                classes: classes.iter().map(|c| c.to_string()).collect(),
            });
        }
    }

    headings
}

/// Render Markdown content to HTML.
///
/// ## Example
/// ```rs
/// use postpress::content::render_markdown;
/// let markdown = r#"# Hello, world!"#;
/// let html = render_markdown(markdown)?;
/// ```
pub fn render_markdown(content: &str) -> Result<String, MarkdownError> {
    render_markdown_with_options(content, &MarkdownOptions::default())
}

/// Render Markdown content to HTML with GFM extensions, heading IDs and anchors, literal autolinks and
/// highlighted code blocks.
pub fn render_markdown_with_options(
    content: &str,
    options: &MarkdownOptions,
) -> Result<String, MarkdownError> {
    let theme = resolve_theme(&options.highlight_theme)?;

    let mut code_block = None;
    let mut code_block_content = String::new();
    let mut in_frontmatter = false;
    let mut link_depth = 0usize;
    let mut events = Vec::new();

    // First pass: drop frontmatter, highlight code blocks and find literal links in prose.
    // Adjacent text is merged first, the parser splits it at delimiters like `_`.
    for event in TextMergeStream::new(Parser::new_ext(content, parser_options())) {
        match event {
            Event::Start(Tag::MetadataBlock(_)) => {
                in_frontmatter = true;
            }
            Event::End(TagEnd::MetadataBlock(_)) => {
                in_frontmatter = false;
            }
            _ if in_frontmatter => {}
            Event::Start(Tag::CodeBlock(ref kind)) => {
                let fence = match kind {
                    CodeBlockKind::Fenced(fence) => fence.as_ref(),
                    CodeBlockKind::Indented => "",
                };
                let (block, begin) = CodeBlock::new(fence);
                code_block = Some(block);
                events.push(Event::Html(begin.into()));
            }
            Event::End(TagEnd::CodeBlock) => {
                if let Some(block) = code_block.take() {
                    let html = block.highlight(&code_block_content, &theme)?;
                    events.push(Event::Html(html.into()));
                }
                code_block_content.clear();
                events.push(Event::Html("</code></pre>\n".into()));
            }
            Event::Text(ref text) if code_block.is_some() => {
                code_block_content.push_str(text);
            }
            Event::Start(Tag::Link { .. }) | Event::Start(Tag::Image { .. }) => {
                link_depth += 1;
                events.push(event);
            }
            Event::End(TagEnd::Link) | Event::End(TagEnd::Image) => {
                link_depth = link_depth.saturating_sub(1);
                events.push(event);
            }
            Event::Text(ref text) if link_depth == 0 => {
                let segments = find_links(text);
                if segments.len() == 1 && matches!(segments[0], Segment::Text(_)) {
                    events.push(event.clone());
                    continue;
                }

                for segment in segments {
                    match segment {
                        Segment::Text(text) => events.push(Event::Text(text.to_string().into())),
                        Segment::Link { href, text } => {
                            events.push(Event::Start(Tag::Link {
                                link_type: LinkType::Autolink,
                                dest_url: href.into(),
                                title: CowStr::Borrowed(""),
                                id: CowStr::Borrowed(""),
                            }));
                            events.push(Event::Text(text.to_string().into()));
                            events.push(Event::End(TagEnd::Link));
                        }
                    }
                }
            }
            _ => {
                events.push(event);
            }
        }
    }

    // Second pass: transform events with components
    let mut slugger = Slugger::new();
    let transformed_events = transform_events_with_components(&events, &options.components, &mut slugger);

    let mut html_output = String::new();
    pulldown_cmark::html::push_html(&mut html_output, transformed_events.into_iter());
    Ok(html_output)
}

fn transform_events_with_components<'a>(
    events: &[Event<'a>],
    components: &MarkdownComponents,
    slugger: &mut Slugger,
) -> Vec<Event<'a>> {
    let mut transformed = Vec::with_capacity(events.len());

    for (i, event) in events.iter().enumerate() {
        match event {
            Event::Start(Tag::Heading {
                level, id, classes, ..
            }) => {
                let heading_id = match id {
                    Some(id) => id.to_string(),
                    None => {
                        let heading_content = find_matching_heading_end(events, i)
                            .map(|end| get_text_from_events(&events[i + 1..end]))
                            .unwrap_or_default();
                        slugger.slugify(&heading_content)
                    }
                };
                let classes_vec: Vec<&str> = classes.iter().map(|c| c.as_ref()).collect();

                let html = components
                    .heading
                    .render_start(*level as u8, &heading_id, &classes_vec);
                transformed.push(Event::Html(html.into()));
            }
            Event::End(TagEnd::Heading(level)) => {
                let html = components.heading.render_end(*level as u8);
                transformed.push(Event::Html(html.into()));
            }

            Event::Start(Tag::Link {
                link_type,
                dest_url,
                title,
                ..
            }) => match &components.link {
                Some(component) => {
                    let title = if title.is_empty() {
                        None
                    } else {
                        Some(title.as_ref())
                    };
                    let html = component.render_start(
                        dest_url.as_ref(),
                        title,
                        *link_type == LinkType::Autolink,
                    );
                    transformed.push(Event::Html(html.into()));
                }
                None => transformed.push(event.clone()),
            },
            Event::End(TagEnd::Link) => match &components.link {
                Some(component) => transformed.push(Event::Html(component.render_end().into())),
                None => transformed.push(event.clone()),
            },

            _ => transformed.push(event.clone()),
        }
    }

    transformed
}

fn get_text_from_events(parser_slice: &[Event]) -> String {
    let mut title = String::new();

    for event in parser_slice.iter() {
        match event {
            Event::Text(text) | Event::Code(text) => title += text,
            _ => continue,
        }
    }

    title
}

fn find_matching_heading_end(events: &[Event], start_index: usize) -> Option<usize> {
    events
        .iter()
        .enumerate()
        .skip(start_index + 1)
        .find(|(_, event)| matches!(event, Event::End(TagEnd::Heading(_))))
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::markdown::components::{HeadingComponent, LinkComponent};

    struct PlainHeading;

    impl HeadingComponent for PlainHeading {
        fn render_start(&self, level: u8, id: &str, _classes: &[&str]) -> String {
            format!("<h{} id=\"{}\">🎯", level, id)
        }
    }

    struct ExternalLink;

    impl LinkComponent for ExternalLink {
        fn render_start(&self, url: &str, _title: Option<&str>, autolink: bool) -> String {
            format!("<a href=\"{}\" data-autolink=\"{}\">", url, autolink)
        }
    }

    #[test]
    fn test_headings_get_ids_and_anchors() {
        let html = render_markdown("# Hello, world!\n\n## Hello, world!\n").unwrap();

        assert!(html.contains(
            "<h1 id=\"hello-world\"><a class=\"anchor\" aria-hidden=\"true\" tabindex=\"-1\" href=\"#hello-world\"></a>Hello, world!</h1>"
        ));
        assert!(html.contains("<h2 id=\"hello-world-1\">"));
    }

    #[test]
    fn test_explicit_heading_id_wins() {
        let html = render_markdown("## Setup {#install}\n").unwrap();
        assert!(html.contains("<h2 id=\"install\">"));
    }

    #[test]
    fn test_collected_headings_match_rendered_ids() {
        let markdown = "# 为什么选择 Rust\n\n## Setup\n\n## Setup\n\n### Custom {#custom .note}\n";
        let headings = collect_headings(markdown);
        let html = render_markdown(markdown).unwrap();

        let ids: Vec<&str> = headings.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["为什么选择-rust", "setup", "setup-1", "custom"]);
        assert_eq!(headings[3].level, 3);
        assert_eq!(headings[3].classes, vec!["note".to_string()]);

        for id in ids {
            assert!(html.contains(&format!("id=\"{}\"", id)), "missing {id}");
        }
    }

    #[test]
    fn test_gfm_extensions() {
        let markdown = "| a | b |\n|---|---|\n| 1 | 2 |\n\n~~gone~~\n\n- [x] done\n";
        let html = render_markdown(markdown).unwrap();

        assert!(html.contains("<table>"));
        assert!(html.contains("<del>gone</del>"));
        assert!(html.contains("type=\"checkbox\""));
    }

    #[test]
    fn test_literal_autolinks() {
        let html = render_markdown("Read https://example.com/post today.").unwrap();
        assert!(html.contains("<a href=\"https://example.com/post\">https://example.com/post</a> today."));

        let html = render_markdown("Already [linked https://example.com](https://example.com).").unwrap();
        assert_eq!(html.matches("<a ").count(), 1);

        let html = render_markdown("`https://example.com`").unwrap();
        assert!(!html.contains("<a "));
    }

    #[test]
    fn test_literal_autolinks_span_emphasis_delimiters() {
        let html =
            render_markdown("See https://en.wikipedia.org/wiki/Rust_(programming_language) here").unwrap();

        assert!(html.contains(
            "<a href=\"https://en.wikipedia.org/wiki/Rust_(programming_language)\">https://en.wikipedia.org/wiki/Rust_(programming_language)</a> here"
        ));

        let html = render_markdown("Docs at www.example.com/snake_case_name.").unwrap();
        assert!(html.contains(
            "<a href=\"http://www.example.com/snake_case_name\">www.example.com/snake_case_name</a>."
        ));
    }

    #[test]
    fn test_escape_attr() {
        assert_eq!(escape_attr(r#"a"<b>&c"#), "a&quot;&lt;b&gt;&amp;c");
        assert_eq!(escape_attr("为什么选择-rust"), "为什么选择-rust");
    }

    #[test]
    fn test_code_blocks_are_highlighted() {
        let markdown = "```rust\nfn main() {}\n\nlet x = 1;\n```\n";
        let html = render_markdown(markdown).unwrap();

        assert!(html.starts_with("<pre data-language=\"rust\"><code data-language=\"rust\">"));
        assert!(html.contains("<span data-line=\"\"> </span>"));
        assert!(html.trim_end().ends_with("</code></pre>"));
    }

    #[test]
    fn test_frontmatter_is_not_rendered() {
        let html = render_markdown("---\ntitle: Hidden\n---\n\nVisible\n").unwrap();

        assert!(!html.contains("Hidden"));
        assert!(html.contains("Visible"));
    }

    #[test]
    fn test_custom_components() {
        let options = MarkdownOptions {
            components: MarkdownComponents::new().heading(PlainHeading).link(ExternalLink),
            ..Default::default()
        };
        let html = render_markdown_with_options(
            "# Title\n\n[a](https://a.dev) and https://b.dev",
            &options,
        )
        .unwrap();

        assert!(html.contains("<h1 id=\"title\">🎯Title</h1>"));
        assert!(html.contains("<a href=\"https://a.dev\" data-autolink=\"false\">a</a>"));
        assert!(html.contains("<a href=\"https://b.dev\" data-autolink=\"true\">https://b.dev</a>"));
    }

    #[test]
    fn test_unknown_theme_is_an_error() {
        let options = MarkdownOptions {
            highlight_theme: "no-such-theme".to_string(),
            ..Default::default()
        };

        assert!(render_markdown_with_options("text", &options).is_err());
    }
}
