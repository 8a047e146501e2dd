use pulldown_cmark::{Event, MetadataBlockKind, Options, Parser, Tag, TagEnd};

/// A source document split into its YAML header block and the Markdown that follows it.
#[derive(Debug, PartialEq)]
pub struct SplitDocument<'a> {
    pub header: Option<String>,
    pub body: &'a str,
}

/// Separate the `---` delimited header block at the very top of a document from its body.
pub fn split_frontmatter(source: &str) -> SplitDocument<'_> {
    let mut header: Option<String> = None;
    let mut in_header = false;

    for (event, range) in
        Parser::new_ext(source, Options::ENABLE_YAML_STYLE_METADATA_BLOCKS).into_offset_iter()
    {
        match event {
            Event::Start(Tag::MetadataBlock(MetadataBlockKind::YamlStyle)) => {
                in_header = true;
                header = Some(String::new());
            }
            Event::Text(text) if in_header => {
                if let Some(header) = header.as_mut() {
                    header.push_str(&text);
                }
            }
            Event::End(TagEnd::MetadataBlock(_)) => {
                let body = source[range.end..].trim_start_matches(['\r', '\n']);
                return SplitDocument { header, body };
            }
            // The header block can only be the first thing in a document.
            _ => break,
        }
    }

    SplitDocument {
        header: None,
        body: source,
    }
}

/// Drop top-level ESM blocks (`import`/`export` statements) from an MDX body.
///
/// An ESM block starts at a line beginning with `import ` or `export ` and runs until the next blank line.
/// Fenced code is left untouched.
pub fn strip_esm(body: &str) -> String {
    let mut output = String::with_capacity(body.len());
    let mut fence: Option<&str> = None;
    let mut in_esm = false;
    let mut at_block_start = true;

    for line in body.split_inclusive('\n') {
        let trimmed = line.trim_end_matches(['\r', '\n']);

        if in_esm {
            if trimmed.trim().is_empty() {
                in_esm = false;
                at_block_start = true;
            }
            continue;
        }

        if let Some(marker) = fence {
            if trimmed.trim_start().starts_with(marker) {
                fence = None;
            }
        } else if trimmed.trim_start().starts_with("```") {
            fence = Some("```");
        } else if trimmed.trim_start().starts_with("~~~") {
            fence = Some("~~~");
        } else if at_block_start && (trimmed.starts_with("import ") || trimmed.starts_with("export ")) {
            in_esm = true;
            continue;
        }

        at_block_start = fence.is_none() && trimmed.trim().is_empty();
        output.push_str(line);
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_frontmatter() {
        let source = "---\ntitle: Hello\ncategory: dev\n---\n\n# Heading\n\nText.\n";
        let split = split_frontmatter(source);

        let header = split.header.unwrap();
        assert!(header.contains("title: Hello"));
        assert!(header.contains("category: dev"));
        assert_eq!(split.body, "# Heading\n\nText.\n");
    }

    #[test]
    fn test_no_frontmatter() {
        let source = "# Just a heading\n\nNo header here.\n";
        let split = split_frontmatter(source);

        assert_eq!(split.header, None);
        assert_eq!(split.body, source);
    }

    #[test]
    fn test_thematic_break_later_is_not_a_header() {
        let source = "Intro paragraph.\n\n---\ntitle: nope\n---\n";
        let split = split_frontmatter(source);

        assert_eq!(split.header, None);
    }

    #[test]
    fn test_strip_esm() {
        let body = "import { BlurImage } from '@/components/BlurImage'\nimport Chart from './chart'\n\n# Title\n\nexport const meta = {\n  draft: false,\n}\n\nSome text that mentions import statements.\n";
        let stripped = strip_esm(body);

        assert!(!stripped.contains("BlurImage"));
        assert!(!stripped.contains("export const"));
        assert!(!stripped.contains("draft"));
        assert!(stripped.contains("# Title"));
        assert!(stripped.contains("Some text that mentions import statements."));
    }

    #[test]
    fn test_strip_esm_keeps_code_fences() {
        let body = "```js\nimport fs from 'fs'\n\nexport default fs\n```\n";
        assert_eq!(strip_esm(body), body);
    }

    #[test]
    fn test_strip_esm_only_at_block_start() {
        let body = "A paragraph\nimport this line stays\n";
        assert_eq!(strip_esm(body), body);
    }
}
