use std::sync::OnceLock;
use syntect::{
    easy::HighlightLines,
    highlighting::{Theme, ThemeSet},
    html::{IncludeBackground, styled_line_to_highlighted_html},
    parsing::SyntaxSet,
    util::LinesWithEndings,
};

use crate::errors::MarkdownError;

static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
static THEME_SET: OnceLock<ThemeSet> = OnceLock::new();

fn get_syntax_set() -> &'static SyntaxSet {
    SYNTAX_SET.get_or_init(SyntaxSet::load_defaults_newlines)
}

fn get_theme_set() -> &'static ThemeSet {
    THEME_SET.get_or_init(ThemeSet::load_defaults)
}

/// Resolve a theme by name among syntect's default themes, falling back to loading it as a `.tmTheme` file.
pub fn resolve_theme(name: &str) -> Result<Theme, MarkdownError> {
    match get_theme_set().themes.get(name) {
        Some(theme) => Ok(theme.clone()),
        None => ThemeSet::get_theme(name).map_err(|_| MarkdownError::UnknownTheme(name.to_string())),
    }
}

fn opening_html(language: Option<&str>) -> String {
    match language {
        Some(lang) => format!(
            "<pre data-language=\"{lang}\"><code data-language=\"{lang}\">",
            lang = super::markdown::escape_attr(lang)
        ),
        None => "<pre><code>".to_string(),
    }
}

pub struct CodeBlockMeta {
    pub language: Option<String>,
}

impl CodeBlockMeta {
    /// Parse the info string after the opening fence, e.g. `rust {1,3}` or `ts title="a.ts"`.
    ///
    /// Only the language is used, the rest of the info string is ignored.
    pub fn new_from_string(fence: &str) -> Self {
        let language = fence
            .split(|c: char| c.is_whitespace() || c == '{' || c == ',')
            .next()
            .filter(|lang| !lang.is_empty())
            .map(String::from);

        Self { language }
    }
}

pub struct CodeBlock {
    pub meta: CodeBlockMeta,
}

impl CodeBlock {
    pub fn new(fence: &str) -> (Self, String) {
        let meta = CodeBlockMeta::new_from_string(fence);
        let opening_html = opening_html(meta.language.as_deref());

        (Self { meta }, opening_html)
    }

    /// Highlight the content of the block, one `<span data-line="">` per line.
    ///
    /// Lines with no visible content get a single space so they keep their height.
    pub fn highlight(&self, content: &str, theme: &Theme) -> Result<String, MarkdownError> {
        let ss = get_syntax_set();
        let language = self.meta.language.as_deref().unwrap_or_default();

        let syntax = ss
            .find_syntax_by_token(language)
            .or_else(|| ss.find_syntax_by_name(language))
            .or_else(|| ss.find_syntax_by_extension(language))
            .or_else(|| ss.find_syntax_by_first_line(content))
            .unwrap_or_else(|| ss.find_syntax_plain_text());

        let mut h = HighlightLines::new(syntax, theme);

        let mut highlighted = String::new();
        for line in LinesWithEndings::from(content) {
            let regions = h.highlight_line(line, ss)?;
            let visible: Vec<_> = regions
                .into_iter()
                .map(|(style, text)| (style, text.trim_end_matches(['\r', '\n'])))
                .filter(|(_, text)| !text.is_empty())
                .collect();

            highlighted.push_str("<span data-line=\"\">");
            if visible.is_empty() {
                highlighted.push(' ');
            } else {
                highlighted.push_str(&styled_line_to_highlighted_html(
                    &visible,
                    IncludeBackground::No,
                )?);
            }
            highlighted.push_str("</span>\n");
        }

        Ok(highlighted)
    }
}
