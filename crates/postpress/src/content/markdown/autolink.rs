//! Literal autolinks in prose: bare `https://…`, `http://…` and `www.…` become links.

#[derive(Debug, PartialEq)]
pub enum Segment<'a> {
    Text(&'a str),
    Link { href: String, text: &'a str },
}

const SCHEMES: &[&str] = &["https://", "http://", "www."];

/// Split a run of text into plain text and link segments.
pub fn find_links(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut cursor = 0;
    let mut search_from = 0;

    while let Some((start, scheme)) = next_candidate(text, search_from) {
        let end = link_end(text, start, scheme);

        if end <= start + scheme.len() {
            search_from = start + scheme.len();
            continue;
        }

        if start > cursor {
            segments.push(Segment::Text(&text[cursor..start]));
        }

        let link_text = &text[start..end];
        let href = if scheme == "www." {
            format!("http://{}", link_text)
        } else {
            link_text.to_string()
        };
        segments.push(Segment::Link { href, text: link_text });

        cursor = end;
        search_from = end;
    }

    if cursor < text.len() {
        segments.push(Segment::Text(&text[cursor..]));
    }

    segments
}

fn next_candidate(text: &str, from: usize) -> Option<(usize, &'static str)> {
    let mut position = from;

    while position < text.len() {
        let rest = &text[position..];
        let (offset, scheme) = SCHEMES
            .iter()
            .filter_map(|scheme| rest.find(scheme).map(|offset| (offset, *scheme)))
            .min_by_key(|(offset, _)| *offset)?;

        let start = position + offset;
        let at_boundary = text[..start]
            .chars()
            .next_back()
            .is_none_or(|c| c.is_whitespace() || matches!(c, '(' | '*' | '_' | '~' | '"' | '\''));

        if at_boundary {
            return Some((start, scheme));
        }

        position = start + scheme.len();
    }

    None
}

fn link_end(text: &str, start: usize, scheme: &str) -> usize {
    let body_start = start + scheme.len();
    let mut end = text[body_start..]
        .find(|c: char| c.is_whitespace() || c == '<')
        .map_or(text.len(), |offset| body_start + offset);

    // Trailing punctuation is not part of the link, and a closing parenthesis only is when balanced.
    loop {
        let candidate = &text[start..end];
        let Some(last) = candidate.chars().next_back() else {
            break;
        };

        let trim = match last {
            '?' | '!' | '.' | ',' | ':' | '*' | '_' | '~' | ';' | '"' | '\'' => true,
            ')' => candidate.matches(')').count() > candidate.matches('(').count(),
            _ => false,
        };

        if !trim || end <= body_start {
            break;
        }
        end -= last.len_utf8();
    }

    end
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_untouched() {
        assert_eq!(find_links("no links here"), vec![Segment::Text("no links here")]);
    }

    #[test]
    fn test_links_in_text() {
        let segments = find_links("see https://example.com/docs and www.rust-lang.org.");

        assert_eq!(
            segments,
            vec![
                Segment::Text("see "),
                Segment::Link {
                    href: "https://example.com/docs".into(),
                    text: "https://example.com/docs"
                },
                Segment::Text(" and "),
                Segment::Link {
                    href: "http://www.rust-lang.org".into(),
                    text: "www.rust-lang.org"
                },
                Segment::Text("."),
            ]
        );
    }

    #[test]
    fn test_parentheses() {
        let segments = find_links("(https://en.wikipedia.org/wiki/Rust_(programming_language))");

        assert_eq!(
            segments[1],
            Segment::Link {
                href: "https://en.wikipedia.org/wiki/Rust_(programming_language)".into(),
                text: "https://en.wikipedia.org/wiki/Rust_(programming_language)"
            }
        );
        assert_eq!(segments[2], Segment::Text(")"));
    }

    #[test]
    fn test_scheme_alone_is_not_a_link() {
        assert_eq!(find_links("https:// nothing"), vec![Segment::Text("https:// nothing")]);
    }

    #[test]
    fn test_scheme_inside_a_word_is_not_a_link() {
        assert_eq!(find_links("fakehttps://x.y"), vec![Segment::Text("fakehttps://x.y")]);
    }

    #[test]
    fn test_cjk_punctuation_boundary() {
        let segments = find_links("访问 https://github.com/macongcong 了解更多");

        assert_eq!(
            segments[1],
            Segment::Link {
                href: "https://github.com/macongcong".into(),
                text: "https://github.com/macongcong"
            }
        );
    }
}
