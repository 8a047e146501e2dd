use maud::{Markup, html};
use postpress::navigation::{IconRef, Section};
use postpress::page::PageContext;

use super::SITE_TITLE;

fn section_title(section: Section) -> Option<&'static str> {
    match section {
        Section::Main => None,
        Section::Posts => Some("文章分类"),
        Section::Projects => Some("我的项目"),
        Section::Online => Some("在线"),
    }
}

/// Glyph shown for an icon token. Unknown tokens get a bullet.
fn icon(icon: &IconRef) -> &'static str {
    match icon.as_str() {
        "home" => "🏠",
        "user" => "👤",
        "laptop-code" => "💻",
        "brain" => "🧠",
        "rocket" => "🚀",
        "book" => "📚",
        "lightbulb" => "💡",
        "code" => "🛠",
        "github" => "🐙",
        "twitter" => "🐦",
        _ => "•",
    }
}

pub fn header(ctx: &PageContext) -> Markup {
    html! {
        aside.sidebar {
            a.site-title href="/" { h1 { (SITE_TITLE) } }
            nav {
                @for (section, entries) in ctx.navigation.sections() {
                    @if !entries.is_empty() {
                        @if let Some(title) = section_title(section) {
                            h2.section-title { (title) }
                        }
                        ul data-section=(section.name()) {
                            @for entry in entries {
                                @let current = entry.target.href() == ctx.current_url;
                                li.current[current] {
                                    span.icon aria-hidden="true" { (icon(&entry.icon)) }
                                    (entry)
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
