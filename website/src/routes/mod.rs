mod index;
pub use index::Index;
mod post;
pub use post::PostPage;
mod category;
pub use category::CategoryPage;
mod about;
pub use about::About;

#[path = "404.rs"]
mod not_found;
pub use not_found::NotFound;

use maud::{Markup, html};
use postpress::page::prelude::*;

use crate::navigation::category_label;

/// One line of a post listing.
pub fn post_card(record: &ContentRecord, ctx: &PageContext) -> Markup {
    html! {
        li.post-card {
            p.meta {
                time datetime=(record.date.to_rfc3339()) { (record.date.format("%Y-%m-%d").to_string()) }
                " · "
                a href=(category_route(&record.category)) { (category_label(ctx.navigation, &record.category)) }
            }
            h3 { a href=(record.url) { (record.title) } }
            p.description { (record.description) }
            @let tags = record.tags();
            @if !tags.is_empty() {
                ul.tags {
                    @for tag in tags {
                        li { "#" (tag) }
                    }
                }
            }
        }
    }
}
