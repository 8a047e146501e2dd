use maud::html;
use postpress::page::prelude::*;

use super::post_card;
use crate::layout::layout;

pub struct Index;

impl Route for Index {
    fn urls(&self, _: &ContentCollection) -> Vec<String> {
        vec!["/".into()]
    }

    fn render(&self, ctx: &PageContext) -> RenderResult {
        let posts = ctx.content.sorted_by_date();

        layout(
            html! {
                section.hero {
                    h2 { "Just be funny~" }
                    p { "记录日常学习和思考的内容。" }
                }
                section {
                    h2 { "最新文章" }
                    @if posts.is_empty() {
                        p.empty { "还没有文章。" }
                    } @else {
                        ul.post-list {
                            @for record in posts {
                                (post_card(record, ctx))
                            }
                        }
                    }
                }
            },
            ctx,
            None,
        )
        .into()
    }
}
