use maud::html;
use postpress::navigation::NavigationSpec;
use postpress::page::prelude::*;

use super::post_card;
use crate::layout::{SeoMeta, layout};
use crate::navigation::category_label;

/// One page per category of the menu, plus one per category only found in posts.
pub struct CategoryPage {
    declared: Vec<String>,
}

impl CategoryPage {
    pub fn new(navigation: &NavigationSpec) -> Self {
        Self {
            declared: navigation.posts.iter().map(|category| category.key.clone()).collect(),
        }
    }
}

impl Route for CategoryPage {
    fn urls(&self, content: &ContentCollection) -> Vec<String> {
        let mut keys: Vec<&str> = self.declared.iter().map(String::as_str).collect();
        for (category, _) in content.categories() {
            if !keys.contains(&category) {
                keys.push(category);
            }
        }

        keys.into_iter().map(category_route).collect()
    }

    fn render(&self, ctx: &PageContext) -> RenderResult {
        let Some(key) = category_key(ctx.current_url) else {
            return RenderResult::Err(format!("{} is not a category page", ctx.current_url).into());
        };
        let label = category_label(ctx.navigation, key);
        let posts = ctx.content.filter_by_category(key);

        layout(
            html! {
                section {
                    h2 { (label) " " span.count { "(" (posts.len()) ")" } }
                    @if posts.is_empty() {
                        p.empty { "这个分类下还没有文章。" }
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
            Some(SeoMeta {
                title: label.to_string(),
                ..Default::default()
            }),
        )
        .into()
    }
}
