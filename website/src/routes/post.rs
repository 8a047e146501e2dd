use maud::{Markup, PreEscaped, html};
use postpress::page::prelude::*;

use crate::layout::{SeoMeta, layout};
use crate::navigation::category_label;

pub struct PostPage;

impl PostPage {
    fn page(&self, ctx: &PageContext) -> Result<Markup, RenderError> {
        let record = ctx
            .current_record()
            .ok_or_else(|| format!("no post is published at {}", ctx.current_url))?;
        let body = ctx.render_markdown(record)?;

        Ok(layout(
            html! {
                article.post {
                    header {
                        @if let Some(cover) = &record.cover {
                            img.cover src=(cover) alt=(record.title) loading="lazy";
                        }
                        h1 { (record.title) }
                        p.meta {
                            time datetime=(record.date.to_rfc3339()) { (record.date.format("%Y-%m-%d").to_string()) }
                            " · "
                            a href=(category_route(&record.category)) { (category_label(ctx.navigation, &record.category)) }
                        }
                    }
                    @if !record.headings.is_empty() {
                        nav.toc {
                            h2 { "目录" }
                            ul {
                                @for heading in &record.headings {
                                    li data-level=(heading.level) {
                                        a href=(format!("#{}", heading.id)) { (heading.title) }
                                    }
                                }
                            }
                        }
                    }
                    div.prose { (PreEscaped(body)) }
                }
            },
            ctx,
            Some(SeoMeta {
                title: record.title.clone(),
                description: Some(record.description.clone()),
                ..Default::default()
            }),
        ))
    }
}

impl Route for PostPage {
    fn urls(&self, content: &ContentCollection) -> Vec<String> {
        content.iter().map(|record| record.url.clone()).collect()
    }

    fn render(&self, ctx: &PageContext) -> RenderResult {
        self.page(ctx).into()
    }
}
