use maud::html;
use postpress::page::prelude::*;

use crate::layout::{SeoMeta, layout};

pub struct NotFound;

impl Route for NotFound {
    fn urls(&self, _: &ContentCollection) -> Vec<String> {
        vec!["/404.html".into()]
    }

    fn render(&self, ctx: &PageContext) -> RenderResult {
        layout(
            html! {
                div.not-found {
                    h1 { "404" }
                    p { "找不到这个页面。" }
                    a.btn href="/" { "返回首页" }
                }
            },
            ctx,
            Some(SeoMeta {
                title: "页面不存在".to_string(),
                ..Default::default()
            }),
        )
        .into()
    }
}
