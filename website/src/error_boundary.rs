use std::error::Error;

use maud::html;
use postpress::page::{ErrorBoundary, PageContext};

use crate::layout::{SeoMeta, layout};

pub struct SiteErrorBoundary;

impl ErrorBoundary for SiteErrorBoundary {
    fn render(&self, ctx: &PageContext, _: &(dyn Error + Send + Sync)) -> String {
        layout(
            html! {
                div.error-page {
                    h1 { "出错了" }
                    h2 { "页面暂时无法访问" }
                    p { "抱歉，可能是由于域名解析或服务器配置问题导致。我们正在努力修复中。" }
                    div.actions {
                        a.btn href=(ctx.current_url) { "重试" }
                        a.btn href="/" { "返回首页" }
                    }
                }
            },
            ctx,
            Some(SeoMeta {
                title: "出错了".to_string(),
                ..Default::default()
            }),
        )
        .into_string()
    }
}
