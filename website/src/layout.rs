use maud::{DOCTYPE, Markup, html};
mod header;

pub use header::header;
use postpress::maud::generator;
use postpress::page::PageContext;

pub const SITE_TITLE: &str = "Just be funny";
const SITE_DESCRIPTION: &str = "开发工程师，AI 爱好者，篮球迷，终身学习者。每周发送 AI 精选文章，欢迎订阅！";

pub struct SeoMeta {
    pub title: String,
    pub description: Option<String>,
    pub canonical_url: Option<String>,
}

impl Default for SeoMeta {
    fn default() -> Self {
        Self {
            title: SITE_TITLE.to_string(),
            description: Some(SITE_DESCRIPTION.to_string()),
            canonical_url: None,
        }
    }
}

impl SeoMeta {
    pub fn render(&self) -> Markup {
        let formatted_title = if self.title == SITE_TITLE {
            self.title.clone()
        } else {
            format!("{} - {}", self.title, SITE_TITLE)
        };

        let description = self.description.as_deref().unwrap_or(SITE_DESCRIPTION);

        html! {
            title { (formatted_title) }
            meta name="description" content=(description);

            // Open Graph meta tags
            meta property="og:title" content=(formatted_title);
            meta property="og:description" content=(description);
            meta property="og:type" content="website";
            @if let Some(canonical_url) = &self.canonical_url {
                meta property="og:url" content=(canonical_url);
                link rel="canonical" href=(canonical_url);
            }

            // Twitter Card meta tags
            meta name="twitter:card" content="summary_large_image";
            meta name="twitter:title" content=(formatted_title);
            meta name="twitter:description" content=(description);
        }
    }
}

pub fn layout(main: Markup, ctx: &PageContext, seo: Option<SeoMeta>) -> Markup {
    let seo_data = SeoMeta {
        canonical_url: ctx.canonical_url(),
        ..seo.unwrap_or_default()
    };

    html! {
        (DOCTYPE)
        html lang="zh-CN" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                (generator())
                link rel="stylesheet" href="/styles.css";
                (seo_data.render())
            }
            body {
                div.page {
                    (header(ctx))
                    main.content { (main) }
                }
                footer {
                    p { "© " (SITE_TITLE) }
                }
            }
        }
    }
}
